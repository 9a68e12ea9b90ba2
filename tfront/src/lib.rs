//! Clifford+T circuit rewriter for lattice-surgery compilation.
//!
//! A circuit arrives as a flat sequence of Pauli-basis rotations and
//! measurements (the [`paulix`] operation model). [`Circuit::rewrite`]
//! pushes every T rotation to the front of the section, fuses compatible
//! rotations inside greedily-built commuting layers, and optionally
//! absorbs the remaining Clifford/Pauli rotations into the trailing
//! measurement block by change of basis, exposing the commuted-through
//! tail for forwarding into the next section.
//!
//! ```
//! use paulix::{Operation, Rotation};
//! use tfront::{Circuit, RewriteOptions};
//!
//! let ops = vec![
//!     Operation::Rotation(Rotation::new(1, "XYZ".parse().unwrap())),
//!     Operation::Rotation(Rotation::new(-1, "XYZ".parse().unwrap())),
//! ];
//! let mut circuit = Circuit::new(ops).unwrap();
//! let outcome = circuit.rewrite(&RewriteOptions::default()).unwrap();
//! assert_eq!(outcome.t_count, 0);
//! assert!(circuit.is_empty());
//! ```
//!
//! The two hot passes fan out over up to 50 workers holding disjoint
//! index ranges of the sequence; the driver is the only synchroniser and
//! re-runs each pass over a shrinking window until the result converges,
//! so the final output does not depend on the worker count.

pub use paulix;

mod absorb;
mod circuit;
mod driver;
mod error;
mod forward;
mod fuse;
mod layers;
mod parallel;

pub use circuit::Circuit;
pub use driver::{RewriteOptions, SectionOutcome};
pub use error::RewriteError;
