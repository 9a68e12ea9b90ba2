//! Pauli-string algebra for Clifford+T circuit rewriting.
//!
//! A circuit element is either a [`Rotation`] (a Pauli string plus a
//! discrete angle code) or a [`Measure`] (a Pauli observable plus a phase
//! and optional classically-controlled rotations). This crate provides the
//! element types, the commutation test, the angle combiner
//! ([`combine()`]), and the [`conjugate_rotation`]/[`conjugate_measure`]
//! rules for pushing a Pauli or Clifford rotation through another element.
//! The passes that use these rules live in the `tfront` crate.

pub mod combine;
pub mod conjugate;
pub mod error;
pub mod mask;
pub mod measure;
pub mod operation;
pub mod pauli;
pub mod rotation;

pub use combine::{combine, CombineOutcome};
pub use conjugate::{conjugate_conditional, conjugate_measure, conjugate_rotation, ConjugateError};
pub use error::PauliError;
pub use mask::BitMask;
pub use measure::Measure;
pub use operation::Operation;
pub use pauli::{anti_commutes_with, commutes_with, pauli_random, Axis, BlockAction, PauliString};
pub use rotation::Rotation;
