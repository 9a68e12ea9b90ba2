use std::time::{Duration, Instant};

use paulix::Operation;
use tracing::{debug, warn};

use crate::circuit::Circuit;
use crate::error::RewriteError;
use crate::{absorb, forward, fuse, layers};

/// Caller-facing switches for one section rewrite.
#[derive(Clone, Copy, Debug, Default)]
pub struct RewriteOptions {
    /// Run the measurement-absorption pass after the fixed point.
    pub absorb: bool,
    /// Also return the final sequence as commuting layers.
    pub layer_out: bool,
    /// Bound the fixed-point loop; on expiry the driver finalises the
    /// current coherent state and returns early.
    pub timeout: Option<Duration>,
}

/// What one section rewrite produced.
///
/// The rewritten sequence itself stays in the [`Circuit`]. When sections
/// are compiled back-to-back, take the `[commuted_start..]` slice of this
/// section's operations and prepend it to the next section's input.
#[derive(Debug)]
#[must_use]
pub struct SectionOutcome {
    /// Length of the leading all-T prefix.
    pub t_count: usize,
    /// Index after which the commuted-through Clifford tail begins.
    pub commuted_start: usize,
    /// The deadline expired before the fixed point converged.
    pub timed_out: bool,
    /// The layered view of the final sequence, when requested.
    pub layers: Option<Vec<Vec<Operation>>>,
}

#[derive(Clone, Copy)]
struct Deadline(Option<Instant>);

impl Deadline {
    fn starting_now(timeout: Option<Duration>) -> Self {
        Deadline(timeout.map(|limit| Instant::now() + limit))
    }

    fn expired(&self) -> bool {
        self.0.is_some_and(|at| Instant::now() >= at)
    }
}

impl Circuit {
    /// Rewrite this section: T rotations to the front, compatible
    /// rotations fused, and (optionally) the Clifford/Pauli remainder
    /// absorbed into the trailing measurements.
    ///
    /// The pipeline fuses adjacent pairs once up front, then iterates
    /// T-forwarding, greedy layering, and in-layer fusion to a fixed
    /// point, re-queueing the non-T middle each round. The accumulated
    /// non-T remainder is layered and fused once before rejoining the
    /// sequence. With [`RewriteOptions::absorb`] set, single-qubit
    /// rotations are bubbled toward the measurement block and the
    /// absorption walk runs; its commuted-through tail count determines
    /// [`SectionOutcome::commuted_start`].
    ///
    /// # Errors
    ///
    /// [`RewriteError::Conjugation`] if a conjugation is ever invoked with
    /// a non-Clifford, non-Pauli operand; this indicates a corrupted
    /// sequence and leaves the circuit in an unspecified (but owned and
    /// droppable) state.
    pub fn rewrite(&mut self, options: &RewriteOptions) -> Result<SectionOutcome, RewriteError> {
        let deadline = Deadline::starting_now(options.timeout);
        let mut timed_out = false;

        fuse::combine_adjacent(&mut self.ops);

        // Non-T gates migrate here round by round; each round's middle is
        // older than the last, so it goes to the front.
        let mut back_non_t: Vec<Operation> = Vec::new();
        let mut t_count = 0;
        let mut changed = true;

        while changed {
            changed = false;

            t_count = forward::push_t_forward(&mut self.ops)?;
            if deadline.expired() {
                warn!(t_count, "deadline reached during T-forwarding; finalising early");
                timed_out = true;
                break;
            }

            let middle = self.ops.split_off(t_count);
            back_non_t.splice(0..0, middle);

            let mut t_layers = layers::build_layers(std::mem::take(&mut self.ops));
            if !deadline.expired() {
                for layer in &mut t_layers {
                    changed |= fuse::fuse_commuting(layer);
                }
            }
            self.ops = t_layers.into_iter().flatten().collect();

            if deadline.expired() {
                warn!("deadline reached during layer fusion; finalising early");
                timed_out = true;
                changed = false;
            }
        }

        if !timed_out {
            t_count = self.ops.len();
            // One layering-and-fusion pass over the non-T remainder before
            // it rejoins the sequence.
            let mut tail_layers = layers::build_layers(std::mem::take(&mut back_non_t));
            for layer in &mut tail_layers {
                fuse::fuse_commuting(layer);
            }
            back_non_t = tail_layers.into_iter().flatten().collect();
        }
        self.ops.append(&mut back_non_t);
        debug!(t_count, total = self.ops.len(), timed_out, "fixed point finished");

        let mut commuted = 0;
        if options.absorb && !timed_out {
            commuted = absorb::absorb_into_measurements(
                &mut self.ops,
                self.qubit_count,
                self.ancilla_begin,
                t_count,
            )?;
            debug!(commuted, "absorption finished");
        }
        let commuted_start = self.ops.len() - commuted;

        let layers = options
            .layer_out
            .then(|| layers::build_layers(self.ops.clone()));

        Ok(SectionOutcome {
            t_count,
            commuted_start,
            timed_out,
            layers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paulix::Rotation;

    fn rotation(angle: i8, basis: &str) -> Operation {
        Operation::Rotation(Rotation::new(angle, basis.parse().unwrap()))
    }

    #[test]
    fn opposite_t_rotations_cancel_to_nothing() {
        let mut circuit =
            Circuit::new(vec![rotation(1, "XYZ"), rotation(-1, "XYZ")]).unwrap();
        let outcome = circuit.rewrite(&RewriteOptions::default()).unwrap();
        assert_eq!(outcome.t_count, 0);
        assert!(circuit.is_empty());
    }

    #[test]
    fn pauli_and_clifford_canonicalise() {
        let mut circuit =
            Circuit::new(vec![rotation(0, "XYZ"), rotation(-2, "XYZ")]).unwrap();
        let outcome = circuit.rewrite(&RewriteOptions::default()).unwrap();
        assert_eq!(outcome.t_count, 0);
        assert_eq!(circuit.operations(), &[rotation(2, "XYZ")]);
    }

    #[test]
    fn t_gets_pushed_ahead_of_an_anticommuting_pauli() {
        let mut circuit =
            Circuit::new(vec![rotation(0, "ZXI"), rotation(1, "XII")]).unwrap();
        let outcome = circuit.rewrite(&RewriteOptions::default()).unwrap();
        assert_eq!(outcome.t_count, 1);
        assert_eq!(
            circuit.operations(),
            &[rotation(-1, "XII"), rotation(0, "ZXI")]
        );
    }

    #[test]
    fn identical_t_run_collapses_completely() {
        let mut circuit = Circuit::new(vec![rotation(1, "XII"); 200]).unwrap();
        let outcome = circuit.rewrite(&RewriteOptions::default()).unwrap();
        assert_eq!(outcome.t_count, 0);
        assert!(circuit.is_empty());
    }

    #[test]
    fn zero_timeout_finalises_without_corruption() {
        let ops: Vec<Operation> = (0..40)
            .flat_map(|_| [rotation(0, "ZIII"), rotation(1, "XIII")])
            .collect();
        let mut circuit = Circuit::new(ops).unwrap();
        let options = RewriteOptions {
            timeout: Some(Duration::ZERO),
            ..RewriteOptions::default()
        };
        let outcome = circuit.rewrite(&options).unwrap();
        assert!(outcome.timed_out);
        // Every element is still there, in a valid interleaving.
        assert_eq!(circuit.len(), 80);
        assert_eq!(outcome.commuted_start, circuit.len());
    }

    #[test]
    fn layer_out_returns_mutually_commuting_layers() {
        let mut circuit = Circuit::new(vec![
            rotation(1, "ZII"),
            rotation(1, "IZI"),
            rotation(1, "XXI"),
        ])
        .unwrap();
        let options = RewriteOptions {
            layer_out: true,
            ..RewriteOptions::default()
        };
        let outcome = circuit.rewrite(&options).unwrap();
        let layered = outcome.layers.expect("layer_out was requested");
        for layer in &layered {
            for (index, left) in layer.iter().enumerate() {
                for right in &layer[index + 1..] {
                    assert!(left.commutes_with(right));
                }
            }
        }
        let total: usize = layered.iter().map(Vec::len).sum();
        assert_eq!(total, circuit.len());
    }
}
