use paulix::ConjugateError;
use thiserror::Error;

/// Errors raised at the rewriter's API boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RewriteError {
    /// The caller passed a zero-length circuit.
    #[error("input circuit must contain at least one operation")]
    EmptyCircuit,

    /// Every operation in a circuit must share one qubit width.
    #[error("operation width {found} does not match circuit width {expected}")]
    WidthMismatch { expected: usize, found: usize },

    /// The ancilla boundary must lie within `[0, qubit_count]`.
    #[error("ancilla boundary {ancilla_begin} exceeds qubit count {qubit_count}")]
    AncillaOutOfRange {
        ancilla_begin: usize,
        qubit_count: usize,
    },

    /// More default measurements requested than there are qubits.
    #[error("{requested} default measurements requested for {qubit_count} qubits")]
    DefaultMeasurementsOutOfRange {
        requested: usize,
        qubit_count: usize,
    },

    /// A conjugation was invoked with a non-Clifford, non-Pauli operand.
    #[error(transparent)]
    Conjugation(#[from] ConjugateError),
}
