use thiserror::Error;

/// Errors raised while constructing Pauli strings and masks.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum PauliError {
    /// Axis and qubit slices of a support declaration disagree in length.
    #[error("illegal basis declaration: {axes} axes for {qubits} qubits")]
    LengthMismatch { axes: usize, qubits: usize },

    /// A basis symbol outside {I, X, Y, Z}.
    #[error("unknown basis symbol {0:?}")]
    UnknownAxis(char),

    /// A declared qubit index does not fit the string width.
    #[error("qubit {qubit} out of range for width {width}")]
    QubitOutOfRange { qubit: usize, width: usize },

    /// The X and Z masks of a Pauli string differ in width.
    #[error("mask width mismatch: x is {x} bits, z is {z} bits")]
    WidthMismatch { x: usize, z: usize },

    /// A character other than '0'/'1' in a fixed-width binary mask string.
    #[error("invalid binary digit {0:?} in mask string")]
    BadBinaryDigit(char),
}
