use paulix::{Measure, Operation, PauliString};

use crate::error::RewriteError;

/// An owned, flat sequence of operations over a fixed qubit width, plus the
/// ancilla boundary the absorption pass works against.
///
/// Qubits `[0, ancilla_begin)` are data, `[ancilla_begin, qubit_count)` are
/// ancilla; the default boundary equals the width, meaning no ancilla.
/// Every rewrite pass mutates the sequence in place.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct Circuit {
    pub(crate) ops: Vec<Operation>,
    pub(crate) qubit_count: usize,
    pub(crate) ancilla_begin: usize,
}

impl Circuit {
    /// Wrap an operation sequence, deriving the width from its elements.
    ///
    /// # Errors
    ///
    /// [`RewriteError::EmptyCircuit`] on a zero-length sequence and
    /// [`RewriteError::WidthMismatch`] when the operations disagree on
    /// width.
    pub fn new(ops: Vec<Operation>) -> Result<Self, RewriteError> {
        let qubit_count = Self::common_width(&ops)?;
        Ok(Circuit {
            ops,
            qubit_count,
            ancilla_begin: qubit_count,
        })
    }

    /// Like [`Circuit::new`], with qubits `[ancilla_begin, width)` treated
    /// as ancilla.
    pub fn with_ancilla(ops: Vec<Operation>, ancilla_begin: usize) -> Result<Self, RewriteError> {
        let mut circuit = Self::new(ops)?;
        if ancilla_begin > circuit.qubit_count {
            return Err(RewriteError::AncillaOutOfRange {
                ancilla_begin,
                qubit_count: circuit.qubit_count,
            });
        }
        circuit.ancilla_begin = ancilla_begin;
        Ok(circuit)
    }

    /// Like [`Circuit::new`], appending `default_measurements` single-qubit
    /// Z measurements, the `i`-th on qubit `i`.
    ///
    /// The input must not already carry data-qubit measurements at its end.
    pub fn with_default_measurements(
        default_measurements: usize,
        mut ops: Vec<Operation>,
    ) -> Result<Self, RewriteError> {
        let qubit_count = Self::common_width(&ops)?;
        if default_measurements > qubit_count {
            return Err(RewriteError::DefaultMeasurementsOutOfRange {
                requested: default_measurements,
                qubit_count,
            });
        }
        ops.extend(
            (0..default_measurements)
                .map(|qubit| Operation::Measure(Measure::new(true, PauliString::z(qubit, qubit_count)))),
        );
        Self::new(ops)
    }

    fn common_width(ops: &[Operation]) -> Result<usize, RewriteError> {
        let Some(first) = ops.first() else {
            return Err(RewriteError::EmptyCircuit);
        };
        let expected = first.qubit_count();
        for op in ops {
            if op.qubit_count() != expected {
                return Err(RewriteError::WidthMismatch {
                    expected,
                    found: op.qubit_count(),
                });
            }
        }
        Ok(expected)
    }

    #[must_use]
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    #[must_use]
    pub fn ancilla_begin(&self) -> usize {
        self.ancilla_begin
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.ops
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.ops.iter()
    }

    /// Give the rewritten sequence back to the caller.
    #[must_use]
    pub fn into_operations(self) -> Vec<Operation> {
        self.ops
    }
}
