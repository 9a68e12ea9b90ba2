use std::fmt;

use crate::measure::Measure;
use crate::pauli::PauliString;
use crate::rotation::Rotation;

/// A circuit element: either a Pauli-basis rotation or a Pauli-basis
/// measurement.
///
/// The rewriter works over flat `Vec<Operation>` sequences; passes reorder,
/// rewrite, and remove elements in place.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operation {
    Rotation(Rotation),
    Measure(Measure),
}

impl Operation {
    /// The Pauli string this element acts through: a rotation's basis or a
    /// measurement's observable.
    #[must_use]
    pub fn pauli(&self) -> &PauliString {
        match self {
            Operation::Rotation(rotation) => rotation.basis(),
            Operation::Measure(measure) => measure.observable(),
        }
    }

    #[must_use]
    pub fn qubit_count(&self) -> usize {
        self.pauli().qubit_count()
    }

    #[must_use]
    pub fn is_rotation(&self) -> bool {
        matches!(self, Operation::Rotation(_))
    }

    #[must_use]
    pub fn is_measure(&self) -> bool {
        matches!(self, Operation::Measure(_))
    }

    /// True only for rotations that are T gates; measurements are never T.
    #[must_use]
    pub fn is_t_gate(&self) -> bool {
        match self {
            Operation::Rotation(rotation) => rotation.is_t_gate(),
            Operation::Measure(_) => false,
        }
    }

    #[must_use]
    pub fn is_single_qubit(&self) -> bool {
        self.pauli().is_single_qubit()
    }

    #[must_use]
    pub fn as_rotation(&self) -> Option<&Rotation> {
        match self {
            Operation::Rotation(rotation) => Some(rotation),
            Operation::Measure(_) => None,
        }
    }

    #[must_use]
    pub fn as_measure(&self) -> Option<&Measure> {
        match self {
            Operation::Rotation(_) => None,
            Operation::Measure(measure) => Some(measure),
        }
    }

    #[inline]
    #[must_use]
    pub fn commutes_with(&self, other: &Operation) -> bool {
        self.pauli().commutes_with(other.pauli())
    }
}

impl From<Rotation> for Operation {
    fn from(rotation: Rotation) -> Self {
        Operation::Rotation(rotation)
    }
}

impl From<Measure> for Operation {
    fn from(measure: Measure) -> Self {
        Operation::Measure(measure)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Rotation(rotation) => rotation.fmt(f),
            Operation::Measure(measure) => measure.fmt(f),
        }
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as fmt::Display>::fmt(self, f)
    }
}
