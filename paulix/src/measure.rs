use std::fmt;

use crate::pauli::PauliString;
use crate::rotation::Rotation;

/// Projective measurement of the Pauli observable `φ·P̂`.
///
/// `phase = true` measures `+P̂`, `false` measures `−P̂`. On outcome 1 the
/// rotations in `conditional` are applied, in order. `output_position` is a
/// stable slot the caller may use to preserve external ordering; the
/// rewriter carries it through conjugations and never interprets it.
///
/// Two measurements with all-zero observables compare equal regardless of
/// phase; otherwise equality is fieldwise.
#[derive(Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measure {
    observable: PauliString,
    phase: bool,
    conditional: Vec<Rotation>,
    output_position: Option<usize>,
}

impl Measure {
    #[must_use]
    pub fn new(phase: bool, observable: PauliString) -> Self {
        Measure {
            observable,
            phase,
            conditional: Vec::new(),
            output_position: None,
        }
    }

    /// A measurement followed by classically-controlled rotations on
    /// outcome 1.
    #[must_use]
    pub fn with_conditional(phase: bool, observable: PauliString, conditional: Vec<Rotation>) -> Self {
        Measure {
            observable,
            phase,
            conditional,
            output_position: None,
        }
    }

    #[must_use]
    pub fn at_output_position(mut self, position: usize) -> Self {
        self.output_position = Some(position);
        self
    }

    #[must_use]
    pub fn observable(&self) -> &PauliString {
        &self.observable
    }

    #[must_use]
    pub fn phase(&self) -> bool {
        self.phase
    }

    #[must_use]
    pub fn conditional(&self) -> &[Rotation] {
        &self.conditional
    }

    pub(crate) fn conditional_mut(&mut self) -> &mut [Rotation] {
        &mut self.conditional
    }

    #[must_use]
    pub fn output_position(&self) -> Option<usize> {
        self.output_position
    }

    #[must_use]
    pub fn qubit_count(&self) -> usize {
        self.observable.qubit_count()
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.observable.is_identity()
    }

    #[must_use]
    pub fn has_conditional(&self) -> bool {
        !self.conditional.is_empty()
    }

    pub fn flip_phase(&mut self) {
        self.phase = !self.phase;
    }

    pub(crate) fn assign_observable(&mut self, observable: PauliString) {
        self.observable = observable;
    }

    #[inline]
    #[must_use]
    pub fn commutes_with(&self, other: &PauliString) -> bool {
        self.observable.commutes_with(other)
    }
}

impl PartialEq for Measure {
    fn eq(&self, other: &Self) -> bool {
        (self.observable == other.observable
            && self.phase == other.phase
            && self.conditional == other.conditional)
            || (self.is_identity() && other.is_identity())
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.phase { '+' } else { '-' };
        write!(f, "M{} {}", sign, self.observable)?;
        for rotation in &self.conditional {
            write!(f, " ?{rotation}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as fmt::Display>::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pauli(s: &str) -> PauliString {
        s.parse().unwrap()
    }

    #[test]
    fn identity_measurements_compare_equal_regardless_of_phase() {
        assert_eq!(Measure::new(true, pauli("II")), Measure::new(false, pauli("II")));
        assert_ne!(Measure::new(true, pauli("XI")), Measure::new(false, pauli("XI")));
    }

    #[test]
    fn equality_includes_conditional_rotations() {
        let bare = Measure::new(true, pauli("ZI"));
        let conditioned = Measure::with_conditional(
            true,
            pauli("ZI"),
            vec![Rotation::new(0, pauli("XI"))],
        );
        assert_ne!(bare, conditioned);
        assert!(conditioned.has_conditional());
    }

    #[test]
    fn phase_flip_toggles() {
        let mut measure = Measure::new(true, pauli("XZ"));
        measure.flip_phase();
        assert!(!measure.phase());
        measure.flip_phase();
        assert!(measure.phase());
    }

    #[test]
    fn output_position_is_carried() {
        let measure = Measure::new(true, pauli("XZ")).at_output_position(7);
        assert_eq!(measure.output_position(), Some(7));
    }

    #[test]
    fn display_shows_phase_and_observable() {
        assert_eq!(Measure::new(false, pauli("XIZ")).to_string(), "M- XIZ");
    }
}
