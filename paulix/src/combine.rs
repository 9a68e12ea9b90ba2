use crate::rotation::Rotation;

/// Result of attempting to fuse two rotations.
#[derive(Clone, Debug, PartialEq)]
pub enum CombineOutcome {
    /// The pair cancels outright; both rotations disappear.
    Annihilated,
    /// The pair fuses into a single rotation.
    Fused(Rotation),
    /// The pair cannot be fused; both rotations stand.
    Refused,
}

impl CombineOutcome {
    #[must_use]
    pub fn merged(&self) -> bool {
        !matches!(self, CombineOutcome::Refused)
    }
}

/// Fuse two same-basis rotations under the discrete angle algebra.
///
/// The angle codes close over `{−2, −1, 0, 1, 2}`; sums that leave the set
/// are either canonicalised (`±4 → 0`, the Pauli; the sanctioned
/// `(0, −2)`-pair sum `−2 → +2`) or refused (`±3`, which would be 5π/8).
/// A Pauli (code 0) otherwise refuses to fuse with any non-Pauli.
///
/// Symmetric in its arguments except that a fused rotation keeps the first
/// operand's basis, which equals the second's whenever fusion happens.
#[must_use]
pub fn combine(first: &Rotation, second: &Rotation) -> CombineOutcome {
    match (first.is_identity(), second.is_identity()) {
        (true, true) => return CombineOutcome::Annihilated,
        (true, false) => return CombineOutcome::Fused(second.clone()),
        (false, true) => return CombineOutcome::Fused(first.clone()),
        (false, false) => {}
    }

    if first.basis() != second.basis() {
        return CombineOutcome::Refused;
    }

    let mut sum = first.angle() + second.angle();
    if sum == 0 {
        return CombineOutcome::Annihilated;
    }

    // A Pauli fuses only with a −π/4 Clifford, canonicalised to +π/4.
    if first.angle() == 0 || second.angle() == 0 {
        let angles = (first.angle(), second.angle());
        if angles != (-2, 0) && angles != (0, -2) {
            return CombineOutcome::Refused;
        }
        if sum == -2 {
            sum = 2;
        }
    }

    // 5π/8 is outside the representable set; refuse rather than wrap.
    if sum.abs() == 3 {
        return CombineOutcome::Refused;
    }

    if sum.abs() == 4 {
        sum = 0;
    }

    CombineOutcome::Fused(Rotation::new(sum, first.basis().clone()))
}
