use thiserror::Error;

use crate::measure::Measure;
use crate::pauli::PauliString;
use crate::rotation::Rotation;

/// The pushed-through rotation must be a Pauli gate or a Clifford.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConjugateError {
    #[error("cannot push a rotation with angle code {angle} through another operation; only Pauli (0) and Clifford (±2) rotations may be pushed")]
    NotCliffordOrPauli { angle: i8 },
}

/// Sign bookkeeping for the product `i · P_a · P_b` as a signed Pauli.
///
/// Four parity terms account for the per-qubit reorderings of Y = iXZ
/// (Z·X, Y·X, Z·Y, Y·Y); the final term counts the net factors of i
/// accumulated across the product. Returns whether the overall sign flips.
fn conjugation_flips(through: &PauliString, target: &PauliString, product: &PauliString) -> bool {
    let through_y = through.y_mask();
    let target_y = target.y_mask();
    let through_z_only = &!through.x_bits() & through.z_bits();
    let target_x_only = target.x_bits() & &!target.z_bits();

    let mut flips = (&through_z_only & &target_x_only).parity();
    flips ^= (&through_y & &target_x_only).parity();
    flips ^= (&through_z_only & &target_y).parity();
    flips ^= (&through_y & &target_y).parity();

    let i_count = through_y.weight() as i32 + target_y.weight() as i32
        - product.y_mask().weight() as i32
        + 1;
    flips ^ (i_count % 4 != 0)
}

/// Push `through` rightward past `target`, returning the rewritten target.
///
/// The operands must anticommute; on commuting pairs no rewrite is needed
/// and this must not be called. `through` itself is unchanged by the push.
///
/// A Pauli `through` (code 0) negates the target's angle and leaves its
/// basis alone. A Clifford `through` (code ±2) moves the target onto the
/// basis `P_through ⊕ P_target` with the sign folded into the angle.
///
/// # Errors
///
/// [`ConjugateError::NotCliffordOrPauli`] when `through` is a T gate.
pub fn conjugate_rotation(through: &Rotation, target: &Rotation) -> Result<Rotation, ConjugateError> {
    if through.is_pauli_gate() {
        return Ok(Rotation::new(-target.angle(), target.basis().clone()));
    }
    if !through.is_clifford() {
        return Err(ConjugateError::NotCliffordOrPauli {
            angle: through.angle(),
        });
    }

    let product = through.basis().product_basis(target.basis());
    let flips =
        (through.angle() < 0) ^ conjugation_flips(through.basis(), target.basis(), &product);
    let angle = if flips { -target.angle() } else { target.angle() };
    Ok(Rotation::new(angle, product))
}

/// Push `through` rightward past the measurement `target`.
///
/// Same contract as [`conjugate_rotation`]: the rotation and the observable
/// must anticommute. A Pauli flips the measurement phase; a Clifford moves
/// the observable onto the product basis with the sign folded into the
/// phase. Classically-controlled rotations inside the measurement that
/// anticommute with `through` are rewritten as well.
///
/// # Errors
///
/// [`ConjugateError::NotCliffordOrPauli`] when `through` is a T gate.
pub fn conjugate_measure(through: &Rotation, target: &Measure) -> Result<Measure, ConjugateError> {
    let mut updated = target.clone();

    if through.is_pauli_gate() {
        updated.flip_phase();
    } else if through.is_clifford() {
        let product = through.basis().product_basis(target.observable());
        let mut flips = conjugation_flips(through.basis(), target.observable(), &product);
        flips ^= through.angle() == -2;
        updated.assign_observable(product);
        if flips {
            updated.flip_phase();
        }
    } else {
        return Err(ConjugateError::NotCliffordOrPauli {
            angle: through.angle(),
        });
    }

    conjugate_conditional(through, &mut updated)?;
    Ok(updated)
}

/// Rewrite the classically-controlled rotations of `target` that
/// anticommute with `through`, in place.
///
/// Needed on its own when a measurement commutes with the pushed rotation
/// (so its observable is untouched) but its conditional list is not.
///
/// # Errors
///
/// [`ConjugateError::NotCliffordOrPauli`] when `through` is a T gate.
pub fn conjugate_conditional(through: &Rotation, target: &mut Measure) -> Result<(), ConjugateError> {
    for conditional in target.conditional_mut() {
        if !conditional.commutes_with(through.basis()) {
            *conditional = conjugate_rotation(through, conditional)?;
        }
    }
    Ok(())
}
