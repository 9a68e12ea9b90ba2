use paulix::{
    conjugate_conditional, conjugate_measure, conjugate_rotation, BitMask, BlockAction, Operation,
};
use tracing::error;

use crate::error::RewriteError;

/// What happens to each rotation ahead of the measurement block.
#[derive(Clone, Copy, PartialEq)]
enum Disposition {
    /// Untouched; compacted to the left of the measurement block.
    Keep,
    /// Commuted through the block; re-appended behind it.
    Commute,
    /// An ancilla rotation whose every qubit is measured; deleted.
    Deallocate,
}

/// Bubble single-qubit rotations rightward toward the measurement block
/// (they commute onto lattice-surgery patch edges cheaply). `last_rotation`
/// is the index of the last rotation before the block. Returns the first
/// index of the trailing single-qubit run.
pub(crate) fn rearrange_single_qubit(
    ops: &mut [Operation],
    t_count: usize,
    last_rotation: usize,
) -> usize {
    // Skip the block that is already trailing.
    let mut start_single = last_rotation + 1;
    for index in (t_count..=last_rotation).rev() {
        if ops[index].is_single_qubit() {
            start_single -= 1;
        } else {
            break;
        }
    }

    if start_single < 2 {
        return start_single;
    }
    for current in (t_count..=start_single - 2).rev() {
        if !ops[current].is_single_qubit() {
            continue;
        }
        let mut position = current;
        let mut reached_block = true;
        while position + 1 < start_single {
            if ops[position].commutes_with(&ops[position + 1]) {
                ops.swap(position, position + 1);
                position += 1;
            } else {
                reached_block = false;
                break;
            }
        }
        if reached_block {
            start_single -= 1;
        }
    }
    start_single
}

/// Walk Clifford/Pauli rotations right-to-left into the trailing
/// measurement block, conjugating the block past each one.
///
/// Precondition: `ops[t_count..]` is rotations followed by a contiguous
/// measurement block. Per rotation, the ancilla gates decide whether it may
/// act: an ancilla-only rotation needs all its ancillas measured, a mixed
/// rotation needs none of them measured, a data-only rotation always acts;
/// the first rotation that fails its gate ends the pass. Acting rotations
/// are deleted (fully-measured ancilla case) or moved behind the block,
/// relative orders preserved on both sides. Returns how many rotations
/// were commuted through.
pub(crate) fn absorb_into_measurements(
    ops: &mut Vec<Operation>,
    qubit_count: usize,
    ancilla_begin: usize,
    t_count: usize,
) -> Result<usize, RewriteError> {
    // Union of the support of every trailing measurement.
    let mut overall = BitMask::zeros(qubit_count);
    let mut last_rotation = None;
    for index in (t_count..ops.len()).rev() {
        match &ops[index] {
            Operation::Measure(measure) => {
                overall = &overall | &measure.observable().support_mask();
            }
            Operation::Rotation(_) => {
                last_rotation = Some(index);
                break;
            }
        }
    }
    let Some(last_rotation) = last_rotation else {
        return Ok(0);
    };

    let ancilla = BitMask::with_range(qubit_count, ancilla_begin..qubit_count);
    rearrange_single_qubit(ops, t_count, last_rotation);

    let first_measure = last_rotation + 1;
    let mut disposition = vec![Disposition::Keep; ops.len()];
    let mut commuted = 0;

    for index in (t_count..=last_rotation).rev() {
        let rotation = match &ops[index] {
            Operation::Rotation(rotation) => rotation.clone(),
            Operation::Measure(_) => {
                error!(index, "expected a rotation before the measurement block");
                break;
            }
        };

        let measured_ancillas = &(&ancilla & &rotation.basis().support_mask()) & &overall;
        let touched_ancillas = &ancilla & &rotation.basis().support_mask();
        let may_act = match rotation.block_action(ancilla_begin) {
            // Only fully-measured ancilla rotations may be deallocated.
            BlockAction::Ancilla => measured_ancillas == touched_ancillas,
            // A mixed rotation may not cross a measured ancilla.
            BlockAction::Both => measured_ancillas.is_zero(),
            BlockAction::Data => true,
        };
        if !may_act {
            break;
        }

        for tail_index in first_measure..ops.len() {
            if !ops[tail_index].pauli().commutes_with(rotation.basis()) {
                ops[tail_index] = match &ops[tail_index] {
                    Operation::Measure(measure) => {
                        Operation::Measure(conjugate_measure(&rotation, measure)?)
                    }
                    Operation::Rotation(trailing) => {
                        Operation::Rotation(conjugate_rotation(&rotation, trailing)?)
                    }
                };
            } else if let Operation::Measure(measure) = &mut ops[tail_index] {
                // A commuting measurement may still hold anticommuting
                // classically-controlled rotations.
                conjugate_conditional(&rotation, measure)?;
            }
        }

        if rotation.block_action(ancilla_begin) == BlockAction::Ancilla
            && measured_ancillas == touched_ancillas
        {
            disposition[index] = Disposition::Deallocate;
        } else {
            disposition[index] = Disposition::Commute;
            commuted += 1;
        }
    }

    // Compact: kept rotations, the measurement block, then the
    // commuted-through rotations, all in their original relative orders.
    let tail: Vec<Operation> = ops.split_off(t_count);
    let mut moved = Vec::with_capacity(commuted);
    for (offset, op) in tail.into_iter().enumerate() {
        match disposition[t_count + offset] {
            Disposition::Keep => ops.push(op),
            Disposition::Commute => moved.push(op),
            Disposition::Deallocate => {}
        }
    }
    ops.append(&mut moved);
    Ok(commuted)
}
