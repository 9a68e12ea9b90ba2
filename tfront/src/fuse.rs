use paulix::{combine, CombineOutcome, Operation};

fn try_combine(first: &Operation, second: &Operation) -> CombineOutcome {
    match (first, second) {
        (Operation::Rotation(a), Operation::Rotation(b)) => combine(a, b),
        // Measurements never fuse.
        _ => CombineOutcome::Refused,
    }
}

/// One unordered fusion pass over a commuting layer. A lone identity
/// rotation is dropped outright.
fn fuse_layer_once(layer: &mut Vec<Operation>) -> bool {
    if layer.len() == 1 {
        if matches!(&layer[0], Operation::Rotation(rotation) if rotation.is_identity()) {
            layer.clear();
            return true;
        }
        return false;
    }

    let mut changed = false;
    let mut first = 0;
    while first < layer.len() {
        let mut second = first + 1;
        while second < layer.len() {
            match try_combine(&layer[first], &layer[second]) {
                CombineOutcome::Annihilated => {
                    layer.remove(second);
                    layer.remove(first);
                    changed = true;
                    second = first + 1;
                }
                CombineOutcome::Fused(rotation) => {
                    layer[first] = Operation::Rotation(rotation);
                    layer.remove(second);
                    changed = true;
                }
                CombineOutcome::Refused => second += 1,
            }
        }
        first += 1;
    }
    changed
}

/// Fuse a layer of mutually-commuting operations to a fixed point.
///
/// Order inside a layer is immaterial, so every pair is a candidate.
/// Returns whether anything fused.
pub(crate) fn fuse_commuting(layer: &mut Vec<Operation>) -> bool {
    let mut changed = false;
    while fuse_layer_once(layer) {
        changed = true;
    }
    changed
}

/// Driver step 1: fuse adjacent pairs across the flat sequence, restarting
/// the neighbourhood after each success, until a full left-to-right pass
/// fuses nothing.
pub(crate) fn combine_adjacent(ops: &mut Vec<Operation>) {
    loop {
        let mut changed = false;
        let mut index = 0;
        while index + 1 < ops.len() {
            match try_combine(&ops[index], &ops[index + 1]) {
                CombineOutcome::Annihilated => {
                    ops.remove(index + 1);
                    ops.remove(index);
                    index = index.saturating_sub(1);
                    changed = true;
                }
                CombineOutcome::Fused(rotation) => {
                    ops[index] = Operation::Rotation(rotation);
                    ops.remove(index + 1);
                    index = index.saturating_sub(1);
                    changed = true;
                }
                CombineOutcome::Refused => index += 1,
            }
        }
        if !changed {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paulix::{Measure, Rotation};

    fn rotation(angle: i8, basis: &str) -> Operation {
        Operation::Rotation(Rotation::new(angle, basis.parse().unwrap()))
    }

    #[test]
    fn adjacent_opposite_t_gates_cancel() {
        let mut ops = vec![rotation(1, "XYZ"), rotation(-1, "XYZ")];
        combine_adjacent(&mut ops);
        assert!(ops.is_empty());
    }

    #[test]
    fn adjacent_pauli_and_negative_clifford_canonicalise() {
        let mut ops = vec![rotation(0, "XYZ"), rotation(-2, "XYZ")];
        combine_adjacent(&mut ops);
        assert_eq!(ops, vec![rotation(2, "XYZ")]);
    }

    #[test]
    fn neighbourhood_restart_cascades() {
        // The middle pair cancels, bringing the outer pair together.
        let mut ops = vec![
            rotation(1, "XI"),
            rotation(1, "ZI"),
            rotation(-1, "ZI"),
            rotation(-1, "XI"),
        ];
        combine_adjacent(&mut ops);
        assert!(ops.is_empty());
    }

    #[test]
    fn a_same_basis_run_collapses_completely() {
        // 200 identical T gates: pairs fuse to Cliffords, Cliffords to
        // Paulis, Paulis annihilate.
        let mut ops = vec![rotation(1, "XII"); 200];
        combine_adjacent(&mut ops);
        assert!(ops.is_empty());
    }

    #[test]
    fn measurements_are_not_fused() {
        let mut ops = vec![
            Operation::Measure(Measure::new(true, "XI".parse().unwrap())),
            Operation::Measure(Measure::new(true, "XI".parse().unwrap())),
        ];
        combine_adjacent(&mut ops);
        assert_eq!(ops.len(), 2);
    }

    #[test]
    fn layer_fusion_ignores_order() {
        let mut layer = vec![
            rotation(1, "ZI"),
            rotation(1, "IZ"),
            rotation(-1, "ZI"),
            rotation(-1, "IZ"),
        ];
        assert!(fuse_commuting(&mut layer));
        assert!(layer.is_empty());
    }

    #[test]
    fn lone_identity_rotations_are_dropped() {
        let mut layer = vec![rotation(0, "III")];
        assert!(fuse_commuting(&mut layer));
        assert!(layer.is_empty());
    }

    #[test]
    fn refusing_layer_is_left_alone() {
        let mut layer = vec![rotation(1, "ZI"), rotation(2, "IZ")];
        assert!(!fuse_commuting(&mut layer));
        assert_eq!(layer.len(), 2);
    }
}
