use std::collections::BTreeMap;

use cycle_finder::{
    CycleCombination, cycle_combination_stats, optimal_cycle_combinations,
    pareto_efficient_cycle_combinations,
};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use puzzle_orbits::{
    EvenParityConstraint, Orbit, OrientationStatus, OrientationSumConstraint,
    PuzzleOrbitDefinition, presets,
};

fn expected_stats(entries: &[(&[u32], usize)]) -> BTreeMap<Vec<BigUint>, usize> {
    entries
        .iter()
        .map(|&(orders, count)| {
            (
                orders.iter().copied().map(BigUint::from).collect(),
                count,
            )
        })
        .collect()
}

/// The 3x3 with the chosen orientation sum constraint on both orbits, with or
/// without the edge/corner permutation parity coupling.
fn cube3_variant(
    sum_constraint: OrientationSumConstraint,
    edge_corner_parity: bool,
) -> PuzzleOrbitDefinition {
    PuzzleOrbitDefinition::new(
        vec![
            Orbit::new(
                "edges",
                12,
                OrientationStatus::CanOrient {
                    count: 2,
                    sum_constraint,
                },
            ),
            Orbit::new(
                "corners",
                8,
                OrientationStatus::CanOrient {
                    count: 3,
                    sum_constraint,
                },
            ),
        ],
        if edge_corner_parity {
            vec![EvenParityConstraint::new(&["edges", "corners"])]
        } else {
            vec![]
        },
    )
    .unwrap()
}

#[test_log::test]
fn cube3_one_cycle() {
    let combinations = optimal_cycle_combinations(&presets::cube(3), 1);
    assert_eq!(
        cycle_combination_stats(&combinations),
        expected_stats(&[(&[1260], 2)])
    );
}

#[test_log::test]
fn cube3_two_cycles() {
    let combinations = optimal_cycle_combinations(&presets::cube(3), 2);
    assert_eq!(
        cycle_combination_stats(&combinations),
        expected_stats(&[
            (&[90, 90], 16),
            (&[630, 9], 4),
            (&[180, 30], 1),
            (&[210, 24], 1),
            (&[126, 36], 8),
            (&[360, 12], 4),
            (&[720, 2], 2),
        ])
    );
}

#[test_log::test]
fn cube3_three_cycles() {
    let combinations = optimal_cycle_combinations(&presets::cube(3), 3);
    assert_eq!(
        cycle_combination_stats(&combinations),
        expected_stats(&[
            (&[90, 90, 6], 1),
            (&[90, 30, 18], 1),
            (&[30, 30, 30], 2),
            (&[180, 18, 6], 2),
            (&[126, 12, 12], 1),
            (&[630, 9, 3], 1),
            (&[210, 9, 9], 1),
            (&[36, 36, 12], 1),
            (&[126, 36, 3], 2),
            (&[42, 36, 9], 2),
            (&[360, 6, 6], 4),
            (&[210, 15, 3], 1),
        ])
    );
}

#[test_log::test]
fn cube3_four_cycles() {
    let combinations = optimal_cycle_combinations(&presets::cube(3), 4);
    assert_eq!(
        cycle_combination_stats(&combinations),
        expected_stats(&[
            (&[90, 24, 6, 6], 1),
            (&[30, 24, 18, 6], 1),
            (&[126, 12, 6, 6], 1),
            (&[42, 18, 12, 6], 1),
            (&[30, 12, 12, 12], 1),
            (&[90, 90, 3, 2], 1),
            (&[90, 30, 9, 2], 1),
            (&[90, 30, 6, 3], 8),
            (&[90, 18, 10, 3], 1),
            (&[90, 10, 9, 6], 1),
            (&[30, 30, 18, 3], 8),
            (&[30, 30, 9, 6], 8),
            (&[30, 18, 10, 9], 1),
            (&[126, 18, 6, 3], 1),
            (&[90, 36, 6, 2], 2),
            (&[90, 18, 12, 2], 2),
            (&[90, 12, 12, 3], 2),
            (&[36, 30, 18, 2], 2),
            (&[36, 30, 12, 3], 2),
            (&[36, 30, 6, 6], 16),
            (&[18, 18, 12, 10], 2),
            (&[126, 24, 3, 3], 1),
            (&[42, 24, 9, 3], 1),
            (&[42, 18, 18, 2], 5),
            (&[60, 45, 3, 3], 1),
            (&[36, 36, 6, 3], 4),
            (&[210, 6, 6, 3], 1),
            (&[180, 18, 3, 2], 2),
            (&[180, 12, 3, 3], 2),
            (&[180, 9, 6, 2], 2),
            (&[630, 3, 3, 3], 6),
            (&[210, 9, 3, 3], 7),
            (&[360, 6, 3, 2], 4),
            (&[210, 12, 2, 2], 1),
        ])
    );
}

#[test_log::test]
fn cube3_two_cycles_without_parity_constraint() {
    let puzzle = cube3_variant(OrientationSumConstraint::Zero, false);
    let combinations = optimal_cycle_combinations(&puzzle, 2);
    assert_eq!(
        cycle_combination_stats(&combinations),
        expected_stats(&[
            (&[360, 36], 8),
            (&[180, 72], 8),
            (&[90, 90], 16),
            (&[630, 12], 1),
            (&[1260, 4], 2),
            (&[840, 6], 2),
        ])
    );
}

#[test_log::test]
fn cube3_two_cycles_with_unconstrained_orientation_sums() {
    let puzzle = cube3_variant(OrientationSumConstraint::None, true);
    let combinations = optimal_cycle_combinations(&puzzle, 2);
    assert_eq!(
        cycle_combination_stats(&combinations),
        expected_stats(&[
            (&[210, 90], 1),
            (&[630, 15], 1),
            (&[360, 18], 6),
            (&[720, 2], 2),
        ])
    );
}

#[test_log::test]
fn cube3_two_cycles_fully_unconstrained() {
    let puzzle = cube3_variant(OrientationSumConstraint::None, false);
    let combinations = optimal_cycle_combinations(&puzzle, 2);
    assert_eq!(
        cycle_combination_stats(&combinations),
        expected_stats(&[
            (&[360, 60], 4),
            (&[180, 120], 4),
            (&[210, 90], 1),
            (&[240, 72], 1),
            (&[420, 36], 4),
            (&[630, 18], 1),
            (&[1260, 6], 1),
            (&[840, 9], 2),
        ])
    );
}

#[test_log::test]
fn output_is_deterministic() {
    let puzzle = presets::cube(3);
    let first = optimal_cycle_combinations(&puzzle, 2);
    let second = optimal_cycle_combinations(&puzzle, 2);
    assert_eq!(first, second);
}

#[test_log::test]
fn pareto_filter_is_idempotent() {
    let combinations = optimal_cycle_combinations(&presets::cube(3), 2);
    let refiltered = pareto_efficient_cycle_combinations(combinations.clone());
    assert_eq!(combinations, refiltered);
}

fn signature(partition: &[u16]) -> u64 {
    partition.iter().map(|&k| u64::from(k) - 1).sum::<u64>() % 2
}

fn assert_structural_invariants(puzzle: &PuzzleOrbitDefinition, combinations: &[CycleCombination]) {
    assert!(!combinations.is_empty());
    for combination in combinations {
        let mut order_product = BigUint::one();
        for cycle in &combination.cycles {
            order_product *= &cycle.order;
        }
        assert_eq!(order_product, combination.order_product);

        for pair in combination.cycles.windows(2) {
            assert!(pair[0].order >= pair[1].order);
        }

        for cycle in &combination.cycles {
            let lcm = cycle
                .partitions
                .iter()
                .fold(BigUint::one(), |acc, obj| acc.lcm(&obj.order));
            assert_eq!(lcm, cycle.order);

            for constraint in &puzzle.even_parity_constraints {
                let parity: u64 = constraint
                    .orbit_names
                    .iter()
                    .map(|name| {
                        let orbit = puzzle.orbit_index(&**name).unwrap();
                        signature(&cycle.partitions[orbit].partition)
                    })
                    .sum();
                assert_eq!(parity % 2, 0, "parity violated in {cycle:?}");
            }
        }

        for (i, orbit) in puzzle.orbits.iter().enumerate() {
            let used: usize = combination
                .cycles
                .iter()
                .map(|cycle| cycle.partitions[i].partition.len() - usize::from(cycle.share[i]))
                .sum();
            assert!(used <= usize::from(orbit.cubie_count));
        }
    }
}

#[test_log::test]
fn emitted_combinations_satisfy_invariants() {
    let puzzle = presets::cube(3);
    for num_cycles in 1..=3 {
        let combinations = optimal_cycle_combinations(&puzzle, num_cycles);
        assert_structural_invariants(&puzzle, &combinations);
    }
}
