//! Orbit definitions for the NxN cube and minx families.
//!
//! These are derived purely from counting arguments on the puzzle geometry;
//! nothing here knows about moves or stickers.

use crate::{
    EvenParityConstraint, Orbit, OrientationStatus, OrientationSumConstraint,
    PuzzleOrbitDefinition,
};

/// The orbit definition of the NxN cube, `n >= 2`.
#[must_use]
pub fn cube(n: u16) -> PuzzleOrbitDefinition {
    assert!(n >= 2, "no cube smaller than 2x2");

    // Start with corners since all cubes N>1 have 8 of them.
    let mut orbits = vec![Orbit::new(
        "corners",
        8,
        OrientationStatus::CanOrient {
            count: 3,
            sum_constraint: OrientationSumConstraint::Zero,
        },
    )];
    let mut even_parity_constraints = vec![];

    if n % 2 == 1 {
        // Odd cubes have 12 true edges whose permutation parity matches the
        // corners.
        orbits.push(Orbit::new(
            "edges",
            12,
            OrientationStatus::CanOrient {
                count: 2,
                sum_constraint: OrientationSumConstraint::Zero,
            },
        ));
        even_parity_constraints.push(EvenParityConstraint::new(&["edges", "corners"]));

        // N//2 - 1 rings of 24 +centers, each coupled to the corners and the
        // wings sharing its slice.
        for c2 in 1..n / 2 {
            orbits.push(Orbit::new(
                &format!("+centers{c2}"),
                24,
                OrientationStatus::CannotOrient,
            ));
            even_parity_constraints.push(EvenParityConstraint::new(&[
                "corners",
                &format!("wings{c2}"),
                &format!("+centers{c2}"),
            ]));
        }
    }

    // N//2 - 1 rings of 24 wings.
    for w in 1..n / 2 {
        orbits.push(Orbit::new(
            &format!("wings{w}"),
            24,
            OrientationStatus::CannotOrient,
        ));
    }

    // (N//2 - 1)^2 rings of 24 centers.
    for c1 in 1..n / 2 {
        for c2 in 1..n / 2 {
            if c1 == c2 {
                // xcenter parity is pinned by the corners alone; the two wing
                // contributions cancel.
                orbits.push(Orbit::new(
                    &format!("xcenters{c1}"),
                    24,
                    OrientationStatus::CannotOrient,
                ));
                even_parity_constraints.push(EvenParityConstraint::new(&[
                    "corners",
                    &format!("xcenters{c1}"),
                ]));
            } else {
                // Obliques couple to the corners and both wing rings whose
                // slices they sit on.
                orbits.push(Orbit::new(
                    &format!("obliques{c1};{c2}"),
                    24,
                    OrientationStatus::CannotOrient,
                ));
                even_parity_constraints.push(EvenParityConstraint::new(&[
                    "corners",
                    &format!("wings{c1}"),
                    &format!("wings{c2}"),
                    &format!("obliques{c1};{c2}"),
                ]));
            }
        }
    }

    PuzzleOrbitDefinition::new(orbits, even_parity_constraints)
        .expect("generated cube definition is structurally valid")
}

/// The orbit definition of the N-layer minx, `n >= 2` (2 is the kilominx, 3
/// the megaminx).
#[must_use]
pub fn minx(n: u16) -> PuzzleOrbitDefinition {
    assert!(n >= 2, "no minx smaller than the kilominx");

    let mut orbits = vec![Orbit::new(
        "corners",
        20,
        OrientationStatus::CanOrient {
            count: 3,
            sum_constraint: OrientationSumConstraint::Zero,
        },
    )];
    // Every minx move is a product of 5-cycles, so each orbit independently
    // keeps even permutation parity.
    let mut even_parity_constraints = vec![EvenParityConstraint::new(&["corners"])];

    if n % 2 == 1 {
        orbits.push(Orbit::new(
            "edges",
            30,
            OrientationStatus::CanOrient {
                count: 2,
                sum_constraint: OrientationSumConstraint::Zero,
            },
        ));
        even_parity_constraints.push(EvenParityConstraint::new(&["edges"]));

        for c2 in 1..n / 2 {
            let name = format!("+centers{c2}");
            orbits.push(Orbit::new(&name, 60, OrientationStatus::CannotOrient));
            even_parity_constraints.push(EvenParityConstraint::new(&[&name]));
        }
    }

    for w in 1..n / 2 {
        let name = format!("wings{w}");
        orbits.push(Orbit::new(&name, 60, OrientationStatus::CannotOrient));
        even_parity_constraints.push(EvenParityConstraint::new(&[&name]));
    }

    for c1 in 1..n / 2 {
        for c2 in 1..n / 2 {
            let name = if c1 == c2 {
                format!("xcenters{c1}")
            } else {
                format!("obliques{c1};{c2}")
            };
            orbits.push(Orbit::new(&name, 60, OrientationStatus::CannotOrient));
            even_parity_constraints.push(EvenParityConstraint::new(&[&name]));
        }
    }

    PuzzleOrbitDefinition::new(orbits, even_parity_constraints)
        .expect("generated minx definition is structurally valid")
}
