use internment::ArcIntern;
use thiserror::Error;

/// Whether the orientation sum of an orbit is pinned to zero.
///
/// On a physical puzzle the total twist of an orbit is conserved (`Zero`);
/// dropping the constraint (`None`) models orbits where any orientation
/// vector is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrientationSumConstraint {
    Zero,
    None,
}

/// The orientation rule of one orbit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrientationStatus {
    /// Pieces in this orbit have no orientation degree of freedom.
    CannotOrient,
    /// Each piece carries an orientation in ℤ/count.
    CanOrient {
        count: u16,
        sum_constraint: OrientationSumConstraint,
    },
}

/// An equivalence class of pieces that every group element permutes among
/// themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Orbit {
    pub name: ArcIntern<str>,
    pub cubie_count: u16,
    pub orientation_status: OrientationStatus,
}

impl Orbit {
    pub fn new(
        name: &str,
        cubie_count: u16,
        orientation_status: OrientationStatus,
    ) -> Orbit {
        Orbit {
            name: ArcIntern::from(name),
            cubie_count,
            orientation_status,
        }
    }
}

/// The signature sum of the listed orbits must be even in every group
/// element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EvenParityConstraint {
    pub orbit_names: Vec<ArcIntern<str>>,
}

impl EvenParityConstraint {
    pub fn new(orbit_names: &[&str]) -> EvenParityConstraint {
        EvenParityConstraint {
            orbit_names: orbit_names.iter().copied().map(ArcIntern::from).collect(),
        }
    }
}

/// A structurally invalid puzzle definition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("duplicate orbit name `{0}`")]
    DuplicateOrbitName(ArcIntern<str>),
    #[error("parity constraint references unknown orbit `{0}`")]
    UnknownOrbitName(ArcIntern<str>),
    #[error("orbit `{0}` has no cubies")]
    ZeroCubieCount(ArcIntern<str>),
    #[error("orbit `{0}` has orientation count {1}, expected at least 2")]
    OrientationCountTooSmall(ArcIntern<str>, u16),
    #[error("parity constraint references no orbits")]
    EmptyParityConstraint,
}

/// A full puzzle, described one orbit at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleOrbitDefinition {
    pub orbits: Vec<Orbit>,
    pub even_parity_constraints: Vec<EvenParityConstraint>,
}

impl PuzzleOrbitDefinition {
    /// Validate and build a puzzle definition.
    ///
    /// # Errors
    ///
    /// Returns a [`DefinitionError`] when an orbit name is duplicated, a
    /// parity constraint references an unknown or empty set of orbits, an
    /// orbit has no cubies, or an orientable orbit has an orientation count
    /// below 2.
    pub fn new(
        orbits: Vec<Orbit>,
        even_parity_constraints: Vec<EvenParityConstraint>,
    ) -> Result<PuzzleOrbitDefinition, DefinitionError> {
        for (i, orbit) in orbits.iter().enumerate() {
            if orbits[..i].iter().any(|other| other.name == orbit.name) {
                return Err(DefinitionError::DuplicateOrbitName(ArcIntern::clone(
                    &orbit.name,
                )));
            }
            if orbit.cubie_count == 0 {
                return Err(DefinitionError::ZeroCubieCount(ArcIntern::clone(
                    &orbit.name,
                )));
            }
            if let OrientationStatus::CanOrient { count, .. } = orbit.orientation_status
                && count < 2
            {
                return Err(DefinitionError::OrientationCountTooSmall(
                    ArcIntern::clone(&orbit.name),
                    count,
                ));
            }
        }

        for constraint in &even_parity_constraints {
            if constraint.orbit_names.is_empty() {
                return Err(DefinitionError::EmptyParityConstraint);
            }
            for name in &constraint.orbit_names {
                if !orbits.iter().any(|orbit| orbit.name == *name) {
                    return Err(DefinitionError::UnknownOrbitName(ArcIntern::clone(name)));
                }
            }
        }

        Ok(PuzzleOrbitDefinition {
            orbits,
            even_parity_constraints,
        })
    }

    /// Index of the orbit with the given name, if any.
    #[must_use]
    pub fn orbit_index(&self, name: &str) -> Option<usize> {
        self.orbits.iter().position(|orbit| &*orbit.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corners() -> Orbit {
        Orbit::new(
            "corners",
            8,
            OrientationStatus::CanOrient {
                count: 3,
                sum_constraint: OrientationSumConstraint::Zero,
            },
        )
    }

    #[test]
    fn accepts_valid_definition() {
        let def = PuzzleOrbitDefinition::new(
            vec![
                Orbit::new(
                    "edges",
                    12,
                    OrientationStatus::CanOrient {
                        count: 2,
                        sum_constraint: OrientationSumConstraint::Zero,
                    },
                ),
                corners(),
            ],
            vec![EvenParityConstraint::new(&["edges", "corners"])],
        )
        .unwrap();

        assert_eq!(def.orbit_index("corners"), Some(1));
        assert_eq!(def.orbit_index("wings"), None);
    }

    #[test]
    fn rejects_duplicate_orbit_name() {
        let err = PuzzleOrbitDefinition::new(vec![corners(), corners()], vec![]).unwrap_err();
        assert_eq!(
            err,
            DefinitionError::DuplicateOrbitName(ArcIntern::from("corners"))
        );
    }

    #[test]
    fn rejects_unknown_constraint_orbit() {
        let err = PuzzleOrbitDefinition::new(
            vec![corners()],
            vec![EvenParityConstraint::new(&["corners", "edges"])],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DefinitionError::UnknownOrbitName(ArcIntern::from("edges"))
        );
    }

    #[test]
    fn rejects_zero_cubie_count() {
        let err = PuzzleOrbitDefinition::new(
            vec![Orbit::new("centers", 0, OrientationStatus::CannotOrient)],
            vec![],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DefinitionError::ZeroCubieCount(ArcIntern::from("centers"))
        );
    }

    #[test]
    fn rejects_degenerate_orientation_count() {
        let err = PuzzleOrbitDefinition::new(
            vec![Orbit::new(
                "edges",
                12,
                OrientationStatus::CanOrient {
                    count: 1,
                    sum_constraint: OrientationSumConstraint::None,
                },
            )],
            vec![],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DefinitionError::OrientationCountTooSmall(ArcIntern::from("edges"), 1)
        );
    }

    #[test]
    fn rejects_empty_constraint() {
        let err = PuzzleOrbitDefinition::new(vec![corners()], vec![EvenParityConstraint::new(&[])])
            .unwrap_err();
        assert_eq!(err, DefinitionError::EmptyParityConstraint);
    }
}
