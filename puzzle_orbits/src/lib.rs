#![warn(clippy::pedantic)]
#![allow(clippy::similar_names, clippy::missing_panics_doc)]

//! The orbit-level data model of a twisty puzzle.
//!
//! A puzzle is described as a collection of piece [`Orbit`]s, each with an
//! orientation rule, plus cross-orbit [`EvenParityConstraint`]s. This is the
//! input consumed by the `cycle_finder` engine; it carries no geometry and no
//! move tables.

pub mod definition;
pub mod presets;

pub use definition::{
    DefinitionError, EvenParityConstraint, Orbit, OrientationStatus, OrientationSumConstraint,
    PuzzleOrbitDefinition,
};
