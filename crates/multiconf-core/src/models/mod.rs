//! # Models Module
//!
//! The hierarchical molecular structure store: a [`protein::Protein`] owns an
//! ordered sequence of [`residue::Residue`]s, each residue owns an ordered
//! sequence of candidate [`conformer::Conformer`]s, and each conformer owns a
//! fixed-size array of [`atom::Atom`]s.
//!
//! Ownership is strictly tree-shaped. Every sequence supports positional
//! insertion, deletion, and deep copy; out-of-range or structurally mismatched
//! operations fail with a [`StructureError`] without mutating any state.

use thiserror::Error;

pub mod atom;
pub mod conformer;
pub mod protein;
pub mod residue;

/// Structural errors raised by store mutations.
///
/// These are user errors in the sense of the library's failure policy: they
/// are detected locally, never corrupt state, and leave the decision to abort
/// or continue with the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructureError {
    /// A positional insert or delete referenced a slot outside the sequence.
    #[error("position {index} is out of range (sequence length {len})")]
    OutOfRange { index: usize, len: usize },

    /// A conformer copy was attempted between conformers with different
    /// numbers of atom slots.
    #[error("conformers do not have the same number of atom slots (target {target}, source {source_len})")]
    AtomCountMismatch { target: usize, source_len: usize },

    /// A protein deep copy was attempted into a non-empty target.
    #[error("cannot copy into a non-empty protein (target holds {residues} residues)")]
    NonEmptyTarget { residues: usize },
}
