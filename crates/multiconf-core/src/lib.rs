//! # Multiconf Core Library
//!
//! A library for multi-conformation protein structure modeling. It provides the
//! geometric and structural substrate that rotamer builders, duplicate pruners,
//! and downstream energy drivers operate on.
//!
//! ## Architectural Overview
//!
//! - **[`geometry`]: The Foundation.** Pure vector algebra on 3D points, lines,
//!   and planes, plus a composable rigid-body transform recorder (translation,
//!   arbitrary-axis rotation, three-point superposition, inversion).
//!
//! - **[`models`]: The Structure Store.** The ownership hierarchy
//!   `Protein` → `Residue` → `Conformer` → `Atom`, with positional insertion,
//!   deletion, and deep-copy semantics at every level.
//!
//! - **[`compare`]: Similarity Analysis.** Identity and distance metrics between
//!   conformer pairs (exact match, heavy-atom topology match, greedy maximum
//!   matching distance, RMSD) used to detect duplicate or symmetry-equivalent
//!   conformers.
//!
//! - **[`ordering`]: Canonical Form.** Sorting of conformers and residues into
//!   canonical order, and generation of symmetry-swapped conformer variants,
//!   driven by an external parameter store consumed through the narrow
//!   [`params::ParamStore`] interface.

pub mod compare;
pub mod geometry;
pub mod models;
pub mod ordering;
pub mod params;
