//! # Geometry Module
//!
//! Rigid-body geometry primitives used to build and reorient conformers.
//!
//! - [`vector`] - pure operations on 3D points and vectors, lines, and planes,
//!   plus the determinant primitives the transform engine relies on.
//! - [`transform`] - the composable 4×4 homogeneous transform recorder
//!   ([`transform::TransformRecorder`]).
//!
//! All angles are in radians and rotations follow the right-hand rule about the
//! given axis direction.

pub mod transform;
pub mod vector;
