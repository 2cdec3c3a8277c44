// #![deny(warnings)]
#![deny(clippy::cast_lossless)]
#![doc(test(no_crate_inject))]

//! Robust geometric predicates for points and edges on the unit sphere.
//!
//! The central question answered by this crate is: do two edges (great-circle
//! arcs between unit-length 3D points) cross, touch, or miss each other?
//! The answer is exact. Every predicate escalates from fast floating-point
//! evaluation with a certified error bound to arbitrary-precision arithmetic,
//! and finally to a deterministic symbolic perturbation, so that no input
//! (shared endpoints, collinear chains, subnormal coordinates, antipodal
//! points) ever produces an inconsistent answer.
//!
//! # Example
//!
//! ```rust
//! use sgeometry::data::Point;
//! use sgeometry::{crossing_sign, Crossing};
//!
//! let a = Point::new([1.0, 2.0, 1.0]).normalize();
//! let b = Point::new([1.0, -3.0, 0.5]).normalize();
//! let c = Point::new([1.0, -0.5, -3.0]).normalize();
//! let d = Point::new([0.1, 0.5, 3.0]).normalize();
//! assert_eq!(crossing_sign(&a, &b, &c, &d), Crossing::DoesCross);
//! ```

pub mod data;

mod crosser;
mod crossing;
mod predicates;

pub use crosser::{CopyingEdgeCrosser, EdgeCrosser};
pub use crossing::{
  crossing_sign, edge_or_vertex_crossing, simple_crossing, vertex_crossing, Crossing,
};
pub use predicates::{ordered_ccw, sign};

#[cfg(test)]
pub mod testing;
