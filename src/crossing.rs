//! Classification of intersections between pairs of spherical edges.
//!
//! An edge is the shorter great-circle arc between two unit-length points.
//! [`crossing_sign`] answers the interior-crossing question exactly, with a
//! third state for edges that share a vertex; [`vertex_crossing`] and
//! [`edge_or_vertex_crossing`] refine that shared-vertex state so that
//! point-in-polygon style parity counts come out right without any interval
//! bookkeeping by the caller.

use std::fmt;

use crate::crosser::EdgeCrosser;
use crate::data::Point;
use crate::predicates::ordered_ccw;

/// The three possible answers to "do these two edges cross?".
///
/// The discriminants are chosen so that `DoesCross` and `DoesNotCross` cast
/// to the familiar +1/-1, with `MaybeCross` as 0 in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum Crossing {
  /// The edges cross at a point interior to both.
  DoesCross = 1,
  /// The edges share at least one vertex; see [`vertex_crossing`].
  MaybeCross = 0,
  /// The edges do not cross, and do not share a vertex.
  DoesNotCross = -1,
}

impl fmt::Display for Crossing {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Crossing::DoesCross => write!(f, "crosses"),
      Crossing::MaybeCross => write!(f, "may cross"),
      Crossing::DoesNotCross => write!(f, "does not cross"),
    }
  }
}

/// Reports whether edge AB crosses edge CD at a point interior to both.
///
/// Properties, for all unit-length inputs:
///
///  * `crossing_sign(b, a, c, d) == crossing_sign(a, b, c, d)`
///  * `crossing_sign(c, d, a, b) == crossing_sign(a, b, c, d)`
///  * [`Crossing::MaybeCross`] if and only if the edges share a vertex
///  * [`Crossing::DoesNotCross`] whenever either edge is degenerate and the
///    edges do not share a vertex
///
/// When many edges are tested against one edge, or against a chain of
/// connected edges, [`EdgeCrosser`] computes the same answers while sharing
/// the per-edge work.
pub fn crossing_sign(a: &Point, b: &Point, c: &Point, d: &Point) -> Crossing {
  let mut crosser = EdgeCrosser::new_chain(a, b, c);
  crosser.chain_crossing_sign(d)
}

/// A cheap approximation to [`crossing_sign`] in plain floating point.
///
/// Returns true if AB crosses CD at a point interior to both. The inputs
/// must be well separated: any determinant among them that falls within
/// floating-point noise of zero makes the answer unreliable, and shared
/// vertices are not given the [`Crossing::MaybeCross`] treatment. Intended
/// for callers that have already excluded the degenerate configurations.
pub fn simple_crossing(a: &Point, b: &Point, c: &Point, d: &Point) -> bool {
  debug_assert!(
    a.is_unit_length() && b.is_unit_length() && c.is_unit_length() && d.is_unit_length()
  );
  // c and d must be on opposite sides of the great circle through ab, and
  // vice versa. Three cross products instead of four: ACB and BDA reuse
  // a x b, and the DAC test doubles as the ACD test since ACB, CBD and DAC
  // all have the same sign for a crossing.
  let ab = a.cross(b);
  let acb = -ab.dot(c);
  let bda = ab.dot(d);
  if acb * bda <= 0.0 {
    return false;
  }
  let cd = c.cross(d);
  let cbd = -cd.dot(b);
  let dac = cd.dot(a);
  acb * cbd > 0.0 && acb * dac > 0.0
}

/// Resolves the shared-vertex case: given two edges that share at least one
/// vertex, reports a "crossing" such that for any point cloud and any closed
/// loop of edges through it, the parity of crossings against the loop is the
/// same as if every shared vertex had been displaced by some tiny fixed
/// amount. Equivalently:
///
///  * `vertex_crossing(a, b, a, b)` is true (an edge crosses itself), and
///  * if exactly one vertex of AB equals one vertex of CD, then exactly one
///    of `vertex_crossing(a, b, c, d)` and `vertex_crossing(c, d, a, b)`
///    is true.
///
/// Degenerate edges never vertex-cross. The answer is arbitrary but
/// deterministic, keyed off a fixed reference direction at the shared
/// vertex; only the parity guarantee above is meaningful.
pub fn vertex_crossing(a: &Point, b: &Point, c: &Point, d: &Point) -> bool {
  if a == b || c == d {
    return false;
  }
  // If any other pair of vertices coincides, the crossing is determined by
  // whether the two edges leave the shared vertex on the same side of an
  // arbitrary fixed direction there.
  if a == c {
    return b == d || ordered_ccw(&a.ortho(), d, b, a);
  }
  if b == d {
    return ordered_ccw(&b.ortho(), c, a, b);
  }
  if a == d {
    return b == c || ordered_ccw(&a.ortho(), c, b, a);
  }
  if b == c {
    return ordered_ccw(&b.ortho(), d, a, b);
  }
  debug_assert!(false, "vertex_crossing called with four distinct vertices");
  false
}

/// The composition of [`crossing_sign`] and [`vertex_crossing`]: true if AB
/// crosses CD either at an interior point or, for edges sharing a vertex,
/// in the symbolic sense of [`vertex_crossing`]. This is the right primitive
/// for counting boundary crossings.
pub fn edge_or_vertex_crossing(a: &Point, b: &Point, c: &Point, d: &Point) -> bool {
  match crossing_sign(a, b, c, d) {
    Crossing::DoesNotCross => false,
    Crossing::DoesCross => true,
    Crossing::MaybeCross => vertex_crossing(a, b, c, d),
  }
}
