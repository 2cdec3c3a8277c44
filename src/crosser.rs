//! Incremental edge crossers.
//!
//! Testing one edge AB against many candidate edges repeats a lot of work:
//! `a x b`, the outward tangents used for early rejection, and, when the
//! candidates form a chain, the orientation of the shared vertex. An
//! [`EdgeCrosser`] borrows its points and caches all of this; a
//! [`CopyingEdgeCrosser`] stores copies instead, for callers that produce
//! vertices on the fly and cannot keep them borrowed.

use crate::crossing::{vertex_crossing, Crossing};
use crate::data::Point;
use crate::predicates::{expensive_sign, sign_with_cross, triage_sign, DBL_ERR};

/// A cross product of a and b that is numerically meaningful even when the
/// two are nearly (or exactly) parallel or antipodal: `(b + a) x (b - a)`
/// equals `2 (a x b)` but loses far less to cancellation. Exactly parallel
/// inputs fall back to an arbitrary direction orthogonal to both.
fn robust_cross_prod(a: &Point, b: &Point) -> Point {
  let x = (*b + *a).cross(&(*b - *a));
  if x != Point::new([0.0, 0.0, 0.0]) {
    x
  } else {
    a.ortho()
  }
}

/// State shared by the two crosser flavors. The vertices of the fixed edge
/// and the cached chain vertex live in the wrappers; everything derived from
/// them lives here.
#[derive(Debug, Clone)]
struct CrosserState {
  a_cross_b: Point,
  /// Outward-facing tangents at a and b, perpendicular to AB. Candidate
  /// edges entirely on the positive side of either tangent plane cannot
  /// cross AB. Computed on first use; the fast path never needs them.
  tangents: Option<(Point, Point)>,
  /// Orientation of the triangle ACB for the cached chain vertex c, i.e.
  /// `-sign(a, b, c)` as far as it is known; 0 when the triage sign was
  /// inconclusive and no slow-path call has resolved it yet.
  acb: i32,
}

impl CrosserState {
  fn new(a: &Point, b: &Point) -> CrosserState {
    debug_assert!(a.is_unit_length() && b.is_unit_length());
    CrosserState { a_cross_b: a.cross(b), tangents: None, acb: 0 }
  }

  fn restart_at(&mut self, a: &Point, b: &Point, c: &Point) {
    debug_assert!(c.is_unit_length());
    self.acb = -triage_sign(a, b, c, &self.a_cross_b);
  }

  /// Crossing of AB with the chain edge from the cached vertex c to d. The
  /// common case is a single triage sign: when BDA is conclusive and equal
  /// to ACB, c and d are on the same side of AB and cannot straddle it.
  fn crossing_sign(&mut self, a: &Point, b: &Point, c: &Point, d: &Point) -> Crossing {
    let bda = triage_sign(a, b, d, &self.a_cross_b);
    if self.acb == -bda && bda != 0 {
      self.acb = -bda;
      return Crossing::DoesNotCross;
    }
    self.crossing_sign_slow(a, b, c, d, bda)
  }

  fn crossing_sign_slow(
    &mut self,
    a: &Point,
    b: &Point,
    c: &Point,
    d: &Point,
    mut bda: i32,
  ) -> Crossing {
    let result = self.classify(a, b, c, d, &mut bda);
    // d becomes the cached vertex; its orientation on the other side of AB
    // is the negation of BDA.
    self.acb = -bda;
    result
  }

  fn classify(&mut self, a: &Point, b: &Point, c: &Point, d: &Point, bda: &mut i32) -> Crossing {
    // Candidates in the wedge-shaped region near AB but outside it are
    // common (think edges of one loop tested against a nearby loop).
    // Rejecting them needs only dot products against the two outward
    // tangents, with a conservative error allowance so that a rejection is
    // never wrong.
    let (a_tangent, b_tangent) = *self.tangents.get_or_insert_with(|| {
      let norm = robust_cross_prod(a, b).normalize();
      (a.cross(&norm), norm.cross(b))
    });
    let error = (1.5 + 1.0 / 3f64.sqrt()) * DBL_ERR;
    if (c.dot(&a_tangent) > error && d.dot(&a_tangent) > error)
      || (c.dot(&b_tangent) > error && d.dot(&b_tangent) > error)
    {
      return Crossing::DoesNotCross;
    }

    // Shared vertices before degenerate edges, so that three identical
    // input points still count as sharing a vertex.
    if a == c || a == d || b == c || b == d {
      return Crossing::MaybeCross;
    }
    if a == b || c == d {
      return Crossing::DoesNotCross;
    }

    // From here on every sign is computed exactly. Note that if the cached
    // ACB came up empty at restart time it is resolved here once and reused
    // for the rest of the chain.
    if self.acb == 0 {
      self.acb = -expensive_sign(a, b, c);
    }
    debug_assert_ne!(self.acb, 0);
    if *bda == 0 {
      *bda = expensive_sign(a, b, d);
    }
    debug_assert_ne!(*bda, 0);
    if *bda != self.acb {
      return Crossing::DoesNotCross;
    }

    // c and d straddle the great circle through AB; the edges cross exactly
    // when a and b also straddle the great circle through CD, with all four
    // triangle orientations agreeing.
    let c_cross_d = c.cross(d);
    let cbd = -sign_with_cross(c, d, b, &c_cross_d);
    debug_assert_ne!(cbd, 0);
    if cbd != self.acb {
      return Crossing::DoesNotCross;
    }
    let dac = sign_with_cross(c, d, a, &c_cross_d);
    debug_assert_ne!(dac, 0);
    if dac == self.acb {
      Crossing::DoesCross
    } else {
      Crossing::DoesNotCross
    }
  }
}

/// Tests many edges against one fixed edge AB, holding borrows of every
/// vertex involved.
///
/// Single edges go through [`crossing_sign`](EdgeCrosser::crossing_sign);
/// for a chain `v0, v1, v2, ...` call
/// [`restart_at`](EdgeCrosser::restart_at)`(v0)` and then
/// [`chain_crossing_sign`](EdgeCrosser::chain_crossing_sign) for each
/// subsequent vertex, so that each chain edge costs one orientation test in
/// the common case. The answers are identical to the free functions in
/// [`crate::crossing`] on every input.
#[derive(Debug, Clone)]
pub struct EdgeCrosser<'a> {
  a: &'a Point,
  b: &'a Point,
  c: Option<&'a Point>,
  state: CrosserState,
}

impl<'a> EdgeCrosser<'a> {
  /// A crosser for the edge AB. Both points must be unit length.
  pub fn new(a: &'a Point, b: &'a Point) -> EdgeCrosser<'a> {
    EdgeCrosser { a, b, c: None, state: CrosserState::new(a, b) }
  }

  /// A crosser for AB with the chain already positioned at c.
  pub fn new_chain(a: &'a Point, b: &'a Point, c: &'a Point) -> EdgeCrosser<'a> {
    let mut crosser = EdgeCrosser::new(a, b);
    crosser.restart_at(c);
    crosser
  }

  /// Repoint the crosser at a new edge AB, discarding all cached state.
  pub fn init(&mut self, a: &'a Point, b: &'a Point) {
    self.a = a;
    self.b = b;
    self.c = None;
    self.state = CrosserState::new(a, b);
  }

  /// Begin (or restart) a chain of connected edges at vertex c.
  pub fn restart_at(&mut self, c: &'a Point) {
    self.c = Some(c);
    self.state.restart_at(self.a, self.b, c);
  }

  /// Crossing of AB with the standalone edge CD. Equivalent to
  /// [`crate::crossing_sign`]`(a, b, c, d)`; when c is the vertex cached
  /// from the previous call the restart is skipped.
  pub fn crossing_sign(&mut self, c: &'a Point, d: &'a Point) -> Crossing {
    if self.c != Some(c) {
      self.restart_at(c);
    }
    self.chain_crossing_sign(d)
  }

  /// Crossing of AB with the chain edge from the cached vertex to d. After
  /// the call d is the cached vertex. Requires a preceding
  /// [`restart_at`](EdgeCrosser::restart_at) (checked in debug builds;
  /// release builds report [`Crossing::DoesNotCross`]).
  pub fn chain_crossing_sign(&mut self, d: &'a Point) -> Crossing {
    match self.c {
      None => {
        debug_assert!(false, "chain_crossing_sign called before restart_at");
        Crossing::DoesNotCross
      }
      Some(c) => {
        let result = self.state.crossing_sign(self.a, self.b, c, d);
        self.c = Some(d);
        result
      }
    }
  }

  /// Like [`crossing_sign`](EdgeCrosser::crossing_sign) but with shared
  /// vertices resolved; equivalent to [`crate::edge_or_vertex_crossing`].
  pub fn edge_or_vertex_crossing(&mut self, c: &'a Point, d: &'a Point) -> bool {
    if self.c != Some(c) {
      self.restart_at(c);
    }
    self.chain_edge_or_vertex_crossing(d)
  }

  /// The chain form of
  /// [`edge_or_vertex_crossing`](EdgeCrosser::edge_or_vertex_crossing).
  pub fn chain_edge_or_vertex_crossing(&mut self, d: &'a Point) -> bool {
    // The chain call replaces the cached vertex, so copy it out first.
    let c = match self.c {
      None => {
        debug_assert!(false, "chain_edge_or_vertex_crossing called before restart_at");
        return false;
      }
      Some(c) => *c,
    };
    match self.chain_crossing_sign(d) {
      Crossing::DoesNotCross => false,
      Crossing::DoesCross => true,
      Crossing::MaybeCross => vertex_crossing(self.a, self.b, &c, d),
    }
  }
}

/// [`EdgeCrosser`] with owned vertices: the same operations and the same
/// answers, storing copies of a, b and the chain vertex so that no borrow
/// outlives the call. Useful when the candidate vertices are computed on
/// the fly.
#[derive(Debug, Clone)]
pub struct CopyingEdgeCrosser {
  a: Point,
  b: Point,
  c: Option<Point>,
  state: CrosserState,
}

impl CopyingEdgeCrosser {
  /// A crosser for the edge AB. Both points must be unit length.
  pub fn new(a: Point, b: Point) -> CopyingEdgeCrosser {
    let state = CrosserState::new(&a, &b);
    CopyingEdgeCrosser { a, b, c: None, state }
  }

  /// A crosser for AB with the chain already positioned at c.
  pub fn new_chain(a: Point, b: Point, c: Point) -> CopyingEdgeCrosser {
    let mut crosser = CopyingEdgeCrosser::new(a, b);
    crosser.restart_at(c);
    crosser
  }

  /// Repoint the crosser at a new edge AB, discarding all cached state.
  pub fn init(&mut self, a: Point, b: Point) {
    self.state = CrosserState::new(&a, &b);
    self.a = a;
    self.b = b;
    self.c = None;
  }

  /// Begin (or restart) a chain of connected edges at vertex c.
  pub fn restart_at(&mut self, c: Point) {
    self.state.restart_at(&self.a, &self.b, &c);
    self.c = Some(c);
  }

  /// See [`EdgeCrosser::crossing_sign`].
  pub fn crossing_sign(&mut self, c: Point, d: Point) -> Crossing {
    if self.c != Some(c) {
      self.restart_at(c);
    }
    self.chain_crossing_sign(d)
  }

  /// See [`EdgeCrosser::chain_crossing_sign`].
  pub fn chain_crossing_sign(&mut self, d: Point) -> Crossing {
    match self.c {
      None => {
        debug_assert!(false, "chain_crossing_sign called before restart_at");
        Crossing::DoesNotCross
      }
      Some(c) => {
        let result = self.state.crossing_sign(&self.a, &self.b, &c, &d);
        self.c = Some(d);
        result
      }
    }
  }

  /// See [`EdgeCrosser::edge_or_vertex_crossing`].
  pub fn edge_or_vertex_crossing(&mut self, c: Point, d: Point) -> bool {
    if self.c != Some(c) {
      self.restart_at(c);
    }
    self.chain_edge_or_vertex_crossing(d)
  }

  /// See [`EdgeCrosser::chain_edge_or_vertex_crossing`].
  pub fn chain_edge_or_vertex_crossing(&mut self, d: Point) -> bool {
    let c = match self.c {
      None => {
        debug_assert!(false, "chain_edge_or_vertex_crossing called before restart_at");
        return false;
      }
      Some(c) => c,
    };
    match self.chain_crossing_sign(d) {
      Crossing::DoesNotCross => false,
      Crossing::DoesCross => true,
      Crossing::MaybeCross => vertex_crossing(&self.a, &self.b, &c, &d),
    }
  }
}
