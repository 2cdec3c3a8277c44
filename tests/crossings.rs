use claims::assert_lt;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sgeometry::data::Point;
use sgeometry::{
  crossing_sign, edge_or_vertex_crossing, simple_crossing, CopyingEdgeCrosser, Crossing,
  EdgeCrosser,
};

fn next_up(x: f64) -> f64 {
  f64::from_bits(x.to_bits() + 1)
}

fn next_down(x: f64) -> f64 {
  f64::from_bits(x.to_bits() - 1)
}

// A fixed unit-length direction that is close to, but not exactly, the z
// axis, so that no test geometry lines up with it by accident.
fn origin() -> Point {
  Point::new([-0.0099994664350250197, 0.0025924542609324121, 0.99994664350250195])
}

fn random_point(rng: &mut SmallRng) -> Point {
  rng.gen()
}

// The point at parameter t along the edge from a to b, by spherical linear
// interpolation.
fn interpolate(t: f64, a: &Point, b: &Point) -> Point {
  let ab = a.angle(b);
  if ab == 0.0 {
    return *a;
  }
  let fa = ((1.0 - t) * ab).sin();
  let fb = (t * ab).sin();
  (*a * fa + *b * fb).normalize()
}

fn crossing_from(robust: i32) -> Crossing {
  match robust {
    1 => Crossing::DoesCross,
    0 => Crossing::MaybeCross,
    _ => Crossing::DoesNotCross,
  }
}

// Checks one edge pair through every entry point: the free functions, the
// borrowing crosser and the copying crosser, in chain form, in two-argument
// form, and after re-aiming the crosser at the other edge.
fn check_crossing(
  a: &Point,
  b: &Point,
  c: &Point,
  d: &Point,
  robust: i32,
  edge_or_vertex: bool,
  simple: bool,
) {
  // Any shared vertex downgrades the expectation to MaybeCross.
  let robust = if a == c || a == d || b == c || b == d { 0 } else { robust };
  let expected = crossing_from(robust);
  if simple {
    assert_eq!(robust > 0, simple_crossing(a, b, c, d));
  }

  assert_eq!(expected, crossing_sign(a, b, c, d));
  let mut crosser = EdgeCrosser::new_chain(a, b, c);
  assert_eq!(expected, crosser.chain_crossing_sign(d));
  assert_eq!(expected, crosser.chain_crossing_sign(c));
  assert_eq!(expected, crosser.crossing_sign(d, c));
  assert_eq!(expected, crosser.crossing_sign(c, d));

  assert_eq!(edge_or_vertex, edge_or_vertex_crossing(a, b, c, d));
  crosser.restart_at(c);
  assert_eq!(edge_or_vertex, crosser.chain_edge_or_vertex_crossing(d));
  assert_eq!(edge_or_vertex, crosser.chain_edge_or_vertex_crossing(c));
  assert_eq!(edge_or_vertex, crosser.edge_or_vertex_crossing(d, c));
  assert_eq!(edge_or_vertex, crosser.edge_or_vertex_crossing(c, d));

  // The crosser can be re-aimed at a different edge.
  crosser.init(c, d);
  crosser.restart_at(a);
  assert_eq!(expected, crosser.chain_crossing_sign(b));
  assert_eq!(expected, crosser.chain_crossing_sign(a));

  let mut copying = CopyingEdgeCrosser::new_chain(*a, *b, *c);
  assert_eq!(expected, copying.chain_crossing_sign(*d));
  assert_eq!(expected, copying.chain_crossing_sign(*c));
  assert_eq!(expected, copying.crossing_sign(*d, *c));
  assert_eq!(expected, copying.crossing_sign(*c, *d));
  copying.restart_at(*c);
  assert_eq!(edge_or_vertex, copying.chain_edge_or_vertex_crossing(*d));
  assert_eq!(edge_or_vertex, copying.chain_edge_or_vertex_crossing(*c));
  assert_eq!(edge_or_vertex, copying.edge_or_vertex_crossing(*d, *c));
  assert_eq!(edge_or_vertex, copying.edge_or_vertex_crossing(*c, *d));
  copying.init(*c, *d);
  copying.restart_at(*a);
  assert_eq!(expected, copying.chain_crossing_sign(*b));
  assert_eq!(expected, copying.chain_crossing_sign(*a));
}

// Runs check_crossing on the edge pair and on the variants obtained by
// reversing either edge, swapping the edges, degenerating either edge, and
// testing an edge against itself.
fn check_crossings(
  a: Point,
  b: Point,
  c: Point,
  d: Point,
  robust: i32,
  edge_or_vertex: bool,
  simple: bool,
) {
  let a = a.normalize();
  let b = b.normalize();
  let c = c.normalize();
  let d = d.normalize();
  check_crossing(&a, &b, &c, &d, robust, edge_or_vertex, simple);
  check_crossing(&b, &a, &c, &d, robust, edge_or_vertex, simple);
  check_crossing(&a, &b, &d, &c, robust, edge_or_vertex, simple);
  check_crossing(&b, &a, &d, &c, robust, edge_or_vertex, simple);
  check_crossing(&a, &a, &c, &d, -1, false, false);
  check_crossing(&a, &b, &c, &c, -1, false, false);
  check_crossing(&a, &a, &c, &c, -1, false, false);
  check_crossing(&a, &b, &a, &b, 0, true, false);
  // Swapping the edges preserves the crossing sign; a shared-vertex pair
  // flips the vertex-crossing parity.
  check_crossing(&c, &d, &a, &b, robust, edge_or_vertex != (robust == 0), simple);
}

fn pt(x: f64, y: f64, z: f64) -> Point {
  Point::new([x, y, z])
}

#[test]
fn crossings() {
  // Two regular edges that cross.
  check_crossings(
    pt(1.0, 2.0, 1.0),
    pt(1.0, -3.0, 0.5),
    pt(1.0, -0.5, -3.0),
    pt(0.1, 0.5, 3.0),
    1,
    true,
    true,
  );
  // Two regular edges that cross antipodal points.
  check_crossings(
    pt(1.0, 2.0, 1.0),
    pt(1.0, -3.0, 0.5),
    pt(-1.0, 0.5, 3.0),
    pt(-0.1, -0.5, -3.0),
    -1,
    false,
    true,
  );
  // Two edges on the same great circle.
  check_crossings(
    pt(0.0, 0.0, -1.0),
    pt(0.0, 1.0, 0.0),
    pt(0.0, 0.0, 1.0),
    pt(0.0, 1.0, 1.0),
    -1,
    false,
    true,
  );
  // Two edges that cross where one vertex is the reference direction.
  check_crossings(
    pt(1.0, 0.0, 0.0),
    origin(),
    pt(1.0, -0.1, 1.0),
    pt(1.0, 1.0, -0.1),
    1,
    true,
    true,
  );
  // Two edges that barely cross near the middle of one edge.
  check_crossings(
    pt(1.0, 1.0, 1.0),
    pt(1.0, next_down(1.0), -1.0),
    pt(11.0, -12.0, -1.0),
    pt(10.0, 10.0, 1.0),
    1,
    true,
    false,
  );
  // Two edges separated by a distance of about 1e-15.
  check_crossings(
    pt(1.0, 1.0, 1.0),
    pt(1.0, next_up(1.0), -1.0),
    pt(1.0, -1.0, 0.0),
    pt(1.0, 1.0, 0.0),
    -1,
    false,
    false,
  );
  // Two edges that barely cross near the end of both edges. The arithmetic
  // needs more than 2000 bits of mantissa to resolve these.
  check_crossings(
    pt(0.0, 0.0, 1.0),
    pt(2.0, -1e-323, 1.0),
    pt(1.0, -1.0, 1.0),
    pt(1e-323, 0.0, 1.0),
    1,
    true,
    false,
  );
  // As above, but separated by a distance of about 1e-640.
  check_crossings(
    pt(0.0, 0.0, 1.0),
    pt(2.0, 1e-323, 1.0),
    pt(1.0, -1.0, 1.0),
    pt(1e-323, 0.0, 1.0),
    -1,
    false,
    false,
  );
  // Two edges that barely cross each other near the start of both edges.
  check_crossings(
    pt(1.0, -1e-323, -1e-323),
    pt(1e-323, 1.0, 1e-323),
    pt(1.0, -1.0, 1e-323),
    pt(1.0, 1.0, 0.0),
    1,
    true,
    false,
  );
  // As above, but barely missing.
  check_crossings(
    pt(1.0, 1e-323, -1e-323),
    pt(-1e-323, 1.0, 1e-323),
    pt(1.0, -1.0, 1e-323),
    pt(1.0, 1.0, 0.0),
    -1,
    false,
    false,
  );
}

#[test]
fn shared_endpoint() {
  // Two edges that share an endpoint. The vertex-crossing parity between
  // the two argument orders is checked inside check_crossings.
  check_crossings(
    pt(2.0, 3.0, 4.0),
    pt(-1.0, 2.0, 5.0),
    pt(7.0, -2.0, 3.0),
    pt(2.0, 3.0, 4.0),
    0,
    false,
    true,
  );
}

#[test]
fn crossing_where_one_vertex_is_antipodal_to_reference() {
  check_crossings(
    origin(),
    pt(1.0, 0.0, 0.0),
    pt(-1.0, 0.1, -1.0),
    pt(-1.0, -1.0, 0.1),
    -1,
    false,
    true,
  );
}

#[test]
fn collinear_edges_that_dont_touch() {
  let mut rng = SmallRng::seed_from_u64(1);
  for _ in 0..500 {
    let a = random_point(&mut rng);
    let d = random_point(&mut rng);
    let b = interpolate(0.05, &a, &d);
    let c = interpolate(0.95, &a, &d);
    assert_lt!(crossing_sign(&a, &b, &c, &d) as i8, 0);
    let mut crosser = EdgeCrosser::new_chain(&a, &b, &c);
    assert_lt!(crosser.chain_crossing_sign(&d) as i8, 0);
    assert_lt!(crosser.chain_crossing_sign(&c) as i8, 0);
  }
}

#[test]
fn coincident_zero_length_edges_that_dont_touch() {
  // Distinct scalar multiples of one direction, as close together as f64
  // allows. Only the symbolic perturbation can order these, and it must do
  // so consistently for all four orientation tests.
  let mut rng = SmallRng::seed_from_u64(2);
  let mut iters = 0;
  while iters < 1000 {
    // Power-of-two components with skewed exponents, so that the scaled
    // copies below stay exact multiples of a common direction.
    let mut comps = [0.0; 3];
    for comp in comps.iter_mut() {
      let bits = rng.gen_range(0..=11u32);
      let e = rng.gen_range(0..(1u32 << bits)) as i32;
      *comp = if e > 1022 { 0.0 } else { 2f64.powi(-e) };
    }
    let p = Point::new(comps).normalize();
    if p == Point::new([0.0, 0.0, 0.0]) {
      continue;
    }
    let a = p * (1.0 - 3e-16);
    let b = p * (1.0 - 1e-16);
    let c = p;
    let d = p * (1.0 + 2e-16);
    if !a.is_unit_length() || !d.is_unit_length() {
      continue;
    }
    iters += 1;
    assert_lt!(crossing_sign(&a, &b, &c, &d) as i8, 0);
    let mut crosser = EdgeCrosser::new_chain(&a, &b, &c);
    assert_lt!(crosser.chain_crossing_sign(&d) as i8, 0);
    assert_lt!(crosser.chain_crossing_sign(&c) as i8, 0);
  }
}
