//! Exact orientation predicates for points on the unit sphere.
//!
//! [`sign`] reports whether an ordered triple of points is counterclockwise,
//! clockwise, or degenerate when viewed from outside the sphere, i.e. the
//! sign of the scalar triple product `a . (b x c)`. The answer is never
//! wrong: a fast floating-point evaluation with a certified error bound is
//! followed, only when that bound cannot rule out zero, by a numerically
//! stable recomputation, then by arbitrary-precision arithmetic, and finally
//! by a symbolic perturbation that assigns a definite sign to every exactly
//! degenerate triple of distinct points.

use array_init::array_init;
use num::BigRational;
use num_traits::Zero;
use std::cmp::Ordering;

use crate::data::Point;

/// Maximum rounding error of a single f64 operation (half an ulp at 1.0).
pub(crate) const DBL_ERR: f64 = f64::EPSILON / 2.0;

/// Certified bound on the error of evaluating `(a x b) . c` in plain f64
/// for unit-length inputs. Standard floating-point inequalities give
/// `|fl((AxB).C) - (AxB).C| <= (3 + 2/sqrt(3)) * e` with `e = DBL_ERR`; a
/// determinant whose magnitude exceeds this bound has a trustworthy sign.
const MAX_DETERMINANT_ERROR: f64 = 1.8274 * DBL_ERR;

/// Error multiplier for the stable determinant evaluation, scaled at the
/// call site by the product of the two shortest edge lengths:
/// `|error| <= (3 + 6/sqrt(3)) * |A-C| * |B-C| * e`.
const DET_ERROR_MULTIPLIER: f64 = 3.2321 * DBL_ERR;

/// The sign of the determinant `a . (b x c)`: +1 if the triple (a, b, c) is
/// counterclockwise viewed from outside the sphere, -1 if clockwise, and 0
/// if and only if two of the three points are equal.
///
/// For distinct points the result is never 0: exactly degenerate triples are
/// resolved by a deterministic symbolic perturbation, so that
///
///  * `sign(b, c, a) == sign(a, b, c)` (cyclic rotation),
///  * `sign(b, a, c) == -sign(a, b, c)` (swapping any two arguments),
///
/// hold for every input, and the same triple always yields the same answer.
/// Note that no similar identity relates `sign(-a, b, c)` to `sign(a, b, c)`;
/// antipodal points are independent as far as the perturbation is concerned.
///
/// All three points must satisfy [`Point::is_unit_length`].
pub fn sign(a: &Point, b: &Point, c: &Point) -> i32 {
  debug_assert!(a.is_unit_length() && b.is_unit_length() && c.is_unit_length());
  sign_with_cross(a, b, c, &a.cross(b))
}

/// [`sign`] with a caller-supplied `a x b`, so that the cross product can be
/// shared across many evaluations against the same edge.
pub(crate) fn sign_with_cross(a: &Point, b: &Point, c: &Point, a_cross_b: &Point) -> i32 {
  let s = triage_sign(a, b, c, a_cross_b);
  if s != 0 {
    s
  } else {
    expensive_sign(a, b, c)
  }
}

/// The fast tier: plain f64 with the certified bound. Returns 0 when the
/// determinant is too close to zero to call, which callers resolve with
/// [`expensive_sign`].
pub(crate) fn triage_sign(a: &Point, b: &Point, c: &Point, a_cross_b: &Point) -> i32 {
  debug_assert!(a.is_unit_length() && b.is_unit_length() && c.is_unit_length());
  let det = a_cross_b.dot(c);
  if det > MAX_DETERMINANT_ERROR {
    1
  } else if det < -MAX_DETERMINANT_ERROR {
    -1
  } else {
    0
  }
}

/// The escalation tiers behind [`triage_sign`]: a stable f64 recomputation,
/// then exact arithmetic with symbolic perturbation. Returns 0 if and only
/// if two of the points are equal.
pub(crate) fn expensive_sign(a: &Point, b: &Point, c: &Point) -> i32 {
  if a == b || b == c || c == a {
    return 0;
  }
  let s = stable_sign(a, b, c);
  if s != 0 {
    return s;
  }
  exact_sign(a, b, c, true)
}

/// Recompute the determinant from edge differences, cyclically permuted so
/// that the longest edge is eliminated. This keeps the cross product small
/// and usually finds the sign even for triples that are as collinear as
/// f64 points can be; truly collinear inputs still fall through to exact
/// arithmetic. Nearly-antipodal pairs are not special-cased here; they are
/// rare and the exact tier handles them.
fn stable_sign(a: &Point, b: &Point, c: &Point) -> i32 {
  let ab = *b - *a;
  let bc = *c - *b;
  let ca = *a - *c;
  let ab2 = ab.norm2();
  let bc2 = bc.norm2();
  let ca2 = ca.norm2();

  // The two shortest edges, pointing away from their common vertex.
  let (e1, e2, op) = if ab2 >= bc2 && ab2 >= ca2 {
    (ca, bc, c)
  } else if bc2 >= ca2 {
    (ab, ca, a)
  } else {
    (bc, ab, b)
  };

  let det = -e1.cross(&e2).dot(op);
  let max_err = DET_ERROR_MULTIPLIER * (e1.norm2() * e2.norm2()).sqrt();
  if det > max_err {
    1
  } else if det < -max_err {
    -1
  } else {
    0
  }
}

type ExactPoint = [BigRational; 3];

fn float_to_rational(f: f64) -> BigRational {
  BigRational::from_float(f).expect("cannot convert NaN or infinite to exact precision number")
}

fn to_exact(p: &Point) -> ExactPoint {
  array_init(|i| float_to_rational(p[i]))
}

fn exact_cross(a: &ExactPoint, b: &ExactPoint) -> ExactPoint {
  [
    &a[1] * &b[2] - &a[2] * &b[1],
    &a[2] * &b[0] - &a[0] * &b[2],
    &a[0] * &b[1] - &a[1] * &b[0],
  ]
}

fn exact_dot(a: &ExactPoint, b: &ExactPoint) -> BigRational {
  &a[0] * &b[0] + &a[1] * &b[1] + &a[2] * &b[2]
}

fn rational_sign(x: &BigRational) -> i32 {
  match x.cmp(&BigRational::zero()) {
    Ordering::Greater => 1,
    Ordering::Less => -1,
    Ordering::Equal => 0,
  }
}

/// The exact tier. Every f64 component, including subnormals, converts to a
/// rational without loss, so the determinant sign is computed with no error
/// at all. When the determinant is exactly zero and `perturb` is set, the
/// symbolic perturbation decides; with `perturb` unset the 0 is reported
/// as-is (callers that only need "is this triple truly degenerate" use
/// that form).
fn exact_sign(a: &Point, b: &Point, c: &Point, perturb: bool) -> i32 {
  debug_assert!(a != b && b != c && c != a);

  // Sort the triple into lexicographic order, tracking the permutation
  // parity. The perturbation rule below is defined on the sorted triple so
  // that swapping arguments flips the result and rotating them does not.
  let mut perm_sign = 1;
  let (mut pa, mut pb, mut pc) = (a, b, c);
  if perturb {
    if pa.cmp_lexicographic(pb) == Ordering::Greater {
      std::mem::swap(&mut pa, &mut pb);
      perm_sign = -perm_sign;
    }
    if pb.cmp_lexicographic(pc) == Ordering::Greater {
      std::mem::swap(&mut pb, &mut pc);
      perm_sign = -perm_sign;
    }
    if pa.cmp_lexicographic(pb) == Ordering::Greater {
      std::mem::swap(&mut pa, &mut pb);
      perm_sign = -perm_sign;
    }
  }

  let xa = to_exact(pa);
  let xb = to_exact(pb);
  let xc = to_exact(pc);
  let xb_cross_xc = exact_cross(&xb, &xc);
  let det_sign = rational_sign(&exact_dot(&xa, &xb_cross_xc));
  if det_sign != 0 || !perturb {
    return perm_sign * det_sign;
  }
  perm_sign * symbolically_perturbed_sign(&xa, &xb, &xc, &xb_cross_xc)
}

// Simulation of Simplicity (https://arxiv.org/abs/math/9410209): break the
// tie for an exactly degenerate triple in an arbitrary but globally
// consistent way.
//
// Each coordinate x[i] of each row is displaced by its own infinitesimal
// d_x[i], chosen so that
//
//   da[2] >> da[1] >> da[0] >> db[2] >> db[1] >> db[0] >> dc[2] >> dc[1] >> dc[0]
//
// where ">>" means "dominates any finite multiple of". The sign of the
// perturbed determinant is then the first non-zero coefficient of its
// expansion, taken in order of decreasing perturbation magnitude. Requires
// the rows to be sorted lexicographically (see `exact_sign`); the caller
// folds the permutation parity back into the result.
fn symbolically_perturbed_sign(
  a: &ExactPoint,
  b: &ExactPoint,
  c: &ExactPoint,
  b_cross_c: &ExactPoint,
) -> i32 {
  let mut s = rational_sign(&b_cross_c[2]); // da[2]
  if s != 0 {
    return s;
  }
  s = rational_sign(&b_cross_c[1]); // da[1]
  if s != 0 {
    return s;
  }
  s = rational_sign(&b_cross_c[0]); // da[0]
  if s != 0 {
    return s;
  }

  s = rational_sign(&(&c[0] * &a[1] - &c[1] * &a[0])); // db[2]
  if s != 0 {
    return s;
  }
  s = rational_sign(&c[0]); // db[2] * da[1]
  if s != 0 {
    return s;
  }
  s = -rational_sign(&c[1]); // db[2] * da[0]
  if s != 0 {
    return s;
  }
  s = rational_sign(&(&c[2] * &a[0] - &c[0] * &a[2])); // db[1]
  if s != 0 {
    return s;
  }
  s = rational_sign(&c[2]); // db[1] * da[0]
  if s != 0 {
    return s;
  }
  // The db[0] coefficient, c[1]*a[2] - c[2]*a[1], is necessarily zero once
  // every test above has failed, as are the dc[1] and dc[0] coefficients.
  debug_assert_eq!(rational_sign(&(&c[1] * &a[2] - &c[2] * &a[1])), 0);

  s = rational_sign(&(&a[0] * &b[1] - &a[1] * &b[0])); // dc[2]
  if s != 0 {
    return s;
  }
  1 // dc[2] * db[1]
}

/// Reports whether the edges `o->a`, `o->b`, `o->c` are encountered in that
/// order during a counterclockwise sweep around `o`.
///
/// Equivalently: `b` lies in the counterclockwise wedge from `a` to `c`
/// around `o`. The three half-plane votes can be pairwise inconsistent for
/// at most one pair, so two votes carry the decision. The boundary cases are
/// deliberately asymmetric (`>= 0` for the wedge sides, `> 0` for closing
/// the wedge) so that exactly one of `ordered_ccw(a, b, c, o)` and
/// `ordered_ccw(c, b, a, o)` holds when `b` coincides with a wedge side;
/// boundary-crossing counts built on this stay globally consistent.
pub fn ordered_ccw(a: &Point, b: &Point, c: &Point, o: &Point) -> bool {
  let mut sum = 0;
  if sign(b, o, a) >= 0 {
    sum += 1;
  }
  if sign(c, o, b) >= 0 {
    sum += 1;
  }
  if sign(a, o, c) > 0 {
    sum += 1;
  }
  sum >= 2
}
