use array_init::array_init;
use ordered_float::OrderedFloat;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::cmp::Ordering;
use std::ops::{Add, Index, Mul, Neg, Sub};

/// Maximum allowed deviation of `p.norm2()` from 1 for a point to count as
/// unit length. `normalize` keeps the L2-norm within `2 * EPSILON` of 1, so
/// the squared norm is within `4 * EPSILON`; the rest of the budget absorbs
/// the rounding of `norm2` itself and callers that scale a normalized point
/// by a factor within a few ulps of 1.
pub const MAX_UNIT_LENGTH_ERROR: f64 = 7.25 * f64::EPSILON;

/// A point on (or within tolerance of) the unit sphere, stored as a
/// 3-component `f64` vector.
///
/// Points are plain immutable values. The predicates in this crate require
/// their inputs to satisfy [`Point::is_unit_length`]; they never re-normalize.
/// Equality is exact component-wise comparison, which is deliberate: two
/// points that differ only in magnitude are distinct values even though they
/// name the same direction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(transparent)]
pub struct Point(pub [f64; 3]);

impl Point {
  pub const fn new(array: [f64; 3]) -> Point {
    Point(array)
  }

  pub fn dot(&self, other: &Point) -> f64 {
    self.0[0] * other.0[0] + self.0[1] * other.0[1] + self.0[2] * other.0[2]
  }

  pub fn cross(&self, other: &Point) -> Point {
    Point([
      self.0[1] * other.0[2] - self.0[2] * other.0[1],
      self.0[2] * other.0[0] - self.0[0] * other.0[2],
      self.0[0] * other.0[1] - self.0[1] * other.0[0],
    ])
  }

  pub fn norm2(&self) -> f64 {
    self.dot(self)
  }

  pub fn norm(&self) -> f64 {
    self.norm2().sqrt()
  }

  /// Scale to unit length. A zero vector stays zero; note that the norm of a
  /// vector with only subnormal components can underflow to zero, so a
  /// non-zero input does not guarantee a non-zero result.
  #[must_use]
  pub fn normalize(&self) -> Point {
    let mut n = self.norm();
    if n != 0.0 {
      n = 1.0 / n;
    }
    *self * n
  }

  /// The angle between two directions, in radians.
  ///
  /// Computed with `atan2` rather than `acos` so that it stays accurate for
  /// nearly-parallel and nearly-antipodal inputs.
  pub fn angle(&self, other: &Point) -> f64 {
    self.cross(other).norm().atan2(self.dot(other))
  }

  pub fn is_unit_length(&self) -> bool {
    (self.norm2() - 1.0).abs() <= MAX_UNIT_LENGTH_ERROR
  }

  /// Index of the component with the largest absolute value.
  pub fn largest_abs_component(&self) -> usize {
    let [x, y, z] = [self.0[0].abs(), self.0[1].abs(), self.0[2].abs()];
    if x > y {
      if x > z {
        0
      } else {
        2
      }
    } else if y > z {
      1
    } else {
      2
    }
  }

  /// A deterministic unit-length vector orthogonal to `self`.
  ///
  /// The result depends only on the value of `self`, which makes it usable as
  /// the fixed reference direction when sweeping edges around a shared
  /// vertex: every caller asking about the same vertex gets the same sweep
  /// origin. The pivot components are arbitrary but must not be symmetric in
  /// any coordinate, or the cross product could vanish for inputs on a
  /// coordinate plane.
  #[must_use]
  pub fn ortho(&self) -> Point {
    let mut k = self.largest_abs_component();
    k = if k == 0 { 2 } else { k - 1 };
    let mut temp = Point::new([0.012, 0.0053, 0.00457]);
    temp.0[k] = 1.0;
    self.cross(&temp).normalize()
  }

  /// Total lexicographic order on the coordinate triple.
  ///
  /// `NaN` never appears in valid inputs; `-0.0` and `0.0` compare equal, so
  /// the order agrees with the plain `<` comparison on every in-contract
  /// point. This is the tie-break order used by the symbolic perturbation in
  /// [`crate::sign`].
  pub fn cmp_lexicographic(&self, other: &Point) -> Ordering {
    let key = |p: &Point| -> [OrderedFloat<f64>; 3] { array_init(|i| OrderedFloat(p.0[i])) };
    key(self).cmp(&key(other))
  }
}

impl Index<usize> for Point {
  type Output = f64;
  fn index(&self, index: usize) -> &f64 {
    self.0.index(index)
  }
}

impl Add for Point {
  type Output = Point;
  fn add(self, rhs: Point) -> Point {
    Point(array_init(|i| self.0[i] + rhs.0[i]))
  }
}

impl Sub for Point {
  type Output = Point;
  fn sub(self, rhs: Point) -> Point {
    Point(array_init(|i| self.0[i] - rhs.0[i]))
  }
}

impl Neg for Point {
  type Output = Point;
  fn neg(self) -> Point {
    Point(array_init(|i| -self.0[i]))
  }
}

impl Mul<f64> for Point {
  type Output = Point;
  fn mul(self, rhs: f64) -> Point {
    Point(array_init(|i| self.0[i] * rhs))
  }
}

/// Uniformly distributed directions on the unit sphere.
impl Distribution<Point> for Standard {
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
    // Rejection-sample the unit ball, then project onto the sphere. The
    // lower cutoff avoids directional bias from normalizing tiny vectors.
    loop {
      let p = Point(array_init(|_| rng.gen_range(-1.0..1.0)));
      let n2 = p.norm2();
      if n2 > 1e-6 && n2 <= 1.0 {
        return p.normalize();
      }
    }
  }
}
