//! Strategies for property-based testing.
use crate::data::Point;
use proptest::prelude::*;

/// Uniformly distributed unit-length points, by rejection sampling from the
/// cube and normalizing.
pub fn unit_point() -> impl Strategy<Value = Point> {
  ((-1.0..1.0f64), (-1.0..1.0f64), (-1.0..1.0f64)).prop_filter_map(
    "vector too close to zero",
    |(x, y, z)| {
      let p = Point::new([x, y, z]);
      if p.norm2() > 1e-3 {
        Some(p.normalize())
      } else {
        None
      }
    },
  )
}
