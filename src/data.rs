mod point;

pub use point::{Point, MAX_UNIT_LENGTH_ERROR};
