//! Ray-primitive intersection algorithms.
//!
//! Each primitive type has a dedicated intersector that reports at most the
//! nearest hit inside the open interval `(t_min, t_max)`.

mod sphere;
mod triangle;

pub use sphere::intersect_sphere;
pub use triangle::intersect_triangle;
