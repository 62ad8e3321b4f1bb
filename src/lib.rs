//! Oriented bounding boxes.
//!
//! [`Obb`] is a plain `Copy` value: a center, half-extents along its own
//! axes, and an orientation basis. It can be rebuilt from scalars or corner
//! points, re-posed under a parent transform, and reduced to the tight
//! [`Aabb`] that encloses it.
//!
//! Hot-path operations never validate their input. Use [`Obb::validate`] or
//! [`Obb::try_from_points`] where malformed boxes must be caught.

mod error;
mod obb;
mod types;

pub use error::{ObbError, ObbResult};
pub use obb::{Axis, Obb, ORTHONORMAL_EPSILON};
pub use types::{Aabb, Shape, ShapeKind};
