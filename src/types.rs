use approx::{AbsDiffEq, RelativeEq};
use nalgebra as na;

/// Closed set of shape kinds used to dispatch over geometric primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeKind {
    Ray,
    Line,
    Sphere,
    Aabb,
    Obb,
    Plane,
    Triangle,
    Frustum,
    FrustumAccurate,
    Capsule,
    Spline,
}

/// A value that knows which [`ShapeKind`] it is.
pub trait Shape {
    fn kind(&self) -> ShapeKind;
}

/// Axis-aligned bounding box given by its minimum and maximum corners.
///
/// No ordering between `min` and `max` is enforced. A box derived from
/// malformed input may be inverted.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub min: na::Point3<f64>,
    pub max: na::Point3<f64>,
}

impl Aabb {
    pub fn new(min: na::Point3<f64>, max: na::Point3<f64>) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_extents(center: &na::Point3<f64>, half: &na::Vector3<f64>) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> na::Point3<f64> {
        na::center(&self.min, &self.max)
    }

    pub fn half_extents(&self) -> na::Vector3<f64> {
        (self.max - self.min) * 0.5
    }

    /// Full edge lengths along the world axes.
    pub fn size(&self) -> na::Vector3<f64> {
        self.max - self.min
    }
}

impl Shape for Aabb {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Aabb
    }
}

impl AbsDiffEq for Aabb {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.min.abs_diff_eq(&other.min, epsilon) && self.max.abs_diff_eq(&other.max, epsilon)
    }
}

impl RelativeEq for Aabb {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.min.relative_eq(&other.min, epsilon, max_relative)
            && self.max.relative_eq(&other.max, epsilon, max_relative)
    }
}
