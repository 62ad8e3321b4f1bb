//! Oriented bounding box value type.
//!
//! An [`Obb`] is a center point, three half-extents measured along the box's
//! own axes, and an orientation basis whose columns are those axes expressed
//! in the parent space. All operations are allocation free. Operations that
//! write into an `out` box never read from it, so `out` may hold anything.

use crate::error::{ObbError, ObbResult};
use crate::types::{Aabb, Shape, ShapeKind};
use approx::{AbsDiffEq, RelativeEq};
use nalgebra as na;
use std::fmt;

/// Largest deviation of `OᵀO` from identity accepted by [`Obb::validate`].
pub const ORTHONORMAL_EPSILON: f64 = 1e-6;

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obb {
    pub center: na::Point3<f64>,
    /// Half-width, half-height and half-length along the local axes.
    pub half_extents: na::Vector3<f64>,
    /// Column `i` is local axis `i` expressed in the parent space.
    pub orientation: na::Matrix3<f64>,
}

impl Default for Obb {
    /// Unit cube centered at the origin, aligned with the world axes.
    fn default() -> Self {
        Self {
            center: na::Point3::origin(),
            half_extents: na::Vector3::repeat(1.0),
            orientation: na::Matrix3::identity(),
        }
    }
}

impl Obb {
    pub fn new(
        center: na::Point3<f64>,
        half_extents: na::Vector3<f64>,
        orientation: na::Matrix3<f64>,
    ) -> Self {
        Self {
            center,
            half_extents,
            orientation,
        }
    }

    /// Build a box from raw scalars. `orientation` is row-major.
    pub fn from_scalars(center: [f64; 3], half_extents: [f64; 3], orientation: [f64; 9]) -> Self {
        let mut obb = Self::default();
        obb.set(center, half_extents, orientation);
        obb
    }

    /// Axis-aligned box spanning `min_pos..max_pos`.
    ///
    /// Nothing checks that `min_pos <= max_pos`. Swapped corners produce
    /// negative half-extents; see [`Obb::try_from_points`] for a checked
    /// variant.
    pub fn from_points(min_pos: &na::Point3<f64>, max_pos: &na::Point3<f64>) -> Self {
        let mut obb = Self::default();
        obb.set_from_points(min_pos, max_pos);
        obb
    }

    pub fn try_from_points(
        min_pos: &na::Point3<f64>,
        max_pos: &na::Point3<f64>,
    ) -> ObbResult<Self> {
        for axis in Axis::ALL {
            let (min, max) = (min_pos[axis.index()], max_pos[axis.index()]);
            if min > max {
                tracing::debug!(%axis, min, max, "rejecting inverted bounds");
                return Err(ObbError::InvertedBounds { axis, min, max });
            }
        }
        let obb = Self::from_points(min_pos, max_pos);
        obb.validate()?;
        Ok(obb)
    }

    /// Overwrite every field with `other`'s.
    pub fn copy_from(&mut self, other: &Obb) -> &mut Self {
        self.center = other.center;
        self.half_extents = other.half_extents;
        self.orientation = other.orientation;
        self
    }

    /// Overwrite every field from raw scalars. `orientation` is row-major.
    ///
    /// The orientation is stored as given; it is not re-orthonormalized and
    /// half-extents are not clamped.
    pub fn set(
        &mut self,
        center: [f64; 3],
        half_extents: [f64; 3],
        orientation: [f64; 9],
    ) -> &mut Self {
        let [cx, cy, cz] = center;
        let [hw, hh, hl] = half_extents;
        let [m11, m12, m13, m21, m22, m23, m31, m32, m33] = orientation;
        self.center = na::Point3::new(cx, cy, cz);
        self.half_extents = na::Vector3::new(hw, hh, hl);
        self.orientation = na::Matrix3::new(m11, m12, m13, m21, m22, m23, m31, m32, m33);
        self
    }

    /// Turn this box into the axis-aligned box spanning `min_pos..max_pos`.
    pub fn set_from_points(
        &mut self,
        min_pos: &na::Point3<f64>,
        max_pos: &na::Point3<f64>,
    ) -> &mut Self {
        self.center = na::center(min_pos, max_pos);
        self.half_extents = (max_pos - min_pos) * 0.5;
        self.orientation = na::Matrix3::identity();
        self
    }

    /// Local axis `axis` expressed in the parent space.
    pub fn axis(&self, axis: Axis) -> na::Vector3<f64> {
        self.orientation.column(axis.index()).into_owned()
    }

    /// Half-extents of the tightest enclosing axis-aligned box.
    ///
    /// Projecting the box onto world axis `i` spans
    /// `Σ_j |O[i][j]| * h[j]` on either side of the center, i.e. the
    /// half-extents transformed by the component-wise absolute orientation.
    pub fn world_half_extents(&self) -> na::Vector3<f64> {
        self.orientation.abs() * self.half_extents
    }

    /// Write the tight axis-aligned bounds of this box into `min_pos`/`max_pos`.
    pub fn get_boundary(&self, min_pos: &mut na::Point3<f64>, max_pos: &mut na::Point3<f64>) {
        let extent = self.world_half_extents();
        *min_pos = self.center - extent;
        *max_pos = self.center + extent;
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_half_extents(&self.center, &self.world_half_extents())
    }

    /// Apply a parent transform, writing the result into `out`.
    ///
    /// The center goes through `m`. The orientation is rebuilt from `rot`
    /// alone: rotation carried only by `m`, and this box's own orientation,
    /// are both discarded, so parents must pass their full rotation as `rot`.
    /// `scale` stretches the half-extents along the local axes. `_pos` is
    /// accepted for call-site symmetry; translation comes from `m`.
    pub fn transform(
        &self,
        m: &na::Matrix4<f64>,
        _pos: &na::Point3<f64>,
        rot: &na::UnitQuaternion<f64>,
        scale: &na::Vector3<f64>,
        out: &mut Obb,
    ) {
        out.center = m.transform_point(&self.center);
        out.orientation = rot.to_rotation_matrix().into_inner();
        out.half_extents = self.half_extents.component_mul(scale);
    }

    /// Like [`Obb::transform`] without the scale channel.
    ///
    /// `out.half_extents` is left as it was.
    pub fn translate_and_rotate(
        &self,
        m: &na::Matrix4<f64>,
        rot: &na::UnitQuaternion<f64>,
        out: &mut Obb,
    ) {
        out.center = m.transform_point(&self.center);
        out.orientation = rot.to_rotation_matrix().into_inner();
    }

    /// Write only the scaled half-extents into `out`.
    pub fn set_scale(&self, scale: &na::Vector3<f64>, out: &mut Obb) {
        out.half_extents = self.half_extents.component_mul(scale);
    }

    pub fn corners(&self) -> [na::Point3<f64>; 8] {
        let x = self.axis(Axis::X) * self.half_extents.x;
        let y = self.axis(Axis::Y) * self.half_extents.y;
        let z = self.axis(Axis::Z) * self.half_extents.z;
        let c = self.center;
        [
            c - x - y - z,
            c - x - y + z,
            c - x + y - z,
            c - x + y + z,
            c + x - y - z,
            c + x - y + z,
            c + x + y - z,
            c + x + y + z,
        ]
    }

    /// Check the invariants the unchecked operations assume.
    pub fn validate(&self) -> ObbResult<()> {
        if !self.center.coords.iter().all(|v| v.is_finite()) {
            return Err(non_finite("center"));
        }
        if !self.half_extents.iter().all(|v| v.is_finite()) {
            return Err(non_finite("half_extents"));
        }
        if !self.orientation.iter().all(|v| v.is_finite()) {
            return Err(non_finite("orientation"));
        }

        for axis in Axis::ALL {
            let value = self.half_extents[axis.index()];
            if value < 0.0 {
                tracing::debug!(%axis, value, "negative half-extent");
                return Err(ObbError::NegativeHalfExtent { axis, value });
            }
        }

        let gram = self.orientation.transpose() * self.orientation;
        let deviation = (gram - na::Matrix3::identity()).amax();
        if deviation > ORTHONORMAL_EPSILON {
            tracing::debug!(deviation, "orientation is not orthonormal");
            return Err(ObbError::NotOrthonormal { deviation });
        }

        Ok(())
    }
}

fn non_finite(field: &'static str) -> ObbError {
    tracing::debug!(field, "non-finite component");
    ObbError::NonFinite { field }
}

impl Shape for Obb {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Obb
    }
}

impl AbsDiffEq for Obb {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.center.abs_diff_eq(&other.center, epsilon)
            && self.half_extents.abs_diff_eq(&other.half_extents, epsilon)
            && self.orientation.abs_diff_eq(&other.orientation, epsilon)
    }
}

impl RelativeEq for Obb {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.center.relative_eq(&other.center, epsilon, max_relative)
            && self
                .half_extents
                .relative_eq(&other.half_extents, epsilon, max_relative)
            && self
                .orientation
                .relative_eq(&other.orientation, epsilon, max_relative)
    }
}
