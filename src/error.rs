use crate::obb::Axis;

/// Invariant violations reported by the checked OBB constructors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ObbError {
    #[error("half-extent along local {axis} axis is negative ({value})")]
    NegativeHalfExtent { axis: Axis, value: f64 },

    #[error("{field} contains a non-finite component")]
    NonFinite { field: &'static str },

    #[error("orientation is not orthonormal (max deviation {deviation})")]
    NotOrthonormal { deviation: f64 },

    #[error("min exceeds max along {axis} axis ({min} > {max})")]
    InvertedBounds { axis: Axis, min: f64, max: f64 },
}

pub type ObbResult<T> = Result<T, ObbError>;
