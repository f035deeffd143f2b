// Copyright (c) 2026 ar-bridge contributors
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT
// See LICENSE in the repository root.
use nalgebra::Quaternion as NaQuaternion;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of elements in a flat 4x4 transform.
pub const TRANSFORM_LEN: usize = 16;

/// A 4x4 affine transform flattened in column-major order, as exchanged with the UI layer.
///
/// Translation lives in elements 12, 13 and 14.
pub type Transform = [f64; TRANSFORM_LEN];

/// Translation component of a decomposed transform.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Rotation component of a decomposed transform.
///
/// Components are stored in `(x, y, z, w)` order, the layout native poses expect.
/// Unit norm is only guaranteed when the source rotation block was orthonormal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Quaternion> for NaQuaternion<f64> {
    fn from(q: Quaternion) -> Self {
        // nalgebra's constructor takes the scalar part first.
        NaQuaternion::new(q.w, q.x, q.y, q.z)
    }
}

impl From<NaQuaternion<f64>> for Quaternion {
    fn from(q: NaQuaternion<f64>) -> Self {
        Self::new(q.i, q.j, q.k, q.w)
    }
}

/// Errors raised while decoding channel arguments into native values.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A transform did not carry exactly sixteen elements.
    #[error("transform must be a 4x4 matrix (16 values), got {len}")]
    InvalidArgument { len: usize },

    /// A required call argument was absent.
    #[error("{0} is required")]
    MissingArgument(&'static str),

    /// A call that carries a transform arrived without one.
    #[error("transformation is required")]
    MissingTransformation,

    /// Only plane anchors (type 0) can be created from a transform.
    #[error("unsupported anchor type {0}")]
    UnsupportedAnchorType(i64),

    /// Call arguments could not be decoded.
    #[error("malformed call arguments: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl BridgeError {
    /// Error code reported back over the method channel.
    pub fn code(&self) -> &'static str {
        match self {
            BridgeError::InvalidArgument { .. } => "INVALID_TRANSFORMATION",
            BridgeError::MissingArgument(_) => "INVALID_ARGUMENT",
            BridgeError::MissingTransformation => "INVALID_TRANSFORMATION",
            BridgeError::UnsupportedAnchorType(_) => "UNSUPPORTED_ANCHOR_TYPE",
            BridgeError::Deserialize(_) => "INVALID_ARGUMENTS",
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;

pub mod codec;
pub mod config;
pub mod native;
pub mod planes;
pub mod request;
pub mod wire;

#[cfg(feature = "wasm")]
pub mod wasm_bridge;

pub use codec::{compose, decompose, serialize, NativeTransform};
