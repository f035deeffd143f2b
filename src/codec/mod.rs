// Copyright (c) 2026 ar-bridge contributors
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT
// See LICENSE in the repository root.
// src/codec/mod.rs

//! Conversion between flat column-major transforms and decomposed poses.
//!
//! The wire layout is a 4x4 matrix flattened column by column. Element `4 * c + r`
//! holds row `r`, column `c`, which puts the translation in elements 12, 13 and 14.

pub mod quaternion;

use crate::{BridgeError, Position, Quaternion, Result, Transform, TRANSFORM_LEN};
use nalgebra::{Isometry3, Matrix3, Matrix4};
use tracing::debug;

/// Anything the native side can express as a 4x4 single-precision matrix.
///
/// Implementors return the matrix the AR engine or scene graph holds, without
/// any conversion. [`serialize`] widens it for the wire.
pub trait NativeTransform {
    fn to_matrix(&self) -> Matrix4<f32>;
}

impl NativeTransform for Matrix4<f32> {
    fn to_matrix(&self) -> Matrix4<f32> {
        *self
    }
}

impl NativeTransform for Isometry3<f32> {
    fn to_matrix(&self) -> Matrix4<f32> {
        self.to_homogeneous()
    }
}

/// Splits a flat transform into its translation and rotation.
///
/// # Arguments
/// * `transform` - Sixteen column-major values. The upper-left 3x3 block must be
///   an unscaled rotation for the quaternion to be meaningful.
///
/// # Errors
/// [`BridgeError::InvalidArgument`] when `transform` does not hold exactly sixteen values.
pub fn decompose(transform: &[f64]) -> Result<(Position, Quaternion)> {
    if transform.len() != TRANSFORM_LEN {
        debug!(len = transform.len(), "rejecting malformed transform");
        return Err(BridgeError::InvalidArgument {
            len: transform.len(),
        });
    }

    let position = Position::new(transform[12], transform[13], transform[14]);

    let rotation = Matrix3::new(
        transform[0],
        transform[4],
        transform[8],
        transform[1],
        transform[5],
        transform[9],
        transform[2],
        transform[6],
        transform[10],
    );

    Ok((position, quaternion::from_rotation(&rotation)))
}

/// Flattens a native transform for the wire, widening each element to `f64`.
pub fn serialize<T: NativeTransform + ?Sized>(native: &T) -> Transform {
    let matrix = native.to_matrix();
    let mut out = [0.0; TRANSFORM_LEN];
    for (dst, src) in out.iter_mut().zip(matrix.as_slice()) {
        *dst = f64::from(*src);
    }
    out
}

/// Builds a flat transform from a decomposed pose. Inverse of [`decompose`]
/// for unit quaternions.
pub fn compose(position: &Position, rotation: &Quaternion) -> Transform {
    let r = quaternion::to_rotation(rotation);
    [
        r[(0, 0)],
        r[(1, 0)],
        r[(2, 0)],
        0.0,
        r[(0, 1)],
        r[(1, 1)],
        r[(2, 1)],
        0.0,
        r[(0, 2)],
        r[(1, 2)],
        r[(2, 2)],
        0.0,
        position.x,
        position.y,
        position.z,
        1.0,
    ]
}
