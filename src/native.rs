// src/native.rs

//! Plain-data mirrors of the AR engine objects the bridge reads.
//!
//! The engine owns the real handles. These values are what the bridge needs out
//! of them to answer channel calls and emit events.

use crate::codec::NativeTransform;
use crate::{Position, Quaternion};
use nalgebra::{Isometry3, Matrix4, Translation3, UnitQuaternion};

/// Rigid pose in single precision, the engine's own representation.
///
/// # Fields
/// * `translation` - Position in metres, `[x, y, z]`.
/// * `rotation` - Unit quaternion, `[x, y, z, w]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub translation: [f32; 3],
    pub rotation: [f32; 4],
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        translation: [0.0; 3],
        rotation: [0.0, 0.0, 0.0, 1.0],
    };

    pub fn new(translation: [f32; 3], rotation: [f32; 4]) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Narrows a decoded pose to engine precision, as anchor creation requires.
    pub fn from_decomposed(position: &Position, rotation: &Quaternion) -> Self {
        Self {
            translation: [position.x as f32, position.y as f32, position.z as f32],
            rotation: [
                rotation.x as f32,
                rotation.y as f32,
                rotation.z as f32,
                rotation.w as f32,
            ],
        }
    }

    pub fn to_isometry(&self) -> Isometry3<f32> {
        let [tx, ty, tz] = self.translation;
        let [x, y, z, w] = self.rotation;
        Isometry3::from_parts(
            Translation3::new(tx, ty, tz),
            UnitQuaternion::new_normalize(nalgebra::Quaternion::new(w, x, y, z)),
        )
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl NativeTransform for Pose {
    fn to_matrix(&self) -> Matrix4<f32> {
        self.to_isometry().to_homogeneous()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackingState {
    Tracking,
    Paused,
    Stopped,
}

/// Orientation class of a detected plane. The discriminant is the wire `alignment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneType {
    HorizontalUpwardFacing = 0,
    HorizontalDownwardFacing = 1,
    Vertical = 2,
}

impl PlaneType {
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

/// A detected planar surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub id: u64,
    pub center_pose: Pose,
    pub extent_x: f32,
    pub extent_z: f32,
    pub plane_type: PlaneType,
    pub tracking_state: TrackingState,
}

/// Something the engine tracks that anchors and hits can attach to.
#[derive(Debug, Clone, PartialEq)]
pub enum Trackable {
    Plane(Plane),
    Point {
        pose: Pose,
        tracking_state: TrackingState,
    },
}

impl Trackable {
    pub fn tracking_state(&self) -> TrackingState {
        match self {
            Trackable::Plane(plane) => plane.tracking_state,
            Trackable::Point { tracking_state, .. } => *tracking_state,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    pub id: u64,
    pub pose: Pose,
    pub cloud_anchor_id: Option<String>,
    pub trackable: Option<Trackable>,
}

impl Anchor {
    /// Anchor the engine would create at a plane's center pose.
    pub fn at_plane_center(plane: &Plane) -> Self {
        Self {
            id: plane.id,
            pose: plane.center_pose,
            cloud_anchor_id: None,
            trackable: Some(Trackable::Plane(plane.clone())),
        }
    }
}

/// Result of intersecting a screen-space ray with tracked geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct HitResult {
    pub distance: f32,
    pub hit_pose: Pose,
    pub trackable: Trackable,
}

/// A scene-graph node as far as transform reporting is concerned.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: Option<String>,
    pub world_transform: Matrix4<f32>,
}

impl NativeTransform for SceneNode {
    fn to_matrix(&self) -> Matrix4<f32> {
        self.world_transform
    }
}
