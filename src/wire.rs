// src/wire.rs

//! Records sent to the UI layer over the message channel.
//!
//! Field names match what the UI side reads, which is why several are renamed.

use crate::codec::serialize;
use crate::native::{Anchor, HitResult, SceneNode, Trackable, TrackingState};
use crate::Transform;
use serde::{Deserialize, Serialize};

/// `type` value for records attached to a plane.
pub const TYPE_PLANE: u8 = 1;
/// `type` value for feature points and anything else.
pub const TYPE_POINT: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

/// Serialized anchor. Plane anchors also carry the plane geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireAnchor {
    pub name: String,
    pub transform: Transform,
    #[serde(rename = "cloudanchorid")]
    pub cloud_anchor_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(rename = "centerPose", default, skip_serializing_if = "Option::is_none")]
    pub center_pose: Option<Transform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<Extent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<u8>,
}

impl From<&Anchor> for WireAnchor {
    fn from(anchor: &Anchor) -> Self {
        let name = anchor
            .cloud_anchor_id
            .clone()
            .unwrap_or_else(|| format!("anchor_{}", anchor.id));

        let mut record = WireAnchor {
            name,
            transform: serialize(&anchor.pose),
            cloud_anchor_id: anchor.cloud_anchor_id.clone(),
            kind: TYPE_POINT,
            center_pose: None,
            extent: None,
            alignment: None,
        };

        if let Some(Trackable::Plane(plane)) = &anchor.trackable {
            record.kind = TYPE_PLANE;
            record.center_pose = Some(serialize(&plane.center_pose));
            record.extent = Some(Extent {
                width: plane.extent_x,
                height: plane.extent_z,
            });
            record.alignment = Some(plane.plane_type.ordinal());
        }

        record
    }
}

/// Serialized tap hit, reported through `onPlaneOrPointTap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireHitResult {
    pub distance: f64,
    pub transform: Transform,
    #[serde(rename = "type")]
    pub kind: u8,
    pub anchor: WireAnchor,
}

impl WireHitResult {
    /// # Arguments
    /// * `hit` - The engine hit.
    /// * `anchor` - The temporary anchor the engine created at the hit, used to
    ///   describe what was hit. The caller detaches it afterwards.
    pub fn new(hit: &HitResult, anchor: &Anchor) -> Self {
        let on_tracked_plane = matches!(
            &hit.trackable,
            Trackable::Plane(plane) if plane.tracking_state == TrackingState::Tracking
        );

        WireHitResult {
            distance: f64::from(hit.distance),
            transform: serialize(&hit.hit_pose),
            kind: if on_tracked_plane { TYPE_PLANE } else { TYPE_POINT },
            anchor: WireAnchor::from(anchor),
        }
    }
}

/// Node transform reported when a gesture ends. A missing node serializes to `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireNodeTransform {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
}

impl WireNodeTransform {
    pub fn new(node: Option<&SceneNode>) -> Self {
        match node {
            Some(node) => WireNodeTransform {
                name: node.name.clone(),
                transform: Some(serialize(node)),
            },
            None => WireNodeTransform::default(),
        }
    }
}

/// Only hits on planes or points that are currently tracked are reported to the UI.
pub fn is_reportable_hit(hit: &HitResult) -> bool {
    hit.trackable.tracking_state() == TrackingState::Tracking
}
