// src/request.rs

//! Arguments of the channel calls that carry transforms.

use crate::codec::decompose;
use crate::native::Pose;
use crate::{BridgeError, Result, TRANSFORM_LEN};
use nalgebra::Matrix4;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Anchor type code for plane anchors, the only kind creatable from a transform.
pub const ANCHOR_TYPE_PLANE: i64 = 0;

/// `addAnchor` arguments.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddAnchorRequest {
    #[serde(rename = "type")]
    pub kind: Option<i64>,
    pub name: Option<String>,
    pub transformation: Option<Vec<f64>>,
}

/// A validated request to place a named anchor at a pose.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneAnchorPlacement {
    pub name: String,
    pub pose: Pose,
}

impl AddAnchorRequest {
    pub fn from_arguments(arguments: Value) -> Result<Self> {
        Ok(serde_json::from_value(arguments)?)
    }

    /// Decodes the transformation into the pose the session anchors at.
    pub fn into_placement(self) -> Result<PlaneAnchorPlacement> {
        let kind = self.kind.ok_or(BridgeError::MissingArgument("type"))?;
        if kind != ANCHOR_TYPE_PLANE {
            warn!(kind, "addAnchor with unsupported anchor type");
            return Err(BridgeError::UnsupportedAnchorType(kind));
        }
        let name = self.name.ok_or(BridgeError::MissingArgument("name"))?;
        let transform = self
            .transformation
            .ok_or(BridgeError::MissingTransformation)?;

        let (position, rotation) = decompose(&transform)?;
        Ok(PlaneAnchorPlacement {
            name,
            pose: Pose::from_decomposed(&position, &rotation),
        })
    }
}

/// `transformationChanged` arguments.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransformNodeRequest {
    pub name: Option<String>,
    pub transformation: Option<Vec<f64>>,
}

/// A validated node transform, narrowed to scene-graph precision.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTransformUpdate {
    pub name: String,
    pub matrix: Matrix4<f32>,
}

impl TransformNodeRequest {
    pub fn from_arguments(arguments: Value) -> Result<Self> {
        Ok(serde_json::from_value(arguments)?)
    }

    /// Validates the new node transform.
    ///
    /// The host drops `transformationChanged` calls entirely unless
    /// [`SessionConfig::accepts_transform_updates`](crate::config::SessionConfig::accepts_transform_updates)
    /// holds, so this is only reached while pans or rotations are enabled.
    pub fn into_update(self) -> Result<NodeTransformUpdate> {
        let name = self.name.ok_or(BridgeError::MissingArgument("name"))?;
        let transform = self
            .transformation
            .ok_or(BridgeError::MissingTransformation)?;
        if transform.len() != TRANSFORM_LEN {
            return Err(BridgeError::InvalidArgument {
                len: transform.len(),
            });
        }

        let narrowed: Vec<f32> = transform.iter().map(|v| *v as f32).collect();
        Ok(NodeTransformUpdate {
            name,
            matrix: Matrix4::from_column_slice(&narrowed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    #[test]
    fn test_add_anchor_decodes_pose() {
        let request = AddAnchorRequest::from_arguments(json!({
            "type": 0,
            "name": "anchor-1",
            "transformation": [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.5, 1.0, -3.0, 1.0],
        }))
        .unwrap();

        let placement = request.into_placement().unwrap();
        assert_eq!(placement.name, "anchor-1");
        assert_eq!(placement.pose.translation, [0.5, 1.0, -3.0]);
        assert_relative_eq!(placement.pose.rotation[3], 1.0);
    }

    #[test]
    fn test_add_anchor_rejects_other_types() {
        let request = AddAnchorRequest {
            kind: Some(1),
            name: Some("a".into()),
            transformation: Some(vec![0.0; 16]),
        };
        let err = request.into_placement().unwrap_err();
        assert!(matches!(err, BridgeError::UnsupportedAnchorType(1)));
    }

    #[test]
    fn test_add_anchor_missing_fields() {
        let err = AddAnchorRequest::from_arguments(json!({ "type": 0, "name": "a" }))
            .unwrap()
            .into_placement()
            .unwrap_err();
        assert!(matches!(err, BridgeError::MissingTransformation));
        assert_eq!(err.code(), "INVALID_TRANSFORMATION");

        let err = AddAnchorRequest::from_arguments(json!({ "type": 0 }))
            .unwrap()
            .into_placement()
            .unwrap_err();
        assert!(matches!(err, BridgeError::MissingArgument("name")));
        assert_eq!(err.code(), "INVALID_ARGUMENT");
    }

    #[test]
    fn test_add_anchor_short_transform() {
        let request = AddAnchorRequest {
            kind: Some(0),
            name: Some("a".into()),
            transformation: Some(vec![0.0; 15]),
        };
        let err = request.into_placement().unwrap_err();
        assert!(matches!(err, BridgeError::InvalidArgument { len: 15 }));
        assert_eq!(err.code(), "INVALID_TRANSFORMATION");
    }

    #[test]
    fn test_transform_node_builds_column_major_matrix() {
        let mut values = vec![0.0; 16];
        values[0] = 1.0;
        values[5] = 1.0;
        values[10] = 1.0;
        values[15] = 1.0;
        values[12] = 2.0;

        let update = TransformNodeRequest::from_arguments(json!({
            "name": "lamp",
            "transformation": values,
        }))
        .unwrap()
        .into_update()
        .unwrap();

        assert_eq!(update.name, "lamp");
        assert_eq!(update.matrix[(0, 3)], 2.0);
    }

    #[test]
    fn test_transform_node_requires_sixteen_values() {
        let request = TransformNodeRequest {
            name: Some("lamp".into()),
            transformation: Some(vec![1.0; 17]),
        };
        assert!(matches!(
            request.into_update(),
            Err(BridgeError::InvalidArgument { len: 17 })
        ));
    }

    #[test]
    fn test_transform_node_requires_name() {
        let request = TransformNodeRequest {
            name: None,
            transformation: Some(vec![0.0; 16]),
        };
        assert!(matches!(
            request.into_update(),
            Err(BridgeError::MissingArgument("name"))
        ));
    }

    #[test]
    fn test_transform_node_requires_transformation() {
        let err = TransformNodeRequest::from_arguments(json!({ "name": "lamp" }))
            .unwrap()
            .into_update()
            .unwrap_err();
        assert!(matches!(err, BridgeError::MissingTransformation));
        assert_eq!(err.code(), "INVALID_TRANSFORMATION");
    }

    #[test]
    fn test_transform_updates_follow_gesture_config() {
        use crate::config::SessionConfig;

        let arguments = json!({
            "name": "lamp",
            "transformation": [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0],
        });
        let apply = |config: &SessionConfig| -> Option<NodeTransformUpdate> {
            if !config.accepts_transform_updates() {
                return None;
            }
            TransformNodeRequest::from_arguments(arguments.clone())
                .and_then(TransformNodeRequest::into_update)
                .ok()
        };

        let idle = SessionConfig::default();
        assert!(apply(&idle).is_none());

        let rotating = SessionConfig::from_arguments(json!({ "handleRotation": true })).unwrap();
        let update = apply(&rotating).unwrap();
        assert_eq!(update.name, "lamp");
        assert_eq!(update.matrix, Matrix4::identity());
    }
}
