// src/config.rs

use crate::Result;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Plane orientations the session searches for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaneFindingMode {
    #[default]
    Disabled,
    Horizontal,
    Vertical,
    HorizontalAndVertical,
}

impl PlaneFindingMode {
    /// Maps the `planeDetectionConfig` integer. Unknown values disable plane finding.
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(1) => PlaneFindingMode::Horizontal,
            Some(2) => PlaneFindingMode::Vertical,
            Some(3) => PlaneFindingMode::HorizontalAndVertical,
            _ => PlaneFindingMode::Disabled,
        }
    }
}

impl<'de> Deserialize<'de> for PlaneFindingMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let code = Option::<i64>::deserialize(deserializer)?;
        Ok(Self::from_code(code))
    }
}

/// Session options sent with the `init` call.
///
/// Absent keys take the same defaults the UI widget documents.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    pub show_animated_guide: bool,
    pub show_feature_points: bool,
    #[serde(rename = "planeDetectionConfig")]
    pub plane_finding_mode: PlaneFindingMode,
    pub show_planes: bool,
    pub custom_plane_texture_path: Option<String>,
    pub show_world_origin: bool,
    pub handle_taps: bool,
    pub handle_pans: bool,
    pub handle_rotation: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            show_animated_guide: true,
            show_feature_points: false,
            plane_finding_mode: PlaneFindingMode::Disabled,
            show_planes: true,
            custom_plane_texture_path: None,
            show_world_origin: false,
            handle_taps: true,
            handle_pans: false,
            handle_rotation: false,
        }
    }
}

impl SessionConfig {
    /// Decodes the `init` call arguments. `null` yields the defaults.
    pub fn from_arguments(arguments: Value) -> Result<Self> {
        if arguments.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(arguments)?)
    }

    /// `transformationChanged` calls are only honoured while a gesture is enabled.
    pub fn accepts_transform_updates(&self) -> bool {
        self.handle_pans || self.handle_rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_for_empty_arguments() {
        let config = SessionConfig::from_arguments(json!({})).unwrap();
        assert_eq!(config, SessionConfig::default());
        assert!(config.show_planes);
        assert!(config.handle_taps);
        assert!(!config.accepts_transform_updates());

        let config = SessionConfig::from_arguments(Value::Null).unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_reads_channel_keys() {
        let config = SessionConfig::from_arguments(json!({
            "showFeaturePoints": true,
            "planeDetectionConfig": 3,
            "showPlanes": false,
            "customPlaneTexturePath": "textures/grid.png",
            "handlePans": true,
        }))
        .unwrap();

        assert!(config.show_feature_points);
        assert_eq!(config.plane_finding_mode, PlaneFindingMode::HorizontalAndVertical);
        assert!(!config.show_planes);
        assert_eq!(config.custom_plane_texture_path.as_deref(), Some("textures/grid.png"));
        assert!(config.accepts_transform_updates());
    }

    #[test]
    fn test_unknown_plane_detection_code_disables() {
        let config = SessionConfig::from_arguments(json!({ "planeDetectionConfig": 9 })).unwrap();
        assert_eq!(config.plane_finding_mode, PlaneFindingMode::Disabled);

        let config =
            SessionConfig::from_arguments(json!({ "planeDetectionConfig": null })).unwrap();
        assert_eq!(config.plane_finding_mode, PlaneFindingMode::Disabled);
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let err = SessionConfig::from_arguments(json!({ "showPlanes": "yes" })).unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENTS");
    }
}
