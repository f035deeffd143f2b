#![cfg(target_arch = "wasm32")]
#![cfg(feature = "wasm")]

use crate::codec::{compose, decompose};
use crate::native::{Plane, PlaneType, Pose, TrackingState};
use crate::planes::PlaneTracker;
use crate::{Position, Quaternion};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[derive(Serialize, Deserialize)]
pub struct WasmPose {
    pub position: Position,
    pub rotation: Quaternion,
}

/// Plane as reported by a web AR runtime.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasmPlane {
    pub id: u64,
    pub center_pose: Vec<f64>,
    pub extent_x: f32,
    pub extent_z: f32,
    pub alignment: u8,
    pub tracking: String,
}

impl WasmPlane {
    fn into_plane(self) -> Result<Plane, JsValue> {
        let (position, rotation) = decompose(&self.center_pose).map_err(to_js_error)?;
        let plane_type = match self.alignment {
            0 => PlaneType::HorizontalUpwardFacing,
            1 => PlaneType::HorizontalDownwardFacing,
            2 => PlaneType::Vertical,
            other => return Err(JsValue::from_str(&format!("unknown alignment {}", other))),
        };
        let tracking_state = match self.tracking.as_str() {
            "tracking" => TrackingState::Tracking,
            "paused" => TrackingState::Paused,
            "stopped" => TrackingState::Stopped,
            other => return Err(JsValue::from_str(&format!("unknown tracking state {}", other))),
        };
        Ok(Plane {
            id: self.id,
            center_pose: Pose::from_decomposed(&position, &rotation),
            extent_x: self.extent_x,
            extent_z: self.extent_z,
            plane_type,
            tracking_state,
        })
    }
}

fn to_js_error<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Splits a 16-value column-major transform into `{ position, rotation }`.
#[wasm_bindgen(js_name = decomposeTransform)]
pub fn decompose_transform(transform: &[f64]) -> Result<JsValue, JsValue> {
    let (position, rotation) = decompose(transform).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&WasmPose { position, rotation }).map_err(to_js_error)
}

/// Inverse of `decomposeTransform`.
#[wasm_bindgen(js_name = composeTransform)]
pub fn compose_transform(pose: JsValue) -> Result<Vec<f64>, JsValue> {
    let pose: WasmPose = serde_wasm_bindgen::from_value(pose).map_err(to_js_error)?;
    Ok(compose(&pose.position, &pose.rotation).to_vec())
}

/// JS-facing plane lifecycle tracker
#[wasm_bindgen]
pub struct PlaneTrackerHandle {
    tracker: PlaneTracker,
}

#[wasm_bindgen]
impl PlaneTrackerHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PlaneTrackerHandle {
        PlaneTrackerHandle {
            tracker: PlaneTracker::new(),
        }
    }

    /// Feeds one frame of updated planes and returns the resulting
    /// `{ method, arguments }` events.
    #[wasm_bindgen(js_name = onFrame)]
    pub fn on_frame(&mut self, planes: JsValue) -> Result<JsValue, JsValue> {
        let raw: Vec<WasmPlane> = serde_wasm_bindgen::from_value(planes).map_err(to_js_error)?;
        let planes = raw
            .into_iter()
            .map(WasmPlane::into_plane)
            .collect::<Result<Vec<_>, _>>()?;

        let events = self.tracker.on_frame(&planes);
        serde_wasm_bindgen::to_value(&events).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = setPaused)]
    pub fn set_paused(&mut self, paused: bool) {
        self.tracker.set_paused(paused);
    }

    pub fn clear(&mut self) {
        self.tracker.clear();
    }
}

impl Default for PlaneTrackerHandle {
    fn default() -> Self {
        Self::new()
    }
}
