// src/planes.rs

use crate::native::{Anchor, Plane, TrackingState};
use crate::wire::WireAnchor;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Lifecycle change for a single plane, ready to send on the session channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", content = "arguments")]
pub enum PlaneEvent {
    #[serde(rename = "onPlaneDetected")]
    Detected(WireAnchor),
    #[serde(rename = "onPlaneUpdated")]
    Updated(WireAnchor),
    #[serde(rename = "onPlaneRemoved")]
    Removed(WireAnchor),
}

impl PlaneEvent {
    /// Channel method name for this event.
    pub fn method(&self) -> &'static str {
        match self {
            PlaneEvent::Detected(_) => "onPlaneDetected",
            PlaneEvent::Updated(_) => "onPlaneUpdated",
            PlaneEvent::Removed(_) => "onPlaneRemoved",
        }
    }

    pub fn anchor(&self) -> &WireAnchor {
        match self {
            PlaneEvent::Detected(a) | PlaneEvent::Updated(a) | PlaneEvent::Removed(a) => a,
        }
    }
}

/// Turns per-frame plane updates into detected / updated / removed events.
///
/// The tracker remembers which plane ids it has announced. A plane is announced
/// once when it first reaches `Tracking`, updated on later tracked frames, and
/// retracted when the engine stops tracking it.
#[derive(Debug, Default)]
pub struct PlaneTracker {
    detected: HashSet<u64>,
    paused: bool,
}

impl PlaneTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes the planes the engine reported as updated in one frame.
    pub fn on_frame<'p, I>(&mut self, updated: I) -> Vec<PlaneEvent>
    where
        I: IntoIterator<Item = &'p Plane>,
    {
        if self.paused {
            trace!("session paused, skipping plane updates");
            return Vec::new();
        }

        let mut events = Vec::new();
        for plane in updated {
            let seen = self.detected.contains(&plane.id);
            let event = match (plane.tracking_state, seen) {
                (TrackingState::Tracking, false) => {
                    self.detected.insert(plane.id);
                    PlaneEvent::Detected(Self::record(plane))
                }
                (TrackingState::Tracking, true) => PlaneEvent::Updated(Self::record(plane)),
                (TrackingState::Stopped, true) => {
                    self.detected.remove(&plane.id);
                    PlaneEvent::Removed(Self::record(plane))
                }
                _ => continue,
            };
            debug!(plane = plane.id, method = event.method(), "plane lifecycle");
            events.push(event);
        }
        events
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_detected(&self, plane_id: u64) -> bool {
        self.detected.contains(&plane_id)
    }

    pub fn detected_count(&self) -> usize {
        self.detected.len()
    }

    /// Forgets every announced plane, e.g. when the view is disposed.
    pub fn clear(&mut self) {
        self.detected.clear();
    }

    fn record(plane: &Plane) -> WireAnchor {
        WireAnchor::from(&Anchor::at_plane_center(plane))
    }
}
