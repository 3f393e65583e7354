use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::camera::{CameraOp, CameraTiming, HeadlessMap};
use crate::controller::directions::DirectionsService;
use crate::error::TripError;
use crate::model::Itinerary;
use crate::mvu::{Deps, Focus, UserEvent, ViewModel, spawn_view};

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ReplayStep {
    /// Wait this long after the previous event.
    #[serde(default)]
    pub after_ms: u64,
    pub event: UserEvent,
}

#[derive(Serialize, Debug)]
pub struct ReplayReport {
    pub focus: Focus,
    pub selected_day: Option<u32>,
    pub route_overlay: bool,
    pub day_route: Option<u32>,
    pub route_duration: Option<String>,
    pub sidebar_collapsed: bool,
    pub ops: Vec<CameraOp>,
}

/// # Errors
///
/// Returns `TripError::Parse` if `text` is not a JSON array of steps.
pub fn parse_script(text: &str) -> Result<Vec<ReplayStep>, TripError> {
    Ok(serde_json::from_str(text)?)
}

/// Feeds `steps` into a fresh view backed by a headless map, waits for every
/// animation and query to land, then reports the final state and the camera
/// operations issued.
///
/// # Errors
///
/// Returns an error if the view loop stops early or panics.
pub async fn run_replay(
    itinerary: Arc<Itinerary>,
    steps: Vec<ReplayStep>,
    directions: Option<Arc<dyn DirectionsService>>,
    viewport_width: u32,
    timing: CameraTiming,
) -> Result<ReplayReport, TripError> {
    let map = Arc::new(HeadlessMap::new(itinerary.default_camera));
    let model = ViewModel::new(itinerary).with_viewport_width(viewport_width);
    let (handle, task) = spawn_view(
        model,
        Deps {
            map: Arc::clone(&map),
            directions,
            timing,
        },
    );

    for step in steps {
        if step.after_ms > 0 {
            tokio::time::sleep(Duration::from_millis(step.after_ms)).await;
        }
        info!(event = ?step.event, "replay event");
        handle.send(step.event)?;
    }
    drop(handle);

    let model = task
        .await
        .map_err(|e| TripError::Other(format!("view loop failed: {e}")))?;

    Ok(ReplayReport {
        selected_day: model.focus.day(),
        focus: model.focus,
        route_overlay: model.route_overlay,
        day_route: model.day_route,
        route_duration: model.directions.duration,
        sidebar_collapsed: model.layout.sidebar_collapsed,
        ops: map.ops(),
    })
}
