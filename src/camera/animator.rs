use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

use super::MapCamera;
use crate::error::TripError;

/// Deepest zoom the map accepts.
pub const MAX_MAP_ZOOM: u8 = 22;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomOutcome {
    /// The map was already at the target; nothing was mutated.
    AlreadyThere,
    Reached { steps: u32 },
}

/// Walks the map's zoom toward `target` one level at a time, pausing
/// `step_delay` between levels. Resolves once the zoom reported by the map's
/// change notification equals (or has passed) the target.
///
/// The step direction is fixed from the zoom at call time. There is no
/// cancellation; callers serialize animations themselves.
///
/// # Errors
///
/// Returns `TripError::Camera` if the map's zoom notification channel closes
/// before the target is reached.
pub async fn smooth_zoom<M>(
    map: &M,
    target: u8,
    step_delay: Duration,
) -> Result<ZoomOutcome, TripError>
where
    M: MapCamera + ?Sized,
{
    let target = target.min(MAX_MAP_ZOOM);
    let current = map.zoom();
    if current == target {
        return Ok(ZoomOutcome::AlreadyThere);
    }

    let step: i16 = if target > current { 1 } else { -1 };
    let mut changes = map.zoom_changes();
    map.set_zoom(shift(current, step));
    let mut steps = 1;

    loop {
        let reported = match changes.recv().await {
            Ok(zoom) => zoom,
            Err(RecvError::Lagged(skipped)) => {
                debug!(skipped, "zoom notifications lagged, reading zoom directly");
                map.zoom()
            }
            Err(RecvError::Closed) => {
                return Err(TripError::Camera(
                    "zoom change notifications closed mid-animation".to_string(),
                ));
            }
        };

        let short_of_target =
            (step > 0 && reported < target) || (step < 0 && reported > target);
        if !short_of_target {
            return Ok(ZoomOutcome::Reached { steps });
        }

        tokio::time::sleep(step_delay).await;
        map.set_zoom(shift(reported, step));
        steps += 1;
    }
}

fn shift(zoom: u8, step: i16) -> u8 {
    // clamp keeps the cast lossless
    (i16::from(zoom) + step).clamp(0, i16::from(MAX_MAP_ZOOM)) as u8
}
