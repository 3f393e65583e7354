pub mod animator;
pub mod headless;

use std::time::Duration;
use tokio::sync::broadcast;

use crate::model::{LatLng, LatLngBounds, Padding};

pub use animator::{ZoomOutcome, smooth_zoom};
pub use headless::{CameraOp, HeadlessMap};

/// Zoom level beyond which the camera never pans across the map.
pub const MAX_PAN_ZOOM: u8 = 8;
pub const ACCOMMODATION_ZOOM: u8 = 16;
pub const SPOT_ZOOM: u8 = 16;
pub const GOLF_ZOOM: u8 = 14;

/// The viewport primitives of the external map SDK.
///
/// Every programmatic `set_zoom` must be followed by exactly one value on the
/// `zoom_changes` channel carrying the zoom the map settled on.
pub trait MapCamera: Send + Sync {
    fn zoom(&self) -> u8;
    fn set_zoom(&self, zoom: u8);
    fn pan_to(&self, center: LatLng);
    fn fit_bounds(&self, bounds: LatLngBounds, padding: Padding);
    fn zoom_changes(&self) -> broadcast::Receiver<u8>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraTiming {
    /// Pause between single zoom-level steps.
    pub step_delay: Duration,
    /// Pause after a pan before zooming back in.
    pub settle_delay: Duration,
}

impl Default for CameraTiming {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(80),
            settle_delay: Duration::from_millis(400),
        }
    }
}
