use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

use super::MapCamera;
use super::animator::MAX_MAP_ZOOM;
use crate::model::{CameraView, LatLng, LatLngBounds, Padding};

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CameraOp {
    SetZoom { zoom: u8 },
    PanTo { center: LatLng },
    FitBounds { bounds: LatLngBounds, padding: Padding },
}

#[derive(Debug)]
struct Viewport {
    center: LatLng,
    zoom: u8,
    ops: Vec<CameraOp>,
}

/// In-memory camera that behaves like the browser map: zoom mutations are
/// applied immediately and echoed on the change channel. Every mutation is
/// recorded for inspection.
#[derive(Debug)]
pub struct HeadlessMap {
    viewport: Mutex<Viewport>,
    changes: broadcast::Sender<u8>,
}

impl HeadlessMap {
    #[must_use]
    pub fn new(view: CameraView) -> Self {
        let (changes, _) = broadcast::channel(64);
        Self {
            viewport: Mutex::new(Viewport {
                center: view.center,
                zoom: view.zoom.min(MAX_MAP_ZOOM),
                ops: Vec::new(),
            }),
            changes,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Viewport> {
        self.viewport.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn center(&self) -> LatLng {
        self.lock().center
    }

    #[must_use]
    pub fn ops(&self) -> Vec<CameraOp> {
        self.lock().ops.clone()
    }

    pub fn clear_ops(&self) {
        self.lock().ops.clear();
    }

    /// Zoom changed by something other than this crate, e.g. a scroll wheel.
    /// Notifies listeners but is not recorded as an op.
    pub fn user_zoom(&self, zoom: u8) {
        let zoom = zoom.min(MAX_MAP_ZOOM);
        self.lock().zoom = zoom;
        let _ = self.changes.send(zoom);
    }
}

impl MapCamera for HeadlessMap {
    fn zoom(&self) -> u8 {
        self.lock().zoom
    }

    fn set_zoom(&self, zoom: u8) {
        let zoom = zoom.min(MAX_MAP_ZOOM);
        {
            let mut vp = self.lock();
            vp.zoom = zoom;
            vp.ops.push(CameraOp::SetZoom { zoom });
        }
        // no subscribers is fine
        let _ = self.changes.send(zoom);
    }

    fn pan_to(&self, center: LatLng) {
        let mut vp = self.lock();
        vp.center = center;
        vp.ops.push(CameraOp::PanTo { center });
    }

    fn fit_bounds(&self, bounds: LatLngBounds, padding: Padding) {
        let zoom = fit_zoom(&bounds);
        let changed = {
            let mut vp = self.lock();
            vp.center = bounds.center();
            vp.ops.push(CameraOp::FitBounds { bounds, padding });
            let changed = vp.zoom != zoom;
            vp.zoom = zoom;
            changed
        };
        if changed {
            let _ = self.changes.send(zoom);
        }
    }

    fn zoom_changes(&self) -> broadcast::Receiver<u8> {
        self.changes.subscribe()
    }
}

/// Rough zoom at which `bounds` spans a 256px world tile. Ignores padding and
/// viewport size.
fn fit_zoom(bounds: &LatLngBounds) -> u8 {
    let span = (bounds.north - bounds.south)
        .abs()
        .max((bounds.east - bounds.west).abs());
    if span <= f64::EPSILON {
        return MAX_MAP_ZOOM;
    }
    let zoom = (360.0 / span).log2().floor();
    zoom.clamp(0.0, f64::from(MAX_MAP_ZOOM)) as u8
}
