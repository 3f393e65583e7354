use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, warn};

use super::view_state::{CameraPlan, Effect, Msg, ViewModel, update};
use crate::camera::{CameraTiming, MAX_PAN_ZOOM, MapCamera, smooth_zoom};
use crate::controller::directions::{DirectionsError, DirectionsService, query_with_fallback};
use crate::error::TripError;

/// What effects run against.
pub struct Deps<M: ?Sized> {
    pub map: Arc<M>,
    pub directions: Option<Arc<dyn DirectionsService>>,
    pub timing: CameraTiming,
}

impl<M: ?Sized> Clone for Deps<M> {
    fn clone(&self) -> Self {
        Self {
            map: Arc::clone(&self.map),
            directions: self.directions.clone(),
            timing: self.timing,
        }
    }
}

/// A message from outside the loop, optionally waiting for the model it produced.
type Inbound = (Msg, Option<oneshot::Sender<ViewModel>>);

/// Sends events into a running view and reads its state.
#[derive(Clone)]
pub struct ViewHandle {
    tx: mpsc::UnboundedSender<Inbound>,
    state: watch::Receiver<ViewModel>,
}

impl ViewHandle {
    /// # Errors
    ///
    /// Returns `TripError::RuntimeClosed` if the view loop has stopped.
    pub fn send(&self, msg: impl Into<Msg>) -> Result<(), TripError> {
        self.tx
            .send((msg.into(), None))
            .map_err(|_| TripError::RuntimeClosed)
    }

    /// Sends `msg` and waits for the model right after it was applied.
    ///
    /// # Errors
    ///
    /// Returns `TripError::RuntimeClosed` if the view loop has stopped.
    pub async fn dispatch(&self, msg: impl Into<Msg>) -> Result<ViewModel, TripError> {
        let (reply, applied) = oneshot::channel();
        self.tx
            .send((msg.into(), Some(reply)))
            .map_err(|_| TripError::RuntimeClosed)?;
        applied.await.map_err(|_| TripError::RuntimeClosed)
    }

    /// The model as of the last processed message.
    #[must_use]
    pub fn snapshot(&self) -> ViewModel {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewModel> {
        self.state.clone()
    }
}

/// Starts the view loop. It runs until every `ViewHandle` is dropped, every
/// queued event is applied and all in-flight effects have reported back, then
/// yields the final model.
pub fn spawn_view<M>(model: ViewModel, deps: Deps<M>) -> (ViewHandle, JoinHandle<ViewModel>)
where
    M: MapCamera + ?Sized + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(model.clone());
    let task = tokio::spawn(run_view(model, rx, state_tx, deps));
    (
        ViewHandle {
            tx,
            state: state_rx,
        },
        task,
    )
}

async fn run_view<M>(
    mut model: ViewModel,
    mut rx: mpsc::UnboundedReceiver<Inbound>,
    state_tx: watch::Sender<ViewModel>,
    deps: Deps<M>,
) -> ViewModel
where
    M: MapCamera + ?Sized + 'static,
{
    // each in-flight effect resolves to the message it reports back with
    let mut in_flight: JoinSet<Msg> = JoinSet::new();
    let mut inbound_open = true;

    loop {
        let (msg, reply) = tokio::select! {
            inbound = rx.recv(), if inbound_open => match inbound {
                Some(inbound) => inbound,
                None => {
                    debug!(pending = in_flight.len(), "all view handles dropped");
                    inbound_open = false;
                    continue;
                }
            },
            Some(done) = in_flight.join_next(), if !in_flight.is_empty() => match done {
                Ok(msg) => (msg, None),
                Err(e) => {
                    warn!(error = %e, "mvu effect task failed");
                    continue;
                }
            },
            else => break,
        };

        debug!(?msg, "mvu update");
        let effects = update(&mut model, msg);
        state_tx.send_replace(model.clone());
        if let Some(reply) = reply {
            let _ = reply.send(model.clone());
        }
        for effect in effects {
            run_effect(effect, &deps, &mut in_flight);
        }
    }
    model
}

fn run_effect<M>(effect: Effect, deps: &Deps<M>, in_flight: &mut JoinSet<Msg>)
where
    M: MapCamera + ?Sized + 'static,
{
    debug!(?effect, "mvu effect start");
    match effect {
        Effect::FitBounds { bounds, padding } => deps.map.fit_bounds(bounds, padding),
        Effect::Animate { ticket, plan } => {
            let map = Arc::clone(&deps.map);
            let timing = deps.timing;
            in_flight.spawn(async move {
                if let Err(e) = run_camera_plan(map.as_ref(), plan, timing).await {
                    warn!(error = %e, ?plan, "camera animation aborted");
                }
                debug!(?ticket, "mvu effect finish: animation");
                Msg::AnimationFinished(ticket)
            });
        }
        Effect::QueryDirections { token, request } => {
            let service = deps.directions.clone();
            in_flight.spawn(async move {
                let outcome = match service {
                    Some(service) => query_with_fallback(service.as_ref(), &request).await,
                    None => Err(DirectionsError::Unavailable),
                };
                debug!(?token, ok = outcome.is_ok(), "mvu effect finish: directions");
                Msg::DirectionsResolved { token, outcome }
            });
        }
    }
}

/// Carries out one camera plan on `map`.
///
/// # Errors
///
/// Propagates animator errors; the camera is left wherever it stopped.
pub async fn run_camera_plan<M>(
    map: &M,
    plan: CameraPlan,
    timing: CameraTiming,
) -> Result<(), TripError>
where
    M: MapCamera + ?Sized,
{
    match plan {
        CameraPlan::Fly { to, zoom } => {
            let mid = map.zoom().min(zoom).min(MAX_PAN_ZOOM);
            smooth_zoom(map, mid, timing.step_delay).await?;
            map.pan_to(to);
            tokio::time::sleep(timing.settle_delay).await;
            smooth_zoom(map, zoom, timing.step_delay).await?;
        }
        CameraPlan::Return { center, zoom } => {
            smooth_zoom(map, zoom, timing.step_delay).await?;
            map.pan_to(center);
        }
        CameraPlan::PanThenZoom { to, zoom } => {
            map.pan_to(to);
            smooth_zoom(map, zoom, timing.step_delay).await?;
        }
    }
    Ok(())
}
