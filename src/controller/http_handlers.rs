use actix_web::web::{self, Data};
use actix_web::{HttpResponse, Responder};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use crate::camera::{CameraTiming, HeadlessMap, MapCamera};
use crate::controller::directions::{DirectionsError, DirectionsService, query_with_fallback};
use crate::model::{Itinerary, route_markers};
use crate::mvu::view_state::day_route_request;
use crate::mvu::{Deps, UserEvent, ViewHandle, ViewModel, spawn_view};
use crate::view::index::render_index_template;
use crate::view::sidebar::render_sidebar;

#[derive(Clone)]
pub struct AppState {
    pub itinerary: Arc<Itinerary>,
    pub directions: Option<Arc<dyn DirectionsService>>,
    /// The view the sidebar controls drive. Shared by every worker.
    pub view: ViewHandle,
    /// Server-side mirror of the map camera the view animates.
    pub camera: Arc<HeadlessMap>,
}

impl AppState {
    /// Starts the shared view loop. Must be called from inside a tokio runtime.
    #[must_use]
    pub fn new(
        itinerary: Arc<Itinerary>,
        directions: Option<Arc<dyn DirectionsService>>,
        viewport_width: u32,
        timing: CameraTiming,
    ) -> Self {
        let camera = Arc::new(HeadlessMap::new(itinerary.default_camera));
        let model = ViewModel::new(Arc::clone(&itinerary)).with_viewport_width(viewport_width);
        let (view, _task) = spawn_view(
            model,
            Deps {
                map: Arc::clone(&camera),
                directions: directions.clone(),
                timing,
            },
        );
        Self {
            itinerary,
            directions,
            view,
            camera,
        }
    }
}

fn get_param_u32(query: &HashMap<String, String>, key: &str) -> Option<u32> {
    query.get(key).and_then(|s| s.trim().parse().ok())
}

fn get_param_usize(query: &HashMap<String, String>, key: &str) -> Option<usize> {
    query.get(key).and_then(|s| s.trim().parse().ok())
}

/// The event a sidebar control stands for. Golf courses and spots are
/// addressed by position so names never travel in the URL.
fn toggle_event(itinerary: &Itinerary, query: &HashMap<String, String>) -> Option<UserEvent> {
    let day = || get_param_u32(query, "day").filter(|d| itinerary.day(*d).is_some());
    let event = match query.get("target")?.as_str() {
        "day" => UserEvent::ToggleDay(day()?),
        "accommodation" => UserEvent::ToggleAccommodation(day()?),
        "golf" => {
            let day = day()?;
            let course = itinerary
                .day(day)?
                .golf_courses
                .get(get_param_usize(query, "course")?)?;
            UserEvent::ToggleGolfCourse {
                day,
                name: course.name.clone(),
            }
        }
        "spot" => {
            let spot = itinerary.spots.get(get_param_usize(query, "spot")?)?;
            UserEvent::ToggleSpot(spot.name.clone())
        }
        "overlay" => UserEvent::ToggleRouteOverlay,
        "day_route" => UserEvent::ToggleDayRoute(day()?),
        "sidebar" => UserEvent::ToggleSidebar,
        "viewport" => UserEvent::ViewportResized(get_param_u32(query, "width")?),
        _ => return None,
    };
    Some(event)
}

pub async fn index(state: Data<AppState>) -> impl Responder {
    let markup = render_index_template(&state.itinerary);
    HttpResponse::Ok()
        .content_type("text/html")
        .body(markup.into_string())
}

pub async fn sidebar(state: Data<AppState>) -> impl Responder {
    let markup = render_sidebar(&state.view.snapshot());
    HttpResponse::Ok()
        .content_type("text/html")
        .body(markup.into_string())
}

/// Applies one sidebar control to the shared view and re-renders the sidebar
/// from the model it produced.
pub async fn sidebar_toggle(
    query: web::Query<HashMap<String, String>>,
    state: Data<AppState>,
) -> impl Responder {
    let Some(event) = toggle_event(&state.itinerary, &query) else {
        return HttpResponse::BadRequest().json(json!({"error": "unknown sidebar control"}));
    };
    match state.view.dispatch(event).await {
        Ok(model) => HttpResponse::Ok()
            .content_type("text/html")
            .body(render_sidebar(&model).into_string()),
        Err(e) => {
            warn!(error = %e, "sidebar toggle not applied");
            HttpResponse::ServiceUnavailable().json(json!({"error": e.to_string()}))
        }
    }
}

/// The shared view and the camera it has driven so far.
pub async fn view_state(state: Data<AppState>) -> impl Responder {
    let model = state.view.snapshot();
    let slot = &model.directions;
    HttpResponse::Ok().json(json!({
        "focus": model.focus,
        "selected_day": model.focus.day(),
        "route_overlay": model.route_overlay,
        "day_route": model.day_route,
        "sidebar_collapsed": model.layout.sidebar_collapsed,
        "animating": model.gate.is_busy(),
        "directions": {
            "loading": slot.loading,
            "origin": slot.origin_label,
            "duration": slot.duration,
            "mode": slot.route.as_ref().map(|r| r.mode),
        },
        "camera": {
            "center": state.camera.center(),
            "zoom": state.camera.zoom(),
        },
    }))
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({"status": "ok"}))
}

pub async fn schedule(state: Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(&state.itinerary.schedule)
}

pub async fn markers(
    query: web::Query<HashMap<String, String>>,
    state: Data<AppState>,
) -> impl Responder {
    let last = u32::try_from(state.itinerary.schedule.len()).unwrap_or(u32::MAX);
    let from = get_param_u32(&query, "from").unwrap_or(1);
    let to = get_param_u32(&query, "to").unwrap_or(last);
    if from > to {
        return HttpResponse::BadRequest().json(json!({"error": "from must not exceed to"}));
    }
    HttpResponse::Ok().json(route_markers(state.itinerary.days_between(from, to)))
}

pub async fn day_route(path: web::Path<u32>, state: Data<AppState>) -> impl Responder {
    let day = path.into_inner();
    if state.itinerary.day(day).is_none() {
        return HttpResponse::NotFound().json(json!({"error": format!("no day {day}")}));
    }
    let Some(request) = day_route_request(&state.itinerary, day) else {
        return HttpResponse::NoContent().finish();
    };

    let outcome = match &state.directions {
        Some(service) => query_with_fallback(service.as_ref(), &request).await,
        None => Err(DirectionsError::Unavailable),
    };

    match outcome {
        Ok(resolved) => HttpResponse::Ok().json(json!({
            "day": day,
            "mode": resolved.mode,
            "duration": resolved.duration,
            "bounds": resolved.bounds,
            "legs": resolved.route.legs,
        })),
        Err(e) => {
            warn!(day, error = %e, "day route unavailable");
            HttpResponse::BadGateway().json(json!({"error": e.to_string()}))
        }
    }
}
