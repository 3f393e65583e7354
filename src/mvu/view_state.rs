use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use super::gate::{AnimationGate, Ticket};
use crate::camera::{ACCOMMODATION_ZOOM, GOLF_ZOOM, SPOT_ZOOM};
use crate::controller::directions::{
    DirectionsError, DirectionsRequest, ResolvedRoute, TravelMode,
};
use crate::model::{Itinerary, LatLng, LatLngBounds, Padding};

pub const MOBILE_BREAKPOINT: u32 = 768;
pub const SIDEBAR_WIDTH: u32 = 400;
pub const FIT_MARGIN: u32 = 40;
const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;

/// What the map is currently showing in detail. At most one at a time.
#[derive(Serialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    #[default]
    None,
    Day(u32),
    Accommodation {
        day: u32,
    },
    GolfCourse {
        day: u32,
        name: String,
        position: LatLng,
    },
    Spot {
        name: String,
    },
}

impl Focus {
    /// The day card highlighted in the sidebar for this focus.
    #[must_use]
    pub fn day(&self) -> Option<u32> {
        match self {
            Focus::Day(day) | Focus::Accommodation { day } | Focus::GolfCourse { day, .. } => {
                Some(*day)
            }
            Focus::None | Focus::Spot { .. } => None,
        }
    }
}

/// Generation number of a directions query. Only the latest one may land.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QueryToken(pub u64);

#[derive(Clone, Debug, PartialEq)]
pub enum RoutePurpose {
    DayRoute { day: u32 },
    GolfAccess { day: u32, course: String },
}

/// The one directions result the view owns.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DirectionsSlot {
    /// Set while a query is in flight.
    pub token: Option<QueryToken>,
    pub purpose: Option<RoutePurpose>,
    pub loading: bool,
    pub route: Option<ResolvedRoute>,
    pub duration: Option<String>,
    pub origin_label: Option<String>,
}

impl DirectionsSlot {
    fn begin(&mut self, token: QueryToken, purpose: RoutePurpose, origin_label: Option<String>) {
        *self = Self {
            token: Some(token),
            purpose: Some(purpose),
            loading: true,
            route: None,
            duration: None,
            origin_label,
        };
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    fn serves_golf(&self) -> bool {
        matches!(self.purpose, Some(RoutePurpose::GolfAccess { .. }))
    }

    fn serves_day_route(&self, day: u32) -> bool {
        matches!(self.purpose, Some(RoutePurpose::DayRoute { day: d }) if d == day)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub viewport_width: u32,
    pub sidebar_collapsed: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            sidebar_collapsed: false,
        }
    }
}

impl Layout {
    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.viewport_width < MOBILE_BREAKPOINT
    }

    /// Fit padding that keeps the open desktop sidebar from covering the route.
    #[must_use]
    pub fn fit_padding(&self) -> Padding {
        if self.is_mobile() {
            return Padding::uniform(FIT_MARGIN);
        }
        let left = if self.sidebar_collapsed {
            FIT_MARGIN
        } else {
            SIDEBAR_WIDTH + FIT_MARGIN
        };
        Padding {
            left,
            ..Padding::uniform(FIT_MARGIN)
        }
    }
}

#[derive(Clone, Debug)]
pub struct ViewModel {
    pub itinerary: Arc<Itinerary>,
    pub focus: Focus,
    pub route_overlay: bool,
    pub day_route: Option<u32>,
    pub directions: DirectionsSlot,
    pub gate: AnimationGate,
    pub layout: Layout,
    next_ticket: u64,
    next_token: u64,
}

impl ViewModel {
    #[must_use]
    pub fn new(itinerary: Arc<Itinerary>) -> Self {
        Self {
            itinerary,
            focus: Focus::None,
            route_overlay: false,
            day_route: None,
            directions: DirectionsSlot::default(),
            gate: AnimationGate::Idle,
            layout: Layout::default(),
            next_ticket: 0,
            next_token: 0,
        }
    }

    #[must_use]
    pub fn with_viewport_width(mut self, width: u32) -> Self {
        self.layout.viewport_width = width;
        self
    }

    fn ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }

    fn token(&mut self) -> QueryToken {
        self.next_token += 1;
        QueryToken(self.next_token)
    }
}

/// A camera move, carried out by the runtime against the live map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraPlan {
    /// Zoom out to `min(current, zoom, MAX_PAN_ZOOM)`, pan, let the pan
    /// settle, then zoom in to `zoom`.
    Fly { to: LatLng, zoom: u8 },
    /// Zoom to `zoom`, then pan to `center`.
    Return { center: LatLng, zoom: u8 },
    PanThenZoom { to: LatLng, zoom: u8 },
}

/// Clicks and resizes coming from the page.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum UserEvent {
    ToggleDay(u32),
    ToggleAccommodation(u32),
    ToggleGolfCourse { day: u32, name: String },
    ToggleSpot(String),
    ToggleRouteOverlay,
    ToggleDayRoute(u32),
    ToggleSidebar,
    ViewportResized(u32),
}

#[derive(Clone, Debug)]
pub enum Msg {
    User(UserEvent),
    AnimationFinished(Ticket),
    DirectionsResolved {
        token: QueryToken,
        outcome: Result<ResolvedRoute, DirectionsError>,
    },
}

impl From<UserEvent> for Msg {
    fn from(event: UserEvent) -> Self {
        Msg::User(event)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Animate { ticket: Ticket, plan: CameraPlan },
    FitBounds { bounds: LatLngBounds, padding: Padding },
    QueryDirections {
        token: QueryToken,
        request: DirectionsRequest,
    },
}

pub fn update(model: &mut ViewModel, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::User(event) => on_user_event(model, event),
        Msg::AnimationFinished(ticket) => {
            if !model.gate.finish(ticket) {
                debug!(?ticket, "finish for an animation that no longer holds the camera");
            }
            vec![]
        }
        Msg::DirectionsResolved { token, outcome } => on_directions(model, token, outcome),
    }
}

fn on_user_event(model: &mut ViewModel, event: UserEvent) -> Vec<Effect> {
    match event {
        UserEvent::ToggleDay(day) => toggle_day(model, day),
        UserEvent::ToggleAccommodation(day) => toggle_accommodation(model, day),
        UserEvent::ToggleGolfCourse { day, name } => toggle_golf(model, day, name),
        UserEvent::ToggleSpot(name) => toggle_spot(model, name),
        UserEvent::ToggleRouteOverlay => {
            model.route_overlay = !model.route_overlay;
            if !model.route_overlay {
                return vec![];
            }
            model
                .itinerary
                .route_bounds()
                .map(|bounds| Effect::FitBounds {
                    bounds,
                    padding: model.layout.fit_padding(),
                })
                .into_iter()
                .collect()
        }
        UserEvent::ToggleDayRoute(day) => toggle_day_route(model, day),
        UserEvent::ToggleSidebar => {
            model.layout.sidebar_collapsed = !model.layout.sidebar_collapsed;
            vec![]
        }
        UserEvent::ViewportResized(width) => {
            model.layout.viewport_width = width;
            vec![]
        }
    }
}

/// Claims the camera for `plan`, or drops the move if an animation is running.
fn animate(model: &mut ViewModel, plan: CameraPlan) -> Vec<Effect> {
    let ticket = model.ticket();
    match model.gate.request(ticket) {
        Some(ticket) => vec![Effect::Animate { ticket, plan }],
        None => {
            debug!(?plan, "camera busy, move skipped");
            vec![]
        }
    }
}

/// Drops the current focus along with anything that only existed for it.
fn leave_focus(model: &mut ViewModel) {
    if matches!(model.focus, Focus::GolfCourse { .. }) && model.directions.serves_golf() {
        model.directions.clear();
    }
    model.focus = Focus::None;
}

fn collapse_on_mobile(model: &mut ViewModel) {
    if model.layout.is_mobile() {
        model.layout.sidebar_collapsed = true;
    }
}

fn toggle_day(model: &mut ViewModel, day: u32) -> Vec<Effect> {
    if model.focus.day() == Some(day) {
        leave_focus(model);
        let home = model.itinerary.default_camera;
        return animate(
            model,
            CameraPlan::Return {
                center: home.center,
                zoom: home.zoom,
            },
        );
    }

    let target = match model.itinerary.day(day) {
        Some(entry) => entry.position.map(|to| (to, entry.zoom)),
        None => return vec![],
    };

    leave_focus(model);
    model.focus = Focus::Day(day);
    match target {
        Some((to, zoom)) => animate(model, CameraPlan::Fly { to, zoom }),
        None => vec![],
    }
}

fn toggle_accommodation(model: &mut ViewModel, day: u32) -> Vec<Effect> {
    if model.focus == (Focus::Accommodation { day }) {
        leave_focus(model);
        return vec![];
    }

    let Some(to) = model
        .itinerary
        .day(day)
        .and_then(|e| e.accommodation.as_ref())
        .and_then(|a| a.position)
    else {
        return vec![];
    };

    leave_focus(model);
    model.focus = Focus::Accommodation { day };
    collapse_on_mobile(model);
    animate(
        model,
        CameraPlan::PanThenZoom {
            to,
            zoom: ACCOMMODATION_ZOOM,
        },
    )
}

fn toggle_golf(model: &mut ViewModel, day: u32, name: String) -> Vec<Effect> {
    let already = matches!(
        &model.focus,
        Focus::GolfCourse { day: d, name: n, .. } if *d == day && *n == name
    );
    if already {
        leave_focus(model);
        return vec![];
    }

    let Some(position) = model
        .itinerary
        .day(day)
        .and_then(|e| e.golf_course(&name))
        .map(|g| g.position)
        .filter(LatLng::is_known)
    else {
        return vec![];
    };

    let anchors = &model.itinerary.anchors;
    let origin = if day == 1 {
        anchors.airport.clone()
    } else {
        anchors.hotel.clone()
    };

    leave_focus(model);
    model.focus = Focus::GolfCourse {
        day,
        name: name.clone(),
        position,
    };
    collapse_on_mobile(model);

    let mut effects = Vec::new();
    if let Some(anchor) = origin {
        let token = model.token();
        model.day_route = None;
        model.directions.begin(
            token,
            RoutePurpose::GolfAccess { day, course: name },
            Some(anchor.name),
        );
        effects.push(Effect::QueryDirections {
            token,
            request: DirectionsRequest {
                origin: anchor.position,
                destination: position,
                waypoints: Vec::new(),
                mode: TravelMode::Driving,
            },
        });
    }
    effects.extend(animate(
        model,
        CameraPlan::PanThenZoom {
            to: position,
            zoom: GOLF_ZOOM,
        },
    ));
    effects
}

fn toggle_spot(model: &mut ViewModel, name: String) -> Vec<Effect> {
    if matches!(&model.focus, Focus::Spot { name: current } if *current == name) {
        leave_focus(model);
        return vec![];
    }

    let Some(to) = model.itinerary.spot(&name).map(|s| s.position) else {
        return vec![];
    };

    leave_focus(model);
    model.focus = Focus::Spot { name };
    collapse_on_mobile(model);
    animate(
        model,
        CameraPlan::PanThenZoom {
            to,
            zoom: SPOT_ZOOM,
        },
    )
}

fn toggle_day_route(model: &mut ViewModel, day: u32) -> Vec<Effect> {
    if model.day_route == Some(day) {
        model.day_route = None;
        if model.directions.serves_day_route(day) {
            model.directions.clear();
        }
        return vec![];
    }

    let Some(request) = day_route_request(&model.itinerary, day) else {
        return vec![];
    };

    let token = model.token();
    model.day_route = Some(day);
    model
        .directions
        .begin(token, RoutePurpose::DayRoute { day }, None);
    vec![Effect::QueryDirections { token, request }]
}

/// The directions query for travelling on `day`, or `None` when there is no
/// movement that day or either city has no coordinates.
#[must_use]
pub fn day_route_request(itinerary: &Itinerary, day: u32) -> Option<DirectionsRequest> {
    let entry = itinerary.day(day)?;
    if entry.is_stationary() {
        return None;
    }
    let origin = itinerary.city(&entry.departure)?;
    let destination = itinerary.city(&entry.destination)?;
    let waypoints = itinerary
        .detour
        .iter()
        .filter(|d| d.day == day)
        .map(|d| d.waypoint)
        .collect();

    Some(DirectionsRequest {
        origin,
        destination,
        waypoints,
        mode: TravelMode::for_transport(&entry.transport),
    })
}

fn on_directions(
    model: &mut ViewModel,
    token: QueryToken,
    outcome: Result<ResolvedRoute, DirectionsError>,
) -> Vec<Effect> {
    if model.directions.token != Some(token) {
        debug!(?token, latest = ?model.directions.token, "stale directions result dropped");
        return vec![];
    }

    model.directions.token = None;
    model.directions.loading = false;
    match outcome {
        Ok(resolved) => {
            model.directions.duration.clone_from(&resolved.duration);
            let bounds = resolved.bounds;
            model.directions.route = Some(resolved);
            bounds
                .map(|bounds| Effect::FitBounds {
                    bounds,
                    padding: model.layout.fit_padding(),
                })
                .into_iter()
                .collect()
        }
        Err(err) => {
            warn!(error = %err, purpose = ?model.directions.purpose, "no route available");
            model.directions.route = None;
            model.directions.duration = None;
            vec![]
        }
    }
}
