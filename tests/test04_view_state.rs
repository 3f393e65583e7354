mod common;

use trip_map::controller::directions::{DirectionsError, ResolvedRoute, TravelMode};
use trip_map::model::{LatLng, Padding};
use trip_map::mvu::{
    AnimationGate, CameraPlan, DirectionsSlot, Effect, Focus, Msg, QueryToken, RoutePurpose,
    Ticket, UserEvent, ViewModel, update,
};

fn desktop() -> ViewModel {
    ViewModel::new(common::fixture())
}

fn send(model: &mut ViewModel, event: UserEvent) -> Vec<Effect> {
    update(model, Msg::User(event))
}

fn finish_all(model: &mut ViewModel, effects: &[Effect]) {
    for effect in effects {
        if let Effect::Animate { ticket, .. } = effect {
            update(model, Msg::AnimationFinished(*ticket));
        }
    }
}

fn query_token(effects: &[Effect]) -> QueryToken {
    effects
        .iter()
        .find_map(|e| match e {
            Effect::QueryDirections { token, .. } => Some(*token),
            _ => None,
        })
        .expect("a directions query")
}

#[test]
fn test04_day_toggle_flies_then_returns_home() {
    let mut model = desktop();

    let effects = send(&mut model, UserEvent::ToggleDay(2));
    assert_eq!(model.focus, Focus::Day(2));
    assert!(matches!(
        effects.as_slice(),
        [Effect::Animate { plan: CameraPlan::Fly { to, zoom: 13 }, .. }] if *to == LatLng::new(48.8, 14.3)
    ));
    assert!(model.gate.is_busy());
    finish_all(&mut model, &effects);
    assert_eq!(model.gate, AnimationGate::Idle);

    let effects = send(&mut model, UserEvent::ToggleDay(2));
    assert_eq!(model.focus, Focus::None);
    assert!(matches!(
        effects.as_slice(),
        [Effect::Animate { plan: CameraPlan::Return { center, zoom: 6 }, .. }] if *center == LatLng::new(48.5, 15.0)
    ));
}

#[test]
fn test04_busy_camera_still_updates_selection() {
    let mut model = desktop();

    let first = send(&mut model, UserEvent::ToggleDay(1));
    assert_eq!(first.len(), 1);

    let second = send(&mut model, UserEvent::ToggleDay(4));
    assert_eq!(model.focus, Focus::Day(4));
    assert!(second.is_empty());

    // a stale ticket does not free the camera
    update(&mut model, Msg::AnimationFinished(Ticket(999)));
    assert!(model.gate.is_busy());
    finish_all(&mut model, &first);
    assert!(!model.gate.is_busy());
}

#[test]
fn test04_unknown_day_is_ignored() {
    let mut model = desktop();
    assert!(send(&mut model, UserEvent::ToggleDay(42)).is_empty());
    assert_eq!(model.focus, Focus::None);
    assert!(!model.gate.is_busy());
}

#[test]
fn test04_accommodation_needs_coordinates() {
    let mut model = desktop();

    // day 2 is booked as "TBD"
    assert!(send(&mut model, UserEvent::ToggleAccommodation(2)).is_empty());
    assert_eq!(model.focus, Focus::None);
    // day 4 has no booking at all
    assert!(send(&mut model, UserEvent::ToggleAccommodation(4)).is_empty());

    let effects = send(&mut model, UserEvent::ToggleAccommodation(1));
    assert_eq!(model.focus, Focus::Accommodation { day: 1 });
    assert_eq!(model.focus.day(), Some(1));
    assert!(matches!(
        effects.as_slice(),
        [Effect::Animate { plan: CameraPlan::PanThenZoom { zoom: 16, .. }, .. }]
    ));
    finish_all(&mut model, &effects);

    assert!(send(&mut model, UserEvent::ToggleAccommodation(1)).is_empty());
    assert_eq!(model.focus, Focus::None);
    assert_eq!(model.focus.day(), None);
}

#[test]
fn test04_clicking_highlighted_day_clears_accommodation_focus() {
    let mut model = desktop();
    let effects = send(&mut model, UserEvent::ToggleAccommodation(3));
    finish_all(&mut model, &effects);

    send(&mut model, UserEvent::ToggleDay(3));
    assert_eq!(model.focus, Focus::None);
}

#[test]
fn test04_golf_on_day_one_routes_from_airport() {
    let mut model = desktop();
    let effects = send(
        &mut model,
        UserEvent::ToggleGolfCourse {
            day: 1,
            name: "Alpha Links".to_string(),
        },
    );

    assert_eq!(model.focus.day(), Some(1));
    assert!(model.directions.loading);
    assert_eq!(model.directions.origin_label.as_deref(), Some("Alpha Airport"));
    assert_eq!(
        model.directions.purpose,
        Some(RoutePurpose::GolfAccess {
            day: 1,
            course: "Alpha Links".to_string()
        })
    );

    match effects.as_slice() {
        [
            Effect::QueryDirections { request, .. },
            Effect::Animate {
                plan: CameraPlan::PanThenZoom { to, zoom: 14 },
                ..
            },
        ] => {
            assert_eq!(request.origin, LatLng::new(50.1, 14.26));
            assert_eq!(request.destination, LatLng::new(50.2, 14.5));
            assert_eq!(request.mode, TravelMode::Driving);
            assert_eq!(*to, LatLng::new(50.2, 14.5));
        }
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn test04_golf_after_day_one_routes_from_hotel() {
    let mut model = desktop();
    let effects = send(
        &mut model,
        UserEvent::ToggleGolfCourse {
            day: 2,
            name: "Beta Hills".to_string(),
        },
    );
    assert_eq!(model.directions.origin_label.as_deref(), Some("Hotel A"));
    assert!(matches!(
        effects.first(),
        Some(Effect::QueryDirections { request, .. }) if request.origin == LatLng::new(50.09, 14.42)
    ));
}

#[test]
fn test04_unknown_golf_course_is_a_no_op() {
    let mut model = desktop();
    let effects = send(
        &mut model,
        UserEvent::ToggleGolfCourse {
            day: 1,
            name: "Mystery GC".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(model.focus, Focus::None);
    assert_eq!(model.directions, DirectionsSlot::default());
}

#[test]
fn test04_golf_toggle_twice_clears_dependent_state() {
    let mut model = desktop();
    let golf = UserEvent::ToggleGolfCourse {
        day: 1,
        name: "Alpha Links".to_string(),
    };
    let effects = send(&mut model, golf.clone());
    let token = query_token(&effects);
    update(
        &mut model,
        Msg::DirectionsResolved {
            token,
            outcome: Ok(ResolvedRoute::new(
                common::straight_route(LatLng::new(50.1, 14.26), LatLng::new(50.2, 14.5), "25 mins"),
                TravelMode::Driving,
            )),
        },
    );
    assert_eq!(model.directions.duration.as_deref(), Some("25 mins"));

    send(&mut model, golf);
    assert_eq!(model.focus, Focus::None);
    assert_eq!(model.directions, DirectionsSlot::default());
}

#[test]
fn test04_switching_focus_drops_golf_route() {
    let mut model = desktop();
    send(
        &mut model,
        UserEvent::ToggleGolfCourse {
            day: 2,
            name: "Beta Hills".to_string(),
        },
    );
    send(&mut model, UserEvent::ToggleSpot("Noodle Bar".to_string()));
    assert_eq!(
        model.focus,
        Focus::Spot {
            name: "Noodle Bar".to_string()
        }
    );
    assert_eq!(model.directions, DirectionsSlot::default());
}

#[test]
fn test04_spot_toggle_and_mobile_collapse() {
    let mut model = desktop().with_viewport_width(390);
    let effects = send(&mut model, UserEvent::ToggleSpot("Noodle Bar".to_string()));
    assert!(model.layout.sidebar_collapsed);
    assert!(matches!(
        effects.as_slice(),
        [Effect::Animate { plan: CameraPlan::PanThenZoom { zoom: 16, .. }, .. }]
    ));
    finish_all(&mut model, &effects);

    assert!(send(&mut model, UserEvent::ToggleSpot("Noodle Bar".to_string())).is_empty());
    assert_eq!(model.focus, Focus::None);

    assert!(send(&mut model, UserEvent::ToggleSpot("Nowhere".to_string())).is_empty());
    assert_eq!(model.focus, Focus::None);
}

#[test]
fn test04_desktop_keeps_sidebar_open() {
    let mut model = desktop();
    send(&mut model, UserEvent::ToggleAccommodation(1));
    assert!(!model.layout.sidebar_collapsed);
}

#[test]
fn test04_route_overlay_fit_padding() {
    let mut model = desktop();
    let effects = send(&mut model, UserEvent::ToggleRouteOverlay);
    assert!(model.route_overlay);
    match effects.as_slice() {
        [Effect::FitBounds { bounds, padding }] => {
            assert_eq!(padding.left, 440);
            assert_eq!(padding.top, 40);
            for entry in &model.itinerary.schedule {
                assert!(bounds.contains(entry.position.unwrap()));
            }
        }
        other => panic!("unexpected effects {other:?}"),
    }
    // fitting is not an animation
    assert!(!model.gate.is_busy());

    assert!(send(&mut model, UserEvent::ToggleRouteOverlay).is_empty());
    assert!(!model.route_overlay);

    send(&mut model, UserEvent::ViewportResized(500));
    let effects = send(&mut model, UserEvent::ToggleRouteOverlay);
    assert!(matches!(
        effects.as_slice(),
        [Effect::FitBounds { padding, .. }] if *padding == Padding::uniform(40)
    ));
}

#[test]
fn test04_collapsed_desktop_sidebar_frees_gutter() {
    let mut model = desktop();
    send(&mut model, UserEvent::ToggleSidebar);
    assert!(model.layout.sidebar_collapsed);
    assert_eq!(model.layout.fit_padding(), Padding::uniform(40));
}

#[test]
fn test04_day_route_modes_and_detour() {
    let mut model = desktop();

    let effects = send(&mut model, UserEvent::ToggleDayRoute(2));
    match effects.as_slice() {
        [Effect::QueryDirections { request, .. }] => {
            assert_eq!(request.mode, TravelMode::Driving);
            assert_eq!(request.origin, LatLng::new(50.0, 14.0));
            assert_eq!(request.destination, LatLng::new(48.8, 14.3));
            assert_eq!(request.waypoints, vec![LatLng::new(49.5, 14.2)]);
        }
        other => panic!("unexpected effects {other:?}"),
    }
    assert_eq!(model.day_route, Some(2));
    assert!(model.directions.loading);

    let effects = send(&mut model, UserEvent::ToggleDayRoute(4));
    assert!(matches!(
        effects.as_slice(),
        [Effect::QueryDirections { request, .. }] if request.mode == TravelMode::Transit && request.waypoints.is_empty()
    ));
    assert_eq!(model.day_route, Some(4));
}

#[test]
fn test04_day_route_without_movement_is_a_no_op() {
    let mut model = desktop();
    assert!(send(&mut model, UserEvent::ToggleDayRoute(3)).is_empty());
    assert_eq!(model.day_route, None);
    assert_eq!(model.directions, DirectionsSlot::default());

    // Seoul has no coordinates
    assert!(send(&mut model, UserEvent::ToggleDayRoute(1)).is_empty());
    assert_eq!(model.day_route, None);
}

#[test]
fn test04_day_route_toggle_twice_clears() {
    let mut model = desktop();
    send(&mut model, UserEvent::ToggleDayRoute(4));
    send(&mut model, UserEvent::ToggleDayRoute(4));
    assert_eq!(model.day_route, None);
    assert_eq!(model.directions, DirectionsSlot::default());
}

#[test]
fn test04_only_latest_query_lands() {
    let mut model = desktop();
    let first = query_token(&send(&mut model, UserEvent::ToggleDayRoute(2)));
    let second = query_token(&send(&mut model, UserEvent::ToggleDayRoute(4)));
    assert_ne!(first, second);

    let stale = update(
        &mut model,
        Msg::DirectionsResolved {
            token: first,
            outcome: Ok(ResolvedRoute::new(
                common::straight_route(LatLng::new(50.0, 14.0), LatLng::new(48.8, 14.3), "2 hours"),
                TravelMode::Driving,
            )),
        },
    );
    assert!(stale.is_empty());
    assert!(model.directions.loading);
    assert!(model.directions.route.is_none());

    let fresh = update(
        &mut model,
        Msg::DirectionsResolved {
            token: second,
            outcome: Ok(ResolvedRoute::new(
                common::straight_route(LatLng::new(48.8, 14.3), LatLng::new(48.2, 16.4), "3 hours"),
                TravelMode::Transit,
            )),
        },
    );
    assert!(!model.directions.loading);
    assert_eq!(model.directions.duration.as_deref(), Some("3 hours"));
    assert!(matches!(fresh.as_slice(), [Effect::FitBounds { .. }]));
}

#[test]
fn test04_failed_query_leaves_no_route() {
    let mut model = desktop();
    let token = query_token(&send(&mut model, UserEvent::ToggleDayRoute(4)));
    let effects = update(
        &mut model,
        Msg::DirectionsResolved {
            token,
            outcome: Err(DirectionsError::Status("ZERO_RESULTS".to_string())),
        },
    );
    assert!(effects.is_empty());
    assert!(!model.directions.loading);
    assert!(model.directions.route.is_none());
    assert_eq!(model.day_route, Some(4));
}
