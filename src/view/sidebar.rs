use maud::{Markup, html};

use crate::model::{ScheduleEntry, Spot, SpotKind};
use crate::mvu::view_state::day_route_request;
use crate::mvu::{Focus, RoutePurpose, ViewModel};

/// Relative hx-get target of a sidebar control. Every control swaps the whole
/// sidebar, so `hx-target` and `hx-swap` are set once on the aside.
fn toggle_href(query: &str) -> String {
    format!("sidebar/toggle?target={query}")
}

fn active(class: &str, on: bool) -> String {
    if on {
        format!("{class} {class}--active")
    } else {
        class.to_string()
    }
}

#[must_use]
pub fn render_sidebar(model: &ViewModel) -> Markup {
    let itinerary = &model.itinerary;
    let aside_class = if model.layout.sidebar_collapsed {
        "sidebar sidebar--collapsed"
    } else {
        "sidebar"
    };

    html! {
        aside id="sidebar" class=(aside_class) hx-target="#sidebar" hx-swap="outerHTML" {
            div class="sidebar__header" {
                h2 class="sidebar__title" { (itinerary.title) }
                p class="sidebar__subtitle" { (itinerary.subtitle) }
                span class="sidebar__progress-text" {
                    (itinerary.schedule.len()) " days / " (itinerary.city_count()) " cities"
                }
                div class="sidebar__controls" {
                    button class=(active("sidebar__overlay", model.route_overlay))
                        hx-get=(toggle_href("overlay")) { "Full route" }
                    button class="sidebar__collapse" hx-get=(toggle_href("sidebar")) {
                        @if model.layout.sidebar_collapsed { "Show" } @else { "Hide" }
                    }
                }
            }
            (render_directions(model))
            div class="sidebar__list" {
                @for entry in &itinerary.schedule {
                    (render_day_card(model, entry))
                }
            }
            @if !itinerary.spots.is_empty() {
                div class="sidebar__spots" {
                    h3 class="sidebar__spots-title" { "Spots" }
                    ul {
                        @for (index, spot) in itinerary.spots.iter().enumerate() {
                            (render_spot(model, index, spot))
                        }
                    }
                }
            }
        }
    }
}

/// Status of the one route the view owns. Polls the sidebar while loading.
fn render_directions(model: &ViewModel) -> Markup {
    let slot = &model.directions;
    let Some(purpose) = &slot.purpose else {
        return html! {};
    };
    let heading = match purpose {
        RoutePurpose::DayRoute { day } => format!("Day {day} route"),
        RoutePurpose::GolfAccess { course, .. } => format!("To {course}"),
    };
    let mode = slot.route.as_ref().map(|r| r.mode.as_str());

    html! {
        div class="sidebar__directions" data-mode=[mode] {
            span class="directions__heading" { (heading) }
            @if let Some(origin) = &slot.origin_label {
                " " span class="directions__origin" { "from " (origin) }
            }
            @if slot.loading {
                " " span class="directions__loading" hx-get="sidebar" hx-trigger="every 1s" {
                    "Loading route..."
                }
            } @else {
                @if let Some(duration) = &slot.duration {
                    " " span class="directions__duration" { (duration) }
                } @else {
                    " " span class="directions__failed" { "No route found" }
                }
            }
        }
    }
}

#[must_use]
pub fn render_day_card(model: &ViewModel, entry: &ScheduleEntry) -> Markup {
    let day = entry.day;
    let card_class = if model.focus.day() == Some(day) {
        "day-card day-card--selected"
    } else {
        "day-card"
    };
    let date_class = if entry.weekend {
        "day-card__date day-card__date--weekend"
    } else {
        "day-card__date"
    };
    let routable = day_route_request(&model.itinerary, day).is_some();
    let stay_active = model.focus == (Focus::Accommodation { day });

    html! {
        div class=(card_class) data-day=(day) {
            div class="day-card__toggle" hx-get=(toggle_href(&format!("day&day={day}"))) {
                div class="day-card__image"
                    style=[entry.image.as_ref().map(|url| format!("background-image: url({url})"))] {
                    span class="day-card__day-badge" { "DAY " (day) }
                    span class="day-card__city-name" { (entry.city) }
                }
                div class="day-card__header" {
                    span class=(date_class) { (entry.date_label) " (" (entry.weekday) ")" }
                    span class="day-card__country" { (entry.country) }
                }
                h3 class="day-card__title" { (entry.activity) }
            }
            div class="day-card__body" {
                p class="day-card__transport" {
                    (entry.departure) " → " (entry.destination) " · " (entry.transport)
                    @if let Some(booking) = &entry.booking {
                        " · " span class="day-card__booking" { (booking) }
                    }
                }
                @if routable {
                    button class=(active("day-card__route", model.day_route == Some(day)))
                        hx-get=(toggle_href(&format!("day_route&day={day}"))) { "Route" }
                }
                @if let Some(acc) = &entry.accommodation {
                    div class="day-card__stay" data-mappable=(if acc.position.is_some() { "1" } else { "0" }) {
                        @if acc.position.is_some() {
                            button class=(active("day-card__stay-name", stay_active))
                                hx-get=(toggle_href(&format!("accommodation&day={day}"))) { (acc.name) }
                        } @else {
                            span class="day-card__stay-name" { (acc.name) }
                        }
                        @if !acc.address.is_empty() {
                            " " span class="day-card__stay-address" { (acc.address) }
                        }
                    }
                }
                @if !entry.golf_courses.is_empty() {
                    ul class="day-card__golf" {
                        @for (index, course) in entry.golf_courses.iter().enumerate() {
                            li data-course=(course.name) {
                                @if course.position.is_known() {
                                    @let on = matches!(
                                        &model.focus,
                                        Focus::GolfCourse { day: d, name, .. } if *d == day && *name == course.name
                                    );
                                    button class=(active("day-card__course", on))
                                        hx-get=(toggle_href(&format!("golf&day={day}&course={index}"))) {
                                        (course.name)
                                    }
                                } @else {
                                    span class="day-card__course" { (course.name) }
                                }
                                @for tee in &course.tee_times {
                                    " " span class="day-card__tee" {
                                        (tee.time)
                                        @if let Some(note) = &tee.note { " " (note) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_spot(model: &ViewModel, index: usize, spot: &Spot) -> Markup {
    let kind = match spot.kind {
        SpotKind::Food => "food",
        SpotKind::Shopping => "shopping",
    };
    let on = matches!(&model.focus, Focus::Spot { name } if *name == spot.name);

    html! {
        li class="spot" data-kind=(kind) {
            button class=(active("spot__name", on)) hx-get=(toggle_href(&format!("spot&spot={index}"))) {
                (spot.name)
            }
            @if let Some(note) = &spot.note {
                " " span class="spot__note" { (note) }
            }
        }
    }
}
