use ahash::RandomState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::geo::LatLng;
use crate::model::schedule::ScheduleEntry;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RouteMarker {
    pub position: LatLng,
    pub days: Vec<u32>,
    pub label: String,
}

/// Collapses the located days of `entries` into one marker per place. Places
/// compare equal when they match to 4 decimal places; the first day seen
/// supplies the marker position.
#[must_use]
pub fn route_markers(entries: &[ScheduleEntry]) -> Vec<RouteMarker> {
    let mut index: HashMap<(i64, i64), usize, RandomState> = HashMap::default();
    let mut markers: Vec<RouteMarker> = Vec::new();

    for entry in entries {
        let Some(position) = entry.position else {
            continue;
        };
        let slot = *index.entry(position.key4()).or_insert_with(|| {
            markers.push(RouteMarker {
                position,
                days: Vec::new(),
                label: String::new(),
            });
            markers.len() - 1
        });
        markers[slot].days.push(entry.day);
    }

    for marker in &mut markers {
        marker.label = day_range_label(&marker.days);
    }
    markers
}

/// `[2, 3]` -> `"D2-D3"`, `[1, 4, 5, 7]` -> `"D1, D4-D5, D7"`.
#[must_use]
pub fn day_range_label(days: &[u32]) -> String {
    let mut sorted = days.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut runs: Vec<(u32, u32)> = Vec::new();
    for day in sorted {
        match runs.last_mut() {
            Some((_, end)) if *end + 1 == day => *end = day,
            _ => runs.push((day, day)),
        }
    }

    runs.iter()
        .map(|&(start, end)| {
            if start == end {
                format!("D{start}")
            } else {
                format!("D{start}-D{end}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
