#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use trip_map::controller::directions::{
    DirectionsError, DirectionsRequest, DirectionsRoute, DirectionsService, RouteLeg, RouteStep,
};
use trip_map::model::{Itinerary, LatLng};

pub const FIXTURE_JSON: &str = r#"{
  "title": "Test Loop",
  "subtitle": "2026. 8. 15 ~ 8. 18",
  "start_date": "2026-08-15",
  "default_camera": { "center": { "lat": 48.5, "lng": 15.0 }, "zoom": 6 },
  "anchors": {
    "airport": { "name": "Alpha Airport", "position": { "lat": 50.1, "lng": 14.26 } },
    "hotel": { "name": "Hotel A", "position": { "lat": 50.09, "lng": 14.42 } }
  },
  "detour": { "day": 2, "waypoint": { "lat": 49.5, "lng": 14.2 } },
  "spots": [
    { "name": "Noodle Bar", "kind": "food", "position": { "lat": 50.01, "lng": 14.01 } }
  ],
  "lookups": {
    "cities": {
      "Alpha": { "lat": 50.0, "lng": 14.0 },
      "Beta": { "lat": 48.8, "lng": 14.3 },
      "Gamma": { "lat": 48.2, "lng": 16.4 }
    },
    "accommodations": {
      "Hotel A": { "lat": 50.09, "lng": 14.42 },
      "Hotel B": { "lat": 48.81, "lng": 14.31 },
      "TBD": { "lat": 1.0, "lng": 1.0 }
    },
    "golf_courses": {
      "Alpha Links": { "lat": 50.2, "lng": 14.5 },
      "Beta Hills": { "lat": 48.9, "lng": 14.1 }
    },
    "images": { "Alpha": "https://img.example/alpha.jpg" }
  },
  "days": [
    {
      "departure": "Seoul", "destination": "Alpha", "country": "CZ", "transport": "Flight",
      "accommodation": { "name": "Hotel A", "address": "1 Main St" },
      "golf": [
        { "name": "Alpha Links", "tee_times": [{ "time": "12:40", "note": "Out" }] },
        { "name": "Mystery GC" }
      ],
      "activity": "Arrive", "zoom": 13
    },
    {
      "departure": "Alpha", "destination": "Beta", "country": "CZ", "transport": "Rental car",
      "booking": "Sixt",
      "accommodation": { "name": "TBD" },
      "golf": [{ "name": "Beta Hills" }],
      "activity": "Drive south"
    },
    {
      "departure": "Beta", "destination": "Beta", "country": "CZ", "transport": "Walk",
      "accommodation": { "name": "Hotel B", "address": "2 Side St" },
      "activity": "Old town", "zoom": 15
    },
    {
      "departure": "Beta", "destination": "Gamma", "country": "AT", "transport": "Train",
      "activity": "Onward", "zoom": 13
    }
  ]
}"#;

pub fn fixture() -> Arc<Itinerary> {
    Arc::new(Itinerary::from_json(FIXTURE_JSON).expect("fixture itinerary"))
}

pub fn straight_route(from: LatLng, to: LatLng, duration: &str) -> DirectionsRoute {
    DirectionsRoute {
        legs: vec![RouteLeg {
            duration_text: duration.to_string(),
            steps: vec![RouteStep {
                start: from,
                end: to,
            }],
        }],
    }
}

type Responder =
    dyn Fn(&DirectionsRequest) -> (Duration, Result<DirectionsRoute, DirectionsError>) + Send + Sync;

/// Directions double: answers every request through `respond` after the
/// returned delay, and records what it was asked.
pub struct ScriptedDirections {
    respond: Box<Responder>,
    calls: Mutex<Vec<DirectionsRequest>>,
}

impl ScriptedDirections {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&DirectionsRequest) -> (Duration, Result<DirectionsRoute, DirectionsError>)
            + Send
            + Sync
            + 'static,
    {
        Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<DirectionsRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DirectionsService for ScriptedDirections {
    async fn route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<DirectionsRoute, DirectionsError> {
        self.calls.lock().unwrap().push(request.clone());
        let (delay, result) = (self.respond)(request);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }
}
