use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::TripError;
use crate::model::geo::{LatLng, LatLngBounds};
use crate::model::schedule::{CoordTable, Lookups, RawDay, ScheduleEntry, build_schedule};

const EUROPE_JSON: &str = include_str!("../../data/europe.json");
const JAPAN_JSON: &str = include_str!("../../data/japan.json");

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Variant {
    Europe,
    Japan,
}

impl Variant {
    fn source(self) -> &'static str {
        match self {
            Variant::Europe => EUROPE_JSON,
            Variant::Japan => JAPAN_JSON,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct CameraView {
    pub center: LatLng,
    pub zoom: u8,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Anchor {
    pub name: String,
    pub position: LatLng,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Anchors {
    #[serde(default)]
    pub airport: Option<Anchor>,
    #[serde(default)]
    pub hotel: Option<Anchor>,
}

/// A fixed via-point forced into one day's route.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Detour {
    pub day: u32,
    pub waypoint: LatLng,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SpotKind {
    Food,
    Shopping,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Spot {
    pub name: String,
    pub kind: SpotKind,
    pub position: LatLng,
    #[serde(default)]
    pub note: Option<String>,
}

/// The on-disk shape of an itinerary document.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ItineraryDoc {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub start_date: NaiveDate,
    #[serde(default = "default_weekday_labels")]
    pub weekday_labels: Vec<String>,
    pub default_camera: CameraView,
    #[serde(default)]
    pub anchors: Anchors,
    #[serde(default)]
    pub detour: Option<Detour>,
    #[serde(default)]
    pub route_path: Option<Vec<LatLng>>,
    #[serde(default)]
    pub spots: Vec<Spot>,
    #[serde(default)]
    pub lookups: Lookups,
    pub days: Vec<RawDay>,
}

fn default_weekday_labels() -> Vec<String> {
    ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// A fully joined itinerary. Built once at startup and read-only afterwards.
#[derive(Clone, Debug)]
pub struct Itinerary {
    pub title: String,
    pub subtitle: String,
    pub default_camera: CameraView,
    pub anchors: Anchors,
    pub detour: Option<Detour>,
    pub route_path: Vec<LatLng>,
    pub spots: Vec<Spot>,
    pub cities: CoordTable,
    pub schedule: Vec<ScheduleEntry>,
}

impl Itinerary {
    /// # Errors
    ///
    /// Returns an error if the embedded document fails to parse or join.
    pub fn load_variant(variant: Variant) -> Result<Self, TripError> {
        Self::from_json(variant.source())
    }

    /// # Errors
    ///
    /// Returns an error if the file is unreadable or not a valid itinerary.
    pub fn load_file(path: &Path) -> Result<Self, TripError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// # Errors
    ///
    /// Returns an error if `text` is not a valid itinerary document.
    pub fn from_json(text: &str) -> Result<Self, TripError> {
        let doc: ItineraryDoc = serde_json::from_str(text)?;
        Self::from_doc(doc)
    }

    /// # Errors
    ///
    /// Returns `TripError::Itinerary` when the document has no days or its
    /// schedule cannot be joined.
    pub fn from_doc(doc: ItineraryDoc) -> Result<Self, TripError> {
        if doc.days.is_empty() {
            return Err(TripError::Itinerary("itinerary has no days".to_string()));
        }
        let schedule = build_schedule(
            doc.start_date,
            &doc.weekday_labels,
            &doc.days,
            &doc.lookups,
        )?;
        if let Some(detour) = &doc.detour {
            if !schedule.iter().any(|e| e.day == detour.day) {
                return Err(TripError::Itinerary(format!(
                    "detour references unknown day {}",
                    detour.day
                )));
            }
        }

        let route_path = doc
            .route_path
            .unwrap_or_else(|| schedule.iter().filter_map(|e| e.position).collect());

        Ok(Self {
            title: doc.title,
            subtitle: doc.subtitle,
            default_camera: doc.default_camera,
            anchors: doc.anchors,
            detour: doc.detour,
            route_path,
            spots: doc.spots,
            cities: doc.lookups.cities,
            schedule,
        })
    }

    #[must_use]
    pub fn day(&self, day: u32) -> Option<&ScheduleEntry> {
        self.schedule.iter().find(|e| e.day == day)
    }

    #[must_use]
    pub fn spot(&self, name: &str) -> Option<&Spot> {
        self.spots.iter().find(|s| s.name == name)
    }

    #[must_use]
    pub fn city(&self, name: &str) -> Option<LatLng> {
        self.cities.get(name.trim()).copied()
    }

    /// Days `from..=to`, clamped to the schedule.
    #[must_use]
    pub fn days_between(&self, from: u32, to: u32) -> &[ScheduleEntry] {
        let len = self.schedule.len();
        let start = (from.max(1) as usize - 1).min(len);
        let end = (to as usize).min(len).max(start);
        &self.schedule[start..end]
    }

    #[must_use]
    pub fn route_bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::enclosing(self.route_path.iter().copied())
    }

    #[must_use]
    pub fn city_count(&self) -> usize {
        crate::model::schedule::city_markers(&self.schedule).len()
    }
}
