use ahash::RandomState;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::TripError;
use crate::model::geo::LatLng;

/// Booking names meaning "not booked yet". These never get coordinates.
pub const UNDECIDED_ACCOMMODATION: &[&str] = &["TBD", "미정"];

pub const DEFAULT_DAY_ZOOM: u8 = 13;

pub type CoordTable = HashMap<String, LatLng, RandomState>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TeeTime {
    pub time: String,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GolfCourse {
    pub name: String,
    pub position: LatLng,
    #[serde(default)]
    pub tee_times: Vec<TeeTime>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Accommodation {
    pub name: String,
    pub address: String,
    pub position: Option<LatLng>,
}

impl Accommodation {
    #[must_use]
    pub fn is_undecided(&self) -> bool {
        UNDECIDED_ACCOMMODATION.contains(&self.name.trim())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ScheduleEntry {
    pub day: u32,
    pub date: NaiveDate,
    pub date_label: String,
    pub weekday: String,
    pub weekend: bool,
    pub departure: String,
    pub destination: String,
    /// Where the day is spent, as named in the city table.
    pub city: String,
    pub country: String,
    pub transport: String,
    pub booking: Option<String>,
    pub accommodation: Option<Accommodation>,
    pub golf_courses: Vec<GolfCourse>,
    pub activity: String,
    /// Where the camera flies when the day is picked. `None` when the day's
    /// city is missing from the lookup table and no explicit focus was given.
    pub position: Option<LatLng>,
    pub zoom: u8,
    pub image: Option<String>,
}

impl ScheduleEntry {
    /// A day on which nobody travels: departure and destination are the same city.
    #[must_use]
    pub fn is_stationary(&self) -> bool {
        self.departure.trim() == self.destination.trim()
    }

    #[must_use]
    pub fn golf_course(&self, name: &str) -> Option<&GolfCourse> {
        self.golf_courses.iter().find(|g| g.name == name)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RawAccommodation {
    pub name: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RawGolfRef {
    pub name: String,
    #[serde(default)]
    pub tee_times: Vec<TeeTime>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RawDay {
    /// Explicit day number. Defaults to the record's position in the list.
    #[serde(default)]
    pub day: Option<u32>,
    pub departure: String,
    pub destination: String,
    pub country: String,
    pub transport: String,
    #[serde(default)]
    pub booking: Option<String>,
    #[serde(default)]
    pub accommodation: Option<RawAccommodation>,
    #[serde(default)]
    pub golf: Vec<RawGolfRef>,
    #[serde(default)]
    pub activity: String,
    #[serde(default)]
    pub focus: Option<LatLng>,
    #[serde(default)]
    pub zoom: Option<u8>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Lookups {
    #[serde(default)]
    pub cities: CoordTable,
    #[serde(default)]
    pub accommodations: CoordTable,
    #[serde(default)]
    pub golf_courses: CoordTable,
    #[serde(default)]
    pub images: HashMap<String, String, RandomState>,
}

/// Joins the raw day records with the lookup tables. Record `i` of `days` is
/// day `i + 1` unless it names its own day, and day `n` is dated
/// `start_date + n - 1`.
///
/// # Errors
///
/// Returns `TripError::Itinerary` if `weekday_labels` does not hold exactly
/// seven entries, the day numbers are not 1..=N in order, or the dates overflow.
pub fn build_schedule(
    start_date: NaiveDate,
    weekday_labels: &[String],
    days: &[RawDay],
    lookups: &Lookups,
) -> Result<Vec<ScheduleEntry>, TripError> {
    if weekday_labels.len() != 7 {
        return Err(TripError::Itinerary(format!(
            "expected 7 weekday labels starting on Sunday, got {}",
            weekday_labels.len()
        )));
    }

    let mut schedule = Vec::with_capacity(days.len());
    for (i, raw) in days.iter().enumerate() {
        let day = match raw.day {
            Some(day) => day,
            None => u32::try_from(i + 1)
                .map_err(|_| TripError::Itinerary("too many days".to_string()))?,
        };
        let date = start_date
            .checked_add_signed(Duration::days(i64::from(day.max(1)) - 1))
            .ok_or_else(|| TripError::Itinerary(format!("day {day} overflows the calendar")))?;
        let dow = date.weekday().num_days_from_sunday() as usize;

        let accommodation = raw.accommodation.as_ref().map(|a| {
            let mut acc = Accommodation {
                name: a.name.clone(),
                address: a.address.clone(),
                position: None,
            };
            if !acc.is_undecided() {
                acc.position = lookups.accommodations.get(&a.name).copied();
            }
            acc
        });

        // the city the day is spent in: the destination, or the departure
        // city when the destination is off the map (e.g. the flight home)
        let city = [&raw.destination, &raw.departure]
            .into_iter()
            .find(|c| lookups.cities.contains_key(c.as_str()))
            .unwrap_or(&raw.destination)
            .clone();

        let golf_courses = raw
            .golf
            .iter()
            .map(|g| GolfCourse {
                name: g.name.clone(),
                position: lookups
                    .golf_courses
                    .get(&g.name)
                    .copied()
                    .unwrap_or(LatLng::ZERO),
                tee_times: g.tee_times.clone(),
            })
            .collect();

        schedule.push(ScheduleEntry {
            day,
            date,
            date_label: format!("{}.{}", date.month(), date.day()),
            weekday: weekday_labels[dow].clone(),
            weekend: dow == 0 || dow == 6,
            departure: raw.departure.clone(),
            destination: raw.destination.clone(),
            city: city.clone(),
            country: raw.country.clone(),
            transport: raw.transport.clone(),
            booking: raw.booking.clone(),
            accommodation,
            golf_courses,
            activity: raw.activity.clone(),
            position: raw.focus.or_else(|| lookups.cities.get(&city).copied()),
            zoom: raw.zoom.unwrap_or(DEFAULT_DAY_ZOOM),
            image: lookups.images.get(&city).cloned(),
        });
    }

    validate_day_indices(&schedule)?;
    Ok(schedule)
}

/// Checks that `day` values are unique and run 1..=N in order.
///
/// # Errors
///
/// Returns `TripError::Itinerary` naming the first day out of place.
pub fn validate_day_indices(schedule: &[ScheduleEntry]) -> Result<(), TripError> {
    for (i, entry) in schedule.iter().enumerate() {
        if entry.day as usize != i + 1 {
            return Err(TripError::Itinerary(format!(
                "day numbers must run 1..={} without gaps, found {} at position {}",
                schedule.len(),
                entry.day,
                i + 1
            )));
        }
    }
    Ok(())
}

/// One marker per distinct city, first occurrence wins.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CityMarker {
    pub city: String,
    pub country: String,
    pub position: LatLng,
}

#[must_use]
pub fn city_markers(schedule: &[ScheduleEntry]) -> Vec<CityMarker> {
    let mut markers: Vec<CityMarker> = Vec::new();
    for entry in schedule {
        let Some(position) = entry.position else {
            continue;
        };
        if markers.iter().any(|m| m.city == entry.city) {
            continue;
        }
        markers.push(CityMarker {
            city: entry.city.clone(),
            country: entry.country.clone(),
            position,
        });
    }
    markers
}
