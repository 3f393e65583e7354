use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Placeholder for a course or place whose coordinates were never looked up.
    pub const ZERO: LatLng = LatLng { lat: 0.0, lng: 0.0 };

    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        *self != Self::ZERO
    }

    /// Dedup key: both axes rounded to 4 decimal places (roughly 11 m).
    #[must_use]
    pub fn key4(&self) -> (i64, i64) {
        (
            (self.lat * 10_000.0).round() as i64,
            (self.lng * 10_000.0).round() as i64,
        )
    }

    #[must_use]
    pub fn same_place(&self, other: &LatLng) -> bool {
        self.key4() == other.key4()
    }
}

/// Axis-aligned lat/lng box. Does not handle boxes crossing the antimeridian.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct LatLngBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl LatLngBounds {
    #[must_use]
    pub fn from_point(p: LatLng) -> Self {
        Self {
            south: p.lat,
            west: p.lng,
            north: p.lat,
            east: p.lng,
        }
    }

    pub fn extend(&mut self, p: LatLng) {
        self.south = self.south.min(p.lat);
        self.north = self.north.max(p.lat);
        self.west = self.west.min(p.lng);
        self.east = self.east.max(p.lng);
    }

    #[must_use]
    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south && p.lat <= self.north && p.lng >= self.west && p.lng <= self.east
    }

    #[must_use]
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    /// Smallest box holding every point, or `None` for an empty iterator.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut iter = points.into_iter();
        let mut bounds = Self::from_point(iter.next()?);
        for p in iter {
            bounds.extend(p);
        }
        Some(bounds)
    }
}

/// Pixel padding handed to the map's fit-bounds primitive.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Padding {
    #[must_use]
    pub const fn uniform(px: u32) -> Self {
        Self {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key4_rounds_to_four_places() {
        let a = LatLng::new(48.812_71, 14.317_49);
        let b = LatLng::new(48.812_74, 14.317_51);
        assert!(a.same_place(&b));
        assert!(!a.same_place(&LatLng::new(48.8128, 14.3175)));
    }

    #[test]
    fn enclosing_grows_to_fit() {
        let b = LatLngBounds::enclosing([
            LatLng::new(50.0, 14.0),
            LatLng::new(47.5, 16.3),
            LatLng::new(48.0, 13.0),
        ])
        .unwrap();
        assert_eq!(b.south, 47.5);
        assert_eq!(b.north, 50.0);
        assert_eq!(b.west, 13.0);
        assert_eq!(b.east, 16.3);
        assert!(LatLngBounds::enclosing(Vec::new()).is_none());
    }
}
