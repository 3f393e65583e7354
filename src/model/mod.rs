pub mod geo;
pub mod itinerary;
pub mod markers;
pub mod schedule;

pub use geo::{LatLng, LatLngBounds, Padding};
pub use itinerary::{Anchor, CameraView, Detour, Itinerary, Spot, SpotKind, Variant};
pub use markers::{RouteMarker, route_markers};
pub use schedule::{Accommodation, GolfCourse, ScheduleEntry, TeeTime};
