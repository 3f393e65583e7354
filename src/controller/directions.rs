use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::warn;

use crate::model::{LatLng, LatLngBounds};

static RENTAL_CAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)rental\s*car|렌터카").expect("rental car pattern"));

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Driving,
    Transit,
}

impl TravelMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Transit => "transit",
        }
    }

    /// Driving when the transport label mentions a rental car, otherwise transit.
    #[must_use]
    pub fn for_transport(label: &str) -> Self {
        if RENTAL_CAR.is_match(label) {
            TravelMode::Driving
        } else {
            TravelMode::Transit
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DirectionsRequest {
    pub origin: LatLng,
    pub destination: LatLng,
    #[serde(default)]
    pub waypoints: Vec<LatLng>,
    pub mode: TravelMode,
}

impl DirectionsRequest {
    #[must_use]
    pub fn with_mode(&self, mode: TravelMode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RouteStep {
    pub start: LatLng,
    pub end: LatLng,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RouteLeg {
    pub duration_text: String,
    pub steps: Vec<RouteStep>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DirectionsRoute {
    pub legs: Vec<RouteLeg>,
}

impl DirectionsRoute {
    /// Box around every step's start and end point, so curved and multi-step
    /// routes stay fully in view.
    #[must_use]
    pub fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::enclosing(
            self.legs
                .iter()
                .flat_map(|leg| leg.steps.iter())
                .flat_map(|step| [step.start, step.end]),
        )
    }

    #[must_use]
    pub fn first_leg_duration(&self) -> Option<String> {
        self.legs.first().map(|leg| leg.duration_text.clone())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectionsError {
    #[error("directions service returned {0}")]
    Status(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed directions response: {0}")]
    Malformed(String),
    #[error("no directions service configured")]
    Unavailable,
}

impl From<reqwest::Error> for DirectionsError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

/// Point-to-point routing capability. Treated as opaque and unreliable.
#[async_trait]
pub trait DirectionsService: Send + Sync {
    async fn route(&self, request: &DirectionsRequest)
    -> Result<DirectionsRoute, DirectionsError>;
}

/// A successful query, with what the view needs pulled out of it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ResolvedRoute {
    pub route: DirectionsRoute,
    pub mode: TravelMode,
    pub duration: Option<String>,
    pub bounds: Option<LatLngBounds>,
}

impl ResolvedRoute {
    #[must_use]
    pub fn new(route: DirectionsRoute, mode: TravelMode) -> Self {
        Self {
            duration: route.first_leg_duration(),
            bounds: route.bounds(),
            route,
            mode,
        }
    }
}

/// Runs `request`; if a transit query fails, retries exactly once by car.
///
/// # Errors
///
/// Returns the last `DirectionsError` once no retry is left.
pub async fn query_with_fallback(
    service: &dyn DirectionsService,
    request: &DirectionsRequest,
) -> Result<ResolvedRoute, DirectionsError> {
    match service.route(request).await {
        Ok(route) => Ok(ResolvedRoute::new(route, request.mode)),
        Err(err) if request.mode == TravelMode::Transit => {
            warn!(error = %err, "transit directions failed, retrying by car");
            let retry = request.with_mode(TravelMode::Driving);
            service
                .route(&retry)
                .await
                .map(|route| ResolvedRoute::new(route, TravelMode::Driving))
        }
        Err(err) => Err(err),
    }
}
