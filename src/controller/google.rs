use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::controller::directions::{
    DirectionsError, DirectionsRequest, DirectionsRoute, DirectionsService, RouteLeg, RouteStep,
};
use crate::model::LatLng;

const DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";
/// Upper bound on one Directions call, connect through body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Google Directions web service client.
pub struct GoogleDirections {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GoogleDirections {
    /// # Errors
    ///
    /// Returns `DirectionsError::Network` if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, DirectionsError> {
        Self::with_timeout(api_key, REQUEST_TIMEOUT)
    }

    /// # Errors
    ///
    /// Returns `DirectionsError::Network` if the HTTP client cannot be built.
    pub fn with_timeout(
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DirectionsError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: DIRECTIONS_URL.to_string(),
        })
    }

    /// Points the client at another host, e.g. a local mock.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl DirectionsService for GoogleDirections {
    async fn route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<DirectionsRoute, DirectionsError> {
        let mut params = vec![
            ("origin", latlng_param(request.origin)),
            ("destination", latlng_param(request.destination)),
            ("mode", request.mode.as_str().to_string()),
            ("key", self.api_key.clone()),
        ];
        if !request.waypoints.is_empty() {
            let via = request
                .waypoints
                .iter()
                .map(|p| format!("via:{}", latlng_param(*p)))
                .collect::<Vec<_>>()
                .join("|");
            params.push(("waypoints", via));
        }

        debug!(mode = request.mode.as_str(), "querying google directions");
        let resp = self.client.get(&self.base_url).query(&params).send().await?;
        let body: GoogleResponse = resp.json().await?;
        parse_response(body)
    }
}

fn latlng_param(p: LatLng) -> String {
    format!("{},{}", p.lat, p.lng)
}

#[derive(Deserialize, Debug)]
pub struct GoogleResponse {
    pub status: String,
    #[serde(default)]
    pub routes: Vec<GoogleRoute>,
}

#[derive(Deserialize, Debug)]
pub struct GoogleRoute {
    #[serde(default)]
    pub legs: Vec<GoogleLeg>,
}

#[derive(Deserialize, Debug)]
pub struct GoogleLeg {
    pub duration: Option<GoogleText>,
    #[serde(default)]
    pub steps: Vec<GoogleStep>,
}

#[derive(Deserialize, Debug)]
pub struct GoogleText {
    pub text: String,
}

#[derive(Deserialize, Debug)]
pub struct GoogleStep {
    pub start_location: LatLng,
    pub end_location: LatLng,
}

/// Turns a decoded Directions API body into a route, keeping only the first
/// alternative.
///
/// # Errors
///
/// `Status` for any status other than `OK`, `Malformed` for an `OK` body
/// with no route.
pub fn parse_response(body: GoogleResponse) -> Result<DirectionsRoute, DirectionsError> {
    if body.status != "OK" {
        return Err(DirectionsError::Status(body.status));
    }
    let route = body
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| DirectionsError::Malformed("status OK but no routes".to_string()))?;

    let legs = route
        .legs
        .into_iter()
        .map(|leg| RouteLeg {
            duration_text: leg.duration.map(|d| d.text).unwrap_or_default(),
            steps: leg
                .steps
                .into_iter()
                .map(|s| RouteStep {
                    start: s.start_location,
                    end: s.end_location,
                })
                .collect(),
        })
        .collect();

    Ok(DirectionsRoute { legs })
}
