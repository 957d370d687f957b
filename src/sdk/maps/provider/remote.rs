use super::types::{
    DirectionsResponse, DistanceMatrixResponse, GeolocateResponse, LatLng, NearbyPlace,
    NearbySearchResponse,
};
use crate::sdk::config::MapsConfig;
use crate::sdk::maps::error::{GoogleErrorPayload, ProviderError};
use crate::sdk::maps::model::{Category, OpeningState, PlaceResult, Position, SearchRadius};
use crate::sdk::maps::route::Route;
use crate::sdk::maps::service::{
    DirectionsProvider, DistanceProvider, GeolocationProvider, PlacesProvider,
};
use crate::sdk::util::rate_limit::Limiter;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";
pub const DEFAULT_GEOLOCATION_URL: &str = "https://www.googleapis.com/geolocation/v1/geolocate";

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Google Maps Platform web services: Places nearby search, Distance Matrix,
/// Directions and Geolocation. All requests share one rate limiter.
pub struct GoogleMapsProvider {
    client: Client,
    api_key: String,
    base_url: String,
    geolocation_url: String,
    limiter: Limiter,
}

impl GoogleMapsProvider {
    pub fn new(api_key: String, limiter: Limiter) -> Result<Self, ProviderError> {
        Self::with_endpoints(api_key, limiter, DEFAULT_BASE_URL, DEFAULT_GEOLOCATION_URL)
    }

    pub fn from_config(config: &MapsConfig, limiter: Limiter) -> Result<Self, ProviderError> {
        Self::with_endpoints(
            config.api_key.clone(),
            limiter,
            config.base_url.as_str(),
            config.geolocation_url.as_str(),
        )
    }

    pub fn with_endpoints(
        api_key: String,
        limiter: Limiter,
        base_url: impl Into<String>,
        geolocation_url: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(15)).build()?,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            geolocation_url: geolocation_url.into(),
            limiter,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        self.limiter.until_ready().await;
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                log::error!("Failed to send GET request. URL: {}\nError: {}", url, e);
                e
            })?;
        let status = response.status();
        let text = response.text().await?;

        serde_json::from_str(&text).map_err(|e| {
            if !status.is_success() {
                log::error!("API returned non-success status: {}. Body: {}", status, text);
                return ProviderError::api(status.as_str(), text.clone());
            }
            log::error!("Failed to parse response. URL: {}\nError: {}. Body: {}", url, e, text);
            e.into()
        })
    }
}

/// Anything other than OK (or an accepted alternative) becomes an API error.
fn check_status(status: &str, error_message: Option<String>) -> Result<(), ProviderError> {
    if status == STATUS_OK {
        Ok(())
    } else {
        Err(ProviderError::api(status, error_message.unwrap_or_default()))
    }
}

impl From<LatLng> for Position {
    fn from(value: LatLng) -> Self {
        Position::new(value.lat, value.lng)
    }
}

fn place_from_response(place: NearbyPlace, category: Category) -> PlaceResult {
    PlaceResult {
        id: place.place_id,
        name: place.name,
        position: place.geometry.location.into(),
        category,
        address: place.vicinity,
        rating: place.rating,
        user_ratings_total: place.user_ratings_total,
        opening_state: place
            .opening_hours
            .and_then(|hours| hours.open_now)
            .map(OpeningState::from_open_now),
        distance_text: None,
    }
}

#[async_trait]
impl PlacesProvider for GoogleMapsProvider {
    async fn nearby(
        &self,
        position: Position,
        radius: SearchRadius,
        category: Category,
    ) -> Result<Vec<PlaceResult>, ProviderError> {
        log::debug!(
            "[PROVIDER] Calling nearby search for \"{}\" within {} of {}",
            category.keyword(),
            radius,
            position
        );
        let resp: NearbySearchResponse = self
            .get_json(
                "/maps/api/place/nearbysearch/json",
                &[
                    ("location", position.as_query()),
                    ("radius", radius.meters().to_string()),
                    ("keyword", category.keyword().to_string()),
                ],
            )
            .await?;

        if resp.status == STATUS_ZERO_RESULTS {
            return Ok(Vec::new());
        }
        check_status(&resp.status, resp.error_message)?;

        Ok(resp
            .results
            .into_iter()
            .map(|place| place_from_response(place, category))
            .collect())
    }
}

#[async_trait]
impl DistanceProvider for GoogleMapsProvider {
    async fn distance(
        &self,
        origin: Position,
        destination: Position,
    ) -> Result<String, ProviderError> {
        log::debug!("[PROVIDER] Calling distance matrix for {} -> {}", origin, destination);
        let resp: DistanceMatrixResponse = self
            .get_json(
                "/maps/api/distancematrix/json",
                &[
                    ("origins", origin.as_query()),
                    ("destinations", destination.as_query()),
                    ("mode", "driving".to_string()),
                ],
            )
            .await?;
        check_status(&resp.status, resp.error_message)?;

        let element = resp
            .rows
            .into_iter()
            .next()
            .and_then(|row| row.elements.into_iter().next())
            .ok_or_else(|| ProviderError::NoResult(format!("empty distance matrix for {}", destination)))?;
        if element.status != STATUS_OK {
            return Err(ProviderError::NoResult(format!(
                "distance element {} for {}",
                element.status, destination
            )));
        }
        element
            .distance
            .map(|d| d.text)
            .ok_or_else(|| ProviderError::NoResult(format!("no distance for {}", destination)))
    }
}

#[async_trait]
impl DirectionsProvider for GoogleMapsProvider {
    async fn directions(
        &self,
        origin: Position,
        destination: Position,
    ) -> Result<Route, ProviderError> {
        log::debug!("[PROVIDER] Calling directions for {} -> {}", origin, destination);
        let resp: DirectionsResponse = self
            .get_json(
                "/maps/api/directions/json",
                &[
                    ("origin", origin.as_query()),
                    ("destination", destination.as_query()),
                    ("mode", "driving".to_string()),
                ],
            )
            .await?;

        if resp.status == STATUS_ZERO_RESULTS {
            return Err(ProviderError::NoResult(format!(
                "no driving route {} -> {}",
                origin, destination
            )));
        }
        check_status(&resp.status, resp.error_message)?;

        let route = resp
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::NoResult("No route found in success response".to_string()))?;
        let leg = route
            .legs
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::NoResult("Route has no legs".to_string()))?;

        Ok(Route {
            origin,
            destination,
            polyline: route.overview_polyline.points,
            distance_text: leg.distance.text,
            distance_meters: leg.distance.value,
            duration_text: leg.duration.text,
            duration_seconds: leg.duration.value,
            summary: route.summary,
        })
    }
}

#[async_trait]
impl GeolocationProvider for GoogleMapsProvider {
    async fn locate(&self) -> Result<Position, ProviderError> {
        self.limiter.until_ready().await;
        log::debug!("[PROVIDER] Calling geolocation");

        let response = self
            .client
            .post(&self.geolocation_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({ "considerIp": true }))
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // Try to parse the structured error first
            if let Ok(payload) = serde_json::from_str::<GoogleErrorPayload>(&text) {
                return Err(payload.into());
            }
            log::error!("Geolocation returned status {}. Unparseable Body: {}", status, text);
            return Err(ProviderError::api(status.as_str(), text));
        }

        let resp: GeolocateResponse = serde_json::from_str(&text)?;
        log::debug!(
            "[PROVIDER] Geolocated at {:?} (accuracy {:?} m)",
            resp.location,
            resp.accuracy
        );
        Ok(resp.location.into())
    }
}
