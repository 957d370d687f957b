use super::error::ProviderError;
use super::model::Position;
use super::service::DirectionsProvider;
use serde::Serialize;
use std::sync::Arc;

/// A driving route between two points, ready to hand to a map overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub origin: Position,
    pub destination: Position,
    /// Encoded overview polyline.
    pub polyline: String,
    pub distance_text: String,
    pub distance_meters: u64,
    pub duration_text: String,
    pub duration_seconds: u64,
    pub summary: String,
}

impl Route {
    /// Whether this route was computed for exactly these endpoints.
    pub fn connects(&self, origin: Position, destination: Position) -> bool {
        self.origin == origin && self.destination == destination
    }
}

/// Requests driving routes. One request per call, no retry; callers decide
/// when to ask again.
#[derive(Clone)]
pub struct RouteComputer {
    provider: Arc<dyn DirectionsProvider>,
}

impl RouteComputer {
    pub fn new(provider: Arc<dyn DirectionsProvider>) -> Self {
        Self { provider }
    }

    pub async fn route(&self, origin: Position, destination: Position) -> Result<Route, ProviderError> {
        log::debug!("Requesting route {} -> {}", origin, destination);
        match self.provider.directions(origin, destination).await {
            Ok(route) => {
                log::debug!(
                    "Route {} -> {}: {} ({})",
                    origin,
                    destination,
                    route.distance_text,
                    route.duration_text
                );
                Ok(route)
            }
            Err(err) => {
                log::warn!("Routing failed for {} -> {}: {}", origin, destination, err);
                Err(err)
            }
        }
    }
}
