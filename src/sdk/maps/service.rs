use super::error::ProviderError;
use super::model::{Category, PlaceResult, Position, SearchRadius};
use super::route::Route;
use async_trait::async_trait;

/// Device location capability.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// Single attempt at reading the current position.
    async fn locate(&self) -> Result<Position, ProviderError>;
}

#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Places of `category` within `radius` of `position`.
    ///
    /// "No matches" is `Ok(vec![])`, never an error.
    async fn nearby(
        &self,
        position: Position,
        radius: SearchRadius,
        category: Category,
    ) -> Result<Vec<PlaceResult>, ProviderError>;
}

#[async_trait]
pub trait DistanceProvider: Send + Sync {
    /// Human-readable driving distance, e.g. `"1.2 km"`.
    async fn distance(&self, origin: Position, destination: Position)
        -> Result<String, ProviderError>;
}

#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Driving route between two points.
    async fn directions(&self, origin: Position, destination: Position)
        -> Result<Route, ProviderError>;
}
