pub mod error;
pub mod model;
pub mod provider;
pub mod route;
pub mod service;

pub use error::ProviderError;
pub use model::{Category, OpeningState, PlaceResult, Position, SearchRadius, DISTANCE_UNAVAILABLE};
pub use provider::{FixedLocation, GoogleMapsProvider, NoGeolocation};
pub use route::{Route, RouteComputer};
pub use service::{DirectionsProvider, DistanceProvider, GeolocationProvider, PlacesProvider};
