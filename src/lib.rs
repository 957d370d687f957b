pub mod sdk;

pub use sdk::config::MapsConfig;
pub use sdk::distance::DistanceAnnotator;
pub use sdk::listing::{merge, ListQuery, LocationFilter};
pub use sdk::location::LocationProvider;
pub use sdk::maps::model::{Category, OpeningState, PlaceResult, Position, SearchRadius};
pub use sdk::maps::route::{Route, RouteComputer};
pub use sdk::maps::GoogleMapsProvider;
pub use sdk::places::{PlaceStore, PlacesAggregator};
pub use sdk::selection::{SelectionController, SelectionState};
pub use sdk::session::{Providers, Session, SessionSnapshot};
