pub mod fixed;
pub mod remote;
pub mod types;

pub use fixed::{FixedLocation, NoGeolocation};
pub use remote::GoogleMapsProvider;
