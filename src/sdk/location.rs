use crate::sdk::maps::model::Position;
use crate::sdk::maps::service::GeolocationProvider;
use std::sync::Arc;

/// Reads the user's position, falling back to a fixed default when the
/// device cannot or will not tell us. Never fails.
#[derive(Clone)]
pub struct LocationProvider {
    geolocation: Arc<dyn GeolocationProvider>,
    fallback: Position,
}

impl LocationProvider {
    pub fn new(geolocation: Arc<dyn GeolocationProvider>, fallback: Position) -> Self {
        Self {
            geolocation,
            fallback,
        }
    }

    pub fn fallback(&self) -> Position {
        self.fallback
    }

    pub async fn get_position(&self) -> Position {
        match self.geolocation.locate().await {
            Ok(position) if position.is_valid() => {
                log::info!("Located user at {}", position);
                position
            }
            Ok(position) => {
                log::warn!(
                    "Device reported an invalid position {}; using fallback {}",
                    position,
                    self.fallback
                );
                self.fallback
            }
            Err(err) => {
                log::warn!("Geolocation failed ({}); using fallback {}", err, self.fallback);
                self.fallback
            }
        }
    }
}
