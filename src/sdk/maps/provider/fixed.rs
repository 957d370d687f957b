use crate::sdk::maps::error::ProviderError;
use crate::sdk::maps::model::Position;
use crate::sdk::maps::service::GeolocationProvider;
use async_trait::async_trait;

/// A device that always reports the same position, e.g. coordinates given
/// on the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Position);

#[async_trait]
impl GeolocationProvider for FixedLocation {
    async fn locate(&self) -> Result<Position, ProviderError> {
        Ok(self.0)
    }
}

/// No geolocation capability at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

#[async_trait]
impl GeolocationProvider for NoGeolocation {
    async fn locate(&self) -> Result<Position, ProviderError> {
        Err(ProviderError::Unavailable)
    }
}
