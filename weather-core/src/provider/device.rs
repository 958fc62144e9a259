use async_trait::async_trait;

use crate::{error::LookupError, model::Coordinate, provider::DeviceLocator};

/// A device position known up front, e.g. passed on the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator(pub Coordinate);

#[async_trait]
impl DeviceLocator for FixedLocator {
    async fn locate(&self) -> Result<Coordinate, LookupError> {
        Ok(self.0)
    }
}

/// Host without a positioning capability.
#[derive(Debug, Clone, Default)]
pub struct NoLocator;

#[async_trait]
impl DeviceLocator for NoLocator {
    async fn locate(&self) -> Result<Coordinate, LookupError> {
        Err(LookupError::GeolocationUnavailable(
            "geolocation is not supported on this host".to_string(),
        ))
    }
}
