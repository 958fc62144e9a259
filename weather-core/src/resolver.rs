use log::{info, warn};
use std::sync::Arc;

use crate::{
    error::LookupError,
    model::{Coordinate, ResolvedLocation},
    provider::{Geocoder, Place},
};

/// Label used when a reverse lookup yields no place name.
pub const FALLBACK_NAME: &str = "Your Location";

/// Turns a search string or a device coordinate into a named location.
#[derive(Debug, Clone)]
pub struct LocationResolver {
    geocoder: Arc<dyn Geocoder>,
}

impl LocationResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    pub async fn by_name(&self, query: &str) -> Result<ResolvedLocation, LookupError> {
        let query = validate_query(query)?;

        let response = self.geocoder.search(query).await?;
        let place = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NotFound(query.to_string()))?;

        let coordinate = Coordinate::new(place.latitude, place.longitude)?;
        let resolved = ResolvedLocation {
            coordinate,
            name: place.name.unwrap_or_else(|| query.to_string()),
            country: place.country.unwrap_or_default(),
        };

        info!("resolved '{query}' to {} ({coordinate})", resolved.display_name());
        Ok(resolved)
    }

    /// Reverse lookup. Never fails: without a usable name the location is
    /// labelled [`FALLBACK_NAME`].
    pub async fn by_coordinate(&self, coordinate: Coordinate) -> ResolvedLocation {
        let named = match self.geocoder.reverse(coordinate).await {
            Ok(response) => response.results.into_iter().find_map(named_place),
            Err(err) => {
                warn!("reverse geocoding for {coordinate} failed: {err}");
                None
            }
        };

        match named {
            Some((name, country)) => ResolvedLocation { coordinate, name, country },
            None => fallback_location(coordinate),
        }
    }
}

/// Unnamed location for a coordinate the geocoder could not label.
pub fn fallback_location(coordinate: Coordinate) -> ResolvedLocation {
    ResolvedLocation { coordinate, name: FALLBACK_NAME.to_string(), country: String::new() }
}

/// Trimmed query, or `EmptyQuery` if nothing is left.
pub fn validate_query(query: &str) -> Result<&str, LookupError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(LookupError::EmptyQuery);
    }
    Ok(trimmed)
}

fn named_place(place: Place) -> Option<(String, String)> {
    let name = place.name.filter(|n| !n.trim().is_empty())?;
    Some((name, place.country.unwrap_or_default()))
}
