use async_trait::async_trait;
use serde::Deserialize;
use std::fmt::Debug;

use crate::{error::LookupError, model::Coordinate};

pub mod device;
pub mod open_meteo;

/// One entry of a geocoding result set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Place {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Geocoding envelope. An absent `results` key means no match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<Place>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentBlock {
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    pub apparent_temperature: f64,
    #[serde(default)]
    pub precipitation: Option<f64>,
    pub weather_code: u16,
    pub wind_speed_10m: f64,
    pub wind_direction_10m: f64,
}

/// Daily aggregates as parallel arrays indexed by day offset. The provider
/// reports missing values as `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyBlock {
    pub time: Vec<String>,
    #[serde(default)]
    pub weather_code: Vec<Option<u16>>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_speed_10m_max: Vec<Option<f64>>,
}

/// Raw forecast envelope. Both blocks are optional on the wire and
/// validated by [`crate::forecast::ForecastFetcher`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub current: Option<CurrentBlock>,
    #[serde(default)]
    pub daily: Option<DailyBlock>,
}

#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Forward lookup, best match only.
    async fn search(&self, name: &str) -> Result<GeocodeResponse, LookupError>;

    /// Reverse lookup for a coordinate.
    async fn reverse(&self, coordinate: Coordinate) -> Result<GeocodeResponse, LookupError>;
}

#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn forecast(&self, coordinate: Coordinate) -> Result<ForecastResponse, LookupError>;
}

/// Host capability that reports where the device is.
#[async_trait]
pub trait DeviceLocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinate, LookupError>;
}
