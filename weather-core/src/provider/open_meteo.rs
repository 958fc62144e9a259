use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{
    config::Config,
    error::LookupError,
    model::Coordinate,
    provider::{ForecastResponse, GeocodeResponse, Geocoder, WeatherSource},
};

pub const CURRENT_FIELDS: &[&str] = &[
    "temperature_2m",
    "relative_humidity_2m",
    "apparent_temperature",
    "precipitation",
    "rain",
    "showers",
    "weather_code",
    "wind_speed_10m",
    "wind_direction_10m",
];

pub const DAILY_FIELDS: &[&str] = &[
    "weather_code",
    "temperature_2m_max",
    "temperature_2m_min",
    "precipitation_sum",
    "wind_speed_10m_max",
];

pub const FORECAST_DAYS: u8 = 6;

/// Open-Meteo geocoding and forecast endpoints behind one HTTP client.
#[derive(Debug, Clone)]
pub struct OpenMeteo {
    geocoding_url: String,
    forecast_url: String,
    http: Client,
}

impl OpenMeteo {
    pub fn new(
        geocoding_url: String,
        forecast_url: String,
        timeout: Duration,
    ) -> Result<Self, LookupError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::NetworkFailure(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { geocoding_url, forecast_url, http })
    }

    pub fn from_config(config: &Config) -> Result<Self, LookupError> {
        Self::new(config.geocoding_url.clone(), config.forecast_url.clone(), config.timeout())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, LookupError> {
        debug!("GET {url} {query:?}");

        let res = self.http.get(url).query(query).send().await?;
        let body = read_success_body(res).await?;

        Ok(serde_json::from_str(&body)?)
    }
}

async fn read_success_body(res: Response) -> Result<String, LookupError> {
    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        return Err(LookupError::NetworkFailure(format!(
            "request failed with status {}: {}",
            status,
            truncate_body(&body),
        )));
    }

    Ok(body)
}

#[async_trait]
impl Geocoder for OpenMeteo {
    async fn search(&self, name: &str) -> Result<GeocodeResponse, LookupError> {
        self.get_json(&self.geocoding_url, &geocode_search_query(name)).await
    }

    async fn reverse(&self, coordinate: Coordinate) -> Result<GeocodeResponse, LookupError> {
        self.get_json(&self.geocoding_url, &geocode_reverse_query(coordinate)).await
    }
}

#[async_trait]
impl WeatherSource for OpenMeteo {
    async fn forecast(&self, coordinate: Coordinate) -> Result<ForecastResponse, LookupError> {
        self.get_json(&self.forecast_url, &forecast_query(coordinate)).await
    }
}

fn geocode_search_query(name: &str) -> Vec<(&'static str, String)> {
    vec![
        ("name", name.to_string()),
        ("count", "1".to_string()),
        ("language", "en".to_string()),
        ("format", "json".to_string()),
    ]
}

fn geocode_reverse_query(coordinate: Coordinate) -> Vec<(&'static str, String)> {
    vec![
        ("latitude", coordinate.latitude.to_string()),
        ("longitude", coordinate.longitude.to_string()),
        ("count", "1".to_string()),
        ("language", "en".to_string()),
        ("format", "json".to_string()),
    ]
}

fn forecast_query(coordinate: Coordinate) -> Vec<(&'static str, String)> {
    vec![
        ("latitude", coordinate.latitude.to_string()),
        ("longitude", coordinate.longitude.to_string()),
        ("current", CURRENT_FIELDS.join(",")),
        ("daily", DAILY_FIELDS.join(",")),
        ("timezone", "auto".to_string()),
        ("forecast_days", FORECAST_DAYS.to_string()),
    ]
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(query: &'a [(&str, String)], key: &str) -> Option<&'a str> {
        query.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn forecast_query_requests_six_days_with_auto_timezone() {
        let q = forecast_query(Coordinate::new(48.85, 2.35).unwrap());

        assert_eq!(param(&q, "latitude"), Some("48.85"));
        assert_eq!(param(&q, "longitude"), Some("2.35"));
        assert_eq!(param(&q, "timezone"), Some("auto"));
        assert_eq!(param(&q, "forecast_days"), Some("6"));
        assert!(param(&q, "current").unwrap().contains("apparent_temperature"));
        assert!(param(&q, "current").unwrap().contains("wind_direction_10m"));
        assert_eq!(
            param(&q, "daily"),
            Some("weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum,wind_speed_10m_max")
        );
    }

    #[test]
    fn geocode_queries_ask_for_single_match() {
        let q = geocode_search_query("Paris");
        assert_eq!(param(&q, "name"), Some("Paris"));
        assert_eq!(param(&q, "count"), Some("1"));

        let q = geocode_reverse_query(Coordinate::new(51.5, -0.12).unwrap());
        assert_eq!(param(&q, "latitude"), Some("51.5"));
        assert_eq!(param(&q, "longitude"), Some("-0.12"));
        assert_eq!(param(&q, "count"), Some("1"));
        assert_eq!(param(&q, "name"), None);
    }

    #[test]
    fn truncate_body_limits_long_bodies() {
        assert_eq!(truncate_body("short"), "short");

        let long = "é".repeat(300);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
    }

    #[test]
    fn client_builds_from_default_config() {
        assert!(OpenMeteo::from_config(&Config::default()).is_ok());
    }
}
