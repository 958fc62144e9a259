//! In-memory collaborators for unit tests.

use async_trait::async_trait;
use std::{
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use crate::{
    error::LookupError,
    model::Coordinate,
    provider::{ForecastResponse, GeocodeResponse, Geocoder, Place, WeatherSource},
    view::{ForecastCard, OverlayView, RenderSink, SummaryView},
};

/// Open-Meteo style forecast body for Paris with `days` daily entries
/// starting 2026-10-19. Day `i` has max `20 + i` and min `10 + i`.
pub fn forecast_json(days: usize) -> String {
    let time: Vec<String> = (0..days).map(|i| format!("\"2026-10-{:02}\"", 19 + i)).collect();
    let series = |base: usize| -> String {
        (0..days).map(|i| (base + i).to_string()).collect::<Vec<_>>().join(",")
    };

    format!(
        r#"{{
  "latitude": 48.86,
  "longitude": 2.3399997,
  "timezone": "Europe/Paris",
  "current": {{
    "time": "2026-10-19T14:00",
    "temperature_2m": 18.4,
    "relative_humidity_2m": 72,
    "apparent_temperature": 17.6,
    "precipitation": 0.2,
    "rain": 0.2,
    "showers": 0.0,
    "weather_code": 3,
    "wind_speed_10m": 14.8,
    "wind_direction_10m": 225
  }},
  "daily": {{
    "time": [{}],
    "weather_code": [{}],
    "temperature_2m_max": [{}],
    "temperature_2m_min": [{}],
    "precipitation_sum": [{}],
    "wind_speed_10m_max": [{}]
  }}
}}"#,
        time.join(","),
        vec!["61"; days].join(","),
        series(20),
        series(10),
        vec!["1.5"; days].join(","),
        series(30),
    )
}

#[derive(Debug, Default)]
pub struct FakeGeocoder {
    places: Vec<Place>,
    failure: Option<LookupError>,
    search_calls: AtomicUsize,
    reverse_calls: AtomicUsize,
    last_search: Mutex<Option<String>>,
}

impl FakeGeocoder {
    pub fn with_place(name: &str, country: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            places: vec![Place {
                latitude,
                longitude,
                name: Some(name.to_string()),
                country: Some(country.to_string()),
            }],
            ..Self::default()
        }
    }

    pub fn failing(err: LookupError) -> Self {
        Self { failure: Some(err), ..Self::default() }
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn reverse_calls(&self) -> usize {
        self.reverse_calls.load(Ordering::SeqCst)
    }

    pub fn last_search(&self) -> Option<String> {
        self.last_search.lock().unwrap().clone()
    }

    fn respond(&self) -> Result<GeocodeResponse, LookupError> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(GeocodeResponse { results: self.places.clone() }),
        }
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn search(&self, name: &str) -> Result<GeocodeResponse, LookupError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_search.lock().unwrap() = Some(name.to_string());
        self.respond()
    }

    async fn reverse(&self, _coordinate: Coordinate) -> Result<GeocodeResponse, LookupError> {
        self.reverse_calls.fetch_add(1, Ordering::SeqCst);
        self.respond()
    }
}

#[derive(Debug, Default)]
pub struct FakeWeather {
    body: String,
    failure: Option<LookupError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_coordinate: Mutex<Option<Coordinate>>,
}

impl FakeWeather {
    pub fn from_json(body: &str) -> Self {
        Self { body: body.to_string(), ..Self::default() }
    }

    pub fn failing(err: LookupError) -> Self {
        Self { failure: Some(err), ..Self::default() }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_coordinate(&self) -> Option<Coordinate> {
        *self.last_coordinate.lock().unwrap()
    }
}

#[async_trait]
impl WeatherSource for FakeWeather {
    async fn forecast(&self, coordinate: Coordinate) -> Result<ForecastResponse, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_coordinate.lock().unwrap() = Some(coordinate);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(serde_json::from_str(&self.body)?)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Loading,
    Summary(SummaryView),
    Forecast(Vec<ForecastCard>),
    Overlay(OverlayView),
    Error(String),
}

/// Sink that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<Rendered>,
}

impl RecordingSink {
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn last_forecast(&self) -> Option<&[ForecastCard]> {
        self.events.iter().rev().find_map(|e| match e {
            Rendered::Forecast(cards) => Some(cards.as_slice()),
            _ => None,
        })
    }

    pub fn last_overlay(&self) -> Option<&OverlayView> {
        self.events.iter().rev().find_map(|e| match e {
            Rendered::Overlay(view) => Some(view),
            _ => None,
        })
    }
}

impl RenderSink for RecordingSink {
    fn loading(&mut self) {
        self.events.push(Rendered::Loading);
    }

    fn summary(&mut self, view: &SummaryView) {
        self.events.push(Rendered::Summary(view.clone()));
    }

    fn forecast(&mut self, cards: &[ForecastCard]) {
        self.events.push(Rendered::Forecast(cards.to_vec()));
    }

    fn overlay(&mut self, view: &OverlayView) {
        self.events.push(Rendered::Overlay(view.clone()));
    }

    fn error(&mut self, message: &str) {
        self.events.push(Rendered::Error(message.to_string()));
    }
}
