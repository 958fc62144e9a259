//! Core library for the `weather` dashboard.
//!
//! This crate defines:
//! - Domain models (locations, forecasts, overlay samples)
//! - Provider abstractions over geocoding, weather and device location,
//!   with an Open-Meteo implementation
//! - The lookup pipeline and the dashboard orchestrator
//! - View models handed to a [`view::RenderSink`]
//! - Configuration handling
//!
//! It is used by `weather-cli`, but the orchestrator is front-end agnostic.

pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod direction;
pub mod error;
pub mod forecast;
pub mod model;
pub mod overlay;
pub mod provider;
pub mod resolver;
pub mod view;

#[cfg(test)]
mod testing;

pub use config::{Config, DefaultLocation};
pub use dashboard::{Dashboard, DashboardState, Pipeline, Session};
pub use error::LookupError;
pub use model::{
    Coordinate, CurrentConditions, DailyForecastEntry, Forecast, OverlayMode, OverlaySample,
    ResolvedLocation,
};
pub use provider::{DeviceLocator, Geocoder, WeatherSource};
pub use view::RenderSink;
