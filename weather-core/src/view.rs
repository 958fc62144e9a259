//! Data to view-model mapping.
//!
//! The orchestrator never formats text for a particular front end. It maps
//! domain values into the structs below and hands them to a [`RenderSink`].

use crate::{
    catalog, direction,
    model::{Coordinate, DailyForecastEntry, Forecast, OverlayMode, OverlaySample, ResolvedLocation},
    overlay::GradientStop,
};

/// Number of day cards shown, starting from tomorrow.
pub const FORECAST_CARDS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    pub location: String,
    pub description: &'static str,
    pub icon: &'static str,
    pub temperature_c: i64,
    pub feels_like_c: i64,
    pub humidity_pct: u8,
    pub wind_speed_kmh: f64,
    pub wind_direction: &'static str,
    pub precipitation_mm: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    /// Short weekday, e.g. "Tue".
    pub day: String,
    pub date: String,
    pub icon: &'static str,
    pub description: &'static str,
    pub max_temp_c: i64,
    pub min_temp_c: i64,
    pub wind_speed_max_kmh: f64,
    pub precipitation_sum_mm: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Intensity divided by the mode's max, in `[0, 1]` for in-range samples.
    pub weight: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    pub mode: OverlayMode,
    pub center: Coordinate,
    pub max_intensity: f64,
    pub gradient: &'static [GradientStop],
    pub points: Vec<HeatPoint>,
}

/// Output side of the dashboard. Each call replaces the named region.
pub trait RenderSink {
    /// Placeholder in both the summary and forecast regions.
    fn loading(&mut self);
    fn summary(&mut self, view: &SummaryView);
    fn forecast(&mut self, cards: &[ForecastCard]);
    fn overlay(&mut self, view: &OverlayView);
    /// Replaces the summary region only.
    fn error(&mut self, message: &str);
}

fn round_degrees(value: f64) -> i64 {
    value.round() as i64
}

pub fn summary_view(location: &ResolvedLocation, forecast: &Forecast) -> SummaryView {
    let current = &forecast.current;
    let condition = catalog::describe(current.condition_code);

    SummaryView {
        location: location.display_name(),
        description: condition.description,
        icon: condition.icon,
        temperature_c: round_degrees(current.temperature_c),
        feels_like_c: round_degrees(current.feels_like_c),
        humidity_pct: current.humidity_pct,
        wind_speed_kmh: current.wind_speed_kmh,
        wind_direction: direction::label(current.wind_direction_deg),
        precipitation_mm: current.precipitation_mm,
    }
}

/// Cards for days 1..=5. Day 0 is today and is already covered by the summary.
pub fn forecast_cards(daily: &[DailyForecastEntry]) -> Vec<ForecastCard> {
    daily.iter().skip(1).take(FORECAST_CARDS).map(forecast_card).collect()
}

fn forecast_card(entry: &DailyForecastEntry) -> ForecastCard {
    let condition = catalog::describe(entry.condition_code);

    ForecastCard {
        day: entry.date.format("%a").to_string(),
        date: entry.date.format("%Y-%m-%d").to_string(),
        icon: condition.icon,
        description: condition.description,
        max_temp_c: round_degrees(entry.max_temp_c),
        min_temp_c: round_degrees(entry.min_temp_c),
        wind_speed_max_kmh: entry.wind_speed_max_kmh,
        precipitation_sum_mm: entry.precipitation_sum_mm,
    }
}

pub fn overlay_view(
    mode: OverlayMode,
    center: Coordinate,
    samples: &[OverlaySample],
) -> OverlayView {
    let max_intensity = mode.max_intensity();

    let points = samples
        .iter()
        .map(|s| {
            let weight = s.intensity / max_intensity;
            HeatPoint {
                latitude: s.latitude,
                longitude: s.longitude,
                weight,
                color: mode.color_for(weight),
            }
        })
        .collect();

    OverlayView { mode, center, max_intensity, gradient: mode.gradient(), points }
}
