use chrono::NaiveDate;
use log::{debug, info};
use std::sync::Arc;

use crate::{
    error::LookupError,
    model::{Coordinate, CurrentConditions, DailyForecastEntry, Forecast},
    provider::{CurrentBlock, DailyBlock, ForecastResponse, WeatherSource},
};

#[derive(Debug, Clone)]
pub struct ForecastFetcher {
    source: Arc<dyn WeatherSource>,
}

impl ForecastFetcher {
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        Self { source }
    }

    pub async fn fetch(&self, coordinate: Coordinate) -> Result<Forecast, LookupError> {
        let response = self.source.forecast(coordinate).await?;
        let forecast = parse_forecast(response)?;

        info!("fetched forecast for {coordinate}: {} daily entries", forecast.daily.len());
        Ok(forecast)
    }
}

/// Validate the provider envelope and map it onto the domain model.
pub fn parse_forecast(response: ForecastResponse) -> Result<Forecast, LookupError> {
    let current = response.current.ok_or(LookupError::NoCurrentData)?;
    let daily = match response.daily {
        Some(block) => parse_daily(block)?,
        None => Vec::new(),
    };

    Ok(Forecast { current: parse_current(current), daily, timezone: response.timezone })
}

fn parse_current(block: CurrentBlock) -> CurrentConditions {
    CurrentConditions {
        temperature_c: block.temperature_2m,
        feels_like_c: block.apparent_temperature,
        humidity_pct: block.relative_humidity_2m.round().clamp(0.0, 100.0) as u8,
        precipitation_mm: block.precipitation.unwrap_or(0.0),
        wind_speed_kmh: block.wind_speed_10m,
        wind_direction_deg: block.wind_direction_10m.rem_euclid(360.0),
        condition_code: block.weather_code,
    }
}

/// Zip the parallel arrays. A day is kept only if every field has a value
/// at its index; days beyond the shortest array or holding a `null` are dropped.
fn parse_daily(block: DailyBlock) -> Result<Vec<DailyForecastEntry>, LookupError> {
    let value = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();

    let mut entries = Vec::with_capacity(block.time.len());
    for (i, time) in block.time.iter().enumerate() {
        let (
            Some(condition_code),
            Some(max_temp_c),
            Some(min_temp_c),
            Some(precipitation_sum_mm),
            Some(wind_speed_max_kmh),
        ) = (
            block.weather_code.get(i).copied().flatten(),
            value(&block.temperature_2m_max, i),
            value(&block.temperature_2m_min, i),
            value(&block.precipitation_sum, i),
            value(&block.wind_speed_10m_max, i),
        )
        else {
            debug!("skipping daily entry {time}: incomplete data");
            continue;
        };

        let date = NaiveDate::parse_from_str(time, "%Y-%m-%d").map_err(|e| {
            LookupError::InvalidResponse(format!("bad daily date '{time}': {e}"))
        })?;

        entries.push(DailyForecastEntry {
            date,
            max_temp_c,
            min_temp_c,
            condition_code,
            wind_speed_max_kmh,
            precipitation_sum_mm,
        });
    }

    Ok(entries)
}
