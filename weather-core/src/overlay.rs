//! Synthetic heat-map samples around the map center.
//!
//! The samples are illustrative only. They are drawn at random within a
//! per-mode intensity range and never derived from fetched weather values.

use rand::Rng;
use std::ops::Range;

use crate::model::{Coordinate, OverlayMode, OverlaySample};

pub const SAMPLE_COUNT: usize = 50;

/// Maximum jitter in degrees applied to each axis.
pub const SPREAD_DEG: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub position: f64,
    pub color: &'static str,
}

const fn stop(position: f64, color: &'static str) -> GradientStop {
    GradientStop { position, color }
}

const TEMPERATURE_GRADIENT: &[GradientStop] = &[
    stop(0.4, "blue"),
    stop(0.6, "cyan"),
    stop(0.7, "lime"),
    stop(0.8, "yellow"),
    stop(1.0, "red"),
];

const WIND_GRADIENT: &[GradientStop] =
    &[stop(0.4, "blue"), stop(0.6, "cyan"), stop(0.7, "yellow"), stop(1.0, "red")];

const PRECIPITATION_GRADIENT: &[GradientStop] =
    &[stop(0.4, "blue"), stop(0.6, "green"), stop(0.8, "yellow"), stop(1.0, "red")];

impl OverlayMode {
    /// Range that sample intensities are drawn from.
    pub fn intensity_range(&self) -> Range<f64> {
        match self {
            OverlayMode::Temperature => 15.0..30.0,
            OverlayMode::Wind => 0.0..10.0,
            OverlayMode::Precipitation => 0.0..5.0,
        }
    }

    /// Intensity that maps to the top of the gradient.
    pub fn max_intensity(&self) -> f64 {
        self.intensity_range().end
    }

    pub fn gradient(&self) -> &'static [GradientStop] {
        match self {
            OverlayMode::Temperature => TEMPERATURE_GRADIENT,
            OverlayMode::Wind => WIND_GRADIENT,
            OverlayMode::Precipitation => PRECIPITATION_GRADIENT,
        }
    }

    /// Color of the first stop at or above `normalized`; clamps to the last stop.
    pub fn color_for(&self, normalized: f64) -> &'static str {
        let gradient = self.gradient();
        gradient
            .iter()
            .find(|s| normalized <= s.position)
            .unwrap_or(&gradient[gradient.len() - 1])
            .color
    }
}

/// Draw a fresh sample set. Each call replaces the previous one wholesale.
pub fn sample<R: Rng + ?Sized>(
    rng: &mut R,
    center: Coordinate,
    mode: OverlayMode,
) -> Vec<OverlaySample> {
    let range = mode.intensity_range();

    (0..SAMPLE_COUNT)
        .map(|_| OverlaySample {
            latitude: center.latitude + rng.gen_range(-SPREAD_DEG..SPREAD_DEG),
            longitude: center.longitude + rng.gen_range(-SPREAD_DEG..SPREAD_DEG),
            intensity: rng.gen_range(range.clone()),
        })
        .collect()
}
