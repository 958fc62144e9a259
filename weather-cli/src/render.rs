use chrono::Local;
use weather_core::view::{ForecastCard, OverlayView, RenderSink, SummaryView};

const GRID_ROWS: usize = 9;
const GRID_COLS: usize = 25;

/// Prints every region to stdout as it is rendered.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl RenderSink for TerminalSink {
    fn loading(&mut self) {
        println!("Loading weather data...");
    }

    fn summary(&mut self, view: &SummaryView) {
        println!();
        println!("{}", format_summary(view));
        println!("  Updated {}", Local::now().format("%H:%M"));
    }

    fn forecast(&mut self, cards: &[ForecastCard]) {
        println!();
        println!("{}", format_forecast(cards));
    }

    fn overlay(&mut self, view: &OverlayView) {
        println!();
        println!("{}", format_overlay(view));
    }

    fn error(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

pub fn format_summary(view: &SummaryView) -> String {
    format!(
        "{}\n  {} {}  {}°C (feels like {}°C)\n  Humidity {}%  Wind {} km/h {}  Precipitation {} mm",
        view.location,
        view.icon,
        view.description,
        view.temperature_c,
        view.feels_like_c,
        view.humidity_pct,
        view.wind_speed_kmh,
        view.wind_direction,
        view.precipitation_mm,
    )
}

pub fn format_forecast(cards: &[ForecastCard]) -> String {
    if cards.is_empty() {
        return "No forecast available.".to_string();
    }

    let mut out = String::from("Forecast");
    for card in cards {
        out.push_str(&format!(
            "\n  {} {}  {} {:<24} {:>3}° / {:>3}°  wind {} km/h  rain {} mm",
            card.day,
            card.date,
            card.icon,
            card.description,
            card.max_temp_c,
            card.min_temp_c,
            card.wind_speed_max_kmh,
            card.precipitation_sum_mm,
        ));
    }
    out
}

/// Coarse heat map of the overlay: one character per grid cell, taken from
/// the strongest sample that falls in it.
pub fn format_overlay(view: &OverlayView) -> String {
    let spread = weather_core::overlay::SPREAD_DEG;
    let mut cells: Vec<Vec<Option<f64>>> = vec![vec![None; GRID_COLS]; GRID_ROWS];

    for p in &view.points {
        // North at the top.
        let row_pos = (view.center.latitude + spread - p.latitude) / (2.0 * spread);
        let col_pos = (p.longitude - (view.center.longitude - spread)) / (2.0 * spread);
        let row = cell_index(row_pos, GRID_ROWS);
        let col = cell_index(col_pos, GRID_COLS);

        let cell = &mut cells[row][col];
        if cell.is_none_or(|w| p.weight > w) {
            *cell = Some(p.weight);
        }
    }

    let mut out = format!(
        "Overlay: {} ({} samples, max {})",
        view.mode,
        view.points.len(),
        view.max_intensity
    );
    for row in &cells {
        out.push_str("\n  ");
        for cell in row {
            out.push(match cell {
                Some(weight) => glyph(view.mode.color_for(*weight)),
                None => ' ',
            });
        }
    }

    let legend: Vec<String> = view
        .gradient
        .iter()
        .map(|s| format!("{}={} (<= {})", glyph(s.color), s.color, s.position))
        .collect();
    out.push_str(&format!("\n  Legend: {}", legend.join(", ")));
    out
}

fn cell_index(pos: f64, cells: usize) -> usize {
    ((pos * cells as f64).floor().max(0.0) as usize).min(cells - 1)
}

fn glyph(color: &str) -> char {
    match color {
        "blue" => '.',
        "cyan" | "green" => ':',
        "lime" => '+',
        "yellow" => '*',
        "red" => '#',
        _ => '?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::{
        Coordinate, OverlayMode, OverlaySample,
        view::{HeatPoint, overlay_view},
    };

    fn summary() -> SummaryView {
        SummaryView {
            location: "Paris, France".into(),
            description: "Overcast",
            icon: "☁️",
            temperature_c: 18,
            feels_like_c: 17,
            humidity_pct: 72,
            wind_speed_kmh: 14.8,
            wind_direction: "SW",
            precipitation_mm: 0.2,
        }
    }

    #[test]
    fn summary_lists_all_fields() {
        let text = format_summary(&summary());
        assert!(text.starts_with("Paris, France"));
        assert!(text.contains("18°C (feels like 17°C)"));
        assert!(text.contains("Humidity 72%"));
        assert!(text.contains("Wind 14.8 km/h SW"));
        assert!(text.contains("Precipitation 0.2 mm"));
    }

    #[test]
    fn forecast_one_line_per_card() {
        let card = ForecastCard {
            day: "Tue".into(),
            date: "2026-10-20".into(),
            icon: "🌧️",
            description: "Slight rain",
            max_temp_c: 21,
            min_temp_c: 11,
            wind_speed_max_kmh: 31.0,
            precipitation_sum_mm: 1.5,
        };
        let text = format_forecast(&[card.clone(), card]);

        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("Tue 2026-10-20"));
        assert!(text.contains("rain 1.5 mm"));
        assert_eq!(format_forecast(&[]), "No forecast available.");
    }

    #[test]
    fn overlay_grid_places_points() {
        let center = Coordinate::new(50.0, 10.0).unwrap();
        let samples = [
            OverlaySample { latitude: 50.099, longitude: 9.901, intensity: 30.0 },
            OverlaySample { latitude: 49.901, longitude: 10.099, intensity: 15.0 },
        ];
        let text = format_overlay(&overlay_view(OverlayMode::Temperature, center, &samples));
        let rows: Vec<&str> = text.lines().skip(1).take(GRID_ROWS).collect();

        assert!(text.starts_with("Overlay: temperature (2 samples, max 30)"));
        assert_eq!(rows[0].chars().nth(2), Some('#'));
        assert_eq!(rows[GRID_ROWS - 1].chars().last(), Some(':'));
        assert!(text.contains("Legend: .=blue"));
    }

    #[test]
    fn strongest_point_wins_a_cell() {
        let center = Coordinate::new(0.0, 0.0).unwrap();
        let point = |weight| HeatPoint { latitude: 0.0, longitude: 0.0, weight, color: "blue" };
        let view = OverlayView {
            mode: OverlayMode::Wind,
            center,
            max_intensity: 10.0,
            gradient: OverlayMode::Wind.gradient(),
            points: vec![point(0.95), point(0.1)],
        };

        assert!(format_overlay(&view).contains('#'));
        assert!(!format_overlay(&view).lines().nth(1 + GRID_ROWS / 2).unwrap().contains('.'));
    }

    #[test]
    fn out_of_range_positions_clamp_to_edges() {
        assert_eq!(cell_index(-0.5, 9), 0);
        assert_eq!(cell_index(1.0, 9), 8);
        assert_eq!(cell_index(0.5, 9), 4);
    }
}
