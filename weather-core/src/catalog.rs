//! WMO weather code lookup.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub description: &'static str,
    pub icon: &'static str,
}

pub const UNKNOWN: Condition = Condition { description: "Unknown", icon: "❓" };

const fn cond(description: &'static str, icon: &'static str) -> Condition {
    Condition { description, icon }
}

/// Describe a provider condition code. Codes outside the table map to [`UNKNOWN`].
pub fn describe(code: u16) -> Condition {
    match code {
        0 => cond("Clear sky", "☀️"),
        1 => cond("Mainly clear", "🌤️"),
        2 => cond("Partly cloudy", "⛅"),
        3 => cond("Overcast", "☁️"),
        45 => cond("Fog", "🌫️"),
        48 => cond("Depositing rime fog", "🌫️"),
        51 => cond("Light drizzle", "🌦️"),
        53 => cond("Moderate drizzle", "🌦️"),
        55 => cond("Dense drizzle", "🌦️"),
        56 => cond("Light freezing drizzle", "🌧️"),
        57 => cond("Dense freezing drizzle", "🌧️"),
        61 => cond("Slight rain", "🌧️"),
        63 => cond("Moderate rain", "🌧️"),
        65 => cond("Heavy rain", "🌧️"),
        66 => cond("Light freezing rain", "🌧️"),
        67 => cond("Heavy freezing rain", "🌧️"),
        80 => cond("Slight rain showers", "🌦️"),
        81 => cond("Moderate rain showers", "🌦️"),
        82 => cond("Violent rain showers", "⛈️"),
        95 => cond("Thunderstorm", "⛈️"),
        96 => cond("Thunderstorm with slight hail", "⛈️"),
        99 => cond("Thunderstorm with heavy hail", "⛈️"),
        _ => UNKNOWN,
    }
}
