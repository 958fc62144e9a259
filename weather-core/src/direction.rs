const LABELS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

const SECTOR: f64 = 360.0 / 16.0;

/// Compass label for a wind bearing. Any finite angle is accepted.
pub fn label(degrees: f64) -> &'static str {
    if !degrees.is_finite() {
        return LABELS[0];
    }
    let normalized = degrees.rem_euclid(360.0);
    let index = (normalized / SECTOR).round() as usize % LABELS.len();
    LABELS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_points() {
        assert_eq!(label(0.0), "N");
        assert_eq!(label(90.0), "E");
        assert_eq!(label(180.0), "S");
        assert_eq!(label(270.0), "W");
    }

    #[test]
    fn sector_boundaries_round_to_nearest() {
        assert_eq!(label(11.0), "N");
        assert_eq!(label(11.25), "NNE");
        assert_eq!(label(22.5), "NNE");
        assert_eq!(label(348.0), "NNW");
        assert_eq!(label(349.0), "N");
        assert_eq!(label(359.9), "N");
    }

    #[test]
    fn periodic_over_full_turns() {
        for step in 0..72 {
            let d = step as f64 * 5.0 + 0.3;
            for k in [-3i32, -1, 1, 2, 10] {
                assert_eq!(label(d), label(d + 360.0 * k as f64), "d={d}, k={k}");
            }
        }
        assert_eq!(label(-90.0), "W");
        assert_eq!(label(450.0), "E");
    }

    #[test]
    fn non_finite_is_north() {
        assert_eq!(label(f64::NAN), "N");
        assert_eq!(label(f64::INFINITY), "N");
    }
}
