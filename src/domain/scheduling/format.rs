//! Human-readable interval labels for rating buttons.

/// Formats a day count as a compact label: `now`, `3d`, `2w`, `5mo`, `1y`.
pub fn format_interval(days: f64) -> String {
    let days = days.max(0.0).round() as u64;
    match days {
        0 => "now".to_string(),
        1..=6 => format!("{}d", days),
        7..=29 => format!("{}w", days / 7),
        30..=364 => format!("{}mo", days / 30),
        _ => format!("{}y", days / 365),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_unit() {
        assert_eq!(format_interval(0.0), "now");
        assert_eq!(format_interval(1.0), "1d");
        assert_eq!(format_interval(5.0), "5d");
        assert_eq!(format_interval(7.0), "1w");
        assert_eq!(format_interval(14.0), "2w");
        assert_eq!(format_interval(30.0), "1mo");
        assert_eq!(format_interval(90.0), "3mo");
        assert_eq!(format_interval(365.0), "1y");
        assert_eq!(format_interval(730.0), "2y");
    }

    #[test]
    fn rounds_fractional_days() {
        assert_eq!(format_interval(2.6), "3d");
        assert_eq!(format_interval(0.2), "now");
    }

    #[test]
    fn negative_values_read_as_now() {
        assert_eq!(format_interval(-3.0), "now");
    }
}
