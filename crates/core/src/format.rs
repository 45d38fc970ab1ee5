//! Human-readable number formatting.

const SCALES: [(f64, &str); 4] =
    [(1e12, "trillion"), (1e9, "billion"), (1e6, "million"), (1e3, "thousand")];

/// Format a computed value for display: `N/A` when there is none, otherwise
/// scaled to thousand/million/billion/trillion with `precision` decimals.
pub fn format_number(value: Option<f64>, precision: usize) -> String {
    let Some(n) = value else {
        return "N/A".to_string();
    };

    for (threshold, word) in SCALES {
        if n.abs() >= threshold {
            return format!("{:.precision$} {word}", n / threshold);
        }
    }
    format!("{n:.precision$}")
}

/// Divide by a display scale; a zero or missing scale leaves the value as is.
pub fn apply_scale(value: f64, scale: Option<f64>) -> f64 {
    match scale {
        Some(s) if s != 0.0 => value / s,
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_na() {
        assert_eq!(format_number(None, 2), "N/A");
    }

    #[test]
    fn scales_large_numbers() {
        assert_eq!(format_number(Some(8.1e9), 2), "8.10 billion");
        assert_eq!(format_number(Some(2.5e12), 1), "2.5 trillion");
        assert_eq!(format_number(Some(-3_400_000.0), 2), "-3.40 million");
        assert_eq!(format_number(Some(1000.0), 0), "1 thousand");
    }

    #[test]
    fn small_numbers_keep_precision() {
        assert_eq!(format_number(Some(999.456), 2), "999.46");
        assert_eq!(format_number(Some(0.0), 2), "0.00");
    }

    #[test]
    fn scale_division() {
        assert_eq!(apply_scale(5000.0, Some(1000.0)), 5.0);
        assert_eq!(apply_scale(5000.0, Some(0.0)), 5000.0);
        assert_eq!(apply_scale(5000.0, None), 5000.0);
    }
}
