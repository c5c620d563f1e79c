//! Formatting helpers for presenting metrics and files.

use time::{macros::format_description, OffsetDateTime};

/// Shortest decimal rendering of a lab value: `95`, `10.5`, `0.25`.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{value:.0}");
    }
    let fixed = format!("{value:.4}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Value followed by its unit, skipping the separator when the unit is blank.
pub fn format_with_unit(value: f64, unit: &str) -> String {
    let unit = unit.trim();
    if unit.is_empty() {
        format_value(value)
    } else {
        format!("{} {unit}", format_value(value))
    }
}

pub fn format_file_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let bytes_f = bytes as f64;
    if bytes_f >= MB {
        format!("{:.1} MB", bytes_f / MB)
    } else if bytes_f >= KB {
        format!("{:.0} KB", bytes_f / KB)
    } else {
        format!("{bytes} B")
    }
}

/// Compact clock label like `14:30 UTC`.
pub fn format_clock(ts: OffsetDateTime) -> String {
    ts.format(&format_description!("[hour]:[minute] UTC"))
        .unwrap_or_else(|_| "—".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn values_drop_trailing_zeros() {
        assert_eq!(format_value(95.0), "95");
        assert_eq!(format_value(10.50), "10.5");
        assert_eq!(format_value(0.125), "0.125");
        assert_eq!(format_value(f64::NAN), "—");
    }

    #[test]
    fn unit_is_optional() {
        assert_eq!(format_with_unit(95.0, "mg/dL"), "95 mg/dL");
        assert_eq!(format_with_unit(4.2, "  "), "4.2");
    }

    #[test]
    fn file_sizes_scale() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(2048), "2 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024 + 300 * 1024), "3.3 MB");
    }

    #[test]
    fn clock_is_utc() {
        assert_eq!(format_clock(datetime!(2025-03-01 14:30:59 UTC)), "14:30 UTC");
    }
}
