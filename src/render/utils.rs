use crate::render::config::RENDER_TEXT;

/// Section heading: upper-cased with a trailing colon.
pub fn heading(text: impl Into<String>) -> String {
    text.into().to_uppercase() + ":"
}

/// Formats a measurement with precision scaled to its magnitude.
/// - Large (>=1000): 1 decimal (4216.0)
/// - Medium (1-1000): 2 decimals (25.47)
/// - Small (<1): 4 decimals (0.0123)
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return RENDER_TEXT.missing_value.to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1000.0 {
        format!("{:.1}", value)
    } else if magnitude >= 1.0 || value == 0.0 {
        format!("{:.2}", value)
    } else {
        format!("{:.4}", value)
    }
}

pub fn format_optional(value: Option<f64>) -> String {
    value
        .map(format_value)
        .unwrap_or_else(|| RENDER_TEXT.missing_value.to_string())
}

pub fn format_p_value(p: f64) -> String {
    if p < 0.001 {
        "<0.001".to_string()
    } else {
        format!("{:.3}", p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value_precision() {
        assert_eq!(format_value(4216.04), "4216.0");
        assert_eq!(format_value(25.468), "25.47");
        assert_eq!(format_value(0.01234), "0.0123");
        assert_eq!(format_value(0.0), "0.00");
        assert_eq!(format_value(f64::NAN), "-");
    }

    #[test]
    fn test_format_p_value() {
        assert_eq!(format_p_value(0.0001), "<0.001");
        assert_eq!(format_p_value(0.12403), "0.124");
        assert_eq!(heading("Glacier retreat"), "GLACIER RETREAT:");
    }
}
