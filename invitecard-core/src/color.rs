//! Color Utilities - hex parsing, relative luminance, rgba formatting
//!
//! Malformed colors never fail: parsing yields `None` and every dependent
//! computation has a fixed fallback.

use serde::{Deserialize, Serialize};

/// Dark slate used when an overlay color cannot be parsed.
pub const FALLBACK_RGB: Rgb = Rgb { r: 15, g: 23, b: 42 };

/// Luminance reported for a color that does not parse.
pub const NEUTRAL_LUMINANCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Clamp into [0, 1]. NaN and negative zero clamp to 0.
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() || value <= 0.0 {
        return 0.0;
    }
    value.min(1.0)
}

/// Parse a 3- or 6-digit hex color.
///
/// Every non-hex character is stripped first, so `"#AbC"`, `"abc"` and
/// `" # a b c "` all parse the same. Any other digit count is `None`.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits: Vec<u8> = hex
        .chars()
        .filter_map(|c| c.to_digit(16))
        .map(|d| d as u8)
        .collect();

    match digits.as_slice() {
        [r, g, b] => Some(Rgb {
            r: r * 17,
            g: g * 17,
            b: b * 17,
        }),
        [r1, r2, g1, g2, b1, b2] => Some(Rgb {
            r: r1 * 16 + r2,
            g: g1 * 16 + g2,
            b: b1 * 16 + b2,
        }),
        _ => None,
    }
}

fn linearize(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// BT.709 relative luminance of a hex color, or 0.5 when it does not parse.
pub fn luminance(hex: &str) -> f64 {
    match hex_to_rgb(hex) {
        Some(rgb) => {
            0.2126 * linearize(rgb.r) + 0.7152 * linearize(rgb.g) + 0.0722 * linearize(rgb.b)
        }
        None => NEUTRAL_LUMINANCE,
    }
}

/// Format a hex color as `rgba(r, g, b, a)` with the alpha clamped and
/// printed to three decimals.
pub fn apply_alpha(hex: &str, alpha: f64) -> String {
    let rgb = hex_to_rgb(hex).unwrap_or(FALLBACK_RGB);
    format!("rgba({}, {}, {}, {:.3})", rgb.r, rgb.g, rgb.b, clamp01(alpha))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hex_expands() {
        assert_eq!(hex_to_rgb("#abc"), hex_to_rgb("#aabbcc"));
        assert_eq!(hex_to_rgb("#fff"), Some(Rgb { r: 255, g: 255, b: 255 }));
    }

    #[test]
    fn test_hex_ignores_noise_and_case() {
        assert_eq!(hex_to_rgb(" #D4AF37 "), Some(Rgb { r: 212, g: 175, b: 55 }));
        assert_eq!(hex_to_rgb("d4-af-37"), hex_to_rgb("#d4af37"));
    }

    #[test]
    fn test_bad_lengths_rejected() {
        assert_eq!(hex_to_rgb(""), None);
        assert_eq!(hex_to_rgb("#abcd"), None);
        assert_eq!(hex_to_rgb("#1234567"), None);
        assert_eq!(hex_to_rgb("not a color"), None);
    }

    #[test]
    fn test_luminance_extremes() {
        assert!((luminance("#ffffff") - 1.0).abs() < 1e-9);
        assert_eq!(luminance("#000000"), 0.0);
        assert_eq!(luminance("#zzzzzz"), NEUTRAL_LUMINANCE);
    }

    #[test]
    fn test_luminance_mid_grey() {
        assert!((luminance("#808080") - 0.21586050011389923).abs() < 1e-12);
    }

    #[test]
    fn test_luminance_linear_segment() {
        // 10/255 sits just under the 0.03928 knee
        assert!((luminance("#0a0a0a") - (10.0 / 255.0) / 12.92).abs() < 1e-15);
        let c: f64 = 11.0 / 255.0;
        assert!((luminance("#0b0b0b") - ((c + 0.055) / 1.055).powf(2.4)).abs() < 1e-12);
    }

    #[test]
    fn test_clamp01_negative_zero() {
        assert!(clamp01(-0.0).is_sign_positive());
        assert_eq!(clamp01(2.0), 1.0);
    }

    #[test]
    fn test_luminance_weights_green_heaviest() {
        assert!(luminance("#00ff00") > luminance("#ff0000"));
        assert!(luminance("#ff0000") > luminance("#0000ff"));
    }

    #[test]
    fn test_apply_alpha_formats() {
        assert_eq!(apply_alpha("#d4af37", 0.42), "rgba(212, 175, 55, 0.420)");
        assert_eq!(apply_alpha("#d4af37", 1.5), "rgba(212, 175, 55, 1.000)");
        assert_eq!(apply_alpha("#d4af37", -0.2), "rgba(212, 175, 55, 0.000)");
        assert_eq!(apply_alpha("#ffffff", -0.0), "rgba(255, 255, 255, 0.000)");
    }

    #[test]
    fn test_apply_alpha_fallback() {
        assert_eq!(apply_alpha("oops", 0.5), "rgba(15, 23, 42, 0.500)");
        assert_eq!(apply_alpha("", 7.0), "rgba(15, 23, 42, 1.000)");
    }

    #[test]
    fn test_clamp01_nan() {
        assert_eq!(clamp01(f64::NAN), 0.0);
        assert_eq!(clamp01(0.3), 0.3);
    }
}
