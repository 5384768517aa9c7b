//! Lenient number parsing for form fields.

use std::str::FromStr;

/// Parses a number, rounds it and clamps it to `[min, max]`. Unparsable or non-finite input
/// yields `fallback`.
pub fn parse_clamped(text: &str, min: u32, max: u32, fallback: u32) -> u32 {
	match text.trim().parse::<f64>() {
		Ok(value) if value.is_finite() => value.round().clamp(min as f64, max as f64) as u32,
		_ => fallback,
	}
}

/// Like [`parse_clamped`], but an empty field means "unset".
pub fn parse_optional_clamped(text: &str, min: u32, max: u32, fallback: u32) -> Option<u32> {
	if text.trim().is_empty() {
		None
	} else {
		Some(parse_clamped(text, min, max, fallback))
	}
}

pub fn parse_or<T: FromStr>(text: &str, fallback: T) -> T {
	text.trim().parse().unwrap_or(fallback)
}
