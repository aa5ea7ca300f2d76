use std::time::Duration;

use crate::error::FieldError;

/// Read a loosely written duration such as "1 hour", "2 mins." or "1h30m".
///
/// Returns `Ok(None)` for an empty string.
pub fn guess_duration(input: &str) -> Result<Option<Duration>, FieldError> {
    if input.is_empty() {
        return Ok(None);
    }

    let shorthand = input
        .to_lowercase()
        .replace("hours", "h")
        .replace("hour", "h")
        .replace("mins", "m")
        .replace("min", "m");
    let compact = strip_abbreviation_dots(&shorthand);

    parse_compact(&compact)
        .map(Some)
        .ok_or_else(|| FieldError::InvalidDuration(input.to_string()))
}

/// Drop spaces, and dots that are not decimal points ("2 min." -> "2m")
fn strip_abbreviation_dots(input: &str) -> String {
    let chars: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
    let mut out = String::with_capacity(chars.len());

    for (i, c) in chars.iter().enumerate() {
        if *c == '.' {
            let digit_before = i > 0 && chars[i - 1].is_ascii_digit();
            let digit_after = chars.get(i + 1).is_some_and(char::is_ascii_digit);
            if !(digit_before && digit_after) {
                continue;
            }
        }
        out.push(*c);
    }
    out
}

/// `<decimal><unit>` repeated, with units `h`, `m`, `s` and `ms`
fn parse_compact(mut input: &str) -> Option<Duration> {
    if input == "0" {
        return Some(Duration::ZERO);
    }
    if input.is_empty() {
        return None;
    }

    let mut total = 0f64;
    while !input.is_empty() {
        let number_len = input
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(input.len());
        if number_len == 0 {
            return None;
        }
        let amount: f64 = input[..number_len].parse().ok()?;
        input = &input[number_len..];

        let unit_len = input
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(input.len());
        let seconds_per_unit = match &input[..unit_len] {
            "h" => 3600.0,
            "m" => 60.0,
            "s" => 1.0,
            "ms" => 0.001,
            _ => return None,
        };
        input = &input[unit_len..];

        total += amount * seconds_per_unit;
    }

    Duration::try_from_secs_f64(total).ok()
}
