//! ISO-8601 durations as returned by the YouTube Data API.

use regex::Regex;
use std::sync::LazyLock;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$").expect("Invalid regex")
});

/// Convert a duration such as `PT3M30S` to whole seconds.
///
/// Anything that does not match yields 0, which keeps the video out of
/// the lesson-length window.
pub fn parse_duration(duration: &str) -> u64 {
    let Some(caps) = DURATION_RE.captures(duration.trim()) else {
        return 0;
    };

    let part = |i: usize| -> u64 {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };

    // Overflowing components count as unrecognised
    [(1, 86_400), (2, 3600), (3, 60), (4, 1)]
        .into_iter()
        .try_fold(0u64, |total, (i, unit)| {
            part(i).checked_mul(unit)?.checked_add(total)
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("PT3M30S"), 210);
        assert_eq!(parse_duration("PT1H"), 3600);
        assert_eq!(parse_duration("PT45S"), 45);
        assert_eq!(parse_duration("PT1H2M3S"), 3723);
        assert_eq!(parse_duration("PT10M"), 600);
        assert_eq!(parse_duration("P1DT1S"), 86_401);
    }

    #[test]
    fn test_unrecognised_durations_are_zero() {
        assert_eq!(parse_duration(""), 0);
        assert_eq!(parse_duration("PT"), 0);
        assert_eq!(parse_duration("P0D"), 0);
        assert_eq!(parse_duration("three minutes"), 0);
        assert_eq!(parse_duration("3:30"), 0);
    }

    #[test]
    fn test_oversized_components_are_zero() {
        assert_eq!(parse_duration("PT99999999999999999H"), 0);
        assert_eq!(parse_duration("P999999999999999999DT1S"), 0);
        assert_eq!(parse_duration(&format!("PT{}S", u64::MAX)), u64::MAX);
    }
}
