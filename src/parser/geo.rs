//! Coordinate text parsing
//!
//! Extracts a latitude/longitude pair from the free text of a semantic
//! attribute value. Supported forms:
//! - Decimal degrees: `12.34, 56.78`, `-33.86;151.21`, `12.34 56.78`
//! - Degrees/minutes/seconds: `52°31'12"N, 13°24'36"E`
//! - Hemisphere prefixes or suffixes: `N 52.52 E 13.40`, `33.86 S 151.21 E`

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Regex source for one coordinate component
///
/// The hemisphere letter is either a prefix or a suffix, never both, so
/// that `N 52.5 E 13.4` and `52.5 N 13.4 E` split unambiguously.
fn component(prefix: &str, hemisphere_first: bool) -> String {
    let hemi = format!(r"(?P<{prefix}_hemi>[NSEWnsew])");
    let body = format!(
        r#"(?P<{prefix}_deg>[+-]?\d+(?:\.\d+)?)\s*(?:°|º)?\s*(?:(?P<{prefix}_min>\d+(?:\.\d+)?)\s*['′]\s*)?(?:(?P<{prefix}_sec>\d+(?:\.\d+)?)\s*["″]\s*)?"#
    );
    if hemisphere_first {
        format!(r"{hemi}?\s*{body}")
    } else {
        format!(r"{body}{hemi}?")
    }
}

fn pair(hemisphere_first: bool) -> Regex {
    Regex::new(&format!(
        r"^\s*{}(?:\s*[,;]\s*|\s+){}\s*$",
        component("a", hemisphere_first),
        component("b", hemisphere_first)
    ))
    .expect("Invalid coordinate regex")
}

lazy_static! {
    static ref SUFFIX_PAIR: Regex = pair(false);
    static ref PREFIX_PAIR: Regex = pair(true);
}

/// One parsed coordinate component with its optional hemisphere letter
struct Component {
    value: f64,
    hemisphere: Option<char>,
}

impl Component {
    fn from_captures(caps: &Captures<'_>, prefix: &str) -> Option<Self> {
        let group = |name: &str| caps.name(&format!("{prefix}_{name}")).map(|m| m.as_str());

        let degrees_text = group("deg")?;
        let degrees: f64 = degrees_text.parse().ok()?;
        let minutes: f64 = group("min").map_or(Some(0.0), |m| m.parse().ok())?;
        let seconds: f64 = group("sec").map_or(Some(0.0), |s| s.parse().ok())?;

        if minutes >= 60.0 || seconds >= 60.0 {
            return None;
        }

        let hemisphere = group("hemi")
            .and_then(|h| h.chars().next())
            .map(|c| c.to_ascii_uppercase());

        let magnitude = degrees.abs() + minutes / 60.0 + seconds / 3600.0;
        let negative = degrees_text.starts_with('-') || matches!(hemisphere, Some('S' | 'W'));

        Some(Self {
            value: if negative { -magnitude } else { magnitude },
            hemisphere,
        })
    }

    fn is_longitude(&self) -> bool {
        matches!(self.hemisphere, Some('E' | 'W'))
    }

    fn is_latitude(&self) -> bool {
        matches!(self.hemisphere, Some('N' | 'S'))
    }
}

/// Parse a coordinate string into `(latitude, longitude)`
///
/// Each component is `None` when it cannot be parsed or lies outside the
/// valid range (±90 for latitude, ±180 for longitude). Unparseable text
/// yields `(None, None)`.
///
/// # Examples
///
/// ```
/// use smwgeo::parser::geo::parse_geo;
///
/// assert_eq!(parse_geo("12.34, 56.78"), (Some(12.34), Some(56.78)));
/// assert_eq!(parse_geo("somewhere"), (None, None));
/// ```
pub fn parse_geo(text: &str) -> (Option<f64>, Option<f64>) {
    let Some(caps) = SUFFIX_PAIR
        .captures(text)
        .or_else(|| PREFIX_PAIR.captures(text))
    else {
        return (None, None);
    };

    let first = Component::from_captures(&caps, "a");
    let second = Component::from_captures(&caps, "b");

    // "13.4 E, 52.5 N" names longitude first
    let swapped = match (&first, &second) {
        (Some(a), _) if a.is_longitude() => true,
        (_, Some(b)) => b.is_latitude(),
        _ => false,
    };
    let (latitude, longitude) = if swapped {
        (second, first)
    } else {
        (first, second)
    };

    let latitude = latitude
        .map(|c| c.value)
        .filter(|v| (-90.0..=90.0).contains(v));
    let longitude = longitude
        .map(|c| c.value)
        .filter(|v| (-180.0..=180.0).contains(v));

    (latitude, longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: Option<f64>, expected: f64) -> bool {
        actual.is_some_and(|v| (v - expected).abs() < 1e-6)
    }

    #[test]
    fn test_decimal_pairs() {
        assert_eq!(parse_geo("12.34, 56.78"), (Some(12.34), Some(56.78)));
        assert_eq!(parse_geo("-33.86;151.21"), (Some(-33.86), Some(151.21)));
        assert_eq!(parse_geo("  12.34 56.78  "), (Some(12.34), Some(56.78)));
        assert_eq!(parse_geo("52,13"), (Some(52.0), Some(13.0)));
    }

    #[test]
    fn test_degrees_minutes_seconds() {
        let (lat, lon) = parse_geo("52°31'12\"N, 13°24'36\"E");
        assert!(approx(lat, 52.52));
        assert!(approx(lon, 13.41));

        let (lat, lon) = parse_geo("33°52′ S 151°12′ E");
        assert!(approx(lat, -(33.0 + 52.0 / 60.0)));
        assert!(approx(lon, 151.2));
    }

    #[test]
    fn test_hemisphere_letters() {
        assert_eq!(parse_geo("N 52.5 E 13.4"), (Some(52.5), Some(13.4)));
        assert_eq!(parse_geo("33.86 S, 151.21 E"), (Some(-33.86), Some(151.21)));
        assert_eq!(parse_geo("0.5 n 10.25 w"), (Some(0.5), Some(-10.25)));
    }

    #[test]
    fn test_longitude_first() {
        assert_eq!(parse_geo("13.4 E, 52.5 N"), (Some(52.5), Some(13.4)));
    }

    #[test]
    fn test_out_of_range_components() {
        assert_eq!(parse_geo("95.0, 10.0"), (None, Some(10.0)));
        assert_eq!(parse_geo("45.0, 200.0"), (Some(45.0), None));
        assert_eq!(parse_geo("52°75'N, 13°E"), (None, Some(13.0)));
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_geo(""), (None, None));
        assert_eq!(parse_geo("Berlin"), (None, None));
        assert_eq!(parse_geo("12.34"), (None, None));
        assert_eq!(parse_geo("12.34, 56.78, 90.12"), (None, None));
    }
}
