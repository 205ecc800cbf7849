use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use crate::entities::Coordinates;

const EXTRACTION_FAILURE_MESSAGE: &str =
    "Could not parse coordinates from the provided Google Maps URL.";

/// Raised when no coordinate pair can be read from a map link.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ExtractionFailure {
    message: String,
}

impl ExtractionFailure {
    fn new() -> Self {
        Self {
            message: EXTRACTION_FAILURE_MESSAGE.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

type Strategy = fn(&str) -> Option<Coordinates>;

/// Tried in order, first hit wins. The `@` pattern has to run before any URL
/// parsing since links without a scheme still carry it.
const STRATEGIES: [Strategy; 2] = [from_at_pattern, from_query_param];

/// Reads a `(lat, lng)` pair out of a Google Maps link.
///
/// Supports `.../@11.2588,75.7804,15z` style paths and `?q=11.2588,75.7804`
/// query strings. Values are returned verbatim, without range checks.
pub fn extract_coordinates(url: &str) -> Result<Coordinates, ExtractionFailure> {
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(url))
        .ok_or_else(ExtractionFailure::new)
}

fn at_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"@(-?[0-9]+\.[0-9]+),(-?[0-9]+\.[0-9]+)").expect("valid @lat,lng pattern")
    })
}

fn leading_number() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
            .expect("valid number pattern")
    })
}

fn from_at_pattern(url: &str) -> Option<Coordinates> {
    let captures = at_pattern().captures(url)?;

    let lat = parse_finite(captures.get(1)?.as_str())?;
    let lng = parse_finite(captures.get(2)?.as_str())?;

    Some(Coordinates { lat, lng })
}

fn from_query_param(url: &str) -> Option<Coordinates> {
    let url = Url::parse(url).ok()?;
    let (_, q) = url.query_pairs().find(|(key, _)| key == "q")?;

    let mut parts = q.split(',');
    let lat = parse_lenient(parts.next()?)?;
    let lng = parse_lenient(parts.next()?)?;

    Some(Coordinates { lat, lng })
}

fn parse_finite(number: &str) -> Option<f64> {
    number
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parses the longest numeric prefix after leading whitespace, so `" 75.78"`
/// and `"75.78abc"` both read as `75.78`.
fn parse_lenient(part: &str) -> Option<f64> {
    let number = leading_number().find(part.trim_start())?;

    parse_finite(number.as_str())
}
