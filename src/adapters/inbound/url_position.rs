//! URL Position
//!
//! Reads the selected map point from the `lat`/`lng` query parameters of
//! the current location.

use crate::domain::value_objects::Coordinate;
use reqwest::Url;

/// Base used to parse bare query strings.
const QUERY_BASE: &str = "http://localhost/app/form";

/// Parser for the `?lat=..&lng=..` position of a location.
pub struct UrlPosition;

impl UrlPosition {
    /// Parse a coordinate from a full URL, a path with a query, or a bare
    /// query string.
    ///
    /// Missing, empty or non-numeric parameters become absent components.
    ///
    /// # Examples
    /// ```
    /// use worldwise::adapters::inbound::UrlPosition;
    ///
    /// let coord = UrlPosition::parse("http://localhost:5173/app/form?lat=48.85&lng=2.35");
    /// assert_eq!(coord.pair(), Some((48.85, 2.35)));
    ///
    /// let coord = UrlPosition::parse("lat=48.85");
    /// assert!(!coord.is_selected());
    /// ```
    pub fn parse(location: &str) -> Coordinate {
        let location = location.trim();
        let url = match Url::parse(location) {
            Ok(url) => url,
            Err(_) => {
                let query = location
                    .split_once('?')
                    .map_or(location, |(_, query)| query);
                match Url::parse(&format!("{}?{}", QUERY_BASE, query)) {
                    Ok(url) => url,
                    Err(e) => {
                        tracing::debug!("unparseable location {:?}: {}", location, e);
                        return Coordinate::absent();
                    }
                }
            }
        };

        Self::from_url(&url)
    }

    /// Extract the coordinate from a parsed URL.
    pub fn from_url(url: &Url) -> Coordinate {
        let mut coordinate = Coordinate::absent();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "lat" => coordinate.latitude = parse_component(&value),
                "lng" => coordinate.longitude = parse_component(&value),
                _ => {}
            }
        }
        coordinate
    }
}

fn parse_component(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
