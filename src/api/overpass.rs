use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::BookError;
use crate::geometry::GeoBounds;

const OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
const USER_AGENT: &str = "fairbook/0.1.0 (https://github.com/shantanugoel/fairbook)";

/// Raw Overpass API response
#[derive(Debug, Deserialize, Default)]
pub struct OverpassResponse {
    pub elements: Vec<Element>,
}

/// A single element from Overpass (node or way)
#[derive(Debug, Deserialize, Clone)]
pub struct Element {
    #[serde(rename = "type")]
    pub type_: String,
    pub id: u64,
    #[serde(default)]
    pub nodes: Option<Vec<u64>>,
    #[serde(default)]
    pub tags: Option<HashMap<String, String>>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

impl Element {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.as_ref().and_then(|t| t.get(key)).map(String::as_str)
    }
}

/// The geographic data collaborator: everything the pipeline needs from the
/// outside world is a bounding-box query for golf ways and nodes.
///
/// Both operations are synchronous and are not retried; a failure aborts the
/// whole run since no hole can render without the data.
pub trait GolfSource {
    /// All `golf=hole` ways (with their nodes) inside the box.
    fn holes_in(&self, bounds: &GeoBounds) -> Result<OverpassResponse, BookError>;

    /// All golf-relevant ways and nodes inside the box: every `golf=*` way
    /// plus woods, forests, open water and individual trees.
    fn features_in(&self, bounds: &GeoBounds) -> Result<OverpassResponse, BookError>;
}

/// Live Overpass implementation of [`GolfSource`].
pub struct OverpassSource {
    client: reqwest::blocking::Client,
    url: String,
}

impl OverpassSource {
    pub fn new() -> Result<Self, BookError> {
        Self::with_url(OVERPASS_URL)
    }

    pub fn with_url(url: &str) -> Result<Self, BookError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(200))
            .build()
            .map_err(|e| BookError::DataFetch(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    fn execute(&self, query: &str) -> Result<OverpassResponse, BookError> {
        // Overpass expects form-encoded POST data: data=<query>
        let response = self
            .client
            .post(&self.url)
            .form(&[("data", query)])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(BookError::DataFetch(format!(
                "Overpass API returned status {status}; the servers may be too busy right now, try again later"
            )));
        }

        let parsed = response
            .json()
            .map_err(|e| BookError::DataFetch(format!("failed to parse Overpass response: {e}")))?;
        Ok(parsed)
    }
}

/// Coordinate string in Overpass order: south, west, north, east.
fn coord_string(b: &GeoBounds) -> String {
    format!("{},{},{},{}", b.south, b.west, b.north, b.east)
}

impl GolfSource for OverpassSource {
    fn holes_in(&self, bounds: &GeoBounds) -> Result<OverpassResponse, BookError> {
        let bbox = coord_string(bounds);
        let query = format!(
            r#"[out:json][timeout:180];
(
  way["golf"="hole"]({bbox});
);
out body;
>;
out skel qt;"#
        );
        self.execute(&query)
    }

    fn features_in(&self, bounds: &GeoBounds) -> Result<OverpassResponse, BookError> {
        let bbox = coord_string(bounds);
        let query = format!(
            r#"[out:json][timeout:180];
(
  way["golf"]({bbox});
  way["natural"="wood"]({bbox});
  way["natural"="water"]({bbox});
  way["landuse"="forest"]({bbox});
  node["natural"="tree"]({bbox});
);
out body;
>;
out skel qt;"#
        );
        self.execute(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_string_order() {
        let b = GeoBounds::new(30.2286, -97.7114, 30.2448, -97.7018);
        assert_eq!(coord_string(&b), "30.2286,-97.7114,30.2448,-97.7018");
    }

    #[test]
    fn test_parse_overpass_response() {
        let json = r#"{
            "elements": [
                {"type": "node", "id": 1, "lat": 30.23, "lon": -97.71, "tags": {"natural": "tree"}},
                {"type": "way", "id": 2, "nodes": [1, 3], "tags": {"golf": "hole", "ref": "4", "par": "4"}}
            ]
        }"#;

        let response: OverpassResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.elements.len(), 2);
        assert_eq!(response.elements[0].tag("natural"), Some("tree"));
        assert_eq!(response.elements[1].tag("par"), Some("4"));
        assert_eq!(response.elements[1].tag("golf"), Some("hole"));
    }
}
