//! Core data types shared by the parsers and the resolver

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A complete geographic coordinate
///
/// Latitude and longitude are always present together; a partially
/// parsed coordinate never becomes a `Point`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Latitude in decimal degrees
    pub latitude: f64,

    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Point {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a point only when both components are present
    #[must_use]
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Self::new(latitude, longitude)),
            _ => None,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Result of one resolution: a label and, when found, its coordinates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Human-readable entity label (`rdfs:label`)
    pub label: Option<String>,

    /// Resolved coordinates
    pub point: Option<Point>,
}

impl Location {
    #[must_use]
    pub fn new(label: Option<String>, point: Option<Point>) -> Self {
        Self { label, point }
    }

    /// A location with neither label nor coordinates
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Both the label and the coordinates are known
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.label.is_some() && self.point.is_some()
    }

    /// Split into the `(label, (latitude, longitude))` shape
    #[must_use]
    pub fn into_parts(self) -> (Option<String>, (Option<f64>, Option<f64>)) {
        let coords = match self.point {
            Some(p) => (Some(p.latitude), Some(p.longitude)),
            None => (None, None),
        };
        (self.label, coords)
    }
}

/// URLs already attempted during one top-level resolution
///
/// Created fresh for every top-level call and threaded through the
/// recursive relation traversal.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a URL, returning `false` when it was already present
    pub fn insert(&mut self, url: &str) -> bool {
        self.urls.insert(url.to_string())
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_from_parts() {
        assert_eq!(
            Point::from_parts(Some(12.34), Some(56.78)),
            Some(Point::new(12.34, 56.78))
        );
        assert_eq!(Point::from_parts(Some(12.34), None), None);
        assert_eq!(Point::from_parts(None, Some(56.78)), None);
    }

    #[test]
    fn test_location_into_parts() {
        let location = Location::new(Some("Berlin".to_string()), Some(Point::new(52.5, 13.4)));
        assert!(location.is_complete());
        assert_eq!(
            location.into_parts(),
            (Some("Berlin".to_string()), (Some(52.5), Some(13.4)))
        );

        let (label, coords) = Location::new(Some("Nowhere".to_string()), None).into_parts();
        assert_eq!(label.as_deref(), Some("Nowhere"));
        assert_eq!(coords, (None, None));
    }

    #[test]
    fn test_visited_set() {
        let mut visited = VisitedSet::new();
        assert!(visited.is_empty());
        assert!(visited.insert("http://wiki.example.org/wiki/A"));
        assert!(!visited.insert("http://wiki.example.org/wiki/A"));
        assert!(visited.contains("http://wiki.example.org/wiki/A"));
        assert_eq!(visited.len(), 1);
    }
}
