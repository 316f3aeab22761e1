//! Country shapes from a TopoJSON world topology.
//!
//! Arc stitching and quantization are handled by the `topojson` crate, which
//! turns the named object into a GeoJSON feature collection. Each polygonal
//! feature is then converted into a `geo` multipolygon.

use std::path::Path;

use geo::{Geometry, MultiPolygon};
use geojson::feature::Id;
use geojson::Feature;
use serde_json::Value as JsonValue;
use thiserror::Error;
use topojson::{to_geojson, TopoJson};
use tracing::debug;

use crate::countries::localized_name;

/// Id and name used by features that carry neither.
pub const UNKNOWN: &str = "Unknown";

/// Errors that can occur while decoding a topology
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("failed to read topology: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid topology: {0}")]
    Parse(String),
    #[error("expected a Topology document")]
    NotTopology,
    #[error("topology has no object named {0:?}")]
    MissingObject(String),
    #[error("invalid geometry: {0}")]
    Geometry(String),
}

/// A country shape with the identifiers the topology gave it.
#[derive(Debug, Clone)]
pub struct CountryFeature {
    pub id: Option<String>,
    pub name: String,
    pub shape: MultiPolygon<f64>,
}

impl CountryFeature {
    /// Spanish official name for the feature, falling back to its own name.
    pub fn display_name(&self) -> String {
        localized_name(self.id.as_deref().unwrap_or(UNKNOWN), &self.name)
    }
}

/// Decode the named object of a TopoJSON document into country features.
///
/// Geometry collections are flattened; only polygonal geometries produce
/// features.
pub fn parse_topology(json: &str, object: &str) -> Result<Vec<CountryFeature>, TopologyError> {
    let topology = match json.parse::<TopoJson>() {
        Ok(TopoJson::Topology(topology)) => topology,
        Ok(_) => return Err(TopologyError::NotTopology),
        Err(e) => return Err(TopologyError::Parse(e.to_string())),
    };
    if !topology.objects.iter().any(|named| named.name == object) {
        return Err(TopologyError::MissingObject(object.to_string()));
    }

    let collection = to_geojson(&topology, &object.to_string())
        .map_err(|e| TopologyError::Parse(e.to_string()))?;

    let mut features = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        if let Some(country) = country_feature(feature)? {
            features.push(country);
        }
    }
    Ok(features)
}

fn country_feature(feature: Feature) -> Result<Option<CountryFeature>, TopologyError> {
    let id = feature_id(&feature);
    let name = feature_name(&feature);

    let Some(geometry) = feature.geometry else {
        return Ok(None);
    };
    let geometry: Geometry<f64> = geometry
        .value
        .try_into()
        .map_err(|e: geojson::Error| TopologyError::Geometry(e.to_string()))?;
    let shape = match geometry {
        Geometry::Polygon(polygon) => polygon.into(),
        Geometry::MultiPolygon(multi) => multi,
        other => {
            debug!("Skipping non-polygonal feature {:?}: {}", id, geometry_kind(&other));
            return Ok(None);
        }
    };

    Ok(Some(CountryFeature { id, name, shape }))
}

// The topology id may surface as the feature id or as a foreign member,
// and may be a string or a number.
fn feature_id(feature: &Feature) -> Option<String> {
    match &feature.id {
        Some(Id::String(s)) => return Some(s.clone()),
        Some(Id::Number(n)) => return Some(n.to_string()),
        None => {}
    }
    match feature.foreign_members.as_ref()?.get("id")? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn feature_name(feature: &Feature) -> String {
    feature
        .properties
        .as_ref()
        .and_then(|p| p.get("name"))
        .and_then(JsonValue::as_str)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}

fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::Line(_) | Geometry::LineString(_) => "LineString",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        _ => "other",
    }
}

pub fn load_topology(path: &Path, object: &str) -> Result<Vec<CountryFeature>, TopologyError> {
    let json = std::fs::read_to_string(path)?;
    let features = parse_topology(&json, object)?;
    debug!("Decoded {} features from {}", features.len(), path.display());
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two unit-less squares sharing the edge x = 0.
    const ADJACENT: &str = r#"{
        "type": "Topology",
        "arcs": [
            [[0, 0], [0, 10]],
            [[0, 10], [-10, 10], [-10, 0], [0, 0]],
            [[0, 0], [10, 0], [10, 10], [0, 10]]
        ],
        "objects": {
            "countries": {
                "type": "GeometryCollection",
                "geometries": [
                    {"type": "Polygon", "id": "410", "properties": {"name": "South Korea"}, "arcs": [[0, 1]]},
                    {"type": "Polygon", "id": 724, "properties": {"name": "Spain"}, "arcs": [[2, -1]]},
                    {"type": "Point", "coordinates": [1, 1]},
                    {"type": "Polygon", "arcs": [[2, -1]]},
                    {"type": "Polygon", "properties": {"name": ""}, "arcs": [[0, 1]]}
                ]
            }
        }
    }"#;

    const QUANTIZED: &str = r#"{
        "type": "Topology",
        "transform": {"scale": [0.5, 0.25], "translate": [100, 50]},
        "arcs": [[[0, 0], [2, 0], [0, 4], [-2, 0], [0, -4]]],
        "objects": {
            "land": {"type": "MultiPolygon", "id": "-99", "arcs": [[[0]]]}
        }
    }"#;

    fn exterior(feature: &CountryFeature) -> Vec<(f64, f64)> {
        feature.shape.0[0]
            .exterior()
            .coords()
            .map(|c| (c.x, c.y))
            .collect()
    }

    #[test]
    fn test_shared_arc_forward_and_reversed() {
        let features = parse_topology(ADJACENT, "countries").unwrap();
        assert_eq!(features.len(), 4);

        assert_eq!(
            exterior(&features[0]),
            vec![(0.0, 0.0), (0.0, 10.0), (-10.0, 10.0), (-10.0, 0.0), (0.0, 0.0)]
        );
        assert_eq!(
            exterior(&features[1]),
            vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]
        );
    }

    #[test]
    fn test_ids_and_names() {
        let features = parse_topology(ADJACENT, "countries").unwrap();
        assert_eq!(features[0].id.as_deref(), Some("410"));
        assert_eq!(features[1].id.as_deref(), Some("724"));
        assert_eq!(features[2].id, None);
        assert_eq!(features[2].name, UNKNOWN);

        assert_eq!(features[0].display_name(), "República de Corea");
        assert_eq!(features[1].display_name(), "España");
        assert_eq!(features[2].display_name(), UNKNOWN);
    }

    #[test]
    fn test_empty_name_falls_back_to_unknown() {
        let features = parse_topology(ADJACENT, "countries").unwrap();
        assert_eq!(features[3].name, UNKNOWN);
        assert_eq!(features[3].display_name(), UNKNOWN);
    }

    fn bare_feature(name: Option<&str>, id: Option<Id>) -> Feature {
        let properties = name.map(|name| {
            let mut map = serde_json::Map::new();
            map.insert("name".to_string(), JsonValue::from(name));
            map
        });
        Feature {
            bbox: None,
            geometry: None,
            id,
            properties,
            foreign_members: None,
        }
    }

    #[test]
    fn test_feature_name_fallbacks() {
        assert_eq!(feature_name(&bare_feature(Some("Kosovo"), None)), "Kosovo");
        assert_eq!(feature_name(&bare_feature(Some(""), None)), UNKNOWN);
        assert_eq!(feature_name(&bare_feature(None, None)), UNKNOWN);
    }

    #[test]
    fn test_feature_id_string_or_number() {
        let numeric = bare_feature(None, Some(Id::Number(serde_json::Number::from(724u16))));
        assert_eq!(feature_id(&numeric).as_deref(), Some("724"));
        let text = bare_feature(None, Some(Id::String("032".to_string())));
        assert_eq!(feature_id(&text).as_deref(), Some("032"));

        let mut foreign = bare_feature(None, None);
        let mut members = serde_json::Map::new();
        members.insert("id".to_string(), JsonValue::from(410));
        foreign.foreign_members = Some(members);
        assert_eq!(feature_id(&foreign).as_deref(), Some("410"));

        assert_eq!(feature_id(&bare_feature(None, None)), None);
    }

    #[test]
    fn test_quantized_arcs_are_delta_decoded() {
        let features = parse_topology(QUANTIZED, "land").unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(
            exterior(&features[0]),
            vec![(100.0, 50.0), (101.0, 50.0), (101.0, 51.0), (100.0, 51.0), (100.0, 50.0)]
        );
        // "-99" is not an ISO code, so the feature keeps its own name
        assert_eq!(features[0].display_name(), UNKNOWN);
    }

    #[test]
    fn test_missing_object() {
        let err = parse_topology(ADJACENT, "land").unwrap_err();
        assert!(matches!(err, TopologyError::MissingObject(name) if name == "land"));
    }

    #[test]
    fn test_not_a_topology() {
        assert!(parse_topology(r#"{"type": "FeatureCollection", "features": []}"#, "countries").is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse_topology("{not json", "countries"),
            Err(TopologyError::Parse(_))
        ));
    }

    #[test]
    fn test_load_topology_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.json");
        std::fs::write(&path, ADJACENT).unwrap();
        assert_eq!(load_topology(&path, "countries").unwrap().len(), 4);
        assert!(matches!(
            load_topology(&dir.path().join("missing.json"), "countries"),
            Err(TopologyError::Io(_))
        ));
    }
}
