//! Import of raw geodata: the river centerline and its surroundings.
//!
//! Two source forms are supported for the river, matching how the upstream
//! data pipeline ships it: a raw GeoJSON feature collection (filtered to one
//! feature id, line geometries flattened in order) and a pre-extracted
//! `{ "path": [[lon, lat], ...] }` object. Surroundings are a JSON array of
//! `{ type, location?, shape?, tags? }` records.
//!
//! Malformed records and samples are skipped, never fatal: one bad record
//! must not abort the import.

use geojson::{GeoJson, Value};
use riverworld_common::{GeoPoint, RenderPoint};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::normalize::PathNormalizer;
use crate::project::project;

/// Errors from reading and parsing geodata files.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("invalid GeoJSON: {0}")]
    Geojson(String),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Overlay categories the engine consumes. Everything else is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Village,
    Allotments,
    Forest,
}

impl FeatureKind {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "village" => Some(Self::Village),
            "allotments" => Some(Self::Allotments),
            "forest" => Some(Self::Forest),
            _ => None,
        }
    }
}

/// A geographic overlay item (settlement or forest) in render space.
///
/// Carries either a single `location` or a polygon/line `shape`, normalized
/// against the river path's origin so it shares the path's render space.
/// `tags` is opaque passthrough from the source data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentFeature {
    pub kind: FeatureKind,
    pub location: Option<RenderPoint>,
    pub shape: Option<Vec<RenderPoint>>,
    pub tags: serde_json::Value,
}

/// Parse a raw GeoJSON feature collection into an ordered geographic path.
///
/// Only features whose `@id` property equals `feature_id` contribute.
/// `LineString` and `MultiLineString` geometries are flattened into one
/// ordered coordinate sequence; elevation values are ignored.
pub fn parse_river_geojson(text: &str, feature_id: &str) -> Result<Vec<GeoPoint>, ImportError> {
    let geojson: GeoJson = text
        .parse()
        .map_err(|e| ImportError::Geojson(format!("{e}")))?;

    let features = match geojson {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(_) => {
            return Err(ImportError::Geojson(
                "expected a feature collection".into(),
            ));
        }
    };

    let mut path = Vec::new();
    for feature in features {
        let id = feature
            .properties
            .as_ref()
            .and_then(|p| p.get("@id"))
            .and_then(|v| v.as_str());
        if id != Some(feature_id) {
            continue;
        }
        let Some(geometry) = feature.geometry else {
            continue;
        };
        match geometry.value {
            Value::LineString(coords) => push_samples(&mut path, &coords),
            Value::MultiLineString(lines) => {
                for coords in &lines {
                    push_samples(&mut path, coords);
                }
            }
            _ => {}
        }
    }

    tracing::info!(points = path.len(), feature_id, "imported river path");
    Ok(path)
}

/// Parse a pre-extracted `{ "path": [[lon, lat], ...] }` object.
///
/// A third (elevation) element per sample is ignored; samples with fewer
/// than two elements are skipped.
pub fn parse_extracted_path(text: &str) -> Result<Vec<GeoPoint>, ImportError> {
    #[derive(Deserialize)]
    struct Extracted {
        path: Vec<Vec<f64>>,
    }

    let extracted: Extracted = serde_json::from_str(text)?;
    let mut path = Vec::new();
    push_samples(&mut path, &extracted.path);
    tracing::info!(points = path.len(), "imported extracted river path");
    Ok(path)
}

/// Parse surroundings records and bring them into the path's render space.
///
/// Records with an unknown `type`, with neither `location` nor `shape`, or
/// that fail to deserialize are skipped and counted, never fatal.
pub fn parse_environment(
    text: &str,
    normalizer: &PathNormalizer,
) -> Result<Vec<EnvironmentFeature>, ImportError> {
    #[derive(Deserialize)]
    struct RawRecord {
        #[serde(rename = "type")]
        kind: String,
        #[serde(default)]
        location: Option<Vec<f64>>,
        #[serde(default)]
        shape: Option<Vec<Vec<f64>>>,
        #[serde(default)]
        tags: serde_json::Value,
    }

    let records: Vec<serde_json::Value> = serde_json::from_str(text)?;
    let mut features = Vec::new();
    let mut skipped = 0usize;

    for record in records {
        let raw: RawRecord = match serde_json::from_value(record) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed surroundings record");
                skipped += 1;
                continue;
            }
        };
        let Some(kind) = FeatureKind::parse(&raw.kind) else {
            tracing::debug!(kind = %raw.kind, "skipping surroundings record of unknown type");
            skipped += 1;
            continue;
        };

        let location = raw
            .location
            .as_deref()
            .and_then(|c| sample(c))
            .map(|g| normalizer.point(project(g)));
        let shape = raw.shape.map(|points| {
            points
                .iter()
                .filter_map(|c| sample(c))
                .map(|g| normalizer.point(project(g)))
                .collect::<Vec<_>>()
        });

        if location.is_none() && shape.as_ref().is_none_or(|s| s.is_empty()) {
            tracing::debug!("skipping surroundings record with no usable geometry");
            skipped += 1;
            continue;
        }

        features.push(EnvironmentFeature {
            kind,
            location,
            shape,
            tags: raw.tags,
        });
    }

    tracing::info!(
        features = features.len(),
        skipped,
        "imported river surroundings"
    );
    Ok(features)
}

/// File wrapper around [`parse_river_geojson`].
pub fn import_river_geojson(path: &Path, feature_id: &str) -> Result<Vec<GeoPoint>, ImportError> {
    let text = read(path)?;
    parse_river_geojson(&text, feature_id)
}

/// File wrapper around [`parse_extracted_path`].
pub fn import_extracted_path(path: &Path) -> Result<Vec<GeoPoint>, ImportError> {
    let text = read(path)?;
    parse_extracted_path(&text)
}

/// File wrapper around [`parse_environment`].
pub fn import_environment(
    path: &Path,
    normalizer: &PathNormalizer,
) -> Result<Vec<EnvironmentFeature>, ImportError> {
    let text = read(path)?;
    parse_environment(&text, normalizer)
}

fn read(path: &Path) -> Result<String, ImportError> {
    std::fs::read_to_string(path).map_err(|e| ImportError::Io(path.to_path_buf(), e))
}

fn sample(coords: &[f64]) -> Option<GeoPoint> {
    if coords.len() < 2 {
        return None;
    }
    Some(GeoPoint::new(coords[0], coords[1]))
}

fn push_samples(path: &mut Vec<GeoPoint>, coords: &[Vec<f64>]) {
    for c in coords {
        match sample(c) {
            Some(g) => path.push(g),
            None => tracing::debug!("skipping malformed coordinate sample"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riverworld_common::PlanarPoint;

    const RIVER_GEOJSON: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "@id": "relation/7814035", "name": "river" },
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[9.0, 48.0], [9.001, 48.001]]
                }
            },
            {
                "type": "Feature",
                "properties": { "@id": "relation/999", "name": "other" },
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[1.0, 1.0]]
                }
            },
            {
                "type": "Feature",
                "properties": { "@id": "relation/7814035" },
                "geometry": {
                    "type": "MultiLineString",
                    "coordinates": [
                        [[9.002, 48.002]],
                        [[9.003, 48.003], [9.004, 48.004]]
                    ]
                }
            }
        ]
    }"#;

    #[test]
    fn river_geojson_filters_and_flattens() {
        let path = parse_river_geojson(RIVER_GEOJSON, "relation/7814035").unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], GeoPoint::new(9.0, 48.0));
        assert_eq!(path[2], GeoPoint::new(9.002, 48.002));
        assert_eq!(path[4], GeoPoint::new(9.004, 48.004));
    }

    #[test]
    fn river_geojson_unmatched_id_gives_empty_path() {
        let path = parse_river_geojson(RIVER_GEOJSON, "relation/0").unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn extracted_path_ignores_elevation_and_bad_samples() {
        let text = r#"{ "path": [[9.0, 48.0, 231.5], [9.001], [9.002, 48.002]] }"#;
        let path = parse_extracted_path(text).unwrap();
        assert_eq!(path, vec![GeoPoint::new(9.0, 48.0), GeoPoint::new(9.002, 48.002)]);
    }

    #[test]
    fn environment_records_are_normalized_and_filtered() {
        let text = r#"[
            { "type": "village", "location": [0.0, 0.0], "tags": { "name": "Besigheim" } },
            { "type": "forest", "shape": [[0.0, 0.0], [0.0, 0.0]] },
            { "type": "river", "location": [1.0, 1.0] },
            { "type": "village" },
            { "type": "village", "location": "not coordinates" }
        ]"#;
        let normalizer = PathNormalizer::new(PlanarPoint::new(0.0, 0.0), 10.0);
        let features = parse_environment(text, &normalizer).unwrap();

        assert_eq!(features.len(), 2);
        assert_eq!(features[0].kind, FeatureKind::Village);
        assert_eq!(features[0].location, Some(RenderPoint::new(0.0, 0.0)));
        assert_eq!(features[0].tags["name"], "Besigheim");
        assert_eq!(features[1].kind, FeatureKind::Forest);
        assert_eq!(features[1].shape.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn environment_locations_share_the_path_origin() {
        let origin = project(GeoPoint::new(9.0, 48.0));
        let normalizer = PathNormalizer::new(origin, 10.0);
        let text = r#"[{ "type": "village", "location": [9.0, 48.0] }]"#;
        let features = parse_environment(text, &normalizer).unwrap();
        let loc = features[0].location.unwrap();
        assert!(loc.x.abs() < 1e-9);
        assert!(loc.z.abs() < 1e-9);
    }
}
