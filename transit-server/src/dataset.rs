//! GeoJSON dataset loading.
//!
//! Stops come from Point features with a `name` property. Corridors come
//! from LineString or MultiLineString features whose id is the `ref`
//! property, or `name` when `ref` is missing. Features that cannot be used
//! are skipped with a debug log; a file that cannot be read or is not a
//! FeatureCollection is an error.

use std::path::{Path, PathBuf};

use geo::{Geometry, LineString};
use geojson::{Feature, GeoJson};
use serde_json::Value as JsonValue;
use tracing::{debug, info};

use crate::domain::{CorridorFeature, CorridorId, StopFeature};

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Load stop points.
pub fn load_stops(path: &Path) -> Result<Vec<StopFeature>, DatasetError> {
    let features = read_features(path)?;
    let total = features.len();

    let stops: Vec<StopFeature> = features
        .into_iter()
        .enumerate()
        .filter_map(|(n, feature)| {
            let name = string_property(&feature, "name");
            match feature_geometry(feature) {
                Some(Geometry::Point(location)) => Some(StopFeature { name, location }),
                _ => {
                    debug!(path = %path.display(), feature = n, "skipping stop without point geometry");
                    None
                }
            }
        })
        .collect();

    info!(path = %path.display(), stops = stops.len(), skipped = total - stops.len(), "loaded stops");
    Ok(stops)
}

/// Load corridor polylines. A MultiLineString yields one feature per part.
pub fn load_corridors(path: &Path) -> Result<Vec<CorridorFeature>, DatasetError> {
    let features = read_features(path)?;
    let total = features.len();
    let mut corridors = Vec::with_capacity(total);

    for (n, feature) in features.into_iter().enumerate() {
        let id = string_property(&feature, "ref")
            .or_else(|| string_property(&feature, "name"))
            .and_then(|s| CorridorId::parse(&s).ok());
        let Some(corridor) = id else {
            debug!(path = %path.display(), feature = n, "skipping corridor without ref or name");
            continue;
        };

        let lines: Vec<LineString<f64>> = match feature_geometry(feature) {
            Some(Geometry::LineString(line)) => vec![line],
            Some(Geometry::MultiLineString(multi)) => multi.0,
            _ => {
                debug!(path = %path.display(), feature = n, "skipping corridor without line geometry");
                continue;
            }
        };

        corridors.extend(
            lines
                .into_iter()
                .filter(|line| line.0.len() >= 2)
                .map(|line| CorridorFeature {
                    corridor: corridor.clone(),
                    line,
                }),
        );
    }

    info!(path = %path.display(), features = total, lines = corridors.len(), "loaded corridors");
    Ok(corridors)
}

fn read_features(path: &Path) -> Result<Vec<Feature>, DatasetError> {
    let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let geojson = text
        .parse::<GeoJson>()
        .map_err(|e| DatasetError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    match geojson {
        GeoJson::FeatureCollection(collection) => Ok(collection.features),
        _ => Err(DatasetError::Parse {
            path: path.to_path_buf(),
            message: "expected a FeatureCollection".to_string(),
        }),
    }
}

fn feature_geometry(feature: Feature) -> Option<Geometry<f64>> {
    feature.geometry.and_then(|g| Geometry::try_from(g).ok())
}

/// A string or numeric property as a string.
fn string_property(feature: &Feature, key: &str) -> Option<String> {
    match feature.property(key)? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
