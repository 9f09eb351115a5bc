//! Loader for the sparse region lookup table.
//!
//! The atlas pipeline precomputes region lists on a 2 mm grid and stores
//! them keyed by `"x,y,z"` strings; subcortical atlas ids are offset by
//! +1000 so the two Harvard-Oxford label sets never collide. The table is
//! large (on the order of 10^5 keys), so key parsing and record conversion
//! run in parallel.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rayon::prelude::*;
use serde::Deserialize;
use tracing::{debug, warn};

use neuroatlas_core::{Coordinate, Region, RegionCategory, RegionTable};

use crate::error::DataError;

/// One region entry as stored in the lookup table and region list files.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionRecord {
    pub id: u32,
    pub name: String,
    pub category: RegionCategory,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl RegionRecord {
    /// Convert to a core region, refining the coarse atlas category.
    ///
    /// The subcortical label set lumps white matter and the ventricles in
    /// with grey-matter structures; pull those out by name.
    pub fn into_region(self) -> Region {
        let category = match self.category {
            RegionCategory::Subcortical if self.name.contains("White Matter") => {
                RegionCategory::WhiteMatter
            }
            RegionCategory::Subcortical if self.name.contains("Ventricle") => RegionCategory::Csf,
            other => other,
        };
        Region {
            id: self.id,
            name: self.name,
            category,
            probability: self.probability,
            description: self.description,
        }
    }
}

/// Parse a `"x,y,z"` lookup key.
fn parse_key(key: &str) -> Option<Coordinate> {
    let mut parts = key.split(',');
    let x = parts.next()?.trim().parse().ok()?;
    let y = parts.next()?.trim().parse().ok()?;
    let z = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Coordinate::new(x, y, z))
}

/// Build a region table from the lookup JSON contents.
///
/// Malformed keys are skipped with a warning; they never fail the load.
pub fn table_from_json(json: &str, resolution: u32) -> crate::Result<RegionTable> {
    let raw: HashMap<String, Vec<RegionRecord>> = serde_json::from_str(json)?;
    let entries: HashMap<Coordinate, Vec<Region>> = raw
        .into_par_iter()
        .filter_map(|(key, records)| match parse_key(&key) {
            Some(coordinate) => {
                let regions = records.into_iter().map(RegionRecord::into_region).collect();
                Some((coordinate, regions))
            }
            None => {
                warn!(%key, "skipping malformed lookup key");
                None
            }
        })
        .collect();
    debug!(entries = entries.len(), resolution, "loaded region lookup table");
    Ok(RegionTable::from_entries(resolution, entries)?)
}

/// Load a region table from a lookup JSON file on disk.
pub fn table_from_file(path: impl AsRef<Path>, resolution: u32) -> crate::Result<RegionTable> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    table_from_json(&json, resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuroatlas_core::RegionSource;

    const LOOKUP_JSON: &str = r#"{
        "10,10,10": [
            {"id": 7, "name": "Precentral Gyrus", "category": "cortical", "probability": 1.0}
        ],
        "-2,-126,8": [
            {"id": 7, "name": "Precentral Gyrus", "category": "cortical", "probability": 1.0},
            {"id": 1001, "name": "Left Cerebral White Matter", "category": "subcortical", "probability": 1.0}
        ],
        "0,0,0": [
            {"id": 1003, "name": "Left Lateral Ventricle", "category": "subcortical"}
        ],
        "not-a-key": [
            {"id": 1, "name": "Frontal Pole", "category": "cortical"}
        ],
        "1,2": [
            {"id": 1, "name": "Frontal Pole", "category": "cortical"}
        ]
    }"#;

    #[test]
    fn parses_keys_and_skips_malformed_ones() {
        let table = table_from_json(LOOKUP_JSON, 2).unwrap();
        assert_eq!(table.len(), 3);
        assert!(table.get(&Coordinate::new(10, 10, 10)).is_some());
        assert!(table.get(&Coordinate::new(-2, -126, 8)).is_some());
    }

    #[test]
    fn refines_white_matter_and_csf_categories() {
        let table = table_from_json(LOOKUP_JSON, 2).unwrap();

        let regions = table.get(&Coordinate::new(-2, -126, 8)).unwrap();
        assert_eq!(regions[0].category, RegionCategory::Cortical);
        assert_eq!(regions[1].id, 1001);
        assert_eq!(regions[1].category, RegionCategory::WhiteMatter);

        let regions = table.get(&Coordinate::ORIGIN).unwrap();
        assert_eq!(regions[0].category, RegionCategory::Csf);
        assert_eq!(regions[0].probability, None);
    }

    #[test]
    fn resolves_through_the_loaded_table() {
        let table = table_from_json(LOOKUP_JSON, 2).unwrap();
        let regions = table.resolve(Coordinate::new(11, 11, 11));
        assert_eq!(regions[0].id, 7);
    }

    #[test]
    fn key_parser_rejects_garbage() {
        assert_eq!(parse_key("10,-126,108"), Some(Coordinate::new(10, -126, 108)));
        assert_eq!(parse_key("10, -126, 108"), Some(Coordinate::new(10, -126, 108)));
        assert_eq!(parse_key("10,10"), None);
        assert_eq!(parse_key("10,10,10,10"), None);
        assert_eq!(parse_key("a,b,c"), None);
        assert_eq!(parse_key(""), None);
    }
}
