//! The flat region index shipped alongside the lookup table: every atlas
//! region with its id, name, category, and description, queryable by id.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use neuroatlas_core::{Region, RegionCategory};

use crate::error::DataError;
use crate::lookup::RegionRecord;

/// All known atlas regions, indexed by id.
#[derive(Debug, Default)]
pub struct RegionIndex {
    regions: Vec<Region>,
    by_id: HashMap<u32, usize>,
}

impl RegionIndex {
    pub fn from_regions(regions: Vec<Region>) -> Self {
        let by_id = regions
            .iter()
            .enumerate()
            .map(|(index, region)| (region.id, index))
            .collect();
        Self { regions, by_id }
    }

    /// Parse the pipeline's region list JSON (an array of region records).
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let records: Vec<RegionRecord> = serde_json::from_str(json)?;
        let regions: Vec<Region> = records.into_iter().map(RegionRecord::into_region).collect();
        debug!(regions = regions.len(), "loaded region index");
        Ok(Self::from_regions(regions))
    }

    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn get(&self, id: u32) -> Option<&Region> {
        self.by_id.get(&id).map(|&index| &self.regions[index])
    }

    pub fn by_category(&self, category: RegionCategory) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(move |r| r.category == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
