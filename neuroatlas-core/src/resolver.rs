//! Coordinate-to-region resolution over a sparse lookup table.
//!
//! The atlas is defined only at discrete grid points (2 mm for the shipped
//! Harvard-Oxford table) while the user can tap at arbitrary integer-mm
//! positions, so resolution runs a tiered search: exact key, parity-aligned
//! key, a fixed 12-point neighbourhood, then the nearest grid point, and
//! finally the background sentinel. Exact and near-exact matches are
//! preferred over blind snapping so points near a region boundary are not
//! misclassified.

use std::collections::HashMap;

use tracing::trace;

use crate::coordinate::Coordinate;
use crate::error::CoreError;
use crate::region::Region;

/// Neighbourhood probe offsets in grid steps: the six axis-aligned
/// neighbours first, then the six same-sign face diagonals. Resolution
/// takes the first non-empty hit in this order; ties are broken by the
/// order itself, not by distance.
const PROBE_OFFSETS: [(i32, i32, i32); 12] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
    (1, 1, 0),
    (-1, -1, 0),
    (1, 0, 1),
    (-1, 0, -1),
    (0, 1, 1),
    (0, -1, -1),
];

/// A source of region lists keyed by grid-aligned coordinates.
///
/// Designed for **static dispatch** — callers should be generic over
/// `S: RegionSource` rather than boxing, so the probe loop stays a chain
/// of inlined hash lookups. [`RegionTable`] is the canonical
/// implementation.
pub trait RegionSource {
    /// Verbatim lookup of a single key. `None` when the table has no entry.
    fn get(&self, coordinate: &Coordinate) -> Option<&[Region]>;

    /// Grid spacing of the table keys, in millimetres. Always >= 1.
    fn resolution(&self) -> u32;

    /// Resolve `coordinate` to the region list occupying it.
    ///
    /// Total over all inputs: falls back to the single-element background
    /// sentinel list rather than returning nothing.
    fn resolve(&self, coordinate: Coordinate) -> Vec<Region> {
        let step = self.resolution() as i32;

        if let Some(regions) = self.get(&coordinate) {
            return regions.to_vec();
        }

        let aligned = parity_aligned(coordinate, step);
        if aligned != coordinate {
            if let Some(regions) = self.get(&aligned) {
                return regions.to_vec();
            }
        }

        for (dx, dy, dz) in PROBE_OFFSETS {
            let probe = Coordinate::new(
                aligned.x + dx * step,
                aligned.y + dy * step,
                aligned.z + dz * step,
            );
            if let Some(regions) = self.get(&probe) {
                return regions.to_vec();
            }
        }

        let nearest = nearest_grid_point(coordinate, step);
        if let Some(regions) = self.get(&nearest) {
            return regions.to_vec();
        }

        trace!(%coordinate, "no atlas entry near coordinate, returning background");
        vec![Region::background()]
    }
}

/// Shift each off-grid component down by one unit, leaving grid-aligned
/// components untouched. On a 2 mm grid this moves every odd component to
/// the even value just below it.
fn parity_aligned(coordinate: Coordinate, step: i32) -> Coordinate {
    coordinate.map(|v| if v.rem_euclid(step) == 0 { v } else { v - 1 })
}

/// Round each component to the nearest grid multiple, ties away from zero.
fn nearest_grid_point(coordinate: Coordinate, step: i32) -> Coordinate {
    coordinate.map(|v| ((v as f64 / step as f64).round() * step as f64) as i32)
}

/// The sparse coordinate-to-regions lookup table.
#[derive(Debug, Clone)]
pub struct RegionTable {
    resolution: u32,
    entries: HashMap<Coordinate, Vec<Region>>,
}

impl RegionTable {
    /// Grid spacing of the shipped Harvard-Oxford table.
    pub const DEFAULT_RESOLUTION: u32 = 2;

    pub fn new(resolution: u32) -> crate::Result<Self> {
        if resolution == 0 {
            return Err(CoreError::InvalidResolution(resolution));
        }
        Ok(Self {
            resolution,
            entries: HashMap::new(),
        })
    }

    pub fn from_entries(
        resolution: u32,
        entries: HashMap<Coordinate, Vec<Region>>,
    ) -> crate::Result<Self> {
        if resolution == 0 {
            return Err(CoreError::InvalidResolution(resolution));
        }
        Ok(Self {
            resolution,
            entries,
        })
    }

    pub fn insert(&mut self, coordinate: Coordinate, regions: Vec<Region>) {
        self.entries.insert(coordinate, regions);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RegionSource for RegionTable {
    fn get(&self, coordinate: &Coordinate) -> Option<&[Region]> {
        self.entries.get(coordinate).map(Vec::as_slice)
    }

    fn resolution(&self) -> u32 {
        self.resolution
    }
}
