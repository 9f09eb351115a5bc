//! The slice catalogue: per plane, an ordered list of slice descriptors.
//!
//! The on-disk form is the `coordinate_mappings.json` file produced by the
//! data-preparation pipeline — one record per extracted slice image, with
//! its MNI position, pixel shape, and spatial bounds.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use neuroatlas_core::{Bounds, ImageRef, Plane, Slice};

use crate::error::DataError;

/// One slice record as emitted by the extraction pipeline. Unknown fields
/// (affine matrices, descriptions, voxel indices) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SliceRecord {
    /// Fixed-axis position in millimetres.
    pub mni_position: i32,
    /// Image shape as `[rows, cols]`, numpy convention.
    pub slice_shape: [u32; 2],
    pub bounds: Bounds,
    pub image_filename: String,
}

impl SliceRecord {
    fn into_slice(self, plane: Plane) -> neuroatlas_core::Result<Slice> {
        let [rows, cols] = self.slice_shape;
        Slice::new(
            plane,
            self.mni_position,
            cols,
            rows,
            self.bounds,
            ImageRef::new(self.image_filename),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
struct CatalogueFile {
    #[serde(default)]
    sagittal: Vec<SliceRecord>,
    #[serde(default)]
    coronal: Vec<SliceRecord>,
    #[serde(default)]
    axial: Vec<SliceRecord>,
}

/// The slice catalogue for all three planes.
///
/// Within each plane the slices are monotonic in position (the pipeline
/// emits them ascending); the navigation layer relies on that for
/// index-ordered stepping and nearest-position search.
#[derive(Debug, Default)]
pub struct Catalogue {
    sagittal: Vec<Slice>,
    coronal: Vec<Slice>,
    axial: Vec<Slice>,
}

impl Catalogue {
    /// Build a catalogue from per-plane slice lists, validating ordering.
    pub fn from_planes(
        sagittal: Vec<Slice>,
        coronal: Vec<Slice>,
        axial: Vec<Slice>,
    ) -> crate::Result<Self> {
        for (plane, slices) in [
            (Plane::Sagittal, &sagittal),
            (Plane::Coronal, &coronal),
            (Plane::Axial, &axial),
        ] {
            if !is_monotonic(slices) {
                return Err(DataError::UnsortedPlane { plane });
            }
        }
        Ok(Self {
            sagittal,
            coronal,
            axial,
        })
    }

    /// Parse a catalogue from the pipeline's JSON mapping file contents.
    ///
    /// Records with invalid geometry are skipped with a warning rather
    /// than failing the whole load.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let file: CatalogueFile = serde_json::from_str(json)?;
        let sagittal = build_plane(Plane::Sagittal, file.sagittal);
        let coronal = build_plane(Plane::Coronal, file.coronal);
        let axial = build_plane(Plane::Axial, file.axial);
        let catalogue = Self::from_planes(sagittal, coronal, axial)?;
        debug!(
            sagittal = catalogue.len(Plane::Sagittal),
            coronal = catalogue.len(Plane::Coronal),
            axial = catalogue.len(Plane::Axial),
            "loaded slice catalogue"
        );
        Ok(catalogue)
    }

    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn slices(&self, plane: Plane) -> &[Slice] {
        match plane {
            Plane::Sagittal => &self.sagittal,
            Plane::Coronal => &self.coronal,
            Plane::Axial => &self.axial,
        }
    }

    pub fn len(&self, plane: Plane) -> usize {
        self.slices(plane).len()
    }

    /// True when no plane has any slices.
    pub fn is_empty(&self) -> bool {
        Plane::ALL.iter().all(|&p| self.slices(p).is_empty())
    }

    pub fn get(&self, plane: Plane, index: usize) -> Option<&Slice> {
        self.slices(plane).get(index)
    }

    /// Index of the slice whose position is nearest to `position` by
    /// absolute difference, ties resolved to the lower index. `None` only
    /// when the plane has no slices.
    pub fn nearest_index(&self, plane: Plane, position: i32) -> Option<usize> {
        let slices = self.slices(plane);
        let mut best: Option<(usize, i64)> = None;
        for (index, slice) in slices.iter().enumerate() {
            let distance = (i64::from(slice.position) - i64::from(position)).abs();
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((index, distance)),
            }
        }
        best.map(|(index, _)| index)
    }
}

fn build_plane(plane: Plane, records: Vec<SliceRecord>) -> Vec<Slice> {
    records
        .into_iter()
        .filter_map(|record| {
            let position = record.mni_position;
            match record.into_slice(plane) {
                Ok(slice) => Some(slice),
                Err(e) => {
                    warn!(plane = plane.label(), position, "skipping slice record: {e}");
                    None
                }
            }
        })
        .collect()
}

/// Strictly ascending or strictly descending positions.
fn is_monotonic(slices: &[Slice]) -> bool {
    if slices.len() < 2 {
        return true;
    }
    let ascending = slices.windows(2).all(|w| w[0].position < w[1].position);
    let descending = slices.windows(2).all(|w| w[0].position > w[1].position);
    ascending || descending
}
