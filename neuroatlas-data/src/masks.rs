//! Region mask overlays: per-region, per-slice transparent images the
//! client can draw over a slice. Purely a visual aid — resolution
//! correctness never depends on them.

use neuroatlas_core::{ImageRef, Plane, Slice};

/// Stable cache key for a fetched mask overlay: the region, the plane, and
/// the slice image it overlays.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaskKey {
    pub region_id: u32,
    pub plane: Plane,
    pub image: ImageRef,
}

impl MaskKey {
    pub fn for_slice(region_id: u32, slice: &Slice) -> Self {
        Self {
            region_id,
            plane: slice.plane,
            image: slice.image.clone(),
        }
    }
}

/// Relative path of the overlay PNG for `region_id` on `slice`, as laid
/// out by the mask-generation pipeline
/// (`region_masks/<plane>/region_<id>/<plane>_<position>.png`).
pub fn overlay_path(region_id: u32, slice: &Slice) -> String {
    let plane = slice.plane.label();
    format!(
        "region_masks/{plane}/region_{region_id:02}/{plane}_{position:+03}.png",
        position = slice.position
    )
}
