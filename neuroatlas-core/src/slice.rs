use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::geometry::Bounds;
use crate::plane::Plane;

/// Opaque handle to a slice or overlay image resource.
///
/// The core never decodes images; it only passes references through to the
/// asset layer (a relative path, a URL, a cache key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(reference: &str) -> Self {
        Self::new(reference)
    }
}

/// One entry of the slice catalogue: a 2D cross-section of the volume at a
/// fixed position along its plane's axis.
///
/// `bounds` describes the stereotactic rectangle the image covers along the
/// two varying axes; its extent along the fixed axis is ignored in favour of
/// `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub plane: Plane,
    /// Fixed-axis position in millimetres.
    pub position: i32,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub bounds: Bounds,
    pub image: ImageRef,
}

impl Slice {
    /// Create a slice descriptor with validated pixel dimensions.
    pub fn new(
        plane: Plane,
        position: i32,
        pixel_width: u32,
        pixel_height: u32,
        bounds: Bounds,
        image: ImageRef,
    ) -> crate::Result<Self> {
        if pixel_width == 0 || pixel_height == 0 {
            return Err(CoreError::InvalidSlice {
                reason: format!(
                    "pixel dimensions must be > 0, got {pixel_width}\u{d7}{pixel_height}"
                ),
            });
        }
        Ok(Self {
            plane,
            position,
            pixel_width,
            pixel_height,
            bounds,
            image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_pixel_dimensions() {
        let img = ImageRef::from("sagittal_+00.png");
        assert!(Slice::new(Plane::Sagittal, 0, 0, 200, Bounds::MNI152, img.clone()).is_err());
        assert!(Slice::new(Plane::Sagittal, 0, 200, 0, Bounds::MNI152, img.clone()).is_err());
        assert!(Slice::new(Plane::Sagittal, 0, 200, 200, Bounds::MNI152, img).is_ok());
    }

    #[test]
    fn image_ref_is_transparent_in_json() {
        let img = ImageRef::from("axial_-12.png");
        assert_eq!(serde_json::to_string(&img).unwrap(), "\"axial_-12.png\"");
    }
}
