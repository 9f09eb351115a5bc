use serde::{Deserialize, Serialize};

use crate::coordinate::Axis;

/// The anatomical viewing plane: which axis is held fixed when slicing the
/// volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plane {
    /// Fixed X: the slice shows the Y-Z plane (side view).
    Sagittal,
    /// Fixed Y: the slice shows the X-Z plane (front view).
    Coronal,
    /// Fixed Z: the slice shows the X-Y plane (top view).
    Axial,
}

/// The axis assignment for one plane: which stereotactic axis is fixed
/// across the slice, and which two map to the image's horizontal and
/// vertical directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneAxes {
    /// Held constant across every pixel of a slice in this plane.
    pub fixed: Axis,
    /// Varies left-to-right across the slice image.
    pub screen_x: Axis,
    /// Varies bottom-to-top across the slice image (stereotactic "up"
    /// grows with screen "up"; image row 0 is the top).
    pub screen_y: Axis,
}

impl Plane {
    pub const ALL: [Plane; 3] = [Plane::Sagittal, Plane::Coronal, Plane::Axial];

    /// The single axis-assignment table. Every component that needs to know
    /// how a plane maps to axes (transformer, crosshair, mask keying) goes
    /// through here rather than re-deriving the mapping.
    pub fn axes(self) -> PlaneAxes {
        match self {
            Self::Sagittal => PlaneAxes {
                fixed: Axis::X,
                screen_x: Axis::Y,
                screen_y: Axis::Z,
            },
            Self::Coronal => PlaneAxes {
                fixed: Axis::Y,
                screen_x: Axis::X,
                screen_y: Axis::Z,
            },
            Self::Axial => PlaneAxes {
                fixed: Axis::Z,
                screen_x: Axis::X,
                screen_y: Axis::Y,
            },
        }
    }

    /// The axis held constant across all pixels of a slice in this plane.
    #[inline]
    pub fn fixed_axis(self) -> Axis {
        self.axes().fixed
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sagittal => "sagittal",
            Self::Coronal => "coronal",
            Self::Axial => "axial",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_axes() {
        assert_eq!(Plane::Sagittal.fixed_axis(), Axis::X);
        assert_eq!(Plane::Coronal.fixed_axis(), Axis::Y);
        assert_eq!(Plane::Axial.fixed_axis(), Axis::Z);
    }

    #[test]
    fn axes_cover_all_three() {
        for plane in Plane::ALL {
            let axes = plane.axes();
            let mut seen = [axes.fixed, axes.screen_x, axes.screen_y];
            seen.sort_by_key(|a| a.label());
            assert_eq!(seen, [Axis::X, Axis::Y, Axis::Z]);
        }
    }

    #[test]
    fn serde_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&Plane::Sagittal).unwrap(), "\"sagittal\"");
        let plane: Plane = serde_json::from_str("\"axial\"").unwrap();
        assert_eq!(plane, Plane::Axial);
    }
}
