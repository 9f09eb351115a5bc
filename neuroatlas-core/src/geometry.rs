use serde::{Deserialize, Serialize};

use crate::coordinate::{Axis, Coordinate};
use crate::error::CoreError;

/// The stereotactic-space rectangle a slice image covers, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
    pub z_min: i32,
    pub z_max: i32,
}

impl Bounds {
    /// The extent of MNI152 standard space.
    pub const MNI152: Self = Self {
        x_min: -90,
        x_max: 90,
        y_min: -126,
        y_max: 90,
        z_min: -72,
        z_max: 108,
    };

    #[inline]
    pub fn min(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x_min,
            Axis::Y => self.y_min,
            Axis::Z => self.z_min,
        }
    }

    #[inline]
    pub fn max(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x_max,
            Axis::Y => self.y_max,
            Axis::Z => self.z_max,
        }
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        Axis::ALL.iter().all(|&axis| {
            let v = coordinate.component(axis);
            self.min(axis) <= v && v <= self.max(axis)
        })
    }
}

/// A position on screen, in points. `(0, 0)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The size of the viewport a slice is drawn into, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl ScreenSize {
    /// Create a screen size with validated dimensions.
    pub fn new(width: f64, height: f64) -> crate::Result<Self> {
        if width <= 0.0 || height <= 0.0 || !width.is_finite() || !height.is_finite() {
            return Err(CoreError::InvalidScreenSize { width, height });
        }
        Ok(Self { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mni_bounds_contain_origin() {
        assert!(Bounds::MNI152.contains(Coordinate::ORIGIN));
        assert!(Bounds::MNI152.contains(Coordinate::new(-90, 90, 108)));
        assert!(!Bounds::MNI152.contains(Coordinate::new(0, 91, 0)));
    }

    #[test]
    fn axis_accessors() {
        let b = Bounds::MNI152;
        assert_eq!(b.min(Axis::Y), -126);
        assert_eq!(b.max(Axis::Z), 108);
    }

    #[test]
    fn invalid_screen_sizes() {
        assert!(ScreenSize::new(0.0, 100.0).is_err());
        assert!(ScreenSize::new(100.0, -1.0).is_err());
        assert!(ScreenSize::new(f64::NAN, 100.0).is_err());
        assert!(ScreenSize::new(100.0, f64::INFINITY).is_err());
        assert!(ScreenSize::new(320.0, 240.0).is_ok());
    }

    #[test]
    fn bounds_serde_field_names() {
        let json = r#"{"x_min":-90,"x_max":90,"y_min":-126,"y_max":90,"z_min":-72,"z_max":108}"#;
        let b: Bounds = serde_json::from_str(json).unwrap();
        assert_eq!(b, Bounds::MNI152);
    }
}
