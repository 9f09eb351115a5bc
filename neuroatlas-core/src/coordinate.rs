use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three axes of the stereotactic reference space.
///
/// X runs left to right, Y back to front, Z bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn label(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

/// A point in MNI152 stereotactic space, in integer millimetres.
///
/// This is a lightweight, `Copy` value type. Equality is component-wise and
/// it hashes, so it can key the sparse region lookup table directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coordinate {
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    #[inline]
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Read the component along `axis`.
    #[inline]
    pub fn component(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Return a copy with the component along `axis` replaced by `value`.
    #[inline]
    pub fn with_component(self, axis: Axis, value: i32) -> Self {
        match axis {
            Axis::X => Self { x: value, ..self },
            Axis::Y => Self { y: value, ..self },
            Axis::Z => Self { z: value, ..self },
        }
    }

    /// Apply `f` to every component.
    #[inline]
    pub fn map(self, f: impl Fn(i32) -> i32) -> Self {
        Self {
            x: f(self.x),
            y: f(self.y),
            z: f(self.z),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_round_trip() {
        let c = Coordinate::new(-12, 34, 56);
        for axis in Axis::ALL {
            assert_eq!(c.with_component(axis, 7).component(axis), 7);
        }
        assert_eq!(c.with_component(Axis::Y, 0), Coordinate::new(-12, 0, 56));
    }

    #[test]
    fn equality_is_component_wise() {
        assert_eq!(Coordinate::new(1, 2, 3), Coordinate::new(1, 2, 3));
        assert_ne!(Coordinate::new(1, 2, 3), Coordinate::new(1, 2, 4));
    }

    #[test]
    fn serde_round_trip() {
        let c = Coordinate::new(-90, 90, -72);
        let json = serde_json::to_string(&c).unwrap();
        let back: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn display() {
        assert_eq!(Coordinate::new(10, -2, 0).to_string(), "(10, -2, 0)");
    }
}
