//! Stateless conversion between screen space, slice pixel space, and
//! stereotactic space for a single slice.
//!
//! Screen `(0, 0)` is the top-left corner of the viewport; stereotactic
//! "up" grows with screen "up", so the vertical axis is flipped once on the
//! way into pixel space. Inputs outside the viewport are extrapolated
//! linearly rather than clamped — a caller may legitimately query slightly
//! outside a just-resized viewport.

use crate::coordinate::Coordinate;
use crate::geometry::{ScreenPoint, ScreenSize};
use crate::slice::Slice;

/// Map a fraction of a slice dimension onto a stereotactic axis.
///
/// Zero-width bounds degrade to the axis being constant at `min` — never
/// a division by zero.
#[inline]
fn axis_value(fraction: f64, min: i32, max: i32) -> i32 {
    if max == min {
        return min;
    }
    (min as f64 + fraction * (max - min) as f64).round() as i32
}

/// The inverse of [`axis_value`]: the fraction of the slice dimension at
/// which `value` sits.
#[inline]
fn axis_fraction(value: i32, min: i32, max: i32) -> f64 {
    if max == min {
        return 0.0;
    }
    (value - min) as f64 / (max - min) as f64
}

/// Resolve a screen position to the stereotactic coordinate it lands on.
///
/// The two varying axes interpolate linearly against the slice bounds,
/// rounding to the nearest millimetre; the fixed axis takes the slice's
/// position unconditionally.
pub fn pixel_to_coordinate(point: ScreenPoint, screen: ScreenSize, slice: &Slice) -> Coordinate {
    let axes = slice.plane.axes();

    let nx = point.x / screen.width;
    let ny = point.y / screen.height;

    // Slice pixel space, with the vertical flip.
    let px = nx * slice.pixel_width as f64;
    let py = (1.0 - ny) * slice.pixel_height as f64;

    let fx = px / slice.pixel_width as f64;
    let fy = py / slice.pixel_height as f64;

    Coordinate::ORIGIN
        .with_component(
            axes.screen_x,
            axis_value(fx, slice.bounds.min(axes.screen_x), slice.bounds.max(axes.screen_x)),
        )
        .with_component(
            axes.screen_y,
            axis_value(fy, slice.bounds.min(axes.screen_y), slice.bounds.max(axes.screen_y)),
        )
        .with_component(axes.fixed, slice.position)
}

/// Project a stereotactic coordinate back onto the screen for the given
/// slice. Exact inverse of [`pixel_to_coordinate`] up to rounding: the
/// round trip is stable within one unit for any point inside the slice
/// bounds. The coordinate's fixed-axis component is not consulted.
pub fn coordinate_to_pixel(
    coordinate: Coordinate,
    screen: ScreenSize,
    slice: &Slice,
) -> ScreenPoint {
    let axes = slice.plane.axes();

    let fx = axis_fraction(
        coordinate.component(axes.screen_x),
        slice.bounds.min(axes.screen_x),
        slice.bounds.max(axes.screen_x),
    );
    let fy = axis_fraction(
        coordinate.component(axes.screen_y),
        slice.bounds.min(axes.screen_y),
        slice.bounds.max(axes.screen_y),
    );

    ScreenPoint::new(fx * screen.width, (1.0 - fy) * screen.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bounds;
    use crate::plane::Plane;
    use crate::slice::ImageRef;

    fn test_slice(plane: Plane) -> Slice {
        // 200×200 pixels over a symmetric ±100 mm extent on every axis.
        let bounds = Bounds {
            x_min: -100,
            x_max: 100,
            y_min: -100,
            y_max: 100,
            z_min: -100,
            z_max: 100,
        };
        Slice::new(plane, 0, 200, 200, bounds, ImageRef::from("slice.png")).unwrap()
    }

    fn screen() -> ScreenSize {
        ScreenSize::new(200.0, 200.0).unwrap()
    }

    #[test]
    fn center_tap_resolves_to_origin() {
        let slice = test_slice(Plane::Sagittal);
        let c = pixel_to_coordinate(ScreenPoint::new(100.0, 100.0), screen(), &slice);
        assert_eq!(c, Coordinate::ORIGIN);
    }

    #[test]
    fn corners() {
        let slice = test_slice(Plane::Sagittal);
        // Top-left: minimum screen-x axis (Y), maximum screen-y axis (Z).
        let tl = pixel_to_coordinate(ScreenPoint::new(0.0, 0.0), screen(), &slice);
        assert_eq!(tl, Coordinate::new(0, -100, 100));
        // Bottom-right: maximum Y, minimum Z.
        let br = pixel_to_coordinate(ScreenPoint::new(200.0, 200.0), screen(), &slice);
        assert_eq!(br, Coordinate::new(0, 100, -100));
    }

    #[test]
    fn fixed_axis_takes_slice_position() {
        let bounds = Bounds::MNI152;
        let slice =
            Slice::new(Plane::Coronal, -42, 182, 182, bounds, ImageRef::from("c.png")).unwrap();
        let c = pixel_to_coordinate(ScreenPoint::new(17.0, 93.0), screen(), &slice);
        assert_eq!(c.y, -42);
    }

    #[test]
    fn plane_axis_assignment() {
        // The same screen point lands on different axes per plane.
        let p = ScreenPoint::new(150.0, 50.0);
        let s = screen();

        let sag = pixel_to_coordinate(p, s, &test_slice(Plane::Sagittal));
        assert_eq!((sag.x, sag.y, sag.z), (0, 50, 50));

        let cor = pixel_to_coordinate(p, s, &test_slice(Plane::Coronal));
        assert_eq!((cor.x, cor.y, cor.z), (50, 0, 50));

        let axi = pixel_to_coordinate(p, s, &test_slice(Plane::Axial));
        assert_eq!((axi.x, axi.y, axi.z), (50, 50, 0));
    }

    #[test]
    fn out_of_viewport_extrapolates() {
        let slice = test_slice(Plane::Axial);
        let c = pixel_to_coordinate(ScreenPoint::new(-20.0, 100.0), screen(), &slice);
        assert_eq!(c.x, -120);
        let c = pixel_to_coordinate(ScreenPoint::new(100.0, 220.0), screen(), &slice);
        assert_eq!(c.y, -120);
    }

    #[test]
    fn zero_width_bounds_degrade_to_min() {
        let bounds = Bounds {
            x_min: -100,
            x_max: 100,
            y_min: 5,
            y_max: 5,
            z_min: -100,
            z_max: 100,
        };
        let slice =
            Slice::new(Plane::Axial, 0, 200, 200, bounds, ImageRef::from("a.png")).unwrap();
        let c = pixel_to_coordinate(ScreenPoint::new(180.0, 20.0), screen(), &slice);
        assert_eq!(c.y, 5);
        let p = coordinate_to_pixel(c, screen(), &slice);
        assert!(p.x.is_finite() && p.y.is_finite());
    }

    #[test]
    fn round_trip_within_one_unit() {
        let s = screen();
        for plane in Plane::ALL {
            let slice = test_slice(plane);
            for ix in 0..=20 {
                for iy in 0..=20 {
                    let p = ScreenPoint::new(ix as f64 * 10.0, iy as f64 * 10.0);
                    let c = pixel_to_coordinate(p, s, &slice);
                    let back = coordinate_to_pixel(c, s, &slice);
                    // One millimetre of rounding is one screen point here.
                    assert!(
                        (back.x - p.x).abs() <= 1.0 && (back.y - p.y).abs() <= 1.0,
                        "{plane:?}: {p:?} -> {c} -> {back:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn non_square_viewport_round_trip() {
        let s = ScreenSize::new(390.0, 520.0).unwrap();
        let bounds = Bounds::MNI152;
        let slice =
            Slice::new(Plane::Coronal, 12, 182, 218, bounds, ImageRef::from("c.png")).unwrap();
        let p = ScreenPoint::new(123.0, 456.0);
        let c = pixel_to_coordinate(p, s, &slice);
        let back = coordinate_to_pixel(c, s, &slice);
        // One millimetre maps to at most ~2.9 screen points on this slice.
        assert!((back.x - p.x).abs() <= 3.0);
        assert!((back.y - p.y).abs() <= 3.0);
    }
}
