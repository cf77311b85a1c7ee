//! Per-segment geometric kernels.
//!
//! A segment is the frustum (tapered cylinder) between two consecutive
//! samples of a section. These functions are the innermost integration
//! formulas; the section- and arbor-level kernels sum them.

use arbor_types::Sample;
use std::f64::consts::PI;

/// Euclidean length of the segment between two samples.
///
/// # Example
///
/// ```
/// use arbor_measure::segment_length;
/// use arbor_types::Sample;
///
/// let a = Sample::from_coords(0, 0.0, 0.0, 0.0, 1.0);
/// let b = Sample::from_coords(1, 3.0, 4.0, 0.0, 1.0);
/// assert!((segment_length(&a, &b) - 5.0).abs() < 1e-12);
/// ```
#[inline]
#[must_use]
pub fn segment_length(a: &Sample, b: &Sample) -> f64 {
    a.distance_to(b)
}

/// Lateral (side) surface area of the segment frustum.
///
/// `π·(r0+r1)·sqrt((r0−r1)² + L²)` — the slant-surface formula of a
/// truncated cone with end radii `r0`, `r1` and axial length `L`.
#[inline]
#[must_use]
pub fn segment_lateral_area(a: &Sample, b: &Sample) -> f64 {
    let length = segment_length(a, b);
    let dr = a.radius - b.radius;
    PI * (a.radius + b.radius) * dr.mul_add(dr, length * length).sqrt()
}

/// Total surface area of the segment frustum, end caps included.
///
/// Adds both end-cap disks (`π·r0² + π·r1²`) to the lateral area. Summed
/// over a multi-segment section this counts interior joint caps twice:
/// each segment is treated as a free-standing frustum, and consumers of
/// the summed areas depend on that overestimate staying stable.
///
/// # Example
///
/// ```
/// use arbor_measure::segment_surface_area;
/// use arbor_types::Sample;
/// use std::f64::consts::PI;
///
/// // Constant radius 1, length 2: lateral 2π·1·2, caps 2π.
/// let a = Sample::from_coords(0, 0.0, 0.0, 0.0, 1.0);
/// let b = Sample::from_coords(1, 0.0, 0.0, 2.0, 1.0);
/// assert!((segment_surface_area(&a, &b) - 6.0 * PI).abs() < 1e-12);
/// ```
#[inline]
#[must_use]
pub fn segment_surface_area(a: &Sample, b: &Sample) -> f64 {
    segment_lateral_area(a, b) + PI * a.radius.mul_add(a.radius, b.radius * b.radius)
}

/// Volume of the segment frustum.
///
/// `(π/3)·L·(r0² + r0·r1 + r1²)`; reduces to the cylinder volume
/// `π·r²·L` when the radii are equal.
#[inline]
#[must_use]
pub fn segment_volume(a: &Sample, b: &Sample) -> f64 {
    let length = segment_length(a, b);
    let r0 = a.radius;
    let r1 = b.radius;
    (PI / 3.0) * length * r1.mul_add(r1, r0.mul_add(r0, r0 * r1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pair(r0: f64, r1: f64, length: f64) -> (Sample, Sample) {
        (
            Sample::from_coords(0, 0.0, 0.0, 0.0, r0),
            Sample::from_coords(1, 0.0, 0.0, length, r1),
        )
    }

    #[test]
    fn length_is_euclidean() {
        let (a, b) = pair(1.0, 1.0, 7.5);
        assert_relative_eq!(segment_length(&a, &b), 7.5);
    }

    #[test]
    fn cylinder_lateral_area() {
        // Constant radius: lateral area is 2·π·r·L.
        let (a, b) = pair(2.0, 2.0, 5.0);
        assert_relative_eq!(segment_lateral_area(&a, &b), 2.0 * PI * 2.0 * 5.0);
    }

    #[test]
    fn cylinder_volume() {
        // Constant radius: frustum reduces to π·r²·L.
        let (a, b) = pair(1.0, 1.0, 3.0);
        assert_relative_eq!(segment_volume(&a, &b), PI * 3.0);
    }

    #[test]
    fn cone_volume() {
        // r1 = 0: frustum reduces to the cone (π/3)·r²·L.
        let (a, b) = pair(2.0, 0.0, 6.0);
        assert_relative_eq!(segment_volume(&a, &b), (PI / 3.0) * 6.0 * 4.0);
    }

    #[test]
    fn surface_area_includes_both_caps() {
        let (a, b) = pair(1.0, 2.0, 0.0);
        // Zero length: lateral area is π·(r0+r1)·|r0−r1|, caps π·(1 + 4).
        let expected = PI * 3.0 * 1.0 + PI * 5.0;
        assert_relative_eq!(segment_surface_area(&a, &b), expected);
    }

    #[test]
    fn zero_radius_zero_length_segment_measures_zero() {
        let (a, b) = pair(0.0, 0.0, 0.0);
        assert_relative_eq!(segment_length(&a, &b), 0.0);
        assert_relative_eq!(segment_surface_area(&a, &b), 0.0);
        assert_relative_eq!(segment_volume(&a, &b), 0.0);
    }
}
