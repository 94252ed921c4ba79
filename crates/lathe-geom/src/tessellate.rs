//! Circle and arc tessellation
//!
//! Segment counts are chosen so the sagitta (the perpendicular distance
//! between each chord and the arc it approximates) stays within the
//! caller's tolerance. See <https://math.stackexchange.com/a/4132095>.

use std::f64::consts::{PI, TAU};

use glam::DVec2;
use thiserror::Error;

/// Default chord tolerance for sketch curves, in meters
pub const CHORD_TOLERANCE: f64 = 0.05;

/// Error type for tessellation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TessellateError {
    #[error("radius must be strictly positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("tolerance must be strictly positive, got {0}")]
    NonPositiveTolerance(f64),

    #[error("arc endpoints disagree on radius: |start - center| = {start}, |end - center| = {end}")]
    RadiusMismatch { start: f64, end: f64 },

    #[error("arc never reached its end point within {0} segments")]
    IncompleteArc(u32),
}

/// Number of chords needed to keep the sagitta within `tolerance`.
///
/// Uses `ceil(pi / sqrt(2k))` with `k = tolerance / radius`, an upper
/// bound of the exact `ceil(pi / acos(1 - k))` that is cheaper to
/// evaluate and overestimates by at most one segment.
pub fn segment_count(radius: f64, tolerance: f64) -> Result<u32, TessellateError> {
    if radius <= 0.0 {
        return Err(TessellateError::NonPositiveRadius(radius));
    }
    if tolerance <= 0.0 {
        return Err(TessellateError::NonPositiveTolerance(tolerance));
    }

    let k = tolerance / radius;
    Ok((PI / (2.0 * k).sqrt()).ceil() as u32)
}

/// Tessellate a full circle into a closed polyline.
///
/// Returns `n + 1` points; the last repeats the first so consumers get
/// an explicitly closed polygon.
pub fn circle_to_points(
    center: DVec2,
    radius: f64,
    tolerance: f64,
) -> Result<Vec<DVec2>, TessellateError> {
    let n = segment_count(radius, tolerance)?;
    let step = TAU / n as f64;

    let points = (0..=n)
        .map(|i| {
            let theta = step * i as f64;
            center + radius * DVec2::new(theta.cos(), theta.sin())
        })
        .collect();
    Ok(points)
}

/// Tessellate a circular arc from `start` to `end` around `center`.
///
/// The polyline begins exactly at `start` and ends exactly at `end`; the
/// final segment absorbs the angular remainder, so it can be shorter
/// than the others. `clockwise` reverses the stepping direction.
///
/// `end` must lie on the circle through `start` to within `tolerance`;
/// an inconsistent end point is rejected rather than silently producing
/// a truncated polyline.
pub fn arc_to_points(
    center: DVec2,
    start: DVec2,
    end: DVec2,
    clockwise: bool,
    tolerance: f64,
) -> Result<Vec<DVec2>, TessellateError> {
    let radius = start.distance(center);
    let n = segment_count(radius, tolerance)?;

    let end_radius = end.distance(center);
    if (end_radius - radius).abs() > tolerance {
        return Err(TessellateError::RadiusMismatch {
            start: radius,
            end: end_radius,
        });
    }

    let segment_angle = TAU / n as f64;
    let segment_length = radius * segment_angle;
    let signed_step = if clockwise {
        -segment_angle
    } else {
        segment_angle
    };

    let start_angle = (start.y - center.y).atan2(start.x - center.x);

    let mut points = Vec::with_capacity(n as usize + 2);
    points.push(start);
    for i in 1..=n {
        let theta = start_angle + signed_step * i as f64;
        let point = center + radius * DVec2::new(theta.cos(), theta.sin());
        points.push(point);

        // Close enough that one more segment would overshoot; land on
        // the end point exactly.
        if point.distance(end) <= segment_length {
            points.push(end);
            return Ok(points);
        }
    }

    Err(TessellateError::IncompleteArc(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circle_polyline_is_closed() {
        let points = circle_to_points(DVec2::new(2.0, -1.0), 1.5, CHORD_TOLERANCE).unwrap();
        assert!(points.len() > 3);
        assert_eq!(points.first(), points.last());
    }

    #[test]
    fn test_circle_sagitta_within_tolerance() {
        let center = DVec2::new(0.5, 0.25);
        for radius in [0.1, 0.5, 1.0, 10.0, 250.0] {
            let points = circle_to_points(center, radius, CHORD_TOLERANCE).unwrap();
            for pair in points.windows(2) {
                let midpoint = (pair[0] + pair[1]) / 2.0;
                let sagitta = radius - midpoint.distance(center);
                assert!(
                    sagitta <= CHORD_TOLERANCE + 1e-9,
                    "sagitta {} exceeds tolerance at radius {}",
                    sagitta,
                    radius
                );
            }
        }
    }

    #[test]
    fn test_fast_count_brackets_exact_count() {
        for (radius, tolerance) in [(1.0, 0.05), (10.0, 0.05), (3.0, 0.001), (0.5, 0.01)] {
            let k: f64 = tolerance / radius;
            let exact = (PI / (1.0 - k).acos()).ceil() as u32;
            let fast = segment_count(radius, tolerance).unwrap();
            assert!(fast >= exact, "fast {} underestimates exact {}", fast, exact);
            assert!(fast <= exact + 1, "fast {} exceeds exact {} + 1", fast, exact);
        }
    }

    #[test]
    fn test_degenerate_inputs_are_rejected() {
        assert_eq!(
            segment_count(0.0, 0.05),
            Err(TessellateError::NonPositiveRadius(0.0))
        );
        assert_eq!(
            segment_count(1.0, -0.05),
            Err(TessellateError::NonPositiveTolerance(-0.05))
        );
        assert!(circle_to_points(DVec2::ZERO, -1.0, 0.05).is_err());
        assert!(arc_to_points(DVec2::ZERO, DVec2::ZERO, DVec2::X, false, 0.05).is_err());
    }

    #[test]
    fn test_arc_starts_and_ends_exactly() {
        let center = DVec2::new(1.0, 1.0);
        let start = DVec2::new(3.0, 1.0);
        let end = DVec2::new(1.0, 3.0);

        let points = arc_to_points(center, start, end, false, CHORD_TOLERANCE).unwrap();
        assert_eq!(*points.first().unwrap(), start);
        assert_eq!(*points.last().unwrap(), end);

        // Every interior point stays on the circle.
        for point in &points[..points.len() - 1] {
            assert_relative_eq!(point.distance(center), 2.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_clockwise_traverses_opposite_direction() {
        let center = DVec2::ZERO;
        let start = DVec2::new(1.0, 0.0);
        let end = DVec2::new(0.0, 1.0);

        let ccw = arc_to_points(center, start, end, false, CHORD_TOLERANCE).unwrap();
        let cw = arc_to_points(center, start, end, true, CHORD_TOLERANCE).unwrap();

        // First step leaves the start point upward for the quarter arc,
        // downward for its clockwise complement.
        assert!(ccw[1].y > 0.0);
        assert!(cw[1].y < 0.0);

        // The clockwise path covers three quarters of the circle, so it
        // needs more points.
        assert!(cw.len() > ccw.len());
    }

    #[test]
    fn test_half_circle_counts_coincide() {
        let center = DVec2::ZERO;
        let start = DVec2::new(1.0, 0.0);
        let end = DVec2::new(-1.0, 0.0);

        let ccw = arc_to_points(center, start, end, false, CHORD_TOLERANCE).unwrap();
        let cw = arc_to_points(center, start, end, true, CHORD_TOLERANCE).unwrap();
        assert_eq!(ccw.len(), cw.len());
    }

    #[test]
    fn test_inconsistent_end_point_is_rejected() {
        let err = arc_to_points(
            DVec2::ZERO,
            DVec2::new(1.0, 0.0),
            DVec2::new(2.0, 0.0),
            false,
            CHORD_TOLERANCE,
        )
        .unwrap_err();
        assert!(matches!(err, TessellateError::RadiusMismatch { .. }));
    }
}
