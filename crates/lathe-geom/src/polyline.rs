//! Polyline frame helpers
//!
//! Tessellation happens in sketch-local 2D; renderers want 3D points or
//! flat coordinate buffers. Both transforms are linear and lossless.

use glam::{DVec2, DVec3};

/// Lift sketch-local 2D points onto their plane's 3D frame at z = 0.
pub fn lift_to_plane(points: &[DVec2]) -> Vec<DVec3> {
    points.iter().map(|p| DVec3::new(p.x, p.y, 0.0)).collect()
}

/// Unpack 3D points into a flat coordinate buffer for mesh consumption.
pub fn flatten(points: &[DVec3]) -> Vec<f64> {
    let mut buffer = Vec::with_capacity(points.len() * 3);
    for point in points {
        buffer.extend_from_slice(&[point.x, point.y, point.z]);
    }
    buffer
}
