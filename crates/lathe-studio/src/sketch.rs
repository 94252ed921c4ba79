//! Sketch curve extraction
//!
//! Rendering code pulls curve geometry out of a realized sketch and
//! hands it to the tessellator. Curves reference their defining points
//! by id; a dangling reference means the snapshot is malformed.

use glam::DVec2;
use thiserror::Error;

use lathe_bridge::{EntityId, SketchView};
use lathe_geom::{self as geom, TessellateError, CHORD_TOLERANCE};

/// Error type for sketch curve extraction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    #[error("sketch references missing point {0}")]
    MissingPoint(EntityId),

    #[error("sketch has no {kind} entity {id}")]
    UnknownEntity { kind: &'static str, id: EntityId },

    #[error(transparent)]
    Tessellate(#[from] TessellateError),
}

fn resolve(view: &SketchView, id: EntityId) -> Result<DVec2, CurveError> {
    view.points
        .get(&id)
        .map(|point| point.position)
        .ok_or(CurveError::MissingPoint(id))
}

/// Polyline for one line segment.
pub fn line_polyline(view: &SketchView, id: EntityId) -> Result<Vec<DVec2>, CurveError> {
    let line = view
        .lines
        .get(&id)
        .ok_or(CurveError::UnknownEntity { kind: "line", id })?;
    Ok(vec![resolve(view, line.start)?, resolve(view, line.end)?])
}

/// Closed polyline approximating one circle.
pub fn circle_polyline(view: &SketchView, id: EntityId) -> Result<Vec<DVec2>, CurveError> {
    let circle = view.circles.get(&id).ok_or(CurveError::UnknownEntity {
        kind: "circle",
        id,
    })?;
    let center = resolve(view, circle.center)?;
    Ok(geom::circle_to_points(center, circle.radius, CHORD_TOLERANCE)?)
}

/// Polyline approximating one arc, start to end.
pub fn arc_polyline(view: &SketchView, id: EntityId) -> Result<Vec<DVec2>, CurveError> {
    let arc = view
        .arcs
        .get(&id)
        .ok_or(CurveError::UnknownEntity { kind: "arc", id })?;
    let center = resolve(view, arc.center)?;
    let start = resolve(view, arc.start)?;
    let end = resolve(view, arc.end)?;
    Ok(geom::arc_to_points(
        center,
        start,
        end,
        arc.clockwise,
        CHORD_TOLERANCE,
    )?)
}

/// Flat 3D vertex buffer for a polyline, ready for a line renderer.
pub fn polyline_buffer(points: &[DVec2]) -> Vec<f64> {
    geom::flatten(&geom::lift_to_plane(points))
}
