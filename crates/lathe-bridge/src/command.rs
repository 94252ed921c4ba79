//! Command envelopes
//!
//! A command serializes to a tagged object with exactly one populated
//! variant key naming the kernel operation, e.g.
//! `{"NewLineOnSketch":{"workbench_id":0,...}}`. The kernel matches on
//! these field names verbatim, so they are wire-stable.

use serde::{Deserialize, Serialize};

use crate::EntityId;

/// Extrusion direction relative to the sketch plane normal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Along the plane normal
    #[default]
    Normal,
    /// Against the plane normal
    Negative,
}

/// A mutation intent addressed to the kernel
///
/// Commands are immutable, built fresh per call and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Change the parameters of an existing extrusion
    UpdateExtrusion {
        workbench_id: u32,
        sketch_id: String,
        face_ids: Vec<EntityId>,
        length: f64,
        offset: f64,
        extrusion_name: String,
        direction: Direction,
        extrusion_id: String,
    },

    /// Attach a sketch to a plane
    SetSketchPlane {
        workbench_id: u32,
        sketch_id: String,
        plane_id: String,
    },

    /// Create a sketch; an empty plane id leaves it floating and an
    /// empty name lets the kernel generate one
    NewSketchOnPlane {
        workbench_id: u32,
        plane_id: String,
        sketch_name: String,
    },

    /// Extrude faces of a sketch into a solid
    NewExtrusion {
        workbench_id: u32,
        sketch_id: String,
        face_ids: Vec<EntityId>,
        length: f64,
        offset: f64,
        extrusion_name: String,
        direction: Direction,
    },

    /// Delete line segments from a sketch
    DeleteLines {
        workbench_id: u32,
        sketch_id: String,
        line_ids: Vec<EntityId>,
    },

    /// Delete arcs from a sketch
    DeleteArcs {
        workbench_id: u32,
        sketch_id: String,
        arc_ids: Vec<EntityId>,
    },

    /// Delete circles from a sketch
    DeleteCircles {
        workbench_id: u32,
        sketch_id: String,
        circle_ids: Vec<EntityId>,
    },

    /// Create four lines forming a rectangle spanning two points
    NewRectangleBetweenPoints {
        workbench_id: u32,
        sketch_id: String,
        start_id: EntityId,
        end_id: EntityId,
    },

    /// Create a circle centered on one point, passing through another
    NewCircleBetweenPoints {
        workbench_id: u32,
        sketch_id: String,
        center_id: EntityId,
        edge_id: EntityId,
    },

    /// Connect two existing points with a line
    NewLineOnSketch {
        workbench_id: u32,
        sketch_id: String,
        start_point_id: EntityId,
        end_point_id: EntityId,
    },

    /// Add a point to a sketch at the given sketch-local coordinates
    NewPointOnSketch2 {
        workbench_id: u32,
        sketch_id: String,
        x: f64,
        y: f64,
        hidden: bool,
    },

    /// Rename a history step without touching modeling state
    RenameStep {
        workbench_id: u32,
        step_id: EntityId,
        new_name: String,
    },
}

impl Command {
    /// Wire tag of this command, used for logging and error context
    pub fn tag(&self) -> &'static str {
        match self {
            Command::UpdateExtrusion { .. } => "UpdateExtrusion",
            Command::SetSketchPlane { .. } => "SetSketchPlane",
            Command::NewSketchOnPlane { .. } => "NewSketchOnPlane",
            Command::NewExtrusion { .. } => "NewExtrusion",
            Command::DeleteLines { .. } => "DeleteLines",
            Command::DeleteArcs { .. } => "DeleteArcs",
            Command::DeleteCircles { .. } => "DeleteCircles",
            Command::NewRectangleBetweenPoints { .. } => "NewRectangleBetweenPoints",
            Command::NewCircleBetweenPoints { .. } => "NewCircleBetweenPoints",
            Command::NewLineOnSketch { .. } => "NewLineOnSketch",
            Command::NewPointOnSketch2 { .. } => "NewPointOnSketch2",
            Command::RenameStep { .. } => "RenameStep",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_envelope_is_wire_stable() {
        let command = Command::NewLineOnSketch {
            workbench_id: 0,
            sketch_id: "sketch-1".to_string(),
            start_point_id: 4,
            end_point_id: 7,
        };

        let envelope = serde_json::to_string(&command).unwrap();
        assert_eq!(
            envelope,
            r#"{"NewLineOnSketch":{"workbench_id":0,"sketch_id":"sketch-1","start_point_id":4,"end_point_id":7}}"#
        );
    }

    #[test]
    fn test_extrusion_envelope_is_wire_stable() {
        let command = Command::UpdateExtrusion {
            workbench_id: 2,
            sketch_id: "sketch-1".to_string(),
            face_ids: vec![0, 3],
            length: 25.0,
            offset: 0.0,
            extrusion_name: "Boss".to_string(),
            direction: Direction::Normal,
            extrusion_id: "extrusion-1".to_string(),
        };

        let envelope = serde_json::to_string(&command).unwrap();
        assert_eq!(
            envelope,
            r#"{"UpdateExtrusion":{"workbench_id":2,"sketch_id":"sketch-1","face_ids":[0,3],"length":25.0,"offset":0.0,"extrusion_name":"Boss","direction":"Normal","extrusion_id":"extrusion-1"}}"#
        );
    }

    #[test]
    fn test_tag_matches_variant_key() {
        let command = Command::RenameStep {
            workbench_id: 0,
            step_id: 1,
            new_name: "Base".to_string(),
        };

        let envelope = serde_json::to_string(&command).unwrap();
        assert!(envelope.starts_with(&format!("{{\"{}\":", command.tag())));
    }
}
