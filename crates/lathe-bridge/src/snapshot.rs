//! Snapshot data model
//!
//! Plain structured data decoded from kernel exports. Each snapshot is
//! owned by exactly one cache slot and is replaced wholesale on refresh,
//! never patched in place.

use std::collections::BTreeMap;

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::EntityId;

/// Top-level document export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    /// Document name
    pub name: String,
    /// Workbenches in this document, in order
    #[serde(default)]
    pub workbenches: Vec<WorkbenchSummary>,
}

/// One workbench as listed in the document export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkbenchSummary {
    /// Workbench name
    pub name: String,
    /// Number of steps in its feature history
    #[serde(default)]
    pub step_count: usize,
}

/// Active-workbench export: the feature history being edited
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkbenchSnapshot {
    /// Workbench name
    pub name: String,
    /// Ordered feature history
    #[serde(default)]
    pub history: Vec<HistoryStep>,
}

impl WorkbenchSnapshot {
    /// Id of the most recent sketch step, if the history contains one
    pub fn last_sketch_id(&self) -> Option<&str> {
        self.history.iter().rev().find_map(|step| match step.data {
            StepData::Sketch { .. } => Some(step.unique_id.as_str()),
            _ => None,
        })
    }
}

/// One step in a workbench's feature history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryStep {
    /// Kernel-assigned stable id
    pub unique_id: String,
    /// Display name
    pub name: String,
    /// Whether the step is skipped during realization
    #[serde(default)]
    pub suppressed: bool,
    /// Step payload, discriminated by the kernel's `type` tag
    pub data: StepData,
}

/// Payload of a history step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StepData {
    /// A reference point in document space
    Point { point: DVec3 },
    /// A construction plane
    Plane { origin: DVec3, normal: DVec3 },
    /// A 2D sketch bound to a plane
    Sketch { plane_id: String },
    /// An extrusion of sketch faces
    Extrusion { sketch_id: String, length: f64 },
}

/// Realization export: the concrete result of evaluating a workbench's
/// feature history up to the active cutoff
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RealizationSnapshot {
    /// Realized sketches keyed by sketch id
    #[serde(default)]
    pub sketches: BTreeMap<String, SketchView>,
    /// Realized solids keyed by solid id
    #[serde(default)]
    pub solids: BTreeMap<EntityId, SolidSummary>,
}

/// A realized sketch with its curve entities
///
/// Curves reference their defining points by id; coordinates live only
/// in `points`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SketchView {
    #[serde(default)]
    pub points: BTreeMap<EntityId, SketchPoint>,
    #[serde(default)]
    pub lines: BTreeMap<EntityId, SketchLine>,
    #[serde(default)]
    pub arcs: BTreeMap<EntityId, SketchArc>,
    #[serde(default)]
    pub circles: BTreeMap<EntityId, SketchCircle>,
}

/// A point in sketch-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SketchPoint {
    /// Position in the sketch plane
    pub position: DVec2,
    /// Hidden points anchor construction geometry and are not drawn
    #[serde(default)]
    pub hidden: bool,
}

/// A line segment between two sketch points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SketchLine {
    pub start: EntityId,
    pub end: EntityId,
}

/// A circular arc between two sketch points around a center point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SketchArc {
    pub center: EntityId,
    pub start: EntityId,
    pub end: EntityId,
    #[serde(default)]
    pub clockwise: bool,
}

/// A full circle around a center point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SketchCircle {
    pub center: EntityId,
    pub radius: f64,
}

/// Realized solid metadata; the geometry itself stays inside the kernel
/// until exported as a mesh
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolidSummary {
    /// Solid name
    pub name: String,
    #[serde(default)]
    pub face_count: usize,
    #[serde(default)]
    pub edge_count: usize,
}
