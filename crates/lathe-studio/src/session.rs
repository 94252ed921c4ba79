//! Modeling session
//!
//! A [`Session`] owns the command channel to one kernel instance, the
//! three snapshot caches derived from it and the staleness cascade that
//! keeps them consistent. UI code calls the command builders here;
//! rendering code reads the cached snapshots.

use std::collections::VecDeque;
use std::sync::Arc;

use glam::DVec2;
use parking_lot::Mutex;

use lathe_bridge::{
    Command, CommandChannel, CommandResult, Direction, DocumentSnapshot, EntityId, HistoryEntry,
    Kernel, RealizationSnapshot, WorkbenchSnapshot,
};

use crate::error::{SessionError, SessionResult};
use crate::input::{self, InputError};
use crate::selection::{EntityKind, SelectedEntity};
use crate::sync::{StaleFlags, Stage, SyncEvent};

/// Chord tolerance handed to the kernel's mesh export, in meters
const MESH_TOLERANCE: f64 = 0.1;

/// A modeling session bound to one kernel instance
///
/// All state transitions take `&mut self` and run to completion; the
/// session never suspends mid-cascade.
pub struct Session<K: Kernel> {
    pub(crate) channel: CommandChannel<K>,
    pub(crate) document: DocumentSnapshot,
    pub(crate) workbench: WorkbenchSnapshot,
    pub(crate) realization: RealizationSnapshot,
    pub(crate) flags: StaleFlags,
    pub(crate) queue: VecDeque<Stage>,
    pub(crate) refreshing: bool,
    pub(crate) workbench_index: u32,
    pub(crate) feature_index: u32,
    pub(crate) events: Vec<SyncEvent>,
}

/// A session shared with a UI loop
pub type SharedSession<K> = Arc<Mutex<Session<K>>>;

impl<K: Kernel> Session<K> {
    /// Create a session with empty caches.
    ///
    /// Nothing is fetched until the first staleness mark; call
    /// [`Session::mark_document_stale`] to populate all three caches.
    pub fn new(kernel: K) -> Self {
        Self {
            channel: CommandChannel::new(kernel),
            document: DocumentSnapshot::default(),
            workbench: WorkbenchSnapshot::default(),
            realization: RealizationSnapshot::default(),
            flags: StaleFlags::default(),
            queue: VecDeque::new(),
            refreshing: false,
            workbench_index: 0,
            feature_index: 0,
            events: Vec::new(),
        }
    }

    /// Create a session wrapped for sharing with a UI loop
    pub fn shared(kernel: K) -> SharedSession<K> {
        Arc::new(Mutex::new(Self::new(kernel)))
    }

    /// The cached document snapshot
    pub fn document(&self) -> &DocumentSnapshot {
        &self.document
    }

    /// The cached snapshot of the active workbench
    pub fn workbench(&self) -> &WorkbenchSnapshot {
        &self.workbench
    }

    /// The cached realization of the active workbench
    pub fn realization(&self) -> &RealizationSnapshot {
        &self.realization
    }

    /// Current staleness of each cache
    pub fn stale_flags(&self) -> StaleFlags {
        self.flags
    }

    /// Index of the active workbench
    pub fn workbench_index(&self) -> u32 {
        self.workbench_index
    }

    /// Index of the feature the realization is evaluated up to
    pub fn feature_index(&self) -> u32 {
        self.feature_index
    }

    /// The audit log of every command exchanged with the kernel
    pub fn history(&self) -> &[HistoryEntry] {
        self.channel.history()
    }

    /// Drain the notifications accumulated since the last call
    pub fn take_events(&mut self) -> Vec<SyncEvent> {
        std::mem::take(&mut self.events)
    }

    // ============== Navigation ==============

    /// Switch the active workbench and refresh the layers beneath it.
    pub fn select_workbench(&mut self, index: u32) -> SessionResult<()> {
        self.workbench_index = index;
        self.mark_workbench_stale()
    }

    /// Move the feature cutoff and refresh the realization.
    ///
    /// The realization evaluates the history up to and including the
    /// feature at `index`.
    pub fn set_feature_cutoff(&mut self, index: u32) -> SessionResult<()> {
        self.feature_index = index;
        self.mark_realization_stale()
    }

    // ============== Mutating commands ==============

    /// Dispatch a mutation, invalidating the workbench layer when the
    /// kernel applied it.
    fn mutate(&mut self, command: Command) -> SessionResult<CommandResult> {
        let result = self.channel.dispatch(command)?;
        if result.is_success() {
            self.mark_workbench_stale()?;
        }
        Ok(result)
    }

    /// Update an existing extrusion's parameters.
    ///
    /// `length` and `faces` arrive as raw UI strings and are validated
    /// before the command is built.
    pub fn update_extrusion(
        &mut self,
        extrusion_id: &str,
        sketch_id: &str,
        name: &str,
        length: &str,
        faces: &[String],
    ) -> SessionResult<CommandResult> {
        let face_ids = faces
            .iter()
            .map(|face| input::parse_entity_id(face))
            .collect::<Result<Vec<_>, _>>()?;
        let length = input::parse_length(length)?;

        self.mutate(Command::UpdateExtrusion {
            workbench_id: self.workbench_index,
            sketch_id: sketch_id.to_owned(),
            face_ids,
            length,
            offset: 0.0,
            extrusion_name: name.to_owned(),
            direction: Direction::Normal,
            extrusion_id: extrusion_id.to_owned(),
        })
    }

    /// Attach a sketch to a different plane.
    pub fn set_sketch_plane(
        &mut self,
        sketch_id: &str,
        plane_id: &str,
    ) -> SessionResult<CommandResult> {
        self.mutate(Command::SetSketchPlane {
            workbench_id: self.workbench_index,
            sketch_id: sketch_id.to_owned(),
            plane_id: plane_id.to_owned(),
        })
    }

    /// Create a new sketch, initially floating.
    ///
    /// The plane binding comes later via [`Session::set_sketch_plane`];
    /// the kernel generates a name.
    pub fn new_sketch_on_plane(&mut self) -> SessionResult<CommandResult> {
        self.mutate(Command::NewSketchOnPlane {
            workbench_id: self.workbench_index,
            plane_id: String::new(),
            sketch_name: String::new(),
        })
    }

    /// Extrude the most recent sketch in the active workbench history.
    pub fn new_extrusion(&mut self, length: f64) -> SessionResult<CommandResult> {
        let sketch_id = self
            .workbench
            .last_sketch_id()
            .ok_or(SessionError::NoSketch)?
            .to_owned();

        self.mutate(Command::NewExtrusion {
            workbench_id: self.workbench_index,
            sketch_id,
            face_ids: Vec::new(),
            length,
            offset: 0.0,
            extrusion_name: String::new(),
            direction: Direction::Normal,
        })
    }

    /// Delete a viewport selection from a sketch.
    ///
    /// The selection is split per entity kind and each kind with no ids
    /// is skipped entirely, so repeating the call with an emptied
    /// selection dispatches nothing. The workbench is invalidated once
    /// for the whole batch.
    pub fn delete_entities(
        &mut self,
        sketch_id: &str,
        selection: &[SelectedEntity],
    ) -> SessionResult<()> {
        let line_ids = Self::ids_of(selection, EntityKind::Line)?;
        let arc_ids = Self::ids_of(selection, EntityKind::Arc)?;
        let circle_ids = Self::ids_of(selection, EntityKind::Circle)?;

        let mut mutated = false;

        if !line_ids.is_empty() {
            let result = self.channel.dispatch(Command::DeleteLines {
                workbench_id: self.workbench_index,
                sketch_id: sketch_id.to_owned(),
                line_ids,
            })?;
            mutated |= result.is_success();
        }
        if !arc_ids.is_empty() {
            let result = self.channel.dispatch(Command::DeleteArcs {
                workbench_id: self.workbench_index,
                sketch_id: sketch_id.to_owned(),
                arc_ids,
            })?;
            mutated |= result.is_success();
        }
        if !circle_ids.is_empty() {
            let result = self.channel.dispatch(Command::DeleteCircles {
                workbench_id: self.workbench_index,
                sketch_id: sketch_id.to_owned(),
                circle_ids,
            })?;
            mutated |= result.is_success();
        }

        // One workbench refresh for the whole batch
        if mutated {
            self.mark_workbench_stale()?;
        }
        Ok(())
    }

    fn ids_of(
        selection: &[SelectedEntity],
        kind: EntityKind,
    ) -> Result<Vec<EntityId>, InputError> {
        selection
            .iter()
            .filter(|entity| entity.kind == kind)
            .map(|entity| input::parse_entity_id(&entity.id))
            .collect()
    }

    /// Create four lines forming a rectangle spanning two points.
    pub fn add_rectangle_between_points(
        &mut self,
        sketch_id: &str,
        start: &str,
        end: &str,
    ) -> SessionResult<CommandResult> {
        let start_id = input::parse_entity_id(start)?;
        let end_id = input::parse_entity_id(end)?;

        self.mutate(Command::NewRectangleBetweenPoints {
            workbench_id: self.workbench_index,
            sketch_id: sketch_id.to_owned(),
            start_id,
            end_id,
        })
    }

    /// Create a circle centered on one point, passing through another.
    pub fn add_circle_between_points(
        &mut self,
        sketch_id: &str,
        center: &str,
        edge: &str,
    ) -> SessionResult<CommandResult> {
        let center_id = input::parse_entity_id(center)?;
        let edge_id = input::parse_entity_id(edge)?;

        self.mutate(Command::NewCircleBetweenPoints {
            workbench_id: self.workbench_index,
            sketch_id: sketch_id.to_owned(),
            center_id,
            edge_id,
        })
    }

    /// Connect two existing sketch points with a line.
    pub fn add_line_to_sketch(
        &mut self,
        sketch_id: &str,
        start: &str,
        end: &str,
    ) -> SessionResult<CommandResult> {
        let start_point_id = input::parse_entity_id(start)?;
        let end_point_id = input::parse_entity_id(end)?;

        self.mutate(Command::NewLineOnSketch {
            workbench_id: self.workbench_index,
            sketch_id: sketch_id.to_owned(),
            start_point_id,
            end_point_id,
        })
    }

    /// Add a point to a sketch, returning the kernel-assigned id.
    pub fn add_point_to_sketch(
        &mut self,
        sketch_id: &str,
        point: DVec2,
        hidden: bool,
    ) -> SessionResult<EntityId> {
        let op = "NewPointOnSketch2";
        let result = self.mutate(Command::NewPointOnSketch2 {
            workbench_id: self.workbench_index,
            sketch_id: sketch_id.to_owned(),
            x: point.x,
            y: point.y,
            hidden,
        })?;

        match result {
            CommandResult::Success(data) => {
                data.id.ok_or(SessionError::MissingCreatedId { op })
            }
            CommandResult::Failure(reason) => Err(SessionError::Rejected { op, reason }),
        }
    }

    /// Rename a history step.
    ///
    /// Renaming does not touch modeling state, so no cache is
    /// invalidated.
    pub fn rename_step(
        &mut self,
        step_id: EntityId,
        new_name: &str,
    ) -> SessionResult<CommandResult> {
        Ok(self.channel.dispatch(Command::RenameStep {
            workbench_id: self.workbench_index,
            step_id,
            new_name: new_name.to_owned(),
        })?)
    }

    // ============== Solid exports ==============

    /// Export a realized solid as Wavefront OBJ text.
    pub fn solid_to_obj(&self, solid_id: EntityId) -> SessionResult<String> {
        Ok(self
            .channel
            .kernel()
            .export_solid_obj(solid_id, MESH_TOLERANCE)?)
    }

    /// Export a realized solid as STEP text.
    pub fn solid_to_step(&self, solid_id: EntityId) -> SessionResult<String> {
        Ok(self.channel.kernel().export_solid_step(solid_id)?)
    }
}
