//! Kernel boundary trait definitions
//!
//! The geometry kernel is an external collaborator reached exclusively
//! through this trait: one side-effecting entry point for command
//! envelopes, and pure textual exports for everything read back.

use thiserror::Error;

use crate::EntityId;

/// Error type for kernel boundary operations
#[derive(Debug, Clone, Error)]
pub enum KernelError {
    #[error("Kernel not available: {0}")]
    KernelNotAvailable(String),

    #[error("Apply failed: {0}")]
    Apply(String),

    #[error("Export failed: {0}")]
    Export(String),
}

/// Result type for kernel boundary operations
pub type KernelResult<T> = Result<T, KernelError>;

/// The kernel boundary trait
///
/// Every operation is synchronous and blocks the caller; there is no
/// cancellation or timeout. `apply` mutates kernel state, the exports
/// are pure reads of it.
pub trait Kernel {
    /// Name of the backing kernel
    fn name(&self) -> &str;

    /// Apply one command envelope and return the reply envelope
    fn apply(&mut self, envelope: &str) -> KernelResult<String>;

    /// Export the current document as JSON text
    fn export_document(&self) -> KernelResult<String>;

    /// Export one workbench as JSON text
    fn export_workbench(&self, index: u32) -> KernelResult<String>;

    /// Export the realization of workbench `index` evaluated up to
    /// `max_steps` history steps
    fn export_realization(&self, index: u32, max_steps: u32) -> KernelResult<String>;

    /// Export one realized solid as Wavefront OBJ text
    ///
    /// `tolerance` bounds the chord error of the triangulation.
    fn export_solid_obj(&self, solid_id: EntityId, tolerance: f64) -> KernelResult<String>;

    /// Export one realized solid as STEP text
    fn export_solid_step(&self, solid_id: EntityId) -> KernelResult<String>;
}

/// A kernel that always returns errors (used when no kernel is linked)
#[derive(Debug, Default)]
pub struct NullKernel;

impl Kernel for NullKernel {
    fn name(&self) -> &str {
        "null"
    }

    fn apply(&mut self, _envelope: &str) -> KernelResult<String> {
        Err(KernelError::KernelNotAvailable(
            "No geometry kernel linked".into(),
        ))
    }

    fn export_document(&self) -> KernelResult<String> {
        Err(KernelError::KernelNotAvailable(
            "No geometry kernel linked".into(),
        ))
    }

    fn export_workbench(&self, _index: u32) -> KernelResult<String> {
        Err(KernelError::KernelNotAvailable(
            "No geometry kernel linked".into(),
        ))
    }

    fn export_realization(&self, _index: u32, _max_steps: u32) -> KernelResult<String> {
        Err(KernelError::KernelNotAvailable(
            "No geometry kernel linked".into(),
        ))
    }

    fn export_solid_obj(&self, _solid_id: EntityId, _tolerance: f64) -> KernelResult<String> {
        Err(KernelError::KernelNotAvailable(
            "No geometry kernel linked".into(),
        ))
    }

    fn export_solid_step(&self, _solid_id: EntityId) -> KernelResult<String> {
        Err(KernelError::KernelNotAvailable(
            "No geometry kernel linked".into(),
        ))
    }
}
