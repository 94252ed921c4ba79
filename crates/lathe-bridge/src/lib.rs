//! Kernel boundary and wire protocol
//!
//! This crate provides:
//! - The `Kernel` trait every geometry backend must implement
//! - Command and result envelopes exchanged across the boundary
//! - Snapshot types decoded from kernel exports
//! - The command channel and its append-only audit log

pub mod channel;
pub mod command;
pub mod kernel;
pub mod result;
pub mod snapshot;

/// Unique identifier for kernel-side entities
pub type EntityId = u64;

// Re-exports for convenience
pub use channel::{ChannelError, CommandChannel, HistoryEntry};
pub use command::{Command, Direction};
pub use kernel::{Kernel, KernelError, KernelResult, NullKernel};
pub use result::{CommandResult, SuccessData};
pub use snapshot::{
    DocumentSnapshot, HistoryStep, RealizationSnapshot, SketchArc, SketchCircle, SketchLine,
    SketchPoint, SketchView, SolidSummary, StepData, WorkbenchSnapshot, WorkbenchSummary,
};
