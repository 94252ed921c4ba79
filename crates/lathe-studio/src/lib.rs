//! Client State Layer
//!
//! This crate provides:
//! - The [`Session`], owning the command channel and the three snapshot
//!   caches mirrored from the kernel
//! - The staleness cascade keeping those caches consistent after every
//!   mutation (document → workbench → realization)
//! - Command builders the UI calls, with explicit validation of raw
//!   string input
//! - Curve extraction glue feeding realized sketches to the tessellator

pub mod error;
pub mod input;
pub mod selection;
pub mod session;
pub mod sketch;
pub mod sync;

#[cfg(test)]
pub(crate) mod testkit;

// Re-exports for convenience
pub use error::{SessionError, SessionResult};
pub use input::{parse_entity_id, parse_length, InputError};
pub use selection::{EntityKind, SelectedEntity};
pub use session::{Session, SharedSession};
pub use sketch::{arc_polyline, circle_polyline, line_polyline, polyline_buffer, CurveError};
pub use sync::{StaleFlags, Stage, SyncEvent};
