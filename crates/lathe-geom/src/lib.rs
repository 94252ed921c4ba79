//! 2D Curve Tessellation
//!
//! This crate provides:
//! - Circle and arc tessellation with a bounded chord error (sagitta)
//! - Frame helpers that lift sketch polylines into 3D and flatten them
//!   into vertex buffers

pub mod polyline;
pub mod tessellate;

// Re-exports for convenience
pub use polyline::{flatten, lift_to_plane};
pub use tessellate::{
    arc_to_points, circle_to_points, segment_count, TessellateError, CHORD_TOLERANCE,
};
