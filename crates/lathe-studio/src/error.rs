//! Session error taxonomy
//!
//! Boundary failures (encode/transport/decode) are unrecoverable and
//! carry the triggering operation for audit-log correlation. Semantic
//! rejections travel inside [`CommandResult`](lathe_bridge::CommandResult)
//! and only become errors where a caller needs a value the kernel did
//! not produce.

use thiserror::Error;

use lathe_bridge::{ChannelError, KernelError};

use crate::input::InputError;
use crate::sync::Stage;

/// Error type for session operations
#[derive(Debug, Error)]
pub enum SessionError {
    /// Transport or envelope failure at the kernel boundary
    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// A cascade refresh could not read from the kernel
    #[error("refresh of the {stage} cache failed: {source}")]
    Refresh {
        stage: Stage,
        #[source]
        source: KernelError,
    },

    /// A kernel export did not decode into the expected snapshot shape
    #[error("malformed {stage} snapshot: {source}")]
    Snapshot {
        stage: Stage,
        #[source]
        source: serde_json::Error,
    },

    /// Raw UI input failed validation
    #[error(transparent)]
    Input(#[from] InputError),

    /// Direct kernel export failure outside the cascade
    #[error(transparent)]
    Kernel(#[from] KernelError),

    /// The active workbench history has no sketch step to target
    #[error("no sketch in the active workbench history")]
    NoSketch,

    /// The kernel rejected a command whose caller needed a value back
    #[error("{op} rejected by the kernel: {reason}")]
    Rejected { op: &'static str, reason: String },

    /// The kernel reported success but omitted the created entity id
    #[error("{op} succeeded without returning a created id")]
    MissingCreatedId { op: &'static str },
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
