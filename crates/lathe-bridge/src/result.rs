//! Result envelopes
//!
//! The reply half of the wire protocol: a success/failure discriminant
//! with an operation-specific payload on success.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::EntityId;

/// Payload of a successful command
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuccessData {
    /// Id of a newly created entity, when the operation creates one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,

    /// Operation-specific extras, preserved verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Decoded reply to a dispatched command
///
/// A `Failure` means the kernel understood the command but rejected it;
/// it is a normal value for callers to branch on, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandResult {
    /// The kernel accepted and applied the command
    Success(SuccessData),
    /// The kernel rejected the command
    Failure(String),
}

impl CommandResult {
    /// Whether the kernel applied the command
    pub fn is_success(&self) -> bool {
        matches!(self, CommandResult::Success(_))
    }

    /// Id of the entity created by this command, if any
    pub fn created_id(&self) -> Option<EntityId> {
        match self {
            CommandResult::Success(data) => data.id,
            CommandResult::Failure(_) => None,
        }
    }
}
