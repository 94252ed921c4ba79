//! Command channel
//!
//! Serializes commands, forwards them across the kernel boundary and
//! records every exchange in an append-only audit log.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::command::Command;
use crate::kernel::{Kernel, KernelError};
use crate::result::CommandResult;

/// One command/reply exchange, recorded for diagnostic replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The command as dispatched
    pub command: Command,
    /// The decoded reply
    pub result: CommandResult,
}

/// Error type for channel operations
///
/// Each variant carries the operation tag of the triggering command so a
/// failure can be correlated with the audit log.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("failed to encode {op}: {source}")]
    Encode {
        op: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("kernel failed applying {op}: {source}")]
    Kernel {
        op: &'static str,
        #[source]
        source: KernelError,
    },

    #[error("malformed reply to {op}: {source}")]
    Decode {
        op: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Synchronous command channel to a kernel
///
/// The channel performs no staleness bookkeeping; callers invalidate
/// their caches after a successful dispatch.
pub struct CommandChannel<K: Kernel> {
    kernel: K,
    history: Vec<HistoryEntry>,
}

impl<K: Kernel> CommandChannel<K> {
    /// Create a channel to the given kernel
    pub fn new(kernel: K) -> Self {
        Self {
            kernel,
            history: Vec::new(),
        }
    }

    /// Dispatch one command and decode the kernel's reply.
    ///
    /// The exchange is appended to the audit log only once the reply has
    /// decoded; encode, transport and decode failures propagate to the
    /// caller and leave the log untouched.
    pub fn dispatch(&mut self, command: Command) -> Result<CommandResult, ChannelError> {
        let op = command.tag();

        let envelope =
            serde_json::to_string(&command).map_err(|source| ChannelError::Encode { op, source })?;
        debug!("Dispatching {}: {}", op, envelope);

        let reply = self
            .kernel
            .apply(&envelope)
            .map_err(|source| ChannelError::Kernel { op, source })?;
        debug!("Reply to {}: {}", op, reply);

        let result: CommandResult =
            serde_json::from_str(&reply).map_err(|source| ChannelError::Decode { op, source })?;

        self.history.push(HistoryEntry {
            command,
            result: result.clone(),
        });
        Ok(result)
    }

    /// The audit log, in dispatch order
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Shared access to the backing kernel
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Mutable access to the backing kernel
    pub fn kernel_mut(&mut self) -> &mut K {
        &mut self.kernel
    }
}
