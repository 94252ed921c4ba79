//! Staleness cascade
//!
//! Three layered caches mirror kernel state: the document, the active
//! workbench and the active realization. Invalidation flows strictly
//! downward: a document refresh invalidates the workbench layer, a
//! workbench refresh invalidates the realization layer.
//!
//! The cascade is an explicit controller on [`Session`]: flags record
//! what is stale, a FIFO queue records the refreshes owed, and a guard
//! keeps a mark issued mid-drain from re-entering the loop. Each mark
//! schedules exactly one refresh; duplicate marks run redundantly
//! rather than being coalesced.

use std::fmt;

use tracing::info;

use lathe_bridge::Kernel;

use crate::error::{SessionError, SessionResult};
use crate::session::Session;

/// Cascade stage, in refresh order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Document,
    Workbench,
    Realization,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Document => write!(f, "document"),
            Stage::Workbench => write!(f, "workbench"),
            Stage::Realization => write!(f, "realization"),
        }
    }
}

/// Staleness of each cached snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaleFlags {
    pub document: bool,
    pub workbench: bool,
    pub realization: bool,
}

impl StaleFlags {
    /// True when every cache is current
    pub fn all_fresh(&self) -> bool {
        !(self.document || self.workbench || self.realization)
    }
}

/// Notification emitted after a cache refresh, for UI consumption
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    DocumentRefreshed,
    WorkbenchRefreshed { index: u32 },
    RealizationRefreshed { index: u32, cutoff: u32 },
}

impl<K: Kernel> Session<K> {
    /// Mark the document cache stale and run the cascade.
    ///
    /// Refreshing the document resets the active workbench to 0 and
    /// invalidates the workbench layer beneath it.
    pub fn mark_document_stale(&mut self) -> SessionResult<()> {
        self.flags.document = true;
        self.queue.push_back(Stage::Document);
        self.drain()
    }

    /// Mark the active workbench cache stale and run the cascade.
    pub fn mark_workbench_stale(&mut self) -> SessionResult<()> {
        self.flags.workbench = true;
        self.queue.push_back(Stage::Workbench);
        self.drain()
    }

    /// Mark the realization cache stale and run the cascade.
    pub fn mark_realization_stale(&mut self) -> SessionResult<()> {
        self.flags.realization = true;
        self.queue.push_back(Stage::Realization);
        self.drain()
    }

    /// Run queued refreshes to completion, in FIFO order.
    ///
    /// A drain already in progress owns the queue; a nested mark only
    /// enqueues and returns, its refresh runs in the outer loop.
    fn drain(&mut self) -> SessionResult<()> {
        if self.refreshing {
            return Ok(());
        }

        self.refreshing = true;
        let outcome = self.drain_queue();
        self.refreshing = false;
        outcome
    }

    fn drain_queue(&mut self) -> SessionResult<()> {
        while let Some(stage) = self.queue.pop_front() {
            match stage {
                Stage::Document => self.refresh_document()?,
                Stage::Workbench => self.refresh_workbench()?,
                Stage::Realization => self.refresh_realization()?,
            }
        }
        Ok(())
    }

    /// Refresh the document cache and invalidate the workbench layer.
    ///
    /// On error the stale flag stays set; the cache keeps its previous
    /// snapshot and the cascade stops where it was.
    fn refresh_document(&mut self) -> SessionResult<()> {
        let text = self
            .channel
            .kernel()
            .export_document()
            .map_err(|source| SessionError::Refresh {
                stage: Stage::Document,
                source,
            })?;
        self.document = serde_json::from_str(&text).map_err(|source| SessionError::Snapshot {
            stage: Stage::Document,
            source,
        })?;

        self.workbench_index = 0;
        self.flags.document = false;
        self.events.push(SyncEvent::DocumentRefreshed);
        info!("Refreshed document '{}'", self.document.name);

        self.flags.workbench = true;
        self.queue.push_back(Stage::Workbench);
        Ok(())
    }

    /// Refresh the workbench cache and invalidate the realization.
    fn refresh_workbench(&mut self) -> SessionResult<()> {
        let index = self.workbench_index;
        let text = self
            .channel
            .kernel()
            .export_workbench(index)
            .map_err(|source| SessionError::Refresh {
                stage: Stage::Workbench,
                source,
            })?;
        self.workbench = serde_json::from_str(&text).map_err(|source| SessionError::Snapshot {
            stage: Stage::Workbench,
            source,
        })?;

        self.flags.workbench = false;
        self.events.push(SyncEvent::WorkbenchRefreshed { index });
        info!("Refreshed workbench {} ('{}')", index, self.workbench.name);

        self.flags.realization = true;
        self.queue.push_back(Stage::Realization);
        Ok(())
    }

    /// Refresh the realization cache.
    ///
    /// The realization is evaluated up to and including the active
    /// feature, hence the `+ 1` on the cutoff.
    fn refresh_realization(&mut self) -> SessionResult<()> {
        let index = self.workbench_index;
        let cutoff = self.feature_index + 1;
        let text = self
            .channel
            .kernel()
            .export_realization(index, cutoff)
            .map_err(|source| SessionError::Refresh {
                stage: Stage::Realization,
                source,
            })?;
        self.realization = serde_json::from_str(&text).map_err(|source| SessionError::Snapshot {
            stage: Stage::Realization,
            source,
        })?;

        self.flags.realization = false;
        self.events
            .push(SyncEvent::RealizationRefreshed { index, cutoff });
        info!(
            "Refreshed realization for workbench {} at cutoff {}",
            index, cutoff
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::ScriptedKernel;

    #[test]
    fn test_document_stale_runs_the_full_cascade() {
        let mut session = Session::new(ScriptedKernel::default());
        session.workbench_index = 3;
        session.feature_index = 0;

        session.mark_document_stale().unwrap();

        assert!(session.stale_flags().all_fresh());
        assert_eq!(session.workbench_index(), 0);
        assert_eq!(session.document().name, "Untitled");
        assert_eq!(
            session.channel.kernel().export_log(),
            vec![
                "document".to_string(),
                "workbench(0)".to_string(),
                "realization(0, 1)".to_string(),
            ]
        );
        assert_eq!(
            session.take_events(),
            vec![
                SyncEvent::DocumentRefreshed,
                SyncEvent::WorkbenchRefreshed { index: 0 },
                SyncEvent::RealizationRefreshed { index: 0, cutoff: 1 },
            ]
        );
    }

    #[test]
    fn test_workbench_stale_stops_at_the_realization() {
        let mut session = Session::new(ScriptedKernel::default());

        session.mark_workbench_stale().unwrap();

        assert!(session.stale_flags().all_fresh());
        assert_eq!(
            session.channel.kernel().export_log(),
            vec!["workbench(0)".to_string(), "realization(0, 1)".to_string()]
        );
    }

    #[test]
    fn test_duplicate_marks_rerun_the_refresh() {
        let mut session = Session::new(ScriptedKernel::default());

        session.mark_realization_stale().unwrap();
        session.mark_realization_stale().unwrap();

        assert_eq!(
            session.channel.kernel().export_log(),
            vec![
                "realization(0, 1)".to_string(),
                "realization(0, 1)".to_string(),
            ]
        );
    }

    #[test]
    fn test_select_workbench_fetches_that_bench() {
        let mut session = Session::new(ScriptedKernel::default());

        session.select_workbench(2).unwrap();

        assert_eq!(session.workbench_index(), 2);
        assert_eq!(
            session.channel.kernel().export_log(),
            vec!["workbench(2)".to_string(), "realization(2, 1)".to_string()]
        );
    }

    #[test]
    fn test_feature_cutoff_drives_the_realization_fetch() {
        let mut session = Session::new(ScriptedKernel::default());

        session.set_feature_cutoff(4).unwrap();

        assert_eq!(session.feature_index(), 4);
        assert_eq!(
            session.channel.kernel().export_log(),
            vec!["realization(0, 5)".to_string()]
        );
    }

    #[test]
    fn test_failed_refresh_leaves_the_flag_set() {
        let mut session = Session::new(ScriptedKernel::default().with_failing_workbench());

        let err = session.mark_workbench_stale().unwrap_err();

        assert!(matches!(
            err,
            SessionError::Refresh {
                stage: Stage::Workbench,
                ..
            }
        ));
        assert!(session.stale_flags().workbench);
        assert!(!session.stale_flags().realization);
        assert!(session.channel.kernel().export_log().is_empty());
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_malformed_snapshot_leaves_the_flag_set() {
        let mut session =
            Session::new(ScriptedKernel::default().with_workbench("not a snapshot"));

        let err = session.mark_workbench_stale().unwrap_err();

        assert!(matches!(
            err,
            SessionError::Snapshot {
                stage: Stage::Workbench,
                ..
            }
        ));
        assert!(session.stale_flags().workbench);
    }
}
