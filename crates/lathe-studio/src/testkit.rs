//! Test doubles shared by the session and cascade tests

use std::cell::RefCell;
use std::collections::VecDeque;

use lathe_bridge::{EntityId, Kernel, KernelError, KernelResult};

/// A kernel fake fed with canned exports and command replies
///
/// Export calls are recorded through interior mutability because the
/// boundary declares them as pure reads.
pub(crate) struct ScriptedKernel {
    replies: VecDeque<String>,
    document: String,
    workbench: String,
    realization: String,
    fail_workbench: bool,
    export_log: RefCell<Vec<String>>,
}

impl Default for ScriptedKernel {
    fn default() -> Self {
        Self {
            replies: VecDeque::new(),
            document: r#"{"name":"Untitled","workbenches":[{"name":"Bench 1","step_count":0}]}"#
                .to_string(),
            workbench: r#"{"name":"Bench 1","history":[]}"#.to_string(),
            realization: r#"{"sketches":{},"solids":{}}"#.to_string(),
            fail_workbench: false,
            export_log: RefCell::new(Vec::new()),
        }
    }
}

impl ScriptedKernel {
    pub(crate) fn with_replies(mut self, replies: &[&str]) -> Self {
        self.replies = replies.iter().map(|reply| reply.to_string()).collect();
        self
    }

    pub(crate) fn with_workbench(mut self, json: &str) -> Self {
        self.workbench = json.to_string();
        self
    }

    pub(crate) fn with_failing_workbench(mut self) -> Self {
        self.fail_workbench = true;
        self
    }

    pub(crate) fn export_log(&self) -> Vec<String> {
        self.export_log.borrow().clone()
    }

    pub(crate) fn clear_export_log(&mut self) {
        self.export_log.borrow_mut().clear();
    }
}

impl Kernel for ScriptedKernel {
    fn name(&self) -> &str {
        "scripted"
    }

    fn apply(&mut self, _envelope: &str) -> KernelResult<String> {
        self.replies
            .pop_front()
            .ok_or_else(|| KernelError::Apply("no reply scripted".into()))
    }

    fn export_document(&self) -> KernelResult<String> {
        self.export_log.borrow_mut().push("document".to_string());
        Ok(self.document.clone())
    }

    fn export_workbench(&self, index: u32) -> KernelResult<String> {
        if self.fail_workbench {
            return Err(KernelError::Export("workbench export unavailable".into()));
        }
        self.export_log
            .borrow_mut()
            .push(format!("workbench({})", index));
        Ok(self.workbench.clone())
    }

    fn export_realization(&self, index: u32, max_steps: u32) -> KernelResult<String> {
        self.export_log
            .borrow_mut()
            .push(format!("realization({}, {})", index, max_steps));
        Ok(self.realization.clone())
    }

    fn export_solid_obj(&self, solid_id: EntityId, tolerance: f64) -> KernelResult<String> {
        self.export_log
            .borrow_mut()
            .push(format!("solid_obj({}, {})", solid_id, tolerance));
        Ok(format!("o solid-{}\n", solid_id))
    }

    fn export_solid_step(&self, solid_id: EntityId) -> KernelResult<String> {
        self.export_log
            .borrow_mut()
            .push(format!("solid_step({})", solid_id));
        Ok(format!("ISO-10303-21; /* solid {} */", solid_id))
    }
}
