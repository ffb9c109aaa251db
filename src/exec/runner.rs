use std::rc::Rc;

use super::outcome::ExecutionOutcome;
use super::surface::{RunId, RunTicket, RUN_STAMP_ATTRIBUTE};

/// Receives outcomes that settle after `launch` returned.
pub type OutcomeSink = Rc<dyn Fn(RunId, ExecutionOutcome)>;

/// One script handed to a runner.
#[derive(Debug, Clone)]
pub struct ScriptJob<'a> {
    pub script: &'a str,
    pub ticket: RunTicket,
    /// Id of the surface the run was prepared against.
    pub surface_id: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launch {
    /// Finished within the call.
    Settled(ExecutionOutcome),
    /// Outcome will be delivered through the sink.
    Pending(RunId),
}

impl Launch {
    pub fn outcome(&self) -> Option<&ExecutionOutcome> {
        match self {
            Launch::Settled(outcome) => Some(outcome),
            Launch::Pending(_) => None,
        }
    }
}

/// The only place arbitrary script text is executed.
pub trait ScriptRunner {
    /// Never panics or throws on script failure; failures come back as
    /// [`ExecutionOutcome::Failed`], either returned or sent to `sink`.
    fn launch(&self, job: ScriptJob<'_>, sink: OutcomeSink) -> Launch;
}

/// Prefixes a module with a guard that aborts evaluation when the surface
/// now mounted under `surface_id` was built for a different run. Dynamic
/// imports cannot be cancelled once started, so a slow import from an
/// abandoned run stops here instead of drawing into the newer canvas.
/// The check runs once, when evaluation starts. Work the module defers past
/// a top-level `await` or into a callback is not covered.
///
/// The guard shares the first line with the script so reported line numbers
/// stay unchanged. Static imports are hoisted, so their position after the
/// guard is still valid.
pub fn fenced_module_source(script: &str, surface_id: &str, run: RunId) -> String {
    let id_literal = serde_json::to_string(surface_id).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        "if (document.getElementById({id_literal})?.getAttribute(\"{RUN_STAMP_ATTRIBUTE}\") !== \"{run}\") \
         {{ throw new DOMException(\"run {run} was superseded\", \"AbortError\"); }} {script}"
    )
}
