use std::fmt;

use crate::error::PlaygroundError;

/// Where a failure was caught.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOrigin {
    /// Thrown while compiling or invoking a direct-mode script.
    Direct,
    /// Rejected dynamic import of a module-mode script.
    Module,
    /// The page was not in a state to run anything (missing canvas, ...).
    Host,
}

/// A failed run, reduced to the error's class name and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFailure {
    pub origin: FailureOrigin,
    pub kind: String,
    pub message: String,
}

impl ScriptFailure {
    pub fn new(origin: FailureOrigin, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            origin,
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn host(err: &PlaygroundError) -> Self {
        Self::new(FailureOrigin::Host, "HostError", err.to_string())
    }
}

impl fmt::Display for ScriptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Ok,
    Failed(ScriptFailure),
}

impl ExecutionOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, ExecutionOutcome::Ok)
    }

    pub fn failure(&self) -> Option<&ScriptFailure> {
        match self {
            ExecutionOutcome::Ok => None,
            ExecutionOutcome::Failed(failure) => Some(failure),
        }
    }
}

impl From<Result<(), ScriptFailure>> for ExecutionOutcome {
    fn from(result: Result<(), ScriptFailure>) -> Self {
        match result {
            Ok(()) => ExecutionOutcome::Ok,
            Err(failure) => ExecutionOutcome::Failed(failure),
        }
    }
}
