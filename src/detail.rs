//! Lifecycle of the example detail page around an [`ExecutionHost`].

use std::time::Duration;

use crate::catalog::{Catalog, Example};
use crate::error::{PlaygroundError, Result};
use crate::exec::{
    ExecutionHost, ExecutionOutcome, Launch, RunId, ScriptFailure, ShaderBoard, SurfaceBackend,
};
use crate::snippet::{SnippetField, SnippetSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing selected.
    Idle,
    /// Snippets seeded, auto-run not fired yet.
    Seeded,
    /// Auto-run happened.
    Running,
    /// At least one explicit run happened.
    Ran,
    /// The requested id is not in the catalog.
    NotFound,
}

/// Request to call [`DetailView::auto_run`] with `generation` after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoRun {
    pub generation: u64,
    pub delay: Duration,
}

pub struct DetailView<B: SurfaceBackend, S: ShaderBoard> {
    host: ExecutionHost<B, S>,
    example: Option<Example>,
    snippets: SnippetSet,
    error: Option<ScriptFailure>,
    phase: Phase,
    generation: u64,
    awaiting: Option<RunId>,
    auto_run_delay: Duration,
    rerun_on_edit: bool,
}

impl<B: SurfaceBackend, S: ShaderBoard> DetailView<B, S> {
    pub fn new(host: ExecutionHost<B, S>, auto_run_delay: Duration) -> Self {
        Self {
            host,
            example: None,
            snippets: SnippetSet::default(),
            error: None,
            phase: Phase::Idle,
            generation: 0,
            awaiting: None,
            auto_run_delay,
            rerun_on_edit: false,
        }
    }

    /// Edits re-arm the auto-run debounce.
    pub fn with_rerun_on_edit(mut self, enabled: bool) -> Self {
        self.rerun_on_edit = enabled;
        self
    }

    pub fn host(&self) -> &ExecutionHost<B, S> {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut ExecutionHost<B, S> {
        &mut self.host
    }

    pub fn example(&self) -> Option<&Example> {
        self.example.as_ref()
    }

    pub fn snippets(&self) -> &SnippetSet {
        &self.snippets
    }

    pub fn error(&self) -> Option<&ScriptFailure> {
        self.error.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Seeds the view from `id`. Any pending auto-run or module outcome of
    /// the previous selection is abandoned.
    pub fn select(&mut self, catalog: &Catalog, id: &str) -> Result<AutoRun> {
        self.abandon();
        self.snippets = SnippetSet::default();
        self.error = None;
        match catalog.get(id) {
            Some(example) => {
                tracing::info!(example = %example.id, "example selected");
                self.snippets = SnippetSet::seeded(&example.code);
                self.example = Some(example.clone());
                self.phase = Phase::Seeded;
                Ok(self.arm())
            }
            None => {
                tracing::info!(example = %id, "example not found");
                self.example = None;
                self.phase = Phase::NotFound;
                Err(PlaygroundError::NotFound(id.to_string()))
            }
        }
    }

    /// Leaves the page: stops the live loop and forgets the selection.
    pub fn leave(&mut self) {
        self.abandon();
        self.example = None;
        self.snippets = SnippetSet::default();
        self.error = None;
        self.phase = Phase::Idle;
    }

    /// Debounced run. Ignored when `generation` is no longer the newest.
    pub fn auto_run(&mut self, generation: u64) -> Option<Launch> {
        if generation != self.generation || self.example.is_none() {
            tracing::debug!(generation, current = self.generation, "skipping stale auto-run");
            return None;
        }
        if self.phase == Phase::Seeded {
            self.phase = Phase::Running;
        }
        Some(self.execute())
    }

    /// The "Run" button.
    pub fn run(&mut self) -> Option<Launch> {
        self.example.as_ref()?;
        self.phase = Phase::Ran;
        Some(self.execute())
    }

    /// Replaces one snippet. Returns a new auto-run request when re-run on
    /// edit is enabled.
    pub fn edit(&mut self, field: SnippetField, value: impl Into<String>) -> Option<AutoRun> {
        self.example.as_ref()?;
        self.snippets.set(field, value);
        self.rerun_on_edit.then(|| self.arm())
    }

    /// Applies a module outcome delivered after `run` returned. Returns
    /// whether it was accepted.
    pub fn complete(&mut self, run: RunId, outcome: ExecutionOutcome) -> bool {
        if self.awaiting != Some(run) {
            tracing::debug!(%run, "ignoring outcome for a run this view no longer awaits");
            return false;
        }
        self.awaiting = None;
        self.apply(&outcome);
        true
    }

    fn execute(&mut self) -> Launch {
        self.error = None;
        self.awaiting = None;
        let SnippetSet {
            script,
            vertex_shader,
            fragment_shader,
        } = &self.snippets;
        let launch = self.host.run(script, vertex_shader, fragment_shader);
        match &launch {
            Launch::Settled(outcome) => self.apply(outcome),
            Launch::Pending(run) => self.awaiting = Some(*run),
        }
        launch
    }

    fn apply(&mut self, outcome: &ExecutionOutcome) {
        self.error = outcome.failure().cloned();
    }

    fn arm(&mut self) -> AutoRun {
        self.generation += 1;
        AutoRun {
            generation: self.generation,
            delay: self.auto_run_delay,
        }
    }

    fn abandon(&mut self) {
        self.generation += 1;
        self.awaiting = None;
        self.host.stand_down();
    }
}
