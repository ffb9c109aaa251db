use std::rc::Rc;

use super::classify::{classify, ExecutionMode};
use super::outcome::{ExecutionOutcome, ScriptFailure};
use super::runner::{Launch, OutcomeSink, ScriptJob, ScriptRunner};
use super::shaders::{ShaderBoard, ShaderRole};
use super::surface::{RenderSurfaceManager, RunId, RunTicket, SurfaceBackend};
use crate::error::Result;

/// The two execution strategies, one per [`ExecutionMode`].
pub struct Runners {
    pub direct: Box<dyn ScriptRunner>,
    pub module: Box<dyn ScriptRunner>,
}

/// Runs one (script, vertex, fragment) triple at a time against a freshly
/// reset surface.
pub struct ExecutionHost<B: SurfaceBackend, S: ShaderBoard> {
    surfaces: RenderSurfaceManager<B>,
    shaders: S,
    shader_ids: [(ShaderRole, String); 2],
    runners: Runners,
    sink: OutcomeSink,
}

impl<B: SurfaceBackend, S: ShaderBoard> ExecutionHost<B, S> {
    /// `sink` receives outcomes of module-mode runs, but only while the run
    /// that produced them is still the newest one.
    pub fn new(
        surfaces: RenderSurfaceManager<B>,
        shaders: S,
        vertex_id: impl Into<String>,
        fragment_id: impl Into<String>,
        runners: Runners,
        sink: impl Fn(RunId, ExecutionOutcome) + 'static,
    ) -> Self {
        Self {
            surfaces,
            shaders,
            shader_ids: [
                (ShaderRole::Vertex, vertex_id.into()),
                (ShaderRole::Fragment, fragment_id.into()),
            ],
            runners,
            sink: Rc::new(sink),
        }
    }

    pub fn surfaces(&self) -> &RenderSurfaceManager<B> {
        &self.surfaces
    }

    pub fn surfaces_mut(&mut self) -> &mut RenderSurfaceManager<B> {
        &mut self.surfaces
    }

    pub fn shaders(&self) -> &S {
        &self.shaders
    }

    /// Resets the surface, republishes shaders and launches `script`.
    ///
    /// Never fails: host problems (no canvas mounted, no shader container)
    /// come back as a `HostError` failure, just like script errors.
    pub fn run(&mut self, script: &str, vertex_source: &str, fragment_source: &str) -> Launch {
        let ticket = match self.prepare(vertex_source, fragment_source) {
            Ok(ticket) => ticket,
            Err(err) => {
                let failure = ScriptFailure::host(&err);
                tracing::error!(error = %err, "could not prepare run");
                return Launch::Settled(ExecutionOutcome::Failed(failure));
            }
        };

        let mode = classify(script);
        let run = ticket.id();
        tracing::debug!(%run, ?mode, bytes = script.len(), "launching snippet");
        let runner = match mode {
            ExecutionMode::Direct => &self.runners.direct,
            ExecutionMode::Module => &self.runners.module,
        };
        let job = ScriptJob {
            script,
            surface_id: &self.surfaces.spec().id,
            ticket: ticket.clone(),
        };
        let launch = runner.launch(job, guarded_sink(ticket, Rc::clone(&self.sink)));
        if let Launch::Settled(outcome) = &launch {
            log_outcome(run, outcome);
        }
        launch
    }

    /// Stops the live animation loop and orphans any in-flight module run.
    /// Used when the view goes away without another run following.
    pub fn stand_down(&mut self) {
        self.surfaces.stand_down();
    }

    fn prepare(&mut self, vertex_source: &str, fragment_source: &str) -> Result<RunTicket> {
        let (ticket, _surface) = self.surfaces.reset()?;
        self.shaders.clear()?;
        let sources = [vertex_source, fragment_source];
        for ((role, element_id), source) in self.shader_ids.iter().zip(sources) {
            self.shaders.publish(*role, element_id, source)?;
        }
        Ok(ticket)
    }
}

fn guarded_sink(ticket: RunTicket, downstream: OutcomeSink) -> OutcomeSink {
    Rc::new(move |run, outcome| {
        if !ticket.is_current() {
            match outcome.failure() {
                Some(failure) => tracing::debug!(%run, %failure, "dropping failure of superseded run"),
                None => tracing::debug!(%run, "dropping outcome of superseded run"),
            }
            return;
        }
        log_outcome(run, &outcome);
        downstream(run, outcome);
    })
}

fn log_outcome(run: RunId, outcome: &ExecutionOutcome) {
    match outcome {
        ExecutionOutcome::Ok => tracing::debug!(%run, "snippet ran"),
        ExecutionOutcome::Failed(failure) => tracing::warn!(
            %run,
            origin = ?failure.origin,
            kind = %failure.kind,
            "snippet failed: {}",
            failure.message
        ),
    }
}
