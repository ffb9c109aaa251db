use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::error::{PlaygroundError, Result};

/// Property on the canvas where authored scripts keep their
/// `requestAnimationFrame` id. The next reset cancels whatever it holds.
pub const FRAME_HANDLE_PROPERTY: &str = "animationFrameId";

/// Attribute stamped on every fresh canvas with the id of the run it was
/// built for.
pub const RUN_STAMP_ATTRIBUTE: &str = "data-run";

pub type FrameHandle = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(u64);

impl RunId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Proof that a callback belongs to a particular run. Goes stale as soon as
/// the surface is reset again or the manager stands down.
#[derive(Debug, Clone)]
pub struct RunTicket {
    id: RunId,
    epoch: Rc<Cell<u64>>,
}

impl RunTicket {
    pub fn id(&self) -> RunId {
        self.id
    }

    pub fn is_current(&self) -> bool {
        self.epoch.get() == self.id.0
    }
}

/// Identity and attributes every replacement surface is built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSpec {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub class: String,
}

/// Environment primitive for creating and tearing down rendering surfaces.
pub trait SurfaceBackend {
    type Handle;

    /// The surface currently mounted under `spec.id`, if any.
    fn locate(&self, spec: &SurfaceSpec) -> Option<Self::Handle>;

    /// Animation frame the running script parked on the surface.
    fn pending_frame(&self, surface: &Self::Handle) -> Option<FrameHandle>;

    fn cancel_frame(&mut self, surface: &Self::Handle, frame: FrameHandle);

    /// Builds a fresh surface from `spec`, stamps it with `run` and mounts it
    /// in place of `old`.
    fn replace(&mut self, old: &Self::Handle, spec: &SurfaceSpec, run: RunId) -> Result<Self::Handle>;

    /// Drops the run stamp so no fenced module accepts the surface any more.
    fn unstamp(&mut self, surface: &Self::Handle);
}

/// Owns the single live rendering surface and the run epoch.
pub struct RenderSurfaceManager<B: SurfaceBackend> {
    backend: B,
    spec: SurfaceSpec,
    epoch: Rc<Cell<u64>>,
}

impl<B: SurfaceBackend> RenderSurfaceManager<B> {
    pub fn new(backend: B, spec: SurfaceSpec) -> Self {
        Self {
            backend,
            spec,
            epoch: Rc::new(Cell::new(0)),
        }
    }

    pub fn spec(&self) -> &SurfaceSpec {
        &self.spec
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Cancels the animation frame parked on the live surface.
    pub fn cancel_pending(&mut self) -> Option<FrameHandle> {
        let surface = self.backend.locate(&self.spec)?;
        self.cancel_on(&surface)
    }

    /// Invalidates every outstanding ticket without touching the surface.
    pub fn invalidate(&mut self) {
        self.epoch.set(self.epoch.get() + 1);
    }

    /// Leaves the live surface owned by no run: its loop is cancelled, its
    /// stamp removed and every ticket invalidated.
    pub fn stand_down(&mut self) {
        if let Some(surface) = self.backend.locate(&self.spec) {
            self.cancel_on(&surface);
            self.backend.unstamp(&surface);
        }
        self.invalidate();
    }

    /// Cancels the previous run's loop, bumps the epoch and swaps in a brand
    /// new surface. The epoch moves even when the swap fails, so a broken
    /// page never keeps an old ticket alive.
    pub fn reset(&mut self) -> Result<(RunTicket, B::Handle)> {
        let old = self.backend.locate(&self.spec);
        if let Some(old) = &old {
            self.cancel_on(old);
        }
        self.invalidate();
        let ticket = RunTicket {
            id: RunId(self.epoch.get()),
            epoch: Rc::clone(&self.epoch),
        };
        let old = old.ok_or_else(|| PlaygroundError::SurfaceMissing(self.spec.id.clone()))?;
        let fresh = self.backend.replace(&old, &self.spec, ticket.id)?;
        tracing::debug!(run = %ticket.id, surface = %self.spec.id, "rendering surface replaced");
        Ok((ticket, fresh))
    }

    fn cancel_on(&mut self, surface: &B::Handle) -> Option<FrameHandle> {
        let frame = self.backend.pending_frame(surface)?;
        self.backend.cancel_frame(surface, frame);
        tracing::debug!(frame, "cancelled previous animation frame");
        Some(frame)
    }
}
