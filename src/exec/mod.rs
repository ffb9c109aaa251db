//! The run/re-run engine.
//!
//! [`ExecutionHost::run`] resets the rendering surface, publishes shader
//! sources, and hands the script to a [`ScriptRunner`] picked by
//! [`classify`]. Everything that touches the browser sits behind the
//! [`SurfaceBackend`], [`ShaderBoard`] and [`ScriptRunner`] traits; the DOM
//! implementations live in `crate::wasm`.

mod classify;
mod host;
mod outcome;
mod runner;
mod shaders;
mod surface;

pub use classify::{classify, ExecutionMode};
pub use host::{ExecutionHost, Runners};
pub use outcome::{ExecutionOutcome, FailureOrigin, ScriptFailure};
pub use runner::{fenced_module_source, Launch, OutcomeSink, ScriptJob, ScriptRunner};
pub use shaders::{ShaderBoard, ShaderRole};
pub use surface::{
    FrameHandle, RenderSurfaceManager, RunId, RunTicket, SurfaceBackend, SurfaceSpec,
    FRAME_HANDLE_PROPERTY, RUN_STAMP_ATTRIBUTE,
};
