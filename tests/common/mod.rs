//! In-memory stand-ins for the browser: a surface backend with a frame
//! scheduler, a shader board, and runners that understand a tiny script
//! language (`loop NAME`, `throw Kind: message`, statements split on `;`).
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use webgl_hub::exec::{
    ExecutionHost, ExecutionOutcome, FailureOrigin, FrameHandle, Launch, OutcomeSink,
    RenderSurfaceManager, RunId, Runners, ScriptFailure, ScriptJob, ScriptRunner, ShaderBoard,
    ShaderRole, SurfaceBackend, SurfaceSpec,
};
use webgl_hub::{PlaygroundError, Result};

pub type SharedWorld = Rc<RefCell<World>>;
pub type Inbox = Rc<RefCell<Vec<(RunId, ExecutionOutcome)>>>;

pub struct PendingModule {
    pub run: RunId,
    pub surface_id: String,
    pub script: String,
    sink: OutcomeSink,
}

pub struct World {
    pub mounted: Option<u32>,
    pub attached: Vec<u32>,
    next_surface: u32,
    pub stamps: HashMap<u32, RunId>,
    pub parked: HashMap<u32, FrameHandle>,
    scheduled: BTreeMap<FrameHandle, (u32, String)>,
    next_frame: FrameHandle,
    pub cancelled: Vec<FrameHandle>,
    pub ticks: Vec<String>,
    pub published: Vec<(ShaderRole, String, String)>,
    pub clears: usize,
    pub board_missing: bool,
    pub pending: Vec<PendingModule>,
}

impl World {
    /// A page with one unstamped canvas mounted.
    pub fn new() -> SharedWorld {
        Rc::new(RefCell::new(World {
            mounted: Some(0),
            attached: vec![0],
            next_surface: 1,
            stamps: HashMap::new(),
            parked: HashMap::new(),
            scheduled: BTreeMap::new(),
            next_frame: 1,
            cancelled: Vec::new(),
            ticks: Vec::new(),
            published: Vec::new(),
            clears: 0,
            board_missing: false,
            pending: Vec::new(),
        }))
    }

    /// One animation frame: every scheduled callback fires once and
    /// re-requests itself, parking the new id on its surface.
    pub fn tick(&mut self) {
        let due = std::mem::take(&mut self.scheduled);
        for (_, (surface, label)) in due {
            self.ticks.push(label.clone());
            self.request(surface, label);
        }
    }

    pub fn live_loops(&self) -> usize {
        self.scheduled.len()
    }

    pub fn loop_labels(&self) -> Vec<String> {
        self.scheduled.values().map(|(_, label)| label.clone()).collect()
    }

    /// The view re-rendered: a brand-new, unstamped canvas replaces the DOM.
    pub fn remount(&mut self) {
        let id = self.next_surface;
        self.next_surface += 1;
        self.attached = vec![id];
        self.mounted = Some(id);
    }

    /// A deferred callback requesting a frame for an arbitrary surface.
    pub fn start_loop_on(&mut self, surface: u32, label: &str) {
        self.request(surface, label.to_string());
    }

    pub fn shader(&self, role: ShaderRole) -> Option<&str> {
        self.published
            .iter()
            .find(|(r, _, _)| *r == role)
            .map(|(_, _, source)| source.as_str())
    }

    fn request(&mut self, surface: u32, label: String) {
        let frame = self.next_frame;
        self.next_frame += 1;
        self.scheduled.insert(frame, (surface, label));
        self.parked.insert(surface, frame);
    }

    fn perform(&mut self, origin: FailureOrigin, script: &str) -> ExecutionOutcome {
        for statement in script.split(';').map(str::trim) {
            if let Some(label) = statement.strip_prefix("loop ") {
                if let Some(surface) = self.mounted {
                    self.request(surface, label.to_string());
                }
            } else if let Some(error) = statement.strip_prefix("throw ") {
                let (kind, message) = error.split_once(": ").unwrap_or(("Error", error));
                return ExecutionOutcome::Failed(ScriptFailure::new(origin, kind, message));
            }
        }
        ExecutionOutcome::Ok
    }
}

pub struct FakeSurface(pub SharedWorld);

impl SurfaceBackend for FakeSurface {
    type Handle = u32;

    fn locate(&self, _spec: &SurfaceSpec) -> Option<u32> {
        self.0.borrow().mounted
    }

    fn pending_frame(&self, surface: &u32) -> Option<FrameHandle> {
        self.0.borrow().parked.get(surface).copied()
    }

    fn cancel_frame(&mut self, surface: &u32, frame: FrameHandle) {
        let mut world = self.0.borrow_mut();
        world.scheduled.remove(&frame);
        world.parked.remove(surface);
        world.cancelled.push(frame);
    }

    fn replace(&mut self, old: &u32, _spec: &SurfaceSpec, run: RunId) -> Result<u32> {
        let mut world = self.0.borrow_mut();
        assert!(world.attached.contains(old), "replacing a detached surface");
        let id = world.next_surface;
        world.next_surface += 1;
        world.attached.retain(|s| s != old);
        world.attached.push(id);
        world.mounted = Some(id);
        world.stamps.insert(id, run);
        Ok(id)
    }

    fn unstamp(&mut self, surface: &u32) {
        self.0.borrow_mut().stamps.remove(surface);
    }
}

pub struct FakeBoard(pub SharedWorld);

impl ShaderBoard for FakeBoard {
    fn clear(&mut self) -> Result<()> {
        let mut world = self.0.borrow_mut();
        if world.board_missing {
            return Err(PlaygroundError::ShaderContainerMissing("shader-sources".into()));
        }
        world.published.clear();
        world.clears += 1;
        Ok(())
    }

    fn publish(&mut self, role: ShaderRole, element_id: &str, source: &str) -> Result<()> {
        self.0
            .borrow_mut()
            .published
            .push((role, element_id.to_string(), source.to_string()));
        Ok(())
    }
}

pub struct FakeDirect(pub SharedWorld);

impl ScriptRunner for FakeDirect {
    fn launch(&self, job: ScriptJob<'_>, _sink: OutcomeSink) -> Launch {
        Launch::Settled(self.0.borrow_mut().perform(FailureOrigin::Direct, job.script))
    }
}

/// Parks every module until [`settle`] is called.
pub struct FakeModule(pub SharedWorld);

impl ScriptRunner for FakeModule {
    fn launch(&self, job: ScriptJob<'_>, sink: OutcomeSink) -> Launch {
        let run = job.ticket.id();
        self.0.borrow_mut().pending.push(PendingModule {
            run,
            surface_id: job.surface_id.to_string(),
            script: job.script.to_string(),
            sink,
        });
        Launch::Pending(run)
    }
}

/// Finishes the oldest parked module. Like the fence prepended in the
/// browser, it aborts when the mounted surface carries another run's stamp.
pub fn settle(world: &SharedWorld) -> RunId {
    let (module, outcome) = {
        let mut world = world.borrow_mut();
        let module = world.pending.remove(0);
        let stamp = world.mounted.and_then(|s| world.stamps.get(&s).copied());
        let outcome = if stamp == Some(module.run) {
            world.perform(FailureOrigin::Module, &module.script)
        } else {
            ExecutionOutcome::Failed(ScriptFailure::new(
                FailureOrigin::Module,
                "AbortError",
                format!("run {} was superseded", module.run),
            ))
        };
        (module, outcome)
    };
    (module.sink)(module.run, outcome);
    module.run
}

pub fn spec() -> SurfaceSpec {
    SurfaceSpec {
        id: "gl-canvas".into(),
        width: 512,
        height: 512,
        class: "w-full h-full".into(),
    }
}

pub fn host(world: &SharedWorld) -> (ExecutionHost<FakeSurface, FakeBoard>, Inbox) {
    let inbox: Inbox = Rc::default();
    let received = Rc::clone(&inbox);
    let host = ExecutionHost::new(
        RenderSurfaceManager::new(FakeSurface(Rc::clone(world)), spec()),
        FakeBoard(Rc::clone(world)),
        "vertex-shader",
        "fragment-shader",
        Runners {
            direct: Box::new(FakeDirect(Rc::clone(world))),
            module: Box::new(FakeModule(Rc::clone(world))),
        },
        move |run, outcome| received.borrow_mut().push((run, outcome)),
    );
    (host, inbox)
}

pub fn failed(kind: &str, message: &str) -> (String, String) {
    (kind.to_string(), message.to_string())
}

pub fn failure_of(launch: &Launch) -> Option<(String, String)> {
    launch
        .outcome()
        .and_then(ExecutionOutcome::failure)
        .map(|f| (f.kind.clone(), f.message.clone()))
}
