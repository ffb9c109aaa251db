mod common;

use std::time::Duration;

use common::{host, settle, FakeBoard, FakeSurface, Inbox, SharedWorld, World};
use webgl_hub::exec::{ExecutionOutcome, Launch, ShaderRole};
use webgl_hub::snippet::SnippetField;
use webgl_hub::{Catalog, DetailView, Example, ExampleCode, Phase, PlaygroundError};

type View = DetailView<FakeSurface, FakeBoard>;

const DELAY: Duration = Duration::from_millis(100);

fn example(id: &str, script: &str) -> Example {
    Example {
        id: id.into(),
        title: id.into(),
        category: "WebGL Fundamentals".into(),
        summary: String::new(),
        description: String::new(),
        code: ExampleCode::new(format!("\n{script}\n"), "  void main() {}  ", ""),
    }
}

fn catalog() -> Catalog {
    Catalog::new(vec![
        example("spinner", "loop spinner"),
        example("module", "import m from 'm'; loop module"),
        example("broken", "throw ReferenceError: gl is not defined"),
    ])
    .unwrap()
}

fn view() -> (View, SharedWorld, Inbox) {
    let world = World::new();
    let (host, inbox) = host(&world);
    (DetailView::new(host, DELAY), world, inbox)
}

fn drain(view: &mut View, inbox: &Inbox) -> Vec<bool> {
    let delivered: Vec<_> = inbox.borrow_mut().drain(..).collect();
    delivered
        .into_iter()
        .map(|(run, outcome)| view.complete(run, outcome))
        .collect()
}

#[test]
fn selection_seeds_trimmed_snippets_and_arms_auto_run() {
    let (mut view, world, _) = view();
    let catalog = catalog();

    let auto = view.select(&catalog, "spinner").unwrap();

    assert_eq!(auto.delay, DELAY);
    assert_eq!(view.phase(), Phase::Seeded);
    assert_eq!(view.snippets().get(SnippetField::Script), "loop spinner");
    assert_eq!(view.snippets().get(SnippetField::VertexShader), "void main() {}");
    assert_eq!(view.example().map(|e| e.id.as_str()), Some("spinner"));
    // nothing runs before the debounce fires
    assert!(world.borrow().stamps.is_empty());

    let launch = view.auto_run(auto.generation).unwrap();
    assert_eq!(launch, Launch::Settled(ExecutionOutcome::Ok));
    assert_eq!(view.phase(), Phase::Running);
    assert_eq!(world.borrow().shader(ShaderRole::Vertex), Some("void main() {}"));
}

#[test]
fn builtin_hello_triangle_auto_runs_cleanly() {
    let (mut view, world, _) = view();
    let catalog = Catalog::builtin().unwrap();

    let auto = view.select(&catalog, "hello-triangle").unwrap();
    let launch = view.auto_run(auto.generation).unwrap();

    assert_eq!(launch, Launch::Settled(ExecutionOutcome::Ok));
    assert!(view.error().is_none());
    let world = world.borrow();
    assert_eq!(world.attached.len(), 1);
    assert!(world.shader(ShaderRole::Fragment).unwrap().contains("gl_FragColor"));
}

#[test]
fn stale_auto_run_is_ignored() {
    let (mut view, world, _) = view();
    let catalog = catalog();

    let first = view.select(&catalog, "spinner").unwrap();
    let second = view.select(&catalog, "broken").unwrap();

    assert!(view.auto_run(first.generation).is_none());
    assert!(world.borrow().stamps.is_empty());
    assert!(view.auto_run(second.generation).is_some());
}

#[test]
fn failures_show_until_the_next_clean_run() {
    let (mut view, _, _) = view();
    let catalog = catalog();

    let auto = view.select(&catalog, "broken").unwrap();
    view.auto_run(auto.generation);
    assert_eq!(
        view.error().map(ToString::to_string).as_deref(),
        Some("[ReferenceError] gl is not defined")
    );

    view.edit(SnippetField::Script, "draw");
    view.run();
    assert!(view.error().is_none());
    assert_eq!(view.phase(), Phase::Ran);
}

#[test]
fn explicit_runs_use_edited_text_and_never_roll_back() {
    let (mut view, world, _) = view();
    let catalog = catalog();
    view.select(&catalog, "spinner").unwrap();

    assert!(view.edit(SnippetField::Script, "throw TypeError: oops").is_none());
    view.edit(SnippetField::FragmentShader, "edited fragment");
    view.run();

    assert_eq!(view.error().map(|f| f.kind.as_str()), Some("TypeError"));
    assert_eq!(view.snippets().get(SnippetField::Script), "throw TypeError: oops");
    assert_eq!(world.borrow().shader(ShaderRole::Fragment), Some("edited fragment"));
}

#[test]
fn reselecting_clears_error_and_discards_edits() {
    let (mut view, _, _) = view();
    let catalog = catalog();

    let auto = view.select(&catalog, "broken").unwrap();
    view.auto_run(auto.generation);
    view.edit(SnippetField::VertexShader, "scribbles");
    assert!(view.error().is_some());

    view.select(&catalog, "spinner").unwrap();
    assert!(view.error().is_none());
    assert_eq!(view.snippets().get(SnippetField::VertexShader), "void main() {}");
}

#[test]
fn unknown_id_renders_not_found_without_running() {
    let (mut view, world, _) = view();
    let catalog = catalog();

    let err = view.select(&catalog, "nope").unwrap_err();

    assert!(matches!(err, PlaygroundError::NotFound(id) if id == "nope"));
    assert_eq!(view.phase(), Phase::NotFound);
    assert!(view.example().is_none());
    assert!(view.run().is_none());
    assert!(view.edit(SnippetField::Script, "x").is_none());
    assert!(world.borrow().stamps.is_empty());
}

#[test]
fn module_outcome_updates_the_error_panel_when_current() {
    let (mut view, world, inbox) = view();
    let catalog = Catalog::new(vec![example("bad-module", "import m from 'm'; throw TypeError: nope")]).unwrap();

    let auto = view.select(&catalog, "bad-module").unwrap();
    assert!(matches!(view.auto_run(auto.generation), Some(Launch::Pending(_))));
    assert!(view.error().is_none());

    settle(&world);
    assert_eq!(drain(&mut view, &inbox), [true]);
    assert_eq!(view.error().map(|f| f.message.as_str()), Some("nope"));
}

#[test]
fn switching_examples_mid_module_load_does_not_leak_into_the_new_one() {
    let (mut view, world, inbox) = view();
    let catalog = catalog();

    let auto = view.select(&catalog, "module").unwrap();
    view.auto_run(auto.generation);
    assert_eq!(world.borrow().pending.len(), 1);

    let auto = view.select(&catalog, "spinner").unwrap();
    view.auto_run(auto.generation);
    settle(&world);

    assert!(drain(&mut view, &inbox).is_empty());
    assert!(view.error().is_none());
    assert_eq!(world.borrow().loop_labels(), ["spinner"]);
}

#[test]
fn outcome_for_an_unawaited_run_is_rejected() {
    let (mut view, world, inbox) = view();
    let catalog = catalog();

    let auto = view.select(&catalog, "module").unwrap();
    view.auto_run(auto.generation);
    settle(&world);
    let (run, outcome) = inbox.borrow()[0].clone();

    assert!(view.complete(run, outcome.clone()));
    // a second delivery of the same run is not awaited any more
    assert!(!view.complete(run, outcome));
}

#[test]
fn rerun_on_edit_rearms_the_debounce() {
    let world = World::new();
    let (host, _) = host(&world);
    let mut view = DetailView::new(host, DELAY).with_rerun_on_edit(true);
    let catalog = catalog();

    let seeded = view.select(&catalog, "spinner").unwrap();
    let edited = view.edit(SnippetField::Script, "loop edited").unwrap();

    assert!(edited.generation > seeded.generation);
    assert!(view.auto_run(seeded.generation).is_none());
    view.auto_run(edited.generation).unwrap();
    assert_eq!(world.borrow().loop_labels(), ["edited"]);
}

#[test]
fn leaving_the_page_stops_the_loop() {
    let (mut view, world, _) = view();
    let catalog = catalog();

    let auto = view.select(&catalog, "spinner").unwrap();
    view.auto_run(auto.generation);
    assert_eq!(world.borrow().live_loops(), 1);

    view.leave();

    assert_eq!(view.phase(), Phase::Idle);
    assert_eq!(world.borrow().live_loops(), 0);
    assert!(view.auto_run(auto.generation).is_none());
}
