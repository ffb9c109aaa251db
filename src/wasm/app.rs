use std::cell::{RefCell, RefMut};
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, Window};

use super::dom::{DomShaderBoard, DomSurface};
use super::editor::SnippetEditor;
use super::runner::{DirectRunner, ModuleRunner};
use super::view;
use crate::catalog::Catalog;
use crate::config::{PlaygroundConfig, CONFIG_ELEMENT_ID};
use crate::detail::{AutoRun, DetailView};
use crate::error::{PlaygroundError, Result};
use crate::exec::{ExecutionHost, ExecutionOutcome, RenderSurfaceManager, RunId, Runners};
use crate::route::Route;
use crate::snippet::SnippetField;

type Shared = Rc<RefCell<App>>;

/// Reads overrides from `<script type="application/json" id="webgl-hub-config">`.
pub fn load_config(document: &Document) -> Result<PlaygroundConfig> {
    match document.get_element_by_id(CONFIG_ELEMENT_ID) {
        Some(element) => PlaygroundConfig::from_json(&element.text_content().unwrap_or_default()),
        None => Ok(PlaygroundConfig::default()),
    }
}

/// Page-level state: the catalog, the detail lifecycle and whatever DOM
/// listeners the current page owns.
pub struct App {
    window: Window,
    document: Document,
    root: Element,
    config: PlaygroundConfig,
    catalog: Catalog,
    detail: DetailView<DomSurface, DomShaderBoard>,
    editors: Vec<SnippetEditor>,
    run_click: Option<Closure<dyn FnMut(Event)>>,
    error_panel: Option<Element>,
    timer: Option<i32>,
}

impl App {
    pub fn mount(window: Window, document: Document, config: PlaygroundConfig) -> Result<Shared, JsValue> {
        let catalog = Catalog::builtin()?;
        let root = document
            .get_element_by_id(&config.root_id)
            .ok_or_else(|| PlaygroundError::Dom(format!("no #{} element to mount into", config.root_id)))?;
        tracing::info!(examples = catalog.len(), "mounting WebGL Hub");

        let app: Shared = Rc::new_cyclic(|weak: &Weak<RefCell<App>>| {
            let inbox = weak.clone();
            let surfaces = RenderSurfaceManager::new(
                DomSurface::new(window.clone(), document.clone()),
                config.surface_spec(),
            );
            let host = ExecutionHost::new(
                surfaces,
                DomShaderBoard::new(document.clone(), config.shader_container_id.clone()),
                config.vertex_shader_id.clone(),
                config.fragment_shader_id.clone(),
                Runners {
                    direct: Box::new(DirectRunner),
                    module: Box::new(ModuleRunner),
                },
                move |run, outcome| App::deliver(&inbox, run, outcome),
            );
            let detail = DetailView::new(host, config.auto_run_delay())
                .with_rerun_on_edit(config.rerun_on_edit);
            RefCell::new(App {
                window: window.clone(),
                document: document.clone(),
                root,
                config,
                catalog,
                detail,
                editors: Vec::new(),
                run_click: None,
                error_panel: None,
                timer: None,
            })
        });

        // the listener lives as long as the page and keeps the app alive
        let owner = Rc::clone(&app);
        let on_hash = Closure::wrap(Box::new(move |_event: Event| {
            App::route(&owner);
        }) as Box<dyn FnMut(Event)>);
        window.add_event_listener_with_callback("hashchange", on_hash.as_ref().unchecked_ref())?;
        on_hash.forget();

        App::route(&app);
        Ok(app)
    }

    /// Snippets run while the app is borrowed. Listeners they fire
    /// synchronously must not borrow it again.
    fn enter<'a>(app: &'a Shared, event: &str) -> Option<RefMut<'a, App>> {
        match app.try_borrow_mut() {
            Ok(this) => Some(this),
            Err(_) => {
                tracing::warn!(event, "fired from inside a running snippet; ignored");
                None
            }
        }
    }

    fn route(app: &Shared) {
        let Ok(mut this) = app.try_borrow_mut() else {
            App::defer_route(app);
            return;
        };
        let hash = this.window.location().hash().unwrap_or_default();
        let route = Route::parse(&hash);
        this.set_head(&route);
        let rendered = match route {
            Route::Home => this.show_home(),
            Route::Example(id) => this.show_example(&id, Rc::downgrade(app)),
        };
        if let Err(err) = rendered {
            tracing::error!(error = ?err, %hash, "failed to render page");
        }
    }

    /// A snippet navigated while running: route once it has returned.
    fn defer_route(app: &Shared) {
        let weak = Rc::downgrade(app);
        let callback = Closure::once_into_js(move || {
            if let Some(app) = weak.upgrade() {
                App::route(&app);
            }
        });
        let scheduled = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no window"))
            .and_then(|window| {
                window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.unchecked_ref(),
                    0,
                )
            });
        if let Err(err) = scheduled {
            tracing::error!(error = ?err, "could not defer navigation");
        }
    }

    fn set_head(&self, route: &Route) {
        let head = route.page_head(&self.catalog);
        self.document.set_title(&head.title);
        if let Ok(Some(meta)) = self.document.query_selector("meta[name=\"description\"]") {
            if let Err(err) = meta.set_attribute("content", &head.description) {
                tracing::warn!(error = ?err, "could not update meta description");
            }
        }
    }

    fn show_home(&mut self) -> Result<(), JsValue> {
        self.cancel_timer();
        self.detail.leave();
        self.clear_page();
        view::render_home(&self.document, &self.root, &self.catalog)
    }

    fn show_example(&mut self, id: &str, weak: Weak<RefCell<App>>) -> Result<(), JsValue> {
        self.cancel_timer();
        // select before clearing so the old canvas is still there to stand down
        let selected = self.detail.select(&self.catalog, id);
        self.clear_page();
        match selected {
            Ok(auto) => {
                self.render_detail(weak.clone())?;
                self.schedule(weak, auto)
            }
            Err(PlaygroundError::NotFound(_)) => view::render_not_found(&self.document, &self.root),
            Err(err) => Err(err.into()),
        }
    }

    fn render_detail(&mut self, weak: Weak<RefCell<App>>) -> Result<(), JsValue> {
        let example = match self.detail.example() {
            Some(example) => example.clone(),
            None => return Ok(()),
        };
        let dom = view::render_detail(&self.document, &self.root, &example, &self.config)?;

        let clicks = weak.clone();
        let on_click = Closure::wrap(Box::new(move |_event: Event| {
            if let Some(app) = clicks.upgrade() {
                App::run_clicked(&app);
            }
        }) as Box<dyn FnMut(Event)>);
        dom.run_button
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        self.run_click = Some(on_click);

        let script_height = if example.uses_three_js() { "h-96 lg:h-full" } else { "h-64" };
        for field in SnippetField::ALL {
            let seeded = match field {
                SnippetField::Script => &example.code.script,
                SnippetField::VertexShader => &example.code.vertex_shader,
                SnippetField::FragmentShader => &example.code.fragment_shader,
            };
            if field != SnippetField::Script && seeded.trim().is_empty() {
                continue;
            }
            let (height, controls) = match field {
                SnippetField::Script => (script_height, Some(&dom.run_button)),
                _ => ("h-48", None),
            };
            let edits = weak.clone();
            let editor = SnippetEditor::mount(
                &self.document,
                &dom.editors,
                field,
                self.detail.snippets().get(field),
                height,
                controls,
                move |field, value| App::edited(&edits, field, value),
            )?;
            self.editors.push(editor);
        }

        self.error_panel = Some(dom.error_panel);
        Ok(())
    }

    fn run_clicked(app: &Shared) {
        let Some(mut this) = App::enter(app, "click") else { return };
        this.cancel_timer();
        this.detail.run();
        this.refresh_error();
    }

    fn edited(weak: &Weak<RefCell<App>>, field: SnippetField, value: String) {
        let Some(app) = weak.upgrade() else { return };
        let Some(mut this) = App::enter(&app, "input") else { return };
        if let Some(auto) = this.detail.edit(field, value) {
            this.cancel_timer();
            if let Err(err) = this.schedule(weak.clone(), auto) {
                tracing::error!(error = ?err, "could not schedule re-run");
            }
        }
    }

    fn auto_run(app: &Shared, generation: u64) {
        let Some(mut this) = App::enter(app, "auto-run") else { return };
        this.timer = None;
        if this.detail.auto_run(generation).is_some() {
            this.refresh_error();
        }
    }

    fn deliver(weak: &Weak<RefCell<App>>, run: RunId, outcome: ExecutionOutcome) {
        let Some(app) = weak.upgrade() else { return };
        let Ok(mut this) = app.try_borrow_mut() else {
            tracing::warn!(%run, "app busy, dropping module outcome");
            return;
        };
        if this.detail.complete(run, outcome) {
            this.refresh_error();
        }
    }

    fn schedule(&mut self, weak: Weak<RefCell<App>>, auto: AutoRun) -> Result<(), JsValue> {
        let generation = auto.generation;
        let callback = Closure::once_into_js(move || {
            if let Some(app) = weak.upgrade() {
                App::auto_run(&app, generation);
            }
        });
        let delay = i32::try_from(auto.delay.as_millis()).unwrap_or(i32::MAX);
        let id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)?;
        self.timer = Some(id);
        Ok(())
    }

    fn cancel_timer(&mut self) {
        if let Some(id) = self.timer.take() {
            self.window.clear_timeout_with_handle(id);
        }
    }

    fn refresh_error(&self) {
        let Some(panel) = &self.error_panel else { return };
        if let Err(err) = view::show_error(&self.document, panel, self.detail.error()) {
            tracing::error!(error = ?err, "could not update error panel");
        }
    }

    fn clear_page(&mut self) {
        self.editors.clear();
        self.run_click = None;
        self.error_panel = None;
        self.root.set_inner_html("");
    }
}
