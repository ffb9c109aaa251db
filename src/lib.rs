#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! WebGL Hub: a browsable catalog of WebGL examples whose code can be
//! edited and re-run in place.
//!
//! The catalog, routing and the run/re-run engine are plain Rust and build on
//! any target. Browser bindings only compile when targeting wasm32.

pub mod catalog;
pub mod category;
pub mod config;
pub mod detail;
pub mod error;
pub mod exec;
pub mod route;
pub mod snippet;

pub use catalog::{Catalog, Example, ExampleCode};
pub use config::PlaygroundConfig;
pub use detail::{AutoRun, DetailView, Phase};
pub use error::{PlaygroundError, Result};
pub use exec::{ExecutionHost, ExecutionOutcome, Launch, ScriptFailure};
pub use route::Route;

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    mod app;
    pub mod dom;
    mod editor;
    pub mod runner;
    mod view;

    #[cfg_attr(not(test), wasm_bindgen(start))]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let config = app::load_config(&document)?;

        tracing_wasm::set_as_global_default_with_config(
            tracing_wasm::WASMLayerConfigBuilder::new()
                .set_max_level(config.max_level()?)
                .build(),
        );

        if document.get_element_by_id(&config.root_id).is_none() {
            tracing::warn!(root = %config.root_id, "no mount point on this page");
            return Ok(());
        }
        app::App::mount(window, document, config)?;
        Ok(())
    }
}

