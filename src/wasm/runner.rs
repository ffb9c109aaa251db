//! The two ways a snippet reaches the JavaScript engine.

use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Blob, BlobPropertyBag, Url};

use crate::exec::{
    fenced_module_source, ExecutionOutcome, FailureOrigin, Launch, OutcomeSink, ScriptFailure,
    ScriptJob, ScriptRunner,
};

#[wasm_bindgen(inline_js = "export function import_module(url) { return import(url); }")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn import_module(url: &str) -> Result<Promise, JsValue>;
}

/// Reduces a thrown JS value to `name` and `message`. Values that are not
/// error-like are reported as `Exception` with their string form.
pub fn failure_from_js(origin: FailureOrigin, err: &JsValue) -> ScriptFailure {
    let text = |key: &str| {
        Reflect::get(err, &JsValue::from_str(key))
            .ok()
            .and_then(|value| value.as_string())
    };
    match (text("name"), text("message")) {
        (Some(name), Some(message)) => ScriptFailure::new(origin, name, message),
        _ => ScriptFailure::new(
            origin,
            "Exception",
            err.as_string().unwrap_or_else(|| format!("{err:?}")),
        ),
    }
}

/// Compiles the script as the body of an anonymous function and calls it in
/// the current turn.
pub struct DirectRunner;

impl DirectRunner {
    fn execute(script: &str) -> Result<(), JsValue> {
        // the newline keeps a trailing line comment from swallowing the brace
        let body = format!("(function() {{ {script}\n}})()");
        let constructor: Function = Reflect::get(&js_sys::global(), &JsValue::from_str("Function"))?
            .dyn_into()?;
        let compiled: Function =
            Reflect::construct(&constructor, &Array::of1(&JsValue::from_str(&body)))?.dyn_into()?;
        compiled.call0(&JsValue::UNDEFINED)?;
        Ok(())
    }
}

impl ScriptRunner for DirectRunner {
    fn launch(&self, job: ScriptJob<'_>, _sink: OutcomeSink) -> Launch {
        let outcome = Self::execute(job.script)
            .map_err(|err| failure_from_js(FailureOrigin::Direct, &err))
            .into();
        Launch::Settled(outcome)
    }
}

/// Loads the script as an ES module from a blob URL.
pub struct ModuleRunner;

impl ModuleRunner {
    fn blob_url(source: &str) -> Result<String, JsValue> {
        let parts = Array::of1(&JsValue::from_str(source));
        let options = BlobPropertyBag::new();
        options.set_type("application/javascript");
        let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
        Url::create_object_url_with_blob(&blob)
    }

    fn revoke(url: &str) {
        if let Err(err) = Url::revoke_object_url(url) {
            tracing::warn!(%url, error = ?err, "could not revoke module URL");
        }
    }
}

impl ScriptRunner for ModuleRunner {
    fn launch(&self, job: ScriptJob<'_>, sink: OutcomeSink) -> Launch {
        let run = job.ticket.id();
        let source = fenced_module_source(job.script, job.surface_id, run);
        let failed = |err: JsValue| {
            Launch::Settled(ExecutionOutcome::Failed(failure_from_js(FailureOrigin::Module, &err)))
        };

        let url = match Self::blob_url(&source) {
            Ok(url) => url,
            Err(err) => return failed(err),
        };
        let promise = match import_module(&url) {
            Ok(promise) => promise,
            Err(err) => {
                Self::revoke(&url);
                return failed(err);
            }
        };

        spawn_local(async move {
            let settled = JsFuture::from(promise).await;
            Self::revoke(&url);
            let outcome = match settled {
                Ok(_) => ExecutionOutcome::Ok,
                Err(err) => ExecutionOutcome::Failed(failure_from_js(FailureOrigin::Module, &err)),
            };
            sink(run, outcome);
        });
        Launch::Pending(run)
    }
}
