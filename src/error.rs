use thiserror::Error;

/// Errors raised by the playground itself. Failures inside user snippets are
/// not errors; they are reported as [`crate::exec::ScriptFailure`] values.
#[derive(Debug, Error)]
pub enum PlaygroundError {
    #[error("example '{0}' not found")]
    NotFound(String),
    #[error("example id '{0}' appears more than once in the catalog")]
    DuplicateExample(String),
    #[error("catalog entry has an empty id")]
    EmptyExampleId,
    #[error("no bundled code for example '{0}'")]
    MissingSampleCode(String),
    #[error("failed to parse catalog manifest: {0}")]
    Manifest(#[source] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("no rendering surface with id '{0}' is mounted")]
    SurfaceMissing(String),
    #[error("shader container '{0}' is not mounted")]
    ShaderContainerMissing(String),
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

pub type Result<T, E = PlaygroundError> = std::result::Result<T, E>;

#[cfg(target_arch = "wasm32")]
impl From<PlaygroundError> for wasm_bindgen::JsValue {
    fn from(err: PlaygroundError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
