use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{PlaygroundError, Result};
use crate::exec::{ShaderRole, SurfaceSpec};

/// Id of the optional `<script type="application/json">` element holding
/// overrides for [`PlaygroundConfig`].
pub const CONFIG_ELEMENT_ID: &str = "webgl-hub-config";

/// Page-level settings. Every field has a default, so an absent or partial
/// JSON document is fine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaygroundConfig {
    pub root_id: String,
    pub canvas_id: String,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub canvas_class: String,
    pub shader_container_id: String,
    pub vertex_shader_id: String,
    pub fragment_shader_id: String,
    pub error_panel_id: String,
    pub auto_run_delay_ms: u32,
    pub rerun_on_edit: bool,
    pub log_level: String,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            root_id: "app".to_string(),
            canvas_id: "gl-canvas".to_string(),
            canvas_width: 512,
            canvas_height: 512,
            canvas_class: "w-full h-full".to_string(),
            shader_container_id: "shader-sources".to_string(),
            vertex_shader_id: "vertex-shader".to_string(),
            fragment_shader_id: "fragment-shader".to_string(),
            error_panel_id: "execution-error".to_string(),
            auto_run_delay_ms: 100,
            rerun_on_edit: false,
            log_level: "info".to_string(),
        }
    }
}

impl PlaygroundConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| PlaygroundError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(PlaygroundError::Config(format!(
                "canvas size {}x{} must be non-zero",
                self.canvas_width, self.canvas_height
            )));
        }
        let ids = [
            ("root_id", &self.root_id),
            ("canvas_id", &self.canvas_id),
            ("shader_container_id", &self.shader_container_id),
            ("vertex_shader_id", &self.vertex_shader_id),
            ("fragment_shader_id", &self.fragment_shader_id),
            ("error_panel_id", &self.error_panel_id),
        ];
        let mut seen = HashSet::new();
        for (name, id) in ids {
            if id.trim().is_empty() {
                return Err(PlaygroundError::Config(format!("{name} must not be empty")));
            }
            if !seen.insert(id.as_str()) {
                return Err(PlaygroundError::Config(format!("{name} '{id}' is already in use")));
            }
        }
        self.max_level()?;
        Ok(())
    }

    pub fn max_level(&self) -> Result<tracing::Level> {
        self.log_level
            .parse()
            .map_err(|_| PlaygroundError::Config(format!("unknown log level '{}'", self.log_level)))
    }

    pub fn auto_run_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.auto_run_delay_ms))
    }

    pub fn surface_spec(&self) -> SurfaceSpec {
        SurfaceSpec {
            id: self.canvas_id.clone(),
            width: self.canvas_width,
            height: self.canvas_height,
            class: self.canvas_class.clone(),
        }
    }

    pub fn shader_element_id(&self, role: ShaderRole) -> &str {
        match role {
            ShaderRole::Vertex => &self.vertex_shader_id,
            ShaderRole::Fragment => &self.fragment_shader_id,
        }
    }
}
