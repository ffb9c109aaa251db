//! The bundled, read-only catalog of examples.
//!
//! Metadata lives in `samples/catalog.json`; the three code strings of every
//! example live next to it in `samples/<id>/` and are embedded at compile
//! time.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::{PlaygroundError, Result};

const MANIFEST: &str = include_str!("../samples/catalog.json");

/// Script plus shader sources shipped with one example.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleCode {
    pub script: String,
    pub vertex_shader: String,
    pub fragment_shader: String,
}

impl ExampleCode {
    pub fn new(
        script: impl Into<String>,
        vertex_shader: impl Into<String>,
        fragment_shader: impl Into<String>,
    ) -> Self {
        Self {
            script: script.into(),
            vertex_shader: vertex_shader.into(),
            fragment_shader: fragment_shader.into(),
        }
    }

    /// Library-driven examples (Three.js) build their own shaders and ship
    /// none.
    pub fn has_shaders(&self) -> bool {
        !self.vertex_shader.trim().is_empty() || !self.fragment_shader.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub id: String,
    pub title: String,
    pub category: String,
    pub summary: String,
    pub description: String,
    pub code: ExampleCode,
}

impl Example {
    pub fn uses_three_js(&self) -> bool {
        self.category.contains("Three.js")
    }
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    id: String,
    title: String,
    category: String,
    summary: String,
    description: String,
}

macro_rules! sample {
    ($id:literal) => {
        ExampleCode::new(
            include_str!(concat!("../samples/", $id, "/main.js")),
            include_str!(concat!("../samples/", $id, "/vertex.glsl")),
            include_str!(concat!("../samples/", $id, "/fragment.glsl")),
        )
    };
}

fn bundled_code(id: &str) -> Option<ExampleCode> {
    let code = match id {
        "hello-triangle" => sample!("hello-triangle"),
        "colorful-triangle" => sample!("colorful-triangle"),
        "2d-transformations" => sample!("2d-transformations"),
        "rotating-cube" => sample!("rotating-cube"),
        "textured-quad" => sample!("textured-quad"),
        "basic-lighting" => sample!("basic-lighting"),
        "threejs-cube" => sample!("threejs-cube"),
        "instanced-drawing" => sample!("instanced-drawing"),
        "shadow-mapping" => sample!("shadow-mapping"),
        "gltf-animation" => sample!("gltf-animation"),
        "post-processing-bloom" => sample!("post-processing-bloom"),
        _ => return None,
    };
    Some(code)
}

/// Ordered, immutable collection of examples with unique ids.
#[derive(Debug, Clone)]
pub struct Catalog {
    examples: Vec<Example>,
}

impl Catalog {
    /// Validates id uniqueness and keeps the given order.
    pub fn new(examples: Vec<Example>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(examples.len());
        for example in &examples {
            if example.id.trim().is_empty() {
                return Err(PlaygroundError::EmptyExampleId);
            }
            if !seen.insert(example.id.as_str()) {
                return Err(PlaygroundError::DuplicateExample(example.id.clone()));
            }
        }
        Ok(Self { examples })
    }

    /// The catalog compiled into the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_manifest(MANIFEST, bundled_code)
    }

    /// Joins a JSON manifest with code looked up by example id.
    pub fn from_manifest<F>(manifest: &str, code_for: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<ExampleCode>,
    {
        let entries: Vec<ManifestEntry> =
            serde_json::from_str(manifest).map_err(PlaygroundError::Manifest)?;
        let examples = entries
            .into_iter()
            .map(|entry| {
                let code = code_for(&entry.id)
                    .ok_or_else(|| PlaygroundError::MissingSampleCode(entry.id.clone()))?;
                Ok(Example {
                    id: entry.id,
                    title: entry.title,
                    category: entry.category,
                    summary: entry.summary,
                    description: entry.description,
                    code,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(examples)
    }

    pub fn get(&self, id: &str) -> Option<&Example> {
        self.examples.iter().find(|example| example.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Example> {
        self.examples.iter()
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(id: &str) -> Example {
        Example {
            id: id.to_string(),
            title: format!("Title {id}"),
            category: "WebGL Fundamentals".to_string(),
            summary: String::new(),
            description: String::new(),
            code: ExampleCode::new("console.log(1)", "", ""),
        }
    }

    #[test]
    fn builtin_catalog_has_unique_ids() {
        let catalog = Catalog::builtin().expect("bundled catalog loads");
        let ids: HashSet<_> = catalog.iter().map(|ex| ex.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.len());
        assert_eq!(catalog.len(), 11);
    }

    #[test]
    fn builtin_catalog_keeps_manifest_order() {
        let catalog = Catalog::builtin().unwrap();
        let first = catalog.iter().next().unwrap();
        assert_eq!(first.id, "hello-triangle");
        assert_eq!(first.title, "Hello, Triangle!");
        assert!(first.code.script.contains("gl-canvas"));
        assert!(first.code.vertex_shader.contains("vertPosition"));
    }

    #[test]
    fn three_js_examples_ship_no_shaders() {
        let catalog = Catalog::builtin().unwrap();
        let cube = catalog.get("threejs-cube").unwrap();
        assert!(cube.uses_three_js());
        assert!(!cube.code.has_shaders());
        assert!(catalog.get("rotating-cube").unwrap().code.has_shaders());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Catalog::new(vec![example("a"), example("b"), example("a")]).unwrap_err();
        assert!(matches!(err, PlaygroundError::DuplicateExample(id) if id == "a"));
    }

    #[test]
    fn blank_id_is_rejected() {
        let err = Catalog::new(vec![example("  ")]).unwrap_err();
        assert!(matches!(err, PlaygroundError::EmptyExampleId));
    }

    #[test]
    fn manifest_without_code_is_rejected() {
        let manifest = r#"[{"id":"ghost","title":"t","category":"c","summary":"s","description":"d"}]"#;
        let err = Catalog::from_manifest(manifest, |_| None).unwrap_err();
        assert!(matches!(err, PlaygroundError::MissingSampleCode(id) if id == "ghost"));
    }

    #[test]
    fn malformed_manifest_is_reported() {
        let err = Catalog::from_manifest("{", bundled_code).unwrap_err();
        assert!(matches!(err, PlaygroundError::Manifest(_)));
    }

    #[test]
    fn unknown_id_lookup_is_none() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.get("does-not-exist").is_none());
    }
}
