use crate::catalog::ExampleCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnippetField {
    Script,
    VertexShader,
    FragmentShader,
}

impl SnippetField {
    pub const ALL: [SnippetField; 3] = [
        SnippetField::Script,
        SnippetField::VertexShader,
        SnippetField::FragmentShader,
    ];

    /// Editor header label.
    pub fn label(self) -> &'static str {
        match self {
            SnippetField::Script => "JavaScript",
            SnippetField::VertexShader => "Vertex Shader (GLSL)",
            SnippetField::FragmentShader => "Fragment Shader (GLSL)",
        }
    }
}

/// The user's working copy of an example's code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetSet {
    pub script: String,
    pub vertex_shader: String,
    pub fragment_shader: String,
}

impl SnippetSet {
    /// Fresh working copy with surrounding whitespace trimmed from every part.
    pub fn seeded(code: &ExampleCode) -> Self {
        Self {
            script: code.script.trim().to_string(),
            vertex_shader: code.vertex_shader.trim().to_string(),
            fragment_shader: code.fragment_shader.trim().to_string(),
        }
    }

    pub fn get(&self, field: SnippetField) -> &str {
        match field {
            SnippetField::Script => &self.script,
            SnippetField::VertexShader => &self.vertex_shader,
            SnippetField::FragmentShader => &self.fragment_shader,
        }
    }

    pub fn set(&mut self, field: SnippetField, value: impl Into<String>) {
        let slot = match field {
            SnippetField::Script => &mut self.script,
            SnippetField::VertexShader => &mut self.vertex_shader,
            SnippetField::FragmentShader => &mut self.fragment_shader,
        };
        *slot = value.into();
    }
}
