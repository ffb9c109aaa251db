use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderRole {
    Vertex,
    Fragment,
}

impl ShaderRole {
    pub const ALL: [ShaderRole; 2] = [ShaderRole::Vertex, ShaderRole::Fragment];

    /// `type` attribute of the published `<script>` element. Browsers skip
    /// script types they do not know, so the text is never executed.
    pub fn script_type(self) -> &'static str {
        match self {
            ShaderRole::Vertex => "x-shader/x-vertex",
            ShaderRole::Fragment => "x-shader/x-fragment",
        }
    }
}

/// Place where shader text is published for scripts to read back
/// synchronously by element id.
pub trait ShaderBoard {
    /// Removes everything published by the previous run.
    fn clear(&mut self) -> Result<()>;

    fn publish(&mut self, role: ShaderRole, element_id: &str, source: &str) -> Result<()>;
}
