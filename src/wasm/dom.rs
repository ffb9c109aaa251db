//! DOM-backed surface and shader publication.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlCanvasElement, Window};

use crate::error::{PlaygroundError, Result};
use crate::exec::{
    FrameHandle, RunId, ShaderBoard, ShaderRole, SurfaceBackend, SurfaceSpec,
    FRAME_HANDLE_PROPERTY, RUN_STAMP_ATTRIBUTE,
};

pub(crate) fn dom_error(err: JsValue) -> PlaygroundError {
    let text = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"));
    PlaygroundError::Dom(text)
}

/// The `<canvas>` mounted under the configured id.
pub struct DomSurface {
    window: Window,
    document: Document,
}

impl DomSurface {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }
}

impl SurfaceBackend for DomSurface {
    type Handle = HtmlCanvasElement;

    fn locate(&self, spec: &SurfaceSpec) -> Option<HtmlCanvasElement> {
        self.document
            .get_element_by_id(&spec.id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()
    }

    fn pending_frame(&self, surface: &HtmlCanvasElement) -> Option<FrameHandle> {
        let value = js_sys::Reflect::get(surface, &JsValue::from_str(FRAME_HANDLE_PROPERTY)).ok()?;
        value.as_f64().map(|id| id as FrameHandle)
    }

    fn cancel_frame(&mut self, surface: &HtmlCanvasElement, frame: FrameHandle) {
        if let Err(err) = self.window.cancel_animation_frame(frame) {
            tracing::warn!(frame, error = ?err, "cancelAnimationFrame failed");
        }
        // forget the id so a second cancel on the same canvas is a no-op
        let _ = js_sys::Reflect::delete_property(surface, &JsValue::from_str(FRAME_HANDLE_PROPERTY));
    }

    fn replace(
        &mut self,
        old: &HtmlCanvasElement,
        spec: &SurfaceSpec,
        run: RunId,
    ) -> Result<HtmlCanvasElement> {
        let parent = old
            .parent_node()
            .ok_or_else(|| PlaygroundError::SurfaceMissing(spec.id.clone()))?;
        let fresh: HtmlCanvasElement = self
            .document
            .create_element("canvas")
            .map_err(dom_error)?
            .dyn_into()
            .map_err(|el: Element| dom_error(el.into()))?;
        fresh.set_id(&spec.id);
        fresh.set_width(spec.width);
        fresh.set_height(spec.height);
        fresh.set_class_name(&spec.class);
        fresh
            .set_attribute(RUN_STAMP_ATTRIBUTE, &run.to_string())
            .map_err(dom_error)?;
        parent.replace_child(&fresh, old).map_err(dom_error)?;
        Ok(fresh)
    }

    fn unstamp(&mut self, surface: &HtmlCanvasElement) {
        if let Err(err) = surface.remove_attribute(RUN_STAMP_ATTRIBUTE) {
            tracing::warn!(error = ?err, "could not clear run stamp");
        }
    }
}

/// Hidden container holding one `<script type="x-shader/...">` per role.
pub struct DomShaderBoard {
    document: Document,
    container_id: String,
}

impl DomShaderBoard {
    pub fn new(document: Document, container_id: impl Into<String>) -> Self {
        Self {
            document,
            container_id: container_id.into(),
        }
    }

    fn container(&self) -> Result<Element> {
        self.document
            .get_element_by_id(&self.container_id)
            .ok_or_else(|| PlaygroundError::ShaderContainerMissing(self.container_id.clone()))
    }
}

impl ShaderBoard for DomShaderBoard {
    fn clear(&mut self) -> Result<()> {
        self.container()?.set_inner_html("");
        Ok(())
    }

    fn publish(&mut self, role: ShaderRole, element_id: &str, source: &str) -> Result<()> {
        let container = self.container()?;
        let script = self.document.create_element("script").map_err(dom_error)?;
        script.set_id(element_id);
        script
            .set_attribute("type", role.script_type())
            .map_err(dom_error)?;
        script.set_text_content(Some(source));
        container.append_child(&script).map_err(dom_error)?;
        Ok(())
    }
}
