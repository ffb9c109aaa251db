use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlTextAreaElement};

use crate::snippet::SnippetField;

/// A `<textarea>` bound to one snippet. The `input` listener lives as long as
/// the editor value; dropping the editor detaches it.
pub struct SnippetEditor {
    textarea: HtmlTextAreaElement,
    on_input: Closure<dyn FnMut(Event)>,
}

impl SnippetEditor {
    /// Builds the editor card and appends it to `parent`. `controls` is shown
    /// at the right of the header bar.
    pub fn mount(
        document: &Document,
        parent: &Element,
        field: SnippetField,
        value: &str,
        height: &str,
        controls: Option<&Element>,
        mut on_change: impl FnMut(SnippetField, String) + 'static,
    ) -> Result<Self, JsValue> {
        let card = document.create_element("div")?;
        card.set_class_name(&format!(
            "bg-navy-900 rounded-lg overflow-hidden shadow-lg flex flex-col {height}"
        ));

        let header = document.create_element("div")?;
        header.set_class_name("flex justify-between items-center px-4 py-2 bg-navy-800");
        let label = document.create_element("span")?;
        label.set_class_name("text-xs font-semibold text-navy-300 uppercase");
        label.set_text_content(Some(field.label()));
        header.append_child(&label)?;
        if let Some(controls) = controls {
            header.append_child(controls)?;
        }
        card.append_child(&header)?;

        let body = document.create_element("div")?;
        body.set_class_name("relative flex-grow");
        let textarea: HtmlTextAreaElement = document.create_element("textarea")?.dyn_into()?;
        textarea.set_class_name(
            "w-full h-full p-4 text-sm font-mono bg-transparent text-navy-200 resize-none border-0 focus:ring-0 outline-none absolute inset-0",
        );
        for (name, attr) in [
            ("spellcheck", "false"),
            ("autocapitalize", "off"),
            ("autocomplete", "off"),
            ("autocorrect", "off"),
        ] {
            textarea.set_attribute(name, attr)?;
        }
        textarea.set_value(value);
        body.append_child(&textarea)?;
        card.append_child(&body)?;
        parent.append_child(&card)?;

        let source = textarea.clone();
        let on_input = Closure::wrap(Box::new(move |_event: Event| {
            on_change(field, source.value());
        }) as Box<dyn FnMut(Event)>);
        textarea.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;

        Ok(Self {
            textarea,
            on_input,
        })
    }
}

impl Drop for SnippetEditor {
    fn drop(&mut self) {
        let _ = self
            .textarea
            .remove_event_listener_with_callback("input", self.on_input.as_ref().unchecked_ref());
    }
}
