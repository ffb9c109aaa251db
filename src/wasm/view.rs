//! Static page markup. Catalog text always goes in through
//! `set_text_content`, never as HTML.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::catalog::{Catalog, Example};
use crate::category::CategoryIndex;
use crate::config::PlaygroundConfig;
use crate::exec::ScriptFailure;
use crate::route::Route;

const BACK_ARROW: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" class="h-5 w-5 mr-2" fill="none" viewBox="0 0 24 24" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M10 19l-7-7m0 0l7-7m-7 7h18" /></svg>"#;
const FORWARD_ARROW: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" class="h-4 w-4 ml-1 transform group-hover:translate-x-1 transition-transform" fill="none" viewBox="0 0 24 24" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M17 8l4 4m0 0l-4 4m4-4H3" /></svg>"#;
const PLAY_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" class="h-4 w-4 mr-2" fill="none" viewBox="0 0 24 24" stroke="currentColor"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M14.752 11.168l-3.197-2.132A1 1 0 0010 9.87v4.263a1 1 0 001.555.832l3.197-2.132a1 1 0 000-1.664z" /></svg>"#;

pub fn el(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let element = document.create_element(tag)?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    Ok(element)
}

fn text(document: &Document, tag: &str, class: &str, content: &str) -> Result<Element, JsValue> {
    let element = el(document, tag, class)?;
    element.set_text_content(Some(content));
    Ok(element)
}

fn link(document: &Document, route: &Route, class: &str) -> Result<Element, JsValue> {
    let anchor = el(document, "a", class)?;
    anchor.set_attribute("href", &route.to_hash())?;
    Ok(anchor)
}

fn back_link(document: &Document, label: &str, class: &str) -> Result<Element, JsValue> {
    let anchor = link(document, &Route::Home, class)?;
    anchor.set_inner_html(BACK_ARROW);
    anchor.append_with_str_1(label)?;
    Ok(anchor)
}

pub fn render_home(document: &Document, root: &Element, catalog: &Catalog) -> Result<(), JsValue> {
    let page = el(document, "div", "")?;

    let intro = el(document, "div", "text-center mb-12")?;
    let title = el(
        document,
        "h1",
        "text-4xl font-bold tracking-tight text-white sm:text-5xl md:text-6xl",
    )?;
    title.append_with_str_1("Welcome to the ")?;
    title.append_child(&text(document, "span", "text-teal-400", "WebGL Hub")?)?;
    intro.append_child(&title)?;
    intro.append_child(&text(
        document,
        "p",
        "mt-3 max-w-md mx-auto text-base text-navy-300 sm:text-lg md:mt-5 md:text-xl md:max-w-3xl",
        "Explore interactive WebGL examples, from basic shapes to complex 3D scenes. Click on a card to view the detailed explanation and code.",
    )?)?;
    page.append_child(&intro)?;

    let sections = el(document, "div", "space-y-12")?;
    for group in CategoryIndex::new(catalog).groups() {
        let section = el(document, "section", "")?;
        section.append_child(&text(
            document,
            "h2",
            "text-2xl font-bold text-white border-b-2 border-navy-700 pb-2 mb-6",
            group.name,
        )?)?;
        let grid = el(document, "div", "grid gap-8 md:grid-cols-2 lg:grid-cols-3")?;
        for example in &group.examples {
            grid.append_child(&card(document, example)?)?;
        }
        section.append_child(&grid)?;
        sections.append_child(&section)?;
    }
    page.append_child(&sections)?;
    root.append_child(&page)?;
    Ok(())
}

fn card(document: &Document, example: &Example) -> Result<Element, JsValue> {
    let card = link(
        document,
        &Route::Example(example.id.clone()),
        "block group bg-navy-900 p-6 rounded-lg shadow-lg hover:shadow-teal-400/20 hover:-translate-y-1 transition-all duration-300",
    )?;
    card.append_child(&text(
        document,
        "h3",
        "text-xl font-bold text-teal-400 group-hover:text-teal-300 transition-colors",
        &example.title,
    )?)?;
    card.append_child(&text(document, "p", "mt-2 text-navy-300", &example.summary)?)?;
    let cta = el(
        document,
        "div",
        "mt-4 text-sm font-semibold text-white group-hover:text-teal-300 transition-colors flex items-center",
    )?;
    cta.set_inner_html(FORWARD_ARROW);
    cta.prepend_with_str_1("View Example")?;
    card.append_child(&cta)?;
    Ok(card)
}

pub fn render_not_found(document: &Document, root: &Element) -> Result<(), JsValue> {
    let page = el(document, "div", "text-center")?;
    page.append_child(&text(
        document,
        "h2",
        "text-2xl font-bold text-red-500",
        "Example not found!",
    )?)?;
    page.append_child(&back_link(
        document,
        "Back to Home",
        "mt-4 inline-flex items-center text-teal-400 hover:text-teal-300",
    )?)?;
    root.append_child(&page)?;
    Ok(())
}

/// Elements of the detail page the app keeps hold of.
pub struct DetailDom {
    pub editors: Element,
    pub run_button: Element,
    pub error_panel: Element,
}

/// Lays out the detail page with an empty editor column; editors are
/// mounted by the caller.
pub fn render_detail(
    document: &Document,
    root: &Element,
    example: &Example,
    config: &PlaygroundConfig,
) -> Result<DetailDom, JsValue> {
    let page = el(document, "div", "max-w-7xl mx-auto")?;
    page.append_child(&back_link(
        document,
        "Back to Examples",
        "inline-flex items-center mb-6 text-teal-400 hover:text-teal-300 transition-colors",
    )?)?;
    page.append_child(&text(
        document,
        "h1",
        "text-4xl font-extrabold text-white mb-8",
        &example.title,
    )?)?;

    let grid = el(document, "div", "grid grid-cols-1 lg:grid-cols-2 gap-8 mb-12")?;

    let stage = el(document, "div", "flex flex-col space-y-4")?;
    let frame = el(
        document,
        "div",
        "relative aspect-square bg-navy-900 rounded-lg shadow-lg overflow-hidden border border-navy-800",
    )?;
    let canvas = el(document, "canvas", &config.canvas_class)?;
    canvas.set_id(&config.canvas_id);
    canvas.set_attribute("width", &config.canvas_width.to_string())?;
    canvas.set_attribute("height", &config.canvas_height.to_string())?;
    frame.append_child(&canvas)?;
    stage.append_child(&frame)?;
    let error_panel = el(
        document,
        "div",
        "p-4 bg-red-900/50 text-red-300 rounded-md font-mono text-sm shadow-inner",
    )?;
    error_panel.set_id(&config.error_panel_id);
    error_panel.set_attribute("role", "alert")?;
    error_panel.set_attribute("hidden", "")?;
    stage.append_child(&error_panel)?;
    grid.append_child(&stage)?;

    let column_class = if example.uses_three_js() {
        "flex flex-col space-y-4 lg:aspect-square"
    } else {
        "flex flex-col space-y-4"
    };
    let editors = el(document, "div", column_class)?;
    grid.append_child(&editors)?;
    page.append_child(&grid)?;

    let about = el(document, "div", "bg-navy-900/50 p-6 rounded-lg")?;
    about.append_child(&text(document, "h2", "text-2xl font-bold text-white mb-3", "Description")?)?;
    about.append_child(&text(
        document,
        "p",
        "text-lg text-navy-300 leading-relaxed",
        &example.description,
    )?)?;
    page.append_child(&about)?;

    let shaders = el(document, "div", "")?;
    shaders.set_id(&config.shader_container_id);
    shaders.set_attribute("style", "display: none")?;
    page.append_child(&shaders)?;

    let run_button = el(
        document,
        "button",
        "flex items-center justify-center px-4 py-1 bg-teal-500 text-white font-semibold rounded-md hover:bg-teal-600 transition-colors shadow-sm focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-offset-navy-800 focus:ring-teal-400 text-sm",
    )?;
    run_button.set_attribute("type", "button")?;
    run_button.set_inner_html(PLAY_ICON);
    run_button.append_with_str_1("Run")?;

    root.append_child(&page)?;
    Ok(DetailDom {
        editors,
        run_button,
        error_panel,
    })
}

/// Shows `[kind] message` of the last failure, or hides the panel.
pub fn show_error(
    document: &Document,
    panel: &Element,
    failure: Option<&ScriptFailure>,
) -> Result<(), JsValue> {
    panel.set_inner_html("");
    match failure {
        Some(failure) => {
            panel.append_child(&text(document, "p", "font-bold mb-1", "Execution Error:")?)?;
            panel.append_child(&text(document, "p", "", &failure.to_string())?)?;
            panel.remove_attribute("hidden")?;
        }
        None => panel.set_attribute("hidden", "")?,
    }
    Ok(())
}
