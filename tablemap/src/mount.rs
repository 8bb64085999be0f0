//! Mounting: replaces a container's contents with the map's canvas and overlays.
//!
//! The container ends up holding exactly three children: the canvas, a
//! loading overlay, and a message overlay (both overlays start hidden). The
//! overlays are plain elements the host toggles through [`MountedMap`].

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement};

use crate::camera::{DisplayRect, Viewport};
use crate::engine::Notice;
use crate::error::MountError;

pub const CANVAS_CLASS: &str = "table-map__canvas";
pub const LOADING_CLASS: &str = "table-map__loading";
pub const MESSAGE_CLASS: &str = "table-map__message";

/// Container attribute holding a JSON [`crate::config::TableMapConfig`] override.
pub const CONFIG_ATTRIBUTE: &str = "data-config";

const OVERLAY_STYLE: &str = "position:absolute;inset:0;display:none;align-items:center;justify-content:center;";

/// Handles to the elements the map created inside its container.
pub struct MountedMap {
    pub container: HtmlElement,
    pub canvas: HtmlCanvasElement,
    pub loading: HtmlElement,
    pub message: HtmlElement,
}

/// Mount into the element with id `container_id` in the current document.
///
/// # Errors
///
/// Returns [`MountError::ContainerMissing`] when no live element has that id.
pub fn mount_by_id(container_id: &str) -> Result<MountedMap, MountError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(MountError::NoDocument)?;
    let container = document
        .get_element_by_id(container_id)
        .ok_or_else(|| MountError::ContainerMissing { id: container_id.to_owned() })?;
    mount(&document, &container)
}

/// Replace `container`'s children with a canvas and two hidden overlays.
///
/// # Errors
///
/// Returns [`MountError::Dom`] if an element cannot be created or attached.
pub fn mount(document: &Document, container: &Element) -> Result<MountedMap, MountError> {
    let container = container
        .clone()
        .dyn_into::<HtmlElement>()
        .map_err(|_| MountError::Dom("container is not an HTML element".to_owned()))?;
    container.set_inner_html("");
    container.style().set_property("position", "relative").map_err(dom_err)?;

    let canvas = document
        .create_element("canvas")
        .map_err(dom_err)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| MountError::Dom("created canvas has unexpected type".to_owned()))?;
    canvas.set_class_name(CANVAS_CLASS);
    canvas.set_attribute("style", "display:block;width:100%;height:100%;").map_err(dom_err)?;

    let loading = overlay(document, LOADING_CLASS)?;
    loading.set_text_content(Some("Loading available tables…"));
    let message = overlay(document, MESSAGE_CLASS)?;

    container.append_child(&canvas).map_err(dom_err)?;
    container.append_child(&loading).map_err(dom_err)?;
    container.append_child(&message).map_err(dom_err)?;

    let mounted = MountedMap { container, canvas, loading, message };
    let (width, height) = mounted.container_size();
    let (w, h) = Viewport { width, height, dpr: 1.0 }.backing_size();
    mounted.canvas.set_width(w);
    mounted.canvas.set_height(h);
    Ok(mounted)
}

fn overlay(document: &Document, class: &str) -> Result<HtmlElement, MountError> {
    let el = document
        .create_element("div")
        .map_err(dom_err)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| MountError::Dom("created overlay has unexpected type".to_owned()))?;
    el.set_class_name(class);
    el.set_attribute("style", OVERLAY_STYLE).map_err(dom_err)?;
    Ok(el)
}

fn dom_err(err: JsValue) -> MountError {
    MountError::Dom(format!("{err:?}"))
}

impl MountedMap {
    /// The container's current size in CSS pixels.
    #[must_use]
    pub fn container_size(&self) -> (f64, f64) {
        let rect = self.container.get_bounding_client_rect();
        (rect.width(), rect.height())
    }

    /// Where the canvas currently sits on the page.
    #[must_use]
    pub fn display_rect(&self) -> DisplayRect {
        let rect = self.canvas.get_bounding_client_rect();
        DisplayRect { left: rect.left(), top: rect.top(), width: rect.width(), height: rect.height() }
    }

    /// Raw `data-config` JSON on the container, if any.
    #[must_use]
    pub fn config_override(&self) -> Option<String> {
        self.container.get_attribute(CONFIG_ATTRIBUTE)
    }

    pub fn set_loading(&self, visible: bool) {
        set_display(&self.loading, if visible { "flex" } else { "none" });
    }

    pub fn show_message(&self, notice: &Notice) {
        let modifier = match notice {
            Notice::NoTables(_) => "empty",
            Notice::Error(_) => "error",
        };
        self.message.set_class_name(&format!("{MESSAGE_CLASS} {MESSAGE_CLASS}--{modifier}"));
        self.message.set_text_content(Some(notice.text()));
        set_display(&self.message, "flex");
    }

    pub fn hide_message(&self) {
        set_display(&self.message, "none");
    }

    pub fn set_canvas_visible(&self, visible: bool) {
        let value = if visible { "visible" } else { "hidden" };
        if let Err(err) = self.canvas.style().set_property("visibility", value) {
            log::warn!("table map: could not set canvas visibility: {err:?}");
        }
    }
}

fn set_display(el: &HtmlElement, value: &str) {
    if let Err(err) = el.style().set_property("display", value) {
        log::warn!("table map: could not set overlay display: {err:?}");
    }
}
