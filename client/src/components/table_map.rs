//! Bridge between the page and the imperative `tablemap::engine::Engine`.
//!
//! ARCHITECTURE
//! ============
//! [`TableMap`] owns the mounted canvas, the engine, and the DOM listeners.
//! Every listener and the availability fetch re-enter through a weak handle,
//! so a dropped map ignores late events and responses. Engine operations
//! return actions; [`TableMap`] applies them to the overlays, the form port,
//! and the canvas.
//!
//! One map exists per step. The page creates a [`TableMapRegistry`] and
//! installs the map into it; a second install is refused.

#[cfg(test)]
#[path = "table_map_test.rs"]
mod table_map_test;

use std::cell::RefCell;
use std::rc::Rc;

#[cfg(feature = "csr")]
use std::rc::Weak;

#[cfg(feature = "csr")]
use tablemap::camera::Point;
#[cfg(feature = "csr")]
use tablemap::config::TableMapConfig;
#[cfg(feature = "csr")]
use tablemap::engine::{Action, Engine};
#[cfg(feature = "csr")]
use tablemap::error::MountError;
#[cfg(feature = "csr")]
use tablemap::input::{Button, WheelDelta};
#[cfg(feature = "csr")]
use tablemap::mount::{self, MountedMap};
#[cfg(feature = "csr")]
use tablemap::panel::SelectionSummary;
#[cfg(feature = "csr")]
use tablemap::table::AvailabilityQuery;
#[cfg(feature = "csr")]
use wasm_bindgen::{JsCast, closure::Closure};

#[cfg(feature = "csr")]
use crate::components::form_port::FormPort;

/// Id of the element the step page renders for the map.
pub const TABLE_MAP_CONTAINER_ID: &str = "table-map";

/// Holds the step's single map instance.
///
/// Cloning shares the slot. `M` is the map handle type; the page uses
/// [`TableMap`].
pub struct TableMapRegistry<M> {
    slot: Rc<RefCell<Option<M>>>,
}

impl<M> Clone for TableMapRegistry<M> {
    fn clone(&self) -> Self {
        Self { slot: Rc::clone(&self.slot) }
    }
}

impl<M> Default for TableMapRegistry<M> {
    fn default() -> Self {
        Self { slot: Rc::new(RefCell::new(None)) }
    }
}

impl<M: Clone> TableMapRegistry<M> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `map` unless one is already installed. Returns whether it was stored.
    pub fn install(&self, map: M) -> bool {
        let mut slot = self.slot.borrow_mut();
        if slot.is_some() {
            log::warn!("table map: already initialized; ignoring second instance");
            return false;
        }
        *slot = Some(map);
        true
    }

    #[must_use]
    pub fn get(&self) -> Option<M> {
        self.slot.borrow().clone()
    }

    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.slot.borrow().is_some()
    }
}

/// Table map controller. Cheap to clone; clones share one map.
#[cfg(feature = "csr")]
#[derive(Clone)]
pub struct TableMap {
    inner: Rc<RefCell<Inner>>,
}

#[cfg(feature = "csr")]
struct Inner {
    engine: Engine,
    mounted: MountedMap,
    port: FormPort,
    /// Held so the listeners stay registered for the map's lifetime.
    _listeners: Vec<Listener>,
}

/// A DOM listener that unregisters itself when dropped.
#[cfg(feature = "csr")]
struct Listener {
    target: web_sys::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

#[cfg(feature = "csr")]
impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref())
        {
            log::debug!("table map: could not remove {} listener: {err:?}", self.kind);
        }
    }
}

#[cfg(feature = "csr")]
impl TableMap {
    /// Mount into `#container_id` and start listening for pointer input.
    ///
    /// The container's `data-config` JSON, when present and valid, overrides
    /// the default configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`MountError`] if the container is missing or the canvas
    /// cannot be built; the caller logs it and leaves the step without a map.
    pub fn new(container_id: &str, port: FormPort) -> Result<Self, MountError> {
        let mounted = mount::mount_by_id(container_id)?;
        let config = config_for(&mounted);
        let engine = Engine::new(mounted.canvas.clone(), config);
        let map = Self { inner: Rc::new(RefCell::new(Inner { engine, mounted, port, _listeners: Vec::new() })) };
        map.attach_listeners()?;
        map.resize();
        Ok(map)
    }

    /// Query availability and show the result. Inputs are forwarded verbatim.
    ///
    /// Only the most recent call's response is applied.
    pub fn load_tables(&self, query: AvailabilityQuery) {
        let mut ticket_and_endpoint = None;
        dispatch(&self.inner, |engine| {
            let (ticket, actions) = engine.begin_load(query);
            ticket_and_endpoint = Some((ticket, engine.core.config.availability_endpoint.clone()));
            actions
        });
        let Some((ticket, endpoint)) = ticket_and_endpoint else {
            return;
        };

        let weak = Rc::downgrade(&self.inner);
        wasm_bindgen_futures::spawn_local(async move {
            let result = crate::net::api::fetch_availability(&endpoint, &ticket.query).await;
            if let Err(err) = &result {
                log::warn!("table map: load #{} failed: {err}", ticket.seq);
            }
            let Some(inner) = weak.upgrade() else {
                log::debug!("table map: dropped before load #{} finished", ticket.seq);
                return;
            };
            dispatch(&inner, |engine| engine.finish_load(&ticket, result));
        });
    }

    /// Resize the canvas to its container and redraw.
    pub fn resize(&self) {
        let (width, height) = self.inner.borrow().mounted.container_size();
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        dispatch(&self.inner, |engine| engine.set_viewport(width, height, dpr));
    }

    #[must_use]
    pub fn selection(&self) -> Option<tablemap::table::TableId> {
        self.inner.borrow().engine.selection()
    }

    #[must_use]
    pub fn status(&self) -> tablemap::engine::MapStatus {
        self.inner.borrow().engine.status()
    }

    fn attach_listeners(&self) -> Result<(), MountError> {
        let canvas: web_sys::EventTarget = self.inner.borrow().mounted.canvas.clone().into();
        let weak = Rc::downgrade(&self.inner);

        let listeners = vec![
            listen(&canvas, "click", false, pointer_handler(&weak, |engine, pt, _| engine.on_click(pt)))?,
            listen(
                &canvas,
                "pointerdown",
                false,
                pointer_handler(&weak, |engine, pt, ev| engine.on_pointer_down(pt, Button::from_dom(ev.button()))),
            )?,
            listen(&canvas, "pointermove", false, pointer_handler(&weak, |engine, pt, _| engine.on_pointer_move(pt)))?,
            listen(&canvas, "pointerup", false, pointer_handler(&weak, |engine, pt, _| engine.on_pointer_up(pt)))?,
            listen(&canvas, "pointerleave", false, pointer_handler(&weak, |engine, _, _| engine.on_pointer_leave()))?,
            listen(&canvas, "wheel", true, wheel_handler(&weak))?,
        ];
        self.inner.borrow_mut()._listeners = listeners;
        Ok(())
    }
}

#[cfg(feature = "csr")]
fn config_for(mounted: &MountedMap) -> TableMapConfig {
    let Some(raw) = mounted.config_override() else {
        return TableMapConfig::default();
    };
    match TableMapConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("table map: ignoring invalid data-config: {err}");
            TableMapConfig::default()
        }
    }
}

/// Run an engine operation, apply its actions, then report any selection change.
///
/// The selection callback runs after the borrow is released so it may call
/// back into the map.
#[cfg(feature = "csr")]
fn dispatch(inner: &Rc<RefCell<Inner>>, op: impl FnOnce(&mut Engine) -> Vec<Action>) {
    let (port, selection) = {
        let mut guard = inner.borrow_mut();
        let actions = op(&mut guard.engine);
        let selection = guard.apply(actions);
        (guard.port.clone(), selection)
    };
    if let Some(selection) = selection {
        port.publish_selection(selection.as_ref());
    }
}

#[cfg(feature = "csr")]
impl Inner {
    /// Apply actions in order and return the last selection change, if any.
    fn apply(&mut self, actions: Vec<Action>) -> Option<Option<SelectionSummary>> {
        let mut selection = None;
        let mut render = false;
        for action in actions {
            match action {
                Action::SetLoading(visible) => self.mounted.set_loading(visible),
                Action::ShowMessage(notice) => self.mounted.show_message(&notice),
                Action::HideMessage => self.mounted.hide_message(),
                Action::SetCanvasVisible(visible) => self.mounted.set_canvas_visible(visible),
                Action::SetAvailability(html) => self.port.publish_availability(html.as_deref()),
                Action::SelectionChanged(summary) => selection = Some(summary),
                Action::RenderNeeded => render = true,
            }
        }
        if render {
            if let Err(err) = self.engine.render() {
                log::warn!("table map: render failed: {err:?}");
            }
        }
        selection
    }
}

#[cfg(feature = "csr")]
fn listen(
    target: &web_sys::EventTarget,
    kind: &'static str,
    cancelable: bool,
    handler: Box<dyn FnMut(web_sys::Event)>,
) -> Result<Listener, MountError> {
    let closure = Closure::wrap(handler);
    let options = web_sys::AddEventListenerOptions::new();
    options.set_passive(!cancelable);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|err| MountError::Dom(format!("{kind} listener: {err:?}")))?;
    Ok(Listener { target: target.clone(), kind, closure })
}

/// Wrap a pointer operation: converts the event's client position to canvas
/// pixels before handing it to the engine.
#[cfg(feature = "csr")]
fn pointer_handler(
    weak: &Weak<RefCell<Inner>>,
    op: impl Fn(&mut Engine, Point, &web_sys::MouseEvent) -> Vec<Action> + 'static,
) -> Box<dyn FnMut(web_sys::Event)> {
    let weak = weak.clone();
    Box::new(move |event: web_sys::Event| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let Some(ev) = event.dyn_ref::<web_sys::MouseEvent>() else {
            return;
        };
        let point = canvas_point(&inner, ev);
        dispatch(&inner, |engine| op(engine, point, ev));
    })
}

#[cfg(feature = "csr")]
fn wheel_handler(weak: &Weak<RefCell<Inner>>) -> Box<dyn FnMut(web_sys::Event)> {
    let weak = weak.clone();
    Box::new(move |event: web_sys::Event| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let Some(ev) = event.dyn_ref::<web_sys::WheelEvent>() else {
            return;
        };
        ev.prevent_default();
        let point = canvas_point(&inner, ev);
        let delta = WheelDelta { dx: ev.delta_x(), dy: ev.delta_y() };
        dispatch(&inner, |engine| engine.on_wheel(point, delta));
    })
}

#[cfg(feature = "csr")]
fn canvas_point(inner: &Rc<RefCell<Inner>>, ev: &web_sys::MouseEvent) -> Point {
    let guard = inner.borrow();
    let client = Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()));
    guard.engine.core.viewport.client_to_canvas(client, guard.mounted.display_rect())
}
