use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point, Viewport};
use crate::config::TableMapConfig;
use crate::error::LoadError;
use crate::hit;
use crate::input::{Button, InputState, WheelDelta, ZoomDirection};
use crate::panel::{self, SelectionSummary};
use crate::render;
use crate::scene::{self, Scene};
use crate::table::{AvailabilityQuery, AvailabilityResponse, Table, TableId, TableSet};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Text for the message overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The query succeeded but no table qualifies.
    NoTables(String),
    /// The query failed.
    Error(String),
}

impl Notice {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::NoTables(text) | Self::Error(text) => text,
        }
    }
}

/// Where the map is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// Tables are shown.
    Ready,
    /// The last query returned no tables.
    Empty,
    /// The last query failed.
    Failed,
}

/// Actions returned from engine operations for the host to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Show or hide the loading overlay.
    SetLoading(bool),
    /// Show the message overlay with this notice.
    ShowMessage(Notice),
    /// Hide the message overlay.
    HideMessage,
    /// Show or hide the canvas itself.
    SetCanvasVisible(bool),
    /// Replace the availability panel's markup; `None` empties it.
    SetAvailability(Option<String>),
    /// The selection changed; `None` means nothing is selected.
    SelectionChanged(Option<SelectionSummary>),
    RenderNeeded,
}

/// Handle for one availability request.
///
/// Only the ticket from the most recent [`EngineCore::begin_load`] is honored
/// by [`EngineCore::finish_load`]; older tickets are discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub seq: u64,
    pub query: AvailabilityQuery,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub tables: TableSet,
    pub camera: Camera,
    pub input: InputState,
    pub viewport: Viewport,
    pub config: TableMapConfig,
    selected: Option<TableId>,
    status: MapStatus,
    latest_seq: u64,
    suppress_click: bool,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(TableMapConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: TableMapConfig) -> Self {
        Self {
            tables: TableSet::new(),
            camera: Camera::with_limits(config.min_zoom, config.max_zoom),
            input: InputState::default(),
            viewport: Viewport::default(),
            config,
            selected: None,
            status: MapStatus::Idle,
            latest_seq: 0,
            suppress_click: false,
        }
    }

    // --- Availability ---

    /// Start a new availability query.
    ///
    /// Clears the selection and supersedes any request still in flight.
    pub fn begin_load(&mut self, query: AvailabilityQuery) -> (LoadTicket, Vec<Action>) {
        self.latest_seq += 1;
        self.selected = None;
        self.status = MapStatus::Loading;
        log::debug!(
            "table map: loading #{} for {} {} ({} guests)",
            self.latest_seq,
            query.date,
            query.time,
            query.guests
        );
        let ticket = LoadTicket { seq: self.latest_seq, query };
        let actions = vec![Action::SetLoading(true), Action::HideMessage, Action::SelectionChanged(None)];
        (ticket, actions)
    }

    /// Apply the outcome of the request identified by `ticket`.
    ///
    /// A response for a superseded ticket changes nothing.
    pub fn finish_load(&mut self, ticket: &LoadTicket, result: Result<AvailabilityResponse, LoadError>) -> Vec<Action> {
        if ticket.seq != self.latest_seq {
            log::debug!("table map: discarding stale response #{} (latest #{})", ticket.seq, self.latest_seq);
            return Vec::new();
        }

        match result.and_then(AvailabilityResponse::into_availability) {
            Ok(availability) if availability.tables.is_empty() => {
                self.tables.clear();
                self.status = MapStatus::Empty;
                let message = self.config.no_tables_message.clone();
                vec![
                    Action::SetLoading(false),
                    Action::SetCanvasVisible(false),
                    Action::SetAvailability(Some(panel::no_tables_html(&message))),
                    Action::ShowMessage(Notice::NoTables(message)),
                    Action::RenderNeeded,
                ]
            }
            Ok(availability) => {
                let guests = availability.guests.unwrap_or(ticket.query.guests);
                self.tables.replace(availability.tables);
                self.status = MapStatus::Ready;
                log::debug!("table map: {} tables available", self.tables.len());
                vec![
                    Action::SetLoading(false),
                    Action::HideMessage,
                    Action::SetCanvasVisible(true),
                    Action::SetAvailability(Some(panel::availability_html(self.tables.len(), guests))),
                    Action::RenderNeeded,
                ]
            }
            Err(err) => {
                log::warn!("table map: {err}");
                self.tables.clear();
                self.status = MapStatus::Failed;
                let message = err.user_message(&self.config.fallback_error_message).to_owned();
                vec![
                    Action::SetLoading(false),
                    Action::SetCanvasVisible(false),
                    Action::SetAvailability(None),
                    Action::ShowMessage(Notice::Error(message)),
                    Action::RenderNeeded,
                ]
            }
        }
    }

    // --- Selection ---

    /// Select the table under `screen_pt`, or clear the selection on a miss.
    pub fn select_at(&mut self, screen_pt: Point) -> Vec<Action> {
        let hit = hit::hit_test(screen_pt, &self.tables, &self.camera);
        self.selected = hit;
        let summary = self.selected_table().map(SelectionSummary::from_table);
        match &summary {
            Some(s) => log::debug!("table map: selected table {} (#{})", s.table_number, s.table_id),
            None => log::debug!("table map: selection cleared"),
        }
        vec![Action::SelectionChanged(summary), Action::RenderNeeded]
    }

    /// Click handler. A click that ends a drag does not select.
    pub fn on_click(&mut self, screen_pt: Point) -> Vec<Action> {
        if self.suppress_click {
            self.suppress_click = false;
            return Vec::new();
        }
        self.select_at(screen_pt)
    }

    // --- Zoom / pan ---

    /// Zoom one step around `pivot`. Steps that would leave the zoom limits are ignored.
    pub fn zoom(&mut self, pivot: Point, direction: ZoomDirection) -> Vec<Action> {
        let factor = match direction {
            ZoomDirection::In => self.config.zoom_in_factor,
            ZoomDirection::Out => self.config.zoom_out_factor,
        };
        if self.camera.zoom_at(pivot, factor) {
            vec![Action::RenderNeeded]
        } else {
            log::debug!("table map: zoom {direction:?} rejected at {:.3}", self.camera.zoom);
            Vec::new()
        }
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        self.zoom(screen_pt, ZoomDirection::from_wheel(delta))
    }

    /// Shift the floor plan by a canvas-pixel delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> Vec<Action> {
        self.camera.pan_by(dx, dy);
        vec![Action::RenderNeeded]
    }

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.suppress_click = false;
        if button == Button::Primary {
            self.input = InputState::Panning { last_screen: screen_pt, travelled: 0.0 };
        }
        Vec::new()
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let InputState::Panning { last_screen, travelled } = self.input else {
            return Vec::new();
        };
        let dx = screen_pt.x - last_screen.x;
        let dy = screen_pt.y - last_screen.y;
        self.input = InputState::Panning { last_screen: screen_pt, travelled: travelled + dx.hypot(dy) };
        self.pan_by(dx, dy)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point) -> Vec<Action> {
        let actions = self.on_pointer_move(screen_pt);
        if let InputState::Panning { travelled, .. } = self.input {
            self.suppress_click = travelled > self.config.click_slop_px;
        }
        self.input = InputState::Idle;
        actions
    }

    /// The pointer left the canvas: end any drag without a follow-up click.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.input = InputState::Idle;
        self.suppress_click = false;
        Vec::new()
    }

    // --- Viewport ---

    /// Update canvas dimensions (canvas pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width: f64, height: f64, dpr: f64) -> Vec<Action> {
        self.viewport = Viewport { width: width.max(1.0), height: height.max(1.0), dpr: dpr.max(1.0) };
        vec![Action::RenderNeeded]
    }

    // --- Queries ---

    /// The currently selected table id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<TableId> {
        self.selected
    }

    /// The currently selected table, if any.
    #[must_use]
    pub fn selected_table(&self) -> Option<&Table> {
        self.selected.and_then(|id| self.tables.get(id))
    }

    #[must_use]
    pub fn status(&self) -> MapStatus {
        self.status
    }

    /// Sequence number of the most recent load.
    #[must_use]
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Draw list for the current state.
    #[must_use]
    pub fn scene(&self) -> Scene {
        scene::build(&self.tables, &self.camera, self.selected, self.viewport, &self.config)
    }
}

/// The full table map engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, config: TableMapConfig) -> Self {
        Self { canvas, core: EngineCore::new(config) }
    }

    // --- Viewport ---

    /// Update viewport dimensions and resize the canvas backing store to match.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        let actions = self.core.set_viewport(width_css, height_css, dpr);
        let (w, h) = self.core.viewport.backing_size();
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        actions
    }

    // --- Delegated operations ---

    pub fn begin_load(&mut self, query: AvailabilityQuery) -> (LoadTicket, Vec<Action>) {
        self.core.begin_load(query)
    }

    pub fn finish_load(&mut self, ticket: &LoadTicket, result: Result<AvailabilityResponse, LoadError>) -> Vec<Action> {
        self.core.finish_load(ticket, result)
    }

    pub fn on_click(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_click(screen_pt)
    }

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("2d context has unexpected type"))?;
        render::draw(&ctx, &self.core.scene())
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<TableId> {
        self.core.selection()
    }

    #[must_use]
    pub fn status(&self) -> MapStatus {
        self.core.status()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }
}
