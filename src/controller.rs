//! The selection controller: gesture → selection → style pipeline plus HUD.
//!
//! A [`SelectionController`] owns the point set, the current [`Selection`],
//! the style buffers and the [`Hud`]. A toolkit adapter feeds it
//! [`UiEvent`]s through [`SelectionController::handle_event`]; events only
//! reach the `on_*` hooks while a listener for their kind is attached, which
//! is what [`connect`](SelectionController::connect) and
//! [`disconnect`](SelectionController::disconnect) manage.
//!
//! Each gesture runs classify → merge → restyle → notify synchronously, so
//! callers never observe a half-applied selection.

use crate::canvas::PlotCanvas;
use crate::config::{HudConfig, SelectionConfig};
use crate::data::geometry::{self, Point};
use crate::data::hud::{ActionButton, ButtonContext, ButtonIcon, Hud, HudRequests};
use crate::data::selection::Selection;
use crate::data::style::StyleBuffers;
use crate::events::{
    EventController, EventKind, Key, ListenerId, SelectionEvent, UiEvent, UiEventHandler,
};
use crate::icons;

/// Listener invoked with the new selection after a user gesture changes it.
pub type SelectionCallback = Box<dyn FnMut(&[usize])>;

/// Kinds `connect()` attaches a listener for, in attach order.
const CONNECT_KINDS: [EventKind; 6] = [
    EventKind::GESTURE,
    EventKind::BUTTON_CLICK,
    EventKind::POINTER_ENTER,
    EventKind::POINTER_EXIT,
    EventKind::KEY_DOWN,
    EventKind::KEY_UP,
];

pub struct SelectionController<C: PlotCanvas> {
    canvas: C,
    points: Vec<Point>,
    config: SelectionConfig,
    selection: Selection,
    styles: StyleBuffers,
    additive: bool,
    hud: Hud,
    listeners: Vec<(ListenerId, EventKind)>,
    close_listener: Option<ListenerId>,
    callbacks: Vec<SelectionCallback>,
    events: Option<EventController>,
}

impl<C: PlotCanvas> SelectionController<C> {
    /// Wrap `canvas` showing `points`. Starts disconnected with nothing selected.
    ///
    /// A close listener is attached right away so closing the plot always
    /// detaches the interaction listeners.
    pub fn new(mut canvas: C, points: Vec<Point>, config: SelectionConfig) -> Self {
        let style = canvas.point_style();
        let styles = StyleBuffers::new(points.len(), style.alphas, style.sizes);
        let close_listener = Some(canvas.subscribe(EventKind::CLOSE));
        Self {
            canvas,
            points,
            config: config.sanitized(),
            selection: Selection::new(),
            styles,
            additive: false,
            hud: Hud::new(HudConfig::default()),
            listeners: Vec::new(),
            close_listener,
            callbacks: Vec::new(),
            events: None,
        }
    }

    pub fn with_hud_config(mut self, layout: HudConfig) -> Self {
        self.hud.set_layout(layout);
        self
    }

    /// Also publish notifications on `events`.
    pub fn with_events(mut self, events: EventController) -> Self {
        self.events = Some(events);
        self
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn selected_indices(&self) -> &[usize] {
        self.selection.as_slice()
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    pub fn styles(&self) -> &StyleBuffers {
        &self.styles
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn hud_mut(&mut self) -> &mut Hud {
        &mut self.hud
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn is_additive(&self) -> bool {
        self.additive
    }

    pub fn is_connected(&self) -> bool {
        !self.listeners.is_empty()
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// Attach gesture, button, pointer and key listeners. No-op when connected.
    pub fn connect(&mut self) {
        if self.is_connected() {
            return;
        }
        for kind in CONNECT_KINDS {
            let id = self.canvas.subscribe(kind);
            self.listeners.push((id, kind));
        }
        self.hud.set_additive(self.additive);
        self.hud.set_visible(false);
        log::info!(
            "selection controller connected ({} points, {} buttons)",
            self.points.len(),
            self.hud.buttons().len()
        );
        self.emit(SelectionEvent::new(EventKind::CONNECTED));
    }

    /// Detach everything `connect()` attached. No-op when disconnected.
    pub fn disconnect(&mut self) {
        if !self.is_connected() {
            return;
        }
        for (id, _) in self.listeners.drain(..) {
            self.canvas.unsubscribe(id);
        }
        self.additive = false;
        self.hud.set_additive(false);
        self.hud.set_visible(false);
        log::info!("selection controller disconnected");
        self.emit(SelectionEvent::new(EventKind::DISCONNECTED));
    }

    /// Schedule a repaint.
    pub fn draw(&mut self) {
        self.canvas.draw_idle();
    }

    pub fn show(&mut self) {
        self.canvas.show();
    }

    // ── Collaborator API ────────────────────────────────────────────────

    /// Replace the selection without notifying selection listeners.
    ///
    /// Indices outside the point set are dropped with a warning.
    pub fn set_selection<I: IntoIterator<Item = usize>>(&mut self, indices: I) {
        let (selection, dropped) = Selection::from_indices(indices).bounded(self.points.len());
        if dropped > 0 {
            log::warn!(
                "ignoring {} selection index(es) outside 0..{}",
                dropped,
                self.points.len()
            );
        }
        self.apply_selection(selection);
        let evt = SelectionEvent::new(EventKind::SELECTION_SET)
            .with_selection(self.selection.as_slice());
        self.emit(evt);
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(std::iter::empty());
    }

    /// Register a listener for gesture-driven selection changes.
    pub fn on_selection_changed(&mut self, callback: impl FnMut(&[usize]) + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// Append a HUD button.
    pub fn register_action_button(
        &mut self,
        label: impl Into<String>,
        icon: ButtonIcon,
        callback: impl FnMut(&mut ButtonContext<'_>) + 'static,
    ) {
        let button = ActionButton::new(label, icon, Box::new(callback));
        log::debug!("registered HUD button {:?}", button.label);
        self.hud.push_button(button);
    }

    /// Append the "sync" button with its default icon.
    pub fn register_sync_button(&mut self, callback: impl FnMut(&mut ButtonContext<'_>) + 'static) {
        self.register_action_button("sync", icons::sync_icon(), callback);
    }

    /// Append the "disconnect" button, which detaches this controller.
    pub fn register_disconnect_button(&mut self) {
        self.register_action_button("disconnect", icons::disconnect_icon(), |ctx| {
            ctx.request_disconnect()
        });
    }

    /// Feed an event from the toolkit. Returns whether a listener took it.
    pub fn handle_event(&mut self, event: &UiEvent) -> bool {
        let kind = event.kind();
        let listening = if EventKind::INTERACTION.contains(kind) {
            self.listeners.iter().any(|(_, k)| k.intersects(kind))
        } else {
            kind == EventKind::CLOSE && self.close_listener.is_some()
        };
        if !listening {
            return false;
        }
        self.dispatch(event);
        true
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn apply_selection(&mut self, selection: Selection) {
        self.selection = selection;
        self.styles.apply(&self.selection, &self.config.style_params());
        self.canvas.set_point_style(self.styles.alphas(), self.styles.sizes());
        self.canvas.draw_idle();
    }

    fn emit(&self, event: SelectionEvent) {
        if let Some(events) = &self.events {
            events.emit(event);
        }
    }
}

impl<C: PlotCanvas> UiEventHandler for SelectionController<C> {
    fn on_pointer_enter(&mut self) {
        self.hud.set_additive(self.additive);
        self.hud.set_visible(true);
        log::debug!("HUD shown ({:?})", self.hud.title());
        self.draw();
        self.emit(SelectionEvent::new(EventKind::HUD_SHOWN));
    }

    fn on_pointer_exit(&mut self) {
        self.hud.set_visible(false);
        log::debug!("HUD hidden");
        self.draw();
        self.emit(SelectionEvent::new(EventKind::HUD_HIDDEN));
    }

    fn on_key_down(&mut self, key: &Key) {
        if *key == self.config.additive_key {
            log::debug!("additive key {} down", key);
            self.additive = true;
            self.hud.set_additive(true);
            self.draw();
        }
    }

    fn on_key_up(&mut self, key: &Key) {
        if *key == self.config.additive_key {
            self.additive = false;
            self.hud.set_additive(false);
            self.draw();
        }
    }

    fn on_gesture_complete(&mut self, vertices: &[Point]) {
        let bounds = self.canvas.view_bounds();
        let outcome =
            geometry::select_gesture(&self.points, vertices, &bounds, self.config.click_tolerance);
        let merged = self.selection.merge(&outcome.selection, self.additive);
        log::debug!(
            "{:?} over {} vertices hit {} point(s); selection {} -> {}",
            outcome.kind,
            vertices.len(),
            outcome.selection.len(),
            self.selection.len(),
            merged.len()
        );

        if merged == self.selection {
            // still repaint to clear the lasso trail
            self.draw();
            return;
        }

        self.apply_selection(merged);
        let inds = self.selection.as_slice().to_vec();
        for cb in self.callbacks.iter_mut() {
            cb(inds.as_slice());
        }
        self.emit(SelectionEvent::new(EventKind::SELECTION_CHANGED).with_selection(&inds));
    }

    fn on_button_click(&mut self, index: usize) {
        let mut requests = HudRequests::default();
        let Some(label) = self.hud.click(index, self.selection.as_slice(), &mut requests) else {
            log::warn!("click on unknown HUD button {}", index);
            return;
        };
        self.draw();
        log::info!("HUD button {:?} clicked", label);
        self.emit(SelectionEvent::new(EventKind::BUTTON_CLICKED).with_button(&label));

        if requests.clear_selection {
            self.clear_selection();
        }
        if requests.disconnect {
            self.disconnect();
        }
    }

    fn on_close(&mut self) {
        self.disconnect();
    }
}
