//! The rendering side of a toolkit adapter.
//!
//! A [`PlotCanvas`] is what the selection controller talks to: it owns the
//! listener registry (via [`UiEventSource`]), reports the visible view, takes
//! the recomputed style buffers and schedules repaints. [`HeadlessCanvas`]
//! implements it without any rendering and is used for embedding in non-GUI
//! code and in tests.

use std::collections::BTreeMap;

use crate::data::geometry::ViewBounds;
use crate::events::{EventKind, ListenerId, UiEventSource};

/// Style buffers as the canvas currently holds them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointStyle {
    pub alphas: Vec<f32>,
    pub sizes: Vec<f32>,
}

pub trait PlotCanvas: UiEventSource {
    /// Axis ranges currently visible.
    fn view_bounds(&self) -> ViewBounds;
    /// Initial style of the point collection. May be shorter than the point set.
    fn point_style(&self) -> PointStyle;
    /// Take updated per-point opacity and size buffers. Sizes are marker
    /// areas, so a size factor scales the drawn area rather than the radius.
    fn set_point_style(&mut self, alphas: &[f32], sizes: &[f32]);
    /// Mark the canvas dirty; the repaint happens on the next render pass.
    fn draw_idle(&mut self);
    /// Bring the plot on screen without blocking.
    fn show(&mut self) {}
}

/// Listener bookkeeping shared by the canvas implementations.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    listeners: BTreeMap<ListenerId, EventKind>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn add(&mut self, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, kind);
        id
    }

    pub fn remove(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Whether any live listener covers `kind`.
    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.listeners.values().any(|k| k.intersects(kind))
    }
}

/// Canvas with no rendering that records everything it is asked to do.
#[derive(Debug, Clone)]
pub struct HeadlessCanvas {
    bounds: ViewBounds,
    style: PointStyle,
    listeners: ListenerRegistry,
    redraws: usize,
    shown: bool,
}

impl HeadlessCanvas {
    pub fn new(bounds: ViewBounds) -> Self {
        Self {
            bounds,
            style: PointStyle::default(),
            listeners: ListenerRegistry::default(),
            redraws: 0,
            shown: false,
        }
    }

    /// Start from an explicit (possibly degenerate) style.
    pub fn with_style(mut self, alphas: Vec<f32>, sizes: Vec<f32>) -> Self {
        self.style = PointStyle { alphas, sizes };
        self
    }

    pub fn set_view_bounds(&mut self, bounds: ViewBounds) {
        self.bounds = bounds;
    }

    pub fn style(&self) -> &PointStyle {
        &self.style
    }

    /// Number of `draw_idle` calls so far.
    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    pub fn was_shown(&self) -> bool {
        self.shown
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.listeners.is_listening(kind)
    }
}

impl UiEventSource for HeadlessCanvas {
    fn subscribe(&mut self, kind: EventKind) -> ListenerId {
        self.listeners.add(kind)
    }

    fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.remove(id);
    }
}

impl PlotCanvas for HeadlessCanvas {
    fn view_bounds(&self) -> ViewBounds {
        self.bounds
    }

    fn point_style(&self) -> PointStyle {
        self.style.clone()
    }

    fn set_point_style(&mut self, alphas: &[f32], sizes: &[f32]) {
        self.style.alphas = alphas.to_vec();
        self.style.sizes = sizes.to_vec();
    }

    fn draw_idle(&mut self) {
        self.redraws += 1;
    }

    fn show(&mut self) {
        self.shown = true;
    }
}
