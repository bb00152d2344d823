//! lassoplot crate root: re-exports and module wiring.
//!
//! Lasso and click selection of points in a scatter plot, built on
//! egui/eframe:
//! - `data`: hit-testing, selection sets, style buffers and HUD state
//! - `events`: inbound UI events, listener traits and outbound notifications
//! - `canvas`: the rendering seam plus a headless implementation
//! - `controller`: the selection state machine tying it together
//! - `plot` / `app`: the egui_plot widget and a native-window runner
//! - `config`: tunables and their YAML/JSON persistence

pub mod app;
pub mod canvas;
pub mod config;
pub mod controller;
pub mod data;
pub mod events;
pub mod icons;
pub mod plot;

// Public re-exports for a compact external API
pub use app::{run_scatter_select, ScatterSelectApp};
pub use canvas::{HeadlessCanvas, PlotCanvas, PointStyle};
pub use config::{HudConfig, PersistedConfig, PointLook, ScatterSelectConfig, SelectionConfig};
pub use controller::SelectionController;
pub use data::geometry::{GestureKind, Point, ViewBounds};
pub use data::hud::{ButtonContext, ButtonIcon};
pub use data::selection::Selection;
pub use events::{
    EventController, EventFilter, EventKind, Key, SelectionEvent, UiEvent, UiEventHandler,
    UiEventSource,
};
pub use plot::{show_selection_plot, EguiCanvas};
