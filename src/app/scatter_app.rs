//! Standalone application wrapper for the selection plot.
//!
//! [`ScatterSelectApp`] owns a [`SelectionController`] driving an
//! [`EguiCanvas`] and implements [`eframe::App`] so the plot can run in its
//! own native window (via [`run_scatter_select`](super::run_scatter_select)).

use eframe::egui;

use crate::config::ScatterSelectConfig;
use crate::controller::SelectionController;
use crate::data::geometry::Point;
use crate::plot::{show_selection_plot, EguiCanvas};

// ─────────────────────────────────────────────────────────────────────────────
// ScatterSelectApp
// ─────────────────────────────────────────────────────────────────────────────

pub struct ScatterSelectApp {
    /// Controller that owns the points, selection and HUD.
    pub controller: SelectionController<EguiCanvas>,
}

impl ScatterSelectApp {
    /// Build the controller from `cfg`. The caller connects it.
    pub fn new(points: Vec<Point>, cfg: &ScatterSelectConfig) -> Self {
        let canvas = EguiCanvas::new(cfg.look.clone());
        let mut controller = SelectionController::new(canvas, points, cfg.selection.clone())
            .with_hud_config(cfg.hud.clone());
        if let Some(events) = &cfg.events {
            controller = controller.with_events(events.clone());
        }
        Self { controller }
    }
}

impl eframe::App for ScatterSelectApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let n = self.controller.selected_indices().len();
            let total = self.controller.points().len();
            ui.label(format!("{} of {} points selected", n, total));
            show_selection_plot(ui, &mut self.controller, "lassoplot_scatter");
        });
    }
}
