//! Top-level entry point for running the selection plot as a native window.

use eframe::egui;

use crate::config::ScatterSelectConfig;
use crate::controller::SelectionController;
use crate::data::geometry::Point;
use crate::plot::EguiCanvas;

use super::scatter_app::ScatterSelectApp;

/// Launch a native window showing `points` with lasso/click selection.
///
/// 1. Builds a [`ScatterSelectApp`] from `cfg`.
/// 2. Hands its controller to `setup` so callers can register selection
///    listeners and HUD buttons before anything is shown.
/// 3. Connects the controller and enters the eframe event loop.
///
/// The call blocks until the window is closed.
pub fn run_scatter_select(
    points: Vec<Point>,
    mut cfg: ScatterSelectConfig,
    setup: impl FnOnce(&mut SelectionController<EguiCanvas>),
) -> eframe::Result<()> {
    let mut app = ScatterSelectApp::new(points, &cfg);
    setup(&mut app.controller);
    app.controller.connect();
    app.controller.show();

    let title = cfg.title.clone();
    let mut opts = cfg
        .native_options
        .take()
        .unwrap_or_else(eframe::NativeOptions::default);
    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(900.0, 700.0));
    }

    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            // Glyph icons on the HUD buttons come from the Phosphor font.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}
