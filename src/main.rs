//! Demo: lasso/click selection over a generated point cloud.
//!
//! ```bash
//! RUST_LOG=info cargo run -- [config.yaml|config.json]
//! ```
//! Hover the plot to reveal the HUD; hold Shift (or the key named by
//! `LASSOPLOT_ADDITIVE_KEY`) to add/remove points.

use std::f64::consts::PI;

use lassoplot::{
    run_scatter_select, EventController, EventFilter, EventKind, Key, PersistedConfig,
    ScatterSelectConfig,
};

/// Three spiral clusters laid out along a golden-angle pattern.
fn demo_points() -> Vec<[f64; 2]> {
    let golden = PI * (3.0 - 5f64.sqrt());
    let centers = [[-4.0, -2.0], [0.0, 3.0], [4.0, -1.0]];
    let per_cluster = 150;
    let mut pts = Vec::with_capacity(centers.len() * per_cluster);
    for (c, center) in centers.iter().enumerate() {
        let spread = 1.0 + 0.4 * c as f64;
        for i in 0..per_cluster {
            let r = spread * ((i as f64 + 0.5) / per_cluster as f64).sqrt();
            let theta = i as f64 * golden;
            pts.push([center[0] + r * theta.cos(), center[1] + r * theta.sin()]);
        }
    }
    pts
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let mut cfg = ScatterSelectConfig {
        title: "lassoplot demo".to_string(),
        ..Default::default()
    };

    let persisted = match std::env::args().nth(1) {
        Some(path) => PersistedConfig::load_from_path(std::path::Path::new(&path)),
        None => PersistedConfig::load_from_default_path(),
    };
    match persisted {
        Ok(p) => cfg.apply_persisted(p),
        Err(e) => log::info!("Using default configuration: {e}"),
    }
    if let Ok(name) = std::env::var("LASSOPLOT_ADDITIVE_KEY") {
        match name.parse::<Key>() {
            Ok(key) => cfg.selection.additive_key = key,
            Err(e) => log::warn!("Ignoring LASSOPLOT_ADDITIVE_KEY: {e}"),
        }
    }
    log::info!("Hold {} to add/remove points", cfg.selection.additive_key);

    let events = EventController::new();
    let rx = events.subscribe(EventFilter::only(
        EventKind::BUTTON_CLICKED | EventKind::CONNECTED | EventKind::DISCONNECTED,
    ));
    cfg.events = Some(events);
    std::thread::spawn(move || {
        for evt in rx {
            log::info!("[{:.2}s] {} {:?}", evt.timestamp, evt.kinds, evt.button);
        }
    });

    run_scatter_select(demo_points(), cfg, |controller| {
        controller.on_selection_changed(|inds| {
            log::info!("selection changed: {} point(s)", inds.len());
        });
        controller.register_sync_button(|ctx| {
            log::info!("sync requested for {:?}", ctx.selected_indices());
        });
        controller.register_disconnect_button();
    })
}
