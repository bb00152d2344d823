//! Native-window application around the selection plot.
//!
//! | Sub-module        | Responsibility |
//! | ----------------- | -------------- |
//! | [`scatter_app`]   | [`ScatterSelectApp`], the [`eframe::App`] that renders the plot each frame |
//! | [`run`]           | [`run_scatter_select()`] entry point |

mod run;
mod scatter_app;

pub use run::run_scatter_select;
pub use scatter_app::ScatterSelectApp;
