//! Toolkit-independent selection logic.

pub mod geometry;
pub mod hud;
pub mod selection;
pub mod style;
