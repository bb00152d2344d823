//! Configuration types for the selection controller and its GUI front-end.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::style::StyleParams;
use crate::events::{EventController, Key};

// ─────────────────────────────────────────────────────────────────────────────
// Selection behaviour
// ─────────────────────────────────────────────────────────────────────────────

/// How gestures are interpreted and how the selection is drawn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Opacity of unselected points while something is selected. Default: `0.25`.
    pub alpha_other: f32,
    /// Size multiplier for selected points; `None` keeps sizes fixed. Default: `Some(3.0)`.
    pub expand_selected: Option<f32>,
    /// Click distance as a fraction of the smaller visible axis extent. Default: `0.02`.
    pub click_tolerance: f64,
    /// Key that switches gestures into add/remove mode. Default: Shift.
    pub additive_key: Key,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            alpha_other: 0.25,
            expand_selected: Some(3.0),
            click_tolerance: 0.02,
            additive_key: Key::Shift,
        }
    }
}

impl SelectionConfig {
    /// Copy with out-of-range values clamped into their valid domain.
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        if !(0.0..=1.0).contains(&out.alpha_other) {
            let clamped = if out.alpha_other.is_nan() {
                0.25
            } else {
                out.alpha_other.clamp(0.0, 1.0)
            };
            log::warn!("alpha_other {} out of [0, 1], using {}", out.alpha_other, clamped);
            out.alpha_other = clamped;
        }
        if !(out.click_tolerance >= 0.0 && out.click_tolerance.is_finite()) {
            log::warn!("click_tolerance {} is invalid, using 0", out.click_tolerance);
            out.click_tolerance = 0.0;
        }
        if let Some(f) = out.expand_selected {
            if !(f > 0.0 && f.is_finite()) {
                log::warn!("expand_selected {} is invalid, disabling size expansion", f);
                out.expand_selected = None;
            }
        }
        out
    }

    pub fn style_params(&self) -> StyleParams {
        StyleParams {
            alpha_other: self.alpha_other,
            expand_selected: self.expand_selected,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HUD look
// ─────────────────────────────────────────────────────────────────────────────

/// Placement and colours of the HUD buttons.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    /// Gap between buttons and above the axes, in axes fractions. Default: `0.02`.
    pub gap: f32,
    /// Button edge length in axes fractions. Default: `0.06`.
    pub size: f32,
    /// Idle button fill. Default: `#DBEBFC`.
    pub color: [u8; 3],
    /// Hovered button fill. Default: `#499CEF`.
    pub hover_color: [u8; 3],
    /// Title font size in points.
    pub title_font_size: f32,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            gap: 0.02,
            size: 0.06,
            color: [0xDB, 0xEB, 0xFC],
            hover_color: [0x49, 0x9C, 0xEF],
            title_font_size: 14.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Point look
// ─────────────────────────────────────────────────────────────────────────────

/// Base appearance of the scatter points before selection styling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointLook {
    pub color: [u8; 3],
    /// Marker radius in pixels.
    pub radius: f32,
}

impl Default for PointLook {
    fn default() -> Self {
        Self {
            color: [0x1F, 0x77, 0xB4],
            radius: 3.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Persistence
// ─────────────────────────────────────────────────────────────────────────────

/// The serializable part of [`ScatterSelectConfig`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedConfig {
    pub selection: SelectionConfig,
    pub hud: HudConfig,
    pub look: PointLook,
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

impl PersistedConfig {
    /// Serialize to `path`; `.json` files are written as JSON, anything else as YAML.
    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| format!("Failed to create dir {:?}: {}", dir, e))?;
        }
        let s = if is_json(path) {
            serde_json::to_string_pretty(self).map_err(|e| format!("Serialization error: {}", e))?
        } else {
            serde_yaml::to_string(self).map_err(|e| format!("Serialization error: {}", e))?
        };
        let mut f = fs::File::create(path)
            .map_err(|e| format!("Failed to create file {:?}: {}", path, e))?;
        f.write_all(s.as_bytes())
            .map_err(|e| format!("Failed to write file {:?}: {}", path, e))?;
        Ok(())
    }

    /// Load from `path`, picking the format the same way as
    /// [`save_to_path`](Self::save_to_path).
    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        let s = fs::read_to_string(path).map_err(|e| format!("Failed to read {:?}: {}", path, e))?;
        let cfg: PersistedConfig = if is_json(path) {
            serde_json::from_str(&s).map_err(|e| format!("Deserialization error: {}", e))?
        } else {
            serde_yaml::from_str(&s).map_err(|e| format!("Deserialization error: {}", e))?
        };
        Ok(cfg)
    }

    /// `~/.lassoplot/selection.yaml`
    pub fn default_path() -> Result<PathBuf, String> {
        let home = std::env::var("HOME").map_err(|e| format!("HOME env var not set: {}", e))?;
        Ok(PathBuf::from(home).join(".lassoplot").join("selection.yaml"))
    }

    pub fn load_from_default_path() -> Result<Self, String> {
        let path = Self::default_path()?;
        if !path.exists() {
            return Err(format!("Config file {:?} does not exist", path));
        }
        Self::load_from_path(&path)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ScatterSelectConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration for the selection window.
///
/// | Field            | Purpose |
/// |------------------|---------|
/// | `selection`      | Gesture and styling behaviour |
/// | `hud`            | Button placement and colours |
/// | `look`           | Base point appearance |
/// | `events`         | Optional notification channel for non-UI code |
#[derive(Clone)]
pub struct ScatterSelectConfig {
    /// Native window title.
    pub title: String,
    /// Optional eframe native-window options.
    pub native_options: Option<eframe::NativeOptions>,
    pub selection: SelectionConfig,
    pub hud: HudConfig,
    pub look: PointLook,
    pub events: Option<EventController>,
}

impl Default for ScatterSelectConfig {
    fn default() -> Self {
        Self {
            title: "lassoplot".to_string(),
            native_options: None,
            selection: SelectionConfig::default(),
            hud: HudConfig::default(),
            look: PointLook::default(),
            events: None,
        }
    }
}

impl ScatterSelectConfig {
    /// Overlay persisted settings on this config.
    pub fn apply_persisted(&mut self, persisted: PersistedConfig) {
        self.selection = persisted.selection;
        self.hud = persisted.hud;
        self.look = persisted.look;
    }

    pub fn persisted(&self) -> PersistedConfig {
        PersistedConfig {
            selection: self.selection.clone(),
            hud: self.hud.clone(),
            look: self.look.clone(),
        }
    }
}
