//! Heads-up display state: title text and action buttons.
//!
//! The HUD is hidden until the pointer enters the plot and hides again when
//! it leaves. Rendering lives in the toolkit adapter; this module only
//! tracks what should be shown and where.

use std::fmt;
use std::sync::Arc;

use crate::config::HudConfig;

pub const TITLE_SELECT: &str = "Click or drag to select points";
pub const TITLE_ADDITIVE: &str = "Click or drag to add/remove points";

/// Picture drawn on a HUD button.
#[derive(Clone, PartialEq)]
pub enum ButtonIcon {
    None,
    /// Text or icon-font glyph.
    Glyph(String),
    /// SVG document bytes.
    Svg(Arc<[u8]>),
    /// Encoded raster image (PNG, JPEG, ...).
    Raster(Arc<[u8]>),
}

impl fmt::Debug for ButtonIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonIcon::None => write!(f, "None"),
            ButtonIcon::Glyph(g) => write!(f, "Glyph({:?})", g),
            ButtonIcon::Svg(b) => write!(f, "Svg({} bytes)", b.len()),
            ButtonIcon::Raster(b) => write!(f, "Raster({} bytes)", b.len()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVisual {
    #[default]
    Idle,
    Hover,
}

/// Requests a button callback can queue for the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HudRequests {
    pub disconnect: bool,
    pub clear_selection: bool,
}

/// What a button callback gets to see and ask for.
pub struct ButtonContext<'a> {
    label: &'a str,
    selected: &'a [usize],
    requests: &'a mut HudRequests,
}

impl<'a> ButtonContext<'a> {
    pub fn new(label: &'a str, selected: &'a [usize], requests: &'a mut HudRequests) -> Self {
        Self {
            label,
            selected,
            requests,
        }
    }

    pub fn label(&self) -> &str {
        self.label
    }

    pub fn selected_indices(&self) -> &[usize] {
        self.selected
    }

    /// Detach the controller once the click has been handled.
    pub fn request_disconnect(&mut self) {
        self.requests.disconnect = true;
    }

    /// Clear the selection without notifying selection listeners.
    pub fn request_clear_selection(&mut self) {
        self.requests.clear_selection = true;
    }
}

pub type ButtonCallback = Box<dyn FnMut(&mut ButtonContext<'_>)>;

/// A registered HUD button.
pub struct ActionButton {
    pub label: String,
    pub icon: ButtonIcon,
    pub visual: ButtonVisual,
    callback: ButtonCallback,
}

impl ActionButton {
    pub fn new(label: impl Into<String>, icon: ButtonIcon, callback: ButtonCallback) -> Self {
        Self {
            label: label.into(),
            icon,
            visual: ButtonVisual::Idle,
            callback,
        }
    }
}

impl fmt::Debug for ActionButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionButton")
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("visual", &self.visual)
            .finish()
    }
}

/// Title and buttons overlay.
#[derive(Debug)]
pub struct Hud {
    title: String,
    visible: bool,
    buttons: Vec<ActionButton>,
    layout: HudConfig,
}

impl Hud {
    pub fn new(layout: HudConfig) -> Self {
        Self {
            title: String::new(),
            visible: false,
            buttons: Vec::new(),
            layout,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Pick the title matching the additive-mode state.
    pub fn set_additive(&mut self, additive: bool) {
        self.title = if additive { TITLE_ADDITIVE } else { TITLE_SELECT }.to_string();
    }

    pub fn buttons(&self) -> &[ActionButton] {
        &self.buttons
    }

    pub fn layout(&self) -> &HudConfig {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: HudConfig) {
        self.layout = layout;
    }

    pub fn push_button(&mut self, button: ActionButton) {
        self.buttons.push(button);
    }

    pub fn set_hover(&mut self, index: usize, hovered: bool) {
        if let Some(b) = self.buttons.get_mut(index) {
            b.visual = if hovered {
                ButtonVisual::Hover
            } else {
                ButtonVisual::Idle
            };
        }
    }

    /// Run the callback of button `index`, then drop it back to idle.
    ///
    /// Returns the button label, or `None` if there is no such button.
    pub fn click(
        &mut self,
        index: usize,
        selected: &[usize],
        requests: &mut HudRequests,
    ) -> Option<String> {
        let button = self.buttons.get_mut(index)?;
        let mut ctx = ButtonContext::new(&button.label, selected, requests);
        (button.callback)(&mut ctx);
        button.visual = ButtonVisual::Idle;
        Some(button.label.clone())
    }

    /// Rectangle of button `index` as `[x, y, w, h]` in axes fractions.
    ///
    /// Buttons are right-aligned along the top edge, just above the axes.
    pub fn button_rect(&self, index: usize) -> [f32; 4] {
        let n = self.buttons.len();
        let size = self.layout.size;
        let gap = self.layout.gap;
        let j = n.saturating_sub(1).saturating_sub(index) as f32;
        [1.0 - (j + 1.0) * size - j * gap, 1.0 + gap, size, size]
    }
}
