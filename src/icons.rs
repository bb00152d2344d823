//! Button icons: built-in glyphs and rasterization of custom images.

use std::collections::HashMap;

use eframe::egui;

use crate::data::hud::ButtonIcon;

/// Default icon of the "sync" button.
pub fn sync_icon() -> ButtonIcon {
    ButtonIcon::Glyph(egui_phosphor::regular::ARROWS_CLOCKWISE.to_string())
}

/// Default icon of the "disconnect" button.
pub fn disconnect_icon() -> ButtonIcon {
    ButtonIcon::Glyph(egui_phosphor::regular::LINK_BREAK.to_string())
}

/// Render an SVG document to an image `size_px` pixels on its longer side.
pub fn rasterize_svg(data: &[u8], size_px: u32) -> Result<egui::ColorImage, String> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_data(data, &opt).map_err(|e| format!("Invalid SVG: {}", e))?;
    let src = tree.size();
    if src.width() <= 0.0 || src.height() <= 0.0 {
        return Err("SVG has an empty view box".to_string());
    }
    let scale = size_px.max(1) as f32 / src.width().max(src.height());
    let w = ((src.width() * scale).round() as u32).max(1);
    let h = ((src.height() * scale).round() as u32).max(1);
    let mut pixmap =
        tiny_skia::Pixmap::new(w, h).ok_or_else(|| format!("Cannot allocate {}x{} pixmap", w, h))?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(egui::ColorImage::from_rgba_premultiplied(
        [w as usize, h as usize],
        pixmap.data(),
    ))
}

/// Decode an encoded raster image (PNG, JPEG, ...).
pub fn decode_raster(data: &[u8]) -> Result<egui::ColorImage, String> {
    let img = image::load_from_memory(data).map_err(|e| format!("Cannot decode image: {}", e))?;
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

/// Textures for image-based button icons, created on first use.
#[derive(Default)]
pub struct IconCache {
    textures: HashMap<usize, egui::TextureHandle>,
    failed: HashMap<usize, String>,
}

impl IconCache {
    /// Texture for button `index`, or `None` for glyph icons and decode failures.
    pub fn texture(
        &mut self,
        ctx: &egui::Context,
        index: usize,
        icon: &ButtonIcon,
        size_px: u32,
    ) -> Option<egui::TextureHandle> {
        if let Some(tex) = self.textures.get(&index) {
            return Some(tex.clone());
        }
        if self.failed.contains_key(&index) {
            return None;
        }
        let decoded = match icon {
            ButtonIcon::Svg(bytes) => rasterize_svg(bytes, size_px),
            ButtonIcon::Raster(bytes) => decode_raster(bytes),
            ButtonIcon::None | ButtonIcon::Glyph(_) => return None,
        };
        match decoded {
            Ok(img) => {
                let tex = ctx.load_texture(
                    format!("lassoplot-button-{}", index),
                    img,
                    egui::TextureOptions::LINEAR,
                );
                self.textures.insert(index, tex.clone());
                Some(tex)
            }
            Err(e) => {
                log::error!("Failed to load icon for HUD button {}: {}", index, e);
                self.failed.insert(index, e);
                None
            }
        }
    }
}
