//! egui/egui_plot front-end for the selection controller.
//!
//! [`EguiCanvas`] is the [`PlotCanvas`] the controller draws into, and
//! [`show_selection_plot`] renders one frame:
//! - the scatter, grouped by the per-point style the controller pushed
//! - the lasso trail while the primary button is held
//! - the HUD title and buttons above the plot frame
//!
//! It also turns egui input into [`UiEvent`]s: hover transitions become
//! pointer enter/exit, modifier transitions become key down/up, a primary
//! press→release becomes a gesture, and viewport close requests become
//! `Close`. Events are dispatched after the frame has been laid out.

use std::collections::BTreeMap;

use eframe::egui;
use egui::{Align2, Color32, FontId, Pos2, Rect, RichText};
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::canvas::{ListenerRegistry, PlotCanvas, PointStyle};
use crate::config::PointLook;
use crate::controller::SelectionController;
use crate::data::geometry::{Point, ViewBounds};
use crate::data::hud::{ButtonIcon, ButtonVisual};
use crate::events::{EventKind, Key, ListenerId, UiEvent, UiEventSource};
use crate::icons::IconCache;

/// Padding added around the data when the view is first fitted.
const FIT_MARGIN: f64 = 0.05;

/// Canvas state owned by the controller and rendered by [`show_selection_plot`].
pub struct EguiCanvas {
    bounds: ViewBounds,
    style: PointStyle,
    look: PointLook,
    listeners: ListenerRegistry,
    dirty: bool,
    fitted: bool,
    pointer_inside: bool,
    key_held: bool,
    lasso: Option<Vec<Point>>,
    icons: IconCache,
}

impl EguiCanvas {
    /// The initial style is a single shared entry; the controller widens it
    /// to one entry per point on first use. Sizes are marker areas in px².
    pub fn new(look: PointLook) -> Self {
        Self {
            bounds: ViewBounds::default(),
            style: PointStyle {
                alphas: vec![1.0],
                sizes: vec![look.radius * look.radius],
            },
            look,
            listeners: ListenerRegistry::default(),
            dirty: true,
            fitted: false,
            pointer_inside: false,
            key_held: false,
            lasso: None,
            icons: IconCache::default(),
        }
    }

    fn is_listening(&self, kind: EventKind) -> bool {
        self.listeners.is_listening(kind)
    }

    /// Take and clear the repaint request.
    fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl UiEventSource for EguiCanvas {
    fn subscribe(&mut self, kind: EventKind) -> ListenerId {
        self.listeners.add(kind)
    }

    fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.remove(id);
    }
}

impl PlotCanvas for EguiCanvas {
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
        self.dirty = true;
    }
}

fn rgb(c: [u8; 3]) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}

/// Marker radius for a size-buffer entry, which holds the marker area.
fn marker_radius(area: f32) -> f32 {
    area.max(0.0).sqrt()
}

/// Bucket points by (opacity, size) so each bucket is one plot item.
fn style_groups(
    points: &[Point],
    style: &PointStyle,
    look: &PointLook,
) -> Vec<(f32, f32, Vec<Point>)> {
    let alpha0 = style.alphas.first().copied().unwrap_or(1.0);
    let size0 = style.sizes.first().copied().unwrap_or(look.radius * look.radius);
    let mut groups: BTreeMap<(u32, u32), Vec<Point>> = BTreeMap::new();
    for (i, p) in points.iter().enumerate() {
        let a = style.alphas.get(i).copied().unwrap_or(alpha0);
        let s = style.sizes.get(i).copied().unwrap_or(size0);
        groups.entry((a.to_bits(), s.to_bits())).or_default().push(*p);
    }
    groups
        .into_iter()
        .map(|((a, s), pts)| (f32::from_bits(a), f32::from_bits(s), pts))
        .collect()
}

fn modifier_held(mods: &egui::Modifiers, key: &Key) -> Option<bool> {
    match key {
        Key::Shift => Some(mods.shift),
        Key::Ctrl => Some(mods.ctrl || mods.command),
        Key::Alt => Some(mods.alt),
        Key::Other(_) => None,
    }
}

/// Down/up transition of the additive key since the last frame.
fn key_transition(ui: &egui::Ui, key: &Key, was_held: bool) -> Option<bool> {
    let held = match modifier_held(&ui.input(|i| i.modifiers), key) {
        Some(h) => h,
        None => {
            let Key::Other(name) = key else { return None };
            let ek = egui::Key::from_name(name)?;
            let (pressed, released) = ui.input(|i| (i.key_pressed(ek), i.key_released(ek)));
            if pressed {
                true
            } else if released {
                false
            } else {
                was_held
            }
        }
    };
    (held != was_held).then_some(held)
}

/// Screen rectangle of a HUD button given in axes fractions.
fn button_screen_rect(frame: Rect, r: [f32; 4]) -> Rect {
    let left = frame.left() + r[0] * frame.width();
    let bottom = frame.bottom() - r[1] * frame.height();
    let w = r[2] * frame.width();
    let h = r[3] * frame.height();
    Rect::from_min_max(Pos2::new(left, bottom - h), Pos2::new(left + w, bottom))
}

/// Render the plot for one frame and feed the resulting events to `controller`.
pub fn show_selection_plot(
    ui: &mut egui::Ui,
    controller: &mut SelectionController<EguiCanvas>,
    plot_id: &str,
) -> egui::Response {
    let ctx = ui.ctx().clone();
    let mut events: Vec<UiEvent> = Vec::new();

    // Leave room above the frame for the HUD strip.
    let layout = controller.hud().layout().clone();
    let strip = ui.available_height() * (layout.size + 2.0 * layout.gap);
    ui.add_space(strip);

    let additive_key = controller.config().additive_key.clone();
    let groups = {
        let canvas = controller.canvas();
        style_groups(controller.points(), &canvas.style, &canvas.look)
    };
    let fit = (!controller.canvas().fitted).then(|| ViewBounds::around(controller.points()));
    let trail = controller.canvas().lasso.clone();
    let base = controller.canvas().look.color;

    let plot_resp = Plot::new(plot_id)
        .allow_drag(false)
        .allow_boxed_zoom(false)
        .allow_scroll(true)
        .show(ui, |plot_ui| {
            if let Some(b) = fit {
                let mx = (b.width() * FIT_MARGIN).max(f64::EPSILON);
                let my = (b.height() * FIT_MARGIN).max(f64::EPSILON);
                plot_ui.set_plot_bounds_x(b.x.0 - mx..=b.x.1 + mx);
                plot_ui.set_plot_bounds_y(b.y.0 - my..=b.y.1 + my);
            }
            for (i, (alpha, size, pts)) in groups.into_iter().enumerate() {
                let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
                let color = Color32::from_rgba_unmultiplied(base[0], base[1], base[2], a);
                plot_ui.points(
                    Points::new(format!("points-{}", i), PlotPoints::from(pts))
                        .radius(marker_radius(size))
                        .color(color)
                        .filled(true),
                );
            }
            if let Some(trail) = trail.filter(|t| t.len() > 1) {
                let mut closed = trail;
                if let Some(first) = closed.first().copied() {
                    closed.push(first);
                }
                plot_ui.line(
                    Line::new("lasso", PlotPoints::from(closed))
                        .color(Color32::GRAY)
                        .width(1.5),
                );
            }
            let b = plot_ui.plot_bounds();
            (b.min(), b.max(), plot_ui.pointer_coordinate())
        });
    let (min, max, pointer) = plot_resp.inner;
    let frame = *plot_resp.transform.frame();
    let response = plot_resp.response;

    let hover_pos = ui.input(|i| i.pointer.hover_pos());
    let hud_area = Rect::from_min_max(Pos2::new(frame.left(), frame.top() - strip), frame.max);
    let inside = hover_pos.is_some_and(|p| hud_area.contains(p));

    // ── HUD ──────────────────────────────────────────────────────────────
    let mut over_button = false;
    if controller.hud().is_visible() {
        ui.painter().text(
            Pos2::new(frame.center().x, frame.top() - strip + 2.0),
            Align2::CENTER_TOP,
            controller.hud().title(),
            FontId::proportional(layout.title_font_size),
            ui.visuals().text_color(),
        );

        let buttons: Vec<(Rect, ButtonIcon, ButtonVisual)> = (0..controller.hud().buttons().len())
            .map(|i| {
                let b = &controller.hud().buttons()[i];
                (
                    button_screen_rect(frame, controller.hud().button_rect(i)),
                    b.icon.clone(),
                    b.visual,
                )
            })
            .collect();

        for (i, (rect, icon, visual)) in buttons.into_iter().enumerate() {
            let fill = match visual {
                ButtonVisual::Hover => rgb(layout.hover_color),
                ButtonVisual::Idle => rgb(layout.color),
            };
            let px = rect.height().max(1.0).round() as u32;
            let texture = controller.canvas_mut().icons.texture(&ctx, i, &icon, px);
            let button = match (&icon, texture) {
                (_, Some(tex)) => egui::Button::image(
                    egui::Image::from_texture(egui::load::SizedTexture::from_handle(&tex))
                        .fit_to_exact_size(rect.size() * 0.8),
                ),
                (ButtonIcon::Glyph(g), None) => {
                    egui::Button::new(RichText::new(g.as_str()).size(rect.height() * 0.6))
                }
                _ => egui::Button::new(""),
            };
            let resp = ui.put(rect, button.fill(fill));
            over_button |= resp.hovered();
            controller.hud_mut().set_hover(i, resp.hovered());
            if resp.clicked() && controller.canvas().is_listening(EventKind::BUTTON_CLICK) {
                events.push(UiEvent::ButtonClick(i));
            }
        }
    }

    // ── Input → events ───────────────────────────────────────────────────
    let canvas = controller.canvas_mut();
    canvas.bounds = ViewBounds::new((min[0], max[0]), (min[1], max[1]));

    if inside != canvas.pointer_inside {
        canvas.pointer_inside = inside;
        events.push(if inside {
            UiEvent::PointerEnter
        } else {
            UiEvent::PointerExit
        });
    }

    if let Some(held) = key_transition(ui, &additive_key, canvas.key_held) {
        canvas.key_held = held;
        events.push(if held {
            UiEvent::KeyDown(additive_key.clone())
        } else {
            UiEvent::KeyUp(additive_key.clone())
        });
    }

    let (pressed, down, released) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_down(),
            i.pointer.primary_released(),
        )
    });
    let in_frame = hover_pos.is_some_and(|p| frame.contains(p));
    if pressed && in_frame && !over_button && canvas.is_listening(EventKind::GESTURE) {
        canvas.lasso = pointer.map(|p| vec![[p.x, p.y]]);
    }
    if down {
        if let (Some(trail), Some(p)) = (canvas.lasso.as_mut(), pointer) {
            let v = [p.x, p.y];
            if trail.last() != Some(&v) {
                trail.push(v);
            }
        }
    }
    if released {
        if let Some(trail) = canvas.lasso.take() {
            events.push(UiEvent::GestureComplete(trail));
        }
    }
    let drawing = canvas.lasso.is_some();

    if ctx.input(|i| i.viewport().close_requested()) {
        events.push(UiEvent::Close);
    }

    for ev in &events {
        controller.handle_event(ev);
    }

    let canvas = controller.canvas_mut();
    if fit.is_some() {
        canvas.fitted = true;
    }
    if canvas.take_dirty() || drawing {
        ctx.request_repaint();
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_split_by_style() {
        let pts = [[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
        let style = PointStyle {
            alphas: vec![0.25, 1.0, 0.25],
            sizes: vec![3.0, 9.0, 3.0],
        };
        let groups = style_groups(&pts, &style, &PointLook::default());
        assert_eq!(groups.len(), 2);
        let total: usize = groups.iter().map(|g| g.2.len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn singleton_style_forms_one_group() {
        let pts = [[0.0, 0.0], [1.0, 1.0]];
        let c = EguiCanvas::new(PointLook::default());
        let look = PointLook::default();
        let groups = style_groups(&pts, &c.point_style(), &look);
        assert_eq!(groups.len(), 1);
        assert_eq!(marker_radius(groups[0].1), look.radius);
    }

    #[test]
    fn expanded_marker_scales_area_not_radius() {
        let look = PointLook::default();
        let c = EguiCanvas::new(look.clone());
        let base = c.point_style().sizes[0];
        let expanded = marker_radius(3.0 * base);
        assert!((expanded / look.radius - 3f32.sqrt()).abs() < 1e-5);
        assert_eq!(marker_radius(-1.0), 0.0);
    }

    #[test]
    fn button_rect_sits_above_frame() {
        let frame = Rect::from_min_max(Pos2::new(0.0, 100.0), Pos2::new(200.0, 300.0));
        let r = button_screen_rect(frame, [0.9, 1.02, 0.1, 0.1]);
        assert!(r.bottom() < frame.top());
        assert!((r.left() - 180.0).abs() < 1e-3);
        assert!((r.width() - 20.0).abs() < 1e-3);
    }
}
