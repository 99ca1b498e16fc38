use eframe::egui::{self, Align2, Color32, FontFamily, FontId, Pos2};

use crate::theme::Theme;

/// Layout and paint wrapped text, returning the height used.
pub fn draw_text(
    ui: &egui::Ui,
    text: &str,
    pos: Pos2,
    font: FontId,
    color: Color32,
    max_width: f32,
) -> f32 {
    let galley = ui
        .painter()
        .layout(text.to_string(), font, color, max_width.max(1.0));
    let height = galley.rect.height();
    ui.painter().galley(pos, galley, color);
    height
}

/// Paint wrapped text horizontally centered on `center_x`, each line
/// centered on its own. Returns the height used.
pub fn draw_centered_text(
    ui: &egui::Ui,
    text: &str,
    center_x: f32,
    top: f32,
    font: FontId,
    color: Color32,
    max_width: f32,
) -> f32 {
    let mut job = egui::text::LayoutJob::simple(text.to_string(), font, color, max_width.max(1.0));
    job.halign = egui::Align::Center;
    let galley = ui.painter().layout_job(job);
    let height = galley.rect.height();
    // With centered alignment the galley is laid out around x = 0.
    ui.painter().galley(Pos2::new(center_x, top), galley, color);
    height
}

/// Measure wrapped text without painting it.
pub fn measure_text(ui: &egui::Ui, text: &str, font: FontId, max_width: f32) -> egui::Vec2 {
    ui.painter()
        .layout(text.to_string(), font, Color32::WHITE, max_width.max(1.0))
        .size()
}

/// Small uppercase monospace caption, like `01 / PROBLEM`. Returns the height used.
pub fn draw_label(
    ui: &egui::Ui,
    text: &str,
    theme: &Theme,
    pos: Pos2,
    color: Color32,
    scale: f32,
) -> f32 {
    let font = FontId::new(theme.label_size * scale, FontFamily::Monospace);
    let galley = ui
        .painter()
        .layout_no_wrap(text.to_uppercase(), font, color);
    let height = galley.rect.height();
    ui.painter().galley(pos, galley, color);
    height
}

/// Single-line text anchored at `pos`.
pub fn draw_anchored(
    ui: &egui::Ui,
    text: &str,
    pos: Pos2,
    anchor: Align2,
    font: FontId,
    color: Color32,
) -> egui::Rect {
    ui.painter().text(pos, anchor, text, font, color)
}

pub fn heading_font(theme: &Theme, scale: f32) -> FontId {
    FontId::proportional(theme.heading_size * scale)
}

pub fn body_font(theme: &Theme, scale: f32) -> FontId {
    FontId::proportional(theme.body_size * scale)
}

pub fn mono_font(size: f32, scale: f32) -> FontId {
    FontId::monospace(size * scale)
}
