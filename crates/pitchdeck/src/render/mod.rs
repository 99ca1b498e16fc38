pub mod blocks;
pub mod chart;
pub mod chrome;
pub mod text;
pub mod transition;

use eframe::egui::{self, FontId, Pos2, Stroke};

use crate::carousel::FeatureCarousel;
use crate::deck::Slide;
use crate::theme::Theme;

/// Slides are laid out for a 1920x1080 canvas and scaled uniformly.
pub const REFERENCE_WIDTH: f32 = 1920.0;
pub const REFERENCE_HEIGHT: f32 = 1080.0;

const SLIDE_PADDING_X: f32 = 80.0;
const SLIDE_PADDING_Y: f32 = 56.0;
const COLUMN_GAP: f32 = 64.0;
/// Share of the slide width taken by the aside panel.
const ASIDE_SHARE: f32 = 0.4;

/// Pointer interaction with the feature carousel during a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlideResponse {
    pub carousel_hovered: bool,
    pub carousel_clicked: Option<usize>,
}

pub fn compute_scale(rect: egui::Rect) -> f32 {
    (rect.width() / REFERENCE_WIDTH).min(rect.height() / REFERENCE_HEIGHT)
}

/// Split the window into header, slide area, and footer.
pub fn frame_layout(rect: egui::Rect, scale: f32) -> (egui::Rect, egui::Rect, egui::Rect) {
    let header_bottom = rect.top() + chrome::HEADER_HEIGHT * scale;
    let footer_top = rect.bottom() - chrome::FOOTER_HEIGHT * scale;
    let header = egui::Rect::from_min_max(rect.min, Pos2::new(rect.right(), header_bottom));
    let body = egui::Rect::from_min_max(
        Pos2::new(rect.left(), header_bottom),
        Pos2::new(rect.right(), footer_top),
    );
    let footer = egui::Rect::from_min_max(Pos2::new(rect.left(), footer_top), rect.max);
    (header, body, footer)
}

/// Render a single slide into `rect`.
///
/// `carousel` is only passed for the slide that owns the live carousel;
/// without it the feature list is static and not clickable.
pub fn render_slide(
    ui: &egui::Ui,
    slide: &Slide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
    carousel: Option<&FeatureCarousel>,
) -> SlideResponse {
    let mut response = SlideResponse::default();
    let content = rect.shrink2(egui::vec2(SLIDE_PADDING_X * scale, SLIDE_PADDING_Y * scale));

    if slide.kind.is_centered() {
        render_centered(ui, slide, theme, content, opacity, scale, carousel, &mut response);
    } else {
        render_columns(ui, slide, theme, content, opacity, scale, carousel, &mut response);
    }
    response
}

/// Label, heading, and body stacked in a column. Returns the height used.
#[allow(clippy::too_many_arguments)]
fn draw_intro(
    ui: &egui::Ui,
    slide: &Slide,
    theme: &Theme,
    pos: Pos2,
    width: f32,
    opacity: f32,
    scale: f32,
    centered: bool,
) -> f32 {
    let mut y = pos.y;
    let content = &slide.content;

    if let Some(label) = &content.label {
        let color = Theme::with_opacity(theme.accent, opacity);
        if centered {
            let font = text::mono_font(theme.label_size, scale);
            let galley_width = text::measure_text(ui, &label.to_uppercase(), font, width).x;
            text::draw_label(
                ui,
                label,
                theme,
                Pos2::new(pos.x + (width - galley_width) / 2.0, y),
                color,
                scale,
            );
        } else {
            text::draw_label(ui, label, theme, Pos2::new(pos.x, y), color, scale);
        }
        y += theme.label_size * scale + 20.0 * scale;
    }

    let heading_font = if centered {
        FontId::proportional(theme.heading_size * 1.45 * scale)
    } else {
        text::heading_font(theme, scale)
    };
    let heading_color = Theme::with_opacity(theme.foreground, opacity);
    y += if centered {
        text::draw_centered_text(
            ui,
            &content.heading,
            pos.x + width / 2.0,
            y,
            heading_font,
            heading_color,
            width,
        )
    } else {
        text::draw_text(ui, &content.heading, Pos2::new(pos.x, y), heading_font, heading_color, width)
    };

    if let Some(body) = &content.body {
        y += 24.0 * scale;
        let color = Theme::with_opacity(theme.muted, opacity);
        let font = text::body_font(theme, scale);
        y += if centered {
            text::draw_centered_text(ui, body, pos.x + width / 2.0, y, font, color, width * 0.8)
        } else {
            text::draw_text(ui, body, Pos2::new(pos.x, y), font, color, width)
        };
    }

    y - pos.y
}

/// Hero and closing slides: everything centered in one column.
#[allow(clippy::too_many_arguments)]
fn render_centered(
    ui: &egui::Ui,
    slide: &Slide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
    carousel: Option<&FeatureCarousel>,
    response: &mut SlideResponse,
) {
    let width = rect.width().min(1280.0 * scale);
    let left = rect.center().x - width / 2.0;
    let mut y = rect.top() + rect.height() * 0.18;

    y += draw_intro(ui, slide, theme, Pos2::new(left, y), width, opacity, scale, true);

    // Centered slides have no side panel; aside blocks follow the main ones.
    for group in [&slide.content.blocks, &slide.content.aside] {
        if group.is_empty() {
            continue;
        }
        y += blocks::BLOCK_SPACING * 2.0 * scale;
        y += blocks::draw_blocks(
            ui,
            group,
            theme,
            Pos2::new(left, y),
            width,
            opacity,
            scale,
            carousel,
            response,
        );
    }
}

/// Content slides: intro and main blocks on the left, aside panel on the right.
#[allow(clippy::too_many_arguments)]
fn render_columns(
    ui: &egui::Ui,
    slide: &Slide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
    carousel: Option<&FeatureCarousel>,
    response: &mut SlideResponse,
) {
    let content = &slide.content;
    let has_aside = !content.aside.is_empty();
    let gap = COLUMN_GAP * scale;
    let aside_width = if has_aside {
        rect.width() * ASIDE_SHARE
    } else {
        0.0
    };
    let main_width = if has_aside {
        rect.width() - aside_width - gap
    } else {
        rect.width()
    };

    let mut y = rect.top();
    y += draw_intro(ui, slide, theme, rect.min, main_width, opacity, scale, false);
    if !content.blocks.is_empty() {
        y += blocks::BLOCK_SPACING * 1.5 * scale;
        blocks::draw_blocks(
            ui,
            &content.blocks,
            theme,
            Pos2::new(rect.left(), y),
            main_width,
            opacity,
            scale,
            carousel,
            response,
        );
    }

    if has_aside {
        let panel = egui::Rect::from_min_max(
            Pos2::new(rect.right() - aside_width, rect.top()),
            rect.max,
        );
        ui.painter()
            .rect_filled(panel, 0.0, Theme::with_opacity(theme.panel, opacity));
        ui.painter().rect_stroke(
            panel,
            0.0,
            Stroke::new(1.0, Theme::with_opacity(theme.border, opacity)),
            egui::StrokeKind::Inside,
        );
        let pad = 28.0 * scale;
        blocks::draw_blocks(
            ui,
            &content.aside,
            theme,
            panel.min + egui::vec2(pad, pad),
            panel.width() - pad * 2.0,
            opacity,
            scale,
            carousel,
            response,
        );
    }
}
