//! Header, footer, and the slide index overlay.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Stroke, Vec2};

use crate::deck::Deck;
use crate::render::text;
use crate::theme::Theme;

pub const HEADER_HEIGHT: f32 = 64.0;
pub const FOOTER_HEIGHT: f32 = 56.0;
const EDGE_PADDING: f32 = 40.0;

/// Something the presenter clicked in the chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeAction {
    Previous,
    Next,
    JumpTo(usize),
    ToggleIndex,
    CloseIndex,
    SelectFromIndex(usize),
}

/// Pick the click that counts this frame. `overlay` is `Some` while the
/// index overlay is open: it hides the footer, but the header stays on top.
pub fn resolve_action(
    header: Option<ChromeAction>,
    footer: Option<ChromeAction>,
    overlay: Option<Option<ChromeAction>>,
) -> Option<ChromeAction> {
    match overlay {
        Some(overlay) => header.or(overlay),
        None => header.or(footer),
    }
}

/// `07 / 14`, zero-padded to the width of the slide count.
pub fn counter_text(current: usize, count: usize) -> String {
    let width = count.to_string().len().max(2);
    format!("{:0width$} / {:0width$}", current + 1, count)
}

/// Progress segments up to and including the current slide are lit.
pub fn segment_color(theme: &Theme, segment: usize, current: usize) -> Color32 {
    if segment == current {
        theme.accent
    } else if segment < current {
        Theme::with_opacity(theme.accent, 0.45)
    } else {
        theme.divider
    }
}

/// A flat text button. Returns true when clicked.
#[allow(clippy::too_many_arguments)]
fn text_button(
    ui: &egui::Ui,
    rect: egui::Rect,
    id: &str,
    label: &str,
    enabled: bool,
    active: bool,
    theme: &Theme,
    scale: f32,
) -> bool {
    let sense = if enabled {
        Sense::click()
    } else {
        Sense::hover()
    };
    let response = ui.interact(rect, ui.id().with(id), sense);
    let hovered = enabled && response.hovered();

    let border = if active || hovered {
        theme.accent
    } else {
        theme.border
    };
    if active {
        ui.painter().rect_filled(rect, 0.0, theme.accent_surface);
    }
    ui.painter().rect_stroke(
        rect,
        0.0,
        Stroke::new(1.0, border),
        egui::StrokeKind::Inside,
    );
    let color = if !enabled {
        theme.dim
    } else if hovered || active {
        theme.foreground
    } else {
        theme.muted
    };
    ui.painter().text(
        rect.center(),
        Align2::CENTER_CENTER,
        label,
        FontId::monospace(theme.label_size * scale),
        color,
    );

    if enabled {
        response
            .on_hover_cursor(egui::CursorIcon::PointingHand)
            .clicked()
    } else {
        false
    }
}

/// Deck title, progress segments, slide counter, and the index toggle.
pub fn draw_header(
    ui: &egui::Ui,
    deck: &Deck,
    current: usize,
    index_open: bool,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) -> Option<ChromeAction> {
    let mut action = None;
    let pad = EDGE_PADDING * scale;
    let mid = rect.center().y;

    ui.painter().rect_filled(rect, 0.0, theme.background);
    ui.painter().line_segment(
        [rect.left_bottom(), rect.right_bottom()],
        Stroke::new(1.0, theme.border),
    );

    let title = text::draw_anchored(
        ui,
        &deck.title.to_uppercase(),
        Pos2::new(rect.left() + pad, mid),
        Align2::LEFT_CENTER,
        FontId::monospace(theme.label_size * 1.15 * scale),
        theme.foreground,
    );
    if let Some(subtitle) = &deck.subtitle {
        text::draw_anchored(
            ui,
            subtitle,
            Pos2::new(title.right() + 16.0 * scale, mid),
            Align2::LEFT_CENTER,
            FontId::monospace(theme.label_size * scale),
            theme.dim,
        );
    }

    let button = egui::Rect::from_center_size(
        Pos2::new(rect.right() - pad - 44.0 * scale, mid),
        Vec2::new(88.0 * scale, 32.0 * scale),
    );
    if text_button(ui, button, "index-toggle", "INDEX", true, index_open, theme, scale) {
        action = Some(ChromeAction::ToggleIndex);
    }

    let counter = text::draw_anchored(
        ui,
        &counter_text(current, deck.slide_count()),
        Pos2::new(button.left() - 24.0 * scale, mid),
        Align2::RIGHT_CENTER,
        FontId::monospace(theme.label_size * 1.15 * scale),
        theme.muted,
    );

    // Segments fill the space between the title block and the counter.
    let count = deck.slide_count();
    let track_right = counter.left() - 32.0 * scale;
    let track_left = (rect.center().x - 280.0 * scale).min(track_right);
    let gap = 4.0 * scale;
    let segment_width =
        ((track_right - track_left) - gap * count.saturating_sub(1) as f32) / count.max(1) as f32;
    for i in 0..count {
        let x = track_left + i as f32 * (segment_width + gap);
        let hit = egui::Rect::from_min_size(
            Pos2::new(x, mid - 10.0 * scale),
            Vec2::new(segment_width.max(1.0), 20.0 * scale),
        );
        let bar = egui::Rect::from_center_size(hit.center(), Vec2::new(hit.width(), 3.0 * scale));
        let response = ui
            .interact(hit, ui.id().with(("progress", i)), Sense::click())
            .on_hover_text(deck.slides[i].display_title());
        let color = if response.hovered() && i != current {
            theme.muted
        } else {
            segment_color(theme, i, current)
        };
        ui.painter().rect_filled(bar, 0.0, color);
        if response.clicked() {
            action = Some(ChromeAction::JumpTo(i));
        }
    }

    action
}

/// Footer text, keyboard hint, and previous/next buttons.
pub fn draw_footer(
    ui: &egui::Ui,
    footer: Option<&str>,
    is_first: bool,
    is_last: bool,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) -> Option<ChromeAction> {
    let mut action = None;
    let pad = EDGE_PADDING * scale;
    let mid = rect.center().y;
    let font = FontId::monospace(theme.label_size * scale);

    ui.painter().rect_filled(rect, 0.0, theme.background);
    ui.painter().line_segment(
        [rect.left_top(), rect.right_top()],
        Stroke::new(1.0, theme.border),
    );

    if let Some(footer) = footer {
        text::draw_anchored(
            ui,
            footer,
            Pos2::new(rect.left() + pad, mid),
            Align2::LEFT_CENTER,
            font.clone(),
            theme.dim,
        );
    }
    text::draw_anchored(
        ui,
        "← → NAVIGATE   I INDEX   F FULLSCREEN",
        Pos2::new(rect.center().x, mid),
        Align2::CENTER_CENTER,
        font,
        theme.dim,
    );

    let size = Vec2::new(96.0 * scale, 32.0 * scale);
    let next = egui::Rect::from_center_size(
        Pos2::new(rect.right() - pad - size.x / 2.0, mid),
        size,
    );
    let prev = next.translate(Vec2::new(-(size.x + 8.0 * scale), 0.0));
    if text_button(ui, prev, "prev", "← PREV", !is_first, false, theme, scale) {
        action = Some(ChromeAction::Previous);
    }
    if text_button(ui, next, "next", "NEXT →", !is_last, false, theme, scale) {
        action = Some(ChromeAction::Next);
    }

    action
}

/// Modal list of every slide. Clicking a row jumps there; clicking outside
/// the panel closes it.
pub fn draw_index_overlay(
    ui: &egui::Ui,
    deck: &Deck,
    current: usize,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) -> Option<ChromeAction> {
    let mut action = None;

    let backdrop = ui.interact(rect, ui.id().with("index-backdrop"), Sense::click());
    ui.painter().rect_filled(
        rect,
        0.0,
        Color32::from_rgba_unmultiplied(0x0A, 0x0B, 0x0E, 230),
    );

    let count = deck.slide_count();
    let rows_per_column = count.div_ceil(2);
    let row_height = 52.0 * scale;
    let pad = 32.0 * scale;
    let panel_width = (1200.0 * scale).min(rect.width() - 2.0 * pad);
    let panel_height = pad * 2.0 + 48.0 * scale + rows_per_column as f32 * row_height;
    let panel = egui::Rect::from_center_size(rect.center(), Vec2::new(panel_width, panel_height));

    ui.painter().rect_filled(panel, 0.0, theme.panel);
    ui.painter().rect_stroke(
        panel,
        0.0,
        Stroke::new(1.0, theme.border),
        egui::StrokeKind::Inside,
    );
    text::draw_label(
        ui,
        "Deck index",
        theme,
        Pos2::new(panel.left() + pad, panel.top() + pad),
        theme.muted,
        scale,
    );
    text::draw_anchored(
        ui,
        "ESC TO CLOSE",
        Pos2::new(panel.right() - pad, panel.top() + pad),
        Align2::RIGHT_TOP,
        FontId::monospace(theme.label_size * scale),
        theme.dim,
    );

    let column_gap = 24.0 * scale;
    let column_width = (panel_width - pad * 2.0 - column_gap) / 2.0;
    let top = panel.top() + pad + 48.0 * scale;
    for (i, slide) in deck.slides.iter().enumerate() {
        let (col, row) = (i / rows_per_column.max(1), i % rows_per_column.max(1));
        let row_rect = egui::Rect::from_min_size(
            Pos2::new(
                panel.left() + pad + col as f32 * (column_width + column_gap),
                top + row as f32 * row_height,
            ),
            Vec2::new(column_width, row_height - 6.0 * scale),
        );
        let response = ui
            .interact(row_rect, ui.id().with(("index-row", i)), Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand);

        let is_current = i == current;
        if is_current {
            ui.painter().rect_filled(row_rect, 0.0, theme.accent_surface);
        }
        let border = if is_current || response.hovered() {
            theme.accent
        } else {
            theme.border
        };
        ui.painter().rect_stroke(
            row_rect,
            0.0,
            Stroke::new(1.0, border),
            egui::StrokeKind::Inside,
        );
        text::draw_anchored(
            ui,
            &format!("{:02}", i + 1),
            Pos2::new(row_rect.left() + 16.0 * scale, row_rect.center().y),
            Align2::LEFT_CENTER,
            FontId::monospace(theme.label_size * scale),
            if is_current { theme.accent } else { theme.dim },
        );
        text::draw_anchored(
            ui,
            &slide.display_title(),
            Pos2::new(row_rect.left() + 60.0 * scale, row_rect.center().y),
            Align2::LEFT_CENTER,
            FontId::proportional(theme.body_size * 0.85 * scale),
            theme.foreground,
        );

        if response.clicked() {
            action = Some(ChromeAction::SelectFromIndex(i));
        }
    }

    if action.is_none() && backdrop.clicked() {
        let outside = ui
            .ctx()
            .input(|i| i.pointer.interact_pos())
            .is_some_and(|p| !panel.contains(p));
        if outside {
            action = Some(ChromeAction::CloseIndex);
        }
    }

    action
}
