use eframe::egui::{self, FontId, Pos2, Sense, Stroke, Vec2};

use crate::carousel::FeatureCarousel;
use crate::chart::{self, SparklineStyle};
use crate::deck::{Block, Feature, Metric, SparklineCard};
use crate::render::{SlideResponse, chart as paint, text};
use crate::theme::Theme;

pub const BLOCK_SPACING: f32 = 28.0;
const CARD_PADDING: f32 = 16.0;
const CARD_GAP: f32 = 12.0;

/// Draw blocks top to bottom. Returns the total height used.
#[allow(clippy::too_many_arguments)]
pub fn draw_blocks(
    ui: &egui::Ui,
    blocks: &[Block],
    theme: &Theme,
    pos: Pos2,
    width: f32,
    opacity: f32,
    scale: f32,
    carousel: Option<&FeatureCarousel>,
    response: &mut SlideResponse,
) -> f32 {
    let mut y = pos.y;
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            y += BLOCK_SPACING * scale;
        }
        y += draw_block(
            ui,
            block,
            theme,
            Pos2::new(pos.x, y),
            width,
            opacity,
            scale,
            carousel,
            response,
        );
    }
    y - pos.y
}

/// Draw one block. Returns the height used.
#[allow(clippy::too_many_arguments)]
pub fn draw_block(
    ui: &egui::Ui,
    block: &Block,
    theme: &Theme,
    pos: Pos2,
    width: f32,
    opacity: f32,
    scale: f32,
    carousel: Option<&FeatureCarousel>,
    response: &mut SlideResponse,
) -> f32 {
    match block {
        Block::Metrics { items } => draw_metrics(ui, items, theme, pos, width, opacity, scale),
        Block::Bullets { items, marker } => draw_bullets(
            ui,
            items,
            marker.as_deref().unwrap_or("→"),
            theme,
            pos,
            width,
            opacity,
            scale,
        ),
        Block::Table {
            title,
            headers,
            rows,
            highlight_last,
        } => {
            let mut y = pos.y + draw_title(ui, title.as_deref(), theme, pos, opacity, scale);
            match chart::data_table(headers, rows, *highlight_last) {
                Ok(table) => {
                    y += paint::draw_table(
                        ui,
                        &table,
                        theme,
                        Pos2::new(pos.x, y),
                        width,
                        opacity,
                        scale,
                    );
                }
                Err(e) => tracing::warn!("skipping table: {e}"),
            }
            y - pos.y
        }
        Block::Sparklines { title, items } => {
            let y = pos.y + draw_title(ui, title.as_deref(), theme, pos, opacity, scale);
            let cards = draw_sparkline_cards(
                ui,
                items,
                theme,
                Pos2::new(pos.x, y),
                width,
                opacity,
                scale,
            );
            y + cards - pos.y
        }
        Block::Donut {
            title,
            segments,
            size,
        } => {
            let mut y = pos.y + draw_title(ui, title.as_deref(), theme, pos, opacity, scale);
            match chart::donut(segments, *size) {
                Ok(donut) => {
                    y += paint::draw_donut(
                        ui,
                        &donut,
                        theme,
                        Pos2::new(pos.x, y),
                        opacity,
                        scale,
                    );
                }
                Err(e) => tracing::warn!("skipping donut: {e}"),
            }
            y - pos.y
        }
        Block::Bars { title, items } => {
            let mut y = pos.y + draw_title(ui, title.as_deref(), theme, pos, opacity, scale);
            for spec in items {
                match chart::horizontal_bar(spec) {
                    Ok(bar) => {
                        y += paint::draw_bar(
                            ui,
                            &bar,
                            theme,
                            Pos2::new(pos.x, y),
                            width,
                            opacity,
                            scale,
                        );
                    }
                    Err(e) => tracing::warn!(label = %spec.label, "skipping bar: {e}"),
                }
            }
            y - pos.y
        }
        Block::Features { items } => draw_features(
            ui, items, theme, pos, width, opacity, scale, carousel, response,
        ),
        Block::Quote { text } => draw_quote(ui, text, theme, pos, width, opacity, scale),
    }
}

/// Optional block caption. Returns the height used, including the gap below it.
fn draw_title(
    ui: &egui::Ui,
    title: Option<&str>,
    theme: &Theme,
    pos: Pos2,
    opacity: f32,
    scale: f32,
) -> f32 {
    match title {
        Some(title) => {
            let color = Theme::with_opacity(theme.muted, opacity);
            text::draw_label(ui, title, theme, pos, color, scale) + 12.0 * scale
        }
        None => 0.0,
    }
}

/// Cards per row: four metrics read best as a 2x2 grid.
fn metric_columns(count: usize) -> usize {
    match count {
        0 => 1,
        4 => 2,
        n => n.min(3),
    }
}

pub fn draw_metrics(
    ui: &egui::Ui,
    items: &[Metric],
    theme: &Theme,
    pos: Pos2,
    width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let cols = metric_columns(items.len());
    let gap = CARD_GAP * scale;
    let card_width = (width - gap * (cols - 1) as f32) / cols as f32;
    let card_height = 116.0 * scale;
    let pad = CARD_PADDING * scale;

    for (i, metric) in items.iter().enumerate() {
        let (row, col) = (i / cols, i % cols);
        let min = Pos2::new(
            pos.x + col as f32 * (card_width + gap),
            pos.y + row as f32 * (card_height + gap),
        );
        let card = egui::Rect::from_min_size(min, Vec2::new(card_width, card_height));
        draw_card(ui, card, theme, opacity, scale);

        let mut y = card.top() + pad;
        y += text::draw_label(
            ui,
            &metric.label,
            theme,
            Pos2::new(card.left() + pad, y),
            Theme::with_opacity(theme.muted, opacity),
            scale,
        );
        y += 8.0 * scale;

        let value = match &metric.suffix {
            Some(suffix) => format!("{}{suffix}", metric.value),
            None => metric.value.clone(),
        };
        let value_rect = text::draw_anchored(
            ui,
            &value,
            Pos2::new(card.left() + pad, y),
            egui::Align2::LEFT_TOP,
            FontId::monospace(theme.metric_size * scale),
            Theme::with_opacity(theme.foreground, opacity),
        );

        if let Some(change) = &metric.change {
            let color = if change.positive {
                theme.positive
            } else {
                theme.negative
            };
            text::draw_anchored(
                ui,
                &change.value,
                Pos2::new(card.left() + pad, value_rect.bottom() + 4.0 * scale),
                egui::Align2::LEFT_TOP,
                FontId::monospace(theme.label_size * scale),
                Theme::with_opacity(color, opacity),
            );
        }
    }

    let rows = items.len().div_ceil(cols);
    if rows == 0 {
        0.0
    } else {
        rows as f32 * card_height + (rows - 1) as f32 * gap
    }
}

fn draw_card(ui: &egui::Ui, rect: egui::Rect, theme: &Theme, opacity: f32, scale: f32) {
    ui.painter()
        .rect_filled(rect, 2.0 * scale, Theme::with_opacity(theme.surface, opacity));
    ui.painter().rect_stroke(
        rect,
        2.0 * scale,
        Stroke::new(1.0, Theme::with_opacity(theme.border, opacity)),
        egui::StrokeKind::Inside,
    );
}

#[allow(clippy::too_many_arguments)]
pub fn draw_bullets(
    ui: &egui::Ui,
    items: &[String],
    marker: &str,
    theme: &Theme,
    pos: Pos2,
    width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let marker_width = 32.0 * scale;
    let spacing = 14.0 * scale;
    let font = text::body_font(theme, scale);
    let mut y = pos.y;

    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            y += spacing;
        }
        text::draw_anchored(
            ui,
            marker,
            Pos2::new(pos.x, y),
            egui::Align2::LEFT_TOP,
            font.clone(),
            Theme::with_opacity(theme.accent, opacity),
        );
        y += text::draw_text(
            ui,
            item,
            Pos2::new(pos.x + marker_width, y),
            font.clone(),
            Theme::with_opacity(theme.foreground, opacity),
            width - marker_width,
        );
    }
    y - pos.y
}

pub fn draw_sparkline_cards(
    ui: &egui::Ui,
    items: &[SparklineCard],
    theme: &Theme,
    pos: Pos2,
    width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    if items.is_empty() {
        return 0.0;
    }
    let cols = items.len().min(2);
    let gap = CARD_GAP * scale;
    let pad = CARD_PADDING * scale;
    let card_width = (width - gap * (cols - 1) as f32) / cols as f32;
    let inner = ((card_width - pad * 2.0) / scale).max(1.0);
    let tallest = items
        .iter()
        .map(|c| c.style.height)
        .fold(0.0f32, f32::max);
    let card_height = pad * 2.0 + 64.0 * scale + tallest * scale;

    for (i, card) in items.iter().enumerate() {
        let (row, col) = (i / cols, i % cols);
        let rect = egui::Rect::from_min_size(
            Pos2::new(
                pos.x + col as f32 * (card_width + gap),
                pos.y + row as f32 * (card_height + gap),
            ),
            Vec2::new(card_width, card_height),
        );
        draw_card(ui, rect, theme, opacity, scale);

        let left = rect.left() + pad;
        let mut y = rect.top() + pad;
        text::draw_label(
            ui,
            &card.label,
            theme,
            Pos2::new(left, y),
            Theme::with_opacity(theme.muted, opacity),
            scale,
        );
        if let Some(change) = &card.change {
            let color = if change.starts_with('-') {
                theme.negative
            } else {
                theme.positive
            };
            text::draw_anchored(
                ui,
                change,
                Pos2::new(rect.right() - pad, y),
                egui::Align2::RIGHT_TOP,
                FontId::monospace(theme.label_size * scale),
                Theme::with_opacity(color, opacity),
            );
        }
        y += 22.0 * scale;
        text::draw_anchored(
            ui,
            &card.value,
            Pos2::new(left, y),
            egui::Align2::LEFT_TOP,
            FontId::monospace(theme.metric_size * 0.8 * scale),
            Theme::with_opacity(theme.foreground, opacity),
        );
        y += 42.0 * scale;

        // Never wider than the card.
        let style = SparklineStyle {
            width: card.style.width.min(inner),
            ..card.style.clone()
        };
        match chart::sparkline(&card.data, &style) {
            Ok(line) => {
                paint::draw_sparkline(ui, &line, Pos2::new(left, y), opacity, scale);
            }
            Err(e) => tracing::warn!(label = %card.label, "skipping sparkline: {e}"),
        }
    }

    let rows = items.len().div_ceil(cols);
    rows as f32 * card_height + (rows - 1) as f32 * gap
}

/// The feature carousel: every title is listed, the active one expands to
/// show its description. Clicking a title selects it; hovering pauses the
/// rotation.
#[allow(clippy::too_many_arguments)]
pub fn draw_features(
    ui: &egui::Ui,
    items: &[Feature],
    theme: &Theme,
    pos: Pos2,
    width: f32,
    opacity: f32,
    scale: f32,
    carousel: Option<&FeatureCarousel>,
    response: &mut SlideResponse,
) -> f32 {
    let active = carousel.map_or(0, FeatureCarousel::active);
    let pad = CARD_PADDING * scale;
    let title_height = 48.0 * scale;
    let number_width = 44.0 * scale;
    let mut y = pos.y;

    for (i, feature) in items.iter().enumerate() {
        let is_active = i == active;
        let description_height = if is_active {
            text::measure_text(
                ui,
                &feature.description,
                text::body_font(theme, scale * 0.85),
                width - pad * 2.0 - number_width,
            )
            .y + pad
        } else {
            0.0
        };
        let rect = egui::Rect::from_min_size(
            Pos2::new(pos.x, y),
            Vec2::new(width, title_height + description_height),
        );

        if is_active {
            ui.painter()
                .rect_filled(rect, 0.0, Theme::with_opacity(theme.surface, opacity));
            let bar = egui::Rect::from_min_size(rect.min, Vec2::new(3.0 * scale, rect.height()));
            ui.painter()
                .rect_filled(bar, 0.0, Theme::with_opacity(theme.accent, opacity));
        }
        ui.painter().line_segment(
            [rect.left_bottom(), rect.right_bottom()],
            Stroke::new(1.0, Theme::with_opacity(theme.border, opacity)),
        );

        let (number_color, title_color) = if is_active {
            (theme.accent, theme.foreground)
        } else {
            (theme.dim, theme.muted)
        };
        text::draw_anchored(
            ui,
            &format!("{:02}", i + 1),
            Pos2::new(rect.left() + pad, rect.top() + title_height / 2.0),
            egui::Align2::LEFT_CENTER,
            FontId::monospace(theme.label_size * scale),
            Theme::with_opacity(number_color, opacity),
        );
        text::draw_anchored(
            ui,
            &feature.title,
            Pos2::new(rect.left() + pad + number_width, rect.top() + title_height / 2.0),
            egui::Align2::LEFT_CENTER,
            FontId::proportional(theme.body_size * 0.95 * scale),
            Theme::with_opacity(title_color, opacity),
        );
        if is_active {
            text::draw_text(
                ui,
                &feature.description,
                Pos2::new(rect.left() + pad + number_width, rect.top() + title_height),
                text::body_font(theme, scale * 0.85),
                Theme::with_opacity(theme.muted, opacity),
                width - pad * 2.0 - number_width,
            );
        }

        if carousel.is_some() {
            let row = ui
                .interact(rect, ui.id().with(("feature", i)), Sense::click())
                .on_hover_cursor(egui::CursorIcon::PointingHand);
            if row.clicked() {
                response.carousel_clicked = Some(i);
            }
        }

        y = rect.bottom();
    }

    let block = egui::Rect::from_min_max(pos, Pos2::new(pos.x + width, y));
    if carousel.is_some() && ui.rect_contains_pointer(block) {
        response.carousel_hovered = true;
    }

    y - pos.y
}

pub fn draw_quote(
    ui: &egui::Ui,
    quote: &str,
    theme: &Theme,
    pos: Pos2,
    width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let bar_width = 3.0 * scale;
    let gap = 20.0 * scale;
    let height = text::draw_text(
        ui,
        quote,
        Pos2::new(pos.x + bar_width + gap, pos.y),
        FontId::proportional(theme.subheading_size * scale),
        Theme::with_opacity(theme.foreground, opacity),
        width - bar_width - gap,
    );
    let bar = egui::Rect::from_min_size(pos, Vec2::new(bar_width, height));
    ui.painter()
        .rect_filled(bar, 0.0, Theme::with_opacity(theme.accent, opacity));
    height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_grid_columns() {
        assert_eq!(metric_columns(1), 1);
        assert_eq!(metric_columns(3), 3);
        assert_eq!(metric_columns(4), 2);
        assert_eq!(metric_columns(6), 3);
    }
}
