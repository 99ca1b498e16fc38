//! Paints the chart primitives' geometry with egui.
//!
//! Chart geometry is in reference pixels with a top-left origin; everything
//! here maps it onto the screen by `origin + point * scale`.

use eframe::egui::{self, Color32, FontId, Pos2, Shape, Stroke, Vec2};

use crate::chart::bar::HorizontalBar;
use crate::chart::donut::{self, Donut};
use crate::chart::sparkline::{self, Sparkline};
use crate::chart::table::DataTable;
use crate::chart::{Point, Rgb};
use crate::theme::Theme;

const ARC_STEPS_PER_RADIAN: f32 = 24.0;
const AREA_ALPHA: f32 = 0.18;

pub const BAR_LABEL_WIDTH: f32 = 96.0;
pub const BAR_VALUE_WIDTH: f32 = 64.0;
pub const BAR_HEIGHT: f32 = 10.0;
pub const BAR_ROW_HEIGHT: f32 = 28.0;

fn to_screen(origin: Pos2, p: Point, scale: f32) -> Pos2 {
    Pos2::new(origin.x + p.x * scale, origin.y + p.y * scale)
}

fn paint(rgb: Rgb, opacity: f32) -> Color32 {
    Theme::with_opacity(Theme::color(rgb), opacity)
}

/// Paint a sparkline with its top-left corner at `origin`. Returns the height used.
pub fn draw_sparkline(
    ui: &egui::Ui,
    line: &Sparkline,
    origin: Pos2,
    opacity: f32,
    scale: f32,
) -> f32 {
    let color = paint(line.color, opacity);
    let points: Vec<Pos2> = line
        .points
        .iter()
        .map(|p| to_screen(origin, *p, scale))
        .collect();

    // The area under a polyline is not convex, so fill it one column at a time.
    if line.area.is_some() {
        let tint = paint(line.color, opacity * AREA_ALPHA);
        let floor = origin.y + line.height * scale;
        let mut mesh = egui::Mesh::default();
        for pair in points.windows(2) {
            let base = mesh.vertices.len() as u32;
            mesh.colored_vertex(pair[0], tint);
            mesh.colored_vertex(pair[1], tint);
            mesh.colored_vertex(Pos2::new(pair[1].x, floor), tint);
            mesh.colored_vertex(Pos2::new(pair[0].x, floor), tint);
            mesh.add_triangle(base, base + 1, base + 2);
            mesh.add_triangle(base, base + 2, base + 3);
        }
        ui.painter().add(Shape::mesh(mesh));
    }

    ui.painter().add(Shape::line(
        points,
        Stroke::new(sparkline::STROKE_WIDTH * scale.max(1.0), color),
    ));
    ui.painter().circle_filled(
        to_screen(origin, line.marker, scale),
        sparkline::MARKER_RADIUS * scale,
        color,
    );

    line.height * scale
}

/// Paint a donut ring and its legend. The ring sits at `origin`, the legend
/// to its right. Returns the height used.
pub fn draw_donut(
    ui: &egui::Ui,
    chart: &Donut,
    theme: &Theme,
    origin: Pos2,
    opacity: f32,
    scale: f32,
) -> f32 {
    let center = to_screen(origin, chart.center, scale);
    let radius = chart.radius * scale;
    let ring = donut::RING_WIDTH * scale;

    ui.painter().circle_stroke(
        center,
        radius,
        Stroke::new(ring, Theme::with_opacity(theme.divider, opacity)),
    );

    for arc in &chart.arcs {
        let steps = (arc.sweep.abs() * ARC_STEPS_PER_RADIAN).ceil() as usize;
        let points: Vec<Pos2> = arc
            .points(chart.center, chart.radius, steps)
            .into_iter()
            .map(|p| to_screen(origin, p, scale))
            .collect();
        ui.painter()
            .add(Shape::line(points, Stroke::new(ring, paint(arc.color, opacity))));
    }

    let legend_x = origin.x + (chart.size + 24.0) * scale;
    let row = 26.0 * scale;
    let legend_height = chart.legend.len() as f32 * row;
    let mut y = origin.y + ((chart.size * scale - legend_height) / 2.0).max(0.0);
    let font = FontId::proportional(theme.label_size * 1.15 * scale);
    for entry in &chart.legend {
        let swatch = egui::Rect::from_min_size(
            Pos2::new(legend_x, y + 5.0 * scale),
            Vec2::splat(10.0 * scale),
        );
        ui.painter().rect_filled(swatch, 0.0, paint(entry.color, opacity));
        ui.painter().text(
            Pos2::new(legend_x + 20.0 * scale, y),
            egui::Align2::LEFT_TOP,
            &entry.label,
            font.clone(),
            Theme::with_opacity(theme.muted, opacity),
        );
        ui.painter().text(
            Pos2::new(legend_x + 220.0 * scale, y),
            egui::Align2::RIGHT_TOP,
            &entry.value_text,
            FontId::monospace(theme.label_size * 1.15 * scale),
            Theme::with_opacity(theme.foreground, opacity),
        );
        y += row;
    }

    (chart.size * scale).max(legend_height)
}

/// Paint one labelled bar row `width` wide. Returns the height used.
pub fn draw_bar(
    ui: &egui::Ui,
    bar: &HorizontalBar,
    theme: &Theme,
    pos: Pos2,
    width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let row = BAR_ROW_HEIGHT * scale;
    let label_width = BAR_LABEL_WIDTH * scale;
    let value_width = if bar.value_text.is_some() {
        BAR_VALUE_WIDTH * scale
    } else {
        0.0
    };
    let font = FontId::monospace(theme.label_size * scale);

    ui.painter().text(
        Pos2::new(pos.x, pos.y + row / 2.0),
        egui::Align2::LEFT_CENTER,
        &bar.label,
        font.clone(),
        Theme::with_opacity(theme.muted, opacity),
    );

    let track_width = (width - label_width - value_width).max(0.0);
    let track = egui::Rect::from_min_size(
        Pos2::new(pos.x + label_width, pos.y + (row - BAR_HEIGHT * scale) / 2.0),
        Vec2::new(track_width, BAR_HEIGHT * scale),
    );
    ui.painter()
        .rect_filled(track, 0.0, Theme::with_opacity(theme.divider, opacity));

    let fill = paint(bar.color, opacity);
    for (start, end) in bar.stripe_spans(track_width, scale) {
        let stripe = egui::Rect::from_min_max(
            Pos2::new(track.left() + start, track.top()),
            Pos2::new(track.left() + end, track.bottom()),
        );
        ui.painter().rect_filled(stripe, 0.0, fill);
    }

    if let Some(value) = &bar.value_text {
        ui.painter().text(
            Pos2::new(pos.x + width, pos.y + row / 2.0),
            egui::Align2::RIGHT_CENTER,
            value,
            font,
            Theme::with_opacity(theme.foreground, opacity),
        );
    }

    row
}

/// Paint a data table `width` wide with equal columns. Returns the height used.
pub fn draw_table(
    ui: &egui::Ui,
    table: &DataTable,
    theme: &Theme,
    pos: Pos2,
    width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    let cols = table.headers.len().max(1);
    let col_width = width / cols as f32;
    let pad = 12.0 * scale;
    let header_height = 36.0 * scale;
    let row_height = 40.0 * scale;
    let divider = Stroke::new(1.0, Theme::with_opacity(theme.border, opacity));
    let header_font = FontId::monospace(theme.label_size * scale);
    let cell_font = FontId::proportional(theme.label_size * 1.2 * scale);

    let header_rect = egui::Rect::from_min_size(pos, Vec2::new(width, header_height));
    ui.painter()
        .rect_filled(header_rect, 0.0, Theme::with_opacity(theme.surface, opacity));
    for (col, header) in table.headers.iter().enumerate() {
        ui.painter().text(
            Pos2::new(pos.x + col as f32 * col_width + pad, pos.y + header_height / 2.0),
            egui::Align2::LEFT_CENTER,
            header.to_uppercase(),
            header_font.clone(),
            Theme::with_opacity(theme.muted, opacity),
        );
    }

    let mut y = pos.y + header_height;
    for row in &table.rows {
        let row_rect =
            egui::Rect::from_min_size(Pos2::new(pos.x, y), Vec2::new(width, row_height));
        if row.highlighted {
            ui.painter().rect_filled(
                row_rect,
                0.0,
                Theme::with_opacity(theme.accent_surface, opacity),
            );
        }
        ui.painter().line_segment(
            [Pos2::new(pos.x, y), Pos2::new(pos.x + width, y)],
            divider,
        );
        for (col, cell) in row.cells.iter().enumerate() {
            let color = theme.tone_color(cell.tone, cell.highlight || row.highlighted);
            ui.painter().text(
                Pos2::new(pos.x + col as f32 * col_width + pad, y + row_height / 2.0),
                egui::Align2::LEFT_CENTER,
                &cell.text,
                cell_font.clone(),
                Theme::with_opacity(color, opacity),
            );
        }
        y += row_height;
    }
    ui.painter().line_segment(
        [Pos2::new(pos.x, y), Pos2::new(pos.x + width, y)],
        divider,
    );

    y - pos.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_points_scale_from_origin() {
        let p = to_screen(Pos2::new(100.0, 50.0), Point::new(10.0, 4.0), 0.5);
        assert_eq!(p, Pos2::new(105.0, 52.0));
    }

    #[test]
    fn chart_colors_respect_opacity() {
        assert_eq!(paint(Rgb::ACCENT, 1.0), Theme::color(Rgb::ACCENT));
        assert_eq!(paint(Rgb::ACCENT, 0.0).a(), 0);
    }
}
