use std::fmt::Write;

use super::donut::RING_WIDTH;
use super::sparkline::{HATCH_CELL, MARKER_RADIUS, STROKE_WIDTH, hatch_tile};
use super::{DataTable, Donut, HorizontalBar, Point, Rgb, Sparkline, Tone};
use super::bar::{STRIPE_PERIOD, STRIPE_WIDTH};

const FONT: &str = "ui-monospace, SFMono-Regular, Menlo, monospace";

/// Compact number formatting for SVG attributes.
fn num(v: f32) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", num(p.x), num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn open_svg(svg: &mut String, width: f32, height: f32) {
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" overflow=\"visible\">",
        w = num(width),
        h = num(height),
    );
}

fn hatch_id(color: Rgb) -> String {
    format!("hatch-{}", color.hex().trim_start_matches('#'))
}

pub fn sparkline(line: &Sparkline) -> String {
    let mut svg = String::new();
    open_svg(&mut svg, line.width, line.height);

    if let Some(area) = &line.area {
        let id = hatch_id(line.color);
        let path: String = hatch_tile()
            .iter()
            .map(|(a, b)| format!("M{},{} L{},{}", num(a.x), num(a.y), num(b.x), num(b.y)))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(svg, "  <defs>");
        let _ = writeln!(
            svg,
            "    <pattern id=\"{id}\" patternUnits=\"userSpaceOnUse\" width=\"{c}\" height=\"{c}\">",
            c = num(HATCH_CELL),
        );
        let _ = writeln!(
            svg,
            "      <path d=\"{path}\" stroke=\"{}\" stroke-width=\"0.5\" opacity=\"0.3\"/>",
            line.color
        );
        let _ = writeln!(svg, "    </pattern>");
        let _ = writeln!(svg, "  </defs>");
        let _ = writeln!(
            svg,
            "  <polygon fill=\"url(#{id})\" points=\"{}\"/>",
            points_attr(area)
        );
    }

    let _ = writeln!(
        svg,
        "  <polyline fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" points=\"{}\"/>",
        line.color,
        num(STROKE_WIDTH),
        points_attr(&line.points)
    );
    let _ = writeln!(
        svg,
        "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>",
        num(line.marker.x),
        num(line.marker.y),
        num(MARKER_RADIUS),
        line.color
    );
    svg.push_str("</svg>\n");
    svg
}

/// Donut ring with its legend to the right.
pub fn donut(chart: &Donut) -> String {
    let legend_x = chart.size + 24.0;
    let row_h = 20.0;
    let width = legend_x + 180.0;
    let height = chart.size.max(chart.legend.len() as f32 * row_h);

    let mut svg = String::new();
    open_svg(&mut svg, width, height);

    let (cx, cy, r) = (num(chart.center.x), num(chart.center.y), num(chart.radius));
    let _ = writeln!(
        svg,
        "  <circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
        Rgb::TRACK,
        num(RING_WIDTH)
    );
    let _ = writeln!(svg, "  <g transform=\"rotate(-90 {cx} {cy})\">");
    for arc in &chart.arcs {
        let _ = writeln!(
            svg,
            "    <circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-dasharray=\"{} {}\" stroke-dashoffset=\"{}\"/>",
            arc.color,
            num(RING_WIDTH),
            num(arc.length),
            num(chart.circumference - arc.length),
            num(-arc.offset)
        );
    }
    let _ = writeln!(svg, "  </g>");

    let top = (height - chart.legend.len() as f32 * row_h) / 2.0;
    for (i, entry) in chart.legend.iter().enumerate() {
        let y = top + i as f32 * row_h;
        let _ = writeln!(
            svg,
            "  <rect x=\"{}\" y=\"{}\" width=\"12\" height=\"12\" fill=\"{}\"/>",
            num(legend_x),
            num(y + 2.0),
            entry.color
        );
        let _ = writeln!(
            svg,
            "  <text x=\"{}\" y=\"{}\" font-family=\"{FONT}\" font-size=\"12\" fill=\"{}\">{}</text>",
            num(legend_x + 20.0),
            num(y + 12.0),
            Rgb::MUTED,
            escape(&entry.label)
        );
        let _ = writeln!(
            svg,
            "  <text x=\"{}\" y=\"{}\" font-family=\"{FONT}\" font-size=\"12\" fill=\"{}\" text-anchor=\"end\">{}</text>",
            num(width),
            num(y + 12.0),
            Rgb::FOREGROUND,
            escape(&entry.value_text)
        );
    }
    svg.push_str("</svg>\n");
    svg
}

/// Label column, striped track, optional value column.
pub fn horizontal_bar(bar: &HorizontalBar, width: f32) -> String {
    let label_w = 96.0;
    let value_w = if bar.value_text.is_some() { 64.0 } else { 0.0 };
    let gap = 16.0;
    let track_x = label_w + gap;
    let track_w = (width - track_x - value_w - if value_w > 0.0 { gap } else { 0.0 }).max(0.0);
    let height = 24.0;

    let mut svg = String::new();
    open_svg(&mut svg, width, height);

    let _ = writeln!(
        svg,
        "  <text x=\"0\" y=\"16\" font-family=\"{FONT}\" font-size=\"11\" fill=\"{}\">{}</text>",
        Rgb::MUTED,
        escape(&bar.label)
    );
    let _ = writeln!(
        svg,
        "  <rect x=\"{}\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
        num(track_x),
        num(track_w),
        num(height),
        Rgb::SURFACE
    );

    let id = format!("stripes-{}", bar.color.hex().trim_start_matches('#'));
    let _ = writeln!(svg, "  <defs>");
    let _ = writeln!(
        svg,
        "    <pattern id=\"{id}\" patternUnits=\"userSpaceOnUse\" width=\"{}\" height=\"{}\">",
        num(STRIPE_PERIOD),
        num(height)
    );
    let _ = writeln!(
        svg,
        "      <rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
        num(STRIPE_WIDTH),
        num(height),
        bar.color
    );
    let _ = writeln!(svg, "    </pattern>");
    let _ = writeln!(svg, "  </defs>");
    let _ = writeln!(
        svg,
        "  <rect x=\"{}\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"url(#{id})\"/>",
        num(track_x),
        num(bar.fill_width(track_w)),
        num(height)
    );

    if let Some(value) = &bar.value_text {
        let _ = writeln!(
            svg,
            "  <text x=\"{}\" y=\"16\" font-family=\"{FONT}\" font-size=\"13\" fill=\"{}\" text-anchor=\"end\">{}</text>",
            num(width),
            Rgb::FOREGROUND,
            escape(value)
        );
    }
    svg.push_str("</svg>\n");
    svg
}

pub fn data_table(table: &DataTable, width: f32) -> String {
    let row_h = 32.0;
    let head_h = 28.0;
    let cols = table.headers.len().max(1);
    let col_w = width / cols as f32;
    let height = head_h + row_h * table.rows.len() as f32;

    let mut svg = String::new();
    open_svg(&mut svg, width, height);

    let _ = writeln!(
        svg,
        "  <rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
        num(width),
        num(head_h),
        Rgb::SURFACE
    );
    for (ci, header) in table.headers.iter().enumerate() {
        let _ = writeln!(
            svg,
            "  <text x=\"{}\" y=\"18\" font-family=\"{FONT}\" font-size=\"10\" fill=\"{}\">{}</text>",
            num(ci as f32 * col_w + 12.0),
            Rgb::MUTED,
            escape(header)
        );
    }

    for (ri, row) in table.rows.iter().enumerate() {
        let y = head_h + ri as f32 * row_h;
        let class = if row.highlighted { "row highlighted" } else { "row" };
        let _ = writeln!(svg, "  <g class=\"{class}\">");
        if row.highlighted {
            let _ = writeln!(
                svg,
                "    <rect x=\"0\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
                num(y),
                num(width),
                num(row_h),
                Rgb::ACCENT_SURFACE
            );
        }
        for (ci, cell) in row.cells.iter().enumerate() {
            let color = match cell.tone {
                Tone::Positive => Rgb::POSITIVE,
                Tone::Negative => Rgb::NEGATIVE,
                Tone::Neutral if cell.highlight => Rgb::ACCENT,
                Tone::Neutral => Rgb::FOREGROUND,
            };
            let weight = if cell.highlight { "500" } else { "400" };
            let _ = writeln!(
                svg,
                "    <text x=\"{}\" y=\"{}\" font-family=\"{FONT}\" font-size=\"13\" font-weight=\"{weight}\" fill=\"{color}\">{}</text>",
                num(ci as f32 * col_w + 12.0),
                num(y + 21.0),
                escape(&cell.text)
            );
        }
        let _ = writeln!(
            svg,
            "    <line x1=\"0\" y1=\"{y2}\" x2=\"{}\" y2=\"{y2}\" stroke=\"{}\" stroke-width=\"1\"/>",
            num(width),
            Rgb::TRACK,
            y2 = num(y + row_h)
        );
        let _ = writeln!(svg, "  </g>");
    }
    svg.push_str("</svg>\n");
    svg
}
