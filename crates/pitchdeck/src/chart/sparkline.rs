use serde::{Deserialize, Serialize};

use super::{ChartError, Point, Rgb, ensure_finite};

/// Vertical inset so the end marker is never clipped.
pub const INSET: f32 = 4.0;
pub const MARKER_RADIUS: f32 = 3.0;
pub const STROKE_WIDTH: f32 = 1.0;
/// Side of one hatch tile for the area fill.
pub const HATCH_CELL: f32 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparklineStyle {
    pub width: f32,
    pub height: f32,
    pub color: Rgb,
    pub show_area: bool,
}

impl Default for SparklineStyle {
    fn default() -> Self {
        Self {
            width: 120.0,
            height: 40.0,
            color: Rgb::ACCENT,
            show_area: false,
        }
    }
}

/// Geometry of a sparkline in a `width` x `height` box.
#[derive(Debug, Clone, PartialEq)]
pub struct Sparkline {
    pub width: f32,
    pub height: f32,
    pub color: Rgb,
    pub points: Vec<Point>,
    /// Closed polygon under the line, present when `show_area` was requested.
    pub area: Option<Vec<Point>>,
    pub marker: Point,
}

/// Lay out `data` as a sparkline.
///
/// Values are normalized to `[min, max]` and mapped into
/// `[INSET, height - INSET]`, highest value at the top. A flat series has no
/// range to normalize against and is drawn on the vertical midline.
pub fn sparkline(data: &[f64], style: &SparklineStyle) -> Result<Sparkline, ChartError> {
    if data.len() < 2 {
        return Err(ChartError::TooFewPoints(data.len()));
    }
    ensure_finite(data.iter().copied())?;
    let fits = style.width.is_finite()
        && style.height.is_finite()
        && style.width > 0.0
        && style.height > 2.0 * INSET;
    if !fits {
        return Err(ChartError::SparklineSize {
            width: style.width,
            height: style.height,
        });
    }

    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = f64::from(style.width);
    let height = f64::from(style.height);
    let span = height - 2.0 * f64::from(INSET);
    let last = (data.len() - 1) as f64;

    let points: Vec<Point> = data
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = i as f64 / last * width;
            let y = if max == min {
                height / 2.0
            } else {
                height - (v - min) / (max - min) * span - f64::from(INSET)
            };
            Point::new(x as f32, y as f32)
        })
        .collect();

    let marker = points[points.len() - 1];

    let area = style.show_area.then(|| {
        let mut polygon = Vec::with_capacity(points.len() + 2);
        polygon.push(Point::new(0.0, style.height));
        polygon.extend(points.iter().copied());
        polygon.push(Point::new(style.width, style.height));
        polygon
    });

    Ok(Sparkline {
        width: style.width,
        height: style.height,
        color: style.color,
        points,
        area,
        marker,
    })
}

/// Diagonal hatch strokes covering one `HATCH_CELL` tile, as line segments.
/// Tiling these seamlessly produces the area fill.
pub fn hatch_tile() -> [(Point, Point); 3] {
    [
        (Point::new(-1.0, 1.0), Point::new(1.0, -1.0)),
        (Point::new(0.0, 4.0), Point::new(4.0, 0.0)),
        (Point::new(3.0, 5.0), Point::new(5.0, 3.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn style(width: f32, height: f32) -> SparklineStyle {
        SparklineStyle {
            width,
            height,
            ..Default::default()
        }
    }

    #[test]
    fn rising_series_spans_full_extent() {
        let line = sparkline(&[1.0, 2.0, 3.0, 4.0, 5.0], &style(120.0, 40.0)).unwrap();
        let first = line.points.first().unwrap();
        let last = line.points.last().unwrap();
        assert_eq!(first.y, 36.0);
        assert_eq!(last.y, 4.0);
        for pair in line.points.windows(2) {
            assert!(pair[1].y < pair[0].y);
        }
    }

    #[test]
    fn x_positions_are_evenly_spaced() {
        let line = sparkline(&[3.0, 1.0, 4.0, 1.0, 5.0], &style(120.0, 40.0)).unwrap();
        let xs: Vec<f32> = line.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 30.0, 60.0, 90.0, 120.0]);
    }

    #[test]
    fn flat_series_sits_on_midline() {
        let line = sparkline(&[5.0, 5.0, 5.0, 5.0], &style(120.0, 40.0)).unwrap();
        assert!(line.points.iter().all(|p| p.y == 20.0));
        assert!(line.points.iter().all(|p| p.y.is_finite()));
    }

    #[test]
    fn marker_is_last_point() {
        let line = sparkline(&[0.3, 0.35, 0.32, 0.4, 0.38, 0.42], &style(180.0, 40.0)).unwrap();
        assert_eq!(line.marker, *line.points.last().unwrap());
        assert_eq!(line.marker.x, 180.0);
        assert_eq!(line.marker.y, 4.0);
    }

    #[test]
    fn area_closes_along_the_bottom() {
        let mut s = style(140.0, 40.0);
        s.show_area = true;
        let line = sparkline(&[800.0, 1200.0, 1800.0], &s).unwrap();
        let area = line.area.unwrap();
        assert_eq!(area.len(), 5);
        assert_eq!(area[0], Point::new(0.0, 40.0));
        assert_eq!(area[4], Point::new(140.0, 40.0));
    }

    #[test]
    fn no_area_unless_requested() {
        let line = sparkline(&[1.0, 2.0], &style(120.0, 40.0)).unwrap();
        assert!(line.area.is_none());
    }

    #[test]
    fn rejects_short_series() {
        assert_eq!(
            sparkline(&[1.0], &SparklineStyle::default()),
            Err(ChartError::TooFewPoints(1))
        );
        assert_eq!(
            sparkline(&[], &SparklineStyle::default()),
            Err(ChartError::TooFewPoints(0))
        );
    }

    #[test]
    fn rejects_nan() {
        assert_eq!(
            sparkline(&[1.0, f64::NAN, 2.0], &SparklineStyle::default()),
            Err(ChartError::NonFinite(1))
        );
    }

    #[test]
    fn rejects_degenerate_box() {
        let data = [1.0, 2.0, 3.0];
        for (width, height) in [(0.0, 40.0), (-10.0, 40.0), (120.0, 8.0), (f32::NAN, 40.0), (120.0, f32::INFINITY)] {
            assert!(matches!(
                sparkline(&data, &style(width, height)),
                Err(ChartError::SparklineSize { .. })
            ));
        }
        assert!(sparkline(&data, &style(1.0, 9.0)).is_ok());
    }

    #[test]
    fn same_input_same_output() {
        let data = [45.0, 52.0, 48.0, 58.0, 55.0, 62.0, 60.0, 68.0];
        let a = sparkline(&data, &SparklineStyle::default()).unwrap();
        let b = sparkline(&data, &SparklineStyle::default()).unwrap();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn points_stay_inside_the_inset_box(
            data in prop::collection::vec(-1.0e6f64..1.0e6, 2..64),
            width in 10.0f32..600.0,
            height in 10.0f32..200.0,
        ) {
            let line = sparkline(&data, &style(width, height)).unwrap();
            prop_assert_eq!(line.points.len(), data.len());
            for p in &line.points {
                prop_assert!(p.x >= 0.0 && p.x <= width + 1e-3);
                prop_assert!(p.y >= INSET - 1e-3 && p.y <= height - INSET + 1e-3);
            }
        }
    }
}
