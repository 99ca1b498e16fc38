use std::f32::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

use super::{ChartError, Point, Rgb, ensure_finite, format_value};

pub const RING_WIDTH: f32 = 12.0;
/// Ring inset from the bounding box on each side: half the ring plus a margin.
const RING_INSET: f32 = 16.0;
/// Arcs start at 12 o'clock.
pub const START_ANGLE: f32 = -FRAC_PI_2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonutSegment {
    pub value: f64,
    pub label: String,
    #[serde(default)]
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonutArc {
    pub color: Rgb,
    /// Arc length along the ring centerline.
    pub length: f32,
    /// Distance along the ring from the start angle to where this arc begins.
    pub offset: f32,
    pub start_angle: f32,
    pub sweep: f32,
}

impl DonutArc {
    /// Sample the arc centerline, `steps` segments long.
    pub fn points(&self, center: Point, radius: f32, steps: usize) -> Vec<Point> {
        let steps = steps.max(1);
        (0..=steps)
            .map(|i| {
                let angle = self.start_angle + self.sweep * i as f32 / steps as f32;
                Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub color: Rgb,
    pub label: String,
    pub value_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Donut {
    pub size: f32,
    pub center: Point,
    pub radius: f32,
    pub circumference: f32,
    pub arcs: Vec<DonutArc>,
    pub legend: Vec<LegendEntry>,
}

/// Lay out `segments` as consecutive arcs around a ring inside a
/// `size` x `size` box, proportional to each segment's share of the total.
pub fn donut(segments: &[DonutSegment], size: f32) -> Result<Donut, ChartError> {
    ensure_finite(segments.iter().map(|s| s.value))?;
    if let Some(i) = segments.iter().position(|s| s.value < 0.0) {
        return Err(ChartError::NegativeValue(i));
    }
    let total: f64 = segments.iter().map(|s| s.value).sum();
    if total == 0.0 {
        return Err(ChartError::ZeroTotal);
    }

    if !size.is_finite() || size <= RING_INSET {
        return Err(ChartError::DonutSize(size));
    }
    let radius = (size - RING_INSET) / 2.0;
    let circumference = TAU * radius;

    let mut arcs = Vec::with_capacity(segments.len());
    let mut offset = 0.0f64;
    for seg in segments {
        let length = seg.value / total * f64::from(circumference);
        arcs.push(DonutArc {
            color: seg.color,
            length: length as f32,
            offset: offset as f32,
            start_angle: START_ANGLE + (offset / f64::from(radius)) as f32,
            sweep: (length / f64::from(radius)) as f32,
        });
        offset += length;
    }

    let legend = segments
        .iter()
        .map(|s| LegendEntry {
            color: s.color,
            label: s.label.clone(),
            value_text: format!("{}%", format_value(s.value)),
        })
        .collect();

    Ok(Donut {
        size,
        center: Point::new(size / 2.0, size / 2.0),
        radius,
        circumference,
        arcs,
        legend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn seg(value: f64, label: &str) -> DonutSegment {
        DonutSegment {
            value,
            label: label.to_string(),
            color: Rgb::ACCENT,
        }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-3 * b.abs().max(1.0)
    }

    #[test]
    fn thirty_seventy_split() {
        let chart = donut(&[seg(30.0, "a"), seg(70.0, "b")], 120.0).unwrap();
        let c = chart.circumference;
        assert!(close(chart.arcs[0].length, 0.3 * c));
        assert!(close(chart.arcs[1].length, 0.7 * c));
        assert!(close(chart.arcs[0].length + chart.arcs[1].length, c));
    }

    #[test]
    fn ring_dimensions() {
        let chart = donut(&[seg(1.0, "only")], 120.0).unwrap();
        assert_eq!(chart.radius, 52.0);
        assert_eq!(chart.center, Point::new(60.0, 60.0));
        assert!(close(chart.circumference, TAU * 52.0));
    }

    #[test]
    fn arcs_are_consecutive_from_twelve_oclock() {
        let segments = [
            seg(40.0, "Freemium SaaS"),
            seg(30.0, "Trading Fees"),
            seg(20.0, "Data/API"),
            seg(10.0, "Community"),
        ];
        let chart = donut(&segments, 120.0).unwrap();
        assert_eq!(chart.arcs[0].offset, 0.0);
        assert_eq!(chart.arcs[0].start_angle, START_ANGLE);
        for pair in chart.arcs.windows(2) {
            assert!(close(pair[1].offset, pair[0].offset + pair[0].length));
            assert!(close(pair[1].start_angle, pair[0].start_angle + pair[0].sweep));
        }
    }

    #[test]
    fn legend_keeps_input_order() {
        let chart = donut(&[seg(40.0, "SaaS"), seg(60.0, "Fees")], 120.0).unwrap();
        let labels: Vec<_> = chart.legend.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["SaaS", "Fees"]);
        assert_eq!(chart.legend[0].value_text, "40%");
    }

    #[test]
    fn zero_total_is_rejected() {
        assert_eq!(
            donut(&[seg(0.0, "a"), seg(0.0, "b")], 120.0),
            Err(ChartError::ZeroTotal)
        );
        assert_eq!(donut(&[], 120.0), Err(ChartError::ZeroTotal));
    }

    #[test]
    fn ring_must_fit_the_box() {
        let segments = [seg(30.0, "a"), seg(70.0, "b")];
        assert_eq!(donut(&segments, 16.0), Err(ChartError::DonutSize(16.0)));
        assert_eq!(donut(&segments, 4.0), Err(ChartError::DonutSize(4.0)));
        assert!(matches!(
            donut(&segments, f32::NAN),
            Err(ChartError::DonutSize(_))
        ));
        let smallest = donut(&segments, 17.0).unwrap();
        assert!(smallest.arcs.iter().all(|a| a.start_angle.is_finite() && a.sweep.is_finite()));
    }

    #[test]
    fn negative_value_is_rejected() {
        assert_eq!(
            donut(&[seg(10.0, "a"), seg(-5.0, "b")], 120.0),
            Err(ChartError::NegativeValue(1))
        );
    }

    #[test]
    fn sampled_arc_starts_at_top() {
        let chart = donut(&[seg(25.0, "a"), seg(75.0, "b")], 120.0).unwrap();
        let pts = chart.arcs[0].points(chart.center, chart.radius, 8);
        assert_eq!(pts.len(), 9);
        assert!(close(pts[0].x, 60.0));
        assert!(close(pts[0].y, 60.0 - 52.0));
        // A quarter of the ring ends at 3 o'clock.
        assert!(close(pts[8].x, 60.0 + 52.0));
        assert!(close(pts[8].y, 60.0));
    }

    proptest! {
        #[test]
        fn arcs_cover_the_whole_ring(values in prop::collection::vec(0.01f64..1000.0, 1..12)) {
            let segments: Vec<_> = values.iter().map(|&v| seg(v, "s")).collect();
            let chart = donut(&segments, 120.0).unwrap();
            let total: f32 = chart.arcs.iter().map(|a| a.length).sum();
            prop_assert!((total - chart.circumference).abs() < 1e-2);
        }
    }
}
