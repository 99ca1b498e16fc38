use serde::{Deserialize, Serialize};

use super::{ChartError, Rgb, ensure_finite, group_thousands};

/// Width of one painted stripe and the stripe period, in reference pixels.
pub const STRIPE_WIDTH: f32 = 2.0;
pub const STRIPE_PERIOD: f32 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSpec {
    pub label: String,
    pub value: f64,
    pub max: f64,
    #[serde(default)]
    pub color: Rgb,
    #[serde(default = "default_show_value")]
    pub show_value: bool,
}

fn default_show_value() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalBar {
    pub label: String,
    pub color: Rgb,
    /// Share of the track that is filled, `value / max`, clamped to `[0, 1]`.
    pub fraction: f32,
    pub value_text: Option<String>,
}

impl HorizontalBar {
    /// Filled width for a track `track_width` wide.
    pub fn fill_width(&self, track_width: f32) -> f32 {
        self.fraction * track_width
    }

    /// Horizontal spans `(start, end)` of the painted stripes inside the fill,
    /// relative to the track's left edge.
    pub fn stripe_spans(&self, track_width: f32, scale: f32) -> Vec<(f32, f32)> {
        let fill = self.fill_width(track_width);
        let period = STRIPE_PERIOD * scale;
        let width = STRIPE_WIDTH * scale;
        if period <= 0.0 {
            return Vec::new();
        }

        let mut spans = Vec::new();
        let mut x = 0.0;
        while x < fill {
            spans.push((x, (x + width).min(fill)));
            x += period;
        }
        spans
    }
}

pub fn horizontal_bar(spec: &BarSpec) -> Result<HorizontalBar, ChartError> {
    ensure_finite([spec.value, spec.max])?;
    if spec.max == 0.0 {
        return Err(ChartError::ZeroMaximum);
    }

    let fraction = (spec.value / spec.max).clamp(0.0, 1.0) as f32;
    Ok(HorizontalBar {
        label: spec.label.clone(),
        color: spec.color,
        fraction,
        value_text: spec.show_value.then(|| group_thousands(spec.value)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(value: f64, max: f64) -> BarSpec {
        BarSpec {
            label: "TAM".to_string(),
            value,
            max,
            color: Rgb::ACCENT,
            show_value: true,
        }
    }

    #[test]
    fn fraction_is_value_over_max() {
        let bar = horizontal_bar(&spec(35.0, 100.0)).unwrap();
        assert!((bar.fraction - 0.35).abs() < 1e-6);
        assert!((bar.fill_width(200.0) - 70.0).abs() < 1e-4);
    }

    #[test]
    fn value_label_is_grouped() {
        let bar = horizontal_bar(&spec(12700.0, 12700.0)).unwrap();
        assert_eq!(bar.value_text.as_deref(), Some("12,700"));
        assert_eq!(bar.fraction, 1.0);
    }

    #[test]
    fn hidden_value_has_no_label() {
        let mut s = spec(1.0, 2.0);
        s.show_value = false;
        assert!(horizontal_bar(&s).unwrap().value_text.is_none());
    }

    #[test]
    fn zero_max_is_rejected() {
        assert_eq!(horizontal_bar(&spec(5.0, 0.0)), Err(ChartError::ZeroMaximum));
    }

    #[test]
    fn stripes_alternate_inside_fill() {
        let bar = horizontal_bar(&spec(50.0, 100.0)).unwrap();
        let spans = bar.stripe_spans(20.0, 1.0);
        assert_eq!(spans, vec![(0.0, 2.0), (4.0, 6.0), (8.0, 10.0)]);
    }

    #[test]
    fn last_stripe_is_clipped_to_fill() {
        let bar = horizontal_bar(&spec(9.0, 16.0)).unwrap();
        let spans = bar.stripe_spans(16.0, 1.0);
        assert_eq!(spans.last(), Some(&(8.0, 9.0)));
    }
}
