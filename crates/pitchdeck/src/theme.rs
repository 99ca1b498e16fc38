use eframe::egui::Color32;

use crate::chart::{Rgb, Tone};

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color32,
    pub panel: Color32,
    pub surface: Color32,
    pub border: Color32,
    pub divider: Color32,
    pub foreground: Color32,
    pub muted: Color32,
    pub dim: Color32,
    pub accent: Color32,
    pub accent_surface: Color32,
    pub positive: Color32,
    pub negative: Color32,
    pub warning: Color32,
    pub heading_size: f32,
    pub subheading_size: f32,
    pub body_size: f32,
    pub label_size: f32,
    pub metric_size: f32,
    pub mono_size: f32,
}

impl Theme {
    /// Dark blueprint palette: near-black canvas, 1px borders, one blue accent.
    pub fn blueprint() -> Self {
        Self {
            background: Color32::from_rgb(0x0A, 0x0B, 0x0E),
            panel: Color32::from_rgb(0x12, 0x14, 0x1A),
            surface: Self::color(Rgb::SURFACE),
            border: Color32::from_rgb(0x2A, 0x2D, 0x35),
            divider: Self::color(Rgb::TRACK),
            foreground: Self::color(Rgb::FOREGROUND),
            muted: Self::color(Rgb::MUTED),
            dim: Color32::from_rgb(0x5C, 0x62, 0x6D),
            accent: Self::color(Rgb::ACCENT),
            accent_surface: Self::color(Rgb::ACCENT_SURFACE),
            positive: Self::color(Rgb::POSITIVE),
            negative: Self::color(Rgb::NEGATIVE),
            warning: Color32::from_rgb(0xB8, 0x86, 0x0B),
            heading_size: 44.0,
            subheading_size: 26.0,
            body_size: 22.0,
            label_size: 14.0,
            metric_size: 34.0,
            mono_size: 20.0,
        }
    }

    pub fn color(rgb: Rgb) -> Color32 {
        Color32::from_rgb(rgb.0, rgb.1, rgb.2)
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(
            color.r(),
            color.g(),
            color.b(),
            (opacity.clamp(0.0, 1.0) * color.a() as f32) as u8,
        )
    }

    /// Text color for a table cell or metric delta.
    pub fn tone_color(&self, tone: Tone, highlight: bool) -> Color32 {
        match tone {
            Tone::Positive => self.positive,
            Tone::Negative => self.negative,
            Tone::Neutral if highlight => self.accent,
            Tone::Neutral => self.foreground,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::blueprint()
    }
}
