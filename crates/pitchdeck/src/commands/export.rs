use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context;
use colored::Colorize;
use eframe::egui;

use crate::deck::Deck;
use crate::render::{self, chrome};
use crate::theme::Theme;

/// `slide-NN.png`, 1-based.
pub fn slide_filename(index: usize) -> String {
    format!("slide-{:02}.png", index + 1)
}

/// Paints each slide in turn and saves the screenshot egui hands back one
/// frame later.
struct ExportApp {
    deck: Deck,
    theme: Theme,
    output_dir: PathBuf,
    current_slide: usize,
    screenshot_requested: bool,
    saved: Rc<Cell<usize>>,
    done: bool,
}

impl ExportApp {
    fn new(deck: Deck, output_dir: PathBuf, saved: Rc<Cell<usize>>) -> Self {
        Self {
            deck,
            theme: Theme::blueprint(),
            output_dir,
            current_slide: 0,
            screenshot_requested: false,
            saved,
            done: false,
        }
    }

    fn slide_count(&self) -> usize {
        self.deck.slide_count()
    }

    fn paint(&self, ui: &egui::Ui, rect: egui::Rect) {
        let scale = render::compute_scale(rect);
        let (header, body, footer) = render::frame_layout(rect, scale);
        let idx = self.current_slide;

        if let Some(slide) = self.deck.slides.get(idx) {
            render::render_slide(ui, slide, &self.theme, body, 1.0, scale, None);
        }
        // Clicks are impossible here; the returned actions are irrelevant.
        let _ = chrome::draw_header(ui, &self.deck, idx, false, &self.theme, header, scale);
        let _ = chrome::draw_footer(
            ui,
            self.deck.footer.as_deref(),
            idx == 0,
            idx + 1 == self.slide_count(),
            &self.theme,
            footer,
            scale,
        );
    }
}

impl eframe::App for ExportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.done {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        // Check for screenshot result from previous frame
        let mut got_screenshot = false;
        ctx.input(|i| {
            for event in &i.events {
                if let egui::Event::Screenshot { image, .. } = event {
                    let filename = slide_filename(self.current_slide);
                    let path = self.output_dir.join(&filename);
                    match save_color_image(image, &path) {
                        Ok(()) => {
                            self.saved.set(self.saved.get() + 1);
                            eprintln!("  Saved {filename}");
                        }
                        Err(e) => eprintln!("  {} {filename}: {e:#}", "Failed".red()),
                    }
                    got_screenshot = true;
                }
            }
        });

        if got_screenshot {
            self.screenshot_requested = false;
            self.current_slide += 1;
            if self.current_slide >= self.slide_count() {
                self.done = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
        }

        let bg = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);
                self.paint(ui, rect);
            });

        // Request screenshot after rendering (will arrive next frame)
        if !self.screenshot_requested {
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
            self.screenshot_requested = true;
        }

        ctx.request_repaint();
    }
}

fn save_color_image(image: &egui::ColorImage, path: &Path) -> anyhow::Result<()> {
    let width = image.width() as u32;
    let height = image.height() as u32;
    let pixels: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|c| [c.r(), c.g(), c.b(), c.a()])
        .collect();

    image::save_buffer(path, &pixels, width, height, image::ColorType::Rgba8)
        .with_context(|| format!("Failed to save {}", path.display()))
}

pub fn run(deck: Option<PathBuf>, output_dir: PathBuf, width: u32, height: u32) -> anyhow::Result<()> {
    let deck = Deck::load_or_builtin(deck.as_deref()).context("Failed to load deck")?;

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let slide_count = deck.slide_count();
    eprintln!(
        "Exporting {} slides to {} ({}x{})",
        slide_count,
        output_dir.display(),
        width,
        height,
    );

    let title = format!("{} export", deck.title);
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([width as f32, height as f32])
        .with_title(&title)
        .with_decorations(false);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let saved = Rc::new(Cell::new(0));
    let app_saved = Rc::clone(&saved);
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(ExportApp::new(deck, output_dir, app_saved)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    if saved.get() < slide_count {
        anyhow::bail!("Exported {} of {slide_count} slides", saved.get());
    }
    eprintln!("{}", "Export complete.".green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_are_one_based_and_padded() {
        assert_eq!(slide_filename(0), "slide-01.png");
        assert_eq!(slide_filename(13), "slide-14.png");
        assert_eq!(slide_filename(99), "slide-100.png");
    }

    #[test]
    fn saves_png() {
        let dir = std::env::temp_dir().join(format!("pitchdeck-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(slide_filename(0));
        let image = egui::ColorImage::from_rgba_unmultiplied([4, 2], &[10u8, 11, 14, 255].repeat(8));
        save_color_image(&image, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
