use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use eframe::egui;

use crate::carousel::FeatureCarousel;
use crate::config::{Config, StartMode};
use crate::deck::Deck;
use crate::input::{self, KeyboardListener, KeyboardRegistry};
use crate::navigation::{KeyDisposition, NavigationController};
use crate::render::chrome::{self, ChromeAction};
use crate::render::transition::{ActiveTransition, SlideFrame, TransitionKind};
use crate::render::{self, SlideResponse};
use crate::theme::Theme;
use crate::watch::DeckWatcher;

const TOAST_DURATION: f32 = 2.0;
const TOAST_FADE_START: f32 = 1.5;

/// How the presenter was launched from the command line.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub deck: Option<PathBuf>,
    pub windowed: bool,
    /// 1-based.
    pub slide: Option<usize>,
    pub index: bool,
}

/// Resolve the opening slide and whether the index starts open.
/// Command-line flags win over the config file.
fn start_position(options: &LaunchOptions, config: &Config, slide_count: usize) -> (usize, bool) {
    let mode = match (options.slide, options.index) {
        (Some(n), _) => StartMode::Slide(n),
        (None, true) => StartMode::Index,
        (None, false) => config.start_mode(),
    };
    let last = slide_count.saturating_sub(1);
    match mode {
        StartMode::First => (0, options.index),
        StartMode::Index => (0, true),
        StartMode::Slide(n) => (n.saturating_sub(1).min(last), options.index),
    }
}

/// The deck file's transition wins over the config default.
fn transition_kind(deck: &Deck, config: &Config) -> TransitionKind {
    deck.transition
        .as_deref()
        .or(config.transition())
        .map_or(TransitionKind::Slide, TransitionKind::from_name)
}

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        if elapsed < TOAST_FADE_START {
            1.0
        } else if elapsed < TOAST_DURATION {
            1.0 - (elapsed - TOAST_FADE_START) / (TOAST_DURATION - TOAST_FADE_START)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= TOAST_DURATION
    }
}

/// The live carousel and the slide it belongs to.
struct LiveCarousel {
    slide: usize,
    state: FeatureCarousel,
}

struct DeckApp {
    deck: Deck,
    deck_path: Option<PathBuf>,
    theme: Theme,
    nav: NavigationController,
    transition_kind: TransitionKind,
    transition: Option<ActiveTransition>,
    /// Index of the slide that is (or is becoming) visible.
    shown: usize,
    carousel: Option<LiveCarousel>,
    config: Config,
    _keyboard: KeyboardRegistry,
    listener: KeyboardListener,
    watcher: Option<DeckWatcher>,
    toast: Option<Toast>,
}

impl DeckApp {
    fn new(
        ctx: &egui::Context,
        deck: Deck,
        deck_path: Option<PathBuf>,
        config: Config,
        start: (usize, bool),
    ) -> anyhow::Result<Self> {
        let keyboard = KeyboardRegistry::new();
        let listener = keyboard.register()?;

        let mut nav = NavigationController::new(deck.slide_count());
        let (slide, index_open) = start;
        nav.jump_to(slide);
        if index_open {
            nav.open_overlay();
        }

        let watcher = deck_path.as_deref().and_then(|path| {
            let ctx = ctx.clone();
            match DeckWatcher::new(path, move || ctx.request_repaint()) {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    tracing::warn!(path = %path.display(), "not watching deck file: {e}");
                    None
                }
            }
        });

        let carousel = Self::make_carousel(&deck, &config);
        let transition_kind = transition_kind(&deck, &config);
        tracing::debug!(
            slides = deck.slide_count(),
            transition = transition_kind.name(),
            start = nav.current(),
            "presenter ready"
        );

        Ok(Self {
            shown: nav.current(),
            deck,
            deck_path,
            theme: Theme::blueprint(),
            nav,
            transition_kind,
            transition: None,
            carousel,
            config,
            _keyboard: keyboard,
            listener,
            watcher,
            toast: None,
        })
    }

    fn make_carousel(deck: &Deck, config: &Config) -> Option<LiveCarousel> {
        deck.carousel().map(|(slide, len)| LiveCarousel {
            slide,
            state: FeatureCarousel::with_timing(
                len,
                config.carousel_interval(),
                config.carousel_resume_after(),
                Instant::now(),
            ),
        })
    }

    fn apply_chrome(&mut self, action: ChromeAction) {
        match action {
            ChromeAction::Previous => {
                self.nav.previous();
            }
            ChromeAction::Next => {
                self.nav.next();
            }
            ChromeAction::JumpTo(index) => {
                self.nav.jump_to(index);
            }
            ChromeAction::ToggleIndex => self.nav.toggle_overlay(),
            ChromeAction::CloseIndex => self.nav.close_overlay(),
            ChromeAction::SelectFromIndex(index) => {
                self.nav.select_from_overlay(index);
            }
        }
    }

    /// Start a transition if the controller moved since the last frame.
    fn sync_shown(&mut self) {
        let current = self.nav.current();
        if current == self.shown {
            return;
        }
        tracing::debug!(from = self.shown, state = ?self.nav.state(), "slide change");
        self.transition = Some(ActiveTransition::new(
            self.shown,
            current,
            self.transition_kind,
            self.nav.direction(),
        ));
        self.shown = current;

        if let Some(carousel) = &mut self.carousel {
            if carousel.slide == current {
                carousel.state.reset(Instant::now());
            }
        }
    }

    fn reload_deck(&mut self) {
        let Some(path) = self.deck_path.clone() else {
            return;
        };
        match Deck::load(&path) {
            Ok(deck) => {
                self.nav.set_len(deck.slide_count());
                self.transition_kind = transition_kind(&deck, &self.config);
                self.carousel = Self::make_carousel(&deck, &self.config);
                self.deck = deck;
                self.shown = self.nav.current();
                self.transition = None;
                self.toast = Some(Toast::new("Deck reloaded"));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "reload failed: {e}");
                self.toast = Some(Toast::new(format!("Reload failed: {e}")));
            }
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) -> Vec<egui::ViewportCommand> {
        // Viewport commands are sent after the input closure; sending inside
        // ctx.input() deadlocks.
        let mut viewport_cmds = Vec::new();
        let (keys, modifiers, fullscreen) = ctx.input(|i| {
            (
                self.listener.pressed_keys(i),
                i.modifiers,
                i.viewport().fullscreen.unwrap_or(false),
            )
        });

        let mut consumed = Vec::new();
        for key in keys {
            if key == egui::Key::Q {
                viewport_cmds.push(egui::ViewportCommand::Close);
                consumed.push(key);
                continue;
            }
            if !self.nav.overlay_open() {
                let handled = match key {
                    egui::Key::Home => {
                        self.nav.first();
                        true
                    }
                    egui::Key::End => {
                        self.nav.last();
                        true
                    }
                    egui::Key::I => {
                        self.nav.open_overlay();
                        true
                    }
                    egui::Key::F => {
                        viewport_cmds.push(egui::ViewportCommand::Fullscreen(!fullscreen));
                        true
                    }
                    _ => false,
                };
                if handled {
                    consumed.push(key);
                    continue;
                }
            }
            if self.nav.handle_key(input::deck_key(key)) == KeyDisposition::Consumed {
                consumed.push(key);
            }
        }

        if !consumed.is_empty() {
            ctx.input_mut(|i| {
                for key in consumed {
                    i.consume_key(modifiers, key);
                }
            });
        }
        viewport_cmds
    }

    fn draw_slide_at(
        &self,
        ui: &mut egui::Ui,
        index: usize,
        body: egui::Rect,
        frame: SlideFrame,
        scale: f32,
    ) -> SlideResponse {
        let Some(slide) = self.deck.slides.get(index) else {
            return SlideResponse::default();
        };
        if frame.opacity <= 0.0 {
            return SlideResponse::default();
        }
        let carousel = self
            .carousel
            .as_ref()
            .filter(|c| c.slide == index)
            .map(|c| &c.state);
        let rect = body.translate(egui::vec2(frame.offset_x * scale, 0.0));
        let mut child = ui.new_child(
            egui::UiBuilder::new()
                .max_rect(body)
                .id_salt(("slide", index)),
        );
        child.set_clip_rect(body);
        render::render_slide(&child, slide, &self.theme, rect, frame.opacity, scale, carousel)
    }

    fn draw_toast(&self, ui: &egui::Ui, rect: egui::Rect, scale: f32) {
        let Some(toast) = &self.toast else {
            return;
        };
        let opacity = toast.opacity();
        if opacity <= 0.0 {
            return;
        }
        let color = Theme::with_opacity(self.theme.foreground, opacity);
        let galley = ui.painter().layout_no_wrap(
            toast.message.clone(),
            egui::FontId::monospace(self.theme.label_size * 1.2 * scale),
            color,
        );
        let padding = 16.0 * scale;
        let toast_rect = egui::Rect::from_min_size(
            egui::pos2(
                rect.center().x - galley.rect.width() / 2.0 - padding,
                rect.bottom() - (chrome::FOOTER_HEIGHT + 72.0) * scale,
            ),
            egui::vec2(
                galley.rect.width() + padding * 2.0,
                galley.rect.height() + padding * 2.0,
            ),
        );
        ui.painter()
            .rect_filled(toast_rect, 0.0, Theme::with_opacity(self.theme.panel, opacity));
        ui.painter().rect_stroke(
            toast_rect,
            0.0,
            egui::Stroke::new(1.0, Theme::with_opacity(self.theme.accent, opacity)),
            egui::StrokeKind::Inside,
        );
        ui.painter().galley(
            egui::pos2(toast_rect.left() + padding, toast_rect.top() + padding),
            galley,
            color,
        );
    }
}

impl eframe::App for DeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.watcher.as_ref().is_some_and(DeckWatcher::changed) {
            self.reload_deck();
        }

        for cmd in self.handle_keys(ctx) {
            ctx.send_viewport_cmd(cmd);
        }
        self.sync_shown();

        let now = Instant::now();
        if self.transition.as_ref().is_some_and(|t| t.is_complete_at(now)) {
            self.transition = None;
        }
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }

        let bg = self.theme.background;
        let mut action = None;
        let mut slide_response = SlideResponse::default();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);
                let scale = render::compute_scale(rect);
                let (header, body, footer) = render::frame_layout(rect, scale);

                match &self.transition {
                    Some(t) => {
                        let (outgoing, incoming) = t.frames(t.progress_at(now));
                        self.draw_slide_at(ui, t.from, body, outgoing, scale);
                        self.draw_slide_at(ui, t.to, body, incoming, scale);
                        ctx.request_repaint();
                    }
                    None => {
                        slide_response =
                            self.draw_slide_at(ui, self.shown, body, SlideFrame::SHOWN, scale);
                    }
                }

                let overlay_open = self.nav.overlay_open();
                let footer_action = chrome::draw_footer(
                    ui,
                    self.deck.footer.as_deref(),
                    self.nav.is_first(),
                    self.nav.is_last(),
                    &self.theme,
                    footer,
                    scale,
                );
                // The overlay covers everything below the header; the header
                // is painted last so its index toggle stays clickable.
                let overlay_action = overlay_open.then(|| {
                    let covered = egui::Rect::from_min_max(
                        egui::pos2(rect.left(), header.bottom()),
                        rect.max,
                    );
                    chrome::draw_index_overlay(
                        ui,
                        &self.deck,
                        self.nav.current(),
                        &self.theme,
                        covered,
                        scale,
                    )
                });
                let header_action = chrome::draw_header(
                    ui,
                    &self.deck,
                    self.nav.current(),
                    overlay_open,
                    &self.theme,
                    header,
                    scale,
                );
                action = chrome::resolve_action(header_action, footer_action, overlay_action);

                self.draw_toast(ui, rect, scale);
            });

        if let Some(action) = action {
            self.apply_chrome(action);
            ctx.request_repaint();
        }

        if let Some(carousel) = &mut self.carousel {
            let live = carousel.slide == self.shown
                && self.transition.is_none()
                && !self.nav.overlay_open();
            if live {
                carousel
                    .state
                    .set_hovered(slide_response.carousel_hovered, now);
                if let Some(index) = slide_response.carousel_clicked {
                    carousel.state.select(index, now);
                }
                carousel.state.tick(now);
                ctx.request_repaint_after(carousel.state.until_next_tick(now));
            }
        }

        if self.toast.is_some() {
            ctx.request_repaint();
        }
    }
}

pub fn run(options: LaunchOptions) -> anyhow::Result<()> {
    let deck = match &options.deck {
        Some(path) => {
            Deck::load(path).with_context(|| format!("Failed to load {}", path.display()))?
        }
        None => Deck::builtin().context("Built-in deck is invalid")?,
    };
    let config = Config::load_or_default();
    let start = start_position(&options, &config, deck.slide_count());
    let windowed = options.windowed || config.windowed();

    let title = match &deck.subtitle {
        Some(subtitle) => format!("{} | {subtitle}", deck.title),
        None => deck.title.clone(),
    };

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options_native = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let deck_path = options.deck;
    eframe::run_native(
        &title,
        options_native,
        Box::new(move |cc| {
            let app = DeckApp::new(&cc.egui_ctx, deck, deck_path, config, start)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launch(slide: Option<usize>, index: bool) -> LaunchOptions {
        LaunchOptions {
            slide,
            index,
            ..Default::default()
        }
    }

    fn config_with_start(mode: &str) -> Config {
        let mut config = Config::default();
        config.set("defaults.start_mode", mode).unwrap();
        config
    }

    #[test]
    fn starts_on_first_slide_by_default() {
        assert_eq!(start_position(&launch(None, false), &Config::default(), 14), (0, false));
    }

    #[test]
    fn slide_flag_is_one_based_and_clamped() {
        let config = Config::default();
        assert_eq!(start_position(&launch(Some(8), false), &config, 14), (7, false));
        assert_eq!(start_position(&launch(Some(99), false), &config, 14), (13, false));
        assert_eq!(start_position(&launch(Some(0), false), &config, 14), (0, false));
    }

    #[test]
    fn index_flag_opens_overlay() {
        let config = Config::default();
        assert_eq!(start_position(&launch(None, true), &config, 14), (0, true));
        assert_eq!(start_position(&launch(Some(3), true), &config, 14), (2, true));
    }

    #[test]
    fn flags_override_config() {
        let config = config_with_start("index");
        assert_eq!(start_position(&launch(None, false), &config, 14), (0, true));
        assert_eq!(start_position(&launch(Some(5), false), &config, 14), (4, false));

        let config = config_with_start("6");
        assert_eq!(start_position(&launch(None, false), &config, 14), (5, false));
    }

    #[test]
    fn deck_transition_overrides_config() {
        let mut deck = Deck::builtin().unwrap();
        let mut config = Config::default();
        assert_eq!(transition_kind(&deck, &config), TransitionKind::Slide);

        config.set("defaults.transition", "none").unwrap();
        assert_eq!(transition_kind(&deck, &config), TransitionKind::None);

        deck.transition = Some("fade".to_string());
        assert_eq!(transition_kind(&deck, &config), TransitionKind::Fade);
    }

    #[test]
    fn toast_fades_out() {
        let mut toast = Toast::new("Deck reloaded");
        assert_eq!(toast.opacity(), 1.0);
        assert!(!toast.is_expired());
        toast.start = Instant::now() - std::time::Duration::from_secs(3);
        assert_eq!(toast.opacity(), 0.0);
        assert!(toast.is_expired());
    }
}
