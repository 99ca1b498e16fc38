use std::cell::Cell;
use std::rc::Rc;

use eframe::egui;

use crate::navigation::DeckKey;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("a keyboard listener is already registered")]
    AlreadyRegistered,
}

/// Hands out the deck's single keyboard listener.
///
/// Clones share the same slot, so the view and whatever tears it down can
/// both observe whether a listener is live.
#[derive(Debug, Clone, Default)]
pub struct KeyboardRegistry {
    active: Rc<Cell<bool>>,
}

impl KeyboardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self) -> Result<KeyboardListener, InputError> {
        if self.active.replace(true) {
            return Err(InputError::AlreadyRegistered);
        }
        tracing::debug!("keyboard listener registered");
        Ok(KeyboardListener {
            active: Rc::clone(&self.active),
        })
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

/// Live keyboard listener. Released when dropped.
#[derive(Debug)]
pub struct KeyboardListener {
    active: Rc<Cell<bool>>,
}

impl KeyboardListener {
    /// Keys pressed this frame, in arrival order.
    pub fn pressed_keys(&self, input: &egui::InputState) -> Vec<egui::Key> {
        input
            .events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key, pressed: true, ..
                } => Some(*key),
                _ => None,
            })
            .collect()
    }
}

impl Drop for KeyboardListener {
    fn drop(&mut self) {
        self.active.set(false);
        tracing::debug!("keyboard listener released");
    }
}

/// Map a toolkit key to the keys the navigation controller understands.
pub fn deck_key(key: egui::Key) -> DeckKey {
    match key {
        egui::Key::ArrowDown => DeckKey::ArrowDown,
        egui::Key::ArrowRight => DeckKey::ArrowRight,
        egui::Key::ArrowUp => DeckKey::ArrowUp,
        egui::Key::ArrowLeft => DeckKey::ArrowLeft,
        egui::Key::Space => DeckKey::Space,
        egui::Key::PageDown => DeckKey::PageDown,
        egui::Key::PageUp => DeckKey::PageUp,
        egui::Key::Escape => DeckKey::Escape,
        _ => DeckKey::Other,
    }
}
