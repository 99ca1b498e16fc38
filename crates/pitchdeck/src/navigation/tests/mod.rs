mod keys;
mod operations;

use super::{DeckKey, Direction, KeyDisposition, NavigationController};

/// Slide count of the built-in deck's original web version.
const SLIDES: usize = 12;

/// Helper to create a controller positioned at `index`.
fn at(len: usize, index: usize) -> NavigationController {
    let mut nav = NavigationController::new(len);
    for _ in 0..index {
        nav.next();
    }
    assert_eq!(nav.current(), index);
    nav
}

/// Press `key` `times` times, asserting every press got the same disposition.
fn press(nav: &mut NavigationController, key: DeckKey, times: usize) -> KeyDisposition {
    let mut last = KeyDisposition::Ignored;
    for i in 0..times {
        let got = nav.handle_key(key);
        if i > 0 {
            assert_eq!(got, last, "{key:?} changed disposition on press {i}");
        }
        last = got;
    }
    last
}

const NEXT_KEYS: [DeckKey; 4] = [
    DeckKey::ArrowDown,
    DeckKey::ArrowRight,
    DeckKey::Space,
    DeckKey::PageDown,
];

const PREVIOUS_KEYS: [DeckKey; 3] = [DeckKey::ArrowUp, DeckKey::ArrowLeft, DeckKey::PageUp];

const ALL_KEYS: [DeckKey; 9] = [
    DeckKey::ArrowDown,
    DeckKey::ArrowRight,
    DeckKey::ArrowUp,
    DeckKey::ArrowLeft,
    DeckKey::Space,
    DeckKey::PageDown,
    DeckKey::PageUp,
    DeckKey::Escape,
    DeckKey::Other,
];
