#[cfg(test)]
mod tests;

/// Sign of the most recent slide change. Only used to pick which way the
/// transition animation moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    Backward,
    #[default]
    Still,
    Forward,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Backward => -1.0,
            Direction::Still => 0.0,
            Direction::Forward => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub current: usize,
    pub direction: Direction,
    pub overlay_open: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            current: 0,
            direction: Direction::Still,
            overlay_open: false,
        }
    }
}

/// Keys the deck reacts to. Everything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeckKey {
    ArrowDown,
    ArrowRight,
    ArrowUp,
    ArrowLeft,
    Space,
    PageDown,
    PageUp,
    Escape,
    Other,
}

/// Whether a key was acted on. Consumed keys must not reach any other
/// handler (no scrolling, no focus movement).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    Consumed,
    Ignored,
}

/// Owns which slide is showing and whether the index overlay is open.
/// Nothing else mutates that state.
#[derive(Debug, Clone)]
pub struct NavigationController {
    len: usize,
    state: NavigationState,
}

impl NavigationController {
    pub fn new(len: usize) -> Self {
        debug_assert!(len > 0, "a deck needs at least one slide");
        Self {
            len: len.max(1),
            state: NavigationState::default(),
        }
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn current(&self) -> usize {
        self.state.current
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    pub fn overlay_open(&self) -> bool {
        self.state.overlay_open
    }

    pub fn slide_count(&self) -> usize {
        self.len
    }

    pub fn is_first(&self) -> bool {
        self.state.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.state.current + 1 == self.len
    }

    /// Advance one slide. Saturates at the last slide. Returns whether the
    /// index changed.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.state.direction = Direction::Forward;
        self.state.current += 1;
        true
    }

    /// Go back one slide. Saturates at the first slide.
    pub fn previous(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.state.direction = Direction::Backward;
        self.state.current -= 1;
        true
    }

    /// Show slide `index`.
    ///
    /// Callers derive `index` from the slide list, so an out-of-range value is
    /// a bug: it panics in debug builds and is clamped to the last slide
    /// otherwise.
    pub fn jump_to(&mut self, index: usize) -> bool {
        debug_assert!(
            index < self.len,
            "jump_to({index}) out of range for {} slides",
            self.len
        );
        let index = if index < self.len {
            index
        } else {
            tracing::warn!(index, len = self.len, "jump target out of range, clamping");
            self.len - 1
        };

        let from = self.state.current;
        self.state.direction = match index.cmp(&from) {
            std::cmp::Ordering::Greater => Direction::Forward,
            std::cmp::Ordering::Less => Direction::Backward,
            std::cmp::Ordering::Equal => Direction::Still,
        };
        self.state.current = index;
        index != from
    }

    pub fn first(&mut self) -> bool {
        self.jump_to(0)
    }

    pub fn last(&mut self) -> bool {
        self.jump_to(self.len - 1)
    }

    pub fn toggle_overlay(&mut self) {
        self.state.overlay_open = !self.state.overlay_open;
    }

    pub fn open_overlay(&mut self) {
        self.state.overlay_open = true;
    }

    pub fn close_overlay(&mut self) {
        self.state.overlay_open = false;
    }

    /// Select a slide from the index overlay: jump there and close it.
    pub fn select_from_overlay(&mut self, index: usize) -> bool {
        let changed = self.jump_to(index);
        self.close_overlay();
        changed
    }

    /// Keyboard dispatch table.
    ///
    /// While the overlay is open it captures input and only `Escape` does
    /// anything (closes it).
    pub fn handle_key(&mut self, key: DeckKey) -> KeyDisposition {
        if self.state.overlay_open {
            if key == DeckKey::Escape {
                self.close_overlay();
            }
            return KeyDisposition::Ignored;
        }

        match key {
            DeckKey::ArrowDown | DeckKey::ArrowRight | DeckKey::Space | DeckKey::PageDown => {
                self.next();
                KeyDisposition::Consumed
            }
            DeckKey::ArrowUp | DeckKey::ArrowLeft | DeckKey::PageUp => {
                self.previous();
                KeyDisposition::Consumed
            }
            DeckKey::Escape => {
                self.close_overlay();
                KeyDisposition::Ignored
            }
            DeckKey::Other => KeyDisposition::Ignored,
        }
    }

    /// Adopt a new slide count after the deck was reloaded.
    pub fn set_len(&mut self, len: usize) {
        self.len = len.max(1);
        if self.state.current >= self.len {
            self.state.current = self.len - 1;
        }
        self.state.direction = Direction::Still;
    }
}
