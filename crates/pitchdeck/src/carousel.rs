use std::time::{Duration, Instant};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(4);
pub const DEFAULT_RESUME_AFTER: Duration = Duration::from_secs(8);

/// Auto-advancing selector over a fixed number of feature items.
///
/// Time is passed in explicitly; the app feeds it `Instant::now()` once per
/// frame and the carousel never schedules anything itself.
#[derive(Debug, Clone)]
pub struct FeatureCarousel {
    len: usize,
    active: usize,
    interval: Duration,
    resume_after: Duration,
    last_advance: Instant,
    hovered: bool,
    /// Set by a manual selection; automatic advance stays off until then.
    paused_until: Option<Instant>,
}

impl FeatureCarousel {
    #[cfg(test)]
    pub fn new(len: usize, now: Instant) -> Self {
        Self::with_timing(len, DEFAULT_INTERVAL, DEFAULT_RESUME_AFTER, now)
    }

    pub fn with_timing(
        len: usize,
        interval: Duration,
        resume_after: Duration,
        now: Instant,
    ) -> Self {
        Self {
            len,
            active: 0,
            interval,
            resume_after,
            last_advance: now,
            hovered: false,
            paused_until: None,
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn is_paused(&self, now: Instant) -> bool {
        self.hovered || self.paused_until.is_some_and(|until| now < until)
    }

    /// Advance if a full interval has passed without a pause. Returns whether
    /// the active item changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.len < 2 {
            return false;
        }
        if self.is_paused(now) {
            self.last_advance = now;
            return false;
        }
        self.paused_until = None;

        if now.saturating_duration_since(self.last_advance) < self.interval {
            return false;
        }
        self.active = (self.active + 1) % self.len;
        self.last_advance = now;
        true
    }

    pub fn set_hovered(&mut self, hovered: bool, now: Instant) {
        if self.hovered != hovered {
            self.hovered = hovered;
            self.last_advance = now;
        }
    }

    /// Manual selection. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize, now: Instant) {
        if index >= self.len {
            return;
        }
        self.active = index;
        self.last_advance = now;
        self.paused_until = Some(now + self.resume_after);
    }

    /// Start over from the first item, e.g. when its slide becomes visible.
    pub fn reset(&mut self, now: Instant) {
        self.active = 0;
        self.hovered = false;
        self.paused_until = None;
        self.last_advance = now;
    }

    /// How long until the next automatic advance could happen.
    pub fn until_next_tick(&self, now: Instant) -> Duration {
        if let Some(until) = self.paused_until.filter(|until| now < *until) {
            return until - now;
        }
        self.interval
            .saturating_sub(now.saturating_duration_since(self.last_advance))
    }
}
