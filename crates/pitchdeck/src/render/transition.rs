use std::time::Instant;

use crate::navigation::Direction;

pub const TRANSITION_DURATION: f32 = 0.4;
/// Horizontal travel of a sliding slide, in reference pixels.
pub const SLIDE_DISTANCE: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Slide,
    Fade,
    None,
}

impl TransitionKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "slide" => Self::Slide,
            "fade" => Self::Fade,
            "none" => Self::None,
            other => {
                tracing::warn!(transition = other, "unknown transition, using slide");
                Self::Slide
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Slide => "slide",
            Self::Fade => "fade",
            Self::None => "none",
        }
    }
}

/// Where and how opaque a slide is painted during a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideFrame {
    pub opacity: f32,
    /// Horizontal offset in reference pixels.
    pub offset_x: f32,
}

impl SlideFrame {
    pub const HIDDEN: SlideFrame = SlideFrame {
        opacity: 0.0,
        offset_x: 0.0,
    };
    pub const SHOWN: SlideFrame = SlideFrame {
        opacity: 1.0,
        offset_x: 0.0,
    };
}

#[derive(Debug, Clone)]
pub struct ActiveTransition {
    pub from: usize,
    pub to: usize,
    pub kind: TransitionKind,
    pub direction: Direction,
    start: Instant,
}

impl ActiveTransition {
    pub fn new(from: usize, to: usize, kind: TransitionKind, direction: Direction) -> Self {
        Self::starting_at(from, to, kind, direction, Instant::now())
    }

    pub fn starting_at(
        from: usize,
        to: usize,
        kind: TransitionKind,
        direction: Direction,
        start: Instant,
    ) -> Self {
        Self {
            from,
            to,
            kind,
            direction,
            start,
        }
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress_at(&self, now: Instant) -> f32 {
        if self.kind == TransitionKind::None {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start).as_secs_f32();
        (elapsed / TRANSITION_DURATION).clamp(0.0, 1.0)
    }

    pub fn is_complete_at(&self, now: Instant) -> bool {
        self.progress_at(now) >= 1.0
    }

    /// Frames of the outgoing and incoming slide at linear progress `t`.
    ///
    /// The outgoing slide leaves during the first half and the incoming one
    /// enters during the second, so the two never overlap.
    pub fn frames(&self, t: f32) -> (SlideFrame, SlideFrame) {
        if self.kind == TransitionKind::None {
            return (SlideFrame::HIDDEN, SlideFrame::SHOWN);
        }

        // Incoming slides arrive from the side the deck is moving towards.
        let travel = match self.kind {
            TransitionKind::Slide => SLIDE_DISTANCE * self.direction.sign(),
            _ => 0.0,
        };

        if t < 0.5 {
            let p = ease_in_out(t * 2.0);
            let outgoing = SlideFrame {
                opacity: 1.0 - p,
                offset_x: -travel * p,
            };
            (outgoing, SlideFrame::HIDDEN)
        } else {
            let p = ease_in_out((t - 0.5) * 2.0);
            let incoming = SlideFrame {
                opacity: p,
                offset_x: travel * (1.0 - p),
            };
            (SlideFrame::HIDDEN, incoming)
        }
    }
}

pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn transition(kind: TransitionKind, direction: Direction) -> ActiveTransition {
        ActiveTransition::starting_at(2, 3, kind, direction, Instant::now())
    }

    #[test]
    fn completes_after_duration() {
        let start = Instant::now();
        let t = ActiveTransition::starting_at(0, 1, TransitionKind::Slide, Direction::Forward, start);
        assert!(!t.is_complete_at(start + Duration::from_millis(200)));
        assert!(t.is_complete_at(start + Duration::from_millis(400)));
    }

    #[test]
    fn none_is_immediately_complete() {
        let t = transition(TransitionKind::None, Direction::Forward);
        assert_eq!(t.progress_at(t.start), 1.0);
        assert_eq!(t.frames(0.0), (SlideFrame::HIDDEN, SlideFrame::SHOWN));
    }

    #[test]
    fn forward_slide_exits_left_and_enters_from_right() {
        let t = transition(TransitionKind::Slide, Direction::Forward);
        let (outgoing, _) = t.frames(0.4);
        assert!(outgoing.offset_x < 0.0);
        let (_, incoming) = t.frames(0.6);
        assert!(incoming.offset_x > 0.0);
        let (_, settled) = t.frames(1.0);
        assert_eq!(settled, SlideFrame::SHOWN);
    }

    #[test]
    fn backward_slide_mirrors_forward() {
        let fwd = transition(TransitionKind::Slide, Direction::Forward);
        let back = transition(TransitionKind::Slide, Direction::Backward);
        for t in [0.1, 0.3, 0.7, 0.9] {
            let (fo, fi) = fwd.frames(t);
            let (bo, bi) = back.frames(t);
            assert_eq!(fo.offset_x, -bo.offset_x);
            assert_eq!(fi.offset_x, -bi.offset_x);
            assert_eq!(fo.opacity, bo.opacity);
        }
    }

    #[test]
    fn fade_does_not_move() {
        let t = transition(TransitionKind::Fade, Direction::Backward);
        for p in [0.0, 0.25, 0.75] {
            let (o, i) = t.frames(p);
            assert_eq!(o.offset_x, 0.0);
            assert_eq!(i.offset_x, 0.0);
        }
        assert_eq!(t.frames(0.0).0.opacity, 1.0);
    }

    #[test]
    fn names_round_trip() {
        for kind in [TransitionKind::Slide, TransitionKind::Fade, TransitionKind::None] {
            assert_eq!(TransitionKind::from_name(kind.name()), kind);
        }
        assert_eq!(TransitionKind::from_name("spatial"), TransitionKind::Slide);
    }

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert_eq!(ease_in_out(0.5), 0.5);
    }
}
