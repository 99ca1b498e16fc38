use super::*;

#[test]
fn forward_keys_advance_and_are_consumed() {
    for key in NEXT_KEYS {
        let mut nav = at(SLIDES, 4);
        assert_eq!(nav.handle_key(key), KeyDisposition::Consumed);
        assert_eq!(nav.current(), 5, "{key:?}");
        assert_eq!(nav.direction(), Direction::Forward);
    }
}

#[test]
fn backward_keys_retreat_and_are_consumed() {
    for key in PREVIOUS_KEYS {
        let mut nav = at(SLIDES, 4);
        assert_eq!(nav.handle_key(key), KeyDisposition::Consumed);
        assert_eq!(nav.current(), 3, "{key:?}");
        assert_eq!(nav.direction(), Direction::Backward);
    }
}

#[test]
fn navigation_keys_are_consumed_even_when_saturated() {
    let mut nav = at(SLIDES, SLIDES - 1);
    assert_eq!(nav.handle_key(DeckKey::Space), KeyDisposition::Consumed);
    let mut nav = NavigationController::new(SLIDES);
    assert_eq!(nav.handle_key(DeckKey::PageUp), KeyDisposition::Consumed);
}

#[test]
fn unrelated_keys_are_ignored() {
    let mut nav = at(SLIDES, 4);
    assert_eq!(nav.handle_key(DeckKey::Other), KeyDisposition::Ignored);
    assert_eq!(nav.current(), 4);
}

#[test]
fn escape_when_closed_is_a_no_op() {
    let mut nav = at(SLIDES, 4);
    nav.handle_key(DeckKey::Escape);
    assert_eq!(nav.current(), 4);
    assert!(!nav.overlay_open());
}

#[test]
fn open_overlay_captures_every_other_key() {
    for key in ALL_KEYS.into_iter().filter(|k| *k != DeckKey::Escape) {
        let mut nav = at(SLIDES, 6);
        nav.open_overlay();
        assert_eq!(press(&mut nav, key, 3), KeyDisposition::Ignored);
        assert_eq!(nav.current(), 6, "{key:?} moved the deck");
        assert!(nav.overlay_open(), "{key:?} closed the overlay");
    }
}

#[test]
fn escape_closes_overlay_without_moving() {
    let mut nav = at(SLIDES, 6);
    nav.open_overlay();
    nav.handle_key(DeckKey::Escape);
    assert!(!nav.overlay_open());
    assert_eq!(nav.current(), 6);
}

#[test]
fn keys_work_again_after_overlay_closes() {
    let mut nav = at(SLIDES, 6);
    nav.open_overlay();
    nav.handle_key(DeckKey::ArrowRight);
    nav.handle_key(DeckKey::Escape);
    nav.handle_key(DeckKey::ArrowRight);
    assert_eq!(nav.current(), 7);
}
