use super::*;

#[test]
fn starts_closed_on_first_slide() {
    let nav = NavigationController::new(SLIDES);
    assert_eq!(nav.current(), 0);
    assert_eq!(nav.direction(), Direction::Still);
    assert!(!nav.overlay_open());
}

#[test]
fn jump_to_every_index() {
    let mut nav = NavigationController::new(SLIDES);
    for i in 0..SLIDES {
        nav.jump_to(i);
        assert_eq!(nav.current(), i);
    }
    for i in (0..SLIDES).rev() {
        nav.jump_to(i);
        assert_eq!(nav.current(), i);
    }
}

#[test]
fn next_saturates_at_last_slide() {
    let mut nav = at(SLIDES, SLIDES - 1);
    assert!(!nav.next());
    assert_eq!(nav.current(), SLIDES - 1);
}

#[test]
fn previous_saturates_at_first_slide() {
    let mut nav = NavigationController::new(SLIDES);
    assert!(!nav.previous());
    assert_eq!(nav.current(), 0);
}

#[test]
fn next_sets_forward_direction() {
    for k in 0..SLIDES - 1 {
        let mut nav = at(SLIDES, k);
        nav.previous();
        nav.jump_to(k);
        assert!(nav.next());
        assert_eq!(nav.direction(), Direction::Forward);
        assert_eq!(nav.current(), k + 1);
    }
}

#[test]
fn previous_sets_backward_direction() {
    for k in 1..SLIDES {
        let mut nav = at(SLIDES, k);
        assert!(nav.previous());
        assert_eq!(nav.direction(), Direction::Backward);
        assert_eq!(nav.current(), k - 1);
    }
}

#[test]
fn saturated_next_keeps_previous_direction() {
    let mut nav = at(SLIDES, SLIDES - 1);
    nav.previous();
    nav.next();
    nav.next();
    assert_eq!(nav.direction(), Direction::Forward);
}

#[test]
fn jump_direction_follows_target() {
    let mut nav = at(SLIDES, 5);
    nav.jump_to(9);
    assert_eq!(nav.direction(), Direction::Forward);
    nav.jump_to(2);
    assert_eq!(nav.direction(), Direction::Backward);
    assert!(!nav.jump_to(2));
    assert_eq!(nav.direction(), Direction::Still);
}

#[test]
fn first_and_last() {
    let mut nav = at(SLIDES, 4);
    assert!(nav.last());
    assert!(nav.is_last());
    assert!(nav.first());
    assert!(nav.is_first());
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "out of range")]
fn jump_out_of_range_panics_in_debug() {
    let mut nav = NavigationController::new(3);
    nav.jump_to(3);
}

#[test]
fn overlay_toggle_and_close() {
    let mut nav = NavigationController::new(SLIDES);
    nav.toggle_overlay();
    assert!(nav.overlay_open());
    nav.toggle_overlay();
    assert!(!nav.overlay_open());
    nav.open_overlay();
    nav.close_overlay();
    assert!(!nav.overlay_open());
    nav.close_overlay();
    assert!(!nav.overlay_open());
}

#[test]
fn overlay_selection_jumps_and_closes() {
    let mut nav = at(SLIDES, 3);
    nav.open_overlay();
    assert!(nav.select_from_overlay(8));
    assert_eq!(nav.current(), 8);
    assert_eq!(nav.direction(), Direction::Forward);
    assert!(!nav.overlay_open());
}

#[test]
fn shrinking_deck_clamps_current() {
    let mut nav = at(SLIDES, 10);
    nav.set_len(4);
    assert_eq!(nav.current(), 3);
    assert_eq!(nav.direction(), Direction::Still);
    assert!(nav.is_last());
}

#[test]
fn growing_deck_keeps_current() {
    let mut nav = at(4, 2);
    nav.set_len(14);
    assert_eq!(nav.current(), 2);
    assert!(!nav.is_last());
}

#[test]
fn single_slide_deck_never_moves() {
    let mut nav = NavigationController::new(1);
    assert!(nav.is_first() && nav.is_last());
    assert!(!nav.next());
    assert!(!nav.previous());
    assert_eq!(nav.current(), 0);
}
