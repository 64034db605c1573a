use super::*;

// =============================================================
// Modifiers
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.ctrl);
    assert!(!m.meta);
}

// =============================================================
// Button
// =============================================================

#[test]
fn button_from_dom_codes() {
    assert_eq!(Button::from_dom(0), Some(Button::Primary));
    assert_eq!(Button::from_dom(1), Some(Button::Middle));
    assert_eq!(Button::from_dom(2), Some(Button::Secondary));
    assert_eq!(Button::from_dom(3), None);
    assert_eq!(Button::from_dom(-1), None);
}

// =============================================================
// Key
// =============================================================

#[test]
fn key_equality() {
    assert_eq!(Key("Escape".into()), Key("Escape".into()));
    assert_ne!(Key("a".into()), Key("A".into()));
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
}

#[test]
fn panning_carries_last_screen() {
    let state = InputState::Panning { last_screen: Point::new(3.0, 4.0) };
    let InputState::Panning { last_screen } = state else {
        unreachable!("constructed as panning");
    };
    assert_eq!(last_screen, Point::new(3.0, 4.0));
}
