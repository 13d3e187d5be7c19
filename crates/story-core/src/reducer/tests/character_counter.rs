use super::*;
use pretty_assertions::assert_eq;

#[test]
fn counter_tracks_the_remaining_allowance() {
    let mut state = state();
    type_description(&mut state, &"a".repeat(95));

    assert_eq!(counter_text(&state.form.description), "5 characters left");
    assert!(counter_warning(&state.form.description));
}

#[test]
fn warning_starts_below_ten_remaining() {
    let mut state = state();
    type_description(&mut state, &"a".repeat(90));
    assert!(!counter_warning(&state.form.description));

    user(&mut state, UserAction::DescriptionInput('a'));
    assert!(counter_warning(&state.form.description));
    assert_eq!(counter_text(&state.form.description), "9 characters left");
}

#[test]
fn input_past_the_maximum_is_dropped() {
    let mut state = state();
    type_description(&mut state, &"a".repeat(100));

    let effects = user(&mut state, UserAction::DescriptionInput('b'));

    assert!(effects.is_empty());
    assert_eq!(state.form.description.chars().count(), 100);
    assert_eq!(counter_text(&state.form.description), "0 characters left");
}

#[test]
fn backspace_restores_allowance() {
    let mut state = state();
    type_description(&mut state, "abc");

    user(&mut state, UserAction::DescriptionBackspace);

    assert_eq!(state.form.description, "ab");
    assert_eq!(counter_text(&state.form.description), "98 characters left");
}

#[test]
fn paste_into_the_description_is_blocked() {
    let mut state = state();
    type_description(&mut state, "abc");

    user(
        &mut state,
        UserAction::ClipboardPaste("pasted text".to_string()),
    );

    assert_eq!(alert_message(&state), Some(CLIPBOARD_BLOCKED_MESSAGE));
    assert_eq!(alert_refocus(&state), Some(FormField::Description));
    assert_eq!(state.form.description, "abc");
}

#[test]
fn cut_and_copy_are_blocked_too() {
    let mut state = state();
    type_description(&mut state, "abc");

    user(&mut state, UserAction::ClipboardCut);
    assert_eq!(alert_message(&state), Some(CLIPBOARD_BLOCKED_MESSAGE));
    user(&mut state, UserAction::DismissAlert);

    user(&mut state, UserAction::ClipboardCopy);
    assert_eq!(alert_message(&state), Some(CLIPBOARD_BLOCKED_MESSAGE));
    assert_eq!(state.form.description, "abc");
}

#[test]
fn clipboard_is_ignored_outside_the_description_field() {
    let mut state = state();
    user(&mut state, UserAction::FocusField(FormField::FromDate));

    let effects = user(&mut state, UserAction::ClipboardPaste("2024".to_string()));

    assert!(effects.is_empty());
    assert_eq!(alert_message(&state), None);
    assert!(state.form.from_date.is_empty());
}

#[test]
fn date_buffer_accepts_only_digits_and_dashes() {
    let mut state = state();
    user(&mut state, UserAction::FocusField(FormField::FromDate));

    for ch in "2024-01-03extra".chars() {
        user(&mut state, UserAction::DateInput(ch));
    }

    assert_eq!(state.form.from_date.buffer, "2024-01-03");
}
