use super::*;
use pretty_assertions::assert_eq;

#[test]
fn validation_walks_the_form_in_fixed_order() {
    let mut state = state();

    submit(&mut state);
    assert_eq!(alert_message(&state), Some("Please enter description"));
    assert_eq!(alert_refocus(&state), Some(FormField::Description));

    user(&mut state, UserAction::DismissAlert);
    type_description(&mut state, &"a".repeat(60));
    submit(&mut state);
    assert_eq!(alert_message(&state), Some("Please select assigned to"));
    assert_eq!(alert_refocus(&state), Some(FormField::AssignedTo));

    user(&mut state, UserAction::DismissAlert);
    user(&mut state, UserAction::CycleAssignee);
    submit(&mut state);
    assert_eq!(alert_message(&state), Some("Please select from date"));
    assert_eq!(alert_refocus(&state), Some(FormField::FromDate));

    user(&mut state, UserAction::DismissAlert);
    type_date(&mut state, FormField::FromDate, "2024-01-03");
    submit(&mut state);
    assert_eq!(alert_message(&state), Some("Please select to date"));
    assert_eq!(alert_refocus(&state), Some(FormField::ToDate));

    user(&mut state, UserAction::DismissAlert);
    type_date(&mut state, FormField::ToDate, "2024-01-10");
    submit(&mut state);
    assert_eq!(alert_message(&state), Some("Please select priority"));
    assert_eq!(alert_refocus(&state), Some(FormField::Priority));

    user(&mut state, UserAction::DismissAlert);
    user(&mut state, UserAction::CyclePriority);
    let effects = submit(&mut state);
    assert_eq!(alert_message(&state), None);
    assert_eq!(
        effects,
        vec![BoardEffect::PersistBoard, BoardEffect::RequestFrame]
    );
    assert_eq!(state.stories.len(), 1);
}

#[test]
fn short_description_is_rejected_without_persisting() {
    let mut state = state();
    type_description(&mut state, &"a".repeat(59));

    let effects = submit(&mut state);

    assert_eq!(
        alert_message(&state),
        Some("Description should be at least 60 characters")
    );
    assert_eq!(effects, vec![BoardEffect::RequestFrame]);
    assert!(state.stories.is_empty());
}

#[test]
fn trimmed_length_decides_the_minimum() {
    let mut state = state();
    // 59 letters padded with whitespace trims back under the minimum.
    type_description(&mut state, &format!(" {} ", "a".repeat(59)));

    submit(&mut state);

    assert_eq!(
        alert_message(&state),
        Some("Description should be at least 60 characters")
    );
    assert!(state.stories.is_empty());
}

#[test]
fn malformed_date_buffer_is_reported_at_the_date_step() {
    let mut state = state();
    type_description(&mut state, &"a".repeat(60));
    user(&mut state, UserAction::CycleAssignee);
    type_date(&mut state, FormField::FromDate, "2024-13-99");

    submit(&mut state);

    assert_eq!(alert_message(&state), Some("From date must be YYYY-MM-DD"));
    assert_eq!(alert_refocus(&state), Some(FormField::FromDate));
    assert!(state.stories.is_empty());
}

#[test]
fn valid_submission_appends_one_open_story() {
    let mut state = state();
    fill_valid_form(&mut state);

    let effects = submit(&mut state);

    assert_eq!(
        effects,
        vec![BoardEffect::PersistBoard, BoardEffect::RequestFrame]
    );
    assert_eq!(state.stories.len(), 1);
    let story = &state.stories[0];
    assert_eq!(story.id, StoryId(1));
    assert_eq!(story.status, StoryStatus::Open);
    assert_eq!(story.description, "a".repeat(60));
    assert_eq!(story.assigned_to, Assignee::Tom);
    assert_eq!(story.priority, Priority::High);
    assert_eq!(format_date(story.from_date), "3rd Jan, 2024");
    assert_eq!(format_date(story.to_date), "10th Jan, 2024");
}

#[test]
fn successful_submission_clears_every_field() {
    let mut state = state();
    add_story(&mut state);

    assert_eq!(state.form.description, "");
    assert_eq!(state.form.assigned_to, None);
    assert_eq!(state.form.priority, None);
    assert!(state.form.from_date.is_empty());
    assert!(state.form.to_date.is_empty());
    assert_eq!(state.form.focus, Some(FormField::Description));
}

#[test]
fn alert_blocks_input_until_dismissed() {
    let mut state = state();
    submit(&mut state);
    assert!(state.alert_active());

    let effects = user(&mut state, UserAction::DescriptionInput('x'));
    assert!(effects.is_empty());
    assert_eq!(state.form.description, "");

    user(&mut state, UserAction::DismissAlert);
    assert!(!state.alert_active());
    assert_eq!(state.pane, FocusPane::Form);
    assert_eq!(state.form.focus, Some(FormField::Description));

    user(&mut state, UserAction::DescriptionInput('x'));
    assert_eq!(state.form.description, "x");
}
