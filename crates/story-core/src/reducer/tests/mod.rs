use pretty_assertions::assert_eq;

pub(super) use super::reduce;
pub(super) use super::BoardEffect;
pub(super) use super::CLIPBOARD_BLOCKED_MESSAGE;
pub(super) use crate::actions::BoardAction;
pub(super) use crate::actions::RuntimeAction;
pub(super) use crate::actions::UserAction;
pub(super) use crate::state::counter_text;
pub(super) use crate::state::counter_warning;
pub(super) use crate::state::format_date;
pub(super) use crate::state::AccentTheme;
pub(super) use crate::state::Assignee;
pub(super) use crate::state::BoardOverlay;
pub(super) use crate::state::BoardState;
pub(super) use crate::state::FocusPane;
pub(super) use crate::state::FormField;
pub(super) use crate::state::Priority;
pub(super) use crate::state::Story;
pub(super) use crate::state::StoryId;
pub(super) use crate::state::StoryStatus;

mod character_counter;
mod form_validation;
mod story_lifecycle;

fn state() -> BoardState {
    BoardState::new(AccentTheme::default())
}

fn user(state: &mut BoardState, action: UserAction) -> Vec<BoardEffect> {
    reduce(state, BoardAction::User(action))
}

fn run_runtime(state: &mut BoardState, action: RuntimeAction) {
    let effects = reduce(state, BoardAction::Runtime(action));
    assert!(effects.is_empty());
}

fn type_description(state: &mut BoardState, text: &str) {
    user(state, UserAction::FocusField(FormField::Description));
    for ch in text.chars() {
        user(state, UserAction::DescriptionInput(ch));
    }
}

fn type_date(state: &mut BoardState, field: FormField, text: &str) {
    user(state, UserAction::FocusField(field));
    for ch in text.chars() {
        user(state, UserAction::DateInput(ch));
    }
}

/// Fills every field: sixty 'a's, Tom, High, 2024-01-03 .. 2024-01-10.
fn fill_valid_form(state: &mut BoardState) {
    type_description(state, &"a".repeat(60));
    user(state, UserAction::FocusField(FormField::AssignedTo));
    user(state, UserAction::CycleAssignee); // Edwin
    user(state, UserAction::CycleAssignee); // Tom
    type_date(state, FormField::FromDate, "2024-01-03");
    type_date(state, FormField::ToDate, "2024-01-10");
    user(state, UserAction::FocusField(FormField::Priority));
    user(state, UserAction::CyclePriority); // Low
    user(state, UserAction::CyclePriority); // Medium
    user(state, UserAction::CyclePriority); // High
}

fn submit(state: &mut BoardState) -> Vec<BoardEffect> {
    user(state, UserAction::SubmitForm)
}

fn add_story(state: &mut BoardState) -> StoryId {
    fill_valid_form(state);
    let effects = submit(state);
    assert_eq!(
        effects,
        vec![BoardEffect::PersistBoard, BoardEffect::RequestFrame]
    );
    state.stories.last().expect("story appended").id
}

fn alert_message(state: &BoardState) -> Option<&str> {
    match &state.overlay {
        BoardOverlay::Alert { message, .. } => Some(message.as_str()),
        BoardOverlay::None => None,
    }
}

fn alert_refocus(state: &BoardState) -> Option<FormField> {
    match &state.overlay {
        BoardOverlay::Alert { refocus, .. } => *refocus,
        BoardOverlay::None => None,
    }
}
