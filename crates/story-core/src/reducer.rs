use chrono::NaiveDate;

use super::actions::BoardAction;
use super::actions::RuntimeAction;
use super::actions::UserAction;
use super::state::Assignee;
use super::state::BoardOverlay;
use super::state::BoardState;
use super::state::FocusPane;
use super::state::FormField;
use super::state::FormState;
use super::state::LogEntry;
use super::state::LogLevel;
use super::state::LogSource;
use super::state::Priority;
use super::state::Story;
use super::state::StoryId;
use super::state::StoryStatus;
use super::state::DESCRIPTION_MAX;
use super::state::DESCRIPTION_MIN;
use super::state::DATE_BUFFER_MAX;

/// Side effects the shell performs after a reduction. The reducer itself
/// never touches the terminal or the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEffect {
    RequestFrame,
    PersistBoard,
    PersistTheme,
}

pub const CLIPBOARD_BLOCKED_MESSAGE: &str = "No cut, copy, paste allowed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationFailure {
    pub field: FormField,
    pub message: &'static str,
}

struct StoryDraft {
    description: String,
    assigned_to: Assignee,
    priority: Priority,
    from_date: NaiveDate,
    to_date: NaiveDate,
}

pub fn reduce(state: &mut BoardState, action: BoardAction) -> Vec<BoardEffect> {
    match action {
        BoardAction::User(user) => reduce_user(state, user),
        BoardAction::Runtime(runtime) => {
            reduce_runtime(state, runtime);
            Vec::new()
        }
    }
}

fn reduce_user(state: &mut BoardState, action: UserAction) -> Vec<BoardEffect> {
    // Alerts are blocking: everything except dismissal waits.
    if state.alert_active() && !matches!(action, UserAction::DismissAlert) {
        return Vec::new();
    }

    match action {
        UserAction::FocusNextField => {
            state.pane = FocusPane::Form;
            state.form.focus = Some(state.form.focused().next());
            vec![BoardEffect::RequestFrame]
        }
        UserAction::FocusPrevField => {
            state.pane = FocusPane::Form;
            state.form.focus = Some(state.form.focused().prev());
            vec![BoardEffect::RequestFrame]
        }
        UserAction::FocusField(field) => {
            state.pane = FocusPane::Form;
            state.form.focus = Some(field);
            vec![BoardEffect::RequestFrame]
        }
        UserAction::TogglePane => {
            state.pane = match state.pane {
                FocusPane::Form => {
                    state.clamp_selection();
                    FocusPane::Cards
                }
                FocusPane::Cards => FocusPane::Form,
            };
            vec![BoardEffect::RequestFrame]
        }
        UserAction::DescriptionInput(ch) => {
            if state.form.focused() != FormField::Description || ch.is_control() {
                return Vec::new();
            }
            // Input past the allowance is truncated, not errored.
            if state.form.description.chars().count() >= DESCRIPTION_MAX {
                return Vec::new();
            }
            state.form.description.push(ch);
            vec![BoardEffect::RequestFrame]
        }
        UserAction::DescriptionBackspace => {
            if state.form.focused() != FormField::Description {
                return Vec::new();
            }
            if state.form.description.pop().is_none() {
                return Vec::new();
            }
            vec![BoardEffect::RequestFrame]
        }
        UserAction::DateInput(ch) => {
            let field = state.form.focused();
            let Some(buffer) = date_buffer_mut(&mut state.form, field) else {
                return Vec::new();
            };
            if !(ch.is_ascii_digit() || ch == '-') || buffer.len() >= DATE_BUFFER_MAX {
                return Vec::new();
            }
            buffer.push(ch);
            vec![BoardEffect::RequestFrame]
        }
        UserAction::DateBackspace => {
            let field = state.form.focused();
            let Some(buffer) = date_buffer_mut(&mut state.form, field) else {
                return Vec::new();
            };
            if buffer.pop().is_none() {
                return Vec::new();
            }
            vec![BoardEffect::RequestFrame]
        }
        UserAction::CycleAssignee => {
            if state.form.focused() != FormField::AssignedTo {
                return Vec::new();
            }
            state.form.assigned_to = Some(match state.form.assigned_to {
                Some(current) => current.next(),
                None => Assignee::all()[0],
            });
            vec![BoardEffect::RequestFrame]
        }
        UserAction::CyclePriority => {
            if state.form.focused() != FormField::Priority {
                return Vec::new();
            }
            state.form.priority = Some(match state.form.priority {
                Some(current) => current.next(),
                None => Priority::all()[0],
            });
            vec![BoardEffect::RequestFrame]
        }
        UserAction::SubmitForm => submit_form(state),
        UserAction::ClipboardCut | UserAction::ClipboardCopy | UserAction::ClipboardPaste(_) => {
            if state.pane != FocusPane::Form || state.form.focused() != FormField::Description {
                return Vec::new();
            }
            state.overlay = BoardOverlay::Alert {
                message: CLIPBOARD_BLOCKED_MESSAGE.to_string(),
                refocus: Some(FormField::Description),
            };
            vec![BoardEffect::RequestFrame]
        }
        UserAction::SelectNextCard => {
            if state.stories.is_empty() {
                return Vec::new();
            }
            state.selected_card = Some(match state.selected_card {
                Some(idx) => (idx + 1) % state.stories.len(),
                None => 0,
            });
            vec![BoardEffect::RequestFrame]
        }
        UserAction::SelectPrevCard => {
            if state.stories.is_empty() {
                return Vec::new();
            }
            state.selected_card = Some(match state.selected_card {
                Some(0) | None => state.stories.len() - 1,
                Some(idx) => idx - 1,
            });
            vec![BoardEffect::RequestFrame]
        }
        UserAction::CloseStory(id) => {
            if let Some(idx) = state.story_index(id) {
                if state.stories[idx].status == StoryStatus::Open {
                    state.stories[idx].status = StoryStatus::Closed;
                    log_app(state, LogLevel::Info, format!("story #{} closed", id.0));
                }
            }
            // Close and delete always re-persist and redraw, even when
            // nothing matched.
            vec![BoardEffect::PersistBoard, BoardEffect::RequestFrame]
        }
        UserAction::DeleteStory(id) => {
            let before = state.stories.len();
            state.stories.retain(|story| story.id != id);
            if state.stories.len() != before {
                log_app(state, LogLevel::Info, format!("story #{} deleted", id.0));
            }
            state.clamp_selection();
            vec![BoardEffect::PersistBoard, BoardEffect::RequestFrame]
        }
        UserAction::SetTheme(theme) => {
            state.theme = theme;
            vec![BoardEffect::PersistTheme, BoardEffect::RequestFrame]
        }
        UserAction::CycleTheme => {
            state.theme = state.theme.next();
            vec![BoardEffect::PersistTheme, BoardEffect::RequestFrame]
        }
        UserAction::DismissAlert => {
            let refocus = match std::mem::replace(&mut state.overlay, BoardOverlay::None) {
                BoardOverlay::Alert { refocus, .. } => refocus,
                BoardOverlay::None => None,
            };
            if let Some(field) = refocus {
                state.pane = FocusPane::Form;
                state.form.focus = Some(field);
            }
            vec![BoardEffect::RequestFrame]
        }
    }
}

fn reduce_runtime(state: &mut BoardState, action: RuntimeAction) {
    match action {
        RuntimeAction::HydrateBoard {
            stories,
            next_story_id,
        } => {
            // Never hand out an id at or below one already on the board.
            let max_id = stories.iter().map(|story| story.id.0).max().unwrap_or(0);
            state.next_story_id = next_story_id.max(max_id.saturating_add(1));
            state.stories = stories;
            state.clamp_selection();
        }
        RuntimeAction::SetTheme(theme) => {
            state.theme = theme;
        }
        RuntimeAction::AppendLog(entry) => {
            state.logs.append(entry);
        }
    }
}

fn submit_form(state: &mut BoardState) -> Vec<BoardEffect> {
    let draft = match validate(&state.form) {
        Ok(draft) => draft,
        Err(failure) => {
            state.overlay = BoardOverlay::Alert {
                message: failure.message.to_string(),
                refocus: Some(failure.field),
            };
            return vec![BoardEffect::RequestFrame];
        }
    };

    let id = StoryId(state.next_story_id);
    state.next_story_id += 1;
    state.stories.push(Story {
        id,
        description: draft.description,
        assigned_to: draft.assigned_to,
        priority: draft.priority,
        from_date: draft.from_date,
        to_date: draft.to_date,
        status: StoryStatus::Open,
    });
    state.clamp_selection();
    state.form.clear();
    log_app(state, LogLevel::Info, format!("story #{} added", id.0));
    vec![BoardEffect::PersistBoard, BoardEffect::RequestFrame]
}

/// Checks run in a fixed order and stop at the first failure, so the user
/// is walked through the form top to bottom.
fn validate(form: &FormState) -> Result<StoryDraft, ValidationFailure> {
    if form.description.is_empty() {
        return Err(ValidationFailure {
            field: FormField::Description,
            message: "Please enter description",
        });
    }
    if form.description.trim().chars().count() < DESCRIPTION_MIN {
        return Err(ValidationFailure {
            field: FormField::Description,
            message: "Description should be at least 60 characters",
        });
    }
    let Some(assigned_to) = form.assigned_to else {
        return Err(ValidationFailure {
            field: FormField::AssignedTo,
            message: "Please select assigned to",
        });
    };
    if form.from_date.is_empty() {
        return Err(ValidationFailure {
            field: FormField::FromDate,
            message: "Please select from date",
        });
    }
    let Some(from_date) = form.from_date.parse() else {
        return Err(ValidationFailure {
            field: FormField::FromDate,
            message: "From date must be YYYY-MM-DD",
        });
    };
    if form.to_date.is_empty() {
        return Err(ValidationFailure {
            field: FormField::ToDate,
            message: "Please select to date",
        });
    }
    let Some(to_date) = form.to_date.parse() else {
        return Err(ValidationFailure {
            field: FormField::ToDate,
            message: "To date must be YYYY-MM-DD",
        });
    };
    let Some(priority) = form.priority else {
        return Err(ValidationFailure {
            field: FormField::Priority,
            message: "Please select priority",
        });
    };

    Ok(StoryDraft {
        description: form.description.clone(),
        assigned_to,
        priority,
        from_date,
        to_date,
    })
}

fn date_buffer_mut(form: &mut FormState, field: FormField) -> Option<&mut String> {
    match field {
        FormField::FromDate => Some(&mut form.from_date.buffer),
        FormField::ToDate => Some(&mut form.to_date.buffer),
        _ => None,
    }
}

fn log_app(state: &mut BoardState, level: LogLevel, message: String) {
    state.logs.append(LogEntry {
        seq: 0,
        level,
        source: LogSource::App,
        message,
    });
}

#[cfg(test)]
mod tests;
