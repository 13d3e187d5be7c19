use super::state::AccentTheme;
use super::state::FormField;
use super::state::LogEntry;
use super::state::Story;
use super::state::StoryId;

#[derive(Debug, Clone)]
pub enum BoardAction {
    User(UserAction),
    Runtime(RuntimeAction),
}

#[derive(Debug, Clone)]
pub enum UserAction {
    FocusNextField,
    FocusPrevField,
    FocusField(FormField),
    TogglePane,

    DescriptionInput(char),
    DescriptionBackspace,
    DateInput(char),
    DateBackspace,
    CycleAssignee,
    CyclePriority,
    SubmitForm,

    // Cut/copy/paste on the description field are rejected outright.
    ClipboardCut,
    ClipboardCopy,
    ClipboardPaste(String),

    SelectNextCard,
    SelectPrevCard,
    CloseStory(StoryId),
    DeleteStory(StoryId),

    SetTheme(AccentTheme),
    CycleTheme,

    DismissAlert,
}

#[derive(Debug, Clone)]
pub enum RuntimeAction {
    HydrateBoard {
        stories: Vec<Story>,
        next_story_id: u64,
    },
    SetTheme(AccentTheme),
    AppendLog(LogEntry),
}
