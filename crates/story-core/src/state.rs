use std::collections::VecDeque;

use chrono::Datelike;
use chrono::NaiveDate;

/// Monotonic story identifier. Ids are allocated from
/// `BoardState::next_story_id` and never reused, including after deletions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StoryId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn all() -> &'static [Priority] {
        &[Self::Low, Self::Medium, Self::High]
    }

    pub fn next(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }
}

/// Fixed roster of people a story can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignee {
    Edwin,
    Tom,
    Carl,
    Jerome,
    Carmelo,
}

impl Assignee {
    pub fn label(self) -> &'static str {
        match self {
            Self::Edwin => "Edwin",
            Self::Tom => "Tom",
            Self::Carl => "Carl",
            Self::Jerome => "Jerome",
            Self::Carmelo => "Carmelo",
        }
    }

    pub fn all() -> &'static [Assignee] {
        &[Self::Edwin, Self::Tom, Self::Carl, Self::Jerome, Self::Carmelo]
    }

    pub fn next(self) -> Self {
        match self {
            Self::Edwin => Self::Tom,
            Self::Tom => Self::Carl,
            Self::Carl => Self::Jerome,
            Self::Jerome => Self::Carmelo,
            Self::Carmelo => Self::Edwin,
        }
    }
}

/// One-way lifecycle: every story starts Open and can only move to Closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryStatus {
    Open,
    Closed,
}

impl StoryStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    pub id: StoryId,
    pub description: String,
    pub assigned_to: Assignee,
    pub priority: Priority,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub status: StoryStatus,
}

pub const DESCRIPTION_MAX: usize = 100;
pub const DESCRIPTION_WARN: usize = 90;
pub const DESCRIPTION_MIN: usize = 60;

pub const DATE_BUFFER_MAX: usize = 10;
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

pub fn remaining_chars(description: &str) -> usize {
    DESCRIPTION_MAX.saturating_sub(description.chars().count())
}

pub fn counter_text(description: &str) -> String {
    format!("{} characters left", remaining_chars(description))
}

/// Warning style kicks in once fewer than 10 characters remain.
pub fn counter_warning(description: &str) -> bool {
    description.chars().count() > DESCRIPTION_WARN
}

pub fn day_suffix(day: u32) -> &'static str {
    if (11..=13).contains(&day) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Ordinal-day rendering used on cards, e.g. "3rd Jan, 2024".
pub fn format_date(date: NaiveDate) -> String {
    let day = date.day();
    format!(
        "{day}{} {}, {}",
        day_suffix(day),
        month_abbrev(date.month()),
        date.year()
    )
}

fn month_abbrev(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        _ => "Dec",
    }
}

/// Form fields in the order validation walks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Description,
    AssignedTo,
    FromDate,
    ToDate,
    Priority,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Description => "Description",
            Self::AssignedTo => "Assigned to",
            Self::FromDate => "From date",
            Self::ToDate => "To date",
            Self::Priority => "Priority",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Description => Self::AssignedTo,
            Self::AssignedTo => Self::FromDate,
            Self::FromDate => Self::ToDate,
            Self::ToDate => Self::Priority,
            Self::Priority => Self::Description,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Description => Self::Priority,
            Self::AssignedTo => Self::Description,
            Self::FromDate => Self::AssignedTo,
            Self::ToDate => Self::FromDate,
            Self::Priority => Self::ToDate,
        }
    }
}

/// Date fields are edited as raw `YYYY-MM-DD` buffers and parsed on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateField {
    pub buffer: String,
}

impl DateField {
    pub fn is_empty(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    pub fn parse(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.buffer.trim(), DATE_INPUT_FORMAT).ok()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub description: String,
    pub assigned_to: Option<Assignee>,
    pub priority: Option<Priority>,
    pub from_date: DateField,
    pub to_date: DateField,
    pub focus: Option<FormField>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            focus: Some(FormField::Description),
            ..Self::default()
        }
    }

    pub fn focused(&self) -> FormField {
        self.focus.unwrap_or(FormField::Description)
    }

    pub fn clear(&mut self) {
        self.description.clear();
        self.assigned_to = None;
        self.priority = None;
        self.from_date.clear();
        self.to_date.clear();
        self.focus = Some(FormField::Description);
    }
}

/// Which half of the screen receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Form,
    Cards,
}

/// Blocking overlays. While an alert is up, every other input is held off
/// until the user dismisses it; dismissal refocuses the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardOverlay {
    None,
    Alert {
        message: String,
        refocus: Option<FormField>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccentTheme {
    Ocean,
    Ember,
    Meadow,
    Orchid,
    Slate,
}

impl AccentTheme {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ocean => "ocean",
            Self::Ember => "ember",
            Self::Meadow => "meadow",
            Self::Orchid => "orchid",
            Self::Slate => "slate",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "ocean" => Some(Self::Ocean),
            "ember" => Some(Self::Ember),
            "meadow" => Some(Self::Meadow),
            "orchid" => Some(Self::Orchid),
            "slate" => Some(Self::Slate),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Ocean => Self::Ember,
            Self::Ember => Self::Meadow,
            Self::Meadow => Self::Orchid,
            Self::Orchid => Self::Slate,
            Self::Slate => Self::Ocean,
        }
    }
}

impl Default for AccentTheme {
    fn default() -> Self {
        Self::Ocean
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSource {
    App,
    Store,
    Ui,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub seq: u64,
    pub level: LogLevel,
    pub source: LogSource,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct LogBuffer {
    cap: usize,
    next_seq: u64,
    buf: VecDeque<LogEntry>,
}

impl LogBuffer {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            next_seq: 1,
            buf: VecDeque::with_capacity(cap),
        }
    }

    pub fn append(&mut self, mut entry: LogEntry) {
        entry.seq = self.next_seq;
        self.next_seq += 1;

        if self.buf.len() == self.cap {
            self.buf.pop_front();
        }
        self.buf.push_back(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.buf.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.buf.back()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct BoardState {
    pub stories: Vec<Story>,
    pub next_story_id: u64,
    pub form: FormState,
    pub pane: FocusPane,
    pub selected_card: Option<usize>,
    pub overlay: BoardOverlay,
    pub theme: AccentTheme,
    pub logs: LogBuffer,
}

impl BoardState {
    pub fn new(theme: AccentTheme) -> Self {
        Self {
            stories: Vec::new(),
            next_story_id: 1,
            form: FormState::new(),
            pane: FocusPane::Form,
            selected_card: None,
            overlay: BoardOverlay::None,
            theme,
            logs: LogBuffer::new(200),
        }
    }

    pub fn story_index(&self, id: StoryId) -> Option<usize> {
        self.stories.iter().position(|story| story.id == id)
    }

    pub fn selected_story(&self) -> Option<&Story> {
        self.selected_card.and_then(|idx| self.stories.get(idx))
    }

    pub fn alert_active(&self) -> bool {
        matches!(self.overlay, BoardOverlay::Alert { .. })
    }

    /// Keeps the card cursor inside the list after inserts and removals.
    pub fn clamp_selection(&mut self) {
        self.selected_card = match (self.selected_card, self.stories.len()) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(idx), len) => Some(idx.min(len - 1)),
        };
    }
}
