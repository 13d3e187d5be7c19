use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use super::state::Assignee;
use super::state::Priority;
use super::state::Story;
use super::state::StoryId;
use super::state::StoryStatus;

pub const BOARD_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistedStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistedPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistedAssignee {
    Edwin,
    Tom,
    Carl,
    Jerome,
    Carmelo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedStory {
    pub id: u64,
    pub description: String,
    pub assigned_to: PersistedAssignee,
    pub priority: PersistedPriority,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub status: PersistedStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedBoard {
    pub version: u8,
    pub next_story_id: u64,
    pub stories: Vec<PersistedStory>,
}

impl Default for PersistedBoard {
    fn default() -> Self {
        Self {
            version: BOARD_SCHEMA_VERSION,
            next_story_id: 1,
            stories: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedTheme {
    pub accent: String,
}

/// How a load went. Missing and corrupt data both hand back an empty
/// default so startup never fails on bad state, but the caller can tell
/// the cases apart and log them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Missing,
    Corrupt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedBoard {
    pub board: PersistedBoard,
    pub outcome: LoadOutcome,
}

/// Persistence boundary: one file for the whole board, one for the theme
/// preference. Every save rewrites the file in full; there are no partial
/// updates.
#[derive(Debug)]
pub struct BoardStore {
    board_path: PathBuf,
    theme_path: PathBuf,
}

impl BoardStore {
    pub fn open(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            board_path: dir.join("stories.json"),
            theme_path: dir.join("theme.json"),
        })
    }

    pub fn board_path(&self) -> &Path {
        self.board_path.as_path()
    }

    pub fn load_board(&self) -> LoadedBoard {
        match fs::read(&self.board_path) {
            Ok(bytes) => match serde_json::from_slice::<PersistedBoard>(&bytes) {
                Ok(board) => LoadedBoard {
                    board,
                    outcome: LoadOutcome::Loaded,
                },
                Err(_) => LoadedBoard {
                    board: PersistedBoard::default(),
                    outcome: LoadOutcome::Corrupt,
                },
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => LoadedBoard {
                board: PersistedBoard::default(),
                outcome: LoadOutcome::Missing,
            },
            Err(_) => LoadedBoard {
                board: PersistedBoard::default(),
                outcome: LoadOutcome::Corrupt,
            },
        }
    }

    pub fn save_board(&self, board: &PersistedBoard) -> io::Result<()> {
        let encoded = serde_json::to_vec_pretty(board)
            .map_err(|err| io::Error::other(format!("serialize board: {err}")))?;
        write_replacing(&self.board_path, &encoded)
    }

    pub fn load_theme(&self) -> Option<String> {
        let bytes = fs::read(&self.theme_path).ok()?;
        let theme = serde_json::from_slice::<PersistedTheme>(&bytes).ok()?;
        Some(theme.accent)
    }

    pub fn save_theme(&self, accent: &str) -> io::Result<()> {
        let theme = PersistedTheme {
            accent: accent.to_string(),
        };
        let encoded = serde_json::to_vec(&theme)
            .map_err(|err| io::Error::other(format!("serialize theme: {err}")))?;
        write_replacing(&self.theme_path, &encoded)
    }
}

// A crashed write must never leave a half-written file where the old state
// was, so writes land in a sibling temp file and rename over the target.
fn write_replacing(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}

pub fn board_to_persisted(stories: &[Story], next_story_id: u64) -> PersistedBoard {
    PersistedBoard {
        version: BOARD_SCHEMA_VERSION,
        next_story_id,
        stories: stories.iter().map(PersistedStory::from).collect(),
    }
}

pub fn board_from_persisted(board: PersistedBoard) -> (Vec<Story>, u64) {
    let stories = board.stories.into_iter().map(Story::from).collect();
    (stories, board.next_story_id)
}

impl From<&Story> for PersistedStory {
    fn from(story: &Story) -> Self {
        Self {
            id: story.id.0,
            description: story.description.clone(),
            assigned_to: match story.assigned_to {
                Assignee::Edwin => PersistedAssignee::Edwin,
                Assignee::Tom => PersistedAssignee::Tom,
                Assignee::Carl => PersistedAssignee::Carl,
                Assignee::Jerome => PersistedAssignee::Jerome,
                Assignee::Carmelo => PersistedAssignee::Carmelo,
            },
            priority: match story.priority {
                Priority::Low => PersistedPriority::Low,
                Priority::Medium => PersistedPriority::Medium,
                Priority::High => PersistedPriority::High,
            },
            from_date: story.from_date,
            to_date: story.to_date,
            status: match story.status {
                StoryStatus::Open => PersistedStatus::Open,
                StoryStatus::Closed => PersistedStatus::Closed,
            },
        }
    }
}

impl From<PersistedStory> for Story {
    fn from(story: PersistedStory) -> Self {
        Self {
            id: StoryId(story.id),
            description: story.description,
            assigned_to: match story.assigned_to {
                PersistedAssignee::Edwin => Assignee::Edwin,
                PersistedAssignee::Tom => Assignee::Tom,
                PersistedAssignee::Carl => Assignee::Carl,
                PersistedAssignee::Jerome => Assignee::Jerome,
                PersistedAssignee::Carmelo => Assignee::Carmelo,
            },
            priority: match story.priority {
                PersistedPriority::Low => Priority::Low,
                PersistedPriority::Medium => Priority::Medium,
                PersistedPriority::High => Priority::High,
            },
            from_date: story.from_date,
            to_date: story.to_date,
            status: match story.status {
                PersistedStatus::Open => StoryStatus::Open,
                PersistedStatus::Closed => StoryStatus::Closed,
            },
        }
    }
}
