use std::env;
use std::fs;
use std::path::PathBuf;

use story_core::actions::BoardAction;
use story_core::actions::RuntimeAction;
use story_core::persistence::board_from_persisted;
use story_core::persistence::BoardStore;
use story_core::persistence::LoadOutcome;
use story_core::reducer::reduce;
use story_core::state::AccentTheme;
use story_core::state::BoardState;
use story_core::state::LogEntry;
use story_core::state::LogLevel;
use story_core::state::LogSource;
use story_core::Config;

mod ui;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut data_dir = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" | "help" => {
                print_help();
                return Ok(());
            }
            "--version" | "-V" | "version" => {
                println!("storyboard {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--data-dir" => {
                let Some(value) = args.next() else {
                    return Err("--data-dir requires a path".into());
                };
                data_dir = Some(PathBuf::from(value));
            }
            other => {
                print_help();
                return Err(format!("unsupported argument: {other}").into());
            }
        }
    }

    let data_dir = match data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    let store = BoardStore::open(&data_dir)?;
    let config = load_config();

    // Persisted preference wins over the config default.
    let theme = store
        .load_theme()
        .as_deref()
        .and_then(AccentTheme::from_label)
        .or_else(|| {
            config
                .theme
                .default_accent
                .as_deref()
                .and_then(AccentTheme::from_label)
        })
        .unwrap_or_default();

    let mut state = BoardState::new(theme);

    let loaded = store.load_board();
    if loaded.outcome == LoadOutcome::Corrupt {
        reduce(
            &mut state,
            BoardAction::Runtime(RuntimeAction::AppendLog(LogEntry {
                seq: 0,
                level: LogLevel::Warn,
                source: LogSource::Store,
                message: "stored story list was unreadable, starting empty".to_string(),
            })),
        );
    }
    let (stories, next_story_id) = board_from_persisted(loaded.board);
    reduce(
        &mut state,
        BoardAction::Runtime(RuntimeAction::HydrateBoard {
            stories,
            next_story_id,
        }),
    );

    ui::run(state, store)
}

fn default_data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let Some(base) = dirs::data_dir() else {
        return Err("could not resolve a data directory; pass --data-dir PATH".into());
    };
    Ok(base.join("storyboard"))
}

fn load_config() -> Config {
    let Some(base) = dirs::config_dir() else {
        return Config::default();
    };
    let path = base.join("storyboard").join("storyboard.toml");
    match fs::read_to_string(path) {
        Ok(raw) => toml::from_str(&raw).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}

fn print_help() {
    println!("storyboard {}", env!("CARGO_PKG_VERSION"));
    println!("Usage:");
    println!("  storyboard [--data-dir PATH]");
    println!("  storyboard --help");
    println!("  storyboard --version");
}
