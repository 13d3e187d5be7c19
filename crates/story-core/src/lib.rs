pub mod actions;
pub mod persistence;
pub mod reducer;
pub mod state;

pub use actions::*;
pub use persistence::*;
pub use reducer::*;
pub use state::*;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Accent used when no preference has been persisted yet, by label
    /// ("ocean", "ember", "meadow", "orchid", "slate").
    pub default_accent: Option<String>,
}
