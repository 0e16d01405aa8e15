//! Configuration management.
//!
//! TOML settings in logical sections, written atomically (temp file, then
//! rename). A single section can be rewritten without touching the rest.
//!
//! # Example
//!
//! ```no_run
//! use cutlist_core::config::{ConfigManager, ConfigSection};
//!
//! let mut config = ConfigManager::new(".config/cutlist.toml");
//! config.load_or_create().unwrap();
//!
//! config.settings_mut().planner.allow_open_last = false;
//! config.update_section(ConfigSection::Planner).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ChapterSettings, ConfigSection, CutterSettings, LoggingSettings, PlannerSettings, Settings,
};
