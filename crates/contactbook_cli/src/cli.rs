use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "contactbook")]
#[command(about = "contactbook - manage contacts and calendar events from the terminal")]
#[command(version)]
pub struct Cli {
    /// SQLite file holding people and events
    #[arg(long, env = "CONTACTBOOK_DATA", default_value = "contactbook.sqlite3")]
    pub data: PathBuf,

    /// Absolute directory for rolling log files; file logging is off when unset
    #[arg(long, env = "CONTACTBOOK_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); defaults by build mode
    #[arg(long, env = "CONTACTBOOK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Theme offered to `switchtheme`; repeat to build the list
    #[arg(long = "theme", env = "CONTACTBOOK_THEMES", value_delimiter = ',')]
    pub themes: Vec<String>,
}

impl Cli {
    /// Themes in `switchtheme` order, falling back to the built-in list.
    pub fn theme_list(&self) -> Vec<String> {
        if self.themes.is_empty() {
            contactbook_core::DEFAULT_THEMES
                .iter()
                .map(|theme| theme.to_string())
                .collect()
        } else {
            self.themes.clone()
        }
    }
}
