use std::{env, path::PathBuf, time::Duration};

use dotenvy;
use log::warn;

use maze::constants::OUTPUT_FILE;

pub const INPUT_VAR: &str = "MAZE_INPUT";
pub const OUTPUT_VAR: &str = "MAZE_OUTPUT";
pub const RENDER_DELAY_VAR: &str = "MAZE_RENDER_DELAY_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: Option<String>,
    pub output: PathBuf,
    pub render_delay: Option<Duration>, // Live rendering is off unless this is set.
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            output: PathBuf::from(OUTPUT_FILE),
            render_delay: None,
        }
    }
}

impl Config {
    /// Reads settings from the environment, after loading `.env` if there is one.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let input = lookup(INPUT_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let output = lookup(OUTPUT_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.output);

        let render_delay = lookup(RENDER_DELAY_VAR).and_then(|value| {
            match value.trim().parse::<u64>() {
                Ok(millis) => Some(Duration::from_millis(millis)),
                Err(_) => {
                    warn!(
                        "ignoring {}={:?}: expected a whole number of milliseconds",
                        RENDER_DELAY_VAR, value
                    );
                    None
                }
            }
        });

        Self {
            input,
            output,
            render_delay,
        }
    }
}
