use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::num::NonZeroU64;
use std::path::Path;

use crate::simulator::{Direction, Track, MAX_TRACK};

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub max_track: Track,
    pub head: Track,
    pub direction: Direction,
    pub frames: usize,
    pub quantum: NonZeroU64,
    pub log_level: LevelFilter,
}

impl Config {
    /// Read `config.json` from the working directory, if no file is found or
    /// it can't be parsed the defaults are used.
    pub fn load() -> Self {
        match env::current_dir() {
            Ok(mut path) => {
                path.push(CONFIG_FILE);
                Self::from_path(&path).unwrap_or_default()
            }
            Err(_) => Config::default(),
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let file = File::open(path).ok()?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).ok()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_track: MAX_TRACK,
            head: 53,
            direction: Direction::Up,
            frames: 3,
            quantum: NonZeroU64::MIN.saturating_add(1),
            log_level: LevelFilter::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{ "frames": 4, "direction": "down" }"#).unwrap();

        assert_eq!(config.frames, 4);
        assert_eq!(config.direction, Direction::Down);
        assert_eq!(config.max_track, 199);
        assert_eq!(config.quantum.get(), 2);
    }

    #[test]
    fn zero_quantum_is_not_a_valid_config() {
        assert!(serde_json::from_str::<Config>(r#"{ "quantum": 0 }"#).is_err());
    }

    #[test]
    fn missing_file_falls_back() {
        assert_eq!(Config::from_path(Path::new("does/not/exist.json")), None);
    }
}
