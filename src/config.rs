use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Validated game parameters, fixed for the lifetime of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    duration_secs: u32,
    carrot_count: u32,
    bug_count: u32,
}

impl GameConfig {
    pub fn new(duration_secs: u32, carrot_count: u32, bug_count: u32) -> Result<Self> {
        if duration_secs == 0 {
            return Err(Error::config_invalid("game duration must be at least 1 second"));
        }
        if carrot_count == 0 {
            return Err(Error::config_invalid("carrot count must be at least 1"));
        }
        Ok(Self {
            duration_secs,
            carrot_count,
            bug_count,
        })
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn carrot_count(&self) -> u32 {
        self.carrot_count
    }

    pub fn bug_count(&self) -> u32 {
        self.bug_count
    }
}

/// User preferences as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub duration_secs: u32,
    pub carrot_count: u32,
    pub bug_count: u32,
    pub muted: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration_secs: 5,
            carrot_count: 3,
            bug_count: 3,
            muted: false,
        }
    }
}

impl TryFrom<&Config> for GameConfig {
    type Error = Error;

    fn try_from(cfg: &Config) -> Result<Self> {
        GameConfig::new(cfg.duration_secs, cfg.carrot_count, cfg.bug_count)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Result<Config>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "karrot") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("karrot_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// A missing file means defaults; a broken one is an error.
    fn load(&self) -> Result<Config> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice::<Config>(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Config::default()),
            Err(err) => Err(err.into()),
        }
    }
}
