//! JSON-file Save Store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, warn};

use gunner_core::profile::{Profile, ProfileError, SaveStore};

const PROFILE_FILE: &str = "profile.json";

/// Profile persisted as pretty-printed JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/gunner/profile.json` on the current platform.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gunner").map(|dirs| dirs.data_dir().join(PROFILE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the profile, surfacing every failure.
    pub fn read(&self) -> Result<Profile, ProfileError> {
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Delete the save file. Missing files are not an error.
    pub fn delete(&self) -> Result<(), ProfileError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl SaveStore for JsonFileStore {
    fn load(&self) -> Profile {
        match self.read() {
            Ok(profile) => profile,
            Err(ProfileError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no profile yet, starting fresh");
                Profile::default()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable profile, using defaults");
                Profile::default()
            }
        }
    }

    fn save(&mut self, profile: &Profile) -> Result<(), ProfileError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "profile saved");
        Ok(())
    }
}
