//! Session management module.
//!
//! The session holds the signed-in user. Forms that act on the user's behalf
//! receive it explicitly; persisting it is an explicit `save`/`load` at the
//! application boundary, never a side effect of signing in.

mod error;

pub use error::SessionError;

use crate::error::AppError;
use fake::Dummy;
use log::*;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "session.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/sprint-forms";

/// Defines user data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

/// Oversees the signed-in user and the session file.
///
#[derive(Clone, Debug, Default)]
pub struct Session {
    user: Option<User>,
    file_path: Option<PathBuf>,
}

/// Define specification for session file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default)]
    pub user: Option<User>,
}

impl Session {
    /// Return a new signed-out session with no file.
    ///
    pub fn new() -> Session {
        Session::default()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn sign_in(&mut self, user: User) -> &mut Self {
        info!("Signed in as '{}' (ID: {}).", user.name, user.id);
        self.user = Some(user);
        self
    }

    pub fn sign_out(&mut self) -> &mut Self {
        if let Some(user) = self.user.take() {
            info!("Signed out '{}'.", user.name);
        }
        self
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Load the session from disk using the custom directory if provided,
    /// creating the directory when missing. A missing file leaves the
    /// session signed out.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Session::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| SessionError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.as_ref().ok_or(SessionError::FilePathNotSet)?;

        if file_path.exists() {
            debug!("Loading session from {}...", file_path.display());
            let contents = fs::read_to_string(file_path).map_err(|e| SessionError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            let data: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| SessionError::DeserializationFailed(e.to_string()))?;
            self.user = data.user;
        } else {
            debug!("No session file at {}, starting signed out.", file_path.display());
            self.user = None;
        }

        Ok(())
    }

    /// Serialize the session and write it to disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(SessionError::FilePathNotSet)?;
        let data = FileSpec {
            user: self.user.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| SessionError::SerializationFailed(e.to_string()))?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| SessionError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| SessionError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| SessionError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| SessionError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        debug!("Saved session to {}.", file_path.display());
        Ok(())
    }

    /// Returns the path buffer for the default session directory or an error
    /// if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(Path::new(DEFAULT_DIRECTORY_PATH))),
            None => Err(SessionError::HomeDirectoryNotFound.into()),
        }
    }
}
