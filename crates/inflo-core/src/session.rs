//! Session-scoped persistence for the current campaign id.
//!
//! One small JSON file holds the single `currentCampaignId` key so that
//! separate CLI invocations in the same working session share the campaign.
//! `session clear` (or deleting the file) ends the session.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Key under which the campaign id is stored.
pub const SESSION_CAMPAIGN_KEY: &str = "currentCampaignId";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "currentCampaignId")]
    pub campaign_id: String,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored record. A missing file is an empty session.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SessionIo`] if the file exists but cannot be read,
    /// or [`CoreError::SessionFormat`] if it is not a valid record.
    pub fn load(&self) -> Result<Option<SessionRecord>, CoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| CoreError::SessionFormat {
                path: self.path.display().to_string(),
                source,
            })
    }

    /// Best-effort read of the campaign id. An unreadable or corrupt session
    /// file is logged and treated as empty.
    #[must_use]
    pub fn campaign_id(&self) -> Option<String> {
        match self.load() {
            Ok(record) => record.map(|r| r.campaign_id),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable session store");
                None
            }
        }
    }

    /// Persists `campaign_id` as the current campaign.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SessionIo`] if the parent directory cannot be
    /// created or the file cannot be written.
    pub fn set_campaign_id(&self, campaign_id: &str) -> Result<SessionRecord, CoreError> {
        let record = SessionRecord {
            campaign_id: campaign_id.to_string(),
            saved_at: Utc::now(),
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let body = serde_json::to_string_pretty(&record).map_err(|source| {
            CoreError::SessionFormat {
                path: self.path.display().to_string(),
                source,
            }
        })?;
        std::fs::write(&self.path, body).map_err(|e| self.io_error(e))?;
        Ok(record)
    }

    /// Removes the session file. Clearing an empty session is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SessionIo`] if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), CoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> CoreError {
        CoreError::SessionIo {
            path: self.path.display().to_string(),
            source,
        }
    }
}
