//! Domain service for the admin directory: listing tenant accounts and the
//! two state-changing operations (status toggle, session timer).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{AccountStatus, Profile};

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Profile {0} not found")]
    NotFound(String),

    /// Admin accounts are exempt from suspension and timers.
    #[error("Admin accounts cannot be modified")]
    AdminImmune,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for DirectoryError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for DirectoryError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Explicit query object for a directory fetch. The listing is pulled on
/// demand, never kept as ambient state.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryQuery {
    /// Case-insensitive substring match over email and company.
    pub search: Option<String>,

    pub status: Option<AccountStatus>,
}

impl DirectoryQuery {
    #[must_use]
    pub fn matches(&self, profile: &Profile) -> bool {
        let matches_search = self.search.as_deref().is_none_or(|term| {
            let term = term.to_lowercase();
            profile.email.to_lowercase().contains(&term)
                || profile
                    .company
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase().contains(&term))
        });
        let matches_status = self.status.is_none_or(|s| profile.status == s);
        matches_search && matches_status
    }
}

/// Headline counts over the whole directory (not the filtered listing).
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryStats {
    pub total: usize,
    pub active_subadmins: usize,
    pub suspended: usize,
}

/// One directory fetch: the filtered listing plus unfiltered stats.
#[derive(Debug, Clone, Serialize)]
pub struct DirectorySnapshot {
    pub profiles: Vec<Profile>,
    pub stats: DirectoryStats,
}

/// Domain service trait for admin directory operations.
#[async_trait::async_trait]
pub trait DirectoryService: Send + Sync {
    /// Fetch the directory. Filtering happens after the full list is read so
    /// the stats always describe the whole user base.
    async fn snapshot(&self, query: &DirectoryQuery) -> Result<DirectorySnapshot, DirectoryError>;

    /// Flip `active` <-> `suspended` on a tenant account.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::AdminImmune`] for admin targets and
    /// [`DirectoryError::Validation`] for disabled ones.
    async fn toggle_status(&self, id: &str) -> Result<Profile, DirectoryError>;

    /// Set or clear the session timer on a tenant account.
    ///
    /// `Some(minutes)` stores the limit and stamps the session start; `None`
    /// clears both fields. Always both-or-neither.
    async fn set_session_timer(
        &self,
        id: &str,
        minutes: Option<u32>,
    ) -> Result<Profile, DirectoryError>;
}
