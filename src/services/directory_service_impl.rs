//! `SeaORM` implementation of the `DirectoryService` trait.

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::info;

use crate::db::Store;
use crate::domain::NotificationEvent;
use crate::models::{AccountStatus, Profile, Role};
use crate::services::directory_service::{
    DirectoryError, DirectoryQuery, DirectoryService, DirectorySnapshot, DirectoryStats,
};

pub struct SeaOrmDirectoryService {
    store: Store,
    events: broadcast::Sender<NotificationEvent>,
}

impl SeaOrmDirectoryService {
    #[must_use]
    pub const fn new(store: Store, events: broadcast::Sender<NotificationEvent>) -> Self {
        Self { store, events }
    }

    async fn load_tenant(&self, id: &str) -> Result<Profile, DirectoryError> {
        let profile = self
            .store
            .get_profile(id)
            .await?
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))?;

        if profile.role == Role::Admin {
            return Err(DirectoryError::AdminImmune);
        }

        Ok(profile)
    }
}

#[async_trait]
impl DirectoryService for SeaOrmDirectoryService {
    async fn snapshot(&self, query: &DirectoryQuery) -> Result<DirectorySnapshot, DirectoryError> {
        let all = self.store.list_profiles().await?;

        let stats = DirectoryStats {
            total: all.len(),
            active_subadmins: all
                .iter()
                .filter(|p| p.status == AccountStatus::Active && p.role != Role::Admin)
                .count(),
            suspended: all
                .iter()
                .filter(|p| p.status == AccountStatus::Suspended)
                .count(),
        };

        let profiles = all.into_iter().filter(|p| query.matches(p)).collect();

        Ok(DirectorySnapshot { profiles, stats })
    }

    async fn toggle_status(&self, id: &str) -> Result<Profile, DirectoryError> {
        let profile = self.load_tenant(id).await?;

        let next = match profile.status {
            AccountStatus::Active => AccountStatus::Suspended,
            AccountStatus::Suspended => AccountStatus::Active,
            AccountStatus::Disabled => {
                return Err(DirectoryError::Validation(
                    "Disabled accounts cannot be toggled".to_string(),
                ));
            }
        };

        let updated = self.store.set_profile_status(id, next).await?;

        info!(profile_id = id, status = next.as_str(), "account status changed");
        let _ = self.events.send(NotificationEvent::ProfileStatusChanged {
            profile_id: id.to_string(),
            status: next.as_str().to_string(),
        });

        Ok(updated)
    }

    async fn set_session_timer(
        &self,
        id: &str,
        minutes: Option<u32>,
    ) -> Result<Profile, DirectoryError> {
        if minutes == Some(0) {
            return Err(DirectoryError::Validation(
                "Session timeout must be at least 1 minute".to_string(),
            ));
        }

        // Existence and role checks up front; the write itself is a single
        // row update covering both timer fields.
        self.load_tenant(id).await?;

        let updated = self.store.set_profile_session_timer(id, minutes).await?;

        match minutes {
            Some(m) => {
                info!(profile_id = id, minutes = m, "session timer set");
                let _ = self.events.send(NotificationEvent::SessionTimerSet {
                    profile_id: id.to_string(),
                    minutes: m,
                });
            }
            None => {
                info!(profile_id = id, "session timer cleared");
                let _ = self.events.send(NotificationEvent::SessionTimerCleared {
                    profile_id: id.to_string(),
                });
            }
        }

        Ok(updated)
    }
}
