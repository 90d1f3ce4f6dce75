use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tokio::task;

use crate::config::SecurityConfig;
use crate::entities::profiles;
use crate::models::{AccountStatus, Plan, Profile, Role, SignupDefaults};

impl TryFrom<profiles::Model> for Profile {
    type Error = anyhow::Error;

    fn try_from(model: profiles::Model) -> Result<Self> {
        let role = Role::parse(&model.role)
            .with_context(|| format!("Unknown role '{}' on profile {}", model.role, model.id))?;
        let status = AccountStatus::parse(&model.status).with_context(|| {
            format!("Unknown status '{}' on profile {}", model.status, model.id)
        })?;
        let plan = Plan::parse(&model.plan)
            .with_context(|| format!("Unknown plan '{}' on profile {}", model.plan, model.id))?;
        let session_timeout = model
            .session_timeout
            .map(u32::try_from)
            .transpose()
            .with_context(|| format!("Negative session timeout on profile {}", model.id))?;

        Ok(Self {
            id: model.id,
            email: model.email,
            company: model.company,
            role,
            status,
            plan,
            credits: model.credits,
            session_timeout,
            session_started_at: model.session_started_at,
            joined_at: model.joined_at,
        })
    }
}

/// Fields needed to insert a new profile. The password is hashed inside the
/// repository; callers never see the hash.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub email: String,
    pub password: String,
    pub defaults: SignupDefaults,
}

pub struct ProfileRepository {
    conn: DatabaseConnection,
}

impl ProfileRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a new profile with a freshly assigned id.
    pub async fn create(&self, new: NewProfile, security: &SecurityConfig) -> Result<Profile> {
        let password = new.password;
        let security = security.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, &security))
            .await
            .context("Password hashing task panicked")??;

        let model = profiles::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            email: Set(new.email.to_lowercase()),
            company: Set(new.defaults.company),
            role: Set(new.defaults.role.as_str().to_string()),
            status: Set(AccountStatus::Active.as_str().to_string()),
            plan: Set(new.defaults.plan.as_str().to_string()),
            credits: Set(new.defaults.credits),
            session_timeout: Set(None),
            session_started_at: Set(None),
            joined_at: Set(chrono::Utc::now().to_rfc3339()),
            password_hash: Set(password_hash),
        };

        let inserted = model
            .insert(&self.conn)
            .await
            .context("Failed to insert profile")?;

        inserted.try_into()
    }

    pub async fn get(&self, id: &str) -> Result<Option<Profile>> {
        let profile = profiles::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query profile by id")?;

        profile.map(Profile::try_from).transpose()
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<Profile>> {
        let profile = profiles::Entity::find()
            .filter(profiles::Column::Email.eq(email.to_lowercase()))
            .one(&self.conn)
            .await
            .context("Failed to query profile by email")?;

        profile.map(Profile::try_from).transpose()
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        Ok(self.get_by_email(email).await?.is_some())
    }

    pub async fn list_all(&self) -> Result<Vec<Profile>> {
        let rows = profiles::Entity::find()
            .all(&self.conn)
            .await
            .context("Failed to list profiles")?;

        rows.into_iter().map(Profile::try_from).collect()
    }

    /// Verify a password against the stored hash.
    /// Note: uses `spawn_blocking` because Argon2 verification is
    /// CPU-intensive and would block the async runtime if run directly.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<bool> {
        let profile = profiles::Entity::find()
            .filter(profiles::Column::Email.eq(email.to_lowercase()))
            .one(&self.conn)
            .await
            .context("Failed to query profile for credential verification")?;

        let Some(profile) = profile else {
            return Ok(false);
        };

        let password_hash = profile.password_hash;
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            let argon2 = Argon2::default();
            Ok::<bool, anyhow::Error>(
                argon2
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .context("Password verification task panicked")??;

        Ok(is_valid)
    }

    /// Overwrite the status field. Role checks live in the service layer.
    pub async fn set_status(&self, id: &str, status: AccountStatus) -> Result<Profile> {
        let profile = profiles::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query profile for status update")?
            .ok_or_else(|| anyhow::anyhow!("Profile not found: {id}"))?;

        let mut active: profiles::ActiveModel = profile.into();
        active.status = Set(status.as_str().to_string());
        let updated = active.update(&self.conn).await?;

        updated.try_into()
    }

    /// Write the session timer. Both columns move together in a single row
    /// update: setting a timer stamps `session_started_at`, clearing removes
    /// both.
    pub async fn set_session_timer(&self, id: &str, minutes: Option<u32>) -> Result<Profile> {
        let profile = profiles::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query profile for timer update")?
            .ok_or_else(|| anyhow::anyhow!("Profile not found: {id}"))?;

        let mut active: profiles::ActiveModel = profile.into();
        match minutes {
            Some(m) => {
                active.session_timeout = Set(Some(i32::try_from(m)?));
                active.session_started_at = Set(Some(chrono::Utc::now().to_rfc3339()));
            }
            None => {
                active.session_timeout = Set(None);
                active.session_started_at = Set(None);
            }
        }
        let updated = active.update(&self.conn).await?;

        updated.try_into()
    }
}

/// Hash a password using Argon2id with the configured params.
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}
