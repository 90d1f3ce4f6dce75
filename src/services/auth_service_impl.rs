//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::config::SecurityConfig;
use crate::db::{NewProfile, Store};
use crate::models::{AccountStatus, Profile, SignupDefaults};
use crate::services::auth_service::{AuthError, AuthService};

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    fn validate_signup(&self, email: &str, password: &str) -> Result<(), AuthError> {
        if email.trim().is_empty() || !email.contains('@') {
            return Err(AuthError::Validation("A valid email is required".to_string()));
        }
        if password.len() < self.security.min_password_len {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                self.security.min_password_len
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        company: Option<String>,
    ) -> Result<Profile, AuthError> {
        self.validate_signup(email, password)?;

        if self.store.profile_email_exists(email).await? {
            return Err(AuthError::EmailTaken);
        }

        let defaults = SignupDefaults::for_signup(self.security.is_admin_email(email), company);
        let profile = self
            .store
            .create_profile(
                NewProfile {
                    email: email.to_string(),
                    password: password.to_string(),
                    defaults,
                },
                &self.security,
            )
            .await?;

        info!(
            profile_id = %profile.id,
            role = profile.role.as_str(),
            "account created"
        );

        Ok(profile)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Profile, AuthError> {
        let is_valid = self.store.verify_profile_credentials(email, password).await?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let profile = self
            .store
            .get_profile_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Checked after the credential check so the outcome is identical to
        // the identity provider accepting the login and the app bouncing it.
        if profile.status == AccountStatus::Suspended {
            info!(profile_id = %profile.id, "suspended account bounced at sign-in");
            return Err(AuthError::Suspended);
        }

        Ok(profile)
    }

    async fn profile(&self, id: &str) -> Result<Option<Profile>, AuthError> {
        Ok(self.store.get_profile(id).await?)
    }
}
