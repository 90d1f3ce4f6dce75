//! Domain service for identity: sign-up and sign-in.
//!
//! Session creation and teardown live at the HTTP layer; this service only
//! decides whether an identity may have a session at all.

use thiserror::Error;

use crate::models::Profile;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Duplicate sign-up. The message is surfaced verbatim on the form.
    #[error("This email is already registered. Please switch to Login.")]
    EmailTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Suspension is checked after the credential check; the identity is
    /// bounced before any session exists.
    #[error("This account has been suspended by the administrator.")]
    Suspended,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Create a profile for a new identity.
    ///
    /// Role, plan and starting credits are assigned from the admin
    /// allow-list; see [`crate::models::SignupDefaults`].
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailTaken`] for a duplicate email and
    /// [`AuthError::Validation`] for malformed input.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        company: Option<String>,
    ) -> Result<Profile, AuthError>;

    /// Verify credentials and return the profile a session may be opened for.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on a failed check and
    /// [`AuthError::Suspended`] when the profile is suspended (the caller
    /// must not create a session).
    async fn sign_in(&self, email: &str, password: &str) -> Result<Profile, AuthError>;

    /// Load a profile by id (current-session refresh path).
    async fn profile(&self, id: &str) -> Result<Option<Profile>, AuthError>;
}
