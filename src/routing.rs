//! Role-based shell routing.
//!
//! Decides which application view a signed-in (or anonymous) identity lands
//! on. The rules form a priority cascade evaluated top to bottom, first match
//! wins; they are re-run on every auth-state change and profile refresh, not
//! subscribed to live updates.

use serde::Serialize;

use crate::config::SecurityConfig;
use crate::models::{AccountStatus, Profile, Role};

/// Terminal view states of the application shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    /// No signed-in identity: landing/auth surface.
    Unauthenticated,
    /// Account disabled by the administrator.
    Disabled,
    /// Admin console.
    Admin,
    /// Tenant on an exhausted trial: upgrade gate.
    UpgradeRequired,
    /// Tenant workspace (dashboard/leads/campaigns).
    TenantDashboard,
    /// Signed in but not recognizable as admin or tenant.
    AccessPending,
}

/// Resolve the shell view for `email` with an optionally loaded profile.
///
/// `profile` is `None` when the profile fetch failed or the record is absent;
/// the cascade then falls through to [`ViewState::AccessPending`] unless the
/// identity email alone grants admin access.
#[must_use]
pub fn resolve_view(
    identity_email: Option<&str>,
    profile: Option<&Profile>,
    security: &SecurityConfig,
) -> ViewState {
    let Some(email) = identity_email else {
        return ViewState::Unauthenticated;
    };

    if let Some(profile) = profile
        && profile.status == AccountStatus::Disabled
    {
        return ViewState::Disabled;
    }

    if profile.is_some_and(|p| p.role == Role::Admin) || security.is_admin_email(email) {
        return ViewState::Admin;
    }

    if let Some(profile) = profile
        && (profile.role == Role::Subadmin
            || profile.company.as_deref().is_some_and(|c| !c.is_empty()))
    {
        if profile.trial_exhausted() {
            return ViewState::UpgradeRequired;
        }
        return ViewState::TenantDashboard;
    }

    ViewState::AccessPending
}
