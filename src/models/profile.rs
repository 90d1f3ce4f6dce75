//! Account profile domain model.
//!
//! A profile is the durable record describing one account: its role, access
//! status, plan, credit balance, and (for tenants) the admin-assigned session
//! policy.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Subadmin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Subadmin => "subadmin",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "subadmin" => Some(Self::Subadmin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Suspended,
    Disabled,
}

impl AccountStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Disabled => "disabled",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "suspended" => Some(Self::Suspended),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Trial,
    Pro,
}

impl Plan {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trial => "trial",
            Self::Pro => "pro",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "trial" => Some(Self::Trial),
            "pro" => Some(Self::Pro),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,

    pub email: String,

    pub company: Option<String>,

    pub role: Role,

    pub status: AccountStatus,

    pub plan: Plan,

    pub credits: i64,

    /// Admin-assigned session limit in minutes. Always paired with
    /// `session_started_at`: both set or both absent.
    pub session_timeout: Option<u32>,

    /// RFC3339 timestamp stamped when the timer was last set.
    pub session_started_at: Option<String>,

    pub joined_at: String,
}

impl Profile {
    /// Whether the tenant has exhausted its trial allotment and must upgrade
    /// before reaching the workspace.
    #[must_use]
    pub const fn trial_exhausted(&self) -> bool {
        self.credits <= 0 && matches!(self.plan, Plan::Trial)
    }
}

/// Field assignment applied at sign-up, keyed on whether the email is on the
/// admin allow-list.
#[derive(Debug, Clone)]
pub struct SignupDefaults {
    pub company: Option<String>,
    pub role: Role,
    pub plan: Plan,
    pub credits: i64,
}

impl SignupDefaults {
    pub const ADMIN_CREDITS: i64 = 999_999;
    pub const TRIAL_CREDITS: i64 = 10;

    /// Admin accounts get the pro plan and an effectively unlimited credit
    /// balance; everyone else starts on trial credits. An admin with no
    /// company is labelled as the system operator.
    #[must_use]
    pub fn for_signup(is_admin: bool, company: Option<String>) -> Self {
        let company = company.filter(|c| !c.trim().is_empty());
        if is_admin {
            Self {
                company: company.or_else(|| Some("SYSTEM ADMIN".to_string())),
                role: Role::Admin,
                plan: Plan::Pro,
                credits: Self::ADMIN_CREDITS,
            }
        } else {
            Self {
                company,
                role: Role::Subadmin,
                plan: Plan::Trial,
                credits: Self::TRIAL_CREDITS,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_round_trips() {
        for role in [Role::Admin, Role::Subadmin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        for status in [
            AccountStatus::Active,
            AccountStatus::Suspended,
            AccountStatus::Disabled,
        ] {
            assert_eq!(AccountStatus::parse(status.as_str()), Some(status));
        }
        for plan in [Plan::Trial, Plan::Pro] {
            assert_eq!(Plan::parse(plan.as_str()), Some(plan));
        }
        assert_eq!(Role::parse("superuser"), None);
    }

    #[test]
    fn admin_signup_defaults() {
        let d = SignupDefaults::for_signup(true, None);
        assert_eq!(d.role, Role::Admin);
        assert_eq!(d.plan, Plan::Pro);
        assert_eq!(d.credits, 999_999);
        assert_eq!(d.company.as_deref(), Some("SYSTEM ADMIN"));

        let d = SignupDefaults::for_signup(true, Some("Acme".to_string()));
        assert_eq!(d.company.as_deref(), Some("Acme"));
    }

    #[test]
    fn tenant_signup_defaults() {
        let d = SignupDefaults::for_signup(false, Some("  ".to_string()));
        assert_eq!(d.role, Role::Subadmin);
        assert_eq!(d.plan, Plan::Trial);
        assert_eq!(d.credits, 10);
        assert_eq!(d.company, None);
    }

    #[test]
    fn trial_exhaustion() {
        let mut profile = Profile {
            id: "p1".to_string(),
            email: "x@example.com".to_string(),
            company: None,
            role: Role::Subadmin,
            status: AccountStatus::Active,
            plan: Plan::Trial,
            credits: 0,
            session_timeout: None,
            session_started_at: None,
            joined_at: "2026-01-01T00:00:00Z".to_string(),
        };
        assert!(profile.trial_exhausted());

        profile.credits = 3;
        assert!(!profile.trial_exhausted());

        profile.credits = 0;
        profile.plan = Plan::Pro;
        assert!(!profile.trial_exhausted());
    }
}
