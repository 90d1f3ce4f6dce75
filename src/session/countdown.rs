//! Pure session-expiry math.
//!
//! A [`SessionPolicy`] is the snapshot of the admin-assigned timer taken when
//! a session opens. All time handling is parameterized on `now` so the
//! arithmetic is testable without a running clock; the watcher in
//! [`super::monitor`] feeds it wall time once a second.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::{Profile, Role};

/// Below this remaining window the display switches to the critical styling.
/// Display-only; enforcement is unchanged.
pub const CRITICAL_WINDOW_MS: u64 = 60_000;

/// Admin-assigned wall-clock limit for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    pub timeout_minutes: u32,
    pub started_at: DateTime<Utc>,
}

impl SessionPolicy {
    /// Extract the active policy from a profile snapshot.
    ///
    /// Returns `None` (monitor inactive) when the account is an admin, when
    /// either timer field is absent, when the timeout is zero, or when the
    /// start timestamp does not parse.
    #[must_use]
    pub fn from_profile(profile: &Profile) -> Option<Self> {
        if profile.role == Role::Admin {
            return None;
        }
        let timeout_minutes = profile.session_timeout.filter(|m| *m > 0)?;
        let started_at = profile
            .session_started_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())?
            .with_timezone(&Utc);

        Some(Self {
            timeout_minutes,
            started_at,
        })
    }

    #[must_use]
    pub fn deadline(&self) -> DateTime<Utc> {
        self.started_at + Duration::milliseconds(i64::from(self.timeout_minutes) * 60_000)
    }

    /// `max(0, limit - elapsed)` in milliseconds. Non-increasing in `now`.
    #[must_use]
    pub fn remaining_ms(&self, now: DateTime<Utc>) -> u64 {
        let ms = (self.deadline() - now).num_milliseconds();
        u64::try_from(ms.max(0)).unwrap_or(0)
    }

    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.remaining_ms(now) == 0
    }

    /// True while the session is still live but inside the final minute.
    #[must_use]
    pub fn is_critical(&self, now: DateTime<Utc>) -> bool {
        let remaining = self.remaining_ms(now);
        remaining > 0 && remaining < CRITICAL_WINDOW_MS
    }

    /// Snapshot of the countdown for display at `now`.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> CountdownStatus {
        let remaining_ms = self.remaining_ms(now);
        CountdownStatus {
            active: true,
            remaining_ms,
            display: format_clock(remaining_ms),
            critical: self.is_critical(now),
            expired: remaining_ms == 0,
        }
    }
}

/// What the countdown endpoint reports for one session.
#[derive(Debug, Clone, Serialize)]
pub struct CountdownStatus {
    pub active: bool,
    pub remaining_ms: u64,
    pub display: String,
    pub critical: bool,
    pub expired: bool,
}

impl CountdownStatus {
    /// No policy on the session: nothing displayed, nothing enforced.
    #[must_use]
    pub fn inactive() -> Self {
        Self {
            active: false,
            remaining_ms: 0,
            display: String::new(),
            critical: false,
            expired: false,
        }
    }

    /// A session the watcher has already force-terminated.
    #[must_use]
    pub fn expired() -> Self {
        Self {
            active: true,
            remaining_ms: 0,
            display: format_clock(0),
            critical: false,
            expired: true,
        }
    }
}

/// `minutes:seconds` with seconds zero-padded to two digits.
#[must_use]
pub fn format_clock(remaining_ms: u64) -> String {
    let total_secs = remaining_ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountStatus, Plan, Profile};

    fn tenant_profile(timeout: Option<u32>, started_at: Option<&str>) -> Profile {
        Profile {
            id: "p1".to_string(),
            email: "tenant@example.com".to_string(),
            company: Some("Acme".to_string()),
            role: Role::Subadmin,
            status: AccountStatus::Active,
            plan: Plan::Trial,
            credits: 10,
            session_timeout: timeout,
            session_started_at: started_at.map(str::to_string),
            joined_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    fn policy(minutes: u32, started_at: &str) -> SessionPolicy {
        SessionPolicy::from_profile(&tenant_profile(Some(minutes), Some(started_at)))
            .expect("policy")
    }

    #[test]
    fn inactive_without_both_fields() {
        assert!(SessionPolicy::from_profile(&tenant_profile(None, None)).is_none());
        assert!(SessionPolicy::from_profile(&tenant_profile(Some(5), None)).is_none());
        assert!(
            SessionPolicy::from_profile(&tenant_profile(None, Some("2026-01-01T00:00:00Z")))
                .is_none()
        );
        assert!(
            SessionPolicy::from_profile(&tenant_profile(Some(5), Some("not-a-timestamp")))
                .is_none()
        );
        assert!(
            SessionPolicy::from_profile(&tenant_profile(Some(0), Some("2026-01-01T00:00:00Z")))
                .is_none()
        );
    }

    #[test]
    fn admin_is_never_monitored() {
        let mut profile = tenant_profile(Some(5), Some("2026-01-01T00:00:00Z"));
        profile.role = Role::Admin;
        assert!(SessionPolicy::from_profile(&profile).is_none());
    }

    #[test]
    fn remaining_matches_elapsed_wall_time() {
        let p = policy(1, "2026-01-01T00:00:00Z");
        let at = |s: &str| DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc);

        assert_eq!(p.remaining_ms(at("2026-01-01T00:00:00Z")), 60_000);
        assert_eq!(p.remaining_ms(at("2026-01-01T00:00:30Z")), 30_000);
        assert_eq!(p.remaining_ms(at("2026-01-01T00:00:59Z")), 1_000);
        assert_eq!(p.remaining_ms(at("2026-01-01T00:01:00Z")), 0);
        // Clamped after the deadline, never negative.
        assert_eq!(p.remaining_ms(at("2026-01-01T00:05:00Z")), 0);
    }

    #[test]
    fn remaining_is_monotonically_non_increasing() {
        let p = policy(2, "2026-01-01T00:00:00Z");
        let mut now = p.started_at;
        let mut last = p.remaining_ms(now);
        for _ in 0..150 {
            now += Duration::seconds(1);
            let current = p.remaining_ms(now);
            assert!(current <= last);
            last = current;
        }
        assert_eq!(last, 0);
    }

    #[test]
    fn one_minute_session_boundary() {
        // Admin sets a 1-minute timer at T: at T+59s the display reads 0:01,
        // at T+60s the session is gone.
        let p = policy(1, "2026-01-01T00:00:00Z");
        let at = |s: &str| DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc);

        let before = p.status_at(at("2026-01-01T00:00:59Z"));
        assert_eq!(before.display, "0:01");
        assert!(before.critical);
        assert!(!before.expired);

        let after = p.status_at(at("2026-01-01T00:01:00Z"));
        assert!(after.expired);
        assert_eq!(after.display, "0:00");
    }

    #[test]
    fn critical_flag_only_inside_final_minute() {
        let p = policy(5, "2026-01-01T00:00:00Z");
        let at = |s: &str| DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc);

        assert!(!p.is_critical(at("2026-01-01T00:03:59Z")));
        assert!(p.is_critical(at("2026-01-01T00:04:01Z")));
        // Expired is not critical.
        assert!(!p.is_critical(at("2026-01-01T00:05:00Z")));
    }

    #[test]
    fn clock_formatting_pads_seconds() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(1_000), "0:01");
        assert_eq!(format_clock(59_000), "0:59");
        assert_eq!(format_clock(60_000), "1:00");
        assert_eq!(format_clock(61_000), "1:01");
        assert_eq!(format_clock(727_000), "12:07");
        // Sub-second remainders truncate toward zero.
        assert_eq!(format_clock(1_999), "0:01");
    }
}
