//! Per-session expiry enforcement.
//!
//! The registry tracks every open session token. Sessions whose profile
//! snapshot carries a timer get a watcher task that re-checks remaining time
//! once a second and force-terminates the session when it reaches zero. The
//! policy snapshot is taken at registration; an admin changing the timer
//! mid-session only takes effect when the session re-registers (next sign-in
//! or an explicit profile refresh).

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::domain::NotificationEvent;

use super::countdown::{CountdownStatus, SessionPolicy};

struct Watch {
    policy: SessionPolicy,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct Inner {
    watches: HashMap<String, Watch>,
    /// Tokens whose sessions were force-terminated by their watcher.
    revoked: HashSet<String>,
}

#[derive(Clone)]
pub struct SessionRegistry {
    inner: Arc<Mutex<Inner>>,
    events: broadcast::Sender<NotificationEvent>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new(events: broadcast::Sender<NotificationEvent>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            events,
        }
    }

    /// Open (or re-open) monitoring for a session token with a fresh profile
    /// snapshot. Any previous watcher for the token is discarded and its
    /// revocation flag cleared; this is what a profile refresh calls to
    /// re-evaluate the timer from scratch.
    pub fn register(&self, token: &str, policy: Option<SessionPolicy>) {
        let mut inner = self.inner.lock().expect("session registry poisoned");
        if let Some(old) = inner.watches.remove(token) {
            old.handle.abort();
        }
        inner.revoked.remove(token);

        if let Some(policy) = policy {
            let handle = self.spawn_watcher(token.to_string(), policy);
            inner.watches.insert(token.to_string(), Watch { policy, handle });
            debug!(
                token,
                minutes = policy.timeout_minutes,
                "session watcher started"
            );
        }
    }

    /// Normal sign-out: stop the watcher and forget the token entirely.
    pub fn deregister(&self, token: &str) {
        let mut inner = self.inner.lock().expect("session registry poisoned");
        if let Some(watch) = inner.watches.remove(token) {
            watch.handle.abort();
        }
        inner.revoked.remove(token);
    }

    /// Whether the watcher has force-terminated this session.
    #[must_use]
    pub fn is_revoked(&self, token: &str) -> bool {
        self.inner
            .lock()
            .expect("session registry poisoned")
            .revoked
            .contains(token)
    }

    /// Countdown snapshot for the display surface.
    #[must_use]
    pub fn countdown(&self, token: &str) -> CountdownStatus {
        let inner = self.inner.lock().expect("session registry poisoned");
        if inner.revoked.contains(token) {
            return CountdownStatus::expired();
        }
        inner.watches.get(token).map_or_else(
            CountdownStatus::inactive,
            |watch| watch.policy.status_at(Utc::now()),
        )
    }

    fn spawn_watcher(&self, token: String, policy: SessionPolicy) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let events = self.events.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(1));

            loop {
                ticker.tick().await;
                let now = Utc::now();
                let remaining = policy.remaining_ms(now);

                if remaining == 0 {
                    expire(&inner, &events, &token);
                    return;
                }

                let _ = events.send(NotificationEvent::CountdownTick {
                    remaining_ms: remaining,
                    display: super::countdown::format_clock(remaining),
                    critical: policy.is_critical(now),
                });
            }
        })
    }
}

/// Force-terminate one session: revoke the token, surface the blocking
/// notice, and stop. Runs at most once per watcher; a failure to notify is
/// logged and not retried.
fn expire(
    inner: &Arc<Mutex<Inner>>,
    events: &broadcast::Sender<NotificationEvent>,
    token: &str,
) {
    {
        let mut inner = inner.lock().expect("session registry poisoned");
        inner.watches.remove(token);
        inner.revoked.insert(token.to_string());
    }

    info!(token, "session limit reached, forcing sign-out");

    if let Err(e) = events.send(NotificationEvent::SessionExpired {
        message: NotificationEvent::EXPIRY_NOTICE.to_string(),
    }) {
        debug!(token, "no listeners for session-expired notice: {e}");
    }
}
