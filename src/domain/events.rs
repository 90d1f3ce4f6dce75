//! Domain events for the application.
//!
//! Sent via the event bus to notify connected clients of state changes. The
//! session events carry the countdown display and the expiry notice that
//! tells the shell to reload.

use serde::Serialize;

/// Events sent to connected clients via SSE (Server-Sent Events).
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum NotificationEvent {
    CountdownTick {
        remaining_ms: u64,
        display: String,
        critical: bool,
    },

    SessionExpired {
        message: String,
    },

    ProfileStatusChanged {
        profile_id: String,
        status: String,
    },

    SessionTimerSet {
        profile_id: String,
        minutes: u32,
    },

    SessionTimerCleared {
        profile_id: String,
    },
}

impl NotificationEvent {
    /// Notice shown when a session is force-terminated by the watcher.
    pub const EXPIRY_NOTICE: &'static str =
        "Your session has expired. You have been logged out by the administrator.";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_tagged() {
        let event = NotificationEvent::CountdownTick {
            remaining_ms: 59_000,
            display: "0:59".to_string(),
            critical: true,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "CountdownTick");
        assert_eq!(json["payload"]["display"], "0:59");
        assert_eq!(json["payload"]["critical"], true);

        let event = NotificationEvent::SessionExpired {
            message: NotificationEvent::EXPIRY_NOTICE.to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "SessionExpired");
        assert_eq!(json["payload"]["message"], NotificationEvent::EXPIRY_NOTICE);
    }
}
