use serde::{Deserialize, Serialize};

use crate::models::Profile;
use crate::routing::ViewState;
use crate::services::{DirectorySnapshot, DirectoryStats};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileDto {
    pub id: String,
    pub email: String,
    pub company: Option<String>,
    pub role: String,
    pub status: String,
    pub plan: String,
    pub credits: i64,
    pub session_timeout: Option<u32>,
    pub session_started_at: Option<String>,
    pub joined_at: String,
}

impl From<Profile> for ProfileDto {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            company: profile.company,
            role: profile.role.as_str().to_string(),
            status: profile.status.as_str().to_string(),
            plan: profile.plan.as_str().to_string(),
            credits: profile.credits,
            session_timeout: profile.session_timeout,
            session_started_at: profile.session_started_at,
            joined_at: profile.joined_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub company: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub profile: ProfileDto,
    pub view: ViewState,
}

#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub view: ViewState,
}

#[derive(Debug, Deserialize)]
pub struct TimerRequest {
    /// `null` (or absent) clears the timer.
    pub minutes: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct DirectoryDto {
    pub profiles: Vec<ProfileDto>,
    pub stats: DirectoryStats,
}

impl From<DirectorySnapshot> for DirectoryDto {
    fn from(snapshot: DirectorySnapshot) -> Self {
        Self {
            profiles: snapshot.profiles.into_iter().map(ProfileDto::from).collect(),
            stats: snapshot.stats,
        }
    }
}

impl DirectoryDto {
    /// Degraded result used when the directory fetch fails: nothing listed,
    /// all counts zero.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            profiles: Vec::new(),
            stats: DirectoryStats {
                total: 0,
                active_subadmins: 0,
                suspended: 0,
            },
        }
    }
}

/// What the tenant shell renders: profile summary and available sections.
#[derive(Debug, Serialize)]
pub struct WorkspaceDto {
    pub company: Option<String>,
    pub email: String,
    pub plan: String,
    pub credits: i64,
    pub sections: Vec<&'static str>,
    pub upgrade_required: bool,
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime: u64,
    pub total_profiles: usize,
    pub database_ok: bool,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
