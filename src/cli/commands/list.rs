//! List account profiles command handler

use crate::config::Config;
use crate::models::AccountStatus;
use crate::services::{DirectoryQuery, DirectoryService};

pub async fn cmd_list_profiles(
    config: &Config,
    search: Option<&str>,
    status: Option<&str>,
) -> anyhow::Result<()> {
    let status = match status {
        Some(s) => Some(
            AccountStatus::parse(s)
                .ok_or_else(|| anyhow::anyhow!("Unknown status '{s}' (use active, suspended, disabled)"))?,
        ),
        None => None,
    };

    let directory = super::directory(config).await?;
    let snapshot = directory
        .snapshot(&DirectoryQuery {
            search: search.map(str::to_string),
            status,
        })
        .await?;

    if snapshot.profiles.is_empty() {
        println!("No matching account profiles.");
        return Ok(());
    }

    println!(
        "Accounts: {} total | {} active sub-admins | {} suspended",
        snapshot.stats.total, snapshot.stats.active_subadmins, snapshot.stats.suspended
    );
    println!("{:-<70}", "");

    for profile in snapshot.profiles {
        let status_indicator = match profile.status {
            AccountStatus::Active => "🟢",
            AccountStatus::Suspended => "⏸",
            AccountStatus::Disabled => "✗",
        };

        let timer = profile
            .session_timeout
            .map_or("-".to_string(), |m| format!("{m} min"));

        println!(
            "{} {} [{}]",
            status_indicator,
            profile.company.as_deref().unwrap_or("Private User"),
            profile.email
        );
        println!(
            "  ID: {} | Role: {} | Plan: {} | Credits: {} | Timer: {}",
            profile.id,
            profile.role.as_str(),
            profile.plan.as_str(),
            profile.credits,
            timer
        );
    }

    Ok(())
}
