//! Session timer command handler

use crate::config::Config;
use crate::services::DirectoryService;

pub async fn cmd_set_timer(config: &Config, id: &str, minutes: Option<u32>) -> anyhow::Result<()> {
    let directory = super::directory(config).await?;

    let profile = directory.set_session_timer(id, minutes).await?;

    match minutes {
        Some(m) => println!(
            "✓ Timer set to {m} minutes for {} (started {})",
            profile.email,
            profile.session_started_at.as_deref().unwrap_or("now")
        ),
        None => println!("✓ Timer removed for {}", profile.email),
    }

    Ok(())
}
