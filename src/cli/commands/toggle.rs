//! Toggle account status command handler

use crate::config::Config;
use crate::services::DirectoryService;

pub async fn cmd_toggle_status(config: &Config, id: &str) -> anyhow::Result<()> {
    let directory = super::directory(config).await?;

    let profile = directory.toggle_status(id).await?;

    println!("✓ {} is now {}", profile.email, profile.status.as_str());

    Ok(())
}
