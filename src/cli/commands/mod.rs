//! Command handlers for the operator CLI.

mod list;
mod timer;
mod toggle;

pub use list::cmd_list_profiles;
pub use timer::cmd_set_timer;
pub use toggle::cmd_toggle_status;

use tokio::sync::broadcast;

use crate::config::Config;
use crate::db::Store;
use crate::services::{DirectoryService, SeaOrmDirectoryService};

/// Build a directory service against the configured database. CLI commands
/// run outside the daemon, so events go to a throwaway bus.
pub(crate) async fn directory(config: &Config) -> anyhow::Result<impl DirectoryService> {
    let store = Store::new(&config.general.database_path).await?;
    let (events, _) = broadcast::channel(config.general.event_bus_buffer_size);
    Ok(SeaOrmDirectoryService::new(store, events))
}
