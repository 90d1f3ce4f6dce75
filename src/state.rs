use std::sync::Arc;
use tokio::sync::broadcast;

use crate::config::Config;
use crate::db::Store;
use crate::domain::NotificationEvent;
use crate::services::{
    AuthService, DirectoryService, SeaOrmAuthService, SeaOrmDirectoryService,
};
use crate::session::SessionRegistry;

#[derive(Clone)]
pub struct SharedState {
    pub config: Config,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub directory_service: Arc<dyn DirectoryService>,

    pub sessions: SessionRegistry,

    pub event_bus: broadcast::Sender<NotificationEvent>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let (event_bus, _) = broadcast::channel(config.general.event_bus_buffer_size);
        Self::with_event_bus(config, event_bus).await
    }

    pub async fn with_event_bus(
        config: Config,
        event_bus: broadcast::Sender<NotificationEvent>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let sessions = SessionRegistry::new(event_bus.clone());

        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn AuthService>;

        let directory_service = Arc::new(SeaOrmDirectoryService::new(
            store.clone(),
            event_bus.clone(),
        )) as Arc<dyn DirectoryService>;

        Ok(Self {
            config,
            store,
            auth_service,
            directory_service,
            sessions,
            event_bus,
        })
    }
}
