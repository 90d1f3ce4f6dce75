use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::models::{AccountStatus, Profile};

pub mod migrator;
pub mod repositories;

pub use repositories::profile::NewProfile;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn profile_repo(&self) -> repositories::profile::ProfileRepository {
        repositories::profile::ProfileRepository::new(self.conn.clone())
    }

    pub async fn create_profile(
        &self,
        new: NewProfile,
        security: &SecurityConfig,
    ) -> Result<Profile> {
        self.profile_repo().create(new, security).await
    }

    pub async fn get_profile(&self, id: &str) -> Result<Option<Profile>> {
        self.profile_repo().get(id).await
    }

    pub async fn get_profile_by_email(&self, email: &str) -> Result<Option<Profile>> {
        self.profile_repo().get_by_email(email).await
    }

    pub async fn profile_email_exists(&self, email: &str) -> Result<bool> {
        self.profile_repo().email_exists(email).await
    }

    pub async fn list_profiles(&self) -> Result<Vec<Profile>> {
        self.profile_repo().list_all().await
    }

    pub async fn verify_profile_credentials(&self, email: &str, password: &str) -> Result<bool> {
        self.profile_repo().verify_credentials(email, password).await
    }

    pub async fn set_profile_status(&self, id: &str, status: AccountStatus) -> Result<Profile> {
        self.profile_repo().set_status(id, status).await
    }

    pub async fn set_profile_session_timer(
        &self,
        id: &str,
        minutes: Option<u32>,
    ) -> Result<Profile> {
        self.profile_repo().set_session_timer(id, minutes).await
    }
}
