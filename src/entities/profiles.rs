use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// Opaque identifier assigned at creation (UUID v4), immutable.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub email: String,

    pub company: Option<String>,

    /// "admin" | "subadmin"
    pub role: String,

    /// "active" | "suspended" | "disabled"
    pub status: String,

    /// "trial" | "pro"
    pub plan: String,

    pub credits: i64,

    /// Admin-assigned session limit in minutes. Written together with
    /// `session_started_at`, never alone.
    pub session_timeout: Option<i32>,

    pub session_started_at: Option<String>,

    pub joined_at: String,

    /// Argon2id password hash
    pub password_hash: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
