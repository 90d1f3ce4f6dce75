pub mod auth_service;
pub use auth_service::{AuthError, AuthService};

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;

pub mod directory_service;
pub use directory_service::{
    DirectoryError, DirectoryQuery, DirectoryService, DirectorySnapshot, DirectoryStats,
};

pub mod directory_service_impl;
pub use directory_service_impl::SeaOrmDirectoryService;
