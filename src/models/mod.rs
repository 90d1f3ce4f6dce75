pub mod profile;

pub use profile::{AccountStatus, Plan, Profile, Role, SignupDefaults};
