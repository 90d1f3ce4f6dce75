pub mod countdown;
pub mod monitor;

pub use countdown::{CountdownStatus, SessionPolicy, format_clock};
pub use monitor::SessionRegistry;
