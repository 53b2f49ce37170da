//! Stalker Portal Integration
//!
//! Turns a Stalker (Ministra) portal account, keyed by the set-top box MAC
//! address, into channels by loading the device profile:
//!
//! ```text
//! http://portal/portal.php?type=stb&action=get_profile&mac=00:1A:79:XX:XX:XX
//! ```
//!
//! Same failure policy as the Xtream integration: errors are logged and come
//! back as an empty channel list.

pub mod client;
pub mod types;

pub use client::StalkerClient;
pub use types::StalkerAccount;
