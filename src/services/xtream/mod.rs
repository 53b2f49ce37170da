//! Xtream Codes Integration
//!
//! Turns an Xtream Codes account (server + username + password) into channels
//! by listing its live streams through the Player API:
//!
//! ```text
//! http://server:port/player_api.php?username=X&password=Y&action=get_live_streams
//! ```
//!
//! Failures never reach the caller. A dead panel, bad credentials or an
//! unexpected response shape all come back as an empty channel list and a
//! logged warning.

pub mod client;
pub mod types;

pub use client::XtreamClient;
pub use types::XtreamCredentials;
