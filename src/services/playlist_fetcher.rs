//! Remote playlist fetching
//!
//! Unlike the account adapters, a failed fetch here is reported to the caller:
//! the user typed the URL and expects a yes/no answer.

use tracing::{info, warn};

use crate::models::Channel;
use crate::services::http::{fetch_text, FetchError, HttpFetch};
use crate::services::m3u_parser;

/// Fetch an M3U playlist over HTTP and parse it
///
/// An empty channel list is a valid outcome; only transport failures and
/// non-2xx responses are errors.
pub async fn fetch_and_parse(http: &dyn HttpFetch, url: &str) -> Result<Vec<Channel>, FetchError> {
    let text = fetch_text(http, url).await.map_err(|e| {
        warn!("Failed to fetch playlist {}: {}", url, e);
        e
    })?;

    info!("Playlist size: {:.2} MB", text.len() as f64 / 1024.0 / 1024.0);

    let channels = m3u_parser::parse(&text);
    info!("Parsed {} channels from {}", channels.len(), url);

    Ok(channels)
}
