//! Xtream Codes API Client

use super::types::*;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::models::Channel;
use crate::services::http::{fetch_json, AdapterError, HttpFetch};

/// Xtream API Client
pub struct XtreamClient {
    http: Arc<dyn HttpFetch>,
    creds: XtreamCredentials,
}

impl XtreamClient {
    pub fn new(http: Arc<dyn HttpFetch>, creds: XtreamCredentials) -> Self {
        Self { http, creds }
    }

    /// Get all live streams
    pub async fn get_live_streams(&self) -> Result<Vec<XtreamLiveStream>, AdapterError> {
        let url = format!("{}&action=get_live_streams", self.creds.api_url());
        debug!("Xtream API request: get_live_streams on {}", self.creds.server);
        fetch_json(self.http.as_ref(), &url).await
    }

    /// Live streams as channels, in panel order
    ///
    /// Never fails: any error is logged and yields an empty list.
    pub async fn live_channels(&self) -> Vec<Channel> {
        if self.creds.is_incomplete() {
            debug!("Incomplete Xtream credentials, nothing to resolve");
            return Vec::new();
        }

        let streams = match self.get_live_streams().await {
            Ok(streams) => streams,
            Err(e) => {
                warn!("Xtream API error for {}: {}", self.creds.server, e);
                return Vec::new();
            }
        };

        let total = streams.len();
        let channels: Vec<Channel> = streams
            .into_iter()
            .filter_map(|s| {
                let url = s.playback_url(&self.creds)?;
                Channel::new(s.display_name(), &url)
            })
            .collect();

        if channels.len() < total {
            debug!("Dropped {} Xtream streams without name or URL", total - channels.len());
        }
        info!("Xtream {}: {} live channels", self.creds.server, channels.len());

        channels
    }
}
