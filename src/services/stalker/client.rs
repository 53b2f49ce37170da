//! Stalker Portal API Client

use super::types::*;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::models::Channel;
use crate::services::http::{fetch_json, AdapterError, HttpFetch};

pub struct StalkerClient {
    http: Arc<dyn HttpFetch>,
    account: StalkerAccount,
}

impl StalkerClient {
    pub fn new(http: Arc<dyn HttpFetch>, account: StalkerAccount) -> Self {
        Self { http, account }
    }

    /// Load the device profile
    pub async fn get_profile(&self) -> Result<StalkerProfile, AdapterError> {
        debug!("Stalker API request: get_profile on {}", self.account.server);
        fetch_json(self.http.as_ref(), &self.account.profile_url()).await
    }

    /// Profile channels as channels, in portal order
    ///
    /// Never fails: any error is logged and yields an empty list.
    pub async fn channels(&self) -> Vec<Channel> {
        if self.account.is_incomplete() {
            debug!("Incomplete Stalker account, nothing to resolve");
            return Vec::new();
        }

        let profile = match self.get_profile().await {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Stalker API error for {}: {}", self.account.server, e);
                return Vec::new();
            }
        };

        let channels: Vec<Channel> = profile
            .into_channels()
            .iter()
            .filter_map(|c| Channel::new(c.display_name(), c.stream_url()))
            .collect();

        info!("Stalker {}: {} channels", self.account.server, channels.len());
        channels
    }
}
