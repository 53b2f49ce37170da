//! Xtream Codes API Types

use serde::Deserialize;
use std::fmt;

/// Account credentials as entered by the user
#[derive(Debug, Clone)]
pub struct XtreamCredentials {
    /// Server base URL (e.g., "http://example.com:8080"), used verbatim
    pub server: String,
    pub username: String,
    pub password: String,
}

impl XtreamCredentials {
    pub fn new(server: &str, username: &str, password: &str) -> Self {
        Self {
            server: server.trim().trim_end_matches('/').to_string(),
            username: username.trim().to_string(),
            password: password.trim().to_string(),
        }
    }

    /// True when any of the three fields is blank
    pub fn is_incomplete(&self) -> bool {
        self.server.is_empty() || self.username.is_empty() || self.password.is_empty()
    }

    /// Build the player_api.php base URL
    pub fn api_url(&self) -> String {
        format!(
            "{}/player_api.php?username={}&password={}",
            self.server,
            urlencoding::encode(&self.username),
            urlencoding::encode(&self.password)
        )
    }

    /// Build playback URL for live streams
    pub fn live_url(&self, stream_id: &StreamId) -> String {
        format!(
            "{}/live/{}/{}/{}.ts",
            self.server,
            urlencoding::encode(&self.username),
            urlencoding::encode(&self.password),
            stream_id
        )
    }
}

/// Stream identifier; panels disagree on whether it is a number or a string
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StreamId {
    Number(i64),
    Text(String),
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamId::Number(n) => write!(f, "{}", n),
            StreamId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Live stream record from `action=get_live_streams`
#[derive(Debug, Clone, Deserialize)]
pub struct XtreamLiveStream {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub stream_url: Option<String>,
    #[serde(default)]
    pub stream_id: Option<StreamId>,
}

impl XtreamLiveStream {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Playable address: `stream_url` when present, else the panel's live path
    pub fn playback_url(&self, creds: &XtreamCredentials) -> Option<String> {
        match (&self.stream_url, &self.stream_id) {
            (Some(url), _) if !url.trim().is_empty() => Some(url.clone()),
            (_, Some(StreamId::Text(id))) if id.trim().is_empty() => None,
            (_, Some(id)) => Some(creds.live_url(id)),
            _ => None,
        }
    }
}
