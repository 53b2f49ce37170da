//! Stalker Portal API Types

use serde::Deserialize;

/// Portal URL plus device MAC
#[derive(Debug, Clone)]
pub struct StalkerAccount {
    /// Portal base URL, used verbatim
    pub server: String,
    pub mac: String,
}

impl StalkerAccount {
    pub fn new(server: &str, mac: &str) -> Self {
        Self {
            server: server.trim().trim_end_matches('/').to_string(),
            mac: mac.trim().to_string(),
        }
    }

    pub fn is_incomplete(&self) -> bool {
        self.server.is_empty() || self.mac.is_empty()
    }

    /// Build the profile-load URL
    pub fn profile_url(&self) -> String {
        format!(
            "{}/portal.php?type=stb&action=get_profile&mac={}",
            self.server,
            urlencoding::encode(&self.mac)
        )
    }
}

/// Profile response; portals either return it bare or wrapped in `js`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StalkerProfile {
    Wrapped { js: StalkerChannelList },
    Bare(StalkerChannelList),
}

impl StalkerProfile {
    pub fn into_channels(self) -> Vec<StalkerChannel> {
        match self {
            StalkerProfile::Wrapped { js } => js.channels,
            StalkerProfile::Bare(list) => list.channels,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StalkerChannelList {
    pub channels: Vec<StalkerChannel>,
}

/// Channel record; portals put the address in `url`, `cmd`, or both
#[derive(Debug, Clone, Deserialize)]
pub struct StalkerChannel {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub cmd: Option<String>,
}

impl StalkerChannel {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Stream address without the player hint portals prepend (`ffmpeg http://...`)
    pub fn stream_url(&self) -> &str {
        let raw = [&self.url, &self.cmd]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or("");

        ["ffmpeg ", "auto "]
            .iter()
            .find_map(|hint| raw.strip_prefix(hint))
            .map(str::trim)
            .unwrap_or(raw)
    }
}
