use serde::Deserialize;

/// Where channels come from
///
/// Tagged by `type` on the wire. Every field defaults to an empty string, so a
/// descriptor with missing fields still deserializes and resolves to nothing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceDescriptor {
    /// A single stream URL played as-is
    Direct {
        #[serde(default)]
        url: String,
    },
    /// Playlist text previously uploaded (or sent inline) under `filename`
    #[serde(alias = "m3u")]
    Upload {
        #[serde(default)]
        filename: String,
        #[serde(default)]
        content: String,
    },
    /// Remote M3U playlist fetched over HTTP
    Url {
        #[serde(default)]
        url: String,
    },
    /// Xtream Codes account
    Xtream {
        #[serde(default)]
        server: String,
        #[serde(default)]
        username: String,
        #[serde(default)]
        password: String,
    },
    /// Stalker Portal account, keyed by device MAC
    Stalker {
        #[serde(default, alias = "portal")]
        server: String,
        #[serde(default)]
        mac: String,
    },
    /// Local directory tree containing playlist files
    Folder {
        #[serde(default)]
        path: String,
    },
}

impl SourceDescriptor {
    /// Short label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            SourceDescriptor::Direct { .. } => "direct",
            SourceDescriptor::Upload { .. } => "upload",
            SourceDescriptor::Url { .. } => "url",
            SourceDescriptor::Xtream { .. } => "xtream",
            SourceDescriptor::Stalker { .. } => "stalker",
            SourceDescriptor::Folder { .. } => "folder",
        }
    }
}
