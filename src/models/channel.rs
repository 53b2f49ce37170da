use serde::Serialize;

/// A named, playable stream address
///
/// Only constructible through [`Channel::new`], which rejects pairs where
/// either side is blank after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Channel {
    name: String,
    url: String,
}

impl Channel {
    /// Build a channel from a raw `(name, url)` pair, trimming both sides
    pub fn new(name: &str, url: &str) -> Option<Self> {
        let name = name.trim();
        let url = url.trim();

        if name.is_empty() || url.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            url: url.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Navigable pointer to a sub-folder of a folder source
///
/// `path` is echoed back by the caller as the `path` of a later folder source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderRef {
    pub name: String,
    pub path: String,
}

/// Uniform result of resolving any source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    pub channels: Vec<Channel>,
    pub folders: Vec<FolderRef>,
}

impl ResolutionResult {
    /// Nothing found; not an error
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_channels(channels: Vec<Channel>) -> Self {
        Self {
            channels,
            folders: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty() && self.folders.is_empty()
    }
}
