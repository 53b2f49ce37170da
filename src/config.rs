use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub environment: String,

    // Upstream fetching
    pub fetch_timeout_ms: u64,
    pub max_playlist_size_mb: usize,
    pub user_agent: String,
    pub accept_invalid_certs: bool,

    // Uploads
    pub upload_max_entries: usize,
    pub upload_max_mb: usize,

    // Folder sources
    pub folder_scan_max_depth: usize,
}

/// Read `key` and parse it, falling back to `default` when unset or malformed
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            // Server
            port: env_or("PORT", 3001),
            environment: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),

            // Upstream fetching
            fetch_timeout_ms: env_or("FETCH_TIMEOUT_MS", 10_000), // 10 seconds
            max_playlist_size_mb: env_or("MAX_PLAYLIST_SIZE_MB", 50),
            // Use VLC user agent to avoid IPTV server blocks
            user_agent: env::var("USER_AGENT")
                .unwrap_or_else(|_| "VLC/3.0.20 LibVLC/3.0.20".to_string()),
            // Many IPTV panels run on self-signed certs
            accept_invalid_certs: env_or("ACCEPT_INVALID_CERTS", true),

            // Uploads
            upload_max_entries: env_or("UPLOAD_MAX_ENTRIES", 64),
            upload_max_mb: env_or("UPLOAD_MAX_MB", 10),

            // Folder sources
            folder_scan_max_depth: env_or("FOLDER_SCAN_MAX_DEPTH", 16),
        }
    }

    /// Request body limit in bytes, shared by upload and resolve
    pub fn body_limit_bytes(&self) -> usize {
        self.upload_max_mb.saturating_mul(1024 * 1024)
    }
}
