//! Source resolution
//!
//! One descriptor in, one [`ResolutionResult`] out. Only the remote playlist
//! variant can fail; every other variant degrades to an empty result.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::models::{Channel, ResolutionResult, SourceDescriptor};
use crate::services::http::{FetchError, HttpFetch};
use crate::services::stalker::{StalkerAccount, StalkerClient};
use crate::services::xtream::{XtreamClient, XtreamCredentials};
use crate::services::{folder_scanner, m3u_parser, playlist_fetcher};

/// Label given to a direct stream URL
const DIRECT_STREAM_NAME: &str = "Direct Stream";

/// Dispatches descriptors to the parser, fetcher, adapters or folder scanner
///
/// Holds no per-request state; safe to share across concurrent requests.
#[derive(Clone)]
pub struct SourceResolver {
    http: Arc<dyn HttpFetch>,
    folder_scan_max_depth: usize,
}

impl SourceResolver {
    pub fn new(http: Arc<dyn HttpFetch>, folder_scan_max_depth: usize) -> Self {
        Self {
            http,
            folder_scan_max_depth,
        }
    }

    pub async fn resolve(&self, source: SourceDescriptor) -> Result<ResolutionResult, FetchError> {
        debug!("Resolving {} source", source.kind());

        let result = match source {
            SourceDescriptor::Direct { url } => {
                let url = url.trim();
                if url.starts_with('#') || url.contains(['\r', '\n']) {
                    warn!("Rejecting direct URL {:?}", url);
                    return Ok(ResolutionResult::empty());
                }
                ResolutionResult::from_channels(
                    Channel::new(DIRECT_STREAM_NAME, url).into_iter().collect(),
                )
            }
            SourceDescriptor::Upload { filename, content } => {
                if content.trim().is_empty() {
                    debug!("Upload {:?} has no content", filename);
                    return Ok(ResolutionResult::empty());
                }
                ResolutionResult::from_channels(m3u_parser::parse(&content))
            }
            SourceDescriptor::Url { url } => {
                let url = url.trim();
                if url.is_empty() {
                    return Ok(ResolutionResult::empty());
                }
                ResolutionResult::from_channels(
                    playlist_fetcher::fetch_and_parse(self.http.as_ref(), url).await?,
                )
            }
            SourceDescriptor::Xtream {
                server,
                username,
                password,
            } => {
                let creds = XtreamCredentials::new(&server, &username, &password);
                let client = XtreamClient::new(self.http.clone(), creds);
                ResolutionResult::from_channels(client.live_channels().await)
            }
            SourceDescriptor::Stalker { server, mac } => {
                let client = StalkerClient::new(self.http.clone(), StalkerAccount::new(&server, &mac));
                ResolutionResult::from_channels(client.channels().await)
            }
            SourceDescriptor::Folder { path } => {
                let path = path.trim();
                if path.is_empty() {
                    return Ok(ResolutionResult::empty());
                }
                self.scan_folder(PathBuf::from(path)).await
            }
        };

        Ok(result)
    }

    /// Run the blocking folder scan off the async runtime
    async fn scan_folder(&self, root: PathBuf) -> ResolutionResult {
        let max_depth = self.folder_scan_max_depth;
        match tokio::task::spawn_blocking(move || folder_scanner::scan(&root, max_depth)).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Folder scan task failed: {}", e);
                ResolutionResult::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::http::testing::StubFetcher;
    use tempfile::TempDir;

    fn resolver(http: StubFetcher) -> SourceResolver {
        SourceResolver::new(Arc::new(http), 16)
    }

    #[tokio::test]
    async fn test_direct_url_is_single_channel() {
        let result = resolver(StubFetcher::new())
            .resolve(SourceDescriptor::Direct {
                url: " http://x/live.m3u8 ".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(
            result,
            ResolutionResult::from_channels(vec![
                Channel::new(DIRECT_STREAM_NAME, "http://x/live.m3u8").unwrap()
            ])
        );
    }

    #[tokio::test]
    async fn test_direct_url_with_line_breaks_yields_nothing() {
        for url in [
            "http://a\n#EXTINF:-1,Injected\nhttp://evil",
            "http://a\r\nhttp://b",
            "#EXTINF:-1,Only a tag",
        ] {
            let result = resolver(StubFetcher::new())
                .resolve(SourceDescriptor::Direct { url: url.to_string() })
                .await
                .unwrap();
            assert!(result.is_empty(), "url: {url:?}");
        }
    }

    #[tokio::test]
    async fn test_empty_fields_resolve_to_nothing() {
        let http = Arc::new(StubFetcher::new());
        let resolver = SourceResolver::new(http.clone(), 16);

        for source in [
            SourceDescriptor::Direct { url: "  ".to_string() },
            SourceDescriptor::Upload {
                filename: "x.m3u".to_string(),
                content: String::new(),
            },
            SourceDescriptor::Url { url: String::new() },
            SourceDescriptor::Xtream {
                server: String::new(),
                username: String::new(),
                password: String::new(),
            },
            SourceDescriptor::Stalker {
                server: String::new(),
                mac: String::new(),
            },
            SourceDescriptor::Folder { path: String::new() },
        ] {
            let result = resolver.resolve(source).await.unwrap();
            assert!(result.is_empty());
        }

        assert!(http.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_parses_content() {
        let result = resolver(StubFetcher::new())
            .resolve(SourceDescriptor::Upload {
                filename: "list.m3u".to_string(),
                content: "#EXTM3U\n#EXTINF:-1,A\nhttp://x/a\n".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.channels, vec![Channel::new("A", "http://x/a").unwrap()]);
        assert!(result.folders.is_empty());
    }

    #[tokio::test]
    async fn test_remote_url_failure_is_hard_error() {
        let result = resolver(StubFetcher::new())
            .resolve(SourceDescriptor::Url {
                url: "http://unreachable.invalid/list.m3u".to_string(),
            })
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_remote_url_is_idempotent() {
        let resolver = resolver(StubFetcher::new().with(
            "http://x/list.m3u",
            200,
            "#EXTINF:-1,A\nhttp://x/a\n#EXTINF:-1,B\nhttp://x/b\n",
        ));
        let source = SourceDescriptor::Url {
            url: "http://x/list.m3u".to_string(),
        };

        let first = resolver.resolve(source.clone()).await.unwrap();
        let second = resolver.resolve(source).await.unwrap();
        assert_eq!(first.channels.len(), 2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_xtream_and_stalker_dispatch() {
        let resolver = resolver(
            StubFetcher::new()
                .with(
                    "http://xt/player_api.php?username=u&password=p&action=get_live_streams",
                    200,
                    r#"[{"name":"A","stream_url":"u1"}]"#,
                )
                .with(
                    "http://st/portal.php?type=stb&action=get_profile&mac=AA",
                    200,
                    r#"{"channels":[{"name":"B","url":"u2"}]}"#,
                ),
        );

        let xtream = resolver
            .resolve(SourceDescriptor::Xtream {
                server: "http://xt".to_string(),
                username: "u".to_string(),
                password: "p".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(xtream.channels, vec![Channel::new("A", "u1").unwrap()]);

        let stalker = resolver
            .resolve(SourceDescriptor::Stalker {
                server: "http://st".to_string(),
                mac: "AA".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(stalker.channels, vec![Channel::new("B", "u2").unwrap()]);
    }

    #[tokio::test]
    async fn test_account_failures_are_soft() {
        let result = resolver(StubFetcher::new())
            .resolve(SourceDescriptor::Xtream {
                server: "http://down".to_string(),
                username: "u".to_string(),
                password: "p".to_string(),
            })
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_folder_dispatch() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/list.m3u"), "#EXTINF:-1,A\nhttp://x/a\n").unwrap();

        let result = resolver(StubFetcher::new())
            .resolve(SourceDescriptor::Folder {
                path: dir.path().to_string_lossy().into_owned(),
            })
            .await
            .unwrap();

        assert_eq!(result.folders.len(), 1);
        assert_eq!(result.folders[0].name, "sub");
        assert_eq!(result.channels, vec![Channel::new("A", "http://x/a").unwrap()]);
    }
}
