use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory store for uploaded playlist text, keyed by filename
///
/// Bounded: once `capacity` files are held, storing a new one evicts the
/// least recently stored. Nothing survives a restart.
#[derive(Clone)]
pub struct UploadStore {
    files: Arc<RwLock<LruCache<String, Arc<str>>>>,
}

impl UploadStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            files: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }

    /// Store (or replace) `content` under `filename`
    pub async fn put(&self, filename: &str, content: &str) {
        let mut files = self.files.write().await;
        if let Some((evicted, _)) = files.push(filename.to_string(), Arc::from(content)) {
            if evicted != filename {
                debug!("Upload store full, evicted {}", evicted);
            }
        }
    }

    pub async fn get(&self, filename: &str) -> Option<Arc<str>> {
        self.files.read().await.peek(filename).cloned()
    }

    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }
}
