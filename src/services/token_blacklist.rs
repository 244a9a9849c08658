//! Token blacklist for server-side JWT revocation.
//!
//! Revoked token ids are kept in memory until the token would have expired
//! anyway, after which they are dropped.

use dashmap::DashMap;
use log::{debug, info};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Thread-safe set of revoked token ids (`jti`) with their expiry.
#[derive(Clone)]
pub struct TokenBlacklist {
    tokens: Arc<DashMap<String, Instant>>,
    last_cleanup: Arc<RwLock<Instant>>,
}

impl TokenBlacklist {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(DashMap::new()),
            last_cleanup: Arc::new(RwLock::new(Instant::now())),
        }
    }

    /// Revoke a token id until `exp` (Unix epoch seconds, including any leeway).
    pub async fn revoke(&self, jti: &str, exp: usize) {
        let now_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as usize)
            .unwrap_or_default();

        // Past `exp` the token fails validation on its own.
        if exp > now_secs {
            let ttl = Duration::from_secs((exp - now_secs) as u64);
            self.tokens.insert(jti.to_string(), Instant::now() + ttl);
            debug!("Token {} revoked for {:?}", jti, ttl);
        }

        self.maybe_cleanup().await;
    }

    pub fn is_revoked(&self, jti: &str) -> bool {
        match self.tokens.get(jti) {
            Some(expires_at) if *expires_at > Instant::now() => true,
            Some(expires_at) => {
                drop(expires_at);
                self.tokens.remove(jti);
                false
            }
            None => false,
        }
    }

    async fn maybe_cleanup(&self) {
        let should_cleanup = {
            let last = self.last_cleanup.read().await;
            last.elapsed() >= CLEANUP_INTERVAL
        };

        if should_cleanup {
            let mut last = self.last_cleanup.write().await;
            if last.elapsed() >= CLEANUP_INTERVAL {
                self.cleanup();
                *last = Instant::now();
            }
        }
    }

    fn cleanup(&self) {
        let now = Instant::now();
        let before = self.tokens.len();
        self.tokens.retain(|_, expires_at| *expires_at > now);

        let removed = before - self.tokens.len();
        if removed > 0 {
            info!(
                "Token blacklist cleanup: removed {} expired entries, {} remaining",
                removed,
                self.tokens.len()
            );
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}

impl Default for TokenBlacklist {
    fn default() -> Self {
        Self::new()
    }
}
