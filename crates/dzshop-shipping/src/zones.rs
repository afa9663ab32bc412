//! Zone repository: fetching, normalizing, and caching shipping zones.
//!
//! One repository instance is shared (via `Arc`) by every consumer in the
//! process, so the cache record it guards is effectively global state. The
//! record has three cooperating layers:
//!
//! - an in-memory `{data, timestamp}` pair served while younger than the TTL,
//! - a pending shared fetch that concurrent cold callers pile onto, so any
//!   number of simultaneous requests produce exactly one HTTP call and all
//!   observe the same outcome,
//! - a durable JSON mirror read once on cold start and rewritten after every
//!   successful fetch.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};
use serde::{Deserialize, Serialize};

use crate::error::ShippingError;
use crate::normalize::normalize_zone;
use crate::store::CacheStore;
use crate::types::{ParsedShippingZone, ZonesEnvelope};

/// Fixed key of the persisted zone cache entry.
pub const ZONES_CACHE_KEY: &str = "shipping_zones_cache";

const DEFAULT_TTL: Duration = Duration::from_secs(300);
const USER_AGENT: &str = "dzshop/0.1 (storefront)";

type Zones = Arc<Vec<ParsedShippingZone>>;
type PendingFetch = Shared<BoxFuture<'static, Result<Zones, ShippingError>>>;

/// Serialized form of the durable cache entry.
#[derive(Serialize, Deserialize)]
struct PersistedZones {
    data: Vec<ParsedShippingZone>,
    timestamp: i64,
}

struct CachedZones {
    zones: Zones,
    fetched_at_ms: i64,
}

#[derive(Default)]
struct CacheState {
    data: Option<CachedZones>,
    pending: Option<PendingFetch>,
}

struct Inner {
    http: reqwest::Client,
    zones_url: String,
    ttl_ms: i64,
    store: Option<Arc<dyn CacheStore>>,
    state: Mutex<CacheState>,
}

/// Fetches the aggregated zones endpoint and caches the normalized result.
pub struct ZoneRepository {
    inner: Arc<Inner>,
}

impl ZoneRepository {
    /// Creates a repository with the default 5-minute TTL and no durable store.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingError::Fetch`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(zones_url: &str, timeout_secs: u64) -> Result<Self, ShippingError> {
        Self::build(zones_url, timeout_secs, DEFAULT_TTL, None)
    }

    /// Creates a repository with an explicit TTL (tests use short ones).
    ///
    /// # Errors
    ///
    /// Returns [`ShippingError::Fetch`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn with_ttl(
        zones_url: &str,
        timeout_secs: u64,
        ttl: Duration,
    ) -> Result<Self, ShippingError> {
        Self::build(zones_url, timeout_secs, ttl, None)
    }

    /// Creates a repository backed by a durable cache store.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingError::Fetch`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn with_cache(
        zones_url: &str,
        timeout_secs: u64,
        ttl: Duration,
        store: Arc<dyn CacheStore>,
    ) -> Result<Self, ShippingError> {
        Self::build(zones_url, timeout_secs, ttl, Some(store))
    }

    fn build(
        zones_url: &str,
        timeout_secs: u64,
        ttl: Duration,
        store: Option<Arc<dyn CacheStore>>,
    ) -> Result<Self, ShippingError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                zones_url: zones_url.to_owned(),
                ttl_ms: i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX),
                store,
                state: Mutex::new(CacheState::default()),
            }),
        })
    }

    /// Returns the current zone list, fetching it if the cache is cold or
    /// expired. Concurrent callers during a fetch share its outcome.
    ///
    /// # Errors
    ///
    /// Returns a [`ShippingError`] when the endpoint is unreachable, answers
    /// non-2xx, sends an error envelope, or sends an undecodable body. A
    /// failed fetch leaves the cache unpopulated so the next call retries.
    pub async fn zones(&self) -> Result<Zones, ShippingError> {
        if let Some(zones) = self.cached_zones() {
            return Ok(zones);
        }
        self.join_or_start_fetch().await
    }

    /// Warms the cache in the background. A no-op when the cache is already
    /// warm or a fetch is in flight; failures are logged, not returned.
    /// Intended to run once at application start.
    pub fn preload(&self) {
        if self.cached_zones().is_some() {
            return;
        }
        let fetch = self.join_or_start_fetch();
        tokio::spawn(async move {
            if let Err(err) = fetch.await {
                tracing::warn!(error = %err, "shipping zones preload failed");
            }
        });
    }

    /// Non-blocking read of the in-memory cache; `None` when cold or expired.
    #[must_use]
    pub fn snapshot(&self) -> Option<Zones> {
        let now = now_ms();
        let state = self.state();
        state.data.as_ref().and_then(|cached| {
            (now - cached.fetched_at_ms < self.inner.ttl_ms).then(|| Arc::clone(&cached.zones))
        })
    }

    /// Whether a fetch is currently in flight.
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.state().pending.is_some()
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Fresh in-memory data, adopting the durable mirror on a cold start.
    fn cached_zones(&self) -> Option<Zones> {
        let now = now_ms();
        let mut state = self.state();

        if let Some(cached) = &state.data {
            if now - cached.fetched_at_ms < self.inner.ttl_ms {
                return Some(Arc::clone(&cached.zones));
            }
            // Expired in memory; the persisted mirror is no fresher.
            return None;
        }

        if let Some(adopted) = self.inner.load_persisted(now) {
            tracing::debug!("adopted persisted shipping zone cache");
            let zones = Arc::clone(&adopted.zones);
            state.data = Some(adopted);
            return Some(zones);
        }

        None
    }

    fn join_or_start_fetch(&self) -> PendingFetch {
        let mut state = self.state();
        if let Some(pending) = &state.pending {
            return pending.clone();
        }
        let inner = Arc::clone(&self.inner);
        let fetch = async move { Inner::fetch_and_cache(&inner).await }
            .boxed()
            .shared();
        state.pending = Some(fetch.clone());
        fetch
    }
}

impl Inner {
    fn state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn fetch_and_cache(inner: &Arc<Inner>) -> Result<Zones, ShippingError> {
        let result = inner.fetch_zones().await;
        let mut state = inner.state();
        state.pending = None;
        match result {
            Ok(parsed) => {
                let zones: Zones = Arc::new(parsed);
                let fetched_at_ms = now_ms();
                state.data = Some(CachedZones {
                    zones: Arc::clone(&zones),
                    fetched_at_ms,
                });
                drop(state);
                inner.persist(&zones, fetched_at_ms);
                Ok(zones)
            }
            Err(err) => Err(err),
        }
    }

    async fn fetch_zones(&self) -> Result<Vec<ParsedShippingZone>, ShippingError> {
        let response = self.http.get(&self.zones_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ShippingError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let envelope: ZonesEnvelope =
            serde_json::from_str(&body).map_err(|e| ShippingError::Deserialize(e.to_string()))?;
        if !envelope.success {
            return Err(ShippingError::Api);
        }

        tracing::debug!(
            total = envelope.total_zones,
            active = envelope.active_zones,
            "fetched shipping zones"
        );
        Ok(envelope.zones.into_iter().map(normalize_zone).collect())
    }

    /// Reads the persisted `{data, timestamp}` pair; expired or corrupt
    /// entries are discarded and the caller proceeds as a cold cache.
    fn load_persisted(&self, now_ms: i64) -> Option<CachedZones> {
        let store = self.store.as_ref()?;
        let raw = store.load(ZONES_CACHE_KEY)?;

        let persisted: PersistedZones = match serde_json::from_str(&raw) {
            Ok(persisted) => persisted,
            Err(err) => {
                tracing::debug!(error = %err, "discarding corrupt persisted zone cache");
                if let Err(err) = store.remove(ZONES_CACHE_KEY) {
                    tracing::debug!(error = %err, "failed to drop corrupt zone cache entry");
                }
                return None;
            }
        };

        if now_ms - persisted.timestamp >= self.ttl_ms {
            return None;
        }

        Some(CachedZones {
            zones: Arc::new(persisted.data),
            fetched_at_ms: persisted.timestamp,
        })
    }

    fn persist(&self, zones: &Zones, fetched_at_ms: i64) {
        let Some(store) = &self.store else { return };
        let persisted = PersistedZones {
            data: zones.as_ref().clone(),
            timestamp: fetched_at_ms,
        };
        match serde_json::to_string(&persisted) {
            Ok(raw) => {
                if let Err(err) = store.save(ZONES_CACHE_KEY, &raw) {
                    tracing::warn!(error = %err, "failed to persist zone cache");
                }
            }
            Err(err) => tracing::warn!(error = %err, "failed to serialize zone cache"),
        }
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCacheStore;

    fn repo_with_store(store: Arc<dyn CacheStore>, ttl: Duration) -> ZoneRepository {
        ZoneRepository::with_cache("http://127.0.0.1:9/api/shipping", 5, ttl, store)
            .expect("repository construction should not fail")
    }

    #[test]
    fn fresh_persisted_entry_is_adopted() {
        let store = Arc::new(MemoryCacheStore::new());
        let persisted = PersistedZones {
            data: vec![ParsedShippingZone {
                id: 1,
                name: "Centre".to_owned(),
                locations: vec!["DZ".to_owned()],
                methods: vec![],
            }],
            timestamp: now_ms(),
        };
        store
            .save(ZONES_CACHE_KEY, &serde_json::to_string(&persisted).unwrap())
            .unwrap();

        let repo = repo_with_store(store, Duration::from_secs(300));
        let zones = repo.cached_zones().expect("should adopt persisted cache");
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].name, "Centre");
        // Now also visible to the non-blocking snapshot.
        assert!(repo.snapshot().is_some());
    }

    #[test]
    fn expired_persisted_entry_is_ignored() {
        let store = Arc::new(MemoryCacheStore::new());
        let persisted = PersistedZones {
            data: vec![],
            timestamp: now_ms() - 600_000,
        };
        store
            .save(ZONES_CACHE_KEY, &serde_json::to_string(&persisted).unwrap())
            .unwrap();

        let repo = repo_with_store(store, Duration::from_secs(300));
        assert!(repo.cached_zones().is_none());
    }

    #[test]
    fn corrupt_persisted_entry_is_discarded() {
        let store = Arc::new(MemoryCacheStore::new());
        store.save(ZONES_CACHE_KEY, "{not json").unwrap();

        let repo = repo_with_store(Arc::clone(&store) as Arc<dyn CacheStore>, Duration::from_secs(300));
        assert!(repo.cached_zones().is_none());
        // The corrupt entry is dropped so it is not re-parsed every read.
        assert!(store.load(ZONES_CACHE_KEY).is_none());
    }

    #[test]
    fn snapshot_is_none_on_cold_cache() {
        let repo = ZoneRepository::new("http://127.0.0.1:9/api/shipping", 5)
            .expect("repository construction should not fail");
        assert!(repo.snapshot().is_none());
        assert!(!repo.is_fetching());
    }
}
