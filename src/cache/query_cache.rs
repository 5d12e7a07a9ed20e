// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-wide query cache with request de-duplication.

use crate::cache::{Family, QueryKey};
use crate::error::ApiError;
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Stored result of the last completed fetch for a key.
#[derive(Debug, Clone)]
struct CacheEntry {
    data: Option<Value>,
    fetched_at: Instant,
    /// Set by invalidation; cleared only by a successful re-fetch.
    stale: bool,
    error: Option<String>,
}

/// Per-key fetch serialization plus the outcome of the last fetch, handed
/// to readers that waited on it.
#[derive(Default)]
struct FetchSlot {
    /// Bumped by each fetch that completes.
    completed: AtomicU64,
    outcome: Mutex<Option<Result<Value, ApiError>>>,
}

/// Snapshot of one key, in the shape a view consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    /// Last successfully fetched value (possibly stale)
    pub data: Option<T>,
    /// A fetch for this key is in flight
    pub is_loading: bool,
    /// Message from the most recent failed fetch
    pub error: Option<String>,
    /// Next read will hit the network
    pub is_stale: bool,
}

impl<T> QueryState<T> {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_success(&self) -> bool {
        self.data.is_some() && self.error.is_none()
    }
}

/// Query cache shared by every resource handle.
///
/// This cache encapsulates:
/// - Freshness: a value is served without I/O until `stale_after` elapses
///   or a write invalidates its family
/// - De-duplication: per-key async lock, so concurrent reads of one key
///   wait for the first fetch and share its result or its error
/// - Invalidation of in-flight reads: a result that arrives after its
///   family was invalidated is returned to its caller but stored as stale
pub struct QueryCache {
    entries: DashMap<QueryKey, CacheEntry>,
    /// Per-key fetch slots; an entry lives only while a reader holds it.
    fetch_slots: DashMap<QueryKey, Arc<FetchSlot>>,
    /// Keys being fetched; value is true once invalidated mid-fetch.
    in_flight: DashMap<QueryKey, bool>,
    stale_after: Duration,
}

impl QueryCache {
    pub fn new(stale_after: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            fetch_slots: DashMap::new(),
            in_flight: DashMap::new(),
            stale_after,
        }
    }

    /// Return the cached value for `key`, or fetch and store it.
    ///
    /// 1. Serve a fresh entry (fast path, no I/O)
    /// 2. Acquire the per-key fetch lock
    /// 3. If a fetch completed while we waited, return its outcome, error
    ///    included; a failed fetch is not retried for its waiters
    /// 4. Re-check freshness, then fetch and store the result (stale if
    ///    invalidated meanwhile)
    ///
    /// Dropping the returned future before it completes leaves the cache as
    /// it was; its waiters then fetch for themselves.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, ApiError>>,
    {
        if let Some(value) = self.get_fresh(&key) {
            tracing::debug!(key = %key, "Query cache hit");
            return decode(value);
        }

        let lease = SlotLease::acquire(self, &key);
        let seen = lease.slot.completed.load(Ordering::Acquire);
        let mut outcome = lease.slot.outcome.lock().await;

        if lease.slot.completed.load(Ordering::Acquire) != seen {
            if let Some(shared) = outcome.as_ref() {
                tracing::debug!(key = %key, "Query fetched by concurrent reader");
                return share(shared).and_then(decode);
            }
        }

        if let Some(value) = self.get_fresh(&key) {
            tracing::debug!(key = %key, "Query fetched by concurrent reader");
            return decode(value);
        }

        tracing::debug!(key = %key, "Query cache miss, fetching");
        let in_flight = InFlight::start(self, &key);

        let result = fetcher().await;
        match &result {
            Ok(value) => self.store(&key, value.clone()),
            Err(e) => self.record_error(&key, e),
        }
        in_flight.finish();

        *outcome = Some(share(&result));
        lease.slot.completed.fetch_add(1, Ordering::Release);
        result.and_then(decode)
    }

    /// Cached value if present and fresh.
    pub fn get_fresh(&self, key: &QueryKey) -> Option<Value> {
        let entry = self.entries.get(key)?;
        if entry.stale || entry.fetched_at.elapsed() >= self.stale_after {
            return None;
        }
        entry.data.clone()
    }

    /// Seed or overwrite a key with a fresh value.
    pub fn set(&self, key: QueryKey, value: Value) {
        self.entries.insert(
            key,
            CacheEntry {
                data: Some(value),
                fetched_at: Instant::now(),
                stale: false,
                error: None,
            },
        );
    }

    /// View-facing state of `key`. Undecodable data is reported as absent.
    pub fn state<T: DeserializeOwned>(&self, key: &QueryKey) -> QueryState<T> {
        let is_loading = self.in_flight.contains_key(key);
        match self.entries.get(key) {
            Some(entry) => QueryState {
                data: entry
                    .data
                    .clone()
                    .and_then(|v| serde_json::from_value(v).ok()),
                is_loading,
                error: entry.error.clone(),
                is_stale: entry.stale || entry.fetched_at.elapsed() >= self.stale_after,
            },
            None => QueryState {
                data: None,
                is_loading,
                error: None,
                is_stale: true,
            },
        }
    }

    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.get_fresh(key).is_none()
    }

    /// Mark every key starting with `prefix` stale, including keys whose
    /// fetch is still in flight. Returns the number of keys marked.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut marked = 0;
        for mut entry in self.entries.iter_mut() {
            if entry.key().starts_with(prefix) {
                entry.stale = true;
                marked += 1;
            }
        }
        for mut flight in self.in_flight.iter_mut() {
            if flight.key().starts_with(prefix) {
                *flight = true;
                marked += 1;
            }
        }
        marked
    }

    /// Invalidate several whole families.
    pub fn invalidate_families(&self, families: &[Family]) -> usize {
        let marked = families.iter().map(|f| self.invalidate(&f.key())).sum();
        tracing::info!(
            families = ?families.iter().map(|f| f.as_str()).collect::<Vec<_>>(),
            marked,
            "Invalidated cached queries"
        );
        marked
    }

    /// Forget everything (logout). In-flight fetches are marked stale.
    pub fn clear(&self) {
        self.entries.clear();
        self.fetch_slots.retain(|_, slot| Arc::strong_count(slot) > 1);
        for mut flight in self.in_flight.iter_mut() {
            *flight = true;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn store(&self, key: &QueryKey, value: Value) {
        // Read the mid-fetch flag before inserting and again when removing it
        // (InFlight::finish), so an invalidation racing with this insert is
        // never lost.
        let invalidated = self.in_flight.get(key).map(|f| *f).unwrap_or(false);
        if invalidated {
            tracing::debug!(key = %key, "Query invalidated during fetch, storing as stale");
        }
        self.entries.insert(
            key.clone(),
            CacheEntry {
                data: Some(value),
                fetched_at: Instant::now(),
                stale: invalidated,
                error: None,
            },
        );
    }

    fn record_error(&self, key: &QueryKey, error: &ApiError) {
        let message = error.message();
        tracing::debug!(key = %key, error = %message, "Query fetch failed");
        // Keep the old data and its stale marker so the next read retries.
        self.entries
            .entry(key.clone())
            .and_modify(|entry| entry.error = Some(message.clone()))
            .or_insert_with(|| CacheEntry {
                data: None,
                fetched_at: Instant::now(),
                stale: true,
                error: Some(message),
            });
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

/// Reader's hold on a key's fetch slot; the slot is dropped from the map
/// once its last reader is done, including on cancellation.
struct SlotLease<'a> {
    cache: &'a QueryCache,
    key: QueryKey,
    slot: Arc<FetchSlot>,
}

impl<'a> SlotLease<'a> {
    fn acquire(cache: &'a QueryCache, key: &QueryKey) -> Self {
        let slot = cache.fetch_slots.entry(key.clone()).or_default().clone();
        Self {
            cache,
            key: key.clone(),
            slot,
        }
    }
}

impl Drop for SlotLease<'_> {
    fn drop(&mut self) {
        // Two holders left: the map and this lease.
        self.cache
            .fetch_slots
            .remove_if(&self.key, |_, slot| Arc::strong_count(slot) == 2);
    }
}

/// Marks a key as being fetched; unmarks on drop, including cancellation.
struct InFlight<'a> {
    cache: &'a QueryCache,
    key: QueryKey,
}

impl<'a> InFlight<'a> {
    fn start(cache: &'a QueryCache, key: &QueryKey) -> Self {
        cache.in_flight.insert(key.clone(), false);
        Self {
            cache,
            key: key.clone(),
        }
    }

    /// Clear the in-flight marker, applying any invalidation that landed
    /// after the result was stored.
    fn finish(self) {
        if let Some((_, true)) = self.cache.in_flight.remove(&self.key) {
            if let Some(mut entry) = self.cache.entries.get_mut(&self.key) {
                entry.stale = true;
            }
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.cache.in_flight.remove(&self.key);
    }
}

fn share(outcome: &Result<Value, ApiError>) -> Result<Value, ApiError> {
    match outcome {
        Ok(value) => Ok(value.clone()),
        Err(e) => Err(e.duplicate()),
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}
