//! Time-based cache around the upstream price lookup
//!
//! Holds the last successfully fetched USDT/KRW rate and serves it until it
//! is older than the configured TTL. The cache owns the only upstream call
//! in the system; handlers share one instance behind an `Arc`.

use crate::errors::UpstreamError;
use crate::logger::{self, LogTag};
use crate::price::client::PriceSource;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Time source, injectable so TTL logic is deterministic under test
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Last successfully fetched price and when it was fetched
#[derive(Debug, Clone, Copy)]
struct CachedPrice {
    value: f64,
    fetched_at: DateTime<Utc>,
}

/// Result of a price lookup
#[derive(Debug, Clone, Copy)]
pub struct PriceQuote {
    pub value: f64,
    /// True when the value was served without touching the upstream
    pub from_cache: bool,
}

/// TTL cache over a `PriceSource`
pub struct PriceCache {
    source: Arc<dyn PriceSource>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    state: RwLock<Option<CachedPrice>>,
}

impl PriceCache {
    pub fn new(source: Arc<dyn PriceSource>, clock: Arc<dyn Clock>, ttl_secs: i64) -> Self {
        Self {
            source,
            clock,
            ttl: Duration::seconds(ttl_secs),
            state: RwLock::new(None),
        }
    }

    /// Return the cached rate if it is still fresh, otherwise fetch a new one
    ///
    /// Freshness is exclusive-below: an entry exactly TTL old is refreshed.
    /// On upstream failure the stored value is left untouched and the error
    /// is returned; there is no retry within the call.
    pub async fn get_price(&self) -> Result<PriceQuote, UpstreamError> {
        let now = self.clock.now();

        if let Some(entry) = *self.state.read().await {
            // A zero or negative stored price counts as never cached.
            if entry.value > 0.0 && now.signed_duration_since(entry.fetched_at) < self.ttl {
                return Ok(PriceQuote {
                    value: entry.value,
                    from_cache: true,
                });
            }
        }

        let value = self.source.fetch_usdt_krw().await?;

        *self.state.write().await = Some(CachedPrice {
            value,
            fetched_at: now,
        });

        logger::debug(
            LogTag::Price,
            &format!("Refreshed USDT/KRW rate: {:.2}", value),
        );

        Ok(PriceQuote {
            value,
            from_cache: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Clock the tests move by hand
    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn starting_at(now: DateTime<Utc>) -> Self {
            Self {
                now: Mutex::new(now),
            }
        }

        fn set(&self, now: DateTime<Utc>) {
            *self.now.lock().unwrap() = now;
        }

        fn advance_secs(&self, secs: i64) {
            let mut now = self.now.lock().unwrap();
            *now = *now + Duration::seconds(secs);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    /// Upstream fake that pops scripted responses and counts calls
    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<f64, UpstreamError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<f64, UpstreamError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn push(&self, response: Result<f64, UpstreamError>) {
            self.responses.lock().unwrap().push_back(response);
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PriceSource for ScriptedSource {
        async fn fetch_usdt_krw(&self) -> Result<f64, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(UpstreamError::MissingPrice))
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn build_cache(
        responses: Vec<Result<f64, UpstreamError>>,
    ) -> (PriceCache, Arc<ScriptedSource>, Arc<ManualClock>) {
        let source = Arc::new(ScriptedSource::new(responses));
        let clock = Arc::new(ManualClock::starting_at(t0()));
        let cache = PriceCache::new(source.clone(), clock.clone(), 60);
        (cache, source, clock)
    }

    #[tokio::test]
    async fn test_first_call_fetches_upstream() {
        let (cache, source, _clock) = build_cache(vec![Ok(1350.25)]);

        let quote = cache.get_price().await.unwrap();

        assert_eq!(quote.value, 1350.25);
        assert!(!quote.from_cache);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_fresh_entry_served_without_network_call() {
        let (cache, source, clock) = build_cache(vec![Ok(1350.25)]);

        cache.get_price().await.unwrap();
        clock.advance_secs(30);

        let quote = cache.get_price().await.unwrap();

        assert_eq!(quote.value, 1350.25);
        assert!(quote.from_cache);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_entry_just_under_ttl_is_still_fresh() {
        let (cache, source, clock) = build_cache(vec![Ok(1350.25)]);

        cache.get_price().await.unwrap();
        clock.advance_secs(59);

        let quote = cache.get_price().await.unwrap();

        assert!(quote.from_cache);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_entry_exactly_ttl_old_is_refreshed() {
        let (cache, source, clock) = build_cache(vec![Ok(1350.25), Ok(1350.25)]);

        cache.get_price().await.unwrap();
        clock.advance_secs(60);

        let quote = cache.get_price().await.unwrap();

        assert!(!quote.from_cache);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_expired_entry_returns_fresh_value() {
        let (cache, source, clock) = build_cache(vec![Ok(1350.25), Ok(1351.0)]);

        cache.get_price().await.unwrap();
        clock.advance_secs(61);

        let quote = cache.get_price().await.unwrap();

        assert_eq!(quote.value, 1351.0);
        assert!(!quote.from_cache);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_failure_surfaces_error_and_keeps_state() {
        let (cache, source, clock) = build_cache(vec![
            Ok(1350.25),
            Err(UpstreamError::HttpStatus { status: 500 }),
        ]);

        cache.get_price().await.unwrap();
        clock.advance_secs(61);

        let err = cache.get_price().await.unwrap_err();
        assert!(matches!(err, UpstreamError::HttpStatus { status: 500 }));
        assert_eq!(source.calls(), 2);

        // Winding the clock back inside the first fetch's window proves the
        // failed refresh did not touch the stored entry.
        clock.set(t0() + Duration::seconds(30));
        let quote = cache.get_price().await.unwrap();
        assert_eq!(quote.value, 1350.25);
        assert!(quote.from_cache);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_failure_with_empty_cache_then_recovery() {
        let (cache, source, _clock) =
            build_cache(vec![Err(UpstreamError::Request("connection refused".into()))]);

        assert!(cache.get_price().await.is_err());
        assert_eq!(source.calls(), 1);

        source.push(Ok(1402.5));
        let quote = cache.get_price().await.unwrap();
        assert_eq!(quote.value, 1402.5);
        assert!(!quote.from_cache);
        assert_eq!(source.calls(), 2);
    }
}
