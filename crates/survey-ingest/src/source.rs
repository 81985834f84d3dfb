//! Submission sources and the time-to-live fetch cache.
//!
//! Remote retrieval is an external collaborator: anything that can produce a
//! [`Workbook`] implements [`SubmissionSource`]. The cache is an explicit
//! value owned by the caller, not ambient state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::error::{IngestError, Result};
use crate::reader::read_workbook;
use crate::workbook::Workbook;

/// Anything that yields a survey workbook.
pub trait SubmissionSource {
    /// Stable cache key and log label.
    fn describe(&self) -> String;

    fn load(&self) -> Result<Workbook>;
}

/// Exports on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    primary_sheet: Option<String>,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            primary_sheet: None,
        }
    }

    pub fn with_primary_sheet(mut self, sheet: Option<String>) -> Self {
        self.primary_sheet = sheet;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SubmissionSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Workbook> {
        read_workbook(&self.path, self.primary_sheet.as_deref())
    }
}

/// Bounds a source's load time by running it on a worker thread.
///
/// A load that outlives the timeout is abandoned; its result is discarded.
#[derive(Debug)]
pub struct TimeoutSource<S> {
    inner: Arc<S>,
    timeout: Duration,
}

impl<S> TimeoutSource<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(inner),
            timeout,
        }
    }
}

impl<S> SubmissionSource for TimeoutSource<S>
where
    S: SubmissionSource + Send + Sync + 'static,
{
    fn describe(&self) -> String {
        self.inner.describe()
    }

    fn load(&self) -> Result<Workbook> {
        let (tx, rx) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        std::thread::spawn(move || {
            // The receiver is gone once the wait has timed out.
            let _ = tx.send(inner.load());
        });
        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => Err(IngestError::Timeout {
                source_name: self.describe(),
                timeout: self.timeout,
            }),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(IngestError::Source {
                source_name: self.describe(),
                message: "loader thread exited without a result".to_string(),
            }),
        }
    }
}

/// Time source for cache expiry.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    loaded_at: Instant,
    value: V,
}

/// Keyed cache whose entries expire after a fixed time-to-live.
///
/// Entries are served until they expire; the next request after expiry
/// performs one blocking reload. Failed loads leave the cache untouched.
#[derive(Debug)]
pub struct FetchCache<V, C = SystemClock> {
    ttl: Duration,
    clock: C,
    entries: HashMap<String, CacheEntry<V>>,
}

impl<V: Clone> FetchCache<V, SystemClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<V: Clone, C: Clock> FetchCache<V, C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            ttl,
            clock,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached value for `key` if it has not expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.entries.get(key)?;
        let age = self.clock.now().saturating_duration_since(entry.loaded_at);
        (age < self.ttl).then(|| entry.value.clone())
    }

    /// Serve `key` from cache or load it.
    ///
    /// Returns the value and `is_fresh`, which is true when the value was
    /// loaded by this call rather than served from the cache.
    pub fn fetch<F, E>(&mut self, key: &str, load: F) -> std::result::Result<(V, bool), E>
    where
        F: FnOnce() -> std::result::Result<V, E>,
    {
        if let Some(value) = self.get(key) {
            return Ok((value, false));
        }
        let value = load()?;
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                loaded_at: self.clock.now(),
                value: value.clone(),
            },
        );
        Ok((value, true))
    }

    /// Drop one entry so the next fetch reloads it.
    pub fn invalidate(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Result of a load that never fails.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub workbook: Workbook,
    /// User-facing message when the load failed and the workbook is empty.
    pub warning: Option<String>,
    pub is_fresh: bool,
}

/// Load through the cache, degrading to an empty workbook on failure.
pub fn load_or_empty<S, C>(cache: &mut FetchCache<Workbook, C>, source: &S) -> FetchOutcome
where
    S: SubmissionSource + ?Sized,
    C: Clock,
{
    let key = source.describe();
    match cache.fetch(&key, || source.load()) {
        Ok((workbook, is_fresh)) => {
            if is_fresh {
                info!(source = %key, records = workbook.primary.height(), "loaded submissions");
            }
            FetchOutcome {
                workbook,
                warning: None,
                is_fresh,
            }
        }
        Err(error) => {
            warn!(source = %key, %error, "failed to load submissions, continuing with no records");
            FetchOutcome {
                workbook: Workbook::empty(),
                warning: Some(format!("Error fetching data: {error}")),
                is_fresh: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct ManualClock {
        start: Instant,
        offset: Cell<Duration>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                start: Instant::now(),
                offset: Cell::new(Duration::ZERO),
            }
        }

        fn advance(&self, by: Duration) {
            self.offset.set(self.offset.get() + by);
        }
    }

    impl Clock for &ManualClock {
        fn now(&self) -> Instant {
            self.start + self.offset.get()
        }
    }

    #[test]
    fn serves_cached_value_until_expiry() {
        let clock = ManualClock::new();
        let mut cache = FetchCache::with_clock(Duration::from_secs(600), &clock);
        let loads = Cell::new(0);
        let load = || -> std::result::Result<u32, ()> {
            loads.set(loads.get() + 1);
            Ok(loads.get())
        };

        assert_eq!(cache.fetch("k", load), Ok((1, true)));
        clock.advance(Duration::from_secs(599));
        assert_eq!(cache.fetch("k", load), Ok((1, false)));
        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.fetch("k", load), Ok((2, true)));
        assert_eq!(loads.get(), 2);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let clock = ManualClock::new();
        let mut cache: FetchCache<u32, _> = FetchCache::with_clock(Duration::from_secs(60), &clock);
        assert_eq!(cache.fetch("k", || Err("down")), Err("down"));
        assert_eq!(cache.get("k"), None);
        assert_eq!(cache.fetch("k", || Ok::<_, &str>(7)), Ok((7, true)));
    }

    #[test]
    fn invalidate_forces_reload() {
        let mut cache = FetchCache::new(Duration::from_secs(60));
        assert_eq!(cache.fetch("k", || Ok::<_, ()>(1)), Ok((1, true)));
        assert!(cache.invalidate("k"));
        assert_eq!(cache.fetch("k", || Ok::<_, ()>(2)), Ok((2, true)));
        assert!(!cache.invalidate("other"));
    }

    struct FailingSource;

    impl SubmissionSource for FailingSource {
        fn describe(&self) -> String {
            "backend".to_string()
        }

        fn load(&self) -> Result<Workbook> {
            Err(IngestError::Source {
                source_name: "backend".to_string(),
                message: "HTTP 502".to_string(),
            })
        }
    }

    #[test]
    fn failure_degrades_to_empty_workbook() {
        let mut cache = FetchCache::new(Duration::from_secs(60));
        let outcome = load_or_empty(&mut cache, &FailingSource);
        assert!(outcome.workbook.is_empty());
        let warning = outcome.warning.unwrap();
        assert!(warning.starts_with("Error fetching data"));
        assert!(warning.contains("HTTP 502"));
    }

    struct SlowSource;

    impl SubmissionSource for SlowSource {
        fn describe(&self) -> String {
            "slow".to_string()
        }

        fn load(&self) -> Result<Workbook> {
            std::thread::sleep(Duration::from_millis(500));
            Ok(Workbook::empty())
        }
    }

    #[test]
    fn timeout_source_gives_up() {
        let source = TimeoutSource::new(SlowSource, Duration::from_millis(20));
        let err = source.load().unwrap_err();
        assert!(matches!(err, IngestError::Timeout { .. }));
    }
}
