//! Mock backend for testing.

use crate::backend::KeyValueBackend;
use crate::error::{Result, StoreError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Mock key-value backend.
///
/// Uses in-memory storage. Configuration and reachability can be toggled to
/// exercise the degraded paths, and every ping and write is counted.
#[derive(Debug, Clone)]
pub struct MockBackend {
    inner: Arc<Mutex<MockBackendState>>,
}

#[derive(Debug)]
struct MockBackendState {
    configured: bool,
    reachable: bool,
    failing_reads: bool,
    failing_writes: bool,
    values: HashMap<String, String>,
    pings: usize,
    writes: usize,
}

impl MockBackend {
    /// A configured, reachable backend.
    #[must_use]
    pub fn new() -> Self {
        Self::with_flags(true, true)
    }

    /// A backend with no connection configuration.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self::with_flags(false, false)
    }

    /// A configured backend that does not answer.
    #[must_use]
    pub fn unreachable() -> Self {
        Self::with_flags(true, false)
    }

    fn with_flags(configured: bool, reachable: bool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockBackendState {
                configured,
                reachable,
                failing_reads: false,
                failing_writes: false,
                values: HashMap::new(),
                pings: 0,
                writes: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockBackendState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Simulate the server going away or coming back.
    pub fn set_reachable(&self, reachable: bool) {
        self.lock().reachable = reachable;
    }

    /// Make `get` fail while pings still succeed.
    pub fn set_failing_reads(&self, failing: bool) {
        self.lock().failing_reads = failing;
    }

    /// Make `set` fail while pings still succeed.
    pub fn set_failing_writes(&self, failing: bool) {
        self.lock().failing_writes = failing;
    }

    /// Seed a raw value, bypassing reachability and the write counter.
    pub fn insert_raw(&self, key: &str, value: impl Into<String>) {
        self.lock().values.insert(key.to_string(), value.into());
    }

    /// Raw value under `key` (for testing).
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().values.get(key).cloned()
    }

    /// Number of pings received (for testing).
    #[must_use]
    pub fn ping_count(&self) -> usize {
        self.lock().pings
    }

    /// Number of successful writes (for testing).
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn check_reachable(state: &MockBackendState) -> Result<()> {
        if !state.configured {
            return Err(StoreError::NotConfigured);
        }
        if !state.reachable {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueBackend for MockBackend {
    fn is_configured(&self) -> bool {
        self.lock().configured
    }

    async fn ping(&self) -> Result<()> {
        let mut state = self.lock();
        state.pings += 1;
        Self::check_reachable(&state)
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let state = self.lock();
        Self::check_reachable(&state)?;
        if state.failing_reads {
            return Err(StoreError::Unavailable("read failed".to_string()));
        }
        Ok(state.values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut state = self.lock();
        Self::check_reachable(&state)?;
        if state.failing_writes {
            return Err(StoreError::Unavailable("write failed".to_string()));
        }
        state.values.insert(key.to_string(), value);
        state.writes += 1;
        Ok(())
    }
}
