//! Redis-based key-value backend.
//!
//! The connection manager is created lazily on first use, so a server that
//! is down at startup only makes the probe fail until it comes back.
//!
//! # Example
//!
//! ```no_run
//! use sviss_todo_store::RedisBackend;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = RedisBackend::new(std::env::var("REDIS_URL").ok().as_deref())?;
//! # Ok(())
//! # }
//! ```

use crate::backend::KeyValueBackend;
use crate::error::{Result, StoreError};
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

/// Upper bound on establishing a connection.
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(2);

/// Upper bound on a single command round trip.
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(2);

/// Redis-backed [`KeyValueBackend`].
///
/// Provides:
/// - Absent configuration as a first-class state
/// - Connection pooling via `ConnectionManager`
/// - Automatic reconnection after the first successful connect
/// - Bounded connect and command timeouts, one connect attempt per call
#[derive(Clone, Default)]
pub struct RedisBackend {
    /// `None` when no Redis URL was configured.
    connection: Option<Arc<RedisConnection>>,
}

struct RedisConnection {
    client: Client,
    manager: OnceCell<ConnectionManager>,
}

impl RedisBackend {
    /// Create a backend from an optional Redis URL.
    ///
    /// `None` or a blank URL yields an unconfigured backend.
    ///
    /// # Errors
    ///
    /// Returns error if the URL cannot be parsed. No connection is attempted.
    pub fn new(redis_url: Option<&str>) -> Result<Self> {
        let Some(url) = redis_url.map(str::trim).filter(|url| !url.is_empty()) else {
            return Ok(Self::unconfigured());
        };

        let client = Client::open(url).map_err(|e| {
            StoreError::InvalidConfig(format!("Failed to create Redis client: {e}"))
        })?;

        Ok(Self {
            connection: Some(Arc::new(RedisConnection {
                client,
                manager: OnceCell::new(),
            })),
        })
    }

    /// A backend with no connection configuration.
    #[must_use]
    pub const fn unconfigured() -> Self {
        Self { connection: None }
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        let Some(connection) = &self.connection else {
            return Err(StoreError::NotConfigured);
        };

        let manager = connection
            .manager
            .get_or_try_init(|| async {
                // One attempt per call; the next request tries again.
                let config = ConnectionManagerConfig::new()
                    .set_number_of_retries(0)
                    .set_connection_timeout(CONNECTION_TIMEOUT)
                    .set_response_timeout(RESPONSE_TIMEOUT);
                let manager =
                    ConnectionManager::new_with_config(connection.client.clone(), config).await?;
                tracing::info!("Connected to Redis");
                Ok::<_, StoreError>(manager)
            })
            .await?;

        Ok(manager.clone())
    }
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The URL may carry credentials, so it is never printed.
        f.debug_struct("RedisBackend")
            .field("configured", &self.connection.is_some())
            .finish()
    }
}

impl KeyValueBackend for RedisBackend {
    fn is_configured(&self) -> bool {
        self.connection.is_some()
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: () = conn.set(key, value).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_is_unconfigured() {
        assert!(matches!(RedisBackend::new(None), Ok(b) if !b.is_configured()));
        assert!(matches!(RedisBackend::new(Some("  ")), Ok(b) if !b.is_configured()));
    }

    #[test]
    fn test_url_is_parsed_without_connecting() {
        let backend = RedisBackend::new(Some("redis://127.0.0.1:6379"));
        assert!(matches!(backend, Ok(b) if b.is_configured()));
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        assert!(matches!(
            RedisBackend::new(Some("not a url")),
            Err(StoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_debug_hides_url() {
        let backend = RedisBackend::new(Some("redis://:secret@127.0.0.1:6379"));
        let rendered = backend.map(|b| format!("{b:?}")).unwrap_or_default();
        assert!(!rendered.contains("secret"));
    }

    #[tokio::test]
    async fn test_refused_connection_is_unavailable_promptly() {
        // Nothing listens on port 1
        let backend = RedisBackend::new(Some("redis://127.0.0.1:1")).unwrap_or_default();
        assert!(backend.is_configured());

        let started = std::time::Instant::now();
        let available =
            tokio::time::timeout(Duration::from_secs(10), crate::is_available(&backend)).await;

        assert!(matches!(available, Ok(false)));
        assert!(started.elapsed() < Duration::from_secs(10));

        // A second probe attempts a fresh connect and fails just as fast
        let again =
            tokio::time::timeout(Duration::from_secs(10), crate::is_available(&backend)).await;
        assert!(matches!(again, Ok(false)));
    }

    #[tokio::test]
    async fn test_unconfigured_operations_fail_fast() {
        let backend = RedisBackend::unconfigured();
        assert!(matches!(backend.ping().await, Err(StoreError::NotConfigured)));
        assert!(matches!(backend.get("todos").await, Err(StoreError::NotConfigured)));
    }
}
