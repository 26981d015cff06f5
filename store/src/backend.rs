//! Key-value backend trait.

use crate::error::Result;

/// Key-value backend.
///
/// This trait abstracts over the external store (Redis). Handlers receive it
/// as an explicit dependency so they can run against an in-memory backend in
/// tests.
///
/// # Implementation Notes
///
/// - `is_configured` must not perform I/O
/// - Values are UTF-8 strings
/// - `set` overwrites unconditionally
pub trait KeyValueBackend: Send + Sync {
    /// Whether connection configuration is present.
    fn is_configured(&self) -> bool;

    /// Lightweight liveness probe.
    ///
    /// # Errors
    ///
    /// Returns error if the backend is unconfigured or does not answer.
    fn ping(&self) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Fetch the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails.
    fn get(&self, key: &str) -> impl std::future::Future<Output = Result<Option<String>>> + Send;

    /// Overwrite the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns error if the network request fails.
    fn set(&self, key: &str, value: String) -> impl std::future::Future<Output = Result<()>> + Send;
}
