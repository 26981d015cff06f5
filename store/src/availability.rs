//! Store availability check.

use crate::backend::KeyValueBackend;

/// Probe whether the backend is configured and answering.
///
/// Returns `false` without any network call when configuration is absent.
/// Otherwise sends one ping, relying on the client's own timeouts. Failures
/// are logged and swallowed.
pub async fn is_available<B: KeyValueBackend>(backend: &B) -> bool {
    if !backend.is_configured() {
        tracing::debug!("Key-value backend not configured");
        return false;
    }

    match backend.ping().await {
        Ok(()) => true,
        Err(error) => {
            tracing::debug!(error = %error, "Key-value backend did not answer ping");
            false
        }
    }
}
