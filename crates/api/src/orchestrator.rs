//! Remote-first, local-fallback execution.
//!
//! Remote failures are never surfaced to the client: they are logged and the
//! local path runs instead. Only a local failure becomes an error.

use std::future::Future;

use medvision_ai::RemoteError;
use medvision_core::effects::ProcessingMethod;

/// Run `remote`; on any error run `local` instead.
///
/// Returns the value together with the method that produced it: `remote_method`
/// on success, otherwise whatever `local` reports.
pub async fn remote_or_local<T, E, R, L, F>(
    operation: &'static str,
    remote_method: ProcessingMethod,
    remote: R,
    local: L,
) -> Result<(T, ProcessingMethod), E>
where
    R: Future<Output = Result<T, RemoteError>>,
    L: FnOnce() -> F,
    F: Future<Output = Result<(T, ProcessingMethod), E>>,
{
    match remote.await {
        Ok(value) => {
            tracing::info!(operation, "Remote generation succeeded");
            Ok((value, remote_method))
        }
        Err(RemoteError::NotConfigured) => {
            tracing::debug!(operation, "Remote generation not configured, using local filters");
            local().await
        }
        Err(e) => {
            tracing::warn!(operation, error = %e, "Remote generation failed, using local filters");
            local().await
        }
    }
}
