//! Deadlines for store calls.

use std::future::Future;
use std::time::Duration;

use serde_json::json;

use crate::error::AppError;

/// Runs a store operation, failing it as an internal error if it does not
/// finish within `limit`.
///
/// Dropping the inner future on timeout cancels the operation. Store writes
/// are single statements, so a cancelled write is either fully applied or not
/// at all.
pub async fn with_deadline<T, F>(limit: Duration, operation: &'static str, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            let timeout_ms = limit.as_millis() as u64;
            tracing::warn!(operation, timeout_ms, "Store operation timed out");
            Err(AppError::internal(
                "Store operation timed out",
                json!({ "operation": operation, "timeout_ms": timeout_ms }),
            ))
        }
    }
}
