use std::future::Future;

use crate::errors::CoreError;

/// Await `fetch`; on failure log it and return `fallback` instead.
///
/// Used for feeds where an empty list is a better screen than an error
/// banner. `context` names the request in the log line.
pub async fn with_fallback<T, F>(fetch: F, fallback: T, context: &str) -> T
where
    F: Future<Output = Result<T, CoreError>>,
{
    match fetch.await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(request = context, error = %e, "fetch failed, using fallback");
            fallback
        }
    }
}
