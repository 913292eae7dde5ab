//! @ai:module:intent Timed wrapper around single backend invocations
//! @ai:module:layer application
//! @ai:module:public_api TimedInvoker, Timed
//! @ai:module:stateless true

use crate::error::BackendError;
use std::future::Future;
use std::time::{Duration, Instant};

/// @ai:intent A successful call result with its wall-clock duration
#[derive(Debug, Clone)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

/// @ai:intent Wraps exactly one backend call with a monotonic clock
///
/// The clock starts immediately before the call is polled and stops
/// immediately after it completes, so setup done before `invoke` never
/// counts. Failures are returned, not retried, and carry the original
/// cause; the invoker itself never panics the batch.
///
/// One call is in flight at a time: the harness issues calls
/// sequentially because inference saturates a single compute resource,
/// and overlapping calls would corrupt the timing measurements.
pub struct TimedInvoker;

impl TimedInvoker {
    /// @ai:intent Create a new invoker
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Invoke one backend call, measuring its duration
    /// @ai:effects io
    pub async fn invoke<T, F>(&self, call: F) -> Result<Timed<T>, BackendError>
    where
        F: Future<Output = Result<T, BackendError>>,
    {
        let start = Instant::now();
        let value = call.await?;
        let elapsed = start.elapsed();

        Ok(Timed { value, elapsed })
    }
}

impl Default for TimedInvoker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invoke_measures_elapsed() {
        let invoker = TimedInvoker::new();
        let timed = invoker
            .invoke(async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok::<_, BackendError>(42)
            })
            .await
            .unwrap();

        assert_eq!(timed.value, 42);
        assert!(timed.elapsed >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_invoke_passes_through_failure() {
        let invoker = TimedInvoker::new();
        let err = invoker
            .invoke(async { Err::<(), _>(BackendError::failure("model crashed")) })
            .await
            .unwrap_err();

        assert!(err.to_string().contains("model crashed"));
    }
}
