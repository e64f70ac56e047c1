//! Racing a future against a fixed deadline.

use std::future::Future;
use std::time::Duration;

/// The deadline elapsed before the future completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("operation timed out after {}ms", .after.as_millis())]
pub struct TimedOut {
    pub after: Duration,
}

/// Run `future` to completion or fail with [`TimedOut`] after `deadline`.
///
/// The future is dropped, and so cancelled, when the deadline wins.
pub async fn with_deadline<F>(deadline: Duration, future: F) -> Result<F::Output, TimedOut>
where
    F: Future,
{
    tokio::time::timeout(deadline, future)
        .await
        .map_err(|_| TimedOut { after: deadline })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn returns_output_when_fast() {
        let result = with_deadline(Duration::from_secs(5), async { 7 }).await;
        assert_eq!(result, Ok(7));
    }

    #[rstest]
    #[tokio::test]
    async fn times_out_when_slow() {
        let deadline = Duration::from_millis(10);
        let result = with_deadline(deadline, std::future::pending::<()>()).await;
        let error = result.expect_err("pending future never completes");
        assert_eq!(error, TimedOut { after: deadline });
        assert_eq!(error.to_string(), "operation timed out after 10ms");
    }
}
