//! Timers
//!
//! Browser timers on wasm32, tokio timers elsewhere.

use std::future::Future;
use std::pin::pin;
use std::time::Duration;

use futures::future::{self, Either};

/// The bound passed to [`with_timeout`] expired first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed;

#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Race `fut` against a timer. The loser is dropped, which aborts an
/// in-flight request.
pub async fn with_timeout<F: Future>(fut: F, limit: Duration) -> Result<F::Output, Elapsed> {
    let fut = pin!(fut);
    let timer = pin!(sleep(limit));
    match future::select(fut, timer).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(((), _)) => Err(Elapsed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_ready_future_wins() {
        let out = with_timeout(async { 7 }, Duration::from_millis(10)).await;
        assert_eq!(out, Ok(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_future_times_out() {
        let out = with_timeout(future::pending::<()>(), Duration::from_secs(5)).await;
        assert_eq!(out, Err(Elapsed));
    }
}
