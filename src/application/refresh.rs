use std::fmt::Display;
use std::future::Future;

use futures::future::{Either, LocalBoxFuture, select};

use crate::domain::errors::{GestureError, GestureResult};

/// First-settled-wins race between `task` and `timeout`.
///
/// Whichever side loses is dropped before this returns, so a pending timer
/// never fires after the race is over.
pub async fn race_with_timeout<F, T>(
    task: F,
    timeout: LocalBoxFuture<'static, ()>,
    timeout_ms: u32,
) -> GestureResult<T>
where
    F: Future<Output = T>,
{
    let task = Box::pin(task);
    match select(task, timeout).await {
        Either::Left((value, pending_timeout)) => {
            drop(pending_timeout);
            Ok(value)
        }
        Either::Right(((), pending_task)) => {
            drop(pending_task);
            Err(GestureError::RefreshTimedOut { after_ms: timeout_ms })
        }
    }
}

/// Run a caller-supplied refresh future under the safety timeout and fold
/// every way it can end into one `GestureResult`.
pub async fn run_refresh<F, E>(
    refresh: F,
    timeout: LocalBoxFuture<'static, ()>,
    timeout_ms: u32,
) -> GestureResult<()>
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match race_with_timeout(refresh, timeout, timeout_ms).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(GestureError::RefreshFailed(e.to_string())),
        Err(timed_out) => Err(timed_out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use futures::executor::block_on;
    use futures::future::{pending, ready};

    #[test]
    fn settled_task_wins() {
        let out = block_on(race_with_timeout(ready(7), pending().boxed_local(), 100));
        assert_eq!(out, Ok(7));
    }

    #[test]
    fn timeout_wins_over_hanging_task() {
        let out = block_on(race_with_timeout(pending::<()>(), ready(()).boxed_local(), 15_000));
        assert_eq!(out, Err(GestureError::RefreshTimedOut { after_ms: 15_000 }));
    }

    #[test]
    fn rejection_is_folded_into_refresh_failed() {
        let out = block_on(run_refresh(
            ready(Err::<(), _>("quote service unavailable")),
            pending().boxed_local(),
            100,
        ));
        assert_eq!(out, Err(GestureError::RefreshFailed("quote service unavailable".to_string())));
    }
}
