//! Miscellaneous utility structs and functions.

mod errors;

use std::future::Future;

use derive_more::{Display, From};
use futures::future::{self, AbortHandle, Either};

#[doc(inline)]
pub use self::errors::Caused;

/// Wrapper around [`AbortHandle`] which aborts [`Future`] on [`Drop`].
#[derive(Debug, From)]
pub struct TaskHandle(AbortHandle);

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Provided [`Future`] hasn't been resolved before its deadline.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[display(fmt = "Operation timed out")]
pub struct TimedOut;

/// Races the provided `fut` against the `deadline` [`Future`], resolving with
/// [`TimedOut`] if the `deadline` resolves first.
///
/// Dropping the returned [`Future`] cancels both of them.
///
/// # Errors
///
/// With [`TimedOut`] if the `deadline` wins the race.
pub async fn with_timeout<F, D>(
    fut: F,
    deadline: D,
) -> Result<F::Output, TimedOut>
where
    F: Future,
    D: Future<Output = ()>,
{
    match future::select(Box::pin(fut), Box::pin(deadline)).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(((), _)) => Err(TimedOut),
    }
}
