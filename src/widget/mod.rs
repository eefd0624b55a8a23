//! Bounded lookup of the third-party call widget.

use std::{future::Future, time::Duration};

use derive_more::Display;
use futures::future;
use tracerr::Traced;

use crate::{
    platform::{self, ReadySignal, Widget},
    settings::SwitchSettings,
    utils::Caused,
};

/// Outcome of a single widget lookup attempt.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Probe<T> {
    /// There is no widget element in the document.
    Missing,

    /// Widget element exists, but hasn't initialized its video surface yet.
    Uninitialized,

    /// Widget is found and initialized.
    Ready(T),
}

/// Errors of locating the call widget.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum LocateError {
    /// No initialized widget was found within the given number of attempts.
    #[display(
        fmt = "Could not find initialized WebRTC component after {} attempts",
        _0
    )]
    NotFound(u32),

    /// Lookup was cancelled before completion.
    #[display(fmt = "WebRTC component lookup was cancelled")]
    Cancelled,

    /// Lookup didn't complete before its deadline.
    #[display(fmt = "WebRTC component lookup timed out")]
    TimedOut,
}

impl Caused for LocateError {
    fn name(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NotFound",
            Self::Cancelled => "Cancelled",
            Self::TimedOut => "TimedOut",
        }
    }

    fn cause(self) -> Option<platform::Error> {
        None
    }
}

/// Runs up to `max_attempts` strictly sequential `probe`s, awaiting `wait`
/// between two of them, until one returns [`Probe::Ready`].
///
/// Nothing is awaited after the last attempt, so a widget becoming ready on
/// the N-th attempt is returned after exactly N-1 waits.
///
/// # Errors
///
/// With [`LocateError::NotFound`] if no attempt succeeded.
pub async fn poll_until_ready<T, P, W, F>(
    max_attempts: u32,
    mut probe: P,
    mut wait: W,
) -> Result<T, Traced<LocateError>>
where
    P: FnMut() -> Probe<T>,
    W: FnMut() -> F,
    F: Future<Output = ()>,
{
    for attempt in 1..=max_attempts {
        match probe() {
            Probe::Ready(found) => return Ok(found),
            Probe::Uninitialized => log::debug!(
                "WebRTC element found but not fully initialized, retrying...",
            ),
            Probe::Missing => log::debug!("WebRTC element not found"),
        }
        if attempt < max_attempts {
            wait().await;
            log::debug!(
                "Retry {}/{} to find WebRTC component",
                attempt,
                max_attempts,
            );
        }
    }

    Err(tracerr::new!(LocateError::NotFound(max_attempts)))
}

/// Finds the call widget in the current document.
#[derive(Clone, Debug, Default)]
pub struct WidgetLocator {
    settings: SwitchSettings,
}

impl WidgetLocator {
    /// Creates a new [`WidgetLocator`] looking for the widget described by
    /// the provided [`SwitchSettings`].
    #[inline]
    #[must_use]
    pub fn new(settings: SwitchSettings) -> Self {
        Self { settings }
    }

    /// Returns [`SwitchSettings`] of this [`WidgetLocator`].
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &SwitchSettings {
        &self.settings
    }

    /// Locates the widget with the configured number of attempts and pause.
    ///
    /// # Errors
    ///
    /// With [`LocateError::NotFound`] if the widget isn't initialized in
    /// time.
    #[inline]
    pub async fn locate(&self) -> Result<Widget, Traced<LocateError>> {
        self.locate_with(
            self.settings.max_attempts,
            self.settings.retry_delay(),
        )
        .await
    }

    /// Locates the widget making up to `max_attempts` lookups, pausing for
    /// `delay` between two of them.
    ///
    /// If [`SwitchSettings::ready_event`] is set, the pause also ends as soon
    /// as that event is dispatched on the document.
    ///
    /// # Errors
    ///
    /// With [`LocateError::NotFound`] if the widget isn't initialized in
    /// time.
    pub async fn locate_with(
        &self,
        max_attempts: u32,
        delay: Duration,
    ) -> Result<Widget, Traced<LocateError>> {
        let signal = self.ready_signal();

        poll_until_ready(
            max_attempts,
            || Widget::probe(&self.settings),
            || {
                let delay = platform::delay_for(delay);
                let fired = signal.as_ref().map(ReadySignal::next_fire);
                async move {
                    match fired {
                        Some(fired) => {
                            drop(future::select(Box::pin(delay), fired).await);
                        }
                        None => delay.await,
                    }
                }
            },
        )
        .await
        .map_err(tracerr::wrap!())
    }

    /// Subscribes to [`SwitchSettings::ready_event`], if any.
    fn ready_signal(&self) -> Option<ReadySignal> {
        let event = self.settings.ready_event.as_ref()?;
        ReadySignal::subscribe(event).unwrap_or_else(|e| {
            log::error!("Failed to subscribe to `{}` event: {}", event, e);
            None
        })
    }
}
