use derive_more::{Display, From};
use tracerr::Traced;
use wasm_bindgen::{closure::Closure, convert::FromWasmAbi, JsCast};

use crate::{platform, utils::Caused};

/// Failed to bind to [`EventTarget`][1] event.
///
/// [1]: https://developer.mozilla.org/en-US/docs/Web/API/EventTarget
#[derive(Clone, Debug, Display, From)]
#[display(fmt = "Failed to bind event listener: {}", _0)]
pub struct EventListenerBindError(platform::Error);

impl Caused for EventListenerBindError {
    fn name(&self) -> &'static str {
        "EventListenerBindError"
    }

    fn cause(self) -> Option<platform::Error> {
        Some(self.0)
    }
}

/// Wrapper for closure that handles some [`EventTarget`] event.
///
/// Unregisters the handler on [`Drop`].
///
/// [`EventTarget`]: web_sys::EventTarget
#[derive(Debug)]
pub struct EventListener<T, A>
where
    T: AsRef<web_sys::EventTarget>,
{
    event_name: String,
    target: T,
    closure: Closure<dyn FnMut(A)>,
}

impl<T, A> EventListener<T, A>
where
    T: AsRef<web_sys::EventTarget>,
    A: FromWasmAbi + 'static,
{
    /// Creates new [`EventListener`] from a given [`FnMut`] `closure`.
    ///
    /// # Errors
    ///
    /// Errors if [`EventListener`] bound fails.
    pub fn new_mut<F>(
        target: T,
        event_name: &str,
        closure: F,
    ) -> Result<Self, Traced<EventListenerBindError>>
    where
        F: FnMut(A) + 'static,
    {
        let closure = Closure::wrap(Box::new(closure) as Box<dyn FnMut(A)>);

        target
            .as_ref()
            .add_event_listener_with_callback(
                event_name,
                closure.as_ref().unchecked_ref(),
            )
            .map_err(platform::Error::from)
            .map_err(EventListenerBindError::from)
            .map_err(tracerr::wrap!())?;

        Ok(Self {
            event_name: event_name.to_owned(),
            target,
            closure,
        })
    }
}

impl<T, A> Drop for EventListener<T, A>
where
    T: AsRef<web_sys::EventTarget>,
{
    /// Drops [`EventListener`]'s closure and unregisters appropriate event
    /// handler.
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .as_ref()
            .remove_event_listener_with_callback(
                &self.event_name,
                self.closure.as_ref().unchecked_ref(),
            )
        {
            log::error!("Failed to remove EventListener: {:?}", err);
        }
    }
}
