//! `wasm32-unknown-unknown` platform implementation.

pub mod dom;
pub mod error;
pub mod hook;
pub mod media_devices;
pub mod media_stream;
pub mod media_track;
pub mod peer_connection;
pub mod utils;

use std::{convert::TryInto as _, future::Future, sync::Once, time::Duration};

use js_sys::Promise;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Window};

/// When the `console_error_panic_hook` feature is enabled, we can call the
/// `set_panic_hook` function at least once during initialization, and then
/// we will get better error messages if our code ever panics.
///
/// For more details see:
/// <https://github.com/rustwasm/console_error_panic_hook#readme>
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Initializes [`wasm_logger`] as default application logger.
///
/// [`wasm_logger`]: https://docs.rs/wasm-logger
pub fn init_logger() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    });
}

/// Runs a Rust [`Future`] on the current thread.
#[inline]
pub fn spawn<F>(task: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(task);
}

/// [`Future`] which resolves after the provided [`Duration`].
///
/// [`Future`]: std::future::Future
pub async fn delay_for(delay: Duration) {
    // `setTimeout` only accepts `i32`, so saturate anything longer.
    let delay_ms: i32 = delay.as_millis().try_into().unwrap_or(i32::MAX);

    let timer = JsFuture::from(Promise::new(&mut |yes, _| {
        if let Err(e) = window()
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                &yes, delay_ms,
            )
        {
            log::error!("Failed to schedule timer: {:?}", e);
            drop(yes.call0(&JsValue::NULL));
        }
    }));
    drop(timer.await);
}

/// Returns [`Window`] object.
///
/// # Panics
///
/// When global [`Window`] object is inaccessible.
#[must_use]
pub fn window() -> Window {
    // Cannot use `lazy_static` since `window` is `!Sync`.
    // Safe to unwrap.
    web_sys::window().unwrap()
}

/// Returns [`Document`] of the current [`Window`], if any.
#[inline]
#[must_use]
pub fn document() -> Option<Document> {
    window().document()
}

/// Shows a blocking [alert()][1] dialog with the provided `message`.
///
/// [1]: https://html.spec.whatwg.org/#dom-alert
pub fn alert(message: &str) {
    if let Err(e) = window().alert_with_message(message) {
        log::error!("Failed to show alert: {:?}", e);
    }
}
