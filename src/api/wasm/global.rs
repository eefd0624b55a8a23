//! Free functions bound to a lazily created default [`CallSession`].
//!
//! Allow host pages to wire the switch buttons without managing a session
//! object.

use js_sys::Promise;
use wasm_bindgen::prelude::*;

use crate::api::CallSession;

thread_local! {
    /// Default [`CallSession`] of the page.
    static DEFAULT_SESSION: CallSession = CallSession::new();
}

/// Returns the default [`CallSession`], creating it on the first call.
#[must_use]
pub fn default_session() -> CallSession {
    DEFAULT_SESSION.with(Clone::clone)
}

/// Switches the outgoing video of the default [`CallSession`] to a screen
/// capture.
///
/// Shows an alert instead of rejecting on failure.
#[wasm_bindgen(js_name = startScreenShare)]
pub fn start_screen_share() -> Promise {
    default_session().start_screen_share()
}

/// Switches the outgoing video of the default [`CallSession`] back to the
/// camera.
///
/// Shows an alert instead of rejecting on failure.
#[wasm_bindgen(js_name = switchToCamera)]
pub fn switch_to_camera() -> Promise {
    default_session().switch_to_camera()
}

/// Makes every `RTCPeerConnection` created by the page afterwards the
/// connection of the default [`CallSession`].
///
/// Nothing is captured until this is called, so the host page calls it
/// before the call widget creates its connection.
///
/// # Errors
///
/// With `StateError` if the interceptor is installed already.
#[wasm_bindgen(js_name = installConnectionCapture)]
pub fn install_connection_capture() -> Result<(), JsValue> {
    default_session().install_connection_capture()
}

/// Restores the global `RTCPeerConnection` constructor replaced by
/// [`install_connection_capture()`].
///
/// Returns `false` if it wasn't replaced.
#[wasm_bindgen(js_name = uninstallConnectionCapture)]
#[must_use]
pub fn uninstall_connection_capture() -> bool {
    default_session().uninstall_connection_capture()
}
