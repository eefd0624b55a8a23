use std::time::Duration;

use derive_more::From;
use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::{
    api::{
        self,
        wasm::{alert_on_failure, CAMERA_FAILED, SCREEN_SHARE_FAILED},
        SenderLookupTier, SwitchMode, SwitchSettings,
    },
    media::MediaConstraints,
    platform::{self, init_logger, set_panic_hook},
    session::Session,
    utils::{self, TimedOut},
    widget::LocateError,
};

/// Single call whose outgoing video can be switched between the camera and a
/// screen capture.
///
/// Responsible for capturing the call's `RTCPeerConnection`, locating the
/// call widget and replacing its stream.
#[wasm_bindgen]
#[derive(Clone, From)]
pub struct CallSession(Session);

impl CallSession {
    /// Returns the underlying [`Session`].
    #[inline]
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.0
    }
}

#[wasm_bindgen]
impl CallSession {
    /// Instantiates a new [`CallSession`] with default [`SwitchSettings`].
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(&SwitchSettings::default())
    }

    /// Instantiates a new [`CallSession`] with the provided
    /// [`SwitchSettings`].
    #[wasm_bindgen(js_name = withSettings)]
    #[must_use]
    pub fn with_settings(settings: &SwitchSettings) -> Self {
        set_panic_hook();
        init_logger();

        Self(Session::new(settings.clone().into()))
    }

    /// Switches the outgoing video to a screen capture, keeping the current
    /// audio track if there is one.
    ///
    /// Shows an alert instead of rejecting on failure. Effectively returns
    /// `MediaStream | undefined`.
    #[wasm_bindgen(js_name = startScreenShare)]
    pub fn start_screen_share(&self) -> Promise {
        let session = self.0.clone();
        future_to_promise(async move {
            Ok(alert_on_failure(
                session.start_screen_share(),
                SCREEN_SHARE_FAILED,
            )
            .await)
        })
    }

    /// Switches the outgoing video back to the camera.
    ///
    /// Shows an alert instead of rejecting on failure. Effectively returns
    /// `MediaStream | undefined`.
    #[wasm_bindgen(js_name = switchToCamera)]
    pub fn switch_to_camera(&self) -> Promise {
        let session = self.0.clone();
        future_to_promise(async move {
            Ok(alert_on_failure(session.switch_to_camera(), CAMERA_FAILED)
                .await)
        })
    }

    /// Switches the outgoing video according to the provided [`SwitchMode`]
    /// and constraints.
    ///
    /// Effectively returns `Result<MediaStream, WidgetNotFoundException |
    /// LocalMediaInitException | TrackReplacementException>`.
    #[wasm_bindgen(js_name = switchStream)]
    pub fn switch_stream(
        &self,
        mode: SwitchMode,
        video: bool,
        audio: bool,
    ) -> Promise {
        let session = self.0.clone();
        future_to_promise(async move {
            let outcome = session
                .switch_stream(mode.into(), MediaConstraints::new(video, audio))
                .await
                .map_err(api::Error::from)?;
            let stream: &web_sys::MediaStream = outcome.stream.as_ref();
            Ok(stream.clone().into())
        })
    }

    /// Creates a new `RTCPeerConnection` with the optional configuration and
    /// captures it as the call's connection.
    ///
    /// # Errors
    ///
    /// With [`api::InternalException`] if the browser refuses to create it.
    #[wasm_bindgen(js_name = createPeerConnection)]
    pub fn create_peer_connection(
        &self,
        config: Option<web_sys::RtcConfiguration>,
    ) -> Result<web_sys::RtcPeerConnection, JsValue> {
        let conn = self
            .0
            .capture()
            .create(config.as_ref())
            .map_err(api::Error::from)?;
        let sys_conn: &web_sys::RtcPeerConnection = conn.as_ref();
        Ok(sys_conn.clone())
    }

    /// Captures an `RTCPeerConnection` created elsewhere as the call's
    /// connection.
    pub fn capture(&self, conn: web_sys::RtcPeerConnection) {
        self.0.capture().record(conn.into());
    }

    /// Replaces the global `RTCPeerConnection` constructor with one capturing
    /// every connection it creates into this [`CallSession`].
    ///
    /// # Errors
    ///
    /// With [`api::StateError`] if the interceptor is installed already, or
    /// with [`api::InternalException`] if installing it fails.
    #[wasm_bindgen(js_name = installConnectionCapture)]
    pub fn install_connection_capture(&self) -> Result<(), JsValue> {
        self.0
            .capture()
            .install_hook()
            .map_err(api::Error::from)
            .map_err(JsValue::from)
    }

    /// Restores the global `RTCPeerConnection` constructor.
    ///
    /// Returns `false` if the interceptor wasn't installed.
    #[wasm_bindgen(js_name = uninstallConnectionCapture)]
    pub fn uninstall_connection_capture(&self) -> bool {
        self.0.capture().uninstall_hook()
    }

    /// Locates the call widget element, giving up after `timeout_ms`
    /// milliseconds if provided.
    ///
    /// Effectively returns `Result<Element, WidgetNotFoundException>`.
    #[wasm_bindgen(js_name = locateWidget)]
    pub fn locate_widget(&self, timeout_ms: Option<u32>) -> Promise {
        let session = self.0.clone();
        future_to_promise(async move {
            let res = match timeout_ms {
                Some(ms) => {
                    let deadline =
                        platform::delay_for(Duration::from_millis(ms.into()));
                    match utils::with_timeout(session.locate_widget(), deadline)
                        .await
                    {
                        Ok(res) => res,
                        Err(TimedOut) => {
                            let _ = session.cancel_locate();
                            Err(tracerr::new!(LocateError::TimedOut))
                        }
                    }
                }
                None => session.locate_widget().await,
            };
            let widget = res.map_err(api::Error::from)?;
            Ok(widget.element().clone().into())
        })
    }

    /// Cancels the pending widget lookup.
    ///
    /// Returns `false` if there was none.
    #[wasm_bindgen(js_name = cancelLocate)]
    pub fn cancel_locate(&self) -> bool {
        self.0.cancel_locate()
    }

    /// Returns how the sender of the last replaced outgoing video track was
    /// found, if any was replaced.
    #[wasm_bindgen(js_name = lastSenderLookupTier)]
    #[must_use]
    pub fn last_sender_lookup_tier(&self) -> Option<SenderLookupTier> {
        self.0.last_lookup_tier().map(Into::into)
    }

    /// Drops [`CallSession`] API object, forgetting the captured connection
    /// and restoring the global `RTCPeerConnection` constructor.
    pub fn dispose(self) {
        self.0.dispose();
    }
}

impl Default for CallSession {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
