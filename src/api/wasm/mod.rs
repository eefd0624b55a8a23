//! External API for `wasm32-unknown-unknown` target, designed to be used in a
//! web environment with JavaScript.

pub mod call_session;
pub mod global;
pub mod switch_settings;

use std::future::Future;

use tracerr::Traced;
use wasm_bindgen::prelude::*;

use crate::{
    api, connection,
    media::{self, SwitchOutcome},
    platform,
    session::SessionError,
    widget::LocateError,
};

pub use self::{call_session::CallSession, switch_settings::SwitchSettings};

/// Alert prefix of a failed switch to a screen capture.
const SCREEN_SHARE_FAILED: &str = "Could not start screen sharing: ";

/// Alert prefix of a failed switch back to the camera.
const CAMERA_FAILED: &str = "Could not switch to camera: ";

/// Source of the new outgoing video.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SwitchMode {
    /// Camera, displayed mirrored.
    Camera,

    /// Screen capture, displayed as is.
    ScreenShare,
}

impl From<SwitchMode> for media::SwitchMode {
    #[inline]
    fn from(that: SwitchMode) -> Self {
        match that {
            SwitchMode::Camera => Self::Camera,
            SwitchMode::ScreenShare => Self::ScreenShare,
        }
    }
}

impl From<media::SwitchMode> for SwitchMode {
    #[inline]
    fn from(that: media::SwitchMode) -> Self {
        match that {
            media::SwitchMode::Camera => Self::Camera,
            media::SwitchMode::ScreenShare => Self::ScreenShare,
        }
    }
}

/// Way the sender of the replaced outgoing video track was found.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SenderLookupTier {
    /// Sender was sending a video track.
    ByKind,

    /// No sender was sending video, so the first one was used.
    ByPosition,
}

impl From<connection::SenderLookupTier> for SenderLookupTier {
    #[inline]
    fn from(that: connection::SenderLookupTier) -> Self {
        match that {
            connection::SenderLookupTier::ByKind => Self::ByKind,
            connection::SenderLookupTier::ByPosition => Self::ByPosition,
        }
    }
}

/// Awaits the provided `switch` and shows a blocking alert starting with the
/// `prefix` if it fails.
///
/// A switch cancelled by a newer one is only logged, since the newer one
/// reports its own outcome.
///
/// Resolves into the new [MediaStream][1], or `undefined` on failure.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#mediastream
async fn alert_on_failure<F>(switch: F, prefix: &'static str) -> JsValue
where
    F: Future<Output = Result<SwitchOutcome, Traced<SessionError>>>,
{
    match switch.await {
        Ok(outcome) => {
            let stream: &web_sys::MediaStream = outcome.stream.as_ref();
            stream.clone().into()
        }
        Err(e) => {
            if let Some(alert) = failure_alert(prefix, e) {
                log::error!("{}", alert);
                platform::alert(&alert);
            } else {
                log::info!("{}superseded by a newer switch", prefix);
            }
            JsValue::UNDEFINED
        }
    }
}

/// Builds the text of the alert about the failed switch, or [`None`] if the
/// switch was cancelled and nothing should be shown.
fn failure_alert(prefix: &str, err: Traced<SessionError>) -> Option<String> {
    let (err, trace) = err.into_parts();
    if let SessionError::Locate(LocateError::Cancelled) = err {
        return None;
    }
    let message = api::Error::from(Traced::from_parts(err, trace)).message();
    Some(format!("{}{}", prefix, message))
}
