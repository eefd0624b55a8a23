//! [MediaDevices][1] functionality.
//!
//! [1]: https://w3.org/TR/mediacapture-streams#mediadevices

use futures::future::{FutureExt as _, LocalBoxFuture};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use crate::{
    media::MediaConstraints,
    platform::{self, Error, MediaStream},
};

use super::window;

/// [`platform::MediaDevices`] backed by the browser's
/// `window.navigator.mediaDevices`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebMediaDevices;

impl platform::MediaDevices for WebMediaDevices {
    fn get_user_media(
        &self,
        caps: MediaConstraints,
    ) -> LocalBoxFuture<'static, Result<MediaStream, Error>> {
        get_user_media(caps).boxed_local()
    }

    fn get_display_media(
        &self,
    ) -> LocalBoxFuture<'static, Result<MediaStream, Error>> {
        get_display_media().boxed_local()
    }
}

/// Prompts a user for a permission to use a media input which produces a
/// [`MediaStream`] containing the requested types of media.
///
/// Adapter for a [MediaDevices.getUserMedia()][1] function.
///
/// # Errors
///
/// With [`Error`] if [MediaDevices.getUserMedia()][1] returns error or cannot
/// get [MediaDevices][2].
///
/// [1]: https://w3.org/TR/mediacapture-streams#dom-mediadevices-getusermedia
/// [2]: https://w3.org/TR/mediacapture-streams#mediadevices
pub async fn get_user_media(
    caps: MediaConstraints,
) -> Result<MediaStream, Error> {
    let media_devices = window().navigator().media_devices()?;

    let mut sys_caps = web_sys::MediaStreamConstraints::new();
    sys_caps
        .audio(&JsValue::from_bool(caps.audio))
        .video(&JsValue::from_bool(caps.video));

    let stream = JsFuture::from(
        media_devices.get_user_media_with_constraints(&sys_caps)?,
    )
    .await?;

    Ok(web_sys::MediaStream::from(stream).into())
}

/// Prompts a user to select and grant a permission to capture contents of a
/// display or portion thereof (such as a single window). Never asks for
/// display audio.
///
/// Adapter for a [MediaDevices.getDisplayMedia()][1] function.
///
/// # Errors
///
/// With [`Error`] if [MediaDevices.getDisplayMedia()][1] returns error or
/// cannot get [MediaDevices][2].
///
/// [1]: https://w3.org/TR/screen-capture/#dom-mediadevices-getdisplaymedia
/// [2]: https://w3.org/TR/mediacapture-streams#mediadevices
pub async fn get_display_media() -> Result<MediaStream, Error> {
    let media_devices = window().navigator().media_devices()?;

    let mut sys_caps = web_sys::DisplayMediaStreamConstraints::new();
    sys_caps.audio(&JsValue::FALSE).video(&JsValue::TRUE);

    let stream = JsFuture::from(
        media_devices.get_display_media_with_constraints(&sys_caps)?,
    )
    .await?;

    Ok(web_sys::MediaStream::from(stream).into())
}
