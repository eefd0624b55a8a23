//! Media acquisition seam.

use futures::future::LocalBoxFuture;

use crate::{
    media::MediaConstraints,
    platform::{Error, MediaStream},
};

/// Source of new local [`MediaStream`]s.
///
/// Implemented by [`WebMediaDevices`] on top of the browser's
/// [MediaDevices][1] interface.
///
/// [`WebMediaDevices`]: crate::platform::WebMediaDevices
/// [1]: https://w3.org/TR/mediacapture-streams#mediadevices
#[cfg_attr(feature = "mockable", mockall::automock)]
pub trait MediaDevices {
    /// Prompts a user for a permission to use a camera and/or microphone
    /// according to the provided [`MediaConstraints`].
    ///
    /// Adapter for a [MediaDevices.getUserMedia()][1] function.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams#dom-mediadevices-getusermedia
    fn get_user_media(
        &self,
        caps: MediaConstraints,
    ) -> LocalBoxFuture<'static, Result<MediaStream, Error>>;

    /// Prompts a user to select and grant a permission to capture contents of
    /// a display or portion thereof. Only video is requested.
    ///
    /// Adapter for a [MediaDevices.getDisplayMedia()][1] function.
    ///
    /// [1]: https://w3.org/TR/screen-capture/#dom-mediadevices-getdisplaymedia
    fn get_display_media(
        &self,
    ) -> LocalBoxFuture<'static, Result<MediaStream, Error>>;
}
