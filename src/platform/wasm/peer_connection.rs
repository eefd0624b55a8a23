//! [RTCPeerConnection][1] and [RTCRtpSender][2] wrappers.
//!
//! [1]: https://w3.org/TR/webrtc/#dom-rtcpeerconnection
//! [2]: https://w3.org/TR/webrtc/#dom-rtcrtpsender

use derive_more::{AsRef, From};
use wasm_bindgen_futures::JsFuture;

use crate::platform::{Error, MediaStreamTrack};

/// Representation of [RTCPeerConnection][1].
///
/// Cheap to clone: all clones refer to the same JS object.
///
/// [1]: https://w3.org/TR/webrtc/#dom-rtcpeerconnection
#[derive(AsRef, Clone, Debug, From)]
pub struct RtcPeerConnection(web_sys::RtcPeerConnection);

impl RtcPeerConnection {
    /// Instantiates a new [`RtcPeerConnection`] with the optional
    /// [RTCConfiguration][1].
    ///
    /// # Errors
    ///
    /// If the [RTCPeerConnection() constructor][2] throws.
    ///
    /// [1]: https://w3.org/TR/webrtc/#dom-rtcconfiguration
    /// [2]: https://w3.org/TR/webrtc/#dom-rtcpeerconnection-constructor
    pub fn new(
        config: Option<&web_sys::RtcConfiguration>,
    ) -> Result<Self, Error> {
        match config {
            Some(config) => {
                web_sys::RtcPeerConnection::new_with_configuration(config)
            }
            None => web_sys::RtcPeerConnection::new(),
        }
        .map(Self)
        .map_err(Error::from)
    }

    /// Returns all the [`RtpSender`]s of this [`RtcPeerConnection`] in the
    /// order reported by [getSenders()][1].
    ///
    /// [1]: https://w3.org/TR/webrtc/#dom-rtcpeerconnection-getsenders
    #[must_use]
    pub fn senders(&self) -> Vec<RtpSender> {
        self.0
            .get_senders()
            .iter()
            .map(web_sys::RtcRtpSender::from)
            .map(RtpSender)
            .collect()
    }
}

/// Representation of [RTCRtpSender][1] sending one outgoing track.
///
/// [1]: https://w3.org/TR/webrtc/#dom-rtcrtpsender
#[derive(AsRef, Clone, Debug, From)]
pub struct RtpSender(web_sys::RtcRtpSender);

impl RtpSender {
    /// Returns the [`MediaStreamTrack`] currently being sent, if any.
    #[inline]
    #[must_use]
    pub fn track(&self) -> Option<MediaStreamTrack> {
        self.0.track().map(MediaStreamTrack::from)
    }

    /// Replaces the track being sent with the provided one without
    /// renegotiation.
    ///
    /// # Errors
    ///
    /// With JS error if the underlying [replaceTrack()][1] call fails.
    ///
    /// [1]: https://w3.org/TR/webrtc/#dom-rtcrtpsender-replacetrack
    pub async fn replace_track(
        &self,
        track: &MediaStreamTrack,
    ) -> Result<(), Error> {
        JsFuture::from(self.0.replace_track(Some(track.as_ref()))).await?;
        Ok(())
    }
}
