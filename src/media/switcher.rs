//! Replacement of the call widget's local stream.

use std::rc::Rc;

use derive_more::Display;
use tracerr::Traced;

use crate::{
    connection::{ConnectionCapture, ReplaceTrackError, TrackReplacement},
    media::{MediaConstraints, SwitchMode},
    platform::{self, MediaDevices, MediaStream, MediaStreamTrack, Widget},
    utils::Caused,
};

/// Errors occurring while switching the local stream.
#[derive(Clone, Debug, Display)]
pub enum SwitchError {
    /// [getUserMedia()][1] request failed.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#dom-mediadevices-getusermedia
    #[display(fmt = "MediaDevices.getUserMedia() failed: {}", _0)]
    GetUserMediaFailed(platform::Error),

    /// [getDisplayMedia()][1] request failed.
    ///
    /// [1]: https://w3.org/TR/screen-capture/#dom-mediadevices-getdisplaymedia
    #[display(fmt = "MediaDevices.getDisplayMedia() failed: {}", _0)]
    GetDisplayMediaFailed(platform::Error),

    /// Outgoing video track couldn't be replaced.
    #[display(fmt = "{}", _0)]
    TrackReplacementFailed(ReplaceTrackError),
}

impl Caused for SwitchError {
    fn name(&self) -> &'static str {
        match self {
            Self::GetUserMediaFailed(_) => "GetUserMediaFailed",
            Self::GetDisplayMediaFailed(_) => "GetDisplayMediaFailed",
            Self::TrackReplacementFailed(_) => "TrackReplacementFailed",
        }
    }

    fn cause(self) -> Option<platform::Error> {
        match self {
            Self::GetUserMediaFailed(err)
            | Self::GetDisplayMediaFailed(err) => Some(err),
            Self::TrackReplacementFailed(err) => err.cause(),
        }
    }
}

impl From<ReplaceTrackError> for SwitchError {
    #[inline]
    fn from(err: ReplaceTrackError) -> Self {
        Self::TrackReplacementFailed(err)
    }
}

/// Result of a successful switch.
#[derive(Clone, Debug)]
pub struct SwitchOutcome {
    /// New local stream, displayed by the widget.
    pub stream: MediaStream,

    /// What happened to the outgoing video track.
    pub replacement: TrackReplacement,
}

/// Acquires new local streams and puts them into the call.
#[derive(Clone)]
pub struct StreamSwitcher {
    media_devices: Rc<dyn MediaDevices>,
}

impl StreamSwitcher {
    /// Creates a new [`StreamSwitcher`] acquiring media from the provided
    /// [`MediaDevices`].
    #[inline]
    #[must_use]
    pub fn new(media_devices: Rc<dyn MediaDevices>) -> Self {
        Self { media_devices }
    }

    /// Switches the `widget`'s local stream to a new one acquired according
    /// to the `mode` and `caps`, and replaces the outgoing video track of the
    /// `capture`d connection.
    ///
    /// 1. In [`SwitchMode::ScreenShare`] the first audio track of the current
    ///    stream is kept for the new one.
    /// 2. Video tracks of the current stream are stopped. Its other audio
    ///    tracks are left as they are.
    /// 3. A new stream is acquired (see [`StreamSwitcher::acquire()`]).
    /// 4. The new stream is shown with the `mode`'s
    ///    [`VideoTransform`](crate::media::VideoTransform).
    /// 5. The outgoing video track is replaced, if there is a connection.
    ///
    /// Nothing is rolled back on failure.
    ///
    /// # Errors
    ///
    /// If media acquisition fails or [replaceTrack()][1] rejects.
    ///
    /// [1]: https://w3.org/TR/webrtc/#dom-rtcrtpsender-replacetrack
    pub async fn switch(
        &self,
        capture: &ConnectionCapture,
        widget: &Widget,
        caps: MediaConstraints,
        mode: SwitchMode,
    ) -> Result<SwitchOutcome, Traced<SwitchError>> {
        let result = self.switch_inner(capture, widget, caps, mode).await;
        if let Err(e) = &result {
            log::error!("Error setting up {} stream: {}", mode, e);
        }
        result
    }

    async fn switch_inner(
        &self,
        capture: &ConnectionCapture,
        widget: &Widget,
        caps: MediaConstraints,
        mode: SwitchMode,
    ) -> Result<SwitchOutcome, Traced<SwitchError>> {
        let surface = widget.video_surface();
        let current = surface.as_ref().and_then(|s| s.src_stream());

        let preserved_audio = if mode.is_screen_share() {
            current
                .as_ref()
                .and_then(|s| s.audio_tracks().into_iter().next())
        } else {
            None
        };
        if preserved_audio.is_some() {
            log::debug!("Preserving existing audio track for screen sharing");
        }
        if let Some(current) = &current {
            current.video_tracks().iter().for_each(MediaStreamTrack::stop);
        }

        let stream = self
            .acquire(caps, mode, preserved_audio)
            .await
            .map_err(tracerr::wrap!())?;
        log::debug!("Got new {} stream: {}", mode, stream.id());

        if let Some(surface) = &surface {
            surface.set_src_stream(&stream);
            surface.set_transform(mode.video_transform());
            log::debug!("Updated video element source");
        } else {
            log::error!("Video element not found within WebRTC component");
        }

        let replacement = capture
            .replace_video_track(&stream)
            .await
            .map_err(tracerr::map_from_and_wrap!())?;

        Ok(SwitchOutcome {
            stream,
            replacement,
        })
    }

    /// Acquires a new local stream for the provided `mode`.
    ///
    /// - [`SwitchMode::Camera`]: a single [getUserMedia()][1] request with the
    ///   provided `caps`.
    /// - [`SwitchMode::ScreenShare`]: a video-only [getDisplayMedia()][2]
    ///   request. The `preserved_audio` track is added to it, if any.
    ///   Otherwise, if `caps` ask for audio, a microphone is requested once,
    ///   and its failure is only logged.
    ///
    /// # Errors
    ///
    /// If the primary request fails.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#dom-mediadevices-getusermedia
    /// [2]: https://w3.org/TR/screen-capture/#dom-mediadevices-getdisplaymedia
    pub async fn acquire(
        &self,
        caps: MediaConstraints,
        mode: SwitchMode,
        preserved_audio: Option<MediaStreamTrack>,
    ) -> Result<MediaStream, Traced<SwitchError>> {
        match mode {
            SwitchMode::Camera => self
                .media_devices
                .get_user_media(caps)
                .await
                .map_err(SwitchError::GetUserMediaFailed)
                .map_err(tracerr::wrap!()),
            SwitchMode::ScreenShare => {
                let stream = self
                    .media_devices
                    .get_display_media()
                    .await
                    .map_err(SwitchError::GetDisplayMediaFailed)
                    .map_err(tracerr::wrap!())?;

                if let Some(audio) = preserved_audio {
                    stream.add_track(&audio);
                } else if caps.audio {
                    self.add_microphone(&stream).await;
                }

                Ok(stream)
            }
        }
    }

    /// Adds microphone audio to the provided screen capture `stream`.
    async fn add_microphone(&self, stream: &MediaStream) {
        match self
            .media_devices
            .get_user_media(MediaConstraints::MICROPHONE)
            .await
        {
            Ok(mic) => {
                mic.audio_tracks().iter().for_each(|t| stream.add_track(t));
                log::debug!("Added microphone audio track to screen sharing");
            }
            Err(e) => {
                log::warn!(
                    "Couldn't add microphone audio to screen sharing: {}",
                    e,
                );
            }
        }
    }
}
