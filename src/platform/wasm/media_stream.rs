//! [MediaStream][1] wrapper.
//!
//! [1]: https://w3.org/TR/mediacapture-streams/#mediastream

use derive_more::{AsRef, From};

use crate::platform::{Error, MediaStreamTrack};

/// Wrapper around [MediaStream][1] holding a set of [`MediaStreamTrack`]s.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#mediastream
#[derive(AsRef, Clone, Debug, From)]
pub struct MediaStream(web_sys::MediaStream);

impl MediaStream {
    /// Creates a new empty [`MediaStream`].
    ///
    /// # Errors
    ///
    /// If the [MediaStream() constructor][1] throws.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#dom-mediastream-constructor
    pub fn new() -> Result<Self, Error> {
        web_sys::MediaStream::new().map(Self).map_err(Error::from)
    }

    /// Returns [`id`][1] of the underlying [MediaStream][2].
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#dom-mediastream-id
    /// [2]: https://w3.org/TR/mediacapture-streams/#mediastream
    #[inline]
    #[must_use]
    pub fn id(&self) -> String {
        self.0.id()
    }

    /// Returns audio [`MediaStreamTrack`]s of this [`MediaStream`].
    #[must_use]
    pub fn audio_tracks(&self) -> Vec<MediaStreamTrack> {
        self.0
            .get_audio_tracks()
            .iter()
            .map(MediaStreamTrack::from)
            .collect()
    }

    /// Returns video [`MediaStreamTrack`]s of this [`MediaStream`].
    #[must_use]
    pub fn video_tracks(&self) -> Vec<MediaStreamTrack> {
        self.0
            .get_video_tracks()
            .iter()
            .map(MediaStreamTrack::from)
            .collect()
    }

    /// Adds the provided [`MediaStreamTrack`] to this [`MediaStream`].
    #[inline]
    pub fn add_track(&self, track: &MediaStreamTrack) {
        self.0.add_track(track.as_ref());
    }
}
