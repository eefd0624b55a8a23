use derive_more::AsRef;

use crate::media::MediaKind;

/// Wrapper around [MediaStreamTrack][1] received from
/// [getUserMedia()][2]/[getDisplayMedia()][3] request or read from an
/// existing [MediaStream][4].
///
/// [1]: https://w3.org/TR/mediacapture-streams/#mediastreamtrack
/// [2]: https://w3.org/TR/mediacapture-streams/#dom-mediadevices-getusermedia
/// [3]: https://w3.org/TR/screen-capture/#dom-mediadevices-getdisplaymedia
/// [4]: https://w3.org/TR/mediacapture-streams/#mediastream
#[derive(AsRef, Clone, Debug)]
pub struct MediaStreamTrack {
    #[as_ref]
    sys_track: web_sys::MediaStreamTrack,
    kind: MediaKind,
}

impl<T> From<T> for MediaStreamTrack
where
    web_sys::MediaStreamTrack: From<T>,
{
    #[inline]
    fn from(from: T) -> MediaStreamTrack {
        let sys_track = web_sys::MediaStreamTrack::from(from);
        let kind = match sys_track.kind().as_ref() {
            "audio" => MediaKind::Audio,
            "video" => MediaKind::Video,
            _ => unreachable!(),
        };

        MediaStreamTrack { sys_track, kind }
    }
}

impl MediaStreamTrack {
    /// Returns [`id`] of underlying [MediaStreamTrack][2].
    ///
    /// [`id`]: https://w3.org/TR/mediacapture-streams/#dom-mediastreamtrack-id
    /// [2]: https://w3.org/TR/mediacapture-streams/#mediastreamtrack
    #[inline]
    #[must_use]
    pub fn id(&self) -> String {
        self.sys_track.id()
    }

    /// Returns this [`MediaStreamTrack`]'s kind (audio/video).
    #[inline]
    #[must_use]
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Indicates whether the underlying [MediaStreamTrack][1] is
    /// [`ended`][2].
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#mediastreamtrack
    /// [2]: https://tinyurl.com/w3-streams#idl-def-MediaStreamTrackState.ended
    #[must_use]
    pub fn is_ended(&self) -> bool {
        matches!(
            self.sys_track.ready_state(),
            web_sys::MediaStreamTrackState::Ended
        )
    }

    /// Changes [`readyState`][1] attribute on the underlying
    /// [MediaStreamTrack][2] to [`ended`][3].
    ///
    /// [1]: https://tinyurl.com/w3-streams#dom-mediastreamtrack-readystate
    /// [2]: https://w3.org/TR/mediacapture-streams/#mediastreamtrack
    /// [3]: https://tinyurl.com/w3-streams#idl-def-MediaStreamTrackState.ended
    #[inline]
    pub fn stop(&self) {
        self.sys_track.stop()
    }
}

impl PartialEq for MediaStreamTrack {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.sys_track.id() == other.sys_track.id()
    }
}
