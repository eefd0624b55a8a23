//! Local media acquisition and switching.

mod switcher;

use derive_more::Display;

#[doc(inline)]
pub use self::switcher::{StreamSwitcher, SwitchError, SwitchOutcome};

/// [MediaStreamTrack.kind][1] representation.
///
/// [1]: https://w3.org/TR/mediacapture-streams/#dom-mediastreamtrack-kind
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum MediaKind {
    /// Audio track.
    #[display(fmt = "audio")]
    Audio,

    /// Video track.
    #[display(fmt = "video")]
    Video,
}

/// Source the outgoing video is switched to.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum SwitchMode {
    /// Webcam and microphone via [getUserMedia()][1].
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#dom-mediadevices-getusermedia
    #[display(fmt = "camera")]
    Camera,

    /// Display capture via [getDisplayMedia()][1].
    ///
    /// [1]: https://w3.org/TR/screen-capture/#dom-mediadevices-getdisplaymedia
    #[display(fmt = "screen share")]
    ScreenShare,
}

impl SwitchMode {
    /// Indicates whether this is [`SwitchMode::ScreenShare`].
    #[inline]
    #[must_use]
    pub fn is_screen_share(self) -> bool {
        self == Self::ScreenShare
    }

    /// Returns [`VideoTransform`] the local preview is displayed with.
    ///
    /// Camera preview is mirrored, so it looks like a mirror to the user.
    /// Screen contents never are.
    #[inline]
    #[must_use]
    pub fn video_transform(self) -> VideoTransform {
        match self {
            Self::Camera => VideoTransform::Mirrored,
            Self::ScreenShare => VideoTransform::Identity,
        }
    }
}

/// Horizontal orientation of the local video preview.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VideoTransform {
    /// Flipped horizontally.
    Mirrored,

    /// Displayed as is.
    Identity,
}

impl VideoTransform {
    /// Returns CSS `transform` value of this [`VideoTransform`].
    #[inline]
    #[must_use]
    pub fn css_value(self) -> &'static str {
        match self {
            Self::Mirrored => "scaleX(-1)",
            Self::Identity => "none",
        }
    }
}

/// Kinds of media requested for a new local stream.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MediaConstraints {
    /// Whether a video track is requested.
    pub video: bool,

    /// Whether an audio track is requested.
    pub audio: bool,
}

impl MediaConstraints {
    /// Microphone only, used to complement a screen capture.
    pub const MICROPHONE: Self = Self {
        video: false,
        audio: true,
    };

    /// Creates new [`MediaConstraints`].
    #[inline]
    #[must_use]
    pub fn new(video: bool, audio: bool) -> Self {
        Self { video, audio }
    }
}

impl Default for MediaConstraints {
    /// Both audio and video, as requested by the public entry points.
    #[inline]
    fn default() -> Self {
        Self::new(true, true)
    }
}
