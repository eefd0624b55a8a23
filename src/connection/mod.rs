//! Capturing of the call's [`RtcPeerConnection`] and replacement of its
//! outgoing video track.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use derive_more::Display;
use tracerr::Traced;

use crate::{
    media::MediaKind,
    platform::{self, ConstructorHook, MediaStream, RtcPeerConnection},
    utils::Caused,
};

/// Tier of the sender lookup policy that picked the [`platform::RtpSender`]
/// whose track was replaced.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum SenderLookupTier {
    /// Sender currently sending a video track.
    #[display(fmt = "matched by kind")]
    ByKind,

    /// No sender sends video at the moment, so the first one is used.
    #[display(fmt = "matched by position")]
    ByPosition,
}

/// Picks the sender which outgoing video should be replaced on.
///
/// 1. The first sender whose current track is of [`MediaKind::Video`].
/// 2. Otherwise the first sender at all.
///
/// Returns [`None`] only if there are no senders.
pub fn lookup_sender<S, F>(
    senders: &[S],
    kind_of: F,
) -> Option<(&S, SenderLookupTier)>
where
    F: Fn(&S) -> Option<MediaKind>,
{
    senders
        .iter()
        .find(|s| kind_of(*s) == Some(MediaKind::Video))
        .map(|s| (s, SenderLookupTier::ByKind))
        .or_else(|| {
            senders.first().map(|s| (s, SenderLookupTier::ByPosition))
        })
}

/// Result of an outgoing video track replacement.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TrackReplacement {
    /// Track was replaced on a sender found with the given tier.
    Replaced(SenderLookupTier),

    /// No connection has been captured, so nothing is transmitted.
    NoConnection,

    /// Either the new stream has no video track or the connection has no
    /// senders.
    NothingToReplace,
}

/// Errors of capturing an [`RtcPeerConnection`].
#[derive(Clone, Debug, Display)]
pub enum CaptureError {
    /// The constructor interceptor is installed already.
    #[display(fmt = "RTCPeerConnection interceptor is already installed")]
    AlreadyInstalled,

    /// Installing the constructor interceptor failed on the JS side.
    #[display(fmt = "Failed to install RTCPeerConnection interceptor: {}", _0)]
    InstallHook(platform::Error),

    /// [RTCPeerConnection() constructor][1] threw.
    ///
    /// [1]: https://w3.org/TR/webrtc/#dom-rtcpeerconnection-constructor
    #[display(fmt = "Failed to create RTCPeerConnection: {}", _0)]
    CreateConnection(platform::Error),
}

impl Caused for CaptureError {
    fn name(&self) -> &'static str {
        match self {
            Self::AlreadyInstalled => "AlreadyInstalled",
            Self::InstallHook(_) => "InstallHook",
            Self::CreateConnection(_) => "CreateConnection",
        }
    }

    fn cause(self) -> Option<platform::Error> {
        match self {
            Self::AlreadyInstalled => None,
            Self::InstallHook(err) | Self::CreateConnection(err) => Some(err),
        }
    }
}

/// [replaceTrack()][1] rejected the new video track.
///
/// [1]: https://w3.org/TR/webrtc/#dom-rtcrtpsender-replacetrack
#[derive(Clone, Debug, Display)]
#[display(fmt = "Failed to replace outgoing video track: {}", _0)]
pub struct ReplaceTrackError(platform::Error);

impl Caused for ReplaceTrackError {
    fn name(&self) -> &'static str {
        "ReplaceTrackError"
    }

    fn cause(self) -> Option<platform::Error> {
        Some(self.0)
    }
}

/// Actual data of a [`ConnectionCapture`].
#[derive(Default)]
struct Inner {
    /// The most recently captured connection.
    current: RefCell<Option<RtcPeerConnection>>,

    /// Lookup tier used by the last successful track replacement.
    last_tier: Cell<Option<SenderLookupTier>>,

    /// Installed global constructor interceptor, if any.
    hook: RefCell<Option<ConstructorHook>>,
}

impl Inner {
    /// Makes the provided connection the current one.
    fn record(&self, conn: RtcPeerConnection) {
        if self.current.replace(Some(conn)).is_some() {
            log::debug!("Captured RTCPeerConnection replaced by a newer one");
        } else {
            log::debug!("RTCPeerConnection captured");
        }
    }
}

/// Slot holding the current [`RtcPeerConnection`] of a call session.
///
/// Only the capture paths ([`ConnectionCapture::create()`],
/// [`ConnectionCapture::record()`] and the constructor interceptor) write
/// it. Cheap to clone: all clones share the same slot.
#[derive(Clone, Default)]
pub struct ConnectionCapture(Rc<Inner>);

impl ConnectionCapture {
    /// Creates an empty [`ConnectionCapture`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a connection constructed elsewhere as the current one.
    #[inline]
    pub fn record(&self, conn: RtcPeerConnection) {
        self.0.record(conn);
    }

    /// Constructs a new [`RtcPeerConnection`], records it as the current one
    /// and returns it.
    ///
    /// # Errors
    ///
    /// With [`CaptureError::CreateConnection`] if construction fails.
    pub fn create(
        &self,
        config: Option<&web_sys::RtcConfiguration>,
    ) -> Result<RtcPeerConnection, Traced<CaptureError>> {
        let conn = RtcPeerConnection::new(config)
            .map_err(CaptureError::CreateConnection)
            .map_err(tracerr::wrap!())?;
        self.0.record(conn.clone());
        Ok(conn)
    }

    /// Returns the current [`RtcPeerConnection`], if any was captured.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<RtcPeerConnection> {
        self.0.current.borrow().clone()
    }

    /// Installs the global `RTCPeerConnection` constructor interceptor
    /// recording every connection constructed by page code into this
    /// [`ConnectionCapture`].
    ///
    /// # Errors
    ///
    /// With [`CaptureError::AlreadyInstalled`] if this [`ConnectionCapture`]
    /// has an interceptor already, or [`CaptureError::InstallHook`] if
    /// installing fails on the JS side.
    pub fn install_hook(&self) -> Result<(), Traced<CaptureError>> {
        if self.0.hook.borrow().is_some() {
            return Err(tracerr::new!(CaptureError::AlreadyInstalled));
        }

        let weak_inner = Rc::downgrade(&self.0);
        let hook = ConstructorHook::install(move |conn| {
            if let Some(inner) = weak_inner.upgrade() {
                inner.record(conn);
            }
        })
        .map_err(CaptureError::InstallHook)
        .map_err(tracerr::wrap!())?;
        self.0.hook.replace(Some(hook));

        Ok(())
    }

    /// Removes the constructor interceptor, restoring the original global
    /// constructor.
    ///
    /// Returns `false` if no interceptor was installed.
    pub fn uninstall_hook(&self) -> bool {
        let hook = self.0.hook.borrow_mut().take();
        hook.is_some()
    }

    /// Indicates whether the constructor interceptor is installed.
    #[inline]
    #[must_use]
    pub fn is_hook_installed(&self) -> bool {
        self.0.hook.borrow().is_some()
    }

    /// Returns [`SenderLookupTier`] used by the last successful track
    /// replacement.
    #[inline]
    #[must_use]
    pub fn last_lookup_tier(&self) -> Option<SenderLookupTier> {
        self.0.last_tier.get()
    }

    /// Forgets the current connection and removes the interceptor.
    pub fn clear(&self) {
        drop(self.0.current.borrow_mut().take());
        self.0.last_tier.set(None);
        let _ = self.uninstall_hook();
    }

    /// Replaces the outgoing video track of the current connection with the
    /// first video track of the provided [`MediaStream`].
    ///
    /// The sender is chosen with [`lookup_sender()`].
    ///
    /// # Errors
    ///
    /// With [`ReplaceTrackError`] if [replaceTrack()][1] rejects.
    ///
    /// [1]: https://w3.org/TR/webrtc/#dom-rtcrtpsender-replacetrack
    pub async fn replace_video_track(
        &self,
        stream: &MediaStream,
    ) -> Result<TrackReplacement, Traced<ReplaceTrackError>> {
        let conn = if let Some(conn) = self.current() {
            conn
        } else {
            log::warn!(
                "No RTCPeerConnection captured, the new stream is shown \
                 locally only",
            );
            return Ok(TrackReplacement::NoConnection);
        };

        let senders = conn.senders();
        log::debug!("Captured connection has {} senders", senders.len());
        let track = stream.video_tracks().into_iter().next();
        let found = lookup_sender(&senders, |s| s.track().map(|t| t.kind()));
        let (track, (sender, tier)) = match (track, found) {
            (Some(track), Some(found)) => (track, found),
            _ => {
                log::warn!("No video track or senders found");
                return Ok(TrackReplacement::NothingToReplace);
            }
        };
        if tier == SenderLookupTier::ByPosition {
            log::warn!("No video sender found, using the first sender");
        }

        sender
            .replace_track(&track)
            .await
            .map_err(ReplaceTrackError)
            .map_err(tracerr::wrap!())?;
        self.0.last_tier.set(Some(tier));
        log::info!("Replaced outgoing video track, sender {}", tier);

        Ok(TrackReplacement::Replaced(tier))
    }
}

impl fmt::Debug for ConnectionCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionCapture")
            .field("current", &self.0.current.borrow())
            .field("last_tier", &self.0.last_tier.get())
            .field("hook_installed", &self.is_hook_installed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::media::MediaKind;

    use super::{lookup_sender, SenderLookupTier};

    #[test]
    fn prefers_sender_sending_video() {
        let senders = [
            ("audio", Some(MediaKind::Audio)),
            ("video", Some(MediaKind::Video)),
        ];

        let (sender, tier) = lookup_sender(&senders, |s| s.1).unwrap();

        assert_eq!(sender.0, "video");
        assert_eq!(tier, SenderLookupTier::ByKind);
    }

    #[test]
    fn falls_back_to_first_sender() {
        let senders = [("first", None), ("second", Some(MediaKind::Audio))];

        let (sender, tier) = lookup_sender(&senders, |s| s.1).unwrap();

        assert_eq!(sender.0, "first");
        assert_eq!(tier, SenderLookupTier::ByPosition);
    }

    #[test]
    fn audio_only_senders_use_position() {
        let senders = [("mic", Some(MediaKind::Audio))];

        let (sender, tier) = lookup_sender(&senders, |s| s.1).unwrap();

        assert_eq!(sender.0, "mic");
        assert_eq!(tier, SenderLookupTier::ByPosition);
    }

    #[test]
    fn no_senders_no_match() {
        let senders: [(&str, Option<MediaKind>); 0] = [];

        assert!(lookup_sender(&senders, |s| s.1).is_none());
    }
}
