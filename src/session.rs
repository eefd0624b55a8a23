//! Call session tying together connection capture, widget lookup and stream
//! switching.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use derive_more::{Display, From};
use futures::future::{self, Aborted};
use tracerr::Traced;

use crate::{
    connection::{ConnectionCapture, SenderLookupTier},
    media::{
        MediaConstraints, StreamSwitcher, SwitchError, SwitchMode,
        SwitchOutcome,
    },
    platform::{self, MediaDevices, WebMediaDevices, Widget},
    settings::SwitchSettings,
    utils::{Caused, TaskHandle},
    widget::{LocateError, WidgetLocator},
};

/// Errors of a whole switch operation.
#[derive(Clone, Debug, Display, From)]
pub enum SessionError {
    /// The call widget wasn't found.
    #[display(fmt = "{}", _0)]
    Locate(LocateError),

    /// Switching the stream failed.
    #[display(fmt = "{}", _0)]
    Switch(SwitchError),
}

impl Caused for SessionError {
    fn name(&self) -> &'static str {
        match self {
            Self::Locate(err) => err.name(),
            Self::Switch(err) => err.name(),
        }
    }

    fn cause(self) -> Option<platform::Error> {
        match self {
            Self::Locate(err) => err.cause(),
            Self::Switch(err) => err.cause(),
        }
    }
}

/// Actual data of a [`Session`].
struct Inner {
    /// Slot with the call's connection.
    capture: ConnectionCapture,

    /// Lookup of the call widget.
    locator: WidgetLocator,

    /// Acquisition of new streams.
    switcher: StreamSwitcher,

    /// Widget lookup in progress along with its sequence number. Aborted on
    /// drop.
    pending_locate: RefCell<Option<(u64, TaskHandle)>>,

    /// Sequence number of the last started widget lookup.
    locate_seq: Cell<u64>,
}

/// Context of a single call: its captured connection and everything needed
/// to switch its outgoing video.
///
/// Independent [`Session`]s never share state. Cheap to clone: all clones
/// refer to the same session.
#[derive(Clone)]
pub struct Session(Rc<Inner>);

impl Session {
    /// Creates a new [`Session`] acquiring media from the browser.
    #[inline]
    #[must_use]
    pub fn new(settings: SwitchSettings) -> Self {
        Self::with_media_devices(settings, Rc::new(WebMediaDevices))
    }

    /// Creates a new [`Session`] acquiring media from the provided
    /// [`MediaDevices`].
    #[must_use]
    pub fn with_media_devices(
        settings: SwitchSettings,
        media_devices: Rc<dyn MediaDevices>,
    ) -> Self {
        Self(Rc::new(Inner {
            capture: ConnectionCapture::new(),
            locator: WidgetLocator::new(settings),
            switcher: StreamSwitcher::new(media_devices),
            pending_locate: RefCell::new(None),
            locate_seq: Cell::new(0),
        }))
    }

    /// Returns [`ConnectionCapture`] of this [`Session`].
    #[inline]
    #[must_use]
    pub fn capture(&self) -> &ConnectionCapture {
        &self.0.capture
    }

    /// Returns [`SwitchSettings`] of this [`Session`].
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &SwitchSettings {
        self.0.locator.settings()
    }

    /// Returns [`SenderLookupTier`] used by the last outgoing track
    /// replacement.
    #[inline]
    #[must_use]
    pub fn last_lookup_tier(&self) -> Option<SenderLookupTier> {
        self.0.capture.last_lookup_tier()
    }

    /// Locates the call widget with the configured retry policy.
    ///
    /// A lookup started here replaces (and thereby cancels) the previous
    /// pending one, and can be cancelled with [`Session::cancel_locate()`].
    ///
    /// # Errors
    ///
    /// With [`LocateError::NotFound`] if the widget isn't initialized in
    /// time, or with [`LocateError::Cancelled`] if the lookup is cancelled.
    pub async fn locate_widget(&self) -> Result<Widget, Traced<LocateError>> {
        let locator = self.0.locator.clone();
        let (fut, abort) =
            future::abortable(async move { locator.locate().await });
        let seq = self.0.locate_seq.get().wrapping_add(1);
        self.0.locate_seq.set(seq);
        drop(self.0.pending_locate.replace(Some((seq, abort.into()))));

        let res = fut.await;
        let mut pending = self.0.pending_locate.borrow_mut();
        if matches!(&*pending, Some((s, _)) if *s == seq) {
            drop(pending.take());
        }
        drop(pending);

        match res {
            Ok(res) => res.map_err(tracerr::wrap!()),
            Err(Aborted) => Err(tracerr::new!(LocateError::Cancelled)),
        }
    }

    /// Cancels the pending widget lookup.
    ///
    /// Returns `false` if there was none.
    pub fn cancel_locate(&self) -> bool {
        let pending = self.0.pending_locate.borrow_mut().take();
        pending.is_some()
    }

    /// Locates the call widget and switches its stream.
    ///
    /// # Errors
    ///
    /// See [`Session::locate_widget()`] and [`StreamSwitcher::switch()`].
    pub async fn switch_stream(
        &self,
        mode: SwitchMode,
        caps: MediaConstraints,
    ) -> Result<SwitchOutcome, Traced<SessionError>> {
        let widget = self
            .locate_widget()
            .await
            .map_err(tracerr::map_from_and_wrap!())?;
        self.0
            .switcher
            .switch(&self.0.capture, &widget, caps, mode)
            .await
            .map_err(tracerr::map_from_and_wrap!())
    }

    /// Switches the outgoing video to a screen capture.
    ///
    /// # Errors
    ///
    /// See [`Session::switch_stream()`].
    pub async fn start_screen_share(
        &self,
    ) -> Result<SwitchOutcome, Traced<SessionError>> {
        log::info!("Starting screen share...");
        let outcome = self
            .switch_stream(SwitchMode::ScreenShare, MediaConstraints::default())
            .await?;
        log::info!("Screen sharing started successfully");
        Ok(outcome)
    }

    /// Switches the outgoing video back to the camera.
    ///
    /// # Errors
    ///
    /// See [`Session::switch_stream()`].
    pub async fn switch_to_camera(
        &self,
    ) -> Result<SwitchOutcome, Traced<SessionError>> {
        log::info!("Switching to camera...");
        let outcome = self
            .switch_stream(SwitchMode::Camera, MediaConstraints::default())
            .await?;
        log::info!("Switched to camera successfully");
        Ok(outcome)
    }

    /// Forgets the captured connection, removes the constructor interceptor
    /// and cancels the pending widget lookup.
    pub fn dispose(&self) {
        let _ = self.cancel_locate();
        self.0.capture.clear();
    }
}
