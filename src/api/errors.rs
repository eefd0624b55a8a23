//! Implementations of the API errors which can be thrown.

use std::borrow::Cow;

use tracerr::{Trace, Traced};
use wasm_bindgen::prelude::wasm_bindgen;

use crate::{
    api::Error,
    connection::CaptureError,
    media::SwitchError,
    platform,
    session::SessionError,
    utils::Caused,
    widget::LocateError,
};

/// Error thrown when the operation wasn't allowed by the current state of the
/// object.
#[wasm_bindgen]
#[derive(Debug)]
pub struct StateError {
    /// Message describing the problem.
    message: Cow<'static, str>,

    /// Stacktrace of this [`StateError`].
    trace: Trace,
}

impl StateError {
    /// Creates a new [`StateError`] with the provided `message` and `trace`.
    #[inline]
    #[must_use]
    pub fn new<T: Into<Cow<'static, str>>>(message: T, trace: Trace) -> Self {
        Self {
            message: message.into(),
            trace,
        }
    }
}

#[wasm_bindgen]
impl StateError {
    /// Returns message describing the problem.
    #[must_use]
    pub fn message(&self) -> String {
        self.message.to_string()
    }

    /// Returns native stacktrace of this [`StateError`].
    #[must_use]
    pub fn trace(&self) -> String {
        self.trace.to_string()
    }
}

/// Exception thrown when a string or some other data doesn't have an expected
/// format and cannot be parsed or processed.
#[wasm_bindgen]
#[derive(Debug)]
pub struct FormatException(Cow<'static, str>);

impl FormatException {
    /// Creates a new [`FormatException`] with the provided `message` describing
    /// the problem.
    #[inline]
    #[must_use]
    pub fn new<T: Into<Cow<'static, str>>>(message: T) -> Self {
        Self(message.into())
    }
}

#[wasm_bindgen]
impl FormatException {
    /// Returns describing of the problem.
    #[must_use]
    pub fn message(&self) -> String {
        self.0.to_string()
    }
}

/// Possible error kinds of a [`WidgetNotFoundException`].
#[wasm_bindgen]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum WidgetNotFoundExceptionKind {
    /// No initialized widget appeared within the configured number of
    /// attempts.
    NotFound,

    /// Lookup was cancelled.
    Cancelled,

    /// Lookup didn't complete before the requested deadline.
    TimedOut,
}

/// Exception thrown when the call widget cannot be located.
#[wasm_bindgen]
#[derive(Debug)]
pub struct WidgetNotFoundException {
    /// Concrete error kind of this [`WidgetNotFoundException`].
    kind: WidgetNotFoundExceptionKind,

    /// Error message describing the problem.
    message: Cow<'static, str>,

    /// Stacktrace of this [`WidgetNotFoundException`].
    trace: Trace,
}

impl WidgetNotFoundException {
    /// Creates a new [`WidgetNotFoundException`] from the provided error
    /// `kind`, `message` and `trace`.
    #[inline]
    #[must_use]
    pub fn new<M: Into<Cow<'static, str>>>(
        kind: WidgetNotFoundExceptionKind,
        message: M,
        trace: Trace,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            trace,
        }
    }
}

#[wasm_bindgen]
impl WidgetNotFoundException {
    /// Returns concrete error kind of this [`WidgetNotFoundException`].
    #[must_use]
    pub fn kind(&self) -> WidgetNotFoundExceptionKind {
        self.kind
    }

    /// Returns error message describing the problem.
    #[must_use]
    pub fn message(&self) -> String {
        self.message.to_string()
    }

    /// Returns stacktrace of this [`WidgetNotFoundException`].
    #[must_use]
    pub fn trace(&self) -> String {
        self.trace.to_string()
    }
}

/// Possible error kinds of a [`LocalMediaInitException`].
#[wasm_bindgen]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum LocalMediaInitExceptionKind {
    /// Occurs if the [getUserMedia()][1] request failed.
    ///
    /// [1]: https://w3.org/TR/mediacapture-streams/#dom-mediadevices-getusermedia
    GetUserMediaFailed,

    /// Occurs if the [getDisplayMedia()][1] request failed.
    ///
    /// [1]: https://w3.org/TR/screen-capture/#dom-mediadevices-getdisplaymedia
    GetDisplayMediaFailed,
}

/// Exception thrown when accessing media devices.
#[wasm_bindgen]
#[derive(Debug)]
pub struct LocalMediaInitException {
    /// Concrete error kind of this [`LocalMediaInitException`].
    kind: LocalMediaInitExceptionKind,

    /// Error message describing the problem.
    message: Cow<'static, str>,

    /// [`platform::Error`] that caused this [`LocalMediaInitException`].
    cause: Option<platform::Error>,

    /// Stacktrace of this [`LocalMediaInitException`].
    trace: Trace,
}

impl LocalMediaInitException {
    /// Creates a new [`LocalMediaInitException`] from the provided error
    /// `kind`, `message`, optional `cause` and `trace`.
    #[inline]
    #[must_use]
    pub fn new<M: Into<Cow<'static, str>>>(
        kind: LocalMediaInitExceptionKind,
        message: M,
        cause: Option<platform::Error>,
        trace: Trace,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            cause,
            trace,
        }
    }
}

#[wasm_bindgen]
impl LocalMediaInitException {
    /// Returns concrete error kind of this [`LocalMediaInitException`].
    #[must_use]
    pub fn kind(&self) -> LocalMediaInitExceptionKind {
        self.kind
    }

    /// Returns error message describing the problem.
    #[must_use]
    pub fn message(&self) -> String {
        self.message.to_string()
    }

    /// Returns JS error that caused this [`LocalMediaInitException`].
    #[must_use]
    pub fn cause(&self) -> Option<js_sys::Error> {
        self.cause.clone().map(Into::into)
    }

    /// Returns stacktrace of this [`LocalMediaInitException`].
    #[must_use]
    pub fn trace(&self) -> String {
        self.trace.to_string()
    }
}

/// Exception thrown when [replaceTrack()][1] rejects the new outgoing video
/// track.
///
/// The new stream is displayed locally already when this is thrown.
///
/// [1]: https://w3.org/TR/webrtc/#dom-rtcrtpsender-replacetrack
#[wasm_bindgen]
#[derive(Debug)]
pub struct TrackReplacementException {
    /// Error message describing the problem.
    message: Cow<'static, str>,

    /// [`platform::Error`] that caused this [`TrackReplacementException`].
    cause: Option<platform::Error>,

    /// Stacktrace of this [`TrackReplacementException`].
    trace: Trace,
}

impl TrackReplacementException {
    /// Creates a new [`TrackReplacementException`] from the provided error
    /// `message`, optional `cause` and `trace`.
    #[inline]
    #[must_use]
    pub fn new<M: Into<Cow<'static, str>>>(
        message: M,
        cause: Option<platform::Error>,
        trace: Trace,
    ) -> Self {
        Self {
            message: message.into(),
            cause,
            trace,
        }
    }
}

#[wasm_bindgen]
impl TrackReplacementException {
    /// Returns error message describing the problem.
    #[must_use]
    pub fn message(&self) -> String {
        self.message.to_string()
    }

    /// Returns JS error that caused this [`TrackReplacementException`].
    #[must_use]
    pub fn cause(&self) -> Option<js_sys::Error> {
        self.cause.clone().map(Into::into)
    }

    /// Returns stacktrace of this [`TrackReplacementException`].
    #[must_use]
    pub fn trace(&self) -> String {
        self.trace.to_string()
    }
}

/// Internal exception of this library.
///
/// This is either a programmatic error or some unexpected platform component
/// failure that cannot be handled in any way.
#[wasm_bindgen]
#[derive(Debug)]
pub struct InternalException {
    /// Error message describing the problem.
    message: Cow<'static, str>,

    /// [`platform::Error`] that caused this [`InternalException`].
    cause: Option<platform::Error>,

    /// Stacktrace of this [`InternalException`].
    trace: Trace,
}

impl InternalException {
    /// Creates a new [`InternalException`] from the provided error `message`,
    /// `trace` and an optional `cause`.
    #[inline]
    #[must_use]
    pub fn new<T: Into<Cow<'static, str>>>(
        message: T,
        cause: Option<platform::Error>,
        trace: Trace,
    ) -> Self {
        Self {
            message: message.into(),
            cause,
            trace,
        }
    }
}

#[wasm_bindgen]
impl InternalException {
    /// Returns error message describing the problem.
    #[must_use]
    pub fn message(&self) -> String {
        self.message.to_string()
    }

    /// Returns JS error that caused this [`InternalException`].
    #[must_use]
    pub fn cause(&self) -> Option<js_sys::Error> {
        self.cause.clone().map(Into::into)
    }

    /// Returns stacktrace of this [`InternalException`].
    #[must_use]
    pub fn trace(&self) -> String {
        self.trace.to_string()
    }
}

impl From<Traced<LocateError>> for Error {
    fn from(err: Traced<LocateError>) -> Self {
        use LocateError as LE;
        use WidgetNotFoundExceptionKind as Kind;

        let (err, trace) = err.into_parts();
        let kind = match err {
            LE::NotFound(_) => Kind::NotFound,
            LE::Cancelled => Kind::Cancelled,
            LE::TimedOut => Kind::TimedOut,
        };

        WidgetNotFoundException::new(kind, err.to_string(), trace).into()
    }
}

impl From<Traced<SwitchError>> for Error {
    fn from(err: Traced<SwitchError>) -> Self {
        use LocalMediaInitExceptionKind as Kind;
        use SwitchError as SE;

        let (err, trace) = err.into_parts();
        let message = err.to_string();

        match err {
            SE::GetUserMediaFailed(cause) => LocalMediaInitException::new(
                Kind::GetUserMediaFailed,
                message,
                Some(cause),
                trace,
            )
            .into(),
            SE::GetDisplayMediaFailed(cause) => LocalMediaInitException::new(
                Kind::GetDisplayMediaFailed,
                message,
                Some(cause),
                trace,
            )
            .into(),
            SE::TrackReplacementFailed(err) => {
                TrackReplacementException::new(message, err.cause(), trace)
                    .into()
            }
        }
    }
}

impl From<Traced<SessionError>> for Error {
    #[inline]
    fn from(err: Traced<SessionError>) -> Self {
        let (err, trace) = err.into_parts();

        match err {
            SessionError::Locate(err) => Traced::from_parts(err, trace).into(),
            SessionError::Switch(err) => Traced::from_parts(err, trace).into(),
        }
    }
}

impl From<Traced<CaptureError>> for Error {
    fn from(err: Traced<CaptureError>) -> Self {
        let (err, trace) = err.into_parts();
        let message = err.to_string();

        match err {
            CaptureError::AlreadyInstalled => {
                StateError::new(message, trace).into()
            }
            CaptureError::InstallHook(_)
            | CaptureError::CreateConnection(_) => {
                InternalException::new(message, err.cause(), trace).into()
            }
        }
    }
}
