//! External API of this library accessible from JS.

mod errors;
pub mod wasm;

use derive_more::From;
use wasm_bindgen::JsValue;

pub use self::{
    errors::{
        FormatException, InternalException, LocalMediaInitException,
        LocalMediaInitExceptionKind, StateError, TrackReplacementException,
        WidgetNotFoundException, WidgetNotFoundExceptionKind,
    },
    wasm::{CallSession, SenderLookupTier, SwitchMode, SwitchSettings},
};

/// Any exception thrown to JS.
#[derive(Debug, From)]
pub enum Error {
    /// [`StateError`] exception.
    State(StateError),

    /// [`FormatException`] exception.
    Format(FormatException),

    /// [`WidgetNotFoundException`] exception.
    WidgetNotFound(WidgetNotFoundException),

    /// [`LocalMediaInitException`] exception.
    LocalMediaInit(LocalMediaInitException),

    /// [`TrackReplacementException`] exception.
    TrackReplacement(TrackReplacementException),

    /// [`InternalException`] exception.
    Internal(InternalException),
}

impl Error {
    /// Returns message describing the problem, without a stacktrace.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::State(e) => e.message(),
            Self::Format(e) => e.message(),
            Self::WidgetNotFound(e) => e.message(),
            Self::LocalMediaInit(e) => e.message(),
            Self::TrackReplacement(e) => e.message(),
            Self::Internal(e) => e.message(),
        }
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        match err {
            Error::State(e) => e.into(),
            Error::Format(e) => e.into(),
            Error::WidgetNotFound(e) => e.into(),
            Error::LocalMediaInit(e) => e.into(),
            Error::TrackReplacement(e) => e.into(),
            Error::Internal(e) => e.into(),
        }
    }
}
