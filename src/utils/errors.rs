//! Helpers for application errors.

use crate::platform;

/// Representation of an error which can be caused by an error returned from
/// the JS side.
pub trait Caused {
    /// Returns name of this error.
    fn name(&self) -> &'static str;

    /// Returns [`platform::Error`] if it is the cause.
    fn cause(self) -> Option<platform::Error>;
}
