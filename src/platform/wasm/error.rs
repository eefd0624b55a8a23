//! Errors returned from the JS side.

use std::borrow::Cow;

use derive_more::Display;
use wasm_bindgen::{JsCast, JsValue};

/// Wrapper for a JS value returned from the JS side as an error.
#[derive(Clone, Debug, Display)]
#[display(fmt = "{}: {}", name, message)]
pub struct Error {
    /// Name of the JS error.
    name: Cow<'static, str>,

    /// Message of the JS error.
    message: Cow<'static, str>,

    /// Original JS error, if the thrown value was a [`js_sys::Error`].
    sys_cause: Option<js_sys::Error>,
}

impl Error {
    /// Returns name of this [`Error`].
    #[inline]
    #[must_use]
    pub fn name(&self) -> String {
        self.name.to_string()
    }

    /// Returns message of this [`Error`].
    #[inline]
    #[must_use]
    pub fn message(&self) -> String {
        self.message.to_string()
    }
}

impl From<JsValue> for Error {
    fn from(val: JsValue) -> Self {
        match val.dyn_into::<js_sys::Error>() {
            Ok(err) => Self {
                name: Cow::Owned(err.name().into()),
                message: Cow::Owned(err.message().into()),
                sys_cause: Some(err),
            },
            Err(val) => match val.as_string() {
                Some(reason) => Self {
                    name: "Unknown JS error".into(),
                    message: reason.into(),
                    sys_cause: None,
                },
                None => Self {
                    name: "Unknown JS error".into(),
                    message: format!("{:?}", val).into(),
                    sys_cause: None,
                },
            },
        }
    }
}

impl From<Error> for js_sys::Error {
    fn from(err: Error) -> Self {
        if let Some(cause) = err.sys_cause {
            return cause;
        }
        let sys_err = Self::new(&err.message);
        sys_err.set_name(&err.name);
        sys_err
    }
}
