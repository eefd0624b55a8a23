//! Settings of a call session.

use std::time::Duration;

use serde::Deserialize;

/// Where to look for the call widget and how long to wait for it.
///
/// Every field is optional when deserialized, missing ones take their
/// [`Default`] values.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SwitchSettings {
    /// `id` attribute of the widget element.
    ///
    /// Default: `video-source`.
    pub widget_id: String,

    /// CSS selector used when no element has [`SwitchSettings::widget_id`].
    ///
    /// Default: `.webrtc`.
    pub fallback_selector: String,

    /// Property the widget sets on its element once its internal state is
    /// initialized. Either this property or a nested `<video>` marks the
    /// widget as ready.
    ///
    /// Default: `_webrtc`.
    pub init_marker: String,

    /// Maximum number of lookups before giving up.
    ///
    /// Default: `5`.
    pub max_attempts: u32,

    /// Pause between two lookups, in milliseconds.
    ///
    /// Default: `500`.
    pub retry_delay_ms: u32,

    /// DOM event dispatched on the document once the widget is ready. When
    /// set, it ends the pause between two lookups early.
    ///
    /// Default: none.
    pub ready_event: Option<String>,
}

impl SwitchSettings {
    /// Returns pause between two lookups as [`Duration`].
    #[inline]
    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms.into())
    }
}

impl Default for SwitchSettings {
    fn default() -> Self {
        Self {
            widget_id: "video-source".into(),
            fallback_selector: ".webrtc".into(),
            init_marker: "_webrtc".into(),
            max_attempts: 5,
            retry_delay_ms: 500,
            ready_event: None,
        }
    }
}
