use derive_more::{From, Into};
use wasm_bindgen::prelude::*;

use crate::{api::FormatException, settings};

/// Settings of a [`CallSession`]: where to look for the call widget and how
/// long to wait for it.
///
/// [`CallSession`]: crate::api::CallSession
#[wasm_bindgen]
#[derive(Clone, Debug, Default, From, Into)]
pub struct SwitchSettings(settings::SwitchSettings);

#[wasm_bindgen]
impl SwitchSettings {
    /// Creates new [`SwitchSettings`] with default values.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates new [`SwitchSettings`] from a plain JS object.
    ///
    /// Every field is optional: `widgetId`, `fallbackSelector`, `initMarker`,
    /// `maxAttempts`, `retryDelayMs` and `readyEvent`.
    ///
    /// # Errors
    ///
    /// With [`FormatException`] if the object has fields of unexpected types.
    #[wasm_bindgen(js_name = fromObject)]
    pub fn from_object(obj: &JsValue) -> Result<SwitchSettings, JsValue> {
        #[allow(deprecated)]
        let parsed = obj.into_serde::<settings::SwitchSettings>();
        parsed.map(Self).map_err(|e| {
            FormatException::new(format!("Invalid switch settings: {}", e))
                .into()
        })
    }

    /// Sets `id` attribute of the widget element.
    #[wasm_bindgen(js_name = widgetId)]
    pub fn widget_id(&mut self, id: String) {
        self.0.widget_id = id;
    }

    /// Sets CSS selector used when no element has the widget `id`.
    #[wasm_bindgen(js_name = fallbackSelector)]
    pub fn fallback_selector(&mut self, selector: String) {
        self.0.fallback_selector = selector;
    }

    /// Sets property marking the widget element as initialized.
    #[wasm_bindgen(js_name = initMarker)]
    pub fn init_marker(&mut self, marker: String) {
        self.0.init_marker = marker;
    }

    /// Sets maximum number of widget lookups.
    #[wasm_bindgen(js_name = maxAttempts)]
    pub fn max_attempts(&mut self, attempts: u32) {
        self.0.max_attempts = attempts;
    }

    /// Sets pause between two widget lookups, in milliseconds.
    #[wasm_bindgen(js_name = retryDelayMs)]
    pub fn retry_delay_ms(&mut self, delay_ms: u32) {
        self.0.retry_delay_ms = delay_ms;
    }

    /// Sets DOM event ending the pause between two widget lookups early.
    #[wasm_bindgen(js_name = readyEvent)]
    pub fn ready_event(&mut self, event: String) {
        self.0.ready_event = Some(event);
    }
}
