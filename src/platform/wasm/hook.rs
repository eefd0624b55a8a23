//! Transparent interception of the global `RTCPeerConnection` constructor.

use js_sys::{Array, Function, Object, Proxy, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

use crate::platform::{Error, RtcPeerConnection};

use super::window;

/// Name of the intercepted global constructor.
const CONSTRUCTOR: &str = "RTCPeerConnection";

/// Type of the `construct` trap of the installed [`Proxy`].
type ConstructTrap =
    dyn FnMut(JsValue, Array, JsValue) -> Result<JsValue, JsValue>;

/// Substitutes `window.RTCPeerConnection` with a [`Proxy`] reporting every
/// constructed [`RtcPeerConnection`] to a callback.
///
/// The [`Proxy`] forwards everything else to the original constructor, so
/// the prototype chain, static methods and `instanceof` checks stay intact.
///
/// The original constructor is restored when this [`ConstructorHook`] is
/// dropped.
pub struct ConstructorHook {
    /// Original `RTCPeerConnection` constructor.
    original: JsValue,

    /// Installed [`Proxy`], used to detect whether somebody replaced it
    /// while this [`ConstructorHook`] was active.
    proxy: Proxy,

    /// `construct` trap referenced by the installed [`Proxy`].
    _trap: Closure<ConstructTrap>,
}

impl ConstructorHook {
    /// Installs the hook, calling `on_construct` with every connection
    /// constructed through the global constructor afterwards.
    ///
    /// # Errors
    ///
    /// If the global constructor cannot be read or replaced.
    pub fn install<F>(mut on_construct: F) -> Result<Self, Error>
    where
        F: FnMut(RtcPeerConnection) + 'static,
    {
        let global: JsValue = window().into();
        let key = JsValue::from_str(CONSTRUCTOR);
        let original = Reflect::get(&global, &key)?;
        if !original.is_function() {
            return Err(Error::from(JsValue::from_str(
                "RTCPeerConnection is not supported by this browser",
            )));
        }

        let trap = Closure::wrap(Box::new(
            move |target: JsValue, args: Array, new_target: JsValue| {
                let conn = Reflect::construct_with_new_target(
                    target.unchecked_ref::<Function>(),
                    &args,
                    new_target.unchecked_ref::<Function>(),
                )?;
                log::debug!("Intercepted new RTCPeerConnection creation");
                on_construct(RtcPeerConnection::from(
                    conn.clone().unchecked_into::<web_sys::RtcPeerConnection>(),
                ));
                Ok(conn)
            },
        ) as Box<ConstructTrap>);

        let handler = Object::new();
        Reflect::set(
            &handler,
            &JsValue::from_str("construct"),
            trap.as_ref(),
        )?;
        let proxy = Proxy::new(&original, &handler);
        Reflect::set(&global, &key, &proxy)?;
        log::info!("RTCPeerConnection interceptor installed");

        Ok(Self {
            original,
            proxy,
            _trap: trap,
        })
    }
}

impl Drop for ConstructorHook {
    /// Puts the original constructor back.
    fn drop(&mut self) {
        let global: JsValue = window().into();
        let key = JsValue::from_str(CONSTRUCTOR);

        let current =
            Reflect::get(&global, &key).unwrap_or(JsValue::UNDEFINED);
        if current != JsValue::from(self.proxy.clone()) {
            log::warn!(
                "RTCPeerConnection was replaced by a third party, restoring \
                 the original constructor anyway",
            );
        }
        match Reflect::set(&global, &key, &self.original) {
            Ok(_) => log::info!("RTCPeerConnection interceptor removed"),
            Err(e) => {
                log::error!("Failed to restore RTCPeerConnection: {:?}", e);
            }
        }
    }
}
