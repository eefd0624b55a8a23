//! Platform-specific functionality.
//!
//! Everything that touches the browser directly lives in the [`wasm`]
//! submodule. The rest of the crate only depends on the types re-exported
//! from here.

mod media_devices;
mod wasm;

#[cfg(feature = "mockable")]
pub use self::media_devices::MockMediaDevices;
pub use self::{
    media_devices::MediaDevices,
    wasm::{
        alert, delay_for, document,
        dom::{ReadySignal, VideoSurface, Widget},
        error::Error,
        hook::ConstructorHook,
        init_logger,
        media_devices::WebMediaDevices,
        media_stream::MediaStream,
        media_track::MediaStreamTrack,
        peer_connection::{RtcPeerConnection, RtpSender},
        set_panic_hook, spawn,
        utils::{EventListener, EventListenerBindError},
        window,
    },
};
