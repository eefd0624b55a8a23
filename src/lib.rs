//! Switching of the outgoing video of a third-party WebRTC call widget
//! between the camera and a screen capture.
//!
//! The call's `RTCPeerConnection` is captured into a [`Session`], the widget
//! element is located in the document, a new local stream is acquired and its
//! video track replaces the outgoing one without renegotiation.

#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod connection;
pub mod media;
pub mod platform;
pub mod session;
pub mod settings;
pub mod utils;
pub mod widget;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(all(feature = "wee_alloc", target_arch = "wasm32"))]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[doc(inline)]
pub use self::{
    api::{CallSession, SwitchSettings},
    session::{Session, SessionError},
};
