use js_sys::{Array, Function, Reflect};
use medea_stream_switch::{
    api::wasm::global,
    connection::{
        CaptureError, ConnectionCapture, SenderLookupTier, TrackReplacement,
    },
    platform::{self, RtcPeerConnection},
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

use crate::{audio_track, stream_of, video_track};

/// Returns the current global `RTCPeerConnection` constructor.
fn global_constructor() -> JsValue {
    Reflect::get(&platform::window(), &JsValue::from_str("RTCPeerConnection"))
        .unwrap()
}

/// Constructs a connection with `new RTCPeerConnection()` the way page code
/// does.
fn construct_as_page() -> web_sys::RtcPeerConnection {
    let ctor: Function = global_constructor().unchecked_into();
    Reflect::construct(&ctor, &Array::new())
        .unwrap()
        .unchecked_into()
}

/// Returns the underlying JS object of the provided connection.
fn sys(conn: &RtcPeerConnection) -> &web_sys::RtcPeerConnection {
    conn.as_ref()
}

/// Returns the provided connection as a plain [`JsValue`].
fn js(conn: &RtcPeerConnection) -> JsValue {
    sys(conn).clone().into()
}

#[wasm_bindgen_test]
async fn create_records_connection() {
    let capture = ConnectionCapture::new();

    let conn = capture.create(None).unwrap();

    assert_eq!(js(&capture.current().unwrap()), js(&conn));
}

#[wasm_bindgen_test]
async fn newest_recorded_connection_wins() {
    let capture = ConnectionCapture::new();
    let _first = capture.create(None).unwrap();

    let second = construct_as_page();
    capture.record(second.clone().into());

    assert_eq!(js(&capture.current().unwrap()), JsValue::from(second));
}

#[wasm_bindgen_test]
async fn hook_records_page_connections() {
    let capture = ConnectionCapture::new();
    capture.install_hook().unwrap();

    let conn = construct_as_page();

    assert!(conn.is_instance_of::<web_sys::RtcPeerConnection>());
    assert_eq!(js(&capture.current().unwrap()), JsValue::from(conn));
    assert!(capture.uninstall_hook());
}

#[wasm_bindgen_test]
async fn default_session_captures_only_after_install() {
    let session = global::default_session();
    let capture = session.session().capture();
    let _before = construct_as_page();
    assert!(!capture.is_hook_installed());
    assert!(capture.current().is_none());

    global::install_connection_capture().unwrap();
    let conn = construct_as_page();

    assert_eq!(js(&capture.current().unwrap()), JsValue::from(conn));
    assert!(global::uninstall_connection_capture());
    assert!(!capture.is_hook_installed());
}

#[wasm_bindgen_test]
async fn uninstall_restores_constructor() {
    let original = global_constructor();
    let capture = ConnectionCapture::new();

    capture.install_hook().unwrap();
    assert_ne!(global_constructor(), original);
    assert!(capture.uninstall_hook());

    assert_eq!(global_constructor(), original);
    assert!(!capture.uninstall_hook());

    let _conn = construct_as_page();
    assert!(capture.current().is_none());
}

#[wasm_bindgen_test]
async fn double_install_fails() {
    let capture = ConnectionCapture::new();
    capture.install_hook().unwrap();

    let err = capture.install_hook().unwrap_err();

    assert!(matches!(err.into_inner(), CaptureError::AlreadyInstalled));
    assert!(capture.is_hook_installed());
    capture.clear();
    assert!(!capture.is_hook_installed());
}

#[wasm_bindgen_test]
async fn replacement_without_connection() {
    let capture = ConnectionCapture::new();

    let res = capture
        .replace_video_track(&stream_of(&[&video_track()]))
        .await
        .unwrap();

    assert_eq!(res, TrackReplacement::NoConnection);
    assert_eq!(capture.last_lookup_tier(), None);
}

#[wasm_bindgen_test]
async fn replaces_track_of_video_sender() {
    let capture = ConnectionCapture::new();
    let conn = capture.create(None).unwrap();
    let (audio, video) = (audio_track(), video_track());
    let local = stream_of(&[&audio, &video]);
    let _ = sys(&conn).add_track_0(audio.as_ref(), local.as_ref());
    let _ = sys(&conn).add_track_0(video.as_ref(), local.as_ref());
    let new_video = video_track();

    let res = capture
        .replace_video_track(&stream_of(&[&new_video]))
        .await
        .unwrap();

    assert_eq!(res, TrackReplacement::Replaced(SenderLookupTier::ByKind));
    assert_eq!(capture.last_lookup_tier(), Some(SenderLookupTier::ByKind));
    let sent: Vec<_> = conn
        .senders()
        .iter()
        .filter_map(|s| s.track())
        .map(|t| t.id())
        .collect();
    assert_eq!(sent, vec![audio.id(), new_video.id()]);
}

#[wasm_bindgen_test]
async fn falls_back_to_first_sender() {
    let capture = ConnectionCapture::new();
    let conn = capture.create(None).unwrap();
    let _ = sys(&conn).add_transceiver_with_str("video");
    let new_video = video_track();

    let res = capture
        .replace_video_track(&stream_of(&[&new_video]))
        .await
        .unwrap();

    assert_eq!(
        res,
        TrackReplacement::Replaced(SenderLookupTier::ByPosition),
    );
    let sent = conn.senders()[0].track().map(|t| t.id());
    assert_eq!(sent, Some(new_video.id()));
}

#[wasm_bindgen_test]
async fn nothing_to_replace_without_senders() {
    let capture = ConnectionCapture::new();
    let _conn = capture.create(None).unwrap();

    let res = capture
        .replace_video_track(&stream_of(&[&video_track()]))
        .await
        .unwrap();

    assert_eq!(res, TrackReplacement::NothingToReplace);
}

#[wasm_bindgen_test]
async fn nothing_to_replace_without_video() {
    let capture = ConnectionCapture::new();
    let conn = capture.create(None).unwrap();
    let video = video_track();
    let local = stream_of(&[&video]);
    let _ = sys(&conn).add_track_0(video.as_ref(), local.as_ref());

    let res = capture
        .replace_video_track(&stream_of(&[&audio_track()]))
        .await
        .unwrap();

    assert_eq!(res, TrackReplacement::NothingToReplace);
}
