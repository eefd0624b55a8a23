#![cfg(feature = "mockable")]

use std::rc::Rc;

use futures::future::{self, FutureExt as _};
use medea_stream_switch::{
    connection::{SenderLookupTier, TrackReplacement},
    media::{MediaConstraints, SwitchError, SwitchMode},
    platform::{self, MockMediaDevices},
    settings::SwitchSettings,
    widget::LocateError,
    Session, SessionError,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use crate::{
    audio_track, settings_for, sleep, stream_of, video_track, MountedWidget,
};

/// Mounts a widget with the provided `id` displaying a stream of the
/// provided tracks.
fn widget_showing(
    id: &str,
    tracks: &[&platform::MediaStreamTrack],
) -> MountedWidget {
    let widget = MountedWidget::with_video(id);
    widget
        .video()
        .set_src_object(Some(stream_of(tracks).as_ref()));
    widget
}

/// Returns a [`MockMediaDevices`] resolving [getDisplayMedia()][1] once with
/// the provided stream.
///
/// [1]: https://w3.org/TR/screen-capture/#dom-mediadevices-getdisplaymedia
fn display_media(stream: platform::MediaStream) -> MockMediaDevices {
    let mut devices = MockMediaDevices::new();
    devices
        .expect_get_display_media()
        .times(1)
        .return_once_st(move || future::ok(stream).boxed_local());
    devices
}

#[wasm_bindgen_test]
async fn screen_share_keeps_current_audio() {
    let (audio, camera) = (audio_track(), video_track());
    let mounted = widget_showing("switch-keep-audio", &[&audio, &camera]);
    let mut devices = display_media(stream_of(&[&video_track()]));
    devices.expect_get_user_media().times(0);
    let session = Session::with_media_devices(
        settings_for("switch-keep-audio"),
        Rc::new(devices),
    );

    let outcome = session
        .switch_stream(SwitchMode::ScreenShare, MediaConstraints::default())
        .await
        .unwrap();

    let kept = outcome.stream.audio_tracks();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id(), audio.id());
    assert!(camera.is_ended());
    assert!(!audio.is_ended());
    assert_eq!(mounted.transform(), "none");
}

#[wasm_bindgen_test]
async fn screen_share_asks_microphone_once() {
    let _mounted = widget_showing("switch-mic", &[&video_track()]);
    let mic = audio_track();
    let mut devices = display_media(stream_of(&[&video_track()]));
    let mic_stream = stream_of(&[&mic]);
    devices
        .expect_get_user_media()
        .withf(|caps| *caps == MediaConstraints::MICROPHONE)
        .times(1)
        .return_once_st(move |_| future::ok(mic_stream).boxed_local());
    let session = Session::with_media_devices(
        settings_for("switch-mic"),
        Rc::new(devices),
    );

    let outcome = session.start_screen_share().await.unwrap();

    let audio = outcome.stream.audio_tracks();
    assert_eq!(audio.len(), 1);
    assert_eq!(audio[0].id(), mic.id());
}

#[wasm_bindgen_test]
async fn microphone_failure_is_not_fatal() {
    let _mounted = widget_showing("switch-no-mic", &[&video_track()]);
    let mut devices = display_media(stream_of(&[&video_track()]));
    devices.expect_get_user_media().times(1).return_once_st(|_| {
        future::err(JsValue::from_str("NotAllowedError").into()).boxed_local()
    });
    let session = Session::with_media_devices(
        settings_for("switch-no-mic"),
        Rc::new(devices),
    );

    let outcome = session.start_screen_share().await.unwrap();

    assert!(outcome.stream.audio_tracks().is_empty());
    assert_eq!(outcome.stream.video_tracks().len(), 1);
}

#[wasm_bindgen_test]
async fn screen_share_without_audio_constraint_skips_microphone() {
    let _mounted = widget_showing("switch-mute", &[&video_track()]);
    let mut devices = display_media(stream_of(&[&video_track()]));
    devices.expect_get_user_media().times(0);
    let session = Session::with_media_devices(
        settings_for("switch-mute"),
        Rc::new(devices),
    );

    let caps = MediaConstraints::new(true, false);

    let outcome = session
        .switch_stream(SwitchMode::ScreenShare, caps)
        .await
        .unwrap();

    assert!(outcome.stream.audio_tracks().is_empty());
}

#[wasm_bindgen_test]
async fn camera_is_mirrored_and_displayed() {
    let screen = video_track();
    let mounted = widget_showing("switch-camera", &[&screen]);
    let camera = video_track();
    let camera_stream = stream_of(&[&camera, &audio_track()]);
    let mut devices = MockMediaDevices::new();
    devices
        .expect_get_user_media()
        .withf(|caps| *caps == MediaConstraints::default())
        .times(1)
        .return_once_st(move |_| future::ok(camera_stream).boxed_local());
    devices.expect_get_display_media().times(0);
    let session = Session::with_media_devices(
        settings_for("switch-camera"),
        Rc::new(devices),
    );

    let outcome = session.switch_to_camera().await.unwrap();

    let shown = mounted.displayed_stream().unwrap().video_tracks();
    assert_eq!(shown[0].id(), camera.id());
    assert_ne!(shown[0].id(), screen.id());
    assert!(screen.is_ended());
    assert_eq!(mounted.transform(), "scaleX(-1)");
    assert_eq!(outcome.replacement, TrackReplacement::NoConnection);
}

#[wasm_bindgen_test]
async fn replaces_outgoing_video_of_captured_connection() {
    let (audio, camera) = (audio_track(), video_track());
    let _mounted = widget_showing("switch-outgoing", &[&audio, &camera]);
    let screen = video_track();
    let devices = display_media(stream_of(&[&screen]));
    let session = Session::with_media_devices(
        settings_for("switch-outgoing"),
        Rc::new(devices),
    );
    let conn = session.capture().create(None).unwrap();
    let sys_conn: &web_sys::RtcPeerConnection = conn.as_ref();
    let local = stream_of(&[&audio, &camera]);
    let _ = sys_conn.add_track_0(audio.as_ref(), local.as_ref());
    let _ = sys_conn.add_track_0(camera.as_ref(), local.as_ref());

    let outcome = session.start_screen_share().await.unwrap();

    assert_eq!(
        outcome.replacement,
        TrackReplacement::Replaced(SenderLookupTier::ByKind),
    );
    assert_eq!(session.last_lookup_tier(), Some(SenderLookupTier::ByKind));
    let sent: Vec<_> = conn
        .senders()
        .iter()
        .filter_map(|s| s.track())
        .map(|t| t.id())
        .collect();
    assert_eq!(sent, vec![audio.id(), screen.id()]);
}

#[wasm_bindgen_test]
async fn rejected_replacement_keeps_new_stream_displayed() {
    let (audio, camera) = (audio_track(), video_track());
    let mounted = widget_showing("switch-rejected", &[&audio, &camera]);
    let screen = video_track();
    let devices = display_media(stream_of(&[&screen]));
    let session = Session::with_media_devices(
        settings_for("switch-rejected"),
        Rc::new(devices),
    );
    let conn = session.capture().create(None).unwrap();
    let sys_conn: &web_sys::RtcPeerConnection = conn.as_ref();
    let local = stream_of(&[&audio]);
    let _ = sys_conn.add_track_0(audio.as_ref(), local.as_ref());

    let err = session.start_screen_share().await.unwrap_err();

    assert!(matches!(
        err.into_inner(),
        SessionError::Switch(SwitchError::TrackReplacementFailed(_)),
    ));
    let shown = mounted.displayed_stream().unwrap().video_tracks();
    assert_eq!(shown[0].id(), screen.id());
    assert_eq!(mounted.transform(), "none");
}

#[wasm_bindgen_test]
async fn newer_switch_cancels_pending_one() {
    let mounted = MountedWidget::new("switch-twice");
    let element = mounted.element().clone();
    platform::spawn(async move {
        sleep(30).await;
        let video = platform::document()
            .unwrap()
            .create_element("video")
            .unwrap();
        element.append_child(&video).unwrap();
    });
    let mut devices = display_media(stream_of(&[&video_track()]));
    devices.expect_get_user_media().times(1).return_once_st(|_| {
        future::err(JsValue::from_str("NotAllowedError").into()).boxed_local()
    });
    let session = Session::with_media_devices(
        SwitchSettings {
            max_attempts: 20,
            ..settings_for("switch-twice")
        },
        Rc::new(devices),
    );

    let (first, second) = futures::join!(
        session.start_screen_share(),
        session.start_screen_share(),
    );

    assert!(matches!(
        first.unwrap_err().into_inner(),
        SessionError::Locate(LocateError::Cancelled),
    ));
    let outcome = second.unwrap();
    assert_eq!(outcome.stream.video_tracks().len(), 1);
    assert!(mounted.displayed_stream().is_some());
}

#[wasm_bindgen_test]
async fn display_media_failure_is_reported() {
    let camera = video_track();
    let _mounted = widget_showing("switch-denied", &[&camera]);
    let mut devices = MockMediaDevices::new();
    devices.expect_get_display_media().times(1).return_once_st(|| {
        future::err(JsValue::from_str("NotAllowedError").into()).boxed_local()
    });
    let session = Session::with_media_devices(
        settings_for("switch-denied"),
        Rc::new(devices),
    );

    let err = session.start_screen_share().await.unwrap_err();

    match err.into_inner() {
        SessionError::Switch(SwitchError::GetDisplayMediaFailed(cause)) => {
            assert_eq!(cause.message(), "NotAllowedError");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(camera.is_ended());
}

#[wasm_bindgen_test]
async fn missing_widget_fails_before_acquiring_media() {
    let mut devices = MockMediaDevices::new();
    devices.expect_get_display_media().times(0);
    devices.expect_get_user_media().times(0);
    let session = Session::with_media_devices(
        settings_for("switch-absent"),
        Rc::new(devices),
    );

    let err = session.start_screen_share().await.unwrap_err();

    assert_eq!(
        err.into_inner().to_string(),
        "Could not find initialized WebRTC component after 3 attempts",
    );
}
