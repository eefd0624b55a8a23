use std::time::Duration;

use js_sys::Reflect;
use medea_stream_switch::{
    platform::{self, Widget},
    settings::SwitchSettings,
    utils,
    widget::{LocateError, Probe, WidgetLocator},
    Session,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use crate::{settings_for, sleep, MountedWidget};

#[wasm_bindgen_test]
async fn finds_widget_by_id() {
    let mounted = MountedWidget::with_video("widget-by-id");

    let widget = WidgetLocator::new(settings_for("widget-by-id"))
        .locate()
        .await
        .unwrap();

    assert!(mounted.is(widget.element()));
    assert!(widget.video_surface().is_some());
}

#[wasm_bindgen_test]
async fn falls_back_to_selector() {
    let mounted = MountedWidget::with_class("widget-by-class-fallback");

    let widget = WidgetLocator::new(settings_for("widget-by-class"))
        .locate()
        .await
        .unwrap();

    assert!(mounted.is(widget.element()));
}

#[wasm_bindgen_test]
async fn marker_without_video_is_ready() {
    let mounted = MountedWidget::new("widget-marker");
    Reflect::set(
        mounted.element(),
        &JsValue::from_str("_webrtc"),
        &js_sys::Object::new(),
    )
    .unwrap();

    match Widget::probe(&settings_for("widget-marker")) {
        Probe::Ready(widget) => assert!(widget.video_surface().is_none()),
        _ => panic!("widget with marker is not ready"),
    }
}

#[wasm_bindgen_test]
async fn empty_element_is_uninitialized() {
    let _mounted = MountedWidget::new("widget-empty");

    let probe = Widget::probe(&settings_for("widget-empty"));

    assert!(matches!(probe, Probe::Uninitialized));
}

#[wasm_bindgen_test]
async fn falsy_marker_is_uninitialized() {
    let mounted = MountedWidget::new("widget-falsy-marker");
    let settings = settings_for("widget-falsy-marker");

    for falsy in &[JsValue::from_f64(0.0), JsValue::from_str("")] {
        Reflect::set(mounted.element(), &JsValue::from_str("_webrtc"), falsy)
            .unwrap();

        let probe = Widget::probe(&settings);

        assert!(matches!(probe, Probe::Uninitialized));
    }
}

#[wasm_bindgen_test]
async fn gives_up_after_max_attempts() {
    let err = WidgetLocator::new(settings_for("widget-absent"))
        .locate()
        .await
        .unwrap_err();

    assert_eq!(err.into_inner(), LocateError::NotFound(3));
}

#[wasm_bindgen_test]
async fn finds_widget_initialized_later() {
    let mounted = MountedWidget::new("widget-later");
    let element = mounted.element().clone();
    platform::spawn(async move {
        sleep(30).await;
        let video = platform::document()
            .unwrap()
            .create_element("video")
            .unwrap();
        element.append_child(&video).unwrap();
    });

    let widget = WidgetLocator::new(settings_for("widget-later"))
        .locate_with(20, Duration::from_millis(10))
        .await
        .unwrap();

    assert!(widget.video_surface().is_some());
}

#[wasm_bindgen_test]
async fn ready_event_ends_pause_early() {
    let mounted = MountedWidget::new("widget-event");
    let element = mounted.element().clone();
    platform::spawn(async move {
        sleep(30).await;
        let doc = platform::document().unwrap();
        let video = doc.create_element("video").unwrap();
        element.append_child(&video).unwrap();
        let event = web_sys::Event::new("widget-event-ready").unwrap();
        doc.dispatch_event(&event).unwrap();
    });
    let locator = WidgetLocator::new(SwitchSettings {
        max_attempts: 2,
        retry_delay_ms: 60_000,
        ready_event: Some("widget-event-ready".into()),
        ..settings_for("widget-event")
    });

    let res = utils::with_timeout(
        locator.locate(),
        platform::delay_for(Duration::from_secs(5)),
    )
    .await
    .expect("ready event didn't end the pause");

    assert!(res.is_ok());
}

#[wasm_bindgen_test]
async fn lookup_can_be_cancelled() {
    let session = Session::new(SwitchSettings {
        max_attempts: 1000,
        ..settings_for("widget-cancelled")
    });
    let canceller = session.clone();
    platform::spawn(async move {
        sleep(50).await;
        assert!(canceller.cancel_locate());
    });

    let err = session.locate_widget().await.unwrap_err();

    assert_eq!(err.into_inner(), LocateError::Cancelled);
    assert!(!session.cancel_locate());
}
