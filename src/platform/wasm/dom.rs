//! DOM access to the call widget and its video surface.

use std::{cell::RefCell, rc::Rc};

use futures::channel::oneshot;
use tracerr::Traced;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlVideoElement};

use crate::{
    media::VideoTransform,
    platform::{EventListener, EventListenerBindError, MediaStream},
    settings::SwitchSettings,
    widget::Probe,
};

use super::document;

/// Element of a third-party call widget embedding a `<video>` surface.
#[derive(Clone, Debug)]
pub struct Widget(Element);

impl Widget {
    /// Looks the widget up in the current document: by its id first and then
    /// by the fallback selector.
    ///
    /// Returns [`Probe::Missing`] if there is no such element,
    /// [`Probe::Uninitialized`] if it has neither a nested `<video>` nor the
    /// initialization marker yet, and [`Probe::Ready`] otherwise.
    #[must_use]
    pub fn probe(settings: &SwitchSettings) -> Probe<Self> {
        let element = match document().and_then(|doc| find(&doc, settings)) {
            Some(element) => element,
            None => return Probe::Missing,
        };
        log::debug!("Found WebRTC element: {}", describe(&element));

        let widget = Self(element);
        if widget.video_surface().is_some()
            || widget.has_marker(&settings.init_marker)
        {
            Probe::Ready(widget)
        } else {
            Probe::Uninitialized
        }
    }

    /// Returns the first nested `<video>` element of this [`Widget`].
    #[must_use]
    pub fn video_surface(&self) -> Option<VideoSurface> {
        self.0
            .query_selector("video")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlVideoElement>().ok())
            .map(VideoSurface)
    }

    /// Returns the underlying [`Element`].
    #[inline]
    #[must_use]
    pub fn element(&self) -> &Element {
        &self.0
    }

    /// Indicates whether the widget's internal state object is attached to
    /// the element under the provided `marker` property.
    fn has_marker(&self, marker: &str) -> bool {
        js_sys::Reflect::get(&self.0, &JsValue::from_str(marker))
            .map(|val| val.is_truthy())
            .unwrap_or(false)
    }
}

/// Looks up the widget element by id, falling back to the selector.
fn find(doc: &Document, settings: &SwitchSettings) -> Option<Element> {
    doc.get_element_by_id(&settings.widget_id).or_else(|| {
        doc.query_selector(&settings.fallback_selector)
            .map_err(|e| {
                log::error!(
                    "Invalid widget selector `{}`: {:?}",
                    settings.fallback_selector,
                    e,
                );
            })
            .ok()
            .flatten()
    })
}

/// Short human-readable description of the [`Element`] for logs.
fn describe(element: &Element) -> String {
    let id = element.id();
    if id.is_empty() {
        format!("<{}>", element.tag_name().to_lowercase())
    } else {
        format!("<{} id=\"{}\">", element.tag_name().to_lowercase(), id)
    }
}

/// `<video>` element displaying the local stream inside a [`Widget`].
#[derive(Clone, Debug)]
pub struct VideoSurface(HtmlVideoElement);

impl VideoSurface {
    /// Returns [`MediaStream`] currently assigned as [`srcObject`][1].
    ///
    /// [1]: https://html.spec.whatwg.org/#dom-media-srcobject
    #[must_use]
    pub fn src_stream(&self) -> Option<MediaStream> {
        self.0.src_object().map(MediaStream::from)
    }

    /// Assigns the provided [`MediaStream`] as [`srcObject`][1].
    ///
    /// [1]: https://html.spec.whatwg.org/#dom-media-srcobject
    #[inline]
    pub fn set_src_stream(&self, stream: &MediaStream) {
        self.0.set_src_object(Some(stream.as_ref()));
    }

    /// Applies the provided [`VideoTransform`] to the element's inline style.
    pub fn set_transform(&self, transform: VideoTransform) {
        if let Err(e) = self
            .0
            .style()
            .set_property("transform", transform.css_value())
        {
            log::error!("Failed to set video transform: {:?}", e);
        }
    }

    /// Returns the inline `transform` style of this element.
    #[must_use]
    pub fn transform(&self) -> String {
        self.0
            .style()
            .get_property_value("transform")
            .unwrap_or_default()
    }
}

type Resolver = Rc<RefCell<Option<oneshot::Sender<()>>>>;

/// Subscription to a "widget ready" DOM event dispatched on the document.
///
/// Each [`ReadySignal::next_fire()`] call returns a receiver resolved by the
/// first event fired after that call.
#[derive(Debug)]
pub struct ReadySignal {
    resolver: Resolver,
    _listener: EventListener<Document, web_sys::Event>,
}

impl ReadySignal {
    /// Starts listening for `event_name` events on the current document.
    ///
    /// Returns [`None`] if there is no document.
    ///
    /// # Errors
    ///
    /// If binding the event listener fails.
    pub fn subscribe(
        event_name: &str,
    ) -> Result<Option<Self>, Traced<EventListenerBindError>> {
        let doc = match document() {
            Some(doc) => doc,
            None => return Ok(None),
        };
        let resolver: Resolver = Rc::default();

        let listener = {
            let resolver = Rc::clone(&resolver);
            EventListener::new_mut(doc, event_name, move |_: web_sys::Event| {
                if let Some(tx) = resolver.borrow_mut().take() {
                    drop(tx.send(()));
                }
            })
            .map_err(tracerr::wrap!())?
        };

        Ok(Some(Self {
            resolver,
            _listener: listener,
        }))
    }

    /// Returns a receiver resolved by the next fired event.
    ///
    /// Replaces the previous receiver, which resolves with
    /// [`oneshot::Canceled`] then.
    pub fn next_fire(&self) -> oneshot::Receiver<()> {
        let (tx, rx) = oneshot::channel();
        self.resolver.borrow_mut().replace(tx);
        rx
    }
}
