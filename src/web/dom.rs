//! DOM plumbing: canvas creation and scoped event listeners.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, EventTarget, HtmlCanvasElement, Window};

use crate::error::GlobeError;
use crate::input::physical_size;
use crate::lifecycle::Subscriptions;

/// The browser window, or a platform error outside a window context.
pub(crate) fn window() -> Result<Window, GlobeError> {
    web_sys::window()
        .ok_or_else(|| GlobeError::Platform("no global window".into()))
}

pub(crate) fn document(window: &Window) -> Result<Document, GlobeError> {
    window
        .document()
        .ok_or_else(|| GlobeError::Platform("window has no document".into()))
}

/// Stringify a thrown JS value.
pub(crate) fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

pub(crate) fn platform(value: &JsValue) -> GlobeError {
    GlobeError::Platform(js_error(value))
}

/// Window inner size in CSS pixels and the device pixel ratio.
pub(crate) fn window_metrics(window: &Window) -> (f64, f64, f64) {
    let css = |v: Result<JsValue, JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0)
    };
    (
        css(window.inner_width()),
        css(window.inner_height()),
        window.device_pixel_ratio(),
    )
}

/// Create the render canvas, sized to fill the window.
pub(crate) fn create_canvas(
    document: &Document,
) -> Result<HtmlCanvasElement, GlobeError> {
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| platform(&e))?
        .dyn_into()
        .map_err(|e| platform(&e))?;
    let style = canvas.style();
    style.set_property("display", "block").map_err(|e| platform(&e))?;
    style.set_property("touch-action", "none").map_err(|e| platform(&e))?;
    Ok(canvas)
}

/// Size the canvas: CSS size for layout, CSS x ratio for its backing
/// store. Returns the backing-store size.
pub(crate) fn size_canvas(
    canvas: &HtmlCanvasElement,
    (css_width, css_height, ratio): (f64, f64, f64),
) -> Result<(u32, u32), GlobeError> {
    let (width, height) = physical_size(css_width, css_height, ratio);
    canvas.set_width(width);
    canvas.set_height(height);
    let style = canvas.style();
    style
        .set_property("width", &format!("{css_width}px"))
        .map_err(|e| platform(&e))?;
    style
        .set_property("height", &format!("{css_height}px"))
        .map_err(|e| platform(&e))?;
    Ok((width, height))
}

/// Add `handler` for `event` on `target`. The listener is removed (and its
/// closure freed) when `subscriptions` is released.
pub(crate) fn listen(
    subscriptions: &mut Subscriptions,
    target: &EventTarget,
    event: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), GlobeError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(
            event,
            closure.as_ref().unchecked_ref(),
        )
        .map_err(|e| platform(&e))?;
    let target = target.clone();
    subscriptions.push(move || {
        if let Err(e) = target.remove_event_listener_with_callback(
            event,
            closure.as_ref().unchecked_ref(),
        ) {
            log::warn!("failed to remove {event} listener: {}", js_error(&e));
        }
        drop(closure);
    });
    Ok(())
}
