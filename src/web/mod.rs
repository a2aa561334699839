//! Browser host.
//!
//! [`mount`] appends a canvas to a container element, wires window and
//! document listeners into one [`Subscriptions`] registry, starts the
//! animation-frame loop, and fetches the globe's assets. The returned
//! [`GlobeHandle`] undoes all of it on [`unmount`](GlobeHandle::unmount).
//!
//! ```js
//! import init, { mount } from "./pkg/hexglobe.js";
//! await init();
//! const globe = await mount(document.getElementById("globe"));
//! // later
//! globe.unmount();
//! ```

mod dom;
mod fetch;
mod frame_loop;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use wasm_bindgen::prelude::{wasm_bindgen, JsValue};
use wasm_bindgen::JsCast;
use web_sys::{
    Event, HtmlCanvasElement, HtmlElement, MouseEvent, WheelEvent, Window,
};

use self::frame_loop::FrameLoop;
use crate::engine::{asset_requests, GlobeEngine};
use crate::error::GlobeError;
use crate::input::{InputEvent, MouseButton};
use crate::lifecycle::{LoopToken, Subscriptions};
use crate::options::Options;

/// CSS pixels per wheel line for `deltaMode == 0` wheel events.
const PIXELS_PER_LINE: f64 = 100.0;

impl From<GlobeError> for JsValue {
    fn from(e: GlobeError) -> Self {
        js_sys::Error::new(&e.to_string()).into()
    }
}

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            log::debug!("logger already installed");
        }
    });
}

/// A mounted globe.
#[wasm_bindgen]
pub struct GlobeHandle {
    engine: Rc<RefCell<GlobeEngine>>,
    canvas: HtmlCanvasElement,
    subscriptions: Subscriptions,
    frame_loop: FrameLoop,
    token: LoopToken,
}

#[wasm_bindgen]
impl GlobeHandle {
    /// Stop the frame loop, remove listeners and the canvas, and release
    /// GPU resources. Safe to call more than once.
    pub fn unmount(&mut self) {
        if !self.token.is_live() && self.subscriptions.is_empty() {
            return;
        }
        self.frame_loop.cancel();
        let _ = self.subscriptions.release();
        self.canvas.remove();
        if let Ok(mut engine) = self.engine.try_borrow_mut() {
            let _ = engine.dispose();
        }
        log::info!("globe unmounted");
    }

    /// Point data status: `pending`, `loaded ...`, or `failed: ...`.
    #[wasm_bindgen(js_name = loadState)]
    #[must_use]
    pub fn load_state(&self) -> String {
        self.engine
            .try_borrow()
            .map_or_else(|_| "busy".to_owned(), |e| e.load_state().to_string())
    }

    /// Whether [`unmount`](Self::unmount) has run.
    #[wasm_bindgen(js_name = isMounted)]
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.token.is_live()
    }

    /// JSON Schema of the options accepted by [`mount`].
    #[wasm_bindgen(js_name = optionsSchema)]
    #[must_use]
    pub fn options_schema() -> String {
        serde_json::to_string(&Options::json_schema()).unwrap_or_default()
    }
}

impl Drop for GlobeHandle {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Mount a globe into `container`. `options_json` overrides any subset of
/// the default options.
///
/// # Errors
///
/// Rejects with the error text if the options do not parse, the browser
/// offers no GPU surface, or a DOM call fails. Asset failures do not
/// reject; they show up in [`GlobeHandle::load_state`].
#[wasm_bindgen]
pub async fn mount(
    container: HtmlElement,
    options_json: Option<String>,
) -> Result<GlobeHandle, JsValue> {
    init_logging();
    let options = match options_json.as_deref() {
        Some(json) => Options::from_json(json)?,
        None => Options::default(),
    };

    let window = dom::window()?;
    let document = dom::document(&window)?;
    let canvas = dom::create_canvas(&document)?;
    let metrics = dom::window_metrics(&window);
    let size = dom::size_canvas(&canvas, metrics)?;
    let _ = container.append_child(&canvas)?;

    let requests = asset_requests(&options);
    let engine = match GlobeEngine::new(
        wgpu::SurfaceTarget::Canvas(canvas.clone()),
        size,
        metrics.2,
        options,
    )
    .await
    {
        Ok(engine) => Rc::new(RefCell::new(engine)),
        Err(e) => {
            canvas.remove();
            return Err(e.into());
        }
    };

    let mut subscriptions = Subscriptions::new();
    if let Err(e) =
        register_listeners(&mut subscriptions, &window, &canvas, &engine)
    {
        drop(subscriptions);
        canvas.remove();
        return Err(e.into());
    }

    let token = LoopToken::new();
    let frame_loop = FrameLoop::start(Rc::clone(&engine), token.clone());
    for (kind, location) in requests {
        let weak = Rc::downgrade(&engine);
        fetch::spawn_fetch(kind, location, weak, token.clone());
    }

    Ok(GlobeHandle {
        engine,
        canvas,
        subscriptions,
        frame_loop,
        token,
    })
}

fn send(engine: &RefCell<GlobeEngine>, event: &InputEvent) {
    if let Ok(mut engine) = engine.try_borrow_mut() {
        engine.handle_input(event);
    }
}

/// Wheel delta in lines, positive toward the screen (zoom in).
fn wheel_lines(event: &WheelEvent) -> f32 {
    let lines = match event.delta_mode() {
        WheelEvent::DOM_DELTA_PIXEL => event.delta_y() / PIXELS_PER_LINE,
        _ => event.delta_y(),
    };
    -lines as f32
}

fn register_listeners(
    subscriptions: &mut Subscriptions,
    window: &Window,
    canvas: &HtmlCanvasElement,
    engine: &Rc<RefCell<GlobeEngine>>,
) -> Result<(), GlobeError> {
    let document = dom::document(window)?;

    let on_resize = {
        let engine = Rc::clone(engine);
        let window = window.clone();
        let canvas = canvas.clone();
        move |_: Event| {
            let metrics = dom::window_metrics(&window);
            match dom::size_canvas(&canvas, metrics) {
                Ok((width, height)) => {
                    if let Ok(mut engine) = engine.try_borrow_mut() {
                        engine.set_scale_factor(metrics.2);
                        engine.resize(width, height);
                    }
                }
                Err(e) => log::warn!("resize failed: {e}"),
            }
        }
    };
    dom::listen(subscriptions, window, "resize", on_resize)?;

    let on_move = {
        let engine = Rc::clone(engine);
        move |event: Event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                send(
                    &engine,
                    &InputEvent::PointerMoved {
                        x: event.client_x() as f32,
                        y: event.client_y() as f32,
                    },
                );
            }
        }
    };
    dom::listen(subscriptions, &document, "mousemove", on_move)?;

    let on_button = |pressed: bool| {
        let engine = Rc::clone(engine);
        move |event: Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            if let Some(button) = MouseButton::from_dom(event.button()) {
                send(&engine, &InputEvent::PointerButton { button, pressed });
            }
        }
    };
    dom::listen(subscriptions, canvas, "mousedown", on_button(true))?;
    dom::listen(subscriptions, &document, "mouseup", on_button(false))?;

    let on_wheel = {
        let engine = Rc::clone(engine);
        move |event: Event| {
            let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            let zoom_enabled = engine
                .try_borrow()
                .is_ok_and(|e| e.options().controls.enable_zoom);
            if zoom_enabled {
                event.prevent_default();
            }
            send(&engine, &InputEvent::Wheel { delta: wheel_lines(wheel) });
        }
    };
    dom::listen(subscriptions, canvas, "wheel", on_wheel)?;

    let on_context_menu = {
        let engine = Rc::clone(engine);
        move |event: Event| {
            if engine
                .try_borrow()
                .is_ok_and(|e| e.options().controls.enable_pan)
            {
                event.prevent_default();
            }
        }
    };
    dom::listen(subscriptions, canvas, "contextmenu", on_context_menu)?;

    let on_blur = {
        let engine = Rc::clone(engine);
        move |_: Event| send(&engine, &InputEvent::PointerLeft)
    };
    dom::listen(subscriptions, window, "blur", on_blur)?;

    log::debug!("registered {} listeners", subscriptions.len());
    Ok(())
}
