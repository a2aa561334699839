//! `requestAnimationFrame` loop guarded by a [`LoopToken`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::dom::js_error;
use crate::engine::GlobeEngine;
use crate::lifecycle::LoopToken;
use crate::util::frame_timing::FrameTiming;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A running frame loop. [`cancel`](Self::cancel) stops it for good.
pub(crate) struct FrameLoop {
    token: LoopToken,
    pending: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameLoop {
    /// Start drawing `engine` every animation frame while `token` is live.
    pub(crate) fn start(
        engine: Rc<RefCell<GlobeEngine>>,
        token: LoopToken,
    ) -> Self {
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let next = Rc::clone(&callback);
        let frame_pending = Rc::clone(&pending);
        let frame_token = token.clone();
        let mut timing = FrameTiming::new();
        *callback.borrow_mut() = Some(Closure::new(move |_now: f64| {
            frame_pending.set(None);
            let again = frame_token.tick(|| {
                let dt = timing.tick();
                draw_frame(&engine, dt);
            });
            if again {
                frame_pending.set(request_frame(&next));
            }
        }));
        pending.set(request_frame(&callback));

        Self {
            token,
            pending,
            callback,
        }
    }

    /// Stop the loop: cancel the token, drop any pending frame request,
    /// and free the callback.
    pub(crate) fn cancel(&self) {
        self.token.cancel();
        if let Some(id) = self.pending.take() {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.cancel_animation_frame(id) {
                    log::warn!("cancelAnimationFrame failed: {}", js_error(&e));
                }
            }
        }
        if let Ok(mut callback) = self.callback.try_borrow_mut() {
            drop(callback.take());
        }
    }
}

fn draw_frame(engine: &RefCell<GlobeEngine>, dt: f32) {
    let Ok(mut engine) = engine.try_borrow_mut() else {
        return;
    };
    let _ = engine.update(dt);
    match engine.render() {
        Ok(())
        | Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {}
        Err(e) => log::error!("render error: {e:?}"),
    }
}

fn request_frame(callback: &FrameCallback) -> Option<i32> {
    let window = web_sys::window()?;
    let callback = callback.try_borrow().ok()?;
    let closure = callback.as_ref()?;
    match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::error!("requestAnimationFrame failed: {}", js_error(&e));
            None
        }
    }
}
