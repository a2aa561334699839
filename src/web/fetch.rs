//! Asset fetches through the browser's `fetch`.

use std::cell::RefCell;
use std::rc::Weak;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::dom::{js_error, window};
use crate::data::{AssetKind, AssetLocation};
use crate::engine::GlobeEngine;
use crate::error::GlobeError;
use crate::lifecycle::LoopToken;

/// Fetch `url` and collect the body.
///
/// # Errors
///
/// [`GlobeError::Fetch`] for network failures and non-2xx responses.
pub(crate) async fn fetch_bytes(url: &str) -> Result<Vec<u8>, GlobeError> {
    let fetch_error = |e: &wasm_bindgen::JsValue| {
        GlobeError::Fetch(format!("{url}: {}", js_error(e)))
    };
    let response: Response = JsFuture::from(window()?.fetch_with_str(url))
        .await
        .map_err(|e| fetch_error(&e))?
        .dyn_into()
        .map_err(|e| fetch_error(&e))?;
    if !response.ok() {
        return Err(GlobeError::Fetch(format!(
            "{url}: HTTP {} {}",
            response.status(),
            response.status_text()
        )));
    }
    let buffer = response.array_buffer().map_err(|e| fetch_error(&e))?;
    let body = JsFuture::from(buffer).await.map_err(|e| fetch_error(&e))?;
    Ok(js_sys::Uint8Array::new(&body).to_vec())
}

/// Fetch one asset in the background and hand it to the engine, unless
/// the globe was unmounted while the request was in flight.
pub(crate) fn spawn_fetch(
    kind: AssetKind,
    location: AssetLocation,
    engine: Weak<RefCell<GlobeEngine>>,
    token: LoopToken,
) {
    wasm_bindgen_futures::spawn_local(async move {
        let result = fetch_bytes(location.as_str()).await;
        if !token.is_live() {
            log::debug!("{kind} finished after unmount, dropping");
            return;
        }
        let Some(engine) = engine.upgrade() else {
            return;
        };
        if let Err(ref e) = result {
            log::warn!("{kind} unavailable: {e}");
        }
        match engine.try_borrow_mut() {
            Ok(mut engine) => engine.supply_asset(kind, result),
            Err(_) => {
                log::warn!("{kind} arrived while the globe was busy, dropping");
            }
        }
    });
}
