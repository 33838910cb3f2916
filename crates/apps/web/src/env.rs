use preload::{DeviceCapability, Environment, Viewport};
use wasm_bindgen::JsValue;
use web_sys::Window;

/// Reads the hash, input capabilities and viewport size from the page.
pub fn detect() -> Environment {
    let Some(window) = web_sys::window() else {
        tracing::warn!("preload: no window, using default environment");
        return Environment::default();
    };

    let hash = window.location().hash().unwrap_or_default();
    let capability = DeviceCapability::new(is_touch(&window), can_hover(&window));
    let viewport = Viewport::new(
        viewport_dim(window.inner_width().ok().and_then(|v| v.as_f64())),
        viewport_dim(window.inner_height().ok().and_then(|v| v.as_f64())),
    );

    Environment {
        hash,
        capability,
        viewport,
    }
}

fn is_touch(window: &Window) -> bool {
    let has_touch_handler =
        js_sys::Reflect::has(window, &JsValue::from_str("ontouchstart")).unwrap_or(false);
    has_touch_handler || window.navigator().max_touch_points() > 0
}

fn can_hover(window: &Window) -> bool {
    let no_hover = window
        .match_media("(hover: none)")
        .ok()
        .flatten()
        .is_some_and(|mql| mql.matches());
    !no_hover
}

pub(crate) fn viewport_dim(px: Option<f64>) -> u32 {
    match px {
        Some(v) if v.is_finite() && v > 0.0 => v.min(f64::from(u32::MAX)) as u32,
        _ => 0,
    }
}
