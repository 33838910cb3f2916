use std::sync::OnceLock;

use gloo_net::http::Request;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use preload::{
    EntityInfo, OverlayController, OverlayMode, PreloadOptions, SharedController, StoryList,
};

mod dom;
mod env;
use dom::WebDom;

static PANIC_HOOK_SET: OnceLock<()> = OnceLock::new();

#[wasm_bindgen(start)]
pub fn start() {
    PANIC_HOOK_SET.get_or_init(|| {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    });
}

/// Page-session owner of the preload overlay.
///
/// Create one per page and keep it; `preload()` builds the overlay on the
/// first call and returns a handle to that same overlay afterwards.
#[wasm_bindgen]
pub struct PreloadSession {
    inner: preload::PreloadSession<WebDom>,
}

impl Default for PreloadSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl PreloadSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: preload::PreloadSession::new(),
        }
    }

    /// `options`: `{ storyList?, entityInfo?, config? }`, as an object or its
    /// JSON text; anything unreadable falls back to defaults.
    pub fn preload(&mut self, options: JsValue) -> PreloadManager {
        let controller = self.inner.get_or_create(|| build_controller(options));
        WebDom::bind(&controller);
        PreloadManager { controller }
    }

    #[wasm_bindgen(getter)]
    pub fn initialized(&self) -> bool {
        self.inner.is_initialized()
    }
}

/// Handle to the page's overlay, called by the app lifecycle as loading
/// progresses.
#[wasm_bindgen]
pub struct PreloadManager {
    controller: SharedController<WebDom>,
}

#[wasm_bindgen]
impl PreloadManager {
    #[wasm_bindgen(js_name = hideLoadingScreen)]
    pub fn hide_loading_screen(&self) {
        self.with(|c| c.hide_loading_screen());
    }

    #[wasm_bindgen(js_name = updateEmbedLoadPercent)]
    pub fn update_embed_load_percent(&self, pct: f64) {
        self.with(|c| c.update_embed_load_percent(pct));
    }

    #[wasm_bindgen(js_name = showEmbedViewButton)]
    pub fn show_embed_view_button(&self) {
        self.with(|c| c.show_embed_view_button());
    }

    #[wasm_bindgen(js_name = showEmbedInteraction)]
    pub fn show_embed_interaction(&self) {
        self.with(|c| c.show_embed_interaction());
    }

    #[wasm_bindgen(getter)]
    pub fn title(&self) -> Option<String> {
        self.controller.borrow().title().map(str::to_string)
    }

    #[wasm_bindgen(getter, js_name = isEmbed)]
    pub fn is_embed(&self) -> bool {
        self.controller.borrow().mode() == OverlayMode::Embed
    }

    fn with(&self, f: impl FnOnce(&mut OverlayController<WebDom>)) {
        match self.controller.try_borrow_mut() {
            Ok(mut c) => f(&mut c),
            Err(_) => tracing::warn!("preload: controller busy, call ignored"),
        }
    }
}

fn build_controller(options: JsValue) -> OverlayController<WebDom> {
    let (lookups, config) = read_options(options).into_parts();
    let environment = env::detect();
    let dom = WebDom::from_document(&config);
    OverlayController::new(dom, &environment, &lookups, config, &mut rand::thread_rng())
}

fn read_options(options: JsValue) -> PreloadOptions {
    if options.is_undefined() || options.is_null() {
        return PreloadOptions::default();
    }
    let parsed = match options.as_string() {
        Some(raw) => PreloadOptions::from_json(&raw).map_err(|e| e.to_string()),
        None => serde_wasm_bindgen::from_value(options).map_err(|e| e.to_string()),
    };
    options_or_default(parsed)
}

fn options_or_default(parsed: Result<PreloadOptions, String>) -> PreloadOptions {
    parsed.unwrap_or_else(|err| {
        tracing::warn!("preload: ignoring unreadable options: {err}");
        PreloadOptions::default()
    })
}

/// Fetches the story list and entity metadata tables and returns them as a
/// `preload()` options object. Tables that fail to load are left out.
#[wasm_bindgen(js_name = fetchLookups)]
pub async fn fetch_lookups(
    story_url: Option<String>,
    entity_url: Option<String>,
) -> Result<JsValue, JsValue> {
    let mut options = PreloadOptions::default();
    if let Some(url) = story_url {
        options.story_list = fetch_optional::<StoryList>(&url).await;
    }
    if let Some(url) = entity_url {
        options.entity_info = fetch_optional::<EntityInfo>(&url).await;
    }
    options
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

async fn fetch_optional<T: DeserializeOwned>(url: &str) -> Option<T> {
    match fetch_json(url).await {
        Ok(v) => Some(v),
        Err(err) => {
            tracing::warn!("preload: failed to fetch {url}: {err:?}");
            None
        }
    }
}

async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, JsValue> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", resp.status())));
    }
    let text = resp
        .text()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))
}
