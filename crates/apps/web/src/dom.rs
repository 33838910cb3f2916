//! `web-sys` implementation of the overlay DOM seam.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use preload::{
    EmbedView, InputKind, LoadingView, OverlayController, OverlayDom, PreloadConfig, Region,
    SharedController,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement};

type InputHandler = Box<dyn Fn(InputKind) -> bool>;

pub struct WebDom {
    document: Option<Document>,
    embed: Option<HtmlElement>,
    loading: Option<HtmlElement>,
    handler: Rc<RefCell<Option<InputHandler>>>,
    // Created once per kind and kept for the page lifetime; `unlisten` only
    // detaches them, so a listener is never dropped while it runs.
    listeners: BTreeMap<InputKind, Closure<dyn FnMut(Event)>>,
}

impl std::fmt::Debug for WebDom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebDom")
            .field("embed", &self.embed.is_some())
            .field("loading", &self.loading.is_some())
            .field("listeners", &self.listeners.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl WebDom {
    /// Looks up both regions by the configured element ids.
    pub fn from_document(config: &PreloadConfig) -> Self {
        let document = web_sys::window().and_then(|w| w.document());
        let find = |id: &str| {
            document
                .as_ref()
                .and_then(|d| d.get_element_by_id(id))
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        };
        let embed = find(&config.embed_element_id);
        let loading = find(&config.loading_element_id);
        Self {
            document,
            embed,
            loading,
            handler: Rc::new(RefCell::new(None)),
            listeners: BTreeMap::new(),
        }
    }

    /// Routes document input events to `controller`. Installing twice keeps
    /// the first binding.
    pub fn bind(controller: &SharedController<WebDom>) {
        let slot = controller.borrow().dom().handler.clone();
        if slot.borrow().is_some() {
            return;
        }
        let weak: Weak<RefCell<OverlayController<WebDom>>> = Rc::downgrade(controller);
        *slot.borrow_mut() = Some(Box::new(move |kind| {
            let Some(shared) = weak.upgrade() else {
                return false;
            };
            let Ok(mut ctrl) = shared.try_borrow_mut() else {
                tracing::warn!("preload: controller busy, dropping {}", kind.event_name());
                return false;
            };
            ctrl.handle_input(kind)
        }));
    }

    fn live(&self, region: Region) -> Option<&HtmlElement> {
        let el = match region {
            Region::Embed => self.embed.as_ref(),
            Region::Loading => self.loading.as_ref(),
        };
        el.filter(|el| el.is_connected())
    }

    fn create(&self, tag: &str) -> Result<HtmlElement, JsValue> {
        let document = self
            .document
            .as_ref()
            .ok_or_else(|| JsValue::from_str("document unavailable"))?;
        document
            .create_element(tag)?
            .dyn_into::<HtmlElement>()
            .map_err(JsValue::from)
    }

    fn create_with_id(&self, tag: &str, id: &str, parent: &Element) -> Result<HtmlElement, JsValue> {
        let el = self.create(tag)?;
        el.set_id(id);
        parent.append_child(&el)?;
        Ok(el)
    }

    fn create_with_class(
        &self,
        tag: &str,
        class: &str,
        parent: &Element,
    ) -> Result<HtmlElement, JsValue> {
        let el = self.create(tag)?;
        el.set_class_name(class);
        parent.append_child(&el)?;
        Ok(el)
    }

    /// Text lines separated by `<br>` elements.
    fn append_lines(&self, parent: &Element, lines: &[String]) -> Result<(), JsValue> {
        let document = self
            .document
            .as_ref()
            .ok_or_else(|| JsValue::from_str("document unavailable"))?;
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                let br = document.create_element("br")?;
                parent.append_child(&br)?;
            }
            parent.append_child(&document.create_text_node(line))?;
        }
        Ok(())
    }

    fn try_render_embed(&self, root: &HtmlElement, view: &EmbedView) -> Result<(), JsValue> {
        let wrapper = self.create_with_class("div", "embed-wrapper", root)?;

        let icon = self.create_with_class("img", "embed-interact", &wrapper)?;
        icon.set_attribute("src", &view.interact_icon_src)?;

        let hint = self.create_with_class("span", "interact-text", &wrapper)?;
        self.append_lines(&hint, &view.interact_hint)?;

        let button = self.create_with_class("button", "clickable view-btn", &wrapper)?;
        button.set_text_content(Some(&view.view_button_label));

        let caption = self.create_with_class("span", "loader-text", &wrapper)?;
        self.append_lines(&caption, &view.caption.display_lines())?;

        self.create_with_class("div", "embed-loader", &wrapper)?;
        Ok(())
    }

    fn try_render_loading(&self, root: &HtmlElement, view: &LoadingView) -> Result<(), JsValue> {
        let wrapper = self.create_with_id("div", "loading-screen-wrapper", root)?;

        let near = self.create_with_id("div", "loading-screen-stars1", &wrapper)?;
        let far = self.create_with_id("div", "loading-screen-stars2", &wrapper)?;
        self.create_with_id("div", "loading-screen-logo", &wrapper)?;

        let container = self.create_with_id("div", "loading-screen-container", &wrapper)?;
        let text = self.create_with_id("div", "loading-screen-text", &container)?;
        text.set_text_content(Some(&view.label));
        self.create_with_id("div", "loading-screen-bar", &container)?;

        near.style()
            .set_property("box-shadow", &view.near_stars.box_shadow())?;
        far.style()
            .set_property("box-shadow", &view.far_stars.box_shadow())?;
        Ok(())
    }

    fn schedule_removal(el: &HtmlElement, delay_ms: u32) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
        let el = el.clone();
        let cb = Closure::once_into_js(move || el.remove());
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        window.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay)?;
        Ok(())
    }
}

/// Hands a document event to the bound controller. `true` means the event
/// was consumed and its default action should be suppressed.
fn dispatch(handler: &RefCell<Option<InputHandler>>, event_type: &str) -> bool {
    let Some(kind) = InputKind::from_event_name(event_type) else {
        return false;
    };
    handler.borrow().as_ref().is_some_and(|h| h(kind))
}

fn log_failure(what: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        tracing::warn!("preload: {what} failed: {err:?}");
    }
}

impl OverlayDom for WebDom {
    fn has_region(&self, region: Region) -> bool {
        self.live(region).is_some()
    }

    fn render_embed(&mut self, view: &EmbedView) {
        if let Some(root) = self.live(Region::Embed) {
            log_failure("embed overlay render", self.try_render_embed(root, view));
        }
    }

    fn render_loading(&mut self, view: &LoadingView) {
        if let Some(root) = self.live(Region::Loading) {
            log_failure("loading screen render", self.try_render_loading(root, view));
        }
    }

    fn add_class(&mut self, region: Region, class: &str) {
        if let Some(el) = self.live(region) {
            log_failure("classList.add", el.class_list().add_1(class));
        }
    }

    fn remove_class(&mut self, region: Region, class: &str) {
        if let Some(el) = self.live(region) {
            log_failure("classList.remove", el.class_list().remove_1(class));
        }
    }

    fn clear_classes(&mut self, region: Region) {
        if let Some(el) = self.live(region) {
            el.set_class_name("");
        }
    }

    fn set_style(&mut self, region: Region, property: &str, value: &str) {
        if let Some(el) = self.live(region) {
            log_failure("style update", el.style().set_property(property, value));
        }
    }

    fn flush_layout(&mut self, region: Region) {
        if let Some(el) = self.live(region) {
            // Reading a layout property forces a reflow.
            let _ = el.offset_width();
        }
    }

    fn remove_region(&mut self, region: Region) {
        if let Some(el) = self.live(region) {
            el.remove();
        }
    }

    fn remove_region_after(&mut self, region: Region, delay_ms: u32) {
        if let Some(el) = self.live(region) {
            log_failure("scheduled removal", Self::schedule_removal(el, delay_ms));
        }
    }

    fn listen(&mut self, kind: InputKind) {
        let Some(document) = self.document.clone() else {
            return;
        };
        let handler = self.handler.clone();
        let listener = self.listeners.entry(kind).or_insert_with(|| {
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                if dispatch(&handler, &event.type_()) {
                    event.prevent_default();
                }
            })
        });
        log_failure(
            "addEventListener",
            document.add_event_listener_with_callback(
                kind.event_name(),
                listener.as_ref().unchecked_ref(),
            ),
        );
    }

    fn unlisten(&mut self, kind: InputKind) {
        let (Some(document), Some(listener)) = (self.document.as_ref(), self.listeners.get(&kind))
        else {
            return;
        };
        log_failure(
            "removeEventListener",
            document.remove_event_listener_with_callback(
                kind.event_name(),
                listener.as_ref().unchecked_ref(),
            ),
        );
    }
}
