//! Preload overlay state machine.
//!
//! One controller per page load decides between the full loading screen and
//! the lightweight embed prompt, renders it, and then reacts to load progress
//! and user input:
//!
//! | Mode        | Transition                 | Trigger                      |
//! |-------------|----------------------------|------------------------------|
//! | FullLoading | Visible -> Removed         | `hide_loading_screen()`      |
//! | Embed       | Loading -> ViewPrompt      | `show_embed_view_button()`   |
//! | Embed       | ViewPrompt -> Interacting  | first pointer-up / touch-end |
//! | Embed       | Interacting -> Dismissed   | first pointer-down / touch-start |
//!
//! Calls that do not match the current state are ignored.

use rand::Rng;

use crate::caption::{LoadingCaption, interaction_hint};
use crate::config::PreloadConfig;
use crate::dom::{EmbedView, InputKind, LoadingView, OverlayDom, Region};
use crate::issue::OverlayIssue;
use crate::lookup::Lookups;
use crate::route::RouteContext;
use crate::stars::{StarField, Viewport};
use crate::subscription::OneShot;
use crate::title::resolve_title;

const CLASS_SHOW: &str = "show";
const CLASS_LOADING: &str = "loading";
const CLASS_VIEW: &str = "view";
const CLASS_INTERACT: &str = "interact";

const LOAD_PERCENT_PROPERTY: &str = "--load-percent";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OverlayMode {
    Embed,
    FullLoading,
}

impl OverlayMode {
    pub fn for_route(route: &RouteContext) -> Self {
        if route.is_embed() || route.is_interact_prompt() {
            OverlayMode::Embed
        } else {
            OverlayMode::FullLoading
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DeviceCapability {
    pub is_touch: bool,
    pub can_hover: bool,
}

impl DeviceCapability {
    pub fn new(is_touch: bool, can_hover: bool) -> Self {
        Self {
            is_touch,
            can_hover,
        }
    }

    /// Inputs that advance the view prompt.
    pub fn release_inputs(self) -> Vec<InputKind> {
        self.pick(InputKind::TouchEnd, InputKind::PointerUp)
    }

    /// Inputs that dismiss the interaction hint.
    pub fn press_inputs(self) -> Vec<InputKind> {
        self.pick(InputKind::TouchStart, InputKind::PointerDown)
    }

    fn pick(self, touch: InputKind, pointer: InputKind) -> Vec<InputKind> {
        let mut out = Vec::with_capacity(2);
        if self.is_touch {
            out.push(touch);
        }
        if self.can_hover {
            out.push(pointer);
        }
        out
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EmbedState {
    Loading,
    ViewPrompt,
    Interacting,
    Dismissed,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoadingScreenState {
    Visible,
    Removed,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OverlayState {
    Embed(EmbedState),
    FullLoading(LoadingScreenState),
}

/// Everything the controller reads from the page, captured once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// Raw `location.hash`.
    pub hash: String,
    pub capability: DeviceCapability,
    pub viewport: Viewport,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum PendingTransition {
    ShowInteraction,
    Dismiss,
}

#[derive(Debug)]
pub struct OverlayController<D> {
    dom: D,
    config: PreloadConfig,
    route: RouteContext,
    mode: OverlayMode,
    capability: DeviceCapability,
    title: Option<String>,
    state: OverlayState,
    input: OneShot<InputKind, PendingTransition>,
}

impl<D: OverlayDom> OverlayController<D> {
    /// Builds the overlay for the current page.
    ///
    /// The title is resolved here, once; later changes to `lookups` do not
    /// affect the caption.
    pub fn new<R: Rng + ?Sized>(
        dom: D,
        env: &Environment,
        lookups: &Lookups,
        config: PreloadConfig,
        rng: &mut R,
    ) -> Self {
        let route = RouteContext::from_hash(&env.hash);
        let mode = OverlayMode::for_route(&route);
        let (title, state) = match mode {
            OverlayMode::Embed => (
                resolve_title(&route, lookups.stories.as_ref(), lookups.entities.as_ref()),
                OverlayState::Embed(EmbedState::Loading),
            ),
            OverlayMode::FullLoading => (None, OverlayState::FullLoading(LoadingScreenState::Visible)),
        };

        let mut controller = Self {
            dom,
            config,
            route,
            mode,
            capability: env.capability,
            title,
            state,
            input: OneShot::new(),
        };

        match mode {
            OverlayMode::Embed => controller.show_embed_screen(),
            OverlayMode::FullLoading => controller.show_loading_screen(env.viewport, rng),
        }

        tracing::debug!(
            mode = ?controller.mode,
            route = controller.route.hash_route(),
            title = ?controller.title,
            "preload overlay ready"
        );
        controller
    }

    pub fn mode(&self) -> OverlayMode {
        self.mode
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn capability(&self) -> DeviceCapability {
        self.capability
    }

    pub fn route(&self) -> &RouteContext {
        &self.route
    }

    pub fn config(&self) -> &PreloadConfig {
        &self.config
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    /// Input kinds currently armed for the next transition.
    pub fn armed_inputs(&self) -> &[InputKind] {
        self.input.keys()
    }

    /// Sets the embed progress bar fill. The value is not range-checked.
    pub fn update_embed_load_percent(&mut self, pct: f64) {
        if !self.dom.has_region(Region::Embed) {
            return;
        }
        self.dom
            .set_style(Region::Embed, LOAD_PERCENT_PROPERTY, &format!("{pct}%"));
    }

    /// Fades the full loading screen out and removes it once the fade ends.
    pub fn hide_loading_screen(&mut self) {
        if self.state != OverlayState::FullLoading(LoadingScreenState::Visible) {
            return;
        }
        if !self.dom.has_region(Region::Loading) {
            OverlayIssue::MissingElement(Region::Loading).report();
            return;
        }

        self.dom.remove_class(Region::Loading, CLASS_SHOW);
        self.dom
            .set_style(Region::Loading, "transition", &self.config.fade_transition());
        self.dom.set_style(Region::Loading, "opacity", "0");
        self.dom
            .remove_region_after(Region::Loading, self.config.fade_out_ms);
        self.state = OverlayState::FullLoading(LoadingScreenState::Removed);
    }

    /// Loading finished: show the "View 3D" prompt and wait for the first
    /// pointer-up / touch-end.
    pub fn show_embed_view_button(&mut self) {
        if self.state != OverlayState::Embed(EmbedState::Loading) {
            return;
        }
        if !self.dom.has_region(Region::Embed) {
            OverlayIssue::MissingElement(Region::Embed).report();
            return;
        }

        self.dom.remove_class(Region::Embed, CLASS_LOADING);
        self.dom.add_class(Region::Embed, CLASS_VIEW);
        self.arm(
            self.capability.release_inputs(),
            PendingTransition::ShowInteraction,
        );
        self.state = OverlayState::Embed(EmbedState::ViewPrompt);
    }

    /// Switches the prompt to the interaction hint, dismissed by the first
    /// pointer-down / touch-start.
    pub fn show_embed_interaction(&mut self) {
        if self.state != OverlayState::Embed(EmbedState::ViewPrompt) {
            return;
        }
        if !self.dom.has_region(Region::Embed) {
            OverlayIssue::MissingElement(Region::Embed).report();
            return;
        }

        self.dom.remove_class(Region::Embed, CLASS_VIEW);
        self.dom.add_class(Region::Embed, CLASS_INTERACT);
        self.arm(self.capability.press_inputs(), PendingTransition::Dismiss);
        self.state = OverlayState::Embed(EmbedState::Interacting);
    }

    /// Feeds a document input event to the armed subscription.
    ///
    /// Returns `true` when the event triggered a transition; the caller should
    /// then suppress the event's default action.
    pub fn handle_input(&mut self, kind: InputKind) -> bool {
        let Some(fired) = self.input.fire(&kind) else {
            return false;
        };
        for k in fired.keys {
            self.dom.unlisten(k);
        }
        match fired.payload {
            PendingTransition::ShowInteraction => self.show_embed_interaction(),
            PendingTransition::Dismiss => self.dismiss_embed(),
        }
        true
    }

    fn dismiss_embed(&mut self) {
        self.dom.clear_classes(Region::Embed);
        self.state = OverlayState::Embed(EmbedState::Dismissed);
        tracing::debug!("preload: embed overlay dismissed");
    }

    fn arm(&mut self, inputs: Vec<InputKind>, transition: PendingTransition) {
        for k in self.input.arm(inputs, transition) {
            self.dom.unlisten(k);
        }
        for &k in self.input.keys() {
            self.dom.listen(k);
        }
    }

    fn show_embed_screen(&mut self) {
        if self.dom.has_region(Region::Embed) {
            let caption =
                LoadingCaption::for_title(self.title.as_deref(), self.config.caption_wrap_threshold);
            if caption == LoadingCaption::generic() && self.route.hash_route() != "home" {
                OverlayIssue::UnresolvedName(self.route.hash_route().to_string()).report();
            }

            let view = EmbedView {
                interact_icon_src: self.config.interact_icon_src.clone(),
                interact_hint: interaction_hint(self.capability.is_touch),
                view_button_label: "View 3D".to_string(),
                caption,
            };
            self.dom.render_embed(&view);
            self.dom.add_class(Region::Embed, CLASS_SHOW);
            self.dom.add_class(Region::Embed, CLASS_LOADING);
            self.dom.flush_layout(Region::Embed);
        } else {
            OverlayIssue::MissingElement(Region::Embed).report();
        }

        self.dom.remove_region(Region::Loading);
        self.update_embed_load_percent(self.config.initial_load_percent);
    }

    fn show_loading_screen<R: Rng + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) {
        if self.dom.has_region(Region::Loading) {
            let view = LoadingView {
                label: "Loading".to_string(),
                near_stars: StarField::generate(self.config.near_star_count, viewport, rng),
                far_stars: StarField::generate(self.config.far_star_count, viewport, rng),
            };
            self.dom.render_loading(&view);
            self.dom.add_class(Region::Loading, CLASS_SHOW);
        } else {
            OverlayIssue::MissingElement(Region::Loading).report();
        }

        self.dom.remove_region(Region::Embed);
    }
}
