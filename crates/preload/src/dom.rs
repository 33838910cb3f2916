use std::collections::{BTreeMap, BTreeSet};

use crate::caption::LoadingCaption;
use crate::stars::StarField;

/// The two page regions the overlay owns.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    Embed,
    Loading,
}

impl Region {
    pub fn name(self) -> &'static str {
        match self {
            Region::Embed => "embed overlay",
            Region::Loading => "loading screen",
        }
    }
}

/// Document-level input events the overlay listens for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InputKind {
    PointerDown,
    PointerUp,
    TouchStart,
    TouchEnd,
}

impl InputKind {
    pub const ALL: [InputKind; 4] = [
        InputKind::PointerDown,
        InputKind::PointerUp,
        InputKind::TouchStart,
        InputKind::TouchEnd,
    ];

    /// DOM event type.
    pub fn event_name(self) -> &'static str {
        match self {
            InputKind::PointerDown => "mousedown",
            InputKind::PointerUp => "mouseup",
            InputKind::TouchStart => "touchstart",
            InputKind::TouchEnd => "touchend",
        }
    }

    pub fn from_event_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.event_name() == name)
    }
}

/// Content of the embed overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedView {
    pub interact_icon_src: String,
    pub interact_hint: Vec<String>,
    pub view_button_label: String,
    pub caption: LoadingCaption,
}

/// Content of the full-screen loading screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingView {
    pub label: String,
    pub near_stars: StarField,
    pub far_stars: StarField,
}

/// The DOM operations the overlay controller needs.
///
/// Implementations must treat every call on a missing region as a no-op.
pub trait OverlayDom {
    fn has_region(&self, region: Region) -> bool;

    /// Appends the embed overlay markup to the embed region.
    fn render_embed(&mut self, view: &EmbedView);

    /// Appends the loading screen markup to the loading region.
    fn render_loading(&mut self, view: &LoadingView);

    fn add_class(&mut self, region: Region, class: &str);
    fn remove_class(&mut self, region: Region, class: &str);
    fn clear_classes(&mut self, region: Region);
    fn set_style(&mut self, region: Region, property: &str, value: &str);

    /// Forces a layout pass so CSS transitions start from the current state.
    fn flush_layout(&mut self, _region: Region) {}

    fn remove_region(&mut self, region: Region);
    fn remove_region_after(&mut self, region: Region, delay_ms: u32);

    /// Attaches the document listener for `kind`.
    fn listen(&mut self, kind: InputKind);
    fn unlisten(&mut self, kind: InputKind);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryRegion {
    pub classes: BTreeSet<String>,
    pub styles: BTreeMap<String, String>,
    pub removed: bool,
}

/// In-memory [`OverlayDom`] that records every mutation.
#[derive(Debug, Clone, Default)]
pub struct MemoryDom {
    embed: Option<MemoryRegion>,
    loading: Option<MemoryRegion>,
    embed_view: Option<EmbedView>,
    loading_view: Option<LoadingView>,
    listeners: BTreeMap<InputKind, usize>,
    timers: Vec<(Region, u32)>,
    mutations: usize,
    layout_flushes: usize,
}

impl MemoryDom {
    /// A page with both regions present.
    pub fn new() -> Self {
        Self::with_regions(true, true)
    }

    pub fn with_regions(embed: bool, loading: bool) -> Self {
        Self {
            embed: embed.then(MemoryRegion::default),
            loading: loading.then(MemoryRegion::default),
            ..Self::default()
        }
    }

    pub fn region(&self, region: Region) -> Option<&MemoryRegion> {
        match region {
            Region::Embed => self.embed.as_ref(),
            Region::Loading => self.loading.as_ref(),
        }
    }

    pub fn classes(&self, region: Region) -> Vec<&str> {
        self.region(region)
            .map(|r| r.classes.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, region: Region, class: &str) -> bool {
        self.region(region).is_some_and(|r| r.classes.contains(class))
    }

    pub fn style(&self, region: Region, property: &str) -> Option<&str> {
        self.region(region)
            .and_then(|r| r.styles.get(property))
            .map(String::as_str)
    }

    pub fn embed_view(&self) -> Option<&EmbedView> {
        self.embed_view.as_ref()
    }

    pub fn loading_view(&self) -> Option<&LoadingView> {
        self.loading_view.as_ref()
    }

    /// Number of attached listeners for `kind`.
    pub fn listener_count(&self, kind: InputKind) -> usize {
        self.listeners.get(&kind).copied().unwrap_or(0)
    }

    pub fn total_listeners(&self) -> usize {
        self.listeners.values().sum()
    }

    pub fn pending_timers(&self) -> &[(Region, u32)] {
        &self.timers
    }

    /// Runs every scheduled removal.
    pub fn run_timers(&mut self) {
        for (region, _) in std::mem::take(&mut self.timers) {
            self.remove_region(region);
        }
    }

    pub fn mutation_count(&self) -> usize {
        self.mutations
    }

    pub fn layout_flushes(&self) -> usize {
        self.layout_flushes
    }

    fn live_mut(&mut self, region: Region) -> Option<&mut MemoryRegion> {
        let slot = match region {
            Region::Embed => self.embed.as_mut(),
            Region::Loading => self.loading.as_mut(),
        };
        let live = slot.filter(|r| !r.removed)?;
        self.mutations += 1;
        Some(live)
    }
}

impl OverlayDom for MemoryDom {
    fn has_region(&self, region: Region) -> bool {
        self.region(region).is_some_and(|r| !r.removed)
    }

    fn render_embed(&mut self, view: &EmbedView) {
        if self.live_mut(Region::Embed).is_some() {
            self.embed_view = Some(view.clone());
        }
    }

    fn render_loading(&mut self, view: &LoadingView) {
        if self.live_mut(Region::Loading).is_some() {
            self.loading_view = Some(view.clone());
        }
    }

    fn add_class(&mut self, region: Region, class: &str) {
        if let Some(r) = self.live_mut(region) {
            r.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, region: Region, class: &str) {
        if let Some(r) = self.live_mut(region) {
            r.classes.remove(class);
        }
    }

    fn clear_classes(&mut self, region: Region) {
        if let Some(r) = self.live_mut(region) {
            r.classes.clear();
        }
    }

    fn set_style(&mut self, region: Region, property: &str, value: &str) {
        if let Some(r) = self.live_mut(region) {
            r.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn flush_layout(&mut self, region: Region) {
        if self.has_region(region) {
            self.layout_flushes += 1;
        }
    }

    fn remove_region(&mut self, region: Region) {
        if let Some(r) = self.live_mut(region) {
            r.removed = true;
        }
    }

    fn remove_region_after(&mut self, region: Region, delay_ms: u32) {
        if self.has_region(region) {
            self.mutations += 1;
            self.timers.push((region, delay_ms));
        }
    }

    fn listen(&mut self, kind: InputKind) {
        self.mutations += 1;
        *self.listeners.entry(kind).or_insert(0) += 1;
    }

    fn unlisten(&mut self, kind: InputKind) {
        if let Some(count) = self.listeners.get_mut(&kind) {
            self.mutations += 1;
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.listeners.remove(&kind);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_round_trip() {
        for kind in InputKind::ALL {
            assert_eq!(InputKind::from_event_name(kind.event_name()), Some(kind));
        }
        assert_eq!(InputKind::from_event_name("click"), None);
    }

    #[test]
    fn missing_region_ignores_mutations() {
        let mut dom = MemoryDom::with_regions(false, true);
        dom.add_class(Region::Embed, "show");
        dom.set_style(Region::Embed, "opacity", "0");
        dom.remove_region_after(Region::Embed, 400);
        assert!(!dom.has_region(Region::Embed));
        assert_eq!(dom.mutation_count(), 0);
        assert!(dom.pending_timers().is_empty());
    }

    #[test]
    fn timed_removal_runs_on_demand() {
        let mut dom = MemoryDom::new();
        dom.remove_region_after(Region::Loading, 400);
        assert!(dom.has_region(Region::Loading));
        assert_eq!(dom.pending_timers(), &[(Region::Loading, 400u32)]);
        dom.run_timers();
        assert!(!dom.has_region(Region::Loading));
        assert!(dom.pending_timers().is_empty());
    }

    #[test]
    fn removed_region_stays_removed() {
        let mut dom = MemoryDom::new();
        dom.remove_region(Region::Embed);
        let before = dom.mutation_count();
        dom.add_class(Region::Embed, "view");
        assert_eq!(dom.mutation_count(), before);
        assert!(dom.classes(Region::Embed).is_empty());
    }

    #[test]
    fn listener_counts_balance() {
        let mut dom = MemoryDom::new();
        dom.listen(InputKind::PointerUp);
        dom.listen(InputKind::PointerUp);
        assert_eq!(dom.listener_count(InputKind::PointerUp), 2);
        dom.unlisten(InputKind::PointerUp);
        dom.unlisten(InputKind::PointerUp);
        dom.unlisten(InputKind::PointerUp);
        assert_eq!(dom.total_listeners(), 0);
    }
}
