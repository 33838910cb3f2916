//! Human-readable page titles derived from the hash route.
//!
//! Routes follow the app's router table:
//! - `home`
//! - `story/:id?slide=slide_N`
//! - `:object`, `:object/moons[/:moon]`, `:object/telescope`
//! - `:object/events[/:child]`, `:object/compare?id=:other`

use crate::lookup::{EntityInfo, StoryList};
use crate::route::RouteContext;

pub const HOME_TITLE: &str = "Home";

const SLIDE_PREFIX: &str = "slide_";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum RoutePattern {
    Story,
    Moons,
    Telescope,
    Events,
    Compare,
}

/// Checked in this order; the first substring match wins.
const PATTERNS: [(RoutePattern, &str); 5] = [
    (RoutePattern::Story, "story/"),
    (RoutePattern::Moons, "/moons"),
    (RoutePattern::Telescope, "/telescope"),
    (RoutePattern::Events, "/events"),
    (RoutePattern::Compare, "/compare"),
];

/// Resolves the title for `route`. `None` means "no title".
pub fn resolve_title(
    route: &RouteContext,
    stories: Option<&StoryList>,
    entities: Option<&EntityInfo>,
) -> Option<String> {
    TitleResolver::new(stories, entities).resolve(route)
}

#[derive(Debug, Copy, Clone, Default)]
pub struct TitleResolver<'a> {
    stories: Option<&'a StoryList>,
    entities: Option<&'a EntityInfo>,
}

impl<'a> TitleResolver<'a> {
    pub fn new(stories: Option<&'a StoryList>, entities: Option<&'a EntityInfo>) -> Self {
        Self { stories, entities }
    }

    pub fn resolve(&self, route: &RouteContext) -> Option<String> {
        let hash = route.hash_route();
        if hash == "home" {
            return Some(HOME_TITLE.to_string());
        }

        // Entity id used by the default resolution below. Patterns that split
        // off a base object narrow it to that segment.
        let mut object = hash;

        let matched = PATTERNS.iter().find(|(_, needle)| hash.contains(needle));
        if let Some(&(pattern, needle)) = matched {
            let (base, rest) = split_once_segment(hash, needle);
            match pattern {
                RoutePattern::Story => {
                    if let Some(title) = self.stories.and_then(|s| s.title(rest)) {
                        let slide = slide_number(route);
                        if !slide.is_empty() {
                            return Some(format!("{title} - Slide {slide}"));
                        }
                    }
                }
                RoutePattern::Moons => {
                    if let Some(moon) = self.entity_name(strip_first_char(rest)) {
                        return Some(moon.to_string());
                    }
                    object = base;
                    if let Some(name) = self.entity_name(base) {
                        return Some(moons_title(name));
                    }
                }
                RoutePattern::Telescope => {
                    object = base;
                    if let Some(name) = self.entity_name(base) {
                        return Some(format!("{name} Telescope Mode"));
                    }
                }
                RoutePattern::Events => {
                    object = base;
                    if let Some(name) = self.entity_name(base) {
                        return if strip_first_char(rest).is_empty() {
                            None
                        } else {
                            Some(format!("{name} Event"))
                        };
                    }
                }
                RoutePattern::Compare => {
                    object = base;
                    if let Some(left) = self.entity_name(base) {
                        let right = route.param("id").and_then(|id| self.entity_name(id));
                        return Some(match right {
                            Some(right) => format!("{left} compared to {right}"),
                            None => format!("{left} Comparison"),
                        });
                    }
                }
            }
        }

        Some(
            self.entity_name(object)
                .unwrap_or(HOME_TITLE)
                .to_string(),
        )
    }

    fn entity_name(&self, id: &str) -> Option<&'a str> {
        self.entities.and_then(|e| e.name(id))
    }
}

/// `"<name>'s Moons"`, or `"<name>' Moons"` when the name already ends in `s`.
fn moons_title(name: &str) -> String {
    let suffix = if name.ends_with('s') { "" } else { "s" };
    format!("{name}'{suffix} Moons")
}

fn slide_number(route: &RouteContext) -> String {
    match route.param("slide") {
        Some(slide) if !slide.is_empty() => slide.replacen(SLIDE_PREFIX, "", 1),
        _ => "1".to_string(),
    }
}

/// Text before the first `needle`, and the text between the first and a
/// second occurrence (or the end).
fn split_once_segment<'s>(hash: &'s str, needle: &str) -> (&'s str, &'s str) {
    let mut parts = hash.split(needle);
    let base = parts.next().unwrap_or("");
    let rest = parts.next().unwrap_or("");
    (base, rest)
}

fn strip_first_char(s: &str) -> &str {
    let mut chars = s.chars();
    chars.next();
    chars.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::EntityRecord;
    use std::collections::BTreeMap;

    fn route(hash_route: &str, params: &[(&str, &str)]) -> RouteContext {
        let params: BTreeMap<String, String> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RouteContext::new(hash_route, params)
    }

    fn display(name: &str) -> EntityRecord {
        EntityRecord {
            display_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn entities(items: &[(&str, &str)]) -> EntityInfo {
        items.iter().map(|(id, name)| (*id, display(name))).collect()
    }

    #[test]
    fn home_route() {
        assert_eq!(
            resolve_title(&route("home", &[]), None, None).as_deref(),
            Some("Home")
        );
    }

    #[test]
    fn story_with_slide_prefix() {
        let stories: StoryList = [("alpha", "Voyage")].into_iter().collect();
        let title = resolve_title(
            &route("story/alpha", &[("slide", "slide_3")]),
            Some(&stories),
            None,
        );
        assert_eq!(title.as_deref(), Some("Voyage - Slide 3"));
    }

    #[test]
    fn story_defaults_to_first_slide() {
        let stories: StoryList = [("alpha", "Voyage")].into_iter().collect();
        let title = resolve_title(&route("story/alpha", &[]), Some(&stories), None);
        assert_eq!(title.as_deref(), Some("Voyage - Slide 1"));
    }

    #[test]
    fn story_slide_without_prefix_is_kept() {
        let stories: StoryList = [("alpha", "Voyage")].into_iter().collect();
        let title = resolve_title(
            &route("story/alpha", &[("slide", "7")]),
            Some(&stories),
            None,
        );
        assert_eq!(title.as_deref(), Some("Voyage - Slide 7"));
    }

    #[test]
    fn unknown_story_falls_back_to_full_route() {
        let stories: StoryList = [("alpha", "Voyage")].into_iter().collect();
        let ents = entities(&[("story/beta", "Beta Tour")]);
        let title = resolve_title(&route("story/beta", &[]), Some(&stories), Some(&ents));
        assert_eq!(title.as_deref(), Some("Beta Tour"));

        let title = resolve_title(&route("story/gamma", &[]), Some(&stories), Some(&ents));
        assert_eq!(title.as_deref(), Some("Home"));
    }

    #[test]
    fn story_without_story_list_is_home() {
        let title = resolve_title(&route("story/alpha", &[("slide", "slide_2")]), None, None);
        assert_eq!(title.as_deref(), Some("Home"));
    }

    #[test]
    fn empty_slide_number_falls_back_to_full_route() {
        let stories: StoryList = [("alpha", "Voyage")].into_iter().collect();
        let ents = entities(&[("story/alpha", "Full")]);
        let title = resolve_title(
            &route("story/alpha", &[("slide", "slide_")]),
            Some(&stories),
            Some(&ents),
        );
        assert_eq!(title.as_deref(), Some("Full"));
    }

    #[test]
    fn story_pattern_shadows_moons() {
        let stories: StoryList = [("alpha", "Voyage")].into_iter().collect();
        let ents = entities(&[("earth", "Earth")]);
        let title = resolve_title(&route("story/earth/moons", &[]), Some(&stories), Some(&ents));
        assert_eq!(title.as_deref(), Some("Home"));
    }

    #[test]
    fn moon_segment_resolves_directly() {
        let ents = entities(&[("luna", "Luna")]);
        let title = resolve_title(&route("earth/moons/luna", &[]), None, Some(&ents));
        assert_eq!(title.as_deref(), Some("Luna"));
    }

    #[test]
    fn moons_possessive() {
        let ents = entities(&[("earth", "Earth")]);
        let title = resolve_title(&route("earth/moons", &[]), None, Some(&ents));
        assert_eq!(title.as_deref(), Some("Earth's Moons"));
    }

    #[test]
    fn moons_possessive_for_names_ending_in_s() {
        let ents: EntityInfo = [(
            "mars",
            EntityRecord {
                iau_name: Some("Mars".into()),
                ..Default::default()
            },
        )]
        .into_iter()
        .collect();
        let title = resolve_title(&route("mars/moons", &[]), None, Some(&ents));
        assert_eq!(title.as_deref(), Some("Mars' Moons"));

        let ents = entities(&[("rings", "rings")]);
        let title = resolve_title(&route("rings/moons", &[]), None, Some(&ents));
        assert_eq!(title.as_deref(), Some("rings' Moons"));
    }

    #[test]
    fn unknown_moon_falls_back_to_planet() {
        let ents = entities(&[("jupiter", "Jupiter")]);
        let title = resolve_title(&route("jupiter/moons/xyz", &[]), None, Some(&ents));
        assert_eq!(title.as_deref(), Some("Jupiter's Moons"));
    }

    #[test]
    fn telescope_mode() {
        let ents = entities(&[("hubble", "Hubble")]);
        let title = resolve_title(&route("hubble/telescope", &[]), None, Some(&ents));
        assert_eq!(title.as_deref(), Some("Hubble Telescope Mode"));

        let title = resolve_title(&route("webb/telescope", &[]), None, Some(&ents));
        assert_eq!(title.as_deref(), Some("Home"));
    }

    #[test]
    fn events_with_and_without_child() {
        let ents = entities(&[("earth", "Earth")]);
        assert_eq!(
            resolve_title(&route("earth/events", &[]), None, Some(&ents)),
            None
        );
        assert_eq!(
            resolve_title(&route("earth/events/eclipse", &[]), None, Some(&ents)).as_deref(),
            Some("Earth Event")
        );
    }

    #[test]
    fn unresolved_events_object_is_home() {
        let title = resolve_title(&route("pluto/events", &[]), None, Some(&EntityInfo::new()));
        assert_eq!(title.as_deref(), Some("Home"));
    }

    #[test]
    fn compare_titles() {
        let ents = entities(&[("earth", "Earth"), ("mars", "Mars")]);
        assert_eq!(
            resolve_title(&route("earth/compare", &[("id", "mars")]), None, Some(&ents))
                .as_deref(),
            Some("Earth compared to Mars")
        );
        assert_eq!(
            resolve_title(&route("earth/compare", &[]), None, Some(&ents)).as_deref(),
            Some("Earth Comparison")
        );
        assert_eq!(
            resolve_title(&route("earth/compare", &[("id", "vulcan")]), None, Some(&ents))
                .as_deref(),
            Some("Earth Comparison")
        );
    }

    #[test]
    fn compare_with_unresolved_left_is_home() {
        let ents = entities(&[("mars", "Mars")]);
        let title = resolve_title(&route("vulcan/compare", &[("id", "mars")]), None, Some(&ents));
        assert_eq!(title.as_deref(), Some("Home"));
    }

    #[test]
    fn plain_object_route() {
        let ents: EntityInfo = [(
            "sun",
            EntityRecord {
                alt_name: Some("The Sun".into()),
                display_name: Some("Sun".into()),
                iau_name: Some("Sol".into()),
            },
        )]
        .into_iter()
        .collect();
        assert_eq!(
            resolve_title(&route("sun", &[]), None, Some(&ents)).as_deref(),
            Some("The Sun")
        );
        assert_eq!(
            resolve_title(&route("unknown", &[]), None, Some(&ents)).as_deref(),
            Some("Home")
        );
        assert_eq!(
            resolve_title(&route("", &[]), None, None).as_deref(),
            Some("Home")
        );
    }

    #[test]
    fn first_pattern_wins() {
        // Both `/moons` and `/events` occur; only the moons branch runs.
        let ents = entities(&[("saturn", "Saturn")]);
        let title = resolve_title(&route("saturn/moons/events", &[]), None, Some(&ents));
        assert_eq!(title.as_deref(), Some("Saturn's Moons"));
    }

    #[test]
    fn resolution_is_deterministic() {
        let stories: StoryList = [("alpha", "Voyage")].into_iter().collect();
        let ents = entities(&[("earth", "Earth"), ("mars", "Mars"), ("luna", "Luna")]);
        let cases = [
            route("home", &[]),
            route("story/alpha", &[("slide", "slide_4")]),
            route("earth/moons/luna", &[]),
            route("earth/events/x", &[]),
            route("earth/compare", &[("id", "mars")]),
            route("mars", &[]),
        ];
        let resolver = TitleResolver::new(Some(&stories), Some(&ents));
        for case in &cases {
            let first = resolver.resolve(case);
            for _ in 0..3 {
                assert_eq!(resolver.resolve(case), first);
            }
            assert_eq!(resolve_title(case, Some(&stories), Some(&ents)), first);
        }
    }
}
