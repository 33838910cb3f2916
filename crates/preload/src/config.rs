use serde::{Deserialize, Serialize};

use crate::lookup::{EntityInfo, Lookups, StoryList};

/// Tunables for the preload overlay. Every field has a default, so hosts
/// only override what they need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreloadConfig {
    pub embed_element_id: String,
    pub loading_element_id: String,
    /// Progress shown as soon as the embed overlay appears (percent).
    pub initial_load_percent: f64,
    /// Titles longer than this many characters get their own caption line.
    pub caption_wrap_threshold: usize,
    /// Fade-out length before the loading screen is removed.
    pub fade_out_ms: u32,
    pub near_star_count: usize,
    pub far_star_count: usize,
    pub interact_icon_src: String,
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            embed_element_id: "embed-overlay".to_string(),
            loading_element_id: "loading-screen".to_string(),
            initial_load_percent: 10.0,
            caption_wrap_threshold: 20,
            fade_out_ms: 400,
            near_star_count: 8,
            far_star_count: 24,
            interact_icon_src: "./assets/svg/embed_interact.svg".to_string(),
        }
    }
}

impl PreloadConfig {
    /// CSS `transition` value matching `fade_out_ms`.
    pub fn fade_transition(&self) -> String {
        format!("opacity {}s ease-out", f64::from(self.fade_out_ms) / 1000.0)
    }
}

/// Options object accepted from the host page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreloadOptions {
    pub story_list: Option<StoryList>,
    pub entity_info: Option<EntityInfo>,
    pub config: Option<PreloadConfig>,
}

impl PreloadOptions {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw)
    }

    pub fn into_parts(self) -> (Lookups, PreloadConfig) {
        (
            Lookups {
                stories: self.story_list,
                entities: self.entity_info,
            },
            self.config.unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_stable() {
        let cfg = PreloadConfig::default();
        assert_eq!(cfg.embed_element_id, "embed-overlay");
        assert_eq!(cfg.loading_element_id, "loading-screen");
        assert_eq!(cfg.initial_load_percent, 10.0);
        assert_eq!(cfg.caption_wrap_threshold, 20);
        assert_eq!(cfg.fade_out_ms, 400);
        assert_eq!(cfg.near_star_count, 8);
        assert_eq!(cfg.far_star_count, 24);
        assert_eq!(cfg.interact_icon_src, "./assets/svg/embed_interact.svg");
        assert_eq!(cfg.fade_transition(), "opacity 0.4s ease-out");
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let cfg: PreloadConfig =
            serde_json::from_str(r#"{ "fadeOutMs": 250, "farStarCount": 4 }"#).unwrap();
        assert_eq!(cfg.fade_out_ms, 250);
        assert_eq!(cfg.far_star_count, 4);
        assert_eq!(cfg.near_star_count, 8);
        assert_eq!(cfg.embed_element_id, "embed-overlay");
    }

    #[test]
    fn options_from_json() {
        let opts = PreloadOptions::from_json(
            r#"{
                "storyList": { "stories": { "alpha": { "title": "Voyage" } } },
                "entityInfo": { "earth": { "displayName": "Earth" } }
            }"#,
        )
        .unwrap();
        let (lookups, cfg) = opts.into_parts();
        assert_eq!(lookups.stories.unwrap().title("alpha"), Some("Voyage"));
        assert_eq!(lookups.entities.unwrap().name("earth"), Some("Earth"));
        assert_eq!(cfg, PreloadConfig::default());
    }

    #[test]
    fn blank_options_are_default() {
        assert_eq!(PreloadOptions::from_json("  ").unwrap(), PreloadOptions::default());
        assert!(PreloadOptions::from_json("{ not json").is_err());
    }
}
