use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Localized names for one addressable entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntityRecord {
    pub alt_name: Option<String>,
    pub display_name: Option<String>,
    pub iau_name: Option<String>,
}

impl EntityRecord {
    /// Display name with precedence `alt_name > display_name > iau_name`.
    ///
    /// Empty strings are treated as missing.
    pub fn name(&self) -> Option<&str> {
        [&self.alt_name, &self.display_name, &self.iau_name]
            .into_iter()
            .filter_map(|n| n.as_deref())
            .find(|n| !n.is_empty())
    }
}

/// Entity metadata keyed by entity id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityInfo {
    entries: BTreeMap<String, EntityRecord>,
}

impl EntityInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, record: EntityRecord) {
        self.entries.insert(id.into(), record);
    }

    pub fn get(&self, id: &str) -> Option<&EntityRecord> {
        self.entries.get(id)
    }

    pub fn name(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(EntityRecord::name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, EntityRecord)> for EntityInfo {
    fn from_iter<I: IntoIterator<Item = (K, EntityRecord)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    #[serde(default)]
    pub title: String,
}

/// Guided tours keyed by story id, in the `{ "stories": { .. } }` shape the
/// app ships.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryList {
    #[serde(default)]
    stories: BTreeMap<String, Story>,
}

impl StoryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, title: impl Into<String>) {
        self.stories.insert(
            id.into(),
            Story {
                title: title.into(),
            },
        );
    }

    /// Story title, if the story exists and its title is non-empty.
    pub fn title(&self, id: &str) -> Option<&str> {
        self.stories
            .get(id)
            .map(|s| s.title.as_str())
            .filter(|t| !t.is_empty())
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StoryList {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = Self::new();
        for (id, title) in iter {
            list.insert(id, title);
        }
        list
    }
}

/// The two optional lookup tables, snapshotted at controller construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lookups {
    pub stories: Option<StoryList>,
    pub entities: Option<EntityInfo>,
}
