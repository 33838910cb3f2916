use std::collections::BTreeMap;

/// Read-only view of the client-side hash route, parsed once per page load.
///
/// `#/earth/moons?embed=true` becomes `hash_route = "earth/moons"` and
/// `params = { embed: "true" }`. The route never contains a `?`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteContext {
    hash_route: String,
    params: BTreeMap<String, String>,
}

impl RouteContext {
    pub fn new(hash_route: impl Into<String>, params: BTreeMap<String, String>) -> Self {
        let mut hash_route = hash_route.into();
        if let Some(q) = hash_route.find('?') {
            hash_route.truncate(q);
        }
        Self { hash_route, params }
    }

    /// Parses a `location.hash` value.
    ///
    /// Only the text after the first `#/` is considered. Query parameters use
    /// form-urlencoded rules and the first occurrence of a key wins.
    pub fn from_hash(hash: &str) -> Self {
        let tail = hash.split("#/").nth(1).unwrap_or("");
        let mut parts = tail.split('?');
        let hash_route = parts.next().unwrap_or("").to_string();
        let query = parts.next().unwrap_or("");

        let mut params = BTreeMap::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            params
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }

        Self { hash_route, params }
    }

    pub fn hash_route(&self) -> &str {
        &self.hash_route
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn is_embed(&self) -> bool {
        self.param("embed") == Some("true")
    }

    pub fn is_interact_prompt(&self) -> bool {
        self.param("interactPrompt") == Some("true")
    }
}
