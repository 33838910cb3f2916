use crate::dom::Region;

/// Conditions the overlay absorbs instead of failing.
///
/// These are never returned as errors from the public operations; they are
/// logged and the overlay degrades to its fallback (no-op render, generic
/// caption).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayIssue {
    MissingElement(Region),
    UnresolvedName(String),
}

impl std::fmt::Display for OverlayIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverlayIssue::MissingElement(region) => {
                write!(f, "{} element is missing", region.name())
            }
            OverlayIssue::UnresolvedName(route) => {
                write!(f, "no title for route {route:?}")
            }
        }
    }
}

impl std::error::Error for OverlayIssue {}

impl OverlayIssue {
    pub(crate) fn report(&self) {
        tracing::debug!("preload: {}", self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            OverlayIssue::MissingElement(Region::Loading).to_string(),
            "loading screen element is missing"
        );
        assert_eq!(
            OverlayIssue::UnresolvedName("pluto/events".into()).to_string(),
            "no title for route \"pluto/events\""
        );
    }
}
