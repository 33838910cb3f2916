use crate::title::HOME_TITLE;

pub const GENERIC_CAPTION: &str = "Loading 3D";

/// Text for the embed overlay's loading caption.
///
/// `lines` are shown stacked when `multiline` is set, otherwise joined with a
/// single space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingCaption {
    lines: Vec<String>,
    multiline: bool,
}

impl LoadingCaption {
    /// Builds the caption for a resolved title. Titles longer than
    /// `wrap_threshold` characters get their own line.
    pub fn for_title(title: Option<&str>, wrap_threshold: usize) -> Self {
        match title {
            Some(title) if title != HOME_TITLE => Self {
                lines: vec!["Loading".to_string(), title.to_string(), "in 3D".to_string()],
                multiline: title.chars().count() > wrap_threshold,
            },
            _ => Self::generic(),
        }
    }

    pub fn generic() -> Self {
        Self {
            lines: vec![GENERIC_CAPTION.to_string()],
            multiline: false,
        }
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Lines as they should be rendered, with a break between each.
    pub fn display_lines(&self) -> Vec<String> {
        if self.multiline {
            self.lines.clone()
        } else {
            vec![self.lines.join(" ")]
        }
    }

    pub fn text(&self) -> String {
        self.display_lines().join("\n")
    }
}

/// The "drag to rotate" hint, worded for the primary input device.
pub fn interaction_hint(is_touch: bool) -> Vec<String> {
    let verb = if is_touch { "touch" } else { "click" };
    vec![format!("{verb} & drag"), "to rotate".to_string()]
}
