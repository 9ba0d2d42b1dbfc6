//! Resolved configuration of one TOC instance and the markup contract it is read from.

use serde::{Deserialize, Serialize};

/// Heading selector used when the wrapper does not name one.
pub const DEFAULT_HEADING_SELECTOR: &str = "h2,h3";

/// Class toggled on the active row when the wrapper does not name one.
pub const DEFAULT_ACTIVE_CLASS: &str = "is-active";

/// Vertical gap (px) used when no sticky navigation element offsets the page.
pub const DEFAULT_TOP_GAP: f64 = 24.0;

/// Share of the viewport height cut from the bottom of the observation band.
pub const BOTTOM_MARGIN_PERCENT: u32 = 70;

/// Attribute names and marker values making up the declarative contract.
pub mod attrs {
    /// Marker attribute; its value says which role the element plays.
    pub const MARKER: &str = "data-pw-toc";

    pub const WRAPPER: &str = "wrapper";
    pub const CONTENT: &str = "content";
    pub const LIST: &str = "list";
    pub const ITEM: &str = "item";
    pub const TEXT: &str = "text";

    /// Presence enables diagnostics for the wrapper.
    pub const DEBUG: &str = "data-pw-toc-debug";
    pub const HEADINGS: &str = "data-pw-toc-headings";
    pub const ACTIVE_CLASS: &str = "data-pw-toc-active-class";
    pub const STICKY_NAV: &str = "data-pw-toc-sticky-nav";

    /// Set on a wrapper once its rows are rendered.
    pub const MOUNTED: &str = "data-pw-toc-mounted";

    /// Builds the selector matching elements carrying `role` as marker value.
    pub fn selector(role: &str) -> String {
        format!("[{}=\"{}\"]", MARKER, role)
    }
}

/// Options resolved from a wrapper element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TocConfig {
    pub heading_selector: String,
    pub active_class: String,
    pub sticky_nav_selector: Option<String>,
    pub debug: bool,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            heading_selector: DEFAULT_HEADING_SELECTOR.to_string(),
            active_class: DEFAULT_ACTIVE_CLASS.to_string(),
            sticky_nav_selector: None,
            debug: false,
        }
    }
}

impl TocConfig {
    /// Builds a config from raw attribute values.
    ///
    /// Empty values count as absent, so `data-pw-toc-headings=""` still
    /// yields the default selector.
    pub fn from_attributes(
        heading_selector: Option<String>,
        active_class: Option<String>,
        sticky_nav_selector: Option<String>,
        debug: bool,
    ) -> Self {
        let defaults = Self::default();
        Self {
            heading_selector: non_empty(heading_selector).unwrap_or(defaults.heading_selector),
            active_class: non_empty(active_class).unwrap_or(defaults.active_class),
            sticky_nav_selector: non_empty(sticky_nav_selector),
            debug,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
