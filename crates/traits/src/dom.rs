//! Tree and viewport abstractions.

use pw_toc_types::{ObservationBand, ScrollRequest, VisibilityChange};
use thiserror::Error;

/// Error type for page operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomError {
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Node is not attached to this page: {0}")]
    Detached(String),

    #[error("Malformed markup: {0}")]
    Markup(String),

    #[error("Platform error: {0}")]
    Platform(String),
}

/// Invoked when a row is clicked. Default navigation is already suppressed.
pub type ClickHandler = Box<dyn Fn()>;

/// Receives batches of visibility notifications.
pub type VisibilityCallback<N> = Box<dyn FnMut(Vec<VisibilityChange<N>>)>;

/// Query, clone and mutate access to a document tree.
///
/// Node handles are cheap to clone and compare by identity.
pub trait DomTree {
    type Node: Clone + PartialEq + 'static;

    /// First element matching `selector` below `scope` (or the whole
    /// document when `scope` is `None`), in document order.
    fn query_selector(
        &self,
        scope: Option<&Self::Node>,
        selector: &str,
    ) -> Result<Option<Self::Node>, DomError>;

    /// All elements matching `selector` below `scope`, in document order.
    fn query_selector_all(
        &self,
        scope: Option<&Self::Node>,
        selector: &str,
    ) -> Result<Vec<Self::Node>, DomError>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn has_attribute(&self, node: &Self::Node, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> Result<(), DomError>;

    fn remove_attribute(&self, node: &Self::Node, name: &str) -> Result<(), DomError>;

    /// The text a reader sees for `node`.
    fn text(&self, node: &Self::Node) -> String;

    /// Replaces every child of `node` with a single text node.
    fn set_text_content(&self, node: &Self::Node, text: &str) -> Result<(), DomError>;

    /// Detached deep copy of `node`, including descendants but not listeners.
    fn deep_clone(&self, node: &Self::Node) -> Result<Self::Node, DomError>;

    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), DomError>;

    /// Sets `display: none` on the element's inline style.
    fn hide(&self, node: &Self::Node) -> Result<(), DomError>;

    /// Forces membership of `class` in the element's class list.
    fn set_class(&self, node: &Self::Node, class: &str, present: bool) -> Result<(), DomError>;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Registers `handler` for clicks on `node`, suppressing default navigation.
    fn listen_click(&self, node: &Self::Node, handler: ClickHandler) -> Result<(), DomError>;
}

/// Geometry, scrolling and visibility observation.
pub trait Viewport: DomTree {
    /// Top edge of `node` relative to the viewport.
    fn bounding_top(&self, node: &Self::Node) -> f64;

    /// Rendered height of `node`.
    fn offset_height(&self, node: &Self::Node) -> f64;

    /// Current vertical scroll position of the document.
    fn scroll_y(&self) -> f64;

    fn viewport_height(&self) -> f64;

    fn scroll_to(&self, request: ScrollRequest) -> Result<(), DomError>;

    /// Observes `targets` against `band` for the lifetime of the page.
    ///
    /// `callback` receives a batch whenever any target enters or leaves the band.
    fn observe_visibility(
        &self,
        targets: &[Self::Node],
        band: ObservationBand,
        callback: VisibilityCallback<Self::Node>,
    ) -> Result<(), DomError>;
}
