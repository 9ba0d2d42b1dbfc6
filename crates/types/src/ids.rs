//! Newtype wrapper for heading identifiers.
//!
//! Keeps heading anchors apart from the other strings (selectors, class
//! names, text) that flow through the widget.

use std::fmt;
use std::sync::Arc;

/// The stable identifier of a heading element, used as its anchor.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct HeadingId(Arc<str>);

impl HeadingId {
    /// Creates a new HeadingId from a string
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this heading ID
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for HeadingId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for HeadingId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for HeadingId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HeadingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_id_roundtrip() {
        let id = HeadingId::new("toc-intro-0");
        assert_eq!(id.as_str(), "toc-intro-0");
        assert_eq!(id.to_string(), "toc-intro-0");
        assert_eq!(id, HeadingId::from("toc-intro-0".to_string()));
    }
}
