use pw_toc_traits::DomTree;
use pw_toc_types::{TocConfig, attrs};

/// Reads the configuration of the TOC instance rooted at `wrapper`.
///
/// Never fails: every attribute is optional. Reading has no side effects,
/// so the same attributes always produce the same config.
pub fn resolve_config<D: DomTree>(dom: &D, wrapper: &D::Node) -> TocConfig {
    TocConfig::from_attributes(
        dom.attribute(wrapper, attrs::HEADINGS),
        dom.attribute(wrapper, attrs::ACTIVE_CLASS),
        dom.attribute(wrapper, attrs::STICKY_NAV),
        dom.has_attribute(wrapper, attrs::DEBUG),
    )
}
