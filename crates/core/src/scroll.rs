//! Scroll offset and click-to-scroll targeting.

use pw_toc_traits::{Diagnostics, DomError, Viewport};
use pw_toc_types::{DEFAULT_TOP_GAP, ScrollRequest};

/// Vertical gap kept above a heading scrolled into view.
///
/// The rendered height of the sticky navigation element when one is
/// configured and present, [`DEFAULT_TOP_GAP`] otherwise. Read fresh on
/// every call so a nav that changes height is picked up.
pub fn scroll_offset<V: Viewport>(
    page: &V,
    sticky_nav_selector: Option<&str>,
    diagnostics: &dyn Diagnostics,
) -> f64 {
    let Some(selector) = sticky_nav_selector else {
        return DEFAULT_TOP_GAP;
    };

    match page.query_selector(None, selector) {
        Ok(Some(nav)) => page.offset_height(&nav),
        Ok(None) => {
            diagnostics.warn(&format!("Sticky nav not found for selector: {}", selector));
            DEFAULT_TOP_GAP
        }
        Err(e) => {
            diagnostics.warn(&format!(
                "Sticky nav selector rejected: {} ({})",
                selector, e
            ));
            DEFAULT_TOP_GAP
        }
    }
}

/// Document position that puts `heading` `offset` px below the top edge.
pub fn heading_target_top<V: Viewport>(page: &V, heading: &V::Node, offset: f64) -> f64 {
    page.bounding_top(heading) + page.scroll_y() - offset
}

/// Smooth-scrolls the page so `heading` sits `offset` px below the top edge.
pub fn scroll_to_heading<V: Viewport>(
    page: &V,
    heading: &V::Node,
    offset: f64,
) -> Result<ScrollRequest, DomError> {
    let request = ScrollRequest::smooth(heading_target_top(page, heading, offset));
    page.scroll_to(request)?;
    Ok(request)
}
