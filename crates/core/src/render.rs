//! Heading collection and row rendering.

use crate::error::TocError;
use crate::ids::generated_heading_id;
use pw_toc_traits::{ClickHandler, Diagnostics, DomError, DomTree};
use pw_toc_types::{HeadingId, attrs};

/// Placeholder target set on every rendered row.
const ROW_HREF: &str = "#";

/// The required pieces of one wrapper.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure<N> {
    pub content: N,
    pub list: N,
    pub template: N,
}

/// A heading and the row rendered for it.
#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry<N> {
    pub heading: N,
    pub item: N,
    pub id: HeadingId,
    pub text: String,
}

/// Finds the content region, list container and item template inside `wrapper`.
///
/// Checked in that order; the first one missing is reported.
pub fn locate_structure<D: DomTree>(
    dom: &D,
    wrapper: &D::Node,
) -> Result<Structure<D::Node>, TocError> {
    let find = |role: &str| dom.query_selector(Some(wrapper), &attrs::selector(role));

    let content = find(attrs::CONTENT)?.ok_or(TocError::MissingContent)?;
    let list = find(attrs::LIST)?.ok_or(TocError::MissingList)?;
    let template = find(attrs::ITEM)?.ok_or(TocError::MissingItemTemplate)?;

    Ok(Structure {
        content,
        list,
        template,
    })
}

/// Headings inside `content` matching `selector`, in document order.
pub fn collect_headings<D: DomTree>(
    dom: &D,
    content: &D::Node,
    selector: &str,
) -> Result<Vec<D::Node>, TocError> {
    let headings = dom
        .query_selector_all(Some(content), selector)
        .map_err(|e| match e {
            DomError::InvalidSelector(message) => TocError::InvalidSelector {
                selector: selector.to_string(),
                message,
            },
            other => TocError::Dom(other),
        })?;

    if headings.is_empty() {
        return Err(TocError::NoHeadings {
            selector: selector.to_string(),
        });
    }
    Ok(headings)
}

/// Returns the heading's identifier, assigning a generated one if it has none.
pub fn ensure_heading_id<D: DomTree>(
    dom: &D,
    heading: &D::Node,
    text: &str,
    index: usize,
    diagnostics: &dyn Diagnostics,
) -> Result<HeadingId, DomError> {
    if let Some(existing) = dom.attribute(heading, "id").filter(|id| !id.is_empty()) {
        return Ok(HeadingId::from(existing));
    }

    let id = generated_heading_id(text, index);
    dom.set_attribute(heading, "id", id.as_str())?;
    diagnostics.info(&format!("Generated ID for heading: {}", id));
    Ok(id)
}

/// Renders one row per heading into the list container.
///
/// The template is hidden first; each row is a visible deep clone of it
/// with the heading's text in its text slot and a click handler built by
/// `on_click` for that heading. Rows are appended in heading order.
pub fn render_items<D: DomTree>(
    dom: &D,
    structure: &Structure<D::Node>,
    headings: &[D::Node],
    diagnostics: &dyn Diagnostics,
    on_click: &dyn Fn(&D::Node) -> ClickHandler,
) -> Result<Vec<TocEntry<D::Node>>, TocError> {
    dom.hide(&structure.template)?;

    let text_selector = attrs::selector(attrs::TEXT);
    let mut entries = Vec::with_capacity(headings.len());

    for (index, heading) in headings.iter().enumerate() {
        let text = dom.text(heading);
        let id = ensure_heading_id(dom, heading, &text, index, diagnostics)?;

        let item = dom.deep_clone(&structure.template)?;
        dom.remove_attribute(&item, "style")?;
        dom.set_attribute(&item, "href", ROW_HREF)?;

        match dom.query_selector(Some(&item), &text_selector)? {
            Some(slot) => dom.set_text_content(&slot, &text)?,
            None => diagnostics.warn("Missing [data-pw-toc=\"text\"] inside [data-pw-toc=\"item\"]"),
        }

        dom.listen_click(&item, on_click(heading))?;
        dom.append_child(&structure.list, &item)?;

        entries.push(TocEntry {
            heading: heading.clone(),
            item,
            id,
            text,
        });
    }

    Ok(entries)
}
