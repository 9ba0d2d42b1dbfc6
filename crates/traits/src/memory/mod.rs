//! An in-memory page.
//!
//! Stands in for a browser document wherever there is none: unit tests,
//! native tooling, headless checks. The tree lives in an arena addressed by
//! [`NodeId`]; geometry is whatever the caller assigns with
//! [`InMemoryPage::set_layout`]; scroll requests jump immediately and are
//! recorded; visibility is synthesized from geometry on
//! [`InMemoryPage::refresh_visibility`].
//!
//! Selector queries go through `scraper`: the tree containing the scope is
//! written out as HTML with every element tagged by its [`NodeId`], parsed,
//! and matched, so anything a browser accepts is accepted here too.

use crate::dom::{ClickHandler, DomError, DomTree, Viewport, VisibilityCallback};
use pw_toc_types::{ObservationBand, ScrollRequest, VisibilityChange};
use scraper::{Html, Selector};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;

/// Carries the arena index of each element through the selector engine.
const NODE_ATTR: &str = "data-pw-toc-node";

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Handle to a node of an [`InMemoryPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Document,
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    top: f64,
    height: f64,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            top: 0.0,
            height: 0.0,
        }
    }
}

struct ElementRef<'a> {
    tag: &'a str,
    attrs: &'a [(String, String)],
}

impl ElementRef<'_> {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Default)]
struct Tree {
    nodes: Vec<NodeData>,
}

impl Tree {
    fn get(&self, id: NodeId) -> Result<&NodeData, DomError> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| DomError::Detached(format!("node #{}", id.0)))
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut NodeData, DomError> {
        self.nodes
            .get_mut(id.0)
            .ok_or_else(|| DomError::Detached(format!("node #{}", id.0)))
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(NodeData::new(kind));
        NodeId(self.nodes.len() - 1)
    }

    fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Element { tag, attrs } => Some(ElementRef { tag, attrs }),
            _ => None,
        }
    }

    fn attrs_mut(&mut self, id: NodeId) -> Result<&mut Vec<(String, String)>, DomError> {
        match &mut self.get_mut(id)?.kind {
            NodeKind::Element { attrs, .. } => Ok(attrs),
            _ => Err(DomError::Platform(format!("node #{} is not an element", id.0))),
        }
    }

    fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.element(id)?.attr(name).map(str::to_string)
    }

    fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let attrs = self.attrs_mut(id)?;
        match attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => attrs.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn detach(&mut self, child: NodeId) -> Result<(), DomError> {
        if let Some(parent) = self.get(child)?.parent {
            self.get_mut(parent)?.children.retain(|c| *c != child);
            self.get_mut(child)?.parent = None;
        }
        Ok(())
    }

    fn append(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::Platform(format!(
                "cannot append node #{} inside itself",
                child.0
            )));
        }
        self.detach(child)?;
        self.get_mut(parent)?.children.push(child);
        self.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.nodes.get(id.0).and_then(|n| n.parent);
        }
        false
    }

    /// Descendants of `root` in document order, `root` excluded.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match self.nodes.get(root.0) {
            Some(node) => node.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(node) = self.nodes.get(id.0) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Topmost ancestor of `id`: the document node, or the root of a detached subtree.
    fn root_of(&self, id: NodeId) -> NodeId {
        let mut root = id;
        while let Some(parent) = self.nodes.get(root.0).and_then(|n| n.parent) {
            root = parent;
        }
        root
    }

    /// Writes `id` and its subtree as HTML, tagging each element with [`NODE_ATTR`].
    fn write_markup(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(id.0) else {
            return;
        };
        match &node.kind {
            NodeKind::Document => {
                for child in &node.children {
                    self.write_markup(*child, out);
                }
            }
            NodeKind::Text(text) => out.push_str(&escape_text(text)),
            NodeKind::Element { tag, attrs } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs.iter().filter(|(n, _)| n != NODE_ATTR) {
                    out.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
                }
                out.push_str(&format!(" {}=\"{}\">", NODE_ATTR, id.0));
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for child in &node.children {
                    self.write_markup(*child, out);
                }
                out.push_str(&format!("</{}>", tag));
            }
        }
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(id.0) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(text) => out.push_str(text),
            _ => {
                for child in &node.children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    fn clone_subtree(&mut self, id: NodeId) -> Result<NodeId, DomError> {
        let source = self.get(id)?.clone();
        let copy = self.alloc(source.kind);
        self.get_mut(copy)?.height = source.height;
        for child in source.children {
            let child_copy = self.clone_subtree(child)?;
            self.append(copy, child_copy)?;
        }
        Ok(copy)
    }
}

#[derive(Debug)]
struct ViewportState {
    scroll_y: f64,
    height: f64,
    requests: Vec<ScrollRequest>,
}

struct Observer {
    targets: Vec<NodeId>,
    band: ObservationBand,
    last: Vec<Option<bool>>,
    callback: VisibilityCallback<NodeId>,
}

struct Inner {
    tree: RefCell<Tree>,
    viewport: RefCell<ViewportState>,
    handlers: RefCell<HashMap<NodeId, Vec<Rc<dyn Fn()>>>>,
    observers: RefCell<Vec<Rc<RefCell<Observer>>>>,
}

/// An in-memory document with a simulated viewport.
///
/// Cloning yields another handle to the same page.
#[derive(Clone)]
pub struct InMemoryPage {
    inner: Rc<Inner>,
}

impl fmt::Debug for InMemoryPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryPage")
            .field("nodes", &self.inner.tree.borrow().nodes.len())
            .field("viewport", &*self.inner.viewport.borrow())
            .field("observers", &self.inner.observers.borrow().len())
            .finish()
    }
}

impl Default for InMemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPage {
    /// An empty document.
    pub fn new() -> Self {
        let mut tree = Tree::default();
        tree.alloc(NodeKind::Document);
        Self {
            inner: Rc::new(Inner {
                tree: RefCell::new(tree),
                viewport: RefCell::new(ViewportState {
                    scroll_y: 0.0,
                    height: DEFAULT_VIEWPORT_HEIGHT,
                    requests: Vec::new(),
                }),
                handlers: RefCell::new(HashMap::new()),
                observers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Builds a page from well-formed markup (XHTML-style: every element closed).
    ///
    /// # Errors
    ///
    /// Returns `DomError::Markup` if the markup does not parse.
    pub fn from_markup(source: &str) -> Result<Self, DomError> {
        let parsed =
            roxmltree::Document::parse(source).map_err(|e| DomError::Markup(e.to_string()))?;
        let page = Self::new();
        {
            let mut tree = page.inner.tree.borrow_mut();
            import(&mut tree, parsed.root_element(), page.document())?;
        }
        Ok(page)
    }

    /// The document node.
    pub fn document(&self) -> NodeId {
        NodeId(0)
    }

    /// A new detached element.
    pub fn create_element(&self, tag: &str) -> NodeId {
        self.inner.tree.borrow_mut().alloc(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
        })
    }

    /// A new detached text node.
    pub fn create_text(&self, text: &str) -> NodeId {
        self.inner
            .tree
            .borrow_mut()
            .alloc(NodeKind::Text(text.to_string()))
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let tree = self.inner.tree.borrow();
        tree.descendants(self.document())
            .into_iter()
            .find(|n| tree.attribute(*n, "id").as_deref() == Some(id))
    }

    pub fn tag_name(&self, node: NodeId) -> Option<String> {
        self.inner
            .tree
            .borrow()
            .element(node)
            .map(|el| el.tag.to_string())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.inner.tree.borrow().nodes.get(node.0)?.parent
    }

    /// Element children of `node`, in order.
    pub fn child_elements(&self, node: NodeId) -> Vec<NodeId> {
        let tree = self.inner.tree.borrow();
        tree.nodes
            .get(node.0)
            .map(|n| {
                n.children
                    .iter()
                    .copied()
                    .filter(|c| tree.element(*c).is_some())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Places `node` at document position `top` with the given height.
    pub fn set_layout(&self, node: NodeId, top: f64, height: f64) -> Result<(), DomError> {
        let mut tree = self.inner.tree.borrow_mut();
        let data = tree.get_mut(node)?;
        data.top = top;
        data.height = height;
        Ok(())
    }

    pub fn set_scroll_y(&self, y: f64) {
        self.inner.viewport.borrow_mut().scroll_y = y;
    }

    pub fn set_viewport_height(&self, height: f64) {
        self.inner.viewport.borrow_mut().height = height;
    }

    /// Every scroll request received so far, oldest first.
    pub fn scroll_requests(&self) -> Vec<ScrollRequest> {
        self.inner.viewport.borrow().requests.clone()
    }

    /// Runs the click handlers of `node`. Returns whether any were registered.
    pub fn click(&self, node: NodeId) -> bool {
        let handlers = self
            .inner
            .handlers
            .borrow()
            .get(&node)
            .cloned()
            .unwrap_or_default();
        for handler in &handlers {
            handler();
        }
        !handlers.is_empty()
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }

    /// Targets and band of every attached observer.
    pub fn observers(&self) -> Vec<(Vec<NodeId>, ObservationBand)> {
        self.inner
            .observers
            .borrow()
            .iter()
            .map(|o| {
                let o = o.borrow();
                (o.targets.clone(), o.band)
            })
            .collect()
    }

    /// Hands `batch` to every observer, filtered to the targets it watches.
    pub fn deliver_visibility(&self, batch: &[VisibilityChange<NodeId>]) {
        for observer in self.observer_handles() {
            let mut observer = observer.borrow_mut();
            let entries: Vec<_> = batch
                .iter()
                .filter(|c| observer.targets.contains(&c.target))
                .cloned()
                .collect();
            if !entries.is_empty() {
                (observer.callback)(entries);
            }
        }
    }

    /// Recomputes visibility from geometry and notifies observers of changes.
    ///
    /// The first refresh after an observer attaches reports every target.
    pub fn refresh_visibility(&self) {
        for observer in self.observer_handles() {
            let mut observer = observer.borrow_mut();
            let changes = {
                let tree = self.inner.tree.borrow();
                let viewport = self.inner.viewport.borrow();
                let observer = &mut *observer;
                let mut changes = Vec::new();
                for (target, last) in observer.targets.iter().zip(observer.last.iter_mut()) {
                    let Ok(node) = tree.get(*target) else {
                        continue;
                    };
                    let top = node.top - viewport.scroll_y;
                    let now = observer
                        .band
                        .intersects(top, top + node.height, viewport.height);
                    if *last != Some(now) {
                        *last = Some(now);
                        changes.push(VisibilityChange::new(*target, now));
                    }
                }
                changes
            };
            if !changes.is_empty() {
                (observer.callback)(changes);
            }
        }
    }

    fn observer_handles(&self) -> Vec<Rc<RefCell<Observer>>> {
        self.inner.observers.borrow().clone()
    }

    fn with_tree<T>(&self, f: impl FnOnce(&mut Tree) -> Result<T, DomError>) -> Result<T, DomError> {
        f(&mut self.inner.tree.borrow_mut())
    }
}

fn import(tree: &mut Tree, node: roxmltree::Node<'_, '_>, parent: NodeId) -> Result<(), DomError> {
    if node.is_element() {
        let attrs = node
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect();
        let id = tree.alloc(NodeKind::Element {
            tag: node.tag_name().name().to_ascii_lowercase(),
            attrs,
        });
        tree.append(parent, id)?;
        for child in node.children() {
            import(tree, child, id)?;
        }
    } else if let Some(text) = node.text().filter(|_| node.is_text()) {
        let id = tree.alloc(NodeKind::Text(text.to_string()));
        tree.append(parent, id)?;
    }
    Ok(())
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

/// Collapses whitespace runs the way rendered text does.
fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn upsert_display_none(style: Option<String>) -> String {
    let mut declarations: Vec<String> = style
        .unwrap_or_default()
        .split(';')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .filter(|d| {
            d.split(':')
                .next()
                .is_some_and(|prop| !prop.trim().eq_ignore_ascii_case("display"))
        })
        .map(str::to_string)
        .collect();
    declarations.push("display: none".to_string());
    format!("{};", declarations.join("; "))
}

impl DomTree for InMemoryPage {
    type Node = NodeId;

    fn query_selector(
        &self,
        scope: Option<&NodeId>,
        selector: &str,
    ) -> Result<Option<NodeId>, DomError> {
        Ok(self.query_selector_all(scope, selector)?.into_iter().next())
    }

    fn query_selector_all(
        &self,
        scope: Option<&NodeId>,
        selector: &str,
    ) -> Result<Vec<NodeId>, DomError> {
        let compiled = Selector::parse(selector)
            .map_err(|e| DomError::InvalidSelector(format!("{}: {}", selector, e)))?;

        let tree = self.inner.tree.borrow();
        let scope = scope.copied();
        let root = match scope {
            Some(scope) => {
                tree.get(scope)?;
                tree.root_of(scope)
            }
            None => self.document(),
        };

        let mut markup = String::new();
        tree.write_markup(root, &mut markup);
        let parsed = Html::parse_document(&markup);

        // Like a browser, the whole selector may match outside the scope;
        // only the matched element has to lie below it.
        Ok(parsed
            .select(&compiled)
            .filter_map(|el| el.value().attr(NODE_ATTR)?.parse::<usize>().ok().map(NodeId))
            .filter(|n| match scope {
                Some(scope) => *n != scope && tree.is_inclusive_ancestor(scope, *n),
                None => true,
            })
            .collect())
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.inner.tree.borrow().attribute(*node, name)
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.with_tree(|tree| tree.set_attribute(*node, name, value))
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) -> Result<(), DomError> {
        self.with_tree(|tree| {
            tree.attrs_mut(*node)?.retain(|(n, _)| n != name);
            Ok(())
        })
    }

    fn text(&self, node: &NodeId) -> String {
        let mut raw = String::new();
        self.inner.tree.borrow().collect_text(*node, &mut raw);
        collapse_whitespace(&raw)
    }

    fn set_text_content(&self, node: &NodeId, text: &str) -> Result<(), DomError> {
        self.with_tree(|tree| {
            let children = std::mem::take(&mut tree.get_mut(*node)?.children);
            for child in children {
                tree.get_mut(child)?.parent = None;
            }
            let text_node = tree.alloc(NodeKind::Text(text.to_string()));
            tree.append(*node, text_node)
        })
    }

    fn deep_clone(&self, node: &NodeId) -> Result<NodeId, DomError> {
        self.with_tree(|tree| tree.clone_subtree(*node))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        self.with_tree(|tree| tree.append(*parent, *child))
    }

    fn hide(&self, node: &NodeId) -> Result<(), DomError> {
        self.with_tree(|tree| {
            let style = upsert_display_none(tree.attribute(*node, "style"));
            tree.set_attribute(*node, "style", &style)
        })
    }

    fn set_class(&self, node: &NodeId, class: &str, present: bool) -> Result<(), DomError> {
        self.with_tree(|tree| {
            let current = tree.attribute(*node, "class").unwrap_or_default();
            let mut classes: Vec<&str> = current
                .split_ascii_whitespace()
                .filter(|c| *c != class)
                .collect();
            if present {
                classes.push(class);
            }
            let updated = classes.join(" ");
            tree.set_attribute(*node, "class", &updated)
        })
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.attribute(node, "class")
            .is_some_and(|c| c.split_ascii_whitespace().any(|x| x == class))
    }

    fn listen_click(&self, node: &NodeId, handler: ClickHandler) -> Result<(), DomError> {
        self.inner.tree.borrow().get(*node)?;
        self.inner
            .handlers
            .borrow_mut()
            .entry(*node)
            .or_default()
            .push(Rc::from(handler));
        Ok(())
    }
}

impl Viewport for InMemoryPage {
    fn bounding_top(&self, node: &NodeId) -> f64 {
        let top = self
            .inner
            .tree
            .borrow()
            .nodes
            .get(node.0)
            .map(|n| n.top)
            .unwrap_or_default();
        top - self.scroll_y()
    }

    fn offset_height(&self, node: &NodeId) -> f64 {
        self.inner
            .tree
            .borrow()
            .nodes
            .get(node.0)
            .map(|n| n.height)
            .unwrap_or_default()
    }

    fn scroll_y(&self) -> f64 {
        self.inner.viewport.borrow().scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.inner.viewport.borrow().height
    }

    fn scroll_to(&self, request: ScrollRequest) -> Result<(), DomError> {
        let mut viewport = self.inner.viewport.borrow_mut();
        viewport.requests.push(request);
        viewport.scroll_y = request.top.max(0.0);
        Ok(())
    }

    fn observe_visibility(
        &self,
        targets: &[NodeId],
        band: ObservationBand,
        callback: VisibilityCallback<NodeId>,
    ) -> Result<(), DomError> {
        {
            let tree = self.inner.tree.borrow();
            for target in targets {
                tree.get(*target)?;
            }
        }
        self.inner
            .observers
            .borrow_mut()
            .push(Rc::new(RefCell::new(Observer {
                targets: targets.to_vec(),
                band,
                last: vec![None; targets.len()],
                callback,
            })));
        Ok(())
    }
}
