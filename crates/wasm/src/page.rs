//! The browser page behind the widget traits.

use pw_toc_traits::{ClickHandler, DomError, DomTree, Viewport, VisibilityCallback};
use pw_toc_types::{ObservationBand, ScrollRequest, VisibilityChange};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollToOptions, Window,
};

fn platform(err: JsValue) -> DomError {
    DomError::Platform(describe(&err))
}

fn describe(err: &JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}

/// Handle to the current window and document. Clones share both.
#[derive(Debug, Clone)]
pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    /// The page this module runs in.
    pub fn current() -> Result<Self, DomError> {
        let window =
            web_sys::window().ok_or_else(|| DomError::Platform("no global window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| DomError::Platform("window has no document".into()))?;
        Ok(Self { window, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn html(node: &Element) -> Result<&HtmlElement, DomError> {
        node.dyn_ref::<HtmlElement>()
            .ok_or_else(|| DomError::Platform(format!("<{}> is not an HTML element", node.tag_name())))
    }
}

impl DomTree for WebPage {
    type Node = Element;

    fn query_selector(
        &self,
        scope: Option<&Element>,
        selector: &str,
    ) -> Result<Option<Element>, DomError> {
        let found = match scope {
            Some(scope) => scope.query_selector(selector),
            None => self.document.query_selector(selector),
        };
        found.map_err(|e| DomError::InvalidSelector(format!("{}: {}", selector, describe(&e))))
    }

    fn query_selector_all(
        &self,
        scope: Option<&Element>,
        selector: &str,
    ) -> Result<Vec<Element>, DomError> {
        let list = match scope {
            Some(scope) => scope.query_selector_all(selector),
            None => self.document.query_selector_all(selector),
        }
        .map_err(|e| DomError::InvalidSelector(format!("{}: {}", selector, describe(&e))))?;

        Ok((0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn has_attribute(&self, node: &Element, name: &str) -> bool {
        node.has_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) -> Result<(), DomError> {
        node.set_attribute(name, value).map_err(platform)
    }

    fn remove_attribute(&self, node: &Element, name: &str) -> Result<(), DomError> {
        node.remove_attribute(name).map_err(platform)
    }

    fn text(&self, node: &Element) -> String {
        match node.dyn_ref::<HtmlElement>() {
            Some(html) => html.inner_text(),
            None => node.text_content().unwrap_or_default(),
        }
    }

    fn set_text_content(&self, node: &Element, text: &str) -> Result<(), DomError> {
        node.set_text_content(Some(text));
        Ok(())
    }

    fn deep_clone(&self, node: &Element) -> Result<Element, DomError> {
        node.clone_node_with_deep(true)
            .map_err(platform)?
            .dyn_into::<Element>()
            .map_err(|_| DomError::Platform("clone is not an element".into()))
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<(), DomError> {
        parent.append_child(child).map(|_| ()).map_err(platform)
    }

    fn hide(&self, node: &Element) -> Result<(), DomError> {
        Self::html(node)?
            .style()
            .set_property("display", "none")
            .map_err(platform)
    }

    fn set_class(&self, node: &Element, class: &str, present: bool) -> Result<(), DomError> {
        node.class_list()
            .toggle_with_force(class, present)
            .map(|_| ())
            .map_err(platform)
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn listen_click(&self, node: &Element, handler: ClickHandler) -> Result<(), DomError> {
        let closure = Closure::wrap(Box::new(move |event: Event| {
            event.prevent_default();
            handler();
        }) as Box<dyn FnMut(Event)>);
        node.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(platform)?;
        // Rows live as long as the page.
        closure.forget();
        Ok(())
    }
}

impl Viewport for WebPage {
    fn bounding_top(&self, node: &Element) -> f64 {
        node.get_bounding_client_rect().top()
    }

    fn offset_height(&self, node: &Element) -> f64 {
        match node.dyn_ref::<HtmlElement>() {
            Some(html) => f64::from(html.offset_height()),
            None => node.get_bounding_client_rect().height(),
        }
    }

    fn scroll_y(&self) -> f64 {
        self.window.page_y_offset().unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_to(&self, request: ScrollRequest) -> Result<(), DomError> {
        let options = ScrollToOptions::new();
        options.set_top(request.top);
        options.set_behavior(match request.behavior {
            pw_toc_types::ScrollBehavior::Smooth => ScrollBehavior::Smooth,
            pw_toc_types::ScrollBehavior::Auto => ScrollBehavior::Auto,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
        Ok(())
    }

    fn observe_visibility(
        &self,
        targets: &[Element],
        band: ObservationBand,
        callback: VisibilityCallback<Element>,
    ) -> Result<(), DomError> {
        let mut callback = callback;
        let on_change = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let batch = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| VisibilityChange::new(entry.target(), entry.is_intersecting()))
                    .collect();
                callback(batch);
            },
        )
            as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_root_margin(&band.root_margin());
        options.set_threshold(&JsValue::from_f64(band.threshold()));

        let observer =
            IntersectionObserver::new_with_options(on_change.as_ref().unchecked_ref(), &options)
                .map_err(platform)?;
        for target in targets {
            observer.observe(target);
        }
        // The observer runs until the page unloads.
        on_change.forget();
        Ok(())
    }
}
