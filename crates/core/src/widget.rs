//! One TOC instance, from wrapper attributes to a live scroll spy.

use crate::config::resolve_config;
use crate::error::TocError;
use crate::render::{self, Structure, TocEntry};
use crate::scroll::{scroll_offset, scroll_to_heading};
use crate::visibility::VisibilityTracker;
use pw_toc_traits::{ClickHandler, Diagnostics, NoopDiagnostics, Viewport};
use pw_toc_types::{ActiveSet, ObservationBand, TocConfig, attrs};
use std::rc::Rc;

/// A rendered, observing TOC instance.
pub struct TocWidget<P: Viewport> {
    wrapper: P::Node,
    config: TocConfig,
    structure: Structure<P::Node>,
    entries: Vec<TocEntry<P::Node>>,
    band: ObservationBand,
    tracker: Rc<VisibilityTracker<P::Node>>,
}

impl<P> TocWidget<P>
where
    P: Viewport + Clone + 'static,
{
    /// Initializes the instance rooted at `wrapper`.
    ///
    /// Messages go to `sink` when the wrapper carries the debug marker and
    /// nowhere otherwise. A failure is reported once at its severity and
    /// returned; the page is left as it was unless rows were already being
    /// rendered. Once rows are rendered the wrapper is marked with
    /// [`attrs::MOUNTED`] and later mounts of it fail with
    /// [`TocError::AlreadyMounted`].
    pub fn mount(
        page: &P,
        wrapper: &P::Node,
        sink: Rc<dyn Diagnostics>,
    ) -> Result<Self, TocError> {
        let config = resolve_config(page, wrapper);
        let diagnostics: Rc<dyn Diagnostics> = if config.debug {
            sink
        } else {
            Rc::new(NoopDiagnostics)
        };

        Self::build(page, wrapper, config, Rc::clone(&diagnostics)).map_err(|e| {
            diagnostics.emit(e.severity(), &e.to_string());
            e
        })
    }

    fn build(
        page: &P,
        wrapper: &P::Node,
        config: TocConfig,
        diagnostics: Rc<dyn Diagnostics>,
    ) -> Result<Self, TocError> {
        if page.has_attribute(wrapper, attrs::MOUNTED) {
            return Err(TocError::AlreadyMounted);
        }
        diagnostics.info("TOC initialized");

        let structure = render::locate_structure(page, wrapper)?;

        diagnostics.info(&format!("Using heading selector: {}", config.heading_selector));
        if let Some(selector) = &config.sticky_nav_selector {
            diagnostics.info(&format!("Sticky nav selector: {}", selector));
        }

        let headings =
            render::collect_headings(page, &structure.content, &config.heading_selector)?;

        let on_click = {
            let page = page.clone();
            let sticky = config.sticky_nav_selector.clone();
            let diagnostics = Rc::clone(&diagnostics);
            move |heading: &P::Node| -> ClickHandler {
                let page = page.clone();
                let heading = heading.clone();
                let sticky = sticky.clone();
                let diagnostics = Rc::clone(&diagnostics);
                Box::new(move || {
                    let offset = scroll_offset(&page, sticky.as_deref(), &*diagnostics);
                    if let Err(e) = scroll_to_heading(&page, &heading, offset) {
                        diagnostics.error(&format!("Failed to scroll to heading: {}", e));
                    }
                })
            }
        };
        let entries =
            render::render_items(page, &structure, &headings, &*diagnostics, &on_click)?;
        page.set_attribute(wrapper, attrs::MOUNTED, "true")?;

        let offset = scroll_offset(page, config.sticky_nav_selector.as_deref(), &*diagnostics);
        let band = ObservationBand::new(offset);
        let tracker = Rc::new(VisibilityTracker::new(&entries, config.active_class.clone()));
        tracker.attach(page, band, Rc::clone(&diagnostics))?;

        diagnostics.info("Scroll spy initialized");

        Ok(Self {
            wrapper: wrapper.clone(),
            config,
            structure,
            entries,
            band,
            tracker,
        })
    }

    pub fn wrapper(&self) -> &P::Node {
        &self.wrapper
    }

    pub fn config(&self) -> &TocConfig {
        &self.config
    }

    pub fn structure(&self) -> &Structure<P::Node> {
        &self.structure
    }

    /// Heading/row pairs in document order.
    pub fn entries(&self) -> &[TocEntry<P::Node>] {
        &self.entries
    }

    /// The band headings are observed against, fixed at mount time.
    pub fn band(&self) -> ObservationBand {
        self.band
    }

    pub fn active(&self) -> ActiveSet {
        self.tracker.active()
    }
}

/// Mounts every wrapper on the page, in document order.
///
/// Instances are independent: each resolves its own config, and one
/// failing leaves the others untouched.
pub fn mount_all<P>(page: &P, sink: Rc<dyn Diagnostics>) -> Vec<Result<TocWidget<P>, TocError>>
where
    P: Viewport + Clone + 'static,
{
    let wrappers = match page.query_selector_all(None, &attrs::selector(attrs::WRAPPER)) {
        Ok(wrappers) => wrappers,
        Err(e) => {
            log::error!("Failed to enumerate TOC wrappers: {}", e);
            return Vec::new();
        }
    };
    log::debug!("Found {} TOC wrapper(s)", wrappers.len());

    wrappers
        .iter()
        .map(|wrapper| TocWidget::mount(page, wrapper, Rc::clone(&sink)))
        .collect()
}
