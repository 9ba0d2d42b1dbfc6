//! # pw-toc
//!
//! A table of contents for one content region of a web page, configured
//! entirely through `data-pw-toc*` attributes: one row per heading, a click
//! on a row smooth-scrolls to its heading, and the row of the heading in
//! the reading band carries an active class.
//!
//! This crate re-exports the platform-agnostic pieces:
//! - **types**: configuration, attribute names, geometry and visibility data
//! - **traits**: the page seams (`DomTree`, `Viewport`, `Diagnostics`) and `InMemoryPage`
//! - **core**: the widget itself
//!
//! The browser binding lives in `pw-toc-wasm`.
//!
//! ```
//! use pw_toc::{InMemoryPage, NoopDiagnostics, mount_all};
//! use std::rc::Rc;
//!
//! let page = InMemoryPage::from_markup(r#"
//!     <div data-pw-toc="wrapper">
//!         <div data-pw-toc="content"><h2>Intro</h2><h3>Setup</h3></div>
//!         <ul data-pw-toc="list"><li data-pw-toc="item"><span data-pw-toc="text"/></li></ul>
//!     </div>"#).unwrap();
//!
//! let widgets = mount_all(&page, Rc::new(NoopDiagnostics));
//! let widget = widgets[0].as_ref().unwrap();
//! assert_eq!(widget.entries()[0].id.as_str(), "toc-intro-0");
//! ```

pub use pw_toc_core as core;
pub use pw_toc_traits as traits;
pub use pw_toc_types as types;

pub use pw_toc_core::{
    Structure, TocEntry, TocError, TocWidget, apply_visibility_batch, generated_heading_id,
    mount_all, resolve_config, scroll_offset, scroll_to_heading, slugify,
};
pub use pw_toc_traits::{
    ClickHandler, DIAGNOSTIC_TAG, DiagnosticRecord, Diagnostics, DomError, DomTree,
    InMemoryPage, LogDiagnostics, NodeId, NoopDiagnostics, RecordingDiagnostics, Viewport,
    VisibilityCallback,
};
pub use pw_toc_types::{
    ActiveSet, DEFAULT_ACTIVE_CLASS, DEFAULT_HEADING_SELECTOR, DEFAULT_TOP_GAP, HeadingId,
    ObservationBand, ScrollBehavior, ScrollRequest, TocConfig, VisibilityChange, attrs,
};
