//! Platform seams for the TOC widget.
//!
//! The widget logic never touches a real rendering surface. It talks to a
//! page through these traits, which the browser binding implements over
//! `web-sys` and [`InMemoryPage`] implements over a small arena tree.

pub mod diagnostics;
pub mod dom;
pub mod memory;

pub use diagnostics::{
    DIAGNOSTIC_TAG, DiagnosticRecord, Diagnostics, LogDiagnostics, NoopDiagnostics,
    RecordingDiagnostics,
};
pub use dom::{ClickHandler, DomError, DomTree, Viewport, VisibilityCallback};
pub use memory::{InMemoryPage, NodeId};
