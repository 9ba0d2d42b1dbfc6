//! # pw-toc-core
//!
//! Platform-agnostic logic of the table-of-contents widget:
//! - **config**: reads a wrapper's attributes into a [`TocConfig`]
//! - **ids**: heading slugs and generated identifiers
//! - **render**: locates the wrapper's structure and renders one row per heading
//! - **scroll**: scroll offset and click-to-scroll targeting
//! - **visibility**: active-row tracking from visibility batches
//! - **widget**: wires the above together for one wrapper
//!
//! Nothing here touches a real rendering surface. All page access goes
//! through the [`DomTree`] and [`Viewport`] traits.

pub use pw_toc_traits as traits;
pub use pw_toc_types as types;

pub mod config;
pub mod error;
pub mod ids;
pub mod render;
pub mod scroll;
pub mod visibility;
pub mod widget;

pub use config::resolve_config;
pub use error::TocError;
pub use ids::{generated_heading_id, slugify};
pub use render::{Structure, TocEntry};
pub use scroll::{scroll_offset, scroll_to_heading};
pub use visibility::{VisibilityTracker, apply_visibility_batch};
pub use widget::{TocWidget, mount_all};

pub use traits::{Diagnostics, DomError, DomTree, Viewport};
pub use types::{ActiveSet, HeadingId, ObservationBand, TocConfig, VisibilityChange};
