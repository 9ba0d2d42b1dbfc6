pub mod config;
pub mod geometry;
pub mod ids;
pub mod visibility;

pub use config::{
    BOTTOM_MARGIN_PERCENT, DEFAULT_ACTIVE_CLASS, DEFAULT_HEADING_SELECTOR, DEFAULT_TOP_GAP,
    TocConfig, attrs,
};
pub use geometry::{ObservationBand, ScrollBehavior, ScrollRequest};
pub use ids::HeadingId;
pub use visibility::{ActiveSet, VisibilityChange};
