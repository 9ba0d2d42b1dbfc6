use crate::config::BOTTOM_MARGIN_PERCENT;
use serde::{Deserialize, Serialize};

/// How the viewport moves to a scroll target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Auto,
}

/// A request to move the viewport to an absolute document position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

impl ScrollRequest {
    pub fn smooth(top: f64) -> Self {
        Self {
            top,
            behavior: ScrollBehavior::Smooth,
        }
    }
}

/// The horizontal band of the viewport in which a heading counts as "in view".
///
/// The band starts `top_offset` px below the top edge and ends at
/// `100 - BOTTOM_MARGIN_PERCENT` percent of the viewport height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationBand {
    pub top_offset: f64,
}

impl ObservationBand {
    pub fn new(top_offset: f64) -> Self {
        Self { top_offset }
    }

    /// Root margin in the `top right bottom left` form intersection observers take.
    pub fn root_margin(&self) -> String {
        format!("-{}px 0px -{}% 0px", self.top_offset, BOTTOM_MARGIN_PERCENT)
    }

    /// Any non-zero overlap counts.
    pub fn threshold(&self) -> f64 {
        0.0
    }

    /// Lower edge of the band, in viewport coordinates.
    pub fn bottom_edge(&self, viewport_height: f64) -> f64 {
        viewport_height * f64::from(100 - BOTTOM_MARGIN_PERCENT) / 100.0
    }

    /// Whether a box spanning `top..=bottom` (viewport coordinates) touches the band.
    pub fn intersects(&self, top: f64, bottom: f64, viewport_height: f64) -> bool {
        bottom >= self.top_offset && top <= self.bottom_edge(viewport_height)
    }
}
