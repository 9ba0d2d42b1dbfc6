//! Failures that stop a single TOC instance from initializing.

use log::Level;
use pw_toc_traits::DomError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TocError {
    #[error("Missing [data-pw-toc=\"content\"] inside [data-pw-toc=\"wrapper\"]")]
    MissingContent,

    #[error("Missing [data-pw-toc=\"list\"] inside [data-pw-toc=\"wrapper\"]")]
    MissingList,

    #[error("Missing [data-pw-toc=\"item\"] template inside [data-pw-toc=\"list\"]")]
    MissingItemTemplate,

    #[error("No headings found using selector: {selector}")]
    NoHeadings { selector: String },

    #[error("Invalid heading selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("TOC already initialized on this wrapper")]
    AlreadyMounted,

    #[error("Page operation failed: {0}")]
    Dom(#[from] DomError),
}

impl TocError {
    /// Level at which the failure is reported.
    ///
    /// An empty content region leaves the instance inert rather than broken,
    /// and a repeated mount leaves the first instance running.
    pub fn severity(&self) -> Level {
        match self {
            TocError::NoHeadings { .. } | TocError::AlreadyMounted => Level::Warn,
            _ => Level::Error,
        }
    }

    /// Whether the page markup is missing a required piece.
    pub fn is_configuration_missing(&self) -> bool {
        matches!(
            self,
            TocError::MissingContent
                | TocError::MissingList
                | TocError::MissingItemTemplate
                | TocError::InvalidSelector { .. }
        )
    }
}
