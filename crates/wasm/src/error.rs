//! Error handling for the JS exports.
//!
//! Converts widget errors into JavaScript `Error` objects carrying a `code`.

use pw_toc_core::TocError;
use wasm_bindgen::prelude::*;

/// Error codes for TypeScript consumption.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// No content region inside the wrapper
    MissingContent,
    /// No list container inside the wrapper
    MissingList,
    /// No item template inside the wrapper
    MissingItemTemplate,
    /// The heading selector matched nothing
    NoHeadings,
    /// The heading selector was rejected by the browser
    InvalidSelector,
    /// The wrapper already carries a TOC
    AlreadyMounted,
    /// A DOM call failed
    Dom,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingContent => "MISSING_CONTENT",
            ErrorCode::MissingList => "MISSING_LIST",
            ErrorCode::MissingItemTemplate => "MISSING_ITEM_TEMPLATE",
            ErrorCode::NoHeadings => "NO_HEADINGS",
            ErrorCode::InvalidSelector => "INVALID_SELECTOR",
            ErrorCode::AlreadyMounted => "ALREADY_MOUNTED",
            ErrorCode::Dom => "DOM_ERROR",
        }
    }
}

/// A JavaScript-friendly error type.
///
/// Not a `wasm_bindgen` struct: it converts into a real `Error` object.
#[derive(Debug)]
pub struct TocJsError {
    code: ErrorCode,
    message: String,
}

impl TocJsError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn dom(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Dom, message)
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<TocError> for TocJsError {
    fn from(err: TocError) -> Self {
        let code = match &err {
            TocError::MissingContent => ErrorCode::MissingContent,
            TocError::MissingList => ErrorCode::MissingList,
            TocError::MissingItemTemplate => ErrorCode::MissingItemTemplate,
            TocError::NoHeadings { .. } => ErrorCode::NoHeadings,
            TocError::InvalidSelector { .. } => ErrorCode::InvalidSelector,
            TocError::AlreadyMounted => ErrorCode::AlreadyMounted,
            TocError::Dom(_) => ErrorCode::Dom,
        };
        Self::new(code, err.to_string())
    }
}

impl From<TocJsError> for JsValue {
    fn from(err: TocJsError) -> Self {
        let js_error = js_sys::Error::new(&err.message);
        js_sys::Reflect::set(
            &js_error,
            &"code".into(),
            &JsValue::from_str(err.code.as_str()),
        )
        .ok();
        js_error.into()
    }
}
