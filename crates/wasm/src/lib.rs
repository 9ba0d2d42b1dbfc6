//! WebAssembly binding for the pw-toc table-of-contents widget.
//!
//! Loading the module is all a page needs: once the document is parsed,
//! every `[data-pw-toc="wrapper"]` element gets its list rendered and its
//! scroll spy attached. Behavior is configured through attributes on the
//! wrapper; see [`pw_toc_types::attrs`].
//!
//! ```html
//! <div data-pw-toc="wrapper" data-pw-toc-sticky-nav=".navbar">
//!   <nav data-pw-toc="list">
//!     <a data-pw-toc="item" class="toc-link"><span data-pw-toc="text"></span></a>
//!   </nav>
//!   <article data-pw-toc="content">
//!     <h2>Intro</h2>
//!     <h3>Setup</h3>
//!   </article>
//! </div>
//! <script type="module">
//!   import init from './pw_toc_wasm.js';
//!   await init();
//! </script>
//! ```
//!
//! ## Module Structure
//!
//! - [`page`] - `WebPage`, the `web-sys` implementation of the page traits
//! - [`console`] - Diagnostics written to the browser console
//! - [`error`] - Error types with JavaScript interop

mod console;
mod error;
mod page;

pub use console::ConsoleDiagnostics;
pub use error::{ErrorCode, TocJsError};
pub use page::WebPage;

use pw_toc_core::{TocWidget, mount_all, resolve_config};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;

/// Module entry point: mounts every wrapper once the document is parsed.
///
/// A module instantiated after parsing finished mounts immediately.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    #[cfg(feature = "console-logging")]
    {
        console_log::init_with_level(log::Level::Debug).ok();
    }

    let page = WebPage::current().map_err(|e| TocJsError::dom(e.to_string()))?;

    if page.document().ready_state() == "loading" {
        let handle = page.clone();
        let on_ready = Closure::once_into_js(move || mount_page(&handle));
        page.document()
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        mount_page(&page);
    }
    Ok(())
}

fn mount_page(page: &WebPage) {
    let results = mount_all(page, Rc::new(ConsoleDiagnostics));
    let mounted = results.iter().filter(|r| r.is_ok()).count();
    log::debug!("Mounted {} of {} TOC instance(s)", mounted, results.len());
}

/// Mounts a single wrapper on demand and returns the number of rendered rows.
///
/// Failures reject with an `Error` whose `code` names the cause.
#[wasm_bindgen]
pub fn mount(wrapper: Element) -> Result<usize, JsValue> {
    let page = WebPage::current().map_err(|e| TocJsError::dom(e.to_string()))?;
    let widget = TocWidget::mount(&page, &wrapper, Rc::new(ConsoleDiagnostics))
        .map_err(TocJsError::from)?;
    Ok(widget.entries().len())
}

/// The configuration a wrapper's attributes resolve to, as a plain object.
#[wasm_bindgen(js_name = resolveConfig)]
pub fn resolve_config_js(wrapper: Element) -> Result<JsValue, JsValue> {
    let page = WebPage::current().map_err(|e| TocJsError::dom(e.to_string()))?;
    let config = resolve_config(&page, &wrapper);
    serde_wasm_bindgen::to_value(&config).map_err(|e| TocJsError::dom(e.to_string()).into())
}

/// Get the version of the pw-toc-wasm library.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
