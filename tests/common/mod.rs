#![allow(dead_code, unused_macros)]

pub mod fixtures;
#[macro_use]
pub mod toc_assertions;

pub use fixtures::{WrapperFixture, page_with};

use pw_toc::{
    DomTree, InMemoryPage, NodeId, RecordingDiagnostics, TocError, TocWidget, attrs, mount_all,
};
use std::rc::Rc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A page together with everything its instances reported.
pub struct Mounted {
    pub page: InMemoryPage,
    pub diagnostics: Rc<RecordingDiagnostics>,
    pub results: Vec<Result<TocWidget<InMemoryPage>, TocError>>,
}

impl Mounted {
    /// The first instance, which must have mounted.
    pub fn widget(&self) -> Result<&TocWidget<InMemoryPage>, Box<dyn std::error::Error>> {
        match self.results.first() {
            Some(Ok(widget)) => Ok(widget),
            Some(Err(e)) => Err(format!("first instance failed: {}", e).into()),
            None => Err("no wrapper on the page".into()),
        }
    }

    /// The first instance's error, which must have failed.
    pub fn error(&self) -> Result<&TocError, Box<dyn std::error::Error>> {
        match self.results.first() {
            Some(Err(e)) => Ok(e),
            Some(Ok(_)) => Err("first instance mounted".into()),
            None => Err("no wrapper on the page".into()),
        }
    }

    pub fn node(&self, id: &str) -> Result<NodeId, Box<dyn std::error::Error>> {
        self.page
            .element_by_id(id)
            .ok_or_else(|| format!("no element #{}", id).into())
    }

    /// The list container of the `index`-th wrapper.
    pub fn list(&self, index: usize) -> Result<NodeId, Box<dyn std::error::Error>> {
        let lists = self
            .page
            .query_selector_all(None, &attrs::selector(attrs::LIST))?;
        lists
            .get(index)
            .copied()
            .ok_or_else(|| format!("no list #{}", index).into())
    }

    /// Rendered rows of the `index`-th wrapper, template excluded.
    pub fn rows(&self, index: usize) -> Result<Vec<NodeId>, Box<dyn std::error::Error>> {
        let list = self.list(index)?;
        Ok(self.page.child_elements(list).into_iter().skip(1).collect())
    }

    pub fn row_texts(&self, index: usize) -> Result<Vec<String>, Box<dyn std::error::Error>> {
        Ok(self
            .rows(index)?
            .iter()
            .map(|row| self.page.text(row))
            .collect())
    }
}

/// Parses `markup` and mounts every wrapper on it.
pub fn mount_markup(markup: &str) -> Result<Mounted, Box<dyn std::error::Error>> {
    init_logger();
    let page = InMemoryPage::from_markup(markup)?;
    let diagnostics = Rc::new(RecordingDiagnostics::new());
    let results = mount_all(&page, diagnostics.clone());
    Ok(Mounted {
        page,
        diagnostics,
        results,
    })
}

/// Mounts a single-wrapper page built from `fixture`.
pub fn mount_fixture(fixture: &WrapperFixture) -> Result<Mounted, Box<dyn std::error::Error>> {
    mount_markup(&fixture.page_markup())
}

/// Stacks the headings of `widget` down the page, `spacing` apart from `start`.
pub fn lay_out_headings(
    page: &InMemoryPage,
    widget: &TocWidget<InMemoryPage>,
    start: f64,
    spacing: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    for (index, entry) in widget.entries().iter().enumerate() {
        page.set_layout(entry.heading, start + spacing * index as f64, 32.0)?;
    }
    Ok(())
}
