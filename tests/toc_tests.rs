#[macro_use]
mod common;

use common::{TestResult, WrapperFixture, mount_fixture};
use log::Level;
use pw_toc::{DomTree, ScrollBehavior, TocError};

#[test]
fn test_generated_ids_follow_slug_and_position() -> TestResult {
    let mounted = mount_fixture(&WrapperFixture::new().debug().h2("Intro").h3("Setup"))?;
    let widget = mounted.widget()?;

    let ids: Vec<_> = widget.entries().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["toc-intro-0", "toc-setup-1"]);

    let first = widget.entries()[0].heading;
    assert_eq!(
        mounted.page.attribute(&first, "id").as_deref(),
        Some("toc-intro-0")
    );
    assert!(mounted
        .diagnostics
        .contains(Level::Info, "Generated ID for heading: toc-setup-1"));
    Ok(())
}

#[test]
fn test_existing_ids_are_kept() -> TestResult {
    let mounted = mount_fixture(
        &WrapperFixture::new()
            .debug()
            .heading(r#"<h2 id="getting-started">Getting Started</h2>"#)
            .heading(r#"<h2 id="">Why Rust?</h2>"#),
    )?;
    let widget = mounted.widget()?;

    let ids: Vec<_> = widget.entries().iter().map(|e| e.id.as_str()).collect();
    // An empty id counts as none.
    assert_eq!(ids, vec!["getting-started", "toc-why-rust--1"]);
    assert_eq!(mounted.diagnostics.messages_at(Level::Info).len(), 4);
    Ok(())
}

#[test]
fn test_rows_match_headings_in_order() -> TestResult {
    let mounted = mount_fixture(
        &WrapperFixture::new()
            .h2("Intro")
            .h3("Setup")
            .heading("<h4>Not Listed</h4>")
            .h2("Usage"),
    )?;
    let widget = mounted.widget()?;

    assert_eq!(widget.entries().len(), 3);
    assert_row_texts!(mounted, 0, ["Intro", "Setup", "Usage"]);

    for (entry, row) in widget.entries().iter().zip(mounted.rows(0)?) {
        assert_eq!(entry.item, row);
    }
    Ok(())
}

#[test]
fn test_template_hidden_and_rows_visible() -> TestResult {
    let mounted = mount_fixture(&WrapperFixture::new().h2("Intro").h2("Usage"))?;
    let widget = mounted.widget()?;
    let page = &mounted.page;

    let template = widget.structure().template;
    let style = page.attribute(&template, "style").unwrap_or_default();
    assert!(style.contains("display: none"), "template style: {}", style);
    assert!(style.contains("color: red"));

    for row in mounted.rows(0)? {
        assert_eq!(page.attribute(&row, "style"), None);
        assert_eq!(page.attribute(&row, "href").as_deref(), Some("#"));
        assert!(page.has_class(&row, "toc-row"));
        assert!(!page.has_class(&row, "is-active"));
    }
    Ok(())
}

#[test]
fn test_custom_heading_selector() -> TestResult {
    let mounted = mount_fixture(
        &WrapperFixture::new()
            .attr("data-pw-toc-headings", "h2, h4")
            .h2("Intro")
            .h3("Setup")
            .heading("<h4>Details</h4>"),
    )?;

    assert_eq!(mounted.widget()?.config().heading_selector, "h2, h4");
    assert_row_texts!(mounted, 0, ["Intro", "Details"]);
    Ok(())
}

#[test]
fn test_template_without_text_slot_still_renders() -> TestResult {
    let mounted = mount_fixture(
        &WrapperFixture::new()
            .debug()
            .template(Some(r#"<li data-pw-toc="item">Row</li>"#))
            .h2("Intro"),
    )?;

    assert_eq!(mounted.widget()?.entries().len(), 1);
    assert_row_texts!(mounted, 0, ["Row"]);
    assert!(mounted.diagnostics.contains(
        Level::Warn,
        r#"Missing [data-pw-toc="text"] inside [data-pw-toc="item"]"#
    ));
    Ok(())
}

#[test]
fn test_click_scrolls_below_sticky_nav() -> TestResult {
    let mounted = mount_fixture(
        &WrapperFixture::new()
            .attr("data-pw-toc-sticky-nav", "#nav")
            .h2("Intro")
            .h3("Setup"),
    )?;
    let page = &mounted.page;
    page.set_layout(mounted.node("nav")?, 0.0, 80.0)?;

    let widget = mounted.widget()?;
    let setup = &widget.entries()[1];
    page.set_layout(setup.heading, 900.0, 32.0)?;
    page.set_scroll_y(300.0);

    // Nav height is read when the row is clicked.
    assert!(page.click(setup.item));
    let requests = page.scroll_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].top, 900.0 - 80.0);
    assert_eq!(requests[0].behavior, ScrollBehavior::Smooth);
    Ok(())
}

#[test]
fn test_click_without_nav_uses_default_gap() -> TestResult {
    let mounted = mount_fixture(
        &WrapperFixture::new()
            .debug()
            .attr("data-pw-toc-sticky-nav", ".missing")
            .h2("Intro"),
    )?;
    let page = &mounted.page;
    let widget = mounted.widget()?;
    assert_eq!(widget.band().top_offset, 24.0);

    let intro = &widget.entries()[0];
    page.set_layout(intro.heading, 500.0, 32.0)?;
    assert!(page.click(intro.item));
    assert_eq!(page.scroll_requests()[0].top, 476.0);

    assert!(mounted
        .diagnostics
        .contains(Level::Warn, "Sticky nav not found for selector: .missing"));
    assert!(mounted
        .diagnostics
        .contains(Level::Info, "Sticky nav selector: .missing"));
    Ok(())
}

#[test]
fn test_zero_headings_leaves_list_untouched() -> TestResult {
    let mounted = mount_fixture(&WrapperFixture::new().debug().heading("<h4>Only h4</h4>"))?;

    assert_eq!(
        mounted.error()?,
        &TocError::NoHeadings {
            selector: "h2,h3".into()
        }
    );
    let list = mounted.list(0)?;
    let children = mounted.page.child_elements(list);
    assert_eq!(children.len(), 1);
    assert_eq!(mounted.page.attribute(&children[0], "style").as_deref(), Some("color: red"));

    assert_eq!(mounted.page.observer_count(), 0);
    assert_eq!(
        mounted.diagnostics.messages_at(Level::Warn),
        vec!["No headings found using selector: h2,h3"]
    );
    Ok(())
}

#[test]
fn test_log_sink_receives_lifecycle() -> TestResult {
    common::init_logger();
    let page = pw_toc::InMemoryPage::from_markup(
        &WrapperFixture::new().debug().h2("Intro").page_markup(),
    )?;
    let results = pw_toc::mount_all(&page, std::rc::Rc::new(pw_toc::LogDiagnostics));

    assert_eq!(results.len(), 1);
    assert!(results[0].is_ok());
    assert_eq!(page.observer_count(), 1);
    Ok(())
}
