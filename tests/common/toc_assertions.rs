/// Asserts the rendered row texts of a wrapper, in order.
macro_rules! assert_row_texts {
    ($mounted:expr, $index:expr, [$($text:expr),* $(,)?]) => {{
        let actual = $mounted.row_texts($index)?;
        let expected: Vec<String> = vec![$($text.to_string()),*];
        assert_eq!(actual, expected, "row texts of wrapper {}", $index);
    }};
}

/// Asserts which rows of a widget carry its active class.
macro_rules! assert_active_rows {
    ($page:expr, $widget:expr, [$($index:expr),* $(,)?]) => {{
        use pw_toc::DomTree as _;
        let class = $widget.config().active_class.clone();
        let actual: Vec<usize> = $widget
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| $page.has_class(&entry.item, &class))
            .map(|(index, _)| index)
            .collect();
        let expected: Vec<usize> = vec![$($index),*];
        assert_eq!(actual, expected, "rows carrying '{}'", class);
        assert_eq!($widget.active().active_indices(), expected, "tracked active set");
    }};
}
