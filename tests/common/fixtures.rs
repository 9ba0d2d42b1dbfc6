/// Builder for a page holding one TOC wrapper.
#[derive(Debug, Clone)]
pub struct WrapperFixture {
    attrs: Vec<(String, String)>,
    headings: Vec<String>,
    list: bool,
    template: Option<String>,
}

impl Default for WrapperFixture {
    fn default() -> Self {
        Self {
            attrs: Vec::new(),
            headings: Vec::new(),
            list: true,
            template: Some(default_template()),
        }
    }
}

/// A link row with a text slot and a class of its own.
pub fn default_template() -> String {
    r#"<li data-pw-toc="item" class="toc-row" style="color: red"><a href="/placeholder"><span data-pw-toc="text">placeholder</span></a></li>"#
        .to_string()
}

impl WrapperFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub fn debug(self) -> Self {
        self.attr("data-pw-toc-debug", "")
    }

    pub fn heading(mut self, markup: &str) -> Self {
        self.headings.push(markup.to_string());
        self
    }

    pub fn h2(self, text: &str) -> Self {
        self.heading(&format!("<h2>{}</h2>", text))
    }

    pub fn h3(self, text: &str) -> Self {
        self.heading(&format!("<h3>{}</h3>", text))
    }

    pub fn without_list(mut self) -> Self {
        self.list = false;
        self
    }

    pub fn template(mut self, markup: Option<&str>) -> Self {
        self.template = markup.map(str::to_string);
        self
    }

    /// The wrapper element alone.
    pub fn markup(&self) -> String {
        let attrs: String = self
            .attrs
            .iter()
            .map(|(name, value)| format!(r#" {}="{}""#, name, value))
            .collect();
        let list = if self.list {
            format!(
                r#"<ul data-pw-toc="list">{}</ul>"#,
                self.template.as_deref().unwrap_or_default()
            )
        } else {
            String::new()
        };
        format!(
            r#"<div data-pw-toc="wrapper"{}><article data-pw-toc="content">{}<p>Body text</p></article>{}</div>"#,
            attrs,
            self.headings.concat(),
            list
        )
    }

    /// A full page with a sticky header before the wrapper.
    pub fn page_markup(&self) -> String {
        page_with(&[self.markup()])
    }
}

/// A page body holding the given wrappers after a `#nav` header.
pub fn page_with(wrappers: &[String]) -> String {
    format!(
        r#"<body><header id="nav" class="navbar">Site</header>{}</body>"#,
        wrappers.concat()
    )
}
