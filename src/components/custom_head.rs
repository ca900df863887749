//! Document head shared by every page

use ammonia::clean_text;

use crate::consts::APP_NAME;

/// Head of a page: its title and any extra head elements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomHead {
    pub title: Option<String>,
    pub children: Vec<String>,
}

impl CustomHead {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            children: Vec::new(),
        }
    }

    /// Adds a raw head element, e.g. a `<meta>` tag
    pub fn with_child(mut self, child: impl Into<String>) -> Self {
        self.children.push(child.into());
        self
    }

    /// `"<title> | Todo"`, or just `"Todo"` for pages without a title
    pub fn document_title(&self) -> String {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => format!("{} | {}", title, APP_NAME),
            _ => APP_NAME.to_string(),
        }
    }

    /// Renders the head fragment. The title goes through `clean_text`, which
    /// also encodes spaces as `&#32;`; children are trusted markup and
    /// emitted as is.
    pub fn render(&self) -> String {
        let mut html = format!("<title>{}</title>", clean_text(&self.document_title()));
        for child in &self.children {
            html.push_str(child);
        }
        html
    }
}
