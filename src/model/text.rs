//! Text-bearing block leaves and the separator.

use std::sync::Arc;

use super::node::node_variant;
use crate::style::{BorderStyle, Style};

/// Document title.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Title {
    text: String,
    style: Option<Arc<Style>>,
}

impl Title {
    /// Create a title.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    /// Title text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the title text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

node_variant!(Title);

/// Section heading with a nesting depth (1 = top level).
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    text: String,
    depth: u8,
    style: Option<Arc<Style>>,
}

impl Heading {
    /// Create a heading at `depth`. The depth is stored as given.
    pub fn new(text: impl Into<String>, depth: u8) -> Self {
        Self {
            text: text.into(),
            depth,
            style: None,
        }
    }

    /// Heading text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Nesting depth.
    pub fn depth(&self) -> u8 {
        self.depth
    }
}

node_variant!(Heading);

/// Body paragraph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    text: String,
    style: Option<Arc<Style>>,
}

impl Paragraph {
    /// Create a paragraph.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    /// Paragraph text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check if the paragraph holds only whitespace.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

node_variant!(Paragraph);

/// Footer text of a case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Footer {
    text: String,
    style: Option<Arc<Style>>,
}

impl Footer {
    /// Create a footer.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    /// Footer text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

node_variant!(Footer);

/// Horizontal separator line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Separator {
    border: BorderStyle,
    style: Option<Arc<Style>>,
}

impl Separator {
    /// Create a separator drawn with `border`.
    pub fn new(border: BorderStyle) -> Self {
        Self {
            border,
            style: None,
        }
    }

    /// Line style of the separator.
    pub fn border(&self) -> BorderStyle {
        self.border
    }
}

node_variant!(Separator);
