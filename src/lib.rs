//! # unidoc
//!
//! Backend-agnostic document model for Rust.
//!
//! A document is a tree of abstract elements (cases, titles, paragraphs,
//! tables, pictures...) that renderers turn into concrete output. Styles are
//! shared between nodes, selected by conditions over node types and
//! predicates, and resolved per node by a [`StyleService`]. Renderers walk the
//! tree through the [`DocumentVisitor`](render::DocumentVisitor) protocol.
//!
//! ## Quick Start
//!
//! ```
//! use unidoc::model::{Block, Composition, Document, DocumentCase, Paragraph, Title};
//! use unidoc::style::{Style, StyleCondition, StyleService, TextStyle};
//!
//! fn main() -> unidoc::Result<()> {
//!     let mut case = DocumentCase::new();
//!     case.add_parts([
//!         Block::from(Title::new("Report")),
//!         Block::from(Paragraph::new("All systems nominal.")),
//!     ])?;
//!     let mut doc = Document::with_label("Status");
//!     doc.add_part(case)?;
//!
//!     let mut styles = StyleService::new();
//!     styles.add_style(
//!         Style::text(TextStyle::new().bold()).with_condition(StyleCondition::for_kind::<Title>()),
//!     );
//!
//!     let html = unidoc::to_html(&doc, &styles)?;
//!     assert!(html.contains("<h1 class=\"s0\">Report</h1>"));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Composition tree**: typed nodes with ordered, optionally sealed children
//! - **Style cascade**: condition-based selection, last match wins
//! - **Selective merge**: only explicitly customized fields are overlaid
//! - **Row/cell glue**: cells inherit the style of their enclosing row
//! - **Reference renderers**: plain text, CSV and HTML with CSS

pub mod error;
pub mod model;
pub mod render;
pub mod style;

use std::path::Path;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    Block, Composition, Document, DocumentCase, DocumentItem, Metadata, NodeKind, NodeTag, Scope,
};
pub use render::{CaseSelection, DocumentVisitor, RenderOptions, RenderResult, RenderStats};
pub use style::{Style, StyleCondition, StyleService, StyleSheet, StyleValue};

/// Render a document to plain text with default options.
///
/// # Example
///
/// ```
/// use unidoc::model::{Composition, Document, DocumentCase, Paragraph};
/// use unidoc::StyleService;
///
/// let mut case = DocumentCase::new();
/// case.add_part(Paragraph::new("Hello, world!").into()).unwrap();
/// let mut doc = Document::new();
/// doc.add_part(case).unwrap();
///
/// let text = unidoc::to_text(&doc, &StyleService::new()).unwrap();
/// assert_eq!(text, "Hello, world!");
/// ```
pub fn to_text(doc: &Document, styles: &StyleService) -> Result<String> {
    render::render_text(doc, styles, &RenderOptions::default())
}

/// Render the tables of a document to CSV with default options.
pub fn to_csv(doc: &Document, styles: &StyleService) -> Result<String> {
    render::render_csv(doc, styles, &RenderOptions::default())
}

/// Render a document to HTML with default options.
pub fn to_html(doc: &Document, styles: &StyleService) -> Result<String> {
    render::render_html(doc, styles, &RenderOptions::default())
}

/// Builder bundling styles and render options.
///
/// # Example
///
/// ```
/// use unidoc::model::{Composition, Document, DocumentCase, Paragraph};
/// use unidoc::Unidoc;
///
/// let mut case = DocumentCase::new();
/// case.add_part(Paragraph::new("body").into())?;
/// let mut doc = Document::new();
/// doc.add_part(case)?;
///
/// let html = Unidoc::new()
///     .with_style_sheet_str(r#"{"rules":[{"target":"text","style":{"type":"text","italic":true}}]}"#)?
///     .with_full_page()
///     .to_html(&doc)?;
/// assert!(html.contains("<p class=\"s0\">body</p>"));
/// # Ok::<(), unidoc::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Unidoc {
    styles: StyleService,
    render_options: RenderOptions,
}

impl Unidoc {
    /// Create a new builder with no styles and default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.styles.add_style(style);
        self
    }

    /// Register the rules of a JSON style sheet.
    pub fn with_style_sheet_str(mut self, json: &str) -> Result<Self> {
        StyleSheet::from_json_str(json)?.apply_to(&mut self.styles);
        Ok(self)
    }

    /// Register the rules of a JSON style sheet file.
    pub fn with_style_sheet_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        StyleSheet::from_json_file(path)?.apply_to(&mut self.styles);
        Ok(self)
    }

    /// Replace the render options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Set case selection.
    pub fn with_cases(mut self, cases: CaseSelection) -> Self {
        self.render_options = self.render_options.with_cases(cases);
        self
    }

    /// Omit title nodes.
    pub fn without_title(mut self) -> Self {
        self.render_options = self.render_options.with_title(false);
        self
    }

    /// Omit footer nodes.
    pub fn without_footer(mut self) -> Self {
        self.render_options = self.render_options.with_footer(false);
        self
    }

    /// Wrap HTML output in a complete page.
    pub fn with_full_page(mut self) -> Self {
        self.render_options = self.render_options.with_full_page(true);
        self
    }

    /// Write styles inline in HTML output.
    pub fn with_inline_styles(mut self) -> Self {
        self.render_options = self.render_options.with_inline_styles(true);
        self
    }

    /// Registered styles.
    pub fn styles(&self) -> &StyleService {
        &self.styles
    }

    /// Render options.
    pub fn options(&self) -> &RenderOptions {
        &self.render_options
    }

    /// Render to plain text.
    pub fn to_text(&self, doc: &Document) -> Result<String> {
        render::render_text(doc, &self.styles, &self.render_options)
    }

    /// Render tables to CSV.
    pub fn to_csv(&self, doc: &Document) -> Result<String> {
        render::render_csv(doc, &self.styles, &self.render_options)
    }

    /// Render to HTML.
    pub fn to_html(&self, doc: &Document) -> Result<String> {
        render::render_html(doc, &self.styles, &self.render_options)
    }

    /// Render to HTML with statistics.
    pub fn to_html_with_stats(&self, doc: &Document) -> Result<RenderResult> {
        render::render_html_with_stats(doc, &self.styles, &self.render_options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, Table, TableHeaderRow, TableRow, Title};
    use crate::style::TextStyle;

    fn sample() -> Document {
        let mut case = DocumentCase::new();
        case.add_parts([
            Block::from(Title::new("Title")),
            Block::from(Paragraph::new("Body")),
            Block::from(Table::from_rows(
                TableHeaderRow::from_strings(["k", "v"]),
                vec![TableRow::from_strings(["a", "1"])],
            )),
        ])
        .unwrap();
        let mut doc = Document::with_label("Sample");
        doc.add_part(case).unwrap();
        doc
    }

    #[test]
    fn test_unidoc_builder_default() {
        let builder = Unidoc::default();
        assert!(builder.styles().is_empty());
        assert!(builder.options().include_title);
        assert!(!builder.options().full_page);
    }

    #[test]
    fn test_unidoc_builder_chained() {
        let builder = Unidoc::new()
            .with_style(Style::text(TextStyle::new().bold()))
            .without_title()
            .without_footer()
            .with_inline_styles()
            .with_cases(CaseSelection::Cases(vec![1]));

        assert_eq!(builder.styles().len(), 1);
        assert!(!builder.options().include_title);
        assert!(!builder.options().include_footer);
        assert!(builder.options().inline_styles);
        assert_eq!(builder.options().case_selection, CaseSelection::Cases(vec![1]));
    }

    #[test]
    fn test_unidoc_invalid_style_sheet() {
        let result = Unidoc::new().with_style_sheet_str("not json");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_convenience_functions() {
        let doc = sample();
        let styles = StyleService::new();

        assert_eq!(to_text(&doc, &styles).unwrap(), "Title\n=====\n\nBody\n\nk  v\na  1");
        assert_eq!(to_csv(&doc, &styles).unwrap(), "k,v\na,1");
        assert!(to_html(&doc, &styles).unwrap().starts_with("<section>\n<h1>Title</h1>"));
    }

    #[test]
    fn test_builder_renders_with_stats() {
        let result = Unidoc::new()
            .with_style(Style::text(TextStyle::new().italic()))
            .to_html_with_stats(&sample())
            .unwrap();

        assert_eq!(result.metadata.label.as_deref(), Some("Sample"));
        assert_eq!(result.stats.table_count, 1);
        // A conditionless style resolves for every node
        assert_eq!(result.stats.styled_node_count, 11);
    }
}
