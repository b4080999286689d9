//! HTML rendering with CSS derived from resolved styles.
//!
//! Registered styles (and the synthesized row/cell glue styles) become CSS
//! classes, deduplicated by value. Each rendered node refers to the class of
//! its resolved style; a style attached directly to a node and unknown to the
//! registry is written inline.

use std::io::Write;
use std::sync::Arc;

use super::context::RenderContext;
use super::{DocumentVisitor, RenderOptions, RenderResult};
use crate::error::{Error, Result};
use crate::model::{
    Composition, Document, DocumentCase, DocumentItem, Footer, Heading, Paragraph, Picture, Scope,
    Separator, Table, TableCell, TableHeaderCell, TableHeaderRow, TableRow, Title,
};
use crate::style::{
    customized, Border, BorderStyle, HorizontalAlignment, LayoutStyleChange, Style, StyleChange,
    StyleService, StyleSink, StyleValue, TextStyleChange, VerticalAlignment,
};

/// Render a document to HTML.
pub fn render_html(doc: &Document, styles: &StyleService, options: &RenderOptions) -> Result<String> {
    HtmlRenderer::new(styles, options.clone()).render(doc)
}

/// Render a document to HTML with statistics.
pub fn render_html_with_stats(
    doc: &Document,
    styles: &StyleService,
    options: &RenderOptions,
) -> Result<RenderResult> {
    let options = options.clone().with_stats(true);
    HtmlRenderer::new(styles, options).render_with_stats(doc)
}

/// Render a document to HTML into `writer`.
pub fn render_html_to_writer<W: Write + ?Sized>(
    doc: &Document,
    styles: &StyleService,
    options: &RenderOptions,
    writer: &mut W,
) -> Result<()> {
    let html = render_html(doc, styles, options)?;
    writer.write_all(html.as_bytes())?;
    Ok(())
}

/// Distinct style values, each mapped to a class name.
#[derive(Debug, Default)]
struct StyleTable {
    values: Vec<StyleValue>,
}

impl StyleTable {
    fn insert(&mut self, value: &StyleValue) -> usize {
        match self.lookup(value) {
            Some(i) => i,
            None => {
                self.values.push(value.clone());
                self.values.len() - 1
            }
        }
    }

    fn lookup(&self, value: &StyleValue) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }
}

/// HTML renderer.
pub struct HtmlRenderer<'s> {
    ctx: RenderContext<'s>,
    head: String,
    classes: StyleTable,
}

impl<'s> HtmlRenderer<'s> {
    /// Create a new HTML renderer.
    pub fn new(styles: &'s StyleService, options: RenderOptions) -> Self {
        Self {
            ctx: RenderContext::new(styles, options),
            head: String::new(),
            classes: StyleTable::default(),
        }
    }

    /// Render a document to HTML.
    pub fn render(self, doc: &Document) -> Result<String> {
        Ok(self.render_with_stats(doc)?.content)
    }

    /// Render a document to HTML with statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        if !self.ctx.options.inline_styles {
            let styles = self.ctx.styles;
            styles.write_styles(&mut self)?;
        }
        doc.walk(&mut self)?;

        let head = std::mem::take(&mut self.head);
        let full_page = self.ctx.options.full_page;
        let mut result = self.ctx.finish(&doc.metadata);

        result.content = if full_page {
            let title = doc.metadata.label.as_deref().unwrap_or("Document");
            format!(
                "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n{}</head>\n<body>\n{}\n</body>\n</html>\n",
                escape_html(title),
                head,
                result.content
            )
        } else {
            format!("{}{}", head, result.content)
        };
        Ok(result)
    }

    /// Attribute string for a node with the given resolved style.
    fn attrs(&self, style: Option<&Arc<Style>>) -> String {
        let Some(style) = style else {
            return String::new();
        };
        if !self.ctx.options.inline_styles {
            if let Some(i) = self.classes.lookup(&style.value) {
                return format!(" class=\"s{}\"", i);
            }
        }
        let decls = css_declarations(&style.value);
        if decls.is_empty() {
            String::new()
        } else {
            format!(" style=\"{}\"", escape_html(&decls.join("; ")))
        }
    }

    fn element(&mut self, tag: &str, scope: &Scope<'_>, text: &str) {
        let style = self.ctx.enter(scope);
        let attrs = self.attrs(style.as_ref());
        self.ctx.output.push_str(&format!(
            "<{tag}{attrs}>{}</{tag}>\n",
            escape_html(text)
        ));
    }

    fn open(&mut self, tag: &str, scope: &Scope<'_>) {
        let style = self.ctx.enter(scope);
        let attrs = self.attrs(style.as_ref());
        self.ctx.output.push_str(&format!("<{tag}{attrs}>\n"));
    }

    fn close(&mut self, tag: &str) {
        self.ctx.output.push_str(&format!("</{tag}>\n"));
    }
}

impl StyleSink for HtmlRenderer<'_> {
    type Error = Error;

    fn write_styles(&mut self, styles: &StyleService) -> Result<()> {
        let values = styles
            .styles()
            .iter()
            .chain(styles.glue_styles().iter().map(|g| g.style()))
            .map(|s| &s.value);
        for value in values {
            self.classes.insert(value);
        }
        if self.classes.values.is_empty() {
            return Ok(());
        }

        log::debug!("writing {} CSS classes", self.classes.values.len());
        self.head.push_str("<style>\n");
        for (i, value) in self.classes.values.iter().enumerate() {
            let decls = css_declarations(value);
            self.head
                .push_str(&format!(".s{} {{ {} }}\n", i, decls.join("; ")));
        }
        self.head.push_str("</style>\n");
        Ok(())
    }
}

impl DocumentVisitor for HtmlRenderer<'_> {
    type Error = Error;

    fn visit_document(&mut self, document: &Document, scope: &Scope<'_>) -> Result<()> {
        self.ctx.enter(scope);
        for case in self.ctx.selected_cases(document) {
            case.accept(self, Some(scope))?;
        }
        Ok(())
    }

    fn visit_document_case(&mut self, case: &DocumentCase, scope: &Scope<'_>) -> Result<()> {
        self.open("section", scope);
        case.visit_composition(self, scope)?;
        self.close("section");
        Ok(())
    }

    fn visit_title(&mut self, title: &Title, scope: &Scope<'_>) -> Result<()> {
        if !self.ctx.options.include_title {
            self.ctx.skip(title.kind(), "titles disabled");
            return Ok(());
        }
        self.element("h1", scope, title.text());
        Ok(())
    }

    fn visit_heading(&mut self, heading: &Heading, scope: &Scope<'_>) -> Result<()> {
        // h1 belongs to the title
        let level = heading.depth().saturating_add(1).clamp(2, 6);
        let tag = format!("h{level}");
        self.element(&tag, scope, heading.text());
        Ok(())
    }

    fn visit_paragraph(&mut self, para: &Paragraph, scope: &Scope<'_>) -> Result<()> {
        if para.is_empty() {
            self.ctx.skip(para.kind(), "empty paragraph");
            return Ok(());
        }
        self.element("p", scope, para.text());
        Ok(())
    }

    fn visit_footer(&mut self, footer: &Footer, scope: &Scope<'_>) -> Result<()> {
        if !self.ctx.options.include_footer {
            self.ctx.skip(footer.kind(), "footers disabled");
            return Ok(());
        }
        self.element("footer", scope, footer.text());
        Ok(())
    }

    fn visit_separator(&mut self, separator: &Separator, scope: &Scope<'_>) -> Result<()> {
        if !separator.border().is_visible() {
            self.ctx.skip(separator.kind(), "invisible separator");
            return Ok(());
        }
        let style = self.ctx.enter(scope);
        let attrs = self.attrs(style.as_ref());
        self.ctx.output.push_str(&format!(
            "<hr{} data-border=\"{}\">\n",
            attrs,
            border_style_css(separator.border())
        ));
        Ok(())
    }

    fn visit_picture(&mut self, picture: &Picture, scope: &Scope<'_>) -> Result<()> {
        let style = self.ctx.enter(scope);
        let attrs = self.attrs(style.as_ref());
        self.ctx.output.push_str(&format!(
            "<figure{} data-format=\"{}\" data-size=\"{}\">",
            attrs,
            picture.format().mime_type(),
            picture.size()
        ));
        if let Some(desc) = picture.description() {
            self.ctx
                .output
                .push_str(&format!("<figcaption>{}</figcaption>", escape_html(desc)));
        }
        self.ctx.output.push_str("</figure>\n");
        Ok(())
    }

    fn visit_table(&mut self, table: &Table, scope: &Scope<'_>) -> Result<()> {
        self.open("table", scope);
        if let Some(label) = table.label() {
            self.ctx
                .output
                .push_str(&format!("<caption>{}</caption>\n", escape_html(label)));
        }
        table.visit_composition(self, scope)?;
        self.close("table");
        Ok(())
    }

    fn visit_table_header_row(&mut self, row: &TableHeaderRow, scope: &Scope<'_>) -> Result<()> {
        self.ctx.output.push_str("<thead>\n");
        self.open("tr", scope);
        row.visit_composition(self, scope)?;
        self.close("tr");
        self.ctx.output.push_str("</thead>\n");
        Ok(())
    }

    fn visit_table_header_cell(&mut self, cell: &TableHeaderCell, scope: &Scope<'_>) -> Result<()> {
        self.element("th", scope, cell.text());
        Ok(())
    }

    fn visit_table_row(&mut self, row: &TableRow, scope: &Scope<'_>) -> Result<()> {
        self.open("tr", scope);
        row.visit_composition(self, scope)?;
        self.close("tr");
        Ok(())
    }

    fn visit_table_cell(&mut self, cell: &TableCell, scope: &Scope<'_>) -> Result<()> {
        self.element("td", scope, cell.text());
        Ok(())
    }
}

/// CSS declarations for the customized fields of a style value.
fn css_declarations(value: &StyleValue) -> Vec<String> {
    customized(value)
        .into_iter()
        .filter_map(|change| match change {
            StyleChange::Text(c) => text_css(c),
            StyleChange::Layout(c) => layout_css(c),
        })
        .collect()
}

fn text_css(change: TextStyleChange) -> Option<String> {
    Some(match change {
        TextStyleChange::FontName(name) => format!("font-family: '{}'", name?),
        TextStyleChange::FontFamily(family) => format!("font-family: {}", family?),
        TextStyleChange::FontSize(size) => format!("font-size: {}pt", size),
        TextStyleChange::Bold(bold) => {
            format!("font-weight: {}", if bold { "bold" } else { "normal" })
        }
        TextStyleChange::Italic(italic) => {
            format!("font-style: {}", if italic { "italic" } else { "normal" })
        }
        TextStyleChange::Underline(underline) => format!(
            "text-decoration: {}",
            if underline { "underline" } else { "none" }
        ),
        TextStyleChange::FontColor(color) => format!("color: {}", color),
        TextStyleChange::Locale(_) | TextStyleChange::NumberFormat(_) => return None,
    })
}

fn layout_css(change: LayoutStyleChange) -> Option<String> {
    Some(match change {
        LayoutStyleChange::BorderTop(b) => format!("border-top: {}", border_css(b)),
        LayoutStyleChange::BorderRight(b) => format!("border-right: {}", border_css(b)),
        LayoutStyleChange::BorderBottom(b) => format!("border-bottom: {}", border_css(b)),
        LayoutStyleChange::BorderLeft(b) => format!("border-left: {}", border_css(b)),
        LayoutStyleChange::FillBackground(color) => format!("background-color: {}", color?),
        LayoutStyleChange::AlignHorizontal(align) => {
            let value = match align {
                HorizontalAlignment::General => return None,
                HorizontalAlignment::Left => "left",
                HorizontalAlignment::Center => "center",
                HorizontalAlignment::Right => "right",
                HorizontalAlignment::Justify => "justify",
            };
            format!("text-align: {}", value)
        }
        LayoutStyleChange::AlignVertical(align) => {
            let value = match align {
                VerticalAlignment::Top => "top",
                VerticalAlignment::Center => "middle",
                VerticalAlignment::Bottom => "bottom",
            };
            format!("vertical-align: {}", value)
        }
        LayoutStyleChange::Width(width) => format!("width: {}pt", width?),
        LayoutStyleChange::Height(height) => format!("height: {}pt", height?),
        LayoutStyleChange::AutoWidth(true) => "width: auto".to_string(),
        LayoutStyleChange::WrapText(wrap) => {
            format!("white-space: {}", if wrap { "pre-wrap" } else { "nowrap" })
        }
        LayoutStyleChange::Indent(indent) => format!("padding-left: {}em", indent),
        LayoutStyleChange::Rotation(degrees) => format!("transform: rotate({}deg)", -i32::from(degrees)),
        LayoutStyleChange::FillForeground(_)
        | LayoutStyleChange::Pattern(_)
        | LayoutStyleChange::AutoWidth(false)
        | LayoutStyleChange::ShrinkToFit(_) => return None,
    })
}

fn border_css(border: Border) -> String {
    let width = match border.style {
        BorderStyle::None => return "none".to_string(),
        BorderStyle::Medium => "2px",
        BorderStyle::Thick | BorderStyle::Double => "3px",
        BorderStyle::Thin | BorderStyle::Dashed | BorderStyle::Dotted => "1px",
    };
    format!("{} {} {}", width, border_style_css(border.style), border.color)
}

fn border_style_css(style: BorderStyle) -> &'static str {
    match style {
        BorderStyle::None => "none",
        BorderStyle::Thin | BorderStyle::Medium | BorderStyle::Thick => "solid",
        BorderStyle::Dashed => "dashed",
        BorderStyle::Dotted => "dotted",
        BorderStyle::Double => "double",
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;
    use crate::style::{Color, LayoutStyle, StyleCondition, TextStyle};

    fn sample() -> Document {
        let table = Table::from_rows(
            TableHeaderRow::from_strings(["A", "B"]),
            vec![TableRow::from_strings(["1", "<2>"])],
        );
        let mut case = DocumentCase::new();
        case.add_parts([
            Block::from(Heading::new("Intro", 1)),
            Block::from(Paragraph::new("Fish & chips")),
            Block::from(table),
        ])
        .unwrap();
        let mut doc = Document::with_label("Menu");
        doc.add_part(case).unwrap();
        doc
    }

    fn services() -> StyleService {
        let mut styles = StyleService::new();
        styles.add_styles([
            Style::text(TextStyle::new().bold())
                .with_condition(StyleCondition::for_kind::<TableHeaderCell>()),
            Style::layout(LayoutStyle::new().with_background(Color::LIGHT_GRAY))
                .with_condition(StyleCondition::for_kind::<TableRow>()),
            Style::text(TextStyle::new().with_font_size(9.0))
                .with_condition(StyleCondition::for_kind::<TableCell>()),
        ]);
        styles
    }

    #[test]
    fn test_plain_html_without_styles() {
        let html = render_html(&sample(), &StyleService::new(), &RenderOptions::new()).unwrap();
        assert_eq!(
            html,
            "<section>\n<h2>Intro</h2>\n<p>Fish &amp; chips</p>\n<table>\n<thead>\n<tr>\n\
             <th>A</th>\n<th>B</th>\n</tr>\n</thead>\n<tr>\n<td>1</td>\n<td>&lt;2&gt;</td>\n\
             </tr>\n</table>\n</section>"
        );
    }

    #[test]
    fn test_stylesheet_classes() {
        let html = render_html(&sample(), &services(), &RenderOptions::new()).unwrap();

        assert!(html.starts_with("<style>\n"));
        assert!(html.contains(".s0 { font-weight: bold }\n"));
        assert!(html.contains(".s1 { background-color: #d3d3d3 }\n"));
        assert!(html.contains(".s2 { font-size: 9pt }\n"));
        // Row/cell glue: cell font merged into the row background
        assert!(html.contains(".s3 { font-size: 9pt; background-color: #d3d3d3 }\n"));

        assert!(html.contains("<th class=\"s0\">A</th>"));
        assert!(html.contains("<tr class=\"s1\">\n<td class=\"s3\">1</td>"));
    }

    #[test]
    fn test_inline_styles() {
        let options = RenderOptions::new().with_inline_styles(true);
        let html = render_html(&sample(), &services(), &options).unwrap();

        assert!(!html.contains("<style>"));
        assert!(html.contains("<th style=\"font-weight: bold\">A</th>"));
        assert!(html.contains("<td style=\"font-size: 9pt; background-color: #d3d3d3\">1</td>"));
    }

    #[test]
    fn test_unregistered_node_style_is_inlined() {
        let mut case = DocumentCase::new();
        case.add_part(
            Paragraph::new("note")
                .with_style(Style::text(TextStyle::new().italic()))
                .into(),
        )
        .unwrap();
        let mut doc = Document::new();
        doc.add_part(case).unwrap();

        let html = render_html(&doc, &services(), &RenderOptions::new()).unwrap();
        assert!(html.contains("<p style=\"font-style: italic\">note</p>"));
    }

    #[test]
    fn test_full_page() {
        let options = RenderOptions::new().with_full_page(true);
        let html = render_html(&sample(), &services(), &options).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>\n<html>\n<head>\n"));
        assert!(html.contains("<title>Menu</title>\n<style>\n"));
        assert!(html.ends_with("</section>\n</body>\n</html>\n"));
    }

    #[test]
    fn test_heading_levels_are_clamped() {
        let mut case = DocumentCase::new();
        case.add_parts([0, 1, 4, 9, u8::MAX].map(|depth| Block::from(Heading::new("x", depth))))
            .unwrap();
        let mut doc = Document::new();
        doc.add_part(case).unwrap();

        let html = render_html(&doc, &StyleService::new(), &RenderOptions::new()).unwrap();
        assert_eq!(
            html,
            "<section>\n<h2>x</h2>\n<h2>x</h2>\n<h5>x</h5>\n<h6>x</h6>\n<h6>x</h6>\n</section>"
        );
    }

    #[test]
    fn test_border_css() {
        assert_eq!(border_css(Border::NONE), "none");
        assert_eq!(border_css(Border::thin()), "1px solid #000000");
        assert_eq!(
            border_css(Border::new(BorderStyle::Double, Color::RED)),
            "3px double #ff0000"
        );
    }
}
