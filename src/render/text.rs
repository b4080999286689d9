//! Plain text rendering.

use std::io::Write;

use super::context::{row_len_for, RenderContext};
use super::{DocumentVisitor, RenderOptions, RenderResult};
use crate::error::{Error, Result};
use crate::model::{
    Composition, Document, DocumentCase, DocumentItem, Footer, Heading, Paragraph, Picture, Scope,
    Separator, Table, TableCell, TableHeaderCell, TableHeaderRow, TableRow, Title,
};
use crate::style::{BorderStyle, HorizontalAlignment, Style, StyleService};

/// Render a document to plain text.
pub fn render_text(doc: &Document, styles: &StyleService, options: &RenderOptions) -> Result<String> {
    TextRenderer::new(styles, options.clone()).render(doc)
}

/// Render a document to plain text with statistics.
pub fn render_text_with_stats(
    doc: &Document,
    styles: &StyleService,
    options: &RenderOptions,
) -> Result<RenderResult> {
    let options = options.clone().with_stats(true);
    TextRenderer::new(styles, options).render_with_stats(doc)
}

/// Render a document to plain text into `writer`.
pub fn render_text_to_writer<W: Write + ?Sized>(
    doc: &Document,
    styles: &StyleService,
    options: &RenderOptions,
    writer: &mut W,
) -> Result<()> {
    let text = render_text(doc, styles, options)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

#[derive(Debug, Clone, Default)]
struct GridCell {
    text: String,
    align: HorizontalAlignment,
}

/// Plain text renderer.
///
/// Blocks are separated by blank lines. Tables are laid out as aligned
/// columns, honoring the horizontal alignment of each cell's resolved style.
pub struct TextRenderer<'s> {
    ctx: RenderContext<'s>,
    grid: Vec<Vec<GridCell>>,
}

impl<'s> TextRenderer<'s> {
    /// Create a new text renderer resolving styles from `styles`.
    pub fn new(styles: &'s StyleService, options: RenderOptions) -> Self {
        Self {
            ctx: RenderContext::new(styles, options),
            grid: Vec::new(),
        }
    }

    /// Render a document to text.
    pub fn render(self, doc: &Document) -> Result<String> {
        Ok(self.render_with_stats(doc)?.content)
    }

    /// Render a document to text with statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        doc.walk(&mut self)?;
        Ok(self.ctx.finish(&doc.metadata))
    }

    fn place(&mut self, index: usize, text: &str, style: Option<&Style>) -> Result<()> {
        let len = row_len_for(index)?;
        let align = style
            .and_then(Style::layout_style)
            .map(|l| l.horizontal_alignment)
            .unwrap_or_default();
        if self.grid.is_empty() {
            self.grid.push(Vec::new());
        }
        if let Some(row) = self.grid.last_mut() {
            if row.len() < len {
                row.resize(len, GridCell::default());
            }
            row[index] = GridCell {
                text: text.to_string(),
                align,
            };
        }
        Ok(())
    }
}

impl DocumentVisitor for TextRenderer<'_> {
    type Error = Error;

    fn visit_document(&mut self, document: &Document, scope: &Scope<'_>) -> Result<()> {
        self.ctx.enter(scope);
        for case in self.ctx.selected_cases(document) {
            case.accept(self, Some(scope))?;
        }
        Ok(())
    }

    fn visit_document_case(&mut self, case: &DocumentCase, scope: &Scope<'_>) -> Result<()> {
        self.ctx.enter(scope);
        case.visit_composition(self, scope)
    }

    fn visit_title(&mut self, title: &Title, scope: &Scope<'_>) -> Result<()> {
        if !self.ctx.options.include_title {
            self.ctx.skip(title.kind(), "titles disabled");
            return Ok(());
        }
        self.ctx.enter(scope);
        let underline = "=".repeat(title.text().chars().count());
        self.ctx.push_block(&format!("{}\n{}", title.text(), underline));
        Ok(())
    }

    fn visit_heading(&mut self, heading: &Heading, scope: &Scope<'_>) -> Result<()> {
        self.ctx.enter(scope);
        self.ctx.push_block(heading.text());
        Ok(())
    }

    fn visit_paragraph(&mut self, para: &Paragraph, scope: &Scope<'_>) -> Result<()> {
        self.ctx.enter(scope);
        if !para.is_empty() {
            self.ctx.push_block(para.text());
        }
        Ok(())
    }

    fn visit_footer(&mut self, footer: &Footer, scope: &Scope<'_>) -> Result<()> {
        if !self.ctx.options.include_footer {
            self.ctx.skip(footer.kind(), "footers disabled");
            return Ok(());
        }
        self.ctx.enter(scope);
        self.ctx.push_block(footer.text());
        Ok(())
    }

    fn visit_separator(&mut self, separator: &Separator, scope: &Scope<'_>) -> Result<()> {
        self.ctx.enter(scope);
        let ch = match separator.border() {
            BorderStyle::None => return Ok(()),
            BorderStyle::Thick | BorderStyle::Double => '=',
            BorderStyle::Dotted => '.',
            BorderStyle::Thin | BorderStyle::Medium | BorderStyle::Dashed => '-',
        };
        let line: String = std::iter::repeat(ch)
            .take(self.ctx.options.separator_width)
            .collect();
        self.ctx.push_block(&line);
        Ok(())
    }

    fn visit_picture(&mut self, picture: &Picture, scope: &Scope<'_>) -> Result<()> {
        self.ctx.enter(scope);
        let marker = match picture.description() {
            Some(desc) => format!("[picture: {}]", desc),
            None => format!("[picture: {}]", picture.format()),
        };
        self.ctx.push_block(&marker);
        Ok(())
    }

    fn visit_table(&mut self, table: &Table, scope: &Scope<'_>) -> Result<()> {
        self.ctx.enter(scope);
        if let Some(label) = table.label() {
            self.ctx.output.push_str(label);
            self.ctx.output.push('\n');
        }
        self.grid.clear();
        table.visit_composition(self, scope)?;
        let text = format_grid(&self.grid);
        self.grid.clear();
        if !text.is_empty() {
            self.ctx.push_block(&text);
        }
        Ok(())
    }

    fn visit_table_header_row(&mut self, row: &TableHeaderRow, scope: &Scope<'_>) -> Result<()> {
        self.ctx.enter(scope);
        self.grid.push(Vec::new());
        row.visit_composition(self, scope)
    }

    fn visit_table_header_cell(&mut self, cell: &TableHeaderCell, scope: &Scope<'_>) -> Result<()> {
        let style = self.ctx.enter(scope);
        self.place(cell.index(), cell.text(), style.as_deref())
    }

    fn visit_table_row(&mut self, row: &TableRow, scope: &Scope<'_>) -> Result<()> {
        self.ctx.enter(scope);
        self.grid.push(Vec::new());
        row.visit_composition(self, scope)
    }

    fn visit_table_cell(&mut self, cell: &TableCell, scope: &Scope<'_>) -> Result<()> {
        let style = self.ctx.enter(scope);
        self.place(cell.index(), cell.text(), style.as_deref())
    }
}

fn format_grid(grid: &[Vec<GridCell>]) -> String {
    let columns = grid.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0; columns];
    for row in grid {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.text.chars().count());
        }
    }

    grid.iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(i, cell)| pad(&cell.text, widths[i], cell.align))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn pad(text: &str, width: usize, align: HorizontalAlignment) -> String {
    let fill = width.saturating_sub(text.chars().count());
    let align = match align {
        // Numbers right, text left
        HorizontalAlignment::General if text.trim().parse::<f64>().is_ok() => {
            HorizontalAlignment::Right
        }
        other => other,
    };
    match align {
        HorizontalAlignment::Right => format!("{}{}", " ".repeat(fill), text),
        HorizontalAlignment::Center => {
            let left = fill / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(fill - left))
        }
        _ => format!("{}{}", text, " ".repeat(fill)),
    }
}
