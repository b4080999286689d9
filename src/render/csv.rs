//! CSV rendering of document tables.
//!
//! Only tables have a CSV representation. Each table becomes one block of
//! records; blocks are separated by an empty line. The header row uses the
//! column alias when one is set.

use std::io::Write;

use super::context::{row_len_for, RenderContext};
use super::{DocumentVisitor, RenderOptions, RenderResult};
use crate::error::{Error, Result};
use crate::model::{
    Composition, Document, DocumentCase, DocumentItem, Footer, Heading, NodeKind, Paragraph, Picture,
    Scope, Separator, Table, TableCell, TableHeaderCell, TableHeaderRow, TableRow, Title,
};
use crate::style::StyleService;

/// Render the tables of a document to CSV.
pub fn render_csv(doc: &Document, styles: &StyleService, options: &RenderOptions) -> Result<String> {
    CsvRenderer::new(styles, options.clone()).render(doc)
}

/// Render the tables of a document to CSV with statistics.
pub fn render_csv_with_stats(
    doc: &Document,
    styles: &StyleService,
    options: &RenderOptions,
) -> Result<RenderResult> {
    let options = options.clone().with_stats(true);
    CsvRenderer::new(styles, options).render_with_stats(doc)
}

/// Render the tables of a document to CSV into `writer`.
pub fn render_csv_to_writer<W: Write + ?Sized>(
    doc: &Document,
    styles: &StyleService,
    options: &RenderOptions,
    writer: &mut W,
) -> Result<()> {
    let csv = render_csv(doc, styles, options)?;
    writer.write_all(csv.as_bytes())?;
    Ok(())
}

/// CSV renderer.
pub struct CsvRenderer<'s> {
    ctx: RenderContext<'s>,
    delimiter: u8,
    writer: Option<::csv::Writer<Vec<u8>>>,
    record: Vec<String>,
}

impl<'s> CsvRenderer<'s> {
    /// Create a new CSV renderer.
    pub fn new(styles: &'s StyleService, options: RenderOptions) -> Self {
        Self {
            ctx: RenderContext::new(styles, options),
            delimiter: b',',
            writer: None,
            record: Vec::new(),
        }
    }

    /// Render a document to CSV.
    pub fn render(self, doc: &Document) -> Result<String> {
        Ok(self.render_with_stats(doc)?.content)
    }

    /// Render a document to CSV with statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        self.delimiter = delimiter_byte(self.ctx.options.csv_delimiter)?;
        doc.walk(&mut self)?;
        Ok(self.ctx.finish(&doc.metadata))
    }

    fn set_field(&mut self, index: usize, text: &str) -> Result<()> {
        let len = row_len_for(index)?;
        if self.record.len() < len {
            self.record.resize(len, String::new());
        }
        self.record[index] = text.to_string();
        Ok(())
    }

    fn flush_record(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.write_record(&self.record)?;
        }
        self.record.clear();
        Ok(())
    }

    fn skip_block(&mut self, kind: NodeKind) {
        self.ctx.skip(kind, "no CSV representation");
    }
}

/// Byte form of a delimiter; the quote character and non-ASCII are rejected.
fn delimiter_byte(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(|b| b.is_ascii() && *b != b'"')
        .ok_or_else(|| Error::Render(format!("unsupported CSV delimiter {delimiter:?}")))
}

impl DocumentVisitor for CsvRenderer<'_> {
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

    fn visit_title(&mut self, title: &Title, _scope: &Scope<'_>) -> Result<()> {
        self.skip_block(title.kind());
        Ok(())
    }

    fn visit_heading(&mut self, heading: &Heading, _scope: &Scope<'_>) -> Result<()> {
        self.skip_block(heading.kind());
        Ok(())
    }

    fn visit_paragraph(&mut self, para: &Paragraph, _scope: &Scope<'_>) -> Result<()> {
        self.skip_block(para.kind());
        Ok(())
    }

    fn visit_footer(&mut self, footer: &Footer, _scope: &Scope<'_>) -> Result<()> {
        self.skip_block(footer.kind());
        Ok(())
    }

    fn visit_separator(&mut self, separator: &Separator, _scope: &Scope<'_>) -> Result<()> {
        self.skip_block(separator.kind());
        Ok(())
    }

    fn visit_picture(&mut self, picture: &Picture, _scope: &Scope<'_>) -> Result<()> {
        log::warn!(
            "dropping {} picture ({} bytes) from CSV output",
            picture.format(),
            picture.size()
        );
        self.skip_block(picture.kind());
        Ok(())
    }

    fn visit_table(&mut self, table: &Table, scope: &Scope<'_>) -> Result<()> {
        self.ctx.enter(scope);
        self.writer = Some(
            ::csv::WriterBuilder::new()
                .delimiter(self.delimiter)
                .terminator(::csv::Terminator::Any(b'\n'))
                .flexible(true)
                .from_writer(Vec::new()),
        );
        table.visit_composition(self, scope)?;

        let Some(writer) = self.writer.take() else {
            return Ok(());
        };
        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        let block = String::from_utf8(bytes).map_err(|e| Error::Render(e.to_string()))?;
        if !self.ctx.output.is_empty() {
            self.ctx.output.push('\n');
        }
        self.ctx.output.push_str(&block);
        Ok(())
    }

    fn visit_table_header_row(&mut self, row: &TableHeaderRow, scope: &Scope<'_>) -> Result<()> {
        self.ctx.enter(scope);
        self.record.clear();
        row.visit_composition(self, scope)?;
        self.flush_record()
    }

    fn visit_table_header_cell(&mut self, cell: &TableHeaderCell, scope: &Scope<'_>) -> Result<()> {
        self.ctx.enter(scope);
        let name = cell.alias().unwrap_or(cell.text());
        self.set_field(cell.index(), name)
    }

    fn visit_table_row(&mut self, row: &TableRow, scope: &Scope<'_>) -> Result<()> {
        self.ctx.enter(scope);
        self.record.clear();
        row.visit_composition(self, scope)?;
        self.flush_record()
    }

    fn visit_table_cell(&mut self, cell: &TableCell, scope: &Scope<'_>) -> Result<()> {
        self.ctx.enter(scope);
        self.set_field(cell.index(), cell.text())
    }
}
