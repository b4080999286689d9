//! Visitor protocol and reference renderers.

mod context;
mod csv;
mod html;
mod options;
mod result;
mod text;
pub mod visitor;

pub use csv::{render_csv, render_csv_to_writer, render_csv_with_stats, CsvRenderer};
pub use html::{render_html, render_html_to_writer, render_html_with_stats, HtmlRenderer};
pub use options::{CaseSelection, RenderOptions};
pub use result::{RenderResult, RenderStats};
pub use text::{render_text, render_text_to_writer, render_text_with_stats, TextRenderer};
pub use visitor::{walk, DocumentVisitor, RecordingVisitor};
