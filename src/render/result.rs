//! Rendering result with metadata and statistics.

use serde::{Deserialize, Serialize};

use crate::model::{Metadata, NodeKind};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (text, CSV or HTML)
    pub content: String,

    /// Document metadata (copied from source document)
    pub metadata: Metadata,

    /// Rendering statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: Metadata, stats: RenderStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            metadata: Metadata::default(),
            stats: RenderStats::default(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Counters collected while a renderer walks the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Cases rendered
    pub case_count: u32,

    /// Titles, headings, paragraphs and footers rendered
    pub text_block_count: u32,

    /// Headings among the text blocks
    pub heading_count: u32,

    /// Separators rendered
    pub separator_count: u32,

    /// Pictures encountered
    pub picture_count: u32,

    /// Tables rendered
    pub table_count: u32,

    /// Header and data rows rendered
    pub row_count: u32,

    /// Header and data cells rendered
    pub cell_count: u32,

    /// Nodes for which a style was resolved
    pub styled_node_count: u32,

    /// Nodes skipped by options or unsupported by the output format
    pub skipped_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one rendered node of `kind`.
    pub fn record(&mut self, kind: NodeKind) {
        match kind {
            NodeKind::Document => {}
            NodeKind::DocumentCase => self.case_count += 1,
            NodeKind::Heading => {
                self.heading_count += 1;
                self.text_block_count += 1;
            }
            NodeKind::Title | NodeKind::Paragraph | NodeKind::Footer => {
                self.text_block_count += 1
            }
            NodeKind::Separator => self.separator_count += 1,
            NodeKind::Picture => self.picture_count += 1,
            NodeKind::Table => self.table_count += 1,
            NodeKind::TableHeaderRow | NodeKind::TableRow => self.row_count += 1,
            NodeKind::TableHeaderCell | NodeKind::TableCell => self.cell_count += 1,
        }
    }

    /// Count one node rendered with a resolved style.
    pub fn add_styled(&mut self) {
        self.styled_node_count += 1;
    }

    /// Count one skipped node.
    pub fn add_skipped(&mut self) {
        self.skipped_count += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.case_count += other.case_count;
        self.text_block_count += other.text_block_count;
        self.heading_count += other.heading_count;
        self.separator_count += other.separator_count;
        self.picture_count += other.picture_count;
        self.table_count += other.table_count;
        self.row_count += other.row_count;
        self.cell_count += other.cell_count;
        self.styled_node_count += other.styled_node_count;
        self.skipped_count += other.skipped_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_stats_count_text() {
        let mut stats = RenderStats::new();
        stats.count_text("Hello, world! This is a test.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }

    #[test]
    fn test_render_stats_record() {
        let mut stats = RenderStats::new();
        for kind in [
            NodeKind::Document,
            NodeKind::DocumentCase,
            NodeKind::Heading,
            NodeKind::Paragraph,
            NodeKind::TableHeaderRow,
            NodeKind::TableRow,
            NodeKind::TableCell,
        ] {
            stats.record(kind);
        }
        assert_eq!(stats.case_count, 1);
        assert_eq!(stats.text_block_count, 2);
        assert_eq!(stats.heading_count, 1);
        assert_eq!(stats.row_count, 2);
        assert_eq!(stats.cell_count, 1);
    }

    #[test]
    fn test_render_stats_merge() {
        let mut stats1 = RenderStats::new();
        stats1.table_count = 2;
        stats1.cell_count = 5;

        let stats2 = RenderStats {
            table_count: 1,
            picture_count: 4,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.table_count, 3);
        assert_eq!(stats1.cell_count, 5);
        assert_eq!(stats1.picture_count, 4);
    }

    #[test]
    fn test_render_result_content_only() {
        let result = RenderResult::content_only("hello".to_string());
        assert_eq!(result.content_len(), 5);
        assert_eq!(result.stats, RenderStats::default());
    }
}
