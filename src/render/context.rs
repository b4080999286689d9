//! State shared by the reference renderers.

use std::sync::Arc;

use super::{RenderOptions, RenderResult, RenderStats};
use crate::error::{Error, Result};
use crate::model::{Document, DocumentCase, Metadata, NodeKind, Scope};
use crate::style::{Style, StyleService};

/// Widest table row the renderers lay out.
pub(crate) const MAX_COLUMNS: usize = 16_384;

/// Row length needed to hold a cell at `index`.
pub(crate) fn row_len_for(index: usize) -> Result<usize> {
    index
        .checked_add(1)
        .filter(|len| *len <= MAX_COLUMNS)
        .ok_or_else(|| {
            Error::Render(format!(
                "cell index {index} is outside the {MAX_COLUMNS} column limit"
            ))
        })
}

pub(crate) struct RenderContext<'s> {
    pub(crate) styles: &'s StyleService,
    pub(crate) options: RenderOptions,
    pub(crate) stats: RenderStats,
    pub(crate) output: String,
}

impl<'s> RenderContext<'s> {
    pub(crate) fn new(styles: &'s StyleService, options: RenderOptions) -> Self {
        Self {
            styles,
            options,
            stats: RenderStats::new(),
            output: String::new(),
        }
    }

    /// Count the node in scope and resolve its style.
    pub(crate) fn enter(&mut self, scope: &Scope<'_>) -> Option<Arc<Style>> {
        let style = self.styles.extract_style_for(scope);
        if self.options.collect_stats {
            self.stats.record(scope.kind());
            if let Some(text) = scope.node().text() {
                self.stats.count_text(text);
            }
            if style.is_some() {
                self.stats.add_styled();
            }
        }
        style
    }

    pub(crate) fn skip(&mut self, kind: NodeKind, reason: &str) {
        log::debug!("skipping {}: {}", kind, reason);
        if self.options.collect_stats {
            self.stats.add_skipped();
        }
    }

    /// Cases picked by the case selection, 1-indexed.
    pub(crate) fn selected_cases<'d>(&self, document: &'d Document) -> Vec<&'d DocumentCase> {
        document
            .cases()
            .iter()
            .enumerate()
            .filter(|(i, _)| self.options.case_selection.includes(*i as u32 + 1))
            .map(|(_, case)| case)
            .collect()
    }

    pub(crate) fn push_block(&mut self, text: &str) {
        self.output.push_str(text);
        self.output.push_str("\n\n");
    }

    pub(crate) fn finish(self, metadata: &Metadata) -> RenderResult {
        RenderResult::new(self.output.trim().to_string(), metadata.clone(), self.stats)
    }
}
