//! Rendering options and configuration.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Options for the reference renderers.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Which cases (pages or sheets) to render
    pub case_selection: CaseSelection,

    /// Render title nodes
    pub include_title: bool,

    /// Render footer nodes
    pub include_footer: bool,

    /// Field delimiter for CSV output
    pub csv_delimiter: char,

    /// Emit styles as `style` attributes instead of a stylesheet (HTML)
    pub inline_styles: bool,

    /// Wrap HTML output in a complete page with `<head>`
    pub full_page: bool,

    /// Width of a separator line in text output
    pub separator_width: usize,

    /// Collect statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set case selection.
    pub fn with_cases(mut self, selection: CaseSelection) -> Self {
        self.case_selection = selection;
        self
    }

    /// Set a specific case range.
    pub fn with_case_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.case_selection = CaseSelection::Range(range);
        self
    }

    /// Enable or disable title nodes.
    pub fn with_title(mut self, include: bool) -> Self {
        self.include_title = include;
        self
    }

    /// Enable or disable footer nodes.
    pub fn with_footer(mut self, include: bool) -> Self {
        self.include_footer = include;
        self
    }

    /// Set the CSV delimiter.
    pub fn with_csv_delimiter(mut self, delimiter: char) -> Self {
        self.csv_delimiter = delimiter;
        self
    }

    /// Enable or disable inline styles.
    pub fn with_inline_styles(mut self, inline: bool) -> Self {
        self.inline_styles = inline;
        self
    }

    /// Enable or disable the full HTML page wrapper.
    pub fn with_full_page(mut self, full: bool) -> Self {
        self.full_page = full;
        self
    }

    /// Set the separator width.
    pub fn with_separator_width(mut self, width: usize) -> Self {
        self.separator_width = width;
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            case_selection: CaseSelection::All,
            include_title: true,
            include_footer: true,
            csv_delimiter: ',',
            inline_styles: false,
            full_page: false,
            separator_width: 40,
            collect_stats: false,
        }
    }
}

/// Case selection for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CaseSelection {
    /// Render all cases
    #[default]
    All,
    /// Render a range of cases (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Render specific cases (1-indexed)
    Cases(Vec<u32>),
}

impl CaseSelection {
    /// Check if a case number should be included.
    pub fn includes(&self, case: u32) -> bool {
        match self {
            CaseSelection::All => true,
            CaseSelection::Range(range) => range.contains(&case),
            CaseSelection::Cases(cases) => cases.contains(&case),
        }
    }

    /// Parse a selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(CaseSelection::All);
        }

        let number = |part: &str| -> Result<u32> {
            part.trim()
                .parse()
                .map_err(|_| Error::Other(format!("invalid case number: {:?}", part.trim())))
        };

        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                return Ok(CaseSelection::Range(number(start)?..=number(end)?));
            }
        }

        let mut cases = Vec::new();
        for part in s.split(',') {
            if let Some((start, end)) = part.split_once('-') {
                for c in number(start)?..=number(end)? {
                    if !cases.contains(&c) {
                        cases.push(c);
                    }
                }
            } else {
                let c = number(part)?;
                if !cases.contains(&c) {
                    cases.push(c);
                }
            }
        }

        cases.sort_unstable();
        Ok(CaseSelection::Cases(cases))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_title(false)
            .with_csv_delimiter(';')
            .with_full_page(true);

        assert!(!options.include_title);
        assert!(options.include_footer);
        assert_eq!(options.csv_delimiter, ';');
        assert!(options.full_page);
    }

    #[test]
    fn test_case_selection_includes() {
        let all = CaseSelection::All;
        assert!(all.includes(1));
        assert!(all.includes(100));

        let range = CaseSelection::Range(5..=10);
        assert!(!range.includes(4));
        assert!(range.includes(5));
        assert!(range.includes(10));
        assert!(!range.includes(11));

        let cases = CaseSelection::Cases(vec![1, 3, 5, 7]);
        assert!(cases.includes(1));
        assert!(!cases.includes(2));
    }

    #[test]
    fn test_case_selection_parse() {
        assert_eq!(CaseSelection::parse("all").unwrap(), CaseSelection::All);
        assert_eq!(
            CaseSelection::parse("2-4").unwrap(),
            CaseSelection::Range(2..=4)
        );
        assert_eq!(
            CaseSelection::parse("1,3,5-7,3").unwrap(),
            CaseSelection::Cases(vec![1, 3, 5, 6, 7])
        );
        assert!(CaseSelection::parse("1,x").is_err());
    }
}
