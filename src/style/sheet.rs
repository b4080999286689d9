//! JSON style sheets.
//!
//! A style sheet is a list of rules, each pairing a node tag with a style
//! value:
//!
//! ```json
//! {
//!   "rules": [
//!     { "target": { "kind": "table_header_cell" },
//!       "style": { "type": "text", "bold": true } },
//!     { "target": "text",
//!       "style": { "type": "layout", "wrap_text": true } }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Style, StyleCondition, StyleService, StyleValue};
use crate::error::{Error, Result};
use crate::model::NodeTag;

/// One tag-targeted style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRule {
    /// Nodes the rule applies to
    pub target: NodeTag,
    /// Appearance
    pub style: StyleValue,
}

impl StyleRule {
    /// Create a rule.
    pub fn new(target: impl Into<NodeTag>, style: impl Into<StyleValue>) -> Self {
        Self {
            target: target.into(),
            style: style.into(),
        }
    }

    /// Convert into a conditioned style.
    pub fn into_style(self) -> Style {
        Style::new(self.style).with_condition(StyleCondition::for_tag(self.target))
    }
}

/// Ordered list of style rules loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    /// Rules in registration order
    #[serde(default)]
    pub rules: Vec<StyleRule>,
}

impl StyleSheet {
    /// Create an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule and return self.
    pub fn with_rule(mut self, rule: StyleRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Parse and validate a sheet from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let sheet: StyleSheet = serde_json::from_str(json)?;
        sheet.validate()?;
        Ok(sheet)
    }

    /// Read, parse and validate a sheet from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading style sheet from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize the sheet as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check values a renderer could not honor.
    pub fn validate(&self) -> Result<()> {
        for (i, rule) in self.rules.iter().enumerate() {
            if let Some(text) = rule.style.text() {
                if !(text.font_size > 0.0) {
                    return Err(Error::StyleSheet(format!(
                        "rule {}: font_size must be positive, got {}",
                        i, text.font_size
                    )));
                }
            }
            if let Some(layout) = rule.style.layout() {
                for (name, value) in [("width", layout.width), ("height", layout.height)] {
                    if let Some(v) = value {
                        if !(v > 0.0) {
                            return Err(Error::StyleSheet(format!(
                                "rule {}: {} must be positive, got {}",
                                i, name, v
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the sheet has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Convert every rule into a conditioned style, keeping order.
    pub fn into_styles(self) -> Vec<Style> {
        self.rules.into_iter().map(StyleRule::into_style).collect()
    }

    /// Register the sheet's styles after those already in `service`.
    pub fn apply_to(self, service: &mut StyleService) {
        log::debug!("applying {} style sheet rules", self.rules.len());
        service.add_styles(self.into_styles());
    }

    /// Build a fresh service holding the sheet's styles.
    pub fn into_service(self) -> StyleService {
        let mut service = StyleService::new();
        self.apply_to(&mut service);
        service
    }
}
