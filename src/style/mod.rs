//! Style engine: values, diff/merge, conditions and resolution.

mod condition;
mod fields;
pub mod merge;
mod service;
mod sheet;
mod value;

pub use condition::StyleCondition;
pub use fields::StyleFields;
pub use merge::{compare, customized, join_with, StyleChange};
pub use service::{GlueStyle, StyleService, StyleSink};
pub use sheet::{StyleRule, StyleSheet};
pub use value::{
    Border, BorderStyle, Color, FillPattern, HorizontalAlignment, LayoutStyle, LayoutStyleChange,
    LayoutTextStyle, Style, StyleValue, TextStyle, TextStyleChange, VerticalAlignment,
};
