//! Style value types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::fields::style_struct;
use super::StyleCondition;
use crate::error::{Error, Result};
use crate::model::{NodeKind, NodeRef, NodeTag};

/// RGB color, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::rgb(211, 211, 211);

    /// Create a color from components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Color::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Color::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Line style of a border or separator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderStyle {
    /// No line
    #[default]
    None,
    Thin,
    Medium,
    Thick,
    Dashed,
    Dotted,
    Double,
}

impl BorderStyle {
    /// Check if a line is drawn.
    pub fn is_visible(self) -> bool {
        self != BorderStyle::None
    }
}

/// One edge of a cell or block border.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Border {
    /// Line style
    pub style: BorderStyle,
    /// Line color
    pub color: Color,
}

impl Border {
    /// No border.
    pub const NONE: Border = Border {
        style: BorderStyle::None,
        color: Color::BLACK,
    };

    /// Create a border.
    pub const fn new(style: BorderStyle, color: Color) -> Self {
        Self { style, color }
    }

    /// Thin black border.
    pub const fn thin() -> Self {
        Self::new(BorderStyle::Thin, Color::BLACK)
    }
}

/// Background fill pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPattern {
    /// No fill
    #[default]
    None,
    Solid,
    LightGray,
    DarkGray,
    Stripes,
}

/// Horizontal alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlignment {
    /// Renderer decides (text left, numbers right)
    #[default]
    General,
    Left,
    Center,
    Right,
    Justify,
}

/// Vertical alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlignment {
    #[default]
    Top,
    Center,
    Bottom,
}

style_struct! {
    /// Text attributes.
    pub struct TextStyle => TextStyleChange {
        /// Font name
        font_name: Option<String> = None => FontName,
        /// Generic font family (e.g. "serif")
        font_family: Option<String> = None => FontFamily,
        /// Locale used for hyphenation and number formatting
        locale: Option<String> = None => Locale,
        /// Font size in points
        font_size: f32 = 10.0 => FontSize,
        /// Bold text
        bold: bool = false => Bold,
        /// Italic text
        italic: bool = false => Italic,
        /// Underlined text
        underline: bool = false => Underline,
        /// Text color
        color: Color = Color::BLACK => FontColor,
        /// Number format pattern (e.g. "#,##0.00")
        number_format: Option<String> = None => NumberFormat,
    }
}

impl TextStyle {
    /// Create a default text style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font size and return self.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the font name and return self.
    pub fn with_font_name(mut self, name: impl Into<String>) -> Self {
        self.font_name = Some(name.into());
        self
    }

    /// Make the text bold and return self.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Make the text italic and return self.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Set the text color and return self.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

style_struct! {
    /// Layout and geometry attributes.
    pub struct LayoutStyle => LayoutStyleChange {
        /// Top border
        border_top: Border = Border::NONE => BorderTop,
        /// Right border
        border_right: Border = Border::NONE => BorderRight,
        /// Bottom border
        border_bottom: Border = Border::NONE => BorderBottom,
        /// Left border
        border_left: Border = Border::NONE => BorderLeft,
        /// Pattern foreground color
        fill_foreground: Option<Color> = None => FillForeground,
        /// Background color
        fill_background: Option<Color> = None => FillBackground,
        /// Fill pattern
        fill_pattern: FillPattern = FillPattern::None => Pattern,
        /// Horizontal alignment
        horizontal_alignment: HorizontalAlignment = HorizontalAlignment::General => AlignHorizontal,
        /// Vertical alignment
        vertical_alignment: VerticalAlignment = VerticalAlignment::Top => AlignVertical,
        /// Width in points
        width: Option<f32> = None => Width,
        /// Size width to content
        auto_width: bool = false => AutoWidth,
        /// Shrink text to fit the box
        shrink_to_fit: bool = false => ShrinkToFit,
        /// Wrap text inside the box
        wrap_text: bool = false => WrapText,
        /// Indentation level
        indent: u16 = 0 => Indent,
        /// Text rotation in degrees
        rotation: i16 = 0 => Rotation,
        /// Height in points
        height: Option<f32> = None => Height,
    }
}

impl LayoutStyle {
    /// Create a default layout style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set all four borders and return self.
    pub fn with_borders(mut self, border: Border) -> Self {
        self.border_top = border;
        self.border_right = border;
        self.border_bottom = border;
        self.border_left = border;
        self
    }

    /// Set a solid background and return self.
    pub fn with_background(mut self, color: Color) -> Self {
        self.fill_background = Some(color);
        self.fill_pattern = FillPattern::Solid;
        self
    }

    /// Set the horizontal alignment and return self.
    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }

    /// Set the width and return self.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }
}

/// A text style and a layout style applied together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutTextStyle {
    /// Text attributes
    pub text: TextStyle,
    /// Layout attributes
    pub layout: LayoutStyle,
}

impl LayoutTextStyle {
    /// Combine a text and a layout style.
    pub fn new(text: TextStyle, layout: LayoutStyle) -> Self {
        Self { text, layout }
    }
}

/// The appearance carried by a [`Style`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StyleValue {
    /// Text attributes only
    Text(TextStyle),
    /// Layout attributes only
    Layout(LayoutStyle),
    /// Both, as named sub-styles
    LayoutText(LayoutTextStyle),
}

impl StyleValue {
    /// Variant name.
    pub fn variant_name(&self) -> &'static str {
        match self {
            StyleValue::Text(_) => "Text",
            StyleValue::Layout(_) => "Layout",
            StyleValue::LayoutText(_) => "LayoutText",
        }
    }

    /// A default instance of the same variant.
    pub fn baseline(&self) -> StyleValue {
        match self {
            StyleValue::Text(_) => StyleValue::Text(TextStyle::default()),
            StyleValue::Layout(_) => StyleValue::Layout(LayoutStyle::default()),
            StyleValue::LayoutText(_) => StyleValue::LayoutText(LayoutTextStyle::default()),
        }
    }

    /// Text attributes, if this value has any.
    pub fn text(&self) -> Option<&TextStyle> {
        match self {
            StyleValue::Text(t) => Some(t),
            StyleValue::LayoutText(lt) => Some(&lt.text),
            StyleValue::Layout(_) => None,
        }
    }

    /// Layout attributes, if this value has any.
    pub fn layout(&self) -> Option<&LayoutStyle> {
        match self {
            StyleValue::Layout(l) => Some(l),
            StyleValue::LayoutText(lt) => Some(&lt.layout),
            StyleValue::Text(_) => None,
        }
    }

    /// Widen into the composite variant, filling the missing half with defaults.
    pub fn into_layout_text(self) -> LayoutTextStyle {
        match self {
            StyleValue::Text(text) => LayoutTextStyle::new(text, LayoutStyle::default()),
            StyleValue::Layout(layout) => LayoutTextStyle::new(TextStyle::default(), layout),
            StyleValue::LayoutText(lt) => lt,
        }
    }
}

impl From<TextStyle> for StyleValue {
    fn from(style: TextStyle) -> Self {
        StyleValue::Text(style)
    }
}

impl From<LayoutStyle> for StyleValue {
    fn from(style: LayoutStyle) -> Self {
        StyleValue::Layout(style)
    }
}

impl From<LayoutTextStyle> for StyleValue {
    fn from(style: LayoutTextStyle) -> Self {
        StyleValue::LayoutText(style)
    }
}

/// A reusable appearance, optionally restricted by a condition.
///
/// Styles are shared between nodes as `Arc<Style>` and compared
/// structurally.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Applicability condition
    pub condition: Option<StyleCondition>,
    /// Appearance
    pub value: StyleValue,
}

impl Style {
    /// Create an unconditional style.
    pub fn new(value: impl Into<StyleValue>) -> Self {
        Self {
            condition: None,
            value: value.into(),
        }
    }

    /// Create a text style.
    pub fn text(text: TextStyle) -> Self {
        Self::new(text)
    }

    /// Create a layout style.
    pub fn layout(layout: LayoutStyle) -> Self {
        Self::new(layout)
    }

    /// Create a composite layout-and-text style.
    pub fn layout_text(text: TextStyle, layout: LayoutStyle) -> Self {
        Self::new(LayoutTextStyle::new(text, layout))
    }

    /// Set the condition and return self.
    pub fn with_condition(mut self, condition: StyleCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Applicability condition.
    pub fn condition(&self) -> Option<&StyleCondition> {
        self.condition.as_ref()
    }

    /// Target tag of the condition.
    pub fn target(&self) -> Option<NodeTag> {
        self.condition.as_ref().map(StyleCondition::target)
    }

    /// Check if the style may be attached to nodes of `kind`.
    ///
    /// Only the condition's target tag is consulted.
    pub fn applies_to(&self, kind: NodeKind) -> bool {
        self.condition
            .as_ref()
            .map_or(true, |c| c.applies_to(kind))
    }

    /// Check the full condition (tag and predicate) against `node`.
    pub fn matches(&self, node: NodeRef<'_>) -> bool {
        self.condition.as_ref().map_or(true, |c| c.matches(node))
    }

    /// Text attributes, if any.
    pub fn text_style(&self) -> Option<&TextStyle> {
        self.value.text()
    }

    /// Layout attributes, if any.
    pub fn layout_style(&self) -> Option<&LayoutStyle> {
        self.value.layout()
    }

    /// Overlay the customized fields of `from` onto this style's value.
    pub fn join_from(&mut self, from: &Style) -> Result<()> {
        super::merge::join_with(&from.value, &mut self.value)
    }
}
