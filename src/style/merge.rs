//! Diff and selective merge of style values.

use super::{LayoutStyle, LayoutStyleChange, StyleFields, StyleValue, TextStyle, TextStyleChange};
use crate::error::{Error, Result};

/// One customized field of a style value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleChange {
    /// A text attribute
    Text(TextStyleChange),
    /// A layout attribute
    Layout(LayoutStyleChange),
}

impl StyleChange {
    /// Name of the field this change touches.
    pub fn field_name(&self) -> &'static str {
        match self {
            StyleChange::Text(c) => c.field_name(),
            StyleChange::Layout(c) => c.field_name(),
        }
    }
}

fn text_changes(base: &TextStyle, changed: &TextStyle) -> impl Iterator<Item = StyleChange> {
    TextStyle::compare(base, changed)
        .into_iter()
        .map(StyleChange::Text)
}

fn layout_changes(base: &LayoutStyle, changed: &LayoutStyle) -> impl Iterator<Item = StyleChange> {
    LayoutStyle::compare(base, changed)
        .into_iter()
        .map(StyleChange::Layout)
}

/// Fields where `changed` differs from `base`, with `changed`'s values.
///
/// Both values must be of the same variant; the composite variant is
/// compared sub-style by sub-style.
pub fn compare(base: &StyleValue, changed: &StyleValue) -> Result<Vec<StyleChange>> {
    match (base, changed) {
        (StyleValue::Text(a), StyleValue::Text(b)) => Ok(text_changes(a, b).collect()),
        (StyleValue::Layout(a), StyleValue::Layout(b)) => Ok(layout_changes(a, b).collect()),
        (StyleValue::LayoutText(a), StyleValue::LayoutText(b)) => Ok(text_changes(&a.text, &b.text)
            .chain(layout_changes(&a.layout, &b.layout))
            .collect()),
        _ => Err(Error::IncompatibleStyles {
            from: changed.variant_name(),
            to: base.variant_name(),
        }),
    }
}

/// Fields of `value` that differ from a default instance of its variant.
pub fn customized(value: &StyleValue) -> Vec<StyleChange> {
    match value {
        StyleValue::Text(t) => t.customized().into_iter().map(StyleChange::Text).collect(),
        StyleValue::Layout(l) => l.customized().into_iter().map(StyleChange::Layout).collect(),
        StyleValue::LayoutText(lt) => lt
            .text
            .customized()
            .into_iter()
            .map(StyleChange::Text)
            .chain(lt.layout.customized().into_iter().map(StyleChange::Layout))
            .collect(),
    }
}

/// Overlay the explicitly set fields of `from` onto `to`, in place.
///
/// A field of `from` still equal to its variant's default never overwrites
/// `to`. A text or layout value may be joined into the matching half of a
/// composite value; any other variant mismatch is an error and leaves `to`
/// untouched.
pub fn join_with(from: &StyleValue, to: &mut StyleValue) -> Result<()> {
    if *from == *to {
        return Ok(());
    }
    match (from, to) {
        (StyleValue::Text(f), StyleValue::Text(t)) => TextStyle::join_with(f, t),
        (StyleValue::Layout(f), StyleValue::Layout(t)) => LayoutStyle::join_with(f, t),
        (StyleValue::LayoutText(f), StyleValue::LayoutText(t)) => {
            TextStyle::join_with(&f.text, &mut t.text);
            LayoutStyle::join_with(&f.layout, &mut t.layout);
        }
        (StyleValue::Text(f), StyleValue::LayoutText(t)) => TextStyle::join_with(f, &mut t.text),
        (StyleValue::Layout(f), StyleValue::LayoutText(t)) => {
            LayoutStyle::join_with(f, &mut t.layout)
        }
        (from, to) => {
            return Err(Error::IncompatibleStyles {
                from: from.variant_name(),
                to: to.variant_name(),
            })
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Border, Color, HorizontalAlignment, LayoutTextStyle};

    fn customized_text() -> StyleValue {
        StyleValue::Text(TextStyle::new().bold().with_font_size(14.0))
    }

    #[test]
    fn test_join_with_self_is_identity() {
        let values = [
            customized_text(),
            StyleValue::Layout(LayoutStyle::new().with_borders(Border::thin())),
            StyleValue::LayoutText(LayoutTextStyle::new(
                TextStyle::new().italic(),
                LayoutStyle::new().with_background(Color::LIGHT_GRAY),
            )),
        ];
        for value in values {
            let mut target = value.clone();
            join_with(&value, &mut target).unwrap();
            assert_eq!(target, value);
        }
    }

    #[test]
    fn test_compare_against_baseline() {
        let value = customized_text();
        let changes = compare(&value.baseline(), &value).unwrap();
        assert_eq!(
            changes,
            vec![
                StyleChange::Text(TextStyleChange::FontSize(14.0)),
                StyleChange::Text(TextStyleChange::Bold(true)),
            ]
        );
        assert_eq!(changes, customized(&value));
    }

    #[test]
    fn test_join_only_touches_customized_fields() {
        let from = customized_text();
        let mut to = StyleValue::Text(
            TextStyle::new()
                .italic()
                .with_color(Color::RED)
                .with_font_name("Courier"),
        );
        join_with(&from, &mut to).unwrap();

        let StyleValue::Text(t) = to else {
            panic!("variant changed");
        };
        assert!(t.bold);
        assert_eq!(t.font_size, 14.0);
        assert!(t.italic);
        assert_eq!(t.color, Color::RED);
        assert_eq!(t.font_name.as_deref(), Some("Courier"));
    }

    #[test]
    fn test_defaults_never_overwrite() {
        // `from` explicitly sets the default size, which is indistinguishable from unset
        let from = StyleValue::Text(TextStyle::new().with_font_size(10.0));
        let mut to = StyleValue::Text(TextStyle::new().with_font_size(18.0));
        join_with(&from, &mut to).unwrap();
        assert_eq!(to.text().map(|t| t.font_size), Some(18.0));
    }

    #[test]
    fn test_composite_recurses_into_sub_styles() {
        let from = StyleValue::LayoutText(LayoutTextStyle::new(
            TextStyle::new().bold(),
            LayoutStyle::new().with_alignment(HorizontalAlignment::Right),
        ));
        let mut to = StyleValue::LayoutText(LayoutTextStyle::new(
            TextStyle::new().with_font_size(8.0),
            LayoutStyle::new().with_width(50.0),
        ));
        join_with(&from, &mut to).unwrap();

        let text = to.text().unwrap();
        let layout = to.layout().unwrap();
        assert!(text.bold);
        assert_eq!(text.font_size, 8.0);
        assert_eq!(layout.horizontal_alignment, HorizontalAlignment::Right);
        assert_eq!(layout.width, Some(50.0));
    }

    #[test]
    fn test_join_half_into_composite() {
        let mut to = StyleValue::LayoutText(LayoutTextStyle::default());
        join_with(&customized_text(), &mut to).unwrap();
        assert!(to.text().unwrap().bold);
        assert_eq!(to.layout(), Some(&LayoutStyle::default()));
    }

    #[test]
    fn test_incompatible_variants() {
        let mut to = StyleValue::Text(TextStyle::new());
        let from = StyleValue::Layout(LayoutStyle::new().with_width(10.0));
        let err = join_with(&from, &mut to).unwrap_err();
        assert!(matches!(
            err,
            Error::IncompatibleStyles {
                from: "Layout",
                to: "Text"
            }
        ));
        assert_eq!(to, StyleValue::Text(TextStyle::new()));
        assert!(compare(&to, &from).is_err());
    }
}
