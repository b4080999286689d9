//! Field tables for style structs.
//!
//! Each style struct is declared through [`style_struct!`], which also
//! generates its `Default` and a change enum with one variant per field. The
//! diff in [`StyleFields::compare`] is therefore exhaustive over the fields
//! by construction.

use std::fmt;

/// A style struct whose fields can be diffed and overlaid one by one.
pub trait StyleFields: Default + Clone + PartialEq {
    /// One field together with its value.
    type Change: Clone + PartialEq + fmt::Debug;

    /// Fields where `changed` differs from `base`, with `changed`'s values.
    fn compare(base: &Self, changed: &Self) -> Vec<Self::Change>;

    /// Overwrite the field named by `change`.
    fn apply(&mut self, change: Self::Change);

    /// Fields that differ from a freshly constructed default.
    fn customized(&self) -> Vec<Self::Change> {
        Self::compare(&Self::default(), self)
    }

    /// Overlay the customized fields of `from` onto `to`.
    ///
    /// Fields left at their default in `from` never overwrite `to`.
    fn join_with(from: &Self, to: &mut Self) {
        if from == to {
            return;
        }
        for change in from.customized() {
            to.apply(change);
        }
    }
}

/// Declare a style struct with per-field defaults and its change enum.
///
/// ```ignore
/// style_struct! {
///     pub struct Example => ExampleChange {
///         size: f32 = 10.0 => Size,
///     }
/// }
/// ```
macro_rules! style_struct {
    (
        $(#[$meta:meta])*
        pub struct $name:ident => $change:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty = $default:expr => $variant:ident,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(default)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $($field: $default,)*
                }
            }
        }

        #[doc = concat!("An explicitly set field of [`", stringify!($name), "`] with its value.")]
        #[derive(Debug, Clone, PartialEq)]
        pub enum $change {
            $(
                $(#[$fmeta])*
                $variant($ty),
            )*
        }

        impl $change {
            /// Name of the field this change touches.
            pub fn field_name(&self) -> &'static str {
                match self {
                    $($change::$variant(_) => stringify!($field),)*
                }
            }
        }

        impl $crate::style::StyleFields for $name {
            type Change = $change;

            fn compare(base: &Self, changed: &Self) -> Vec<$change> {
                let mut changes = Vec::new();
                $(
                    if base.$field != changed.$field {
                        changes.push($change::$variant(changed.$field.clone()));
                    }
                )*
                changes
            }

            fn apply(&mut self, change: $change) {
                match change {
                    $($change::$variant(value) => self.$field = value,)*
                }
            }
        }
    };
}

pub(crate) use style_struct;
