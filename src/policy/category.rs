use super::Config;
use crate::introspect::Introspect;
use std::borrow::Cow;

/// Classification of a visited value, recomputed on every visit
pub enum ValueCategory<'a> {
    Null,
    /// Strings, primitives and trusted library values, already converted to text
    Scalar(Cow<'a, str>),
    Sequence(Vec<&'a dyn Introspect>),
    Keyed(Vec<(&'a dyn Introspect, &'a dyn Introspect)>),
    /// An object with at least one conforming accessor
    Composite(Vec<Accessor>),
    /// Nothing we know how to represent
    Unrepresentable,
}

/// A conforming accessor and the member name derived from it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accessor {
    pub method: &'static str,
    pub member: String,
}

impl ValueCategory<'_> {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Null | Self::Unrepresentable)
    }
}

/// Classifies `value`
///
/// Order: null, string, sequence, keyed collection, primitive or trusted
/// library value, composite. Containers are checked before the namespace
/// because the standard containers live in a trusted namespace themselves.
pub fn classify<'a>(value: &'a dyn Introspect, config: &Config) -> ValueCategory<'a> {
    if value.is_null() {
        return ValueCategory::Null;
    }
    if let Some(text) = value.as_text() {
        return ValueCategory::Scalar(text);
    }
    if let Some(items) = value.elements() {
        return ValueCategory::Sequence(items);
    }
    if let Some(entries) = value.entries() {
        return ValueCategory::Keyed(entries);
    }
    if value.is_primitive() || config.is_trusted(value.type_path()) {
        return value
            .display()
            .map_or(ValueCategory::Unrepresentable, |text| {
                ValueCategory::Scalar(Cow::Owned(text))
            });
    }

    let accessors: Vec<Accessor> = value
        .accessors()
        .iter()
        .filter_map(|&method| {
            config
                .member_name(method)
                .map(|member| Accessor { method, member })
        })
        .collect();

    if accessors.is_empty() {
        ValueCategory::Unrepresentable
    } else {
        ValueCategory::Composite(accessors)
    }
}
