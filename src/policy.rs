//! Traversal policy shared by the tree builder and the text emitter
//!
//! Both façades walk the graph the same way: classify the value, settle on a
//! name, check the depth budget and the name rule, and for composites invoke
//! the accessors. [`Traversal::plan`] does all of that for one frame and hands
//! back a [`Visit`] that the façade only has to render.

mod category;
mod config;
mod depth;

pub use category::{classify, Accessor, ValueCategory};
pub use config::{Config, MemberErrorPolicy, NamePattern};
pub use depth::Depth;

use crate::error::{Error, Result};
use crate::introspect::{simple_name, Introspect, Member};
use std::borrow::Cow;
use tracing::{debug, trace};

/// Position of a value relative to the frame that reached it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// The value handed to the façade
    Root,
    /// Result of an accessor on a composite
    Member,
    /// Item of a sequence
    Element,
}

/// Value side of a keyed-collection entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyedValue<'a> {
    Single(Cow<'a, str>),
    Multiple(Vec<Cow<'a, str>>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyedEntry<'a> {
    pub key: Cow<'a, str>,
    pub value: KeyedValue<'a>,
}

/// Outcome of planning one frame
#[derive(Debug)]
pub enum Visit<'a> {
    /// Nothing is emitted and the target stays untouched
    Skip,
    Scalar {
        name: String,
        text: Cow<'a, str>,
    },
    Sequence {
        name: String,
        items: Vec<&'a dyn Introspect>,
        /// Budget for the items
        depth: Depth,
    },
    Keyed {
        name: String,
        entries: Vec<KeyedEntry<'a>>,
    },
    Composite {
        name: String,
        /// Members in accessor order, failures and nulls already removed
        members: Vec<(String, Member<'a>)>,
        /// Budget for the members
        depth: Depth,
    },
}

impl Visit<'_> {
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }
}

/// Stateless planner; every call starts from scratch
#[derive(Clone, Debug, Default)]
pub struct Traversal {
    config: Config,
}

impl Traversal {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Plans the frame for `value`
    ///
    /// Returns [`Visit::Skip`] for nulls, unrepresentable values, an exhausted
    /// budget, an unnamed empty sequence, or a name that fails the name rule.
    /// Scalars reached through an accessor are part of the parent frame and are
    /// emitted regardless of the remaining budget.
    ///
    /// The only error is an accessor failure under [`MemberErrorPolicy::Fail`].
    pub fn plan<'a>(
        &self,
        value: &'a dyn Introspect,
        name: Option<&str>,
        depth: Depth,
        role: Role,
    ) -> Result<Visit<'a>> {
        let category = classify(value, &self.config);
        if category.is_skipped() {
            return Ok(Visit::Skip);
        }

        let inline_scalar = role == Role::Member && category.is_scalar();
        if depth.is_exhausted() && !inline_scalar {
            debug!(type_path = value.type_path(), "depth exhausted, skipping");
            return Ok(Visit::Skip);
        }

        let Some(name) = element_name(value, name, &category) else {
            return Ok(Visit::Skip);
        };
        if !self.config.is_valid_name(&name) {
            debug!(%name, "invalid element name, skipping");
            return Ok(Visit::Skip);
        }

        let visit = match category {
            ValueCategory::Scalar(text) => Visit::Scalar { name, text },
            ValueCategory::Sequence(items) => Visit::Sequence {
                name,
                items,
                depth: depth.descend(),
            },
            ValueCategory::Keyed(entries) => Visit::Keyed {
                name,
                entries: keyed_entries(entries),
            },
            ValueCategory::Composite(accessors) => Visit::Composite {
                name,
                members: self.members(value, &accessors)?,
                depth: depth.descend(),
            },
            ValueCategory::Null | ValueCategory::Unrepresentable => Visit::Skip,
        };
        Ok(visit)
    }

    /// Invokes every accessor, applying the member error policy
    fn members<'a>(
        &self,
        value: &'a dyn Introspect,
        accessors: &[Accessor],
    ) -> Result<Vec<(String, Member<'a>)>> {
        let mut members = Vec::with_capacity(accessors.len());
        for accessor in accessors {
            match value.invoke(accessor.method) {
                Ok(member) if member.is_null() => {}
                Ok(member) => members.push((accessor.member.clone(), member)),
                Err(source) => match self.config.on_member_error {
                    MemberErrorPolicy::Omit => {
                        trace!(accessor = accessor.method, error = %source, "omitting member");
                    }
                    MemberErrorPolicy::Fail => {
                        return Err(Error::Member {
                            type_path: value.type_path(),
                            accessor: accessor.method.to_owned(),
                            source,
                        });
                    }
                },
            }
        }
        Ok(members)
    }
}

/// Explicit name, or the lower-cased simple name of the type
///
/// An unnamed sequence borrows the type of its first item, so a heterogeneous
/// sequence is named after whatever comes first. An unnamed empty sequence has
/// no name at all.
fn element_name(
    value: &dyn Introspect,
    explicit: Option<&str>,
    category: &ValueCategory<'_>,
) -> Option<String> {
    if let Some(name) = explicit {
        return Some(name.to_owned());
    }
    let type_path = match category {
        ValueCategory::Sequence(items) => items.first()?.type_path(),
        _ => value.type_path(),
    };
    Some(simple_name(type_path).to_lowercase())
}

/// Keeps string keys whose value is a string or a sequence of strings
fn keyed_entries<'a>(entries: Vec<(&'a dyn Introspect, &'a dyn Introspect)>) -> Vec<KeyedEntry<'a>> {
    entries
        .into_iter()
        .filter_map(|(key, value)| {
            let Some(key) = key.as_text() else {
                trace!(type_path = key.type_path(), "non-string key, skipping entry");
                return None;
            };
            let value = match value.as_text() {
                Some(text) => KeyedValue::Single(text),
                None => KeyedValue::Multiple(
                    value
                        .elements()?
                        .into_iter()
                        .map(|item| item.as_text())
                        .collect::<Option<Vec<_>>>()?,
                ),
            };
            Some(KeyedEntry { key, value })
        })
        .collect()
}
