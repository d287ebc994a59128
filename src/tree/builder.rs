use super::model::{Document, Element, Parent};
use crate::error::Result;
use crate::introspect::Introspect;
use crate::policy::{Config, Depth, KeyedValue, Role, Traversal, Visit};
use tracing::{instrument, trace};

/// Projects object graphs into element trees
///
/// Scalar members become attributes of the enclosing element; sequences,
/// keyed collections and nested composites become child elements named after
/// the member. Keyed-collection entries become attributes of their element.
/// The tree is assembled in memory and only attached to the parent once the
/// whole subtree is built.
#[derive(Clone, Debug, Default)]
pub struct TreeBuilder {
    traversal: Traversal,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            traversal: Traversal::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        self.traversal.config()
    }

    /// Serializes `value` into a fresh document, unbounded, with an inferred name
    pub fn serialize(&self, value: &dyn Introspect) -> Result<Document> {
        self.serialize_named(value, None, Depth::Unbounded)
    }

    /// Serializes `value` into a fresh document
    pub fn serialize_named(
        &self,
        value: &dyn Introspect,
        name: Option<&str>,
        depth: Depth,
    ) -> Result<Document> {
        let mut document = Document::new();
        self.append(&mut document, value, name, depth)?;
        Ok(document)
    }

    /// Serializes `value` and appends the result to `parent`
    ///
    /// `parent` is left untouched when nothing is emitted: depth zero, a null
    /// or unrepresentable value, an unnamed empty sequence, or an invalid name.
    #[instrument(level = "debug", skip_all, fields(name = ?name, depth = %depth))]
    pub fn append<P: Parent + ?Sized>(
        &self,
        parent: &mut P,
        value: &dyn Introspect,
        name: Option<&str>,
        depth: Depth,
    ) -> Result<()> {
        let visit = self.traversal.plan(value, name, depth, Role::Root)?;
        if let Some(element) = self.build(visit)? {
            parent.append(element);
        }
        Ok(())
    }

    fn build(&self, visit: Visit<'_>) -> Result<Option<Element>> {
        let element = match visit {
            Visit::Skip => return Ok(None),
            Visit::Scalar { name, text } => Element::new(name).with_text(text),
            Visit::Sequence { name, items, depth } => {
                let mut element = Element::new(name);
                for item in items {
                    let visit = self.traversal.plan(item, None, depth, Role::Element)?;
                    if let Some(child) = self.build(visit)? {
                        element.append(child);
                    }
                }
                element
            }
            Visit::Keyed { name, entries } => {
                let mut element = Element::new(name);
                for entry in entries {
                    if !is_attribute_name(&entry.key) {
                        trace!(key = %entry.key, "invalid attribute name, skipping entry");
                        continue;
                    }
                    match entry.value {
                        KeyedValue::Single(text) => {
                            element.set_attribute(entry.key, text);
                        }
                        // each write replaces the previous one
                        KeyedValue::Multiple(texts) => {
                            for text in texts {
                                element.set_attribute(&*entry.key, text);
                            }
                        }
                    }
                }
                element
            }
            Visit::Composite {
                name,
                members,
                depth,
            } => {
                let mut element = Element::new(name);
                for (member_name, member) in &members {
                    let visit =
                        self.traversal
                            .plan(&**member, Some(member_name.as_str()), depth, Role::Member)?;
                    match visit {
                        Visit::Scalar { name, text } => {
                            element.set_attribute(name, text);
                        }
                        other => {
                            if let Some(child) = self.build(other)? {
                                element.append(child);
                            }
                        }
                    }
                }
                element
            }
        };
        Ok(Some(element))
    }
}

/// Map keys are kept as written as long as they are XML names: a letter or
/// `_` first, then letters, digits, `_`, `-` or `.`
fn is_attribute_name(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
