//! Hand-built nodes: attribute maps, elements, text elements

use super::model::{Attributes, Content, Document, Element};
use crate::error::{Error, Result};

/// Empty document to build into
pub fn root() -> Document {
    Document::new()
}

/// Builds an attribute map from a flat `key, value, key, value, ...` list
///
/// Later duplicates overwrite earlier ones. An odd number of entries is an
/// error.
pub fn attributes(pairs: &[&str]) -> Result<Attributes> {
    if pairs.len() % 2 != 0 {
        return Err(Error::OddAttributeCount { count: pairs.len() });
    }
    let mut map = Attributes::with_capacity(pairs.len() / 2);
    for pair in pairs.chunks_exact(2) {
        if let [key, value] = pair {
            map.insert((*key).to_owned(), (*value).to_owned());
        }
    }
    Ok(map)
}

/// Element with optional attributes and the given children
pub fn node(name: &str, attributes: Option<Attributes>, children: Vec<Content>) -> Element {
    let mut element = Element::new(name).with_attributes(attributes.unwrap_or_default());
    element.children = children;
    element
}

/// Element holding a single text child
pub fn text_node(name: &str, attributes: Option<Attributes>, text: &str) -> Element {
    node(name, attributes, vec![Content::Text(text.to_owned())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_from_pairs() -> Result<()> {
        let map = attributes(&["id", "7", "kind", "menu"])?;
        assert_eq!(map.get("id").map(String::as_str), Some("7"));
        assert_eq!(map.get("kind").map(String::as_str), Some("menu"));
        assert_eq!(map.len(), 2);
        Ok(())
    }

    #[test]
    fn test_attributes_duplicate_key_overwrites() -> Result<()> {
        let map = attributes(&["id", "1", "id", "2"])?;
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("id").map(String::as_str), Some("2"));
        Ok(())
    }

    #[test]
    fn test_attributes_odd_count() {
        let result = attributes(&["id", "7", "orphan"]);
        assert!(matches!(result, Err(Error::OddAttributeCount { count: 3 })));
    }

    #[test]
    fn test_attributes_empty() -> Result<()> {
        assert!(attributes(&[])?.is_empty());
        Ok(())
    }

    #[test]
    fn test_node_builders() -> Result<()> {
        let item = text_node("item", Some(attributes(&["id", "1"])?), "Open");
        let menu = node("menu", None, vec![Content::Element(item)]);

        assert_eq!(menu.name, "menu");
        assert!(menu.attributes.is_empty());
        let item = menu.child("item");
        assert_eq!(item.and_then(|i| i.attribute("id")), Some("1"));
        assert_eq!(item.map(Element::text).as_deref(), Some("Open"));
        assert!(root().is_empty());
        Ok(())
    }
}
