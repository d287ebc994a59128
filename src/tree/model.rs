//! Element tree data model

use indexmap::IndexMap;

/// Attribute map of an element; insertion order is output order
pub type Attributes = IndexMap<String, String>;

/// Owning container for a standalone element tree
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub children: Vec<Element>,
}

/// A named node with attributes and ordered content
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Attributes,
    pub children: Vec<Content>,
}

/// Content of an element
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Element(Element),
    Text(String),
}

/// Anything an element can be appended to
pub trait Parent {
    fn append(&mut self, element: Element);
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first top-level element
    pub fn root(&self) -> Option<&Element> {
        self.children.first()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Parent for Document {
    fn append(&mut self, element: Element) {
        self.children.push(element);
    }
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes.extend(attributes);
        self
    }

    pub fn with_child(mut self, child: impl Into<Content>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Content::Text(text.into()))
    }

    /// Sets an attribute; a repeated key keeps its position and takes the new value
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.attributes.insert(key.into(), value.into())
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Child elements, skipping text
    pub fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|child| match child {
            Content::Element(element) => Some(element),
            Content::Text(_) => None,
        })
    }

    /// First child element called `name`
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.elements().find(|element| element.name == name)
    }

    /// Concatenated text content of the direct children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                Content::Text(text) => Some(text.as_str()),
                Content::Element(_) => None,
            })
            .collect()
    }
}

impl Parent for Element {
    fn append(&mut self, element: Element) {
        self.children.push(Content::Element(element));
    }
}

impl From<Element> for Content {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}
