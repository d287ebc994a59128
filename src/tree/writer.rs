//! Markup emission for element trees

use super::model::{Content, Document, Element};
use crate::error::Result;
use std::fmt::{self, Write as _};
use std::io::Write;

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Writes `document` as XML, declaration first
pub fn write_document<W: Write + ?Sized>(document: &Document, sink: &mut W) -> Result<()> {
    write!(sink, "{document}")?;
    Ok(())
}

/// Writes a single element subtree, without a declaration
pub fn write_element<W: Write + ?Sized>(element: &Element, sink: &mut W) -> Result<()> {
    write!(sink, "{element}")?;
    Ok(())
}

fn render_element(element: &Element, out: &mut impl fmt::Write) -> fmt::Result {
    out.write_char('<')?;
    out.write_str(&element.name)?;

    for (key, value) in &element.attributes {
        write!(out, " {key}=\"{}\"", escape_xml(value))?;
    }

    if element.children.is_empty() {
        return out.write_str("/>");
    }

    out.write_char('>')?;
    for child in &element.children {
        match child {
            Content::Element(child) => render_element(child, out)?,
            Content::Text(text) => out.write_str(&escape_xml(text))?,
        }
    }
    write!(out, "</{}>", element.name)
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_element(self, f)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(DECLARATION)?;
        for element in &self.children {
            render_element(element, f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Parent;

    #[test]
    fn test_empty_element_self_closes() {
        let mut element = Element::new("data");
        element.set_attribute("x", "1");
        assert_eq!(element.to_string(), r#"<data x="1"/>"#);
    }

    #[test]
    fn test_nested_elements_and_text() {
        let element = Element::new("menu")
            .with_child(Element::new("name").with_text("Root"))
            .with_child(Element::new("children"));
        assert_eq!(
            element.to_string(),
            "<menu><name>Root</name><children/></menu>"
        );
    }

    #[test]
    fn test_escaping() {
        let mut element = Element::new("q").with_text("a < b & c");
        element.set_attribute("title", "\"quoted\" 'single'");
        assert_eq!(
            element.to_string(),
            "<q title=\"&quot;quoted&quot; &apos;single&apos;\">a &lt; b &amp; c</q>"
        );
    }

    #[test]
    fn test_write_document_to_sink() -> Result<()> {
        let mut document = Document::new();
        document.append(Element::new("root"));

        let mut sink = Vec::new();
        write_document(&document, &mut sink)?;
        assert_eq!(
            String::from_utf8_lossy(&sink),
            format!("{DECLARATION}<root/>")
        );

        let mut sink = Vec::new();
        if let Some(root) = document.root() {
            write_element(root, &mut sink)?;
        }
        assert_eq!(String::from_utf8_lossy(&sink), "<root/>");
        Ok(())
    }
}
