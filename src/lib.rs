//! mirror: best-effort projection of object graphs into trees and text
//!
//! This crate provides functionality to:
//! - Classify arbitrary values through the [`Introspect`] capability
//! - Build element trees from object graphs ([`TreeBuilder`])
//! - Stream object graphs as delimited text ([`TextEmitter`])
//! - Bound recursion with a [`Depth`] budget
//! - Write element trees out as XML
//!
//! Data-shape problems such as failing accessors or invalid names never abort
//! a call; the offending member is left out.
//!
//! # Examples
//! ```
//! use mirror::{introspect_getters, Depth, Result};
//!
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! introspect_getters!(Server {
//!     getHost => host,
//!     getPort => port,
//! });
//!
//! fn example() -> Result<()> {
//!     let server = Server { host: "localhost".to_string(), port: 8080 };
//!
//!     let text = mirror::to_text(&server)?;
//!     assert_eq!(text, r#"{host : "localhost", port : "8080"}"#);
//!
//!     let document = mirror::to_document_named(&server, Some("upstream"), Depth::limited(1))?;
//!     assert_eq!(
//!         document.root().map(ToString::to_string).as_deref(),
//!         Some(r#"<upstream host="localhost" port="8080"/>"#)
//!     );
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod error;
pub mod introspect;
pub mod policy;
pub mod text;
pub mod tree;

// Re-exports
pub use error::{AccessError, Error, Result};
pub use introspect::{simple_name, Introspect, Member};
pub use policy::{Config, Depth, MemberErrorPolicy, NamePattern, Traversal};
pub use text::TextEmitter;
pub use tree::{Content, Document, Element, TreeBuilder};

/// Builds a document from `value` with the default configuration
pub fn to_document(value: &dyn Introspect) -> Result<Document> {
    TreeBuilder::new().serialize(value)
}

/// Builds a document from `value`; `depth` accepts `-1` for unbounded
pub fn to_document_named(
    value: &dyn Introspect,
    name: Option<&str>,
    depth: impl Into<Depth>,
) -> Result<Document> {
    TreeBuilder::new().serialize_named(value, name, depth.into())
}

/// Renders `value` as text with the default configuration
pub fn to_text(value: &dyn Introspect) -> Result<String> {
    TextEmitter::new().to_string(value, None, Depth::Unbounded)
}

/// Renders `value` as text; `depth` accepts `-1` for unbounded
pub fn to_text_named(
    value: &dyn Introspect,
    name: Option<&str>,
    depth: impl Into<Depth>,
) -> Result<String> {
    TextEmitter::new().to_string(value, name, depth.into())
}
