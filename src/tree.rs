//! Element-tree façade
//!
//! [`TreeBuilder`] turns an object graph into [`Element`]s; the free functions
//! in this module build nodes by hand and write trees out as XML.

mod builder;
mod model;
mod nodes;
mod writer;

pub use builder::TreeBuilder;
pub use model::{Attributes, Content, Document, Element, Parent};
pub use nodes::{attributes, node, root, text_node};
pub use writer::{write_document, write_element};
