#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr};
use mirror::{
    introspect_getters,
    tree::{self, Content, Document, Element, Parent},
    Config, Depth, Error, MemberErrorPolicy, TreeBuilder,
};

struct Host {
    name: String,
    address: IpAddr,
    data: BTreeMap<String, String>,
    aliases: Vec<String>,
    parent: Option<Box<Host>>,
}

introspect_getters!(Host {
    getName => name,
    getAddress => address,
    getData => data,
    getAliases => aliases,
    getParent => parent,
});

fn host(name: &str) -> Host {
    let mut data = BTreeMap::new();
    data.insert("x".to_string(), "1".to_string());
    Host {
        name: name.to_string(),
        address: IpAddr::V4(Ipv4Addr::LOCALHOST),
        data,
        aliases: vec!["a".to_string(), "b".to_string()],
        parent: None,
    }
}

fn render(document: &Document) -> String {
    document.root().map(ToString::to_string).unwrap_or_default()
}

#[test]
fn test_keyed_member_becomes_attribute_element() -> Result<(), Box<dyn std::error::Error>> {
    let document = mirror::to_document(&host("edge"))?;
    let root = document.root().unwrap();

    let data = root.child("data").unwrap();
    assert_eq!(data.to_string(), r#"<data x="1"/>"#);
    assert!(data.children.is_empty());
    Ok(())
}

#[test]
fn test_scalar_members_become_attributes() -> Result<(), Box<dyn std::error::Error>> {
    let document = mirror::to_document(&host("edge"))?;
    let root = document.root().unwrap();

    assert_eq!(root.name, "host");
    let keys: Vec<_> = root.attributes.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["name", "address"]);
    assert_eq!(root.attribute("address"), Some("127.0.0.1"));
    Ok(())
}

#[test]
fn test_full_markup() -> Result<(), Box<dyn std::error::Error>> {
    let document = mirror::to_document(&host("edge"))?;
    assert_eq!(
        render(&document),
        concat!(
            r#"<host name="edge" address="127.0.0.1">"#,
            r#"<data x="1"/>"#,
            "<aliases><string>a</string><string>b</string></aliases>",
            "</host>"
        )
    );

    let mut sink = Vec::new();
    tree::write_document(&document, &mut sink)?;
    let xml = String::from_utf8(sink)?;
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><host "#));
    Ok(())
}

#[test]
fn test_nested_composite_member() -> Result<(), Box<dyn std::error::Error>> {
    let mut child = host("child");
    child.parent = Some(Box::new(host("parent")));

    let document = mirror::to_document(&child)?;
    let root = document.root().unwrap();
    let parent = root.child("parent").unwrap();
    assert_eq!(parent.attribute("name"), Some("parent"));
    assert!(parent.child("parent").is_none());
    Ok(())
}

#[test]
fn test_depth_limits() -> Result<(), Box<dyn std::error::Error>> {
    let mut child = host("child");
    child.parent = Some(Box::new(host("parent")));
    let builder = TreeBuilder::new();

    assert!(builder.serialize_named(&child, None, Depth::limited(0))?.is_empty());

    let shallow = builder.serialize_named(&child, None, Depth::limited(1))?;
    assert_eq!(render(&shallow), r#"<host name="child" address="127.0.0.1"/>"#);

    let two = builder.serialize_named(&child, None, Depth::limited(2))?;
    let root = two.root().unwrap();
    assert_eq!(root.elements().count(), 3);
    // the aliases element exists but its items are out of budget
    assert!(root.child("aliases").unwrap().children.is_empty());
    assert_eq!(root.child("parent").unwrap().elements().count(), 0);
    Ok(())
}

#[test]
fn test_negative_depth_is_unbounded() -> Result<(), Box<dyn std::error::Error>> {
    let mut child = host("child");
    child.parent = Some(Box::new(host("parent")));

    let unbounded = mirror::to_document(&child)?;
    let legacy = mirror::to_document_named(&child, None, -1)?;
    assert_eq!(unbounded, legacy);
    Ok(())
}

#[test]
fn test_append_to_existing_parent() -> Result<(), Box<dyn std::error::Error>> {
    let builder = TreeBuilder::new();
    let mut inventory = tree::node("inventory", Some(tree::attributes(&["site", "eu"])?), vec![]);

    builder.append(&mut inventory, &host("one"), None, Depth::Unbounded)?;
    builder.append(&mut inventory, &host("two"), Some("backup"), Depth::Unbounded)?;
    builder.append(&mut inventory, &host("three"), Some("not valid"), Depth::Unbounded)?;

    let names: Vec<_> = inventory.elements().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["host", "backup"]);
    assert_eq!(inventory.attribute("site"), Some("eu"));
    Ok(())
}

#[test]
fn test_document_root_is_fresh() -> Result<(), Box<dyn std::error::Error>> {
    let mut document = tree::root();
    document.append(tree::text_node("note", None, "first"));
    TreeBuilder::new().append(&mut document, &host("edge"), None, Depth::Unbounded)?;

    assert_eq!(document.children.len(), 2);
    assert_eq!(document.children[1].name, "host");
    Ok(())
}

#[test]
fn test_sequence_root() -> Result<(), Box<dyn std::error::Error>> {
    let hosts = vec![host("a"), host("b")];
    let document = mirror::to_document(&hosts)?;
    let root = document.root().unwrap();

    assert_eq!(root.name, "host");
    let names: Vec<_> = root
        .elements()
        .map(|e| e.attribute("name").unwrap_or_default())
        .collect();
    assert_eq!(names, vec!["a", "b"]);

    let empty: Vec<Host> = Vec::new();
    assert!(mirror::to_document(&empty)?.is_empty());
    Ok(())
}

#[test]
fn test_scalar_root_is_text_element() -> Result<(), Box<dyn std::error::Error>> {
    let document = mirror::to_document_named(&"hello", Some("greeting"), -1)?;
    let root = document.root().unwrap();
    assert_eq!(root.children, vec![Content::Text("hello".to_string())]);
    assert_eq!(render(&document), "<greeting>hello</greeting>");
    Ok(())
}

#[test]
fn test_strict_failure_leaves_parent_untouched() {
    struct Broken;

    impl mirror::Introspect for Broken {
        fn accessors(&self) -> &[&'static str] {
            &["getValue"]
        }

        fn invoke(&self, accessor: &str) -> Result<mirror::Member<'_>, mirror::AccessError> {
            Err(mirror::AccessError::raised(format!("{accessor} exploded")))
        }
    }

    let lenient = TreeBuilder::new();
    let mut parent = Element::new("root");
    lenient
        .append(&mut parent, &Broken, None, Depth::Unbounded)
        .unwrap();
    // no members left, but the element itself is still emitted
    assert_eq!(parent.to_string(), "<root><broken/></root>");

    let strict = TreeBuilder::with_config(Config::default().with_member_errors(MemberErrorPolicy::Fail));
    let mut parent = Element::new("root");
    let result = strict.append(&mut parent, &Broken, None, Depth::Unbounded);
    assert!(matches!(result, Err(Error::Member { .. })));
    assert!(parent.children.is_empty());
}

#[test]
fn test_attribute_builder() {
    let attributes = tree::attributes(&["a", "1", "b", "2", "a", "3"]).unwrap();
    assert_eq!(attributes.get("a").map(String::as_str), Some("3"));
    assert_eq!(attributes.len(), 2);

    assert!(matches!(
        tree::attributes(&["lonely"]),
        Err(Error::OddAttributeCount { count: 1 })
    ));
}
