//! Streaming text façade
//!
//! [`TextEmitter`] writes the object graph straight into an [`io::Write`]
//! sink. Nothing is buffered: if the sink fails or a member aborts the call
//! under [`MemberErrorPolicy::Fail`](crate::MemberErrorPolicy::Fail), whatever
//! was already written stays written and the output is left incomplete.
//!
//! Output shape:
//!
//! - composite: `{a : "1", b : [..]}`, or `name : {..}` when reached as a member
//! - sequence: `name : ["a", "b"]`
//! - keyed collection: `name : {"k": "v", "tags": ["a", "b"]}`
//! - scalar: `name : "v"` as a member, a bare `"v"` otherwise

use crate::error::Result;
use crate::introspect::Introspect;
use crate::policy::{Config, Depth, KeyedValue, Role, Traversal, Visit};
use std::io::{self, Write};
use tracing::instrument;

const SEPARATOR: &str = ", ";

/// Writes object graphs as delimited text
#[derive(Clone, Debug, Default)]
pub struct TextEmitter {
    traversal: Traversal,
}

impl TextEmitter {
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

    /// Emits `value` unbounded, with an inferred name
    pub fn emit<W: Write + ?Sized>(&self, sink: &mut W, value: &dyn Introspect) -> Result<()> {
        self.emit_named(sink, value, None, Depth::Unbounded)
    }

    /// Emits `value` into `sink`
    ///
    /// Writes nothing at all when the root is skipped (depth zero, null,
    /// unrepresentable, unnamed empty sequence, invalid name).
    #[instrument(level = "debug", skip_all, fields(name = ?name, depth = %depth))]
    pub fn emit_named<W: Write + ?Sized>(
        &self,
        sink: &mut W,
        value: &dyn Introspect,
        name: Option<&str>,
        depth: Depth,
    ) -> Result<()> {
        let visit = self.traversal.plan(value, name, depth, Role::Root)?;
        self.render(sink, visit, Role::Root)
    }

    /// Emits into a string
    pub fn to_string(
        &self,
        value: &dyn Introspect,
        name: Option<&str>,
        depth: Depth,
    ) -> Result<String> {
        let mut buffer = Vec::new();
        self.emit_named(&mut buffer, value, name, depth)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    fn render<W: Write + ?Sized>(&self, sink: &mut W, visit: Visit<'_>, role: Role) -> Result<()> {
        match visit {
            Visit::Skip => {}
            Visit::Scalar { name, text } => {
                if role == Role::Member {
                    write!(sink, "{name} : ")?;
                }
                write_quoted(sink, &text)?;
            }
            Visit::Sequence { name, items, depth } => {
                write!(sink, "{name} : [")?;
                let mut first = true;
                for item in items {
                    let visit = self.traversal.plan(item, None, depth, Role::Element)?;
                    if visit.is_skip() {
                        continue;
                    }
                    if !first {
                        sink.write_all(SEPARATOR.as_bytes())?;
                    }
                    first = false;
                    self.render(sink, visit, Role::Element)?;
                }
                sink.write_all(b"]")?;
            }
            Visit::Keyed { name, entries } => {
                write!(sink, "{name} : {{")?;
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        sink.write_all(SEPARATOR.as_bytes())?;
                    }
                    write_quoted(sink, &entry.key)?;
                    sink.write_all(b": ")?;
                    match &entry.value {
                        KeyedValue::Single(text) => write_quoted(sink, text)?,
                        KeyedValue::Multiple(texts) => {
                            sink.write_all(b"[")?;
                            for (j, text) in texts.iter().enumerate() {
                                if j > 0 {
                                    sink.write_all(SEPARATOR.as_bytes())?;
                                }
                                write_quoted(sink, text)?;
                            }
                            sink.write_all(b"]")?;
                        }
                    }
                }
                sink.write_all(b"}")?;
            }
            Visit::Composite {
                name,
                members,
                depth,
            } => {
                if role == Role::Member {
                    write!(sink, "{name} : ")?;
                }
                sink.write_all(b"{")?;
                let mut first = true;
                for (member_name, member) in &members {
                    let visit =
                        self.traversal
                            .plan(&**member, Some(member_name.as_str()), depth, Role::Member)?;
                    if visit.is_skip() {
                        continue;
                    }
                    if !first {
                        sink.write_all(SEPARATOR.as_bytes())?;
                    }
                    first = false;
                    self.render(sink, visit, Role::Member)?;
                }
                sink.write_all(b"}")?;
            }
        }
        Ok(())
    }
}

fn write_quoted<W: Write + ?Sized>(sink: &mut W, text: &str) -> io::Result<()> {
    write!(sink, "\"{}\"", escape_text(text))
}

fn escape_text(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => escaped.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => escaped.push(c),
        }
    }
    escaped
}
