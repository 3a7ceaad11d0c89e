//! Decoded output: a tree of named nodes holding pre-rendered text fields, plus
//! the parse-wide diagnostics list.

use std::fmt;

/// One decoded field, already rendered to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord {
    pub name: String,
    pub type_tag: String,
    pub value: String,
}

impl FieldRecord {
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>, value: impl Into<String>) -> Self {
        FieldRecord {
            name: name.into(),
            type_tag: type_tag.into(),
            value: value.into(),
        }
    }
}

/// A decoded chunk. Children are in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkNode {
    pub name: String,
    pub fields: Vec<FieldRecord>,
    pub children: Vec<ChunkNode>,
}

impl ChunkNode {
    pub fn new(name: impl Into<String>) -> Self {
        ChunkNode {
            name: name.into(),
            fields: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append a field (insertion order is preserved).
    pub fn push_field(&mut self, name: impl Into<String>, type_tag: impl Into<String>, value: impl Into<String>) {
        self.fields.push(FieldRecord::new(name, type_tag, value));
    }

    pub fn field(&self, name: &str) -> Option<&FieldRecord> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.field(name).map(|f| f.value.as_str())
    }

    pub fn child(&self, name: &str) -> Option<&ChunkNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ChunkNode::node_count).sum::<usize>()
    }
}

/// Category of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    UnknownChunk,
    UnknownMicroChunk,
    UnknownEnumValue,
    UnknownFlag,
    Truncation,
    /// A decoder needed a hint from an earlier sibling that was not there.
    MissingContext,
}

/// A note about something the parser did not fully recognize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Absolute offset of the chunk header the note is about.
    pub offset: usize,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Everything one parse produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    pub root: ChunkNode,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseResult {
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
