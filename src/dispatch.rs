//! Recursive-descent driver over a chunk stream.
//!
//! [`parse_subchunks`] opens every chunk at the current level, hands it to the
//! registered decoder (recursing for containers, hex-capturing unknown ids), and
//! always closes it again so the next sibling is found at the declared boundary,
//! no matter how much the decoder read or whether it failed.
//!
//! Cross-sibling state (e.g. a definition flavor that selects how a later sibling
//! is laid out) lives in [`ParseContext`], which is created per parse and threaded
//! through every decoder call.

use crate::cursor::{ChunkCursor, CHUNK_HEADER_LEN};
use crate::dump::{hex_dump, hex_id};
use crate::error::ChunkError;
use crate::node::{ChunkNode, Diagnostic, DiagnosticKind, ParseResult};
use crate::registry::{default_registry, Decoder, Registry};

/// Name of the root node returned by [`parse`].
pub const ROOT_NAME: &str = "File";

/// Default limit on chunk nesting. Containers opened deeper than this are kept
/// as hex instead of being descended into.
pub const MAX_DEPTH: usize = 256;

/// Values decoded from one chunk that change how a later sibling is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hints {
    /// Definition flavor from `DEFINITION_HEADER`; selects the meaning of
    /// `DEFINITION_VARIABLES` micro-chunks.
    pub flavor: Option<u32>,
    /// Emitter format version from `EMITTER_HEADER`; selects the `EMITTER_INFO` layout.
    pub emitter_version: Option<u32>,
}

/// Per-parse state: sibling hints, the diagnostics list and the nesting limit.
#[derive(Debug)]
pub struct ParseContext {
    hints: Hints,
    diagnostics: Vec<Diagnostic>,
    /// Header offset of the chunk currently being decoded.
    offset: usize,
    max_depth: usize,
}

impl Default for ParseContext {
    fn default() -> Self {
        ParseContext {
            hints: Hints::default(),
            diagnostics: Vec::new(),
            offset: 0,
            max_depth: MAX_DEPTH,
        }
    }
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deepest chunk level whose containers are still descended into.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn hints(&self) -> &Hints {
        &self.hints
    }

    pub fn hints_mut(&mut self) -> &mut Hints {
        &mut self.hints
    }

    /// Record a diagnostic against the chunk being decoded.
    pub fn diagnose(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let offset = self.offset;
        self.diagnose_at(offset, kind, message);
    }

    pub fn diagnose_at(&mut self, offset: usize, kind: DiagnosticKind, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            kind,
            offset,
            message: message.into(),
        });
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Hints set inside a container stay inside it.
    fn enter_scope(&self) -> Hints {
        self.hints.clone()
    }

    fn leave_scope(&mut self, saved: Hints) {
        self.hints = saved;
    }
}

/// Parse a whole buffer with the built-in decoder table.
pub fn parse(data: &[u8]) -> ParseResult {
    parse_with(default_registry(), data)
}

/// Parse a whole buffer with a caller-supplied decoder table.
pub fn parse_with(registry: &Registry, data: &[u8]) -> ParseResult {
    parse_with_context(registry, data, ParseContext::new())
}

/// Parse with a prepared context (e.g. a different nesting limit).
pub fn parse_with_context(registry: &Registry, data: &[u8], mut ctx: ParseContext) -> ParseResult {
    let mut cursor = ChunkCursor::new(data);
    let mut root = ChunkNode::new(ROOT_NAME);
    parse_subchunks(registry, &mut cursor, &mut root, &mut ctx);
    tracing::debug!(
        "parsed {} bytes: {} nodes, {} diagnostics",
        data.len(),
        root.node_count(),
        ctx.diagnostics().len()
    );
    ParseResult {
        root,
        diagnostics: ctx.into_diagnostics(),
    }
}

/// Decode every chunk at the cursor's current level into children of `parent`.
pub fn parse_subchunks(
    registry: &Registry,
    cursor: &mut ChunkCursor<'_>,
    parent: &mut ChunkNode,
    ctx: &mut ParseContext,
) {
    loop {
        match cursor.open_chunk() {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                // No frame was pushed, so nothing at this level can be resynced;
                // the enclosing close_chunk (if any) takes over.
                capture_unopenable(registry, cursor, parent, ctx, e);
                break;
            }
        }
        let id = cursor.cur_chunk_id();
        let offset = cursor.cur_chunk_offset();
        tracing::debug!(
            "chunk {} ({} bytes) at offset {}, depth {}",
            hex_id(id),
            cursor.cur_chunk_length(),
            offset,
            cursor.depth()
        );
        let child = match registry.lookup(id) {
            Some(entry) => {
                let mut child = ChunkNode::new(entry.name);
                match entry.decoder {
                    Decoder::Container if cursor.depth() > ctx.max_depth => {
                        tracing::warn!("{} at offset {}: nesting limit {} reached", entry.name, offset, ctx.max_depth);
                        ctx.diagnose_at(
                            offset,
                            DiagnosticKind::Truncation,
                            format!(
                                "Nesting limit {} reached at {} (offset {}); contents kept as hex",
                                ctx.max_depth, entry.name, offset
                            ),
                        );
                        child.push_field("Chunk Data", "Truncated", hex_dump(cursor.read_all_remaining()));
                    }
                    Decoder::Container => {
                        let saved = ctx.enter_scope();
                        parse_subchunks(registry, cursor, &mut child, ctx);
                        ctx.leave_scope(saved);
                    }
                    Decoder::Leaf(decode) => {
                        ctx.offset = offset;
                        if let Err(e) = decode(cursor, &mut child, ctx) {
                            tracing::warn!("{} at offset {}: {}", entry.name, offset, e);
                            ctx.diagnose_at(
                                offset,
                                DiagnosticKind::Truncation,
                                format!("Error decoding {} at offset {}: {}", entry.name, offset, e),
                            );
                        }
                    }
                }
                child
            }
            None => {
                let name = hex_id(id);
                ctx.diagnose_at(offset, DiagnosticKind::UnknownChunk, format!("Unknown Chunk {}", name));
                let mut child = ChunkNode::new(name);
                child.push_field("Chunk Data", "Unknown", hex_dump(cursor.read_all_remaining()));
                child
            }
        };
        parent.children.push(child);
        cursor.close_chunk();
    }
}

/// Record a chunk whose header could not be opened, keeping its bytes as hex.
fn capture_unopenable(
    registry: &Registry,
    cursor: &mut ChunkCursor<'_>,
    parent: &mut ChunkNode,
    ctx: &mut ParseContext,
    err: ChunkError,
) {
    let offset = cursor.position();
    tracing::warn!("cannot open chunk at offset {}: {}", offset, err);
    let rest = cursor.read_all_remaining();
    match err {
        ChunkError::Overrun { id, declared, available, .. } => {
            let hex = hex_id(id);
            let name = registry.name_of(id).map(str::to_string).unwrap_or_else(|| hex.clone());
            ctx.diagnose_at(
                offset,
                DiagnosticKind::Truncation,
                format!(
                    "Truncated Chunk {} ({}) at offset {}: declares {} bytes, {} available",
                    name, hex, offset, declared, available
                ),
            );
            let mut child = ChunkNode::new(name);
            child.push_field("Declared Length", "uint32", declared.to_string());
            child.push_field("Chunk Data", "Truncated", hex_dump(&rest[CHUNK_HEADER_LEN..]));
            parent.children.push(child);
        }
        other => {
            ctx.diagnose_at(
                offset,
                DiagnosticKind::Truncation,
                format!("Truncated chunk header at offset {}: {}", offset, other),
            );
            let mut child = ChunkNode::new("Trailing Data");
            child.push_field("Chunk Data", "Truncated", hex_dump(rest));
            parent.children.push(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::ChunkCursor;
    use crate::error::Result;
    use crate::writer::ChunkWriter;

    fn set_flavor(c: &mut ChunkCursor<'_>, _: &mut ChunkNode, ctx: &mut ParseContext) -> Result<()> {
        ctx.hints_mut().flavor = Some(c.read_u32()?);
        Ok(())
    }

    fn show_flavor(_: &mut ChunkCursor<'_>, node: &mut ChunkNode, ctx: &mut ParseContext) -> Result<()> {
        let v = ctx.hints().flavor.map_or_else(|| "none".to_string(), |f| f.to_string());
        node.push_field("Flavor", "hint", v);
        Ok(())
    }

    #[test]
    fn hints_do_not_leak_out_of_containers() {
        let mut r = Registry::new();
        r.register_container(1, "GROUP")
            .register_leaf(2, "SET", set_flavor)
            .register_leaf(3, "SHOW", show_flavor);

        let mut w = ChunkWriter::new();
        w.begin_chunk(1);
        w.chunk(2, &7u32.to_le_bytes());
        w.chunk(3, &[]);
        w.end_chunk();
        w.chunk(3, &[]);
        let bytes = w.into_bytes();

        let result = parse_with(&r, &bytes);
        let group = &result.root.children[0];
        assert_eq!(group.children[1].field_value("Flavor"), Some("7"));
        assert_eq!(result.root.children[1].field_value("Flavor"), Some("none"));
    }

    #[test]
    fn trailing_partial_header_is_captured() {
        let mut w = ChunkWriter::new();
        w.chunk(0x99, &[1]);
        w.bytes(&[0xAB, 0xCD]);
        let bytes = w.into_bytes();

        let result = parse_with(&Registry::new(), &bytes);
        assert_eq!(result.root.children.len(), 2);
        let tail = &result.root.children[1];
        assert_eq!(tail.name, "Trailing Data");
        assert_eq!(tail.field_value("Chunk Data"), Some("ab cd"));
        assert_eq!(result.count(DiagnosticKind::Truncation), 1);
        assert_eq!(result.count(DiagnosticKind::UnknownChunk), 1);
    }
}
