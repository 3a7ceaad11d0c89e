//! Text export of a decoded tree and of the diagnostics list.
//!
//! Output depends only on tree structure, so identical input bytes always give
//! byte-identical reports.

use crate::node::{ChunkNode, Diagnostic};
use std::borrow::Cow;
use std::fmt::Write;

/// Exporter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpOptions {
    /// When false only node names are written (an outline of the tree).
    pub include_fields: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        DumpOptions { include_fields: true }
    }
}

/// Chunk id as it appears in node names and diagnostics, e.g. `0x0000AAAA`.
pub fn hex_id(id: u32) -> String {
    format!("0x{:08X}", id)
}

/// Space-separated lowercase hex bytes.
pub fn hex_dump(b: &[u8]) -> String {
    b.iter().map(|x| format!("{:02x}", x)).collect::<Vec<_>>().join(" ")
}

/// Inverse of [`hex_dump`]. Returns `None` on any malformed byte.
pub fn parse_hex_dump(s: &str) -> Option<Vec<u8>> {
    s.split_whitespace().map(|t| u8::from_str_radix(t, 16).ok()).collect()
}

/// Full dump: node name lines, then `name\ttype\tvalue` field lines and children
/// one tab deeper.
pub fn export_text(node: &ChunkNode) -> String {
    export_text_with(node, DumpOptions::default())
}

pub fn export_text_with(node: &ChunkNode, options: DumpOptions) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0, options);
    out
}

/// Backslash-escape control characters so every record stays on one line.
fn escape(s: &str) -> Cow<'_, str> {
    if !s.chars().any(char::is_control) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        if ch.is_control() {
            out.extend(ch.escape_default());
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

fn write_node(out: &mut String, node: &ChunkNode, depth: usize, options: DumpOptions) {
    let pad = "\t".repeat(depth);
    let _ = writeln!(out, "{}{}", pad, escape(&node.name));
    if options.include_fields {
        for f in &node.fields {
            let _ = writeln!(
                out,
                "{}\t{}\t{}\t{}",
                pad,
                escape(&f.name),
                escape(&f.type_tag),
                escape(&f.value)
            );
        }
    }
    for child in &node.children {
        write_node(out, child, depth + 1, options);
    }
}

/// One line per diagnostic, in the order they were recorded.
pub fn export_diagnostics(diags: &[Diagnostic]) -> String {
    let mut out = String::new();
    for d in diags {
        let _ = writeln!(out, "{}", d);
    }
    out
}
