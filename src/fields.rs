//! Field decoding patterns shared by every registered decoder.
//!
//! Each helper reads from the cursor (bounds-checked), renders the value to
//! text and appends a [`FieldRecord`](crate::node::FieldRecord) to the node.
//! Values outside the known symbolic ranges never fail the decode: they are
//! recorded as an `Unknown` field plus a diagnostic, and decoding carries on.

use crate::cursor::ChunkCursor;
use crate::dispatch::ParseContext;
use crate::error::Result;
use crate::node::{ChunkNode, DiagnosticKind};
use bitflags::Flags;
use std::fmt::UpperHex;

/// `%f`-style rendering used for every float.
pub fn format_float(v: f32) -> String {
    format!("{:.6}", v)
}

pub fn format_vector(v: [f32; 3]) -> String {
    format!("({}, {}, {})", format_float(v[0]), format_float(v[1]), format_float(v[2]))
}

/// `major.minor` from a packed `u32` version (major in the high half).
pub fn format_version(v: u32) -> String {
    format!("{}.{}", v >> 16, v & 0xFFFF)
}

pub fn u8_field(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, name: &str) -> Result<u8> {
    let v = c.read_u8()?;
    node.push_field(name, "uint8", v.to_string());
    Ok(v)
}

pub fn u16_field(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, name: &str) -> Result<u16> {
    let v = c.read_u16()?;
    node.push_field(name, "uint16", v.to_string());
    Ok(v)
}

pub fn u32_field(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, name: &str) -> Result<u32> {
    let v = c.read_u32()?;
    node.push_field(name, "uint32", v.to_string());
    Ok(v)
}

pub fn i32_field(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, name: &str) -> Result<i32> {
    let v = c.read_i32()?;
    node.push_field(name, "int32", v.to_string());
    Ok(v)
}

pub fn f32_field(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, name: &str) -> Result<f32> {
    let v = c.read_f32()?;
    node.push_field(name, "float", format_float(v));
    Ok(v)
}

pub fn version_field(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, name: &str) -> Result<u32> {
    let v = c.read_u32()?;
    node.push_field(name, "version", format_version(v));
    Ok(v)
}

pub fn vector_field(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, name: &str) -> Result<[f32; 3]> {
    let v = [c.read_f32()?, c.read_f32()?, c.read_f32()?];
    node.push_field(name, "Vector", format_vector(v));
    Ok(v)
}

pub fn quaternion_field(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, name: &str) -> Result<[f32; 4]> {
    let q = [c.read_f32()?, c.read_f32()?, c.read_f32()?, c.read_f32()?];
    let text = format!(
        "({}, {}, {}, {})",
        format_float(q[0]),
        format_float(q[1]),
        format_float(q[2]),
        format_float(q[3])
    );
    node.push_field(name, "Quaternion", text);
    Ok(q)
}

/// Three color bytes followed by one pad byte.
pub fn rgb_field(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, name: &str) -> Result<()> {
    let b = c.read_bytes(4)?;
    node.push_field(name, "RGB", format!("({}, {}, {})", b[0], b[1], b[2]));
    Ok(())
}

pub fn rgba_field(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, name: &str) -> Result<()> {
    let b = c.read_bytes(4)?;
    node.push_field(name, "RGBA", format!("({}, {}, {}, {})", b[0], b[1], b[2], b[3]));
    Ok(())
}

pub fn fixed_string_field(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, name: &str, width: usize) -> Result<String> {
    let s = c.read_fixed_string(width)?;
    node.push_field(name, "string", s.clone());
    Ok(s)
}

pub fn cstring_field(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, name: &str) -> Result<String> {
    let s = c.read_cstring()?;
    node.push_field(name, "string", s.clone());
    Ok(s)
}

/// Symbolic value of an enum-like field. Unmapped values get an `Unknown`
/// placeholder and a diagnostic.
pub fn enum_field(
    node: &mut ChunkNode,
    ctx: &mut ParseContext,
    name: &str,
    raw: u32,
    table: &[(u32, &'static str)],
) {
    match table.iter().find(|(v, _)| *v == raw) {
        Some((_, symbol)) => node.push_field(name, "enum", *symbol),
        None => {
            ctx.diagnose(
                DiagnosticKind::UnknownEnumValue,
                format!("Unknown enum value {} for {} in {}", raw, name, node.name),
            );
            node.push_field(name, "Unknown", raw.to_string());
        }
    }
}

/// One field per known set bit of `raw`; set bits outside `F` get an `Unknown`
/// placeholder and an "Unknown flag" diagnostic.
///
/// Enum sub-fields packed into the same word must be masked out by the caller.
pub fn flag_fields<F>(node: &mut ChunkNode, ctx: &mut ParseContext, name: &str, raw: F::Bits)
where
    F: Flags,
    F::Bits: UpperHex,
{
    let value = F::from_bits_retain(raw);
    for (symbol, _) in value.iter_names() {
        node.push_field(name, "flag", symbol);
    }
    let unknown = value.difference(F::all());
    if !unknown.is_empty() {
        let bits = unknown.bits();
        ctx.diagnose(
            DiagnosticKind::UnknownFlag,
            format!("Unknown flag 0x{:X} in {} of {}", bits, name, node.name),
        );
        node.push_field(name, "Unknown", format!("0x{:X}", bits));
    }
}

/// Decode `floor(remaining / element_size)` elements with `each`.
///
/// A trailing partial element is ignored and not reported.
pub fn array<F>(c: &mut ChunkCursor<'_>, element_size: usize, mut each: F) -> Result<usize>
where
    F: FnMut(&mut ChunkCursor<'_>, usize) -> Result<()>,
{
    let count = c.remaining() / element_size;
    for i in 0..count {
        each(c, i)?;
    }
    Ok(count)
}
