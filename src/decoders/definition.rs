//! Saved object definitions.
//!
//! A `DEFINITION` holds a `DEFINITION_HEADER` followed by `DEFINITION_VARIABLES`,
//! a run of micro-chunks whose ids only mean something once the header's flavor
//! is known. The flavor travels between the two siblings in [`ParseContext`].

use crate::cursor::ChunkCursor;
use crate::dispatch::ParseContext;
use crate::dump::hex_dump;
use crate::error::Result;
use crate::fields::*;
use crate::node::{ChunkNode, DiagnosticKind};
use bitflags::bitflags;

pub const FLAVOR_OBJECT: u32 = 1;
pub const FLAVOR_SOUND: u32 = 2;

const FLAVORS: &[(u32, &str)] = &[(FLAVOR_OBJECT, "OBJECT"), (FLAVOR_SOUND, "SOUND")];

const DEFINITION_NAME_LEN: usize = 32;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ObjectFlags: u32 {
        const TARGETABLE = 0x01;
        const INVULNERABLE = 0x02;
        const EDITOR_ONLY = 0x04;
    }
}

#[derive(Debug, Clone, Copy)]
enum VarKind {
    Text,
    Float,
    Int,
    ObjectFlags,
}

#[derive(Debug, Clone, Copy)]
struct Variable {
    id: u8,
    name: &'static str,
    kind: VarKind,
}

const OBJECT_VARIABLES: &[Variable] = &[
    Variable { id: 0x01, name: "Model", kind: VarKind::Text },
    Variable { id: 0x02, name: "Health", kind: VarKind::Float },
    Variable { id: 0x03, name: "Team", kind: VarKind::Int },
    Variable { id: 0x04, name: "Flags", kind: VarKind::ObjectFlags },
];

const SOUND_VARIABLES: &[Variable] = &[
    Variable { id: 0x01, name: "Filename", kind: VarKind::Text },
    Variable { id: 0x02, name: "Volume", kind: VarKind::Float },
    Variable { id: 0x03, name: "Priority", kind: VarKind::Float },
    Variable { id: 0x04, name: "Loop Count", kind: VarKind::Int },
];

pub fn header(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, ctx: &mut ParseContext) -> Result<()> {
    let flavor = c.read_u32()?;
    ctx.hints_mut().flavor = Some(flavor);
    enum_field(node, ctx, "Flavor", flavor, FLAVORS);
    u32_field(c, node, "Definition Id")?;
    fixed_string_field(c, node, "Name", DEFINITION_NAME_LEN)?;
    Ok(())
}

pub fn variables(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, ctx: &mut ParseContext) -> Result<()> {
    let flavor = ctx.hints().flavor;
    let table = match flavor {
        Some(FLAVOR_OBJECT) => Some(OBJECT_VARIABLES),
        Some(FLAVOR_SOUND) => Some(SOUND_VARIABLES),
        // already reported by the header
        Some(_) => None,
        None => {
            ctx.diagnose(
                DiagnosticKind::MissingContext,
                "DEFINITION_VARIABLES without a preceding DEFINITION_HEADER; variables left raw",
            );
            None
        }
    };
    loop {
        match c.open_micro_chunk() {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                ctx.diagnose(
                    DiagnosticKind::Truncation,
                    format!("Truncated micro-chunk in {}: {}", node.name, e),
                );
                node.push_field("Trailing Data", "Truncated", hex_dump(c.read_all_remaining()));
                break;
            }
        }
        let id = c.cur_micro_chunk_id();
        tracing::trace!("micro-chunk 0x{:02X} ({} bytes)", id, c.cur_micro_chunk_length());
        let result = variable(c, node, ctx, table, id);
        c.close_micro_chunk();
        if let Err(e) = result {
            ctx.diagnose(
                DiagnosticKind::Truncation,
                format!("Error decoding micro-chunk 0x{:02X} in {}: {}", id, node.name, e),
            );
        }
    }
    Ok(())
}

fn variable(
    c: &mut ChunkCursor<'_>,
    node: &mut ChunkNode,
    ctx: &mut ParseContext,
    table: Option<&[Variable]>,
    id: u8,
) -> Result<()> {
    let known = table.and_then(|t| t.iter().find(|v| v.id == id));
    let var = match known {
        Some(v) => v,
        None => {
            if table.is_some() {
                ctx.diagnose(
                    DiagnosticKind::UnknownMicroChunk,
                    format!("Unknown Micro Chunk 0x{:02X} in {}", id, node.name),
                );
            }
            node.push_field(format!("Micro 0x{:02X}", id), "Unknown", hex_dump(c.read_all_remaining()));
            return Ok(());
        }
    };
    match var.kind {
        VarKind::Text => {
            let len = c.remaining();
            fixed_string_field(c, node, var.name, len)?;
        }
        VarKind::Float => {
            f32_field(c, node, var.name)?;
        }
        VarKind::Int => {
            i32_field(c, node, var.name)?;
        }
        VarKind::ObjectFlags => {
            let raw = c.read_u32()?;
            node.push_field(var.name, "uint32", format!("0x{:08X}", raw));
            flag_fields::<ObjectFlags>(node, ctx, var.name, raw);
        }
    }
    Ok(())
}
