//! Particle emitter chunks.
//!
//! `EMITTER_INFO` changed layout in format 2.0 without changing its id: the
//! version read from the preceding `EMITTER_HEADER` sibling selects the layout.

use super::NAME_LEN;
use crate::cursor::ChunkCursor;
use crate::dispatch::ParseContext;
use crate::error::Result;
use crate::fields::*;
use crate::node::{ChunkNode, DiagnosticKind};

/// First version with max emissions, randomizers and fade time in `EMITTER_INFO`.
pub const EMITTER_VERSION_2_0: u32 = 0x0002_0000;
pub const CURRENT_EMITTER_VERSION: u32 = EMITTER_VERSION_2_0;

const TEXTURE_NAME_LEN: usize = 32;

const USER_DATA_TYPES: &[(u32, &str)] = &[(0, "DEFAULT"), (1, "STRING")];

pub fn header(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, ctx: &mut ParseContext) -> Result<()> {
    let version = version_field(c, node, "Version")?;
    ctx.hints_mut().emitter_version = Some(version);
    fixed_string_field(c, node, "Name", NAME_LEN)?;
    Ok(())
}

pub fn user_data(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, ctx: &mut ParseContext) -> Result<()> {
    let kind = c.read_u32()?;
    enum_field(node, ctx, "Type", kind, USER_DATA_TYPES);
    let size = u32_field(c, node, "Size")? as usize;
    // size can exceed the stored text; take what the chunk holds
    let n = size.min(c.remaining());
    fixed_string_field(c, node, "Data", n)?;
    Ok(())
}

pub fn info(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, ctx: &mut ParseContext) -> Result<()> {
    let hinted = ctx.hints().emitter_version;
    let version = match hinted {
        Some(v) => v,
        None => {
            ctx.diagnose(
                DiagnosticKind::MissingContext,
                "EMITTER_INFO without a preceding EMITTER_HEADER; assuming current layout",
            );
            CURRENT_EMITTER_VERSION
        }
    };
    let current = version >= EMITTER_VERSION_2_0;
    node.push_field("Layout", "version", if current { "2.0" } else { "1.0" });

    fixed_string_field(c, node, "Texture Name", TEXTURE_NAME_LEN)?;
    f32_field(c, node, "Start Size")?;
    f32_field(c, node, "End Size")?;
    f32_field(c, node, "Lifetime")?;
    f32_field(c, node, "Emission Rate")?;
    if current {
        f32_field(c, node, "Max Emissions")?;
        f32_field(c, node, "Velocity Random")?;
        f32_field(c, node, "Position Random")?;
        f32_field(c, node, "Fade Time")?;
    }
    f32_field(c, node, "Gravity")?;
    f32_field(c, node, "Elasticity")?;
    vector_field(c, node, "Velocity")?;
    vector_field(c, node, "Acceleration")?;
    rgba_field(c, node, "Start Color")?;
    rgba_field(c, node, "End Color")?;
    Ok(())
}
