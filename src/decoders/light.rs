//! Light chunks.

use crate::cursor::ChunkCursor;
use crate::dispatch::ParseContext;
use crate::error::Result;
use crate::fields::*;
use crate::node::ChunkNode;
use bitflags::bitflags;

bitflags! {
    /// `LIGHT_INFO` attributes; the light type is packed in [`LIGHT_TYPE_MASK`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LightFlags: u32 {
        const CAST_SHADOWS = 0x0000_0100;
    }
}

pub const LIGHT_TYPE_MASK: u32 = 0x0000_00FF;

const LIGHT_TYPES: &[(u32, &str)] = &[(1, "POINT"), (2, "DIRECTIONAL"), (3, "SPOT")];

pub fn info(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, ctx: &mut ParseContext) -> Result<()> {
    let attrs = c.read_u32()?;
    node.push_field("Attributes", "uint32", format!("0x{:08X}", attrs));
    enum_field(node, ctx, "Light Type", attrs & LIGHT_TYPE_MASK, LIGHT_TYPES);
    flag_fields::<LightFlags>(node, ctx, "Attributes", attrs & !LIGHT_TYPE_MASK);
    c.skip(4)?;
    rgb_field(c, node, "Ambient")?;
    rgb_field(c, node, "Diffuse")?;
    rgb_field(c, node, "Specular")?;
    f32_field(c, node, "Intensity")?;
    Ok(())
}

pub fn spot_info(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, _ctx: &mut ParseContext) -> Result<()> {
    vector_field(c, node, "Direction")?;
    f32_field(c, node, "Angle")?;
    f32_field(c, node, "Exponent")?;
    Ok(())
}

/// Shared by `NEAR_ATTENUATION` and `FAR_ATTENUATION`.
pub fn attenuation(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, _ctx: &mut ParseContext) -> Result<()> {
    f32_field(c, node, "Start")?;
    f32_field(c, node, "End")?;
    Ok(())
}
