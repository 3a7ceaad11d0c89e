//! Material, shader and texture chunks.

use crate::cursor::ChunkCursor;
use crate::dispatch::ParseContext;
use crate::error::Result;
use crate::fields::*;
use crate::node::ChunkNode;
use bitflags::bitflags;

bitflags! {
    /// `VERTEX_MATERIAL_INFO` attributes; stage-0 mapping lives in [`STAGE0_MAPPING_MASK`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct VertexMaterialFlags: u32 {
        const USE_DEPTH_CUE = 0x0000_0001;
        const ARGB_EMISSIVE_ONLY = 0x0000_0002;
        const COPY_SPECULAR_TO_DIFFUSE = 0x0000_0004;
        const DEPTH_CUE_TO_ALPHA = 0x0000_0008;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TextureFlags: u16 {
        const PUBLISH = 0x0001;
        const RESIZE_OBSOLETE = 0x0002;
        const NO_LOD = 0x0004;
        const CLAMP_U = 0x0008;
        const CLAMP_V = 0x0010;
        const ALPHA_BITMAP = 0x0020;
    }
}

pub const STAGE0_MAPPING_MASK: u32 = 0x00FF_0000;

const STAGE_MAPPINGS: &[(u32, &str)] = &[
    (0, "UV"),
    (1, "ENVIRONMENT"),
    (2, "CHEAP_ENVIRONMENT"),
    (3, "SCREEN"),
    (4, "LINEAR_OFFSET"),
    (5, "SILHOUETTE"),
];

const TEXTURE_ANIM_TYPES: &[(u32, &str)] = &[(0, "LOOP"), (1, "PINGPONG"), (2, "ONCE"), (3, "MANUAL")];

const DEPTH_COMPARE: &[(u32, &str)] = &[
    (0, "PASS_NEVER"),
    (1, "PASS_LESS"),
    (2, "PASS_EQUAL"),
    (3, "PASS_LEQUAL"),
    (4, "PASS_GREATER"),
    (5, "PASS_NOTEQUAL"),
    (6, "PASS_GEQUAL"),
    (7, "PASS_ALWAYS"),
];
const DEPTH_MASK: &[(u32, &str)] = &[(0, "WRITE_DISABLE"), (1, "WRITE_ENABLE")];
const DEST_BLEND: &[(u32, &str)] = &[
    (0, "ZERO"),
    (1, "ONE"),
    (2, "SRC_COLOR"),
    (3, "ONE_MINUS_SRC_COLOR"),
    (4, "SRC_ALPHA"),
    (5, "ONE_MINUS_SRC_ALPHA"),
    (6, "SRC_COLOR_PREFOG"),
];
const PRI_GRADIENT: &[(u32, &str)] = &[(0, "DISABLE"), (1, "MODULATE"), (2, "ADD"), (3, "BUMPENVMAP")];
const ON_OFF: &[(u32, &str)] = &[(0, "DISABLE"), (1, "ENABLE")];
const SRC_BLEND: &[(u32, &str)] = &[(0, "ZERO"), (1, "ONE"), (2, "SRC_ALPHA"), (3, "ONE_MINUS_DEST_ALPHA")];
const DETAIL_COLOR: &[(u32, &str)] = &[
    (0, "DISABLE"),
    (1, "DETAIL"),
    (2, "SCALE"),
    (3, "INVSCALE"),
    (4, "ADD"),
    (5, "SUB"),
    (6, "SUBR"),
    (7, "BLEND"),
    (8, "DETAILBLEND"),
];
const DETAIL_ALPHA: &[(u32, &str)] = &[(0, "DISABLE"), (1, "DETAIL"), (2, "SCALE"), (3, "INVSCALE")];

const SHADER_SIZE: usize = 16;

pub fn material_info(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, _ctx: &mut ParseContext) -> Result<()> {
    u32_field(c, node, "Pass Count")?;
    u32_field(c, node, "Vertex Material Count")?;
    u32_field(c, node, "Shader Count")?;
    u32_field(c, node, "Texture Count")?;
    Ok(())
}

/// Array of 16-byte shader records, one enum per byte.
pub fn shaders(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, ctx: &mut ParseContext) -> Result<()> {
    array(c, SHADER_SIZE, |c, i| {
        let b = c.read_bytes(SHADER_SIZE)?;
        let p = format!("Shader[{}]", i);
        enum_field(node, ctx, &format!("{}.Depth Compare", p), b[0] as u32, DEPTH_COMPARE);
        enum_field(node, ctx, &format!("{}.Depth Mask", p), b[1] as u32, DEPTH_MASK);
        node.push_field(format!("{}.Color Mask", p), "uint8", b[2].to_string());
        enum_field(node, ctx, &format!("{}.Dest Blend", p), b[3] as u32, DEST_BLEND);
        node.push_field(format!("{}.Fog Func", p), "uint8", b[4].to_string());
        enum_field(node, ctx, &format!("{}.Primary Gradient", p), b[5] as u32, PRI_GRADIENT);
        enum_field(node, ctx, &format!("{}.Secondary Gradient", p), b[6] as u32, ON_OFF);
        enum_field(node, ctx, &format!("{}.Src Blend", p), b[7] as u32, SRC_BLEND);
        enum_field(node, ctx, &format!("{}.Texturing", p), b[8] as u32, ON_OFF);
        enum_field(node, ctx, &format!("{}.Detail Color Func", p), b[9] as u32, DETAIL_COLOR);
        enum_field(node, ctx, &format!("{}.Detail Alpha Func", p), b[10] as u32, DETAIL_ALPHA);
        node.push_field(format!("{}.Shader Preset", p), "uint8", b[11].to_string());
        enum_field(node, ctx, &format!("{}.Alpha Test", p), b[12] as u32, ON_OFF);
        enum_field(node, ctx, &format!("{}.Post Detail Color Func", p), b[13] as u32, DETAIL_COLOR);
        enum_field(node, ctx, &format!("{}.Post Detail Alpha Func", p), b[14] as u32, DETAIL_ALPHA);
        Ok(())
    })?;
    Ok(())
}

/// Shared by `VERTEX_MATERIAL_NAME` and `TEXTURE_NAME`.
pub fn name(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, _ctx: &mut ParseContext) -> Result<()> {
    cstring_field(c, node, "Name")?;
    Ok(())
}

pub fn vertex_material_info(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, ctx: &mut ParseContext) -> Result<()> {
    let attrs = c.read_u32()?;
    node.push_field("Attributes", "uint32", format!("0x{:08X}", attrs));
    flag_fields::<VertexMaterialFlags>(node, ctx, "Attributes", attrs & !STAGE0_MAPPING_MASK);
    enum_field(node, ctx, "Stage0 Mapping", (attrs & STAGE0_MAPPING_MASK) >> 16, STAGE_MAPPINGS);
    rgb_field(c, node, "Ambient")?;
    rgb_field(c, node, "Diffuse")?;
    rgb_field(c, node, "Specular")?;
    rgb_field(c, node, "Emissive")?;
    f32_field(c, node, "Shininess")?;
    f32_field(c, node, "Opacity")?;
    f32_field(c, node, "Translucency")?;
    Ok(())
}

pub fn texture_info(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, ctx: &mut ParseContext) -> Result<()> {
    let attrs = c.read_u16()?;
    node.push_field("Attributes", "uint16", format!("0x{:04X}", attrs));
    flag_fields::<TextureFlags>(node, ctx, "Attributes", attrs);
    let anim = c.read_u16()?;
    enum_field(node, ctx, "Animation Type", anim as u32, TEXTURE_ANIM_TYPES);
    u32_field(c, node, "Frame Count")?;
    f32_field(c, node, "Frame Rate")?;
    Ok(())
}
