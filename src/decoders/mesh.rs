//! Mesh geometry chunks.

use super::NAME_LEN;
use crate::cursor::ChunkCursor;
use crate::dispatch::ParseContext;
use crate::error::Result;
use crate::fields::*;
use crate::node::ChunkNode;
use bitflags::bitflags;

bitflags! {
    /// `MESH_HEADER3` attribute bits (the geometry type is packed in [`GEOMETRY_TYPE_MASK`]).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MeshFlags: u32 {
        const HIDDEN = 0x0000_0001;
        const TWO_SIDED = 0x0000_0002;
        const CAST_SHADOW = 0x0000_0010;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct VertexChannels: u32 {
        const LOCATION = 0x01;
        const NORMAL = 0x02;
        const TEXCOORD = 0x04;
        const COLOR = 0x08;
        const BONEID = 0x10;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FaceChannels: u32 {
        const FACE = 0x01;
    }
}

pub const GEOMETRY_TYPE_MASK: u32 = 0x0000_0F00;
const GEOMETRY_TYPE_SHIFT: u32 = 8;

const GEOMETRY_TYPES: &[(u32, &str)] = &[
    (0, "NORMAL"),
    (1, "CAMERA_ALIGNED"),
    (2, "SKIN"),
    (3, "CAMERA_ORIENTED"),
];

const VECTOR_SIZE: usize = 12;
const TRIANGLE_SIZE: usize = 32;

pub fn header3(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, ctx: &mut ParseContext) -> Result<()> {
    version_field(c, node, "Version")?;
    let attrs = c.read_u32()?;
    node.push_field("Attributes", "uint32", format!("0x{:08X}", attrs));
    flag_fields::<MeshFlags>(node, ctx, "Attributes", attrs & !GEOMETRY_TYPE_MASK);
    enum_field(
        node,
        ctx,
        "Geometry Type",
        (attrs & GEOMETRY_TYPE_MASK) >> GEOMETRY_TYPE_SHIFT,
        GEOMETRY_TYPES,
    );
    fixed_string_field(c, node, "Mesh Name", NAME_LEN)?;
    fixed_string_field(c, node, "Container Name", NAME_LEN)?;
    u32_field(c, node, "Triangle Count")?;
    u32_field(c, node, "Vertex Count")?;
    u32_field(c, node, "Material Count")?;
    u32_field(c, node, "Damage Stage Count")?;
    i32_field(c, node, "Sort Level")?;
    version_field(c, node, "Prelit Version")?;
    u32_field(c, node, "Future Counts")?;

    let vertex_channels = c.read_u32()?;
    node.push_field("Vertex Channels", "uint32", format!("0x{:08X}", vertex_channels));
    flag_fields::<VertexChannels>(node, ctx, "Vertex Channels", vertex_channels);
    let face_channels = c.read_u32()?;
    node.push_field("Face Channels", "uint32", format!("0x{:08X}", face_channels));
    flag_fields::<FaceChannels>(node, ctx, "Face Channels", face_channels);

    vector_field(c, node, "Min Corner")?;
    vector_field(c, node, "Max Corner")?;
    vector_field(c, node, "Sphere Center")?;
    f32_field(c, node, "Sphere Radius")?;
    Ok(())
}

pub fn vertices(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, _ctx: &mut ParseContext) -> Result<()> {
    array(c, VECTOR_SIZE, |c, i| {
        vector_field(c, node, &format!("Vertex[{}]", i)).map(|_| ())
    })?;
    Ok(())
}

pub fn vertex_normals(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, _ctx: &mut ParseContext) -> Result<()> {
    array(c, VECTOR_SIZE, |c, i| {
        vector_field(c, node, &format!("Normal[{}]", i)).map(|_| ())
    })?;
    Ok(())
}

pub fn user_text(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, _ctx: &mut ParseContext) -> Result<()> {
    cstring_field(c, node, "Text")?;
    Ok(())
}

pub fn triangles(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, _ctx: &mut ParseContext) -> Result<()> {
    array(c, TRIANGLE_SIZE, |c, i| {
        let (a, b, v) = (c.read_u32()?, c.read_u32()?, c.read_u32()?);
        node.push_field(
            format!("Triangle[{}].Vertex Indices", i),
            "uint32[3]",
            format!("({}, {}, {})", a, b, v),
        );
        u32_field(c, node, &format!("Triangle[{}].Surface Type", i))?;
        vector_field(c, node, &format!("Triangle[{}].Normal", i))?;
        f32_field(c, node, &format!("Triangle[{}].Distance", i))?;
        Ok(())
    })?;
    Ok(())
}

pub fn shade_indices(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, _ctx: &mut ParseContext) -> Result<()> {
    array(c, 4, |c, i| u32_field(c, node, &format!("Index[{}]", i)).map(|_| ()))?;
    Ok(())
}
