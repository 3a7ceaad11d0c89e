//! The built-in chunk table: ids, display names, and their decoders.
//!
//! Every leaf decoder follows the same shape: read the payload front to back with
//! the helpers in [`crate::fields`], push one field per value, and let the
//! dispatcher resync at the chunk boundary afterwards.

pub mod definition;
pub mod emitter;
pub mod hierarchy;
pub mod light;
pub mod material;
pub mod mesh;

use crate::registry::Registry;

/// Width of the fixed name fields used by most headers.
pub const NAME_LEN: usize = 16;

pub const MESH: u32 = 0x0000_0000;
pub const VERTICES: u32 = 0x0000_0002;
pub const VERTEX_NORMALS: u32 = 0x0000_0003;
pub const MESH_USER_TEXT: u32 = 0x0000_000C;
pub const MESH_HEADER3: u32 = 0x0000_001F;
pub const TRIANGLES: u32 = 0x0000_0020;
pub const VERTEX_SHADE_INDICES: u32 = 0x0000_0022;
pub const MATERIAL_INFO: u32 = 0x0000_0028;
pub const SHADERS: u32 = 0x0000_0029;
pub const VERTEX_MATERIALS: u32 = 0x0000_002A;
pub const VERTEX_MATERIAL: u32 = 0x0000_002B;
pub const VERTEX_MATERIAL_NAME: u32 = 0x0000_002C;
pub const VERTEX_MATERIAL_INFO: u32 = 0x0000_002D;
pub const TEXTURES: u32 = 0x0000_0030;
pub const TEXTURE: u32 = 0x0000_0031;
pub const TEXTURE_NAME: u32 = 0x0000_0032;
pub const TEXTURE_INFO: u32 = 0x0000_0033;
pub const HIERARCHY: u32 = 0x0000_0100;
pub const HIERARCHY_HEADER: u32 = 0x0000_0101;
pub const PIVOTS: u32 = 0x0000_0102;
pub const LIGHT: u32 = 0x0000_0460;
pub const LIGHT_INFO: u32 = 0x0000_0461;
pub const SPOT_LIGHT_INFO: u32 = 0x0000_0462;
pub const NEAR_ATTENUATION: u32 = 0x0000_0463;
pub const FAR_ATTENUATION: u32 = 0x0000_0464;
pub const EMITTER: u32 = 0x0000_0500;
pub const EMITTER_HEADER: u32 = 0x0000_0501;
pub const EMITTER_USER_DATA: u32 = 0x0000_0502;
pub const EMITTER_INFO: u32 = 0x0000_0503;
pub const DEFINITION: u32 = 0x0000_0700;
pub const DEFINITION_HEADER: u32 = 0x0000_0701;
pub const DEFINITION_VARIABLES: u32 = 0x0000_0702;

/// Register every built-in chunk type.
pub fn register_all(r: &mut Registry) {
    r.register_container(MESH, "MESH")
        .register_leaf(VERTICES, "VERTICES", mesh::vertices)
        .register_leaf(VERTEX_NORMALS, "VERTEX_NORMALS", mesh::vertex_normals)
        .register_leaf(MESH_USER_TEXT, "MESH_USER_TEXT", mesh::user_text)
        .register_leaf(MESH_HEADER3, "MESH_HEADER3", mesh::header3)
        .register_leaf(TRIANGLES, "TRIANGLES", mesh::triangles)
        .register_leaf(VERTEX_SHADE_INDICES, "VERTEX_SHADE_INDICES", mesh::shade_indices);

    r.register_leaf(MATERIAL_INFO, "MATERIAL_INFO", material::material_info)
        .register_leaf(SHADERS, "SHADERS", material::shaders)
        .register_container(VERTEX_MATERIALS, "VERTEX_MATERIALS")
        .register_container(VERTEX_MATERIAL, "VERTEX_MATERIAL")
        .register_leaf(VERTEX_MATERIAL_NAME, "VERTEX_MATERIAL_NAME", material::name)
        .register_leaf(VERTEX_MATERIAL_INFO, "VERTEX_MATERIAL_INFO", material::vertex_material_info)
        .register_container(TEXTURES, "TEXTURES")
        .register_container(TEXTURE, "TEXTURE")
        .register_leaf(TEXTURE_NAME, "TEXTURE_NAME", material::name)
        .register_leaf(TEXTURE_INFO, "TEXTURE_INFO", material::texture_info);

    r.register_container(HIERARCHY, "HIERARCHY")
        .register_leaf(HIERARCHY_HEADER, "HIERARCHY_HEADER", hierarchy::header)
        .register_leaf(PIVOTS, "PIVOTS", hierarchy::pivots);

    r.register_container(LIGHT, "LIGHT")
        .register_leaf(LIGHT_INFO, "LIGHT_INFO", light::info)
        .register_leaf(SPOT_LIGHT_INFO, "SPOT_LIGHT_INFO", light::spot_info)
        .register_leaf(NEAR_ATTENUATION, "NEAR_ATTENUATION", light::attenuation)
        .register_leaf(FAR_ATTENUATION, "FAR_ATTENUATION", light::attenuation);

    r.register_container(EMITTER, "EMITTER")
        .register_leaf(EMITTER_HEADER, "EMITTER_HEADER", emitter::header)
        .register_leaf(EMITTER_USER_DATA, "EMITTER_USER_DATA", emitter::user_data)
        .register_leaf(EMITTER_INFO, "EMITTER_INFO", emitter::info);

    r.register_container(DEFINITION, "DEFINITION")
        .register_leaf(DEFINITION_HEADER, "DEFINITION_HEADER", definition::header)
        .register_leaf(DEFINITION_VARIABLES, "DEFINITION_VARIABLES", definition::variables);
}
