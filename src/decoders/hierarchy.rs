//! Skeleton hierarchy chunks.

use super::NAME_LEN;
use crate::cursor::ChunkCursor;
use crate::dispatch::ParseContext;
use crate::error::Result;
use crate::fields::*;
use crate::node::ChunkNode;

const PIVOT_SIZE: usize = 60;
const NO_PARENT: u32 = 0xFFFF_FFFF;

pub fn header(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, _ctx: &mut ParseContext) -> Result<()> {
    version_field(c, node, "Version")?;
    fixed_string_field(c, node, "Name", NAME_LEN)?;
    u32_field(c, node, "Pivot Count")?;
    vector_field(c, node, "Center")?;
    Ok(())
}

pub fn pivots(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, _ctx: &mut ParseContext) -> Result<()> {
    array(c, PIVOT_SIZE, |c, i| {
        fixed_string_field(c, node, &format!("Pivot[{}].Name", i), NAME_LEN)?;
        let parent = c.read_u32()?;
        let parent_text = if parent == NO_PARENT {
            "None".to_string()
        } else {
            parent.to_string()
        };
        node.push_field(format!("Pivot[{}].Parent", i), "uint32", parent_text);
        vector_field(c, node, &format!("Pivot[{}].Translation", i))?;
        vector_field(c, node, &format!("Pivot[{}].Euler Angles", i))?;
        quaternion_field(c, node, &format!("Pivot[{}].Rotation", i))?;
        Ok(())
    })?;
    Ok(())
}
