//! Block positions and conversions between block and curve space.

use glam::{DVec3, IVec3};

/// Integer voxel coordinate in the world.
pub type BlockPos = IVec3;

/// Convert a block position into curve space.
///
/// Anchors are fitted at the block's integer corner, so a curve through
/// `(0,0,0)` and `(10,0,0)` stays exactly on integer coordinates.
pub fn to_curve_space(pos: BlockPos) -> DVec3 {
    pos.as_dvec3()
}

/// Snap a curve-space point to the nearest block.
///
/// Rounding (rather than flooring) keeps points that land a hair below an
/// integer, such as `9.999999`, on the intended block.
pub fn to_block(point: DVec3) -> BlockPos {
    point.round().as_ivec3()
}

/// Parse a block position written as `X,Y,Z`.
///
/// Whitespace around each component is ignored.
pub fn parse_block_pos(value: &str) -> Result<BlockPos, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!(
            "invalid position '{value}': expected X,Y,Z with three integers"
        ));
    };

    let parse_axis = |label: &str, raw: &str| -> Result<i32, String> {
        raw.parse::<i32>()
            .map_err(|_| format!("invalid {label} coordinate '{raw}' in '{value}'"))
    };

    Ok(IVec3::new(
        parse_axis("x", x)?,
        parse_axis("y", y)?,
        parse_axis("z", z)?,
    ))
}
