use serde::{Deserialize, Serialize};

/// Number of tiles along each side of the texture atlas
pub const ATLAS_TILES: u32 = 4;

/// Texture coordinates of one block: 6 faces x 4 corners
pub type BlockTexCoords = [[f32; 2]; 24];

/// Unit offsets to the 6 face-adjacent neighbors.
///
/// Order: top, bottom, left, right, front, back. Collision response walks them in this order.
pub const FACES: [(i32, i32, i32); 6] = [
    (0, 1, 0),
    (0, -1, 0),
    (-1, 0, 0),
    (1, 0, 0),
    (0, 0, 1),
    (0, 0, -1),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Grass,
    Sand,
    Brick,
    Stone,
}

impl BlockType {
    pub const ALL: [BlockType; 4] = [BlockType::Grass, BlockType::Sand, BlockType::Brick, BlockType::Stone];

    /// Players may not break this block type
    pub fn is_destructible(self) -> bool {
        self != BlockType::Stone
    }

    /// Atlas tiles as (top, bottom, side)
    fn tiles(self) -> ((u32, u32), (u32, u32), (u32, u32)) {
        match self {
            BlockType::Grass => ((1, 0), (0, 1), (0, 0)),
            BlockType::Sand => ((1, 1), (1, 1), (1, 1)),
            BlockType::Brick => ((2, 0), (2, 0), (2, 0)),
            BlockType::Stone => ((2, 1), (2, 1), (2, 1)),
        }
    }

    /// The 24 texture coordinates matching the vertex order of `cube_vertices`
    pub fn tex_coords(self) -> BlockTexCoords {
        let (top, bottom, side) = self.tiles();
        tex_coords(top, bottom, side)
    }
}

/// Bounding corners of the atlas tile at (`col`, `row`)
pub fn tex_coord(col: u32, row: u32) -> [[f32; 2]; 4] {
    let m = 1.0 / ATLAS_TILES as f32;
    let dx = col as f32 * m;
    let dy = row as f32 * m;
    [[dx, dy], [dx + m, dy], [dx + m, dy + m], [dx, dy + m]]
}

/// Texture squares for the top, bottom and the four sides
pub fn tex_coords(top: (u32, u32), bottom: (u32, u32), side: (u32, u32)) -> BlockTexCoords {
    let top = tex_coord(top.0, top.1);
    let bottom = tex_coord(bottom.0, bottom.1);
    let side = tex_coord(side.0, side.1);

    let mut result = [[0.0; 2]; 24];
    result[0..4].copy_from_slice(&top);
    result[4..8].copy_from_slice(&bottom);
    for face in 2..6 {
        result[face * 4..face * 4 + 4].copy_from_slice(&side);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_corners() {
        assert_eq!(tex_coord(0, 0), [[0.0, 0.0], [0.25, 0.0], [0.25, 0.25], [0.0, 0.25]]);
        assert_eq!(tex_coord(2, 1), [[0.5, 0.25], [0.75, 0.25], [0.75, 0.5], [0.5, 0.5]]);
    }

    #[test]
    fn test_grass_uses_distinct_top_and_bottom() {
        let uv = BlockType::Grass.tex_coords();
        assert_eq!(&uv[0..4], &tex_coord(1, 0));
        assert_eq!(&uv[4..8], &tex_coord(0, 1));
        for face in 2..6 {
            assert_eq!(&uv[face * 4..face * 4 + 4], &tex_coord(0, 0), "side face {face}");
        }
    }

    #[test]
    fn test_single_tile_blocks() {
        let stone = BlockType::Stone.tex_coords();
        for face in 0..6 {
            assert_eq!(&stone[face * 4..face * 4 + 4], &tex_coord(2, 1));
        }
    }

    #[test]
    fn test_only_stone_is_indestructible() {
        for block in BlockType::ALL {
            assert_eq!(block.is_destructible(), block != BlockType::Stone);
        }
    }

    #[test]
    fn test_faces_are_unit_offsets() {
        for (x, y, z) in FACES {
            assert_eq!(x.abs() + y.abs() + z.abs(), 1);
        }
    }
}
