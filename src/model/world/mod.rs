pub mod block;
pub mod sector;
pub mod terrain;

pub use block::{tex_coord, tex_coords, BlockTexCoords, BlockType, ATLAS_TILES, FACES};
pub use sector::{sector_neighborhood, sectorize, SectorCoord, SectorIndex, SECTOR_SIZE};
pub use terrain::WorldGenerator;
