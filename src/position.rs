use std::fmt::{self, Display};

/// Region position in region coordinates, as encoded in `r.<x>.<z>.mca` names.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone)]
pub struct RegionPosition {
    pub x: i32,
    pub z: i32,
}

impl RegionPosition {
    pub fn new(x: i32, z: i32) -> RegionPosition {
        RegionPosition { x, z }
    }
}

impl Display for RegionPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region {}, {}", self.x, self.z)
    }
}

/// Chunk position inside a region, both coordinates are in `0..32`.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone)]
pub struct RegionChunkPosition {
    pub x: u8,
    pub z: u8,
}

impl RegionChunkPosition {
    pub fn new(x: u8, z: u8) -> RegionChunkPosition {
        debug_assert!(32 > x, "Region chunk x coordinate out of bounds");
        debug_assert!(32 > z, "Region chunk z coordinate out of bounds");

        RegionChunkPosition { x, z }
    }

    /// Position of the chunk described by offset table entry `index`.
    pub fn from_metadata_index(index: usize) -> RegionChunkPosition {
        debug_assert!(1024 > index, "Region metadata index out of bounds");

        RegionChunkPosition::new((index % 32) as u8, (index / 32) as u8)
    }

    pub fn metadata_index(&self) -> usize {
        self.x as usize + self.z as usize * 32
    }
}
