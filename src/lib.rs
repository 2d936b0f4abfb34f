//! Finds where a block is used in a world saved in the legacy Anvil format.
//!
//! Block ids are numeric and assigned per world, so the name to id mapping is
//! read from `level.dat` first. Region files are then scanned chunk by chunk.

pub mod decode;
pub mod error;
pub mod level;
pub mod limits;
pub mod path;
pub mod position;
pub mod provider;
pub mod region;
pub mod registry;
pub mod scan;
pub mod section;
pub mod tag;
pub mod zip_region_provider;

pub use crate::error::{
    ChunkLayoutError, ChunkReadError, LevelError, NbtError, PathError, RegistryError, ScanError,
    SectionError, TagTypeError,
};
pub use crate::level::read_level;
pub use crate::limits::ScanLimits;
pub use crate::path::resolve;
pub use crate::region::Region;
pub use crate::registry::BlockRegistry;
pub use crate::scan::{BlockMatch, ScanStats, Scanner};
pub use crate::section::Section;
pub use crate::tag::{CompoundTag, Tag, TagKind};
