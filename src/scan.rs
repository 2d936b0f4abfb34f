use crate::error::{ChunkLayoutError, ScanError};
use crate::limits::ScanLimits;
use crate::path::resolve;
use crate::region::Region;
use crate::registry::BlockRegistry;
use crate::section::{voxel_position, Section};
use crate::tag::Tag;
use log::{debug, info, warn};
use std::fmt::{self, Display};
use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::Path;

/// Occurrence of the searched block.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum BlockMatch {
    /// Block stored in a chunk section.
    Block {
        block_id: u16,
        chunk_x: i32,
        chunk_z: i32,
        section_y: Option<i8>,
        /// Block index inside the section.
        index: usize,
    },
    /// Tile entity whose id equals the block name.
    TileEntity {
        name: String,
        chunk_x: i32,
        chunk_z: i32,
        /// World coordinates, when the entity stores them.
        position: Option<(i32, i32, i32)>,
    },
}

impl BlockMatch {
    pub fn chunk_position(&self) -> (i32, i32) {
        match self {
            BlockMatch::Block {
                chunk_x, chunk_z, ..
            }
            | BlockMatch::TileEntity {
                chunk_x, chunk_z, ..
            } => (*chunk_x, *chunk_z),
        }
    }
}

impl Display for BlockMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockMatch::Block {
                block_id,
                chunk_x,
                chunk_z,
                section_y,
                index,
            } => {
                let (x, y, z) = voxel_position(*index);

                write!(
                    f,
                    "Found blockId {} in chunk at X:{}, Z:{}",
                    block_id, chunk_x, chunk_z
                )?;

                match section_y {
                    Some(section_y) => write!(
                        f,
                        " (block {}, {}, {})",
                        chunk_x * 16 + x as i32,
                        *section_y as i32 * 16 + y as i32,
                        chunk_z * 16 + z as i32
                    ),
                    None => write!(f, " (section block {}, {}, {})", x, y, z),
                }
            }
            BlockMatch::TileEntity {
                name,
                chunk_x,
                chunk_z,
                position,
            } => {
                write!(
                    f,
                    "Found block as Tile Entity {} in chunk at X:{}, Z:{}",
                    name, chunk_x, chunk_z
                )?;

                match position {
                    Some((x, y, z)) => write!(f, " (block {}, {}, {})", x, y, z),
                    None => Ok(()),
                }
            }
        }
    }
}

/// Counters collected while scanning.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ScanStats {
    pub regions_scanned: usize,
    pub regions_skipped: usize,
    pub chunks_scanned: usize,
    pub chunks_skipped: usize,
    pub sections_skipped: usize,
    pub matches: usize,
}

impl ScanStats {
    pub fn merge(&mut self, other: &ScanStats) {
        self.regions_scanned += other.regions_scanned;
        self.regions_skipped += other.regions_skipped;
        self.chunks_scanned += other.chunks_scanned;
        self.chunks_skipped += other.chunks_skipped;
        self.sections_skipped += other.sections_skipped;
        self.matches += other.matches;
    }
}

/// Searches region files for a single block id.
pub struct Scanner<'a> {
    block_id: u32,
    /// Registry name of the block, tile entities are matched by it.
    block_name: Option<&'a str>,
    limits: ScanLimits,
}

impl<'a> Scanner<'a> {
    pub fn new(registry: &'a BlockRegistry, block_id: u32) -> Self {
        Scanner {
            block_id,
            block_name: registry.name(block_id),
            limits: ScanLimits::default(),
        }
    }

    pub fn for_block_name(registry: &'a BlockRegistry, name: &str) -> Result<Self, ScanError> {
        let block_id = registry.id(name).ok_or_else(|| ScanError::BlockNotFound {
            name: name.to_owned(),
        })?;

        Ok(Scanner::new(registry, block_id))
    }

    pub fn with_limits(mut self, limits: ScanLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn block_id(&self) -> u32 {
        self.block_id
    }

    pub fn block_name(&self) -> Option<&'a str> {
        self.block_name
    }

    /// Scans region files one after another.
    ///
    /// Files which cannot be opened or have a broken header are logged and skipped.
    pub fn scan_paths<I, P, F>(&self, paths: I, mut on_match: F) -> ScanStats
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
        F: FnMut(BlockMatch),
    {
        let mut stats = ScanStats::default();

        for path in paths {
            let path = path.as_ref();

            match self.scan_file(path, &mut on_match) {
                Ok(file_stats) => stats.merge(&file_stats),
                Err(error) => {
                    warn!(target: "anvil-finder", "Could not scan {}: {}", path.display(), error);
                    stats.regions_skipped += 1;
                }
            }
        }

        stats
    }

    pub fn scan_file<P, F>(&self, path: P, on_match: F) -> Result<ScanStats, io::Error>
    where
        P: AsRef<Path>,
        F: FnMut(BlockMatch),
    {
        let path = path.as_ref();
        let file = File::open(path)?;

        self.scan_region(&path.display().to_string(), BufReader::new(file), on_match)
    }

    /// Scans every readable chunk of a region.
    ///
    /// Only a broken offset table fails the whole region, chunk
    /// and section problems are logged and skipped.
    pub fn scan_region<S, F>(
        &self,
        name: &str,
        source: S,
        mut on_match: F,
    ) -> Result<ScanStats, io::Error>
    where
        S: Read + Seek,
        F: FnMut(BlockMatch),
    {
        info!(target: "anvil-finder", "Looking in {}", name);

        let mut region = Region::load(source)?;
        let mut stats = ScanStats {
            regions_scanned: 1,
            ..ScanStats::default()
        };

        for location in region.chunk_locations(&self.limits) {
            let chunk = match region.read_chunk(&location, &self.limits) {
                Ok(chunk) => chunk,
                Err(error) => {
                    warn!(
                        target: "anvil-finder",
                        "Could not load {} of {}: {}", location, name, error
                    );
                    stats.chunks_skipped += 1;
                    continue;
                }
            };

            match self.scan_chunk(&chunk, &mut on_match, &mut stats) {
                Ok(()) => stats.chunks_scanned += 1,
                Err(error) => {
                    warn!(
                        target: "anvil-finder",
                        "Could not scan {} of {}: {}", location, name, error
                    );
                    stats.chunks_skipped += 1;
                }
            }
        }

        debug!(
            target: "anvil-finder",
            "Scanned {} chunks of {}, skipped {}",
            stats.chunks_scanned, name, stats.chunks_skipped
        );

        Ok(stats)
    }

    /// Reports matching blocks and tile entities of a decoded chunk.
    pub fn scan_chunk<F>(
        &self,
        chunk: &Tag,
        mut on_match: F,
        stats: &mut ScanStats,
    ) -> Result<(), ChunkLayoutError>
    where
        F: FnMut(BlockMatch),
    {
        let level = resolve(chunk, "Level")?;
        let chunk_x = coordinate(level, "xPos")?;
        let chunk_z = coordinate(level, "zPos")?;

        let sections = resolve(level, "Sections")?
            .as_list()
            .map_err(|type_error| ChunkLayoutError::Type {
                field: "Sections",
                type_error,
            })?;

        for (section_index, section_tag) in sections.iter().enumerate() {
            let section = match Section::from_tag(section_tag) {
                Ok(section) => section,
                Err(error) => {
                    warn!(
                        target: "anvil-finder",
                        "Skipping section {} of chunk at X:{}, Z:{}: {}",
                        section_index, chunk_x, chunk_z, error
                    );
                    stats.sections_skipped += 1;
                    continue;
                }
            };

            for (index, &block_id) in section.block_ids().iter().enumerate() {
                if block_id as u32 == self.block_id {
                    stats.matches += 1;
                    on_match(BlockMatch::Block {
                        block_id,
                        chunk_x,
                        chunk_z,
                        section_y: section.y(),
                        index,
                    });
                }
            }
        }

        let block_name = match self.block_name {
            Some(block_name) => block_name,
            None => return Ok(()),
        };

        let tile_entities = match resolve(level, "TileEntities") {
            Ok(tile_entities) => tile_entities,
            Err(_) => return Ok(()),
        };

        let tile_entities = match tile_entities.as_list() {
            Ok(tile_entities) => tile_entities,
            Err(error) => {
                warn!(
                    target: "anvil-finder",
                    "Skipping tile entities of chunk at X:{}, Z:{}: {}", chunk_x, chunk_z, error
                );
                return Ok(());
            }
        };

        for tile_entity in tile_entities {
            let tile_entity = match tile_entity.as_compound() {
                Ok(tile_entity) => tile_entity,
                Err(_) => continue,
            };

            let name = tile_entity.get("id").and_then(|id| id.as_str().ok());

            if name != Some(block_name) {
                continue;
            }

            let field = |key: &str| tile_entity.get(key).and_then(|tag| tag.as_i32().ok());
            let position = match (field("x"), field("y"), field("z")) {
                (Some(x), Some(y), Some(z)) => Some((x, y, z)),
                _ => None,
            };

            stats.matches += 1;
            on_match(BlockMatch::TileEntity {
                name: block_name.to_owned(),
                chunk_x,
                chunk_z,
                position,
            });
        }

        Ok(())
    }
}

fn coordinate(level: &Tag, field: &'static str) -> Result<i32, ChunkLayoutError> {
    resolve(level, field)?
        .as_i32()
        .map_err(|type_error| ChunkLayoutError::Type { field, type_error })
}
