use crate::decode::read_tag;
use crate::error::ChunkReadError;
use crate::limits::ScanLimits;
use crate::position::RegionChunkPosition;
use crate::tag::Tag;
use byteorder::{BigEndian, ReadBytesExt};
use flate2::read::{GzDecoder, ZlibDecoder};
use log::debug;
use std::fmt::{self, Display};
use std::io::{self, Cursor, Read, Seek, SeekFrom};

/// Amount of chunks in region.
pub const REGION_CHUNKS: usize = 1024;
/// Region sector length in bytes.
pub const REGION_SECTOR_BYTES_LENGTH: u64 = 4096;

/// Gzip compression type value.
const GZIP_COMPRESSION_TYPE: u8 = 1;
/// Zlib compression type value.
const ZLIB_COMPRESSION_TYPE: u8 = 2;
/// Uncompressed type value.
const UNCOMPRESSED_TYPE: u8 = 3;

/// Region represents a 32x32 group of chunks.
pub struct Region<S> {
    /// Source in which region are stored.
    source: S,
    /// Array of chunks metadata.
    chunks_metadata: [ChunkMetadata; REGION_CHUNKS],
}

/// Chunk metadata are stored in header.
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq)]
pub struct ChunkMetadata {
    /// Sector index from which starts chunk data.
    start_sector_index: u32,
    /// Amount of sectors used to store chunk.
    sectors: u8,
}

impl ChunkMetadata {
    fn new(start_sector_index: u32, sectors: u8) -> Self {
        ChunkMetadata {
            start_sector_index,
            sectors,
        }
    }

    pub fn start_sector_index(&self) -> u32 {
        self.start_sector_index
    }

    pub fn sectors(&self) -> u8 {
        self.sectors
    }

    /// Position offset from file start at which starts chunk data.
    pub fn byte_offset(&self) -> u64 {
        self.start_sector_index as u64 * REGION_SECTOR_BYTES_LENGTH
    }

    /// Chunk was never generated or saved.
    pub fn is_empty(&self) -> bool {
        self.start_sector_index == 0
    }
}

/// Chunk which passed offset table checks and can be read.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ChunkLocation {
    /// Offset table index.
    pub index: usize,
    pub position: RegionChunkPosition,
    pub byte_offset: u64,
}

impl Display for ChunkLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "chunk {}, {} at offset {}",
            self.position.x, self.position.z, self.byte_offset
        )
    }
}

impl<S: Read + Seek> Region<S> {
    /// Reads offset table from the beginning of the source.
    pub fn load(mut source: S) -> Result<Self, io::Error> {
        source.seek(SeekFrom::Start(0))?;
        let chunks_metadata = Self::read_header(&mut source)?;

        let region = Region {
            source,
            chunks_metadata,
        };

        Ok(region)
    }

    /// Returns chunk metadata at specified position.
    pub fn chunk_metadata(&self, position: RegionChunkPosition) -> ChunkMetadata {
        self.chunks_metadata[position.metadata_index()]
    }

    /// Chunks worth reading in offset table order.
    ///
    /// Empty entries and entries pointing outside of limits are skipped.
    pub fn chunk_locations(&self, limits: &ScanLimits) -> Vec<ChunkLocation> {
        self.chunks_metadata
            .iter()
            .enumerate()
            .filter(|(_, metadata)| !metadata.is_empty())
            .filter_map(|(index, metadata)| {
                let byte_offset = metadata.byte_offset();

                if !limits.contains_offset(byte_offset) {
                    debug!(
                        target: "anvil-finder",
                        "Skipping chunk {} because its offset is {}", index, byte_offset
                    );

                    return None;
                }

                Some(ChunkLocation {
                    index,
                    position: RegionChunkPosition::from_metadata_index(index),
                    byte_offset,
                })
            })
            .collect()
    }

    /// Reads and decompresses chunk payload.
    pub fn read_chunk_data(
        &mut self,
        location: &ChunkLocation,
        limits: &ScanLimits,
    ) -> Result<Vec<u8>, ChunkReadError> {
        self.source.seek(SeekFrom::Start(location.byte_offset))?;

        let length = self.source.read_u32::<BigEndian>()?;
        let compression_scheme = self.source.read_u8()?;

        // Length includes compression scheme byte.
        let payload_length = length
            .checked_sub(1)
            .ok_or(ChunkReadError::InvalidLength { length })?;

        if payload_length > limits.max_chunk_payload {
            return Err(ChunkReadError::LengthExceedsMaximum {
                length: payload_length,
                maximum_length: limits.max_chunk_payload,
            });
        }

        let mut compressed_buffer = Vec::with_capacity(payload_length as usize);
        let actual = self
            .source
            .by_ref()
            .take(payload_length as u64)
            .read_to_end(&mut compressed_buffer)?;

        if actual as u64 != payload_length as u64 {
            return Err(ChunkReadError::Truncated {
                expected: payload_length,
                actual: actual as u64,
            });
        }

        debug!(
            target: "anvil-finder",
            "Loaded {} compressed bytes of {}", payload_length, location
        );

        decompress(
            compression_scheme,
            compressed_buffer,
            limits.max_chunk_decompressed,
        )
    }

    /// Reads chunk payload and decodes it to NBT tag.
    pub fn read_chunk(
        &mut self,
        location: &ChunkLocation,
        limits: &ScanLimits,
    ) -> Result<Tag, ChunkReadError> {
        let data = self.read_chunk_data(location, limits)?;
        let (_, tag) = read_tag(&mut Cursor::new(data))?;

        Ok(tag)
    }

    /// First 4KB of source are 1024 chunk offsets.
    fn read_header(source: &mut S) -> Result<[ChunkMetadata; REGION_CHUNKS], io::Error> {
        let mut chunks_metadata = [ChunkMetadata::default(); REGION_CHUNKS];

        for metadata in chunks_metadata.iter_mut() {
            let offset = source.read_u32::<BigEndian>()?;

            let start_sector_index = offset >> 8;
            let sectors = (offset & 0xFF) as u8;

            *metadata = ChunkMetadata::new(start_sector_index, sectors);
        }

        Ok(chunks_metadata)
    }
}

fn decompress(
    compression_scheme: u8,
    compressed_buffer: Vec<u8>,
    maximum_length: u64,
) -> Result<Vec<u8>, ChunkReadError> {
    let mut buffer = Vec::new();

    // One byte past the maximum tells an oversized stream from one of exact length.
    let result = match compression_scheme {
        GZIP_COMPRESSION_TYPE => GzDecoder::new(compressed_buffer.as_slice())
            .take(maximum_length.saturating_add(1))
            .read_to_end(&mut buffer),
        ZLIB_COMPRESSION_TYPE => ZlibDecoder::new(compressed_buffer.as_slice())
            .take(maximum_length.saturating_add(1))
            .read_to_end(&mut buffer),
        UNCOMPRESSED_TYPE => {
            buffer = compressed_buffer;
            Ok(buffer.len())
        }
        _ => return Err(ChunkReadError::UnsupportedCompressionScheme { compression_scheme }),
    };

    result.map_err(|io_error| ChunkReadError::DecompressError { io_error })?;

    if buffer.len() as u64 > maximum_length {
        return Err(ChunkReadError::DecompressedLengthExceedsMaximum { maximum_length });
    }

    Ok(buffer)
}
