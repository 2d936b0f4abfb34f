/// Region header length in bytes: offset table followed by timestamp table.
pub const REGION_HEADER_BYTES_LENGTH: u64 = 8192;
/// Chunk byte offsets at or past this value are not read.
///
/// Not a format limit, region files are not expected to grow that far.
pub const MAX_CHUNK_OFFSET: u64 = 16 * 1024 * 1024;
/// Maximum compressed chunk payload length in bytes.
pub const MAX_CHUNK_PAYLOAD: u32 = 16 * 1024 * 1024;
/// Maximum chunk length in bytes after decompression.
pub const MAX_CHUNK_DECOMPRESSED: u64 = 64 * 1024 * 1024;

/// Sanity bounds applied while reading chunks from region files.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ScanLimits {
    /// Lowest accepted chunk byte offset, anything lower overlaps the header.
    pub min_chunk_offset: u64,
    /// Chunk byte offsets must be lower than this.
    pub max_chunk_offset: u64,
    /// Compressed payloads longer than this are treated as corrupted.
    pub max_chunk_payload: u32,
    /// Payloads inflating past this are treated as corrupted.
    pub max_chunk_decompressed: u64,
}

impl ScanLimits {
    pub fn contains_offset(&self, byte_offset: u64) -> bool {
        byte_offset >= self.min_chunk_offset && byte_offset < self.max_chunk_offset
    }
}

impl Default for ScanLimits {
    fn default() -> Self {
        ScanLimits {
            min_chunk_offset: REGION_HEADER_BYTES_LENGTH,
            max_chunk_offset: MAX_CHUNK_OFFSET,
            max_chunk_payload: MAX_CHUNK_PAYLOAD,
            max_chunk_decompressed: MAX_CHUNK_DECOMPRESSED,
        }
    }
}
