use crate::tag::TagKind;
use cesu8::Cesu8DecodingError;
use std::{error::Error, fmt::Display, io};

/// Tag was accessed as a kind it does not have.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TagTypeError {
    pub expected: TagKind,
    pub found: TagKind,
}

impl TagTypeError {
    pub fn new(expected: TagKind, found: TagKind) -> Self {
        TagTypeError { expected, found }
    }
}

impl Error for TagTypeError {}

impl Display for TagTypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Expected {} but found {}", self.expected, self.found)
    }
}

/// Possible errors while decoding binary data to NBT tag.
#[derive(Debug)]
pub enum NbtError {
    /// Stream ended early or could not be read.
    IOError { io_error: io::Error },
    /// Type id outside of known tag kinds.
    UnknownTagType { type_id: u8 },
    /// Array or list declared a negative element count.
    NegativeLength { length: i32 },
    /// Tag name or string value is neither modified UTF-8 nor UTF-8.
    InvalidString { cesu8_error: Cesu8DecodingError },
    /// Document starts with `TAG_End` instead of a named root tag.
    RootIsEnd,
    /// `TAG_End` used as a value outside of an empty list.
    UnexpectedEnd,
    /// Compounds and lists are nested deeper than the decoder allows.
    NestingTooDeep { depth: usize },
}

impl From<io::Error> for NbtError {
    fn from(io_error: io::Error) -> Self {
        NbtError::IOError { io_error }
    }
}

impl Error for NbtError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        use NbtError::*;
        match self {
            IOError { io_error } => Some(io_error),
            InvalidString { cesu8_error } => Some(cesu8_error),
            _ => None,
        }
    }
}

impl Display for NbtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use NbtError::*;
        match self {
            IOError { io_error } => write!(f, "Failed to read nbt: {}", io_error),
            UnknownTagType { type_id } => write!(f, "Unknown tag type: {}", type_id),
            NegativeLength { length } => write!(f, "Negative length: {}", length),
            InvalidString { .. } => write!(f, "String is not valid modified UTF-8"),
            RootIsEnd => write!(f, "Root tag is TAG_End"),
            UnexpectedEnd => write!(f, "Unexpected TAG_End value"),
            NestingTooDeep { depth } => write!(f, "Tags nested deeper than {}", depth),
        }
    }
}

/// Path segment could not be resolved.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PathError {
    /// Compound has no tag with the segment name.
    MissingKey { path: String, segment: String },
    /// Segment used against a list is not a non-negative integer.
    InvalidIndex { path: String, segment: String },
    /// List has fewer elements than the segment index.
    IndexOutOfRange {
        path: String,
        segment: String,
        length: usize,
    },
    /// Segment tried to descend into a tag which is neither compound nor list.
    NotAContainer {
        path: String,
        segment: String,
        kind: TagKind,
    },
}

impl PathError {
    /// Segment at which resolution failed.
    pub fn segment(&self) -> &str {
        use PathError::*;
        match self {
            MissingKey { segment, .. }
            | InvalidIndex { segment, .. }
            | IndexOutOfRange { segment, .. }
            | NotAContainer { segment, .. } => segment,
        }
    }
}

impl Error for PathError {}

impl Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use PathError::*;
        match self {
            MissingKey { path, segment } => {
                write!(f, "Element `{}` of `{}` not found", segment, path)
            }
            InvalidIndex { path, segment } => {
                write!(f, "Element `{}` of `{}` is not a list index", segment, path)
            }
            IndexOutOfRange {
                path,
                segment,
                length,
            } => write!(
                f,
                "Element `{}` of `{}` out of range, list has {} elements",
                segment, path, length
            ),
            NotAContainer {
                path,
                segment,
                kind,
            } => write!(
                f,
                "Element `{}` of `{}` not found, parent is {}",
                segment, path, kind
            ),
        }
    }
}

/// Possible errors while loading the chunk.
///
/// None of them abort a scan, the chunk is skipped.
#[derive(Debug)]
pub enum ChunkReadError {
    /// Chunk header declares zero length, there is no room for compression scheme.
    InvalidLength { length: u32 },
    /// Chunk length overlaps declared maximum.
    ///
    /// This should not occur under normal conditions.
    ///
    /// Region file are corrupted.
    LengthExceedsMaximum {
        /// Compressed payload length.
        length: u32,
        /// Payload maximum expected length.
        maximum_length: u32,
    },
    /// Region file ended before the declared payload length.
    Truncated { expected: u32, actual: u64 },
    /// Currently are only 3 types of compression: Gzip, Zlib and none.
    ///
    /// Region file are corrupted or was introduced new compression type.
    UnsupportedCompressionScheme {
        /// Compression scheme type id.
        compression_scheme: u8,
    },
    /// I/O Error which happened while were reading chunk data from region file.
    IOError { io_error: io::Error },
    /// Compressed stream is broken.
    DecompressError { io_error: io::Error },
    /// Payload inflates past the configured maximum.
    DecompressedLengthExceedsMaximum { maximum_length: u64 },
    /// Error while decoding binary data to NBT tag.
    ///
    /// Region file are corrupted.
    TagDecodeError { tag_decode_error: NbtError },
}

impl From<io::Error> for ChunkReadError {
    fn from(io_error: io::Error) -> Self {
        ChunkReadError::IOError { io_error }
    }
}

impl From<NbtError> for ChunkReadError {
    fn from(tag_decode_error: NbtError) -> Self {
        ChunkReadError::TagDecodeError { tag_decode_error }
    }
}

impl Error for ChunkReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        use ChunkReadError::*;
        match self {
            IOError { io_error } | DecompressError { io_error } => Some(io_error),
            TagDecodeError { tag_decode_error } => Some(tag_decode_error),
            _ => None,
        }
    }
}

impl Display for ChunkReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ChunkReadError::*;
        match self {
            InvalidLength { length } => write!(f, "Invalid chunk length {}", length),
            LengthExceedsMaximum {
                length,
                maximum_length,
            } => write!(
                f,
                "Chunk length of {} exceeds maximum ({})",
                length, maximum_length
            ),
            Truncated { expected, actual } => write!(
                f,
                "Expected to read {} bytes but got {}",
                expected, actual
            ),
            UnsupportedCompressionScheme { compression_scheme } => {
                write!(f, "Unsupported compression scheme: {}", compression_scheme)
            }
            IOError { io_error } => write!(f, "Failed to read chunk: {}", io_error),
            DecompressError { io_error } => {
                write!(f, "Failed to decompress chunk: {}", io_error)
            }
            DecompressedLengthExceedsMaximum { maximum_length } => write!(
                f,
                "Decompressed chunk exceeds maximum ({})",
                maximum_length
            ),
            TagDecodeError { tag_decode_error } => {
                write!(f, "Failed to decode chunk nbt: {}", tag_decode_error)
            }
        }
    }
}

/// Decoded chunk misses a tag the scan needs.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ChunkLayoutError {
    Path { path_error: PathError },
    Type {
        field: &'static str,
        type_error: TagTypeError,
    },
}

impl From<PathError> for ChunkLayoutError {
    fn from(path_error: PathError) -> Self {
        ChunkLayoutError::Path { path_error }
    }
}

impl Error for ChunkLayoutError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ChunkLayoutError::Path { path_error } => Some(path_error),
            ChunkLayoutError::Type { type_error, .. } => Some(type_error),
        }
    }
}

impl Display for ChunkLayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChunkLayoutError::Path { path_error } => write!(f, "{}", path_error),
            ChunkLayoutError::Type { field, type_error } => {
                write!(f, "Chunk field `{}`: {}", field, type_error)
            }
        }
    }
}

/// Section data that cannot be turned into block ids.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SectionError {
    /// Sections list element is not a compound.
    NotACompound { type_error: TagTypeError },
    /// Section has no `Blocks` array.
    MissingBlocks,
    /// Array holds an unexpected amount of entries.
    Length {
        array: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Array tag has a different kind than a byte array.
    Type {
        array: &'static str,
        type_error: TagTypeError,
    },
}

impl Error for SectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SectionError::NotACompound { type_error } | SectionError::Type { type_error, .. } => {
                Some(type_error)
            }
            _ => None,
        }
    }
}

impl Display for SectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use SectionError::*;
        match self {
            NotACompound { type_error } => write!(f, "Section: {}", type_error),
            MissingBlocks => write!(f, "Section has no Blocks array"),
            Length {
                array,
                expected,
                actual,
            } => write!(
                f,
                "{} array have a weird length: {} (expected {})",
                array, actual, expected
            ),
            Type { array, type_error } => write!(f, "{} array: {}", array, type_error),
        }
    }
}

/// Block registry could not be built from level data.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RegistryError {
    /// Registry ids path does not resolve.
    Path { path_error: PathError },
    /// Registry ids are not stored as a list.
    NotAList { type_error: TagTypeError },
    /// Registry entry is not a compound.
    Entry {
        index: usize,
        type_error: TagTypeError,
    },
    /// Registry entry lacks the `K` or `V` field.
    MissingField { index: usize, field: &'static str },
    /// Registry entry field has an unexpected kind.
    FieldType {
        index: usize,
        field: &'static str,
        type_error: TagTypeError,
    },
    /// Block id is negative.
    NegativeId { index: usize, name: String, id: i32 },
}

impl From<PathError> for RegistryError {
    fn from(path_error: PathError) -> Self {
        RegistryError::Path { path_error }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        use RegistryError::*;
        match self {
            Path { path_error } => Some(path_error),
            NotAList { type_error }
            | Entry { type_error, .. }
            | FieldType { type_error, .. } => Some(type_error),
            _ => None,
        }
    }
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use RegistryError::*;
        match self {
            Path { path_error } => write!(f, "Block registry not found: {}", path_error),
            NotAList { type_error } => write!(f, "Block registry ids: {}", type_error),
            Entry { index, type_error } => {
                write!(f, "Block registry entry {}: {}", index, type_error)
            }
            MissingField { index, field } => {
                write!(f, "Block registry entry {} has no {}", index, field)
            }
            FieldType {
                index,
                field,
                type_error,
            } => write!(
                f,
                "Block registry entry {} field {}: {}",
                index, field, type_error
            ),
            NegativeId { index, name, id } => write!(
                f,
                "Block registry entry {} ({}) has negative id {}",
                index, name, id
            ),
        }
    }
}

/// Possible errors while loading the level metadata file.
#[derive(Debug)]
pub enum LevelError {
    IOError { io_error: io::Error },
    TagDecodeError { tag_decode_error: NbtError },
}

impl From<io::Error> for LevelError {
    fn from(io_error: io::Error) -> Self {
        LevelError::IOError { io_error }
    }
}

impl From<NbtError> for LevelError {
    fn from(tag_decode_error: NbtError) -> Self {
        LevelError::TagDecodeError { tag_decode_error }
    }
}

impl Error for LevelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LevelError::IOError { io_error } => Some(io_error),
            LevelError::TagDecodeError { tag_decode_error } => Some(tag_decode_error),
        }
    }
}

impl Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::IOError { io_error } => write!(f, "Failed to read level: {}", io_error),
            LevelError::TagDecodeError { tag_decode_error } => {
                write!(f, "Failed to decode level nbt: {}", tag_decode_error)
            }
        }
    }
}

/// Scan cannot start.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ScanError {
    /// Block name has no registry entry.
    BlockNotFound { name: String },
}

impl Error for ScanError {}

impl Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanError::BlockNotFound { name } => {
                write!(f, "No block id found for block name \"{}\"", name)
            }
        }
    }
}
