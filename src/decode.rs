use crate::error::NbtError;
use crate::tag::{CompoundTag, Tag, TagKind};
use byteorder::{BigEndian, ReadBytesExt};
use cesu8::from_java_cesu8;
use flate2::read::{GzDecoder, ZlibDecoder};
use std::io::{self, BufRead, BufReader, Read};

/// Maximum depth of nested compounds and lists.
pub const MAXIMUM_NESTING_DEPTH: usize = 512;
/// Upper bound for up front allocation, declared lengths are not trusted.
const PREALLOCATION_LIMIT: usize = 64 * 1024;

/// Reads a named root tag from an uncompressed stream.
///
/// Returns root tag name and the tag itself.
pub fn read_tag<R: Read>(reader: &mut R) -> Result<(String, Tag), NbtError> {
    let kind = read_kind(reader)?;

    if kind == TagKind::End {
        return Err(NbtError::RootIsEnd);
    }

    let name = read_string(reader)?;
    let tag = read_payload(reader, kind, 0)?;

    Ok((name, tag))
}

/// Reads a root tag from a gzip, zlib or uncompressed stream.
///
/// Compression is detected from the first bytes of the stream.
pub fn read_compressed_tag<R: Read>(reader: R) -> Result<(String, Tag), NbtError> {
    let mut reader = BufReader::new(reader);

    let compression = match reader.fill_buf()? {
        [0x1f, 0x8b, ..] => Compression::Gzip,
        [0x78, ..] => Compression::Zlib,
        _ => Compression::None,
    };

    match compression {
        Compression::Gzip => read_tag(&mut GzDecoder::new(reader)),
        Compression::Zlib => read_tag(&mut ZlibDecoder::new(reader)),
        Compression::None => read_tag(&mut reader),
    }
}

enum Compression {
    Gzip,
    Zlib,
    None,
}

fn read_kind<R: Read>(reader: &mut R) -> Result<TagKind, NbtError> {
    let type_id = reader.read_u8()?;

    TagKind::from_id(type_id).ok_or(NbtError::UnknownTagType { type_id })
}

fn read_payload<R: Read>(reader: &mut R, kind: TagKind, depth: usize) -> Result<Tag, NbtError> {
    if depth > MAXIMUM_NESTING_DEPTH {
        return Err(NbtError::NestingTooDeep {
            depth: MAXIMUM_NESTING_DEPTH,
        });
    }

    let tag = match kind {
        TagKind::End => return Err(NbtError::UnexpectedEnd),
        TagKind::Byte => Tag::Byte(reader.read_i8()?),
        TagKind::Short => Tag::Short(reader.read_i16::<BigEndian>()?),
        TagKind::Int => Tag::Int(reader.read_i32::<BigEndian>()?),
        TagKind::Long => Tag::Long(reader.read_i64::<BigEndian>()?),
        TagKind::Float => Tag::Float(reader.read_f32::<BigEndian>()?),
        TagKind::Double => Tag::Double(reader.read_f64::<BigEndian>()?),
        TagKind::ByteArray => {
            let length = read_length(reader)?;
            let bytes = read_bytes(reader, length)?;

            Tag::ByteArray(bytes.into_iter().map(|byte| byte as i8).collect())
        }
        TagKind::String => Tag::String(read_string(reader)?),
        TagKind::List => {
            let element_kind = read_kind(reader)?;
            let length = read_length(reader)?;

            // Empty lists are usually written with TAG_End as element kind.
            if element_kind == TagKind::End {
                if length > 0 {
                    return Err(NbtError::UnexpectedEnd);
                }

                return Ok(Tag::List(Vec::new()));
            }

            let mut list = Vec::with_capacity(length.min(PREALLOCATION_LIMIT));

            for _ in 0..length {
                list.push(read_payload(reader, element_kind, depth + 1)?);
            }

            Tag::List(list)
        }
        TagKind::Compound => {
            let mut compound = CompoundTag::new();

            loop {
                let child_kind = read_kind(reader)?;

                if child_kind == TagKind::End {
                    break;
                }

                let name = read_string(reader)?;
                let child = read_payload(reader, child_kind, depth + 1)?;

                compound.insert(name, child);
            }

            Tag::Compound(compound)
        }
        TagKind::IntArray => {
            let length = read_length(reader)?;
            let mut values = Vec::with_capacity(length.min(PREALLOCATION_LIMIT));

            for _ in 0..length {
                values.push(reader.read_i32::<BigEndian>()?);
            }

            Tag::IntArray(values)
        }
        TagKind::LongArray => {
            let length = read_length(reader)?;
            let mut values = Vec::with_capacity(length.min(PREALLOCATION_LIMIT));

            for _ in 0..length {
                values.push(reader.read_i64::<BigEndian>()?);
            }

            Tag::LongArray(values)
        }
    };

    Ok(tag)
}

fn read_length<R: Read>(reader: &mut R) -> Result<usize, NbtError> {
    let length = reader.read_i32::<BigEndian>()?;

    if length < 0 {
        return Err(NbtError::NegativeLength { length });
    }

    Ok(length as usize)
}

fn read_string<R: Read>(reader: &mut R) -> Result<String, NbtError> {
    let length = reader.read_u16::<BigEndian>()?;
    let bytes = read_bytes(reader, length as usize)?;

    // Java writes modified UTF-8, other tools may write plain UTF-8.
    let decoded = from_java_cesu8(&bytes).map(|string| string.into_owned());

    match decoded {
        Ok(string) => Ok(string),
        Err(cesu8_error) => {
            String::from_utf8(bytes).map_err(|_| NbtError::InvalidString { cesu8_error })
        }
    }
}

fn read_bytes<R: Read>(reader: &mut R, length: usize) -> Result<Vec<u8>, NbtError> {
    let mut buffer = Vec::with_capacity(length.min(PREALLOCATION_LIMIT));
    reader.by_ref().take(length as u64).read_to_end(&mut buffer)?;

    if buffer.len() != length {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }

    Ok(buffer)
}
