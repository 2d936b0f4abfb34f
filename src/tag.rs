use crate::error::TagTypeError;
use std::fmt::{self, Display};

/// Kind of a tag, as encoded by the type id byte preceding every named tag.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TagKind {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

impl TagKind {
    pub fn from_id(type_id: u8) -> Option<TagKind> {
        use TagKind::*;

        let kind = match type_id {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            _ => return None,
        };

        Some(kind)
    }

    pub fn id(self) -> u8 {
        self as u8
    }
}

impl Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TagKind::*;

        let name = match self {
            End => "TAG_End",
            Byte => "TAG_Byte",
            Short => "TAG_Short",
            Int => "TAG_Int",
            Long => "TAG_Long",
            Float => "TAG_Float",
            Double => "TAG_Double",
            ByteArray => "TAG_Byte_Array",
            String => "TAG_String",
            List => "TAG_List",
            Compound => "TAG_Compound",
            IntArray => "TAG_Int_Array",
            LongArray => "TAG_Long_Array",
        };

        f.write_str(name)
    }
}

/// Decoded tag value.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    /// Elements share one kind, the list header stores it once.
    List(Vec<Tag>),
    Compound(CompoundTag),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Tag {
    pub fn kind(&self) -> TagKind {
        match self {
            Tag::Byte(_) => TagKind::Byte,
            Tag::Short(_) => TagKind::Short,
            Tag::Int(_) => TagKind::Int,
            Tag::Long(_) => TagKind::Long,
            Tag::Float(_) => TagKind::Float,
            Tag::Double(_) => TagKind::Double,
            Tag::ByteArray(_) => TagKind::ByteArray,
            Tag::String(_) => TagKind::String,
            Tag::List(_) => TagKind::List,
            Tag::Compound(_) => TagKind::Compound,
            Tag::IntArray(_) => TagKind::IntArray,
            Tag::LongArray(_) => TagKind::LongArray,
        }
    }

    pub fn as_compound(&self) -> Result<&CompoundTag, TagTypeError> {
        match self {
            Tag::Compound(compound) => Ok(compound),
            other => Err(TagTypeError::new(TagKind::Compound, other.kind())),
        }
    }

    pub fn as_list(&self) -> Result<&[Tag], TagTypeError> {
        match self {
            Tag::List(list) => Ok(list),
            other => Err(TagTypeError::new(TagKind::List, other.kind())),
        }
    }

    pub fn as_str(&self) -> Result<&str, TagTypeError> {
        match self {
            Tag::String(value) => Ok(value),
            other => Err(TagTypeError::new(TagKind::String, other.kind())),
        }
    }

    pub fn as_i8(&self) -> Result<i8, TagTypeError> {
        match self {
            Tag::Byte(value) => Ok(*value),
            other => Err(TagTypeError::new(TagKind::Byte, other.kind())),
        }
    }

    pub fn as_i32(&self) -> Result<i32, TagTypeError> {
        match self {
            Tag::Int(value) => Ok(*value),
            other => Err(TagTypeError::new(TagKind::Int, other.kind())),
        }
    }

    pub fn as_byte_array(&self) -> Result<&[i8], TagTypeError> {
        match self {
            Tag::ByteArray(value) => Ok(value),
            other => Err(TagTypeError::new(TagKind::ByteArray, other.kind())),
        }
    }
}

/// Named tags of a compound in the order they were decoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundTag {
    tags: Vec<(String, Tag)>,
}

impl CompoundTag {
    pub fn new() -> Self {
        CompoundTag::default()
    }

    /// Inserts a tag, replacing in place any tag with the same name.
    pub fn insert(&mut self, name: impl Into<String>, tag: Tag) {
        let name = name.into();

        match self.tags.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = tag,
            None => self.tags.push((name, tag)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.tags
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, tag)| tag)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.tags.iter().map(|(key, tag)| (key.as_str(), tag))
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl From<CompoundTag> for Tag {
    fn from(compound: CompoundTag) -> Self {
        Tag::Compound(compound)
    }
}
