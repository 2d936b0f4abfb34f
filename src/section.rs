//! Block ids of legacy (pre-palette) chunk sections.
//!
//! A section stores 4096 block ids. The low 8 bits live in `Blocks`, one byte
//! per block. Worlds with more than 256 registered blocks add `Add` (bits 8-11)
//! and `Add2` (bits 12-15), both packing two blocks per byte: the low nibble
//! belongs to the even block, the high nibble to the following odd block.

use crate::error::SectionError;
use crate::tag::{CompoundTag, Tag};

/// Amount of blocks in section.
pub const SECTION_BLOCKS: usize = 4096;
/// Length of nibble arrays, two blocks per byte.
pub const SECTION_NIBBLES_LENGTH: usize = SECTION_BLOCKS / 2;

const BLOCKS: &str = "Blocks";
const ADD: &str = "Add";
const ADD2: &str = "Add2";

/// Section with reconstructed block ids.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Section {
    /// Section index from the bottom of the chunk, if stored.
    y: Option<i8>,
    /// Block ids in storage order, see [`voxel_position`].
    block_ids: Vec<u16>,
}

impl Section {
    pub fn from_tag(tag: &Tag) -> Result<Self, SectionError> {
        let compound = tag
            .as_compound()
            .map_err(|type_error| SectionError::NotACompound { type_error })?;

        let blocks = byte_array(compound, BLOCKS)?.ok_or(SectionError::MissingBlocks)?;
        let add = byte_array(compound, ADD)?;
        let add2 = byte_array(compound, ADD2)?;

        let block_ids = reconstruct_block_ids(blocks, add, add2)?;
        let y = compound.get("Y").and_then(|tag| tag.as_i8().ok());

        Ok(Section { y, block_ids })
    }

    pub fn y(&self) -> Option<i8> {
        self.y
    }

    pub fn block_ids(&self) -> &[u16] {
        &self.block_ids
    }
}

/// Merges base and extension arrays into full block ids.
///
/// Arrays with unexpected lengths are rejected before anything is merged.
pub fn reconstruct_block_ids(
    blocks: &[i8],
    add: Option<&[i8]>,
    add2: Option<&[i8]>,
) -> Result<Vec<u16>, SectionError> {
    check_length(BLOCKS, blocks, SECTION_BLOCKS)?;

    if let Some(add) = add {
        check_length(ADD, add, SECTION_NIBBLES_LENGTH)?;
    }

    if let Some(add2) = add2 {
        check_length(ADD2, add2, SECTION_NIBBLES_LENGTH)?;
    }

    let mut block_ids: Vec<u16> = blocks.iter().map(|&block| block as u8 as u16).collect();

    if let Some(add) = add {
        merge_nibbles(&mut block_ids, add, 8);
    }

    if let Some(add2) = add2 {
        merge_nibbles(&mut block_ids, add2, 12);
    }

    Ok(block_ids)
}

/// Local `(x, y, z)` of the block at `index` in a section.
pub fn voxel_position(index: usize) -> (u8, u8, u8) {
    debug_assert!(SECTION_BLOCKS > index, "Section block index out of bounds");

    let x = (index & 0xF) as u8;
    let z = ((index >> 4) & 0xF) as u8;
    let y = ((index >> 8) & 0xF) as u8;

    (x, y, z)
}

fn merge_nibbles(block_ids: &mut [u16], nibbles: &[i8], shift: u32) {
    for (index, &byte) in nibbles.iter().enumerate() {
        let byte = byte as u8;

        block_ids[index * 2] |= ((byte & 0x0F) as u16) << shift;
        block_ids[index * 2 + 1] |= ((byte >> 4) as u16) << shift;
    }
}

fn check_length(array: &'static str, values: &[i8], expected: usize) -> Result<(), SectionError> {
    if values.len() != expected {
        return Err(SectionError::Length {
            array,
            expected,
            actual: values.len(),
        });
    }

    Ok(())
}

fn byte_array<'a>(
    compound: &'a CompoundTag,
    array: &'static str,
) -> Result<Option<&'a [i8]>, SectionError> {
    match compound.get(array) {
        Some(tag) => tag
            .as_byte_array()
            .map(Some)
            .map_err(|type_error| SectionError::Type { array, type_error }),
        None => Ok(None),
    }
}
