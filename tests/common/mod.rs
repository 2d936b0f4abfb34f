#![allow(dead_code)]

use byteorder::{BigEndian, WriteBytesExt};
use nbt::encode::{write_gzip_compound_tag, write_zlib_compound_tag};
use nbt::CompoundTag;
use std::fs;
use std::path::{Path, PathBuf};

const SECTOR: usize = 4096;

/// Chunk with a single section at `Y` 0 filled with `block_id`.
pub fn chunk(
    x: i32,
    z: i32,
    block_id: i8,
    tile_entity: Option<(&str, i32, i32, i32)>,
) -> CompoundTag {
    let mut section = CompoundTag::new();
    section.insert_i8("Y", 0);
    section.insert_i8_vec("Blocks", vec![block_id; 4096]);

    let mut level = CompoundTag::new();
    level.insert_i32("xPos", x);
    level.insert_i32("zPos", z);
    level.insert_compound_tag_vec("Sections", vec![section]);

    if let Some((id, x, y, z)) = tile_entity {
        let mut entity = CompoundTag::new();
        entity.insert_str("id", id);
        entity.insert_i32("x", x);
        entity.insert_i32("y", y);
        entity.insert_i32("z", z);

        level.insert_compound_tag_vec("TileEntities", vec![entity]);
    }

    let mut root = CompoundTag::new();
    root.insert_compound_tag("Level", level);

    root
}

/// Chunk record as stored in a region: length, compression scheme and zlib payload.
pub fn zlib_record(chunk: CompoundTag) -> Vec<u8> {
    let mut payload = Vec::new();
    write_zlib_compound_tag(&mut payload, chunk).unwrap();

    let mut record = Vec::new();
    record.write_u32::<BigEndian>(payload.len() as u32 + 1).unwrap();
    record.write_u8(2).unwrap();
    record.extend_from_slice(&payload);

    record
}

/// Region file with the given records placed one after another from sector 2.
pub fn region(records: Vec<(usize, Vec<u8>)>) -> Vec<u8> {
    let mut data = vec![0u8; 2 * SECTOR];

    for (index, mut record) in records {
        let start_sector = data.len() / SECTOR;
        let sectors = (record.len() + SECTOR - 1) / SECTOR;
        record.resize(sectors * SECTOR, 0);

        let entry = (start_sector as u32) << 8 | sectors as u32;
        (&mut data[index * 4..index * 4 + 4])
            .write_u32::<BigEndian>(entry)
            .unwrap();

        data.extend_from_slice(&record);
    }

    data
}

/// Gzip compressed `level.dat` holding the given block registry entries.
pub fn level(entries: &[(&str, i32)]) -> Vec<u8> {
    let mut ids = Vec::new();

    for (name, id) in entries {
        let mut entry = CompoundTag::new();
        entry.insert_str("K", *name);
        entry.insert_i32("V", *id);
        ids.push(entry);
    }

    let mut blocks = CompoundTag::new();
    blocks.insert_compound_tag_vec("ids", ids);

    let mut registries = CompoundTag::new();
    registries.insert_compound_tag("minecraft:blocks", blocks);

    let mut fml = CompoundTag::new();
    fml.insert_compound_tag("Registries", registries);

    let mut root = CompoundTag::new();
    root.insert_compound_tag("FML", fml);

    let mut data = Vec::new();
    write_gzip_compound_tag(&mut data, root).unwrap();

    data
}

pub fn write_file(directory: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = directory.join(name);
    fs::write(&path, data).unwrap();

    path
}
