mod common;

use anvil_finder::provider::FolderRegionProvider;
use anvil_finder::{read_level, BlockMatch, BlockRegistry, ScanError, Scanner};
use common::*;
use std::fs::create_dir;

fn registry() -> BlockRegistry {
    let directory = tempfile::tempdir().unwrap();
    let path = write_file(
        directory.path(),
        "level.dat",
        &level(&[
            ("minecraft:air", 0),
            ("minecraft:stone", 1),
            ("minecraft:bedrock", 7),
            ("minecraft:chest", 54),
        ]),
    );

    BlockRegistry::from_level(&read_level(path).unwrap()).unwrap()
}

#[test]
fn test_registry_from_level_file() {
    let directory = tempfile::tempdir().unwrap();
    let path = write_file(
        directory.path(),
        "level.dat",
        &level(&[
            ("minecraft:air", 0),
            ("minecraft:stone", 1),
            ("minecraft:dirt", 3),
        ]),
    );

    let registry = BlockRegistry::from_level(&read_level(path).unwrap()).unwrap();

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.id("minecraft:stone"), Some(1));
    assert_eq!(registry.id("minecraft:dirt"), Some(3));
    assert_eq!(registry.id("minecraft:air"), None);
    assert_eq!(
        registry.iter().collect::<Vec<_>>(),
        vec![(1, "minecraft:stone"), (3, "minecraft:dirt")]
    );
}

#[test]
fn test_unknown_block_name_stops_before_scanning() {
    let registry = registry();

    match Scanner::for_block_name(&registry, "minecraft:diamond_ore") {
        Err(ScanError::BlockNotFound { name }) => assert_eq!(name, "minecraft:diamond_ore"),
        Err(e) => panic!("Expected `BlockNotFound` but got `{:?}`", e),
        Ok(_) => panic!("Expected `BlockNotFound` but got a scanner"),
    }
}

#[test]
fn test_scan_region_file() {
    let registry = registry();
    let scanner = Scanner::for_block_name(&registry, "minecraft:bedrock").unwrap();
    let directory = tempfile::tempdir().unwrap();

    // Entry 0 is absent, entry 1 holds chunk at X:4, Z:-2.
    let path = write_file(
        directory.path(),
        "r.0.-1.mca",
        &region(vec![(1, zlib_record(chunk(4, -2, 7, None)))]),
    );

    let mut matches = Vec::new();
    let stats = scanner
        .scan_file(&path, |block_match| matches.push(block_match))
        .unwrap();

    assert_eq!(stats.regions_scanned, 1);
    assert_eq!(stats.chunks_scanned, 1);
    assert_eq!(stats.chunks_skipped, 0);
    assert_eq!(stats.matches, 4096);
    assert_eq!(matches.len(), 4096);
    assert!(matches
        .iter()
        .all(|block_match| block_match.chunk_position() == (4, -2)));
    assert_eq!(
        matches[4095].to_string(),
        "Found blockId 7 in chunk at X:4, Z:-2 (block 79, 15, -17)"
    );
}

#[test]
fn test_scan_region_file_tile_entity() {
    let registry = registry();
    let scanner = Scanner::for_block_name(&registry, "minecraft:chest").unwrap();
    let directory = tempfile::tempdir().unwrap();

    let path = write_file(
        directory.path(),
        "r.0.0.mca",
        &region(vec![(
            33,
            zlib_record(chunk(1, 1, 0, Some(("minecraft:chest", 20, 70, 21)))),
        )]),
    );

    let mut matches = Vec::new();
    scanner
        .scan_file(&path, |block_match| matches.push(block_match))
        .unwrap();

    assert_eq!(
        matches,
        vec![BlockMatch::TileEntity {
            name: "minecraft:chest".to_owned(),
            chunk_x: 1,
            chunk_z: 1,
            position: Some((20, 70, 21)),
        }]
    );
    assert_eq!(
        matches[0].to_string(),
        "Found block as Tile Entity minecraft:chest in chunk at X:1, Z:1 (block 20, 70, 21)"
    );
}

#[test]
fn test_scan_paths_skips_broken_parts() {
    let registry = registry();
    let scanner = Scanner::for_block_name(&registry, "minecraft:stone").unwrap();
    let directory = tempfile::tempdir().unwrap();

    // Second record declares an unsupported compression scheme.
    let first = write_file(
        directory.path(),
        "r.0.0.mca",
        &region(vec![
            (0, zlib_record(chunk(0, 0, 1, None))),
            (1, vec![0, 0, 0, 2, 9, 0]),
        ]),
    );
    let missing = directory.path().join("r.5.5.mca");
    let short = write_file(directory.path(), "r.6.6.mca", &[0u8; 100]);
    let last = write_file(
        directory.path(),
        "r.1.0.mca",
        &region(vec![(0, zlib_record(chunk(32, 0, 1, None)))]),
    );

    let mut chunks = Vec::new();
    let stats = scanner.scan_paths(vec![first, missing, short, last], |block_match| {
        let position = block_match.chunk_position();

        if chunks.last() != Some(&position) {
            chunks.push(position);
        }
    });

    assert_eq!(chunks, vec![(0, 0), (32, 0)]);
    assert_eq!(stats.regions_scanned, 2);
    assert_eq!(stats.regions_skipped, 2);
    assert_eq!(stats.chunks_scanned, 2);
    assert_eq!(stats.chunks_skipped, 1);
    assert_eq!(stats.matches, 2 * 4096);
}

#[test]
fn test_scan_region_folder() {
    let registry = registry();
    let scanner = Scanner::for_block_name(&registry, "minecraft:stone").unwrap();
    let directory = tempfile::tempdir().unwrap();
    let folder = directory.path().join("region");
    create_dir(&folder).unwrap();

    write_file(
        &folder,
        "r.0.0.mca",
        &region(vec![(0, zlib_record(chunk(0, 0, 1, None)))]),
    );
    write_file(
        &folder,
        "r.-1.0.mca",
        &region(vec![(31, zlib_record(chunk(-1, 0, 1, None)))]),
    );
    write_file(&folder, "session.lock", b"lock");

    let region_files = FolderRegionProvider::new(&folder).region_files().unwrap();
    let mut first_match = None;
    let stats = scanner.scan_paths(
        region_files.into_iter().map(|(_, path)| path),
        |block_match| {
            if first_match.is_none() {
                first_match = Some(block_match);
            }
        },
    );

    assert_eq!(stats.regions_scanned, 2);
    assert_eq!(stats.regions_skipped, 0);
    assert_eq!(first_match.unwrap().chunk_position(), (-1, 0));
}
