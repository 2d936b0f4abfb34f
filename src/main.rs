use anvil_finder::provider::FolderRegionProvider;
use anvil_finder::zip_region_provider::ZipRegionProvider;
use anvil_finder::{read_level, BlockMatch, BlockRegistry, ScanLimits, ScanStats, Scanner};
use anyhow::{bail, Context};
use clap::Parser;
use log::{info, warn};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "anvil-finder",
    about = "Finds where a block is used in Anvil region files"
)]
pub struct Args {
    /// World metadata file holding the block id registry
    #[arg(short, long, env = "ANVIL_FINDER_LEVEL", default_value = "level.dat")]
    pub level: PathBuf,

    /// Registry name of the block to look for, e.g. "minecraft:chest"
    #[arg(short, long, env = "ANVIL_FINDER_BLOCK_NAME")]
    pub block_name: Option<String>,

    /// Print every registered block id and name, then exit
    #[arg(long)]
    pub list_blocks: bool,

    /// Compressed chunks longer than this are skipped
    #[arg(long, env = "ANVIL_FINDER_MAX_CHUNK_SIZE")]
    pub max_chunk_size: Option<u32>,

    /// Chunks inflating past this many bytes are skipped
    #[arg(long, env = "ANVIL_FINDER_MAX_DECOMPRESSED_CHUNK_SIZE")]
    pub max_decompressed_chunk_size: Option<u64>,

    /// Chunks stored before this byte offset are skipped
    #[arg(long, env = "ANVIL_FINDER_MIN_CHUNK_OFFSET")]
    pub min_chunk_offset: Option<u64>,

    /// Chunks stored at or after this byte offset are skipped
    #[arg(long, env = "ANVIL_FINDER_MAX_CHUNK_OFFSET")]
    pub max_chunk_offset: Option<u64>,

    /// Region files, region folders or zipped worlds
    pub regions: Vec<PathBuf>,
}

impl Args {
    fn limits(&self) -> ScanLimits {
        let defaults = ScanLimits::default();

        ScanLimits {
            min_chunk_offset: self.min_chunk_offset.unwrap_or(defaults.min_chunk_offset),
            max_chunk_offset: self.max_chunk_offset.unwrap_or(defaults.max_chunk_offset),
            max_chunk_payload: self.max_chunk_size.unwrap_or(defaults.max_chunk_payload),
            max_chunk_decompressed: self
                .max_decompressed_chunk_size
                .unwrap_or(defaults.max_chunk_decompressed),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let level = read_level(&args.level)
        .with_context(|| format!("Could not read {}", args.level.display()))?;
    let registry = BlockRegistry::from_level(&level)
        .with_context(|| format!("Could not load block ids from {}", args.level.display()))?;

    if args.list_blocks {
        for (id, name) in registry.iter() {
            println!("{} {}", id, name);
        }

        return Ok(());
    }

    let block_name = match &args.block_name {
        Some(block_name) => block_name,
        None => bail!("No block name given, use --block-name or --list-blocks"),
    };

    if args.regions.is_empty() {
        bail!("No region files given");
    }

    let scanner = Scanner::for_block_name(&registry, block_name)?.with_limits(args.limits());
    println!("Found blockId {} for {}", scanner.block_id(), block_name);

    let mut on_match = |block_match: BlockMatch| println!("{}", block_match);
    let mut stats = ScanStats::default();

    for path in &args.regions {
        stats.merge(&scan_path(&scanner, path, &mut on_match));
    }

    info!(
        target: "anvil-finder",
        "Scanned {} regions ({} skipped), {} chunks ({} skipped), {} sections skipped, {} matches",
        stats.regions_scanned,
        stats.regions_skipped,
        stats.chunks_scanned,
        stats.chunks_skipped,
        stats.sections_skipped,
        stats.matches
    );

    Ok(())
}

/// Scans a region folder, a zipped world or a single region file.
fn scan_path<F>(scanner: &Scanner, path: &Path, on_match: F) -> ScanStats
where
    F: FnMut(BlockMatch),
{
    if path.is_dir() {
        scan_folder(scanner, path, on_match)
    } else if is_zip(path) {
        scan_zip(scanner, path, on_match)
    } else {
        scanner.scan_paths(Some(path), on_match)
    }
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .map_or(false, |extension| extension.eq_ignore_ascii_case("zip"))
}

fn scan_folder<F>(scanner: &Scanner, folder: &Path, on_match: F) -> ScanStats
where
    F: FnMut(BlockMatch),
{
    let provider = FolderRegionProvider::new(folder);

    match provider.region_files() {
        Ok(region_files) => scanner.scan_paths(
            region_files.into_iter().map(|(_, region_path)| region_path),
            on_match,
        ),
        Err(error) => {
            warn!(target: "anvil-finder", "Could not list {}: {}", folder.display(), error);
            ScanStats {
                regions_skipped: 1,
                ..ScanStats::default()
            }
        }
    }
}

fn scan_zip<F>(scanner: &Scanner, archive: &Path, mut on_match: F) -> ScanStats
where
    F: FnMut(BlockMatch),
{
    let mut stats = ScanStats::default();

    let mut provider = match ZipRegionProvider::file(archive) {
        Ok(provider) => provider,
        Err(error) => {
            warn!(target: "anvil-finder", "Could not open {}: {}", archive.display(), error);
            stats.regions_skipped += 1;
            return stats;
        }
    };

    for (_, name) in provider.regions().to_vec() {
        let region_name = format!("{}:{}", archive.display(), name);

        let region_stats = provider
            .load_region(&name)
            .map_err(|error| error.to_string())
            .and_then(|source| {
                scanner
                    .scan_region(&region_name, source, &mut on_match)
                    .map_err(|error| error.to_string())
            });

        match region_stats {
            Ok(region_stats) => stats.merge(&region_stats),
            Err(error) => {
                warn!(target: "anvil-finder", "Could not scan {}: {}", region_name, error);
                stats.regions_skipped += 1;
            }
        }
    }

    stats
}
