use crate::position::RegionPosition;
use crate::provider::region_pos_from_filename;
use std::fs::{File, OpenOptions};
use std::io;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use std::{error::Error, fmt::Display};
use zip::ZipArchive;

pub use zip::result::ZipError;

/// Region files are read from a zipped world backup.
pub struct ZipRegionProvider<R: Read + Seek> {
    zip_archive: ZipArchive<R>,
    /// Archive entry names of region files, ordered by position.
    ///
    /// For example: "region/r.0.0.mca", "world/DIM-1/region/r.0.0.mca".
    regions: Vec<(RegionPosition, String)>,
}

#[derive(Debug)]
pub enum ZipProviderError {
    Io(io::Error),
    Zip(ZipError),
    RegionFolderNotFound,
}

impl From<io::Error> for ZipProviderError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ZipError> for ZipProviderError {
    fn from(e: ZipError) -> Self {
        Self::Zip(e)
    }
}

impl Error for ZipProviderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ZipProviderError::Io(e) => Some(e),
            ZipProviderError::Zip(e) => Some(e),
            ZipProviderError::RegionFolderNotFound => None,
        }
    }
}

impl Display for ZipProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZipProviderError::Io(e) => write!(f, "IO Error: {}", e),
            ZipProviderError::Zip(e) => write!(f, "Zip Error: {}", e),
            ZipProviderError::RegionFolderNotFound => write!(f, "No region files in archive"),
        }
    }
}

// Find region files inside the zip archive, at any depth as long as
// they are placed in a folder named "region".
fn find_region_files<R: Read + Seek>(
    zip_archive: &mut ZipArchive<R>,
) -> Result<Vec<(RegionPosition, String)>, ZipProviderError> {
    let mut regions = Vec::new();

    for i in 0..zip_archive.len() {
        let file = zip_archive.by_index(i)?;
        let name = file.name().to_string();
        let path = Path::new(&name);

        let in_region_folder = path
            .parent()
            .and_then(|parent| parent.file_name())
            .map_or(false, |folder_name| folder_name == "region");

        if !in_region_folder {
            continue;
        }

        if let Some(position) = region_pos_from_filename(path) {
            regions.push((position, name));
        }
    }

    if regions.is_empty() {
        return Err(ZipProviderError::RegionFolderNotFound);
    }

    regions.sort();

    Ok(regions)
}

impl<R: Read + Seek> ZipRegionProvider<R> {
    pub fn new(reader: R) -> Result<Self, ZipProviderError> {
        let mut zip_archive = ZipArchive::new(reader)?;
        let regions = find_region_files(&mut zip_archive)?;

        Ok(ZipRegionProvider {
            zip_archive,
            regions,
        })
    }

    pub fn regions(&self) -> &[(RegionPosition, String)] {
        &self.regions
    }

    /// Uncompresses region file into memory.
    pub fn load_region(&mut self, name: &str) -> Result<Cursor<Vec<u8>>, ZipProviderError> {
        let mut region_file = self.zip_archive.by_name(name)?;

        let uncompressed_size = region_file.size();
        let mut buf = Vec::with_capacity(uncompressed_size as usize);
        region_file.read_to_end(&mut buf)?;

        Ok(Cursor::new(buf))
    }
}

impl ZipRegionProvider<File> {
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self, ZipProviderError> {
        let file = OpenOptions::new().read(true).open(path)?;

        Self::new(file)
    }
}
