use crate::position::RegionPosition;
use std::fs::read_dir;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Region files of a world `region` folder.
pub struct FolderRegionProvider<'a> {
    /// Folder where region files located.
    folder_path: &'a Path,
}

impl<'a> FolderRegionProvider<'a> {
    pub fn new(folder_path: &'a Path) -> FolderRegionProvider<'a> {
        FolderRegionProvider { folder_path }
    }

    /// Region files of the folder ordered by position.
    ///
    /// Files not named `r.<x>.<z>.mca` are ignored.
    pub fn region_files(&self) -> Result<Vec<(RegionPosition, PathBuf)>, io::Error> {
        let mut regions: Vec<_> = read_dir(self.folder_path)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter_map(|path| Some((region_pos_from_filename(&path)?, path)))
            .collect();

        regions.sort();

        Ok(regions)
    }
}

/// Parses region position from `r.<x>.<z>.mca` file name.
pub fn region_pos_from_filename(path: &Path) -> Option<RegionPosition> {
    // we can use lossy because of the bound check later
    let filename = path.file_name()?.to_string_lossy();
    let parts: Vec<_> = filename.split('.').collect();

    let (x, z) = parse_coords(parts)?;

    Some(RegionPosition::new(x, z))
}

fn parse_coords(parts: Vec<&str>) -> Option<(i32, i32)> {
    let incorrect_format = parts.len() != 4 || parts[0] != "r" || parts[3] != "mca";

    if incorrect_format {
        return None;
    }

    Some((i32::from_str(parts[1]).ok()?, i32::from_str(parts[2]).ok()?))
}

#[cfg(test)]
mod tests {
    use crate::position::RegionPosition;
    use crate::provider::{region_pos_from_filename, FolderRegionProvider};
    use std::fs::{create_dir, File};
    use std::path::PathBuf;

    #[test]
    fn test_position_parse() {
        let mut path = PathBuf::new();
        path.set_file_name("r.-1.1.mca");

        let pos = region_pos_from_filename(&path).unwrap();
        assert_eq!(RegionPosition { x: -1, z: 1 }, pos)
    }

    #[test]
    fn test_position_parse_invalid_format() {
        for name in &["this is not a valid region.filename", "r.0.0.mcr", "r.a.0.mca"] {
            let mut path = PathBuf::new();
            path.set_file_name(name);

            assert_eq!(region_pos_from_filename(&path), None);
        }
    }

    #[test]
    fn test_region_files_sorted() {
        let directory = tempfile::tempdir().unwrap();

        for name in &["r.1.0.mca", "r.-1.0.mca", "r.0.-2.mca", "level.dat"] {
            File::create(directory.path().join(name)).unwrap();
        }

        create_dir(directory.path().join("r.5.5.mca")).unwrap();

        let provider = FolderRegionProvider::new(directory.path());
        let positions: Vec<_> = provider
            .region_files()
            .unwrap()
            .into_iter()
            .map(|(position, path)| {
                assert_eq!(path.parent(), Some(directory.path()));
                position
            })
            .collect();

        assert_eq!(
            positions,
            vec![
                RegionPosition::new(-1, 0),
                RegionPosition::new(0, -2),
                RegionPosition::new(1, 0),
            ]
        );
    }
}
