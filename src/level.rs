use crate::decode::read_compressed_tag;
use crate::error::LevelError;
use crate::tag::Tag;
use std::fs::File;
use std::path::Path;

/// Reads world metadata file, usually gzip compressed `level.dat`.
pub fn read_level<P: AsRef<Path>>(path: P) -> Result<Tag, LevelError> {
    let file = File::open(path)?;
    let (_, tag) = read_compressed_tag(file)?;

    Ok(tag)
}

#[cfg(test)]
mod tests {
    use crate::error::LevelError;
    use crate::level::read_level;
    use crate::tag::Tag;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_gzip_level() {
        // Root compound "" with compound "Data" holding byte "hardcore" = 1.
        let data: &[u8] = &[
            0x0a, 0x00, 0x00, 0x0a, 0x00, 0x04, b'D', b'a', b't', b'a', 0x01, 0x00, 0x08, b'h',
            b'a', b'r', b'd', b'c', b'o', b'r', b'e', 0x01, 0x00, 0x00,
        ];

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&encoder.finish().unwrap()).unwrap();

        let tag = read_level(file.path()).unwrap();
        let data_tag = tag.as_compound().unwrap().get("Data").unwrap();

        assert_eq!(
            data_tag.as_compound().unwrap().get("hardcore"),
            Some(&Tag::Byte(1))
        );
    }

    #[test]
    fn test_read_missing_level() {
        let directory = tempfile::tempdir().unwrap();
        let error = read_level(directory.path().join("level.dat")).unwrap_err();

        assert!(matches!(error, LevelError::IOError { .. }));
    }

    #[test]
    fn test_read_corrupted_level() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x0a, 0x00]).unwrap();

        let error = read_level(file.path()).unwrap_err();

        assert!(matches!(error, LevelError::TagDecodeError { .. }));
    }
}
