//! Zip archive output.

use std::fs::File;
use std::io;
use std::path::Path;

use tracing::{debug, instrument};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use docforge_core::{
    application::{ApplicationError, ports::Archiver},
    domain::RelativePath,
    error::{DocforgeError, DocforgeResult},
};

/// Writes deflate-compressed `.zip` archives.
#[derive(Debug, Clone, Copy)]
pub struct ZipArchiver {
    compression_level: i64,
}

impl ZipArchiver {
    pub const DEFAULT_LEVEL: i64 = 9;

    pub fn new(compression_level: i64) -> Self {
        Self {
            compression_level: compression_level.clamp(0, 9),
        }
    }

    fn options(&self) -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(self.compression_level))
            .unix_permissions(0o644)
    }
}

impl Default for ZipArchiver {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LEVEL)
    }
}

impl Archiver for ZipArchiver {
    #[instrument(skip(self, files), fields(files = files.len()))]
    fn write_archive(
        &self,
        root: &Path,
        files: &[RelativePath],
        output: &Path,
    ) -> DocforgeResult<u64> {
        let archive_error = |reason: String| -> DocforgeError {
            ApplicationError::ArchiveFailed {
                path: output.to_path_buf(),
                reason,
            }
            .into()
        };

        let file = File::create(output).map_err(|e| archive_error(e.to_string()))?;
        let mut writer = ZipWriter::new(file);
        let options = self.options();

        for rel in files {
            let name = rel.to_slash_string();
            debug!(file = %name, "Adding to archive");

            let mut source = File::open(root.join(rel.as_path()))
                .map_err(|e| archive_error(format!("{name}: {e}")))?;
            writer
                .start_file(name.as_str(), options)
                .map_err(|e| archive_error(format!("{name}: {e}")))?;
            io::copy(&mut source, &mut writer)
                .map_err(|e| archive_error(format!("{name}: {e}")))?;
        }

        let file = writer.finish().map_err(|e| archive_error(e.to_string()))?;
        let bytes = file
            .metadata()
            .map_err(|e| archive_error(e.to_string()))?
            .len();
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    #[test]
    fn archive_is_zip_with_named_entries() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("docs")).unwrap();
        fs::write(temp.path().join("docs/INDEX.md"), "# Index").unwrap();
        fs::write(temp.path().join("keep.txt"), "keep").unwrap();

        let out = temp.path().join("out.zip");
        let files = vec![
            RelativePath::try_new("docs/INDEX.md").unwrap(),
            RelativePath::try_new("keep.txt").unwrap(),
        ];
        let bytes = ZipArchiver::default()
            .write_archive(temp.path(), &files, &out)
            .unwrap();
        assert_eq!(bytes, fs::metadata(&out).unwrap().len());

        let raw = fs::read(&out).unwrap();
        assert_eq!(&raw[..4], b"PK\x03\x04");

        let mut archive = ZipArchive::new(File::open(&out).unwrap()).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, ["docs/INDEX.md", "keep.txt"]);

        let mut content = String::new();
        archive
            .by_name("docs/INDEX.md")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "# Index");
    }

    #[test]
    fn missing_input_is_archive_error() {
        let temp = TempDir::new().unwrap();
        let files = vec![RelativePath::try_new("nope.txt").unwrap()];
        let err = ZipArchiver::default()
            .write_archive(temp.path(), &files, &temp.path().join("o.zip"))
            .unwrap_err();
        assert!(matches!(
            err,
            DocforgeError::Application(ApplicationError::ArchiveFailed { .. })
        ));
        assert!(err.to_string().contains("nope.txt"));
    }
}
