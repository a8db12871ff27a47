//! Package Service - archives a project tree for distribution.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::{
    application::ports::{Archiver, Filesystem, SourceTree},
    domain::{
        ArchiveLocation, PackageReport, RelativePath,
        package::{ALWAYS_INCLUDE, ARCHIVE_NAME, DIST_DIR},
    },
    error::DocforgeResult,
};

/// Directories never packaged, relative to the root.
const SKIP_DIRS: [&str; 2] = [DIST_DIR, ".git"];

#[derive(Debug, Clone, Default)]
pub struct PackageOptions {
    pub location: ArchiveLocation,
    /// Archive file name, placed according to `location`. An absolute
    /// path is used as-is.
    pub output: Option<PathBuf>,
}

impl PackageOptions {
    pub fn output_path(&self, root: &Path) -> PathBuf {
        match &self.output {
            Some(out) if out.is_absolute() => out.clone(),
            Some(out) => root.join(self.location.relative_path(&out.to_string_lossy())),
            None => root.join(self.location.relative_path(ARCHIVE_NAME)),
        }
    }
}

pub struct PackageService {
    tree: Box<dyn SourceTree>,
    archiver: Box<dyn Archiver>,
    filesystem: Box<dyn Filesystem>,
}

impl PackageService {
    pub fn new(
        tree: Box<dyn SourceTree>,
        archiver: Box<dyn Archiver>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            tree,
            archiver,
            filesystem,
        }
    }

    /// Files that would be packaged, sorted.
    pub fn collect(&self, root: &Path, output: &Path) -> DocforgeResult<Vec<RelativePath>> {
        let skip: Vec<String> = SKIP_DIRS.iter().map(|s| s.to_string()).collect();
        let mut files = self.tree.list_files(root, &skip)?;

        for always in ALWAYS_INCLUDE {
            if self.filesystem.exists(&root.join(always)) {
                files.push(RelativePath::try_new(always)?);
            }
        }

        files.retain(|f| root.join(f.as_path()) != output);
        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Write the archive and report what went into it.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn package(&self, root: &Path, options: &PackageOptions) -> DocforgeResult<PackageReport> {
        let output = options.output_path(root);
        let files = self.collect(root, &output)?;

        if let Some(parent) = output.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        let bytes_written = self.archiver.write_archive(root, &files, &output)?;

        info!(
            output = %output.display(),
            files = files.len(),
            bytes = bytes_written,
            "Archive written"
        );

        Ok(PackageReport {
            output,
            files: files.iter().map(RelativePath::to_slash_string).collect(),
            bytes_written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::MockFilesystem;
    use std::sync::{Arc, Mutex};

    struct FixedTree(Vec<&'static str>);

    impl SourceTree for FixedTree {
        fn list_files(&self, _root: &Path, skip: &[String]) -> DocforgeResult<Vec<RelativePath>> {
            assert!(skip.iter().any(|s| s == "tools/dist"));
            Ok(self
                .0
                .iter()
                .map(|p| RelativePath::try_new(*p).unwrap())
                .collect())
        }
    }

    #[derive(Default, Clone)]
    struct RecordingArchiver(Arc<Mutex<Vec<String>>>);

    impl Archiver for RecordingArchiver {
        fn write_archive(
            &self,
            _root: &Path,
            files: &[RelativePath],
            _output: &Path,
        ) -> DocforgeResult<u64> {
            let mut seen = self.0.lock().unwrap();
            seen.extend(files.iter().map(|f| f.to_string()));
            Ok(42)
        }
    }

    fn fs_with(existing: &'static [&'static str]) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(move |p| existing.iter().any(|e| Path::new("/p").join(e) == p));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs
    }

    #[test]
    fn packages_sorted_files_with_always_included() {
        let archiver = RecordingArchiver::default();
        let service = PackageService::new(
            Box::new(FixedTree(vec!["src/main.rs", "README.md"])),
            Box::new(archiver.clone()),
            Box::new(fs_with(&["tools/README.md"])),
        );

        let report = service
            .package(Path::new("/p"), &PackageOptions::default())
            .unwrap();

        assert_eq!(
            report.output,
            PathBuf::from("/p/tools/dist/project_bundle.zip")
        );
        assert_eq!(report.files, ["README.md", "src/main.rs", "tools/README.md"]);
        assert_eq!(report.bytes_written, 42);
        assert_eq!(archiver.0.lock().unwrap().len(), 3);
    }

    #[test]
    fn never_packages_its_own_output() {
        let service = PackageService::new(
            Box::new(FixedTree(vec!["a.txt", "project_bundle.zip"])),
            Box::new(RecordingArchiver::default()),
            Box::new(fs_with(&[])),
        );

        let options = PackageOptions {
            location: ArchiveLocation::Root,
            output: None,
        };
        let report = service.package(Path::new("/p"), &options).unwrap();
        assert_eq!(report.files, ["a.txt"]);
    }
}
