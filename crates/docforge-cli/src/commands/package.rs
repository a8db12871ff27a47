//! `docforge package`: archive the project as a zip file.

use tracing::{info, instrument};

use docforge_adapters::{IgnoreSourceTree, LocalFilesystem, ZipArchiver};
use docforge_core::{
    application::{PackageOptions, PackageService},
    domain::ArchiveLocation,
};

use crate::{
    cli::PackageArgs,
    commands::{current_dir, display_path},
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(out_root = args.out_root))]
pub fn execute(args: PackageArgs, output: OutputManager) -> CliResult<()> {
    let cwd = current_dir()?;
    let root = args
        .root
        .as_ref()
        .map(|r| cwd.join(r))
        .unwrap_or_else(|| cwd.clone());

    let options = PackageOptions {
        location: if args.out_root {
            ArchiveLocation::Root
        } else {
            ArchiveLocation::Dist
        },
        output: args.out,
    };

    let service = PackageService::new(
        Box::new(IgnoreSourceTree::new()),
        Box::new(ZipArchiver::default()),
        Box::new(LocalFilesystem::new()),
    );

    let spinner = output.spinner("Packaging project...");
    let result = service.package(&root, &options);
    spinner.finish_and_clear();
    let report = result?;

    info!(
        output = %report.output.display(),
        files = report.file_count(),
        bytes = report.bytes_written,
        "Package written"
    );

    if output.is_json() {
        return output.json(&report);
    }

    output.success(&format!(
        "Packaged {} file(s) into {} ({} bytes)",
        report.file_count(),
        display_path(&report.output, &cwd),
        report.bytes_written
    ))?;
    Ok(())
}
