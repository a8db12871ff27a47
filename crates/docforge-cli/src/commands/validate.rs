//! `docforge validate`: check ledgers and registries against JSON Schemas.

use tracing::{info, instrument};

use docforge_adapters::{
    GlobDocumentLocator, JsonSchemaValidator, LayeredSchemaSource, LocalFilesystem,
};
use docforge_core::{
    application::ValidationService,
    domain::{DocumentOutcome, ValidationReport, ValidationRule},
};

use crate::{
    cli::ValidateArgs,
    commands::{current_dir, display_path},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: ValidateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let cwd = current_dir()?;
    let root = args
        .root
        .as_ref()
        .map(|r| cwd.join(r))
        .unwrap_or_else(|| cwd.clone());

    let rules = ValidationRule::resolve(args.rule, config.validation_rules()?);
    let schemas_dir = args
        .schemas
        .or(config.validate.schemas_dir)
        .map(|dir| cwd.join(dir));

    let service = ValidationService::new(
        Box::new(GlobDocumentLocator::new()),
        Box::new(LayeredSchemaSource::with_builtin(schemas_dir)),
        Box::new(JsonSchemaValidator::new()),
        Box::new(LocalFilesystem::new()),
    );

    let report = service.validate(&root, &rules)?;
    info!(
        checked = report.checked(),
        failed = report.failed_count(),
        "Validation finished"
    );

    if output.is_json() {
        output.json(&report)?;
    } else {
        print_report(&report, &cwd, &output)?;
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::DocumentsInvalid {
            failed: report.failed_count(),
            checked: report.checked(),
        })
    }
}

fn print_report(
    report: &ValidationReport,
    cwd: &std::path::Path,
    output: &OutputManager,
) -> CliResult<()> {
    if report.checked() == 0 {
        output.info("No documents matched the validation rules")?;
        return Ok(());
    }

    for document in &report.documents {
        let label = format!(
            "{} ({})",
            display_path(&document.path, cwd),
            document.schema
        );
        match &document.outcome {
            DocumentOutcome::Passed => output.success(&label)?,
            DocumentOutcome::Failed { issues } => {
                output.error(&label)?;
                for issue in issues {
                    output.print(&format!("    {}: {}", issue.path, issue.message))?;
                }
            }
            DocumentOutcome::Unreadable { reason } => {
                output.error(&format!("{label}: {reason}"))?;
            }
        }
    }

    if report.is_success() {
        output.success(&format!("{} document(s) valid", report.checked()))?;
    }
    Ok(())
}
