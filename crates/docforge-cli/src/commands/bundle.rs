//! `docforge bundle`: render `.github` Copilot files and merge VS Code
//! settings from a bundle config.

use serde_json::{Map, Value};
use tracing::{info, instrument};

use docforge_adapters::{
    JsonSchemaValidator, LayeredSchemaSource, LocalFilesystem, MustacheRenderer,
};
use docforge_core::{
    application::{BundleOptions, BundleService},
    domain::{BundleConfig, BundleReport},
};

use crate::{
    cli::BundleArgs,
    commands::{current_dir, display_path},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompts::{Prompt, TerminalPrompt, stdin_is_tty},
};

#[instrument(skip_all, fields(config = %args.bundle_config.display(), dry_run = args.dry_run))]
pub fn execute(args: BundleArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let cwd = current_dir()?;
    let schemas_dir = args
        .schemas
        .clone()
        .or(config.validate.schemas_dir)
        .map(|dir| cwd.join(dir));

    let service = BundleService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(MustacheRenderer::new()),
        Box::new(LayeredSchemaSource::with_builtin(schemas_dir)),
        Box::new(JsonSchemaValidator::new()),
    );

    let mut bundle = service.load_config(&cwd.join(&args.bundle_config))?;

    if args.interactive {
        if !stdin_is_tty() {
            return Err(CliError::input("--interactive needs a terminal on stdin"));
        }
        ask_interactive(&TerminalPrompt, &mut bundle)?;
    }

    let options = BundleOptions {
        base_dir: cwd.clone(),
        repo_root: args.repo_root,
        vars_file: args.vars_file,
        inline_vars: args.vars,
        snippet_roots: args.snippet_roots,
        dry_run: args.dry_run,
    };

    let report = service.generate(bundle, &options)?;
    info!(
        files = report.github.files.len(),
        vscode = report.vscode.is_some(),
        "Bundle generated"
    );

    if args.json || output.is_json() {
        return output.json(&report);
    }
    print_report(&report, &cwd, &output)
}

/// Ask for repository root, project name and tone, seeding the answers
/// into the config.
fn ask_interactive(prompt: &dyn Prompt, bundle: &mut BundleConfig) -> CliResult<()> {
    let repo_root = prompt.input("Target repo root", &bundle.targets.repo_root)?;

    let current_name = bundle
        .vars
        .get("project_name")
        .and_then(Value::as_str)
        .unwrap_or("my-project")
        .to_string();
    let project_name = prompt.input("Project name", &current_name)?;

    let current_tone = bundle
        .defaults
        .get("tone")
        .and_then(Value::as_str)
        .unwrap_or("concise")
        .to_string();
    let tone = prompt.input("Default tone", &current_tone)?;

    let mut vars = match std::mem::take(&mut bundle.vars) {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    vars.insert("project_name".into(), Value::String(project_name));
    vars.insert("tone".into(), Value::String(tone));
    bundle.vars = Value::Object(vars);
    bundle.targets.repo_root = repo_root;
    Ok(())
}

fn print_report(report: &BundleReport, cwd: &std::path::Path, output: &OutputManager) -> CliResult<()> {
    for warning in &report.warnings {
        output.warning(warning)?;
    }

    let mode = if report.dry_run { "(dry-run) " } else { "" };
    output.success(&format!("Copilot bundle {mode}generated"))?;
    output.print(&format!(
        "  .github files: {}",
        report.github.files.len()
    ))?;
    for file in &report.github.files {
        output.print(&format!("    {}", display_path(file, cwd)))?;
    }
    if let Some(vscode) = &report.vscode {
        output.print(&format!(
            "  VS Code settings: {}",
            display_path(&vscode.path, cwd)
        ))?;
    }
    Ok(())
}
