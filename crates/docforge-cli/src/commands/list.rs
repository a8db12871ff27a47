//! `docforge list`: show what the active template store offers.

use docforge_core::{application::TemplateService, domain::RelativePath};

use crate::{
    cli::{ListArgs, ListFormat},
    commands::{current_dir, template_store},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let cwd = current_dir()?;
    let service = TemplateService::new(template_store(args.templates.as_ref(), &config, &cwd)?);

    if let Some(path) = &args.show {
        let path = RelativePath::try_new(path).map_err(|e| CliError::InvalidInput {
            message: format!("bad template path '{path}'"),
            source: Some(Box::new(e)),
        })?;
        let content = service.show(&path)?;
        output.print(content.trim_end())?;
        return Ok(());
    }

    let folders = match &args.folder {
        Some(name) => vec![service.folder(name)?],
        None => service.folders()?,
    };

    if output.is_json() {
        return output.json(&folders);
    }

    match args.format {
        ListFormat::Json => output.json(&folders)?,

        ListFormat::List => {
            for folder in &folders {
                output.print(&folder.name)?;
            }
        }

        ListFormat::Table => {
            output.header(&format!("Templates ({})", service.describe()))?;
            for folder in &folders {
                output.print("")?;
                output.print(&format!("  {}/", folder.name))?;
                for file in &folder.files {
                    output.print(&format!("    {file}"))?;
                }
                for sample in &folder.samples {
                    output.print(&format!("    {sample}  (sample)"))?;
                }
            }

            if args.folder.is_none() {
                let roots = service.root_files()?;
                if !roots.is_empty() {
                    output.print("")?;
                    output.print("  (root)")?;
                    for file in &roots {
                        output.print(&format!("    {file}"))?;
                    }
                }
            }
        }
    }

    Ok(())
}
