//! `docforge init`: scaffold the docs tree.
//!
//! Answers come from flags first, then the run cache and config, then
//! (when interactive) the prompts. The resolved answers become a
//! [`ScaffoldRequest`] for the core service.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use docforge_adapters::LocalFilesystem;
use docforge_core::{
    application::{OverviewChoice, ScaffoldReport, ScaffoldRequest, ScaffoldService},
    domain::{CollisionPolicy, InitReceipt, Placeholders, SeedKind, artifacts},
};

use crate::{
    cache::RunCache,
    cli::{GlobalArgs, InitArgs},
    commands::{current_dir, display_path, template_store},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
    prompts::{Prompt, TerminalPrompt, stdin_is_tty},
};

const NONE: &str = "none";

/// Everything decided before planning.
#[derive(Debug, Clone, PartialEq)]
struct Answers {
    target_dir: PathBuf,
    /// Overview as entered, or `none`; cached verbatim.
    overview_label: String,
    overview: OverviewChoice,
    includes: Vec<String>,
    placeholders: Placeholders,
    on_collision: CollisionPolicy,
    dry_run: bool,
    notes: Vec<String>,
}

#[instrument(skip_all, fields(target = args.target.as_deref().unwrap_or("-")))]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let cwd = current_dir()?;
    let store = template_store(args.templates.as_ref(), &config, &cwd)?;
    let service = ScaffoldService::new(store, Box::new(LocalFilesystem::new()));

    let cache = if args.no_cache {
        RunCache::default()
    } else {
        RunCache::load(&cwd)
    };

    let interactive = !args.non_interactive && !args.list && !global.quiet && stdin_is_tty();
    debug!(interactive, "Resolving init answers");

    let prompt = TerminalPrompt;
    let answers = resolve_answers(
        &args,
        &config,
        &cache,
        &cwd,
        interactive.then_some(&prompt as &dyn Prompt),
    )?;
    for note in &answers.notes {
        output.warning(note)?;
    }

    let request = build_request(&args, &answers, &cwd);

    if args.list {
        return list_planned(&service, &request, &cwd, &output);
    }

    print_plan(&service, &answers, &cwd, &output)?;

    let report = service.scaffold(&request)?;
    for warning in &report.warnings {
        output.warning(warning)?;
    }

    if !args.no_cache && !answers.dry_run {
        let cache = updated_cache(cache, &answers, &cwd);
        if let Err(e) = cache.save(&cwd) {
            warn!(error = %e, "Failed to write run cache");
            output.warning(&format!("Failed to write run cache: {e}"))?;
        }
    }

    info!(
        written = report.written_count(),
        skipped = report.skipped_count(),
        dry_run = report.dry_run,
        "Init finished"
    );
    print_report(&report, &cwd, &output)
}

// ── answers ───────────────────────────────────────────────────────────────────

fn resolve_answers(
    args: &InitArgs,
    config: &AppConfig,
    cache: &RunCache,
    cwd: &Path,
    prompt: Option<&dyn Prompt>,
) -> CliResult<Answers> {
    let mut notes = Vec::new();

    // 1. target directory
    let mut target_dir = match &args.target {
        Some(target) => cwd.join(target),
        None => cache
            .target_within(cwd)
            .unwrap_or_else(|| cwd.join(&config.defaults.target_dir)),
    };
    if let (Some(prompt), None) = (prompt, &args.target) {
        let answer = prompt.input(
            "Where should the docs scaffold be created?",
            &display_path(&target_dir, cwd),
        )?;
        target_dir = cwd.join(answer);
    }
    let target_dir = crate::cache::normalize(&target_dir);

    // 2. overview
    let mut overview_label = args
        .overview
        .clone()
        .or_else(|| cache.overview.clone())
        .unwrap_or_else(|| NONE.to_string());
    if let (Some(prompt), None) = (prompt, &args.overview) {
        overview_label = prompt.input(
            "Where is your project overview file? (path or \"none\")",
            &overview_label,
        )?;
    }

    let mut existing = None;
    if !overview_label.trim().eq_ignore_ascii_case(NONE) && !overview_label.trim().is_empty() {
        let path = cwd.join(overview_label.trim());
        if path.is_file() {
            existing = Some(path);
        } else {
            notes.push(format!(
                "Overview not found at {}; treating it as \"none\"",
                display_path(&path, cwd)
            ));
            overview_label = NONE.to_string();
        }
    }

    // 3. empty overview
    let overview = match existing {
        Some(path) => OverviewChoice::Existing(path),
        None => {
            let create = match prompt {
                Some(prompt) => prompt.confirm("Create an empty overview scaffold now?", true)?,
                None => true,
            };
            if create {
                OverviewChoice::CreateEmpty
            } else {
                OverviewChoice::None
            }
        }
    };

    // 4. template set
    let mut includes = if args.include.is_empty() {
        config.defaults.includes.clone()
    } else {
        args.include.clone()
    };
    if let (Some(prompt), true) = (prompt, args.include.is_empty()) {
        if !prompt.confirm("Use the default docs template set?", true)? {
            let suggested = cache.includes.clone().unwrap_or_else(|| includes.clone());
            let raw = prompt.input(
                "Enter template folders to include (comma-separated)",
                &suggested.join(","),
            )?;
            includes = split_list(&raw);
        }
    }

    // 5. placeholders
    let mut placeholders = flag_placeholders(args).or(&cache.placeholders);
    if let Some(prompt) = prompt {
        if prompt.confirm("Populate placeholders now? (project name, repo, owner)", false)? {
            placeholders = ask_placeholders(prompt, placeholders, cwd)?;
        }
    }

    // 6. collision policy
    let mut on_collision = args
        .on_collision
        .map(CollisionPolicy::from)
        .or(cache.on_collision)
        .unwrap_or(config.defaults.on_collision);
    if let (Some(prompt), None) = (prompt, args.on_collision) {
        let items: Vec<&str> = CollisionPolicy::ALL.iter().map(|p| p.as_str()).collect();
        let current = CollisionPolicy::ALL
            .iter()
            .position(|p| *p == on_collision)
            .unwrap_or_default();
        let picked = prompt.select("Files exist: choose a collision policy", &items, current)?;
        on_collision = CollisionPolicy::ALL
            .get(picked)
            .copied()
            .unwrap_or(on_collision);
    }

    // 7. proceed
    let mut dry_run = args.dry_run;
    if let Some(prompt) = prompt {
        if !prompt.confirm("Proceed with generation?", true)? {
            dry_run = true;
        }
    }

    Ok(Answers {
        target_dir,
        overview_label,
        overview,
        includes,
        placeholders,
        on_collision,
        dry_run,
        notes,
    })
}

fn flag_placeholders(args: &InitArgs) -> Placeholders {
    let mut placeholders = Placeholders::new();
    if let Some(value) = &args.project_name {
        placeholders = placeholders.with_project_name(value);
    }
    if let Some(value) = &args.repo_url {
        placeholders = placeholders.with_repo_url(value);
    }
    if let Some(value) = &args.owner {
        placeholders = placeholders.with_owner(value);
    }
    if let Some(value) = &args.description {
        placeholders = placeholders.with_description(value);
    }
    placeholders
}

fn ask_placeholders(
    prompt: &dyn Prompt,
    current: Placeholders,
    cwd: &Path,
) -> CliResult<Placeholders> {
    let dir_name = cwd
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let or_empty = |value: &Option<String>| value.clone().unwrap_or_default();

    let project_name = prompt.input(
        "Project Name",
        current.project_name.as_deref().unwrap_or(&dir_name),
    )?;
    let repo_url = prompt.input("Repository URL", &or_empty(&current.repo_url))?;
    let owner = prompt.input("Owner/Org", &or_empty(&current.owner))?;
    let description = prompt.input(
        "Short Description (one-liner)",
        &or_empty(&current.description),
    )?;

    let non_empty = |s: String| (!s.trim().is_empty()).then_some(s);
    Ok(Placeholders {
        project_name: non_empty(project_name),
        repo_url: non_empty(repo_url),
        owner: non_empty(owner),
        description: non_empty(description),
    })
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn build_request(args: &InitArgs, answers: &Answers, cwd: &Path) -> ScaffoldRequest {
    let project_root = args
        .project_root
        .as_ref()
        .map(|root| cwd.join(root))
        .unwrap_or_else(|| cwd.to_path_buf());

    let mut request = ScaffoldRequest::new(&answers.target_dir, project_root, Utc::now());
    request.includes = answers.includes.clone();
    request.on_collision = answers.on_collision;
    request.placeholders = answers.placeholders.clone();
    request.overview = answers.overview.clone();
    request.ai_template = args.ai_template.as_ref().map(|p| cwd.join(p));
    for seed in args.seed.iter().copied().map(SeedKind::from) {
        if !request.seeds.contains(&seed) {
            request.seeds.push(seed);
        }
    }
    request.seed_to = args.seed_to.map(Into::into).unwrap_or_default();
    request.force = args.force;
    request.dry_run = answers.dry_run;
    request.init_readme = args.init_readme;
    request
}

fn updated_cache(mut cache: RunCache, answers: &Answers, cwd: &Path) -> RunCache {
    cache.set_target(&answers.target_dir, cwd);
    cache.overview = Some(answers.overview_label.clone());
    cache.includes = Some(answers.includes.clone());
    cache.on_collision = Some(answers.on_collision);
    cache.placeholders = answers.placeholders.clone();
    cache
}

// ── output ────────────────────────────────────────────────────────────────────

fn list_planned(
    service: &ScaffoldService,
    request: &ScaffoldRequest,
    cwd: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    let planned: Vec<String> = service
        .planned_templates(request)?
        .iter()
        .map(|p| display_path(p, cwd))
        .collect();

    if output.is_json() {
        return output.json(&planned);
    }

    output.header("Planned files:")?;
    for path in &planned {
        output.print(&format!(" - {path}"))?;
    }
    Ok(())
}

fn print_plan(
    service: &ScaffoldService,
    answers: &Answers,
    cwd: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    if output.is_json() {
        return Ok(());
    }

    let overview = match &answers.overview {
        OverviewChoice::Existing(path) => display_path(path, cwd),
        OverviewChoice::CreateEmpty | OverviewChoice::None => NONE.to_string(),
    };

    output.header("Plan Summary")?;
    output.field("Templates", &service.store_description())?;
    output.field("Target dir", &display_path(&answers.target_dir, cwd))?;
    output.field("Overview", &overview)?;
    output.field(
        "Create empty",
        &matches!(answers.overview, OverviewChoice::CreateEmpty).to_string(),
    )?;
    output.field("Includes", &answers.includes.join(", "))?;
    output.field("On collision", answers.on_collision.as_str())?;
    output.field("Dry run", &answers.dry_run.to_string())?;
    output.print("")?;
    Ok(())
}

/// JSON shape of an init run.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InitSummary<'a> {
    dry_run: bool,
    files: Vec<String>,
    written: usize,
    skipped: usize,
    warnings: &'a [String],
    receipt: &'a InitReceipt,
}

fn print_report(report: &ScaffoldReport, cwd: &Path, output: &OutputManager) -> CliResult<()> {
    let files: Vec<String> = report
        .destinations()
        .iter()
        .map(|p| display_path(p, cwd))
        .collect();

    if output.is_json() {
        return output.json(&InitSummary {
            dry_run: report.dry_run,
            files,
            written: report.written_count(),
            skipped: report.skipped_count(),
            warnings: &report.warnings,
            receipt: &report.receipt,
        });
    }

    if report.dry_run {
        output.info("Dry run: nothing was written")?;
    } else {
        output.success("Completed.")?;
    }

    let target = &report.target_dir;
    output.field("Index", &display_path(&target.join(artifacts::INDEX_FILE), cwd))?;
    if let Some(overview) = &report.overview {
        output.field("Overview", &display_path(overview, cwd))?;
    }
    if let Some(ai) = &report.ai_instructions {
        output.field("AI Instr", &display_path(ai, cwd))?;
    }
    output.field("Ledger", &display_path(&target.join(artifacts::LEDGER_FILE), cwd))?;
    output.field("Scope", &display_path(&target.join(artifacts::SCOPE_CARD_FILE), cwd))?;
    output.field("Receipt", &display_path(&target.join(artifacts::RECEIPT_FILE), cwd))?;

    let verb = if report.dry_run {
        "to be written"
    } else {
        "written"
    };
    output.print(&format!("Files {verb}: {}", report.written_count()))?;
    if report.skipped_count() > 0 {
        output.print(&format!("Skipped existing: {}", report.skipped_count()))?;
    }
    for file in &files {
        debug!(file = %file, "Planned destination");
    }
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::scripted::{Answer, ScriptedPrompt};
    use tempfile::TempDir;

    fn non_interactive(args: &InitArgs, cache: &RunCache, cwd: &Path) -> Answers {
        resolve_answers(args, &AppConfig::default(), cache, cwd, None).unwrap()
    }

    #[test]
    fn defaults_without_flags_or_cache() {
        let cwd = Path::new("/work/app");
        let answers = non_interactive(&InitArgs::default(), &RunCache::default(), cwd);

        assert_eq!(answers.target_dir, PathBuf::from("/work/app/docs/ai"));
        assert_eq!(answers.overview, OverviewChoice::CreateEmpty);
        assert_eq!(answers.overview_label, "none");
        assert_eq!(answers.includes, ["scope", "bookends", "registry"]);
        assert_eq!(answers.on_collision, CollisionPolicy::Skip);
        assert!(!answers.dry_run);
    }

    #[test]
    fn positional_target_is_the_docs_directory() {
        let args = InitArgs {
            target: Some("out".into()),
            ..InitArgs::default()
        };
        let answers = non_interactive(&args, &RunCache::default(), Path::new("/work/app"));
        assert_eq!(answers.target_dir, PathBuf::from("/work/app/out"));
    }

    #[test]
    fn flags_beat_cache() {
        let cache = RunCache {
            target_dir: Some("cached/docs".into()),
            on_collision: Some(CollisionPolicy::Overwrite),
            placeholders: Placeholders::new()
                .with_project_name("Cached")
                .with_owner("cache-owner"),
            ..RunCache::default()
        };
        let args = InitArgs {
            on_collision: Some(crate::cli::CollisionArg::New),
            project_name: Some("Acme".into()),
            ..InitArgs::default()
        };

        let answers = non_interactive(&args, &cache, Path::new("/work/app"));
        assert_eq!(answers.target_dir, PathBuf::from("/work/app/cached/docs"));
        assert_eq!(answers.on_collision, CollisionPolicy::New);
        assert_eq!(answers.placeholders.project_name.as_deref(), Some("Acme"));
        assert_eq!(answers.placeholders.owner.as_deref(), Some("cache-owner"));
    }

    #[test]
    fn cached_target_outside_cwd_falls_back_to_default() {
        let cache = RunCache {
            target_dir: Some("../../tmp/docs/ai".into()),
            ..RunCache::default()
        };
        let answers = non_interactive(&InitArgs::default(), &cache, Path::new("/work/app"));
        assert_eq!(answers.target_dir, PathBuf::from("/work/app/docs/ai"));
    }

    #[test]
    fn missing_overview_becomes_none_with_note() {
        let temp = TempDir::new().unwrap();
        let args = InitArgs {
            overview: Some("OVERVIEW.md".into()),
            ..InitArgs::default()
        };
        let answers = non_interactive(&args, &RunCache::default(), temp.path());
        assert_eq!(answers.overview, OverviewChoice::CreateEmpty);
        assert_eq!(answers.overview_label, "none");
        assert_eq!(answers.notes.len(), 1);
    }

    #[test]
    fn existing_overview_is_linked() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("OVERVIEW.md"), "# Overview").unwrap();
        let args = InitArgs {
            overview: Some("OVERVIEW.md".into()),
            ..InitArgs::default()
        };
        let answers = non_interactive(&args, &RunCache::default(), temp.path());
        assert_eq!(
            answers.overview,
            OverviewChoice::Existing(temp.path().join("OVERVIEW.md"))
        );
    }

    #[test]
    fn interactive_flow_asks_in_order() {
        let prompt = ScriptedPrompt::new([
            Answer::Text("docs/planning".into()),
            Answer::Text("none".into()),
            Answer::No,
            Answer::No,
            Answer::Text("scope, registry".into()),
            Answer::Yes,
            Answer::Text("Acme".into()),
            Answer::Text("https://example.com/acme".into()),
            Answer::Default,
            Answer::Default,
            Answer::Pick(2),
            Answer::No,
        ]);
        let answers = resolve_answers(
            &InitArgs::default(),
            &AppConfig::default(),
            &RunCache::default(),
            Path::new("/work/app"),
            Some(&prompt),
        )
        .unwrap();

        assert_eq!(answers.target_dir, PathBuf::from("/work/app/docs/planning"));
        assert_eq!(answers.overview, OverviewChoice::None);
        assert_eq!(answers.includes, ["scope", "registry"]);
        assert_eq!(answers.placeholders.project_name.as_deref(), Some("Acme"));
        assert_eq!(answers.placeholders.owner, None);
        assert_eq!(answers.on_collision, CollisionPolicy::New);
        assert!(answers.dry_run, "declining to proceed turns the run into a dry run");
        assert_eq!(prompt.asked.borrow().len(), 12);
    }

    #[test]
    fn flags_skip_their_questions() {
        let prompt = ScriptedPrompt::new([]);
        let args = InitArgs {
            target: Some("docs/ai".into()),
            overview: Some("none".into()),
            include: vec!["scope".into()],
            on_collision: Some(crate::cli::CollisionArg::Skip),
            ..InitArgs::default()
        };
        resolve_answers(
            &args,
            &AppConfig::default(),
            &RunCache::default(),
            Path::new("/work/app"),
            Some(&prompt),
        )
        .unwrap();

        let asked = prompt.asked.borrow();
        assert_eq!(
            *asked,
            [
                "Create an empty overview scaffold now?",
                "Populate placeholders now? (project name, repo, owner)",
                "Proceed with generation?",
            ]
        );
    }

    #[test]
    fn request_carries_answers_and_flags() {
        let cwd = Path::new("/work/app");
        let args = InitArgs {
            seed: vec![crate::cli::SeedArg::Ledger, crate::cli::SeedArg::Ledger],
            seed_to: Some(crate::cli::SeedToArg::Root),
            ai_template: Some("tpl/ai.md".into()),
            force: true,
            ..InitArgs::default()
        };
        let answers = non_interactive(&args, &RunCache::default(), cwd);
        let request = build_request(&args, &answers, cwd);

        assert_eq!(request.project_root, cwd);
        assert_eq!(request.seeds.len(), 1);
        assert_eq!(
            request.seed_to,
            docforge_core::domain::SeedTarget::Root
        );
        assert_eq!(request.ai_template, Some(PathBuf::from("/work/app/tpl/ai.md")));
        assert!(request.force);
    }

    #[test]
    fn repeated_seeds_keep_first_order() {
        use crate::cli::SeedArg;

        let cwd = Path::new("/work/app");
        let args = InitArgs {
            seed: vec![SeedArg::Registry, SeedArg::Ledger, SeedArg::Registry],
            ..InitArgs::default()
        };
        let answers = non_interactive(&args, &RunCache::default(), cwd);
        let request = build_request(&args, &answers, cwd);

        assert_eq!(request.seeds, [SeedKind::Registry, SeedKind::Ledger]);
    }

    #[test]
    fn cache_records_relative_target() {
        let cwd = Path::new("/work/app");
        let answers = non_interactive(&InitArgs::default(), &RunCache::default(), cwd);
        let cache = updated_cache(RunCache::default(), &answers, cwd);
        assert_eq!(cache.target_dir.as_deref(), Some("docs/ai"));
        assert_eq!(cache.overview.as_deref(), Some("none"));
        assert_eq!(cache.on_collision, Some(CollisionPolicy::Skip));
    }

    #[test]
    fn split_list_trims_and_drops_empty() {
        assert_eq!(split_list(" scope, ,bookends,"), ["scope", "bookends"]);
    }
}
