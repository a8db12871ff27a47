//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the whole `init` workflow:
//! 1. Enumerate template files of every included folder
//! 2. Render placeholders
//! 3. Resolve collisions against the filesystem as it was before the run
//! 4. Add generated artifacts (index, overview, ledger, scope card, receipt)
//! 5. Write everything (skipped entirely in dry-run)
//!
//! Steps 1-4 build a [`WritePlan`]; step 5 executes it. Dry-run and real
//! runs share the planning code, so their destination lists are identical.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateStore},
    },
    domain::{
        CollisionPolicy, DomainError, InitReceipt, Ledger, LedgerEntry, Placeholders,
        RelativePath, SeedKind, SeedTarget, WriteAction, WritePlan, WritePlanEntry, WriteScope,
        artifacts::{self, ArtifactLinks},
        collision, relative_display,
        seed::SAMPLES_FOLDER,
    },
    error::{Context, DocforgeError, DocforgeResult},
};

/// Where the project overview comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverviewChoice {
    /// Link an existing overview document.
    Existing(PathBuf),
    /// Generate `PROJECT_OVERVIEW.md` inside the target directory.
    CreateEmpty,
    /// No overview.
    None,
}

/// Everything one `init` run needs, fixed before planning starts.
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    pub target_dir: PathBuf,
    pub project_root: PathBuf,
    pub includes: Vec<String>,
    pub on_collision: CollisionPolicy,
    pub placeholders: Placeholders,
    pub overview: OverviewChoice,
    pub ai_template: Option<PathBuf>,
    pub seeds: Vec<SeedKind>,
    pub seed_to: SeedTarget,
    pub force: bool,
    pub dry_run: bool,
    pub init_readme: bool,
    pub created_at: DateTime<Utc>,
}

impl ScaffoldRequest {
    /// Folders scaffolded when none are chosen.
    pub const DEFAULT_INCLUDES: [&'static str; 3] = ["scope", "bookends", "registry"];

    pub fn new(
        target_dir: impl Into<PathBuf>,
        project_root: impl Into<PathBuf>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            target_dir: target_dir.into(),
            project_root: project_root.into(),
            includes: Self::default_includes(),
            on_collision: CollisionPolicy::default(),
            placeholders: Placeholders::default(),
            overview: OverviewChoice::CreateEmpty,
            ai_template: None,
            seeds: Vec::new(),
            seed_to: SeedTarget::default(),
            force: false,
            dry_run: false,
            init_readme: false,
            created_at,
        }
    }

    pub fn default_includes() -> Vec<String> {
        Self::DEFAULT_INCLUDES.iter().map(|s| s.to_string()).collect()
    }

    fn root_for(&self, scope: WriteScope) -> &Path {
        match scope {
            WriteScope::Target => &self.target_dir,
            WriteScope::Project => &self.project_root,
        }
    }
}

/// What a run planned (and, unless dry-run, wrote).
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub plan: WritePlan,
    pub target_dir: PathBuf,
    pub project_root: PathBuf,
    pub dry_run: bool,
    pub overview: Option<PathBuf>,
    pub ai_instructions: Option<PathBuf>,
    pub receipt: InitReceipt,
    pub warnings: Vec<String>,
}

impl ScaffoldReport {
    /// Absolute destinations written (or that would be written in dry-run).
    pub fn destinations(&self) -> Vec<PathBuf> {
        self.plan.destinations(&self.target_dir, &self.project_root)
    }

    pub fn written_count(&self) -> usize {
        self.plan.writes().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.plan.skips().count()
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    store: Box<dyn TemplateStore>,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    /// File names tried, in order, when looking for the AI instructions
    /// template at the store root.
    pub const AI_TEMPLATE_CANDIDATES: [&'static str; 3] = [
        "000_ai_instructions.template.md",
        "01-ai_instructions.template.md",
        "ai_instructions.template.md",
    ];

    /// Create a new scaffold service with the given adapters.
    pub fn new(store: Box<dyn TemplateStore>, filesystem: Box<dyn Filesystem>) -> Self {
        Self { store, filesystem }
    }

    /// Plan and (unless dry-run) execute a scaffold.
    #[instrument(
        skip_all,
        fields(
            target = %request.target_dir.display(),
            policy = %request.on_collision,
            dry_run = request.dry_run
        )
    )]
    pub fn scaffold(&self, request: &ScaffoldRequest) -> DocforgeResult<ScaffoldReport> {
        let report = self.plan(request)?;

        if request.dry_run {
            info!(
                planned = report.written_count(),
                skipped = report.skipped_count(),
                "Dry run, nothing written"
            );
            return Ok(report);
        }

        self.execute(request, &report.plan)?;
        info!(
            written = report.written_count(),
            skipped = report.skipped_count(),
            "Scaffold completed"
        );
        Ok(report)
    }

    /// Build the full write plan without touching the filesystem.
    pub fn plan(&self, request: &ScaffoldRequest) -> DocforgeResult<ScaffoldReport> {
        if request.includes.is_empty() {
            return Err(DomainError::MissingRequiredField { field: "includes" }.into());
        }

        let mut planner = Planner {
            service: self,
            request,
            plan: WritePlan::new(),
            warnings: Vec::new(),
        };

        let overview = planner.plan_overview()?;
        planner.plan_templates()?;
        planner.plan_index(overview.as_deref())?;
        let ai_instructions = planner.plan_ai_instructions()?;
        planner.plan_readme()?;

        let links = planner.links(overview.as_deref());
        planner.plan_registry(&links)?;
        planner.plan_seeds()?;
        planner.plan_scope_card(&links)?;

        let receipt = InitReceipt {
            version: InitReceipt::VERSION,
            created_at: request.created_at,
            target_dir: relative_display(&request.target_dir, &request.project_root),
            overview_path: overview
                .as_deref()
                .map(|p| relative_display(p, &request.project_root)),
            includes: request.includes.clone(),
            on_collision: request.on_collision,
            ai_instructions: ai_instructions
                .as_deref()
                .map(|p| relative_display(p, &request.project_root)),
        };
        planner.plan_receipt(&receipt)?;

        let Planner { plan, warnings, .. } = planner;
        Ok(ScaffoldReport {
            plan,
            target_dir: request.target_dir.clone(),
            project_root: request.project_root.clone(),
            dry_run: request.dry_run,
            overview,
            ai_instructions,
            receipt,
            warnings,
        })
    }

    /// Template destinations only, for `--list`. Never writes.
    pub fn planned_templates(&self, request: &ScaffoldRequest) -> DocforgeResult<Vec<PathBuf>> {
        let mut out = Vec::new();
        for folder in &request.includes {
            if !self.store.has_folder(folder) {
                warn!(folder = %folder, "Included folder missing from template store");
                continue;
            }
            for rel in self.store.list(folder, &[SAMPLES_FOLDER.to_string()])? {
                out.push(request.target_dir.join(rel.as_path()));
            }
        }
        Ok(out)
    }

    /// Human-readable template store origin.
    pub fn store_description(&self) -> String {
        self.store.describe()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn execute(&self, request: &ScaffoldRequest, plan: &WritePlan) -> DocforgeResult<()> {
        self.filesystem.create_dir_all(&request.target_dir)?;

        for entry in plan.writes() {
            let Some(rel) = entry.written_path() else {
                continue;
            };
            let path = request.root_for(entry.scope).join(rel.as_path());

            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, &entry.content)?;
            debug!(path = %path.display(), action = %entry.action, "Wrote file");
        }

        Ok(())
    }

    fn exists(&self, request: &ScaffoldRequest, scope: WriteScope, rel: &RelativePath) -> bool {
        self.filesystem
            .exists(&request.root_for(scope).join(rel.as_path()))
    }
}

/// Accumulates one run's plan.
struct Planner<'a> {
    service: &'a ScaffoldService,
    request: &'a ScaffoldRequest,
    plan: WritePlan,
    warnings: Vec<String>,
}

impl Planner<'_> {
    fn warn(&mut self, message: String) {
        warn!("{message}");
        self.warnings.push(message);
    }

    fn render(&self, text: &str) -> String {
        self.request.placeholders.render(text)
    }

    /// Add an entry resolved with the run's collision policy.
    fn push_policy(
        &mut self,
        rel: RelativePath,
        content: String,
        source: impl Into<String>,
    ) -> DocforgeResult<()> {
        let exists = self.service.exists(self.request, WriteScope::Target, &rel);
        let action = collision::resolve(exists, self.request.on_collision);
        if action == WriteAction::Skip {
            info!(path = %rel, "Skipping existing file");
        }
        self.plan.push(WritePlanEntry::new(
            WriteScope::Target,
            rel,
            action,
            content,
            source,
        ));
        Ok(())
    }

    /// Existing path, or a freshly generated `PROJECT_OVERVIEW.md`.
    fn plan_overview(&mut self) -> DocforgeResult<Option<PathBuf>> {
        match &self.request.overview {
            OverviewChoice::None => Ok(None),
            OverviewChoice::Existing(path) if self.service.filesystem.exists(path) => {
                Ok(Some(path.clone()))
            }
            OverviewChoice::Existing(path) => {
                self.warn(format!(
                    "Overview not found at {}; generating an empty one instead",
                    path.display()
                ));
                self.plan_empty_overview()
            }
            OverviewChoice::CreateEmpty => self.plan_empty_overview(),
        }
    }

    fn plan_empty_overview(&mut self) -> DocforgeResult<Option<PathBuf>> {
        let rel = RelativePath::try_new(artifacts::OVERVIEW_FILE)?;
        let content = self.render(&artifacts::overview());
        self.push_policy(rel.clone(), content, "generated:overview")?;
        Ok(Some(self.request.target_dir.join(rel.as_path())))
    }

    fn plan_templates(&mut self) -> DocforgeResult<()> {
        let exclude = [SAMPLES_FOLDER.to_string()];

        for folder in &self.request.includes {
            if !self.service.store.has_folder(folder) {
                let err = ApplicationError::FolderNotFound {
                    folder: folder.clone(),
                };
                if self.request.dry_run {
                    self.warn(format!("{err} (dry-run)"));
                    continue;
                }
                return Err(err.into());
            }

            let files = self.service.store.list(folder, &exclude)?;
            debug!(folder = %folder, files = files.len(), "Collected templates");

            for rel in files {
                let content = match self.service.store.load(&rel) {
                    Ok(raw) => self.render(&raw),
                    Err(err) if self.request.dry_run => {
                        self.warn(format!("{err} (dry-run)"));
                        artifacts::missing_template_marker(&rel.to_string())
                    }
                    Err(err) => return Err(err),
                };
                let source = format!("template:{rel}");
                self.push_policy(rel, content, source)?;
            }
        }

        Ok(())
    }

    fn plan_index(&mut self, overview: Option<&Path>) -> DocforgeResult<()> {
        let link = overview.map(|p| {
            let rel = relative_display(p, &self.request.target_dir);
            if rel.starts_with("..") {
                rel
            } else {
                format!("./{rel}")
            }
        });
        let content = self.render(&artifacts::index(link.as_deref()));
        self.push_policy(
            RelativePath::try_new(artifacts::INDEX_FILE)?,
            content,
            "generated:index",
        )
    }

    /// Returns the destination when an AI template was found, even if the
    /// existing file is kept.
    fn plan_ai_instructions(&mut self) -> DocforgeResult<Option<PathBuf>> {
        let (raw, source) = match &self.request.ai_template {
            Some(path) => match self.service.filesystem.read_to_string(path) {
                Ok(raw) => (raw, path.display().to_string()),
                Err(_) => {
                    let err = ApplicationError::TemplateNotFound {
                        path: path.display().to_string(),
                    };
                    if !self.request.dry_run {
                        return Err(err.into());
                    }
                    self.warn(format!("{err} (dry-run)"));
                    (
                        artifacts::missing_template_marker(&path.display().to_string()),
                        path.display().to_string(),
                    )
                }
            },
            None => match self.find_ai_template()? {
                Some(rel) => (self.service.store.load(&rel)?, format!("template:{rel}")),
                None => {
                    self.warn(
                        "AI instructions template not found in template store; skipping".into(),
                    );
                    return Ok(None);
                }
            },
        };

        let rel = RelativePath::try_new(artifacts::AI_INSTRUCTIONS_FILE)?;
        let exists = self.service.exists(self.request, WriteScope::Project, &rel);
        let action = collision::resolve_forced(exists, self.request.force);
        if action == WriteAction::Skip {
            info!("AI instructions already exist; use --force to replace them");
        }

        let content = self.render(&raw);
        let dest = self.request.project_root.join(rel.as_path());
        self.plan.push(WritePlanEntry::new(
            WriteScope::Project,
            rel,
            action,
            content,
            source,
        ));
        Ok(Some(dest))
    }

    fn find_ai_template(&self) -> DocforgeResult<Option<RelativePath>> {
        let root_files = self.service.store.root_files()?;

        for candidate in ScaffoldService::AI_TEMPLATE_CANDIDATES {
            if let Some(found) = root_files.iter().find(|f| f.to_string() == candidate) {
                return Ok(Some(found.clone()));
            }
        }

        Ok(root_files.into_iter().find(|f| {
            let name = f.to_string().to_ascii_lowercase();
            name.contains("ai") && name.contains("instruction") && name.ends_with(".md")
        }))
    }

    fn plan_readme(&mut self) -> DocforgeResult<()> {
        if !self.request.init_readme {
            return Ok(());
        }

        let name = self
            .request
            .placeholders
            .project_name
            .clone()
            .or_else(|| {
                self.request
                    .project_root
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "project".to_string());

        let rel = RelativePath::try_new(artifacts::README_FILE)?;
        let exists = self.service.exists(self.request, WriteScope::Project, &rel);
        let action = collision::resolve_forced(exists, self.request.force);
        self.plan.push(WritePlanEntry::new(
            WriteScope::Project,
            rel,
            action,
            artifacts::readme(&name),
            "generated:readme",
        ));
        Ok(())
    }

    fn links(&self, overview: Option<&Path>) -> ArtifactLinks {
        let root = &self.request.project_root;
        let target = &self.request.target_dir;
        let overview = overview
            .map(Path::to_path_buf)
            .unwrap_or_else(|| target.join(artifacts::OVERVIEW_FILE));

        ArtifactLinks {
            index: relative_display(&target.join(artifacts::INDEX_FILE), root),
            overview: relative_display(&overview, root),
            ai_instructions: relative_display(&root.join(artifacts::AI_INSTRUCTIONS_FILE), root),
        }
    }

    /// Ledger and decision logs are created once and never replaced.
    fn plan_registry(&mut self, links: &ArtifactLinks) -> DocforgeResult<()> {
        let entry = LedgerEntry::init(
            self.request.created_at,
            self.request.placeholders.owner.as_deref(),
            vec![
                format!("./{}", links.ai_instructions),
                links.overview.clone(),
                format!("./{}", links.index),
            ],
        );
        let ledger = Ledger::with_entry(entry)
            .to_yaml()
            .context("serializing work ledger")?;

        let docs = [
            (artifacts::LEDGER_FILE, ledger, "generated:ledger"),
            (
                artifacts::DECISIONS_FILE,
                artifacts::decisions(),
                "generated:decisions",
            ),
            (
                artifacts::NEEDS_CLARIFICATION_FILE,
                artifacts::needs_clarification(),
                "generated:needs-clarification",
            ),
        ];

        for (path, content, source) in docs {
            let rel = RelativePath::try_new(path)?;
            let exists = self.service.exists(self.request, WriteScope::Target, &rel)
                || self.plan.plans_write(WriteScope::Target, &rel);
            if exists {
                debug!(path = %rel, "Create-once artifact present; leaving it");
                continue;
            }
            self.plan.push(WritePlanEntry::new(
                WriteScope::Target,
                rel,
                collision::resolve_create_once(false),
                content,
                source,
            ));
        }
        Ok(())
    }

    fn plan_seeds(&mut self) -> DocforgeResult<()> {
        for seed in self.request.seeds.clone() {
            let sample = RelativePath::try_new(seed.sample_path())?;
            let raw = match self.service.store.load(&sample) {
                Ok(raw) => raw,
                Err(err) => {
                    self.warn(format!("Seed '{seed}' unavailable: {err}"));
                    continue;
                }
            };

            let rel = RelativePath::try_new(self.request.seed_to.destination(seed))?;
            let exists = self.service.exists(self.request, WriteScope::Target, &rel)
                || self.plan.plans_write(WriteScope::Target, &rel);
            let action = collision::resolve_forced(exists, self.request.force);
            if action == WriteAction::Skip {
                info!(path = %rel, "Skipping seed, destination exists");
            }

            let content = self.render(&raw);
            self.plan.push(WritePlanEntry::new(
                WriteScope::Target,
                rel,
                action,
                content,
                format!("seed:{seed}"),
            ));
        }
        Ok(())
    }

    fn plan_scope_card(&mut self, links: &ArtifactLinks) -> DocforgeResult<()> {
        let content = self.render(&artifacts::scope_card(links));
        self.push_policy(
            RelativePath::try_new(artifacts::SCOPE_CARD_FILE)?,
            content,
            "generated:scope-card",
        )
    }

    fn plan_receipt(&mut self, receipt: &InitReceipt) -> DocforgeResult<()> {
        let json = receipt
            .to_json()
            .map_err(|e| DocforgeError::Internal {
                message: format!("serializing receipt: {e}"),
            })?;
        self.push_policy(
            RelativePath::try_new(artifacts::RECEIPT_FILE)?,
            json,
            "generated:receipt",
        )
    }
}
