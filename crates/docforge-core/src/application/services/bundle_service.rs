//! Bundle Service - generates Copilot customization files from snippets.
//!
//! A bundle config lists snippet documents to copy into `.github/`, each
//! rendered with merged variables and optionally prefixed with front
//! matter. VS Code settings are deep merged into `.vscode/settings.json`.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, SchemaSource, SchemaValidator, TemplateRenderer},
    },
    domain::{
        BundleConfig, BundleItem, BundleReport, DomainError, GithubReport, RelativePath,
        VscodeReport, VscodeSection,
        bundle::missing_snippet_marker,
        front_matter,
        merge::{deep_merge, merge_layers},
    },
    error::DocforgeResult,
};

/// Name of the schema the raw config is checked against, when available.
pub const BUNDLE_SCHEMA: &str = "copilot-bundle";

/// Per-run overrides.
#[derive(Debug, Clone, Default)]
pub struct BundleOptions {
    /// Directory relative paths are resolved from (the invocation directory).
    pub base_dir: PathBuf,
    /// Overrides `targets.repoRoot`.
    pub repo_root: Option<PathBuf>,
    /// YAML or JSON vars file, relative to the repository root.
    pub vars_file: Option<PathBuf>,
    /// Inline vars: JSON first, then YAML.
    pub inline_vars: Option<String>,
    /// Overrides `snippetRoots`.
    pub snippet_roots: Option<Vec<String>>,
    pub dry_run: bool,
}

/// Service generating the Copilot bundle.
pub struct BundleService {
    filesystem: Box<dyn Filesystem>,
    renderer: Box<dyn TemplateRenderer>,
    schemas: Box<dyn SchemaSource>,
    validator: Box<dyn SchemaValidator>,
}

impl BundleService {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        renderer: Box<dyn TemplateRenderer>,
        schemas: Box<dyn SchemaSource>,
        validator: Box<dyn SchemaValidator>,
    ) -> Self {
        Self {
            filesystem,
            renderer,
            schemas,
            validator,
        }
    }

    /// Read and parse a bundle config, validating it first when the
    /// `copilot-bundle` schema is available.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load_config(&self, path: &Path) -> DocforgeResult<BundleConfig> {
        let text = self.filesystem.read_to_string(path)?;
        let raw: Value =
            serde_yaml::from_str(&text).map_err(|e| ApplicationError::ConfigParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        self.check_schema(&raw)?;

        serde_json::from_value(raw).map_err(|e| {
            ApplicationError::ConfigParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Render and write every bundle item (nothing is written in dry-run).
    #[instrument(skip_all, fields(dry_run = options.dry_run))]
    pub fn generate(
        &self,
        config: BundleConfig,
        options: &BundleOptions,
    ) -> DocforgeResult<BundleReport> {
        let repo_root = match &options.repo_root {
            Some(root) => options.base_dir.join(root),
            None => options.base_dir.join(&config.targets.repo_root),
        };
        debug!(repo_root = %repo_root.display(), "Resolved repository root");

        let vars = self.merge_vars(&config, &repo_root, options)?;
        let mut config = self.render_config(config, &vars)?;
        config.vars = vars;

        let snippet_roots: Vec<PathBuf> = options
            .snippet_roots
            .as_ref()
            .unwrap_or(&config.snippet_roots)
            .iter()
            .map(|root| repo_root.join(root.trim()))
            .collect();

        let mut warnings = Vec::new();
        let github =
            self.write_github(&config, &repo_root, &snippet_roots, options, &mut warnings)?;

        let vscode = match &config.vscode {
            Some(section) => Some(self.write_vscode_settings(
                &repo_root.join(&config.targets.vscode_dir),
                section,
                options.dry_run,
            )?),
            None => None,
        };

        let report = BundleReport {
            dry_run: options.dry_run,
            github,
            vscode,
            warnings,
        };

        info!(
            files = report.github.files.len(),
            vscode = report.vscode.is_some(),
            "Bundle generated"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn check_schema(&self, raw: &Value) -> DocforgeResult<()> {
        let schema = match self.schemas.load(BUNDLE_SCHEMA) {
            Ok(Some(schema)) => schema,
            Ok(None) => {
                debug!("No bundle schema available; skipping config validation");
                return Ok(());
            }
            Err(e) => {
                warn!(error = %e, "Could not load bundle schema; skipping config validation");
                return Ok(());
            }
        };

        let issues = match self.validator.validate(BUNDLE_SCHEMA, &schema, raw) {
            Ok(issues) => issues,
            Err(e) => {
                warn!(error = %e, "Bundle schema unusable; skipping config validation");
                return Ok(());
            }
        };

        if issues.is_empty() {
            return Ok(());
        }

        Err(ApplicationError::BundleConfigInvalid {
            errors: issues
                .into_iter()
                .map(|i| {
                    if i.path.is_empty() {
                        i.message
                    } else {
                        format!("{}: {}", i.path, i.message)
                    }
                })
                .collect(),
        }
        .into())
    }

    /// `defaults <- vars <- vars file <- inline vars`.
    fn merge_vars(
        &self,
        config: &BundleConfig,
        repo_root: &Path,
        options: &BundleOptions,
    ) -> DocforgeResult<Value> {
        let from_file = match &options.vars_file {
            Some(file) => {
                let path = repo_root.join(file);
                if !self.filesystem.exists(&path) {
                    return Err(ApplicationError::ConfigParse {
                        path,
                        reason: "vars file not found".into(),
                    }
                    .into());
                }
                let text = self.filesystem.read_to_string(&path)?;
                serde_yaml::from_str::<Value>(&text).map_err(|e| {
                    ApplicationError::ConfigParse {
                        path,
                        reason: e.to_string(),
                    }
                })?
            }
            None => Value::Null,
        };

        let inline = match &options.inline_vars {
            Some(text) => parse_inline_vars(text)?,
            None => Value::Null,
        };

        Ok(merge_layers([&config.defaults, &config.vars, &from_file, &inline]))
    }

    /// Render every string in the config against `vars`.
    fn render_config(&self, config: BundleConfig, vars: &Value) -> DocforgeResult<BundleConfig> {
        let raw = serde_json::to_value(config).map_err(|e| DomainError::InvalidVariables {
            reason: e.to_string(),
        })?;
        let rendered = self.render_value(raw, vars)?;
        serde_json::from_value(rendered).map_err(|e| {
            DomainError::InvalidVariables {
                reason: format!("config no longer valid after rendering: {e}"),
            }
            .into()
        })
    }

    fn render_value(&self, value: Value, vars: &Value) -> DocforgeResult<Value> {
        Ok(match value {
            Value::String(s) => Value::String(self.renderer.render(&s, vars)?),
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|v| self.render_value(v, vars))
                    .collect::<DocforgeResult<_>>()?,
            ),
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| Ok((k, self.render_value(v, vars)?)))
                    .collect::<DocforgeResult<Map<_, _>>>()?,
            ),
            other => other,
        })
    }

    fn write_github(
        &self,
        config: &BundleConfig,
        repo_root: &Path,
        snippet_roots: &[PathBuf],
        options: &BundleOptions,
        warnings: &mut Vec<String>,
    ) -> DocforgeResult<GithubReport> {
        let github_dir = repo_root.join(&config.targets.github_dir);
        if !options.dry_run {
            self.filesystem.create_dir_all(&github_dir)?;
        }

        let mut files = Vec::new();
        for item in config.github.items() {
            let out = github_dir.join(RelativePath::try_new(&item.to)?.as_path());
            let body =
                self.render_item(item, snippet_roots, &config.vars, options.dry_run, warnings)?;

            if !options.dry_run {
                if let Some(parent) = out.parent() {
                    self.filesystem.create_dir_all(parent)?;
                }
                self.filesystem.write_file(&out, &body)?;
                debug!(path = %out.display(), "Wrote bundle item");
            }
            files.push(out);
        }

        Ok(GithubReport { files })
    }

    fn render_item(
        &self,
        item: &BundleItem,
        snippet_roots: &[PathBuf],
        vars: &Value,
        dry_run: bool,
        warnings: &mut Vec<String>,
    ) -> DocforgeResult<String> {
        let from = RelativePath::try_new(&item.from)?;

        let raw = match self.find_snippet(&from, snippet_roots) {
            Some(path) => self.filesystem.read_to_string(&path)?,
            None if dry_run => {
                let message = format!("Snippet not found (dry-run): {}", item.from);
                warn!("{message}");
                warnings.push(message);
                missing_snippet_marker(&item.from)
            }
            None => {
                return Err(ApplicationError::SnippetNotFound {
                    from: item.from.clone(),
                    searched: snippet_roots.to_vec(),
                }
                .into());
            }
        };

        let mut body = self.renderer.render(&raw, vars)?;
        if let Some(meta) = &item.meta {
            if let Value::Object(meta) = self.render_value(Value::Object(meta.clone()), vars)? {
                body = front_matter::inject(&meta, &body);
            }
        }
        Ok(front_matter::with_banner(&body))
    }

    /// First snippet root holding `from` wins.
    fn find_snippet(&self, from: &RelativePath, roots: &[PathBuf]) -> Option<PathBuf> {
        roots
            .iter()
            .map(|root| root.join(from.as_path()))
            .find(|path| self.filesystem.exists(path))
    }

    fn write_vscode_settings(
        &self,
        vscode_dir: &Path,
        section: &VscodeSection,
        dry_run: bool,
    ) -> DocforgeResult<VscodeReport> {
        let path = vscode_dir.join("settings.json");

        let mut merged = if self.filesystem.exists(&path) {
            let text = self.filesystem.read_to_string(&path)?;
            serde_json::from_str(&text).map_err(|e| ApplicationError::ConfigParse {
                path: path.clone(),
                reason: e.to_string(),
            })?
        } else {
            Value::Object(Map::new())
        };
        deep_merge(&mut merged, &Value::Object(section.settings.clone()));

        if !dry_run {
            let mut json = serde_json::to_string_pretty(&merged).map_err(|e| {
                ApplicationError::RenderingFailed {
                    reason: e.to_string(),
                }
            })?;
            json.push('\n');
            self.filesystem.create_dir_all(vscode_dir)?;
            self.filesystem.write_file(&path, &json)?;
            info!(path = %path.display(), "Merged VS Code settings");
        }

        Ok(VscodeReport { path, merged })
    }
}

/// Parse `--vars`: JSON, falling back to YAML.
pub fn parse_inline_vars(text: &str) -> DocforgeResult<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Ok(value);
    }
    serde_yaml::from_str::<Value>(text).map_err(|e| {
        DomainError::InvalidVariables {
            reason: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::{MockFilesystem, MockSchemaSource};
    use crate::domain::ValidationIssue;
    use crate::error::DocforgeError;
    use serde_json::json;

    /// Replaces top-level `{{key}}` tokens with string values.
    struct TopLevelRenderer;

    impl TemplateRenderer for TopLevelRenderer {
        fn render(&self, template: &str, data: &Value) -> DocforgeResult<String> {
            let mut out = template.to_string();
            if let Some(map) = data.as_object() {
                for (k, v) in map {
                    if let Some(s) = v.as_str() {
                        out = out.replace(&format!("{{{{{k}}}}}"), s);
                    }
                }
            }
            Ok(out)
        }
    }

    struct NoIssues;

    impl SchemaValidator for NoIssues {
        fn validate(&self, _: &str, _: &Value, _: &Value) -> DocforgeResult<Vec<ValidationIssue>> {
            Ok(vec![])
        }
    }

    struct AlwaysInvalid;

    impl SchemaValidator for AlwaysInvalid {
        fn validate(&self, _: &str, _: &Value, _: &Value) -> DocforgeResult<Vec<ValidationIssue>> {
            Ok(vec![ValidationIssue::new("/github", "must be object")])
        }
    }

    fn no_schema() -> MockSchemaSource {
        let mut schemas = MockSchemaSource::new();
        schemas.expect_load().returning(|_| Ok(None));
        schemas
    }

    fn config() -> BundleConfig {
        serde_json::from_value(json!({
            "snippetRoots": ["snippets"],
            "defaults": {"tone": "concise", "project_name": "default"},
            "vars": {"project_name": "acme"},
            "github": {
                "prompts": [{"from": "p.md", "to": "prompts/{{project_name}}.prompt.md",
                             "meta": {"mode": "agent", "tools": ["search"]}}]
            }
        }))
        .unwrap()
    }

    fn options() -> BundleOptions {
        BundleOptions {
            base_dir: PathBuf::from("/repo"),
            dry_run: true,
            ..Default::default()
        }
    }

    #[test]
    fn inline_vars_accept_json_and_yaml() {
        assert_eq!(parse_inline_vars(r#"{"a": 1}"#).unwrap(), json!({"a": 1}));
        assert_eq!(parse_inline_vars("a: b").unwrap(), json!({"a": "b"}));
        assert!(parse_inline_vars("a: [").is_err());
    }

    #[test]
    fn dry_run_renders_paths_and_never_writes() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|p| p == Path::new("/repo/snippets/p.md"));
        fs.expect_read_to_string()
            .returning(|_| Ok("Tone: {{tone}}".to_string()));
        fs.expect_write_file().never();
        fs.expect_create_dir_all().never();

        let service = BundleService::new(
            Box::new(fs),
            Box::new(TopLevelRenderer),
            Box::new(no_schema()),
            Box::new(NoIssues),
        );

        let mut opts = options();
        opts.inline_vars = Some(r#"{"tone": "friendly"}"#.into());
        let report = service.generate(config(), &opts).unwrap();

        assert_eq!(
            report.github.files,
            vec![PathBuf::from("/repo/.github/prompts/acme.prompt.md")]
        );
        assert!(report.dry_run);
    }

    #[test]
    fn missing_snippet_is_fatal_outside_dry_run() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));

        let service = BundleService::new(
            Box::new(fs),
            Box::new(TopLevelRenderer),
            Box::new(no_schema()),
            Box::new(NoIssues),
        );

        let mut opts = options();
        opts.dry_run = false;
        let err = service.generate(config(), &opts).unwrap_err();
        assert!(matches!(
            err,
            DocforgeError::Application(ApplicationError::SnippetNotFound { .. })
        ));
    }

    #[test]
    fn missing_snippet_warns_in_dry_run() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);

        let service = BundleService::new(
            Box::new(fs),
            Box::new(TopLevelRenderer),
            Box::new(no_schema()),
            Box::new(NoIssues),
        );

        let report = service.generate(config(), &options()).unwrap();
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_to_string()
            .returning(|_| Ok("github: 3\n".to_string()));
        let mut schemas = MockSchemaSource::new();
        schemas.expect_load().returning(|_| Ok(Some(json!({}))));

        let service = BundleService::new(
            Box::new(fs),
            Box::new(TopLevelRenderer),
            Box::new(schemas),
            Box::new(AlwaysInvalid),
        );

        let err = service.load_config(Path::new("bundle.yaml")).unwrap_err();
        assert!(err.to_string().contains("/github: must be object"));
    }

    #[test]
    fn schema_load_failure_only_warns() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_to_string()
            .returning(|_| Ok("snippetRoots: [a]\n".to_string()));
        let mut schemas = MockSchemaSource::new();
        schemas.expect_load().returning(|name| {
            Err(ApplicationError::InvalidSchema {
                name: name.to_string(),
                reason: "not json".into(),
            }
            .into())
        });

        let service = BundleService::new(
            Box::new(fs),
            Box::new(TopLevelRenderer),
            Box::new(schemas),
            Box::new(AlwaysInvalid),
        );

        let cfg = service.load_config(Path::new("bundle.yaml")).unwrap();
        assert_eq!(cfg.snippet_roots, vec!["a"]);
    }
}
