//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use docforge_core::domain::{CollisionPolicy, SeedKind, SeedTarget, ValidationRule};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

/// Environment variable naming a template directory.
pub const TEMPLATES_ENV: &str = "DOCFORGE_TEMPLATES";

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "docforge",
    bin_name = "docforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Documentation scaffolding, validation and Copilot bundles",
    long_about = "docforge scaffolds a docs/ai planning tree from templates, \
                  validates ledgers against JSON Schemas, generates Copilot \
                  instruction bundles and packages projects.",
    after_help = "EXAMPLES:\n\
        \x20 docforge init --non-interactive --project-name Acme\n\
        \x20 docforge validate --rule 'docs/**/work_ledger.yaml=work_ledger'\n\
        \x20 docforge bundle docs_library/registries/runtime.yaml --dry-run --json\n\
        \x20 docforge package --out-root\n\
        \x20 docforge completions bash > /usr/share/bash-completion/completions/docforge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold the docs tree, AI instructions, ledger and receipt.
    #[command(
        visible_alias = "i",
        about = "Scaffold a docs/ai planning tree",
        after_help = "EXAMPLES:\n\
            \x20 docforge init                               # interactive\n\
            \x20 docforge init docs/ai --non-interactive\n\
            \x20 docforge init --on-collision new --seed ledger --seed registry\n\
            \x20 docforge init --list --include scope\n\
            \x20 docforge init --dry-run --templates ./docs_library"
    )]
    Init(InitArgs),

    /// List template folders of the active template store.
    #[command(
        visible_alias = "ls",
        about = "List template folders",
        after_help = "EXAMPLES:\n\
            \x20 docforge list\n\
            \x20 docforge list scope\n\
            \x20 docforge list --show scope/SCOPE_TEMPLATE.md\n\
            \x20 docforge list --templates ./docs_library --format json"
    )]
    List(ListArgs),

    /// Validate YAML/JSON documents against JSON Schemas.
    #[command(
        visible_alias = "check",
        about = "Validate ledgers and registries",
        after_help = "EXAMPLES:\n\
            \x20 docforge validate\n\
            \x20 docforge validate --root docs --schemas ./schemas\n\
            \x20 docforge validate --rule '**/ledger*.yaml=work_ledger'\n\
            \n\
            Exits with code 2 when any document fails."
    )]
    Validate(ValidateArgs),

    /// Generate `.github` Copilot files and merge VS Code settings.
    #[command(
        about = "Generate the Copilot bundle",
        after_help = "EXAMPLES:\n\
            \x20 docforge bundle\n\
            \x20 docforge bundle runtime.yaml --vars '{\"project_name\":\"Acme\"}'\n\
            \x20 docforge bundle --vars-file vars.yaml --dry-run --json"
    )]
    Bundle(BundleArgs),

    /// Archive the project, honouring `.gitignore`.
    #[command(
        visible_alias = "pack",
        about = "Package the project as a .zip",
        after_help = "EXAMPLES:\n\
            \x20 docforge package                      # tools/dist/project_bundle.zip\n\
            \x20 docforge package release.zip --out-root"
    )]
    Package(PackageArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 docforge completions bash > ~/.local/share/bash-completion/completions/docforge\n\
            \x20 docforge completions zsh  > ~/.zfunc/_docforge\n\
            \x20 docforge completions fish > ~/.config/fish/completions/docforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the docforge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 docforge config init\n\
            \x20 docforge config get defaults.on_collision\n\
            \x20 docforge config list"
    )]
    Config(ConfigCommands),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `docforge init`.
#[derive(Debug, Default, Args)]
pub struct InitArgs {
    /// Target docs directory (default: cached answer, then `defaults.target_dir`).
    #[arg(value_name = "TARGET", help = "Docs directory to scaffold into")]
    pub target: Option<String>,

    /// Replace existing AI instructions, README and seeds.
    #[arg(long = "force", help = "Replace existing AI instructions and seeds")]
    pub force: bool,

    /// Plan only; nothing is written.
    #[arg(long = "dry-run", help = "Show what would be written")]
    pub dry_run: bool,

    /// Never prompt; use flags, cache and defaults.
    #[arg(long = "non-interactive", visible_alias = "yes", short = 'y')]
    pub non_interactive: bool,

    /// Template folders to scaffold (repeatable or comma-separated).
    #[arg(
        long = "include",
        value_name = "FOLDER",
        value_delimiter = ',',
        help = "Template folder to include"
    )]
    pub include: Vec<String>,

    /// What to do when a destination exists.
    #[arg(long = "on-collision", value_enum, value_name = "POLICY")]
    pub on_collision: Option<CollisionArg>,

    /// Sample documents to copy (repeatable).
    #[arg(long = "seed", value_enum, value_name = "SEED")]
    pub seed: Vec<SeedArg>,

    /// Where seeds land inside the target directory.
    #[arg(long = "seed-to", value_enum, value_name = "WHERE")]
    pub seed_to: Option<SeedToArg>,

    /// Explicit AI instructions template file.
    #[arg(long = "ai-template", value_name = "FILE")]
    pub ai_template: Option<PathBuf>,

    /// Print planned template destinations and exit.
    #[arg(long = "list", help = "List planned template files without writing")]
    pub list: bool,

    /// Do not read or write the run cache.
    #[arg(long = "no-cache")]
    pub no_cache: bool,

    /// Existing overview document, or `none`.
    #[arg(long = "overview", value_name = "PATH|none")]
    pub overview: Option<String>,

    /// Template directory (default: built-in set).
    #[arg(long = "templates", value_name = "DIR", env = TEMPLATES_ENV)]
    pub templates: Option<PathBuf>,

    /// Root for `ai_instructions.md` and `README.md` (default: current dir).
    #[arg(long = "project-root", value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    #[arg(long = "project-name", value_name = "NAME")]
    pub project_name: Option<String>,

    #[arg(long = "repo-url", value_name = "URL")]
    pub repo_url: Option<String>,

    #[arg(long = "owner", value_name = "OWNER")]
    pub owner: Option<String>,

    #[arg(long = "description", value_name = "TEXT")]
    pub description: Option<String>,

    /// Also create a minimal project README.
    #[arg(long = "init-readme")]
    pub init_readme: bool,
}

/// Collision policy as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollisionArg {
    /// Replace existing files.
    Overwrite,
    /// Keep existing files.
    Skip,
    /// Write `<file>.new` next to existing files.
    New,
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::Overwrite => Self::Overwrite,
            CollisionArg::Skip => Self::Skip,
            CollisionArg::New => Self::New,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeedArg {
    /// `work_ledger.yaml`
    Ledger,
    /// `user-decisions-registry.yaml`
    Registry,
}

impl From<SeedArg> for SeedKind {
    fn from(arg: SeedArg) -> Self {
        match arg {
            SeedArg::Ledger => Self::Ledger,
            SeedArg::Registry => Self::Registry,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeedToArg {
    /// `<target>/registry/`
    Registry,
    /// `<target>/`
    Root,
}

impl From<SeedToArg> for SeedTarget {
    fn from(arg: SeedToArg) -> Self {
        match arg {
            SeedToArg::Registry => Self::Registry,
            SeedToArg::Root => Self::Root,
        }
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `docforge list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Show the files of one folder only.
    #[arg(value_name = "FOLDER")]
    pub folder: Option<String>,

    /// Template directory (default: built-in set).
    #[arg(long = "templates", value_name = "DIR", env = TEMPLATES_ENV)]
    pub templates: Option<PathBuf>,

    /// Print the raw content of one template instead.
    #[arg(long = "show", value_name = "PATH", conflicts_with = "folder")]
    pub show: Option<String>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Folders with their files.
    Table,
    /// One folder name per line.
    List,
    /// JSON array.
    Json,
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `docforge validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Directory searched for documents (default: current dir).
    #[arg(long = "root", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Directory of `<name>.schema.json` files, consulted before built-ins.
    #[arg(long = "schemas", value_name = "DIR")]
    pub schemas: Option<PathBuf>,

    /// `<glob>=<schema>`; replaces configured and default rules.
    #[arg(long = "rule", value_name = "GLOB=SCHEMA")]
    pub rule: Vec<ValidationRule>,
}

// ── bundle ────────────────────────────────────────────────────────────────────

/// Arguments for `docforge bundle`.
#[derive(Debug, Args)]
pub struct BundleArgs {
    /// Bundle configuration (YAML).
    #[arg(
        value_name = "CONFIG",
        default_value = "docs_library/registries/runtime.yaml"
    )]
    pub bundle_config: PathBuf,

    /// YAML/JSON vars file, relative to the repository root.
    #[arg(long = "vars-file", value_name = "FILE")]
    pub vars_file: Option<PathBuf>,

    /// Inline vars as JSON or YAML.
    #[arg(long = "vars", value_name = "JSON|YAML")]
    pub vars: Option<String>,

    /// Overrides `targets.repoRoot`.
    #[arg(long = "repo-root", value_name = "DIR")]
    pub repo_root: Option<PathBuf>,

    /// Overrides `snippetRoots` (comma-separated).
    #[arg(long = "snippet-roots", value_name = "DIRS", value_delimiter = ',')]
    pub snippet_roots: Option<Vec<String>>,

    /// Directory holding `copilot-bundle.schema.json`.
    #[arg(long = "schemas", value_name = "DIR")]
    pub schemas: Option<PathBuf>,

    /// Render without writing.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the report as JSON.
    #[arg(long = "json")]
    pub json: bool,

    /// Ask for repository root, project name and tone.
    #[arg(long = "interactive")]
    pub interactive: bool,
}

// ── package ───────────────────────────────────────────────────────────────────

/// Arguments for `docforge package`.
#[derive(Debug, Args)]
pub struct PackageArgs {
    /// Archive file name (default: project_bundle.zip).
    #[arg(value_name = "OUT")]
    pub out: Option<PathBuf>,

    /// Write the archive to the project root instead of tools/dist.
    #[arg(long = "out-root")]
    pub out_root: bool,

    /// Project root (default: current dir).
    #[arg(long = "root", value_name = "DIR")]
    pub root: Option<PathBuf>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `docforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `docforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.on_collision`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the configuration file.
    Path,
    /// Write a default configuration file.
    Init {
        /// Write `.docforge.toml` in the current directory.
        #[arg(long = "local")]
        local: bool,

        /// Overwrite an existing file.
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_init_command() {
        let cli = Cli::parse_from([
            "docforge",
            "init",
            "docs/ai",
            "--non-interactive",
            "--include",
            "scope,bookends",
            "--on-collision",
            "new",
            "--seed",
            "ledger",
            "--seed",
            "registry",
        ]);
        let Commands::Init(args) = cli.command else {
            panic!("expected Init command");
        };
        assert_eq!(args.target.as_deref(), Some("docs/ai"));
        assert_eq!(args.include, ["scope", "bookends"]);
        assert_eq!(args.on_collision, Some(CollisionArg::New));
        assert_eq!(args.seed, [SeedArg::Ledger, SeedArg::Registry]);
    }

    #[test]
    fn collision_arg_converts() {
        assert_eq!(
            CollisionPolicy::from(CollisionArg::Overwrite),
            CollisionPolicy::Overwrite
        );
        assert_eq!(CollisionPolicy::from(CollisionArg::New), CollisionPolicy::New);
    }

    #[test]
    fn validate_rules_parse() {
        let cli = Cli::parse_from([
            "docforge",
            "validate",
            "--rule",
            "docs/**/*.yaml=work_ledger",
        ]);
        let Commands::Validate(args) = cli.command else {
            panic!("expected Validate command");
        };
        assert_eq!(args.rule[0].pattern, "docs/**/*.yaml");
        assert_eq!(args.rule[0].schema, "work_ledger");
    }

    #[test]
    fn malformed_rule_is_rejected() {
        assert!(Cli::try_parse_from(["docforge", "validate", "--rule", "no-equals"]).is_err());
    }

    #[test]
    fn bundle_config_defaults() {
        let cli = Cli::parse_from(["docforge", "bundle", "--snippet-roots", "a,b"]);
        let Commands::Bundle(args) = cli.command else {
            panic!("expected Bundle command");
        };
        assert_eq!(
            args.bundle_config,
            PathBuf::from("docs_library/registries/runtime.yaml")
        );
        assert_eq!(args.snippet_roots, Some(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli = Cli::parse_from(["docforge", "validate", "-c", "my.toml"]);
        assert_eq!(cli.global.config, Some(PathBuf::from("my.toml")));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["docforge", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
