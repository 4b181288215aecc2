//! CLI argument definitions using the clap derive API.
//!
//! Only argument names, help text and value enums live here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name    = "strata",
    bin_name = "strata",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Layered multi-module project skeletons",
    long_about = "Strata generates a ready-to-build Go workspace laid out in \
                  domain / infrastructure / api / cmd modules, with a pinned \
                  dependency module, shared utilities and Docker files.",
    after_help = "EXAMPLES:\n\
        \x20 strata new shopapi --module github.com/acme/shopapi\n\
        \x20 strata new shopapi --cache --no-docker -o ~/src\n\
        \x20 strata new                       # interactive\n\
        \x20 strata modules --no-example",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new project.
    #[command(
        visible_alias = "n",
        after_help = "EXAMPLES:\n\
            \x20 strata new shopapi --module github.com/acme/shopapi --yes\n\
            \x20 strata new shopapi --cache --templates ./my-payloads\n\
            \x20 strata new shopapi --dry-run"
    )]
    New(NewArgs),

    /// Show the steps and files a project would get.
    #[command(visible_alias = "ls")]
    Modules(ModulesArgs),

    /// Write a default configuration file.
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(after_help = "EXAMPLES:\n\
            \x20 strata completions bash > ~/.local/share/bash-completion/completions/strata\n\
            \x20 strata completions zsh  > ~/.zfunc/_strata\n\
            \x20 strata completions fish > ~/.config/fish/completions/strata.fish")]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

// ── Shared project flags ─────────────────────────────────────────────────────

/// Flags that shape the generated project; shared by `new` and `modules`.
#[derive(Debug, Clone, Args)]
pub struct ProjectFlags {
    /// Target language.
    #[arg(short = 'l', long = "lang", value_enum, value_name = "LANGUAGE")]
    pub language: Option<LanguageArg>,

    /// Add the Redis cache dependency and container.
    #[arg(long = "cache")]
    pub cache: bool,

    /// Skip Dockerfile, docker-compose.yml and .dockerignore.
    #[arg(long = "no-docker")]
    pub no_docker: bool,

    /// Skip the example `user` domain and `api/user-api` modules.
    #[arg(long = "no-example")]
    pub no_example: bool,
}

// ── new ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name; also the directory created under the output path.
    /// Omit it to be prompted.
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Module path, e.g. `github.com/acme/shopapi`. Defaults to NAME.
    #[arg(short = 'm', long = "module", value_name = "PATH")]
    pub module: Option<String>,

    /// Directory the project directory is created in.
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub project: ProjectFlags,

    /// Directory of payload overrides (`<dir>/<language>/<path>.tmpl`).
    #[arg(long = "templates", value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Ask for every setting, even those given as flags.
    #[arg(short = 'i', long = "interactive", conflicts_with = "yes")]
    pub interactive: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// Print the plan without writing anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

// ── modules ───────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ModulesArgs {
    #[command(flatten)]
    pub project: ProjectFlags,

    /// Also list every file each step writes.
    #[arg(long = "files")]
    pub files: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write `.strata.toml` in the current directory instead of the user config dir.
    #[arg(long = "local")]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config ────────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print one value, e.g. `defaults.cache`.
    Get { key: String },
    /// Print the whole effective configuration as TOML.
    List,
    /// Print the default configuration file path.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LanguageArg {
    #[value(alias = "golang")]
    Go,
    /// Reserved; not generated yet.
    Java,
}

impl LanguageArg {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::Java => "java",
        }
    }
}
