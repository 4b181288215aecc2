//! Interactive questionnaire for `strata new`.
//!
//! Only compiled with the `interactive` feature. Each answer is validated
//! with the same rules the core applies, so a finished questionnaire never
//! produces a validation error later.

use std::io;
use std::path::{Path, PathBuf};

use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use tracing::debug;

use strata_core::domain::entities::config::{validate_module_path, validate_project_name};

use crate::cli::LanguageArg;
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

const LANGUAGE_CHOICES: &[&str] = &["Go", "Java (coming soon)"];

/// Starting values; whatever flags and config already decided.
#[derive(Debug, Clone, Default)]
pub struct Seed {
    pub name: Option<String>,
    pub module_path: Option<String>,
    pub module_prefix: Option<String>,
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub name: String,
    pub module_path: String,
    pub language: LanguageArg,
    pub cache: bool,
    pub output_dir: PathBuf,
}

/// Ask for name, language, module path, cache and output directory.
pub fn ask(seed: Seed, cwd: &Path, output: &OutputManager) -> CliResult<Answers> {
    let theme = ColorfulTheme::default();

    let mut name_input = Input::<String>::with_theme(&theme)
        .with_prompt("Project name")
        .validate_with(|input: &String| validate_project_name(input).map_err(|e| e.to_string()));
    if let Some(name) = &seed.name {
        name_input = name_input.default(name.clone());
    }
    let name = name_input.interact_text().map_err(prompt_error)?;

    let language = match Select::with_theme(&theme)
        .with_prompt("Language")
        .items(LANGUAGE_CHOICES)
        .default(0)
        .interact()
        .map_err(prompt_error)?
    {
        0 => LanguageArg::Go,
        _ => {
            output.warning("Java is not generated yet; using Go")?;
            LanguageArg::Go
        }
    };

    let hosted = Confirm::with_theme(&theme)
        .with_prompt("Will the project be hosted (GitHub, GitLab, ...)?")
        .default(true)
        .interact()
        .map_err(prompt_error)?;

    let module_path = if hosted {
        let suggested = seed
            .module_path
            .clone()
            .unwrap_or_else(|| suggest_module_path(seed.module_prefix.as_deref(), &name));
        Input::<String>::with_theme(&theme)
            .with_prompt("Module path")
            .default(suggested)
            .validate_with(|input: &String| validate_hosted_module(input))
            .interact_text()
            .map_err(prompt_error)?
    } else {
        name.clone()
    };

    let cache = Confirm::with_theme(&theme)
        .with_prompt("Use Redis for caching?")
        .default(true)
        .interact()
        .map_err(prompt_error)?;

    let default_dir = seed.output_dir.clone().unwrap_or_else(|| cwd.to_path_buf());
    let custom_dir = Confirm::with_theme(&theme)
        .with_prompt(format!(
            "Generate somewhere other than {}?",
            default_dir.display()
        ))
        .default(false)
        .interact()
        .map_err(prompt_error)?;

    let output_dir = if custom_dir {
        let raw = Input::<String>::with_theme(&theme)
            .with_prompt("Output directory (absolute path)")
            .validate_with(|input: &String| {
                if Path::new(input).is_absolute() {
                    Ok(())
                } else {
                    Err("must be an absolute path".to_string())
                }
            })
            .interact_text()
            .map_err(prompt_error)?;
        PathBuf::from(raw)
    } else {
        default_dir
    };

    let answers = Answers {
        name,
        module_path,
        language,
        cache,
        output_dir,
    };
    debug!(?answers, "questionnaire complete");
    Ok(answers)
}

/// Final yes/no before anything is written.
pub fn confirm(project_path: &Path) -> CliResult<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Create project at {}?", project_path.display()))
        .default(true)
        .interact()
        .map_err(prompt_error)
}

/// `github.com/yourname/<name>`, or `<prefix>/<name>` when a prefix is configured.
pub fn suggest_module_path(prefix: Option<&str>, name: &str) -> String {
    let prefix = prefix
        .map(|p| p.trim_end_matches('/'))
        .filter(|p| !p.is_empty())
        .unwrap_or("github.com/yourname");
    format!("{prefix}/{name}")
}

fn validate_hosted_module(input: &str) -> Result<(), String> {
    validate_module_path(input).map_err(|e| e.to_string())?;
    if !input.contains('/') {
        return Err("a hosted module path looks like host/owner/repo".into());
    }
    Ok(())
}

fn prompt_error(err: dialoguer::Error) -> CliError {
    let err: io::Error = err.into();
    if err.kind() == io::ErrorKind::Interrupted {
        CliError::Cancelled
    } else {
        CliError::IoError {
            message: "Prompt failed".into(),
            source: err,
        }
    }
}
