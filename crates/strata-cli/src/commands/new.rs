//! Implementation of the `strata new` command.
//!
//! Translates flags, config and (optionally) prompt answers into
//! `GeneratorSettings`, runs the core generator, and displays results.

use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use strata_adapters::LocalFilesystem;
use strata_core::application::{GenerationResult, Generator, GeneratorOption, GeneratorSettings, Ports};

use crate::{
    cli::{GlobalArgs, NewArgs, OutputFormat},
    commands::{absolutize, feature_options, payload_store},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `strata new` command.
///
/// 1. Resolve settings from flags, config and prompts
/// 2. Build the generator (validation, stack selection, target check)
/// 3. Show the summary; stop here on `--dry-run`
/// 4. Confirm unless `--yes` or non-interactive
/// 5. Generate and print next steps
#[instrument(skip_all, fields(project = args.name.as_deref().unwrap_or("")))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let cwd = std::env::current_dir().with_cli_context(|| "Failed to read the current directory")?;
    let can_prompt = global.is_interactive() && std::io::stdin().is_terminal();

    let wants_questionnaire = args.interactive || (args.name.is_none() && can_prompt);
    let (settings, options) = if wants_questionnaire {
        questionnaire_settings(&args, &config, &cwd, &output)?
    } else {
        flag_settings(&args, &config, &cwd)
    };

    let templates = args
        .templates
        .as_deref()
        .or(config.templates.local_path.as_deref())
        .map(|dir| absolutize(&cwd, dir));

    let ports = Ports {
        filesystem: Arc::new(LocalFilesystem::new()),
        payloads: payload_store(templates.as_deref())?,
        progress: output.progress(),
    };

    let generator = Generator::new(settings, options, ports)?;
    debug!(config = %generator.config(), "generator resolved");

    if args.dry_run {
        return print_plan(&generator, &output);
    }

    if output.format() != OutputFormat::Json {
        show_summary(&generator, &output)?;
    }

    if !args.yes && can_prompt && !confirm(&generator.project_path())? {
        return Err(CliError::Cancelled);
    }

    info!(path = %generator.project_path().display(), "generation started");
    let result = generator.generate()?;

    if output.format() == OutputFormat::Json {
        return output.json(&result);
    }

    print_success(&generator, &result, &output)?;
    Ok(())
}

// ── Settings ──────────────────────────────────────────────────────────────────

type Resolved = (GeneratorSettings, Vec<GeneratorOption>);

fn flag_settings(args: &NewArgs, config: &AppConfig, cwd: &Path) -> Resolved {
    let name = args.name.clone().unwrap_or_default();
    let module_path = args
        .module
        .clone()
        .unwrap_or_else(|| default_module_path(config.defaults.module_prefix.as_deref(), &name));
    let output_dir = config
        .defaults
        .output_dir
        .as_deref()
        .map(|dir| absolutize(cwd, dir))
        .unwrap_or_else(|| cwd.to_path_buf());

    let mut settings = GeneratorSettings::new(name, module_path, output_dir);
    settings.language = args
        .project
        .language
        .map(|l| l.as_str().to_string())
        .unwrap_or_else(|| config.defaults.language.clone());
    settings.use_cache = config.defaults.cache;
    settings.docker = config.defaults.docker;
    settings.example_module = config.defaults.example_module;

    let mut options = feature_options(&args.project);
    if let Some(dir) = &args.output {
        options.push(GeneratorOption::OutputPath(absolutize(cwd, dir)));
    }
    (settings, options)
}

#[cfg(feature = "interactive")]
fn questionnaire_settings(
    args: &NewArgs,
    config: &AppConfig,
    cwd: &Path,
    output: &OutputManager,
) -> CliResult<Resolved> {
    use crate::prompt::{Seed, ask};

    let (base, flags_options) = flag_settings(args, config, cwd);
    let seed = Seed {
        name: args.name.clone(),
        module_path: args.module.clone(),
        module_prefix: config.defaults.module_prefix.clone(),
        output_dir: args
            .output
            .as_deref()
            .map(|dir| absolutize(cwd, dir))
            .or_else(|| Some(base.output_path.clone())),
    };
    let answers = ask(seed, cwd, output)?;

    let settings = GeneratorSettings {
        project_name: answers.name,
        module_path: answers.module_path,
        output_path: answers.output_dir,
        language: answers.language.as_str().to_string(),
        use_cache: answers.cache,
        ..base
    };
    // Answers win over flags for output path and cache.
    let options = flags_options
        .into_iter()
        .filter(|o| !matches!(o, GeneratorOption::OutputPath(_) | GeneratorOption::WithCache))
        .collect();
    Ok((settings, options))
}

#[cfg(not(feature = "interactive"))]
fn questionnaire_settings(
    _args: &NewArgs,
    _config: &AppConfig,
    _cwd: &Path,
    _output: &OutputManager,
) -> CliResult<Resolved> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

#[cfg(feature = "interactive")]
fn confirm(project_path: &Path) -> CliResult<bool> {
    crate::prompt::confirm(project_path)
}

#[cfg(not(feature = "interactive"))]
fn confirm(_project_path: &Path) -> CliResult<bool> {
    Ok(true)
}

/// `<prefix>/<name>` when a prefix is configured, otherwise the bare name.
fn default_module_path(prefix: Option<&str>, name: &str) -> String {
    match prefix.map(|p| p.trim_end_matches('/')) {
        Some(prefix) if !prefix.is_empty() && !name.is_empty() => format!("{prefix}/{name}"),
        _ => name.to_string(),
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

fn show_summary(generator: &Generator, output: &OutputManager) -> CliResult<()> {
    let config = generator.config();
    let features = config.features();

    output.header("Project configuration")?;
    output.field("Name", config.name())?;
    output.field("Module", config.module_path())?;
    output.field("Path", &generator.project_path().display().to_string())?;
    output.field("Language", config.language().as_str())?;
    output.field("Database", config.database().as_str())?;
    output.field("Cache", if features.cache { "redis" } else { "none" })?;
    output.field(
        "Deployment",
        if features.docker {
            config.deployment().as_str()
        } else {
            "none"
        },
    )?;
    output.field("Modules", &generator.modules().join(", "))?;
    output.print("")?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct PlannedStep {
    label: String,
    dirs: Vec<&'static str>,
    files: Vec<&'static str>,
}

fn print_plan(generator: &Generator, output: &OutputManager) -> CliResult<()> {
    let steps: Vec<PlannedStep> = generator
        .plan()
        .into_iter()
        .map(|plan| PlannedStep {
            label: plan.label,
            dirs: plan.dirs,
            files: plan.files.iter().map(|f| f.path).collect(),
        })
        .collect();

    if output.format() == OutputFormat::Json {
        return output.json(&steps);
    }

    show_summary(generator, output)?;
    output.info(&format!(
        "Dry run: {} steps would write {} files under {}",
        steps.len(),
        steps.iter().map(|s| s.files.len()).sum::<usize>(),
        generator.project_path().display(),
    ))?;
    for (i, step) in steps.iter().enumerate() {
        output.print(&format!("{:>3}. {}", i + 1, step.label))?;
        for file in &step.files {
            output.print(&format!("       {file}"))?;
        }
    }
    Ok(())
}

fn print_success(
    generator: &Generator,
    result: &GenerationResult,
    output: &OutputManager,
) -> CliResult<()> {
    let config = generator.config();

    output.success(&format!(
        "Project '{}' created with {} files",
        config.name(),
        result.files().len()
    ))?;
    for step in result.skipped_steps() {
        output.warning(&format!("Skipped: {step}"))?;
    }

    output.print("")?;
    output.header("Next steps")?;
    for line in next_steps(result.project_path(), config.features().cache, config.features().docker) {
        output.print(&format!("  {line}"))?;
    }
    output.print("")?;
    output.info("Then visit http://localhost:8080/health")?;
    Ok(())
}

fn next_steps(project_path: &Path, cache: bool, docker: bool) -> Vec<String> {
    let mut steps = vec![format!("cd {}", project_path.display()), "go work sync".into()];
    if docker {
        let services = if cache { "postgres redis" } else { "postgres" };
        steps.push(format!("docker-compose up -d {services}"));
    }
    steps.push("go run ./cmd/api/main.go".into());
    steps
}
