//! Implementation of the `strata modules` command: what a project would get.

use serde::Serialize;

use strata_core::{
    application::{FailurePolicy, StepPlan, stack_for},
    domain::{FeatureFlags, Language, ProjectConfig},
    error::StrataError,
};

use crate::{
    cli::{ModulesArgs, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Placeholder used only to evaluate the plan; nothing is written.
const SAMPLE_NAME: &str = "example";

#[derive(Debug, Serialize)]
struct ModuleListing {
    language: Language,
    modules: Vec<&'static str>,
    steps: Vec<StepListing>,
}

#[derive(Debug, Serialize)]
struct StepListing {
    label: String,
    tolerant: bool,
    files: Vec<&'static str>,
}

pub fn execute(args: ModulesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let listing = listing(&args, &config)?;

    if output.format() == OutputFormat::Json {
        return output.json(&listing);
    }

    output.header(&format!("{} project layout", listing.language))?;
    output.field("Modules", &listing.modules.join(", "))?;
    output.print("")?;
    for (i, step) in listing.steps.iter().enumerate() {
        let suffix = if step.tolerant { " (optional)" } else { "" };
        output.print(&format!("{:>3}. {}{suffix}", i + 1, step.label))?;
        if args.files {
            for file in &step.files {
                output.print(&format!("       {file}"))?;
            }
        }
    }
    Ok(())
}

fn listing(args: &ModulesArgs, config: &AppConfig) -> CliResult<ModuleListing> {
    let language = match args.project.language {
        Some(lang) => lang.as_str().parse::<Language>(),
        None => config.defaults.language.parse::<Language>(),
    }
    .map_err(StrataError::from)?;

    let flags = FeatureFlags {
        cache: config.defaults.cache || args.project.cache,
        docker: config.defaults.docker && !args.project.no_docker,
        example_module: config.defaults.example_module && !args.project.no_example,
    };

    let project = ProjectConfig::builder()
        .name(SAMPLE_NAME)
        .output_dir(".")
        .language(language)
        .features(flags)
        .build()
        .map_err(StrataError::from)?;
    let stack = stack_for(language).map_err(StrataError::from)?;

    Ok(ModuleListing {
        language,
        modules: stack.modules(&project),
        steps: stack.plan(&project).into_iter().map(step_listing).collect(),
    })
}

fn step_listing(plan: StepPlan) -> StepListing {
    StepListing {
        tolerant: plan.policy == FailurePolicy::Tolerate,
        files: plan.files.iter().map(|f| f.path).collect(),
        label: plan.label,
    }
}
