//! Generator - the programmatic entry point.
//!
//! ```text
//! GeneratorSettings ─options─▶ ProjectConfig ─stack_for─▶ ProjectGenerator
//!                                     │                         │ plan
//!                                     ▼                         ▼
//!                              BindingContext ──▶ Pipeline(Step per StepPlan)
//!                                                   │ TemplateEngine
//!                                                   ▼ ProjectWriter
//!                                               GenerationResult
//! ```
//!
//! A `Generator` is validated once at construction. Every call to
//! [`Generator::generate`] builds a fresh engine, context, writer and
//! pipeline; nothing survives between runs.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        pipeline::{Pipeline, Step},
        ports::{Filesystem, PayloadKey, PayloadStore, ProgressSink},
        stacks::{PayloadMode, ProjectGenerator, StepPlan, stack_for},
        writer::ProjectWriter,
    },
    domain::{BindingContext, Language, ProjectConfig, RelativePath, TemplateEngine},
    error::StrataResult,
};

// ── Settings & options ────────────────────────────────────────────────────────

/// Plain settings record accepted by [`Generator::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub project_name: String,
    pub module_path: String,
    pub output_path: PathBuf,
    /// Empty means `go`.
    pub language: String,
    pub use_cache: bool,
    pub docker: bool,
    pub example_module: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            module_path: String::new(),
            output_path: PathBuf::new(),
            language: Language::default().to_string(),
            use_cache: false,
            docker: true,
            example_module: true,
        }
    }
}

impl GeneratorSettings {
    pub fn new(
        project_name: impl Into<String>,
        module_path: impl Into<String>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            module_path: module_path.into(),
            output_path: output_path.into(),
            ..Self::default()
        }
    }

    fn into_config(self) -> StrataResult<ProjectConfig> {
        let language = if self.language.trim().is_empty() {
            Language::default()
        } else {
            self.language.parse()?
        };

        Ok(ProjectConfig::builder()
            .name(self.project_name)
            .module_path(self.module_path)
            .output_dir(self.output_path)
            .language(language)
            .cache(self.use_cache)
            .docker(self.docker)
            .example_module(self.example_module)
            .build()?)
    }
}

/// Overrides applied to [`GeneratorSettings`], in order, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorOption {
    WithoutDocker,
    WithoutExampleModule,
    WithCache,
    OutputPath(PathBuf),
}

impl GeneratorOption {
    fn apply(self, settings: &mut GeneratorSettings) {
        match self {
            Self::WithoutDocker => settings.docker = false,
            Self::WithoutExampleModule => settings.example_module = false,
            Self::WithCache => settings.use_cache = true,
            Self::OutputPath(path) => settings.output_path = path,
        }
    }
}

/// Driven adapters a generator runs against.
#[derive(Clone)]
pub struct Ports {
    pub filesystem: Arc<dyn Filesystem>,
    pub payloads: Arc<dyn PayloadStore>,
    pub progress: Arc<dyn ProgressSink>,
}

impl fmt::Debug for Ports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ports").finish_non_exhaustive()
    }
}

// ── Result ────────────────────────────────────────────────────────────────────

/// Outcome of a completed run. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    project_path: PathBuf,
    modules: Vec<String>,
    files: Vec<PathBuf>,
    skipped_steps: Vec<String>,
    generated_at: DateTime<Utc>,
}

impl GenerationResult {
    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    /// Logical module names, e.g. `bom`, `share`, `user`, `api`, `cmd`.
    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    /// Absolute paths of every file written, in write order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Labels of tolerant steps whose template errors were skipped.
    pub fn skipped_steps(&self) -> &[String] {
        &self.skipped_steps
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }
}

// ── Generator ─────────────────────────────────────────────────────────────────

pub struct Generator {
    config: ProjectConfig,
    stack: Box<dyn ProjectGenerator>,
    ports: Ports,
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("config", &self.config)
            .field("language", &self.stack.language())
            .finish_non_exhaustive()
    }
}

impl Generator {
    /// Apply `options`, validate, select the stack, check the target is free.
    ///
    /// # Errors
    ///
    /// - Validation: missing or malformed name, module path, output path, language
    /// - Unsupported: the language has no generator
    /// - Precondition: `<output>/<name>` already exists
    #[instrument(skip_all, fields(project = %settings.project_name))]
    pub fn new(
        mut settings: GeneratorSettings,
        options: impl IntoIterator<Item = GeneratorOption>,
        ports: Ports,
    ) -> StrataResult<Self> {
        for option in options {
            option.apply(&mut settings);
        }
        Self::from_config(settings.into_config()?, ports)
    }

    /// Build from an already validated configuration.
    pub fn from_config(config: ProjectConfig, ports: Ports) -> StrataResult<Self> {
        let stack = stack_for(config.language())?;
        let generator = Self {
            config,
            stack,
            ports,
        };
        generator.ensure_target_free()?;
        debug!(config = %generator.config, "generator ready");
        Ok(generator)
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// `<output>/<name>`.
    pub fn project_path(&self) -> PathBuf {
        self.config.project_dir()
    }

    /// The ordered step plans a run would execute.
    pub fn plan(&self) -> Vec<StepPlan> {
        self.stack.plan(&self.config)
    }

    pub fn modules(&self) -> Vec<&'static str> {
        self.stack.modules(&self.config)
    }

    /// Run the pipeline.
    ///
    /// On failure, files written by earlier steps are left on disk and the
    /// error names the failing step.
    #[instrument(
        skip_all,
        fields(
            run_id = %Uuid::new_v4(),
            project = %self.config.name(),
            language = %self.config.language(),
        )
    )]
    pub fn generate(&self) -> StrataResult<GenerationResult> {
        self.ensure_target_free()?;

        let project_path = self.project_path();
        let language = self.stack.language();
        let engine = TemplateEngine::new();
        let context = BindingContext::for_project(&self.config);
        let writer = ProjectWriter::new(&project_path, Arc::clone(&self.ports.filesystem));
        let payloads: &dyn PayloadStore = self.ports.payloads.as_ref();

        let mut pipeline = Pipeline::new();
        for plan in self.plan() {
            let (engine, context, writer) = (&engine, &context, &writer);
            let label = plan.label.clone();
            let policy = plan.policy;
            pipeline.push(
                Step::new(label, move || {
                    execute(&plan, language, engine, context, writer, payloads)
                })
                .with_policy(policy),
            );
        }

        info!(steps = pipeline.len(), path = %project_path.display(), "generating project");
        let report = pipeline.run(self.ports.progress.as_ref())?;

        let result = GenerationResult {
            project_path,
            modules: self.modules().into_iter().map(String::from).collect(),
            files: writer.written(),
            skipped_steps: report.tolerated().iter().map(|(l, _)| l.clone()).collect(),
            generated_at: Utc::now(),
        };

        info!(
            files = result.files.len(),
            modules = result.modules.len(),
            elapsed_ms = report.elapsed().as_millis() as u64,
            "project generated"
        );
        Ok(result)
    }

    fn ensure_target_free(&self) -> StrataResult<()> {
        let path = self.project_path();
        if self.ports.filesystem.exists(&path) {
            return Err(ApplicationError::ProjectExists { path }.into());
        }
        Ok(())
    }
}

/// Carry out one step plan: directories first, then files in order.
fn execute(
    plan: &StepPlan,
    language: Language,
    engine: &TemplateEngine,
    context: &BindingContext,
    writer: &ProjectWriter,
    payloads: &dyn PayloadStore,
) -> StrataResult<()> {
    for dir in &plan.dirs {
        writer.create_dir(dir)?;
    }

    for file in &plan.files {
        let path = RelativePath::try_new(file.path)?;
        let payload = payloads.load(&PayloadKey::new(language, &path))?;
        let content = match file.mode {
            PayloadMode::Render => {
                debug!(%path, "rendering payload");
                engine.render(&payload, context)?
            }
            PayloadMode::Verbatim => payload,
        };
        writer.write(path.as_path(), &content)?;
    }

    Ok(())
}
