//! One module per subcommand. Handlers translate arguments, call the core,
//! and print results; no generation logic lives here.

pub mod completions;
pub mod config;
pub mod init;
pub mod modules;
pub mod new;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use strata_adapters::{DirectoryPayloadStore, EmbeddedPayloadStore, LayeredPayloadStore};
use strata_core::application::{GeneratorOption, PayloadStore};
use tracing::info;

use crate::cli::ProjectFlags;
use crate::error::CliResult;

/// Built-in payloads, with `overrides` layered on top when given.
pub(crate) fn payload_store(overrides: Option<&Path>) -> CliResult<Arc<dyn PayloadStore>> {
    let Some(dir) = overrides else {
        return Ok(Arc::new(EmbeddedPayloadStore::new()));
    };

    let directory = DirectoryPayloadStore::open(dir)?;
    info!(
        root = %directory.root().display(),
        payloads = directory.len(),
        manifest = directory.manifest().map(|m| m.name.as_str()).unwrap_or("-"),
        "using payload overrides"
    );

    Ok(Arc::new(
        LayeredPayloadStore::new()
            .with_layer(Arc::new(directory))
            .with_layer(Arc::new(EmbeddedPayloadStore::new())),
    ))
}

/// Generator options for the feature flags on the command line.
pub(crate) fn feature_options(flags: &ProjectFlags) -> Vec<GeneratorOption> {
    let mut options = Vec::new();
    if flags.cache {
        options.push(GeneratorOption::WithCache);
    }
    if flags.no_docker {
        options.push(GeneratorOption::WithoutDocker);
    }
    if flags.no_example {
        options.push(GeneratorOption::WithoutExampleModule);
    }
    options
}

/// `path` resolved against `cwd` when relative.
pub(crate) fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(cache: bool, no_docker: bool, no_example: bool) -> ProjectFlags {
        ProjectFlags {
            language: None,
            cache,
            no_docker,
            no_example,
        }
    }

    #[test]
    fn no_flags_no_options() {
        assert!(feature_options(&flags(false, false, false)).is_empty());
    }

    #[test]
    fn every_flag_maps_to_an_option() {
        assert_eq!(
            feature_options(&flags(true, true, true)),
            vec![
                GeneratorOption::WithCache,
                GeneratorOption::WithoutDocker,
                GeneratorOption::WithoutExampleModule,
            ]
        );
    }

    #[test]
    fn relative_paths_join_cwd() {
        assert_eq!(
            absolutize(Path::new("/work"), Path::new("out")),
            PathBuf::from("/work/out")
        );
        assert_eq!(
            absolutize(Path::new("/work"), Path::new("/abs")),
            PathBuf::from("/abs")
        );
    }

    #[test]
    fn missing_override_dir_is_configuration_error() {
        let err = payload_store(Some(Path::new("/no/such/payloads"))).err().unwrap();
        assert_eq!(err.exit_code(), 4);
    }
}
