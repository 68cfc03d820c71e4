#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{env, path::PathBuf, sync::OnceLock};

use crate::export::DEFAULT_TITLE;

/// Export destination settings sourced from the environment.
pub struct ExportEnv {
    /// Directory export payloads are written into.
    output_dir:    PathBuf,
    /// Title used when the caller supplies none.
    default_title: String,
}

impl ExportEnv {
    /// Builds the bundle from environment-provided values, falling back to
    /// the current directory and the default title literal.
    fn from_env() -> Self {
        let output_dir = env::var("SCORECARD_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        let default_title =
            env::var("SCORECARD_TITLE").unwrap_or_else(|_| DEFAULT_TITLE.to_string());
        Self {
            output_dir,
            default_title,
        }
    }

    /// Directory export payloads are written into.
    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    /// Title used when the caller supplies none.
    pub fn default_title(&self) -> &str {
        &self.default_title
    }
}

/// Lazily initialized export environment.
static EXPORT_ENV: OnceLock<ExportEnv> = OnceLock::new();

/// Returns the process-wide export environment, reading it on first use.
pub fn export_env() -> &'static ExportEnv {
    EXPORT_ENV.get_or_init(ExportEnv::from_env)
}
