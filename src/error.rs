use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while scaffolding a module.
///
/// `TemplateNotFound` and `WriteFailure` are scoped to a single
/// (module, template) unit and end up inside a failed outcome.
/// `TemplatesDirMissing` aborts a whole batch before any unit runs.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Template '{template}' not found at {path:?}: {reason}")]
    TemplateNotFound {
        template: String,
        path: PathBuf,
        reason: String,
    },
    #[error("Failed to write {path:?}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Templates directory does not exist: {0:?}")]
    TemplatesDirMissing(PathBuf),
}
