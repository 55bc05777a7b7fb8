use crate::tools::ToolsError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load parameters from {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: ToolsError,
    },
    #[error("invalid parameters in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("parameter validation failed: {0}")]
    Invalid(String),
    #[error(
        "SYSTEM `{system}` requires an MPI runtime but launcher `{launcher}` was not found; install MPI or choose a different SYSTEM"
    )]
    MpiUnavailable { system: String, launcher: String },
    #[error(
        "SYSTEM `{system}` cannot run tasks with NPROC > 1 (NPROC = {nproc}); choose a different SYSTEM for multi-process tasks"
    )]
    MultiprocessUnsupported { system: String, nproc: u32 },
}
