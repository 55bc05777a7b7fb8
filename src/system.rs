use crate::config::ConfigError;
use crate::tools::ToolsError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub mod checkpoint;
pub mod invocation;
pub mod kwargs;
pub mod launcher;
pub mod mpi;
pub mod rank;

pub use checkpoint::{load_checkpoint, save_checkpoint, CheckpointFiles};
pub use invocation::{build_launch, ENTRY_SCRIPT_ALL, ENTRY_SCRIPT_HEAD};
pub use kwargs::{kwargs_path, load_kwargs, save_kwargs, OBJECTS_DIR};
pub use launcher::run_launcher;
pub use mpi::{MpiSystem, Workflow};
pub use rank::{rank_from_env, task_rank, RANK_ENV_VARS};

#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    #[error("hosts `{0}` not recognized; expected `all` or `head`")]
    InvalidHosts(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Tools(#[from] ToolsError),
    #[error("io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write or read checkpoint {path}: {source}")]
    Checkpoint {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("launcher binary missing: {binary}")]
    MissingLauncher { binary: String },
    #[error("launcher `{command_form}` failed ({status})")]
    LauncherExit {
        command_form: String,
        status: String,
        exit_code: Option<i32>,
    },
    #[error("workflow failed: {0}")]
    Workflow(String),
    #[error("invalid task rank in {var}: `{value}`")]
    InvalidRank { var: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hosts {
    All,
    Head,
}

impl std::fmt::Display for Hosts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hosts::All => write!(f, "all"),
            Hosts::Head => write!(f, "head"),
        }
    }
}

impl TryFrom<&str> for Hosts {
    type Error = SystemError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "all" => Ok(Self::All),
            "head" => Ok(Self::Head),
            other => Err(SystemError::InvalidHosts(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskInvocation {
    pub classname: String,
    pub funcname: String,
    pub kwargs: Map<String, Value>,
}

impl TaskInvocation {
    pub fn new(
        classname: impl Into<String>,
        funcname: impl Into<String>,
        kwargs: Map<String, Value>,
    ) -> Self {
        Self {
            classname: classname.into(),
            funcname: funcname.into(),
            kwargs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub binary: String,
    pub args: Vec<String>,
    pub working_directory: PathBuf,
}

impl LaunchSpec {
    pub fn command_form(&self) -> String {
        std::iter::once(self.binary.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    pub command_form: String,
    pub working_directory: PathBuf,
    pub exit_code: Option<i32>,
}

pub(crate) fn io_error(path: &Path, source: std::io::Error) -> SystemError {
    SystemError::Io {
        path: path.display().to_string(),
        source,
    }
}
