use std::path::Path;

pub mod collections;
pub mod nproc;
pub mod text;
pub mod unix;
pub mod yaml;

pub use collections::{diff, divides, exists, getset, intersect, iterable, parse_null, OneOrMany};
pub use nproc::nproc;
pub use text::{format_exponent, loadtxt, number_fid, savetxt, timestamp};
pub use yaml::load_yaml;

#[derive(Debug, thiserror::Error)]
pub enum ToolsError {
    #[error("io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid yaml in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("yaml document {path} must be a mapping of keys to values")]
    NotAMapping { path: String },
    #[error("source {path} does not exist")]
    MissingSource { path: String },
    #[error("path {path} has no final component")]
    NoBasename { path: String },
    #[error("destination {path} must be an existing directory when given multiple sources")]
    NotADirectory { path: String },
    #[error("failed to parse scalar from {path}: `{value}`")]
    ParseScalar { path: String, value: String },
    #[error("input closed before a valid selection was made")]
    NoInput,
    #[error("unable to determine hostname")]
    Hostname,
    #[error("unable to determine processor count")]
    ProcessorCount,
}

pub(crate) fn io_error(path: &Path, source: std::io::Error) -> ToolsError {
    ToolsError::Io {
        path: path.display().to_string(),
        source,
    }
}
