use super::kwargs::OBJECTS_DIR;
use super::{io_error, SystemError};
use crate::config::{ParameterRegistry, PathRegistry, Registries};
use crate::shared::fs_atomic::atomic_write_file;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const PARAMETERS_CHECKPOINT: &str = "SeisflowsParameters.yaml";
pub const PATHS_CHECKPOINT: &str = "SeisflowsPaths.yaml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointFiles {
    pub parameters: PathBuf,
    pub paths: PathBuf,
}

impl CheckpointFiles {
    pub fn under(output: &Path) -> Self {
        let root = output.join(OBJECTS_DIR);
        Self {
            parameters: root.join(PARAMETERS_CHECKPOINT),
            paths: root.join(PATHS_CHECKPOINT),
        }
    }
}

pub fn save_checkpoint(
    output: &Path,
    registries: &Registries,
) -> Result<CheckpointFiles, SystemError> {
    let files = CheckpointFiles::under(output);
    write_yaml(&files.parameters, &registries.parameters)?;
    write_yaml(&files.paths, &registries.paths)?;
    Ok(files)
}

pub fn load_checkpoint(output: &Path) -> Result<Registries, SystemError> {
    let files = CheckpointFiles::under(output);
    let parameters: ParameterRegistry = read_yaml(&files.parameters)?;
    let paths: PathRegistry = read_yaml(&files.paths)?;
    Ok(Registries { parameters, paths })
}

// YAML keeps `.inf` parameters that JSON would write as null.
fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<(), SystemError> {
    let body = serde_yaml::to_string(value).map_err(|source| SystemError::Checkpoint {
        path: path.display().to_string(),
        source,
    })?;
    atomic_write_file(path, body.as_bytes()).map_err(|e| io_error(path, e))
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, SystemError> {
    let raw = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    serde_yaml::from_str(&raw).map_err(|source| SystemError::Checkpoint {
        path: path.display().to_string(),
        source,
    })
}
