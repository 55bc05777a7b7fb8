use super::{io_error, SystemError, TaskInvocation};
use crate::shared::fs_atomic::atomic_write_file;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const OBJECTS_DIR: &str = "SeisflowsObjects";

pub fn kwargs_dir(output: &Path, classname: &str) -> PathBuf {
    output.join(OBJECTS_DIR).join(format!("{classname}_kwargs"))
}

pub fn kwargs_path(output: &Path, classname: &str, funcname: &str) -> PathBuf {
    kwargs_dir(output, classname).join(format!("{funcname}.p"))
}

pub fn save_kwargs(output: &Path, invocation: &TaskInvocation) -> Result<PathBuf, SystemError> {
    let path = kwargs_path(output, &invocation.classname, &invocation.funcname);
    let body =
        serde_json::to_vec_pretty(&invocation.kwargs).map_err(|source| SystemError::Encode {
            path: path.display().to_string(),
            source,
        })?;
    atomic_write_file(&path, &body).map_err(|e| io_error(&path, e))?;
    Ok(path)
}

pub fn load_kwargs(
    output: &Path,
    classname: &str,
    funcname: &str,
) -> Result<Map<String, Value>, SystemError> {
    let path = kwargs_path(output, classname, funcname);
    let raw = fs::read(&path).map_err(|e| io_error(&path, e))?;
    serde_json::from_slice(&raw).map_err(|source| SystemError::Decode {
        path: path.display().to_string(),
        source,
    })
}
