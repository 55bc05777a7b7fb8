use crate::system::{load_kwargs, task_rank};
use crate::tools::nproc;
use std::path::Path;

pub fn cmd_kwargs(args: &[String]) -> Result<String, String> {
    let [output, classname, funcname] = args else {
        return Err("usage: kwargs <output> <class> <func>".to_string());
    };
    let kwargs = load_kwargs(Path::new(output), classname, funcname).map_err(|e| e.to_string())?;
    serde_json::to_string_pretty(&kwargs).map_err(|e| e.to_string())
}

pub fn cmd_rank() -> Result<String, String> {
    task_rank()
        .map(|rank| rank.to_string())
        .map_err(|e| e.to_string())
}

pub fn cmd_nproc() -> Result<String, String> {
    nproc().map(|count| count.to_string()).map_err(|e| e.to_string())
}
