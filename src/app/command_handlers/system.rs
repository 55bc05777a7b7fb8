use crate::app::cli::GlobalOptions;
use crate::config::{load_registries, registries_to_yaml};
use crate::system::{MpiSystem, Workflow};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::process::Command;

pub const DRIVER_SCRIPT: &str = "driver";

pub fn load_system(options: &GlobalOptions) -> Result<MpiSystem, String> {
    let parameters_file = std::path::absolute(&options.parameters_file)
        .map_err(|e| format!("failed to resolve {}: {e}", options.parameters_file.display()))?;
    let mut registries = load_registries(&parameters_file).map_err(|e| e.to_string())?;
    let cwd = parameters_file
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| format!("{} has no parent directory", parameters_file.display()))?;
    MpiSystem::check(&mut registries, &cwd).map_err(|e| e.to_string())
}

pub fn cmd_check(options: &GlobalOptions) -> Result<String, String> {
    let system = load_system(options)?;
    let rendered =
        registries_to_yaml(&system.config().registries).map_err(|e| e.to_string())?;
    Ok(format!("configuration ok\n{}", rendered.trim_end()))
}

pub fn cmd_run(options: &GlobalOptions, args: &[String]) -> Result<String, String> {
    let request = parse_run_args(args)?;
    let system = load_system(options)?;
    let report = system
        .run(
            &request.classname,
            &request.funcname,
            &request.hosts,
            request.kwargs,
        )
        .map_err(|e| e.to_string())?;

    let mut lines = vec![format!(
        "dispatched {}.{} on {}",
        request.classname, request.funcname, request.hosts
    )];
    if system.config().parameters.verbose.is_enabled() {
        lines.push(format!("command={}", report.command_form));
    }
    lines.push(format!(
        "exit_code={}",
        report
            .exit_code
            .map(|code| code.to_string())
            .unwrap_or_else(|| "none".to_string())
    ));
    Ok(lines.join("\n"))
}

pub fn cmd_submit(options: &GlobalOptions) -> Result<String, String> {
    let system = load_system(options)?;
    let mut driver = DriverScript {
        path: system.config().paths.wrappers.join(DRIVER_SCRIPT),
    };
    system.submit(&mut driver).map_err(|e| e.to_string())?;
    Ok(format!(
        "workflow `{}` completed\noutput={}",
        system.config().parameters.title,
        system.output().display()
    ))
}

struct DriverScript {
    path: PathBuf,
}

impl Workflow for DriverScript {
    fn main(&mut self, system: &MpiSystem) -> Result<(), String> {
        let status = Command::new(&self.path)
            .arg(system.output())
            .status()
            .map_err(|e| format!("failed to start driver {}: {e}", self.path.display()))?;
        if status.success() {
            Ok(())
        } else {
            Err(format!("driver {} exited with {status}", self.path.display()))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest {
    pub classname: String,
    pub funcname: String,
    pub hosts: String,
    pub kwargs: Map<String, Value>,
}

pub fn parse_run_args(args: &[String]) -> Result<RunRequest, String> {
    let usage = "usage: run <class> <func> [--hosts all|head] [key=value ...]";
    let (classname, funcname) = match args {
        [classname, funcname, ..] => (classname.clone(), funcname.clone()),
        _ => return Err(usage.to_string()),
    };

    let mut hosts = "all".to_string();
    let mut kwargs = Map::new();
    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        if arg == "--hosts" {
            hosts = rest
                .next()
                .ok_or_else(|| "--hosts requires a value".to_string())?
                .clone();
            continue;
        }
        let (key, raw) = arg
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got `{arg}`\n{usage}"))?;
        if key.is_empty() {
            return Err(format!("empty key in `{arg}`"));
        }
        kwargs.insert(key.to_string(), parse_kwarg_value(key, raw)?);
    }

    Ok(RunRequest {
        classname,
        funcname,
        hosts,
        kwargs,
    })
}

fn parse_kwarg_value(key: &str, raw: &str) -> Result<Value, String> {
    if raw.trim().is_empty() {
        return Ok(Value::String(raw.to_string()));
    }
    let Ok(parsed) = serde_yaml::from_str::<serde_yaml::Value>(raw) else {
        return Ok(Value::String(raw.to_string()));
    };
    // JSON has no infinity or nan; they would be stored as null
    if has_non_finite(&parsed) {
        return Err(format!("kwarg `{key}` must be finite, got `{raw}`"));
    }
    serde_json::to_value(&parsed).map_err(|err| format!("kwarg `{key}` is not valid JSON: {err}"))
}

fn has_non_finite(value: &serde_yaml::Value) -> bool {
    match value {
        serde_yaml::Value::Number(number) => number.as_f64().is_some_and(|v| !v.is_finite()),
        serde_yaml::Value::Sequence(items) => items.iter().any(has_non_finite),
        serde_yaml::Value::Mapping(mapping) => mapping.values().any(has_non_finite),
        serde_yaml::Value::Tagged(tagged) => has_non_finite(&tagged.value),
        _ => false,
    }
}
