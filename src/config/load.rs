use super::{ConfigError, ParameterRegistry, PathRegistry, Registries};
use crate::tools::load_yaml;
use serde_yaml::{Mapping, Value};
use std::path::Path;

pub const DEFAULT_PARAMETERS_FILE: &str = "parameters.yaml";
pub const PATHS_SECTION: &str = "PATHS";

pub fn load_registries(path: &Path) -> Result<Registries, ConfigError> {
    let mut document = load_yaml(path).map_err(|source| ConfigError::Load {
        path: path.display().to_string(),
        source,
    })?;
    let parse_error = |source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    };

    let paths = match document.remove(PATHS_SECTION) {
        None | Some(Value::Null) => PathRegistry::default(),
        Some(section) => serde_yaml::from_value(section).map_err(parse_error)?,
    };
    let parameters: ParameterRegistry =
        serde_yaml::from_value(Value::Mapping(document)).map_err(parse_error)?;
    Ok(Registries { parameters, paths })
}

pub fn registries_to_yaml(registries: &Registries) -> Result<String, serde_yaml::Error> {
    let mut document = match serde_yaml::to_value(&registries.parameters)? {
        Value::Mapping(mapping) => mapping,
        _ => Mapping::new(),
    };
    document.insert(
        Value::from(PATHS_SECTION),
        serde_yaml::to_value(&registries.paths)?,
    );
    serde_yaml::to_string(&document)
}
