use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Verbosity(pub u8);

impl Verbosity {
    pub fn is_enabled(self) -> bool {
        self.0 > 0
    }
}

impl<'de> Deserialize<'de> for Verbosity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Bool(flag) => Ok(Self(u8::from(flag))),
            Value::Number(number) => number
                .as_u64()
                .and_then(|raw| u8::try_from(raw).ok())
                .map(Self)
                .ok_or_else(|| D::Error::custom("VERBOSE must be a small non-negative integer")),
            _ => Err(D::Error::custom("VERBOSE must be a boolean or integer")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterRegistry {
    #[serde(rename = "TITLE", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "NTASK", default, skip_serializing_if = "Option::is_none")]
    pub ntask: Option<u32>,
    #[serde(rename = "NPROC", default, skip_serializing_if = "Option::is_none")]
    pub nproc: Option<u32>,
    #[serde(rename = "VERBOSE", default, skip_serializing_if = "Option::is_none")]
    pub verbose: Option<Verbosity>,
    #[serde(rename = "MPIARGS", default, skip_serializing_if = "Option::is_none")]
    pub mpiargs: Option<String>,
    #[serde(rename = "SYSTEM", default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(rename = "MPIEXEC", default, skip_serializing_if = "Option::is_none")]
    pub mpiexec: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathRegistry {
    #[serde(rename = "SCRATCH", default, skip_serializing_if = "Option::is_none")]
    pub scratch: Option<PathBuf>,
    #[serde(rename = "LOCAL", default, skip_serializing_if = "Option::is_none")]
    pub local: Option<PathBuf>,
    #[serde(rename = "SUBMIT", default, skip_serializing_if = "Option::is_none")]
    pub submit: Option<PathBuf>,
    #[serde(rename = "OUTPUT", default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(rename = "WRAPPERS", default, skip_serializing_if = "Option::is_none")]
    pub wrappers: Option<PathBuf>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registries {
    pub parameters: ParameterRegistry,
    pub paths: PathRegistry,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub title: String,
    pub ntask: u32,
    pub nproc: u32,
    pub verbose: Verbosity,
    pub mpiargs: String,
    pub system: String,
    pub mpiexec: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paths {
    pub scratch: PathBuf,
    pub local: Option<PathBuf>,
    pub submit: PathBuf,
    pub output: PathBuf,
    pub wrappers: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfig {
    pub parameters: Parameters,
    pub paths: Paths,
    pub registries: Registries,
}

impl SystemConfig {
    pub fn mpiargs(&self) -> Vec<String> {
        self.parameters
            .mpiargs
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}
