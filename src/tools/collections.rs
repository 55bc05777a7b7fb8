use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> Self {
        OneOrMany::Many(values)
    }
}

impl<T: Clone> From<&[T]> for OneOrMany<T> {
    fn from(values: &[T]) -> Self {
        OneOrMany::Many(values.to_vec())
    }
}

impl From<PathBuf> for OneOrMany<PathBuf> {
    fn from(value: PathBuf) -> Self {
        OneOrMany::One(value)
    }
}

impl From<&PathBuf> for OneOrMany<PathBuf> {
    fn from(value: &PathBuf) -> Self {
        OneOrMany::One(value.clone())
    }
}

impl From<&Path> for OneOrMany<PathBuf> {
    fn from(value: &Path) -> Self {
        OneOrMany::One(value.to_path_buf())
    }
}

impl From<&str> for OneOrMany<PathBuf> {
    fn from(value: &str) -> Self {
        OneOrMany::One(PathBuf::from(value))
    }
}

impl From<String> for OneOrMany<String> {
    fn from(value: String) -> Self {
        OneOrMany::One(value)
    }
}

impl From<&str> for OneOrMany<String> {
    fn from(value: &str) -> Self {
        OneOrMany::One(value.to_string())
    }
}

pub fn iterable<T>(arg: impl Into<OneOrMany<T>>) -> Vec<T> {
    arg.into().into_vec()
}

pub fn diff<T: Ord + Clone>(left: &[T], right: &[T]) -> Vec<T> {
    let left: BTreeSet<T> = left.iter().cloned().collect();
    let right: BTreeSet<T> = right.iter().cloned().collect();
    left.symmetric_difference(&right).cloned().collect()
}

pub fn intersect<T: Ord + Clone>(left: &[T], right: &[T]) -> Vec<T> {
    let left: BTreeSet<T> = left.iter().cloned().collect();
    let right: BTreeSet<T> = right.iter().cloned().collect();
    left.intersection(&right).cloned().collect()
}

pub fn divides(i: i64, j: i64) -> bool {
    j != 0 && i % j == 0
}

pub fn exists(names: impl Into<OneOrMany<PathBuf>>) -> bool {
    iterable(names)
        .iter()
        .all(|name| !name.as_os_str().is_empty() && name.exists())
}

pub fn getset(arg: Option<OneOrMany<String>>) -> BTreeSet<String> {
    match arg {
        None => BTreeSet::new(),
        Some(OneOrMany::One(value)) if value.is_empty() => BTreeSet::new(),
        Some(values) => values.into_vec().into_iter().collect(),
    }
}

pub fn parse_null(mapping: &Mapping) -> Mapping {
    mapping
        .iter()
        .filter(|(_, value)| match value {
            Value::Null => false,
            Value::String(raw) => !raw.is_empty(),
            _ => true,
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
