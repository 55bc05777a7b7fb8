use super::{ConfigError, Parameters, Paths, Registries, SystemConfig, Verbosity};
use crate::tools::unix::which;
use std::path::{Path, PathBuf};

pub const DEFAULT_NTASK: u32 = 1;
pub const DEFAULT_NPROC: u32 = 1;
pub const DEFAULT_VERBOSE: Verbosity = Verbosity(1);
pub const DEFAULT_MPIARGS: &str = "--mca mpi_warn_on_fork 0";
pub const DEFAULT_SYSTEM: &str = "mpi";
pub const DEFAULT_MPIEXEC: &str = "mpiexec";

pub fn check(registries: &mut Registries, cwd: &Path) -> Result<SystemConfig, ConfigError> {
    fill_defaults(registries, cwd);
    let config = resolve(registries, cwd)?;
    check_mpi(&config)?;
    Ok(config)
}

pub fn fill_defaults(registries: &mut Registries, cwd: &Path) {
    let parameters = &mut registries.parameters;
    parameters.title.get_or_insert_with(|| {
        cwd.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    parameters.ntask.get_or_insert(DEFAULT_NTASK);
    parameters.nproc.get_or_insert(DEFAULT_NPROC);
    parameters.verbose.get_or_insert(DEFAULT_VERBOSE);
    parameters
        .mpiargs
        .get_or_insert_with(|| DEFAULT_MPIARGS.to_string());
    parameters
        .system
        .get_or_insert_with(|| DEFAULT_SYSTEM.to_string());
    parameters
        .mpiexec
        .get_or_insert_with(|| DEFAULT_MPIEXEC.to_string());

    let paths = &mut registries.paths;
    paths.scratch.get_or_insert_with(|| cwd.join("scratch"));
    paths.local.get_or_insert_with(PathBuf::new);
    let submit = paths.submit.get_or_insert_with(|| cwd.to_path_buf()).clone();
    paths.output.get_or_insert_with(|| submit.join("output"));
    paths.wrappers.get_or_insert_with(|| submit.join("wrappers"));
}

pub fn resolve(registries: &Registries, cwd: &Path) -> Result<SystemConfig, ConfigError> {
    let raw = &registries.parameters;
    let ntask = positive("NTASK", raw.ntask)?;
    let nproc = positive("NPROC", raw.nproc)?;
    let parameters = Parameters {
        title: required("TITLE", raw.title.clone())?,
        ntask,
        nproc,
        verbose: raw.verbose.unwrap_or(DEFAULT_VERBOSE),
        mpiargs: required("MPIARGS", raw.mpiargs.clone())?,
        system: required("SYSTEM", raw.system.clone())?,
        mpiexec: required("MPIEXEC", raw.mpiexec.clone())?,
    };
    if parameters.mpiexec.trim().is_empty() {
        return Err(ConfigError::Invalid("MPIEXEC must be non-empty".to_string()));
    }

    let raw = &registries.paths;
    let paths = Paths {
        scratch: absolute(cwd, required("SCRATCH", raw.scratch.clone())?),
        local: raw
            .local
            .clone()
            .filter(|local| !local.as_os_str().is_empty())
            .map(|local| absolute(cwd, local)),
        submit: absolute(cwd, required("SUBMIT", raw.submit.clone())?),
        output: absolute(cwd, required("OUTPUT", raw.output.clone())?),
        wrappers: absolute(cwd, required("WRAPPERS", raw.wrappers.clone())?),
    };

    Ok(SystemConfig {
        parameters,
        paths,
        registries: registries.clone(),
    })
}

pub fn check_mpi(config: &SystemConfig) -> Result<(), ConfigError> {
    let parameters = &config.parameters;
    if which(&parameters.mpiexec).is_none() {
        return Err(ConfigError::MpiUnavailable {
            system: parameters.system.clone(),
            launcher: parameters.mpiexec.clone(),
        });
    }
    if parameters.nproc > 1 {
        return Err(ConfigError::MultiprocessUnsupported {
            system: parameters.system.clone(),
            nproc: parameters.nproc,
        });
    }
    Ok(())
}

fn required<T>(key: &str, value: Option<T>) -> Result<T, ConfigError> {
    value.ok_or_else(|| ConfigError::Invalid(format!("{key} is not set")))
}

fn positive(key: &str, value: Option<u32>) -> Result<u32, ConfigError> {
    match required(key, value)? {
        0 => Err(ConfigError::Invalid(format!(
            "{key} must be a positive integer"
        ))),
        value => Ok(value),
    }
}

fn absolute(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ParameterRegistry, PathRegistry};

    #[test]
    fn defaults_fill_every_absent_key() {
        let mut registries = Registries::default();
        fill_defaults(&mut registries, Path::new("/work/marmousi"));

        let parameters = &registries.parameters;
        assert_eq!(parameters.title.as_deref(), Some("marmousi"));
        assert_eq!(parameters.ntask, Some(1));
        assert_eq!(parameters.nproc, Some(1));
        assert_eq!(parameters.verbose, Some(Verbosity(1)));
        assert_eq!(
            parameters.mpiargs.as_deref(),
            Some("--mca mpi_warn_on_fork 0")
        );

        let paths = &registries.paths;
        assert_eq!(
            paths.scratch.as_deref(),
            Some(Path::new("/work/marmousi/scratch"))
        );
        assert_eq!(paths.local.as_deref(), Some(Path::new("")));
        assert_eq!(paths.submit.as_deref(), Some(Path::new("/work/marmousi")));
        assert_eq!(
            paths.output.as_deref(),
            Some(Path::new("/work/marmousi/output"))
        );
    }

    #[test]
    fn present_keys_are_left_untouched() {
        let mut registries = Registries {
            parameters: ParameterRegistry {
                title: Some("custom".to_string()),
                ntask: Some(8),
                mpiargs: Some("--oversubscribe".to_string()),
                ..ParameterRegistry::default()
            },
            paths: PathRegistry {
                submit: Some(PathBuf::from("/data/run")),
                local: Some(PathBuf::from("/tmp/local")),
                ..PathRegistry::default()
            },
        };
        fill_defaults(&mut registries, Path::new("/elsewhere"));

        assert_eq!(registries.parameters.title.as_deref(), Some("custom"));
        assert_eq!(registries.parameters.ntask, Some(8));
        assert_eq!(
            registries.parameters.mpiargs.as_deref(),
            Some("--oversubscribe")
        );
        assert_eq!(
            registries.paths.local.as_deref(),
            Some(Path::new("/tmp/local"))
        );
        assert_eq!(
            registries.paths.output.as_deref(),
            Some(Path::new("/data/run/output"))
        );
        assert_eq!(
            registries.paths.scratch.as_deref(),
            Some(Path::new("/elsewhere/scratch"))
        );
    }

    #[test]
    fn zero_task_count_is_rejected() {
        let mut registries = Registries::default();
        registries.parameters.ntask = Some(0);
        fill_defaults(&mut registries, Path::new("/work"));
        let err = resolve(&registries, Path::new("/work")).expect_err("zero ntask");
        match err {
            ConfigError::Invalid(message) => assert!(message.contains("NTASK")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_local_path_resolves_to_none_and_relative_paths_are_anchored() {
        let mut registries = Registries::default();
        registries.paths.output = Some(PathBuf::from("results"));
        fill_defaults(&mut registries, Path::new("/work"));
        let config = resolve(&registries, Path::new("/work")).expect("resolve");

        assert!(config.paths.local.is_none());
        assert_eq!(config.paths.output, PathBuf::from("/work/results"));
        assert_eq!(config.paths.wrappers, PathBuf::from("/work/wrappers"));
        assert_eq!(
            config.registries.paths.output,
            Some(PathBuf::from("results"))
        );
    }

    #[test]
    fn mpiargs_split_into_discrete_arguments() {
        let mut registries = Registries::default();
        fill_defaults(&mut registries, Path::new("/work"));
        let config = resolve(&registries, Path::new("/work")).expect("resolve");
        assert_eq!(
            config.mpiargs(),
            vec!["--mca", "mpi_warn_on_fork", "0"]
        );
    }
}
