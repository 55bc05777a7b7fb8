pub mod error;
pub mod guard;
pub mod load;
pub mod registry;

pub use error::ConfigError;
pub use guard::{check, check_mpi, fill_defaults, resolve};
pub use load::{load_registries, registries_to_yaml, DEFAULT_PARAMETERS_FILE, PATHS_SECTION};
pub use registry::{
    ParameterRegistry, PathRegistry, Parameters, Paths, Registries, SystemConfig, Verbosity,
};
