use super::SystemError;

pub const RANK_ENV_VARS: [&str; 4] = [
    "OMPI_COMM_WORLD_RANK",
    "PMI_RANK",
    "PMIX_RANK",
    "MV2_COMM_WORLD_RANK",
];

pub fn task_rank() -> Result<u32, SystemError> {
    rank_from_env(|var| std::env::var(var).ok())
}

pub fn rank_from_env<F>(lookup: F) -> Result<u32, SystemError>
where
    F: Fn(&str) -> Option<String>,
{
    for var in RANK_ENV_VARS {
        if let Some(value) = lookup(var) {
            return value
                .trim()
                .parse::<u32>()
                .map_err(|_| SystemError::InvalidRank {
                    var: var.to_string(),
                    value,
                });
        }
    }
    Ok(0)
}
