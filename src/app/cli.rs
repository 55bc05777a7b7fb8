use crate::config::DEFAULT_PARAMETERS_FILE;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Check,
    Submit,
    Run,
    Kwargs,
    Rank,
    Nproc,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "check" => CliVerb::Check,
        "submit" => CliVerb::Submit,
        "run" => CliVerb::Run,
        "kwargs" => CliVerb::Kwargs,
        "rank" => CliVerb::Rank,
        "nproc" => CliVerb::Nproc,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalOptions {
    pub parameters_file: PathBuf,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            parameters_file: PathBuf::from(DEFAULT_PARAMETERS_FILE),
        }
    }
}

pub fn split_global_options(args: &[String]) -> Result<(GlobalOptions, &[String]), String> {
    let mut options = GlobalOptions::default();
    let mut rest = args;
    while let Some(first) = rest.first() {
        match first.as_str() {
            "--parameters" | "-p" => {
                let value = rest
                    .get(1)
                    .ok_or_else(|| format!("{first} requires a file path"))?;
                options.parameters_file = PathBuf::from(value);
                rest = &rest[2..];
            }
            _ => break,
        }
    }
    Ok((options, rest))
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Usage: seisrun [--parameters <file>] <command> [args]".to_string(),
        String::new(),
        "Commands:".to_string(),
        "  check                                Fill defaults and verify the MPI runtime"
            .to_string(),
        "  submit                               Checkpoint and run the workflow driver script"
            .to_string(),
        "  run <class> <func> [--hosts all|head] [key=value ...]".to_string(),
        "                                       Dispatch a task through the MPI launcher"
            .to_string(),
        "  kwargs <output> <class> <func>       Print the stored keyword arguments of a task"
            .to_string(),
        "  rank                                 Print the rank of the current task".to_string(),
        "  nproc                                Print the number of available processors"
            .to_string(),
        "  help                                 Show this message".to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    cli_help_lines().join("\n")
}
