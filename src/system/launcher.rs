use super::{io_error, LaunchReport, LaunchSpec, SystemError};
use std::process::Command;

pub fn run_launcher(spec: &LaunchSpec) -> Result<LaunchReport, SystemError> {
    let command_form = spec.command_form();

    let status = match Command::new(&spec.binary)
        .current_dir(&spec.working_directory)
        .args(&spec.args)
        .status()
    {
        Ok(status) => status,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            if !spec.working_directory.is_dir() {
                return Err(io_error(&spec.working_directory, err));
            }
            return Err(SystemError::MissingLauncher {
                binary: spec.binary.clone(),
            });
        }
        Err(err) => return Err(io_error(&spec.working_directory, err)),
    };

    if !status.success() {
        return Err(SystemError::LauncherExit {
            command_form,
            status: status.to_string(),
            exit_code: status.code(),
        });
    }

    Ok(LaunchReport {
        command_form,
        working_directory: spec.working_directory.clone(),
        exit_code: status.code(),
    })
}
