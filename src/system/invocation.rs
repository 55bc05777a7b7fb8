use super::{Hosts, LaunchSpec, TaskInvocation};
use crate::config::SystemConfig;

pub const ENTRY_SCRIPT_ALL: &str = "run_mpi";
pub const ENTRY_SCRIPT_HEAD: &str = "run_mpi_head";

pub fn build_launch(config: &SystemConfig, invocation: &TaskInvocation, hosts: Hosts) -> LaunchSpec {
    let (count, entry_script) = match hosts {
        Hosts::All => (config.parameters.ntask, ENTRY_SCRIPT_ALL),
        Hosts::Head => (1, ENTRY_SCRIPT_HEAD),
    };

    let mut args = vec!["-n".to_string(), count.to_string()];
    args.extend(config.mpiargs());
    args.push(
        config
            .paths
            .wrappers
            .join(entry_script)
            .display()
            .to_string(),
    );
    args.push(config.paths.output.display().to_string());
    args.push(invocation.classname.clone());
    args.push(invocation.funcname.clone());

    LaunchSpec {
        binary: config.parameters.mpiexec.clone(),
        args,
        working_directory: config.paths.wrappers.clone(),
    }
}
