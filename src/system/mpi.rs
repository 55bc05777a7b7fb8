use super::checkpoint::{save_checkpoint, CheckpointFiles};
use super::invocation::build_launch;
use super::kwargs::save_kwargs;
use super::launcher::run_launcher;
use super::rank::task_rank;
use super::{Hosts, LaunchReport, LaunchSpec, SystemError, TaskInvocation};
use crate::config::{self, Registries, SystemConfig};
use crate::shared::logging::append_system_log;
use crate::tools::unix::{cd, mkdir_with_jitter, MKDIR_MAX_JITTER};
use serde_json::{Map, Value};
use std::path::Path;
use std::time::Duration;

pub trait Workflow {
    fn main(&mut self, system: &MpiSystem) -> Result<(), String>;
}

#[derive(Debug, Clone)]
pub struct MpiSystem {
    config: SystemConfig,
    mkdir_jitter: Duration,
}

impl MpiSystem {
    pub fn new(config: SystemConfig) -> Self {
        Self {
            config,
            mkdir_jitter: MKDIR_MAX_JITTER,
        }
    }

    pub fn check(registries: &mut Registries, cwd: &Path) -> Result<Self, SystemError> {
        let config = config::check(registries, cwd)?;
        Ok(Self::new(config))
    }

    pub fn with_mkdir_jitter(mut self, jitter: Duration) -> Self {
        self.mkdir_jitter = jitter;
        self
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn output(&self) -> &Path {
        &self.config.paths.output
    }

    pub fn submit(&self, workflow: &mut dyn Workflow) -> Result<(), SystemError> {
        let output = self.output();
        mkdir_with_jitter(output, self.mkdir_jitter)?;
        cd(output)?;
        self.checkpoint()?;
        append_system_log(
            output,
            "info",
            "workflow.submit",
            &format!("submitting workflow `{}`", self.config.parameters.title),
        );

        workflow.main(self).map_err(|err| {
            append_system_log(output, "error", "workflow.failed", &err);
            SystemError::Workflow(err)
        })?;
        append_system_log(output, "info", "workflow.completed", "workflow finished");
        Ok(())
    }

    pub fn run(
        &self,
        classname: &str,
        funcname: &str,
        hosts: &str,
        kwargs: Map<String, Value>,
    ) -> Result<LaunchReport, SystemError> {
        let hosts = Hosts::try_from(hosts)?;
        self.run_on(TaskInvocation::new(classname, funcname, kwargs), hosts)
    }

    pub fn run_on(
        &self,
        invocation: TaskInvocation,
        hosts: Hosts,
    ) -> Result<LaunchReport, SystemError> {
        let output = self.output();
        self.checkpoint()?;
        save_kwargs(output, &invocation)?;

        let spec = self.launch_spec(&invocation, hosts);
        append_system_log(
            output,
            "info",
            "task.dispatch",
            &format!(
                "{}.{} on {hosts}: {}",
                invocation.classname,
                invocation.funcname,
                spec.command_form()
            ),
        );

        match run_launcher(&spec) {
            Ok(report) => {
                append_system_log(
                    output,
                    "info",
                    "task.completed",
                    &format!("{}.{}", invocation.classname, invocation.funcname),
                );
                Ok(report)
            }
            Err(err) => {
                append_system_log(output, "error", "task.failed", &err.to_string());
                Err(err)
            }
        }
    }

    pub fn launch_spec(&self, invocation: &TaskInvocation, hosts: Hosts) -> LaunchSpec {
        build_launch(&self.config, invocation, hosts)
    }

    pub fn checkpoint(&self) -> Result<CheckpointFiles, SystemError> {
        save_checkpoint(self.output(), &self.config.registries)
    }

    pub fn getnode(&self) -> Result<u32, SystemError> {
        task_rank()
    }

    // Solvers launched from inside a task run single-core, without a launcher prefix.
    pub fn mpiexec(&self) -> &'static str {
        ""
    }
}
