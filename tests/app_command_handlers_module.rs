use seisrun::app::command_handlers::run_cli;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::tempdir;

static CWD_LOCK: Mutex<()> = Mutex::new(());

fn write_script(path: &Path, body: &str) {
    fs::write(path, body).expect("write script");
    let mut perms = fs::metadata(path).expect("metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("chmod");
}

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn workspace(root: &Path, extra: &str) -> PathBuf {
    let launcher = root.join("mpiexec-mock");
    write_script(
        &launcher,
        &format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{}'\n",
            root.join("args.txt").display()
        ),
    );
    fs::create_dir_all(root.join("wrappers")).expect("wrappers");
    let parameters = root.join("parameters.yaml");
    fs::write(
        &parameters,
        format!(
            "TITLE: cli-test\nNTASK: 2\nMPIEXEC: {}\n{extra}",
            launcher.display()
        ),
    )
    .expect("write parameters");
    parameters
}

#[test]
fn no_arguments_prints_help() {
    let output = run_cli(Vec::new()).expect("help");
    assert!(output.contains("Commands:"));
    assert!(output.contains("run <class> <func>"));
}

#[test]
fn unknown_command_is_an_error() {
    let err = run_cli(args(&["launch"])).expect_err("unknown");
    assert_eq!(err, "unknown command `launch`");
}

#[test]
fn check_reports_resolved_configuration() {
    let dir = tempdir().expect("tempdir");
    let parameters = workspace(dir.path(), "");
    let output = run_cli(args(&[
        "--parameters",
        &parameters.display().to_string(),
        "check",
    ]))
    .expect("check");

    assert!(output.starts_with("configuration ok"));
    assert!(output.contains("NTASK: 2"));
    assert!(output.contains("mpi_warn_on_fork"));
    assert!(output.contains(&format!(
        "OUTPUT: {}",
        dir.path().join("output").display()
    )));
}

#[test]
fn check_surfaces_multiprocess_configuration_error() {
    let dir = tempdir().expect("tempdir");
    let parameters = workspace(dir.path(), "NPROC: 2\n");
    let err = run_cli(args(&[
        "-p",
        &parameters.display().to_string(),
        "check",
    ]))
    .expect_err("nproc");
    assert!(err.contains("NPROC > 1"));
}

#[test]
fn run_dispatches_and_kwargs_can_be_read_back() {
    let dir = tempdir().expect("tempdir");
    let parameters = workspace(dir.path(), "VERBOSE: 1\n");
    let output = run_cli(args(&[
        "--parameters",
        &parameters.display().to_string(),
        "run",
        "Solver",
        "eval_func",
        "x=1",
    ]))
    .expect("run");

    assert!(output.contains("dispatched Solver.eval_func on all"));
    assert!(output.contains("command="));
    assert!(output.contains("exit_code=0"));
    let recorded = fs::read_to_string(dir.path().join("args.txt")).expect("args");
    assert!(recorded.starts_with("-n\n2\n"));

    let out_dir = dir.path().join("output");
    let kwargs = run_cli(args(&[
        "kwargs",
        &out_dir.display().to_string(),
        "Solver",
        "eval_func",
    ]))
    .expect("kwargs");
    let parsed: serde_json::Value = serde_json::from_str(&kwargs).expect("json");
    assert_eq!(parsed, serde_json::json!({ "x": 1 }));
}

#[test]
fn run_with_unknown_hosts_writes_nothing() {
    let dir = tempdir().expect("tempdir");
    let parameters = workspace(dir.path(), "");
    let err = run_cli(args(&[
        "--parameters",
        &parameters.display().to_string(),
        "run",
        "Solver",
        "eval_func",
        "--hosts",
        "everywhere",
    ]))
    .expect_err("bad hosts");
    assert!(err.contains("everywhere"));
    assert!(!dir.path().join("output").exists());
}

#[test]
fn quiet_runs_omit_command_form() {
    let dir = tempdir().expect("tempdir");
    let parameters = workspace(dir.path(), "VERBOSE: 0\n");
    let output = run_cli(args(&[
        "--parameters",
        &parameters.display().to_string(),
        "run",
        "Optimize",
        "setup",
        "--hosts",
        "head",
    ]))
    .expect("run");
    assert!(!output.contains("command="));
    assert!(output.contains("on head"));
}

#[test]
fn submit_runs_driver_script_from_wrappers() {
    let _lock = CWD_LOCK.lock().unwrap_or_else(|err| err.into_inner());
    let original = std::env::current_dir().expect("cwd");
    let dir = tempdir().expect("tempdir");
    let parameters = workspace(dir.path(), "");
    write_script(
        &dir.path().join("wrappers/driver"),
        "#!/bin/sh\necho \"$1\" > driver_ran.txt\n",
    );

    let result = run_cli(args(&[
        "--parameters",
        &parameters.display().to_string(),
        "submit",
    ]));
    std::env::set_current_dir(&original).expect("restore cwd");

    let output = result.expect("submit");
    assert!(output.contains("workflow `cli-test` completed"));
    let marker = dir.path().join("output/driver_ran.txt");
    assert_eq!(
        fs::read_to_string(marker).expect("marker").trim(),
        dir.path().join("output").display().to_string()
    );
}

#[test]
fn nproc_prints_a_positive_count() {
    let output = run_cli(args(&["nproc"])).expect("nproc");
    assert!(output.parse::<usize>().expect("number") >= 1);
}
