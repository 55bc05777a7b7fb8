use super::collections::{iterable, OneOrMany};
use super::{io_error, ToolsError};
use filetime::FileTime;
use std::fmt::Display;
use std::fs;
use std::io::{BufRead, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread;
use std::time::{Duration, SystemTime};

pub const MKDIR_MAX_JITTER: Duration = Duration::from_secs(2);

pub fn cat(src: &Path, dst: Option<&Path>) -> Result<String, ToolsError> {
    let contents = fs::read_to_string(src).map_err(|e| io_error(src, e))?;
    if let Some(dst) = dst {
        fs::write(dst, &contents).map_err(|e| io_error(dst, e))?;
    }
    Ok(contents)
}

pub fn cd(path: &Path) -> Result<(), ToolsError> {
    std::env::set_current_dir(path).map_err(|e| io_error(path, e))
}

pub fn cp(src: &Path, dst: &Path) -> Result<(), ToolsError> {
    let mut target = dst.to_path_buf();
    if dst.is_dir() {
        target = dst.join(basename(src)?);
        if target.is_dir() && src.is_dir() {
            for name in ls(src, true)? {
                cp(&src.join(name), &target)?;
            }
            return Ok(());
        }
    }

    if src.is_file() {
        fs::copy(src, &target).map_err(|e| io_error(&target, e))?;
        Ok(())
    } else if src.is_dir() {
        copy_tree(src, &target)
    } else {
        Err(ToolsError::MissingSource {
            path: src.display().to_string(),
        })
    }
}

pub fn cp_many<P: AsRef<Path>>(srcs: &[P], dst: &Path) -> Result<(), ToolsError> {
    if srcs.len() > 1 && !dst.is_dir() {
        return Err(ToolsError::NotADirectory {
            path: dst.display().to_string(),
        });
    }
    for src in srcs {
        cp(src.as_ref(), dst)?;
    }
    Ok(())
}

fn copy_tree(src: &Path, dst: &Path) -> Result<(), ToolsError> {
    fs::create_dir_all(dst).map_err(|e| io_error(dst, e))?;
    for entry in fs::read_dir(src).map_err(|e| io_error(src, e))? {
        let entry = entry.map_err(|e| io_error(src, e))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        if from.is_dir() {
            copy_tree(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|e| io_error(&to, e))?;
        }
    }
    Ok(())
}

pub fn mv(src: &Path, dst: &Path) -> Result<(), ToolsError> {
    let target = if dst.is_dir() {
        dst.join(basename(src)?)
    } else {
        dst.to_path_buf()
    };
    match fs::rename(src, &target) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::CrossesDevices => {
            if let Err(copy_err) = cp(src, &target) {
                let _ = rm(target.as_path());
                return Err(copy_err);
            }
            rm(src)
        }
        Err(err) => Err(io_error(src, err)),
    }
}

pub fn mv_many<P: AsRef<Path>>(srcs: &[P], dst: &Path) -> Result<(), ToolsError> {
    if srcs.len() > 1 && !dst.is_dir() {
        return Err(ToolsError::NotADirectory {
            path: dst.display().to_string(),
        });
    }
    for src in srcs {
        mv(src.as_ref(), dst)?;
    }
    Ok(())
}

pub fn rm(paths: impl Into<OneOrMany<PathBuf>>) -> Result<(), ToolsError> {
    for path in iterable(paths) {
        let metadata = match fs::symlink_metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == ErrorKind::NotFound => continue,
            Err(err) => return Err(io_error(&path, err)),
        };
        if metadata.is_dir() {
            fs::remove_dir_all(&path).map_err(|e| io_error(&path, e))?;
        } else {
            fs::remove_file(&path).map_err(|e| io_error(&path, e))?;
        }
    }
    Ok(())
}

pub fn ln(src: &Path, dst: &Path) -> Result<PathBuf, ToolsError> {
    let src = std::path::absolute(src).map_err(|e| io_error(src, e))?;
    let mut dst = std::path::absolute(dst).map_err(|e| io_error(dst, e))?;
    if dst.is_dir() {
        dst = dst.join(basename(&src)?);
    }
    create_symlink(&src, &dst).map_err(|e| io_error(&dst, e))?;
    Ok(dst)
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

pub fn ls(path: &Path, show_all: bool) -> Result<Vec<String>, ToolsError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(path).map_err(|e| io_error(path, e))? {
        let entry = entry.map_err(|e| io_error(path, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if show_all || !name.starts_with('.') {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

pub fn mkdir(paths: impl Into<OneOrMany<PathBuf>>) -> Result<(), ToolsError> {
    mkdir_with_jitter(paths, MKDIR_MAX_JITTER)
}

// Concurrent workers often race to create the same directories.
pub fn mkdir_with_jitter(
    paths: impl Into<OneOrMany<PathBuf>>,
    max_jitter: Duration,
) -> Result<(), ToolsError> {
    if !max_jitter.is_zero() {
        thread::sleep(random_delay(max_jitter));
    }
    for path in iterable(paths) {
        if !path.is_dir() {
            fs::create_dir_all(&path).map_err(|e| io_error(&path, e))?;
        }
    }
    Ok(())
}

fn random_delay(max: Duration) -> Duration {
    let mut bytes = [0_u8; 4];
    if getrandom::getrandom(&mut bytes).is_err() {
        return Duration::ZERO;
    }
    let fraction = f64::from(u32::from_le_bytes(bytes)) / f64::from(u32::MAX);
    max.mul_f64(fraction)
}

pub fn touch(path: &Path, times: Option<(SystemTime, SystemTime)>) -> Result<(), ToolsError> {
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| io_error(path, e))?;
    let (atime, mtime) = match times {
        Some((atime, mtime)) => (
            FileTime::from_system_time(atime),
            FileTime::from_system_time(mtime),
        ),
        None => {
            let now = FileTime::now();
            (now, now)
        }
    };
    filetime::set_file_times(path, atime, mtime).map_err(|e| io_error(path, e))
}

pub fn rename<S: AsRef<str>>(old: &str, new: &str, names: &[S]) -> Result<(), ToolsError> {
    for name in names {
        let name = name.as_ref();
        if name.contains(old) {
            let renamed = name.replace(old, new);
            fs::rename(name, &renamed).map_err(|e| io_error(Path::new(name), e))?;
        }
    }
    Ok(())
}

pub fn which(name: &str) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate
        .parent()
        .is_some_and(|parent| !parent.as_os_str().is_empty())
    {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    let search_path = std::env::var_os("PATH")?;
    std::env::split_paths(&search_path)
        .map(|dir| PathBuf::from(dir.to_string_lossy().trim_matches('"')).join(name))
        .find(|full| is_executable(full))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|metadata| metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

pub fn hostname() -> Result<String, ToolsError> {
    let full = Command::new("hostname")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|name| !name.is_empty())
        .or_else(|| {
            fs::read_to_string("/proc/sys/kernel/hostname")
                .ok()
                .map(|raw| raw.trim().to_string())
                .filter(|name| !name.is_empty())
        })
        .or_else(|| std::env::var("HOSTNAME").ok())
        .ok_or(ToolsError::Hostname)?;
    Ok(short_hostname(&full))
}

fn short_hostname(full: &str) -> String {
    full.split('.').next().unwrap_or_default().to_string()
}

pub fn select<'a, T, R, W>(
    items: &'a [T],
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<&'a T, ToolsError>
where
    T: Display,
    R: BufRead,
    W: Write,
{
    let console = Path::new("<console>");
    loop {
        if !prompt.is_empty() {
            writeln!(output, "{prompt}").map_err(|e| io_error(console, e))?;
        }
        for (idx, item) in items.iter().enumerate() {
            writeln!(output, "{:2}) {item}", idx + 1).map_err(|e| io_error(console, e))?;
        }
        output.flush().map_err(|e| io_error(console, e))?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .map_err(|e| io_error(console, e))?;
        if read == 0 {
            return Err(ToolsError::NoInput);
        }
        if let Ok(reply) = line.trim().parse::<usize>() {
            if (1..=items.len()).contains(&reply) {
                return Ok(&items[reply - 1]);
            }
        }
    }
}

fn basename(path: &Path) -> Result<&std::ffi::OsStr, ToolsError> {
    path.file_name().ok_or_else(|| ToolsError::NoBasename {
        path: path.display().to_string(),
    })
}
