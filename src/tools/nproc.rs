use super::{io_error, ToolsError};
use std::fs;
use std::path::Path;

pub const CPUINFO_PATH: &str = "/proc/cpuinfo";

pub fn nproc() -> Result<usize, ToolsError> {
    match std::thread::available_parallelism() {
        Ok(count) => Ok(count.get()),
        Err(_) => nproc_from_cpuinfo(Path::new(CPUINFO_PATH)),
    }
}

pub fn nproc_from_cpuinfo(path: &Path) -> Result<usize, ToolsError> {
    if !path.exists() {
        return Err(ToolsError::ProcessorCount);
    }
    let raw = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    match count_processors(&raw) {
        0 => Err(ToolsError::ProcessorCount),
        count => Ok(count),
    }
}

fn count_processors(cpuinfo: &str) -> usize {
    cpuinfo
        .lines()
        .filter(|line| {
            line.split(':')
                .next()
                .is_some_and(|key| key.trim() == "processor")
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn nproc_reports_at_least_one_processor() {
        assert!(nproc().expect("nproc") >= 1);
    }

    #[test]
    fn cpuinfo_fallback_counts_processor_entries() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("cpuinfo");
        fs::write(
            &path,
            "processor\t: 0\nmodel name\t: test\n\nprocessor\t: 1\nmodel name\t: test\n",
        )
        .expect("write");
        assert_eq!(nproc_from_cpuinfo(&path).expect("count"), 2);
    }

    #[test]
    fn cpuinfo_fallback_fails_without_entries() {
        let dir = tempdir().expect("tempdir");
        let empty = dir.path().join("cpuinfo");
        fs::write(&empty, "model name\t: test\n").expect("write");
        assert!(matches!(
            nproc_from_cpuinfo(&empty),
            Err(ToolsError::ProcessorCount)
        ));
        assert!(matches!(
            nproc_from_cpuinfo(&dir.path().join("missing")),
            Err(ToolsError::ProcessorCount)
        ));
    }
}
