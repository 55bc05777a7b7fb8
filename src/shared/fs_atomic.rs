use std::fs;
use std::io::Write;
use std::path::Path;

pub fn atomic_write_file(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| std::io::Error::other("path has no parent"))?;
    fs::create_dir_all(parent)?;

    let mut suffix = [0_u8; 4];
    getrandom::getrandom(&mut suffix).map_err(|err| std::io::Error::other(err.to_string()))?;
    let tmp_name = format!(
        ".{}.tmp-{}-{:08x}",
        path.file_name()
            .and_then(|v| v.to_str())
            .unwrap_or("object"),
        std::process::id(),
        u32::from_le_bytes(suffix),
    );
    let tmp_path = parent.join(tmp_name);

    {
        let mut file = fs::OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&tmp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
    }

    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }
    sync_parent_dir(parent)
}

#[cfg(unix)]
fn sync_parent_dir(parent: &Path) -> std::io::Result<()> {
    fs::File::open(parent)?.sync_all()
}

#[cfg(not(unix))]
fn sync_parent_dir(_parent: &Path) -> std::io::Result<()> {
    Ok(())
}
