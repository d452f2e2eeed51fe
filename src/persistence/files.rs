use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const DIR_NAME: &str = ".taskly";

/// Get the taskly directory - checks for local .taskly first, then falls back to global ~/.taskly
pub fn get_taskly_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;

    if let Some(local_dir) = find_local_taskly(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(DIR_NAME))
}

/// Find local .taskly directory by walking up the directory tree
fn find_local_taskly(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let candidate = current.join(DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }

        current = current.parent()?;
    }
}

/// Ensure the taskly directory exists
pub fn ensure_taskly_dir() -> Result<PathBuf> {
    let dir = get_taskly_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .taskly directory in the current directory
pub fn init_local_taskly() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let taskly_dir = current_dir.join(DIR_NAME);

    if taskly_dir.exists() {
        anyhow::bail!("Taskly directory already exists: {}", taskly_dir.display());
    }

    fs::create_dir_all(&taskly_dir)
        .with_context(|| format!("Failed to create directory: {}", taskly_dir.display()))?;

    Ok(taskly_dir)
}

/// Path of the JSON file backing a store key
pub fn key_file(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.json", key))
}

/// Get path to settings.json
pub fn settings_file() -> Result<PathBuf> {
    Ok(ensure_taskly_dir()?.join("settings.json"))
}

/// Get path to the log file
pub fn log_file() -> Result<PathBuf> {
    Ok(ensure_taskly_dir()?.join("taskly.log"))
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> io::Result<()> {
    let path = path.as_ref();
    let dir = path.parent().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "file path has no parent directory")
    })?;

    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Read file content, None if the file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_taskly_dir() {
        let dir = get_taskly_dir().unwrap();
        assert!(dir.to_string_lossy().contains(".taskly"));
    }

    #[test]
    fn test_find_local_taskly_walks_up() {
        let temp_dir = tempfile::tempdir().unwrap();
        let local = temp_dir.path().join(".taskly");
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&local).unwrap();
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_local_taskly(&nested), Some(local));
    }

    #[test]
    fn test_key_file() {
        let path = key_file(Path::new("/tmp/x"), "shopping-list");
        assert_eq!(path, PathBuf::from("/tmp/x/shopping-list.json"));
    }

    #[test]
    fn test_atomic_write_and_read() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.json");

        atomic_write(&test_file, "[1,2,3]").unwrap();
        atomic_write(&test_file, "[4]").unwrap();

        assert_eq!(read_file(&test_file).unwrap().as_deref(), Some("[4]"));
    }

    #[test]
    fn test_read_nonexistent_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("nonexistent.json");

        assert_eq!(read_file(&test_file).unwrap(), None);
    }

    #[test]
    fn test_atomic_write_into_missing_dir_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("missing").join("test.json");

        assert!(atomic_write(&test_file, "{}").is_err());
    }
}
