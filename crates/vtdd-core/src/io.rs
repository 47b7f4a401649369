use crate::error::{Result, VtddError};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Write a file only if it does not already exist. Returns true if written.
pub fn write_if_missing(path: &Path, data: &[u8]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    atomic_write(path, data)?;
    Ok(true)
}

/// Write a new file, failing with `FileExists` instead of overwriting.
pub fn write_new(path: &Path, data: &[u8]) -> Result<()> {
    if path.exists() {
        return Err(VtddError::FileExists(path.to_path_buf()));
    }
    atomic_write(path, data)
}

/// Write every `(path, data)` pair, or none of them if any target exists.
pub fn write_all_new(files: &[(&Path, &[u8])]) -> Result<()> {
    if let Some((path, _)) = files.iter().find(|(p, _)| p.exists()) {
        return Err(VtddError::FileExists(path.to_path_buf()));
    }
    for (path, data) in files {
        write_new(path, data)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/LoginForm.vue");
        atomic_write(&path, b"<template />").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<template />");
    }

    #[test]
    fn write_if_missing_skips_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("existing.txt");
        std::fs::write(&path, b"original").unwrap();
        assert!(!write_if_missing(&path, b"new").unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn write_new_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("LoginForm.test.js");
        std::fs::write(&path, b"keep me").unwrap();
        let err = write_new(&path, b"replaced").unwrap_err();
        assert!(matches!(err, VtddError::FileExists(p) if p == path));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[test]
    fn write_all_new_writes_nothing_on_collision() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("LoginForm.vue");
        let second = dir.path().join("LoginForm.test.js");
        std::fs::write(&second, b"existing").unwrap();

        let err = write_all_new(&[(&first, b"a".as_slice()), (&second, b"b".as_slice())])
            .unwrap_err();
        assert!(matches!(err, VtddError::FileExists(_)));
        assert!(!first.exists());
    }
}
