use std::path::{Path, PathBuf};
use vtdd_core::paths;

/// Resolve the project root.
///
/// Priority:
/// 1. `--root` flag / `VTDD_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.vtdd/`, then `.git/`, then `package.json`
/// 3. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_upward(&cwd).unwrap_or(cwd)
}

fn find_upward(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|d| d.join(paths::VTDD_DIR).is_dir())
        .or_else(|| start.ancestors().find(|d| d.join(".git").is_dir()))
        .or_else(|| start.ancestors().find(|d| d.join("package.json").is_file()))
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        assert_eq!(resolve_root(Some(dir.path())), dir.path());
    }

    #[test]
    fn vtdd_dir_beats_package_json() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".vtdd")).unwrap();
        let app = dir.path().join("app");
        std::fs::create_dir_all(app.join("src/components")).unwrap();
        std::fs::write(app.join("package.json"), "{}").unwrap();

        let found = find_upward(&app.join("src/components")).unwrap();
        assert_eq!(found, dir.path());
    }
}
