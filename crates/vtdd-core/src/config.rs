use crate::error::{Result, VtddError};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// IssuesConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuesConfig {
    /// Issue-tracker CLI to invoke.
    #[serde(default = "default_issue_tool")]
    pub tool: String,
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,
    /// Where the issue body lands when the tracker CLI is unavailable.
    #[serde(default = "default_fallback_dir")]
    pub fallback_dir: String,
}

fn default_issue_tool() -> String {
    "gh".to_string()
}

fn default_labels() -> Vec<String> {
    vec!["tdd".to_string(), "enhancement".to_string()]
}

fn default_fallback_dir() -> String {
    ".vtdd/issues".to_string()
}

impl Default for IssuesConfig {
    fn default() -> Self {
        Self {
            tool: default_issue_tool(),
            labels: default_labels(),
            fallback_dir: default_fallback_dir(),
        }
    }
}

// ---------------------------------------------------------------------------
// GitConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    #[serde(default = "default_branch_prefix")]
    pub branch_prefix: String,
    #[serde(default = "default_true")]
    pub create_branch: bool,
}

fn default_branch_prefix() -> String {
    "feature/".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            branch_prefix: default_branch_prefix(),
            create_branch: true,
        }
    }
}

// ---------------------------------------------------------------------------
// CoverageConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageConfig {
    /// Percentage applied to statements, branches, functions and lines.
    #[serde(default = "default_threshold")]
    pub threshold: u32,
}

fn default_threshold() -> u32 {
    80
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_components_dir")]
    pub components_dir: String,
    #[serde(default = "default_test_suffix")]
    pub test_suffix: String,
    #[serde(default)]
    pub issues: IssuesConfig,
    #[serde(default)]
    pub git: GitConfig,
    #[serde(default)]
    pub coverage: CoverageConfig,
}

fn default_version() -> u32 {
    1
}

fn default_components_dir() -> String {
    "src/components".to_string()
}

fn default_test_suffix() -> String {
    ".test.js".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            components_dir: default_components_dir(),
            test_suffix: default_test_suffix(),
            issues: IssuesConfig::default(),
            git: GitConfig::default(),
            coverage: CoverageConfig::default(),
        }
    }
}

impl Config {
    /// Load `.vtdd/config.yaml`, or defaults when the file does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)
            .map_err(|e| VtddError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn component_file(&self, root: &Path, name: &str) -> std::path::PathBuf {
        paths::component_path(root, &self.components_dir, name, ".vue")
    }

    pub fn test_file(&self, root: &Path, name: &str) -> std::path::PathBuf {
        paths::component_path(root, &self.components_dir, name, &self.test_suffix)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let mut push = |level: WarnLevel, message: String| {
            warnings.push(ConfigWarning { level, message });
        };

        if self.components_dir.trim().is_empty() {
            push(WarnLevel::Error, "components_dir is empty".to_string());
        } else if Path::new(&self.components_dir).is_absolute() {
            push(
                WarnLevel::Warning,
                format!(
                    "components_dir '{}' is absolute; it should be relative to the project root",
                    self.components_dir
                ),
            );
        }

        if self.test_suffix.trim().is_empty() {
            push(WarnLevel::Error, "test_suffix is empty".to_string());
        } else if !self.test_suffix.starts_with('.') {
            push(
                WarnLevel::Warning,
                format!("test_suffix '{}' does not start with '.'", self.test_suffix),
            );
        } else if self.test_suffix == ".vue" {
            push(
                WarnLevel::Error,
                "test_suffix '.vue' collides with the component file".to_string(),
            );
        }

        if self.coverage.threshold > 100 {
            push(
                WarnLevel::Error,
                format!(
                    "coverage.threshold={} is outside 0..=100",
                    self.coverage.threshold
                ),
            );
        }

        if self.issues.tool.trim().is_empty() {
            push(WarnLevel::Error, "issues.tool is empty".to_string());
        }
        if self.issues.fallback_dir.trim().is_empty() {
            push(WarnLevel::Error, "issues.fallback_dir is empty".to_string());
        }

        if self.git.branch_prefix.contains(char::is_whitespace) {
            push(
                WarnLevel::Error,
                format!(
                    "git.branch_prefix '{}' contains whitespace",
                    self.git.branch_prefix
                ),
            );
        }

        warnings
    }

    /// Fail with every error-level finding from `validate`. Warnings pass.
    pub fn ensure_valid(&self) -> Result<()> {
        let errors: Vec<String> = self
            .validate()
            .into_iter()
            .filter(|w| w.level == WarnLevel::Error)
            .map(|w| w.message)
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(VtddError::InvalidConfig(errors.join("; ")))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
