use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VtddError {
    #[error("component name is required")]
    EmptyComponentName,

    #[error("invalid component name '{0}': must be PascalCase with no whitespace")]
    InvalidComponentName(String),

    #[error("requirements validation failed:\n  - {}", .0.join("\n  - "))]
    InvalidRequirements(Vec<String>),

    #[error("generated test content failed validation:\n  - {}", .0.join("\n  - "))]
    InvalidContent(Vec<String>),

    #[error("file already exists: {}", .0.display())]
    FileExists(PathBuf),

    #[error("'{0}' not found on PATH")]
    ToolNotFound(String),

    #[error("{tool} failed: {message}")]
    ToolFailed { tool: String, message: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VtddError>;
