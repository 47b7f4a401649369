use crate::error::{Result, VtddError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const VTDD_DIR: &str = ".vtdd";
pub const CONFIG_FILE: &str = ".vtdd/config.yaml";

pub const VITEST_CONFIG: &str = "vitest.config.js";
pub const TEST_SETUP: &str = "src/test/setup.js";
pub const TEST_HELPERS: &str = "src/test/helpers.js";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Target path for a component file: `<root>/<components_dir>/<Name><suffix>`.
pub fn component_path(root: &Path, components_dir: &str, name: &str, suffix: &str) -> PathBuf {
    root.join(components_dir).join(format!("{name}{suffix}"))
}

pub fn issue_fallback_path(root: &Path, fallback_dir: &str, name: &str) -> PathBuf {
    root.join(fallback_dir).join(format!("{name}.md"))
}

// ---------------------------------------------------------------------------
// Component name validation
// ---------------------------------------------------------------------------

static COMPONENT_RE: OnceLock<Regex> = OnceLock::new();

fn component_re() -> &'static Regex {
    COMPONENT_RE.get_or_init(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").unwrap())
}

pub fn validate_component_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(VtddError::EmptyComponentName);
    }
    if name.len() > 64 || !component_re().is_match(name) {
        return Err(VtddError::InvalidComponentName(name.to_string()));
    }
    Ok(())
}

/// `LoginForm` -> `login-form`, used for branch names.
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_component_names() {
        for name in ["LoginForm", "A", "Button2", "UserProfileCard"] {
            validate_component_name(name).unwrap_or_else(|_| panic!("expected valid: {name}"));
        }
    }

    #[test]
    fn invalid_component_names() {
        for name in ["loginForm", "Login Form", "Login-Form", "2Fast", "Login_Form"] {
            assert!(
                matches!(
                    validate_component_name(name),
                    Err(VtddError::InvalidComponentName(_))
                ),
                "expected invalid: {name}"
            );
        }
    }

    #[test]
    fn empty_component_name_is_distinct_error() {
        assert!(matches!(
            validate_component_name("  "),
            Err(VtddError::EmptyComponentName)
        ));
    }

    #[test]
    fn kebab_case_splits_on_capitals() {
        assert_eq!(kebab_case("LoginForm"), "login-form");
        assert_eq!(kebab_case("A"), "a");
        assert_eq!(kebab_case("UserProfileCard2"), "user-profile-card2");
    }

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/app");
        assert_eq!(
            component_path(root, "src/components", "LoginForm", ".test.js"),
            PathBuf::from("/tmp/app/src/components/LoginForm.test.js")
        );
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/app/.vtdd/config.yaml")
        );
    }
}
