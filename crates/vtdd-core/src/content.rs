//! Textual lint pass over a generated (or hand-edited) test file.
//!
//! Nothing is executed; the file is scanned for the markers the generator
//! emits so the CLI can self-check its artifact before reporting success.

use crate::error::{Result, VtddError};
use crate::markers::{ACCESSIBILITY_GROUP, RED_ASSERTION};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummary {
    pub total_tests: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub has_accessibility_tests: bool,
    pub follows_tdd_pattern: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub summary: ContentSummary,
}

impl ContentReport {
    pub fn into_result(self) -> Result<ContentReport> {
        if self.valid {
            Ok(self)
        } else {
            Err(VtddError::InvalidContent(self.errors))
        }
    }
}

static TEST_CASE_RE: OnceLock<Regex> = OnceLock::new();

fn test_case_re() -> &'static Regex {
    TEST_CASE_RE.get_or_init(|| Regex::new(r"(?m)^\s*(it|test)(\.\w+)*\(").unwrap())
}

/// Count `it(` / `test(` calls that open a line, modifiers such as
/// `it.each(` or `test.skip(` included.
pub fn count_test_cases(text: &str) -> usize {
    test_case_re().find_iter(text).count()
}

/// True when `describe('<name>'` appears with any JS quote style, modifiers
/// such as `describe.skip(` included.
pub fn has_describe(text: &str, name: &str) -> bool {
    let name = regex::escape(name);
    let pattern = format!(
        r#"describe(\.\w+)*\(\s*('{name}'|"{name}"|`{name}`)"#
    );
    Regex::new(&pattern).is_ok_and(|re| re.is_match(text))
}

pub fn perform_full_validation(text: &str, component_name: &str) -> ContentReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if component_name.trim().is_empty() || !has_describe(text, component_name.trim()) {
        errors.push(format!(
            "missing top-level describe block for '{}'",
            component_name.trim()
        ));
    }

    let total_tests = count_test_cases(text);
    if total_tests == 0 {
        errors.push("no test cases found".to_string());
    }

    let has_accessibility_tests = has_describe(text, ACCESSIBILITY_GROUP);
    if !has_accessibility_tests {
        warnings.push("no accessibility tests found".to_string());
    }

    let follows_tdd_pattern = text.contains(RED_ASSERTION);
    if !follows_tdd_pattern {
        warnings.push(
            "no failing placeholder assertion found; tests may already pass before implementation"
                .to_string(),
        );
    }

    ContentReport {
        valid: errors.is_empty(),
        summary: ContentSummary {
            total_tests,
            total_errors: errors.len(),
            total_warnings: warnings.len(),
            has_accessibility_tests,
            follows_tdd_pattern,
        },
        errors,
        warnings,
    }
}
