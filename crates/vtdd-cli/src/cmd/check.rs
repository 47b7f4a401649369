use crate::output::{print_json, Style};
use anyhow::Context;
use std::path::Path;
use vtdd_core::content::perform_full_validation;

pub fn run(file: &Path, component: Option<&str>, style: Style, json: bool) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let component = match component {
        Some(c) => c.to_string(),
        None => component_from_path(file)
            .with_context(|| format!("cannot infer component name from {}", file.display()))?,
    };

    let report = perform_full_validation(&text, &component);

    if json {
        print_json(&report)?;
    } else {
        println!("{}", style.heading(&format!("{component}: {}", file.display())));
        println!("  Tests:               {}", report.summary.total_tests);
        println!(
            "  Accessibility tests: {}",
            style.yes_no(report.summary.has_accessibility_tests)
        );
        println!(
            "  Follows TDD pattern: {}",
            style.yes_no(report.summary.follows_tdd_pattern)
        );
        for e in &report.errors {
            println!("  {} {e}", style.error("error:"));
        }
        for w in &report.warnings {
            println!("  {} {w}", style.warning("warning:"));
        }
    }

    if !report.valid {
        anyhow::bail!(
            "{} has {} structural error(s)",
            file.display(),
            report.summary.total_errors
        );
    }
    Ok(())
}

/// `src/components/LoginForm.test.js` -> `LoginForm`.
fn component_from_path(file: &Path) -> Option<String> {
    let name = file.file_name()?.to_str()?;
    let stem = name.split('.').next()?;
    (!stem.is_empty()).then(|| stem.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_component_from_file_name() {
        assert_eq!(
            component_from_path(Path::new("src/components/LoginForm.test.js")).as_deref(),
            Some("LoginForm")
        );
        assert_eq!(
            component_from_path(Path::new("Card.spec.ts")).as_deref(),
            Some("Card")
        );
        assert_eq!(component_from_path(Path::new(".test.js")), None);
    }
}
