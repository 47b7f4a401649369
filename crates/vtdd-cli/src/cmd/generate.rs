use crate::output::{eprint_json, Style};
use anyhow::Context;
use std::path::{Path, PathBuf};
use vtdd_core::{
    issue,
    markers::{TEST_CONTENT_END, TEST_CONTENT_START},
    pipeline,
    requirements::{FeatureRequirements, IssueMetadata},
};

const USAGE: &str = "usage: vtdd generate <componentName> <requirementsJson> [issueNumber] [issueTitle]
       vtdd generate <componentName> --from-issue <file> [issueNumber] [issueTitle]";

pub struct GenerateArgs {
    pub component_name: Option<String>,
    pub requirements_json: Option<String>,
    pub issue_number: Option<String>,
    pub issue_title: Option<String>,
    pub from_issue: Option<PathBuf>,
}

/// Batch flow: validate, generate, self-check, then print the test file
/// between sentinel lines on stdout. Diagnostics go to stderr.
pub fn run(args: GenerateArgs, style: Style, json: bool) -> anyhow::Result<()> {
    let GenerateArgs {
        component_name,
        requirements_json,
        mut issue_number,
        mut issue_title,
        from_issue,
    } = args;
    let Some(component_name) = component_name else {
        anyhow::bail!("missing required argument <componentName>\n{USAGE}");
    };

    let req = match from_issue {
        Some(path) => {
            // Positionals shift left when the JSON argument is replaced by a file.
            if issue_title.is_some() {
                anyhow::bail!("too many arguments for --from-issue\n{USAGE}");
            }
            if let Some(number) = requirements_json {
                issue_title = issue_number.take();
                issue_number = Some(number);
            }
            read_issue_requirements(&path)?
        }
        None => {
            let Some(requirements_json) = requirements_json else {
                anyhow::bail!("missing required argument <requirementsJson>\n{USAGE}");
            };
            FeatureRequirements::from_json(&requirements_json)
                .context("failed to parse requirements JSON")?
        }
    };
    let metadata = IssueMetadata::new(issue_number, issue_title);

    let files = pipeline::prepare(&component_name, &req, Some(&metadata))?;

    println!("{TEST_CONTENT_START}");
    print!("{}", files.test_content);
    println!("{TEST_CONTENT_END}");

    let report = &files.report;
    if json {
        eprint_json(report)?;
        return Ok(());
    }

    eprintln!(
        "{} {} ({} tests)",
        style.success("Generated tests for"),
        component_name,
        report.summary.total_tests
    );
    eprintln!(
        "  Accessibility tests: {}",
        style.yes_no(report.summary.has_accessibility_tests)
    );
    eprintln!(
        "  Follows TDD pattern: {}",
        style.yes_no(report.summary.follows_tdd_pattern)
    );
    for w in &report.warnings {
        eprintln!("  {} {w}", style.warning("warning:"));
    }
    Ok(())
}

fn read_issue_requirements(path: &Path) -> anyhow::Result<FeatureRequirements> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    match issue::extract_requirements(&body) {
        Some(req) => req.with_context(|| {
            format!("failed to parse requirements embedded in {}", path.display())
        }),
        None => anyhow::bail!(
            "{} has no embedded requirements (expected a body written by `vtdd issue`)",
            path.display()
        ),
    }
}
