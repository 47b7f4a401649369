use crate::config::Config;
use crate::error::Result;
use crate::paths;
use crate::requirements::FeatureRequirements;
use crate::tool_runner;
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Start of the hidden comment that carries the requirements as JSON, so
/// automation can feed an issue straight back into `vtdd generate`.
pub const REQUIREMENTS_MARKER: &str = "<!-- vtdd:requirements";

// ---------------------------------------------------------------------------
// IssueDraft
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueDraft {
    pub component: String,
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}

impl IssueDraft {
    pub fn new(
        component: &str,
        title: Option<&str>,
        req: &FeatureRequirements,
        config: &Config,
    ) -> Result<Self> {
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Implement {component} component"));
        Ok(Self {
            component: component.to_string(),
            title,
            body: build_issue_body(component, req, config.coverage.threshold)?,
            labels: config.issues.labels.clone(),
        })
    }
}

pub fn build_issue_body(
    component: &str,
    req: &FeatureRequirements,
    coverage_threshold: u32,
) -> Result<String> {
    let mut out = String::new();

    if let Some(story) = req.user_story.as_deref().filter(|s| !s.trim().is_empty()) {
        let _ = writeln!(out, "## User Story\n\n{}\n", story.trim());
    }

    let _ = writeln!(out, "## Component\n\n`{component}`\n");

    if !req.acceptance_criteria.is_empty() {
        out.push_str("## Acceptance Criteria\n\n");
        for c in &req.acceptance_criteria {
            let _ = writeln!(out, "- [ ] {}", c.trim());
        }
        out.push('\n');
    }

    if req.has_scenarios() {
        out.push_str("## Test Scenarios\n\n");
        for (title, items) in req.scenario_groups() {
            if items.is_empty() {
                continue;
            }
            let _ = writeln!(out, "### {title}\n");
            for item in items {
                let _ = writeln!(out, "- {}", item.trim());
            }
            out.push('\n');
        }
    }

    let props = req.prop_specs();
    if !props.is_empty() {
        out.push_str("## Props\n\n| Name | Type |\n| --- | --- |\n");
        for p in &props {
            let _ = writeln!(out, "| `{}` | `{}` |", p.name, p.prop_type);
        }
        out.push('\n');
    }

    let events = req.event_names();
    if !events.is_empty() {
        out.push_str("## Events\n\n");
        for e in &events {
            let _ = writeln!(out, "- `{e}`");
        }
        out.push('\n');
    }

    out.push_str("## Definition of Done\n\n");
    out.push_str("- [ ] Failing tests written (red)\n");
    out.push_str("- [ ] Component implemented until tests pass (green)\n");
    out.push_str("- [ ] Code refactored with tests still passing\n");
    out.push_str("- [ ] Accessibility tests pass\n");
    let _ = writeln!(out, "- [ ] Coverage at or above {coverage_threshold}%");
    out.push('\n');

    let json = serde_json::to_string(req)?;
    let _ = writeln!(out, "{REQUIREMENTS_MARKER} {} -->", json.replace("-->", "--\\u003e"));
    Ok(out)
}

/// Recover the requirements embedded by `build_issue_body`, if present.
pub fn extract_requirements(body: &str) -> Option<Result<FeatureRequirements>> {
    let start = body.find(REQUIREMENTS_MARKER)? + REQUIREMENTS_MARKER.len();
    let end = body[start..].find("-->")? + start;
    Some(FeatureRequirements::from_json(body[start..end].trim()))
}

// ---------------------------------------------------------------------------
// Publishing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IssueOutcome {
    /// The tracker CLI created the issue; `url` is whatever it printed.
    Created { url: String },
    /// The tracker CLI failed; the body was written locally instead.
    Saved { path: PathBuf, reason: String },
}

/// Create the issue with the configured tracker CLI, falling back to a local
/// Markdown file when the tool is missing or fails.
pub fn publish_issue(root: &Path, config: &Config, draft: &IssueDraft) -> Result<IssueOutcome> {
    match create_with_tool(root, config, draft) {
        Ok(url) => Ok(IssueOutcome::Created { url }),
        Err(e) => {
            tracing::warn!(error = %e, "issue creation failed, writing issue body locally");
            let path = save_fallback(root, config, draft)?;
            Ok(IssueOutcome::Saved {
                path,
                reason: e.to_string(),
            })
        }
    }
}

fn create_with_tool(root: &Path, config: &Config, draft: &IssueDraft) -> Result<String> {
    let mut body_file = NamedTempFile::new()?;
    body_file.write_all(draft.body.as_bytes())?;
    let body_path = body_file.path().to_string_lossy().into_owned();

    let mut args = vec![
        "issue",
        "create",
        "--title",
        draft.title.as_str(),
        "--body-file",
        body_path.as_str(),
    ];
    for label in &draft.labels {
        args.push("--label");
        args.push(label.as_str());
    }
    tool_runner::run_tool(&config.issues.tool, &args, root)
}

fn save_fallback(root: &Path, config: &Config, draft: &IssueDraft) -> Result<PathBuf> {
    let path = paths::issue_fallback_path(root, &config.issues.fallback_dir, &draft.component);
    let mut text = format!("# {}\n\n", draft.title);
    if !draft.labels.is_empty() {
        let _ = writeln!(text, "Labels: {}\n", draft.labels.join(", "));
    }
    text.push_str(&draft.body);
    crate::io::atomic_write(&path, text.as_bytes())?;
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
