use crate::cmd::scaffold;
use crate::output::Style;
use crate::prompt::Prompter;
use anyhow::Context;
use std::io::{BufRead, Write};
use std::path::Path;
use vtdd_core::{
    config::Config,
    issue::{publish_issue, IssueDraft, IssueOutcome},
    paths,
    requirements::{FeatureRequirements, IssueMetadata},
    tool_runner,
    validation::validate_requirements,
    VtddError,
};

pub fn run(root: &Path, style: Style) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    config.ensure_valid()?;
    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
    run_with(root, &config, &mut prompter, style)
}

/// Interactive flow: collect requirements, publish the issue, then optionally
/// branch and scaffold.
pub fn run_with<R: BufRead, W: Write>(
    root: &Path,
    config: &Config,
    prompter: &mut Prompter<R, W>,
    style: Style,
) -> anyhow::Result<()> {
    prompter.say(&style.heading("New TDD feature issue"))?;

    let component = prompter.ask_validated("Component name (PascalCase)", |s| {
        paths::validate_component_name(s).map_err(|e| e.to_string())
    })?;
    let title = prompter.ask("Issue title (blank for default)")?;
    let user_story = prompter.ask("User story (As a ..., I want ..., so that ...)")?;
    let acceptance_criteria = prompter.ask_list("Acceptance criteria (Given ..., when ..., then ...)")?;
    let happy_path = prompter.ask_list("Happy path scenarios")?;
    let edge_cases = prompter.ask_list("Edge cases")?;
    let error_cases = prompter.ask_list("Error cases")?;
    let props = prompter.ask("Props (name:Type, comma separated)")?;
    let events = prompter.ask("Events (comma separated)")?;

    let req = FeatureRequirements {
        user_story: (!user_story.is_empty()).then_some(user_story),
        acceptance_criteria,
        happy_path,
        edge_cases,
        error_cases,
        props,
        events,
        issue_number: None,
        issue_title: None,
    };
    validate_requirements(&component, &req).into_result()?;

    let draft = IssueDraft::new(&component, Some(&title), &req, config)?;
    let outcome = publish_issue(root, config, &draft)?;
    let issue_number = match &outcome {
        IssueOutcome::Created { url } => {
            prompter.say(&format!("{} {url}", style.success("Created issue")))?;
            issue_number_from_url(url)
        }
        IssueOutcome::Saved { path, reason } => {
            prompter.say(&format!(
                "{} {reason}",
                style.warning("Could not create issue:")
            ))?;
            prompter.say(&format!("Issue body saved to {}", path.display()))?;
            None
        }
    };

    if config.git.create_branch {
        let branch = branch_name(&config.git.branch_prefix, issue_number.as_deref(), &component);
        if prompter.confirm(&format!("Create branch {branch}?"), true)? {
            match tool_runner::create_branch(root, &branch) {
                Ok(()) => prompter.say(&format!("{} {branch}", style.success("Switched to"))),
                Err(e) => {
                    tracing::warn!(error = %e, branch = %branch, "branch creation failed");
                    prompter.say(&format!(
                        "{} branch {branch} may already exist ({e})",
                        style.warning("note:")
                    ))
                }
            }?;
        }
    }

    if prompter.confirm("Scaffold component and test files now?", true)? {
        let metadata = IssueMetadata::new(issue_number, Some(draft.title.clone()));
        match scaffold::write_scaffold(root, config, &component, &req, Some(&metadata)) {
            Ok(written) => scaffold::print_written(&written, style),
            Err(e) => match e.downcast_ref::<VtddError>() {
                Some(VtddError::FileExists(path)) => prompter.say(&format!(
                    "{} {} already exists; scaffold skipped",
                    style.warning("note:"),
                    path.display()
                ))?,
                _ => return Err(e),
            },
        }
    }

    Ok(())
}

/// `https://github.com/o/r/issues/42` -> `42`.
fn issue_number_from_url(url: &str) -> Option<String> {
    let last = url.trim().trim_end_matches('/').rsplit('/').next()?;
    (!last.is_empty() && last.chars().all(|c| c.is_ascii_digit())).then(|| last.to_string())
}

fn branch_name(prefix: &str, issue_number: Option<&str>, component: &str) -> String {
    let slug = paths::kebab_case(component);
    match issue_number {
        Some(n) => format!("{prefix}{n}-{slug}"),
        None => format!("{prefix}{slug}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn offline_config() -> Config {
        let mut config = Config::default();
        config.issues.tool = "vtdd-no-such-tracker".to_string();
        config.git.create_branch = false;
        config
    }

    fn answers(lines: &[&str]) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        let mut input = lines.join("\n");
        input.push('\n');
        Prompter::new(Cursor::new(input.into_bytes()), Vec::new())
    }

    #[test]
    fn parses_issue_number_from_url() {
        assert_eq!(
            issue_number_from_url("https://github.com/o/r/issues/42\n").as_deref(),
            Some("42")
        );
        assert_eq!(issue_number_from_url("created"), None);
    }

    #[test]
    fn branch_name_includes_issue_number() {
        assert_eq!(branch_name("feature/", Some("7"), "LoginForm"), "feature/7-login-form");
        assert_eq!(branch_name("feat-", None, "Card"), "feat-card");
    }

    #[test]
    fn full_flow_saves_issue_and_scaffolds() {
        let dir = TempDir::new().unwrap();
        let config = offline_config();
        let mut prompter = answers(&[
            "login form",
            "LoginForm",
            "Login form",
            "As a user I want to log in",
            "Given valid credentials, when submitted, then user is redirected",
            "",
            "",
            "",
            "",
            "title:String",
            "submit",
            "y",
        ]);

        run_with(dir.path(), &config, &mut prompter, Style::plain()).unwrap();

        let issue = std::fs::read_to_string(dir.path().join(".vtdd/issues/LoginForm.md")).unwrap();
        assert!(issue.starts_with("# Login form"));
        let test_file =
            std::fs::read_to_string(dir.path().join("src/components/LoginForm.test.js")).unwrap();
        assert!(test_file.contains("describe('LoginForm', () => {"));
        assert!(test_file.contains(" * Issue: not linked"));
        assert!(dir.path().join("src/components/LoginForm.vue").exists());

        let shown = String::from_utf8(prompter_output(prompter)).unwrap();
        assert!(shown.contains("PascalCase"));
    }

    #[test]
    fn existing_files_skip_scaffold_without_error() {
        let dir = TempDir::new().unwrap();
        let config = offline_config();
        let existing = dir.path().join("src/components/Card.vue");
        std::fs::create_dir_all(existing.parent().unwrap()).unwrap();
        std::fs::write(&existing, "keep").unwrap();

        let mut prompter = answers(&["Card", "", "", "renders", "", "", "", "", "", "", "y"]);
        run_with(dir.path(), &config, &mut prompter, Style::plain()).unwrap();

        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "keep");
        assert!(!dir.path().join("src/components/Card.test.js").exists());
    }

    #[test]
    fn invalid_requirements_abort_before_publishing() {
        let dir = TempDir::new().unwrap();
        let config = offline_config();
        let mut prompter = answers(&["Card", "", "", "", "", "", "", "", ""]);
        let err = run_with(dir.path(), &config, &mut prompter, Style::plain()).unwrap_err();
        assert!(format!("{err:#}").contains("acceptance criterion"));
        assert!(!dir.path().join(".vtdd/issues/Card.md").exists());
    }

    #[test]
    fn branch_failure_is_reported_and_scaffold_still_written() {
        let dir = TempDir::new().unwrap();
        let mut config = offline_config();
        config.git.create_branch = true;
        let mut prompter = answers(&["Card", "", "", "renders", "", "", "", "", "", "", "y", "y"]);

        run_with(dir.path(), &config, &mut prompter, Style::plain()).unwrap();

        let shown = String::from_utf8(prompter_output(prompter)).unwrap();
        assert!(shown.contains("Create branch feature/card?"));
        assert!(shown.contains("branch feature/card may already exist"));
        assert!(dir.path().join("src/components/Card.vue").exists());
        assert!(dir.path().join("src/components/Card.test.js").exists());
    }

    #[cfg(unix)]
    #[test]
    fn created_issue_number_flows_into_branch_and_header() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let tracker = dir.path().join("tracker.sh");
        std::fs::write(&tracker, "#!/bin/sh\necho https://x/issues/7\n").unwrap();
        std::fs::set_permissions(&tracker, std::fs::Permissions::from_mode(0o755)).unwrap();

        let mut config = offline_config();
        config.issues.tool = tracker.to_string_lossy().into_owned();
        config.git.create_branch = true;
        let mut prompter = answers(&["Card", "", "", "renders", "", "", "", "", "", "", "y", "y"]);

        run_with(dir.path(), &config, &mut prompter, Style::plain()).unwrap();

        let shown = String::from_utf8(prompter_output(prompter)).unwrap();
        assert!(shown.contains("Created issue https://x/issues/7"));
        assert!(shown.contains("Create branch feature/7-card?"));
        assert!(!dir.path().join(".vtdd/issues/Card.md").exists());
        let test_file =
            std::fs::read_to_string(dir.path().join("src/components/Card.test.js")).unwrap();
        assert!(test_file.contains(" * Issue #7: Implement Card component"));
    }

    fn prompter_output(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> Vec<u8> {
        p.into_output()
    }
}
