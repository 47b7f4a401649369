use crate::content::{perform_full_validation, ContentReport};
use crate::error::Result;
use crate::generator::{generate_component_scaffold, generate_test_content};
use crate::requirements::{FeatureRequirements, IssueMetadata};
use crate::validation::validate_requirements;

/// A validated, self-checked component/test pair ready to be written.
#[derive(Debug, Clone)]
pub struct GeneratedFiles {
    pub test_content: String,
    pub component_content: String,
    pub report: ContentReport,
}

/// Requirements validation, then generation, then the content self-check.
/// Any failing stage aborts with its full error list.
pub fn prepare(
    component_name: &str,
    req: &FeatureRequirements,
    metadata: Option<&IssueMetadata>,
) -> Result<GeneratedFiles> {
    validate_requirements(component_name, req).into_result()?;

    let test_content = generate_test_content(component_name, req, metadata)?;
    let report = perform_full_validation(&test_content, component_name).into_result()?;
    let component_content = generate_component_scaffold(component_name, req)?;

    tracing::debug!(
        component = component_name,
        tests = report.summary.total_tests,
        "generated test content"
    );

    Ok(GeneratedFiles {
        test_content,
        component_content,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VtddError;

    #[test]
    fn login_form_end_to_end() {
        let req = FeatureRequirements {
            acceptance_criteria: vec![
                "Given valid credentials, when submitted, then user is redirected".into(),
            ],
            ..Default::default()
        };
        let files = prepare("LoginForm", &req, None).unwrap();
        assert_eq!(files.report.summary.total_errors, 0);
        assert_eq!(files.report.summary.total_tests, 3);
        assert!(files.component_content.contains("<template>"));
    }

    #[test]
    fn empty_name_stops_at_validation() {
        let req = FeatureRequirements {
            acceptance_criteria: vec!["x".into()],
            ..Default::default()
        };
        match prepare("", &req, None) {
            Err(VtddError::InvalidRequirements(errors)) => {
                assert!(errors.iter().any(|e| e.contains("component name is required")));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
