use crate::error::{Result, VtddError};
use crate::paths;
use crate::requirements::FeatureRequirements;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn into_result(self) -> Result<()> {
        if self.valid {
            Ok(())
        } else {
            Err(VtddError::InvalidRequirements(self.errors))
        }
    }
}

static EVENT_RE: OnceLock<Regex> = OnceLock::new();

fn event_re() -> &'static Regex {
    EVENT_RE.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9:_\-]*$").unwrap())
}

static PROP_RE: OnceLock<Regex> = OnceLock::new();

/// Prop names are emitted as bare object keys in `defineProps`.
fn prop_re() -> &'static Regex {
    PROP_RE.get_or_init(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap())
}

// ---------------------------------------------------------------------------
// validate_requirements
// ---------------------------------------------------------------------------

/// Check requirements for completeness before generating anything.
///
/// Every problem is collected; the caller sees the full list in one pass.
pub fn validate_requirements(component_name: &str, req: &FeatureRequirements) -> ValidationResult {
    let mut errors = Vec::new();

    if let Err(e) = paths::validate_component_name(component_name) {
        errors.push(e.to_string());
    }

    if req.acceptance_criteria.is_empty() && !req.has_scenarios() {
        errors.push(
            "at least one acceptance criterion or test scenario is required".to_string(),
        );
    }

    check_blank_entries("acceptanceCriteria", &req.acceptance_criteria, &mut errors);
    check_blank_entries("happyPath", &req.happy_path, &mut errors);
    check_blank_entries("edgeCases", &req.edge_cases, &mut errors);
    check_blank_entries("errorCases", &req.error_cases, &mut errors);

    let mut seen = HashSet::new();
    for (i, prop) in req.prop_specs().iter().enumerate() {
        if prop.name.is_empty() {
            errors.push(format!("props[{i}] has no name"));
        } else if !prop_re().is_match(&prop.name) {
            errors.push(format!("invalid prop name '{}'", prop.name));
        } else if !seen.insert(prop.name.as_str().to_owned()) {
            errors.push(format!("duplicate prop '{}'", prop.name));
        }
    }

    for event in req.event_names() {
        if !event_re().is_match(&event) {
            errors.push(format!("invalid event name '{event}'"));
        }
    }

    ValidationResult::from_errors(errors)
}

fn check_blank_entries(field: &str, items: &[String], errors: &mut Vec<String>) {
    for (i, item) in items.iter().enumerate() {
        if item.trim().is_empty() {
            errors.push(format!("{field}[{i}] is empty"));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn login_requirements() -> FeatureRequirements {
        FeatureRequirements {
            acceptance_criteria: vec![
                "Given valid credentials, when submitted, then user is redirected".into(),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn accepts_minimal_requirements() {
        let result = validate_requirements("LoginForm", &login_requirements());
        assert!(result.valid, "{:?}", result.errors);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn scenarios_alone_are_enough() {
        let req = FeatureRequirements {
            error_cases: vec!["network down".into()],
            ..Default::default()
        };
        assert!(validate_requirements("LoginForm", &req).valid);
    }

    #[test]
    fn rejects_empty_requirements() {
        let result = validate_requirements("LoginForm", &FeatureRequirements::default());
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("acceptance criterion"));
    }

    #[test]
    fn accumulates_every_error() {
        let req = FeatureRequirements {
            happy_path: vec!["  ".into()],
            props: "label:String, :Number, label:String".into(),
            events: "submit, bad event".into(),
            ..Default::default()
        };
        let result = validate_requirements("", &req);
        assert!(!result.valid);
        let joined = result.errors.join("\n");
        assert!(joined.contains("component name is required"));
        assert!(joined.contains("happyPath[0] is empty"));
        assert!(joined.contains("props[1] has no name"));
        assert!(joined.contains("duplicate prop 'label'"));
        assert!(joined.contains("invalid event name 'bad event'"));
        assert_eq!(result.errors.len(), 5);
    }

    #[test]
    fn rejects_prop_names_that_are_not_identifiers() {
        let req = FeatureRequirements {
            acceptance_criteria: vec!["renders an icon".into()],
            props: "aria-label:String, on click:Boolean, $attrs2, _size:Number".into(),
            ..Default::default()
        };
        let result = validate_requirements("IconButton", &req);
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![
                "invalid prop name 'aria-label'".to_string(),
                "invalid prop name 'on click'".to_string(),
            ]
        );
    }

    #[test]
    fn rejects_lowercase_component_name() {
        let result = validate_requirements("loginForm", &login_requirements());
        assert!(!result.valid);
        assert!(result.errors[0].contains("PascalCase"));
    }

    #[test]
    fn into_result_carries_errors() {
        let err = validate_requirements("LoginForm", &FeatureRequirements::default())
            .into_result()
            .unwrap_err();
        match err {
            VtddError::InvalidRequirements(errors) => assert_eq!(errors.len(), 1),
            other => panic!("unexpected error: {other}"),
        }
    }
}
