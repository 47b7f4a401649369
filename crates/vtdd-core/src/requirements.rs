use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// FeatureRequirements
// ---------------------------------------------------------------------------

/// Structured feature requirements, as collected by `vtdd issue` or passed to
/// `vtdd generate` as JSON. Keys are camelCase on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRequirements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_story: Option<String>,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    #[serde(default)]
    pub happy_path: Vec<String>,
    #[serde(default)]
    pub edge_cases: Vec<String>,
    #[serde(default)]
    pub error_cases: Vec<String>,
    /// Comma-separated `name:type` pairs.
    #[serde(default)]
    pub props: String,
    /// Comma-separated event names.
    #[serde(default)]
    pub events: String,
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub issue_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_title: Option<String>,
}

impl FeatureRequirements {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// True when at least one scenario list has an entry.
    pub fn has_scenarios(&self) -> bool {
        self.scenario_groups()
            .iter()
            .any(|(_, items)| !items.is_empty())
    }

    /// Scenario lists paired with their display names, in render order.
    pub fn scenario_groups(&self) -> [(&'static str, &[String]); 3] {
        [
            ("Happy Path", self.happy_path.as_slice()),
            ("Edge Cases", self.edge_cases.as_slice()),
            ("Error Cases", self.error_cases.as_slice()),
        ]
    }

    pub fn prop_specs(&self) -> Vec<PropSpec> {
        parse_props(&self.props)
    }

    pub fn event_names(&self) -> Vec<String> {
        parse_events(&self.events)
    }

    /// Issue metadata embedded in the requirements payload itself.
    pub fn metadata(&self) -> IssueMetadata {
        IssueMetadata {
            issue_number: self.issue_number.clone(),
            issue_title: self.issue_title.clone(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(u64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    }))
}

// ---------------------------------------------------------------------------
// IssueMetadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_title: Option<String>,
}

impl IssueMetadata {
    pub fn new(issue_number: Option<String>, issue_title: Option<String>) -> Self {
        Self {
            issue_number,
            issue_title,
        }
    }

    /// Both number and title, when both are present and non-blank.
    pub fn complete(&self) -> Option<(&str, &str)> {
        let number = self.issue_number.as_deref().map(str::trim)?;
        let title = self.issue_title.as_deref().map(str::trim)?;
        if number.is_empty() || title.is_empty() {
            return None;
        }
        Some((number.trim_start_matches('#'), title))
    }

    /// Non-blank fields on `self` win over `fallback`.
    pub fn or(self, fallback: IssueMetadata) -> IssueMetadata {
        IssueMetadata {
            issue_number: non_blank(self.issue_number).or(fallback.issue_number),
            issue_title: non_blank(self.issue_title).or(fallback.issue_title),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Props / events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub prop_type: String,
}

/// Parse `"label:String, disabled:Boolean, size"` into prop specs. A missing
/// type becomes `any`. Entries with an empty name are kept so the validator
/// can report them.
pub fn parse_props(raw: &str) -> Vec<PropSpec> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, ty) = match entry.split_once(':') {
                Some((n, t)) => (n.trim(), t.trim()),
                None => (entry, ""),
            };
            PropSpec {
                name: name.to_string(),
                prop_type: if ty.is_empty() { "any".to_string() } else { ty.to_string() },
            }
        })
        .collect()
}

pub fn parse_events(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_json() {
        let json = r#"{
            "userStory": "As a user I want to log in",
            "acceptanceCriteria": ["Given valid credentials, when submitted, then user is redirected"],
            "edgeCases": ["empty password"],
            "props": "title:String",
            "issueNumber": 42
        }"#;
        let req = FeatureRequirements::from_json(json).unwrap();
        assert_eq!(req.acceptance_criteria.len(), 1);
        assert_eq!(req.edge_cases, vec!["empty password"]);
        assert!(req.happy_path.is_empty());
        assert_eq!(req.issue_number.as_deref(), Some("42"));
        assert!(req.has_scenarios());
    }

    #[test]
    fn issue_number_accepts_string() {
        let req = FeatureRequirements::from_json(r##"{"issueNumber": "#7"}"##).unwrap();
        assert_eq!(req.issue_number.as_deref(), Some("#7"));
        assert!(!req.has_scenarios());
    }

    #[test]
    fn malformed_json_is_error() {
        assert!(matches!(
            FeatureRequirements::from_json("{not json"),
            Err(crate::VtddError::Json(_))
        ));
    }

    #[test]
    fn parse_props_defaults_type() {
        let props = parse_props(" label:String , disabled : Boolean,size,, ");
        assert_eq!(
            props,
            vec![
                PropSpec { name: "label".into(), prop_type: "String".into() },
                PropSpec { name: "disabled".into(), prop_type: "Boolean".into() },
                PropSpec { name: "size".into(), prop_type: "any".into() },
            ]
        );
    }

    #[test]
    fn parse_props_keeps_empty_names_for_validation() {
        let props = parse_props(":String");
        assert_eq!(props.len(), 1);
        assert!(props[0].name.is_empty());
    }

    #[test]
    fn parse_events_trims() {
        assert_eq!(parse_events("submit, cancel ,,"), vec!["submit", "cancel"]);
        assert!(parse_events("").is_empty());
    }

    #[test]
    fn metadata_complete_requires_both() {
        let m = IssueMetadata::new(Some("#12".into()), Some("Login form".into()));
        assert_eq!(m.complete(), Some(("12", "Login form")));
        assert_eq!(IssueMetadata::new(Some("12".into()), None).complete(), None);
        assert_eq!(IssueMetadata::new(Some("12".into()), Some(" ".into())).complete(), None);
    }

    #[test]
    fn metadata_or_prefers_explicit() {
        let explicit = IssueMetadata::new(Some("3".into()), None);
        let merged = explicit.or(IssueMetadata::new(Some("9".into()), Some("Title".into())));
        assert_eq!(merged.issue_number.as_deref(), Some("3"));
        assert_eq!(merged.issue_title.as_deref(), Some("Title"));
    }

    #[test]
    fn metadata_or_ignores_blank_explicit_fields() {
        let explicit = IssueMetadata::new(Some("".into()), Some("  ".into()));
        let merged = explicit.or(IssueMetadata::new(Some("5".into()), Some("Login".into())));
        assert_eq!(merged.complete(), Some(("5", "Login")));
    }
}
