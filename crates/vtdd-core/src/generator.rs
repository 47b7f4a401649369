//! Test and component scaffold rendering.
//!
//! Rendering is two steps: `TestPlan::build` turns requirements into named
//! groups of cases, and `TestPlan::render` lays those out as a Vitest file.
//! Neither step reads the clock or any other ambient state, so identical
//! inputs always render byte-identical output.

use crate::error::{Result, VtddError};
use crate::markers::{self, ACCEPTANCE_GROUP, ACCESSIBILITY_GROUP, EVENTS_GROUP, PROPS_GROUP};
use crate::paths;
use crate::requirements::{FeatureRequirements, IssueMetadata, PropSpec};
use serde::Serialize;
use std::fmt::Write as _;

const INDENT: &str = "  ";

// ---------------------------------------------------------------------------
// TestPlan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    pub name: String,
    /// Text for the `// RED:` line above the placeholder assertion.
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestGroup {
    pub title: String,
    pub cases: Vec<TestCase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestPlan {
    pub component: String,
    pub issue: Option<(String, String)>,
    pub user_story: Option<String>,
    pub groups: Vec<TestGroup>,
}

impl TestPlan {
    pub fn build(
        component_name: &str,
        req: &FeatureRequirements,
        metadata: Option<&IssueMetadata>,
    ) -> Result<Self> {
        let component = component_name.trim();
        if component.is_empty() {
            return Err(VtddError::EmptyComponentName);
        }

        let metadata = metadata.cloned().unwrap_or_default().or(req.metadata());
        let issue = metadata
            .complete()
            .map(|(n, t)| (n.to_string(), t.to_string()));

        let mut groups = Vec::new();

        push_group(
            &mut groups,
            ACCEPTANCE_GROUP,
            non_blank(&req.acceptance_criteria)
                .map(|c| case(c, c))
                .collect(),
        );

        for (title, items) in req.scenario_groups() {
            push_group(
                &mut groups,
                title,
                non_blank(items).map(|s| case(s, s)).collect(),
            );
        }

        push_group(
            &mut groups,
            PROPS_GROUP,
            req.prop_specs()
                .iter()
                .filter(|p| !p.name.is_empty())
                .map(|p| {
                    case(
                        &format!("accepts the {} prop ({})", p.name, p.prop_type),
                        &format!("mount with props and assert {} is rendered", p.name),
                    )
                })
                .collect(),
        );

        push_group(
            &mut groups,
            EVENTS_GROUP,
            req.event_names()
                .iter()
                .map(|e| {
                    case(
                        &format!("emits {e}"),
                        &format!("trigger the interaction and assert wrapper.emitted('{e}')"),
                    )
                })
                .collect(),
        );

        groups.push(TestGroup {
            title: ACCESSIBILITY_GROUP.to_string(),
            cases: vec![
                case(
                    "is accessible to screen readers",
                    "assert roles, labels and aria-* attributes on the rendered markup",
                ),
                case(
                    "is keyboard navigable",
                    "assert focus order and Enter/Space/Escape handling",
                ),
            ],
        });

        Ok(Self {
            component: component.to_string(),
            issue,
            user_story: req
                .user_story
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            groups,
        })
    }

    pub fn test_count(&self) -> usize {
        self.groups.iter().map(|g| g.cases.len()).sum()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_header(&mut out);

        let name = &self.component;
        out.push_str("import { describe, it, expect, beforeEach } from 'vitest'\n");
        out.push_str("import { mount } from '@vue/test-utils'\n");
        let _ = writeln!(out, "import {name} from './{name}.vue'");
        out.push('\n');

        let _ = writeln!(out, "{}", markers::describe_open(name));
        let _ = writeln!(out, "{INDENT}let wrapper");
        out.push('\n');
        let _ = writeln!(out, "{INDENT}beforeEach(() => {{");
        let _ = writeln!(out, "{INDENT}{INDENT}wrapper = mount({name})");
        let _ = writeln!(out, "{INDENT}}})");

        for group in &self.groups {
            out.push('\n');
            render_group(&mut out, group);
        }
        out.push_str("})\n");
        out
    }

    fn render_header(&self, out: &mut String) {
        out.push_str("/**\n");
        let _ = writeln!(out, " * {} tests", self.component);
        out.push_str(" *\n");
        match &self.issue {
            Some((number, title)) => {
                let _ = writeln!(out, " * Issue #{number}: {}", comment_safe(title));
            }
            None => out.push_str(" * Issue: not linked\n"),
        }
        if let Some(story) = &self.user_story {
            let _ = writeln!(out, " * User story: {}", comment_safe(story));
        }
        out.push_str(" *\n");
        out.push_str(" * Every test starts red. Replace each placeholder assertion with a\n");
        out.push_str(" * real expectation, then implement the component until it passes.\n");
        out.push_str(" */\n");
    }
}

fn render_group(out: &mut String, group: &TestGroup) {
    let _ = writeln!(out, "{INDENT}{}", markers::describe_open(&group.title));
    for (i, case) in group.cases.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let pad = INDENT.repeat(2);
        let body = INDENT.repeat(3);
        let _ = writeln!(out, "{pad}{}", markers::it_open(&case.name));
        let _ = writeln!(out, "{body}{} {}", markers::RED_COMMENT, one_line(&case.hint));
        let _ = writeln!(out, "{body}{}", markers::RED_ASSERTION);
        let _ = writeln!(out, "{pad}}})");
    }
    let _ = writeln!(out, "{INDENT}}})");
}

fn push_group(groups: &mut Vec<TestGroup>, title: &str, cases: Vec<TestCase>) {
    if !cases.is_empty() {
        groups.push(TestGroup {
            title: title.to_string(),
            cases,
        });
    }
}

fn case(name: &str, hint: &str) -> TestCase {
    TestCase {
        name: one_line(name),
        hint: hint.to_string(),
    }
}

fn non_blank(items: &[String]) -> impl Iterator<Item = &str> {
    items.iter().map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Collapse internal newlines so text stays on one comment/string line.
fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn comment_safe(text: &str) -> String {
    one_line(text).replace("*/", "* /")
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Render the Vitest file for `component_name`.
///
/// `metadata` overrides the issue fields carried inside `req`. Fails only when
/// the component name is empty; empty requirements still render a suite with
/// the accessibility stubs.
pub fn generate_test_content(
    component_name: &str,
    req: &FeatureRequirements,
    metadata: Option<&IssueMetadata>,
) -> Result<String> {
    Ok(TestPlan::build(component_name, req, metadata)?.render())
}

/// Render a near-empty Vue single-file component with props and emits wired
/// from the requirements.
pub fn generate_component_scaffold(component_name: &str, req: &FeatureRequirements) -> Result<String> {
    let name = component_name.trim();
    if name.is_empty() {
        return Err(VtddError::EmptyComponentName);
    }

    let mut out = String::new();
    out.push_str("<template>\n");
    let _ = writeln!(out, "{INDENT}<div class=\"{}\">", paths::kebab_case(name));
    let _ = writeln!(out, "{INDENT}{INDENT}<!-- {name} -->");
    let _ = writeln!(out, "{INDENT}</div>");
    out.push_str("</template>\n\n");

    out.push_str("<script setup>\n");
    let props: Vec<PropSpec> = req
        .prop_specs()
        .into_iter()
        .filter(|p| !p.name.is_empty())
        .collect();
    let events = req.event_names();

    if !props.is_empty() {
        out.push_str("const props = defineProps({\n");
        for prop in &props {
            let _ = writeln!(out, "{INDENT}{}: {},", prop.name, vue_prop_type(&prop.prop_type));
        }
        out.push_str("})\n");
    }
    if !events.is_empty() {
        if !props.is_empty() {
            out.push('\n');
        }
        let quoted: Vec<String> = events
            .iter()
            .map(|e| format!("'{}'", markers::escape_js(e)))
            .collect();
        let _ = writeln!(out, "const emit = defineEmits([{}])", quoted.join(", "));
    }
    out.push_str("</script>\n\n");

    out.push_str("<style scoped>\n</style>\n");
    Ok(out)
}

/// Map a free-text prop type onto a Vue runtime prop declaration.
fn vue_prop_type(raw: &str) -> String {
    const CONSTRUCTORS: [&str; 8] = [
        "String", "Number", "Boolean", "Array", "Object", "Function", "Date", "Symbol",
    ];
    if let Some(ctor) = CONSTRUCTORS
        .iter()
        .find(|c| c.eq_ignore_ascii_case(raw))
    {
        return format!("{{ type: {ctor} }}");
    }
    if raw == "any" {
        return "{ type: null }".to_string();
    }
    format!("{{ type: null }} /* {} */", raw.replace("*/", ""))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
