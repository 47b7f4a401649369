//! Structural markers shared by the generator and the content validator.
//!
//! Both sides render and scan through these helpers, so a generated file is
//! always recognised by the validator.

pub const ACCEPTANCE_GROUP: &str = "Acceptance Criteria";
pub const ACCESSIBILITY_GROUP: &str = "Accessibility";
pub const PROPS_GROUP: &str = "Props";
pub const EVENTS_GROUP: &str = "Events";

/// The placeholder assertion every generated stub starts with.
pub const RED_ASSERTION: &str = "expect(true).toBe(false)";
pub const RED_COMMENT: &str = "// RED:";

pub const TEST_CONTENT_START: &str = "TEST_CONTENT_START";
pub const TEST_CONTENT_END: &str = "TEST_CONTENT_END";

/// `describe('<name>', () => {`
pub fn describe_open(name: &str) -> String {
    format!("describe('{}', () => {{", escape_js(name))
}

/// `it('<name>', () => {`
pub fn it_open(name: &str) -> String {
    format!("it('{}', () => {{", escape_js(name))
}

/// Escape text for a single-quoted JavaScript string literal.
pub fn escape_js(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}
