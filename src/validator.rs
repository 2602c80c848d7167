//! CV Document Validation
//!
//! Checks a loosely-typed JSON document against the expected CV shape and
//! collects diagnostics instead of failing:
//!
//! - **Errors** block confident rendering: missing required fields, wrong
//!   types, invalid layout values.
//! - **Warnings** are recoverable: unspecified layout, incomplete profiles,
//!   deprecated `about.tags`, odd date formats.
//!
//! A document is valid iff it produced no errors.

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::document::PageLayout;
use crate::error::{kind_of, CvError, Result};

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: &'static str,
    pub message: String,
    pub path: String,
}

/// Result of validating a document
#[derive(Debug, Default, Clone, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Whether an error with this code was recorded
    pub fn has_error(&self, code: &str) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Whether a warning with this code was recorded
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }

    fn error(&mut self, code: &'static str, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(Diagnostic {
            code,
            message: message.into(),
            path: path.into(),
        });
    }

    fn warning(&mut self, code: &'static str, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(Diagnostic {
            code,
            message: message.into(),
            path: path.into(),
        });
    }
}

/// Top-level sequences that are type-checked, with the fields each entry needs
const SEQUENCE_RULES: &[(&str, &[&str])] = &[
    ("work", &["name", "position", "startDate"]),
    ("education", &["institution", "area", "studyType"]),
    ("skills", &["name"]),
    ("projects", &["name", "description"]),
    ("certificates", &[]),
    ("languages", &[]),
];

/// Sequences whose `startDate`/`endDate` are checked for a date-like shape
const DATED_SEQUENCES: &[&str] = &["work", "education"];

/// The CV document validator
pub struct CvValidator {
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`
    date_pattern: Regex,
}

impl Default for CvValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl CvValidator {
    pub fn new() -> Self {
        Self {
            date_pattern: Regex::new(r"^\d{4}(-\d{2}(-\d{2})?)?$").unwrap(),
        }
    }

    /// Validate a document. Never fails; every problem becomes a diagnostic.
    pub fn validate(&self, document: &Value) -> ValidationResult {
        let mut result = ValidationResult::default();

        if let Err(e) = self.run_checks(document, &mut result) {
            match e {
                CvError::NotAnObject(_) => {
                    result.error("NOT_AN_OBJECT", "", e.to_string());
                    // A non-object has no pageLayout either
                    self.check_page_layout(None, &mut result);
                }
                other => {
                    result.error(
                        "VALIDATION_ABORTED",
                        "",
                        format!("Validation stopped unexpectedly: {}", other),
                    );
                }
            }
        }

        result
    }

    fn run_checks(&self, document: &Value, result: &mut ValidationResult) -> Result<()> {
        let root = document
            .as_object()
            .ok_or_else(|| CvError::NotAnObject(kind_of(document)))?;

        if !is_present(root.get("basics")) {
            result.error("MISSING_BASICS", "basics", "Missing required field: basics");
        }

        self.check_page_layout(root.get("pageLayout"), result);
        self.check_basics(root.get("basics"), result);
        self.check_sequences(root, result);
        self.check_images(root.get("images"), result);
        Ok(())
    }

    fn check_page_layout(&self, layout: Option<&Value>, result: &mut ValidationResult) {
        if !is_present(layout) {
            result.warning(
                "DEFAULT_LAYOUT",
                "pageLayout",
                format!("pageLayout not specified, defaulting to \"{}\"", PageLayout::default()),
            );
            return;
        }

        let Some(layout) = layout else { return };
        let raw = layout.as_str();
        if raw.and_then(PageLayout::parse_canonical).is_some() {
            return;
        }

        let message = match raw.and_then(PageLayout::from_legacy) {
            Some(canonical) => format!(
                "Legacy page layout '{}'. Use \"{}\" instead",
                raw.unwrap_or_default(),
                canonical
            ),
            None => format!(
                "Invalid page layout: {}. Valid values are: {}",
                layout,
                PageLayout::CANONICAL.join(", ")
            ),
        };
        result.error("INVALID_LAYOUT", "pageLayout", message);
    }

    fn check_basics(&self, basics: Option<&Value>, result: &mut ValidationResult) {
        if !is_present(basics) {
            return;
        }
        let Some(basics) = basics.and_then(Value::as_object) else {
            result.error("WRONG_TYPE", "basics", "basics must be an object");
            return;
        };

        for field in ["name", "label"] {
            if !is_non_empty_string(basics.get(field)) {
                result.error(
                    "REQUIRED_STRING",
                    format!("basics.{field}"),
                    format!("basics.{field} is a required string field"),
                );
            }
        }

        for field in ["email", "url", "theme"] {
            let value = basics.get(field);
            if is_present(value) && !value.map_or(false, Value::is_string) {
                result.error(
                    "WRONG_TYPE",
                    format!("basics.{field}"),
                    format!("basics.{field} must be a string"),
                );
            }
        }

        if let Some(profiles) = basics.get("profiles").and_then(Value::as_array) {
            for (i, profile) in profiles.iter().enumerate() {
                if !is_present(profile.get("network")) || !is_present(profile.get("username")) {
                    result.warning(
                        "INCOMPLETE_PROFILE",
                        format!("basics.profiles[{i}]"),
                        format!("profiles[{i}] is missing network or username"),
                    );
                }
            }
        }

        if is_present(basics.get("about")) {
            self.check_about(basics.get("about"), result);
        }
    }

    fn check_about(&self, about: Option<&Value>, result: &mut ValidationResult) {
        let Some(about) = about.and_then(Value::as_object) else {
            result.error("WRONG_TYPE", "basics.about", "basics.about must be an object");
            return;
        };

        check_entries(
            about.get("personalInfo"),
            "basics.about.personalInfo",
            &["emoji", "label", "value"],
            result,
        );
        check_entries(about.get("traits"), "basics.about.traits", &["emoji", "text"], result);
        check_entries(
            about.get("highlights"),
            "basics.about.highlights",
            &["emoji", "text"],
            result,
        );

        if is_present(about.get("quote")) {
            let quote = about.get("quote");
            if !is_non_empty_string(quote.and_then(|q| q.get("text"))) {
                result.error(
                    "REQUIRED_STRING",
                    "basics.about.quote.text",
                    "about.quote.text is a required string field",
                );
            }
            check_entries(
                quote.and_then(|q| q.get("values")),
                "basics.about.quote.values",
                &["emoji", "label"],
                result,
            );
        }

        // Deprecated, superseded by traits/highlights
        if let Some(tags) = about.get("tags").and_then(Value::as_array) {
            for (i, tag) in tags.iter().enumerate() {
                if !is_present(tag.get("icon")) || !is_present(tag.get("text")) {
                    result.warning(
                        "LEGACY_TAG",
                        format!("basics.about.tags[{i}]"),
                        format!(
                            "about.tags[{i}] is missing icon or text (consider migrating to traits)"
                        ),
                    );
                }
            }
        }
    }

    fn check_sequences(&self, root: &Map<String, Value>, result: &mut ValidationResult) {
        for (field, required) in SEQUENCE_RULES {
            let value = root.get(*field);
            if is_present(value) && !value.map_or(false, Value::is_array) {
                result.error(
                    "NOT_AN_ARRAY",
                    *field,
                    format!("{field} must be an array"),
                );
                continue;
            }
            if !required.is_empty() {
                check_required(value, field, required, result);
            }
        }

        for field in DATED_SEQUENCES {
            let Some(entries) = root.get(*field).and_then(Value::as_array) else {
                continue;
            };
            for (i, entry) in entries.iter().enumerate() {
                for key in ["startDate", "endDate"] {
                    let Some(date) = entry.get(key).and_then(Value::as_str) else {
                        continue;
                    };
                    if !date.is_empty() && !self.date_pattern.is_match(date) {
                        result.warning(
                            "DATE_FORMAT",
                            format!("{field}[{i}].{key}"),
                            format!("{field}[{i}].{key} '{date}' is not YYYY, YYYY-MM or YYYY-MM-DD"),
                        );
                    }
                }
            }
        }
    }

    fn check_images(&self, images: Option<&Value>, result: &mut ValidationResult) {
        if !is_present(images) {
            return;
        }
        check_required(
            images.and_then(|i| i.get("list")),
            "images.list",
            &["image"],
            result,
        );
    }
}

/// Shortcut for a one-off validation
pub fn validate_cv(document: &Value) -> ValidationResult {
    CvValidator::new().validate(document)
}

/// Emoji-style entries: required fields are errors, a non-string `color` is a
/// warning.
fn check_entries(items: Option<&Value>, path: &str, required: &[&str], result: &mut ValidationResult) {
    check_required(items, path, required, result);

    let Some(items) = items.and_then(Value::as_array) else {
        return;
    };
    for (i, item) in items.iter().enumerate() {
        let color = item.get("color");
        if is_present(color) && !color.map_or(false, Value::is_string) {
            result.warning(
                "COLOR_NOT_STRING",
                format!("{path}[{i}].color"),
                format!("{path}[{i}].color should be a string"),
            );
        }
    }
}

fn check_required(items: Option<&Value>, path: &str, required: &[&str], result: &mut ValidationResult) {
    let Some(items) = items.and_then(Value::as_array) else {
        return;
    };
    for (i, item) in items.iter().enumerate() {
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|field| !is_present(item.get(*field)))
            .collect();
        if !missing.is_empty() {
            result.error(
                "MISSING_FIELDS",
                format!("{path}[{i}]"),
                format!("{path}[{i}] is missing required fields: {}", missing.join(", ")),
            );
        }
    }
}

/// Presence in the loose sense CV files are written with: absent, `null`,
/// `false`, `0` and `""` all count as missing.
pub(crate) fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

pub(crate) fn is_non_empty_string(value: Option<&Value>) -> bool {
    value.and_then(Value::as_str).map_or(false, |s| !s.is_empty())
}
