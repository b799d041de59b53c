#![forbid(unsafe_code)]

//! Declarative form validation.
//!
//! Each form declares its rules once at setup; `validate` walks them against
//! the current control values and returns a [`ValidationReport`]. Failures
//! are expected control outcomes, not errors — nothing here returns `Result`.
//!
//! # Annotation contract
//!
//! An invalid field carries the `error` class and exactly one annotation
//! element (class `error-message`, child of the field's parent, tagged with
//! `data-for` so sibling fields sharing a wrapper never collide). Annotating
//! always clears the prior annotation first, so messages never stack.

use pagekit_dom::{Document, NodeId};

/// Class set on a field while it is invalid.
pub const ERROR_CLASS: &str = "error";

/// Class carried by the annotation element.
pub const ANNOTATION_CLASS: &str = "error-message";

/// The attribute linking an annotation to its field.
const ANNOTATION_FOR: &str = "data-for";

/// What a field rule checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Trimmed value must be non-empty.
    Required,
    /// Non-empty value must look like `local@domain.tld`.
    Email,
    /// Non-empty value may only contain digits, whitespace, `+ - ( )`.
    Phone,
}

/// One validation rule bound to a field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// The form control this rule checks.
    pub field: NodeId,
    /// What the rule checks.
    pub kind: RuleKind,
    /// Message shown when the rule fails.
    pub message: String,
}

impl FieldRule {
    /// A required-field rule.
    #[must_use]
    pub fn required(field: NodeId, message: &str) -> Self {
        Self {
            field,
            kind: RuleKind::Required,
            message: message.to_string(),
        }
    }

    /// An email-format rule.
    #[must_use]
    pub fn email(field: NodeId, message: &str) -> Self {
        Self {
            field,
            kind: RuleKind::Email,
            message: message.to_string(),
        }
    }

    /// A phone-format rule.
    #[must_use]
    pub fn phone(field: NodeId, message: &str) -> Self {
        Self {
            field,
            kind: RuleKind::Phone,
            message: message.to_string(),
        }
    }
}

/// A form's declared validation surface.
#[derive(Debug, Clone)]
pub struct FormBinding {
    /// The form element.
    pub form: NodeId,
    /// The submit control, if the form has one.
    pub submit: Option<NodeId>,
    /// Rules, evaluated in declaration order.
    pub rules: Vec<FieldRule>,
}

impl FormBinding {
    /// Bind a form with no rules yet.
    #[must_use]
    pub fn new(form: NodeId) -> Self {
        Self {
            form,
            submit: None,
            rules: Vec::new(),
        }
    }

    /// Set the submit control.
    #[must_use]
    pub fn submit(mut self, control: NodeId) -> Self {
        self.submit = Some(control);
        self
    }

    /// Add a rule.
    #[must_use]
    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// Per-field validation outcome. Empty ⇒ the form may submit.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    errors: Vec<(NodeId, String)>,
}

impl ValidationReport {
    /// Whether every rule passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Failing fields with their messages, in rule order.
    #[must_use]
    pub fn errors(&self) -> &[(NodeId, String)] {
        &self.errors
    }

    /// The message for a specific field, if it failed.
    #[must_use]
    pub fn error_for(&self, field: NodeId) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    /// Number of failing fields.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

/// Evaluate `rules` against current control values.
///
/// A field collects at most one error: the first failing rule wins, later
/// rules for the same field are skipped.
#[must_use]
pub fn validate(doc: &Document, rules: &[FieldRule]) -> ValidationReport {
    let mut report = ValidationReport::default();
    for rule in rules {
        if report.error_for(rule.field).is_some() {
            continue;
        }
        let value = doc.value(rule.field);
        let failed = match rule.kind {
            RuleKind::Required => value.trim().is_empty(),
            RuleKind::Email => !value.is_empty() && !is_valid_email(value),
            RuleKind::Phone => !value.is_empty() && !is_valid_phone(value),
        };
        if failed {
            report.errors.push((rule.field, rule.message.clone()));
        }
    }
    report
}

/// `local@domain.tld` shape: exactly one `@`, non-empty local part, no
/// whitespace anywhere, and a `.` strictly inside the domain part.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i < domain.len() - 1)
}

/// Digits, whitespace, and `+ - ( )` only.
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '(' | ')'))
}

/// Mark `field` invalid with `message`, replacing any prior annotation.
pub fn annotate(doc: &mut Document, field: NodeId, message: &str) {
    clear_annotation(doc, field);
    doc.add_class(field, ERROR_CLASS);
    let Some(parent) = doc.parent(field) else {
        return;
    };
    let note = doc.create_element("div");
    doc.add_class(note, ANNOTATION_CLASS);
    doc.set_attr(note, ANNOTATION_FOR, &field.index().to_string());
    doc.set_text(note, message);
    doc.append_child(parent, note);
}

/// Clear `field`'s error class and annotation, if any.
pub fn clear_annotation(doc: &mut Document, field: NodeId) {
    doc.remove_class(field, ERROR_CLASS);
    if let Some(note) = annotation_for(doc, field) {
        doc.remove(note);
    }
}

/// The field's live annotation element, if present.
#[must_use]
pub fn annotation_for(doc: &Document, field: NodeId) -> Option<NodeId> {
    let parent = doc.parent(field)?;
    let tag = field.index().to_string();
    doc.find_child(parent, |d, c| {
        d.has_class(c, ANNOTATION_CLASS) && d.attr(c, ANNOTATION_FOR) == Some(tag.as_str())
    })
}
