//! Rule evaluation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::rule::{FieldSchema, FieldValue, Rule, Schema, Validatable};

/// Field name to message, at most one message per field.
pub type FieldErrors = BTreeMap<String, String>;

/// Outcome of validating one sub-object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: FieldErrors,
}

impl ValidationResult {
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// First message in field order, if any.
    pub fn first_error(&self) -> Option<&str> {
        self.errors.values().next().map(String::as_str)
    }
}

/// Validate `data` against every declared field of `schema`.
pub fn validate<T: Validatable>(schema: &Schema<T>, data: &T) -> ValidationResult {
    let errors: FieldErrors = schema
        .fields()
        .iter()
        .filter_map(|field| check_field(field, data).map(|msg| (field.name.to_string(), msg)))
        .collect();

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Returns the first failing rule's message.
fn check_field<T: Validatable>(field: &FieldSchema<T>, data: &T) -> Option<String> {
    let name = field.name;
    let value = data.field(name);

    for rule in &field.rules {
        match rule {
            Rule::Required => {
                if value.is_blank() {
                    return Some(format!("{} is required", name));
                }
            }
            Rule::RequiredWhen(applies) => {
                if value.is_blank() && applies(data) {
                    return Some(format!("{} is required for this payment method", name));
                }
            }
            _ if !value.is_present() => return None,
            Rule::Length { min, max } => {
                if let FieldValue::Text(text) = value {
                    let len = text.chars().count();
                    if let Some(min) = min.filter(|min| len < *min) {
                        return Some(format!("{} must be at least {} characters", name, min));
                    }
                    if let Some(max) = max.filter(|max| len > *max) {
                        return Some(format!("{} must be at most {} characters", name, max));
                    }
                }
            }
            Rule::Pattern { regex, message } => {
                if let FieldValue::Text(text) = value {
                    if !regex.is_match(text) {
                        return Some(
                            message
                                .clone()
                                .unwrap_or_else(|| format!("{} format is invalid", name)),
                        );
                    }
                }
            }
            Rule::OneOf(allowed) => {
                if let FieldValue::Text(text) = value {
                    if !allowed.iter().any(|v| v == text) {
                        return Some(format!("{} must be one of: {}", name, allowed.join(", ")));
                    }
                }
            }
            Rule::File {
                mime_types,
                max_bytes,
            } => {
                if let FieldValue::File(file) = value {
                    if !mime_types.iter().any(|m| m.eq_ignore_ascii_case(&file.mime_type)) {
                        return Some(format!(
                            "{} must be a file of type: {}",
                            name,
                            mime_types.join(", ")
                        ));
                    }
                    if file.size > *max_bytes {
                        return Some(format!(
                            "{} must be smaller than {}",
                            name,
                            format_size(*max_bytes)
                        ));
                    }
                }
            }
        }
    }

    None
}

fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{} bytes", bytes)
    }
}
