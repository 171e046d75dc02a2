//! Structured field-level validation errors.
//!
//! DTOs are checked with `validator` derive rules for shape (lengths,
//! numeric ranges) and with the enumeration / cross-field helpers in this
//! crate for domain rules. Both feed a single [`FieldErrors`] map so the
//! client always receives one `{ field: [messages] }` object.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::CoreError;

/// Field name to list of human-readable messages.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Record the error of a `Result<(), String>` helper, if any.
    pub fn check(&mut self, field: &str, result: Result<(), String>) {
        if let Err(message) = result {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when no errors were recorded, otherwise
    /// [`CoreError::InvalidFields`].
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidFields(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(", "))?;
        }
        Ok(())
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            for err in errs.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| describe_code(&err.code));
                out.add(field.to_string(), message);
            }
        }
        out
    }
}

/// Fallback text for `validator` rules declared without a message.
fn describe_code(code: &str) -> String {
    match code {
        "length" => "has an invalid length".to_string(),
        "range" => "is out of range".to_string(),
        "required" => "is required".to_string(),
        other => format!("failed the '{other}' check"),
    }
}

/// Validate that `value` is one of `allowed`, naming the accepted values on failure.
pub fn validate_one_of(value: &str, allowed: &[&str], what: &str) -> Result<(), String> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "Invalid {what} '{value}'. Must be one of: {}",
            allowed.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, max = 5, message = "must be 1-5 characters"))]
        name: String,
        #[validate(range(min = 0.0))]
        amount: f64,
    }

    #[test]
    fn empty_errors_are_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn collects_messages_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("status", "bad");
        errors.add("status", "worse");
        errors.add("name", "missing");

        assert_eq!(errors.get("status"), Some(&["bad".to_string(), "worse".to_string()][..]));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["name", "status"]);
        assert_eq!(errors.to_string(), "name: missing; status: bad, worse");
    }

    #[test]
    fn converts_validator_errors() {
        let sample = Sample {
            name: "far too long".into(),
            amount: -1.0,
        };
        let errors: FieldErrors = sample.validate().unwrap_err().into();

        assert_eq!(errors.get("name"), Some(&["must be 1-5 characters".to_string()][..]));
        assert_eq!(errors.get("amount"), Some(&["is out of range".to_string()][..]));
    }

    #[test]
    fn one_of_names_allowed_values() {
        assert!(validate_one_of("a", &["a", "b"], "letter").is_ok());
        let err = validate_one_of("z", &["a", "b"], "letter").unwrap_err();
        assert_eq!(err, "Invalid letter 'z'. Must be one of: a, b");
    }

    #[test]
    fn invalid_fields_error_serializes_as_map() {
        let mut errors = FieldErrors::new();
        errors.add("comment", "too long");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"comment": ["too long"]}));
    }
}
