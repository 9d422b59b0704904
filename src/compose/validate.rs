use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const PROMPT_MIN_CHARS: usize = 10;
pub const PROMPT_MAX_CHARS: usize = 1000;
pub const SUBJECT_MAX_CHARS: usize = 200;
pub const BODY_MIN_CHARS: usize = 10;

// Lenient on purpose: anything shaped like local@domain.tld without whitespace.
static ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("address pattern is a valid regex")
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressValidation {
    #[serde(default)]
    pub valid: Vec<String>,
    #[serde(default)]
    pub invalid: Vec<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl AddressValidation {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl FieldValidation {
    fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            errors: vec![message.into()],
        }
    }

    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Prompt,
    Recipients,
    Subject,
    Body,
}

/// Partially filled compose form. Only the fields that are `Some` get checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormInput<'a> {
    pub prompt: Option<&'a str>,
    pub recipients: Option<&'a str>,
    pub subject: Option<&'a str>,
    pub body: Option<&'a str>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormValidation {
    pub is_valid: bool,
    pub errors: BTreeMap<Field, Vec<String>>,
}

pub fn is_valid_address(input: &str) -> bool {
    ADDRESS_PATTERN.is_match(input.trim())
}

pub fn split_address_list(raw: &str) -> Vec<String> {
    raw.split([',', ';', '\n'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

pub fn validate_address_list(raw: &str) -> AddressValidation {
    let tokens = split_address_list(raw);
    if tokens.is_empty() {
        return AddressValidation {
            errors: vec!["no addresses found".to_string()],
            ..AddressValidation::default()
        };
    }

    let mut out = AddressValidation::default();
    for token in tokens {
        if is_valid_address(&token) {
            if !out.valid.contains(&token) {
                out.valid.push(token);
            }
        } else {
            out.errors.push(format!("invalid address format: {token}"));
            out.invalid.push(token);
        }
    }

    out
}

pub fn validate_prompt(prompt: &str) -> FieldValidation {
    let length = prompt.trim().chars().count();

    if length == 0 {
        FieldValidation::fail("prompt must not be empty")
    } else if length < PROMPT_MIN_CHARS {
        FieldValidation::fail(format!(
            "prompt is too short (at least {PROMPT_MIN_CHARS} characters)"
        ))
    } else if length > PROMPT_MAX_CHARS {
        FieldValidation::fail(format!(
            "prompt is too long (at most {PROMPT_MAX_CHARS} characters)"
        ))
    } else {
        FieldValidation::ok()
    }
}

pub fn validate_subject(subject: &str) -> FieldValidation {
    let length = subject.trim().chars().count();

    if length == 0 {
        FieldValidation::fail("subject must not be empty")
    } else if length > SUBJECT_MAX_CHARS {
        FieldValidation::fail(format!(
            "subject is too long (at most {SUBJECT_MAX_CHARS} characters)"
        ))
    } else {
        FieldValidation::ok()
    }
}

pub fn validate_body(body: &str) -> FieldValidation {
    let length = body.trim().chars().count();

    if length == 0 {
        FieldValidation::fail("body must not be empty")
    } else if length < BODY_MIN_CHARS {
        FieldValidation::fail(format!(
            "body is too short (at least {BODY_MIN_CHARS} characters)"
        ))
    } else {
        FieldValidation::ok()
    }
}

pub fn validate_form(input: &FormInput<'_>) -> FormValidation {
    let mut errors = BTreeMap::new();

    if let Some(prompt) = input.prompt {
        let result = validate_prompt(prompt);
        if !result.is_valid {
            errors.insert(Field::Prompt, result.errors);
        }
    }

    if let Some(recipients) = input.recipients {
        let result = validate_address_list(recipients);
        if !result.is_clean() {
            errors.insert(Field::Recipients, result.errors);
        }
    }

    if let Some(subject) = input.subject {
        let result = validate_subject(subject);
        if !result.is_valid {
            errors.insert(Field::Subject, result.errors);
        }
    }

    if let Some(body) = input.body {
        let result = validate_body(body);
        if !result.is_valid {
            errors.insert(Field::Body, result.errors);
        }
    }

    FormValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_address() {
        assert!(is_valid_address("a@b.com"));
        assert!(is_valid_address("  first.last+tag@mail.example.org  "));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_address("a@b"));
        assert!(!is_valid_address("plainstring"));
        assert!(!is_valid_address("a@b.com extra"));
        assert!(!is_valid_address("a@@b.com"));
        assert!(!is_valid_address("@b.com"));
    }

    #[test]
    fn stays_lenient_about_odd_but_shaped_addresses() {
        assert!(is_valid_address("a@b..com"));
        assert!(is_valid_address("\"quoted\"@x.y"));
    }

    #[test]
    fn splits_list_and_reports_invalid_tokens() {
        let result = validate_address_list("a@b.com, bad, c@d.com");
        assert_eq!(result.valid, ["a@b.com", "c@d.com"]);
        assert_eq!(result.invalid, ["bad"]);
        assert_eq!(result.errors, ["invalid address format: bad"]);
    }

    #[test]
    fn empty_list_reports_single_error() {
        for raw in ["", "   ", " , ;\n "] {
            let result = validate_address_list(raw);
            assert!(result.valid.is_empty());
            assert!(result.invalid.is_empty());
            assert_eq!(result.errors, ["no addresses found"]);
        }
    }

    #[test]
    fn dedups_valid_but_not_invalid_tokens() {
        let result = validate_address_list("x@y.com;x@y.com\nnope,nope");
        assert_eq!(result.valid, ["x@y.com"]);
        assert_eq!(result.invalid, ["nope", "nope"]);
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn prompt_bounds_report_one_error() {
        let short = validate_prompt("short");
        assert!(!short.is_valid);
        assert!(short.errors[0].contains("too short"));

        let long = validate_prompt(&"a".repeat(1001));
        assert!(!long.is_valid);
        assert_eq!(long.errors.len(), 1);
        assert!(long.errors[0].contains("too long"));

        let empty = validate_prompt("   ");
        assert_eq!(empty.errors, ["prompt must not be empty"]);

        assert!(validate_prompt(&"a".repeat(10)).is_valid);
        assert!(validate_prompt(&"a".repeat(1000)).is_valid);
    }

    #[test]
    fn subject_and_body_bounds() {
        assert!(validate_subject("Hello").is_valid);
        assert!(!validate_subject("").is_valid);
        assert!(!validate_subject(&"s".repeat(201)).is_valid);

        assert!(validate_body("long enough body").is_valid);
        assert!(!validate_body("tiny").is_valid);
        assert_eq!(validate_body(" ").errors, ["body must not be empty"]);
    }

    #[test]
    fn form_only_checks_present_fields() {
        let result = validate_form(&FormInput {
            subject: Some(""),
            ..FormInput::default()
        });
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors.contains_key(&Field::Subject));

        assert!(validate_form(&FormInput::default()).is_valid);
    }

    #[test]
    fn form_collects_errors_per_field() {
        let result = validate_form(&FormInput {
            prompt: Some("hi"),
            recipients: Some("ok@x.io, broken"),
            subject: Some("Fine"),
            body: Some("tiny"),
        });

        assert!(!result.is_valid);
        assert_eq!(
            result.errors.keys().copied().collect::<Vec<_>>(),
            [Field::Prompt, Field::Recipients, Field::Body]
        );
        assert_eq!(
            result.errors[&Field::Recipients],
            ["invalid address format: broken"]
        );
    }
}
