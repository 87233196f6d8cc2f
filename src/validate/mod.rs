//! Deployment form validation
//!
//! Turns raw, untyped form input into a [`DeploymentRequest`] or a complete
//! set of per-field errors. Validation is collect-all: every failing field is
//! reported in one pass rather than stopping at the first problem.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Maximum number of extra program pages an application may request
pub const EXTRA_PAGES_MAX: u64 = 3;

/// Declared storage budget for an application, global or per-account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSchema {
    pub num_ints: u64,
    pub num_byte_slices: u64,
}

impl StateSchema {
    pub fn new(num_ints: u64, num_byte_slices: u64) -> Self {
        Self {
            num_ints,
            num_byte_slices,
        }
    }
}

/// A fully validated application-creation request
///
/// Only constructible through [`validate`]; every field has already passed
/// the rules below by the time a value of this type exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    pub approval_source: String,
    pub clear_state_source: String,
    pub global_state: StateSchema,
    pub local_state: StateSchema,
    pub extra_pages: u64,
}

/// Raw form input as the caller collected it, before any checking
#[derive(Debug, Clone, Default)]
pub struct RawDeploymentForm {
    /// Contents of the approval program source file, if one was provided
    pub approval_source: Option<String>,
    /// Contents of the clear-state program source file, if one was provided
    pub clear_state_source: Option<String>,
    pub num_global_ints: String,
    pub num_global_byte_slices: String,
    pub num_local_ints: String,
    pub num_local_byte_slices: String,
    pub extra_pages: String,
}

/// Accumulated validation failures, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.insert(field.to_string(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Validate raw form input into a [`DeploymentRequest`]
///
/// Collects every field failure before returning. Numeric fields must be
/// base-10 whole numbers with no leftover characters; schema counters must
/// be non-negative; `extra_pages` must be in `0..=3` (out-of-range values
/// are an error, never clamped).
pub fn validate(raw: &RawDeploymentForm) -> Result<DeploymentRequest, FieldErrors> {
    let mut errors = FieldErrors::default();

    let approval_source = require_source(&raw.approval_source, "approval_source", &mut errors);
    let clear_state_source =
        require_source(&raw.clear_state_source, "clear_state_source", &mut errors);

    let num_global_ints = parse_counter(&raw.num_global_ints, "num_global_ints", &mut errors);
    let num_global_byte_slices = parse_counter(
        &raw.num_global_byte_slices,
        "num_global_byte_slices",
        &mut errors,
    );
    let num_local_ints = parse_counter(&raw.num_local_ints, "num_local_ints", &mut errors);
    let num_local_byte_slices = parse_counter(
        &raw.num_local_byte_slices,
        "num_local_byte_slices",
        &mut errors,
    );

    let extra_pages = match parse_counter(&raw.extra_pages, "extra_pages", &mut errors) {
        Some(pages) if pages > EXTRA_PAGES_MAX => {
            errors.push(
                "extra_pages",
                format!("must be at most {}", EXTRA_PAGES_MAX),
            );
            None
        }
        other => other,
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    // Every helper returned Some when the error set is empty.
    Ok(DeploymentRequest {
        approval_source: approval_source.unwrap(),
        clear_state_source: clear_state_source.unwrap(),
        global_state: StateSchema::new(num_global_ints.unwrap(), num_global_byte_slices.unwrap()),
        local_state: StateSchema::new(num_local_ints.unwrap(), num_local_byte_slices.unwrap()),
        extra_pages: extra_pages.unwrap(),
    })
}

fn require_source(
    value: &Option<String>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match value {
        Some(source) if !source.trim().is_empty() => Some(source.clone()),
        _ => {
            errors.push(field, "program source is required");
            None
        }
    }
}

/// Parse a base-10 counter field: whole number, no leftover characters,
/// not negative. Surrounding whitespace is tolerated.
fn parse_counter(value: &str, field: &str, errors: &mut FieldErrors) -> Option<u64> {
    let trimmed = value.trim();
    match trimmed.parse::<i64>() {
        Ok(n) if n < 0 => {
            errors.push(field, "must not be negative");
            None
        }
        Ok(n) => Some(n as u64),
        Err(_) => {
            errors.push(field, "must be a whole number");
            None
        }
    }
}
