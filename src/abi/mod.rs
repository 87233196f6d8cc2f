//! ABI descriptors and method-call argument binding
//!
//! Parses the JSON interface description of a deployed application, filters
//! its method list down to the argument kinds the call flow supports, and
//! binds user-entered field values to a method's declared arguments.
//!
//! Exactly two argument kinds are supported: `address` and `uint64`. Every
//! other kind is carried as [`ArgKind::Unsupported`] so that filtering and
//! error reporting can name it, but such methods are never callable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// ABI-related failures
#[derive(Error, Debug)]
pub enum AbiError {
    #[error("invalid ABI descriptor: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("method {0:?} not found in the ABI")]
    UnknownMethod(String),
    #[error("method {method:?} has an unsupported argument kind: {kind}")]
    UnsupportedKind { method: String, kind: String },
    #[error("missing value for argument {0:?}")]
    MissingArgument(String),
    #[error("argument {key:?} is not a valid uint64: {value:?}")]
    InvalidUint { key: String, value: String },
}

/// The closed set of argument kinds the call flow recognizes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ArgKind {
    Address,
    Uint64,
    /// Any kind the call flow does not support, preserved for reporting
    Unsupported(String),
}

impl ArgKind {
    pub fn is_supported(&self) -> bool {
        !matches!(self, ArgKind::Unsupported(_))
    }
}

impl From<String> for ArgKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "address" => ArgKind::Address,
            "uint64" => ArgKind::Uint64,
            _ => ArgKind::Unsupported(kind),
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgKind::Address => write!(f, "address"),
            ArgKind::Uint64 => write!(f, "uint64"),
            ArgKind::Unsupported(kind) => write!(f, "{}", kind),
        }
    }
}

/// One declared method argument
#[derive(Debug, Clone, Deserialize)]
pub struct AbiArg {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: ArgKind,
    #[serde(default, rename = "desc")]
    pub description: Option<String>,
}

impl AbiArg {
    /// The form key this argument's value is looked up under: the declared
    /// name, or `"{kind}_{index}"` for unnamed arguments.
    pub fn form_key(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{}_{}", self.kind, index),
        }
    }
}

/// One callable method of an application
#[derive(Debug, Clone, Deserialize)]
pub struct AbiMethod {
    pub name: String,
    #[serde(default, rename = "desc")]
    pub description: Option<String>,
    #[serde(default)]
    pub args: Vec<AbiArg>,
}

impl AbiMethod {
    /// Whether every argument is of a supported kind
    pub fn is_callable(&self) -> bool {
        self.args.iter().all(|arg| arg.kind.is_supported())
    }

    /// The first unsupported kind among the arguments, if any
    fn first_unsupported(&self) -> Option<&ArgKind> {
        self.args.iter().map(|a| &a.kind).find(|k| !k.is_supported())
    }
}

/// A parsed ABI interface description
#[derive(Debug, Clone, Deserialize)]
pub struct AbiInterface {
    #[serde(default)]
    pub name: String,
    pub methods: Vec<AbiMethod>,
}

impl AbiInterface {
    /// Parse an ABI descriptor from its JSON text
    pub fn parse(json: &str) -> Result<Self, AbiError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Look up a method by name
    pub fn method(&self, name: &str) -> Option<&AbiMethod> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Methods whose every argument is of a supported kind, sorted by name
    ///
    /// This is the list a caller should offer for selection; methods with
    /// any unsupported argument kind are excluded entirely.
    pub fn callable_methods(&self) -> Vec<&AbiMethod> {
        let mut methods: Vec<&AbiMethod> =
            self.methods.iter().filter(|m| m.is_callable()).collect();
        methods.sort_by(|a, b| a.name.cmp(&b.name));
        methods
    }
}

/// A user-supplied argument value, coerced to its declared kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MethodArgValue {
    Address(String),
    Uint64(u64),
}

/// Bind user-entered field values to a method's declared arguments
///
/// Each argument is resolved under its form key (see [`AbiArg::form_key`])
/// and coerced per kind. A missing or uncoercible value is a hard error
/// naming the argument; a method containing an unsupported kind is rejected
/// before any value is examined.
pub fn bind_args(
    method: &AbiMethod,
    values: &BTreeMap<String, String>,
) -> Result<Vec<MethodArgValue>, AbiError> {
    if let Some(kind) = method.first_unsupported() {
        return Err(AbiError::UnsupportedKind {
            method: method.name.clone(),
            kind: kind.to_string(),
        });
    }

    method
        .args
        .iter()
        .enumerate()
        .map(|(index, arg)| {
            let key = arg.form_key(index);
            let value = values
                .get(&key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AbiError::MissingArgument(key.clone()))?;

            match arg.kind {
                ArgKind::Address => Ok(MethodArgValue::Address(value.clone())),
                ArgKind::Uint64 => value
                    .trim()
                    .parse::<u64>()
                    .map(MethodArgValue::Uint64)
                    .map_err(|_| AbiError::InvalidUint {
                        key,
                        value: value.clone(),
                    }),
                // Screened out above
                ArgKind::Unsupported(_) => unreachable!(),
            }
        })
        .collect()
}
