//! The request/response contract shared by every tool handler.
//!
//! A handler extracts its arguments with the helpers here, obtains a client
//! from the [`ToolContext`](super::ToolContext), makes one remote call, maps
//! any failure to a [`ToolError`] that names the resource, and encodes the
//! result to a single text payload.

use std::fmt;

use rmcp::model::{CallToolResult, Content, JsonObject};
use serde_json::{Value, json};
use tracing::{error, warn};

use crate::client::{ListPage, TfeError};

/// Failure of a single tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// A required parameter was absent or not of its declared type.
    MissingInput { param: String, detail: String },

    /// An optional parameter had the wrong type or an undeclared value.
    InvalidInput { param: String, detail: String },

    /// `page` / `pageSize` could not be parsed.
    InvalidPagination(String),

    /// No API client could be obtained for this request.
    ClientUnavailable(String),

    /// The remote call failed. Holds the user-facing message only; the raw
    /// cause is logged when the error is built.
    Remote(String),

    /// A successful result could not be serialized.
    Encoding { what: String, detail: String },

    /// The request was cancelled before the remote call finished.
    Cancelled,
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput { param, detail } => {
                write!(f, "missing required input: {}: {}", param, detail)
            }
            Self::InvalidInput { param, detail } => {
                write!(f, "invalid input: {}: {}", param, detail)
            }
            Self::InvalidPagination(detail) => {
                write!(f, "invalid pagination parameters: {}", detail)
            }
            Self::ClientUnavailable(detail) => {
                write!(f, "failed to get Terraform client: {}", detail)
            }
            Self::Remote(message) => f.write_str(message),
            Self::Encoding { what, detail } => write!(f, "failed to marshal {}: {}", what, detail),
            Self::Cancelled => f.write_str("request cancelled"),
        }
    }
}

impl std::error::Error for ToolError {}

impl ToolError {
    /// Translate a remote failure into `message`, logging the raw cause.
    pub fn remote(message: impl Into<String>, cause: &TfeError) -> Self {
        let message = message.into();
        warn!(error = %cause, "{}", message);
        Self::Remote(message)
    }

    fn encoding(what: &str, err: impl fmt::Display) -> Self {
        Self::Encoding {
            what: what.to_string(),
            detail: err.to_string(),
        }
    }

    /// Return `true` for failures caused by the caller's arguments.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingInput { .. } | Self::InvalidInput { .. } | Self::InvalidPagination(_)
        )
    }
}

/// Name of a JSON value's type, for error messages.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Fetch a required string argument. The value is returned as sent.
pub fn require_string(args: &JsonObject, param: &str) -> Result<String, ToolError> {
    match args.get(param) {
        Some(Value::String(s)) => Ok(s.clone()),
        None | Some(Value::Null) => Err(ToolError::MissingInput {
            param: param.to_string(),
            detail: format!("required argument \"{}\" not found", param),
        }),
        Some(other) => Err(ToolError::MissingInput {
            param: param.to_string(),
            detail: format!(
                "argument \"{}\" is not a string (got {})",
                param,
                value_type_name(other)
            ),
        }),
    }
}

/// Fetch an optional string argument. Absent, `null` and empty strings are
/// all `None`.
pub fn optional_string(args: &JsonObject, param: &str) -> Result<Option<String>, ToolError> {
    match args.get(param) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ToolError::InvalidInput {
            param: param.to_string(),
            detail: format!("expected string, got {}", value_type_name(other)),
        }),
    }
}

/// Fetch an optional array-of-strings argument, checking each element
/// against `allowed` when given.
pub fn optional_string_list(
    args: &JsonObject,
    param: &str,
    allowed: Option<&[&str]>,
) -> Result<Vec<String>, ToolError> {
    let invalid = |detail: String| ToolError::InvalidInput {
        param: param.to_string(),
        detail,
    };

    let items = match args.get(param) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(invalid(format!(
                "expected array, got {}",
                value_type_name(other)
            )));
        }
    };

    let mut values = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let Some(s) = item.as_str() else {
            return Err(invalid(format!(
                "expected string at index {}, got {}",
                i,
                value_type_name(item)
            )));
        };
        if let Some(allowed) = allowed {
            if !allowed.contains(&s) {
                return Err(invalid(format!("unsupported value '{}'", s)));
            }
        }
        values.push(s.to_string());
    }

    Ok(values)
}

/// Encode a single resource as a JSON:API document without `included`.
pub fn encode_resource(what: &str, data: Value) -> Result<String, ToolError> {
    serde_json::to_string(&json!({ "data": data })).map_err(|e| ToolError::encoding(what, e))
}

/// Encode one page of a list as `{"data": [...], "pagination": ...}`.
pub fn encode_page(what: &str, page: ListPage) -> Result<String, ToolError> {
    let document = json!({
        "data": page.items,
        "pagination": page.pagination.unwrap_or(Value::Null),
    });
    serde_json::to_string(&document).map_err(|e| ToolError::encoding(what, e))
}

/// Turn a handler outcome into the protocol result. Failures become
/// `is_error` results carrying the message; they are never protocol errors.
pub fn into_call_result(tool: &str, outcome: Result<String, ToolError>) -> CallToolResult {
    match outcome {
        Ok(text) => CallToolResult {
            content: vec![Content::text(text)],
            structured_content: None,
            is_error: Some(false),
            meta: None,
        },
        Err(err) => {
            if err.is_validation() {
                warn!(tool = %tool, error = %err, "tool call rejected");
            } else {
                error!(tool = %tool, error = %err, "tool call failed");
            }
            CallToolResult {
                content: vec![Content::text(err.to_string())],
                structured_content: None,
                is_error: Some(true),
                meta: None,
            }
        }
    }
}
