//! Payloads attached to a log call
//!
//! A payload becomes the optional second line of an entry. Three shapes are
//! recognized and checked in this order: errors, failed operation results,
//! and everything else.

use std::backtrace::BacktraceStatus;
use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome reported by an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human readable outcome
    pub message: String,
}

impl OperationResult {
    /// Create a successful result
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Create a failed result
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Secondary data attached to a log entry
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// An error, with its stack trace when one was captured
    Error {
        stack: Option<String>,
        message: String,
    },
    /// An operation result with `success: false`
    Failure { message: String },
    /// Any other value, rendered with its default text form
    Other(Value),
}

impl Payload {
    /// Create an error payload without a stack trace
    pub fn error(message: impl Into<String>) -> Self {
        Payload::Error {
            stack: None,
            message: message.into(),
        }
    }

    /// Create an error payload carrying a stack trace
    pub fn error_with_stack(message: impl Into<String>, stack: impl Into<String>) -> Self {
        Payload::Error {
            stack: Some(stack.into()),
            message: message.into(),
        }
    }

    /// Build an error payload from any error type
    ///
    /// When the error has sources, the full chain is used as the stack.
    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        let message = err.to_string();
        let mut source = err.source();
        if source.is_none() {
            return Payload::error(message);
        }

        let mut stack = format!("Error: {}", message);
        while let Some(cause) = source {
            stack.push_str("\n    caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }

        Payload::Error {
            stack: Some(stack),
            message,
        }
    }

    /// Classify an untyped value
    ///
    /// Objects with a string `message` and a `stack` (string or null) are errors.
    /// Objects with `success` exactly `false` and a `message` are failures.
    /// Anything else is kept as is.
    pub fn from_value(value: Value) -> Self {
        if let Value::Object(map) = &value {
            if let (Some(Value::String(message)), Some(stack)) =
                (map.get("message"), map.get("stack"))
            {
                match stack {
                    Value::String(stack) => {
                        return Payload::error_with_stack(message.clone(), stack.clone())
                    }
                    Value::Null => return Payload::error(message.clone()),
                    _ => {}
                }
            }

            if map.get("success") == Some(&Value::Bool(false)) {
                if let Some(message) = map.get("message") {
                    return Payload::Failure {
                        message: value_text(message),
                    };
                }
            }
        }

        Payload::Other(value)
    }

    /// Whether this payload produces a second output line
    ///
    /// `null`, `false`, `0` and the empty string are falsy, so passing them
    /// writes only the header.
    pub fn is_truthy(&self) -> bool {
        match self {
            Payload::Error { .. } | Payload::Failure { .. } => true,
            Payload::Other(value) => match value {
                Value::Null => false,
                Value::Bool(b) => *b,
                Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
                Value::String(s) => !s.is_empty(),
                Value::Array(_) | Value::Object(_) => true,
            },
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Error {
                stack: Some(stack), ..
            } if !stack.is_empty() => f.write_str(stack),
            Payload::Error { message, .. } => f.write_str(message),
            Payload::Failure { message } => f.write_str(message),
            Payload::Other(value) => f.write_str(&value_text(value)),
        }
    }
}

/// Default text form: strings verbatim, everything else as JSON
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::from_value(value)
    }
}

impl From<OperationResult> for Payload {
    fn from(result: OperationResult) -> Self {
        if result.success {
            Payload::Other(serde_json::json!({
                "success": true,
                "message": result.message,
            }))
        } else {
            Payload::Failure {
                message: result.message,
            }
        }
    }
}

impl From<&anyhow::Error> for Payload {
    fn from(err: &anyhow::Error) -> Self {
        // anyhow's debug report carries the context chain and the backtrace
        let has_trace = err.backtrace().status() == BacktraceStatus::Captured;
        let stack = if has_trace || err.chain().count() > 1 {
            Some(format!("{:?}", err))
        } else {
            None
        };

        Payload::Error {
            stack,
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for Payload {
    fn from(err: anyhow::Error) -> Self {
        Payload::from(&err)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Other(Value::String(s.to_string()))
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::Other(Value::String(s))
    }
}

impl From<bool> for Payload {
    fn from(b: bool) -> Self {
        Payload::Other(Value::Bool(b))
    }
}

macro_rules! payload_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Payload {
                fn from(n: $ty) -> Self {
                    Payload::Other(Value::from(n))
                }
            }
        )*
    };
}

payload_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
