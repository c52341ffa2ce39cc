//! Result shape returned to the frontend.

use serde::Deserialize;
use serde::Serialize;

use crate::Result;

/// Literal payload of a successful mutating call.
pub const SUCCESS: &str = "Success";

/// Outcome of a bridge call as the frontend sees it.
///
/// `flag` tells success from failure; `data` carries the payload on success
/// (file content, listing, `"Success"`) and the error message on failure.
///
/// # Examples
///
/// ```
/// use bridgefs_core::FlagResult;
///
/// let ok = FlagResult::success("Success");
/// assert!(ok.flag);
///
/// let json = serde_json::to_string(&ok).unwrap();
/// assert_eq!(json, r#"{"flag":true,"data":"Success"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagResult {
    /// `true` if the call succeeded.
    pub flag: bool,

    /// Payload or error message.
    pub data: String,
}

impl FlagResult {
    /// Creates a successful result carrying `data`.
    pub fn success(data: impl Into<String>) -> Self {
        Self {
            flag: true,
            data: data.into(),
        }
    }

    /// Creates a failed result carrying `message`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            flag: false,
            data: message.into(),
        }
    }

    /// Collapses a typed result, rendering the error with `Display`.
    pub fn from_result<T: Into<String>>(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::failure(err.to_string()),
        }
    }

    /// Collapses a typed result whose value is not passed to the frontend.
    pub fn from_unit<T>(result: Result<T>) -> Self {
        Self::from_result(result.map(|_| SUCCESS))
    }

    /// Returns `true` if the call succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.flag
    }
}
