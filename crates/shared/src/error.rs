use serde::{Deserialize, Serialize};

/// Error body returned by the backend on non-2xx responses.
///
/// The gateway answers with `{"error": "..."}`; some services use
/// `{"message": "..."}` instead, so both are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            message: None,
        }
    }

    /// The human readable message, if the backend sent a non-blank one.
    pub fn text(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .filter(|text| !text.trim().is_empty())
    }

    /// Parses a raw response body; anything that is not the expected JSON
    /// shape yields `None`.
    pub fn parse_text(raw: &str) -> Option<String> {
        serde_json::from_str::<ApiErrorBody>(raw)
            .ok()
            .and_then(|body| body.text().map(str::to_string))
    }
}
