use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shown when a successful reply carries neither an answer nor an error.
pub const NO_RESPONSE_TEXT: &str = "No response received";

/// Detail used when a failed response has an empty body.
pub const UNKNOWN_ERROR_TEXT: &str = "Unknown error";

/// Request body for `POST /ask`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

impl AskRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }
}

/// Successful response body for `POST /ask`
///
/// The service answers with either `answer` or `error`; both are optional
/// so partial or empty objects still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AskResponse {
    /// Interpret a success body.
    ///
    /// Only invalid JSON is an error. Valid JSON that is not an object yields
    /// an empty response. Each field is read on its own: falsy values
    /// (`null`, `false`, `0`, `""`) count as missing, other values keep
    /// their text.
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(body)?;
        Ok(Self {
            answer: value.get("answer").and_then(truthy_text),
            error: value.get("error").and_then(truthy_text),
        })
    }

    /// Text to render for this reply: the answer, then the error, then the
    /// fixed fallback. Empty strings count as missing.
    pub fn reply_text(&self) -> &str {
        non_empty(&self.answer)
            .or_else(|| non_empty(&self.error))
            .unwrap_or(NO_RESPONSE_TEXT)
    }
}

/// Extract a human-readable detail from a failed response body.
///
/// A JSON object with a non-empty string `error` field yields that field,
/// other JSON is re-serialized, anything else is returned as raw text.
pub fn error_detail(body: &str) -> String {
    let detail = match serde_json::from_str::<Value>(body) {
        Ok(value) => match value.get("error").and_then(Value::as_str) {
            Some(error) if !error.is_empty() => error.to_string(),
            _ => value.to_string(),
        },
        Err(_) => body.to_string(),
    };

    if detail.is_empty() {
        UNKNOWN_ERROR_TEXT.to_string()
    } else {
        detail
    }
}

fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_question_only() {
        let body = serde_json::to_string(&AskRequest::new("What do you build?")).unwrap();
        assert_eq!(body, r#"{"question":"What do you build?"}"#);
    }

    #[test]
    fn reply_prefers_answer() {
        let resp = AskResponse::from_body(r#"{"answer":"X","error":"Y"}"#).unwrap();
        assert_eq!(resp.reply_text(), "X");
    }

    #[test]
    fn reply_falls_back_to_error() {
        let resp = AskResponse::from_body(r#"{"answer":null,"error":"Y"}"#).unwrap();
        assert_eq!(resp.reply_text(), "Y");

        let resp = AskResponse::from_body(r#"{"answer":"","error":"Y"}"#).unwrap();
        assert_eq!(resp.reply_text(), "Y");
    }

    #[test]
    fn reply_without_fields_uses_fallback() {
        let resp = AskResponse::from_body("{}").unwrap();
        assert_eq!(resp.reply_text(), NO_RESPONSE_TEXT);
    }

    #[test]
    fn non_object_body_is_empty_reply() {
        for body in ["null", "42", r#""hello""#, "[1,2]"] {
            let resp = AskResponse::from_body(body).unwrap();
            assert_eq!(resp.reply_text(), NO_RESPONSE_TEXT, "body: {}", body);
        }
    }

    #[test]
    fn falsy_answer_falls_through_to_error() {
        for body in [
            r#"{"answer":false,"error":"Y"}"#,
            r#"{"answer":0,"error":"Y"}"#,
            r#"{"answer":null,"error":"Y"}"#,
        ] {
            let resp = AskResponse::from_body(body).unwrap();
            assert_eq!(resp.reply_text(), "Y", "body: {}", body);
        }
    }

    #[test]
    fn truthy_non_string_answer_keeps_its_text() {
        let resp = AskResponse::from_body(r#"{"answer":42}"#).unwrap();
        assert_eq!(resp.reply_text(), "42");

        let resp = AskResponse::from_body(r#"{"answer":true,"error":"Y"}"#).unwrap();
        assert_eq!(resp.reply_text(), "true");
    }

    #[test]
    fn falsy_fields_leave_fallback() {
        let resp = AskResponse::from_body(r#"{"answer":false,"error":""}"#).unwrap();
        assert_eq!(resp, AskResponse::default());
        assert_eq!(resp.reply_text(), NO_RESPONSE_TEXT);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(AskResponse::from_body("<html>oops</html>").is_err());
    }

    #[test]
    fn error_detail_reads_error_field() {
        assert_eq!(error_detail(r#"{"error":"rate limited"}"#), "rate limited");
    }

    #[test]
    fn error_detail_reserializes_other_json() {
        assert_eq!(error_detail(r#"{"detail": "nope"}"#), r#"{"detail":"nope"}"#);
        assert_eq!(error_detail(r#"{"error": ""}"#), r#"{"error":""}"#);
    }

    #[test]
    fn error_detail_keeps_raw_text() {
        assert_eq!(error_detail("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_detail(""), UNKNOWN_ERROR_TEXT);
    }
}
