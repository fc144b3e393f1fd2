//! Chat model: messages and the `/ask` client

use super::error::AskError;
use crate::shared::api_utils::EndpointConfig;
use contracts::agent::{error_detail, AskRequest, AskResponse};
use gloo_net::http::Request;
use uuid::Uuid;

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Bot => "bot",
        }
    }
}

/// One entry of the chat. Never changed after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub role: Role,
    /// Transient "typing" entry, removed once the reply arrives.
    pub pending: bool,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Role::User, false)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Role::Bot, false)
    }

    pub fn placeholder(text: impl Into<String>) -> Self {
        Self::new(text, Role::Bot, true)
    }

    fn new(text: impl Into<String>, role: Role, pending: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            role,
            pending,
        }
    }

    /// Classes of the rendered element, e.g. `message bot typing-indicator`.
    pub fn css_class(&self) -> String {
        if self.pending {
            format!("message {} typing-indicator", self.role.as_str())
        } else {
            format!("message {}", self.role.as_str())
        }
    }
}

/// Something that can answer a question.
#[allow(async_fn_in_trait)]
pub trait AskClient {
    async fn ask(&self, question: &str) -> Result<AskResponse, AskError>;
}

/// `POST {base_url}/ask` over the browser fetch API
#[derive(Debug, Clone)]
pub struct HttpAskClient {
    config: EndpointConfig,
}

impl HttpAskClient {
    pub fn new(config: EndpointConfig) -> Self {
        Self { config }
    }
}

impl AskClient for HttpAskClient {
    async fn ask(&self, question: &str) -> Result<AskResponse, AskError> {
        let url = self.config.url("/ask");
        let payload = AskRequest::new(question);
        log::debug!("Making API request to: {}", url);
        log::debug!("Request payload: {:?}", payload);

        let response = Request::post(&url)
            .header("Accept", "application/json")
            .json(&payload)
            .map_err(|e| AskError::Connection(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(fetch_error)?;

        let status = response.status();
        log::debug!("Response status: {}", status);
        log::debug!(
            "Response headers: {:?}",
            response.headers().entries().collect::<Vec<_>>()
        );

        let body = response.text().await.map_err(fetch_error)?;

        if !response.ok() {
            let detail = error_detail(&body);
            log::error!("API Error Response: {}", detail);
            return Err(AskError::from_status(status, detail));
        }

        let data = AskResponse::from_body(&body).map_err(|e| AskError::Parse(e.to_string()))?;
        log::debug!("API Response data: {:?}", data);
        Ok(data)
    }
}

fn fetch_error(err: gloo_net::Error) -> AskError {
    match err {
        gloo_net::Error::JsError(js) => {
            AskError::from_fetch_failure(format!("{}: {}", js.name, js.message))
        }
        gloo_net::Error::SerdeError(e) => AskError::Parse(e.to_string()),
        other => AskError::Connection(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_class_tracks_role_and_placeholder() {
        assert_eq!(Message::user("hi").css_class(), "message user");
        assert_eq!(Message::bot("hello").css_class(), "message bot");
        assert_eq!(
            Message::placeholder("Typing…").css_class(),
            "message bot typing-indicator"
        );
    }

    #[test]
    fn messages_get_distinct_ids() {
        assert_ne!(Message::user("a").id, Message::user("a").id);
    }
}
