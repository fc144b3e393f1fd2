//! Portfolio agent chat widget (MVVM)
//!
//! Structure:
//! - error.rs: AskError / WireError
//! - model.rs: Message, AskClient and the HTTP client for `POST /ask`
//! - transcript.rs: ChatTranscript, the widget state and its transitions
//! - view_model.rs: ChatWidgetVm with the transcript signal
//! - view.rs: wire_chat, binding the widget to existing page elements

mod error;
mod model;
mod transcript;
mod view;
mod view_model;

pub use error::{AskError, WireError};
pub use model::{AskClient, HttpAskClient, Message, Role};
pub use transcript::{ChatTranscript, TYPING_PLACEHOLDER};
pub use view::{wire_chat, wire_chat_with_client, ChatElementIds, ChatWidget};
pub use view_model::ChatWidgetVm;
