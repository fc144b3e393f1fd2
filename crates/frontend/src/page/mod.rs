//! Page enhancements for the static portfolio markup
//!
//! Each effect is installed once at startup, binds its listeners for the
//! lifetime of the page and does nothing when its elements are missing.

pub mod card_hover;
pub mod chat_modal;
pub mod navbar;
pub mod reveal;
pub mod smooth_scroll;

use crate::agent::{wire_chat, ChatElementIds};
use crate::shared::api_utils::EndpointConfig;

pub const CHAT_FORM_ID: &str = "chatFormModal";
pub const CHAT_INPUT_ID: &str = "chatInputModal";
pub const CHAT_MESSAGES_ID: &str = "chatMessagesModal";
pub const CHAT_SEND_BUTTON_ID: &str = "sendBtnModal";

/// Install every page effect and wire the modal chat.
pub fn enhance(config: &EndpointConfig) {
    smooth_scroll::install();
    navbar::install();
    reveal::install();
    card_hover::install();
    chat_modal::install();

    let ids = ChatElementIds::new(
        CHAT_FORM_ID,
        CHAT_INPUT_ID,
        CHAT_MESSAGES_ID,
        CHAT_SEND_BUTTON_ID,
    );
    match wire_chat(config, &ids) {
        Ok(Some(widget)) => widget.keep_alive(),
        Ok(None) => {}
        Err(e) => log::error!("Chat widget not wired: {}", e),
    }
}
