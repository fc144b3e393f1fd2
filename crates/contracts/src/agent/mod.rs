//! Portfolio agent contracts
//!
//! DTOs exchanged with the question-answering service behind `POST /ask`.

pub mod ask;

pub use ask::{error_detail, AskRequest, AskResponse, NO_RESPONSE_TEXT, UNKNOWN_ERROR_TEXT};
