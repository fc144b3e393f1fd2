//! Chat widget - binding to existing page elements
//!
//! The page ships the form, input, message list and send button as static
//! markup. `wire_chat` attaches to them by id, renders the transcript into
//! the message list and owns the one request that may be in flight.

use super::error::WireError;
use super::model::{AskClient, HttpAskClient};
use super::view_model::ChatWidgetVm;
use crate::shared::api_utils::{page_endpoint, EndpointConfig};
use crate::shared::dom::{element_by_id, EventListener};
use futures::future::AbortHandle;
use leptos::prelude::*;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement, KeyboardEvent};

/// Ids of the four elements a chat widget binds to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatElementIds {
    pub form: String,
    pub input: String,
    pub messages: String,
    pub send_button: String,
}

impl ChatElementIds {
    pub fn new(
        form: impl Into<String>,
        input: impl Into<String>,
        messages: impl Into<String>,
        send_button: impl Into<String>,
    ) -> Self {
        Self {
            form: form.into(),
            input: input.into(),
            messages: messages.into(),
            send_button: send_button.into(),
        }
    }
}

/// A chat widget bound to the page.
///
/// Dropping it aborts the pending request, detaches its listeners and
/// removes the rendered messages.
pub struct ChatWidget {
    form_id: String,
    in_flight: Rc<RefCell<Option<AbortHandle>>>,
    _listeners: Vec<EventListener>,
    _view: Box<dyn Any>,
    _owner: Owner,
}

impl ChatWidget {
    /// Keep the widget bound until the page unloads.
    pub fn keep_alive(self) {
        std::mem::forget(self);
    }
}

impl Drop for ChatWidget {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.borrow_mut().take() {
            log::debug!("Aborting pending chat request");
            handle.abort();
        }
        release_form(&self.form_id);
    }
}

thread_local! {
    static BOUND_FORMS: RefCell<HashSet<String>> = RefCell::new(HashSet::new());
}

/// Mark `form_id` as bound; `false` when a widget already owns it.
fn claim_form(form_id: &str) -> bool {
    BOUND_FORMS.with(|forms| forms.borrow_mut().insert(form_id.to_string()))
}

fn release_form(form_id: &str) {
    BOUND_FORMS.with(|forms| forms.borrow_mut().remove(form_id));
}

/// Bind a chat widget talking to the agent at `config`.
///
/// `Ok(None)` when the form is not on the page or already has a widget.
pub fn wire_chat(
    config: &EndpointConfig,
    ids: &ChatElementIds,
) -> Result<Option<ChatWidget>, WireError> {
    wire_chat_with_client(HttpAskClient::new(config.clone()), ids)
}

pub fn wire_chat_with_client<C>(
    client: C,
    ids: &ChatElementIds,
) -> Result<Option<ChatWidget>, WireError>
where
    C: AskClient + 'static,
{
    let Some(form) = element_by_id::<HtmlFormElement>(&ids.form) else {
        log::debug!("Chat form #{} not on this page", ids.form);
        return Ok(None);
    };
    let input = require::<HtmlInputElement>(&ids.input)?;
    let messages_el = require::<HtmlElement>(&ids.messages)?;
    let send_button = require::<HtmlButtonElement>(&ids.send_button)?;

    if !claim_form(&ids.form) {
        log::debug!("Chat form #{} already bound", ids.form);
        return Ok(None);
    }

    let owner = Owner::new();
    let vm = owner.with(ChatWidgetVm::new);
    let view = owner.with(|| mount_messages(vm, messages_el, send_button));

    let client = Rc::new(client);
    let in_flight: Rc<RefCell<Option<AbortHandle>>> = Rc::new(RefCell::new(None));

    let on_submit = EventListener::new(&form, "submit", {
        let input = input.clone();
        let in_flight = in_flight.clone();
        move |ev| {
            ev.prevent_default();
            let Some(question) = vm.begin(&input.value()) else {
                return;
            };
            input.set_value("");

            let on_settled = {
                let input = input.clone();
                let in_flight = in_flight.clone();
                move || {
                    in_flight.borrow_mut().take();
                    let _ = input.focus();
                }
            };
            let (task, handle) = vm.exchange(client.clone(), question, on_settled);
            *in_flight.borrow_mut() = Some(handle);
            spawn_local(task);
        }
    });

    let on_keydown = EventListener::new(&input, "keydown", move |ev| {
        let Some(key_ev) = ev.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if is_send_key(&key_ev.key(), key_ev.shift_key()) {
            ev.prevent_default();
            let _ = form.request_submit();
        }
    });

    log::debug!("Chat widget bound to #{}", ids.form);
    Ok(Some(ChatWidget {
        form_id: ids.form.clone(),
        in_flight,
        _listeners: vec![on_submit, on_keydown],
        _view: view,
        _owner: owner,
    }))
}

/// `wireChat(formId, inputId, messagesId, sendButtonId)` for page scripts.
///
/// Uses the endpoint resolved at startup; the widget lives as long as the
/// page.
#[wasm_bindgen(js_name = wireChat)]
pub fn wire_chat_js(
    form_id: &str,
    input_id: &str,
    messages_id: &str,
    send_button_id: &str,
) -> Result<(), JsValue> {
    let ids = ChatElementIds::new(form_id, input_id, messages_id, send_button_id);
    match wire_chat(&page_endpoint(), &ids) {
        Ok(Some(widget)) => widget.keep_alive(),
        Ok(None) => {}
        Err(e) => return Err(JsValue::from_str(&e.to_string())),
    }
    Ok(())
}

/// Enter sends, Shift+Enter does not.
fn is_send_key(key: &str, shift: bool) -> bool {
    key == "Enter" && !shift
}

fn require<T: JsCast>(id: &str) -> Result<T, WireError> {
    element_by_id::<T>(id).ok_or_else(|| WireError::MissingElement(id.to_string()))
}

/// Render the transcript into `container` and keep the send button and the
/// scroll position in step with it.
fn mount_messages(
    vm: ChatWidgetVm,
    container: HtmlElement,
    send_button: HtmlButtonElement,
) -> Box<dyn Any> {
    let handle = leptos::mount::mount_to(container.clone(), move || {
        view! {
            <For each=move || vm.messages() key=|msg| msg.id let:msg>
                <div class=msg.css_class()>{msg.text.clone()}</div>
            </For>
        }
    });

    Effect::new(move |_| {
        send_button.set_disabled(vm.is_sending());
    });

    // Scroll to bottom
    Effect::new(move |_| {
        vm.transcript.track();
        let container = container.clone();
        request_animation_frame(move || {
            container.set_scroll_top(container.scroll_height());
        });
    });

    Box::new(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_without_shift_sends() {
        assert!(is_send_key("Enter", false));
        assert!(!is_send_key("Enter", true));
        assert!(!is_send_key("a", false));
    }

    #[test]
    fn form_is_bound_once_until_released() {
        assert!(claim_form("chatFormModal"));
        assert!(!claim_form("chatFormModal"));
        assert!(claim_form("chatFormInline"));

        release_form("chatFormModal");
        assert!(claim_form("chatFormModal"));
    }

    #[test]
    fn element_ids_keep_their_roles() {
        let ids = ChatElementIds::new("chatForm", "chatInput", "chatMessages", "sendBtn");
        assert_eq!(ids.form, "chatForm");
        assert_eq!(ids.input, "chatInput");
        assert_eq!(ids.messages, "chatMessages");
        assert_eq!(ids.send_button, "sendBtn");
    }
}
