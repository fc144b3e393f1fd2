//! Floating chat modal: open from the FAB or the "ask my agent" button,
//! close from the close button, Escape, or a click outside the panel.

use super::CHAT_INPUT_ID;
use crate::shared::dom::{document, element_by_id, listen_forever};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent, MouseEvent, Node};

pub const MODAL_ID: &str = "chatModal";
pub const FAB_ID: &str = "chatFab";
pub const CLOSE_ID: &str = "chatClose";
pub const OPEN_AGENT_ID: &str = "openAgentBtn";
pub const CONTENT_SELECTOR: &str = "#chatModal .chat-modal-content";
pub const OPEN_CLASS: &str = "open";

/// Whether a document click should close the modal.
pub fn should_dismiss(is_open: bool, clicked_inside: bool, on_trigger: bool) -> bool {
    is_open && !clicked_inside && !on_trigger
}

/// Whether a key press should close the modal.
pub fn closes_on_key(is_open: bool, key: &str) -> bool {
    is_open && key == "Escape"
}

pub fn install() {
    let Some(modal) = element_by_id::<Element>(MODAL_ID) else {
        return;
    };

    if let Some(fab) = element_by_id::<Element>(FAB_ID) {
        let modal = modal.clone();
        listen_forever(&fab, "click", move |_: MouseEvent| open(&modal));
    }

    if let Some(open_agent) = element_by_id::<Element>(OPEN_AGENT_ID) {
        let modal = modal.clone();
        listen_forever(&open_agent, "click", move |ev: MouseEvent| {
            ev.prevent_default();
            open(&modal);
        });
    }

    if let Some(close_btn) = element_by_id::<Element>(CLOSE_ID) {
        let modal = modal.clone();
        listen_forever(&close_btn, "click", move |_: MouseEvent| close(&modal));
    }

    let Some(doc) = document() else {
        return;
    };

    {
        let modal = modal.clone();
        let doc_for_query = doc.clone();
        listen_forever(&doc, "click", move |ev: MouseEvent| {
            let target = ev.target().and_then(|t| t.dyn_into::<Element>().ok());
            let clicked_inside = match (
                doc_for_query.query_selector(CONTENT_SELECTOR).ok().flatten(),
                &target,
            ) {
                (Some(content), Some(target)) => {
                    let node: &Node = target;
                    content.contains(Some(node))
                }
                _ => false,
            };
            let on_trigger = target.as_ref().is_some_and(is_trigger);

            if should_dismiss(is_open(&modal), clicked_inside, on_trigger) {
                close(&modal);
            }
        });
    }

    listen_forever(&doc, "keydown", move |ev: KeyboardEvent| {
        if closes_on_key(is_open(&modal), &ev.key()) {
            close(&modal);
        }
    });
}

fn is_trigger(target: &Element) -> bool {
    [FAB_ID, OPEN_AGENT_ID].iter().any(|id| {
        target
            .closest(&format!("#{}", id))
            .ok()
            .flatten()
            .is_some()
    })
}

fn is_open(modal: &Element) -> bool {
    modal.class_list().contains(OPEN_CLASS)
}

fn open(modal: &Element) {
    let _ = modal.class_list().add_1(OPEN_CLASS);
    let _ = modal.set_attribute("aria-hidden", "false");
    if let Some(input) = element_by_id::<HtmlElement>(CHAT_INPUT_ID) {
        let _ = input.focus();
    }
}

fn close(modal: &Element) {
    let _ = modal.class_list().remove_1(OPEN_CLASS);
    let _ = modal.set_attribute("aria-hidden", "true");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outside_click_closes_open_modal() {
        assert!(should_dismiss(true, false, false));
    }

    #[test]
    fn clicks_inside_or_on_triggers_keep_it_open() {
        assert!(!should_dismiss(true, true, false));
        assert!(!should_dismiss(true, false, true));
    }

    #[test]
    fn closed_modal_stays_closed() {
        assert!(!should_dismiss(false, false, false));
        assert!(!closes_on_key(false, "Escape"));
    }

    #[test]
    fn only_escape_closes() {
        assert!(closes_on_key(true, "Escape"));
        assert!(!closes_on_key(true, "Enter"));
    }
}
