use crate::shared::dom::{element_by_id, listen_forever};
use web_sys::Element;

pub const NAVBAR_ID: &str = "navbar";
pub const SCROLLED_CLASS: &str = "scrolled";

/// Vertical offset past which the navbar switches to its compact style.
pub const SCROLL_THRESHOLD_PX: f64 = 100.0;

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > SCROLL_THRESHOLD_PX
}

/// Toggle `#navbar.scrolled` as the window scrolls.
pub fn install() {
    let Some(window) = web_sys::window() else {
        return;
    };

    let on_scroll = {
        let window = window.clone();
        move |_: web_sys::Event| {
            let Some(navbar) = element_by_id::<Element>(NAVBAR_ID) else {
                return;
            };
            let scroll_y = window.scroll_y().unwrap_or_default();
            let _ = navbar
                .class_list()
                .toggle_with_force(SCROLLED_CLASS, is_scrolled(scroll_y));
        }
    };
    listen_forever(&window, "scroll", on_scroll);
}
