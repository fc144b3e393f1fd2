use crate::shared::dom::{document, listen_forever, query_all};
use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

/// In-page anchors scroll smoothly to their target instead of jumping.
pub fn install() {
    let anchors = query_all("a[href^=\"#\"]");
    log::debug!("smooth scroll: {} anchors", anchors.len());

    for anchor in anchors {
        let href = anchor.get_attribute("href").unwrap_or_default();
        listen_forever(&anchor, "click", move |ev: web_sys::MouseEvent| {
            ev.prevent_default();
            let Some(selector) = target_selector(&href) else {
                return;
            };
            let Some(target) = document().and_then(|d| d.query_selector(selector).ok().flatten())
            else {
                return;
            };

            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        });
    }
}

/// The selector an anchor `href` points at; a bare `#` points nowhere.
fn target_selector(href: &str) -> Option<&str> {
    match href.strip_prefix('#') {
        Some(fragment) if !fragment.trim().is_empty() => Some(href),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_is_used_as_selector() {
        assert_eq!(target_selector("#projects"), Some("#projects"));
    }

    #[test]
    fn bare_hash_has_no_target() {
        assert_eq!(target_selector("#"), None);
        assert_eq!(target_selector("# "), None);
        assert_eq!(target_selector("/about"), None);
    }
}
