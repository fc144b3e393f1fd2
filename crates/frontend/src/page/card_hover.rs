use crate::shared::dom::{listen_forever, query_all};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

pub const CARD_SELECTOR: &str = ".project-card";

const LIFTED: &str = "translateY(-10px) scale(1.02)";
const RESTING: &str = "translateY(0) scale(1)";

pub fn card_transform(hovered: bool) -> &'static str {
    if hovered {
        LIFTED
    } else {
        RESTING
    }
}

/// Lift project cards while the pointer is over them.
pub fn install() {
    let cards: Vec<HtmlElement> = query_all(CARD_SELECTOR)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();
    log::debug!("card hover: {} cards", cards.len());

    for card in cards {
        for (event, hovered) in [("mouseenter", true), ("mouseleave", false)] {
            let target = card.clone();
            listen_forever(&card, event, move |_: web_sys::MouseEvent| {
                let _ = target
                    .style()
                    .set_property("transform", card_transform(hovered));
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transforms_for_both_states() {
        assert_eq!(card_transform(true), "translateY(-10px) scale(1.02)");
        assert_eq!(card_transform(false), "translateY(0) scale(1)");
    }
}
