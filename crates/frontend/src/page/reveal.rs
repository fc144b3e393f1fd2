use crate::shared::dom::query_all;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

pub const ANIMATE_SELECTOR: &str = ".animate-in";
pub const VISIBLE_CLASS: &str = "visible";

const THRESHOLD: f64 = 0.1;
const ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Mark `.animate-in` elements visible the first time they enter the
/// viewport. The class stays once added.
pub fn install() {
    let targets = query_all(ANIMATE_SELECTOR);
    if targets.is_empty() {
        return;
    }

    let on_intersect = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let _ = entry.target().class_list().add_1(VISIBLE_CLASS);
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(THRESHOLD));
    options.set_root_margin(ROOT_MARGIN);

    let observer = match IntersectionObserver::new_with_options(
        on_intersect.as_ref().unchecked_ref(),
        &options,
    ) {
        Ok(observer) => observer,
        Err(e) => {
            log::warn!("reveal: IntersectionObserver unavailable: {:?}", e);
            return;
        }
    };
    on_intersect.forget();

    log::debug!("reveal: observing {} elements", targets.len());
    for target in &targets {
        observer.observe(target);
    }
}
