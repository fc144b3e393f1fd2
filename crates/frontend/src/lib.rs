pub mod agent;
pub mod page;
pub mod shared;

use shared::api_utils::page_endpoint;
use wasm_bindgen::prelude::wasm_bindgen;

fn enhance_page() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    let config = page_endpoint();
    log::info!("Portfolio agent at {}", config.base_url());
    page::enhance(&config);
}

#[wasm_bindgen(start)]
pub fn start() {
    enhance_page();
}
