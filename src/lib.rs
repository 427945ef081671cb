mod api;
mod app;
mod pages;
mod session;
mod storage;
mod types;

use leptos::*;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    // Auth guard: without a stored token there is nothing to render.
    if storage::load_token().is_none() {
        app::redirect("index.html");
        return;
    }

    mount_to_body(app::App);
}
