//! FiberDesk Frontend Entry Point

mod api;
mod app;
mod board;
mod components;
mod config;
mod context;
mod error;
mod filters;
mod forms;
mod kpi;
mod loaders;
mod markdown;
mod models;
mod pages;
mod store;
mod toast;
mod validation;
mod wizard;

use app::App;
use leptos::prelude::*;
use wasm_bindgen::JsValue;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = rolling_logger::init_logger("FiberDesk", rolling_logger::DEFAULT_CAPACITY, tracing::Level::INFO) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("logger already installed: {}", e)));
    }
    mount_to_body(App);
}
