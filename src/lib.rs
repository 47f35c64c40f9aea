use wasm_bindgen::prelude::*;

pub mod abi;
mod app;
mod components;
pub mod config;
pub mod contract;
pub mod controller;
pub mod error;
pub mod provider;
pub mod session;
pub mod timer;
pub mod units;
mod utils;

#[cfg(test)]
mod test_utils;

#[wasm_bindgen(start)]
pub fn run_app() -> Result<(), JsValue> {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    wasm_logger::init(wasm_logger::Config::default());
    let config = config::Config::load().map_err(|err| JsValue::from_str(&err.to_string()))?;
    yew::Renderer::<app::App>::with_props(app::Props { config }).render();
    Ok(())
}
