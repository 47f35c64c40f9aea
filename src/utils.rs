use wasm_bindgen::prelude::*;

/// Shortens a hex hash or address to `0x1234...abcd` for display.
#[wasm_bindgen]
pub fn abbreviate_hex(value: &str) -> String {
    if value.len() <= 14 || !value.is_ascii() {
        return value.to_string();
    }
    format!("{}...{}", &value[0..6], &value[value.len() - 4..])
}

/// Placeholder for amount inputs, in the same unit the supply is shown in.
#[wasm_bindgen]
pub fn amount_placeholder(symbol: &str) -> String {
    format!("0.0000 {symbol}")
}
