//! WASM bindings for primeshare
//!
//! Every export returns the JSON envelope `{"data": ..., "error": ...}` built
//! by [`commands::Response`], so the host always gets a parsable string. The
//! `Err` side is reserved for serialization failures.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::commands::{self, Response};

/// Initialize panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Use wee_alloc as the global allocator for smaller WASM binary size
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

fn envelope<T: Serialize>(result: anyhow::Result<T>) -> Result<String, JsValue> {
    Response::from(result)
        .to_json()
        .map_err(|e| JsValue::from_str(&format!("{e:#}")))
}

/// Hide a UTF-8 message into shares
///
/// # Arguments
/// * `message` - The text to hide
/// * `shares` - Total number of shares to create
/// * `threshold` - Total number of shares needed to recover
/// * `prime` - Optional decimal prime; the default 2^127 - 1 when absent
/// * `wide` - Use two-byte indices for long messages or many shares
///
/// # Example (JavaScript)
/// ```javascript
/// const result = JSON.parse(wasm_hide("attack at dawn", 5, 3, undefined, false));
/// if (result.error) throw new Error(result.error);
/// for (const share of result.data.shares) {
///     console.log(share);
/// }
/// ```
#[wasm_bindgen]
pub fn wasm_hide(
    message: &str,
    shares: u32,
    threshold: u32,
    prime: Option<String>,
    wide: bool,
) -> Result<String, JsValue> {
    let result = commands::build_config(shares, threshold, prime.as_deref(), wide)
        .and_then(|config| commands::hide_message(message.as_bytes(), &config));
    envelope(result)
}

/// Recover a UTF-8 message from shares
///
/// # Example (JavaScript)
/// ```javascript
/// const result = JSON.parse(wasm_recover([share1, share3, share4], undefined));
/// console.log(result.data ?? result.error);
/// ```
#[wasm_bindgen]
pub fn wasm_recover(shares: Vec<String>, prime: Option<String>) -> Result<String, JsValue> {
    let result = commands::build_config(0, 0, prime.as_deref(), false)
        .and_then(|config| commands::recover_text(&shares, &config))
        .map(|text| text.as_str().to_owned());
    envelope(result)
}

/// Share and threshold bounds for hiding `message` with the default prime
#[wasm_bindgen]
pub fn wasm_limits(message: &str, wide: bool) -> Result<String, JsValue> {
    envelope(commands::message_limits(message.as_bytes(), wide))
}

/// Longest message in bytes that can be hidden
#[wasm_bindgen]
pub fn wasm_max_length(prime: Option<String>, wide: bool) -> Result<String, JsValue> {
    let result = commands::build_config(0, 0, prime.as_deref(), wide)
        .and_then(|config| commands::max_length(&config));
    envelope(result)
}

/// Parse a share to read its chunk index, x, width and format
///
/// # Example (JavaScript)
/// ```javascript
/// const info = JSON.parse(wasm_parse_share(share)).data;
/// console.log(`chunk ${info.chunk}, x ${info.x}`);
/// ```
#[wasm_bindgen]
pub fn wasm_parse_share(share: &str) -> Result<String, JsValue> {
    envelope(commands::inspect_share(share))
}
