pub mod character;
pub mod codec;
pub mod config;
pub mod controller;
pub mod js_api;
pub mod page;
pub mod surface;
pub mod utils;

use std::{collections::HashMap, rc::Rc};

use js_api::{character_pairs_from_js, ToJsValue};
use log::debug;
use utils::{init_logging, set_panic_hook};
use wasm_bindgen::prelude::*;

use config::{editor_config, set_editor_config, EditorConfig};
use surface::web::WebSurface;

/// Replaces the default configuration. Must run before `enhance_page`.
#[wasm_bindgen]
pub fn configure(params: js_sys::Object) -> Result<(), JsValue> {
    let mut editor_params = HashMap::new();
    let keys = js_sys::Object::keys(&params);
    for key in keys.iter() {
        let key_str = key
            .as_string()
            .ok_or_else(|| JsValue::from_str("parameter names must be strings"))?;
        let value = js_sys::Reflect::get(&params, &key)?
            .as_string()
            .ok_or_else(|| JsValue::from_str(&format!("{} must be a string", key_str)))?;
        editor_params.insert(key_str, value);
    }

    let config = EditorConfig::from_params(&editor_params)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    let level = config.log_level;
    set_editor_config(config).map_err(|err| JsValue::from_str(&err.to_string()))?;
    init_logging(level);
    debug!("Editor configured with {:?}", editor_params.keys().collect::<Vec<_>>());
    Ok(())
}

/// Scans the document and attaches an editor to every handled field.
/// Returns the number of fields attached.
#[wasm_bindgen]
pub fn enhance_page() -> Result<u32, JsValue> {
    let config = editor_config();
    init_logging(config.log_level);
    let surface = Rc::new(WebSurface::from_window()?);
    let controllers = page::enhance_page(&surface, &Rc::new(config.clone()));
    Ok(controllers.len() as u32)
}

#[wasm_bindgen]
pub fn decode_characters(raw: Option<String>) -> JsValue {
    codec::decode(raw.as_deref(), &editor_config().separators).to_js_value()
}

#[wasm_bindgen]
pub fn encode_characters(characters: js_sys::Array) -> Result<String, JsValue> {
    let records = characters
        .iter()
        .map(|character| character_pairs_from_js(&character))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(codec::encode(&records, &editor_config().separators))
}

#[wasm_bindgen(start)]
pub fn main() {
    set_panic_hook();
    init_logging(log::Level::Info);
}
