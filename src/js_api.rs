use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::character::{Character, CharacterKey};

pub trait ToJsValue {
    fn to_js_value(&self) -> JsValue;
}

impl ToJsValue for Character {
    fn to_js_value(&self) -> JsValue {
        let object = Object::new();
        for key in CharacterKey::ALL.iter() {
            let value = match key {
                CharacterKey::Age => match self.age {
                    Some(age) => JsValue::from_f64(age as f64),
                    None => JsValue::NULL,
                },
                _ => JsValue::from_str(&self.field_value(*key)),
            };
            // Setting a property on a fresh plain object cannot fail.
            let _ = Reflect::set(&object, &JsValue::from_str(key.as_str()), &value);
        }
        object.into()
    }
}

impl ToJsValue for Vec<Character> {
    fn to_js_value(&self) -> JsValue {
        let array = Array::new();
        for character in self {
            array.push(&character.to_js_value());
        }
        array.into()
    }
}

/// Text written for a property value coming from JavaScript. Integral numbers
/// within `i64` lose their fraction so that `30` does not become `30.0`.
fn js_property_text(value: &JsValue) -> Result<String, JsValue> {
    if value.is_null() || value.is_undefined() {
        return Ok(String::new());
    }
    if let Some(text) = value.as_string() {
        return Ok(text);
    }
    if let Some(number) = value.as_f64() {
        // 2^63 is exactly representable; anything from there up does not fit.
        let in_range = number >= i64::MIN as f64 && number < i64::MAX as f64;
        if in_range && number.fract() == 0.0 {
            return Ok(format!("{}", number as i64));
        }
        return Ok(number.to_string());
    }
    Err(JsValue::from_str(&format!(
        "unsupported character property value {:?}",
        value
    )))
}

/// Reads the known properties of a character-like object as key/value pairs,
/// in canonical order. Other properties are ignored.
pub fn character_pairs_from_js(value: &JsValue) -> Result<Vec<(String, String)>, JsValue> {
    if !value.is_object() {
        return Err(JsValue::from_str("character must be an object"));
    }
    CharacterKey::ALL
        .iter()
        .map(|key| {
            let property = Reflect::get(value, &JsValue::from_str(key.as_str()))?;
            Ok((key.as_str().to_string(), js_property_text(&property)?))
        })
        .collect()
}
