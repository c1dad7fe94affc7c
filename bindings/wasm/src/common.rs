use chrono::{DateTime, Utc};
use serde::Serialize;
use wasm_bindgen::JsValue;

pub(crate) fn js_err(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Serialize through a JSON string and parse it on the JS side, so nested
/// structs arrive as plain objects.
pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value)
        .map_err(|e| js_err(format!("Failed to serialize value: {e}")))?;
    js_sys::JSON::parse(&json)
        .map_err(|e| js_err(format!("Failed to parse serialized value: {e:?}")))
}

/// Current time from the JS clock.
pub(crate) fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}
