use boardroute_core::{BoardError, Clipboard, StateStore};
use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

fn js_text(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// `window.localStorage`; silently inert where storage is unavailable.
#[derive(Default)]
pub(crate) struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl StateStore for LocalStorageStore {
    fn load(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn save(&mut self, key: &str, value: &str) -> boardroute_core::Result<()> {
        let storage = Self::storage()
            .ok_or_else(|| BoardError::PersistedState("localStorage is unavailable".into()))?;
        storage.set_item(key, value).map_err(|e| BoardError::PersistedState(js_text(e)))
    }

    fn remove(&mut self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// `navigator.clipboard.writeText`. The returned promise is not awaited;
/// only a missing API or a synchronous throw count as failure.
pub(crate) struct AsyncClipboard;

impl Clipboard for AsyncClipboard {
    fn write_text(&mut self, text: &str) -> boardroute_core::Result<()> {
        let window = web_sys::window().ok_or_else(|| BoardError::Clipboard("no window".into()))?;
        let clipboard = Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))
            .map_err(|e| BoardError::Clipboard(js_text(e)))?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return Err(BoardError::Clipboard("navigator.clipboard is unavailable".into()))
        }
        let write: Function = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
            .map_err(|e| BoardError::Clipboard(js_text(e)))?
            .dyn_into()
            .map_err(|_| BoardError::Clipboard("clipboard.writeText is not a function".into()))?;
        write.call1(&clipboard, &JsValue::from_str(text))
            .map_err(|e| BoardError::Clipboard(js_text(e)))?;
        Ok(())
    }
}

/// Hidden textarea + `document.execCommand("copy")`.
pub(crate) struct LegacyClipboard;

impl Clipboard for LegacyClipboard {
    fn write_text(&mut self, text: &str) -> boardroute_core::Result<()> {
        let fail = |e: JsValue| BoardError::Clipboard(js_text(e));
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| BoardError::Clipboard("no document".into()))?;
        let body = document.body().ok_or_else(|| BoardError::Clipboard("no document body".into()))?;

        let textarea: web_sys::HtmlTextAreaElement = document.create_element("textarea").map_err(fail)?
            .dyn_into()
            .map_err(|_| BoardError::Clipboard("could not create textarea".into()))?;
        textarea.set_value(text);
        body.append_child(&textarea).map_err(fail)?;
        textarea.select();

        let copied = document.dyn_ref::<web_sys::HtmlDocument>()
            .ok_or_else(|| BoardError::Clipboard("document is not an HTML document".into()))
            .and_then(|html| html.exec_command("copy").map_err(fail));
        let _ = body.remove_child(&textarea);

        match copied? {
            true => Ok(()),
            false => Err(BoardError::Clipboard("execCommand(\"copy\") was rejected".into())),
        }
    }
}
