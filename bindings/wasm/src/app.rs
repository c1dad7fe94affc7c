use boardroute_core::{
    App, AppContext, Config, Dataset, GeolocationError, LocateMode, LocateToken, LocationFix, NoticeKind, Progress, Scene,
};
use serde::Serialize;
use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use crate::{common::*, platform::{AsyncClipboard, LegacyClipboard, LocalStorageStore}};

/// Selector row handed to the page.
#[derive(Serialize)]
struct DistrictView<'a> {
    name: &'a str,
    number: u32,
    label: &'a str,
    display: String,
    progress: Progress,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PositionOptions {
    enable_high_accuracy: bool,
    timeout: u32,
    maximum_age: u32,
}

#[wasm_bindgen]
pub struct WasmApp {
    inner: App<Scene, LocalStorageStore>,
}

#[wasm_bindgen]
impl WasmApp {
    /// Build the viewer from GeoJSON text and an optional JSON config.
    #[wasm_bindgen(constructor)]
    pub fn new(geojson: &str, config_json: Option<String>) -> Result<WasmApp, JsValue> {
        let dataset = Dataset::from_slice(geojson.as_bytes()).map_err(js_err)?;
        Self::with_dataset(dataset, config_json)
    }

    /// Build the viewer from a fetch response: non-2xx statuses are load errors.
    pub fn from_response(status: u16, body: &[u8], config_json: Option<String>) -> Result<WasmApp, JsValue> {
        let dataset = Dataset::from_response(status, body).map_err(js_err)?;
        Self::with_dataset(dataset, config_json)
    }

    fn with_dataset(dataset: Dataset, config_json: Option<String>) -> Result<WasmApp, JsValue> {
        let config = match config_json {
            Some(text) => Config::from_json_str(&text).map_err(js_err)?,
            None => Config::default(),
        };
        let ctx = AppContext::new(config, dataset);
        Ok(WasmApp { inner: App::new(ctx, Scene::new(), LocalStorageStore) })
    }

    /// Restore the last selection from localStorage, else show all districts.
    pub fn startup(&mut self) {
        self.inner.startup(now());
    }

    /// Districts matching the current search text, with progress.
    pub fn districts(&self) -> Result<JsValue, JsValue> {
        let dataset = self.inner.dataset();
        let rows: Vec<DistrictView> = self.inner.visible_districts().into_iter()
            .map(|e| DistrictView {
                name: &e.name,
                number: e.numeric(),
                label: e.label(),
                display: e.display(),
                progress: boardroute_core::compute_progress(dataset, &e.name),
            })
            .collect();
        to_js(&rows)
    }

    /// Set the search text; returns the matching districts.
    pub fn search(&mut self, text: &str) -> Result<JsValue, JsValue> {
        self.inner.search(text);
        self.districts()
    }

    /// Escape in the search box.
    pub fn clear_search(&mut self) -> Result<JsValue, JsValue> {
        self.search("")
    }

    /// Select a district; returns its render (info, route list, links) or null.
    pub fn select(&mut self, district: &str) -> Result<JsValue, JsValue> {
        match self.inner.select_district(district, now()) {
            Some(rendered) => to_js(rendered),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn show_all(&mut self) {
        self.inner.show_all();
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Selected district name, or undefined on the all-districts view.
    pub fn selected(&self) -> Option<String> {
        self.inner.selection().district().map(str::to_string)
    }

    /// Current scene (markers, lines, view, popup, banner) as a JS object.
    pub fn scene(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.surface())
    }

    /// Current scene as SVG text.
    pub fn to_svg(&self, width: Option<i32>, margin: Option<i32>) -> Result<String, JsValue> {
        self.inner.surface().to_svg_string(width.unwrap_or(1200), margin.unwrap_or(20)).map_err(js_err)
    }

    /// Acknowledge the detailed-route banner once the page has shown it.
    pub fn take_banner(&mut self) -> Result<JsValue, JsValue> {
        match self.inner.surface_mut().banner.take() {
            Some(banner) => to_js(&banner),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn route_list(&self) -> Result<JsValue, JsValue> {
        match self.inner.rendered() {
            Some(rendered) => to_js(&rendered.route_list),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn overview(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.overview())
    }

    pub fn whole_route_link(&self) -> Option<String> {
        self.inner.rendered().and_then(|r| r.whole_route_link.clone())
    }

    /// Link for leg `index` (zero-based) of the selected district.
    pub fn segment_link(&self, index: usize) -> Option<String> {
        self.inner.rendered()
            .and_then(|r| r.route_list.connector(index))
            .map(|c| c.link.clone())
    }

    pub fn progress(&self, district: &str) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.progress(district)).map_err(|e| e.into())
    }

    pub fn summary(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.summary()).map_err(|e| e.into())
    }

    pub fn focus_stop(&mut self, order: u32) -> bool {
        self.inner.focus_stop(order)
    }

    pub fn focus_segment(&mut self, index: usize) -> bool {
        self.inner.focus_segment(index)
    }

    /// Pretty-printed dataset for the "download data" button.
    pub fn export_text(&self) -> Result<String, JsValue> {
        self.inner.export_json().map_err(js_err)
    }

    pub fn export_filename(&self) -> String {
        self.inner.config().data.export_filename.clone()
    }

    /// Options object for `getCurrentPosition` / `watchPosition`.
    pub fn geolocation_options(&self) -> Result<JsValue, JsValue> {
        let options = &self.inner.config().geolocation;
        let out = PositionOptions {
            enable_high_accuracy: options.enable_high_accuracy,
            timeout: options.timeout_ms,
            maximum_age: options.maximum_age_ms,
        };
        serde_wasm_bindgen::to_value(&out).map_err(|e| e.into())
    }

    /// Start a location request; pass the token back with its result.
    pub fn begin_locate(&mut self, watch: bool) -> f64 {
        let mode = if watch { LocateMode::Watch } else { LocateMode::OneShot };
        self.inner.begin_locate(mode).value() as f64
    }

    pub fn apply_location(&mut self, token: f64, lat: f64, lon: f64, accuracy_m: f64) -> bool {
        self.inner.apply_location(LocateToken::from_value(token as u64), LocationFix { lat, lon, accuracy_m })
    }

    /// `code` is `GeolocationPositionError.code`, or 0 when the API is missing.
    pub fn location_failed(&mut self, token: f64, code: u16) {
        let error = GeolocationError::from_code(code);
        self.inner.location_failed(LocateToken::from_value(token as u64), error, now());
    }

    pub fn stop_tracking(&mut self) {
        self.inner.stop_tracking();
    }

    /// Copy an address with the async clipboard API, falling back to execCommand.
    pub fn copy_address(&mut self, text: &str) {
        self.inner.copy_address(text, &mut AsyncClipboard, &mut LegacyClipboard, now());
    }

    /// Surface an otherwise unhandled error as a generic notice.
    pub fn report_error(&mut self, message: &str) {
        tracing::error!("unhandled error: {message}");
        self.inner.notify(NoticeKind::Error, "An unexpected error occurred", now());
    }

    /// Notices still showing now.
    pub fn notices(&mut self) -> Result<JsValue, JsValue> {
        let notices = self.inner.notices(now()).to_vec();
        to_js(&notices)
    }
}
