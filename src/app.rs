use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::{
    clipboard::{copy_with_fallback, Clipboard, COPY_SUCCESS_MESSAGE},
    config::Config,
    dataset::Dataset,
    district::{compute_progress, draw_overview, filter_districts, list_districts, overall_summary, DistrictEntry, OverallSummary, OverviewMarker, Progress},
    error::GeolocationError,
    locate::{draw_location, LocateMode, LocateRequests, LocateToken, LocationFix},
    notice::{Notice, NoticeBoard, NoticeKind},
    route::{RenderedDistrict, RouteRenderer},
    selection::{restore, Event, Generation, PersistedState, Selection, StateStore},
    surface::MapSurface,
};

/// Shared, read-only inputs of the viewer.
#[derive(Clone, Debug)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub dataset: Arc<Dataset>,
}

impl AppContext {
    pub fn new(config: impl Into<Arc<Config>>, dataset: impl Into<Arc<Dataset>>) -> Self {
        Self { config: config.into(), dataset: dataset.into() }
    }
}

/// The viewer: selection state plus the surface and store it drives.
/// Every UI event maps to one handler; each handler runs a pure
/// [`Selection`] transition and then redraws.
pub struct App<S: MapSurface, T: StateStore> {
    ctx: AppContext,
    surface: S,
    store: T,
    districts: Vec<DistrictEntry>,
    selection: Selection,
    generation: Generation,
    rendered: Option<RenderedDistrict>,
    overview: Vec<OverviewMarker>,
    search_text: String,
    notices: NoticeBoard,
    locates: LocateRequests,
}

impl<S: MapSurface, T: StateStore> App<S, T> {
    pub fn new(ctx: AppContext, surface: S, store: T) -> Self {
        let districts = list_districts(&ctx.dataset);
        Self {
            ctx,
            surface,
            store,
            districts,
            selection: Selection::default(),
            generation: Generation::default(),
            rendered: None,
            overview: Vec::new(),
            search_text: String::new(),
            notices: NoticeBoard::new(),
            locates: LocateRequests::default(),
        }
    }

    #[inline] pub fn config(&self) -> &Config { &self.ctx.config }
    #[inline] pub fn dataset(&self) -> &Dataset { &self.ctx.dataset }
    #[inline] pub fn surface(&self) -> &S { &self.surface }
    #[inline] pub fn surface_mut(&mut self) -> &mut S { &mut self.surface }
    #[inline] pub fn store(&self) -> &T { &self.store }
    #[inline] pub fn selection(&self) -> &Selection { &self.selection }
    #[inline] pub fn generation(&self) -> Generation { self.generation }
    #[inline] pub fn districts(&self) -> &[DistrictEntry] { &self.districts }
    #[inline] pub fn search_text(&self) -> &str { &self.search_text }

    /// The current district render, if a district is selected.
    #[inline] pub fn rendered(&self) -> Option<&RenderedDistrict> { self.rendered.as_ref() }

    /// Markers of the all-districts view, if it is showing.
    #[inline] pub fn overview(&self) -> &[OverviewMarker] { &self.overview }

    pub fn progress(&self, district: &str) -> Progress { compute_progress(self.dataset(), district) }

    pub fn summary(&self) -> OverallSummary { overall_summary(self.dataset()) }

    /// Restore the persisted selection if it is still usable, else show all districts.
    pub fn startup(&mut self, now: DateTime<Utc>) {
        let config = &self.ctx.config;
        let restored = restore(&self.store, &config.storage.key, config.max_age(), &self.ctx.dataset, now);
        info!(restored = ?restored, "startup");

        match self.selection.apply(Event::Restore(restored)) {
            Selection::DistrictSelected(district) => {
                if self.select_district(&district, now).is_none() {
                    self.show_all();
                }
            }
            Selection::AllDistricts => {
                self.selection = Selection::AllDistricts;
                self.enter_all();
            }
        }
    }

    /// Select a district. Districts with nothing to draw are a no-op.
    pub fn select_district(&mut self, district: &str, now: DateTime<Utc>) -> Option<&RenderedDistrict> {
        let renderer = RouteRenderer::new(&self.ctx.config);
        let Some(rendered) = renderer.render(&self.ctx.dataset, district, &mut self.surface) else {
            debug!(district, "selection ignored: nothing to draw");
            return None
        };

        self.selection = self.selection.apply(Event::Select(district.to_string()));
        self.generation.bump();
        self.overview.clear();
        self.rendered = Some(rendered);
        self.persist(Some(district.to_string()), now);
        self.rendered.as_ref()
    }

    /// Show every district and forget the persisted selection.
    pub fn show_all(&mut self) {
        self.selection = self.selection.apply(Event::ShowAll);
        self.enter_all();
        self.store.remove(&self.ctx.config.storage.key);
    }

    /// Back to the initial view with an empty search box.
    pub fn reset(&mut self) {
        self.search_text.clear();
        self.stop_tracking();
        self.show_all();
    }

    fn enter_all(&mut self) {
        self.generation.bump();
        self.rendered = None;
        self.overview = draw_overview(&self.ctx.dataset, &self.ctx.config, &mut self.surface);
    }

    fn persist(&mut self, district: Option<String>, now: DateTime<Utc>) {
        let state = PersistedState::new(district, now);
        let saved = state.to_json().and_then(|json| self.store.save(&self.ctx.config.storage.key, &json));
        if let Err(e) = saved {
            warn!("could not persist selection: {e}");
        }
    }

    /// Update the search box; returns the matching districts.
    pub fn search(&mut self, text: &str) -> Vec<&DistrictEntry> {
        self.search_text = text.to_string();
        filter_districts(&self.districts, &self.search_text)
    }

    /// Districts matching the current search text.
    pub fn visible_districts(&self) -> Vec<&DistrictEntry> {
        filter_districts(&self.districts, &self.search_text)
    }

    /// Recentre on the stop with route order `order`. False if there is none.
    pub fn focus_stop(&mut self, order: u32) -> bool {
        let Some(stop) = self.rendered.as_ref().and_then(|r| r.route_list.stop(order)) else { return false };
        RouteRenderer::new(&self.ctx.config).focus_stop(stop, &mut self.surface);
        true
    }

    /// Recentre on the connector for leg `index` (zero-based). False if there is none.
    pub fn focus_segment(&mut self, index: usize) -> bool {
        let Some(connector) = self.rendered.as_ref().and_then(|r| r.route_list.connector(index)) else { return false };
        RouteRenderer::new(&self.ctx.config).focus_connector(connector, &mut self.surface);
        true
    }

    /// Start a location request. Results must come back with the returned token.
    pub fn begin_locate(&mut self, mode: LocateMode) -> LocateToken {
        self.locates.begin(mode, self.generation.token())
    }

    fn resolve_locate(&mut self, token: LocateToken) -> Option<LocateMode> {
        let generation = self.generation;
        self.locates.resolve(token, |issued| generation.is_current(issued))
    }

    /// Draw a fix. Stale tokens are ignored; returns whether it was applied.
    pub fn apply_location(&mut self, token: LocateToken, fix: LocationFix) -> bool {
        let Some(mode) = self.resolve_locate(token) else {
            debug!(token = token.value(), "dropping stale location fix");
            return false
        };
        draw_location(&mut self.surface, &fix, mode, &self.ctx.config);
        true
    }

    /// Report a failed request. One-shot failures become an error notice;
    /// watch failures are only logged.
    pub fn location_failed(&mut self, token: LocateToken, error: GeolocationError, now: DateTime<Utc>) {
        match self.resolve_locate(token) {
            None => {}
            Some(LocateMode::Watch) => warn!("location tracking error: {error}"),
            Some(LocateMode::OneShot) => {
                warn!("location request failed: {error}");
                self.notices.post(NoticeKind::Error, error.to_string(), self.ctx.config.ui.notice_ms, now);
            }
        }
    }

    /// End any position watch and remove the location marker.
    pub fn stop_tracking(&mut self) {
        if self.locates.stop_watch() {
            debug!("location tracking stopped");
        }
        self.surface.clear_location();
    }

    #[inline] pub fn is_tracking(&self) -> bool { self.locates.is_watching() }

    /// Copy an address, falling back to the legacy mechanism. The user always
    /// sees the confirmation; failures are logged only.
    pub fn copy_address(&mut self, text: &str, primary: &mut dyn Clipboard, fallback: &mut dyn Clipboard, now: DateTime<Utc>) {
        let outcome = copy_with_fallback(primary, fallback, text);
        debug!(?outcome, "copy address");
        self.notices.post(NoticeKind::Success, COPY_SUCCESS_MESSAGE, self.ctx.config.ui.copy_feedback_ms, now);
    }

    /// Post a generic notice (e.g. from a global error handler).
    pub fn notify(&mut self, kind: NoticeKind, message: impl Into<String>, now: DateTime<Utc>) {
        self.notices.post(kind, message, self.ctx.config.ui.notice_ms, now);
    }

    /// Notices still showing at `now`.
    pub fn notices(&mut self, now: DateTime<Utc>) -> &[Notice] {
        self.notices.active(now)
    }

    /// Pretty-printed dataset for the "download data" action.
    pub fn export_json(&self) -> anyhow::Result<String> {
        self.ctx.dataset.to_pretty_json()
    }
}
