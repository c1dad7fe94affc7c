mod common;

use approx::assert_relative_eq;
use boardroute::*;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(1_752_000_000_000).unwrap()
}

fn app() -> App<Scene, MemoryStore> {
    App::new(AppContext::new(Config::default(), common::fixture()), Scene::new(), MemoryStore::new())
}

#[test]
fn districts_are_sorted_by_number_with_malformed_first() {
    let names: Vec<_> = list_districts(&common::fixture()).into_iter().map(|e| e.name).collect();
    assert_eq!(names, ["C", "B", "A", "D"]);
}

#[test]
fn progress_identities_hold_for_every_district() {
    let dataset = common::fixture();
    for entry in list_districts(&dataset) {
        let p = compute_progress(&dataset, &entry.name);
        assert_eq!(p.total_boards, p.completed_boards + p.incomplete_boards, "{}", entry.name);
        if p.is_fully_completed {
            assert_eq!(p.incomplete_boards, 0);
            assert!(p.completed_boards > 0);
        }
    }

    let a = compute_progress(&dataset, "A");
    assert_eq!((a.completed_boards, a.incomplete_boards, a.is_fully_completed), (1, 2, false));
    let b = compute_progress(&dataset, "B");
    assert_eq!((b.completed_boards, b.incomplete_boards), (1, 2));
    assert!(compute_progress(&dataset, "D").is_fully_completed);
    assert!(!compute_progress(&dataset, "nowhere").is_fully_completed);
}

#[test]
fn simple_route_district_draws_one_dashed_line_and_three_markers() {
    let dataset = common::fixture();
    let config = Config::default();
    let mut scene = Scene::new();

    let rendered = RouteRenderer::new(&config).render(&dataset, "A", &mut scene).unwrap();

    assert_eq!(scene.routes.len(), 1);
    assert!(scene.routes[0].dashed);
    assert_eq!(scene.points.len(), 3);
    assert_eq!(scene.points[0].kind, MarkerKind::Start);
    assert_eq!(scene.points[0].label.as_deref(), Some("1"));
    assert!(!rendered.detailed);
    assert!(scene.banner.is_none());

    let orders: Vec<u32> = rendered.route_list.stops().map(|s| s.order).collect();
    assert_eq!(orders, [1, 2, 3]);
    assert_eq!(rendered.route_list.connectors().count(), 2);
    assert_eq!(rendered.info.active_count, 3);
    assert_eq!(rendered.info.number_label, "2");
}

#[test]
fn matched_segment_draws_its_own_polyline_and_one_connector() {
    let dataset = common::fixture();
    let config = Config::default();
    let mut scene = Scene::new();

    let rendered = RouteRenderer::new(&config).render(&dataset, "B", &mut scene).unwrap();

    assert_eq!(scene.routes.len(), 1);
    assert!(!scene.routes[0].dashed);
    assert_eq!(scene.routes[0].path.len(), 3);
    assert!(rendered.detailed);
    assert_eq!(scene.banner.as_ref().map(|b| b.duration_ms), Some(5000));

    let connectors: Vec<_> = rendered.route_list.connectors().collect();
    assert_eq!(connectors.len(), 1);
    let expected = haversine_km(LatLng::new(35.900, 140.200), LatLng::new(35.905, 140.210));
    assert_relative_eq!(connectors[0].distance_km, expected, epsilon = 1e-12);
    assert_eq!(connectors[0].minutes, walking_minutes(expected, 4.0));
    assert_eq!(connectors[0].time_text, format_minutes(connectors[0].minutes));
    assert_eq!(rendered.legs[0].anchor, LatLng::new(35.906, 140.205));

    // two active boards, one completed board, the voting office
    assert_eq!(scene.points.len(), 4);
    assert_eq!(scene.points.iter().filter(|m| m.kind == MarkerKind::VotingOffice).count(), 1);
    assert_eq!(rendered.info.office_name.as_deref(), Some("B office"));
}

#[test]
fn unmatched_leg_next_to_a_segment_is_a_solid_straight_line() {
    let dataset = Dataset::from_value(json!({
        "type": "FeatureCollection",
        "features": [
            common::board("E", "5", 1, 140.500, 35.500, "not_yet"),
            common::board("E", "5", 2, 140.510, 35.510, "not_yet"),
            common::board("E", "5", 3, 140.520, 35.500, "not_yet"),
            common::line(&[[140.500, 35.500], [140.505, 35.512], [140.510, 35.510]],
                 json!({ "district": "E", "type": "route_segment", "from_point": 1, "to_point": 2, "segment": 1 })),
        ]
    })).unwrap();
    let config = Config::default();
    let mut scene = Scene::new();

    let rendered = RouteRenderer::new(&config).render(&dataset, "E", &mut scene).unwrap();

    assert!(rendered.detailed);
    assert_eq!(scene.routes.len(), 2);
    assert!(scene.routes.iter().all(|line| !line.dashed));
    assert_eq!(scene.routes[1].path, [LatLng::new(35.510, 140.510), LatLng::new(35.500, 140.520)]);

    let anchors: Vec<LatLng> = rendered.route_list.connectors().map(|c| c.anchor).collect();
    assert_eq!(anchors[0], LatLng::new(35.512, 140.505));
    assert_relative_eq!(anchors[1].lat, 35.505, epsilon = 1e-9);
    assert_relative_eq!(anchors[1].lng, 140.515, epsilon = 1e-9);
}

#[test]
fn segment_focus_opens_the_popup_on_the_road() {
    let mut app = app();
    app.select_district("B", now()).unwrap();
    let on_road = LatLng::new(35.906, 140.205);

    assert!(app.focus_segment(0));
    let scene = app.surface();
    let popup = scene.popup.as_ref().unwrap();
    assert_eq!(popup.position, on_road);
    assert_eq!(scene.view, Some(View::Center { center: on_road, zoom: 15 }));
    assert_eq!(app.rendered().unwrap().route_list.connector(0).unwrap().anchor, on_road);
}

#[test]
fn detailed_banner_does_not_carry_over_to_the_next_district() {
    let mut app = app();
    app.select_district("B", now()).unwrap();
    assert!(app.surface().banner.is_some());

    app.select_district("A", now()).unwrap();
    assert!(app.surface().banner.is_none());
}

#[test]
fn selecting_a_then_b_leaves_only_b_on_the_map() {
    let mut app = app();
    app.select_district("A", now()).unwrap();
    app.select_district("B", now()).unwrap();

    let b_points: Vec<LatLng> = common::fixture().features().iter()
        .filter(|f| f.district() == "B")
        .filter_map(Feature::position)
        .collect();

    let scene = app.surface();
    assert_eq!(scene.points.len(), b_points.len());
    assert!(scene.points.iter().all(|m| b_points.contains(&m.position)));
    assert_eq!(scene.routes.len(), 1);
    assert!(!scene.routes[0].dashed);
    assert_eq!(app.selection(), &Selection::DistrictSelected("B".into()));
}

#[test]
fn persisted_district_missing_from_dataset_is_ignored() {
    let mut store = MemoryStore::new();
    let state = PersistedState::new(Some("Z".into()), now());
    store.save("electionBoardState", &state.to_json().unwrap()).unwrap();

    let mut app = App::new(AppContext::new(Config::default(), common::fixture()), Scene::new(), store);
    app.startup(now());

    assert!(app.selection().is_all());
    assert_eq!(app.overview().len(), 4);
    assert!(app.surface().points.iter().all(|m| m.kind == MarkerKind::District));
}

#[test]
fn fresh_persisted_district_is_restored_and_expired_one_is_not() {
    let saved_at = now() - Duration::hours(2);
    let mut store = MemoryStore::new();
    store.save("electionBoardState", &PersistedState::new(Some("A".into()), saved_at).to_json().unwrap()).unwrap();

    let mut app = App::new(AppContext::new(Config::default(), common::fixture()), Scene::new(), store.clone());
    app.startup(now());
    assert_eq!(app.selection().district(), Some("A"));

    let mut late = App::new(AppContext::new(Config::default(), common::fixture()), Scene::new(), store);
    late.startup(now() + Duration::hours(23));
    assert!(late.selection().is_all());
}

#[test]
fn selection_is_persisted_and_show_all_forgets_it() {
    let mut app = app();
    app.select_district("D", now()).unwrap();

    let stored = app.store().load("electionBoardState").unwrap();
    let state = PersistedState::parse(&stored).unwrap();
    assert_eq!(state.current_district.as_deref(), Some("D"));
    assert_eq!(state.timestamp, now().timestamp_millis());

    app.show_all();
    assert!(app.store().load("electionBoardState").is_none());
    assert!(app.rendered().is_none());
}

#[test]
fn unknown_district_is_a_no_op() {
    let mut app = app();
    app.select_district("A", now()).unwrap();
    let before = app.surface().clone();

    assert!(app.select_district("nowhere", now()).is_none());
    assert_eq!(app.surface(), &before);
    assert_eq!(app.selection().district(), Some("A"));
}

#[test]
fn district_with_only_completed_boards_shows_zero_active() {
    let dataset = common::fixture();
    let config = Config::default();
    let mut scene = Scene::new();

    let rendered = RouteRenderer::new(&config).render(&dataset, "C", &mut scene).unwrap();
    assert_eq!(rendered.info.active_count, 0);
    assert_eq!(rendered.info.completed_count, 1);
    assert!(rendered.route_list.is_empty());
    assert!(rendered.whole_route_link.is_none());
    assert_eq!(scene.points.len(), 1);
    assert_eq!(scene.points[0].kind, MarkerKind::CompletedBoard);
    assert!(scene.routes.is_empty());
}

#[test]
fn overview_places_offices_and_recolors_completed_districts() {
    let dataset = common::fixture();
    let config = Config::default();
    let markers = district_overview(&dataset, &config);

    let names: Vec<_> = markers.iter().map(|m| m.district.as_str()).collect();
    assert_eq!(names, ["C", "B", "A", "D"]);

    let b = &markers[1];
    assert_eq!(b.position, LatLng::new(35.910, 140.205));
    assert_eq!(b.color, config.district_color(1));
    assert_eq!(b.board_count, 3);

    let a = &markers[2];
    assert_relative_eq!(a.position.lat, 35.810, epsilon = 1e-9);
    assert_relative_eq!(a.position.lng, 140.110, epsilon = 1e-9);

    let d = &markers[3];
    assert!(d.fully_completed);
    assert_eq!(d.color, config.colors.completed_district);
}

#[test]
fn overall_summary_averages_route_totals_per_district() {
    let summary = overall_summary(&common::fixture());
    assert_eq!(summary.district_count, 4);
    assert_eq!(summary.total_boards, 10);
    // A, B and D each report 1.5 km / 0.5 h; C has no route
    assert_relative_eq!(summary.average_distance_km, 4.5 / 4.0);
    assert_relative_eq!(summary.average_hours, 1.5 / 4.0);
}

#[test]
fn route_links_follow_visiting_order() {
    let mut app = app();
    let rendered = app.select_district("A", now()).unwrap();
    let link = rendered.whole_route_link.clone().unwrap();

    assert!(link.contains("origin=35.8%2C140.1&"));
    assert!(link.contains("destination=35.82%2C140.12&"));
    assert!(link.ends_with("&waypoints=35.81%2C140.11"));
    assert_eq!(rendered.route_list.connector(0).unwrap().link,
               segment_link(LatLng::new(35.8, 140.1), LatLng::new(35.81, 140.11)));
}

#[test]
fn search_filters_and_escape_clears() {
    let mut app = app();
    let hits: Vec<_> = app.search("10").into_iter().map(|e| e.name.clone()).collect();
    assert_eq!(hits, ["D"]);
    assert_eq!(app.search("b").len(), 1);
    assert_eq!(app.search("").len(), 4);

    app.search("a");
    app.reset();
    assert_eq!(app.search_text(), "");
    assert_eq!(app.visible_districts().len(), 4);
}

#[test]
fn focus_recentres_on_stops_and_segments() {
    let mut app = app();
    app.select_district("A", now()).unwrap();

    assert!(app.focus_stop(2));
    assert_eq!(app.surface().view, Some(View::Center { center: LatLng::new(35.81, 140.11), zoom: 16 }));
    assert!(app.surface().popup.as_ref().unwrap().content.starts_with("2. 【2-2】A board 2"));

    assert!(app.focus_segment(1));
    let View::Center { center, zoom } = app.surface().view.clone().unwrap() else { panic!("expected centre view") };
    assert_eq!(zoom, 15);
    assert_relative_eq!(center.lat, 35.815, epsilon = 1e-9);

    assert!(!app.focus_stop(9));
    assert!(!app.focus_segment(5));
}

#[test]
fn stale_location_results_are_dropped() {
    let mut app = app();
    app.startup(now());

    let token = app.begin_locate(LocateMode::OneShot);
    app.select_district("A", now()).unwrap();
    assert!(!app.apply_location(token, LocationFix { lat: 35.8, lon: 140.1, accuracy_m: 10.0 }));
    app.location_failed(token, GeolocationError::Timeout, now());
    assert!(app.notices(now()).is_empty());

    let fresh = app.begin_locate(LocateMode::OneShot);
    assert!(app.apply_location(fresh, LocationFix { lat: 35.8, lon: 140.1, accuracy_m: 10.0 }));
    assert_eq!(app.surface().points.iter().filter(|m| m.kind.is_location()).count(), 2);
}

#[test]
fn watch_survives_selection_until_stopped() {
    let mut app = app();
    let watch = app.begin_locate(LocateMode::Watch);
    app.select_district("B", now()).unwrap();

    let fix = LocationFix { lat: 35.9, lon: 140.2, accuracy_m: 250.0 };
    assert!(app.apply_location(watch, fix));
    assert_eq!(app.surface().points.iter().filter(|m| m.kind.is_location()).count(), 1);

    app.stop_tracking();
    assert!(!app.is_tracking());
    assert!(app.surface().points.iter().all(|m| !m.kind.is_location()));
    assert!(!app.apply_location(watch, fix));
}

#[test]
fn failed_location_request_becomes_an_error_notice() {
    let mut app = app();
    let token = app.begin_locate(LocateMode::OneShot);
    app.location_failed(token, GeolocationError::from_code(1), now());

    let notices = app.notices(now());
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Error);
    assert_eq!(notices[0].message, GeolocationError::PermissionDenied.to_string());
    assert!(app.notices(now() + Duration::seconds(3)).is_empty());
}

#[test]
fn one_shot_request_alongside_a_watch_keeps_its_own_behaviour() {
    let mut app = app();
    app.startup(now());

    let one = app.begin_locate(LocateMode::OneShot);
    let watch = app.begin_locate(LocateMode::Watch);
    assert_ne!(one, watch);

    app.location_failed(one, GeolocationError::PermissionDenied, now());
    assert_eq!(app.notices(now()).len(), 1);
    assert!(app.is_tracking());

    let again = app.begin_locate(LocateMode::OneShot);
    let fix = LocationFix { lat: 35.81, lon: 140.11, accuracy_m: 20.0 };
    assert!(app.apply_location(again, fix));
    assert_eq!(app.surface().view, Some(View::Center { center: fix.position(), zoom: 16 }));

    // one-shot tokens resolve once; the watch keeps going
    assert!(!app.apply_location(again, fix));
    assert!(app.apply_location(watch, fix));
}

struct Broken;

impl Clipboard for Broken {
    fn write_text(&mut self, _text: &str) -> Result<()> {
        Err(BoardError::Clipboard("blocked".into()))
    }
}

#[test]
fn copy_always_confirms() {
    let mut app = app();
    app.copy_address("A street 1", &mut Broken, &mut Broken, now());

    let notices = app.notices(now());
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Success);
    assert_eq!(notices[0].message, COPY_SUCCESS_MESSAGE);
    assert_eq!(notices[0].duration_ms, 2000);
}
