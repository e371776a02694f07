use hass_launcher::hass::entity::ActionWord;
use hass_launcher::hass::{dispatch, ActionDescriptor, HassApi, HttpApi, Preferences};
use hass_launcher::plugin::Plugin;
use hass_launcher::plugins::home_assistant::HomeAssistantPlugin;
use hass_launcher::resolver::MSG_FETCH_FAILED;
use httpmock::prelude::*;
use serde_json::json;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::{Duration, Instant};

const STATES: &str = r#"[
    {"entity_id": "light.kitchen", "state": "off", "attributes": {"friendly_name": "Kitchen Light"}},
    {"entity_id": "cover.garage", "state": "closed", "attributes": {}},
    {"entity_id": "broken"}
]"#;

fn api() -> HttpApi {
    HttpApi::new(Duration::from_secs(5)).unwrap()
}

#[test]
fn fetch_states_sends_bearer_and_parses_snapshot() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(GET)
            .path("/api/states")
            .header("authorization", "Bearer secret")
            .header("content-type", "application/json");
        then.status(200)
            .header("content-type", "application/json")
            .body(STATES);
    });

    let prefs = Preferences::new(format!("{}//", server.base_url()), "secret");
    let entities = api().fetch_states(&prefs).unwrap();

    m.assert_hits(1);
    assert_eq!(entities.len(), 2);
    assert_eq!(entities[0].friendly_name, "Kitchen Light");
    assert_eq!(entities[1].friendly_name, "cover.garage");
}

#[test]
fn non_success_status_uses_body_as_message() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(GET).path("/api/states");
        then.status(401).body("401: Unauthorized");
    });
    let prefs = Preferences::new(server.base_url(), "wrong");
    let err = api().fetch_states(&prefs).unwrap_err();
    m.assert();
    assert_eq!(err.to_string(), "401: Unauthorized");
}

#[test]
fn non_success_status_without_body_uses_status() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(GET).path("/api/states");
        then.status(500);
    });
    let prefs = Preferences::new(server.base_url(), "k");
    let err = api().fetch_states(&prefs).unwrap_err();
    m.assert();
    assert_eq!(err.to_string(), "500 Internal Server Error");
}

#[test]
fn malformed_body_is_an_error() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(GET).path("/api/states");
        then.status(200).body(r#"{"message": "API running."}"#);
    });
    let prefs = Preferences::new(server.base_url(), "k");
    assert!(api().fetch_states(&prefs).is_err());
    m.assert();
}

#[test]
fn connection_refused_is_reported_in_result_list() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let prefs = Preferences::new(format!("http://{addr}"), "k");
    let plugin = HomeAssistantPlugin::new(Arc::new(api()), prefs);
    let items = plugin.search("ha kitchen");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, MSG_FETCH_FAILED);
    let desc = items[0].description.as_deref().unwrap();
    assert!(desc.contains(&format!("http://{addr}/api/states")), "{desc}");
}

#[test]
fn slow_server_times_out() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/states");
        then.status(200).body("[]").delay(Duration::from_millis(1500));
    });
    let api = HttpApi::new(Duration::from_millis(200)).unwrap();
    let prefs = Preferences::new(server.base_url(), "k");
    assert!(api.fetch_states(&prefs).is_err());
}

#[test]
fn dispatch_posts_entity_id_only() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(POST)
            .path("/api/services/homeassistant/turn_on")
            .header("authorization", "Bearer secret")
            .json_body(json!({"entity_id": "light.kitchen"}));
        then.status(200).body("[]");
    });
    let prefs = Preferences::new(format!("{}/", server.base_url()), "secret");
    let descriptor = ActionDescriptor::new(&prefs, ActionWord::On, "light.kitchen");

    dispatch(&api(), &descriptor).unwrap();

    m.assert_hits(1);
}

#[test]
fn dispatch_reports_rejected_call() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(POST).path("/api/services/cover/close_cover");
        then.status(400);
    });
    let prefs = Preferences::new(server.base_url(), "secret");
    let descriptor = ActionDescriptor::new(&prefs, ActionWord::Close, "cover.garage");
    assert!(dispatch(&api(), &descriptor).is_err());
    m.assert_hits(1);
}

#[test]
fn stalled_dispatch_is_dropped_and_plugin_keeps_working() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/services/homeassistant/turn_off");
        then.status(200).body("[]").delay(Duration::from_secs(3));
    });
    let states = server.mock(|when, then| {
        when.method(GET).path("/api/states");
        then.status(200).body(STATES);
    });

    let api = HttpApi::new(Duration::from_millis(200)).unwrap();
    let plugin = HomeAssistantPlugin::new(Arc::new(api), Preferences::new(server.base_url(), "k"));
    let descriptor = ActionDescriptor::new(
        &Preferences::new(server.base_url(), "k"),
        ActionWord::Off,
        "light.kitchen",
    );

    let started = Instant::now();
    assert!(plugin.on_select(descriptor).join().is_ok());
    assert!(started.elapsed() < Duration::from_secs(2));

    let items = plugin.search("ha kitchen");
    states.assert_hits(1);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "light.kitchen");
}
