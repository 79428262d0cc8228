//! Unit tests for the client accessors, against a mock HTTP server.
//!
//! Every client gets its own temporary cache directory, so disk-tier
//! entries are isolated per test and cleaned up on drop.

use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use super::*;

fn test_client(server: &MockServer) -> (SiegeClient, TempDir) {
    test_client_with_timeout(server, Duration::from_secs(5))
}

fn test_client_with_timeout(server: &MockServer, timeout: Duration) -> (SiegeClient, TempDir) {
    let cache_dir = TempDir::new().unwrap();
    let client = SiegeClient::with_base_urls(&server.uri(), &server.uri(), timeout)
        .unwrap()
        .with_cache_dir(cache_dir.path());
    (client, cache_dir)
}

fn operator_payload() -> serde_json::Value {
    json!([
        {
            "name": "Sledge",
            "safename": "sledge",
            "realname": "Seamus Cowden",
            "side": "attacker",
            "health": 125,
            "speed": 2,
            "roles": ["breach"],
            "unit": "SAS",
            "season_introduced": "Release"
        }
    ])
}

fn profile_payload(rank_points: i64) -> serde_json::Value {
    json!({
        "rank": 20,
        "rank_points": rank_points,
        "max_rank": 22,
        "max_rank_points": rank_points + 100,
        "season_statistics": {
            "kills": 100,
            "deaths": 80,
            "match_outcomes": { "wins": 12, "losses": 9, "abandons": 0 }
        }
    })
}

#[tokio::test]
async fn test_load_operators_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/operators"))
        .respond_with(ResponseTemplate::new(200).set_body_json(operator_payload()))
        .mount(&server)
        .await;

    let (client, _cache_dir) = test_client(&server);

    let operators = client.load_operators().await.unwrap();
    assert_eq!(operators.len(), 1);
    assert_eq!(operators[0].name, "Sledge");
    assert_eq!(operators[0].side, crate::model::Side::Attacker);
}

#[tokio::test]
async fn test_second_load_is_served_from_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/operators"))
        .respond_with(ResponseTemplate::new(200).set_body_json(operator_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _cache_dir) = test_client(&server);

    let first = client.load_operators().await.unwrap();
    let second = client.load_operators().await.unwrap();
    assert_eq!(first.len(), second.len());
    assert_eq!(first[0].name, second[0].name);

    // expect(1) verifies on drop that only one request reached the server.
}

#[tokio::test]
async fn test_cache_persists_on_disk_across_memory_clears() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/operators"))
        .respond_with(ResponseTemplate::new(200).set_body_json(operator_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let (client, cache_dir) = test_client(&server);

    client.load_operators().await.unwrap();
    assert!(cache_dir
        .path()
        .join("reference_operators_unfiltered.json")
        .exists());

    // The disk tier answers after the memory tier is dropped.
    client.clear_cache();
    let operators = client.load_operators().await.unwrap();
    assert_eq!(operators[0].name, "Sledge");
}

#[tokio::test]
async fn test_changed_filter_set_refetches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/operators"))
        .respond_with(ResponseTemplate::new(200).set_body_json(operator_payload()))
        .expect(2)
        .mount(&server)
        .await;

    let (client, _cache_dir) = test_client(&server);
    let filters_a = vec![("side".to_string(), "attacker".to_string())];
    let filters_b = vec![("side".to_string(), "defender".to_string())];

    client.load_operators_filtered(&filters_a).await.unwrap();
    client.load_operators_filtered(&filters_b).await.unwrap();
}

#[tokio::test]
async fn test_slow_reference_source_surfaces_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/operators"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(operator_payload())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let (client, _cache_dir) = test_client_with_timeout(&server, Duration::from_millis(200));

    let err = client.load_operators().await.unwrap_err();
    assert!(matches!(err, SiegeError::Timeout { .. }));
}

#[tokio::test]
async fn test_slow_stats_source_surfaces_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/players/uplay/laggy"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(profile_payload(3200))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let (client, _cache_dir) = test_client_with_timeout(&server, Duration::from_millis(200));

    let err = client
        .get_player_profile("laggy", Platform::Uplay, Board::Ranked)
        .await
        .unwrap_err();
    assert!(matches!(err, SiegeError::Timeout { .. }));
}

#[tokio::test]
async fn test_not_found_maps_to_typed_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weapons"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (client, _cache_dir) = test_client(&server);

    let err = client.load_weapons().await.unwrap_err();
    assert!(matches!(err, SiegeError::NotFound { .. }));
}

#[tokio::test]
async fn test_server_error_carries_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let (client, _cache_dir) = test_client(&server);

    let err = client.load_maps().await.unwrap_err();
    match err {
        SiegeError::Fetch { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("expected Fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_array_payload_is_missing_input() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/operators"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "wrong shape"})))
        .mount(&server)
        .await;

    let (client, _cache_dir) = test_client(&server);

    let err = client.load_operators().await.unwrap_err();
    assert!(matches!(
        err,
        SiegeError::MissingInput {
            what: "operators payload"
        }
    ));
}

#[tokio::test]
async fn test_get_player_profile_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/players/uplay/Pengu"))
        .and(query_param("board", "ranked"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_payload(4000)))
        .mount(&server)
        .await;

    let (client, _cache_dir) = test_client(&server);
    let profile = client
        .get_player_profile("Pengu", Platform::Uplay, Board::Ranked)
        .await
        .unwrap();

    assert_eq!(profile.rank_points, 4000);
    assert_eq!(profile.season_statistics.match_outcomes.wins, 12);
}

#[tokio::test]
async fn test_unknown_player_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/players/psn/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (client, _cache_dir) = test_client(&server);
    let err = client
        .get_player_profile("ghost", Platform::Psn, Board::Ranked)
        .await
        .unwrap_err();

    match err {
        SiegeError::NotFound { name } => assert_eq!(name, "ghost"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_null_profile_is_insufficient_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/players/uplay/fresh_account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&server)
        .await;

    let (client, _cache_dir) = test_client(&server);
    let err = client
        .get_player_profile("fresh_account", Platform::Uplay, Board::Ranked)
        .await
        .unwrap_err();

    assert!(matches!(err, SiegeError::InsufficientData { .. }));
}

#[tokio::test]
async fn test_two_profiles_fetched_together() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/players/uplay/alpha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_payload(3000)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/players/uplay/bravo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_payload(3500)))
        .mount(&server)
        .await;

    let (client, _cache_dir) = test_client(&server);
    let (p1, p2) = client
        .get_two_player_profiles("alpha", "bravo", Platform::Uplay, Board::Ranked)
        .await
        .unwrap();

    assert_eq!(p1.rank_points, 3000);
    assert_eq!(p2.rank_points, 3500);
}

#[tokio::test]
async fn test_one_failed_profile_fails_the_pair() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/players/uplay/alpha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_payload(3000)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/players/uplay/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (client, _cache_dir) = test_client(&server);
    let result = client
        .get_two_player_profiles("alpha", "missing", Platform::Uplay, Board::Ranked)
        .await;

    assert!(matches!(result, Err(SiegeError::NotFound { .. })));
}
