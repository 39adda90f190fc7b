//! Integration tests against a mock Cloudflare API server.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cloudflare_edge::access::{AccessRuleMode, AccessRuleSpec, AccessRuleTarget};
use cloudflare_edge::cache::PurgeRequest;
use cloudflare_edge::dns::{BatchPatch, BatchRequest, RecordPatch, RecordSpec, UpsertAction};
use cloudflare_edge::transport::HttpTransport;
use cloudflare_edge::zones::ZoneSelector;
use cloudflare_edge::{CloudflareClient, Error, Scope};

fn client_for(server: &MockServer) -> CloudflareClient<HttpTransport> {
    CloudflareClient::new("test-token")
        .expect("client")
        .with_base_url(server.uri())
}

fn record_body(id: &str, name: &str, content: &str) -> serde_json::Value {
    json!({
        "id": id,
        "type": "A",
        "name": name,
        "content": content,
        "ttl": 1,
        "proxied": false
    })
}

#[tokio::test]
async fn requests_carry_auth_and_content_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/zones/test-zone/dns_records"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Accept", "application/json"))
        .and(header("Content-Type", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "result": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let records = client_for(&server)
        .list_records("test-zone")
        .await
        .expect("list");
    assert!(records.is_empty());
}

#[tokio::test]
async fn upsert_creates_when_record_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/zones/test-zone/dns_records"))
        .and(query_param("name", "app.example.com"))
        .and(query_param("type", "A"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "result": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/zones/test-zone/dns_records"))
        .and(body_json(json!({
            "type": "A",
            "name": "app.example.com",
            "content": "1.2.3.4",
            "ttl": 1,
            "proxied": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": record_body("abc123", "app.example.com", "1.2.3.4")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let spec = RecordSpec::new("A", "app.example.com", "1.2.3.4");
    let outcome = client_for(&server)
        .upsert_record("test-zone", &spec)
        .await
        .expect("upsert");

    assert_eq!(outcome.action, UpsertAction::Created);
    assert_eq!(outcome.record.id, "abc123");
}

#[tokio::test]
async fn upsert_updates_first_match_when_records_exist() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/zones/test-zone/dns_records"))
        .and(query_param("name", "app.example.com"))
        .and(query_param("type", "A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": [
                record_body("first-id", "app.example.com", "9.9.9.9"),
                record_body("second-id", "app.example.com", "8.8.8.8")
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    // The first element of the server's order wins; the PATCH carries the
    // full desired field set.
    Mock::given(method("PATCH"))
        .and(path("/zones/test-zone/dns_records/first-id"))
        .and(body_json(json!({
            "type": "A",
            "name": "app.example.com",
            "content": "1.2.3.4",
            "ttl": 1,
            "proxied": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": record_body("first-id", "app.example.com", "1.2.3.4")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let spec = RecordSpec::new("A", "app.example.com", "1.2.3.4");
    let outcome = client_for(&server)
        .upsert_record("test-zone", &spec)
        .await
        .expect("upsert");

    assert_eq!(outcome.action, UpsertAction::Updated);
    assert_eq!(outcome.record.id, "first-id");
}

#[tokio::test]
async fn update_patch_body_contains_only_supplied_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/zones/test-zone/dns_records/abc123"))
        .and(body_json(json!({"content": "5.6.7.8"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": record_body("abc123", "app.example.com", "5.6.7.8")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let patch = RecordPatch {
        content: Some("5.6.7.8".to_string()),
        ..Default::default()
    };
    let record = client_for(&server)
        .update_record("test-zone", "abc123", &patch)
        .await
        .expect("update");

    assert_eq!(record.content, "5.6.7.8");
}

#[tokio::test]
async fn delete_record_returns_deleted_id() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/zones/test-zone/dns_records/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": {"id": "abc123"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let deleted = client_for(&server)
        .delete_record("test-zone", "abc123")
        .await
        .expect("delete");
    assert_eq!(deleted, "abc123");
}

#[tokio::test]
async fn purge_everything_sends_single_flag_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/zones/test-zone/purge_cache"))
        .and(body_json(json!({"purge_everything": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": {"id": "req123"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server)
        .purge_cache("test-zone", &PurgeRequest::everything())
        .await
        .expect("purge");
    assert_eq!(outcome.request_id, "req123");
}

#[tokio::test]
async fn purge_files_sends_file_list_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/zones/test-zone/purge_cache"))
        .and(body_json(json!({"files": ["https://example.com/app.js"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": {"id": "req456"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = PurgeRequest::files(vec!["https://example.com/app.js".to_string()]);
    let outcome = client_for(&server)
        .purge_cache("test-zone", &request)
        .await
        .expect("purge");
    assert_eq!(outcome.request_id, "req456");
}

#[tokio::test]
async fn invalid_purge_configuration_never_reaches_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/zones/test-zone/purge_cache"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(0)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .purge_cache("test-zone", &PurgeRequest::default())
        .await;

    assert!(matches!(result, Err(Error::Configuration(_))));
    server.verify().await;
}

#[tokio::test]
async fn batch_always_sends_all_three_keys() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/zones/test-zone/dns_records/batch"))
        .and(body_json(json!({
            "posts": [
                {"type": "A", "name": "app1.example.com", "content": "1.2.3.4",
                 "ttl": 1, "proxied": false},
                {"type": "A", "name": "app2.example.com", "content": "5.6.7.8",
                 "ttl": 1, "proxied": false}
            ],
            "patches": [],
            "deletes": []
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": {"posts": [{"id": "r1"}, {"id": "r2"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = BatchRequest {
        creates: vec![
            RecordSpec::new("A", "app1.example.com", "1.2.3.4"),
            RecordSpec::new("A", "app2.example.com", "5.6.7.8"),
        ],
        ..Default::default()
    };

    let outcome = client_for(&server)
        .batch_records("test-zone", &request)
        .await
        .expect("batch");

    assert!(outcome.success);
    assert_eq!(outcome.result["posts"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn batch_mixed_operations_map_to_wire_keys() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/zones/test-zone/dns_records/batch"))
        .and(body_json(json!({
            "posts": [],
            "patches": [{"id": "p1", "content": "9.9.9.9"}],
            "deletes": [{"id": "d1"}]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "result": {}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = BatchRequest {
        creates: vec![],
        updates: vec![BatchPatch {
            id: "p1".to_string(),
            fields: RecordPatch {
                content: Some("9.9.9.9".to_string()),
                ..Default::default()
            },
        }],
        deletes: vec!["d1".to_string()],
    };

    client_for(&server)
        .batch_records("test-zone", &request)
        .await
        .expect("batch");
}

#[tokio::test]
async fn failed_envelope_surfaces_provider_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/zones"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "success": false,
            "errors": [{"code": 10000, "message": "Authentication error"}],
            "result": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).list_zones().await;

    match result {
        Err(Error::Api { errors }) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].code, 10000);
            assert_eq!(errors[0].message, "Authentication error");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn http_status_does_not_drive_branching() {
    let server = MockServer::start().await;

    // A 5xx status with a successful envelope is still a success: only the
    // envelope's flag matters.
    Mock::given(method("GET"))
        .and(path("/zones/test-zone/dns_records/abc123"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": true,
            "result": record_body("abc123", "app.example.com", "1.2.3.4")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = client_for(&server)
        .get_record("test-zone", "abc123")
        .await
        .expect("get");
    assert_eq!(record.id, "abc123");
}

#[tokio::test]
async fn mandatory_result_missing_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/zones/test-zone/dns_records/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).get_record("test-zone", "abc123").await;
    assert!(matches!(result, Err(Error::Api { .. })));
}

#[tokio::test]
async fn malformed_response_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/zones"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).list_zones().await;
    assert!(matches!(result, Err(Error::Decode(_))));
}

#[tokio::test]
async fn zone_lookup_by_hostname_uses_first_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/zones"))
        .and(query_param("name", "example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": [
                {"id": "zone1", "name": "example.com", "status": "active"},
                {"id": "zone2", "name": "example.com", "status": "pending"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let zone = client_for(&server)
        .get_zone(&ZoneSelector::Hostname("example.com".to_string()))
        .await
        .expect("get zone");
    assert_eq!(zone.id, "zone1");
}

#[tokio::test]
async fn zone_lookup_by_hostname_with_no_match_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/zones"))
        .and(query_param("name", "missing.example.com"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "result": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .get_zone(&ZoneSelector::Hostname("missing.example.com".to_string()))
        .await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn access_rule_create_scopes_to_account() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/accounts/acct1/firewall/access_rules/rules"))
        .and(body_json(json!({
            "mode": "block",
            "configuration": {"target": "ip", "value": "1.2.3.4"},
            "notes": "abusive traffic"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": {
                "id": "rule1",
                "mode": "block",
                "configuration": {"target": "ip", "value": "1.2.3.4"},
                "notes": "abusive traffic"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let scope = Scope::Account("acct1".to_string());
    let spec = AccessRuleSpec {
        mode: AccessRuleMode::Block,
        target: AccessRuleTarget::Ip,
        value: "1.2.3.4".to_string(),
        notes: Some("abusive traffic".to_string()),
    };

    let rule = client_for(&server)
        .create_access_rule(&scope, &spec)
        .await
        .expect("create rule");
    assert_eq!(rule.id, "rule1");
    assert_eq!(rule.configuration.value, "1.2.3.4");
}

#[tokio::test]
async fn access_rule_delete_scopes_to_zone() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/zones/zone1/firewall/access_rules/rules/rule1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": {"id": "rule1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let deleted = client_for(&server)
        .delete_access_rule(&Scope::Zone("zone1".to_string()), "rule1")
        .await
        .expect("delete rule");
    assert_eq!(deleted, "rule1");
}

#[tokio::test]
async fn upsert_is_idempotent_across_repeated_calls() {
    let spec = RecordSpec::new("A", "app.example.com", "1.2.3.4");

    // First call: nothing exists yet.
    let first = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/zones/z/dns_records"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "result": []})),
        )
        .mount(&first)
        .await;
    Mock::given(method("POST"))
        .and(path("/zones/z/dns_records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": record_body("abc123", "app.example.com", "1.2.3.4")
        })))
        .mount(&first)
        .await;

    let outcome = client_for(&first).upsert_record("z", &spec).await.unwrap();
    assert_eq!(outcome.action, UpsertAction::Created);

    // Second call: the record now exists, so the same input converges to an
    // update of the same record.
    let second = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/zones/z/dns_records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": [record_body("abc123", "app.example.com", "1.2.3.4")]
        })))
        .mount(&second)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/zones/z/dns_records/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": record_body("abc123", "app.example.com", "1.2.3.4")
        })))
        .mount(&second)
        .await;

    let outcome = client_for(&second).upsert_record("z", &spec).await.unwrap();
    assert_eq!(outcome.action, UpsertAction::Updated);
    assert_eq!(outcome.record.id, "abc123");
}
