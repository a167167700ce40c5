#![allow(clippy::unwrap_used)]
// Integration tests for `PorkbunClient` using wiremock.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use porkbun_api::{
    CancellationToken, Credentials, DEFAULT_NAMESERVERS, DnssecRecord, Error, PorkbunClient,
    RecordInput,
};

// ── Helpers ─────────────────────────────────────────────────────────

const DOMAIN: &str = "example.com";

async fn setup() -> (MockServer, PorkbunClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/api/json/v3", server.uri())).unwrap();
    let client = PorkbunClient::with_client(
        reqwest::Client::new(),
        base_url,
        Credentials::from(("pk1_test", "sk1_test")),
    )
    .unwrap();
    (server, client)
}

fn api_path(suffix: &str) -> String {
    format!("/api/json/v3/{suffix}")
}

fn success(payload: serde_json::Value) -> ResponseTemplate {
    let mut body = json!({ "status": "SUCCESS" });
    if let (Some(obj), Some(extra)) = (body.as_object_mut(), payload.as_object()) {
        obj.extend(extra.clone());
    }
    ResponseTemplate::new(200).set_body_json(body)
}

fn records_body() -> serde_json::Value {
    json!({
        "records": [
            {
                "id": "106926652",
                "name": "example.com",
                "type": "A",
                "content": "1.1.1.1",
                "ttl": "600",
                "prio": "0",
                "notes": ""
            },
            {
                "id": "106926659",
                "name": "www.example.com",
                "type": "MX",
                "content": "mail.example.com",
                "ttl": "600",
                "prio": "10",
                "notes": null
            }
        ]
    })
}

async fn mount_records(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(api_path("dns/retrieve/example.com")))
        .respond_with(success(records_body()))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn ds_record() -> DnssecRecord {
    DnssecRecord {
        algorithm: "13".into(),
        digest_type: "2".into(),
        key_tag: "64087".into(),
        digest: "15E445BD08128BDC213E25F1C8227DF4CB35186CAC701C1C335B2C406D5530DC".into(),
    }
}

// ── Request construction ────────────────────────────────────────────

#[tokio::test]
async fn test_ping_sends_credentials_and_headers() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("ping")))
        .and(header("content-type", "application/json"))
        .and(header("user-agent", porkbun_api::transport::CLIENT_IDENTIFIER))
        .and(body_json(json!({
            "apikey": "pk1_test",
            "secretapikey": "sk1_test"
        })))
        .respond_with(success(json!({ "yourIp": "203.0.113.7" })))
        .expect(1)
        .mount(&server)
        .await;

    let ip = client.ping(&CancellationToken::new()).await.unwrap();
    assert_eq!(ip, "203.0.113.7");
}

#[tokio::test]
async fn test_create_record_returns_numeric_id_as_string() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("dns/create/example.com")))
        .and(body_json(json!({
            "apikey": "pk1_test",
            "secretapikey": "sk1_test",
            "name": "www",
            "type": "A",
            "content": "1.2.3.4",
            "ttl": "600"
        })))
        .respond_with(success(json!({ "id": 106_926_659 })))
        .mount(&server)
        .await;

    let input = RecordInput::new("A", "1.2.3.4").with_name("www").with_ttl("600");
    let id = client
        .create_record(DOMAIN, &input, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(id, "106926659");
}

#[tokio::test]
async fn test_edit_a_record_omits_priority() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("dns/edit/example.com/106926652")))
        .and(body_json(json!({
            "apikey": "pk1_test",
            "secretapikey": "sk1_test",
            "name": "",
            "type": "A",
            "content": "1.2.3.4",
            "ttl": "600"
        })))
        .respond_with(success(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let input = RecordInput::new("A", "1.2.3.4").with_ttl("600").with_prio("10");
    client
        .edit_record(DOMAIN, "106926652", &input, &CancellationToken::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_edit_mx_record_includes_priority() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("dns/edit/example.com/106926659")))
        .and(body_partial_json(json!({ "type": "Mx", "prio": "20" })))
        .respond_with(success(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let input = RecordInput::new("Mx", "mail.example.com").with_prio("20");
    client
        .edit_record(DOMAIN, "106926659", &input, &CancellationToken::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_dnssec_echoes_full_tuple() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("dns/deleteDnssec/example.com")))
        .and(body_partial_json(json!({
            "algorithm": "13",
            "digestType": "2",
            "keyTag": "64087",
            "digest": "15E445BD08128BDC213E25F1C8227DF4CB35186CAC701C1C335B2C406D5530DC"
        })))
        .respond_with(success(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client
        .delete_dnssec_record(DOMAIN, &ds_record(), &CancellationToken::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_nameservers_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("domain/updateNs/example.com")))
        .and(body_partial_json(json!({
            "ns": ["maceio.porkbun.com", "salvador.porkbun.com"]
        })))
        .respond_with(success(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let ns = vec![
        "maceio.porkbun.com".to_owned(),
        "salvador.porkbun.com".to_owned(),
    ];
    client
        .update_nameservers(DOMAIN, &ns, &CancellationToken::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_reset_nameservers_sends_porkbun_defaults() {
    let (server, client) = setup().await;
    let cancel = CancellationToken::new();
    mount_records(&server, 2).await;

    Mock::given(method("POST"))
        .and(path(api_path("domain/updateNs/example.com")))
        .and(body_json(json!({
            "apikey": "pk1_test",
            "secretapikey": "sk1_test",
            "ns": [
                "curia.porkbun.com",
                "livia.porkbun.com",
                "pliny.porkbun.com",
                "salvia.porkbun.com"
            ]
        })))
        .respond_with(success(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client.list_records(DOMAIN, &cancel).await.unwrap();
    client.reset_nameservers(DOMAIN, &cancel).await.unwrap();
    assert!(!client.cache().has_domain(DOMAIN));
    client.list_records(DOMAIN, &cancel).await.unwrap();
    assert_eq!(DEFAULT_NAMESERVERS.len(), 4);
}

fn glue_message_is_missing(err: &Error) -> bool {
    err.api_message()
        .is_some_and(|m| m.contains("Could not find glue record"))
}

#[tokio::test]
async fn test_replace_glue_deletes_then_adds() {
    let (server, client) = setup().await;
    let cancel = CancellationToken::new();

    Mock::given(method("POST"))
        .and(path(api_path("domain/getGlue/example.com")))
        .respond_with(success(json!({ "hosts": [] })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("domain/deleteGlue/example.com/ns1")))
        .and(body_json(json!({
            "apikey": "pk1_test",
            "secretapikey": "sk1_test"
        })))
        .respond_with(success(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("domain/createGlue/example.com/ns1")))
        .and(body_json(json!({
            "apikey": "pk1_test",
            "secretapikey": "sk1_test",
            "ips": ["192.0.2.53", "2001:db8::53"]
        })))
        .respond_with(success(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let ips = vec!["192.0.2.53".to_owned(), "2001:db8::53".to_owned()];
    client.list_glue_records(DOMAIN, &cancel).await.unwrap();
    client
        .replace_glue_record(DOMAIN, "ns1", &ips, glue_message_is_missing, &cancel)
        .await
        .unwrap();
    assert!(!client.cache().has_domain(DOMAIN));
    client.list_glue_records(DOMAIN, &cancel).await.unwrap();
}

#[tokio::test]
async fn test_replace_glue_tolerates_missing_host_when_asked() {
    let (server, client) = setup().await;
    let cancel = CancellationToken::new();

    Mock::given(method("POST"))
        .and(path(api_path("domain/deleteGlue/example.com/ns1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ERROR",
            "message": "Could not find glue record."
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("domain/createGlue/example.com/ns1")))
        .respond_with(success(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let ips = vec!["192.0.2.53".to_owned()];
    client
        .replace_glue_record(DOMAIN, "ns1", &ips, glue_message_is_missing, &cancel)
        .await
        .unwrap();

    // A strict caller sees the delete error and nothing is added.
    let result = client
        .replace_glue_record(DOMAIN, "ns1", &ips, |_| false, &cancel)
        .await;
    assert_eq!(
        result.unwrap_err().api_message(),
        Some("Could not find glue record.")
    );
}

// ── Caching ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_second_read_is_served_from_cache() {
    let (server, client) = setup().await;
    mount_records(&server, 1).await;

    let cancel = CancellationToken::new();
    let first = client.list_records(DOMAIN, &cancel).await.unwrap();
    let second = client.list_records(DOMAIN, &cancel).await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
    assert_eq!(first[1].prio.as_deref(), Some("10"));
    assert_eq!(first[1].notes, None);
}

#[tokio::test]
async fn test_mutation_invalidates_domain_cache() {
    let (server, client) = setup().await;
    mount_records(&server, 2).await;

    Mock::given(method("POST"))
        .and(path(api_path("dns/delete/example.com/106926652")))
        .respond_with(success(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    client.list_records(DOMAIN, &cancel).await.unwrap();
    assert!(client.cache().has_domain(DOMAIN));

    client
        .delete_record(DOMAIN, "106926652", &cancel)
        .await
        .unwrap();
    assert!(!client.cache().has_domain(DOMAIN));

    client.list_records(DOMAIN, &cancel).await.unwrap();
}

#[tokio::test]
async fn test_every_mutation_drops_records_glue_and_dnssec() {
    let (server, client) = setup().await;
    let cancel = CancellationToken::new();

    mount_records(&server, 8).await;
    Mock::given(method("POST"))
        .and(path(api_path("domain/getGlue/example.com")))
        .respond_with(success(json!({ "hosts": [] })))
        .expect(8)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("dns/getDnssec/example.com")))
        .respond_with(success(json!({ "dsRecords": [] })))
        .expect(8)
        .mount(&server)
        .await;
    for suffix in [
        "dns/create/example.com",
        "dns/delete/example.com/1",
        "dns/edit/example.com/1",
        "domain/createGlue/example.com/ns1",
        "domain/deleteGlue/example.com/ns1",
        "dns/addDnssec/example.com",
        "dns/deleteDnssec/example.com",
        "domain/updateNs/example.com",
    ] {
        Mock::given(method("POST"))
            .and(path(api_path(suffix)))
            .respond_with(success(json!({ "id": 1 })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let input = RecordInput::new("A", "1.2.3.4");
    let ips = vec!["192.0.2.1".to_owned()];
    let ns = vec!["ns1.example.net".to_owned()];

    for step in 0..8 {
        client.list_records(DOMAIN, &cancel).await.unwrap();
        client.list_glue_records(DOMAIN, &cancel).await.unwrap();
        client.list_dnssec_records(DOMAIN, &cancel).await.unwrap();

        let result = match step {
            0 => client.create_record(DOMAIN, &input, &cancel).await.map(drop),
            1 => client.delete_record(DOMAIN, "1", &cancel).await,
            2 => client.edit_record(DOMAIN, "1", &input, &cancel).await,
            3 => client.add_glue_record(DOMAIN, "ns1", &ips, &cancel).await,
            4 => client.delete_glue_record(DOMAIN, "ns1", &cancel).await,
            5 => client.add_dnssec_record(DOMAIN, &ds_record(), &cancel).await,
            6 => client.delete_dnssec_record(DOMAIN, &ds_record(), &cancel).await,
            _ => client.update_nameservers(DOMAIN, &ns, &cancel).await,
        };
        result.unwrap();

        assert!(
            !client.cache().has_domain(DOMAIN),
            "step {step} left cached entries behind"
        );
    }
}

#[tokio::test]
async fn test_failed_mutation_keeps_cache() {
    let (server, client) = setup().await;
    mount_records(&server, 1).await;

    Mock::given(method("POST"))
        .and(path(api_path("dns/delete/example.com/999")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ERROR",
            "message": "Invalid record ID."
        })))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    client.list_records(DOMAIN, &cancel).await.unwrap();
    let err = client.delete_record(DOMAIN, "999", &cancel).await.unwrap_err();
    assert_eq!(err.api_message(), Some("Invalid record ID."));

    // Still cached: the records mock expects exactly one call.
    client.list_records(DOMAIN, &cancel).await.unwrap();
}

#[tokio::test]
async fn test_pricing_and_domains_survive_mutations() {
    let (server, client) = setup().await;
    let cancel = CancellationToken::new();

    Mock::given(method("POST"))
        .and(path(api_path("pricing/get")))
        .respond_with(success(json!({
            "pricing": {
                "com": { "registration": "9.68", "renewal": "10.37", "transfer": "9.68" }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("domain/listAll")))
        .respond_with(success(json!({
            "domains": [{
                "domain": "example.com",
                "status": "ACTIVE",
                "tld": "com",
                "createDate": "2020-01-01 00:00:00",
                "expireDate": "2030-01-01 00:00:00",
                "securityLock": "1",
                "whoisPrivacy": "1",
                "autoRenew": 0
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("domain/updateNs/example.com")))
        .respond_with(success(json!({})))
        .mount(&server)
        .await;

    let pricing = client.get_pricing(&cancel).await.unwrap();
    let domains = client.list_domains(&cancel).await.unwrap();
    assert_eq!(pricing["com"].renewal, "10.37");
    assert_eq!(domains[0].domain, "example.com");

    client
        .update_nameservers(DOMAIN, &["ns1.example.net".to_owned()], &cancel)
        .await
        .unwrap();

    assert_eq!(client.get_pricing(&cancel).await.unwrap(), pricing);
    assert_eq!(client.list_domains(&cancel).await.unwrap(), domains);
}

#[tokio::test]
async fn test_nameservers_are_never_cached() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("domain/getNs/example.com")))
        .respond_with(success(json!({
            "ns": ["maceio.porkbun.com", "salvador.porkbun.com"]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let first = client.get_nameservers(DOMAIN, &cancel).await.unwrap();
    let second = client.get_nameservers(DOMAIN, &cancel).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_concurrent_reads_share_one_client() {
    let (server, client) = setup().await;
    mount_records(&server, 1).await;

    let client = Arc::new(client);
    let cancel = CancellationToken::new();

    // Prime the cache, then fan out; none of the tasks should hit the server.
    client.list_records(DOMAIN, &cancel).await.unwrap();
    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let client = Arc::clone(&client);
            let cancel = cancel.clone();
            tokio::spawn(async move { client.list_records(DOMAIN, &cancel).await })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap().len(), 2);
    }
}

// ── Glue ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_glue_records_flatten_and_skip_malformed() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("domain/getGlue/example.com")))
        .respond_with(success(json!({
            "hosts": [
                ["ns1.example.com", { "v4": ["192.0.2.1"], "v6": ["2001:db8::1"] }],
                ["ns2.example.com", { "v4": ["192.0.2.2"] }, "unexpected"],
                [7, { "v4": ["192.0.2.7"] }]
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let glue = client.list_glue_records(DOMAIN, &cancel).await.unwrap();

    assert_eq!(glue.len(), 1);
    assert_eq!(
        glue["ns1"],
        vec!["192.0.2.1".to_owned(), "2001:db8::1".to_owned()]
    );

    // Second read comes from cache.
    assert_eq!(client.list_glue_records(DOMAIN, &cancel).await.unwrap(), glue);
}

// ── DNSSEC ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_find_dnssec_record_by_tuple() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("dns/getDnssec/example.com")))
        .respond_with(success(json!({
            "dsRecords": [{
                "algorithm": 13,
                "digestType": 2,
                "keyTag": 64087,
                "digest": "15E445BD08128BDC213E25F1C8227DF4CB35186CAC701C1C335B2C406D5530DC"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    assert!(client
        .find_dnssec_record(DOMAIN, &ds_record(), &cancel)
        .await
        .unwrap());

    let mut other = ds_record();
    other.key_tag = "1".into();
    assert!(!client.find_dnssec_record(DOMAIN, &other, &cancel).await.unwrap());
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_http_error_preserves_raw_body() {
    let (server, client) = setup().await;

    let raw = r#"{"status":"SUCCESS","records":[]}"#;
    Mock::given(method("POST"))
        .and(path(api_path("dns/retrieve/example.com")))
        .respond_with(ResponseTemplate::new(500).set_body_string(raw))
        .mount(&server)
        .await;

    let result = client.list_records(DOMAIN, &CancellationToken::new()).await;

    match result {
        Err(Error::Http { status, ref body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, raw);
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
    assert!(client.cache().records(DOMAIN).is_none());
}

#[tokio::test]
async fn test_api_error_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("ping")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ERROR",
            "message": "Invalid API key"
        })))
        .mount(&server)
        .await;

    let result = client.ping(&CancellationToken::new()).await;

    match result {
        Err(Error::Api { ref message }) => assert_eq!(message, "Invalid API key"),
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("dns/retrieve/example.com")))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"status\":\"SUCCESS\",\"records\":"))
        .mount(&server)
        .await;

    let result = client.list_records(DOMAIN, &CancellationToken::new()).await;
    assert!(
        matches!(result, Err(Error::Decoding { .. })),
        "expected Decoding error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_cancelled_call_never_reaches_server() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(success(records_body()).set_delay(Duration::from_secs(5)))
        .expect(0)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = client.list_records(DOMAIN, &cancel).await;
    assert!(
        matches!(result, Err(Error::Cancelled)),
        "expected Cancelled, got: {result:?}"
    );
    assert!(client.cache().records(DOMAIN).is_none());
}

#[tokio::test]
async fn test_cancel_during_slow_response() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(api_path("dns/retrieve/example.com")))
        .respond_with(success(records_body()).set_delay(Duration::from_secs(30)))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let result = client.list_records(DOMAIN, &cancel).await;
    assert!(matches!(result, Err(Error::Cancelled)), "got: {result:?}");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let client = PorkbunClient::with_client(
        reqwest::Client::new(),
        Url::parse("http://127.0.0.1:1/api/json/v3").unwrap(),
        Credentials::from(("pk1_test", "sk1_test")),
    )
    .unwrap();

    let result = client.ping(&CancellationToken::new()).await;
    assert!(
        matches!(result, Err(Error::Transport(_))),
        "expected Transport error, got: {result:?}"
    );
}
