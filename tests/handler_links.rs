mod common;

use serde_json::{Value, json};

#[tokio::test]
async fn test_create_link_generates_code() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "example.com/page" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let body: Value = response.json();
    assert_eq!(body["targetUrl"], "https://example.com/page");
    assert_eq!(body["totalClicks"], 0);
    assert_eq!(body["shortCode"].as_str().unwrap().len(), 7);
    assert!(body["id"].is_i64());
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_link_keeps_scheme() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "http://example.com" }))
        .await;

    assert_eq!(response.status_code(), 201);
    assert_eq!(response.json::<Value>()["targetUrl"], "http://example.com");
}

#[tokio::test]
async fn test_create_link_custom_code() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "code": "promo25" }))
        .await;

    assert_eq!(response.status_code(), 201);
    assert_eq!(response.json::<Value>()["shortCode"], "promo25");
}

#[tokio::test]
async fn test_create_link_empty_code_generates_one() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "code": "" }))
        .await;

    assert_eq!(response.status_code(), 201);
    assert_eq!(
        response.json::<Value>()["shortCode"].as_str().unwrap().len(),
        7
    );
}

#[tokio::test]
async fn test_create_link_duplicate_code() {
    let (server, repo) = common::create_test_server();
    common::create_test_link(&repo, "taken12", "https://example.com").await;

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://other.com", "code": "taken12" }))
        .await;

    assert_eq!(response.status_code(), 409);
    assert_eq!(response.json::<Value>()["error"]["code"], "conflict");
}

#[tokio::test]
async fn test_create_link_invalid_code() {
    let (server, _repo) = common::create_test_server();

    for code in ["abc", "toolongcode", "bad-code"] {
        let response = server
            .post("/api/links")
            .json(&json!({ "url": "https://example.com", "code": code }))
            .await;

        assert_eq!(response.status_code(), 400, "code {code} should be rejected");

        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "validation_error");
        assert_eq!(
            body["error"]["message"],
            "Invalid short code. Code must be 6-8 alphanumeric characters."
        );
    }
}

#[tokio::test]
async fn test_create_link_reserved_code() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "code": "healthz" }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_create_link_invalid_url() {
    let (server, _repo) = common::create_test_server();

    for url in ["", "   ", "not a url", "ftp://example.com", "localhost"] {
        let response = server
            .post("/api/links")
            .json(&json!({ "url": url }))
            .await;

        assert_eq!(response.status_code(), 400, "url {url:?} should be rejected");
        assert_eq!(
            response.json::<Value>()["error"]["message"],
            "Invalid URL. Please provide a valid URL."
        );
    }
}

#[tokio::test]
async fn test_create_link_control_character_url() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com/a\u{1}b" }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Invalid URL. Please provide a valid URL."
    );
}

#[tokio::test]
async fn test_create_link_numeric_host_shorthand() {
    let (server, _repo) = common::create_test_server();

    for url in ["http://1.2.3", "0x7f.1"] {
        let response = server.post("/api/links").json(&json!({ "url": url })).await;

        assert_eq!(response.status_code(), 400, "url {url:?} should be rejected");
    }
}

#[tokio::test]
async fn test_create_link_bad_url_reported_before_bad_code() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "localhost", "code": "bad-code" }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Invalid URL. Please provide a valid URL."
    );
}

#[tokio::test]
async fn test_create_link_missing_url() {
    let (server, _repo) = common::create_test_server();

    let response = server.post("/api/links").json(&json!({})).await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_create_link_non_string_url() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": 42 }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        "validation_error"
    );
}

#[tokio::test]
async fn test_create_link_malformed_body() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/links")
        .text("{not json")
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Invalid request body"
    );
}

#[tokio::test]
async fn test_list_links_newest_first() {
    let (server, repo) = common::create_test_server();
    common::create_test_link(&repo, "first01", "https://one.com").await;
    common::create_test_link(&repo, "second2", "https://two.com").await;

    let response = server.get("/api/links").await;

    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let links = body.as_array().unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0]["shortCode"], "second2");
    assert_eq!(links[1]["shortCode"], "first01");
    assert!(links[0]["lastClickedTime"].is_null());
}

#[tokio::test]
async fn test_list_links_empty() {
    let (server, _repo) = common::create_test_server();

    let response = server.get("/api/links").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_get_link() {
    let (server, repo) = common::create_test_server();
    common::create_test_link(&repo, "stats12", "https://example.com").await;

    let response = server.get("/api/links/stats12").await;

    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["shortCode"], "stats12");
    assert_eq!(body["targetUrl"], "https://example.com");
    assert_eq!(body["totalClicks"], 0);
    assert!(body["updatedAt"].is_string());
}

#[tokio::test]
async fn test_get_link_not_found() {
    let (server, _repo) = common::create_test_server();

    let response = server.get("/api/links/missing1").await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_delete_link() {
    let (server, repo) = common::create_test_server();
    common::create_test_link(&repo, "delete1", "https://example.com").await;

    let response = server.delete("/api/links/delete1").await;
    assert_eq!(response.status_code(), 204);

    let response = server.delete("/api/links/delete1").await;
    assert_eq!(response.status_code(), 404);

    let response = server.get("/delete1").await;
    assert_eq!(response.status_code(), 404);
}
