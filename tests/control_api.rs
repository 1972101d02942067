//! Control API: creating, listing and resetting routes over HTTP.

use reqwest::StatusCode;
use serde_json::{json, Value};

use mockwire::{MockServer, RouteSpec, ServerConfig};

mod common;

#[tokio::test]
async fn test_create_route_over_http() {
    let (mut server, base) = common::start_default().await;
    let client = common::client();

    let res = client
        .post(format!("{}/_request", base))
        .json(&json!({
            "request": { "url": "/remote", "method": "get" },
            "response": { "code": 202, "body": { "via": "control" } }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    assert_eq!(created, json!({ "method": "GET", "path": "/remote" }));

    let res = client.get(format!("{}/remote", base)).send().await.unwrap();
    assert_eq!(res.status().as_u16(), 202);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "via": "control" }));

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_malformed_route_is_rejected() {
    let (mut server, base) = common::start_default().await;
    let client = common::client();

    let res = client
        .post(format!("{}/_request", base))
        .json(&json!({ "request": { "url": "/x", "method": "get" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("response.code"));

    let res = client.post(format!("{}/_request", base)).body("not json").send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(server.registry().is_empty());

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_list_and_reset() {
    let (mut server, base) = common::start_default().await;
    let _ = server.post("/b").status(201);
    let _ = server.get("/a");
    let client = common::client();

    let listed: Value = client.get(format!("{}/_request", base)).send().await.unwrap().json().await.unwrap();
    assert_eq!(
        listed,
        json!([
            { "method": "GET", "path": "/a", "code": 200, "activations": 0 },
            { "method": "POST", "path": "/b", "code": 201, "activations": 0 }
        ])
    );

    let res = client.delete(format!("{}/_request", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(client.get(format!("{}/a", base)).send().await.unwrap().status(), StatusCode::NOT_FOUND);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_list_counts_after_response_routes() {
    let (mut server, base) = common::start_default().await;
    server
        .create_route(RouteSpec::from_value(json!({
            "request": { "url": "/login", "method": "post" },
            "response": { "code": 200 },
            "afterResponse": { "endpoints": [
                { "request": { "url": "/me", "method": "get" }, "response": { "code": 200 } },
                { "request": { "url": "/logout", "method": "post" }, "response": { "code": 204 } }
            ] }
        }))
        .unwrap())
        .unwrap();

    let listed: Value = common::client()
        .get(format!("{}/_request", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, json!([{ "method": "POST", "path": "/login", "code": 200, "activations": 2 }]));

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_api_key_required_when_configured() {
    let mut config = ServerConfig::default();
    config.control.api_key = Some("sekrit".into());
    let mut server = MockServer::with_config(config);
    let base = common::listen(&mut server).await;
    let client = common::client();

    let res = client.get(format!("{}/_request", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/_request", base))
        .bearer_auth("sekrit")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_disabled_control_api_falls_through_to_mocks() {
    let mut config = ServerConfig::default();
    config.control.enabled = false;
    let mut server = MockServer::with_config(config);
    let base = common::listen(&mut server).await;

    let res = common::client().get(format!("{}/_request", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let _ = server.get("/_request").status(418);
    let res = common::client().get(format!("{}/_request", base)).send().await.unwrap();
    assert_eq!(res.status().as_u16(), 418);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_custom_control_path_leaves_other_paths_to_mocks() {
    let mut config = ServerConfig::default();
    config.control.path = "/_admin".into();
    let mut server = MockServer::with_config(config);
    let _ = server.get("/mock").status(203).body(json!({ "mock": true }));
    let base = common::listen(&mut server).await;
    let client = common::client();

    let res = client.get(format!("{}/mock", base)).send().await.unwrap();
    assert_eq!(res.status().as_u16(), 203);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "mock": true }));

    let res = client.get(format!("{}/_admin", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!([{ "method": "GET", "path": "/mock", "code": 203, "activations": 0 }])
    );

    let res = client.get(format!("{}/_request", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server.stop().await.unwrap();
}
