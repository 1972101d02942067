//! End-to-end behaviour of mock routes over real HTTP.

use reqwest::StatusCode;
use serde_json::{json, Value};

use mockwire::{MockServer, RouteBuilder, RouteSpec};

mod common;

fn spec(value: Value) -> RouteSpec {
    RouteSpec::from_value(value).unwrap()
}

#[tokio::test]
async fn test_create_one_get_endpoint() {
    let mut server = MockServer::new();
    server
        .create_route(spec(json!({
            "request": { "url": "/test", "method": "get" },
            "response": { "code": 200, "body": { "hi": "there" } }
        })))
        .unwrap();
    let base = common::listen(&mut server).await;

    let res = common::client().get(format!("{}/test", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["hi"], "there");

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_three_endpoints_with_different_status_codes() {
    let mut server = MockServer::new();
    for (url, code) in [("/test1", 200), ("/test2", 304), ("/test3", 500)] {
        server
            .create_route(spec(json!({
                "request": { "url": url, "method": "get" },
                "response": { "code": code, "body": {} }
            })))
            .unwrap();
    }
    let base = common::listen(&mut server).await;
    let client = common::client();

    let (r1, r2, r3) = tokio::join!(
        client.get(format!("{}/test1", base)).send(),
        client.get(format!("{}/test2", base)).send(),
        client.get(format!("{}/test3", base)).send(),
    );
    assert_eq!(r1.unwrap().status().as_u16(), 200);
    assert_eq!(r2.unwrap().status().as_u16(), 304);
    assert_eq!(r3.unwrap().status().as_u16(), 500);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_dynamic_endpoint() {
    let mut server = MockServer::new();
    server
        .create_route(spec(json!({
            "request": { "url": "/dynamic", "method": "post" },
            "response": { "code": 201, "body": {} },
            "afterResponse": {
                "endpoints": [
                    {
                        "request": { "url": "/dynamic/1", "method": "get" },
                        "response": { "code": 200, "body": {} }
                    }
                ]
            }
        })))
        .unwrap();
    let base = common::listen(&mut server).await;
    let client = common::client();

    let before = client.get(format!("{}/dynamic/1", base)).send().await.unwrap();
    assert_eq!(before.status(), StatusCode::NOT_FOUND);

    let created = client.post(format!("{}/dynamic", base)).send().await.unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let after = client.get(format!("{}/dynamic/1", base)).send().await.unwrap();
    assert_eq!(after.status(), StatusCode::OK);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_jsonp_when_requested() {
    let mut server = MockServer::new();
    server
        .create_route(spec(json!({
            "request": { "url": "/stuff", "method": "get" },
            "response": { "code": 200, "body": { "stuff": "hello" } }
        })))
        .unwrap();
    let base = common::listen(&mut server).await;
    let client = common::client();

    let res = client.get(format!("{}/stuff?callback=yo", base)).send().await.unwrap();
    let content_type = res.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/javascript"));
    assert_eq!(res.text().await.unwrap(), r#"yo({"stuff":"hello"});"#);

    let res = client.get(format!("{}/stuff", base)).send().await.unwrap();
    assert!(res.headers()["content-type"].to_str().unwrap().starts_with("application/json"));
    assert_eq!(res.text().await.unwrap(), r#"{"stuff":"hello"}"#);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_fluent_get_status_and_body() {
    let mut server = MockServer::new();
    let _ = server.get("/fluent");
    let _ = server.get("/fluent/status").status(300);
    let _ = server.get("/fluent/body").body(json!({ "fluency": "isgreat" }));
    let base = common::listen(&mut server).await;
    let client = common::client();

    let res = client.get(format!("{}/fluent", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // reqwest does not follow a 300 without a Location header.
    let res = client.get(format!("{}/fluent/status", base)).send().await.unwrap();
    assert_eq!(res.status().as_u16(), 300);

    let res = client.get(format!("{}/fluent/body", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["fluency"], "isgreat");

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_fluent_creates_and_headers() {
    let mut server = MockServer::new();
    let _ = server
        .post("/items")
        .status(201)
        .header("Location", "/items/1")
        .creates(RouteBuilder::get("/items/1").status(200).body(json!({ "id": 1 })));
    let base = common::listen(&mut server).await;
    let client = common::client();

    let created = client.post(format!("{}/items", base)).send().await.unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(created.headers()["location"], "/items/1");

    let item: Value = client.get(format!("{}/items/1", base)).send().await.unwrap().json().await.unwrap();
    assert_eq!(item, json!({ "id": 1 }));

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let mut server = MockServer::new();
    let _ = server.get("/id");
    let base = common::listen(&mut server).await;

    let hit = common::client().get(format!("{}/id", base)).send().await.unwrap();
    assert!(hit.headers().contains_key("x-request-id"));
    let miss = common::client().get(format!("{}/nope", base)).send().await.unwrap();
    assert_eq!(miss.status(), StatusCode::NOT_FOUND);
    assert!(miss.headers().contains_key("x-request-id"));

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_stop_closes_listener_and_clears_routes() {
    let mut server = MockServer::new();
    let _ = server.get("/gone");
    let base = common::listen(&mut server).await;

    server.stop().await.unwrap();
    assert!(server.registry().is_empty());
    assert!(common::client().get(format!("{}/gone", base)).send().await.is_err());

    // A stopped instance can listen again, empty.
    let base = common::listen(&mut server).await;
    let res = common::client().get(format!("{}/gone", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_two_instances_do_not_interfere() {
    let mut first = MockServer::new();
    let mut second = MockServer::new();
    let _ = first.get("/shared").status(201);
    let _ = second.get("/shared").status(202);
    let base_a = common::listen(&mut first).await;
    let base_b = common::listen(&mut second).await;
    let client = common::client();

    assert_eq!(client.get(format!("{}/shared", base_a)).send().await.unwrap().status().as_u16(), 201);
    assert_eq!(client.get(format!("{}/shared", base_b)).send().await.unwrap().status().as_u16(), 202);

    first.stop().await.unwrap();
    second.stop().await.unwrap();
}

#[tokio::test]
async fn test_informational_status_is_refused_not_served() {
    let mut server = MockServer::new();
    let route = server.get("/info").status(100);
    assert!(route.finish().is_err());
    assert!(server
        .create_route(spec(json!({
            "request": { "url": "/early", "method": "get" },
            "response": { "code": 103 }
        })))
        .is_err());
    let base = common::listen(&mut server).await;
    let client = common::client();

    let res = client.get(format!("{}/info", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({}));

    let res = client.get(format!("{}/early", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server.stop().await.unwrap();
}
