//! End-to-end tests against a real listener on an ephemeral port.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use chat_server::api::AppState;
use chat_server::db::ChatStore;
use chat_server::{Config, FrontDoor, RunningServer};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn start_server() -> (RunningServer, String) {
    let config = Config {
        port: 0,
        bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
        ..Config::default()
    };
    let state = AppState::new(&config, Arc::new(ChatStore::seeded()));
    let server = FrontDoor::new(config, state)
        .start()
        .await
        .expect("server should start");
    let base = format!("http://{}", server.local_addr());
    (server, base)
}

#[tokio::test]
async fn ping_over_the_wire() {
    let (server, base) = start_server().await;
    let client = reqwest::Client::new();

    let response = client.get(format!("{base}/_ping")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "pong");

    let response = client
        .post(format!("{base}/_ping"))
        .body("whatever")
        .send()
        .await
        .unwrap();
    assert_eq!(response.text().await.unwrap(), "pong");

    server.stop().await.unwrap();
}

#[tokio::test]
async fn graphql_over_the_wire() {
    let (server, base) = start_server().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .post(format!("{base}/graphql"))
        .json(&json!({ "query": "{ chats { name lastMessage { content } } }" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        body["data"]["chats"][3],
        json!({
            "name": "Katie Peterson",
            "lastMessage": { "content": "This is wicked good ice cream." }
        })
    );

    server.stop().await.unwrap();
}

#[tokio::test]
async fn bad_requests_do_not_take_the_server_down() {
    let (server, base) = start_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/graphql"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());

    let body: Value = client
        .post(format!("{base}/graphql"))
        .json(&json!({ "query": "{ chats {" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!body["errors"].as_array().unwrap().is_empty());

    let response = client.get(format!("{base}/_ping")).send().await.unwrap();
    assert_eq!(response.text().await.unwrap(), "pong");

    server.stop().await.unwrap();
}
