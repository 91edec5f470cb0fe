use std::net::SocketAddr;
use std::time::Duration;

use configs::ServerConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use server::{routes, startup, state::AppState};

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let cfg = ServerConfig::default();
    let app = routes::build_router(AppState::in_memory(), &cfg);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(startup::serve(
        listener,
        app,
        Duration::from_secs(60),
        std::future::pending::<()>(),
    ));

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_create_get_delete_scenario() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let biography = "x".repeat(20);

    // Create
    let res = c
        .post(format!("{}/api/users", app.base_url))
        .json(&json!({"first_name": "Al", "last_name": "Bo", "biography": biography}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert!(res.headers().contains_key("x-request-id"));
    let body = res.json::<Value>().await?;
    let id = body["data"].as_str().expect("id").to_string();
    assert!(!id.is_empty());

    // Read back
    let res = c.get(format!("{}/api/users/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["id"], id.as_str());
    assert_eq!(body["data"]["first_name"], "Al");
    assert_eq!(body["data"]["last_name"], "Bo");
    assert_eq!(body["data"]["biography"], biography.as_str());

    // Delete
    let res = c.delete(format!("{}/api/users/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"], format!("id {id} deleted"));

    // Gone
    let res = c.get(format!("{}/api/users/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn e2e_request_id_is_propagated() -> anyhow::Result<()> {
    let app = start_server().await?;
    let request_id = uuid::Uuid::new_v4().to_string();
    let res = client()
        .get(format!("{}/api/users", app.base_url))
        .header("x-request-id", &request_id)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.headers()["x-request-id"], request_id.as_str());
    Ok(())
}

#[tokio::test]
async fn e2e_bind_conflict_is_reported() -> anyhow::Result<()> {
    let taken = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let port = taken.local_addr()?.port();

    let mut cfg = configs::AppConfig::default();
    cfg.server.host = "127.0.0.1".into();
    cfg.server.port = port;
    let err = startup::bind(&cfg).await.expect_err("port already in use");
    assert!(err.to_string().contains(&format!("127.0.0.1:{port}")));
    Ok(())
}
