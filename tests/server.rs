//! Demo service over a real socket.

use std::net::SocketAddr;

use mif::config::parse_config;
use mif::HttpServer;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

async fn start(config_toml: &str) -> (SocketAddr, oneshot::Sender<()>) {
    let mut config = parse_config(config_toml).unwrap();
    config.listener.bind_address = "127.0.0.1:0".into();

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server
            .run(listener, async {
                let _ = rx.await;
            })
            .await;
    });

    (addr, tx)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_all_conversions_over_http() {
    let (addr, shutdown) = start("").await;
    let client = client();

    let res = client.get(format!("http://{}/health", addr)).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "ok");

    let res = client
        .post(format!("http://{}/echo", addr))
        .header("content-type", "application/octet-stream")
        .body(vec![0u8, 1, 2, 255])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "application/octet-stream");
    assert_eq!(&res.bytes().await.unwrap()[..], &[0u8, 1, 2, 255]);

    let res = client
        .get(format!("http://{}/inspect?name=mif", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "application/json");
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["method"], "GET");
    assert_eq!(body["path"], "/inspect");
    assert_eq!(body["query"]["name"], "mif");

    let res = client.get(format!("http://{}/broken", addr)).send().await.unwrap();
    assert_eq!(res.status(), 500);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(res.text().await.unwrap(), r#"{"error_message":"server error"}"#);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_configured_indent_applies_to_responses() {
    let (addr, shutdown) = start(
        r#"
        [adapter.json]
        indent = "  "
        "#,
    )
    .await;

    let res = client()
        .get(format!("http://{}/broken", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 500);
    assert_eq!(
        res.text().await.unwrap(),
        "{\n  \"error_message\": \"server error\"\n}"
    );

    let _ = shutdown.send(());
}
