#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::config::WebConfig;
use crate::error::ErrorResponse;
use crate::tests::server::run_test_server;
use core_registry::PaginationConfig;
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use rusqlite::{Connection, params};
use std::net::SocketAddr;
use std::path::Path;
use tempfile::TempDir;

pub const SHOP_DB: &str = "shop";
pub const MONITOR_DB: &str = "monitor";
pub const EMPTY_MONITOR_DB: &str = "empty";
pub const MISSING_DB: &str = "missing";

pub const DATABASES: [(&str, &str); 4] = [
    (SHOP_DB, "shop.db"),
    (MONITOR_DB, "data/monitor.db"),
    (EMPTY_MONITOR_DB, "data/empty.db"),
    (MISSING_DB, "missing.db"),
];

pub const INDEX_HTML: &str = "<!doctype html><title>explorer</title>";
pub const APP_JS: &str = "console.log('explorer');";

#[derive(Debug)]
pub struct TestHttpError {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap<HeaderValue>,
    pub status: StatusCode,
    pub body: String,
}

impl TestHttpError {
    pub fn error_response(&self) -> ErrorResponse {
        serde_json::from_str(&self.body).expect("Failed to parse error body")
    }
}

/// A running server over fixture databases in a temporary directory.
pub struct TestEnv {
    pub dir: TempDir,
    pub addr: SocketAddr,
    pub client: reqwest::Client,
}

impl TestEnv {
    pub async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    pub async fn start_with(configure: impl FnOnce(&mut WebConfig)) -> Self {
        let dir = tempfile::tempdir().unwrap();
        create_fixtures(dir.path());
        let mut config = WebConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            allow_origin: None,
            static_dir: Some(dir.path().join("static")),
            pagination: PaginationConfig::default(),
        };
        configure(&mut config);
        let addr = run_test_server(dir.path(), config).await;
        Self {
            dir,
            addr,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, TestHttpError> {
        http_req(&self.client, Method::GET, &self.url(path)).await
    }
}

pub async fn req(
    client: &reqwest::Client,
    method: Method,
    url: &str,
) -> Result<reqwest::Response, reqwest::Error> {
    let res = client.request(method.clone(), url).send().await;

    eprintln!("req: {method} {url}, {res:?}");

    res
}

/// Parses a 200 body as `T`, anything else becomes a `TestHttpError`.
pub async fn http_req<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    method: Method,
    url: &str,
) -> Result<T, TestHttpError> {
    let response = req(client, method.clone(), url).await.unwrap();
    let headers = response.headers().clone();
    let status = response.status();
    let body = response.text().await.expect("Failed to get response text");
    if status == StatusCode::OK {
        Ok(serde_json::from_str::<T>(&body)
            .unwrap_or_else(|err| panic!("Failed to parse {url}: {err}, body: {body}")))
    } else {
        Err(TestHttpError {
            method,
            url: url.to_string(),
            headers,
            status,
            body,
        })
    }
}

/// `shop` has `users` (dated rows over two days) and `products` (no date
/// column). `monitor` has 150 metric samples, `empty` an empty metrics
/// table, and `missing` is configured but never created.
pub fn create_fixtures(base: &Path) {
    std::fs::create_dir_all(base.join("data")).unwrap();

    let shop = Connection::open(base.join("shop.db")).unwrap();
    shop.execute_batch(
        "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL, created_at TEXT);
         CREATE TABLE products (id INTEGER PRIMARY KEY, name TEXT, price REAL);
         INSERT INTO products (name, price) VALUES ('lamp', 19.5), ('desk', 120.0), ('chair', NULL);",
    )
    .unwrap();
    for i in 1..=12 {
        let day = if i <= 4 { "2024-03-01" } else { "2024-03-02" };
        shop.execute(
            "INSERT INTO users (id, name, created_at) VALUES (?1, ?2, ?3)",
            params![i, format!("user{i}"), format!("{day} 09:{i:02}:00")],
        )
        .unwrap();
    }

    let schema = "CREATE TABLE sistema_info_media (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp TEXT,
        cpu_media REAL,
        ram_media REAL,
        temperatura_media REAL,
        potencia_media REAL
    )";
    let monitor = Connection::open(base.join("data/monitor.db")).unwrap();
    monitor.execute_batch(schema).unwrap();
    for i in 0..150_i32 {
        monitor
            .execute(
                "INSERT INTO sistema_info_media (timestamp, cpu_media, ram_media, temperatura_media, potencia_media)
                 VALUES (?1, ?2, 50.0, 45.5, NULL)",
                params![
                    format!("2024-05-01 {:02}:{:02}:00", i / 60, i % 60),
                    f64::from(i) + 0.456
                ],
            )
            .unwrap();
    }

    let empty = Connection::open(base.join("data/empty.db")).unwrap();
    empty.execute_batch(schema).unwrap();

    let static_dir = base.join("static");
    std::fs::create_dir_all(&static_dir).unwrap();
    std::fs::write(static_dir.join("index.html"), INDEX_HTML).unwrap();
    std::fs::write(static_dir.join("app.js"), APP_JS).unwrap();
}
