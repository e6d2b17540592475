#![allow(dead_code)]

use async_trait::async_trait;
use planet_service::config::{PlanetConfig, StoreConfig};
use planet_service::models::{Planet, PlanetId};
use planet_service::services::{InMemoryPlanetStore, PlanetStore, StoreError};
use planet_service::Application;
use service_core::config::Config;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
    pub dir: TempDir,
}

impl TestApp {
    /// Spawn the service on a random port around `store`.
    ///
    /// Static files are served from `<tmp>/public` and the API docs are read
    /// from `<tmp>/oas.json`; neither exists until a test writes it.
    pub async fn spawn(store: Arc<dyn PlanetStore>) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::create_dir_all(dir.path().join("public")).expect("Failed to create public dir");

        let config = PlanetConfig {
            common: Config { port: 0 },
            environment: "test".to_string(),
            service_name: "planet-service-test".to_string(),
            log_level: "debug".to_string(),
            otlp_endpoint: None,
            store: StoreConfig::Memory,
            static_dir: dir.path().join("public"),
            api_docs_path: dir.path().join("oas.json"),
            max_body_bytes: 100 * 1024,
        };

        let app = Application::build_with_store(config, store)
            .await
            .expect("Failed to build test application");
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        let live_url = format!("{}/live", address);
        for _ in 0..50 {
            if client.get(&live_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        }

        TestApp {
            address,
            port,
            client,
            dir,
        }
    }

    pub async fn spawn_solar_system() -> Self {
        Self::spawn(Arc::new(InMemoryPlanetStore::solar_system())).await
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Write a file relative to the temp dir (e.g. `oas.json`, `public/index.html`).
    pub fn write_file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_planet(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url("/planet"))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_planet_raw(&self, body: &str, content_type: &str) -> reqwest::Response {
        self.client
            .post(self.url("/planet"))
            .header("content-type", content_type)
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// A store whose every query fails with a refused connection, like a
/// database that went away.
pub struct FailingStore;

impl FailingStore {
    fn refused() -> StoreError {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "db down");
        StoreError::Query(mongodb::error::Error::from(io))
    }
}

#[async_trait]
impl PlanetStore for FailingStore {
    async fn find_by_id(&self, _id: PlanetId) -> Result<Option<Planet>, StoreError> {
        Err(Self::refused())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(Self::refused())
    }
}

/// Wraps an in-memory store and counts lookups.
pub struct CountingStore {
    inner: InMemoryPlanetStore,
    queries: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: InMemoryPlanetStore) -> Self {
        Self {
            inner,
            queries: AtomicUsize::new(0),
        }
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlanetStore for CountingStore {
    async fn find_by_id(&self, id: PlanetId) -> Result<Option<Planet>, StoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}
