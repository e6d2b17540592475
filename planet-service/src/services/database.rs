use crate::config::MongoConfig;
use crate::models::{Planet, PlanetId};
use crate::services::store::{PlanetStore, StoreError};
use async_trait::async_trait;
use mongodb::{
    bson::{doc, Bson, Document},
    options::ClientOptions,
    Client as MongoClient, Collection, Database,
};
use secrecy::ExposeSecret;
use serde_json::{Map, Number, Value};
use service_core::error::AppError;
use std::time::Duration;

#[derive(Clone)]
pub struct MongoPlanetStore {
    client: MongoClient,
    db: Database,
    collection: String,
}

impl MongoPlanetStore {
    /// Create the client and confirm the server answers a ping.
    pub async fn connect(config: &MongoConfig) -> Result<Self, AppError> {
        tracing::info!(database = %config.database, "Connecting to MongoDB");

        let mut options = ClientOptions::parse(config.uri.expose_secret())
            .await
            .map_err(|e| {
                tracing::error!("Failed to parse MongoDB connection string: {}", e);
                AppError::from(e)
            })?;
        options.app_name = Some("planet-service".to_string());
        options.server_selection_timeout = Some(Duration::from_secs(config.timeout_secs));
        options.connect_timeout = Some(Duration::from_secs(config.timeout_secs));

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(&config.database);

        let store = Self {
            client,
            db,
            collection: config.collection.clone(),
        };
        store.ping().await.map_err(|e| {
            tracing::error!("MongoDB connection check failed: {}", e);
            AppError::from(e)
        })?;

        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "Successfully connected to MongoDB"
        );
        Ok(store)
    }

    pub fn planets(&self) -> Collection<Document> {
        self.db.collection(&self.collection)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl PlanetStore for MongoPlanetStore {
    async fn find_by_id(&self, id: PlanetId) -> Result<Option<Planet>, StoreError> {
        let filter = doc! { "id": Bson::from(id) };
        let document = self.planets().find_one(filter, None).await?;

        Ok(document.map(|d| Planet::from(document_to_json(d))))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(())
    }
}

/// Convert a stored document into plain JSON.
///
/// ObjectIds become their hex string and dates become RFC 3339 strings;
/// numbers keep their numeric form.
pub fn document_to_json(document: Document) -> Map<String, Value> {
    document
        .into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect()
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::Double(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        Bson::String(s) => Value::String(s),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(doc) => Value::Object(document_to_json(doc)),
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Int32(i) => Value::from(i),
        Bson::Int64(i) => Value::from(i),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or_else(|_| Value::from(dt.timestamp_millis())),
        other => other.into_relaxed_extjson(),
    }
}
