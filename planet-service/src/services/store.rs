use crate::models::{Planet, PlanetId};
use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store query failed: {0}")]
    Query(#[from] mongodb::error::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::DatabaseError(anyhow::Error::new(err))
    }
}

/// Read access to the planet documents.
///
/// Implementations perform the equality match on `id` themselves and return
/// the first matching document in their natural order.
#[async_trait]
pub trait PlanetStore: Send + Sync {
    async fn find_by_id(&self, id: PlanetId) -> Result<Option<Planet>, StoreError>;

    /// Verify the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
