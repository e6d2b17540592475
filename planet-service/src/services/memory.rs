//! In-process planet store.
//!
//! Backs the `memory` store backend and the integration tests.

use crate::models::{Planet, PlanetId};
use crate::services::store::{PlanetStore, StoreError};
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct InMemoryPlanetStore {
    planets: Vec<Planet>,
}

impl InMemoryPlanetStore {
    pub fn new(planets: Vec<Planet>) -> Self {
        Self { planets }
    }

    /// The eight planets, ids 1 (Mercury) through 8 (Neptune).
    pub fn solar_system() -> Self {
        let names = [
            "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
        ];
        Self::new(
            names
                .iter()
                .zip(1..)
                .map(|(name, id)| Planet::new(id, *name))
                .collect(),
        )
    }
}

#[async_trait]
impl PlanetStore for InMemoryPlanetStore {
    async fn find_by_id(&self, id: PlanetId) -> Result<Option<Planet>, StoreError> {
        Ok(self
            .planets
            .iter()
            .find(|p| p.id().is_some_and(|stored| id.matches(stored)))
            .cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn finds_by_numeric_equality() {
        let store = InMemoryPlanetStore::solar_system();

        let earth = store.find_by_id(PlanetId::from(3)).await.unwrap();
        assert_eq!(earth.as_ref().and_then(Planet::name), Some("Earth"));

        assert!(store.find_by_id(PlanetId::from(999)).await.unwrap().is_none());
        assert!(store.find_by_id(PlanetId::from(0)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn returns_first_match_for_duplicate_ids() {
        let store = InMemoryPlanetStore::new(vec![
            Planet::new(9, "Pluto"),
            Planet::new(9, "Planet Nine"),
        ]);

        let found = store.find_by_id(PlanetId::from(9)).await.unwrap().unwrap();
        assert_eq!(found.name(), Some("Pluto"));
    }
}
