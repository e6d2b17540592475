pub mod database;
pub mod docs;
pub mod memory;
pub mod metrics;
pub mod store;

pub use database::MongoPlanetStore;
pub use docs::{ApiDocs, DocsError};
pub use memory::InMemoryPlanetStore;
pub use metrics::{get_metrics, init_metrics, record_lookup, LookupOutcome};
pub use store::{PlanetStore, StoreError};
