pub mod planet;

pub use planet::{LookupRequest, Planet, PlanetId};
