pub mod planets;
pub mod system;

pub use planets::get_planet;
pub use system::{api_docs, liveness, metrics_endpoint, os_info, readiness};
