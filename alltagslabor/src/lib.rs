pub mod api;
pub mod search;

pub use api::{ApiError, ApiServer, ApiServerConfig};
pub use search::{ExperimentCatalog, FreeText, QueryEngine, SearchFilters};
