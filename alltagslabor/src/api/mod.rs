//! HTTP API for Alltagslabor

pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{router, ApiServer, ApiServerConfig};
