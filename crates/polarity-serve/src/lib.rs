#![forbid(unsafe_code)]

//! HTTP front end for `polarity`.
//!
//! Routes:
//! - `POST /graphs?dp=<n>&binning=<bool>`: analyze a `{dType, graph}` body
//! - `GET /graphs`: list dataset names
//! - `GET /graphs?entry=<name>`: fetch one dataset's edge list
//! - `GET /health`

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod worker;

pub use catalog::{Catalog, CatalogError};
pub use config::ServeArgs;
pub use error::{ApiError, ApiResult};
pub use routes::router;
pub use state::AppState;
pub use worker::AnalysisPool;
