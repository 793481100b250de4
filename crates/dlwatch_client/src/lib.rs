//! dlwatch client: HTTP boundary to the download server.
mod api;
mod error;
mod wire;

pub use api::{ApiSettings, JobApi, ReqwestApi};
pub use error::ApiError;
