#![forbid(unsafe_code)]

mod app;
mod error;
mod middleware;
mod routes;

pub use app::{AppState, build_app};
pub use error::ApiError;
pub use middleware::REQUEST_ID_HEADER;
