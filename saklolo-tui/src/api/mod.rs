mod client;
mod error;
mod service;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use service::PostService;
