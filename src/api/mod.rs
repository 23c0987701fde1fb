pub mod client;
pub mod error;
pub mod service;
pub mod traits;
pub mod types;

pub use client::HttpApiClient;
pub use error::ApiError;
pub use service::CatalogService;
pub use traits::{ApiClient, ApiRequest};
pub use types::ListParams;
