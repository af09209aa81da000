pub mod api;
pub mod cache;
pub mod coordinator;
pub mod error;
pub mod types;

pub use api::{BlogApi, HttpBlogClient, DEFAULT_API_URL};
pub use cache::{QueryCache, DEFAULT_STALE_TIME};
pub use coordinator::BlogCoordinator;
pub use error::ClientError;
pub use types::{CoordinatorEvent, CoordinatorOptions, CoordinatorSnapshot, DetailState};
