pub mod checkpoint;
pub mod config;
pub mod crawler;
pub mod export;
pub mod models;
pub mod pipeline;
pub mod progress;

pub use checkpoint::{CheckpointStore, Phase};
pub use config::{load_config, Config};
pub use crawler::{Fetch, ListingExtractor, PageFetcher, SearchQuery};
pub use models::{Listing, Result};
pub use pipeline::Pipeline;
