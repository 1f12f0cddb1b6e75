pub mod extractors;
pub mod fetcher;

pub use extractors::ListingExtractor;
pub use fetcher::{Fetch, PageFetcher, SearchQuery};
