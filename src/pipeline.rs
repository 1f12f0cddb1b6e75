use tracing::info;
use url::Url;

use crate::checkpoint::{CheckpointStore, Phase};
use crate::config::Config;
use crate::crawler::extractors::ListingExtractor;
use crate::crawler::fetcher::{Fetch, SearchQuery};
use crate::export;
use crate::models::{Listing, Result};
use crate::progress;

/// Sequences the whole run: determine the page count, scrape every
/// search page, visit every listing for its email, export. The listing
/// accumulator is owned here and handed between the phases; each phase
/// first consults its terminal checkpoint and skips the work it already
/// finished in an earlier run.
pub struct Pipeline<F: Fetch> {
    config: Config,
    fetcher: F,
    extractor: ListingExtractor,
    checkpoints: CheckpointStore,
}

impl<F: Fetch> Pipeline<F> {
    pub fn new(config: Config, fetcher: F) -> Self {
        let checkpoints = CheckpointStore::new(&config.output.checkpoint_dir);
        Self {
            config,
            fetcher,
            extractor: ListingExtractor::new(),
            checkpoints,
        }
    }

    pub async fn run(&self) -> Result<()> {
        let pages = self.determine_page_count().await?;
        info!("number of pages: {}", pages);

        let mut listings = self.scrape_search_pages(pages).await?;
        self.scrape_emails(&mut listings).await?;

        export::export_listings(&listings, &self.config.output.spreadsheet_path)?;
        info!("saved {}", self.config.output.spreadsheet_path);
        Ok(())
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.config.search.base_url)
    }

    fn query(&self, page: u32) -> SearchQuery {
        SearchQuery {
            search_terms: self.config.search.search_terms.clone(),
            geo_location_terms: self.config.search.geo_location_terms.clone(),
            page,
        }
    }

    async fn determine_page_count(&self) -> Result<u32> {
        let html = self
            .fetcher
            .fetch(&self.search_url(), Some(&self.query(1)))
            .await?;
        self.extractor
            .page_count(&html, self.config.search.items_per_page)
    }

    /// Page phase. A checkpoint at the final page index means every
    /// search page was already scraped, so the whole phase is skipped.
    async fn scrape_search_pages(&self, pages: u32) -> Result<Vec<Listing>> {
        if let Some(records) = self.checkpoints.load(Phase::Page, pages as usize)? {
            info!("loaded {} listings without emails from checkpoint", records.len());
            return Ok(records);
        }

        info!("parsing search pages");
        let mut listings = Vec::new();
        for page in 1..=pages {
            let html = self
                .fetcher
                .fetch(&self.search_url(), Some(&self.query(page)))
                .await?;
            listings.extend(self.extractor.extract_listings(&html, page)?);
            self.checkpoints.save(&listings, Phase::Page, page as usize)?;
            progress::report(page as usize, pages as usize);
        }
        Ok(listings)
    }

    /// Company phase. Visits each listing's detail page in discovery
    /// order and fills in its email; a checkpoint at the last position
    /// replaces the accumulator wholesale.
    async fn scrape_emails(&self, listings: &mut Vec<Listing>) -> Result<()> {
        let total = listings.len();
        if total == 0 {
            return Ok(());
        }

        if let Some(records) = self.checkpoints.load(Phase::Company, total - 1)? {
            info!("loaded full listing set from checkpoint");
            *listings = records;
            return Ok(());
        }

        info!("parsing emails");
        let base = Url::parse(&self.config.search.base_url)?;
        for position in 0..total {
            let detail_url = base.join(&listings[position].detail_link)?;
            let html = self.fetcher.fetch(detail_url.as_str(), None).await?;
            let email = self.extractor.extract_email(&html, &listings[position].name);
            listings[position].email = email;
            self.checkpoints.save(listings, Phase::Company, position)?;
            progress::report(position, total);
        }
        Ok(())
    }
}
