use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::models::{Listing, Result};

/// All the CSS structure the directory exposes, compiled once. Selector
/// changes after a site redesign land here and nowhere else.
pub struct ListingExtractor {
    pagination: Selector,
    results_container: Selector,
    heading_anchor: Selector,
    website_anchor: Selector,
    phone_block: Selector,
    email_anchor: Selector,
    count_regex: Regex,
}

impl ListingExtractor {
    pub fn new() -> Self {
        Self {
            pagination: Selector::parse("div.pagination p").unwrap(),
            results_container: Selector::parse("div.search-results.organic").unwrap(),
            heading_anchor: Selector::parse("h3.n a").unwrap(),
            website_anchor: Selector::parse("div.links a").unwrap(),
            phone_block: Selector::parse("div.phones.phone.primary").unwrap(),
            email_anchor: Selector::parse("a.email-business").unwrap(),
            count_regex: Regex::new(r"^\d+").unwrap(),
        }
    }

    /// Reads the total result count out of the pagination summary and
    /// converts it to a page count, rounding up. The summary's last
    /// whitespace token carries the count glued to a unit suffix
    /// ("61results"), so only the leading digit run is parsed.
    pub fn page_count(&self, html: &str, items_per_page: u32) -> Result<u32> {
        let document = Html::parse_document(html);
        let summary = document
            .select(&self.pagination)
            .next()
            .ok_or("pagination summary not found in search results")?;

        let text = summary.text().collect::<String>();
        let token = text
            .split_whitespace()
            .last()
            .ok_or("pagination summary is empty")?;
        let total: u32 = self
            .count_regex
            .find(token)
            .ok_or_else(|| format!("no result count in pagination token '{}'", token))?
            .as_str()
            .parse()?;

        Ok((total + items_per_page - 1) / items_per_page)
    }

    /// Pulls the partial listing records (everything but the email) off
    /// one search results page, in document order.
    ///
    /// A listing without a heading anchor is malformed input and aborts
    /// the page. A missing website or phone only downgrades that field to
    /// `None` with a diagnostic.
    pub fn extract_listings(&self, html: &str, page: u32) -> Result<Vec<Listing>> {
        let document = Html::parse_document(html);
        let container = document
            .select(&self.results_container)
            .next()
            .ok_or("organic search results container not found")?;

        let mut listings = Vec::new();
        for block in container.children().filter_map(ElementRef::wrap) {
            if block.value().name() != "div" {
                continue;
            }

            let heading = block
                .select(&self.heading_anchor)
                .next()
                .ok_or_else(|| format!("listing on page {} has no heading anchor", page))?;
            let name = heading.text().collect::<String>().trim().to_string();
            let detail_link = heading
                .value()
                .attr("href")
                .ok_or_else(|| format!("listing '{}' on page {} has no detail link", name, page))?
                .to_string();

            let mut listing = Listing::new(name, detail_link);
            listing.website = self.extract_website(&block, page, &listing.name);
            listing.phone = self.extract_phone(&block, page, &listing.name);
            listings.push(listing);
        }

        Ok(listings)
    }

    fn extract_website(&self, block: &ElementRef, page: u32, name: &str) -> Option<String> {
        match block
            .select(&self.website_anchor)
            .next()
            .and_then(|a| a.value().attr("href"))
        {
            // Anything without an absolute scheme is an internal
            // directory link, not the business's own site.
            Some(href) if href.starts_with("http") => Some(href.to_string()),
            Some(href) => {
                warn!("page {}: not a website for {}: {}", page, name, href);
                None
            }
            None => {
                warn!("page {}: no website for {}", page, name);
                None
            }
        }
    }

    fn extract_phone(&self, block: &ElementRef, page: u32, name: &str) -> Option<String> {
        match block.select(&self.phone_block).next() {
            Some(element) => Some(element.text().collect::<String>().trim().to_string()),
            None => {
                warn!("page {}: no phone for {}", page, name);
                None
            }
        }
    }

    /// Reads the email address off a listing's detail page, stripping the
    /// `mailto:` prefix. Listings without a published email are common,
    /// so absence is logged and swallowed.
    pub fn extract_email(&self, html: &str, company_name: &str) -> Option<String> {
        let document = Html::parse_document(html);
        match document
            .select(&self.email_anchor)
            .next()
            .and_then(|a| a.value().attr("href"))
        {
            Some(href) => Some(href.strip_prefix("mailto:").unwrap_or(href).to_string()),
            None => {
                warn!("no email for {}", company_name);
                None
            }
        }
    }
}

impl Default for ListingExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_block(name: &str, link: &str, website: Option<&str>, phone: Option<&str>) -> String {
        let mut block = format!(
            "<div class=\"result\"><h3 class=\"n\"><a href=\"{}\">{}</a></h3>",
            link, name
        );
        if let Some(site) = website {
            block.push_str(&format!(
                "<div class=\"links\"><a href=\"{}\">Website</a></div>",
                site
            ));
        }
        if let Some(phone) = phone {
            block.push_str(&format!(
                "<div class=\"phones phone primary\">{}</div>",
                phone
            ));
        }
        block.push_str("</div>");
        block
    }

    fn results_page(blocks: &[String]) -> String {
        format!(
            "<html><body><div class=\"search-results organic\">{}</div></body></html>",
            blocks.join("")
        )
    }

    #[test]
    fn page_count_rounds_up() {
        let extractor = ListingExtractor::new();
        let html = "<html><body><div class=\"pagination\">\
                    <p>Showing 1-30 of 61results</p></div></body></html>";
        assert_eq!(extractor.page_count(html, 30).unwrap(), 3);
    }

    #[test]
    fn page_count_exact_multiple() {
        let extractor = ListingExtractor::new();
        let html = "<div class=\"pagination\"><p>1-30 of 60results</p></div>";
        assert_eq!(extractor.page_count(html, 30).unwrap(), 2);
    }

    #[test]
    fn page_count_without_pagination_is_fatal() {
        let extractor = ListingExtractor::new();
        assert!(extractor.page_count("<html><body></body></html>", 30).is_err());
    }

    #[test]
    fn extracts_listings_in_document_order() {
        let extractor = ListingExtractor::new();
        let html = results_page(&[
            listing_block("Alpha", "/biz/alpha", Some("http://alpha.com"), Some("555-0001")),
            listing_block("Beta", "/biz/beta", Some("http://beta.com"), Some("555-0002")),
            listing_block("Gamma", "/biz/gamma", Some("http://gamma.com"), Some("555-0003")),
        ]);

        let listings = extractor.extract_listings(&html, 1).unwrap();
        assert_eq!(listings.len(), 3);
        assert_eq!(listings[0].name, "Alpha");
        assert_eq!(listings[0].detail_link, "/biz/alpha");
        assert_eq!(listings[1].name, "Beta");
        assert_eq!(listings[2].name, "Gamma");
        assert_eq!(listings[2].phone.as_deref(), Some("555-0003"));
    }

    #[test]
    fn missing_phone_is_recoverable() {
        let extractor = ListingExtractor::new();
        let html = results_page(&[listing_block(
            "Alpha",
            "/biz/alpha",
            Some("http://alpha.com"),
            None,
        )]);

        let listings = extractor.extract_listings(&html, 1).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].phone, None);
    }

    #[test]
    fn relative_website_link_is_dropped() {
        let extractor = ListingExtractor::new();
        let html = results_page(&[listing_block(
            "Alpha",
            "/biz/alpha",
            Some("/some/internal/path"),
            Some("555-0001"),
        )]);

        let listings = extractor.extract_listings(&html, 1).unwrap();
        assert_eq!(listings[0].website, None);
    }

    #[test]
    fn absolute_website_link_is_kept() {
        let extractor = ListingExtractor::new();
        let html = results_page(&[listing_block(
            "Alpha",
            "/biz/alpha",
            Some("https://alpha.com"),
            Some("555-0001"),
        )]);

        let listings = extractor.extract_listings(&html, 1).unwrap();
        assert_eq!(listings[0].website.as_deref(), Some("https://alpha.com"));
    }

    #[test]
    fn missing_heading_anchor_is_fatal() {
        let extractor = ListingExtractor::new();
        let html = results_page(&["<div class=\"result\"><p>nameless</p></div>".to_string()]);
        assert!(extractor.extract_listings(&html, 4).is_err());
    }

    #[test]
    fn missing_results_container_is_fatal() {
        let extractor = ListingExtractor::new();
        assert!(extractor.extract_listings("<html><body></body></html>", 1).is_err());
    }

    #[test]
    fn extract_email_strips_mailto() {
        let extractor = ListingExtractor::new();
        let html = "<a class=\"email-business\" href=\"mailto:a@b.com\">Email Business</a>";
        assert_eq!(extractor.extract_email(html, "Alpha").as_deref(), Some("a@b.com"));
    }

    #[test]
    fn extract_email_without_anchor_is_none() {
        let extractor = ListingExtractor::new();
        assert_eq!(extractor.extract_email("<html><body></body></html>", "Alpha"), None);
    }
}
