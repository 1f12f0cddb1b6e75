use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// One business entry from the directory search results. `email` stays
/// empty until the detail page has been visited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub name: String,
    pub detail_link: String,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Listing {
    pub fn new(name: impl Into<String>, detail_link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detail_link: detail_link.into(),
            website: None,
            phone: None,
            email: None,
        }
    }
}
