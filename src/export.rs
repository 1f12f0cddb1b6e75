use std::path::Path;

use tracing::info;

use crate::models::{Listing, Result};

const HEADER: [&str; 4] = ["Name", "Phone", "Website", "Email"];

/// Writes the final record list as a spreadsheet: a fixed header row,
/// then one row per listing in discovery order. The file is overwritten
/// unconditionally.
pub fn export_listings(records: &[Listing], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(HEADER)?;
    for listing in records {
        writer.write_record([
            listing.name.as_str(),
            listing.phone.as_deref().unwrap_or(""),
            listing.website.as_deref().unwrap_or(""),
            listing.email.as_deref().unwrap_or(""),
        ])?;
    }
    writer.flush()?;

    info!("exported {} listings to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_rows_in_order() {
        let records = vec![
            Listing {
                name: "Alpha Architects".to_string(),
                detail_link: "/biz/alpha".to_string(),
                website: Some("http://alpha.com".to_string()),
                phone: Some("555-0001".to_string()),
                email: Some("alpha@example.com".to_string()),
            },
            Listing {
                name: "Beta Design".to_string(),
                detail_link: "/biz/beta".to_string(),
                website: None,
                phone: None,
                email: None,
            },
        ];

        let path = std::env::temp_dir().join(format!("yp_export_{}.csv", std::process::id()));
        export_listings(&records, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Name,Phone,Website,Email");
        assert_eq!(lines[1], "Alpha Architects,555-0001,http://alpha.com,alpha@example.com");
        assert_eq!(lines[2], "Beta Design,,,");
    }
}
