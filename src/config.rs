use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub search: SearchConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub base_url: String,
    pub search_terms: String,
    pub geo_location_terms: String,
    pub items_per_page: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub spreadsheet_path: String,
    pub checkpoint_dir: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig {
                base_url: "http://www.yellowpages.com".to_string(),
                search_terms: "Architects".to_string(),
                geo_location_terms: "Los Angeles, CA".to_string(),
                items_per_page: 30,
            },
            output: OutputConfig {
                spreadsheet_path: "yellowpages_architects.csv".to_string(),
                checkpoint_dir: ".".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

pub async fn load_config(
    path: &str,
) -> std::result::Result<Config, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}
