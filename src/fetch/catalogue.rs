use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ScrapeError};

/// Resource format accepted as the machine-readable dataset body.
const CSV_FORMAT: &str = "CSV";

/// Raw catalogue package record, reduced to the fields we read.
#[derive(Debug, Deserialize)]
struct CataloguePackage {
    title: String,
    author: String,
    #[serde(default)]
    license_title: Option<String>,
    #[serde(default)]
    license_url: Option<String>,
    #[serde(default)]
    resources: Vec<Resource>,
}

/// One downloadable resource listed by the catalogue entry.
#[derive(Debug, Deserialize)]
pub struct Resource {
    pub format: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct License {
    pub title: String,
    pub url: String,
}

/// Catalogue metadata with the selected CSV resource URL.
#[derive(Debug, Clone)]
pub struct DatasetInfo {
    pub title: String,
    pub author: String,
    pub data_url: String,
    pub license: Option<License>,
}

/// Fetch the catalogue entry at `url` and select its CSV resource.
pub async fn fetch_dataset_info(client: &Client, url: &str) -> Result<DatasetInfo> {
    debug!(%url, "fetching catalogue entry");
    let package: CataloguePackage = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let data_url = find_csv_resource(&package.resources)
        .map(|resource| resource.url.clone())
        .ok_or_else(|| ScrapeError::ResourceNotFound {
            format: CSV_FORMAT.to_string(),
            url: url.to_string(),
        })?;

    let license = match (package.license_title, package.license_url) {
        (Some(title), Some(url)) => Some(License { title, url }),
        _ => None,
    };

    Ok(DatasetInfo {
        title: package.title,
        author: package.author,
        data_url,
        license,
    })
}

/// First resource whose format is the delimited-text type, if any.
pub fn find_csv_resource(resources: &[Resource]) -> Option<&Resource> {
    resources.iter().find(|resource| resource.format == CSV_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_first_csv_resource() {
        let resources = vec![
            Resource {
                format: "PDF".to_string(),
                url: "https://opendata.example/report.pdf".to_string(),
            },
            Resource {
                format: "CSV".to_string(),
                url: "https://opendata.example/table-a.csv".to_string(),
            },
            Resource {
                format: "CSV".to_string(),
                url: "https://opendata.example/table-b.csv".to_string(),
            },
        ];
        let found = find_csv_resource(&resources).unwrap();
        assert_eq!(found.url, "https://opendata.example/table-a.csv");
    }

    #[test]
    fn missing_csv_resource_is_none() {
        let resources = vec![Resource {
            format: "XLSX".to_string(),
            url: "https://opendata.example/table.xlsx".to_string(),
        }];
        assert!(find_csv_resource(&resources).is_none());
    }

    #[test]
    fn package_record_deserializes() {
        let json = r#"{
            "title": "Studierende nach Land",
            "author": "Statistikamt",
            "license_title": "dl-de/by-2-0",
            "license_url": "https://www.govdata.de/dl-de/by-2-0",
            "resources": [
                { "format": "CSV", "url": "https://opendata.example/data.csv" }
            ],
            "extras": { "ignored": true }
        }"#;
        let package: CataloguePackage = serde_json::from_str(json).unwrap();
        assert_eq!(package.title, "Studierende nach Land");
        assert_eq!(package.resources.len(), 1);
    }
}
