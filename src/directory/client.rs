//! HTTP client for the public country and university directories

use super::traits::DirectoryLookup;
use crate::config::AppConfig;
use crate::error::LookupError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeSet;

#[derive(Debug, Deserialize)]
struct CountryEntry {
    name: CountryName,
}

#[derive(Debug, Deserialize)]
struct CountryName {
    common: String,
}

#[derive(Debug, Deserialize)]
struct UniversityEntry {
    name: String,
}

/// Client for restcountries-style and hipolabs-style directories
pub struct HttpDirectory {
    http: reqwest::Client,
    countries_url: String,
    universities_url: String,
}

impl HttpDirectory {
    pub fn new(countries_url: &str, universities_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            countries_url: countries_url.trim_end_matches('/').to_string(),
            universities_url: universities_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.countries_url(), config.universities_url())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, &str)],
    ) -> Result<T, LookupError> {
        tracing::debug!("GET {} {:?}", url, query);
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| LookupError::Failed(e.to_string()))?;
        response
            .json::<T>()
            .await
            .map_err(|e| LookupError::Failed(format!("invalid response from {url}: {e}")))
    }
}

/// Trimmed, de-duplicated, sorted names
fn sorted_names(names: impl IntoIterator<Item = String>) -> Vec<String> {
    names
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[async_trait]
impl DirectoryLookup for HttpDirectory {
    async fn list_countries(&self) -> Result<Vec<String>, LookupError> {
        let entries: Vec<CountryEntry> = self
            .get_json(format!("{}/v3.1/all", self.countries_url), &[("fields", "name")])
            .await?;
        Ok(sorted_names(entries.into_iter().map(|e| e.name.common)))
    }

    async fn list_universities(&self, country: &str) -> Result<Vec<String>, LookupError> {
        let entries: Vec<UniversityEntry> = self
            .get_json(
                format!("{}/search", self.universities_url),
                &[("country", country)],
            )
            .await?;
        Ok(sorted_names(entries.into_iter().map(|e| e.name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_country_payload_shape() {
        let json = r#"[
            {"name": {"common": "France", "official": "French Republic"}},
            {"name": {"common": "Cameroon", "official": "Republic of Cameroon"}}
        ]"#;
        let entries: Vec<CountryEntry> = serde_json::from_str(json).unwrap();
        let names = sorted_names(entries.into_iter().map(|e| e.name.common));
        assert_eq!(names, vec!["Cameroon", "France"]);
    }

    #[test]
    fn test_university_payload_deduplicated() {
        let json = r#"[
            {"name": "Université de Lille", "domains": ["univ-lille.fr"]},
            {"name": "Sorbonne University"},
            {"name": "Université de Lille"},
            {"name": "  "}
        ]"#;
        let entries: Vec<UniversityEntry> = serde_json::from_str(json).unwrap();
        let names = sorted_names(entries.into_iter().map(|e| e.name));
        assert_eq!(names, vec!["Sorbonne University", "Université de Lille"]);
    }

    #[test]
    fn test_base_urls_lose_trailing_slash() {
        let client = HttpDirectory::new("http://a.test/", "http://b.test//");
        assert_eq!(client.countries_url, "http://a.test");
        assert_eq!(client.universities_url, "http://b.test");
    }

    #[test]
    fn test_unreachable_directory_is_a_failure() {
        let client = HttpDirectory::new("http://127.0.0.1:9", "http://127.0.0.1:9");
        let result = tokio_test::block_on(client.list_countries());
        assert!(matches!(result, Err(LookupError::Failed(_))));
    }
}
