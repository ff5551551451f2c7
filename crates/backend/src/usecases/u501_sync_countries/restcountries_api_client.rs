use anyhow::{Context, Result};
use contracts::domain::a001_country::catalog::{
    parse_restcountries_v2, parse_restcountries_v3, CountryInfo, RESTCOUNTRIES_V2_URL,
    RESTCOUNTRIES_V3_URL,
};

/// HTTP-клиент для restcountries.com
pub struct RestCountriesApiClient {
    client: reqwest::Client,
}

impl RestCountriesApiClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("{} returned HTTP {}", url, status.as_u16());
        }
        Ok(response.text().await?)
    }

    /// Основной API v3
    pub async fn fetch_v3(&self) -> Result<Vec<CountryInfo>> {
        let body = self.fetch_text(RESTCOUNTRIES_V3_URL).await?;
        parse_restcountries_v3(&body).map_err(anyhow::Error::msg)
    }

    /// Резервный API v2
    pub async fn fetch_v2(&self) -> Result<Vec<CountryInfo>> {
        let body = self.fetch_text(RESTCOUNTRIES_V2_URL).await?;
        parse_restcountries_v2(&body).map_err(anyhow::Error::msg)
    }
}
