use crate::domain::model::{PricingEntry, Product, SourceKind};
use crate::domain::ports::CatalogSource;
use crate::utils::error::{KioskError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// 從後端 REST API 抓取目錄；每個端點回傳 JSON 陣列
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: Client,
    donuts_url: String,
    rolls_url: String,
    pricing_url: String,
}

impl HttpCatalogSource {
    pub fn new(
        donuts_url: impl Into<String>,
        rolls_url: impl Into<String>,
        pricing_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            donuts_url: donuts_url.into(),
            rolls_url: rolls_url.into(),
            pricing_url: pricing_url.into(),
        })
    }

    async fn fetch_list<T: DeserializeOwned>(&self, kind: SourceKind, url: &str) -> Result<Vec<T>> {
        tracing::debug!("Making API request for {} to: {}", kind, url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::debug!("API response status for {}: {}", kind, status);
        if !status.is_success() {
            return Err(KioskError::SourceStatusError {
                source_kind: kind,
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_donuts(&self) -> Result<Vec<Product>> {
        self.fetch_list(SourceKind::Donuts, &self.donuts_url).await
    }

    async fn fetch_rolls(&self) -> Result<Vec<Product>> {
        self.fetch_list(SourceKind::Rolls, &self.rolls_url).await
    }

    async fn fetch_pricing(&self) -> Result<Vec<PricingEntry>> {
        self.fetch_list(SourceKind::Pricing, &self.pricing_url).await
    }
}
