use crate::domain::model::{PricingEntry, Product, SourceKind};
use crate::domain::ports::CatalogSource;
use crate::utils::error::{KioskError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 記憶體內的固定目錄；用於 `--demo` 模式與測試
#[derive(Debug, Default)]
pub struct StaticCatalogSource {
    donuts: Vec<Product>,
    rolls: Vec<Product>,
    pricing: Vec<PricingEntry>,
    failing: Vec<SourceKind>,
    fetches: AtomicUsize,
}

impl StaticCatalogSource {
    pub fn new(donuts: Vec<Product>, rolls: Vec<Product>, pricing: Vec<PricingEntry>) -> Self {
        Self {
            donuts,
            rolls,
            pricing,
            ..Default::default()
        }
    }

    /// Makes the given source report a 503 on every fetch.
    pub fn failing(mut self, kind: SourceKind) -> Self {
        self.failing.push(kind);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn sample() -> Self {
        let product = |description: &str, price: f64, days: Option<&str>| Product {
            description: Some(description.to_string()),
            price: Some(price),
            unit: Some("each".to_string()),
            available_days: days.map(String::from),
            ..Default::default()
        };

        Self::new(
            vec![
                product("Glazed", 1.25, None),
                product("Chocolate Frosted", 1.50, None),
                product("Apple Fritter", 2.75, Some("Fri-Sun")),
                product("Pumpkin Spice", 1.75, Some("Mon,Wed")),
                product("Donut Holes", 0.35, None),
            ],
            vec![
                product("Cinnamon Roll", 3.25, None),
                product("Pecan Roll", 3.75, Some("Sat-Mon")),
            ],
            vec![
                PricingEntry {
                    description: Some("Dozen Glazed".to_string()),
                    unit: Some("dozen".to_string()),
                    price: Some(12.99),
                    order: Some(1),
                },
                PricingEntry {
                    description: Some("Half Dozen".to_string()),
                    unit: Some("6".to_string()),
                    price: Some(7.49),
                    order: Some(2),
                },
            ],
        )
    }

    fn fetch<T: Clone>(&self, kind: SourceKind, items: &[T]) -> Result<Vec<T>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(&kind) {
            return Err(KioskError::SourceStatusError {
                source_kind: kind,
                status: 503,
            });
        }
        Ok(items.to_vec())
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch_donuts(&self) -> Result<Vec<Product>> {
        self.fetch(SourceKind::Donuts, &self.donuts)
    }

    async fn fetch_rolls(&self) -> Result<Vec<Product>> {
        self.fetch(SourceKind::Rolls, &self.rolls)
    }

    async fn fetch_pricing(&self) -> Result<Vec<PricingEntry>> {
        self.fetch(SourceKind::Pricing, &self.pricing)
    }
}
