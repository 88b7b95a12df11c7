use crate::domain::model::{PricingEntry, Product};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Local};

/// 外部資料來源；每個方法可獨立失敗
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_donuts(&self) -> Result<Vec<Product>>;
    async fn fetch_rolls(&self) -> Result<Vec<Product>>;
    async fn fetch_pricing(&self) -> Result<Vec<PricingEntry>>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// 固定時間，測試用
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}
