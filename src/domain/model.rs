use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// 單一商品 (甜甜圈或麵包捲)，每次刷新都是完整快照
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub description: Option<String>,
    pub price: Option<f64>,
    pub unit: Option<String>,
    pub available_days: Option<String>,
    pub image_small: Option<String>,
    pub image_medium: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingEntry {
    pub description: Option<String>,
    pub unit: Option<String>,
    pub price: Option<f64>,
    pub order: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Donuts,
    Rolls,
    Pricing,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Donuts => "donuts",
            SourceKind::Rolls => "rolls",
            SourceKind::Pricing => "pricing sheets",
        };
        f.write_str(name)
    }
}

/// 單一資料來源的抓取結果；失敗不會中斷其他來源
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome<T> {
    Loaded(Vec<T>),
    Unavailable { reason: String },
}

impl<T> SourceOutcome<T> {
    pub fn items(&self) -> &[T] {
        match self {
            SourceOutcome::Loaded(items) => items,
            SourceOutcome::Unavailable { .. } => &[],
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            SourceOutcome::Loaded(items) => items,
            SourceOutcome::Unavailable { .. } => Vec::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, SourceOutcome::Loaded(_))
    }
}

impl<T> Default for SourceOutcome<T> {
    fn default() -> Self {
        SourceOutcome::Loaded(Vec::new())
    }
}

/// 一次刷新週期內三個來源的一致快照
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub donuts: SourceOutcome<Product>,
    pub rolls: SourceOutcome<Product>,
    pub pricing: SourceOutcome<PricingEntry>,
}

impl CatalogSnapshot {
    pub fn unavailable_sources(&self) -> Vec<SourceKind> {
        let mut failed = Vec::new();
        if !self.donuts.is_available() {
            failed.push(SourceKind::Donuts);
        }
        if !self.rolls.is_available() {
            failed.push(SourceKind::Rolls);
        }
        if !self.pricing.is_available() {
            failed.push(SourceKind::Pricing);
        }
        failed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupLabel {
    Donuts,
    DonutHoles,
    Rolls,
}

impl GroupLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupLabel::Donuts => "Donuts",
            GroupLabel::DonutHoles => "Donut Holes",
            GroupLabel::Rolls => "Rolls",
        }
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 顯示群組：共享快照中的商品，不複製資料
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayGroup {
    pub label: GroupLabel,
    pub items: Vec<Arc<Product>>,
}

/// 交給渲染層的請求
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub groups: Vec<DisplayGroup>,
    pub pricing: Vec<PricingEntry>,
    pub specials: Vec<Arc<Product>>,
    pub last_refreshed_at: DateTime<Local>,
    /// donuts 與 rolls 皆為空時為 true
    pub empty: bool,
}
