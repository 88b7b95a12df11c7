//! Grouping and ordering of a catalog snapshot for display.

use crate::core::days::{day_order, not_blank, parse_available_days};
use crate::domain::model::{
    CatalogSnapshot, DisplayGroup, GroupLabel, PricingEntry, Product, RenderRequest,
};
use chrono::{DateTime, Datelike, Local, Weekday};
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

const DONUT_HOLES_MARKER: &str = "donut holes";
const SECONDS_PER_ITEM: u64 = 3;
const MIN_SCROLL_SECONDS: u64 = 12;

pub fn is_donut_hole(product: &Product) -> bool {
    product
        .description
        .as_deref()
        .is_some_and(|d| d.to_lowercase().contains(DONUT_HOLES_MARKER))
}

/// 排序：無 available_days 的在前，其餘依 [`day_order`] 遞增；穩定排序
pub fn display_order(items: &mut [Arc<Product>]) {
    items.sort_by_key(|p| {
        let days = p.available_days.as_deref();
        (i32::from(not_blank(days)), day_order(days))
    });
}

/// Splits donuts into regular and "Donut Holes" groups, adds rolls as their
/// own group, and sorts each group for display. Empty groups are omitted.
pub fn partition_groups(donuts: &[Arc<Product>], rolls: &[Arc<Product>]) -> Vec<DisplayGroup> {
    let (mut holes, mut regular): (Vec<_>, Vec<_>) =
        donuts.iter().cloned().partition(|p| is_donut_hole(p));
    let mut rolls = rolls.to_vec();

    display_order(&mut regular);
    display_order(&mut holes);
    display_order(&mut rolls);

    [
        (GroupLabel::Donuts, regular),
        (GroupLabel::DonutHoles, holes),
        (GroupLabel::Rolls, rolls),
    ]
    .into_iter()
    .filter(|(_, items)| !items.is_empty())
    .map(|(label, items)| DisplayGroup { label, items })
    .collect()
}

pub fn scroll_duration(item_count: usize) -> Duration {
    let seconds = (item_count as u64).saturating_mul(SECONDS_PER_ITEM);
    Duration::from_secs(seconds.max(MIN_SCROLL_SECONDS))
}

/// 今日特餐：donuts 在前、rolls 在後，保持原始順序
pub fn todays_specials(
    donuts: &[Arc<Product>],
    rolls: &[Arc<Product>],
    today: Weekday,
) -> Vec<Arc<Product>> {
    donuts
        .iter()
        .chain(rolls)
        .filter(|p| {
            let days = p.available_days.as_deref();
            not_blank(days) && parse_available_days(days).contains(today)
        })
        .cloned()
        .collect()
}

/// Sorts by `order` ascending with unordered entries last; ties keep input order.
pub fn sort_pricing(mut entries: Vec<PricingEntry>) -> Vec<PricingEntry> {
    entries.sort_by(|a, b| match (a.order, b.order) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    entries
}

/// 將一次刷新的快照整理成渲染請求
pub fn build_render_request(snapshot: CatalogSnapshot, now: DateTime<Local>) -> RenderRequest {
    let donuts: Vec<Arc<Product>> = snapshot.donuts.into_items().into_iter().map(Arc::new).collect();
    let rolls: Vec<Arc<Product>> = snapshot.rolls.into_items().into_iter().map(Arc::new).collect();

    RenderRequest {
        groups: partition_groups(&donuts, &rolls),
        pricing: sort_pricing(snapshot.pricing.into_items()),
        specials: todays_specials(&donuts, &rolls, now.weekday()),
        last_refreshed_at: now,
        empty: donuts.is_empty() && rolls.is_empty(),
    }
}
