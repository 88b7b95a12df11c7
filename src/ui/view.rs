use crate::core::catalog::scroll_duration;
use crate::core::days::not_blank;
use crate::core::image::best_image_url;
use crate::domain::model::{GroupLabel, PricingEntry, Product, RenderRequest};
use crate::ui::carousel::SpecialsCarousel;
use chrono::{DateTime, Local};
use std::time::Duration;

pub const EMPTY_MESSAGE: &str = "No products available at this time.";

/// `$1.25` 或 `$1.25 / each`
pub fn format_price(price: Option<f64>, unit: Option<&str>) -> Option<String> {
    let price = price?;
    let mut text = format!("${:.2}", price);
    if let Some(unit) = unit.filter(|u| not_blank(Some(*u))) {
        text.push_str(" / ");
        text.push_str(unit);
    }
    Some(text)
}

/// Long en-GB date, e.g. `Friday, 16 October 2026`.
pub fn format_header_date(now: DateTime<Local>) -> String {
    now.format("%A, %-d %B %Y").to_string()
}

pub fn format_last_refreshed(at: DateTime<Local>) -> String {
    format!("Last refreshed: {}", at.format("%-I:%M %p"))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub name: String,
    pub price: Option<String>,
    pub days: Option<String>,
    pub image_url: Option<String>,
}

impl ProductCard {
    pub fn from_product(product: &Product) -> Self {
        let days = product
            .available_days
            .as_deref()
            .filter(|d| not_blank(Some(*d)))
            .map(|d| d.replace(',', " · "));

        Self {
            name: product.description.clone().unwrap_or_default(),
            price: format_price(product.price, product.unit.as_deref()),
            days,
            image_url: best_image_url(product),
        }
    }
}

/// One display group's cards, played as an endless horizontal loop.
///
/// Cards are stored once; [`ScrollTrack::passes`] yields them twice back to
/// back so the second pass can slide in behind the first.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollTrack {
    cards: Vec<ProductCard>,
    duration: Duration,
}

impl ScrollTrack {
    pub fn new(cards: Vec<ProductCard>) -> Self {
        let duration = scroll_duration(cards.len());
        Self { cards, duration }
    }

    pub fn cards(&self) -> &[ProductCard] {
        &self.cards
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn passes(&self) -> impl Iterator<Item = &ProductCard> + '_ {
        self.cards.iter().chain(self.cards.iter())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub label: GroupLabel,
    pub track: ScrollTrack,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricingRow {
    pub description: String,
    pub unit: String,
    pub price: String,
}

impl PricingRow {
    pub fn from_entry(entry: &PricingEntry) -> Self {
        Self {
            description: entry.description.clone().unwrap_or_default(),
            unit: entry.unit.clone().unwrap_or_default(),
            price: format_price(entry.price, None).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub brand: String,
    pub date: String,
    pub last_refreshed: String,
}

/// 渲染層看到的完整畫面狀態，只在 UI 執行緒內修改
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub header: Header,
    pub sections: Vec<Section>,
    pub empty_message: Option<&'static str>,
    pub pricing: Vec<PricingRow>,
    pub specials: Vec<ProductCard>,
    pub carousel: SpecialsCarousel,
}

impl ViewState {
    pub fn from_request(brand: &str, request: &RenderRequest) -> Self {
        let sections = request
            .groups
            .iter()
            .map(|group| Section {
                label: group.label,
                track: ScrollTrack::new(
                    group.items.iter().map(|p| ProductCard::from_product(p)).collect(),
                ),
            })
            .collect();

        let specials: Vec<ProductCard> = request
            .specials
            .iter()
            .map(|p| ProductCard::from_product(p))
            .collect();

        Self {
            header: Header {
                brand: brand.to_string(),
                date: format_header_date(request.last_refreshed_at),
                last_refreshed: format_last_refreshed(request.last_refreshed_at),
            },
            sections,
            empty_message: request.empty.then_some(EMPTY_MESSAGE),
            pricing: request.pricing.iter().map(PricingRow::from_entry).collect(),
            carousel: SpecialsCarousel::new(specials.len()),
            specials,
        }
    }

    pub fn current_special(&self) -> Option<&ProductCard> {
        self.specials.get(self.carousel.current())
    }
}
