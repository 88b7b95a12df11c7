pub mod catalog;
pub mod days;
pub mod image;
pub mod kiosk;
pub mod scheduler;

pub use crate::domain::model::{
    CatalogSnapshot, DisplayGroup, GroupLabel, PricingEntry, Product, RenderRequest, SourceKind,
    SourceOutcome,
};
pub use crate::domain::ports::{CatalogSource, Clock, FixedClock, SystemClock};
pub use crate::utils::error::Result;
