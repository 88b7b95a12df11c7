// Adapters layer: concrete catalog sources (HTTP backend, in-memory).

pub mod http;
pub mod memory;

pub use http::HttpCatalogSource;
pub use memory::StaticCatalogSource;
