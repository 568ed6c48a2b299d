pub mod api;
pub mod client;
pub mod memory;
pub mod models;

pub use client::{ApiCall, ArticClient};
pub use memory::InMemoryCatalog;
pub use models::{Artwork, ArtworkId, ArtworkPage, ArtworksAnswer, PaginationInfo};

use crate::error::CatalogError;
use std::future::Future;

/// Anything that can produce one 1-based page of the artwork catalog.
pub trait PageSource {
    fn fetch_page(
        &self,
        page: usize,
    ) -> impl Future<Output = Result<ArtworkPage, CatalogError>> + Send;
}
