pub mod buffer;
pub mod catalog;
pub mod config;
pub mod error;
pub mod pagination;
pub mod render;
pub mod selection;
pub mod session;
pub mod table;

pub use buffer::RecordBuffer;
pub use catalog::{
    ApiCall, ArticClient, Artwork, ArtworkId, ArtworkPage, InMemoryCatalog, PageSource,
};
pub use config::{CatalogConfig, DEFAULT_BASE_URL, PAGE_SIZE};
pub use error::{CatalogError, ErrorKind};
pub use pagination::Paginator;
pub use render::{render_page, render_records};
pub use selection::Selection;
pub use session::{CatalogSession, SelectionFill};
pub use table::ArtworkTable;
