use crate::buffer::RecordBuffer;
use crate::catalog::{Artwork, ArtworkId, ArtworkPage, PageSource};
use crate::error::CatalogError;
use crate::pagination::{page_count, page_window};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Outcome of a "select the first N records" request.
#[derive(Debug)]
pub struct SelectionFill {
    pub requested: usize,
    /// Selected records in catalog order.
    pub records: Vec<Artwork>,
    /// Pages that had to be requested, in request order.
    pub pages_fetched: Vec<usize>,
    /// Set when a fetch failed and the fill stopped short.
    pub error: Option<CatalogError>,
}

impl SelectionFill {
    fn new(requested: usize) -> Self {
        Self {
            requested,
            records: Vec::new(),
            pages_fetched: Vec::new(),
            error: None,
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.records.len() == self.requested
    }

    pub fn ids(&self) -> Vec<ArtworkId> {
        self.records.iter().map(|record| record.id).collect()
    }
}

/// Session-lifetime view of the remote catalog: every fetched record plus
/// the catalog size reported by the API.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSession {
    buffer: RecordBuffer,
    total_count: Option<usize>,
}

impl CatalogSession {
    pub fn new(page_size: usize) -> Self {
        Self {
            buffer: RecordBuffer::new(page_size),
            total_count: None,
        }
    }

    pub fn buffer(&self) -> &RecordBuffer {
        &self.buffer
    }

    pub fn page_size(&self) -> usize {
        self.buffer.page_size()
    }

    /// `None` until the first page has been fetched.
    pub fn total_count(&self) -> Option<usize> {
        self.total_count
    }

    pub fn total_pages(&self) -> Option<usize> {
        self.total_count
            .map(|total| page_count(total, self.page_size()))
    }

    /// Fetch 1-based `page` and store its records at their catalog positions.
    pub async fn load_page<S>(&mut self, source: &S, page: usize) -> Result<ArtworkPage, CatalogError>
    where
        S: PageSource + Sync,
    {
        let Some(window) = page_window(page, self.page_size()) else {
            return Err(CatalogError::InvalidPage(page));
        };

        let fetched = source.fetch_page(page).await?;
        if window.start >= fetched.total_count && !fetched.records.is_empty() {
            warn!(
                "Page {} starts past the {} reported artworks but has records",
                page, fetched.total_count
            );
            return Err(CatalogError::InvalidPage(page));
        }
        self.buffer.store_page(page, &fetched.records);
        if self.total_count != Some(fetched.total_count) {
            info!("Catalog reports {} artworks", fetched.total_count);
        }
        self.total_count = Some(fetched.total_count);

        debug!(
            "Stored page {} ({} records, {} buffered)",
            page,
            fetched.records.len(),
            self.buffer.fetched_count()
        );
        Ok(fetched)
    }

    /// Resolve the first `n` catalog records.
    ///
    /// Buffered records are used first; further pages are reused from the
    /// buffer when complete, otherwise fetched one at a time in page order.
    /// A failed fetch ends the fill with whatever was collected so far.
    pub async fn select_count<S>(&mut self, source: &S, n: usize) -> SelectionFill
    where
        S: PageSource + Sync,
    {
        let mut fill = SelectionFill::new(n);
        fill.records = self.buffer.prefix(n);
        let mut seen: HashSet<ArtworkId> = fill.records.iter().map(|record| record.id).collect();
        let mut remaining = n - fill.records.len();

        let page_size = self.page_size();
        let mut page = page_count(self.buffer.contiguous_len(), page_size) + 1;

        while remaining > 0 {
            if let Some(total) = self.total_count {
                if page > page_count(total, page_size) {
                    break;
                }
            }

            let cached = self
                .total_count
                .and_then(|total| self.buffer.complete_page(page, total));
            let records = match cached {
                Some(records) => {
                    debug!("Reusing buffered page {} for selection", page);
                    records
                }
                None => match self.load_page(source, page).await {
                    Ok(fetched) => {
                        fill.pages_fetched.push(page);
                        fetched.records
                    }
                    Err(e) => {
                        warn!("Selection stopped at page {}: {}", page, e);
                        fill.error = Some(e);
                        break;
                    }
                },
            };

            if records.is_empty() {
                break;
            }

            for record in records {
                if remaining == 0 {
                    break;
                }
                if seen.insert(record.id) {
                    fill.records.push(record);
                    remaining -= 1;
                }
            }
            page += 1;
        }

        info!(
            "Selected {} of {} requested rows ({} pages fetched)",
            fill.records.len(),
            n,
            fill.pages_fetched.len()
        );
        fill
    }
}
