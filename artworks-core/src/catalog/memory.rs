//! In-memory page source.
//!
//! Serves a fixed list of artworks page by page and remembers which pages
//! were asked for, so selection behavior can be checked without a network.

use super::PageSource;
use super::models::{Artwork, ArtworkPage};
use crate::config::PAGE_SIZE;
use crate::error::CatalogError;
use crate::pagination::page_window;
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug)]
pub struct InMemoryCatalog {
    records: Vec<Artwork>,
    failing_pages: HashSet<usize>,
    requests: Mutex<Vec<usize>>,
}

impl InMemoryCatalog {
    pub fn new(records: Vec<Artwork>) -> Self {
        Self {
            records,
            failing_pages: HashSet::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Catalog of `total` placeholder artworks with ids `1..=total`.
    pub fn generated(total: usize) -> Self {
        let records = (1..=total)
            .map(|i| Artwork {
                id: i as u64,
                title: format!("Artwork {}", i),
                artist_display: format!("Artist {}", i % 7),
                place_of_origin: "Chicago".to_string(),
                inscriptions: String::new(),
                date_start: Some(1800 + (i % 200) as i32),
                date_end: Some(1801 + (i % 200) as i32),
            })
            .collect();
        Self::new(records)
    }

    /// Make every request for `page` fail with a 500 status.
    pub fn failing_on(mut self, page: usize) -> Self {
        self.failing_pages.insert(page);
        self
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Pages requested so far, in request order.
    pub fn requests(&self) -> Vec<usize> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn clear_requests(&self) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.clear();
        }
    }
}

impl PageSource for InMemoryCatalog {
    async fn fetch_page(&self, page: usize) -> Result<ArtworkPage, CatalogError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(page);
        }

        let Some(window) = page_window(page, PAGE_SIZE) else {
            return Err(CatalogError::InvalidPage(page));
        };
        if self.failing_pages.contains(&page) {
            return Err(CatalogError::Status {
                url: format!("memory://artworks?page={}", page),
                status: 500,
            });
        }

        let start = window.start.min(self.records.len());
        let end = window.end.min(self.records.len());
        Ok(ArtworkPage {
            page,
            records: self.records[start..end].to_vec(),
            total_count: self.records.len(),
        })
    }
}
