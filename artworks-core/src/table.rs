use crate::catalog::{Artwork, ArtworkId, PageSource};
use crate::config::PAGE_SIZE;
use crate::error::CatalogError;
use crate::pagination::Paginator;
use crate::selection::Selection;
use crate::session::{CatalogSession, SelectionFill};
use tracing::{debug, warn};

/// State behind the artwork table: the page on display, which rows are
/// selected across all pages, and the "select first N rows" panel.
#[derive(Debug, Clone)]
pub struct ArtworkTable {
    session: CatalogSession,
    selection: Selection,
    current_page: usize,
    rows: Vec<Artwork>,
    loading: bool,
    panel_open: bool,
    rows_to_select: usize,
    last_error: Option<String>,
}

impl Default for ArtworkTable {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl ArtworkTable {
    pub fn new(page_size: usize) -> Self {
        Self {
            session: CatalogSession::new(page_size),
            selection: Selection::new(),
            current_page: 1,
            rows: Vec::new(),
            loading: false,
            panel_open: false,
            rows_to_select: 0,
            last_error: None,
        }
    }

    pub fn session(&self) -> &CatalogSession {
        &self.session
    }

    pub fn rows(&self) -> &[Artwork] {
        &self.rows
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_records(&self) -> usize {
        self.session.total_count().unwrap_or(0)
    }

    pub fn paginator(&self) -> Paginator {
        Paginator {
            current_page: self.current_page,
            total_items: self.total_records(),
            items_per_page: self.session.page_size(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Mark the table busy while an operation runs on a copy of it elsewhere.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_records(&self) -> &[Artwork] {
        self.selection.records()
    }

    pub fn is_selected(&self, id: ArtworkId) -> bool {
        self.selection.contains(id)
    }

    /// Every row on display is selected. An empty page never counts as selected.
    pub fn all_selected(&self) -> bool {
        !self.rows.is_empty() && self.selection.contains_all(self.rows.iter())
    }

    /// Fetch and display `page`. On failure the previous rows stay on screen.
    pub async fn go_to_page<S>(&mut self, source: &S, page: usize) -> Result<(), CatalogError>
    where
        S: PageSource + Sync,
    {
        let out_of_range =
            self.session.total_count().is_some() && !self.paginator().contains_page(page);
        if page == 0 || out_of_range {
            let err = CatalogError::InvalidPage(page);
            self.last_error = Some(err.to_string());
            return Err(err);
        }

        self.loading = true;
        let result = self.session.load_page(source, page).await;
        self.loading = false;

        match result {
            Ok(fetched) => {
                debug!("Displaying page {} ({} rows)", page, fetched.records.len());
                self.rows = fetched.records;
                self.current_page = page;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to load page {}: {}", page, e);
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Returns `Ok(false)` when already on the last page.
    pub async fn next_page<S>(&mut self, source: &S) -> Result<bool, CatalogError>
    where
        S: PageSource + Sync,
    {
        match self.paginator().next_target() {
            Some(page) => self.go_to_page(source, page).await.map(|_| true),
            None => Ok(false),
        }
    }

    /// Returns `Ok(false)` when already on the first page.
    pub async fn prev_page<S>(&mut self, source: &S) -> Result<bool, CatalogError>
    where
        S: PageSource + Sync,
    {
        match self.paginator().prev_target() {
            Some(page) => self.go_to_page(source, page).await.map(|_| true),
            None => Ok(false),
        }
    }

    /// Flip the selection of a displayed row. Returns the new state, or
    /// `None` if no row with that id is on display.
    pub fn toggle_row(&mut self, id: ArtworkId) -> Option<bool> {
        let row = self.rows.iter().find(|row| row.id == id)?;
        Some(self.selection.toggle(row))
    }

    /// Toggle by 0-based position on the current page.
    pub fn toggle_row_at(&mut self, index: usize) -> Option<bool> {
        let id = self.rows.get(index)?.id;
        self.toggle_row(id)
    }

    /// Select every displayed row, or deselect them all if they already are.
    pub fn toggle_select_all(&mut self) {
        if self.all_selected() {
            for row in &self.rows {
                self.selection.remove(row.id);
            }
        } else {
            for row in &self.rows {
                self.selection.insert(row.clone());
            }
        }
    }

    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn open_panel(&mut self) {
        self.panel_open = true;
    }

    pub fn close_panel(&mut self) {
        self.panel_open = false;
    }

    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }

    pub fn rows_to_select(&self) -> usize {
        self.rows_to_select
    }

    pub fn set_rows_to_select(&mut self, n: usize) {
        self.rows_to_select = n;
    }

    /// Replace the whole selection with the first `n` catalog records and
    /// close the panel. A partial result is still applied; the failure is
    /// kept in `last_error`.
    pub async fn submit_select_count<S>(&mut self, source: &S, n: usize) -> SelectionFill
    where
        S: PageSource + Sync,
    {
        self.rows_to_select = n;
        self.loading = true;
        let fill = self.session.select_count(source, n).await;
        self.loading = false;

        self.selection.replace(fill.records.iter().cloned());
        self.panel_open = false;
        self.last_error = fill.error.as_ref().map(|e| {
            format!(
                "Selected {} of {} rows before an error: {}",
                fill.records.len(),
                n,
                e
            )
        });
        fill
    }

    /// `submit_select_count` with the amount typed into the panel.
    pub async fn submit_rows_to_select<S>(&mut self, source: &S) -> SelectionFill
    where
        S: PageSource + Sync,
    {
        let n = self.rows_to_select;
        self.submit_select_count(source, n).await
    }
}
