use crate::catalog::Artwork;
use crate::pagination::page_window;

/// Every record fetched during a session, stored at its catalog position.
///
/// Slot `i` holds the record for catalog position `i` once its page has been
/// fetched. Positions that were never fetched stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordBuffer {
    page_size: usize,
    slots: Vec<Option<Artwork>>,
}

impl RecordBuffer {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            slots: Vec::new(),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Store `records` as the content of 1-based `page`, replacing whatever
    /// that page window held before. Pages without a window are ignored.
    pub fn store_page(&mut self, page: usize, records: &[Artwork]) {
        let Some(window) = page_window(page, self.page_size) else {
            return;
        };
        let start = window.start;

        for slot in self.slots.iter_mut().take(window.end).skip(start) {
            *slot = None;
        }

        let records = &records[..records.len().min(self.page_size)];
        let needed = start + records.len();
        if !records.is_empty() && self.slots.len() < needed {
            self.slots.resize(needed, None);
        }
        for (offset, record) in records.iter().enumerate() {
            self.slots[start + offset] = Some(record.clone());
        }

        while matches!(self.slots.last(), Some(None)) {
            self.slots.pop();
        }
    }

    pub fn get(&self, position: usize) -> Option<&Artwork> {
        self.slots.get(position).and_then(Option::as_ref)
    }

    /// Length of the gap-free run of records starting at position 0.
    pub fn contiguous_len(&self) -> usize {
        self.slots
            .iter()
            .position(Option::is_none)
            .unwrap_or(self.slots.len())
    }

    /// First `n` records of the gap-free prefix, in catalog order.
    pub fn prefix(&self, n: usize) -> Vec<Artwork> {
        self.slots
            .iter()
            .take(n.min(self.contiguous_len()))
            .flatten()
            .cloned()
            .collect()
    }

    /// Records of `page` if every position it covers in a catalog of
    /// `total` records has been fetched.
    pub fn complete_page(&self, page: usize, total: usize) -> Option<Vec<Artwork>> {
        let start = page_window(page, self.page_size)?.start;
        let expected = self.page_size.min(total.saturating_sub(start));
        if expected == 0 {
            return None;
        }
        (start..start + expected)
            .map(|position| self.get(position).cloned())
            .collect()
    }

    /// Number of filled positions, gaps excluded.
    pub fn fetched_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
