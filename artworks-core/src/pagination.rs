use std::ops::Range;

/// Number of pages needed to hold `items` at `page_size` per page.
pub fn page_count(items: usize, page_size: usize) -> usize {
    items.div_ceil(page_size)
}

/// Catalog positions `[start, end)` covered by 1-based `page`, or `None`
/// for page 0 and pages whose positions do not fit in `usize`.
pub fn page_window(page: usize, page_size: usize) -> Option<Range<usize>> {
    let start = page.checked_sub(1)?.checked_mul(page_size)?;
    let end = start.checked_add(page_size)?;
    Some(start..end)
}

/// Pager state over a catalog of known size. Pages are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginator {
    pub current_page: usize,
    pub total_items: usize,
    pub items_per_page: usize,
}

impl Paginator {
    pub fn new(total_items: usize, items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            total_items,
            items_per_page,
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.total_items == 0 {
            1
        } else {
            page_count(self.total_items, self.items_per_page)
        }
    }

    pub fn can_go_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn prev_target(&self) -> Option<usize> {
        self.can_go_prev().then(|| self.current_page - 1)
    }

    pub fn next_target(&self) -> Option<usize> {
        self.can_go_next().then(|| self.current_page + 1)
    }

    pub fn contains_page(&self, page: usize) -> bool {
        page >= 1 && page <= self.total_pages()
    }
}
