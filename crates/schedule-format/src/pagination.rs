//! Page arithmetic over flat sequences. Page numbers are 0-based.

/// `ceil(count / page_size)`; zero when `page_size` is zero.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// One page of a borrowed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<'a, T> Page<'a, T> {
    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    /// 0-based position of the first item of this page within the whole sequence.
    pub fn offset(&self) -> usize {
        self.page * self.page_size
    }
}

/// Slices page `page` out of `items`. The caller validates `page < total_pages`; an
/// out-of-range index yields an empty page rather than a panic.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let total = total_pages(items.len(), page_size);
    let start = page.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    Page {
        items: &items[start..end],
        page,
        page_size,
        total_pages: total,
    }
}
