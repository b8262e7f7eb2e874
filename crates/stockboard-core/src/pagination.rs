/// Rows per page of the insider-transactions table.
pub const INSIDER_PAGE_SIZE: usize = 10;

/// One 1-based page of a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<'a, T> Page<'a, T> {
    /// Requested page clamped to `[1, total_pages]`; an empty slice has zero
    /// pages and always yields page 1 with no items.
    pub fn of(items: &'a [T], page: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = items.len().div_ceil(per_page);
        let page = page.clamp(1, total_pages.max(1));
        let start = ((page - 1) * per_page).min(items.len());
        let end = (start + per_page).min(items.len());

        Self {
            items: &items[start..end],
            page,
            total_pages,
            total_items: items.len(),
        }
    }

    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_clamped() {
        let rows: Vec<u32> = (1..=23).collect();

        let last = Page::of(&rows, 9, INSIDER_PAGE_SIZE);
        assert_eq!(last.page, 3);
        assert_eq!(last.total_pages, 3);
        assert_eq!(last.items, [21, 22, 23]);
        assert!(last.has_previous());
        assert!(!last.has_next());

        let first = Page::of(&rows, 0, INSIDER_PAGE_SIZE);
        assert_eq!(first.page, 1);
        assert_eq!(first.items.len(), 10);
        assert!(first.has_next());
    }

    #[test]
    fn empty_input_yields_empty_first_page() {
        let rows: Vec<u32> = Vec::new();
        let page = Page::of(&rows, 4, INSIDER_PAGE_SIZE);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
        assert!(!page.has_next());
    }
}
