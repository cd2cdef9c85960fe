/// Number of pages needed for `total` items at `limit` per page. Zero items
/// means zero pages; a zero limit is treated as a single page of everything.
pub fn total_pages(total: u64, limit: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    if limit == 0 {
        return 1;
    }
    u32::try_from(total.div_ceil(u64::from(limit))).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

const MAX_VISIBLE: u32 = 5;

/// Page buttons to show under the list. Empty when there is nothing to
/// paginate; otherwise the first and last page are always present and the
/// current page keeps its neighbours.
pub fn page_window(page: u32, total_pages: u32) -> Vec<PageItem> {
    use PageItem::{Ellipsis, Page};

    if total_pages <= 1 {
        return Vec::new();
    }
    if total_pages <= MAX_VISIBLE {
        return (1..=total_pages).map(Page).collect();
    }

    let mut items = Vec::with_capacity(7);
    if page <= 3 {
        items.extend((1..=4).map(Page));
        items.push(Ellipsis);
        items.push(Page(total_pages));
    } else if page >= total_pages - 2 {
        items.push(Page(1));
        items.push(Ellipsis);
        items.extend((total_pages - 3..=total_pages).map(Page));
    } else {
        items.push(Page(1));
        items.push(Ellipsis);
        items.extend((page - 1..=page + 1).map(Page));
        items.push(Ellipsis);
        items.push(Page(total_pages));
    }
    items
}
