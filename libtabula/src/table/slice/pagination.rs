use std::ops::RangeInclusive;

use itertools::Itertools;

/// Maximum number of numbered page buttons.
pub const PAGE_WINDOW: usize = 5;

/// Where the current page sits within the page range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaginationPosition {
    /// At most one page; both directions disabled.
    Single,
    First,
    Middle,
    Last,
}

/// Bounded page cursor behind the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaginationState {
    pub page: usize,
    pub total_pages: usize,
}

impl PaginationState {
    /// `page` is clamped into `1..=max(total_pages, 1)`.
    #[must_use]
    pub fn new(page: usize, total_pages: usize) -> Self {
        Self {
            page: page.clamp(1, total_pages.max(1)),
            total_pages,
        }
    }

    #[must_use]
    pub fn position(&self) -> PaginationPosition {
        if self.total_pages <= 1 {
            PaginationPosition::Single
        } else if self.page == 1 {
            PaginationPosition::First
        } else if self.page >= self.total_pages {
            PaginationPosition::Last
        } else {
            PaginationPosition::Middle
        }
    }

    pub fn can_go_previous(&self) -> bool {
        matches!(
            self.position(),
            PaginationPosition::Middle | PaginationPosition::Last
        )
    }

    pub fn can_go_next(&self) -> bool {
        matches!(
            self.position(),
            PaginationPosition::First | PaginationPosition::Middle
        )
    }

    /// Page reached with "Previous", never below 1.
    #[must_use]
    pub fn previous(&self) -> usize {
        self.page.saturating_sub(1).max(1)
    }

    /// Page reached with "Next", never above the last page.
    #[must_use]
    pub fn next(&self) -> usize {
        (self.page + 1).min(self.total_pages.max(1))
    }

    /// Page reached by clicking a numbered button: the literal number.
    #[must_use]
    pub fn go_to(&self, page: usize) -> usize {
        page
    }

    /// Numbered pages to show around the current page.
    #[must_use]
    pub fn window(&self) -> RangeInclusive<usize> {
        page_window(self.page, self.total_pages)
    }
}

/// Up to [`PAGE_WINDOW`] page numbers, centred on `page` where possible and
/// pinned to the first or last pages near either end.
#[must_use]
pub fn page_window(page: usize, total_pages: usize) -> RangeInclusive<usize> {
    let half = PAGE_WINDOW / 2;
    if total_pages <= PAGE_WINDOW {
        1..=total_pages
    } else if page <= half + 1 {
        1..=PAGE_WINDOW
    } else if page >= total_pages - half {
        (total_pages - PAGE_WINDOW + 1)..=total_pages
    } else {
        (page - half)..=(page + half)
    }
}

/// 1-based positions of the first and last row on `page`, or `None` when there are no rows.
#[must_use]
pub fn page_range(page: usize, page_size: usize, total_count: usize) -> Option<(usize, usize)> {
    if total_count == 0 {
        return None;
    }
    let page_size = page_size.max(1);
    let from = (page.max(1) - 1).saturating_mul(page_size) + 1;
    if from > total_count {
        return None;
    }
    let to = from.saturating_add(page_size - 1).min(total_count);
    Some((from, to))
}

/// Page sizes offered by the selector: the configured ones plus `current`, ascending.
#[must_use]
pub fn page_size_choices(configured: &[usize], current: usize) -> Vec<usize> {
    configured
        .iter()
        .copied()
        .chain(std::iter::once(current))
        .filter(|&size| size > 0)
        .sorted_unstable()
        .dedup()
        .collect()
}
