use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Rule mapping a page index to the items shown on that page.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
pub enum PagingPolicy {
    /// One item per page.
    #[default]
    OnePerPage,
    /// Pairs of items; a trailing odd item gets a page of its own.
    TwoThenOne,
}

impl PagingPolicy {
    #[must_use]
    pub const fn items_per_page(self) -> usize {
        match self {
            Self::OnePerPage => 1,
            Self::TwoThenOne => 2,
        }
    }

    /// Number of pages needed for `item_count` items.
    ///
    /// ```
    /// # use exam_engine::PagingPolicy;
    /// assert_eq!(PagingPolicy::OnePerPage.page_count(6), 6);
    /// assert_eq!(PagingPolicy::TwoThenOne.page_count(6), 3);
    /// assert_eq!(PagingPolicy::TwoThenOne.page_count(5), 3);
    /// assert_eq!(PagingPolicy::TwoThenOne.page_count(0), 0);
    /// ```
    #[must_use]
    pub const fn page_count(self, item_count: usize) -> usize {
        item_count.div_ceil(self.items_per_page())
    }

    /// Item indices shown on `page`. Empty when `page` is out of range.
    ///
    /// ```
    /// # use exam_engine::PagingPolicy;
    /// assert_eq!(PagingPolicy::TwoThenOne.page_range(1, 5), 2..4);
    /// assert_eq!(PagingPolicy::TwoThenOne.page_range(2, 5), 4..5);
    /// assert!(PagingPolicy::OnePerPage.page_range(9, 5).is_empty());
    /// ```
    #[must_use]
    pub fn page_range(self, page: usize, item_count: usize) -> Range<usize> {
        let per_page = self.items_per_page();
        let start = page.saturating_mul(per_page).min(item_count);
        let end = start.saturating_add(per_page).min(item_count);
        start..end
    }
}

/// Bounded "current page" cursor over an ordered list of items.
///
/// The cursor only stores the page index; the page count and the items on
/// the current page are derived from the item list and the policy on every
/// call. `previous`/`next` clamp at the first and last page, so the index
/// always stays within `0..page_count` (or at `0` for an empty list).
///
/// ```
/// # use exam_engine::{PaginationCursor, PagingPolicy};
/// let mut cursor = PaginationCursor::new(vec!['a', 'b', 'c'], PagingPolicy::TwoThenOne);
/// assert_eq!(cursor.current_items(), &['a', 'b']);
/// cursor.next();
/// assert_eq!(cursor.current_items(), &['c']);
/// cursor.next();
/// assert_eq!(cursor.current_items(), &['c']);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationCursor<T> {
    items: Vec<T>,
    policy: PagingPolicy,
    index: usize,
}

impl<T> PaginationCursor<T> {
    /// Creates a cursor positioned on the first page.
    #[must_use]
    pub fn new(items: Vec<T>, policy: PagingPolicy) -> Self {
        Self {
            items,
            policy,
            index: 0,
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.policy.page_count(self.items.len())
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.page_count()
    }

    /// Moves to the previous page. Returns `false` if already on the first page.
    pub fn previous(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Moves to the next page. Returns `false` if already on the last page.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Items on the current page, in list order.
    #[must_use]
    pub fn current_items(&self) -> &[T] {
        &self.items[self.policy.page_range(self.index, self.items.len())]
    }

    /// Replaces the item list, clamping the index to the new last page.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.clamp_index();
    }

    /// Switches the paging policy, clamping the index to the new last page.
    pub fn set_policy(&mut self, policy: PagingPolicy) {
        self.policy = policy;
        self.clamp_index();
    }

    fn clamp_index(&mut self) {
        self.index = self.index.min(self.page_count().saturating_sub(1));
    }
}
