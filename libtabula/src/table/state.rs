use super::model::{EmptyState, TableColumnKey, TableMode, TableSortDirection, TableSortState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Selected value per filter key. Keys with an empty value are inactive.
pub type FilterValues = BTreeMap<TableColumnKey, String>;

/// Mutable state of a list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub search_text: String,
    pub filter_values: FilterValues,
    pub sort_key: Option<TableColumnKey>,
    pub sort_direction: TableSortDirection,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

pub const DEFAULT_PAGE_SIZE: usize = 10;

impl Default for ViewState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

/// A single change to a [`ViewState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    Search(String),
    Filter { key: TableColumnKey, value: String },
    ClearFilters,
    Sort(TableSortState),
    Page(usize),
    PageSize(usize),
}

impl ViewState {
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            search_text: String::new(),
            filter_values: FilterValues::new(),
            sort_key: None,
            sort_direction: TableSortDirection::Ascending,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    #[must_use]
    pub fn sort(&self) -> TableSortState {
        TableSortState {
            key: self.sort_key.clone(),
            direction: self.sort_direction,
        }
    }

    /// Returns the state after `change`. Narrowing or widening the record set
    /// (search, filters, page size) starts over at page 1.
    #[must_use]
    pub fn apply(&self, change: StateChange) -> Self {
        let mut next = self.clone();
        match change {
            StateChange::Search(text) => {
                next.search_text = text;
                next.page = 1;
            }
            StateChange::Filter { key, value } => {
                if value.is_empty() {
                    next.filter_values.remove(&key);
                } else {
                    next.filter_values.insert(key, value);
                }
                next.page = 1;
            }
            StateChange::ClearFilters => {
                next.search_text.clear();
                next.filter_values.clear();
                next.page = 1;
            }
            StateChange::Sort(sort) => {
                next.sort_key = sort.key;
                next.sort_direction = sort.direction;
            }
            StateChange::Page(page) => next.page = page.max(1),
            StateChange::PageSize(page_size) => {
                next.page_size = page_size.max(1);
                next.page = 1;
            }
        }
        next
    }
}

pub type ChangeCallback<'a, E> = Box<dyn FnMut(E) + 'a>;

/// The caller's offer for one state field.
///
/// The field is caller-owned only when both a value and a change callback are
/// supplied. A callback without a value observes changes to the internal value.
pub struct Controlled<'a, T, E = T> {
    value: Option<T>,
    on_change: Option<ChangeCallback<'a, E>>,
}

impl<T, E> Default for Controlled<'_, T, E> {
    fn default() -> Self {
        Self {
            value: None,
            on_change: None,
        }
    }
}

impl<'a, T, E> Controlled<'a, T, E> {
    /// Value plus change callback: the caller owns the field.
    pub fn new(value: T, on_change: impl FnMut(E) + 'a) -> Self {
        Self {
            value: Some(value),
            on_change: Some(Box::new(on_change)),
        }
    }

    /// A value without callback. Not enough to take ownership.
    pub fn value_only(value: T) -> Self {
        Self {
            value: Some(value),
            on_change: None,
        }
    }

    /// A callback observing the internally owned value.
    pub fn observer(on_change: impl FnMut(E) + 'a) -> Self {
        Self {
            value: None,
            on_change: Some(Box::new(on_change)),
        }
    }

    #[must_use]
    pub fn is_caller_owned(&self) -> bool {
        self.value.is_some() && self.on_change.is_some()
    }

    pub fn has_callback(&self) -> bool {
        self.on_change.is_some()
    }

    /// Invokes the callback, if any. Returns whether one was invoked.
    pub fn notify(&mut self, event: E) -> bool {
        match self.on_change.as_mut() {
            Some(on_change) => {
                on_change(event);
                true
            }
            None => false,
        }
    }

    fn resolve(&self, field: &'static str, internal: &T) -> FieldSource<T>
    where
        T: Clone,
    {
        match (&self.value, self.on_change.is_some()) {
            (Some(value), true) => FieldSource::Caller(value.clone()),
            (Some(_), false) => {
                debug!("{field} supplied without a change callback, using internal value");
                FieldSource::Owned(internal.clone())
            }
            (None, _) => FieldSource::Owned(internal.clone()),
        }
    }
}

impl<T: fmt::Debug, E> fmt::Debug for Controlled<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controlled")
            .field("value", &self.value)
            .field("on_change", &self.on_change.as_ref().map(|_| "..."))
            .finish()
    }
}

/// Which side is authoritative for a field in the current render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSource<T> {
    Owned(T),
    Caller(T),
}

impl<T> FieldSource<T> {
    pub fn value(&self) -> &T {
        match self {
            Self::Owned(value) | Self::Caller(value) => value,
        }
    }

    pub fn is_caller(&self) -> bool {
        matches!(self, Self::Caller(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FieldSource<U> {
        match self {
            Self::Owned(value) => FieldSource::Owned(f(value)),
            Self::Caller(value) => FieldSource::Caller(f(value)),
        }
    }
}

/// Per-render configuration supplied by the calling view.
pub struct TableProps<'a, R> {
    pub mode: TableMode,
    pub search: Controlled<'a, String>,
    pub filters: Controlled<'a, FilterValues, (TableColumnKey, String)>,
    pub sort: Controlled<'a, TableSortState>,
    pub page: Controlled<'a, usize>,
    pub page_size: Controlled<'a, usize>,
    /// Total number of records on the server. Ignored in client mode.
    pub total_items: Option<usize>,
    pub paginated: bool,
    pub loading: bool,
    pub empty_state: EmptyState,
    pub on_row_click: Option<Box<dyn FnMut(&R) + 'a>>,
    pub on_empty_action: Option<Box<dyn FnMut() + 'a>>,
}

impl<R> Default for TableProps<'_, R> {
    fn default() -> Self {
        Self::new(TableMode::Client)
    }
}

impl<'a, R> TableProps<'a, R> {
    #[must_use]
    pub fn new(mode: TableMode) -> Self {
        Self {
            mode,
            search: Controlled::default(),
            filters: Controlled::default(),
            sort: Controlled::default(),
            page: Controlled::default(),
            page_size: Controlled::default(),
            total_items: None,
            paginated: true,
            loading: false,
            empty_state: EmptyState::new("No records"),
            on_row_click: None,
            on_empty_action: None,
        }
    }

    #[must_use]
    pub fn search(mut self, search: Controlled<'a, String>) -> Self {
        self.search = search;
        self
    }

    #[must_use]
    pub fn filters(
        mut self,
        filters: Controlled<'a, FilterValues, (TableColumnKey, String)>,
    ) -> Self {
        self.filters = filters;
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: Controlled<'a, TableSortState>) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn page(mut self, page: Controlled<'a, usize>) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub fn page_size(mut self, page_size: Controlled<'a, usize>) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn total_items(mut self, total_items: usize) -> Self {
        self.total_items = Some(total_items);
        self
    }

    #[must_use]
    pub fn paginated(mut self, paginated: bool) -> Self {
        self.paginated = paginated;
        self
    }

    #[must_use]
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    #[must_use]
    pub fn empty_state(mut self, empty_state: EmptyState) -> Self {
        self.empty_state = empty_state;
        self
    }

    #[must_use]
    pub fn on_row_click(mut self, on_row_click: impl FnMut(&R) + 'a) -> Self {
        self.on_row_click = Some(Box::new(on_row_click));
        self
    }

    #[must_use]
    pub fn on_empty_action(mut self, on_empty_action: impl FnMut() + 'a) -> Self {
        self.on_empty_action = Some(Box::new(on_empty_action));
        self
    }
}

impl<R> fmt::Debug for TableProps<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableProps")
            .field("mode", &self.mode)
            .field("search", &self.search)
            .field("filters", &self.filters)
            .field("sort", &self.sort)
            .field("page", &self.page)
            .field("page_size", &self.page_size)
            .field("total_items", &self.total_items)
            .field("paginated", &self.paginated)
            .field("loading", &self.loading)
            .field("empty_state", &self.empty_state)
            .finish_non_exhaustive()
    }
}

/// The single authoritative view state for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedState {
    pub mode: TableMode,
    pub search_text: FieldSource<String>,
    pub filter_values: FieldSource<FilterValues>,
    pub sort: FieldSource<TableSortState>,
    /// Requested page, before clamping against the page count.
    pub page: FieldSource<usize>,
    pub page_size: FieldSource<usize>,
    pub total_items: Option<usize>,
    pub paginated: bool,
}

impl ResolvedState {
    /// Plain view of the resolved values.
    #[must_use]
    pub fn view(&self) -> ViewState {
        let sort = self.sort.value();
        ViewState {
            search_text: self.search_text.value().clone(),
            filter_values: self.filter_values.value().clone(),
            sort_key: sort.key.clone(),
            sort_direction: sort.direction,
            page: *self.page.value(),
            page_size: *self.page_size.value(),
        }
    }

    /// Filter entries with a non-empty selected value.
    pub fn active_filters(&self) -> impl Iterator<Item = (&TableColumnKey, &String)> {
        self.filter_values
            .value()
            .iter()
            .filter(|(_, value)| !value.is_empty())
    }
}

/// Merges the internal state with the caller's offers into one resolved state.
///
/// Pure: reads its inputs only and is called once per render.
pub fn resolve_state<R>(internal: &ViewState, props: &TableProps<'_, R>) -> ResolvedState {
    ResolvedState {
        mode: props.mode,
        search_text: props.search.resolve("search text", &internal.search_text),
        filter_values: props.filters.resolve("filter values", &internal.filter_values),
        sort: props.sort.resolve("sort", &internal.sort()),
        page: props
            .page
            .resolve("page", &internal.page)
            .map(|page| page.max(1)),
        page_size: props
            .page_size
            .resolve("page size", &internal.page_size)
            .map(|page_size| page_size.max(1)),
        total_items: props.total_items,
        paginated: props.paginated,
    }
}

/// Page actually shown: `requested` clamped into `1..=max(total_pages, 1)`.
///
/// Never written back to whoever owns the page.
#[must_use]
pub fn clamp_displayed_page(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}
