use super::super::model::{
    TableColumn, TableColumnKey, TableFilterSpec, TableSortDirection, TableSortState, TableValue,
    ValueExtractor, compare_values,
};
use super::super::state::{ResolvedState, clamp_displayed_page};
use tracing::trace;

/// Filtered, sorted and paged view over a record collection.
///
/// Every sequence holds indices into the caller's collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DerivedSlice {
    pub filtered: Vec<usize>,
    pub sorted: Vec<usize>,
    pub paged: Vec<usize>,
    pub total_count: usize,
    pub total_pages: usize,
    /// Displayed page after clamping.
    pub page: usize,
}

impl DerivedSlice {
    /// Records of the current page, in display order.
    pub fn rows<'r, R>(&self, records: &'r [R]) -> impl Iterator<Item = (usize, &'r R)> {
        self.paged
            .iter()
            .filter_map(move |&index| records.get(index).map(|record| (index, record)))
    }

    pub fn is_empty(&self) -> bool {
        self.paged.is_empty()
    }
}

/// Case-insensitive substring search over the text columns of a record.
#[derive(Debug, Clone)]
struct SearchMatcher {
    text_lower: String,
}

impl SearchMatcher {
    fn new(text: &str) -> Self {
        Self {
            text_lower: text.to_lowercase(),
        }
    }

    fn is_active(&self) -> bool {
        !self.text_lower.is_empty()
    }

    fn matches<R>(&self, record: &R, columns: &[TableColumn<R>]) -> bool {
        if !self.is_active() {
            return true;
        }
        columns.iter().any(|column| {
            column
                .value(record)
                .as_text()
                .is_some_and(|text| text.to_lowercase().contains(&self.text_lower))
        })
    }
}

/// Exact-match clause for one active filter.
struct FilterClause<'c, R> {
    selected: &'c str,
    extractor: Option<FieldExtractor<'c, R>>,
}

enum FieldExtractor<'c, R> {
    Own(&'c ValueExtractor<R>),
    Column(&'c TableColumn<R>),
}

impl<R> FieldExtractor<'_, R> {
    fn value(&self, record: &R) -> TableValue {
        match self {
            Self::Own(extractor) => extractor(record),
            Self::Column(column) => column.value(record),
        }
    }
}

impl<R> FilterClause<'_, R> {
    fn matches(&self, record: &R) -> bool {
        // A filter with no field to read can never be satisfied.
        self.extractor
            .as_ref()
            .is_some_and(|extractor| extractor.value(record).to_filter_string() == self.selected)
    }
}

fn compile_filter_clauses<'c, R>(
    active: impl Iterator<Item = (&'c TableColumnKey, &'c String)>,
    columns: &'c [TableColumn<R>],
    filters: &'c [TableFilterSpec<R>],
) -> Vec<FilterClause<'c, R>> {
    active
        .filter(|(_, selected)| !selected.is_empty())
        .map(|(key, selected)| {
            let extractor = filters
                .iter()
                .find(|filter| &filter.key == key)
                .and_then(|filter| filter.own_extractor())
                .map(FieldExtractor::Own)
                .or_else(|| {
                    columns
                        .iter()
                        .find(|column| &column.key == key)
                        .map(FieldExtractor::Column)
                });
            FilterClause {
                selected: selected.as_str(),
                extractor,
            }
        })
        .collect()
}

/// Indices of records matching the search text and every active filter.
pub fn filter_rows<'c, R>(
    records: &[R],
    columns: &'c [TableColumn<R>],
    filters: &'c [TableFilterSpec<R>],
    search_text: &str,
    filter_values: impl IntoIterator<Item = (&'c TableColumnKey, &'c String)>,
) -> Vec<usize> {
    let search = SearchMatcher::new(search_text);
    let clauses = compile_filter_clauses(filter_values.into_iter(), columns, filters);

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            search.matches(*record, columns) && clauses.iter().all(|clause| clause.matches(*record))
        })
        .map(|(index, _)| index)
        .collect()
}

struct RowEntry {
    index: usize,
    sort_key: TableValue,
}

/// Orders `rows` by the column at `sort.key`. Ties keep their input order.
///
/// A key that matches no column leaves the order unchanged.
pub fn sort_rows<R>(
    records: &[R],
    columns: &[TableColumn<R>],
    rows: Vec<usize>,
    sort: &TableSortState,
) -> Vec<usize> {
    let Some(key) = &sort.key else {
        return rows;
    };
    let Some(column) = columns.iter().find(|column| &column.key == key) else {
        trace!("sort key {key} matches no column, keeping collection order");
        return rows;
    };

    let mut entries: Vec<RowEntry> = rows
        .into_iter()
        .filter_map(|index| {
            records.get(index).map(|record| RowEntry {
                index,
                sort_key: column.value(record),
            })
        })
        .collect();

    let direction = sort.direction;
    // Stable, so equal keys keep their input order.
    entries.sort_by(|left, right| {
        let ord = compare_values(&left.sort_key, &right.sort_key);
        match direction {
            TableSortDirection::Ascending => ord,
            TableSortDirection::Descending => ord.reverse(),
        }
    });

    entries.into_iter().map(|entry| entry.index).collect()
}

/// Number of pages needed for `count` rows. Zero rows need zero pages.
#[must_use]
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Rows of the 1-based `page`. Out-of-range pages yield an empty slice.
#[must_use]
pub fn page_rows(sorted: &[usize], page: usize, page_size: usize) -> Vec<usize> {
    let page_size = page_size.max(1);
    let Some(start) = page.checked_sub(1).and_then(|p| p.checked_mul(page_size)) else {
        return Vec::new();
    };
    sorted.iter().skip(start).take(page_size).copied().collect()
}

/// Client mode: derive the visible slice from the full collection.
pub fn build_derived_slice<R>(
    records: &[R],
    columns: &[TableColumn<R>],
    filters: &[TableFilterSpec<R>],
    resolved: &ResolvedState,
) -> DerivedSlice {
    let filtered = filter_rows(
        records,
        columns,
        filters,
        resolved.search_text.value(),
        resolved.active_filters(),
    );
    let sorted = sort_rows(records, columns, filtered.clone(), resolved.sort.value());
    let total_count = sorted.len();

    let (paged, total_pages, page) = if resolved.paginated {
        let page_size = *resolved.page_size.value();
        let total_pages = total_pages(total_count, page_size);
        let page = clamp_displayed_page(*resolved.page.value(), total_pages);
        (page_rows(&sorted, page, page_size), total_pages, page)
    } else {
        (sorted.clone(), usize::from(total_count > 0), 1)
    };

    DerivedSlice {
        filtered,
        sorted,
        paged,
        total_count,
        total_pages,
        page,
    }
}

/// Server mode: the collection already is the current page.
pub fn passthrough_slice(record_count: usize, resolved: &ResolvedState) -> DerivedSlice {
    let rows: Vec<usize> = (0..record_count).collect();
    let total_count = resolved.total_items.unwrap_or(record_count);
    let (total_pages, page) = if resolved.paginated {
        let total_pages = total_pages(total_count, *resolved.page_size.value());
        (
            total_pages,
            clamp_displayed_page(*resolved.page.value(), total_pages),
        )
    } else {
        (usize::from(total_count > 0), 1)
    };

    DerivedSlice {
        filtered: rows.clone(),
        sorted: rows.clone(),
        paged: rows,
        total_count,
        total_pages,
        page,
    }
}
