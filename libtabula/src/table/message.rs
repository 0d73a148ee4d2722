use super::model::TableColumnKey;

/// A user gesture on a table, expressed as a requested state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableMessage {
    SetSearch(String),
    /// An empty value clears the filter.
    SetFilter {
        key: TableColumnKey,
        value: String,
    },
    /// Clears the search text and every filter.
    ClearFilters,
    /// Header click on the column with this key.
    ToggleSort(TableColumnKey),
    SetPage(usize),
    PreviousPage,
    NextPage,
    SetPageSize(usize),
    /// Click on the record at this index of the collection.
    RowClicked(usize),
    EmptyStateAction,
}
