pub mod controller;
pub mod layout;
pub mod message;
pub mod model;
pub mod slice;
pub mod state;
pub mod view;

pub use controller::{PreparedTable, TableController};
pub use layout::{
    BodyRow, DisplayCell, HeaderCell, MobileCard, PaginationControls, TableBody, TableLayout,
    build_layout, build_mobile_cards, display_cell,
};
pub use message::TableMessage;
pub use model::{
    CellRenderer, ColumnAlign, EmptyState, TableCell, TableColumn, TableColumnKey,
    TableFilterKind, TableFilterOption, TableFilterSpec, TableMode, TableSortDirection,
    TableSortState, TableValue, ValueExtractor, compare_values, sort_indicator,
    sort_spec_on_click,
};
pub use slice::{
    DerivedSlice, PAGE_WINDOW, PaginationPosition, PaginationState, build_derived_slice,
    filter_rows, page_range, page_rows, page_size_choices, page_window, passthrough_slice,
    sort_rows, total_pages,
};
pub use state::{
    ChangeCallback, Controlled, DEFAULT_PAGE_SIZE, FieldSource, FilterValues, ResolvedState,
    StateChange, TableProps, ViewState, clamp_displayed_page, resolve_state,
};
pub use view::draw_table;

#[cfg(test)]
mod tests;
