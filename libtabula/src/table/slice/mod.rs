mod builder;
mod pagination;

pub use builder::{
    DerivedSlice, build_derived_slice, filter_rows, page_rows, passthrough_slice, sort_rows,
    total_pages,
};
pub use pagination::{
    PAGE_WINDOW, PaginationPosition, PaginationState, page_range, page_size_choices, page_window,
};
