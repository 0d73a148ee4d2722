use super::message::TableMessage;
use super::model::{TableColumn, TableFilterSpec, TableMode, sort_spec_on_click};
use super::slice::{DerivedSlice, PaginationState, build_derived_slice, passthrough_slice};
use super::state::{
    Controlled, ResolvedState, StateChange, TableProps, ViewState, resolve_state,
};
use crate::config::TableConfig;
use tracing::debug;

/// Resolved state and derived slice for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTable {
    pub resolved: ResolvedState,
    pub slice: DerivedSlice,
}

impl PreparedTable {
    #[must_use]
    pub fn pagination(&self) -> PaginationState {
        PaginationState::new(self.slice.page, self.slice.total_pages)
    }
}

/// Owns the internal view state of one list view and routes its intents.
///
/// Fields the caller owns (see [`Controlled`]) are never written here; intents
/// touching them are forwarded to the caller's callbacks instead.
pub struct TableController<R> {
    state: ViewState,
    columns: Vec<TableColumn<R>>,
    filters: Vec<TableFilterSpec<R>>,
}

impl<R> TableController<R> {
    #[must_use]
    pub fn new(columns: Vec<TableColumn<R>>, filters: Vec<TableFilterSpec<R>>) -> Self {
        Self {
            state: ViewState::default(),
            columns,
            filters,
        }
    }

    #[must_use]
    pub fn with_config(
        columns: Vec<TableColumn<R>>,
        filters: Vec<TableFilterSpec<R>>,
        config: &TableConfig,
    ) -> Self {
        Self::new(columns, filters).with_state(ViewState::with_page_size(config.default_page_size))
    }

    #[must_use]
    pub fn with_state(mut self, state: ViewState) -> Self {
        self.state = state;
        self
    }

    /// Internally held state. Caller-owned fields keep their last internal value here.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn columns(&self) -> &[TableColumn<R>] {
        &self.columns
    }

    pub fn filters(&self) -> &[TableFilterSpec<R>] {
        &self.filters
    }

    /// Resolves the state and derives the visible slice. Call once per render.
    pub fn prepare(&self, records: &[R], props: &TableProps<'_, R>) -> PreparedTable {
        let resolved = resolve_state(&self.state, props);
        let slice = match resolved.mode {
            TableMode::Client => {
                build_derived_slice(records, &self.columns, &self.filters, &resolved)
            }
            TableMode::Server => passthrough_slice(records.len(), &resolved),
        };
        PreparedTable { resolved, slice }
    }

    /// Routes one intent to the caller or to the internal state.
    ///
    /// New values are computed from the state displayed in `prepared`.
    pub fn dispatch(
        &mut self,
        message: TableMessage,
        prepared: &PreparedTable,
        records: &[R],
        props: &mut TableProps<'_, R>,
    ) {
        let resolved = &prepared.resolved;
        debug!(?message, mode = %resolved.mode, "table intent");

        match message {
            TableMessage::SetSearch(text) => {
                if &text == resolved.search_text.value() {
                    return;
                }
                self.route(
                    resolved.search_text.is_caller(),
                    &mut props.search,
                    text.clone(),
                    StateChange::Search(text),
                );
                self.restart_paging(resolved, props);
            }
            TableMessage::SetFilter { key, value } => {
                let current = resolved
                    .filter_values
                    .value()
                    .get(&key)
                    .map_or("", String::as_str);
                if current == value {
                    return;
                }
                self.route(
                    resolved.filter_values.is_caller(),
                    &mut props.filters,
                    (key.clone(), value.clone()),
                    StateChange::Filter { key, value },
                );
                self.restart_paging(resolved, props);
            }
            TableMessage::ClearFilters => {
                let search_active = !resolved.search_text.value().is_empty();
                let active_keys: Vec<_> = resolved
                    .active_filters()
                    .map(|(key, _)| key.clone())
                    .collect();
                if !search_active && active_keys.is_empty() {
                    return;
                }
                if search_active {
                    self.route(
                        resolved.search_text.is_caller(),
                        &mut props.search,
                        String::new(),
                        StateChange::Search(String::new()),
                    );
                }
                for key in active_keys {
                    self.route(
                        resolved.filter_values.is_caller(),
                        &mut props.filters,
                        (key.clone(), String::new()),
                        StateChange::Filter {
                            key,
                            value: String::new(),
                        },
                    );
                }
                self.restart_paging(resolved, props);
            }
            TableMessage::ToggleSort(key) => {
                let current = resolved.sort.value();
                let sort = sort_spec_on_click(current, &self.columns, &key);
                if &sort == current {
                    debug!("column {key} is not sortable");
                    return;
                }
                self.route(
                    resolved.sort.is_caller(),
                    &mut props.sort,
                    sort.clone(),
                    StateChange::Sort(sort),
                );
            }
            TableMessage::SetPage(page) => {
                let pagination = prepared.pagination();
                if page == 0 || page > pagination.total_pages.max(1) {
                    debug!(page, total_pages = pagination.total_pages, "page out of range");
                    return;
                }
                self.go_to_page(pagination.go_to(page), prepared, props);
            }
            TableMessage::PreviousPage => {
                let pagination = prepared.pagination();
                if pagination.can_go_previous() {
                    self.go_to_page(pagination.previous(), prepared, props);
                }
            }
            TableMessage::NextPage => {
                let pagination = prepared.pagination();
                if pagination.can_go_next() {
                    self.go_to_page(pagination.next(), prepared, props);
                }
            }
            TableMessage::SetPageSize(page_size) => {
                if page_size == 0 || &page_size == resolved.page_size.value() {
                    return;
                }
                self.route(
                    resolved.page_size.is_caller(),
                    &mut props.page_size,
                    page_size,
                    StateChange::PageSize(page_size),
                );
                self.restart_paging(resolved, props);
            }
            TableMessage::RowClicked(index) => {
                if let (Some(record), Some(on_row_click)) =
                    (records.get(index), props.on_row_click.as_mut())
                {
                    on_row_click(record);
                }
            }
            TableMessage::EmptyStateAction => {
                if let Some(on_empty_action) = props.on_empty_action.as_mut() {
                    on_empty_action();
                }
            }
        }
    }

    fn route<T, E>(
        &mut self,
        caller_owned: bool,
        control: &mut Controlled<'_, T, E>,
        event: E,
        change: StateChange,
    ) {
        if !caller_owned {
            self.state = self.state.apply(change);
        }
        control.notify(event);
    }

    fn go_to_page(&mut self, page: usize, prepared: &PreparedTable, props: &mut TableProps<'_, R>) {
        if page == *prepared.resolved.page.value() {
            return;
        }
        self.route(
            prepared.resolved.page.is_caller(),
            &mut props.page,
            page,
            StateChange::Page(page),
        );
    }

    /// After the record set changed shape, an internally owned page starts over at 1.
    fn restart_paging(&mut self, resolved: &ResolvedState, props: &mut TableProps<'_, R>) {
        if resolved.page.is_caller() {
            return;
        }
        if self.state.page != 1 {
            self.state = self.state.apply(StateChange::Page(1));
        }
        if *resolved.page.value() != 1 {
            props.page.notify(1);
        }
    }
}

impl<R> std::fmt::Debug for TableController<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableController")
            .field("state", &self.state)
            .field("columns", &self.columns)
            .field("filters", &self.filters)
            .finish()
    }
}
