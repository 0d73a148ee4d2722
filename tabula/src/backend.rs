//! In-process stand-in for a catalog service that filters, sorts and pages on
//! its side and only ever hands out one page.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use libtabula::table::{
    StateChange, TableColumn, TableFilterSpec, ViewState, filter_rows, page_rows, sort_rows,
};
use tracing::debug;

use crate::catalog::{CatalogItem, catalog_columns, catalog_filters};

/// One answered query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogPage {
    pub items: Vec<CatalogItem>,
    pub total_items: usize,
}

pub struct SimulatedBackend {
    items: Vec<CatalogItem>,
    columns: Vec<TableColumn<CatalogItem>>,
    filters: Vec<TableFilterSpec<CatalogItem>>,
    query: ViewState,
    changes: Receiver<StateChange>,
    latency: Duration,
    ready_at: Option<Instant>,
    page: CatalogPage,
}

impl SimulatedBackend {
    /// Returns the backend and the sender the table view reports its intents on.
    pub fn new(
        items: Vec<CatalogItem>,
        page_size: usize,
        latency: Duration,
    ) -> (Self, Sender<StateChange>) {
        let (sender, changes) = mpsc::channel();
        let mut backend = Self {
            items,
            columns: catalog_columns(),
            filters: catalog_filters(),
            query: ViewState::with_page_size(page_size),
            changes,
            latency,
            ready_at: None,
            page: CatalogPage::default(),
        };
        backend.page = backend.answer();
        (backend, sender)
    }

    /// Query state the backend currently serves.
    pub fn query(&self) -> &ViewState {
        &self.query
    }

    pub fn page(&self) -> &CatalogPage {
        &self.page
    }

    pub fn is_loading(&self) -> bool {
        self.ready_at.is_some()
    }

    /// Applies pending intents and answers the query once the latency has passed.
    /// Returns whether the backend is still loading.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while let Ok(change) = self.changes.try_recv() {
            debug!(?change, "catalog query change");
            self.query = self.query.apply(change);
            changed = true;
        }
        if changed {
            self.ready_at = Some(now + self.latency);
        }

        if let Some(ready_at) = self.ready_at
            && now >= ready_at
        {
            self.page = self.answer();
            self.ready_at = None;
        }
        self.is_loading()
    }

    fn answer(&self) -> CatalogPage {
        let filtered = filter_rows(
            &self.items,
            &self.columns,
            &self.filters,
            &self.query.search_text,
            &self.query.filter_values,
        );
        let total_items = filtered.len();
        let sorted = sort_rows(&self.items, &self.columns, filtered, &self.query.sort());
        let items = page_rows(&sorted, self.query.page, self.query.page_size)
            .into_iter()
            .filter_map(|index| self.items.get(index).cloned())
            .collect();
        CatalogPage { items, total_items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_items;
    use libtabula::table::{TableSortDirection, TableSortState};
    use test_log::test;

    fn backend(count: usize) -> (SimulatedBackend, Sender<StateChange>) {
        SimulatedBackend::new(sample_items(count), 10, Duration::ZERO)
    }

    #[test]
    fn first_page_is_answered_up_front() {
        let (backend, _sender) = backend(95);
        assert_eq!(backend.page().total_items, 95);
        assert_eq!(backend.page().items.len(), 10);
        assert_eq!(backend.page().items[0].sku, "SKU-0001");
        assert!(!backend.is_loading());
    }

    #[test]
    fn page_changes_are_served() {
        let (mut backend, sender) = backend(95);
        sender.send(StateChange::Page(10)).expect("send");
        assert!(!backend.poll(Instant::now()));

        assert_eq!(backend.query().page, 10);
        assert_eq!(backend.page().items.len(), 5);
        assert_eq!(backend.page().items[0].sku, "SKU-0091");
    }

    #[test]
    fn search_restarts_at_the_first_page() {
        let (mut backend, sender) = backend(95);
        sender.send(StateChange::Page(3)).expect("send");
        sender
            .send(StateChange::Search("backpack".into()))
            .expect("send");
        backend.poll(Instant::now());

        assert_eq!(backend.query().page, 1);
        assert!(backend.page().total_items < 95);
        assert!(
            backend
                .page()
                .items
                .iter()
                .all(|item| item.name.contains("Backpack"))
        );
    }

    #[test]
    fn sort_is_applied_before_paging() {
        let (mut backend, sender) = backend(40);
        sender
            .send(StateChange::Sort(TableSortState::by(
                "price",
                TableSortDirection::Descending,
            )))
            .expect("send");
        backend.poll(Instant::now());

        let top = backend.page().items[0].price;
        assert!(sample_items(40).iter().all(|item| item.price <= top));
    }

    #[test]
    fn latency_keeps_the_previous_page_while_loading() {
        let (mut backend, sender) =
            SimulatedBackend::new(sample_items(30), 10, Duration::from_millis(200));
        let start = Instant::now();
        sender.send(StateChange::Page(2)).expect("send");

        assert!(backend.poll(start));
        assert_eq!(backend.page().items[0].sku, "SKU-0001");

        assert!(!backend.poll(start + Duration::from_millis(250)));
        assert_eq!(backend.page().items[0].sku, "SKU-0011");
    }
}
