use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use libtabula::config::TabulaConfig;
use libtabula::logs::{LogMessage, draw_log_window, log_table};
use libtabula::table::{
    Controlled, StateChange, TableColumnKey, TableController, TableMessage, TableMode,
    TableProps, draw_table,
};
use libtabula::try_log_error;
use tracing::info;

use crate::backend::SimulatedBackend;
use crate::catalog::{CatalogItem, catalog_columns, catalog_empty_state, catalog_filters};

/// The server-mode list: the backend owns every piece of view state.
struct ServerCatalog {
    table: TableController<CatalogItem>,
    backend: SimulatedBackend,
    sender: Sender<StateChange>,
}

pub struct TabulaApp {
    config: TabulaConfig,
    mode: TableMode,
    items: Vec<CatalogItem>,
    client: TableController<CatalogItem>,
    server: ServerCatalog,
    log_table: TableController<LogMessage>,
    show_logs: bool,
    selected: Option<String>,
}

/// Callback forwarding a caller-owned field change to the backend.
fn forward<E>(
    sender: &Sender<StateChange>,
    to_change: impl Fn(E) -> StateChange,
) -> impl FnMut(E) {
    let sender = sender.clone();
    move |event| {
        try_log_error!(
            sender.send(to_change(event)),
            "Failed to reach the catalog backend"
        );
    }
}

impl TabulaApp {
    pub fn new(
        config: TabulaConfig,
        mode: TableMode,
        items: Vec<CatalogItem>,
        latency: Duration,
    ) -> Self {
        let (backend, sender) =
            SimulatedBackend::new(items.clone(), config.table.default_page_size, latency);
        Self {
            client: TableController::with_config(
                catalog_columns(),
                catalog_filters(),
                &config.table,
            ),
            server: ServerCatalog {
                table: TableController::with_config(
                    catalog_columns(),
                    catalog_filters(),
                    &config.table,
                ),
                backend,
                sender,
            },
            log_table: log_table(),
            config,
            mode,
            items,
            show_logs: false,
            selected: None,
        }
    }

    fn draw_client(&mut self, ui: &mut egui::Ui) {
        let mut selected = None;
        let mut clear_requested = false;
        {
            let mut props = TableProps::new(TableMode::Client)
                .empty_state(catalog_empty_state())
                .on_row_click(|item: &CatalogItem| selected = Some(item.sku.clone()))
                .on_empty_action(|| clear_requested = true);
            draw_table(
                ui,
                "client_catalog",
                &mut self.client,
                &self.items,
                &mut props,
                &self.config,
            );
        }

        if clear_requested {
            let mut props = TableProps::default();
            let prepared = self.client.prepare(&self.items, &props);
            self.client
                .dispatch(TableMessage::ClearFilters, &prepared, &self.items, &mut props);
        }
        if selected.is_some() {
            self.selected = selected;
        }
    }

    fn draw_server(&mut self, ui: &mut egui::Ui) {
        let query = self.server.backend.query().clone();
        let loading = self.server.backend.is_loading();
        let page = self.server.backend.page();
        let sender = &self.server.sender;

        let mut selected = None;
        {
            let mut props = TableProps::new(TableMode::Server)
                .search(Controlled::new(
                    query.search_text.clone(),
                    forward(sender, StateChange::Search),
                ))
                .filters(Controlled::new(
                    query.filter_values.clone(),
                    forward(sender, |(key, value): (TableColumnKey, String)| {
                        StateChange::Filter { key, value }
                    }),
                ))
                .sort(Controlled::new(query.sort(), forward(sender, StateChange::Sort)))
                .page(Controlled::new(query.page, forward(sender, StateChange::Page)))
                .page_size(Controlled::new(
                    query.page_size,
                    forward(sender, StateChange::PageSize),
                ))
                .total_items(page.total_items)
                .loading(loading && page.items.is_empty())
                .empty_state(catalog_empty_state())
                .on_row_click(|item: &CatalogItem| selected = Some(item.sku.clone()))
                .on_empty_action({
                    let sender = sender.clone();
                    move || {
                        try_log_error!(
                            sender.send(StateChange::ClearFilters),
                            "Failed to reach the catalog backend"
                        );
                    }
                });
            draw_table(
                ui,
                "server_catalog",
                &mut self.server.table,
                &page.items,
                &mut props,
                &self.config,
            );
        }
        if loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(&self.config.labels.loading);
            });
        }
        if selected.is_some() {
            self.selected = selected;
        }
    }
}

impl eframe::App for TabulaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.server.backend.poll(Instant::now()) {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Catalog");
                ui.separator();
                let previous = self.mode;
                ui.selectable_value(&mut self.mode, TableMode::Client, "Client mode");
                ui.selectable_value(&mut self.mode, TableMode::Server, "Server mode");
                if self.mode != previous {
                    info!("Switched catalog to {} mode", self.mode);
                }
                ui.separator();
                ui.toggle_value(&mut self.show_logs, "Logs");
                if let Some(sku) = &self.selected {
                    ui.separator();
                    ui.label(format!("Selected: {sku}"));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.mode {
            TableMode::Client => self.draw_client(ui),
            TableMode::Server => self.draw_server(ui),
        });

        if self.show_logs {
            draw_log_window(ctx, &mut self.log_table, &self.config, &mut self.show_logs);
        }
    }
}
